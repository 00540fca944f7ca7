//! Text search over entries and senses.
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::base::{Extensible, Multitext};
use crate::entry::{Entry, Sense};
use crate::error::Result;
use crate::index::Item;

/// How the search text is compared with candidate texts. Always case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchType {
    Exact,
    #[default]
    Substring,
    Regex,
}

impl FromStr for MatchType {
    type Err = String;
    fn from_str(value: &str) -> std::result::Result<Self, String> {
        match value {
            "exact" => Ok(MatchType::Exact),
            "substring" | "contains" => Ok(MatchType::Substring),
            "regex" => Ok(MatchType::Regex),
            other => Err(format!("unknown match type: {other}")),
        }
    }
}

/// Which text of an item is searched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Gloss,
    Definition,
    GrammaticalInfo,
    LexicalUnit,
    Variant,
    /// A custom field, by the name its header definition gives it.
    Custom(String),
}

impl SearchField {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            None | Some("gloss") => SearchField::Gloss,
            Some("definition") => SearchField::Definition,
            Some("grammatical-info") => SearchField::GrammaticalInfo,
            Some("lexical-unit") => SearchField::LexicalUnit,
            Some("variant") => SearchField::Variant,
            Some(other) => SearchField::Custom(other.to_string()),
        }
    }
    pub fn searches_entries(&self) -> bool {
        matches!(
            self,
            SearchField::LexicalUnit | SearchField::Variant | SearchField::Custom(_)
        )
    }
    pub fn searches_senses(&self) -> bool {
        !matches!(self, SearchField::LexicalUnit | SearchField::Variant)
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchField::Gloss => f.write_str("gloss"),
            SearchField::Definition => f.write_str("definition"),
            SearchField::GrammaticalInfo => f.write_str("grammatical-info"),
            SearchField::LexicalUnit => f.write_str("lexical-unit"),
            SearchField::Variant => f.write_str("variant"),
            SearchField::Custom(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Exact(String),
    Substring(String),
    Regex(Regex),
}

impl Matcher {
    fn is_match(&self, candidate: &str) -> bool {
        match self {
            Matcher::Exact(text) => candidate == text,
            Matcher::Substring(text) => candidate.contains(text.as_str()),
            Matcher::Regex(pattern) => pattern.is_match(candidate),
        }
    }
}

/// A compiled search: the field to look in and the comparison to apply.
#[derive(Debug, Clone)]
pub struct Query {
    field: SearchField,
    matcher: Matcher,
}

impl Query {
    /// Fails only if `match_type` is [`MatchType::Regex`] and `text` is not a valid pattern.
    pub fn new(text: &str, field: Option<&str>, match_type: MatchType) -> Result<Self> {
        let matcher = match match_type {
            MatchType::Exact => Matcher::Exact(text.to_string()),
            MatchType::Substring => Matcher::Substring(text.to_string()),
            MatchType::Regex => Matcher::Regex(Regex::new(text)?),
        };
        Ok(Self {
            field: SearchField::from_name(field),
            matcher,
        })
    }
    pub fn field(&self) -> &SearchField {
        &self.field
    }
    fn any_text(&self, mut texts: impl Iterator<Item = String>) -> bool {
        texts.any(|text| self.matcher.is_match(&text))
    }
    fn any_multitext(&self, multitext: Option<&Multitext>) -> bool {
        multitext.is_some_and(|m| self.any_text(m.texts()))
    }
    fn any_custom_field(&self, name: &str, extensible: &Extensible) -> bool {
        extensible
            .field_items
            .iter()
            .filter(|field| field.name == name)
            .any(|field| self.any_text(field.multitext.texts()))
    }
    pub fn matches_entry(&self, entry: &Entry) -> bool {
        match &self.field {
            SearchField::LexicalUnit => self.any_multitext(entry.lexical_unit.as_ref()),
            SearchField::Variant => entry
                .variant_items
                .iter()
                .any(|variant| self.any_text(variant.multitext.texts())),
            SearchField::Custom(name) => self.any_custom_field(name, &entry.extensible),
            _ => false,
        }
    }
    pub fn matches_sense(&self, sense: &Sense) -> bool {
        match &self.field {
            SearchField::Gloss => self.any_text(sense.gloss_items.iter().map(|g| g.text.plain())),
            SearchField::Definition => self.any_multitext(sense.definition.as_ref()),
            SearchField::GrammaticalInfo => sense
                .grammatical_info_value()
                .is_some_and(|value| self.matcher.is_match(value)),
            SearchField::Custom(name) => self.any_custom_field(name, &sense.extensible),
            _ => false,
        }
    }
    /// Matching items in document order: each entry before its senses, senses pre-order.
    pub fn run<'a>(&self, entries: &'a [Entry], limit: Option<usize>) -> Vec<Item<'a>> {
        let limit = limit.unwrap_or(usize::MAX);
        let mut found = Vec::new();
        for entry in entries {
            if found.len() >= limit {
                break;
            }
            if self.field.searches_entries() && self.matches_entry(entry) {
                found.push(Item::Entry(entry));
            }
            if self.field.searches_senses() {
                for (_, sense) in entry.senses() {
                    if found.len() >= limit {
                        break;
                    }
                    if self.matches_sense(sense) {
                        found.push(Item::Sense(sense));
                    }
                }
            }
        }
        found.truncate(limit);
        found
    }
}

//! Entries and everything they own: senses, examples, notes, relations,
//! variants, pronunciations, etymologies and reversals.
//!
//! Every `add_*` and `set_*` stamps `dateModified` on the item it is called
//! on. The owning entry is stamped when the item is reached through
//! [`Lexicon::entry_mut`](crate::Lexicon::entry_mut),
//! [`Lexicon::edit_entry`](crate::Lexicon::edit_entry),
//! [`Lexicon::edit_sense`](crate::Lexicon::edit_sense) or
//! [`Entry::sense_at_mut`]. Writing to the public fields directly stamps nothing.
use std::fmt;

use crate::base::{Extensible, Form, Gloss, Multitext, UrlRef};
use crate::binder::{self, lift_element};
use crate::datatype::{DateTime, Key, RefId};
use crate::error::{LiftError, Result};

// ------------- Note -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    pub r#type: Option<Key>,
    pub multitext: Multitext,
    pub extensible: Extensible,
}
lift_element!(Note => Note {
    values { "type" => r#type }
    elements {}
    embeds { multitext, extensible }
});

impl Note {
    fn created(now: &DateTime) -> Self {
        let mut note = Self::default();
        note.extensible.stamp_created(now);
        note
    }
}

// ------------- Phonetic -------------
/// A pronunciation: phonetic forms and media files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Phonetic {
    pub multitext: Multitext,
    pub media_items: Vec<UrlRef>,
    pub extensible: Extensible,
}
lift_element!(Phonetic => Phonetic {
    values {}
    elements { "media_items" => media_items }
    embeds { multitext, extensible }
});

impl Phonetic {
    pub fn add_form(&mut self, lang: impl Into<String>, text: impl Into<String>) -> Result<usize> {
        self.multitext.form_items.push(Form::new(lang, text)?);
        self.extensible.touch(&DateTime::now());
        Ok(self.multitext.form_items.len() - 1)
    }
    pub fn add_media(&mut self, href: impl Into<String>) -> Result<usize> {
        self.media_items.push(UrlRef::new(href)?);
        self.extensible.touch(&DateTime::now());
        Ok(self.media_items.len() - 1)
    }
}

// ------------- Etymology -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Etymology {
    pub r#type: Key,
    pub source: String,
    pub gloss_items: Vec<Gloss>,
    pub form: Option<Form>,
    pub extensible: Extensible,
}
lift_element!(Etymology => Etymology {
    values { "type" => r#type, "source" => source }
    elements { "gloss_items" => gloss_items, "form" => form }
    embeds { extensible }
});

impl Etymology {
    pub fn new(r#type: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let etymology = Self {
            r#type: Key::new(r#type),
            source: source.into(),
            ..Default::default()
        };
        binder::check_required(&etymology)?;
        Ok(etymology)
    }
    pub fn add_gloss(&mut self, lang: impl Into<String>, text: impl Into<String>) -> Result<usize> {
        self.gloss_items.push(Gloss::new(lang, text)?);
        self.extensible.touch(&DateTime::now());
        Ok(self.gloss_items.len() - 1)
    }
    pub fn set_form(&mut self, lang: impl Into<String>, text: impl Into<String>) -> Result<()> {
        self.form = Some(Form::new(lang, text)?);
        self.extensible.touch(&DateTime::now());
        Ok(())
    }
}

impl fmt::Display for Etymology {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.r#type, self.source)
    }
}

// ------------- GrammaticalInfo -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrammaticalInfo {
    pub value: Key,
    pub trait_items: Vec<crate::base::Trait>,
}
lift_element!(GrammaticalInfo => GrammaticalInfo {
    values { "value" => value }
    elements { "trait_items" => trait_items }
    embeds {}
});

impl GrammaticalInfo {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let info = Self {
            value: Key::new(value),
            trait_items: Vec::new(),
        };
        binder::check_required(&info)?;
        Ok(info)
    }
}

impl fmt::Display for GrammaticalInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.value)?;
        for item in &self.trait_items {
            write!(f, "; {item}")?;
        }
        Ok(())
    }
}

// ------------- Reversal -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reversal {
    pub r#type: Option<Key>,
    pub multitext: Multitext,
    pub main: Option<Box<Reversal>>,
    pub grammatical_info: Option<GrammaticalInfo>,
}
lift_element!(Reversal => Reversal {
    values { "type" => r#type }
    elements { "main" => main, "grammatical_info" => grammatical_info }
    embeds { multitext }
});

// ------------- Translation -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translation {
    pub r#type: Option<Key>,
    pub multitext: Multitext,
}
lift_element!(Translation => Translation {
    values { "type" => r#type }
    elements {}
    embeds { multitext }
});

// ------------- Example -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Example {
    pub source: Option<Key>,
    pub multitext: Multitext,
    pub translation_items: Vec<Translation>,
    /// Only read and written in LIFT 0.15.
    pub note_items: Vec<Note>,
    pub extensible: Extensible,
}
lift_element!(Example => Example {
    values { "source" => source }
    elements { "translation_items" => translation_items, "note_items" => note_items }
    embeds { multitext, extensible }
});

impl Example {
    pub fn add_translation(&mut self) -> usize {
        self.translation_items.push(Translation::default());
        self.extensible.touch(&DateTime::now());
        self.translation_items.len() - 1
    }
    pub fn add_note(&mut self) -> usize {
        let now = DateTime::now();
        self.note_items.push(Note::created(&now));
        self.extensible.touch(&now);
        self.note_items.len() - 1
    }
}

// ------------- Relation -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relation {
    pub r#type: Key,
    /// Id of the related entry or sense; may dangle.
    pub r#ref: RefId,
    pub order: Option<i64>,
    pub usage: Option<Multitext>,
    pub extensible: Extensible,
}
lift_element!(Relation => Relation {
    values { "type" => r#type, "ref" => r#ref, "order" => order }
    elements { "usage" => usage }
    embeds { extensible }
});

impl Relation {
    pub fn new(r#type: impl Into<String>, r#ref: impl Into<String>) -> Result<Self> {
        let relation = Self {
            r#type: Key::new(r#type),
            r#ref: RefId::new(r#ref),
            ..Default::default()
        };
        binder::check_required(&relation)?;
        Ok(relation)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.r#type, self.r#ref)
    }
}

// ------------- Variant -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variant {
    pub r#ref: Option<RefId>,
    pub multitext: Multitext,
    pub pronunciation_items: Vec<Phonetic>,
    pub relation_items: Vec<Relation>,
    pub extensible: Extensible,
}
lift_element!(Variant => Variant {
    values { "ref" => r#ref }
    elements { "pronunciation_items" => pronunciation_items, "relation_items" => relation_items }
    embeds { multitext, extensible }
});

// ------------- Sense -------------
/// What `Sense::add_gloss` does when the sense already has a gloss in the same language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateGloss {
    /// Keep the existing gloss and add another one.
    #[default]
    Append,
    /// Remove the existing glosses in that language, then add.
    Replace,
    /// Fail with [`LiftError::DuplicateLang`].
    Reject,
}

/// A meaning of an entry. Its edits stamp the sense only; see the module
/// docs for how the entry date follows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sense {
    pub id: RefId,
    pub order: Option<i64>,
    pub grammatical_info: Option<GrammaticalInfo>,
    pub gloss_items: Vec<Gloss>,
    pub definition: Option<Multitext>,
    pub relation_items: Vec<Relation>,
    pub note_items: Vec<Note>,
    pub example_items: Vec<Example>,
    pub reversal_items: Vec<Reversal>,
    pub illustration_items: Vec<UrlRef>,
    pub subsense_items: Vec<Sense>,
    pub extensible: Extensible,
}
lift_element!(Sense => Sense {
    values { "id" => id, "order" => order }
    elements {
        "grammatical_info" => grammatical_info,
        "gloss_items" => gloss_items,
        "definition" => definition,
        "relation_items" => relation_items,
        "note_items" => note_items,
        "example_items" => example_items,
        "reversal_items" => reversal_items,
        "illustration_items" => illustration_items,
        "subsense_items" => subsense_items,
    }
    embeds { extensible }
});

impl Sense {
    /// A sense with a fresh id, created now.
    pub fn new() -> Self {
        let mut sense = Self {
            id: RefId::generate(),
            ..Default::default()
        };
        let now = DateTime::now();
        sense.extensible.stamp_created(&now);
        sense.extensible.touch(&now);
        sense
    }
    fn touch(&mut self) -> DateTime {
        let now = DateTime::now();
        self.extensible.touch(&now);
        now
    }
    pub fn add_example(&mut self) -> usize {
        let now = self.touch();
        let mut example = Example::default();
        example.extensible.stamp_created(&now);
        self.example_items.push(example);
        self.example_items.len() - 1
    }
    pub fn add_gloss(
        &mut self,
        lang: impl Into<String>,
        text: impl Into<String>,
        duplicate: DuplicateGloss,
    ) -> Result<usize> {
        let gloss = Gloss::new(lang, text)?;
        let exists = self.gloss_items.iter().any(|g| g.lang == gloss.lang);
        match duplicate {
            DuplicateGloss::Reject if exists => {
                return Err(LiftError::DuplicateLang {
                    lang: gloss.lang.to_string(),
                });
            }
            DuplicateGloss::Replace if exists => {
                self.gloss_items.retain(|g| g.lang != gloss.lang);
            }
            _ => {}
        }
        self.gloss_items.push(gloss);
        self.touch();
        Ok(self.gloss_items.len() - 1)
    }
    pub fn add_illustration(&mut self, href: impl Into<String>) -> Result<usize> {
        self.illustration_items.push(UrlRef::new(href)?);
        self.touch();
        Ok(self.illustration_items.len() - 1)
    }
    pub fn add_note(&mut self) -> usize {
        let now = self.touch();
        self.note_items.push(Note::created(&now));
        self.note_items.len() - 1
    }
    pub fn add_relation(
        &mut self,
        r#type: impl Into<String>,
        r#ref: impl Into<String>,
    ) -> Result<usize> {
        let mut relation = Relation::new(r#type, r#ref)?;
        let now = self.touch();
        relation.extensible.stamp_created(&now);
        self.relation_items.push(relation);
        Ok(self.relation_items.len() - 1)
    }
    pub fn add_reversal(&mut self) -> usize {
        self.reversal_items.push(Reversal::default());
        self.touch();
        self.reversal_items.len() - 1
    }
    pub fn add_subsense(&mut self) -> usize {
        self.subsense_items.push(Sense::new());
        self.touch();
        self.subsense_items.len() - 1
    }
    pub fn remove_subsense(&mut self, index: usize) -> Option<Sense> {
        (index < self.subsense_items.len()).then(|| {
            self.touch();
            self.subsense_items.remove(index)
        })
    }
    /// Replaces the definition with forms built from `(lang, text)` pairs.
    pub fn set_definition<I, L, T>(&mut self, forms: I) -> Result<()>
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        self.definition = Some(Multitext::from_forms(forms)?);
        self.touch();
        Ok(())
    }
    pub fn set_grammatical_info(&mut self, value: impl Into<String>) -> Result<()> {
        self.grammatical_info = Some(GrammaticalInfo::new(value)?);
        self.touch();
        Ok(())
    }
    /// The gloss in `lang`, or the first gloss if there is none in that language.
    pub fn gloss(&self, lang: &str) -> Option<&Gloss> {
        self.gloss_items
            .iter()
            .find(|g| g.lang == lang)
            .or_else(|| self.gloss_items.first())
    }
    pub fn grammatical_info_value(&self) -> Option<&Key> {
        self.grammatical_info.as_ref().map(|info| &info.value)
    }
    /// Follows `path` through the subsenses, marking each sense passed as modified.
    pub fn subsense_at_mut(&mut self, path: &[usize]) -> Option<&mut Sense> {
        let now = DateTime::now();
        let mut current = self;
        for &index in path {
            current.extensible.touch(&now);
            current = current.subsense_items.get_mut(index)?;
        }
        current.extensible.touch(&now);
        Some(current)
    }
    /// Gloss, part of speech and id, tab separated.
    pub fn summary_line(&self, lang: &str) -> String {
        format!(
            "{}\t{}\t{}",
            self.gloss(lang).map(|g| g.text.plain()).unwrap_or_default(),
            self.grammatical_info_value().map(|v| v.as_str()).unwrap_or_default(),
            self.id
        )
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.gloss("en") {
            Some(gloss) => write!(f, "{} ({})", gloss, self.id),
            None => write!(f, "({})", self.id),
        }
    }
}

/// Pre-order walk over a tree of senses, yielding each sense with its index path.
pub struct SenseWalk<'a> {
    stack: Vec<(Vec<usize>, &'a Sense)>,
}

impl<'a> SenseWalk<'a> {
    fn new(senses: &'a [Sense], prefix: &[usize]) -> Self {
        let stack = senses
            .iter()
            .enumerate()
            .rev()
            .map(|(i, sense)| {
                let mut path = prefix.to_vec();
                path.push(i);
                (path, sense)
            })
            .collect();
        Self { stack }
    }
}

impl<'a> Iterator for SenseWalk<'a> {
    type Item = (Vec<usize>, &'a Sense);
    fn next(&mut self) -> Option<Self::Item> {
        let (path, sense) = self.stack.pop()?;
        for (i, child) in sense.subsense_items.iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(i);
            self.stack.push((child_path, child));
        }
        Some((path, sense))
    }
}

// ------------- Entry -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    pub id: RefId,
    pub guid: Option<String>,
    pub order: Option<i64>,
    pub date_deleted: Option<DateTime>,
    pub lexical_unit: Option<Multitext>,
    pub citation: Option<Multitext>,
    pub pronunciation_items: Vec<Phonetic>,
    pub variant_items: Vec<Variant>,
    pub sense_items: Vec<Sense>,
    pub note_items: Vec<Note>,
    pub relation_items: Vec<Relation>,
    pub etymology_items: Vec<Etymology>,
    pub extensible: Extensible,
}
lift_element!(Entry => Entry {
    values { "id" => id, "guid" => guid, "order" => order, "date_deleted" => date_deleted }
    elements {
        "lexical_unit" => lexical_unit,
        "citation" => citation,
        "pronunciation_items" => pronunciation_items,
        "variant_items" => variant_items,
        "sense_items" => sense_items,
        "note_items" => note_items,
        "relation_items" => relation_items,
        "etymology_items" => etymology_items,
    }
    embeds { extensible }
});

impl Entry {
    /// An entry with a fresh id, created now.
    pub fn new() -> Self {
        Self::with_id(RefId::generate())
    }
    pub fn with_id(id: RefId) -> Self {
        let mut entry = Self {
            id,
            ..Default::default()
        };
        let now = DateTime::now();
        entry.extensible.stamp_created(&now);
        entry.extensible.touch(&now);
        entry
    }
    pub fn touch(&mut self) -> DateTime {
        let now = DateTime::now();
        self.extensible.touch(&now);
        now
    }
    pub fn add_etymology(
        &mut self,
        r#type: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<usize> {
        let mut etymology = Etymology::new(r#type, source)?;
        let now = self.touch();
        etymology.extensible.stamp_created(&now);
        self.etymology_items.push(etymology);
        Ok(self.etymology_items.len() - 1)
    }
    pub fn add_note(&mut self) -> usize {
        let now = self.touch();
        self.note_items.push(Note::created(&now));
        self.note_items.len() - 1
    }
    pub fn add_pronunciation(&mut self) -> usize {
        let now = self.touch();
        let mut pronunciation = Phonetic::default();
        pronunciation.extensible.stamp_created(&now);
        self.pronunciation_items.push(pronunciation);
        self.pronunciation_items.len() - 1
    }
    pub fn add_relation(
        &mut self,
        r#type: impl Into<String>,
        r#ref: impl Into<String>,
    ) -> Result<usize> {
        let mut relation = Relation::new(r#type, r#ref)?;
        let now = self.touch();
        relation.extensible.stamp_created(&now);
        self.relation_items.push(relation);
        Ok(self.relation_items.len() - 1)
    }
    pub fn add_sense(&mut self) -> usize {
        self.sense_items.push(Sense::new());
        self.touch();
        self.sense_items.len() - 1
    }
    pub fn add_variant(&mut self) -> usize {
        let now = self.touch();
        let mut variant = Variant::default();
        variant.extensible.stamp_created(&now);
        self.variant_items.push(variant);
        self.variant_items.len() - 1
    }
    pub fn remove_sense(&mut self, index: usize) -> Option<Sense> {
        (index < self.sense_items.len()).then(|| {
            self.touch();
            self.sense_items.remove(index)
        })
    }
    /// Replaces all lexical-unit forms with `(lang, text)` pairs.
    pub fn set_lexical_unit<I, L, T>(&mut self, forms: I) -> Result<()>
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        self.lexical_unit = Some(Multitext::from_forms(forms)?);
        self.touch();
        Ok(())
    }
    /// Replaces all citation forms with `(lang, text)` pairs.
    pub fn set_citation<I, L, T>(&mut self, forms: I) -> Result<()>
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        self.citation = Some(Multitext::from_forms(forms)?);
        self.touch();
        Ok(())
    }
    /// The sense at `path` (sense index, then subsense indexes) for editing.
    ///
    /// The entry and every sense on the way are marked as modified.
    pub fn sense_at_mut(&mut self, path: &[usize]) -> Option<&mut Sense> {
        let (first, rest) = path.split_first()?;
        self.touch();
        self.sense_items.get_mut(*first)?.subsense_at_mut(rest)
    }
    pub fn sense_at(&self, path: &[usize]) -> Option<&Sense> {
        let (first, rest) = path.split_first()?;
        let mut current = self.sense_items.get(*first)?;
        for &index in rest {
            current = current.subsense_items.get(index)?;
        }
        Some(current)
    }
    /// All senses and subsenses in document order, with their index paths.
    pub fn senses(&self) -> SenseWalk<'_> {
        SenseWalk::new(&self.sense_items, &[])
    }
    /// The first citation form, or else the first lexical-unit form.
    pub fn headword(&self) -> Option<String> {
        self.citation
            .iter()
            .chain(self.lexical_unit.iter())
            .find_map(|multitext| multitext.form_items.first())
            .map(|form| form.text.plain())
    }
    /// Headword followed by one summary line per top-level sense.
    pub fn summary_line(&self, lang: &str) -> String {
        let mut line = self.headword().unwrap_or_default();
        for sense in &self.sense_items {
            line.push_str("\n  ");
            line.push_str(&sense.summary_line(lang));
        }
        line
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} senses)",
            self.headword().unwrap_or_default(),
            self.id,
            self.sense_items.len()
        )
    }
}

//! The lexicon header: field definitions and the ranges of controlled vocabulary.
use std::fmt;

use crate::base::{Extensible, Multitext};
use crate::binder::{self, lift_element};
use crate::datatype::{Key, Lang, Url};
use crate::error::Result;

// ------------- FieldDefinition -------------
/// Declares a custom field used by `field` elements in the entries.
///
/// LIFT 0.13 only carries the name (as `tag`) and a multitext description
/// inline; 0.15 adds class, type, option range, writing system, label and
/// description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDefinition {
    pub name: Key,
    pub class: Option<String>,
    pub r#type: Option<Key>,
    pub option_range: Option<Key>,
    pub writing_system: Option<Lang>,
    pub label: Option<Multitext>,
    pub description: Option<Multitext>,
    pub multitext: Multitext,
}
lift_element!(FieldDefinition => FieldDefinition {
    values {
        "name" => name,
        "class" => class,
        "type" => r#type,
        "option_range" => option_range,
        "writing_system" => writing_system,
    }
    elements { "label" => label, "description" => description }
    embeds { multitext }
});

impl FieldDefinition {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let definition = Self {
            name: Key::new(name),
            ..Default::default()
        };
        binder::check_required(&definition)?;
        Ok(definition)
    }
}

impl fmt::Display for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    pub field_definition_items: Vec<FieldDefinition>,
}
lift_element!(Fields => Fields {
    values {}
    elements { "field_definition_items" => field_definition_items }
    embeds {}
});

impl Fields {
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.field_definition_items.iter().find(|d| d.name == name)
    }
    pub fn names(&self) -> impl Iterator<Item = &Key> {
        self.field_definition_items.iter().map(|d| &d.name)
    }
}

// ------------- Range -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeElement {
    pub id: Key,
    /// Id of another element of the same range.
    pub parent: Option<Key>,
    pub guid: Option<String>,
    pub description_items: Vec<Multitext>,
    pub label_items: Vec<Multitext>,
    pub abbrev_items: Vec<Multitext>,
    pub extensible: Extensible,
}
lift_element!(RangeElement => RangeElement {
    values { "id" => id, "parent" => parent, "guid" => guid }
    elements {
        "description_items" => description_items,
        "label_items" => label_items,
        "abbrev_items" => abbrev_items,
    }
    embeds { extensible }
});

impl RangeElement {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let element = Self {
            id: Key::new(id),
            ..Default::default()
        };
        binder::check_required(&element)?;
        Ok(element)
    }
}

/// A controlled vocabulary, possibly defined in an external `.lift-ranges` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Range {
    pub id: Key,
    pub guid: Option<String>,
    pub href: Option<Url>,
    pub description_items: Vec<Multitext>,
    pub label_items: Vec<Multitext>,
    pub abbrev_items: Vec<Multitext>,
    pub range_element_items: Vec<RangeElement>,
    pub extensible: Extensible,
}
lift_element!(Range => Range {
    values { "id" => id, "guid" => guid, "href" => href }
    elements {
        "description_items" => description_items,
        "label_items" => label_items,
        "abbrev_items" => abbrev_items,
        "range_element_items" => range_element_items,
    }
    embeds { extensible }
});

impl Range {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let range = Self {
            id: Key::new(id),
            ..Default::default()
        };
        binder::check_required(&range)?;
        Ok(range)
    }
    pub fn element(&self, id: &str) -> Option<&RangeElement> {
        self.range_element_items.iter().find(|e| e.id == id)
    }
    pub fn add_element(&mut self, id: impl Into<String>) -> Result<usize> {
        self.range_element_items.push(RangeElement::new(id)?);
        Ok(self.range_element_items.len() - 1)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({} elements)", self.id, self.range_element_items.len())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranges {
    pub range_items: Vec<Range>,
}
lift_element!(Ranges => Ranges {
    values {}
    elements { "range_items" => range_items }
    embeds {}
});

impl Ranges {
    pub fn get(&self, id: &str) -> Option<&Range> {
        self.range_items.iter().find(|r| r.id == id)
    }
}

// ------------- Header -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub description: Option<Multitext>,
    pub ranges: Option<Ranges>,
    pub fields: Option<Fields>,
}
lift_element!(Header => Header {
    values {}
    elements { "description" => description, "ranges" => ranges, "fields" => fields }
    embeds {}
});

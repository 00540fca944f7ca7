//! Property descriptors for every LIFT element kind, per schema version.
//!
//! Each [`Descriptor`] lists the attributes and the child elements of one
//! element kind in canonical order. Embedded groups (the Multitext forms and
//! the Extensible dates, fields, traits and annotations) are separate constant
//! slices that several descriptors share, so the binder never needs to know
//! which entity embeds what.
use std::fmt;

use crate::config::LiftVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Span,
    Text,
    Form,
    Multitext,
    Gloss,
    Trait,
    Annotation,
    Field,
    UrlRef,
    Extensible,
    FieldDefinition,
    Fields,
    RangeElement,
    Range,
    Ranges,
    Header,
    Note,
    Phonetic,
    Etymology,
    GrammaticalInfo,
    Reversal,
    Translation,
    Example,
    Relation,
    Variant,
    Sense,
    Entry,
    Lexicon,
}

impl Kind {
    pub const ALL: [Kind; 28] = [
        Kind::Span,
        Kind::Text,
        Kind::Form,
        Kind::Multitext,
        Kind::Gloss,
        Kind::Trait,
        Kind::Annotation,
        Kind::Field,
        Kind::UrlRef,
        Kind::Extensible,
        Kind::FieldDefinition,
        Kind::Fields,
        Kind::RangeElement,
        Kind::Range,
        Kind::Ranges,
        Kind::Header,
        Kind::Note,
        Kind::Phonetic,
        Kind::Etymology,
        Kind::GrammaticalInfo,
        Kind::Reversal,
        Kind::Translation,
        Kind::Example,
        Kind::Relation,
        Kind::Variant,
        Kind::Sense,
        Kind::Entry,
        Kind::Lexicon,
    ];

    /// Tag used when an element of this kind is written on its own.
    pub fn default_tag(&self) -> &'static str {
        match self {
            Kind::Span => "span",
            Kind::Text => "text",
            Kind::Form => "form",
            Kind::Multitext => "multitext",
            Kind::Gloss => "gloss",
            Kind::Trait => "trait",
            Kind::Annotation => "annotation",
            Kind::Field => "field",
            Kind::UrlRef => "media",
            Kind::Extensible => "extensible",
            Kind::FieldDefinition => "field",
            Kind::Fields => "fields",
            Kind::RangeElement => "range-element",
            Kind::Range => "range",
            Kind::Ranges => "ranges",
            Kind::Header => "header",
            Kind::Note => "note",
            Kind::Phonetic => "pronunciation",
            Kind::Etymology => "etymology",
            Kind::GrammaticalInfo => "grammatical-info",
            Kind::Reversal => "reversal",
            Kind::Translation => "translation",
            Kind::Example => "example",
            Kind::Relation => "relation",
            Kind::Variant => "variant",
            Kind::Sense => "sense",
            Kind::Entry => "entry",
            Kind::Lexicon => "lift",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropType {
    Key,
    Lang,
    Url,
    DateTime,
    RefId,
    /// Leading character data of a mixed-content element.
    PCData,
    /// Character data following a span, up to the next sibling element.
    Tail,
    Str,
    Int,
    Element(Kind),
}

impl PropType {
    /// Name of the data type a value slot of this type holds.
    pub fn data_type(&self) -> Option<&'static str> {
        match self {
            PropType::Key => Some("Key"),
            PropType::Lang => Some("Lang"),
            PropType::Url => Some("URL"),
            PropType::DateTime => Some("DateTime"),
            PropType::RefId => Some("RefId"),
            PropType::PCData | PropType::Tail => Some("PCData"),
            PropType::Str => Some("String"),
            PropType::Int => Some("i64"),
            PropType::Element(_) => None,
        }
    }
    /// Whether the property is stored in a value slot rather than as child elements.
    pub fn is_value(&self) -> bool {
        !matches!(self, PropType::Element(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prop {
    /// Field name on the entity.
    pub name: &'static str,
    /// Attribute or tag name in the XML document.
    pub xml: &'static str,
    pub required: bool,
    pub cardinality: Cardinality,
    pub ty: PropType,
}

const fn attr(name: &'static str, xml: &'static str, ty: PropType) -> Prop {
    Prop { name, xml, required: false, cardinality: Cardinality::One, ty }
}
const fn required_attr(name: &'static str, xml: &'static str, ty: PropType) -> Prop {
    Prop { name, xml, required: true, cardinality: Cardinality::One, ty }
}
const fn one(name: &'static str, xml: &'static str, kind: Kind) -> Prop {
    Prop { name, xml, required: false, cardinality: Cardinality::One, ty: PropType::Element(kind) }
}
const fn required_one(name: &'static str, xml: &'static str, kind: Kind) -> Prop {
    Prop { name, xml, required: true, cardinality: Cardinality::One, ty: PropType::Element(kind) }
}
const fn many(name: &'static str, xml: &'static str, kind: Kind) -> Prop {
    Prop { name, xml, required: false, cardinality: Cardinality::Many, ty: PropType::Element(kind) }
}
const fn text_slot(name: &'static str, xml: &'static str, ty: PropType) -> Prop {
    Prop { name, xml, required: false, cardinality: Cardinality::One, ty }
}

#[derive(Debug)]
pub struct Descriptor {
    pub kind: Kind,
    attributes: &'static [&'static [Prop]],
    elements: &'static [&'static [Prop]],
}

impl Descriptor {
    pub fn attributes(&self) -> impl Iterator<Item = &'static Prop> + '_ {
        self.attributes.iter().flat_map(|group| group.iter())
    }
    pub fn elements(&self) -> impl Iterator<Item = &'static Prop> + '_ {
        self.elements.iter().flat_map(|group| group.iter())
    }
    pub fn props(&self) -> impl Iterator<Item = &'static Prop> + '_ {
        self.attributes().chain(self.elements())
    }
    pub fn attribute_by_xml(&self, xml: &str) -> Option<&'static Prop> {
        self.attributes().find(|p| p.xml == xml)
    }
    /// Child element descriptor by tag; text slots are never matched.
    pub fn element_by_xml(&self, xml: &str) -> Option<&'static Prop> {
        self.elements().find(|p| !p.ty.is_value() && p.xml == xml)
    }
    pub fn prop(&self, name: &str) -> Option<&'static Prop> {
        self.props().find(|p| p.name == name)
    }
    /// The slot with the given text type (pcdata or tail), if the kind has one.
    pub fn text_slot(&self, ty: PropType) -> Option<&'static Prop> {
        self.elements().find(|p| p.ty == ty)
    }
    pub fn prop_name_from_xml_name(&self, xml: &str) -> Option<&'static str> {
        self.attribute_by_xml(xml)
            .or_else(|| self.element_by_xml(xml))
            .map(|p| p.name)
    }
    pub fn xml_name_from_prop_name(&self, name: &str) -> Option<&'static str> {
        self.prop(name).map(|p| p.xml)
    }
}

// ------------- Shared groups -------------
const NONE: &[Prop] = &[];

const EXTENSIBLE_ATTRIBUTES: &[Prop] = &[
    attr("date_created", "dateCreated", PropType::DateTime),
    attr("date_modified", "dateModified", PropType::DateTime),
];
const EXTENSIBLE_ELEMENTS: &[Prop] = &[
    many("field_items", "field", Kind::Field),
    many("trait_items", "trait", Kind::Trait),
    many("annotation_items", "annotation", Kind::Annotation),
];

// v0.13 still allows a bare <text> in place of forms.
const MULTITEXT_ELEMENTS_13: &[Prop] = &[
    many("form_items", "form", Kind::Form),
    one("text", "text", Kind::Text),
];
const MULTITEXT_ELEMENTS_15: &[Prop] = &[many("form_items", "form", Kind::Form)];

// ------------- Base elements -------------
const SPAN_ATTRIBUTES: &[Prop] = &[
    attr("lang", "lang", PropType::Lang),
    attr("href", "href", PropType::Url),
    attr("class", "class", PropType::Str),
];
const SPAN_ELEMENTS: &[Prop] = &[
    text_slot("pcdata", "#pcdata", PropType::PCData),
    many("span_items", "span", Kind::Span),
    text_slot("tail", "#tail", PropType::Tail),
];
const TEXT_ELEMENTS: &[Prop] = &[
    text_slot("pcdata", "#pcdata", PropType::PCData),
    many("span_items", "span", Kind::Span),
];
const FORM_ATTRIBUTES: &[Prop] = &[required_attr("lang", "lang", PropType::Lang)];
const FORM_ELEMENTS: &[Prop] = &[
    required_one("text", "text", Kind::Text),
    many("annotation_items", "annotation", Kind::Annotation),
];
const GLOSS_ELEMENTS_15: &[Prop] = &[
    required_one("text", "text", Kind::Text),
    many("annotation_items", "annotation", Kind::Annotation),
    many("trait_items", "trait", Kind::Trait),
];
const TRAIT_ATTRIBUTES: &[Prop] = &[
    required_attr("name", "name", PropType::Key),
    required_attr("value", "value", PropType::Key),
    attr("id", "id", PropType::Key),
];
const ANNOTATION_ONLY: &[Prop] = &[many("annotation_items", "annotation", Kind::Annotation)];
const ANNOTATION_ATTRIBUTES: &[Prop] = &[
    required_attr("name", "name", PropType::Key),
    required_attr("value", "value", PropType::Key),
    attr("who", "who", PropType::Key),
    attr("when", "when", PropType::DateTime),
];
const FIELD_ATTRIBUTES_13: &[Prop] = &[required_attr("name", "type", PropType::Key)];
const FIELD_ATTRIBUTES_15: &[Prop] = &[required_attr("name", "name", PropType::Key)];
const FIELD_ELEMENTS: &[Prop] = &[
    many("trait_items", "trait", Kind::Trait),
    many("annotation_items", "annotation", Kind::Annotation),
];
const URLREF_ATTRIBUTES: &[Prop] = &[required_attr("href", "href", PropType::Url)];
const URLREF_ELEMENTS: &[Prop] = &[one("label", "label", Kind::Multitext)];

static SPAN: Descriptor = Descriptor {
    kind: Kind::Span,
    attributes: &[SPAN_ATTRIBUTES],
    elements: &[SPAN_ELEMENTS],
};
static TEXT: Descriptor = Descriptor {
    kind: Kind::Text,
    attributes: &[NONE],
    elements: &[TEXT_ELEMENTS],
};
static FORM: Descriptor = Descriptor {
    kind: Kind::Form,
    attributes: &[FORM_ATTRIBUTES],
    elements: &[FORM_ELEMENTS],
};
static MULTITEXT_13: Descriptor = Descriptor {
    kind: Kind::Multitext,
    attributes: &[NONE],
    elements: &[MULTITEXT_ELEMENTS_13],
};
static MULTITEXT_15: Descriptor = Descriptor {
    kind: Kind::Multitext,
    attributes: &[NONE],
    elements: &[MULTITEXT_ELEMENTS_15],
};
static GLOSS_13: Descriptor = Descriptor {
    kind: Kind::Gloss,
    attributes: &[FORM_ATTRIBUTES],
    elements: &[FORM_ELEMENTS],
};
static GLOSS_15: Descriptor = Descriptor {
    kind: Kind::Gloss,
    attributes: &[FORM_ATTRIBUTES],
    elements: &[GLOSS_ELEMENTS_15],
};
static TRAIT: Descriptor = Descriptor {
    kind: Kind::Trait,
    attributes: &[TRAIT_ATTRIBUTES],
    elements: &[ANNOTATION_ONLY],
};
static ANNOTATION_13: Descriptor = Descriptor {
    kind: Kind::Annotation,
    attributes: &[ANNOTATION_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_13],
};
static ANNOTATION_15: Descriptor = Descriptor {
    kind: Kind::Annotation,
    attributes: &[ANNOTATION_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_15],
};
static FIELD_13: Descriptor = Descriptor {
    kind: Kind::Field,
    attributes: &[FIELD_ATTRIBUTES_13, EXTENSIBLE_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_13, FIELD_ELEMENTS],
};
static FIELD_15: Descriptor = Descriptor {
    kind: Kind::Field,
    attributes: &[FIELD_ATTRIBUTES_15, EXTENSIBLE_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_15, FIELD_ELEMENTS],
};
static URLREF: Descriptor = Descriptor {
    kind: Kind::UrlRef,
    attributes: &[URLREF_ATTRIBUTES],
    elements: &[URLREF_ELEMENTS],
};
static EXTENSIBLE: Descriptor = Descriptor {
    kind: Kind::Extensible,
    attributes: &[EXTENSIBLE_ATTRIBUTES],
    elements: &[EXTENSIBLE_ELEMENTS],
};

// ------------- Header elements -------------
const FIELD_DEFINITION_ATTRIBUTES_13: &[Prop] = &[required_attr("name", "tag", PropType::Key)];
const FIELD_DEFINITION_ATTRIBUTES_15: &[Prop] = &[
    required_attr("name", "name", PropType::Key),
    attr("class", "class", PropType::Str),
    attr("type", "type", PropType::Key),
    attr("option_range", "option-range", PropType::Key),
    attr("writing_system", "writing-system", PropType::Lang),
];
const FIELD_DEFINITION_ELEMENTS_15: &[Prop] = &[
    one("label", "label", Kind::Multitext),
    one("description", "description", Kind::Multitext),
];
const FIELDS_ELEMENTS: &[Prop] =
    &[many("field_definition_items", "field", Kind::FieldDefinition)];
const RANGE_ELEMENT_ATTRIBUTES: &[Prop] = &[
    required_attr("id", "id", PropType::Key),
    attr("parent", "parent", PropType::Key),
    attr("guid", "guid", PropType::Str),
];
const RANGE_ELEMENT_ELEMENTS: &[Prop] = &[
    many("description_items", "description", Kind::Multitext),
    many("label_items", "label", Kind::Multitext),
    many("abbrev_items", "abbrev", Kind::Multitext),
];
const RANGE_ATTRIBUTES: &[Prop] = &[
    required_attr("id", "id", PropType::Key),
    attr("guid", "guid", PropType::Str),
    attr("href", "href", PropType::Url),
];
const RANGE_ELEMENTS: &[Prop] = &[
    many("description_items", "description", Kind::Multitext),
    many("label_items", "label", Kind::Multitext),
    many("abbrev_items", "abbrev", Kind::Multitext),
    many("range_element_items", "range-element", Kind::RangeElement),
];
const RANGES_ELEMENTS: &[Prop] = &[many("range_items", "range", Kind::Range)];
const HEADER_ELEMENTS: &[Prop] = &[
    one("description", "description", Kind::Multitext),
    one("ranges", "ranges", Kind::Ranges),
    one("fields", "fields", Kind::Fields),
];

static FIELD_DEFINITION_13: Descriptor = Descriptor {
    kind: Kind::FieldDefinition,
    attributes: &[FIELD_DEFINITION_ATTRIBUTES_13],
    elements: &[MULTITEXT_ELEMENTS_13],
};
static FIELD_DEFINITION_15: Descriptor = Descriptor {
    kind: Kind::FieldDefinition,
    attributes: &[FIELD_DEFINITION_ATTRIBUTES_15],
    elements: &[FIELD_DEFINITION_ELEMENTS_15],
};
static FIELDS: Descriptor = Descriptor {
    kind: Kind::Fields,
    attributes: &[NONE],
    elements: &[FIELDS_ELEMENTS],
};
static RANGE_ELEMENT: Descriptor = Descriptor {
    kind: Kind::RangeElement,
    attributes: &[RANGE_ELEMENT_ATTRIBUTES, EXTENSIBLE_ATTRIBUTES],
    elements: &[RANGE_ELEMENT_ELEMENTS, EXTENSIBLE_ELEMENTS],
};
static RANGE: Descriptor = Descriptor {
    kind: Kind::Range,
    attributes: &[RANGE_ATTRIBUTES, EXTENSIBLE_ATTRIBUTES],
    elements: &[RANGE_ELEMENTS, EXTENSIBLE_ELEMENTS],
};
static RANGES: Descriptor = Descriptor {
    kind: Kind::Ranges,
    attributes: &[NONE],
    elements: &[RANGES_ELEMENTS],
};
static HEADER: Descriptor = Descriptor {
    kind: Kind::Header,
    attributes: &[NONE],
    elements: &[HEADER_ELEMENTS],
};

// ------------- Lexicon elements -------------
const TYPE_ATTRIBUTE: &[Prop] = &[attr("type", "type", PropType::Key)];
const PHONETIC_ELEMENTS: &[Prop] = &[many("media_items", "media", Kind::UrlRef)];
const ETYMOLOGY_ATTRIBUTES: &[Prop] = &[
    required_attr("type", "type", PropType::Key),
    required_attr("source", "source", PropType::Str),
];
const ETYMOLOGY_ELEMENTS: &[Prop] = &[
    many("gloss_items", "gloss", Kind::Gloss),
    one("form", "form", Kind::Form),
];
const GRAMMATICAL_INFO_ATTRIBUTES: &[Prop] = &[required_attr("value", "value", PropType::Key)];
const GRAMMATICAL_INFO_ELEMENTS: &[Prop] = &[many("trait_items", "trait", Kind::Trait)];
const REVERSAL_ELEMENTS: &[Prop] = &[
    one("main", "main", Kind::Reversal),
    one("grammatical_info", "grammatical-info", Kind::GrammaticalInfo),
];
const EXAMPLE_ATTRIBUTES: &[Prop] = &[attr("source", "source", PropType::Key)];
const EXAMPLE_ELEMENTS_13: &[Prop] = &[many("translation_items", "translation", Kind::Translation)];
const EXAMPLE_ELEMENTS_15: &[Prop] = &[
    many("translation_items", "translation", Kind::Translation),
    many("note_items", "note", Kind::Note),
];
const RELATION_ATTRIBUTES: &[Prop] = &[
    required_attr("type", "type", PropType::Key),
    required_attr("ref", "ref", PropType::RefId),
    attr("order", "order", PropType::Int),
];
const RELATION_ELEMENTS: &[Prop] = &[one("usage", "usage", Kind::Multitext)];
const VARIANT_ATTRIBUTES: &[Prop] = &[attr("ref", "ref", PropType::RefId)];
const VARIANT_ELEMENTS: &[Prop] = &[
    many("pronunciation_items", "pronunciation", Kind::Phonetic),
    many("relation_items", "relation", Kind::Relation),
];
const SENSE_ATTRIBUTES: &[Prop] = &[
    required_attr("id", "id", PropType::RefId),
    attr("order", "order", PropType::Int),
];
const SENSE_ELEMENTS: &[Prop] = &[
    one("grammatical_info", "grammatical-info", Kind::GrammaticalInfo),
    many("gloss_items", "gloss", Kind::Gloss),
    one("definition", "definition", Kind::Multitext),
    many("relation_items", "relation", Kind::Relation),
    many("note_items", "note", Kind::Note),
    many("example_items", "example", Kind::Example),
    many("reversal_items", "reversal", Kind::Reversal),
    many("illustration_items", "illustration", Kind::UrlRef),
    many("subsense_items", "subsense", Kind::Sense),
];
const ENTRY_ATTRIBUTES: &[Prop] = &[
    required_attr("id", "id", PropType::RefId),
    attr("guid", "guid", PropType::Str),
    attr("order", "order", PropType::Int),
    attr("date_deleted", "dateDeleted", PropType::DateTime),
];
const ENTRY_ELEMENTS: &[Prop] = &[
    one("lexical_unit", "lexical-unit", Kind::Multitext),
    one("citation", "citation", Kind::Multitext),
    many("pronunciation_items", "pronunciation", Kind::Phonetic),
    many("variant_items", "variant", Kind::Variant),
    many("sense_items", "sense", Kind::Sense),
    many("note_items", "note", Kind::Note),
    many("relation_items", "relation", Kind::Relation),
    many("etymology_items", "etymology", Kind::Etymology),
];
const LEXICON_ATTRIBUTES: &[Prop] = &[
    required_attr("version", "version", PropType::Str),
    attr("producer", "producer", PropType::Str),
];
const LEXICON_ELEMENTS: &[Prop] = &[
    one("header", "header", Kind::Header),
    many("entry_items", "entry", Kind::Entry),
];

static NOTE_13: Descriptor = Descriptor {
    kind: Kind::Note,
    attributes: &[TYPE_ATTRIBUTE, EXTENSIBLE_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_13, EXTENSIBLE_ELEMENTS],
};
static NOTE_15: Descriptor = Descriptor {
    kind: Kind::Note,
    attributes: &[TYPE_ATTRIBUTE, EXTENSIBLE_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_15, EXTENSIBLE_ELEMENTS],
};
static PHONETIC_13: Descriptor = Descriptor {
    kind: Kind::Phonetic,
    attributes: &[EXTENSIBLE_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_13, PHONETIC_ELEMENTS, EXTENSIBLE_ELEMENTS],
};
static PHONETIC_15: Descriptor = Descriptor {
    kind: Kind::Phonetic,
    attributes: &[EXTENSIBLE_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_15, PHONETIC_ELEMENTS, EXTENSIBLE_ELEMENTS],
};
static ETYMOLOGY: Descriptor = Descriptor {
    kind: Kind::Etymology,
    attributes: &[ETYMOLOGY_ATTRIBUTES, EXTENSIBLE_ATTRIBUTES],
    elements: &[ETYMOLOGY_ELEMENTS, EXTENSIBLE_ELEMENTS],
};
static GRAMMATICAL_INFO: Descriptor = Descriptor {
    kind: Kind::GrammaticalInfo,
    attributes: &[GRAMMATICAL_INFO_ATTRIBUTES],
    elements: &[GRAMMATICAL_INFO_ELEMENTS],
};
static REVERSAL_13: Descriptor = Descriptor {
    kind: Kind::Reversal,
    attributes: &[TYPE_ATTRIBUTE],
    elements: &[MULTITEXT_ELEMENTS_13, REVERSAL_ELEMENTS],
};
static REVERSAL_15: Descriptor = Descriptor {
    kind: Kind::Reversal,
    attributes: &[TYPE_ATTRIBUTE],
    elements: &[MULTITEXT_ELEMENTS_15, REVERSAL_ELEMENTS],
};
static TRANSLATION_13: Descriptor = Descriptor {
    kind: Kind::Translation,
    attributes: &[TYPE_ATTRIBUTE],
    elements: &[MULTITEXT_ELEMENTS_13],
};
static TRANSLATION_15: Descriptor = Descriptor {
    kind: Kind::Translation,
    attributes: &[TYPE_ATTRIBUTE],
    elements: &[MULTITEXT_ELEMENTS_15],
};
static EXAMPLE_13: Descriptor = Descriptor {
    kind: Kind::Example,
    attributes: &[EXAMPLE_ATTRIBUTES, EXTENSIBLE_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_13, EXAMPLE_ELEMENTS_13, EXTENSIBLE_ELEMENTS],
};
static EXAMPLE_15: Descriptor = Descriptor {
    kind: Kind::Example,
    attributes: &[EXAMPLE_ATTRIBUTES, EXTENSIBLE_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_15, EXAMPLE_ELEMENTS_15, EXTENSIBLE_ELEMENTS],
};
static RELATION: Descriptor = Descriptor {
    kind: Kind::Relation,
    attributes: &[RELATION_ATTRIBUTES, EXTENSIBLE_ATTRIBUTES],
    elements: &[RELATION_ELEMENTS, EXTENSIBLE_ELEMENTS],
};
static VARIANT_13: Descriptor = Descriptor {
    kind: Kind::Variant,
    attributes: &[VARIANT_ATTRIBUTES, EXTENSIBLE_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_13, VARIANT_ELEMENTS, EXTENSIBLE_ELEMENTS],
};
static VARIANT_15: Descriptor = Descriptor {
    kind: Kind::Variant,
    attributes: &[VARIANT_ATTRIBUTES, EXTENSIBLE_ATTRIBUTES],
    elements: &[MULTITEXT_ELEMENTS_15, VARIANT_ELEMENTS, EXTENSIBLE_ELEMENTS],
};
static SENSE: Descriptor = Descriptor {
    kind: Kind::Sense,
    attributes: &[SENSE_ATTRIBUTES, EXTENSIBLE_ATTRIBUTES],
    elements: &[SENSE_ELEMENTS, EXTENSIBLE_ELEMENTS],
};
static ENTRY: Descriptor = Descriptor {
    kind: Kind::Entry,
    attributes: &[ENTRY_ATTRIBUTES, EXTENSIBLE_ATTRIBUTES],
    elements: &[ENTRY_ELEMENTS, EXTENSIBLE_ELEMENTS],
};
static LEXICON: Descriptor = Descriptor {
    kind: Kind::Lexicon,
    attributes: &[LEXICON_ATTRIBUTES],
    elements: &[LEXICON_ELEMENTS],
};

/// The descriptor of `kind` under `version`.
///
/// Kinds whose shape does not change between versions share one table,
/// so a descriptor carries its kind but no version.
pub fn descriptor(kind: Kind, version: LiftVersion) -> &'static Descriptor {
    use LiftVersion::{V0_13, V0_15};
    match (kind, version) {
        (Kind::Span, _) => &SPAN,
        (Kind::Text, _) => &TEXT,
        (Kind::Form, _) => &FORM,
        (Kind::Multitext, V0_13) => &MULTITEXT_13,
        (Kind::Multitext, V0_15) => &MULTITEXT_15,
        (Kind::Gloss, V0_13) => &GLOSS_13,
        (Kind::Gloss, V0_15) => &GLOSS_15,
        (Kind::Trait, _) => &TRAIT,
        (Kind::Annotation, V0_13) => &ANNOTATION_13,
        (Kind::Annotation, V0_15) => &ANNOTATION_15,
        (Kind::Field, V0_13) => &FIELD_13,
        (Kind::Field, V0_15) => &FIELD_15,
        (Kind::UrlRef, _) => &URLREF,
        (Kind::Extensible, _) => &EXTENSIBLE,
        (Kind::FieldDefinition, V0_13) => &FIELD_DEFINITION_13,
        (Kind::FieldDefinition, V0_15) => &FIELD_DEFINITION_15,
        (Kind::Fields, _) => &FIELDS,
        (Kind::RangeElement, _) => &RANGE_ELEMENT,
        (Kind::Range, _) => &RANGE,
        (Kind::Ranges, _) => &RANGES,
        (Kind::Header, _) => &HEADER,
        (Kind::Note, V0_13) => &NOTE_13,
        (Kind::Note, V0_15) => &NOTE_15,
        (Kind::Phonetic, V0_13) => &PHONETIC_13,
        (Kind::Phonetic, V0_15) => &PHONETIC_15,
        (Kind::Etymology, _) => &ETYMOLOGY,
        (Kind::GrammaticalInfo, _) => &GRAMMATICAL_INFO,
        (Kind::Reversal, V0_13) => &REVERSAL_13,
        (Kind::Reversal, V0_15) => &REVERSAL_15,
        (Kind::Translation, V0_13) => &TRANSLATION_13,
        (Kind::Translation, V0_15) => &TRANSLATION_15,
        (Kind::Example, V0_13) => &EXAMPLE_13,
        (Kind::Example, V0_15) => &EXAMPLE_15,
        (Kind::Relation, _) => &RELATION,
        (Kind::Variant, V0_13) => &VARIANT_13,
        (Kind::Variant, V0_15) => &VARIANT_15,
        (Kind::Sense, _) => &SENSE,
        (Kind::Entry, _) => &ENTRY,
        (Kind::Lexicon, _) => &LEXICON,
    }
}

/// Names of the props of `kind` that are required in every version declaring them.
pub fn required_props(kind: Kind) -> Vec<&'static Prop> {
    let mut required: Vec<&'static Prop> = Vec::new();
    for version in LiftVersion::ALL {
        for prop in descriptor(kind, version).props().filter(|p| p.required) {
            if !required.iter().any(|p| p.name == prop.name) {
                required.push(prop);
            }
        }
    }
    required
}

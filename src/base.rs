//! Elements shared by the header and the entries: language-tagged text and
//! the extensible bundle of dates, fields, traits and annotations.
use std::fmt;

use crate::binder::{self, lift_element, BindContext, ElementSlot, EmitContext};
use crate::datatype::{DateTime, Key, Lang, PCData, Url};
use crate::error::Result;
use crate::xml::{XmlChild, XmlNode};

// ------------- Span -------------
/// Inline markup inside a [`Text`]; `tail` is the text after its closing tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Span {
    pub lang: Option<Lang>,
    pub href: Option<Url>,
    pub class: Option<String>,
    pub pcdata: Option<PCData>,
    pub span_items: Vec<Span>,
    pub tail: Option<PCData>,
}
lift_element!(Span => Span {
    values { "lang" => lang, "href" => href, "class" => class, "pcdata" => pcdata, "tail" => tail }
    elements { "span_items" => span_items }
    embeds {}
});

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            pcdata: Some(PCData::new(text)),
            ..Default::default()
        }
    }
    /// Content of the span without its tail.
    pub fn plain(&self) -> String {
        let mut out = String::new();
        if let Some(text) = &self.pcdata {
            out.push_str(text);
        }
        push_spans(&mut out, &self.span_items);
        out
    }
}

fn push_spans(out: &mut String, spans: &[Span]) {
    for span in spans {
        out.push_str(&span.plain());
        if let Some(tail) = &span.tail {
            out.push_str(tail);
        }
    }
}

// ------------- Text -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub pcdata: Option<PCData>,
    pub span_items: Vec<Span>,
}
lift_element!(Text => Text {
    values { "pcdata" => pcdata }
    elements { "span_items" => span_items }
    embeds {}
});

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            pcdata: (!text.is_empty()).then(|| PCData::new(text)),
            span_items: Vec::new(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.pcdata.as_ref().is_none_or(|t| t.is_empty()) && self.span_items.is_empty()
    }
    /// All character data, spans flattened in document order.
    pub fn plain(&self) -> String {
        let mut out = String::new();
        if let Some(text) = &self.pcdata {
            out.push_str(text);
        }
        push_spans(&mut out, &self.span_items);
        out
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.plain())
    }
}

// a form's text is required, so it is held without an Option
impl ElementSlot for Text {
    fn bind(&mut self, node: &XmlNode, tail: Option<&str>, cx: &mut BindContext) -> Result<()> {
        *self = binder::parse_node::<Text>(node, tail, cx)?;
        Ok(())
    }
    fn emit(&self, xml_name: &str, cx: &EmitContext, out: &mut Vec<XmlChild>) -> Result<()> {
        binder::emit_node(self, xml_name, cx, out)
    }
    fn count(&self) -> usize {
        usize::from(!self.is_empty())
    }
}

// ------------- Form -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    pub lang: Lang,
    pub text: Text,
    pub annotation_items: Vec<Annotation>,
}
lift_element!(Form => Form {
    values { "lang" => lang }
    elements { "text" => text, "annotation_items" => annotation_items }
    embeds {}
});

impl Form {
    pub fn new(lang: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        let form = Self {
            lang: Lang::new(lang),
            text: Text::new(text),
            annotation_items: Vec::new(),
        };
        binder::check_required(&form)?;
        Ok(form)
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.lang)
    }
}

// ------------- Multitext -------------
/// The same text in several languages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Multitext {
    pub form_items: Vec<Form>,
    /// Untagged text, only read and written in LIFT 0.13.
    pub text: Option<Text>,
}
lift_element!(Multitext => Multitext {
    values {}
    elements { "form_items" => form_items, "text" => text }
    embeds {}
});

impl Multitext {
    /// Builds forms from `(lang, text)` pairs, in the given order.
    pub fn from_forms<I, L, T>(forms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        let form_items = forms
            .into_iter()
            .map(|(lang, text)| Form::new(lang, text))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { form_items, text: None })
    }
    pub fn form_by_lang(&self, lang: &str) -> Option<&Form> {
        self.form_items.iter().find(|form| form.lang == lang)
    }
    pub fn text_by_lang(&self, lang: &str) -> Option<String> {
        self.form_by_lang(lang).map(|form| form.text.plain())
    }
    /// Replaces the text of the `lang` form, adding the form if there is none.
    pub fn set_form(&mut self, lang: impl Into<String>, text: impl Into<String>) -> Result<()> {
        let form = Form::new(lang, text)?;
        match self.form_items.iter_mut().find(|f| f.lang == form.lang) {
            Some(existing) => existing.text = form.text,
            None => self.form_items.push(form),
        }
        Ok(())
    }
    pub fn langs(&self) -> impl Iterator<Item = &Lang> {
        self.form_items.iter().map(|form| &form.lang)
    }
    /// Plain text of every form, the untagged text last.
    pub fn texts(&self) -> impl Iterator<Item = String> + '_ {
        self.form_items
            .iter()
            .map(|form| form.text.plain())
            .chain(self.text.iter().map(Text::plain))
    }
    pub fn is_empty(&self) -> bool {
        self.form_items.is_empty() && self.text.is_none()
    }
}

impl fmt::Display for Multitext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.form_items.first(), &self.text) {
            (Some(form), _) if self.form_items.len() > 1 => {
                write!(f, "{} (+{} more)", form, self.form_items.len() - 1)
            }
            (Some(form), _) => write!(f, "{}", form),
            (None, Some(text)) => write!(f, "{}", text),
            (None, None) => Ok(()),
        }
    }
}

// ------------- Gloss -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gloss {
    pub lang: Lang,
    pub text: Text,
    pub annotation_items: Vec<Annotation>,
    /// Only read and written in LIFT 0.15.
    pub trait_items: Vec<Trait>,
}
lift_element!(Gloss => Gloss {
    values { "lang" => lang }
    elements { "text" => text, "annotation_items" => annotation_items, "trait_items" => trait_items }
    embeds {}
});

impl Gloss {
    pub fn new(lang: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        let gloss = Self {
            lang: Lang::new(lang),
            text: Text::new(text),
            ..Default::default()
        };
        binder::check_required(&gloss)?;
        Ok(gloss)
    }
}

impl fmt::Display for Gloss {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.lang)
    }
}

// ------------- Trait -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trait {
    pub name: Key,
    pub value: Key,
    pub id: Option<Key>,
    pub annotation_items: Vec<Annotation>,
}
lift_element!(Trait => Trait {
    values { "name" => name, "value" => value, "id" => id }
    elements { "annotation_items" => annotation_items }
    embeds {}
});

impl Trait {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let item = Self {
            name: Key::new(name),
            value: Key::new(value),
            ..Default::default()
        };
        binder::check_required(&item)?;
        Ok(item)
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

// ------------- Annotation -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    pub name: Key,
    pub value: Key,
    pub who: Option<Key>,
    pub when: Option<DateTime>,
    pub multitext: Multitext,
}
lift_element!(Annotation => Annotation {
    values { "name" => name, "value" => value, "who" => who, "when" => when }
    elements {}
    embeds { multitext }
});

impl Annotation {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let item = Self {
            name: Key::new(name),
            value: Key::new(value),
            ..Default::default()
        };
        binder::check_required(&item)?;
        Ok(item)
    }
}

// ------------- Field -------------
/// A user-defined field; its name refers to a header field definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    pub name: Key,
    pub date_created: Option<DateTime>,
    pub date_modified: Option<DateTime>,
    pub multitext: Multitext,
    pub trait_items: Vec<Trait>,
    pub annotation_items: Vec<Annotation>,
}
lift_element!(Field => Field {
    values { "name" => name, "date_created" => date_created, "date_modified" => date_modified }
    elements { "trait_items" => trait_items, "annotation_items" => annotation_items }
    embeds { multitext }
});

impl Field {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let field = Self {
            name: Key::new(name),
            ..Default::default()
        };
        binder::check_required(&field)?;
        Ok(field)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.multitext)
    }
}

// ------------- URLRef -------------
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlRef {
    pub href: Url,
    pub label: Option<Multitext>,
}
lift_element!(UrlRef => UrlRef {
    values { "href" => href }
    elements { "label" => label }
    embeds {}
});

impl UrlRef {
    pub fn new(href: impl Into<String>) -> Result<Self> {
        let item = Self {
            href: Url::new(href),
            label: None,
        };
        binder::check_required(&item)?;
        Ok(item)
    }
}

// ------------- Extensible -------------
/// Timestamps plus user-defined fields, traits and annotations, embedded in most entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensible {
    pub date_created: Option<DateTime>,
    pub date_modified: Option<DateTime>,
    pub field_items: Vec<Field>,
    pub trait_items: Vec<Trait>,
    pub annotation_items: Vec<Annotation>,
}
lift_element!(Extensible => Extensible {
    values { "date_created" => date_created, "date_modified" => date_modified }
    elements { "field_items" => field_items, "trait_items" => trait_items, "annotation_items" => annotation_items }
    embeds {}
});

impl Extensible {
    /// Marks a newly created element.
    pub fn stamp_created(&mut self, now: &DateTime) {
        self.date_created = Some(now.clone());
    }
    pub fn touch(&mut self, now: &DateTime) {
        self.date_modified = Some(now.clone());
    }
    pub fn add_field(&mut self, name: impl Into<String>) -> Result<usize> {
        let mut field = Field::new(name)?;
        let now = DateTime::now();
        field.date_created = Some(now.clone());
        self.field_items.push(field);
        self.touch(&now);
        Ok(self.field_items.len() - 1)
    }
    pub fn add_trait(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<usize> {
        let item = Trait::new(name, value)?;
        self.trait_items.push(item);
        self.touch(&DateTime::now());
        Ok(self.trait_items.len() - 1)
    }
    pub fn add_annotation(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<usize> {
        let item = Annotation::new(name, value)?;
        self.annotation_items.push(item);
        self.touch(&DateTime::now());
        Ok(self.annotation_items.len() - 1)
    }
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.field_items.iter().find(|field| field.name == name)
    }
    pub fn trait_value(&self, name: &str) -> Option<&Key> {
        self.trait_items
            .iter()
            .find(|item| item.name == name)
            .map(|item| &item.value)
    }
}

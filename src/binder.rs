//! Registry-driven mapping between entities and XML trees.
//!
//! Entities only expose their fields by name through [`LiftElement`]; which
//! fields exist, what they are called in the document, whether they are
//! required and in which order they are written is all read from the
//! [`registry`](crate::registry). [`parse_node`] and [`emit_node`] are the
//! single generic implementations of reading and writing.
use tracing::warn;

use crate::config::LiftVersion;
use crate::datatype::{DataType, DateTime, Key, Lang, PCData, RefId, Url};
use crate::error::{LiftError, Result};
use crate::registry::{self, Cardinality, Descriptor, Kind, Prop, PropType};
use crate::validate::Issue;
use crate::xml::{XmlChild, XmlNode};

/// A scalar held by an entity: an attribute value or a text slot.
pub trait ValueSlot {
    /// Stores `raw`, returning false if it does not fit the slot's type.
    fn load(&mut self, raw: &str) -> bool;
    /// The value to write, `None` when unset.
    fn dump(&self) -> Option<String>;
    /// Whether the slot holds a non-empty value.
    fn is_set(&self) -> bool;
    fn data_type(&self) -> &'static str;
}

// Required values are stored bare (empty means unset), optional ones in an Option.
macro_rules! value_slots {
    ($($ty:ty),*) => {
        $(
            impl ValueSlot for $ty {
                fn load(&mut self, raw: &str) -> bool {
                    match <$ty as DataType>::convert(raw) {
                        Some(value) => {
                            *self = value;
                            true
                        }
                        None => false,
                    }
                }
                fn dump(&self) -> Option<String> {
                    Some(self.render())
                }
                fn is_set(&self) -> bool {
                    !self.render().is_empty()
                }
                fn data_type(&self) -> &'static str {
                    <$ty as DataType>::DATA_TYPE
                }
            }
            impl ValueSlot for Option<$ty> {
                fn load(&mut self, raw: &str) -> bool {
                    match <$ty as DataType>::convert(raw) {
                        Some(value) => {
                            *self = Some(value);
                            true
                        }
                        None => false,
                    }
                }
                fn dump(&self) -> Option<String> {
                    self.as_ref().map(|value| value.render())
                }
                fn is_set(&self) -> bool {
                    self.as_ref().is_some_and(|value| !value.render().is_empty())
                }
                fn data_type(&self) -> &'static str {
                    <$ty as DataType>::DATA_TYPE
                }
            }
        )*
    };
}
value_slots!(Key, Lang, Url, PCData, RefId, DateTime, String, i64);

/// Child elements held by an entity: a single optional child, a required child or a list.
pub trait ElementSlot {
    fn bind(&mut self, node: &XmlNode, tail: Option<&str>, cx: &mut BindContext) -> Result<()>;
    fn emit(&self, xml_name: &str, cx: &EmitContext, out: &mut Vec<XmlChild>) -> Result<()>;
    /// Number of children present.
    fn count(&self) -> usize;
}

impl<T: LiftElement> ElementSlot for Option<T> {
    fn bind(&mut self, node: &XmlNode, tail: Option<&str>, cx: &mut BindContext) -> Result<()> {
        *self = Some(parse_node::<T>(node, tail, cx)?);
        Ok(())
    }
    fn emit(&self, xml_name: &str, cx: &EmitContext, out: &mut Vec<XmlChild>) -> Result<()> {
        if let Some(item) = self {
            emit_node(item, xml_name, cx, out)?;
        }
        Ok(())
    }
    fn count(&self) -> usize {
        usize::from(self.is_some())
    }
}

impl<T: LiftElement> ElementSlot for Vec<T> {
    fn bind(&mut self, node: &XmlNode, tail: Option<&str>, cx: &mut BindContext) -> Result<()> {
        self.push(parse_node::<T>(node, tail, cx)?);
        Ok(())
    }
    fn emit(&self, xml_name: &str, cx: &EmitContext, out: &mut Vec<XmlChild>) -> Result<()> {
        for item in self {
            emit_node(item, xml_name, cx, out)?;
        }
        Ok(())
    }
    fn count(&self) -> usize {
        self.len()
    }
}

/// An entity bound to an element kind of the registry.
///
/// Implementations are generated with `lift_element!`, which maps registry
/// prop names to struct fields and delegates to embedded groups.
pub trait LiftElement: Sized {
    const KIND: Kind;
    /// An instance with every property unset, used as the target of parsing.
    fn blank() -> Self;
    fn value_slot(&self, name: &str) -> Option<&dyn ValueSlot>;
    fn value_slot_mut(&mut self, name: &str) -> Option<&mut dyn ValueSlot>;
    fn element_slot(&self, name: &str) -> Option<&dyn ElementSlot>;
    fn element_slot_mut(&mut self, name: &str) -> Option<&mut dyn ElementSlot>;

    fn prop_name_from_xml_name(version: LiftVersion, xml: &str) -> Option<&'static str> {
        registry::descriptor(Self::KIND, version).prop_name_from_xml_name(xml)
    }
    fn xml_name_from_prop_name(version: LiftVersion, name: &str) -> Option<&'static str> {
        registry::descriptor(Self::KIND, version).xml_name_from_prop_name(name)
    }
}

impl<T: LiftElement> LiftElement for Box<T> {
    const KIND: Kind = T::KIND;
    fn blank() -> Self {
        Box::new(T::blank())
    }
    fn value_slot(&self, name: &str) -> Option<&dyn ValueSlot> {
        (**self).value_slot(name)
    }
    fn value_slot_mut(&mut self, name: &str) -> Option<&mut dyn ValueSlot> {
        (**self).value_slot_mut(name)
    }
    fn element_slot(&self, name: &str) -> Option<&dyn ElementSlot> {
        (**self).element_slot(name)
    }
    fn element_slot_mut(&mut self, name: &str) -> Option<&mut dyn ElementSlot> {
        (**self).element_slot_mut(name)
    }
}

/// Implements [`LiftElement`] for a struct from the list of its bound fields.
///
/// ```ignore
/// lift_element!(Trait => Trait {
///     values { "name" => name, "value" => value, "id" => id }
///     elements { "annotation_items" => annotation_items }
///     embeds {}
/// });
/// ```
macro_rules! lift_element {
    (
        $ty:ty => $kind:ident {
            values { $($value_name:literal => $value:ident),* $(,)? }
            elements { $($element_name:literal => $element:ident),* $(,)? }
            embeds { $($embed:ident),* $(,)? }
        }
    ) => {
        impl $crate::binder::LiftElement for $ty {
            const KIND: $crate::registry::Kind = $crate::registry::Kind::$kind;

            fn blank() -> Self {
                <Self as ::std::default::Default>::default()
            }

            fn value_slot(&self, name: &str) -> Option<&dyn $crate::binder::ValueSlot> {
                match name {
                    $($value_name => Some(&self.$value as &dyn $crate::binder::ValueSlot),)*
                    _ => {
                        $(
                            if let Some(slot) = $crate::binder::LiftElement::value_slot(&self.$embed, name) {
                                return Some(slot);
                            }
                        )*
                        None
                    }
                }
            }

            fn value_slot_mut(&mut self, name: &str) -> Option<&mut dyn $crate::binder::ValueSlot> {
                match name {
                    $($value_name => Some(&mut self.$value as &mut dyn $crate::binder::ValueSlot),)*
                    _ => {
                        $(
                            if let Some(slot) = $crate::binder::LiftElement::value_slot_mut(&mut self.$embed, name) {
                                return Some(slot);
                            }
                        )*
                        None
                    }
                }
            }

            fn element_slot(&self, name: &str) -> Option<&dyn $crate::binder::ElementSlot> {
                match name {
                    $($element_name => Some(&self.$element as &dyn $crate::binder::ElementSlot),)*
                    _ => {
                        $(
                            if let Some(slot) = $crate::binder::LiftElement::element_slot(&self.$embed, name) {
                                return Some(slot);
                            }
                        )*
                        None
                    }
                }
            }

            fn element_slot_mut(&mut self, name: &str) -> Option<&mut dyn $crate::binder::ElementSlot> {
                match name {
                    $($element_name => Some(&mut self.$element as &mut dyn $crate::binder::ElementSlot),)*
                    _ => {
                        $(
                            if let Some(slot) = $crate::binder::LiftElement::element_slot_mut(&mut self.$embed, name) {
                                return Some(slot);
                            }
                        )*
                        None
                    }
                }
            }
        }
    };
}
pub(crate) use lift_element;

// ------------- Contexts -------------
/// State carried through one parse: the schema version and the findings so far.
#[derive(Debug)]
pub struct BindContext {
    pub version: LiftVersion,
    pub issues: Vec<Issue>,
    path: Vec<String>,
}

impl BindContext {
    pub fn new(version: LiftVersion) -> Self {
        Self {
            version,
            issues: Vec::new(),
            path: Vec::new(),
        }
    }
    /// Slash-separated tags from the root to the element being read.
    pub fn location(&self) -> String {
        self.path.join("/")
    }
    fn report(&mut self, issue: Issue) {
        self.issues.push(issue);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EmitContext {
    pub version: LiftVersion,
}

impl EmitContext {
    pub fn new(version: LiftVersion) -> Self {
        Self { version }
    }
}

// ------------- Parsing -------------
fn is_namespace_attribute(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:") || name.starts_with("xml:")
}

fn missing_slot(kind: Kind, prop: &Prop) -> LiftError {
    LiftError::Invariant(format!("{kind} has no slot for registry prop {}", prop.name))
}

/// Reads an entity of type `T` from `node`.
///
/// `tail` is the text following `node` inside its parent, which only span-like
/// kinds keep. Missing required attributes or elements abort with
/// [`LiftError::RequiredValueMissing`]; everything else that does not fit the
/// registry is logged and recorded in the context.
pub fn parse_node<T: LiftElement>(
    node: &XmlNode,
    tail: Option<&str>,
    cx: &mut BindContext,
) -> Result<T> {
    cx.path.push(node.name.clone());
    let parsed = bind_node::<T>(node, tail, cx);
    cx.path.pop();
    parsed
}

fn bind_node<T: LiftElement>(node: &XmlNode, tail: Option<&str>, cx: &mut BindContext) -> Result<T> {
    let descriptor = registry::descriptor(T::KIND, cx.version);
    let mut item = T::blank();
    let mut missing: Vec<&str> = Vec::new();

    for prop in descriptor.attributes() {
        let Some(raw) = node.attribute(prop.xml) else {
            if prop.required {
                missing.push(prop.name);
            }
            continue;
        };
        let slot = item
            .value_slot_mut(prop.name)
            .ok_or_else(|| missing_slot(T::KIND, prop))?;
        if !slot.load(raw) {
            if prop.required {
                return Err(LiftError::MalformedXml {
                    path: None,
                    message: format!(
                        "{}: required attribute {} is not a valid {}: {raw:?}",
                        cx.location(),
                        prop.xml,
                        slot.data_type()
                    ),
                });
            }
            warn!(location = %cx.location(), attribute = prop.xml, value = raw, "ignoring invalid value");
            cx.report(Issue::InvalidValue {
                location: cx.location(),
                name: prop.xml.to_string(),
                value: raw.to_string(),
            });
        }
    }
    for (name, _) in &node.attributes {
        if descriptor.attribute_by_xml(name).is_none() && !is_namespace_attribute(name) {
            warn!(location = %cx.location(), attribute = %name, "ignoring unknown attribute");
            cx.report(Issue::UnknownAttribute {
                location: cx.location(),
                name: name.clone(),
            });
        }
    }

    let mut seen: Vec<&'static str> = Vec::new();
    let mut children = node.children.iter().peekable();
    let mut leading = true;
    while let Some(child) = children.next() {
        match child {
            XmlChild::Text(text) => {
                // only text before the first child element reaches here
                match descriptor.text_slot(PropType::PCData) {
                    Some(prop) if leading => {
                        let slot = item
                            .value_slot_mut(prop.name)
                            .ok_or_else(|| missing_slot(T::KIND, prop))?;
                        slot.load(text);
                    }
                    _ => unexpected_text(text, cx),
                }
            }
            XmlChild::Element(element) => {
                leading = false;
                let following = match children.peek() {
                    Some(XmlChild::Text(text)) => {
                        children.next();
                        Some(text.as_str())
                    }
                    _ => None,
                };
                let Some(prop) = descriptor.element_by_xml(&element.name) else {
                    warn!(location = %cx.location(), tag = %element.name, "ignoring unknown tag");
                    cx.report(Issue::UnknownTag {
                        location: cx.location(),
                        tag: element.name.clone(),
                    });
                    continue;
                };
                let slot = item
                    .element_slot_mut(prop.name)
                    .ok_or_else(|| missing_slot(T::KIND, prop))?;
                if prop.cardinality == Cardinality::One && slot.count() > 0 {
                    warn!(location = %cx.location(), tag = %element.name, "repeated element, keeping the last one");
                }
                slot.bind(element, following, cx)?;
                if !seen.contains(&prop.name) {
                    seen.push(prop.name);
                }
            }
        }
    }

    if let Some(text) = tail {
        match descriptor.text_slot(PropType::Tail) {
            Some(prop) => {
                let slot = item
                    .value_slot_mut(prop.name)
                    .ok_or_else(|| missing_slot(T::KIND, prop))?;
                slot.load(text);
            }
            None => unexpected_text(text, cx),
        }
    }

    for prop in descriptor.elements().filter(|p| p.required) {
        if !prop.ty.is_value() && !seen.contains(&prop.name) {
            missing.push(prop.name);
        }
    }
    if !missing.is_empty() {
        return Err(LiftError::missing(&node.name, &missing));
    }
    Ok(item)
}

fn unexpected_text(text: &str, cx: &mut BindContext) {
    if !text.trim().is_empty() {
        warn!(location = %cx.location(), text, "ignoring text in element-only content");
        cx.report(Issue::UnknownTag {
            location: cx.location(),
            tag: "#text".to_string(),
        });
    }
}

// ------------- Emission -------------
/// Writes `item` as an element named `xml_name`, followed by its tail text if it has one.
pub fn emit_node<T: LiftElement>(
    item: &T,
    xml_name: &str,
    cx: &EmitContext,
    out: &mut Vec<XmlChild>,
) -> Result<()> {
    let descriptor = registry::descriptor(T::KIND, cx.version);
    let mut node = XmlNode::new(xml_name);
    node.mixed = descriptor.text_slot(PropType::PCData).is_some();
    for prop in descriptor.attributes() {
        let slot = item
            .value_slot(prop.name)
            .ok_or_else(|| missing_slot(T::KIND, prop))?;
        if let Some(value) = slot.dump() {
            node.attributes.push((prop.xml.to_string(), value));
        }
    }
    let mut tail = None;
    for prop in descriptor.elements() {
        match prop.ty {
            PropType::PCData => {
                let slot = item
                    .value_slot(prop.name)
                    .ok_or_else(|| missing_slot(T::KIND, prop))?;
                if let Some(text) = slot.dump().filter(|text| !text.is_empty()) {
                    node.children.push(XmlChild::Text(text));
                }
            }
            PropType::Tail => {
                let slot = item
                    .value_slot(prop.name)
                    .ok_or_else(|| missing_slot(T::KIND, prop))?;
                tail = slot.dump().filter(|text| !text.is_empty());
            }
            _ => {
                let slot = item
                    .element_slot(prop.name)
                    .ok_or_else(|| missing_slot(T::KIND, prop))?;
                slot.emit(prop.xml, cx, &mut node.children)?;
            }
        }
    }
    out.push(XmlChild::Element(node));
    if let Some(tail) = tail {
        out.push(XmlChild::Text(tail));
    }
    Ok(())
}

/// Writes `item` as a standalone element.
pub fn to_node<T: LiftElement>(item: &T, xml_name: &str, version: LiftVersion) -> Result<XmlNode> {
    let mut out = Vec::with_capacity(1);
    emit_node(item, xml_name, &EmitContext::new(version), &mut out)?;
    match out.into_iter().next() {
        Some(XmlChild::Element(node)) => Ok(node),
        _ => Err(LiftError::Invariant(format!("{} emitted no element", T::KIND))),
    }
}

/// Reads a standalone element, discarding the findings.
pub fn from_node<T: LiftElement>(node: &XmlNode, version: LiftVersion) -> Result<T> {
    let mut cx = BindContext::new(version);
    parse_node(node, None, &mut cx)
}

// ------------- Required values -------------
/// Names of required props of `item` that are unset, across all versions.
pub fn missing_required<T: LiftElement>(item: &T) -> Vec<&'static str> {
    registry::required_props(T::KIND)
        .into_iter()
        .filter(|prop| {
            if prop.ty.is_value() {
                !item.value_slot(prop.name).is_some_and(|slot| slot.is_set())
            } else {
                item.element_slot(prop.name)
                    .is_none_or(|slot| slot.count() == 0)
            }
        })
        .map(|prop| prop.name)
        .collect()
}

/// Fails with [`LiftError::RequiredValueMissing`] naming every unset required prop.
pub fn check_required<T: LiftElement>(item: &T) -> Result<()> {
    let missing = missing_required(item);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LiftError::missing(T::KIND.default_tag(), &missing))
    }
}

/// The descriptor an entity type is read and written with under `version`.
pub fn descriptor_of<T: LiftElement>(version: LiftVersion) -> &'static Descriptor {
    registry::descriptor(T::KIND, version)
}

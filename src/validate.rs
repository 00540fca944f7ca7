//! Non-fatal findings: what the binder skipped while reading, and references
//! that point nowhere.
use std::collections::HashSet;
use std::fmt;

use crate::entry::{Entry, Relation};
use crate::header::{Header, Range};
use crate::index::ItemIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    UnknownTag { location: String, tag: String },
    UnknownAttribute { location: String, name: String },
    /// An optional value that did not fit its type and was left unset.
    InvalidValue { location: String, name: String, value: String },
    /// A relation or variant `ref` naming no entry or sense.
    DanglingRef { from: String, target: String },
    /// A range element `parent` naming no element of the same range.
    DanglingParent { range: String, element: String, parent: String },
    DuplicateId { id: String },
    /// A range file that could not be read; its ranges keep only their stubs.
    UnresolvedRanges { href: String },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Issue::UnknownTag { location, tag } => write!(f, "{location}: unknown tag <{tag}>"),
            Issue::UnknownAttribute { location, name } => {
                write!(f, "{location}: unknown attribute {name}")
            }
            Issue::InvalidValue { location, name, value } => {
                write!(f, "{location}: invalid value for {name}: {value:?}")
            }
            Issue::DanglingRef { from, target } => {
                write!(f, "{from}: reference to unknown id {target}")
            }
            Issue::DanglingParent { range, element, parent } => {
                write!(f, "range {range}: element {element} has unknown parent {parent}")
            }
            Issue::DuplicateId { id } => write!(f, "duplicate id {id}"),
            Issue::UnresolvedRanges { href } => write!(f, "ranges file not found: {href}"),
        }
    }
}

fn check_relations(from: &str, relations: &[Relation], index: &ItemIndex, out: &mut Vec<Issue>) {
    for relation in relations {
        if !relation.r#ref.is_empty() && !index.contains(&relation.r#ref) {
            out.push(Issue::DanglingRef {
                from: from.to_string(),
                target: relation.r#ref.to_string(),
            });
        }
    }
}

/// Dangling relation and variant references across all entries.
pub fn dangling_refs(entries: &[Entry], index: &ItemIndex) -> Vec<Issue> {
    let mut out = Vec::new();
    for entry in entries {
        check_relations(&entry.id, &entry.relation_items, index, &mut out);
        for variant in &entry.variant_items {
            if let Some(target) = variant.r#ref.as_ref().filter(|r| !r.is_empty()) {
                if !index.contains(target) {
                    out.push(Issue::DanglingRef {
                        from: entry.id.to_string(),
                        target: target.to_string(),
                    });
                }
            }
            check_relations(&entry.id, &variant.relation_items, index, &mut out);
        }
        for (_, sense) in entry.senses() {
            check_relations(&sense.id, &sense.relation_items, index, &mut out);
        }
    }
    out
}

fn dangling_parents_in(range: &Range, out: &mut Vec<Issue>) {
    let ids: HashSet<&str> = range.range_element_items.iter().map(|e| e.id.as_str()).collect();
    for element in &range.range_element_items {
        if let Some(parent) = element.parent.as_ref().filter(|p| !p.is_empty()) {
            if !ids.contains(parent.as_str()) {
                out.push(Issue::DanglingParent {
                    range: range.id.to_string(),
                    element: element.id.to_string(),
                    parent: parent.to_string(),
                });
            }
        }
    }
}

/// Range elements whose parent is not an element of the same range.
pub fn dangling_parents(header: Option<&Header>) -> Vec<Issue> {
    let mut out = Vec::new();
    if let Some(ranges) = header.and_then(|h| h.ranges.as_ref()) {
        for range in &ranges.range_items {
            dangling_parents_in(range, &mut out);
        }
    }
    out
}

pub fn duplicate_ids(index: &ItemIndex) -> Vec<Issue> {
    index
        .duplicates()
        .iter()
        .map(|id| Issue::DuplicateId { id: id.to_string() })
        .collect()
}

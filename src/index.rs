//! Id and parent lookups over the entries and senses of a lexicon.
//!
//! The index does not hold references into the lexicon. It maps each id to
//! the index path of its item (entry index, then sense indexes), so it stays
//! valid as long as the tree is not restructured, and every hit is checked
//! against the item it resolves to.
use std::collections::HashMap;
use std::hash::BuildHasherDefault;

// used to map ids to paths and paths back to ids
use bimap::BiHashMap;
// fast hashing for id keyed maps
use seahash::SeaHasher;
use tracing::{debug, warn};

use crate::datatype::RefId;
use crate::entry::{Entry, Sense};

pub type IdHasher = BuildHasherDefault<SeaHasher>;

/// Position of an entry or sense: entry index, then one index per sense level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemPath {
    pub entry: usize,
    pub senses: Vec<usize>,
}

impl ItemPath {
    pub fn entry(entry: usize) -> Self {
        Self { entry, senses: Vec::new() }
    }
    pub fn sense(entry: usize, senses: Vec<usize>) -> Self {
        Self { entry, senses }
    }
    pub fn is_entry(&self) -> bool {
        self.senses.is_empty()
    }
    /// Path of the containing entry or sense; `None` for entries.
    pub fn parent(&self) -> Option<ItemPath> {
        let (_, rest) = self.senses.split_last()?;
        Some(Self {
            entry: self.entry,
            senses: rest.to_vec(),
        })
    }
    pub fn resolve<'a>(&self, entries: &'a [Entry]) -> Option<Item<'a>> {
        let entry = entries.get(self.entry)?;
        if self.is_entry() {
            Some(Item::Entry(entry))
        } else {
            entry.sense_at(&self.senses).map(Item::Sense)
        }
    }
}

/// An entry or a sense found by id or by search.
#[derive(Debug, Clone, Copy)]
pub enum Item<'a> {
    Entry(&'a Entry),
    Sense(&'a Sense),
}

impl<'a> Item<'a> {
    pub fn id(&self) -> &'a RefId {
        match self {
            Item::Entry(entry) => &entry.id,
            Item::Sense(sense) => &sense.id,
        }
    }
    pub fn as_entry(&self) -> Option<&'a Entry> {
        match self {
            Item::Entry(entry) => Some(entry),
            Item::Sense(_) => None,
        }
    }
    pub fn as_sense(&self) -> Option<&'a Sense> {
        match self {
            Item::Sense(sense) => Some(sense),
            Item::Entry(_) => None,
        }
    }
}

/// What contains an entry or a sense.
#[derive(Debug, Clone, Copy)]
pub enum Parent<'a> {
    /// Entries hang directly off the lexicon.
    Lexicon,
    Entry(&'a Entry),
    Sense(&'a Sense),
}

impl<'a> Parent<'a> {
    pub fn id(&self) -> Option<&'a RefId> {
        match self {
            Parent::Lexicon => None,
            Parent::Entry(entry) => Some(&entry.id),
            Parent::Sense(sense) => Some(&sense.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    Root,
    Item(RefId),
}

#[derive(Debug)]
pub struct ItemIndex {
    ids: BiHashMap<RefId, ItemPath, IdHasher, IdHasher>,
    parents: HashMap<RefId, ParentRef, IdHasher>,
    duplicates: Vec<RefId>,
}

impl Default for ItemIndex {
    fn default() -> Self {
        Self {
            ids: BiHashMap::with_hashers(IdHasher::default(), IdHasher::default()),
            parents: HashMap::default(),
            duplicates: Vec::new(),
        }
    }
}

impl ItemIndex {
    pub fn build(entries: &[Entry]) -> Self {
        let mut index = Self::default();
        for (e, entry) in entries.iter().enumerate() {
            index.keep(&entry.id, ItemPath::entry(e), ParentRef::Root);
            for (path, sense) in entry.senses() {
                let path = ItemPath::sense(e, path);
                let parent = path
                    .parent()
                    .and_then(|above| above.resolve(entries))
                    .map_or(ParentRef::Root, |above| ParentRef::Item(above.id().clone()));
                index.keep(&sense.id, path, parent);
            }
        }
        debug!(ids = index.len(), duplicates = index.duplicates.len(), "index built");
        index
    }
    fn keep(&mut self, id: &RefId, path: ItemPath, parent: ParentRef) {
        if self.ids.contains_left(id) {
            warn!(id = %id, "duplicate id, keeping the first occurrence");
            self.duplicates.push(id.clone());
            return;
        }
        self.ids.insert(id.clone(), path);
        self.parents.insert(id.clone(), parent);
    }
    pub fn len(&self) -> usize {
        self.ids.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_left(&RefId::from(id))
    }
    pub fn path_of(&self, id: &RefId) -> Option<&ItemPath> {
        self.ids.get_by_left(id)
    }
    pub fn id_at(&self, path: &ItemPath) -> Option<&RefId> {
        self.ids.get_by_right(path)
    }
    pub fn parent_of(&self, id: &RefId) -> Option<&ParentRef> {
        self.parents.get(id)
    }
    /// Ids that occur more than once; only the first occurrence is indexed.
    pub fn duplicates(&self) -> &[RefId] {
        &self.duplicates
    }
}

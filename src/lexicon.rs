//! The `lift` root: entries, header, id lookups, search and editing.
use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::base::Multitext;
use crate::binder::{self, lift_element, BindContext};
use crate::config::{LiftVersion, Settings};
use crate::datatype::{Key, Lang, RefId};
use crate::entry::{Entry, Sense};
use crate::error::{LiftError, Result};
use crate::header::Header;
use crate::index::{Item, ItemIndex, ItemPath, Parent, ParentRef};
use crate::query::{MatchType, Query};
use crate::validate::{self, Issue};
use crate::xml::XmlNode;

/// A LIFT lexicon: the header and every entry, in document order.
///
/// Entries can be edited through the public `entry_items` list, but edits
/// that add, remove or move entries or senses that way must be followed by
/// [`Lexicon::reindex`]. The `add_entry`, `remove_entry`, `entry_mut`,
/// `edit_entry` and `edit_sense` methods keep the index up to date.
#[derive(Debug, Default)]
pub struct Lexicon {
    pub(crate) version: String,
    pub producer: Option<String>,
    pub header: Option<Header>,
    pub entry_items: Vec<Entry>,
    lift_version: LiftVersion,
    pub(crate) path: Option<PathBuf>,
    pub(crate) settings: Settings,
    pub(crate) issues: Vec<Issue>,
    index: RefCell<ItemIndex>,
    index_dirty: Cell<bool>,
}
lift_element!(Lexicon => Lexicon {
    values { "version" => version, "producer" => producer }
    elements { "header" => header, "entry_items" => entry_items }
    embeds {}
});

/// Languages used in a lexicon, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WritingSystems {
    /// Languages of headwords, variants and pronunciations.
    pub vernacular: Vec<Lang>,
    /// Languages of glosses, definitions and translations.
    pub analysis: Vec<Lang>,
}

fn collect_langs(found: &mut Vec<Lang>, multitext: &Multitext) {
    for lang in multitext.langs() {
        if !found.contains(lang) {
            found.push(lang.clone());
        }
    }
}

impl Lexicon {
    /// An empty lexicon of the given version.
    pub fn new(version: LiftVersion) -> Self {
        Self::with_settings(Settings {
            version,
            ..Settings::default()
        })
    }
    /// An empty lexicon of the version named in `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            version: settings.version.to_string(),
            lift_version: settings.version,
            header: Some(Header::default()),
            settings,
            ..Default::default()
        }
    }
    /// Binds a parsed `lift` root element.
    pub(crate) fn from_root(root: &XmlNode, settings: Settings) -> Result<Self> {
        if root.name != "lift" {
            return Err(LiftError::MalformedXml {
                path: None,
                message: format!("expected a <lift> root element, found <{}>", root.name),
            });
        }
        let version: LiftVersion = root
            .attribute("version")
            .ok_or_else(|| LiftError::missing("lift", &["version"]))?
            .parse()?;
        let mut cx = BindContext::new(version);
        let mut lexicon: Lexicon = binder::parse_node(root, None, &mut cx)?;
        lexicon.lift_version = version;
        lexicon.settings = settings;
        lexicon.issues = cx.issues;
        lexicon.reindex();
        Ok(lexicon)
    }

    pub fn version(&self) -> LiftVersion {
        self.lift_version
    }
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
    /// Findings recorded while reading the document and its range files.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
    /// Names of the custom fields declared in the header.
    pub fn header_field_names(&self) -> Vec<&Key> {
        self.header
            .iter()
            .filter_map(|h| h.fields.as_ref())
            .flat_map(|fields| fields.names())
            .collect()
    }

    // ------------- Index -------------
    /// Rebuilds the id and parent maps from the current entries.
    pub fn reindex(&self) {
        *self.index.borrow_mut() = ItemIndex::build(&self.entry_items);
        self.index_dirty.set(false);
    }
    fn mark_dirty(&self) {
        self.index_dirty.set(true);
    }
    fn ensure_index(&self) {
        if self.index_dirty.get() {
            debug!("rebuilding stale index");
            self.reindex();
        }
    }
    fn path_of(&self, id: &RefId) -> Option<ItemPath> {
        self.ensure_index();
        let path = self.index.borrow().path_of(id).cloned()?;
        let current = path
            .resolve(&self.entry_items)
            .is_some_and(|item| item.id() == id);
        if current {
            return Some(path);
        }
        // the tree changed under the index
        self.reindex();
        self.index.borrow().path_of(id).cloned()
    }
    pub fn get_item_by_id(&self, id: &str) -> Option<Item<'_>> {
        self.path_of(&RefId::from(id))?.resolve(&self.entry_items)
    }
    pub fn get_item_parent_by_id(&self, id: &str) -> Option<Parent<'_>> {
        let id = RefId::from(id);
        let path = self.path_of(&id)?;
        let parent = self.index.borrow().parent_of(&id).cloned()?;
        match parent {
            ParentRef::Root => Some(Parent::Lexicon),
            ParentRef::Item(parent_id) => {
                let parent_path = self.path_of(&parent_id).or_else(|| path.parent())?;
                match parent_path.resolve(&self.entry_items)? {
                    Item::Entry(entry) => Some(Parent::Entry(entry)),
                    Item::Sense(sense) => Some(Parent::Sense(sense)),
                }
            }
        }
    }

    // ------------- Search -------------
    pub fn search(&self, query: &Query) -> Vec<Item<'_>> {
        query.run(&self.entry_items, None)
    }
    /// Every sense (or entry, for entry-level fields) whose `field` matches `text`.
    ///
    /// `field` defaults to `gloss`; see [`Query`] for the accepted names.
    pub fn find_all(
        &self,
        text: &str,
        field: Option<&str>,
        match_type: MatchType,
    ) -> Result<Vec<Item<'_>>> {
        Ok(Query::new(text, field, match_type)?.run(&self.entry_items, None))
    }
    /// The first item [`Lexicon::find_all`] would return.
    pub fn find(
        &self,
        text: &str,
        field: Option<&str>,
        match_type: MatchType,
    ) -> Result<Option<Item<'_>>> {
        let query = Query::new(text, field, match_type)?;
        Ok(query.run(&self.entry_items, Some(1)).into_iter().next())
    }

    // ------------- Editing -------------
    /// Appends a new entry with a fresh unique id and returns its index.
    pub fn add_entry(&mut self) -> usize {
        self.ensure_index();
        let mut id = RefId::generate();
        while self.index.borrow().contains(&id) {
            id = RefId::generate();
        }
        self.entry_items.push(Entry::with_id(id));
        self.mark_dirty();
        self.entry_items.len() - 1
    }
    /// Removes an entry with everything it owns. References to it are left dangling.
    pub fn remove_entry(&mut self, index: usize) -> Option<Entry> {
        if index >= self.entry_items.len() {
            return None;
        }
        self.mark_dirty();
        Some(self.entry_items.remove(index))
    }
    /// The entry at `index`, marked as modified.
    pub fn entry_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.mark_dirty();
        let entry = self.entry_items.get_mut(index)?;
        entry.touch();
        Some(entry)
    }
    /// Runs `edit` on the entry with `id` and marks the entry as modified.
    pub fn edit_entry<R>(&mut self, id: &str, edit: impl FnOnce(&mut Entry) -> R) -> Option<R> {
        let path = self.path_of(&RefId::from(id)).filter(ItemPath::is_entry)?;
        self.mark_dirty();
        let entry = self.entry_items.get_mut(path.entry)?;
        let result = edit(entry);
        entry.touch();
        Some(result)
    }
    /// Runs `edit` on the sense with `id`, marking it, its parent senses and its entry as modified.
    pub fn edit_sense<R>(&mut self, id: &str, edit: impl FnOnce(&mut Sense) -> R) -> Option<R> {
        let path = self.path_of(&RefId::from(id)).filter(|p| !p.is_entry())?;
        self.mark_dirty();
        let sense = self
            .entry_items
            .get_mut(path.entry)?
            .sense_at_mut(&path.senses)?;
        Some(edit(sense))
    }

    // ------------- Inspection -------------
    /// Infers vernacular and analysis languages from the forms in use.
    pub fn writing_systems(&self) -> WritingSystems {
        let mut found = WritingSystems::default();
        for entry in &self.entry_items {
            for multitext in entry.lexical_unit.iter().chain(entry.citation.iter()) {
                collect_langs(&mut found.vernacular, multitext);
            }
            for variant in &entry.variant_items {
                collect_langs(&mut found.vernacular, &variant.multitext);
            }
            for pronunciation in &entry.pronunciation_items {
                collect_langs(&mut found.vernacular, &pronunciation.multitext);
            }
            for (_, sense) in entry.senses() {
                for gloss in &sense.gloss_items {
                    if !found.analysis.contains(&gloss.lang) {
                        found.analysis.push(gloss.lang.clone());
                    }
                }
                if let Some(definition) = &sense.definition {
                    collect_langs(&mut found.analysis, definition);
                }
                for example in &sense.example_items {
                    for translation in &example.translation_items {
                        collect_langs(&mut found.analysis, &translation.multitext);
                    }
                }
            }
        }
        found
    }
    /// Load findings plus dangling references, dangling range parents and duplicate ids.
    pub fn validate(&self) -> Vec<Issue> {
        self.ensure_index();
        let index = self.index.borrow();
        let mut issues = self.issues.clone();
        issues.extend(validate::duplicate_ids(&index));
        issues.extend(validate::dangling_refs(&self.entry_items, &index));
        issues.extend(validate::dangling_parents(self.header.as_ref()));
        issues
    }
}

impl fmt::Display for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LIFT lexicon v{}", self.version)?;
        if let Some(producer) = &self.producer {
            write!(f, "; produced by {producer}")?;
        }
        write!(f, "; {} entries", self.entry_items.len())
    }
}

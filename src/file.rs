//! Reading and writing `.lift` files and their `.lift-ranges` siblings.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};
use url::Url;

use crate::binder::{self, BindContext};
use crate::config::{LiftVersion, Settings};
use crate::error::{LiftError, Result};
use crate::header::Range;
use crate::lexicon::Lexicon;
use crate::validate::Issue;
use crate::xml::{self, XmlChild, XmlNode};

pub const LIFT_EXTENSION: &str = "lift";
pub const RANGES_EXTENSION: &str = "lift-ranges";

/// Where the ranges of the header go when a lexicon is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangesPlacement {
    /// Complete range definitions inside the `.lift` header.
    Inline,
    /// A sibling `.lift-ranges` file, with `<range id href/>` stubs in the header.
    External,
}

impl RangesPlacement {
    /// The placement used by [`Lexicon::to_lift`].
    pub fn default_for(version: LiftVersion) -> Self {
        if version.requires_external_ranges() {
            RangesPlacement::External
        } else {
            RangesPlacement::Inline
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| LiftError::io(path, e))
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| LiftError::io(path, e))
}

/// Files a range `href` may point at, most likely first.
fn range_file_candidates(href: &str, lift_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    let named = match Url::parse(href) {
        Ok(url) => {
            let path = match url.to_file_path() {
                Ok(path) => path,
                Err(()) => PathBuf::from(url.path()),
            };
            candidates.push(path.clone());
            path
        }
        Err(_) => {
            let path = PathBuf::from(href);
            match lift_dir {
                Some(dir) if path.is_relative() => candidates.push(dir.join(&path)),
                _ => candidates.push(path.clone()),
            }
            path
        }
    };
    // absolute hrefs written on another machine
    if let (Some(dir), Some(name)) = (lift_dir, named.file_name()) {
        let sibling = dir.join(name);
        if !candidates.contains(&sibling) {
            candidates.push(sibling);
        }
    }
    candidates
}

fn resolve_range_file(href: &str, lift_dir: Option<&Path>) -> Option<PathBuf> {
    range_file_candidates(href, lift_dir)
        .into_iter()
        .find(|candidate| candidate.is_file())
}

fn href_for(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    match Url::from_file_path(&absolute) {
        Ok(url) => url.to_string(),
        Err(()) => path.to_string_lossy().into_owned(),
    }
}

fn range_stub(id: &str, href: Option<&str>) -> XmlNode {
    let mut stub = XmlNode::new("range");
    stub.set_attribute("id", id);
    if let Some(href) = href {
        stub.set_attribute("href", href);
    }
    stub
}

fn ranges_node_mut(root: &mut XmlNode) -> Option<&mut XmlNode> {
    root.element_mut("header")?.element_mut("ranges")
}

/// Id of the first range with a definition but no `href` to put it in.
fn unplaced_range(root: &XmlNode) -> Option<String> {
    root.element("header")?
        .element("ranges")?
        .elements()
        .find(|range| range.attribute("href").is_none() && range.elements().next().is_some())
        .map(|range| range.attribute("id").unwrap_or_default().to_string())
}

/// Replaces every range under the header with a stub, returning the full definitions.
fn split_ranges(root: &mut XmlNode, href: Option<&str>) -> Vec<XmlNode> {
    let Some(ranges) = ranges_node_mut(root) else {
        return Vec::new();
    };
    let mut full = Vec::new();
    for child in ranges.children.iter_mut() {
        let XmlChild::Element(range) = child else {
            continue;
        };
        let id = range.attribute("id").unwrap_or_default().to_string();
        let current = range.attribute("href").map(str::to_string);
        let stub = range_stub(&id, href.or(current.as_deref()));
        let mut definition = std::mem::replace(range, stub);
        definition.remove_attribute("href");
        full.push(definition);
    }
    full
}

impl Lexicon {
    // ------------- Reading -------------
    /// Reads a `.lift` file and any range files its header points at.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with(path, Settings::default())
    }
    pub fn from_path_with(path: impl AsRef<Path>, settings: Settings) -> Result<Self> {
        let path = path.as_ref();
        if path.extension().and_then(|e| e.to_str()) != Some(LIFT_EXTENSION) {
            return Err(LiftError::InvalidExtension(path.to_path_buf()));
        }
        let started = Instant::now();
        let text = read_text(path)?;
        let root = xml::parse_document(&text).map_err(|e| e.at_path(path))?;
        let mut lexicon = Lexicon::from_root(&root, settings).map_err(|e| e.at_path(path))?;
        lexicon.path = Some(path.to_path_buf());
        lexicon.load_external_ranges(path.parent())?;
        info!(
            path = %path.display(),
            version = %lexicon.version(),
            entries = lexicon.entry_items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "lexicon loaded"
        );
        Ok(lexicon)
    }
    /// Reads a LIFT document held in memory. Relative range hrefs cannot be resolved.
    pub fn from_xml_str(xml: &str) -> Result<Self> {
        let root = xml::parse_document(xml)?;
        let mut lexicon = Lexicon::from_root(&root, Settings::default())?;
        lexicon.load_external_ranges(None)?;
        Ok(lexicon)
    }

    fn load_external_ranges(&mut self, lift_dir: Option<&Path>) -> Result<()> {
        let mut hrefs: Vec<String> = Vec::new();
        if let Some(ranges) = self.header.as_ref().and_then(|h| h.ranges.as_ref()) {
            for href in ranges.range_items.iter().filter_map(|r| r.href.as_ref()) {
                if !hrefs.iter().any(|h| h == href.as_str()) {
                    hrefs.push(href.to_string());
                }
            }
        }
        for href in hrefs {
            let resolved = match lift_dir {
                Some(dir) => resolve_range_file(&href, Some(dir)),
                None => resolve_range_file(&href, None).filter(|p| p.is_absolute()),
            };
            let Some(file) = resolved else {
                warn!(href = %href, "ranges file not found");
                self.issues.push(Issue::UnresolvedRanges { href });
                continue;
            };
            self.merge_ranges_file(&file)?;
        }
        Ok(())
    }

    /// Replaces stub ranges with the definitions of the same id found in `file`.
    fn merge_ranges_file(&mut self, file: &Path) -> Result<()> {
        let root = xml::parse_document(&read_text(file)?).map_err(|e| e.at_path(file))?;
        if root.name != "lift-ranges" {
            warn!(path = %file.display(), root = %root.name, "unexpected root in ranges file");
        }
        let mut cx = BindContext::new(self.version());
        let mut merged = 0;
        if let Some(ranges) = self.header.as_mut().and_then(|h| h.ranges.as_mut()) {
            for node in root.elements().filter(|n| n.name == "range") {
                let Some(id) = node.attribute("id") else {
                    continue;
                };
                let Some(stub) = ranges.range_items.iter_mut().find(|r| r.id == id) else {
                    continue;
                };
                let mut range: Range =
                    binder::parse_node(node, None, &mut cx).map_err(|e| e.at_path(file))?;
                range.href = stub.href.take();
                *stub = range;
                merged += 1;
            }
        }
        self.issues.append(&mut cx.issues);
        info!(path = %file.display(), ranges = merged, "ranges merged");
        Ok(())
    }

    // ------------- Writing -------------
    fn to_root(&self) -> Result<XmlNode> {
        binder::to_node(self, "lift", self.version())
    }
    /// The `.lift` document as text. Under 0.13 each range is reduced to a
    /// stub that keeps its current `href`; a defined range without one has
    /// no file to go to and must be written with [`Lexicon::to_lift`].
    pub fn to_xml_string(&self) -> Result<String> {
        let mut root = self.to_root()?;
        let version = self.version();
        if version.requires_external_ranges() {
            if let Some(id) = unplaced_range(&root) {
                warn!(range = %id, "range has no href to hold its definition");
                return Err(LiftError::UnsupportedAction {
                    action: format!("writing range {id} without an href to a string (use to_lift)"),
                    version,
                });
            }
            split_ranges(&mut root, None);
        }
        Ok(root.to_document(self.settings.indent))
    }
    /// Writes the lexicon to `path`, with ranges placed as its version requires.
    pub fn to_lift(&mut self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let placement = RangesPlacement::default_for(self.version());
        self.to_lift_with(path, placement)
    }
    /// Writes the lexicon to `path` (its extension forced to `.lift`) and
    /// returns the path written. External placement also writes
    /// `<stem>.lift-ranges` next to it and points every range at that file.
    pub fn to_lift_with(
        &mut self,
        path: impl AsRef<Path>,
        placement: RangesPlacement,
    ) -> Result<PathBuf> {
        let version = self.version();
        if placement == RangesPlacement::Inline && version.requires_external_ranges() {
            return Err(LiftError::UnsupportedAction {
                action: "writing ranges inline".to_string(),
                version,
            });
        }
        let started = Instant::now();
        let lift_path = path.as_ref().with_extension(LIFT_EXTENSION);
        let ranges_path = lift_path.with_extension(RANGES_EXTENSION);
        self.version = version.to_string();
        self.producer = Some(self.settings.producer.clone());

        let has_ranges = self
            .header
            .as_ref()
            .and_then(|h| h.ranges.as_ref())
            .is_some_and(|r| !r.range_items.is_empty());
        if placement == RangesPlacement::External && has_ranges {
            let href = href_for(&ranges_path);
            if let Some(ranges) = self.header.as_mut().and_then(|h| h.ranges.as_mut()) {
                for range in ranges.range_items.iter_mut() {
                    range.href = Some(href.as_str().into());
                }
            }
            let mut root = self.to_root()?;
            let mut lift_ranges = XmlNode::new("lift-ranges");
            lift_ranges.children = split_ranges(&mut root, Some(&href))
                .into_iter()
                .map(XmlChild::Element)
                .collect();
            write_text(&lift_path, &root.to_document(self.settings.indent))?;
            write_text(&ranges_path, &lift_ranges.to_document(self.settings.indent))?;
        } else {
            let root = self.to_root()?;
            write_text(&lift_path, &root.to_document(self.settings.indent))?;
        }
        self.path = Some(lift_path.clone());
        info!(
            path = %lift_path.display(),
            entries = self.entry_items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "lexicon written"
        );
        Ok(lift_path)
    }
}

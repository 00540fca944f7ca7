//! Liftlex – reading, querying, editing and writing LIFT lexicons.
//!
//! LIFT (Lexicon Interchange FormaT) is the XML format dictionary tools such
//! as FieldWorks use to exchange lexicons. A lexicon is a header (custom
//! field definitions and ranges of controlled vocabulary) followed by
//! entries, each holding senses that may nest subsenses to any depth.
//!
//! Two schema versions are supported:
//! * `0.13`, the FieldWorks dialect, which keeps ranges in a sibling
//!   `.lift-ranges` file;
//! * `0.15`, which permits ranges inline and adds a few properties.
//!
//! ## Modules
//! * [`registry`] – per version descriptors of every element kind: attribute
//!   and child names, cardinality, data types and which props are required.
//! * [`binder`] – the single generic reader and writer driven by the registry.
//! * [`base`], [`header`], [`entry`] – the entities, plain structs with public fields.
//! * [`lexicon`] – the [`Lexicon`] root, with id lookups, search and editing.
//! * [`file`] – loading from and saving to `.lift` files.
//! * [`datatype`] – the [`datatype::DataType`] trait and the primitive value types.
//! * [`validate`] – non-fatal [`Issue`]s found while reading or validating.
//!
//! ## Required values
//! Entities built with a constructor (`Gloss::new`, `Relation::new`, ...)
//! fail with [`LiftError::RequiredValueMissing`] when a required value is
//! empty. When reading, a required attribute or element that is absent
//! aborts the load with the same error.
//!
//! ## Quick Start
//! ```no_run
//! use liftlex::{Lexicon, MatchType};
//! let mut lexicon = Lexicon::from_path("sango.lift")?;
//! if let Some(item) = lexicon.find("mother", None, MatchType::Exact)? {
//!     println!("{}", item.id());
//! }
//! let sense_id = lexicon.entry_items[0].sense_items[0].id.to_string();
//! lexicon.edit_sense(&sense_id, |sense| sense.set_grammatical_info("Noun"));
//! lexicon.to_lift("sango-edited.lift")?;
//! # Ok::<(), liftlex::LiftError>(())
//! ```
//!
//! ## Logging
//! The crate logs through `tracing` and never installs a subscriber.

pub mod base;
pub mod binder;
pub mod config;
pub mod datatype;
pub mod entry;
pub mod error;
pub mod file;
pub mod header;
pub mod index;
pub mod lexicon;
pub mod query;
pub mod registry;
pub mod validate;
pub mod xml;

pub use crate::config::{LiftVersion, Settings};
pub use crate::entry::{DuplicateGloss, Entry, Sense};
pub use crate::error::{LiftError, Result};
pub use crate::file::RangesPlacement;
pub use crate::index::{Item, Parent};
pub use crate::lexicon::{Lexicon, WritingSystems};
pub use crate::query::{MatchType, Query};
pub use crate::validate::Issue;

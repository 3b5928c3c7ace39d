//! # Timing Repair: Time-Slot Repair for ELAN Documents Imported from Toolbox
//!
//! When a Toolbox file is imported into ELAN, words and the utterance that
//! contains them share time slots: the first word starts on the utterance's
//! start slot, and neighbouring words meet on a slot with no time value. Such
//! words cannot be aligned individually.
//!
//! This crate provides the two repairs for such documents:
//!
//! - [`disambiguate`] gives every annotation boundary a time slot of its own,
//!   interpolating word boundaries that have no value.
//! - [`import_word_times`] writes per-word times recorded in the Toolbox file
//!   back into the document, widening utterances where a word falls outside.
//!
//! The parent/child structure is not stored in the EAF file. It is inferred
//! from shared time slots ([`graph::build_annotation_graph`]) or from time
//! containment ([`graph::resolve_by_containment`]).
//!
//! ## Examples
//!
//! ```rust,ignore
//! use eaf_processor::{generate_eaf, parse_eaf};
//! use elan_core::{EafGenerationOptions, ImportOptions};
//! use timing_repair::{ToolboxFile, disambiguate, extract_word_times, import_word_times};
//!
//! let mut document = parse_eaf(&eaf_text)?;
//! disambiguate(&mut document)?;
//!
//! let options = ImportOptions::default();
//! let table = extract_word_times(&ToolboxFile::parse(&toolbox_text), &options)?;
//! import_word_times(&mut document, &table, &options)?;
//!
//! let xml = generate_eaf(&document, &EafGenerationOptions::default())?;
//! ```

pub mod disambiguator;
pub mod error;
pub mod graph;
pub mod importer;
pub mod toolbox;

#[cfg(test)]
mod test_utils;

pub use disambiguator::{DisambiguationReport, disambiguate};
pub use error::{ImportError, StructuralError, ToolboxError};
pub use importer::{ImportReport, import_word_times};
pub use toolbox::{ToolboxFile, WordTimeTable, extract_word_times};

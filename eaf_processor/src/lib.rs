//! # EAF Processor: Parser and Generator for ELAN Annotation Documents
//!
//! This crate reads and writes the XML format used by the ELAN annotation tool
//! (`.eaf`). It turns a document into an [`elan_core::EafDocument`], which gives
//! typed access to the time order, tiers, annotations and linguistic types, and
//! writes that document back to XML after it has been modified.
//!
//! Elements that carry no timing information (`HEADER`, `LOCALE`, `CONSTRAINT`,
//! controlled vocabularies, ...) are kept as generic element trees and written
//! back unchanged.
//!
//! ## Examples
//!
//! ```rust
//! use eaf_processor::{generate_eaf, parse_eaf};
//! use elan_core::{AnchorId, AnnotationId, EafGenerationOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let eaf = r#"<?xml version="1.0" encoding="UTF-8"?>
//!     <ANNOTATION_DOCUMENT AUTHOR="" FORMAT="3.0" VERSION="3.0">
//!       <HEADER MEDIA_FILE="" TIME_UNITS="milliseconds"/>
//!       <TIME_ORDER>
//!         <TIME_SLOT TIME_SLOT_ID="ts1" TIME_VALUE="1000"/>
//!         <TIME_SLOT TIME_SLOT_ID="ts2" TIME_VALUE="5000"/>
//!       </TIME_ORDER>
//!       <TIER LINGUISTIC_TYPE_REF="ref" TIER_ID="ref">
//!         <ANNOTATION>
//!           <ALIGNABLE_ANNOTATION ANNOTATION_ID="a1" TIME_SLOT_REF1="ts1" TIME_SLOT_REF2="ts2">
//!             <ANNOTATION_VALUE>u1</ANNOTATION_VALUE>
//!           </ALIGNABLE_ANNOTATION>
//!         </ANNOTATION>
//!       </TIER>
//!       <LINGUISTIC_TYPE LINGUISTIC_TYPE_ID="ref" TIME_ALIGNABLE="true" GRAPHIC_REFERENCES="false"/>
//!     </ANNOTATION_DOCUMENT>"#;
//!
//!     let mut document = parse_eaf(eaf)?;
//!     assert_eq!(document.annotation_start_time(AnnotationId(1)), Some(1000));
//!
//!     document.set_time_slot_value(AnchorId(2), Some(5200))?;
//!
//!     let xml = generate_eaf(&document, &EafGenerationOptions::default())?;
//!     assert!(xml.contains(r#"TIME_VALUE="5200""#));
//!     Ok(())
//! }
//! ```

pub mod generator;
pub mod parser;

pub use generator::generate_eaf;
pub use parser::parse_eaf;

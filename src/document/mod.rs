//! Marker-delimited Markdown documents and section-scoped mutation.
//!
//! A persisted guide document looks like:
//!
//! ```text
//! <!-- guidebook:doc id=routing schema=1 -->
//! # Routing
//!
//! *Generated at: 2024-03-05*
//!
//! <!-- section: routing -->
//! ## Routing
//!
//! ...body...
//!
//! <!-- footer -->
//! ---
//!
//! [← Back to index](../PROJECT_GUIDE.md)
//! ```
//!
//! [`Document::parse`] is lossless: everything between markers is kept verbatim,
//! so [`Document::to_markdown`] reproduces the input byte for byte. Mutations in
//! [`mutate`] only rewrite the body of the targeted section.

pub mod alias;
pub mod model;
pub mod mutate;

pub use model::{Document, Section, INSERT_MARKER, SCHEMA_VERSION};
pub use mutate::{append, locate, replace};

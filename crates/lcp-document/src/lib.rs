//! LCP Lifecycle Document
//!
//! Parsed API lifecycle configuration (an SCXML state machine stored as XML)
//! with scoped traversal over `state` → `data` → `execution`.
//!
//! # Core Concepts
//!
//! - [`LifecycleDocument`]: parsed tree, ingress via [`LifecycleDocument::parse`]
//!   and egress via [`LifecycleDocument::to_xml_string`]
//! - [`ExecutionEntry`]: `(forEvent, class)` pair of an `execution` element
//! - [`DataSection`] / [`ExecutionElement`]: mutable views handed to patchers
//! - [`ContentHash`]: BLAKE3 digest of the serialized form
//!
//! # Example
//!
//! ```rust,ignore
//! use lcp_document::{ExecutionEntry, LifecycleDocument};
//!
//! let mut doc = LifecycleDocument::parse(xml)?;
//! doc.for_each_state_data_mut("Published", |data| {
//!     if let Some(mut data) = data {
//!         data.append_execution(&ExecutionEntry::new("Publish", "com.example.Executor"));
//!     }
//! });
//! let updated = doc.to_xml_string()?;
//! ```

#![warn(unreachable_pub)]

mod document;
mod entry;
mod error;
mod hash;
pub mod tags;

pub use document::{
    strip_empty_namespace, DataSection, ExecutionElement, LifecycleDocument,
    DEFAULT_MAX_DOCUMENT_BYTES,
};
pub use entry::{ExecutionEntry, LocatedExecution};
pub use error::DocumentError;
pub use hash::ContentHash;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

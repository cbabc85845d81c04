//! # exoquery Core
//!
//! Domain types, traits, and error definitions for the exoquery target
//! pipeline. This crate has **zero framework dependencies** — it defines the
//! data model that all other crates implement against, plus the one piece of
//! real logic in the system: the parameter reconciler.
//!
//! ## Design Philosophy
//!
//! The archive is defined as a trait here and implemented in its own crate.
//! Reconciliation is a pure function of already-fetched rows, so the core
//! can be unit tested without network or file access.

pub mod archive;
pub mod error;
pub mod field;
pub mod reconcile;
pub mod record;
pub mod row;
pub mod target;

// Re-export key types at crate root for ergonomics
pub use archive::{Archive, QueryResult};
pub use error::{ArchiveError, Error, ReportError, Result, TargetError};
pub use field::{FieldCatalogue, FieldSpec, ValueKind};
pub use reconcile::reconcile;
pub use record::{FullRecord, ReconciledField, ReducedRecord};
pub use row::{Measurement, ParamValue, RawRow};
pub use target::TargetEntry;

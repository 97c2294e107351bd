//! Core request-scoped computations for synoptic report generation.
//!
//! Every operation here is a pure function of the submitted form and the
//! organ configuration: no I/O, no shared mutable state, no failure paths.
//! Malformed input degrades to safe defaults so a report can always be
//! produced from partial data.

#![deny(unsafe_code)]

pub mod context;
pub mod extract;
pub mod histology;
pub mod nodal;
pub mod stage;

pub use crate::context::{ReportContext, assemble};
pub use crate::extract::extract;
pub use crate::histology::summarize_histology;
pub use crate::nodal::summarize_nodal;
pub use crate::stage::{UNKNOWN_STAGE, normalize_component, resolve_stage};

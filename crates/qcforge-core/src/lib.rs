//! qcforge shared protocol library.
//!
//! This crate provides the pieces every qcforge backend shares: the typed
//! option-schema model, the resolution engine that turns raw host-supplied
//! values into a validated option set, the generator seam backends plug
//! into, and the JSON envelope exchanged with the host application.
//!
//! # Overview
//!
//! A backend declares its configurable surface once, as an ordered
//! [`OptionSchema`] of typed descriptors with defaults and constraints. At
//! request time the host submits a JSON job description; [`resolve`] checks
//! it against the schema and fills defaults, the backend's
//! [`InputGenerator::compile`] turns the resolved set into engine input
//! text containing one coordinate placeholder, and [`envelope::generate`]
//! wraps the text into the response the host consumes. Everything is
//! synchronous and stateless across calls: schemas and lookup tables are
//! process-wide immutable data, and every other value lives for a single
//! request.
//!
//! # Modules
//!
//! - [`options`]: option descriptors, schema groups, and the schema JSON
//!   document
//! - [`resolve`]: resolution of raw values into an [`OptionSet`]
//! - [`generate`]: the [`InputGenerator`] trait and [`GenerationResult`]
//! - [`coords`]: the coordinate placeholder contract
//! - [`envelope`]: the request/response envelope codec
//! - [`error`]: error and warning conventions

pub mod coords;
pub mod envelope;
pub mod error;
pub mod generate;
pub mod options;
pub mod resolve;

// Re-export commonly used types at the crate root
pub use coords::{count_tokens, CoordsFormat};
pub use envelope::{describe, InputFile, JobRequest, JobResponse, DEBUG_FILENAME};
pub use error::{Error, Result, ValidationError};
pub use generate::{GenerationResult, InputGenerator};
pub use options::{
    OptionDescriptor, OptionGroup, OptionKind, OptionSchema, SchemaError, SelectDefault,
};
pub use resolve::{resolve, OptionSet, OptionValue};

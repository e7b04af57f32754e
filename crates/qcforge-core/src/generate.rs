//! The seam between the shared protocol and the per-engine backends.

use crate::error::Result;
use crate::options::OptionSchema;
use crate::resolve::OptionSet;

/// The text produced by one compilation, plus any advisory warnings raised
/// along the way.
///
/// Warnings never block generation; they inform the caller that a requested
/// option was ignored or altered. The accumulator is owned by the result,
/// scoped to one compilation, so nothing can leak between jobs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResult {
    /// The generated engine input text.
    pub text: String,
    /// Advisory warnings, in the order they were raised.
    pub warnings: Vec<String>,
}

impl GenerationResult {
    /// Creates a result with no warnings.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            warnings: Vec::new(),
        }
    }

    /// Creates a result carrying warnings.
    pub fn with_warnings(text: impl Into<String>, warnings: Vec<String>) -> Self {
        Self {
            text: text.into(),
            warnings,
        }
    }
}

/// One engine adapter: a static schema plus a pure compilation function.
///
/// `compile` must be deterministic — the same resolved option set always
/// yields the same result — and must not touch any state outside its
/// arguments. A fatal error aborts the job with no partial text.
pub trait InputGenerator {
    /// Human-readable engine name.
    fn display_name(&self) -> &'static str;

    /// Extension of the primary generated file, without the dot.
    fn file_extension(&self) -> &'static str;

    /// The engine's configurable surface.
    fn schema(&self) -> &OptionSchema;

    /// Molecule format the host must attach to requests, if the engine
    /// needs one declared up front.
    fn input_molecule_format(&self) -> Option<&'static str> {
        None
    }

    /// Compiles a resolved option set into engine input text.
    fn compile(&self, options: &OptionSet) -> Result<GenerationResult>;
}

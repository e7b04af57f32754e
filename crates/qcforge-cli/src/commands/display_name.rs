//! The `display-name` operation.

use anyhow::Result;
use qcforge_core::InputGenerator;

use crate::dispatch::Backend;

/// Prints the engine's human-readable name.
pub fn run(backend: Backend) -> Result<()> {
    println!("{}", backend.generator().display_name());
    Ok(())
}

//! The `print-options` operation.

use anyhow::Result;

use crate::dispatch::Backend;

/// Prints the engine's option schema as a JSON document.
pub fn run(backend: Backend) -> Result<()> {
    let document = qcforge_core::describe(backend.generator());
    println!("{}", serde_json::to_string(&document)?);
    Ok(())
}

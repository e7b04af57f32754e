//! The `generate-input` operation.

use std::io::Read;

use anyhow::Result;

use crate::dispatch::Backend;

/// Reads a job request from standard input and prints the response
/// envelope. With `debug` set, the response carries an extra file echoing
/// the verbatim request.
pub fn run(backend: Backend, debug: bool) -> Result<()> {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;

    let response = qcforge_core::envelope::generate(backend.generator(), &raw, debug)?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

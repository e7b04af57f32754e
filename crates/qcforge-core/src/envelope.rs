//! The request/response envelope exchanged with the host application.
//!
//! One request produces one response, synchronously, with no state kept
//! between calls. The request carries raw option values (and, for engines
//! that declare one, an opaque molecule payload); the response carries the
//! generated files, the designated main file, and any advisory warnings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::generate::InputGenerator;
use crate::resolve::resolve;

/// Fixed name of the optional raw-request echo file.
pub const DEBUG_FILENAME: &str = "debug_info";

/// A job request as submitted by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct JobRequest {
    /// Raw option values, keyed by option name.
    pub options: Map<String, Value>,
    /// Opaque molecule payload. Accepted for every backend, inspected by
    /// none; only backends announcing an input molecule format expect it.
    #[serde(default)]
    pub cjson: Option<Value>,
}

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFile {
    /// File name, extension included.
    pub filename: String,
    /// Complete file text.
    pub contents: String,
}

/// The response envelope returned to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResponse {
    /// Generated files, in presentation order.
    pub files: Vec<InputFile>,
    /// Name of the file the host should submit; always matches exactly one
    /// entry of `files`.
    #[serde(rename = "mainFile")]
    pub main_file: String,
    /// Advisory warnings, present only when at least one was raised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

/// Handles one generation request.
///
/// Parses `raw_request`, resolves its options against the generator's
/// schema, compiles, and wraps the generated text as
/// `<Filename Base>.<extension>`, the response's main file. With `debug`
/// set, a second fixed-name file echoes the verbatim request text — never
/// validated or parsed, useful for diagnosing host mismatches. Compiler
/// warnings propagate unchanged and in order. Resolution and compilation
/// errors pass through unwrapped.
pub fn generate(
    generator: &dyn InputGenerator,
    raw_request: &str,
    debug: bool,
) -> Result<JobResponse> {
    let request: JobRequest = serde_json::from_str(raw_request)?;
    let options = resolve(generator.schema(), &request.options)?;
    let result = generator.compile(&options)?;

    let base_name = options.text("Filename Base")?;
    let filename = format!("{}.{}", base_name, generator.file_extension());

    let mut files = vec![InputFile {
        filename: filename.clone(),
        contents: result.text,
    }];
    if debug {
        files.push(InputFile {
            filename: DEBUG_FILENAME.to_string(),
            contents: raw_request.to_string(),
        });
    }

    Ok(JobResponse {
        files,
        main_file: filename,
        warnings: if result.warnings.is_empty() {
            None
        } else {
            Some(result.warnings)
        },
    })
}

/// The schema document served by the `print-options` operation.
pub fn describe(generator: &dyn InputGenerator) -> Value {
    let mut document = Map::new();
    document.insert(
        "userOptions".to_string(),
        generator.schema().user_options_json(),
    );
    if let Some(format) = generator.input_molecule_format() {
        document.insert(
            "inputMoleculeFormat".to_string(),
            Value::String(format.to_string()),
        );
    }
    Value::Object(document)
}

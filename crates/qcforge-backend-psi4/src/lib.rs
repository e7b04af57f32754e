//! Psi4 input generation backend.
//!
//! Psi4 input is a small Python-like script: thread and memory settings, a
//! basis directive, the molecule block, optional solver settings, and a
//! driver call naming the calculation and theory.

use std::sync::OnceLock;

use qcforge_core::{
    CoordsFormat, Error, GenerationResult, InputGenerator, OptionDescriptor, OptionSchema,
    OptionSet, Result,
};

/// The Psi4 adapter.
pub struct Psi4;

impl InputGenerator for Psi4 {
    fn display_name(&self) -> &'static str {
        "Psi"
    }

    fn file_extension(&self) -> &'static str {
        "in"
    }

    fn schema(&self) -> &OptionSchema {
        schema()
    }

    fn compile(&self, options: &OptionSet) -> Result<GenerationResult> {
        let calculation = options.text("Calculation Type")?;
        let theory = options.text("Theory")?;
        let basis = if options.boolean("Alternate Basis Set")? {
            options.text("Alternate Basis Set Name")?
        } else {
            options.text("Basis")?
        };
        let charge = options.integer("Charge")?;
        let multiplicity = options.integer("Multiplicity")?;
        let cores = options.integer("Processor Cores")?;
        let memory = options.integer("Memory")?;

        let driver = match calculation {
            "Single Point" => "energy",
            "Geometry Optimization" => "optimize",
            "Frequencies" => "frequencies",
            other => return Err(Error::unhandled("Calculation Type", other)),
        };

        let mut output = String::new();
        output.push_str(&format!("set_num_threads({cores})\n"));
        output.push_str(&format!("memory {memory}GB\n"));
        output.push_str(&format!("set basis {basis}\n"));
        output.push_str("molecule {\n");
        output.push_str(&format!("{charge} {multiplicity}\n"));
        output.push_str(&CoordsFormat::Aligned.token());
        output.push('\n');
        output.push_str("}\n\n");

        if driver == "optimize" {
            output.push_str("set optking {\n");
            output.push_str("   print_trajectory_xyz_file\tTrue\n");
            output.push_str("}\n\n");
        }

        // SAPT decompositions need the dimer split into fragments first.
        if theory.contains("SAPT") {
            output.push_str("auto_fragments('')\n");
        }

        output.push_str(&format!("{driver}(\"{theory}\")\n"));

        Ok(GenerationResult::new(output))
    }
}

fn schema() -> &'static OptionSchema {
    static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        OptionSchema::single(vec![
            OptionDescriptor::text("Title", "").tool_tip("Title of the input file"),
            OptionDescriptor::integer("Processor Cores", 1, Some(1), None),
            OptionDescriptor::integer("Memory", 16, Some(1), None),
            OptionDescriptor::select(
                "Calculation Type",
                1,
                &["Single Point", "Geometry Optimization", "Frequencies"],
            )
            .tool_tip("Type of calculation to perform"),
            OptionDescriptor::select(
                "Theory",
                7,
                &[
                    "HF",
                    "MP2",
                    "CCSD",
                    "CCSD(T)",
                    "B3LYP-D",
                    "B97-D",
                    "B97-D3BJ",
                    "REVPBE",
                    "REVPBE-D3BJ",
                    "wB97X-D",
                    "M06-2X",
                    "MO6-L",
                    "SAPT0",
                    "SAPT2",
                    "SAPT2-ct",
                    "SAPT2+",
                    "SAPT2+-ct",
                    "SAPT2+(3)",
                    "SAPT2+(3)-ct",
                    "SAPT2+3",
                    "SAPT2+3-ct",
                ],
            )
            .tool_tip("Hamiltonian or DFT method to use"),
            OptionDescriptor::select(
                "Basis",
                11,
                &[
                    "6-31G(d)",
                    "cc-pVDZ",
                    "cc-pVTZ",
                    "cc-pVQZ",
                    "cc-pV5Z",
                    "cc-pV6Z",
                    "aug-cc-pVDZ",
                    "aug-cc-pVTZ",
                    "aug-cc-pVQZ",
                    "aug-cc-pV5Z",
                    "aug-cc-pV6Z",
                    "def2-SVP",
                    "def2-SVPD",
                    "def2-TZVP",
                    "def2-QZVP",
                    "pc-2",
                    "aug-pc-2",
                ],
            )
            .tool_tip("Gaussian basis set"),
            OptionDescriptor::boolean("Alternate Basis Set", false),
            OptionDescriptor::text("Alternate Basis Set Name", ""),
            OptionDescriptor::text("Filename Base", "job"),
            OptionDescriptor::integer("Charge", 0, Some(-9), Some(9))
                .tool_tip("Total charge of the system"),
            OptionDescriptor::integer("Multiplicity", 1, Some(1), Some(6))
                .tool_tip("Total spin multiplicity of the system"),
        ])
        .expect("default values must satisfy the declared constraints")
    })
}

//! Gaussian input generation backend.
//!
//! Produces `.gjf` input decks: Link 0 resource directives, a `#p` route
//! line, the title section, charge/multiplicity, and the coordinate
//! placeholder the host fills in afterwards.

use std::sync::OnceLock;

use qcforge_core::{
    CoordsFormat, Error, GenerationResult, InputGenerator, OptionDescriptor, OptionSchema,
    OptionSet, Result,
};

/// Methods that parameterize the Hamiltonian directly and take no basis set.
const SEMI_EMPIRICAL: &[&str] = &["AM1", "PM3"];

/// The Gaussian adapter.
pub struct Gaussian;

impl InputGenerator for Gaussian {
    fn display_name(&self) -> &'static str {
        "Gaussian"
    }

    fn file_extension(&self) -> &'static str {
        "gjf"
    }

    fn schema(&self) -> &OptionSchema {
        schema()
    }

    fn compile(&self, options: &OptionSet) -> Result<GenerationResult> {
        let title = options.text("Title")?;
        let calculation = options.text("Calculation Type")?;
        let theory = options.text("Theory")?;
        let basis = if options.boolean("Alternate Basis Set")? {
            options.text("Alternate Basis Set Name")?
        } else {
            options.text("Basis")?
        };
        let multiplicity = options.integer("Multiplicity")?;
        let charge = options.integer("Charge")?;
        let output_format = options.text("Output Format")?;
        let checkpoint = options.boolean("Write Checkpoint File")?;
        let cores = options.integer("Processor Cores")?;
        let memory = options.integer("Memory")?;

        let mut warnings = Vec::new();
        let mut output = String::new();

        // Link 0 resource directives. A single-core job gets no %NProcShared.
        if cores > 1 {
            output.push_str(&format!("%NProcShared={cores}\n"));
        }
        output.push_str(&format!("%mem={memory}GB\n"));
        if checkpoint {
            output.push_str("%Chk=checkpoint.chk\n");
        }

        // Route line. Semi-empirical methods carry their own parameters, so
        // any requested basis is dropped with an advisory warning.
        if SEMI_EMPIRICAL.contains(&theory) {
            output.push_str(&format!("#p {theory}"));
            warnings.push("Ignoring basis set for semi-empirical calculation.".to_string());
        } else {
            output.push_str(&format!("#p {}/{}", theory, basis.replace(' ', "")));
        }

        output.push_str(match calculation {
            "Single Point" => " SP",
            "Equilibrium Geometry" => " Opt",
            "Frequencies" => " Opt Freq",
            other => return Err(Error::unhandled("Calculation Type", other)),
        });

        match output_format {
            "Standard" => {}
            "Molden" => output.push_str(" gfprint pop=full"),
            "Molekel" => output.push_str(" gfoldprint pop=full"),
            other => return Err(Error::unhandled("Output Format", other)),
        }

        // Title section, then charge and multiplicity.
        output.push_str(&format!("\n\n {title}\n\n"));
        output.push_str(&format!("{charge} {multiplicity}\n"));

        output.push_str(&CoordsFormat::Plain.token());
        output.push('\n');

        // Gaussian silently crashes without a final blank line.
        output.push('\n');

        Ok(GenerationResult::with_warnings(output, warnings))
    }
}

fn schema() -> &'static OptionSchema {
    static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        OptionSchema::single(vec![
            OptionDescriptor::text("Title", ""),
            OptionDescriptor::select(
                "Calculation Type",
                1,
                &["Single Point", "Equilibrium Geometry", "Frequencies"],
            ),
            OptionDescriptor::select(
                "Theory",
                3,
                &["AM1", "PM3", "RHF", "B3LYP", "WB97XD", "MP2", "CCSD"],
            ),
            OptionDescriptor::select(
                "Basis",
                2,
                &[
                    "STO-3G",
                    "3-21G",
                    "6-31G(d)",
                    "6-31G(d,p)",
                    "LANL2DZ",
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
                    "Def2SV",
                    "Def2TZV",
                    "Def2QZV",
                    "Def2SVP",
                    "Def2TZVP",
                    "Def2QZVP",
                    "Def2SVPP",
                    "Def2TZVPP",
                    "Def2QZVPP",
                ],
            ),
            OptionDescriptor::boolean("Alternate Basis Set", false),
            OptionDescriptor::text("Alternate Basis Set Name", ""),
            OptionDescriptor::text("Filename Base", "job"),
            OptionDescriptor::integer("Processor Cores", 8, Some(1), None),
            OptionDescriptor::integer("Memory", 28, Some(1), None),
            OptionDescriptor::integer("Multiplicity", 1, Some(1), Some(5)),
            OptionDescriptor::integer("Charge", 0, Some(-9), Some(9)),
            OptionDescriptor::select("Output Format", 0, &["Standard", "Molden", "Molekel"]),
            OptionDescriptor::boolean("Write Checkpoint File", true),
        ])
        .expect("default values must satisfy the declared constraints")
    })
}

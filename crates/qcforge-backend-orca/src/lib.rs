//! ORCA input generation backend.
//!
//! ORCA input is a `!` route line followed by `%` blocks. The route line
//! concatenates calculation keyword, theory (with optional dispersion and
//! RI keywords), basis (with optional auxiliary basis), and solvation; the
//! blocks cover per-core memory, parallelism, SMD solvation, ab-initio
//! molecular dynamics, and orbital printing.

use std::sync::OnceLock;

use qcforge_core::{
    CoordsFormat, Error, GenerationResult, InputGenerator, OptionDescriptor, OptionSchema,
    OptionSet, Result,
};

/// Auxiliary bases for the RIJONX and RIJCOSX approximations.
const RIJ_AUX_BASES: &[(&str, &str)] = &[
    ("6-31G(d)", "AutoAux"),
    ("cc-pVDZ", "Def2/J"),
    ("cc-pVTZ", "Def2/J"),
    ("cc-pVQZ", "Def2/J"),
    ("aug-cc-pVDZ", "AutoAux"),
    ("aug-cc-pVTZ", "AutoAux"),
    ("aug-cc-pVQZ", "AutoAux"),
    ("def2-SVP", "Def2/J"),
    ("def2-TZVP", "Def2/J"),
    ("def2-QZVP", "Def2/J"),
    ("def2-TZVPP", "Def2/J"),
    ("def2-QZVPP", "Def2/J"),
    ("def2-TZVPPD", "AutoAux"),
    ("def2-QZVPPD", "AutoAux"),
    ("ma-def2-SVP", "AutoAux"),
    ("ma-def2-TZVP", "AutoAux"),
    ("ma-def2-QZVP", "AutoAux"),
];

/// Auxiliary bases for the RIJK approximation.
const RIJK_AUX_BASES: &[(&str, &str)] = &[
    ("6-31G(d)", "AutoAux"),
    ("cc-pVDZ", "cc-pVDZ/JK"),
    ("cc-pVTZ", "cc-pVTZ/JK"),
    ("cc-pVQZ", "cc-pVQZ/JK"),
    ("aug-cc-pVDZ", "aug-cc-pVDZ/JK"),
    ("aug-cc-pVTZ", "aug-cc-pVTZ/JK"),
    ("aug-cc-pVQZ", "aug-cc-pVQZ/JK"),
    ("def2-SVP", "Def2/JK"),
    ("def2-TZVP", "Def2/JK"),
    ("def2-QZVP", "Def2/JK"),
    ("def2-TZVPP", "Def2/JK"),
    ("def2-QZVPP", "Def2/JK"),
    ("def2-TZVPPD", "aug-cc-pVTZ/JK"),
    ("def2-QZVPPD", "aug-cc-pVQZ/JK"),
    ("ma-def2-SVP", "aug-cc-pVDZ/JK"),
    ("ma-def2-TZVP", "aug-cc-pVTZ/JK"),
    ("ma-def2-QZVP", "aug-cc-pVQZ/JK"),
];

fn aux_basis(table: &[(&str, &'static str)], basis: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == basis)
        .map(|(_, aux)| *aux)
}

/// The ORCA adapter.
pub struct Orca;

impl InputGenerator for Orca {
    fn display_name(&self) -> &'static str {
        "ORCA"
    }

    fn file_extension(&self) -> &'static str {
        "inp"
    }

    fn schema(&self) -> &OptionSchema {
        schema()
    }

    fn compile(&self, options: &OptionSet) -> Result<GenerationResult> {
        let title = options.text("Title")?;
        let calculation = options.text("Calculation Type")?;
        let theory = options.text("Theory")?;
        let basis = options.text("Basis")?;
        let charge = options.integer("Charge")?;
        let multiplicity = options.integer("Multiplicity")?;
        let cores = options.integer("Processor Cores")?;
        let memory_per_core = options.integer("Memory")? * 1024 / cores;
        let solvation_type = options.text("Solvation Type")?;
        let solvent = options.text("Solvation")?;
        let orbitals = options.boolean("Print Molecular Orbitals")?;
        let dispersion = options.text("Dispersion Correction")?;
        let ri = options.text("RI Approximation")?;
        let mut auto_aux = options.boolean("AutoAux")?;

        let calc_keyword = match calculation {
            "Single Point" => "SP",
            "Geometry Optimization" => "Opt",
            "Frequencies" => "Opt Freq",
            "Dynamics" => "MD",
            "Transition State" => "OptTS",
            other => return Err(Error::unhandled("Calculation Type", other)),
        };

        // The gas-phase sentinel is any solvent naming "None".
        let solvated = !solvent.contains("None");
        let solvation = if solvated && solvation_type == "CPCM" {
            format!("CPCM({solvent})")
        } else if solvated && solvation_type == "SMD" {
            "CPCM".to_string()
        } else {
            String::new()
        };

        let dispersion = if dispersion == "None" {
            String::new()
        } else {
            format!(" {dispersion}")
        };

        // With RI disabled the automatic auxiliary selection is cleared as
        // well, so no auxiliary basis reaches the route line.
        let mut aux = "None";
        let mut ri_keyword = String::new();
        match ri {
            "None" | "NORI" => {
                auto_aux = false;
            }
            "RIJONX" | "RIJCOSX" => {
                aux = aux_basis(RIJ_AUX_BASES, basis)
                    .ok_or_else(|| Error::unhandled("Basis", basis))?;
                ri_keyword = format!(" {ri}");
            }
            "RIJK" => {
                aux = aux_basis(RIJK_AUX_BASES, basis)
                    .ok_or_else(|| Error::unhandled("Basis", basis))?;
                ri_keyword = format!(" {ri}");
            }
            other => return Err(Error::unhandled("RI Approximation", other)),
        }
        if auto_aux {
            aux = "AutoAux";
        }

        let basis = if aux != "None" {
            format!("{basis} {aux}")
        } else {
            basis.to_string()
        };
        let theory = format!("{theory}{dispersion}{ri_keyword}");
        let route = format!("{calc_keyword} {theory} {basis} {solvation}");

        let mut output = String::new();
        output.push_str("# qcforge generated ORCA file\n");
        output.push_str(&format!("# {title}\n"));
        output.push_str("# \n");
        output.push_str(&format!("! {route}\n\n"));
        output.push_str(&format!("%maxcore {memory_per_core}\n\n"));
        output.push_str("%pal\n");
        output.push_str(&format!("   nprocs {cores}\n"));
        output.push_str("end\n\n");

        if solvated && solvation_type == "SMD" {
            output.push_str("%cpcm\n");
            output.push_str("   smd true\n");
            output.push_str(&format!("   SMDSolvent \"{solvent}\"\n"));
            output.push_str("end\n\n");
        }

        if calc_keyword == "MD" {
            // Dynamics parameters are opaque strings passed through as-is;
            // units are the engine's concern.
            output.push_str("%md\n");
            output.push_str(&format!("   timestep {}\n", options.text("AIMD TimeStep")?));
            output.push_str(&format!("   initvel {}_k\n", options.text("AIMD Initvel")?));
            output.push_str(&format!(
                "   thermostat berendsen {}_k timecon {}\n",
                options.integer("AIMD Thermostat Temp")?,
                options.text("AIMD Thermostat Time")?
            ));
            output.push_str("   dump position stride 1 filename \"trajectory.xyz\"\n");
            output.push_str(&format!("   run {}\n", options.integer("AIMD RunTime")?));
            output.push_str("end\n\n");
        }

        if orbitals {
            output.push_str("%output\n");
            output.push_str("   print[p_mos] 1\n");
            output.push_str("   print[p_basis] 2\n");
            output.push_str("end\n\n");
        }

        output.push_str(&format!("* xyz {charge} {multiplicity}\n"));
        output.push_str(&CoordsFormat::Aligned.token());
        output.push('\n');
        output.push_str("*\n\n\n");

        Ok(GenerationResult::new(output))
    }
}

fn schema() -> &'static OptionSchema {
    static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        OptionSchema::tabbed(vec![
            (
                "Basic",
                vec![
                    OptionDescriptor::text("Title", "").tool_tip("Title of the input file"),
                    OptionDescriptor::integer("Processor Cores", 1, Some(1), None),
                    OptionDescriptor::integer("Memory", 16, Some(1), None),
                    OptionDescriptor::select(
                        "Calculation Type",
                        1,
                        &[
                            "Single Point",
                            "Geometry Optimization",
                            "Frequencies",
                            "Transition State",
                            "Dynamics",
                        ],
                    )
                    .tool_tip("Type of calculation to perform"),
                    OptionDescriptor::boolean("Print Molecular Orbitals", false),
                    OptionDescriptor::select(
                        "Theory",
                        7,
                        &[
                            "HF", "MP2", "CCSD", "CCSD(T)", "BLYP", "PBE", "PBE0", "revPBE",
                            "B3LYP", "B97-3C", "M06L", "M062X", "wB97X-D3",
                        ],
                    ),
                    OptionDescriptor::select(
                        "RI Approximation",
                        0,
                        &["None", "NORI", "RIJK", "RIJONX", "RIJCOSX"],
                    ),
                    OptionDescriptor::select(
                        "Dispersion Correction",
                        0,
                        &["None", "D3ZERO", "D3BJ", "D4"],
                    )
                    .tool_tip("Any added dispersion corrections")
                    .hidden(),
                    OptionDescriptor::select(
                        "Basis",
                        8,
                        &[
                            "6-31G(d)",
                            "cc-pVDZ",
                            "cc-pVTZ",
                            "cc-pVQZ",
                            "aug-cc-pVDZ",
                            "aug-cc-pVTZ",
                            "aug-cc-pVQZ",
                            "def2-SVP",
                            "def2-TZVP",
                            "def2-QZVP",
                            "def2-TZVPP",
                            "def2-QZVPP",
                            "def2-TZVPPD",
                            "def2-QZVPPD",
                            "ma-def2-SVP",
                            "ma-def2-TZVP",
                            "ma-def2-QZVP",
                        ],
                    )
                    .tool_tip("Gaussian basis set"),
                    OptionDescriptor::select(
                        "Solvation",
                        0,
                        &[
                            "None (gas)",
                            "-",
                            "Water",
                            "Acetonitrile",
                            "Acetone",
                            "Ethanol",
                            "Methanol",
                            "CCl4",
                            "CH2Cl2",
                            "Chloroform",
                            "DMSO",
                            "DMF",
                            "Hexane",
                            "Toluene",
                            "Pyridine",
                            "THF",
                            "Toluene",
                        ],
                    )
                    .tool_tip("Solvent Model"),
                    OptionDescriptor::select("Solvation Type", 0, &["CPCM", "SMD"])
                        .tool_tip("Solvent model"),
                    OptionDescriptor::text("Filename Base", "job"),
                    OptionDescriptor::integer("Charge", 0, Some(-9), Some(9))
                        .tool_tip("Total charge of the system"),
                    OptionDescriptor::integer("Multiplicity", 1, Some(1), Some(6))
                        .tool_tip("Total spin multiplicity of the system"),
                    OptionDescriptor::boolean("AutoAux", false)
                        .tool_tip("Automatically select auxiliary basis set"),
                ],
            ),
            (
                "Dynamics",
                vec![
                    OptionDescriptor::text("AIMD TimeStep", "0.5_fs"),
                    OptionDescriptor::text("AIMD Initvel", "350"),
                    OptionDescriptor::integer("AIMD Thermostat Temp", 300, Some(0), Some(1000)),
                    OptionDescriptor::text("AIMD Thermostat Time", "10_fs"),
                    OptionDescriptor::integer("AIMD RunTime", 200, None, None),
                ],
            ),
        ])
        .expect("default values must satisfy the declared constraints")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qcforge_core::{count_tokens, resolve, OptionValue};
    use serde_json::{json, Map, Value};

    fn resolved(overrides: Value) -> OptionSet {
        let raw: Map<String, Value> = overrides.as_object().unwrap().clone();
        resolve(schema(), &raw).unwrap()
    }

    #[test]
    fn test_default_deck() {
        let result = Orca.compile(&resolved(json!({}))).unwrap();
        assert_eq!(
            result.text,
            "# qcforge generated ORCA file\n\
             # \n\
             # \n\
             ! Opt revPBE def2-TZVP \n\n\
             %maxcore 16384\n\n\
             %pal\n   nprocs 1\nend\n\n\
             * xyz 0 1\n\
             $$coords:___Sxyz$$\n\
             *\n\n\n"
        );
        assert_eq!(count_tokens(&result.text), 1);
    }

    #[test]
    fn test_memory_is_split_per_core() {
        let result = Orca
            .compile(&resolved(json!({"Memory": 16, "Processor Cores": 4})))
            .unwrap();
        assert!(result.text.contains("%maxcore 4096\n"));
        assert!(result.text.contains("   nprocs 4\n"));
    }

    #[test]
    fn test_cpcm_solvation_joins_the_route_line() {
        let result = Orca
            .compile(&resolved(json!({"Solvation": "Water", "Solvation Type": "CPCM"})))
            .unwrap();
        assert!(result.text.contains("! Opt revPBE def2-TZVP CPCM(Water)\n"));
        assert!(!result.text.contains("%cpcm"));
    }

    #[test]
    fn test_smd_solvation_emits_a_cpcm_block() {
        let result = Orca
            .compile(&resolved(json!({"Solvation": "DMSO", "Solvation Type": "SMD"})))
            .unwrap();
        assert!(result.text.contains("! Opt revPBE def2-TZVP CPCM\n"));
        assert!(result
            .text
            .contains("%cpcm\n   smd true\n   SMDSolvent \"DMSO\"\nend\n\n"));
    }

    #[test]
    fn test_gas_phase_has_no_solvation() {
        let result = Orca
            .compile(&resolved(json!({"Solvation": "None (gas)", "Solvation Type": "SMD"})))
            .unwrap();
        assert!(result.text.contains("! Opt revPBE def2-TZVP \n"));
        assert!(!result.text.contains("%cpcm"));
    }

    #[test]
    fn test_rij_approximations_use_the_coulomb_table() {
        let result = Orca
            .compile(&resolved(json!({"RI Approximation": "RIJONX", "Basis": "def2-TZVP"})))
            .unwrap();
        assert!(result.text.contains("! Opt revPBE RIJONX def2-TZVP Def2/J \n"));

        let result = Orca
            .compile(&resolved(json!({"RI Approximation": "RIJCOSX", "Basis": "ma-def2-TZVP"})))
            .unwrap();
        assert!(result
            .text
            .contains("! Opt revPBE RIJCOSX ma-def2-TZVP AutoAux \n"));
    }

    #[test]
    fn test_rijk_uses_the_exchange_table() {
        let result = Orca
            .compile(&resolved(json!({"RI Approximation": "RIJK", "Basis": "cc-pVTZ"})))
            .unwrap();
        assert!(result.text.contains("! Opt revPBE RIJK cc-pVTZ cc-pVTZ/JK \n"));

        let result = Orca
            .compile(&resolved(json!({"RI Approximation": "RIJK", "Basis": "def2-QZVPPD"})))
            .unwrap();
        assert!(result
            .text
            .contains("! Opt revPBE RIJK def2-QZVPPD aug-cc-pVQZ/JK \n"));
    }

    #[test]
    fn test_disabled_ri_ignores_the_autoaux_flag() {
        for ri in ["None", "NORI"] {
            let result = Orca
                .compile(&resolved(json!({"RI Approximation": ri, "AutoAux": true})))
                .unwrap();
            assert!(
                result.text.contains("! Opt revPBE def2-TZVP \n"),
                "RI {ri} must suppress the auxiliary basis"
            );
        }
    }

    #[test]
    fn test_autoaux_overrides_the_table_selection() {
        let result = Orca
            .compile(&resolved(json!({
                "RI Approximation": "RIJK",
                "Basis": "cc-pVTZ",
                "AutoAux": true,
            })))
            .unwrap();
        assert!(result.text.contains("! Opt revPBE RIJK cc-pVTZ AutoAux \n"));
    }

    #[test]
    fn test_dispersion_correction_follows_the_theory() {
        let result = Orca
            .compile(&resolved(json!({"Dispersion Correction": "D3BJ"})))
            .unwrap();
        assert!(result.text.contains("! Opt revPBE D3BJ def2-TZVP \n"));
    }

    #[test]
    fn test_dynamics_block() {
        let result = Orca
            .compile(&resolved(json!({"Calculation Type": "Dynamics"})))
            .unwrap();
        assert!(result.text.contains("! MD revPBE def2-TZVP \n"));
        assert!(result.text.contains(
            "%md\n   timestep 0.5_fs\n   initvel 350_k\n   \
             thermostat berendsen 300_k timecon 10_fs\n   \
             dump position stride 1 filename \"trajectory.xyz\"\n   run 200\nend\n\n"
        ));
    }

    #[test]
    fn test_orbital_printing_block() {
        let result = Orca
            .compile(&resolved(json!({"Print Molecular Orbitals": true})))
            .unwrap();
        assert!(result
            .text
            .contains("%output\n   print[p_mos] 1\n   print[p_basis] 2\nend\n\n"));
    }

    #[test]
    fn test_unknown_calculation_type_is_fatal() {
        let mut options = resolved(json!({}));
        options.insert("Calculation Type", OptionValue::Text("Scan".to_string()));
        let err = Orca.compile(&options).unwrap_err();
        assert!(matches!(err, Error::UnhandledOption { .. }));
    }

    #[test]
    fn test_unknown_basis_reaching_a_table_is_fatal() {
        let mut options = resolved(json!({"RI Approximation": "RIJK"}));
        options.insert("Basis", OptionValue::Text("STO-3G".to_string()));
        let err = Orca.compile(&options).unwrap_err();
        assert!(matches!(err, Error::UnhandledOption { .. }));
    }

    #[test]
    fn test_schema_defaults_resolve() {
        let first = resolve(schema(), &Map::new()).unwrap();
        let second = resolve(schema(), &first.to_raw()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.text("Theory").unwrap(), "revPBE");
        assert_eq!(first.text("Basis").unwrap(), "def2-TZVP");
        assert_eq!(first.text("AIMD TimeStep").unwrap(), "0.5_fs");
    }

    #[test]
    fn test_schema_document_is_tabbed() {
        let json = schema().user_options_json();
        let tabs = json.as_array().unwrap();
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0]["tabName"], "Basic");
        assert_eq!(tabs[1]["tabName"], "Dynamics");
        assert_eq!(tabs[0]["Dispersion Correction"]["hide"], true);
    }
}

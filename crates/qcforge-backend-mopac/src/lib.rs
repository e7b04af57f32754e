//! MOPAC input generation backend.
//!
//! MOPAC takes a single keyword line, a title, and the coordinate block.
//! Semi-empirical Hamiltonians are the whole theory surface, COSMO
//! solvation is expressed as an `EPS=` dielectric keyword, and the
//! coordinate placeholder variant encodes per-axis optimization flags.

use std::sync::OnceLock;

use qcforge_core::{
    CoordsFormat, Error, GenerationResult, InputGenerator, OptionDescriptor, OptionSchema,
    OptionSet, Result,
};

/// Solvent dielectric constants for the COSMO `EPS=` keyword.
const SOLVENT_DIELECTRICS: &[(&str, f64)] = &[
    ("Acetic acid", 6.15),
    ("Acetone", 20.7),
    ("Acetonitrile", 37.5),
    ("Anisole", 4.33),
    ("Benzene", 2.27),
    ("Bromobenzene", 5.17),
    ("Carbon disulfide", 2.6),
    ("Carbon tetrachloride", 2.24),
    ("Chlorobenzene", 5.62),
    ("Chloroform", 4.81),
    ("Cyclohexane", 2.02),
    ("Dibutyl ether", 3.1),
    ("o-Dichlorobenzene", 9.93),
    ("1,2-Dichloroethane", 10.36),
    ("Dichloromethane", 8.93),
    ("Diethylamine", 3.6),
    ("Diethylether", 4.33),
    ("1,2-Dimethoxyethane", 7.2),
    ("N,N-Dimethylacetamide", 37.8),
    ("N,N-Dimethylformamide", 36.7),
    ("Dimethylsulfoxide", 46.7),
    ("1,4-Dioxane", 2.25),
    ("Ethanol", 24.5),
    ("Ethyl acetate", 6.02),
    ("Ethyl benzoate", 6.02),
    ("Formamide", 111.0),
    ("Hexamethylphosphoramide", 30.0),
    ("Isopropyl lcohol", 17.9),
    ("Methanol", 32.7),
    ("2-Methyl-2-propanol", 10.9),
    ("Nitrobenzene", 34.82),
    ("Nitromethane", 35.87),
    ("Pyridine", 12.4),
    ("Tetrahydrofuran", 7.58),
    ("Toluene", 2.38),
    ("Trichloroethylene", 3.4),
    ("Triethylamine", 2.42),
    ("Trifluoroacetic acid", 8.55),
    ("2,2,2-Trifluoroethanol", 8.55),
    ("Water", 80.1),
    ("o-Xylene", 2.57),
];

fn solvent_dielectric(solvent: &str) -> Option<f64> {
    SOLVENT_DIELECTRICS
        .iter()
        .find(|(name, _)| *name == solvent)
        .map(|(_, eps)| *eps)
}

/// The MOPAC adapter.
pub struct Mopac;

impl InputGenerator for Mopac {
    fn display_name(&self) -> &'static str {
        "MOPAC"
    }

    fn file_extension(&self) -> &'static str {
        "mop"
    }

    fn schema(&self) -> &OptionSchema {
        schema()
    }

    fn compile(&self, options: &OptionSet) -> Result<GenerationResult> {
        let title = options.text("Title")?;
        let calculation = options.text("Calculation Type")?;
        let theory = options.text("Theory")?;
        let multiplicity = options.integer("Multiplicity")?;
        let charge = options.integer("Charge")?;
        let cores = options.integer("Processor Cores")?;
        let solvent = options.text("Solvent")?;
        let other_dielectric = options.text("Other Solvent Dielectric")?;
        let cosmo = options.boolean("COSMO")?;

        let spin_state = match multiplicity {
            1 => "SINGLET",
            2 => "DOUBLET",
            3 => "TRIPLET",
            4 => "QUARTET",
            5 => "QUINTET",
            6 => "SEXTET",
            other => return Err(Error::unhandled("Multiplicity", other)),
        };

        let calc_keyword = match calculation {
            "Single Point" => "NOOPT",
            "Equilibrium Geometry" => "",
            "Frequencies" => "FORCE",
            "Transition State" => "SADDLE",
            other => return Err(Error::unhandled("Calculation Type", other)),
        };

        // "OTHER" defers to the dielectric the user typed in.
        let dielectric = if solvent == "OTHER" {
            other_dielectric.to_string()
        } else {
            solvent_dielectric(solvent)
                .ok_or_else(|| Error::unhandled("Solvent", solvent))?
                .to_string()
        };

        let eps = if cosmo {
            format!("EPS={dielectric}")
        } else {
            String::new()
        };

        // Open-shell systems always run unrestricted.
        let hf_type = if multiplicity > 1 {
            "UHF"
        } else {
            options.text("HF Type")?
        };

        let mut output = String::new();
        output.push_str(&format!(
            " AUX LARGE CHARGE={charge} {spin_state} {calc_keyword} {theory} {eps} PDBOUT THREADS={cores} {hf_type}\n"
        ));
        output.push_str(&format!("{title}\n\n"));

        // Single points freeze every axis; anything that moves the geometry
        // marks the axes as optimizable.
        let coords = if calculation == "Single Point" {
            CoordsFormat::OptFlagsOff
        } else {
            CoordsFormat::OptFlagsOn
        };
        output.push_str(&coords.token());
        output.push('\n');

        Ok(GenerationResult::new(output))
    }
}

fn schema() -> &'static OptionSchema {
    static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        OptionSchema::single(vec![
            OptionDescriptor::text("Title", ""),
            OptionDescriptor::integer("Processor Cores", 1, Some(1), None),
            OptionDescriptor::select(
                "Calculation Type",
                1,
                &[
                    "Single Point",
                    "Equilibrium Geometry",
                    "Frequencies",
                    "Transition State",
                ],
            ),
            OptionDescriptor::select(
                "Theory",
                3,
                &["AM1", "PM3", "PM6", "PM7", "RM1", "MNDO", "MNDOD"],
            ),
            OptionDescriptor::text("Filename Base", "job"),
            OptionDescriptor::integer("Multiplicity", 1, Some(1), Some(6)),
            OptionDescriptor::integer("Charge", 0, Some(-9), Some(9)),
            OptionDescriptor::boolean("COSMO", true),
            OptionDescriptor::select_value(
                "Solvent",
                "Water",
                &[
                    "OTHER",
                    "Acetic acid",
                    "Acetone",
                    "Acetonitrile",
                    "Anisole",
                    "Benzene",
                    "Bromobenzene",
                    "Carbon disulfide",
                    "Carbon tetrachloride",
                    "Chlorobenzene",
                    "Chloroform",
                    "Cyclohexane",
                    "Dibutyl ether",
                    "o-Dichlorobenzene",
                    "1,2-Dichloroethane",
                    "Dichloromethane",
                    "Diethylamine",
                    "Diethylether",
                    "1,2-Dimethoxyethane",
                    "N,N-Dimethylacetamide",
                    "N,N-Dimethylformamide",
                    "Dimethylsulfoxide",
                    "1,4-Dioxane",
                    "Ethanol",
                    "Ethyl acetate",
                    "Ethyl benzoate",
                    "Formamide",
                    "Hexamethylphosphoramide",
                    "Isopropyl lcohol",
                    "Methanol",
                    "2-Methyl-2-propanol",
                    "Nitrobenzene",
                    "Nitromethane",
                    "Pyridine",
                    "Tetrahydrofuran",
                    "Toluene",
                    "Trichloroethylene",
                    "Triethylamine",
                    "Trifluoroacetic acid",
                    "2,2,2-Trifluoroethanol",
                    "Water",
                    "o-Xylene",
                ],
            )
            .tool_tip("Solvent"),
            OptionDescriptor::text("Other Solvent Dielectric", "0.00"),
            OptionDescriptor::select_value("HF Type", "RHF", &["RHF", "UHF"])
                .tool_tip("Open or closed shell"),
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
        let result = Mopac.compile(&resolved(json!({}))).unwrap();
        assert_eq!(
            result.text,
            " AUX LARGE CHARGE=0 SINGLET  PM7 EPS=80.1 PDBOUT THREADS=1 RHF\n\n\n$$coords:Sx1y1z1$$\n"
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_water_dielectric_comes_from_the_table() {
        let result = Mopac.compile(&resolved(json!({"Solvent": "Water"}))).unwrap();
        assert!(result.text.contains("EPS=80.1 "));
    }

    #[test]
    fn test_other_solvent_reads_the_user_dielectric() {
        let result = Mopac
            .compile(&resolved(json!({
                "Solvent": "OTHER",
                "Other Solvent Dielectric": "12.85",
            })))
            .unwrap();
        assert!(result.text.contains("EPS=12.85 "));
    }

    #[test]
    fn test_cosmo_off_drops_the_eps_keyword() {
        let result = Mopac.compile(&resolved(json!({"COSMO": false}))).unwrap();
        assert!(!result.text.contains("EPS="));
    }

    #[test]
    fn test_single_point_uses_frozen_coordinate_flags() {
        let result = Mopac
            .compile(&resolved(json!({"Calculation Type": "Single Point"})))
            .unwrap();
        assert!(result.text.contains("NOOPT"));
        assert!(result.text.ends_with("$$coords:Sx0y0z0$$\n"));
        assert_eq!(count_tokens(&result.text), 1);
    }

    #[test]
    fn test_geometry_calculations_use_mobile_coordinate_flags() {
        for calculation in ["Equilibrium Geometry", "Frequencies", "Transition State"] {
            let result = Mopac
                .compile(&resolved(json!({"Calculation Type": calculation})))
                .unwrap();
            assert!(result.text.ends_with("$$coords:Sx1y1z1$$\n"));
        }
    }

    #[test]
    fn test_calculation_keywords() {
        let result = Mopac
            .compile(&resolved(json!({"Calculation Type": "Frequencies"})))
            .unwrap();
        assert!(result.text.contains(" FORCE "));

        let result = Mopac
            .compile(&resolved(json!({"Calculation Type": "Transition State"})))
            .unwrap();
        assert!(result.text.contains(" SADDLE "));
    }

    #[test]
    fn test_spin_state_names() {
        let expectations = [
            (1, "SINGLET"),
            (2, "DOUBLET"),
            (3, "TRIPLET"),
            (4, "QUARTET"),
            (5, "QUINTET"),
            (6, "SEXTET"),
        ];
        for (multiplicity, name) in expectations {
            let result = Mopac
                .compile(&resolved(json!({"Multiplicity": multiplicity})))
                .unwrap();
            assert!(result.text.contains(name), "multiplicity {multiplicity}");
        }
    }

    #[test]
    fn test_open_shell_forces_uhf() {
        let result = Mopac
            .compile(&resolved(json!({"Multiplicity": 3, "HF Type": "RHF"})))
            .unwrap();
        assert!(result.text.contains(" UHF\n"));

        let result = Mopac
            .compile(&resolved(json!({"Multiplicity": 1, "HF Type": "UHF"})))
            .unwrap();
        assert!(result.text.contains(" UHF\n"));
    }

    #[test]
    fn test_out_of_range_multiplicity_is_fatal() {
        let mut options = resolved(json!({}));
        options.insert("Multiplicity", OptionValue::Integer(7));
        let err = Mopac.compile(&options).unwrap_err();
        assert!(matches!(err, Error::UnhandledOption { .. }));
    }

    #[test]
    fn test_unknown_solvent_reaching_the_table_is_fatal() {
        let mut options = resolved(json!({}));
        options.insert("Solvent", OptionValue::Text("Olive oil".to_string()));
        let err = Mopac.compile(&options).unwrap_err();
        assert!(matches!(err, Error::UnhandledOption { .. }));
    }

    #[test]
    fn test_schema_defaults_resolve() {
        let first = resolve(schema(), &Map::new()).unwrap();
        let second = resolve(schema(), &first.to_raw()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.text("Solvent").unwrap(), "Water");
        assert_eq!(first.text("HF Type").unwrap(), "RHF");
        assert_eq!(first.text("Theory").unwrap(), "PM7");
    }

    #[test]
    fn test_integer_dielectrics_render_without_a_fraction() {
        let result = Mopac
            .compile(&resolved(json!({"Solvent": "Formamide"})))
            .unwrap();
        assert!(result.text.contains("EPS=111 "));
    }
}

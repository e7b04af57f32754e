//! PySCF input generation backend.
//!
//! PySCF jobs are Python scripts, so this backend emits a script that
//! builds a `gto.Mole`, sets basis/charge/spin, and runs the requested
//! mean-field (and optionally MP2) kernels. This is the one backend whose
//! schema announces a required input-molecule format: the host attaches the
//! molecule as `cjson` alongside the options.

use std::sync::OnceLock;

use qcforge_core::{
    CoordsFormat, Error, GenerationResult, InputGenerator, OptionDescriptor, OptionSchema,
    OptionSet, Result,
};

/// Basis names as PySCF spells them.
const BASIS_NAMES: &[(&str, &str)] = &[
    ("STO-3G", "STO-3G"),
    ("3-21g", "321g"),
    ("cc-pvdz", "ccpvdz"),
];

fn internal_basis(basis: &str) -> Option<&'static str> {
    BASIS_NAMES
        .iter()
        .find(|(name, _)| *name == basis)
        .map(|(_, internal)| *internal)
}

/// The PySCF adapter.
pub struct Pyscf;

impl InputGenerator for Pyscf {
    fn display_name(&self) -> &'static str {
        "PYSCF"
    }

    fn file_extension(&self) -> &'static str {
        "py"
    }

    fn schema(&self) -> &OptionSchema {
        schema()
    }

    fn input_molecule_format(&self) -> Option<&'static str> {
        Some("cjson")
    }

    fn compile(&self, options: &OptionSet) -> Result<GenerationResult> {
        let title = options.text("Title")?;
        let calculation = options.text("Calculation Type")?;
        let theory = options.text("Theory")?;
        let basis = options.text("Basis")?;
        let charge = options.integer("Charge")?;
        let multiplicity = options.integer("Multiplicity")?;

        let basis_name =
            internal_basis(basis).ok_or_else(|| Error::unhandled("Basis", basis))?;

        let (import, kernel_lines): (&str, Vec<String>) = match theory {
            "RHF" | "UHF" => (
                "from pyscf import gto,scf\n",
                vec![format!("mf = scf.{theory}(mol)\n"), "mf.kernel()\n".to_string()],
            ),
            "ROHF" => (
                "from pyscf import gto,scf\n",
                vec![
                    format!("mf = scf.{theory}(mol)\n"),
                    "Amf.kernel()\n".to_string(),
                ],
            ),
            "MP2" => {
                let mut lines = vec!["# Must run SCF before MP2 in PYSCF\n".to_string()];
                let reference = if multiplicity == 1 { "RHF" } else { "UHF" };
                lines.push(format!("mf = scf.{reference}(mol)\n"));
                lines.push("mf.kernel()\n".to_string());
                lines.push(format!("mf2 = mp.{theory}(mf)\n"));
                lines.push("mf2.kernel()\n".to_string());
                ("from pyscf import gto,scf,mp\n", lines)
            }
            other => return Err(Error::unhandled("Theory", other)),
        };

        if calculation != "Single Point" {
            return Err(Error::unhandled("Calculation Type", calculation));
        }

        let mut output = String::new();
        output.push_str(&format!("# Title: {title}\n"));
        output.push_str(import);
        output.push_str("mol = gto.Mole()\n");
        output.push_str("mol.atom = '''\n");
        output.push_str(&CoordsFormat::Aligned.token());
        output.push('\n');
        output.push_str("'''\n");
        output.push_str(&format!("mol.basis = '{basis_name}'\n"));
        output.push_str(&format!("mol.charge = {charge}\n"));
        // PySCF counts unpaired electrons, not the spin multiplicity.
        output.push_str(&format!("mol.spin = {}\n", multiplicity - 1));
        output.push_str("mol.build()\n");
        for line in &kernel_lines {
            output.push_str(line);
        }

        Ok(GenerationResult::new(output))
    }
}

fn schema() -> &'static OptionSchema {
    static SCHEMA: OnceLock<OptionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        OptionSchema::single(vec![
            OptionDescriptor::text("Title", ""),
            OptionDescriptor::select("Calculation Type", 0, &["Single Point"]),
            OptionDescriptor::select("Theory", 0, &["RHF", "ROHF", "UHF", "MP2"]),
            OptionDescriptor::select("Basis", 0, &["STO-3G", "3-21g", "cc-pvdz"]),
            OptionDescriptor::text("Filename Base", "job"),
            OptionDescriptor::integer("Charge", 0, Some(-9), Some(9)),
            OptionDescriptor::integer("Multiplicity", 1, Some(1), Some(6)),
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
    fn test_default_script() {
        let result = Pyscf.compile(&resolved(json!({}))).unwrap();
        assert_eq!(
            result.text,
            "# Title: \n\
             from pyscf import gto,scf\n\
             mol = gto.Mole()\n\
             mol.atom = '''\n\
             $$coords:___Sxyz$$\n\
             '''\n\
             mol.basis = 'STO-3G'\n\
             mol.charge = 0\n\
             mol.spin = 0\n\
             mol.build()\n\
             mf = scf.RHF(mol)\n\
             mf.kernel()\n"
        );
        assert_eq!(count_tokens(&result.text), 1);
    }

    #[test]
    fn test_basis_names_map_to_internal_spellings() {
        let result = Pyscf.compile(&resolved(json!({"Basis": "3-21g"}))).unwrap();
        assert!(result.text.contains("mol.basis = '321g'\n"));

        let result = Pyscf.compile(&resolved(json!({"Basis": "cc-pvdz"}))).unwrap();
        assert!(result.text.contains("mol.basis = 'ccpvdz'\n"));
    }

    #[test]
    fn test_spin_counts_unpaired_electrons() {
        let result = Pyscf
            .compile(&resolved(json!({"Theory": "UHF", "Multiplicity": 3})))
            .unwrap();
        assert!(result.text.contains("mol.spin = 2\n"));
    }

    #[test]
    fn test_mp2_runs_a_reference_scf_first() {
        let result = Pyscf
            .compile(&resolved(json!({"Theory": "MP2"})))
            .unwrap();
        assert!(result.text.contains("from pyscf import gto,scf,mp\n"));
        assert!(result.text.ends_with(
            "# Must run SCF before MP2 in PYSCF\n\
             mf = scf.RHF(mol)\n\
             mf.kernel()\n\
             mf2 = mp.MP2(mf)\n\
             mf2.kernel()\n"
        ));
    }

    #[test]
    fn test_open_shell_mp2_uses_a_uhf_reference() {
        let result = Pyscf
            .compile(&resolved(json!({"Theory": "MP2", "Multiplicity": 2})))
            .unwrap();
        assert!(result.text.contains("mf = scf.UHF(mol)\n"));
    }

    #[test]
    fn test_unknown_theory_is_fatal() {
        let mut options = resolved(json!({}));
        options.insert("Theory", OptionValue::Text("CCSD".to_string()));
        let err = Pyscf.compile(&options).unwrap_err();
        assert!(matches!(err, Error::UnhandledOption { .. }));
    }

    #[test]
    fn test_unknown_basis_is_fatal() {
        let mut options = resolved(json!({}));
        options.insert("Basis", OptionValue::Text("def2-SVP".to_string()));
        let err = Pyscf.compile(&options).unwrap_err();
        assert!(matches!(err, Error::UnhandledOption { .. }));
    }

    #[test]
    fn test_unknown_calculation_type_is_fatal() {
        let mut options = resolved(json!({}));
        options.insert(
            "Calculation Type",
            OptionValue::Text("Geometry Optimization".to_string()),
        );
        let err = Pyscf.compile(&options).unwrap_err();
        assert!(matches!(err, Error::UnhandledOption { .. }));
    }

    #[test]
    fn test_schema_announces_the_molecule_format() {
        assert_eq!(Pyscf.input_molecule_format(), Some("cjson"));
    }

    #[test]
    fn test_schema_defaults_resolve() {
        let first = resolve(schema(), &Map::new()).unwrap();
        let second = resolve(schema(), &first.to_raw()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.text("Theory").unwrap(), "RHF");
        assert_eq!(first.text("Basis").unwrap(), "STO-3G");
    }
}

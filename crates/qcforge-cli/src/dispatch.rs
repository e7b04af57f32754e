//! Engine selection.

use clap::ValueEnum;
use qcforge_core::InputGenerator;

/// Engines qcforge can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Gaussian `.gjf` input decks.
    Gaussian,
    /// MOPAC `.mop` keyword files.
    Mopac,
    /// ORCA `.inp` input files.
    Orca,
    /// Psi4 `.in` input files.
    Psi4,
    /// PySCF Python scripts.
    Pyscf,
}

impl Backend {
    /// The adapter for this engine.
    pub fn generator(&self) -> &'static dyn InputGenerator {
        match self {
            Backend::Gaussian => &qcforge_backend_gaussian::Gaussian,
            Backend::Mopac => &qcforge_backend_mopac::Mopac,
            Backend::Orca => &qcforge_backend_orca::Orca,
            Backend::Psi4 => &qcforge_backend_psi4::Psi4,
            Backend::Pyscf => &qcforge_backend_pyscf::Pyscf,
        }
    }

    /// All supported engines.
    pub fn all() -> &'static [Backend] {
        &[
            Backend::Gaussian,
            Backend::Mopac,
            Backend::Orca,
            Backend::Psi4,
            Backend::Pyscf,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_backend_has_a_generator() {
        for backend in Backend::all() {
            let generator = backend.generator();
            assert!(!generator.display_name().is_empty());
            assert!(!generator.file_extension().is_empty());
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Backend::Gaussian.generator().display_name(), "Gaussian");
        assert_eq!(Backend::Mopac.generator().display_name(), "MOPAC");
        assert_eq!(Backend::Orca.generator().display_name(), "ORCA");
        assert_eq!(Backend::Psi4.generator().display_name(), "Psi");
        assert_eq!(Backend::Pyscf.generator().display_name(), "PYSCF");
    }

    #[test]
    fn test_file_extensions() {
        assert_eq!(Backend::Gaussian.generator().file_extension(), "gjf");
        assert_eq!(Backend::Mopac.generator().file_extension(), "mop");
        assert_eq!(Backend::Orca.generator().file_extension(), "inp");
        assert_eq!(Backend::Psi4.generator().file_extension(), "in");
        assert_eq!(Backend::Pyscf.generator().file_extension(), "py");
    }

    #[test]
    fn test_only_pyscf_declares_a_molecule_format() {
        for backend in Backend::all() {
            let expected = matches!(backend, Backend::Pyscf).then_some("cjson");
            assert_eq!(backend.generator().input_molecule_format(), expected);
        }
    }
}

use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use crate::structure::read_pdb;
use mpipi::core::coords::ChainSpec;
use mpipi::core::models::chain::ChainKind;
use mpipi::core::models::regions::{GlobularRegions, RegionSpec};
use mpipi::engine::config::{BuildConfig, BuildConfigBuilder, ModelConstants};
use mpipi::workflows::build::PlacedChain;
use nalgebra::Vector3;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConditions {
    pub temperature: Option<f64>,
    pub ionic_strength: Option<f64>,
    pub periodic: Option<bool>,
    pub remove_com_motion: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileChain {
    pub id: String,
    pub kind: ChainKind,
    pub sequence: String,
    pub globular_regions: Option<RegionSpec>,
    /// PDB file with the atomistic structure of a multi-domain protein.
    pub structure: Option<PathBuf>,
    /// Chain of `structure` to read; all chains when absent.
    pub structure_chain: Option<char>,
    #[serde(default)]
    pub offset: [f64; 3],
    /// Number of copies placed in a slab; only used for box sizing.
    #[serde(default = "default_copies")]
    pub copies: usize,
}

fn default_copies() -> usize {
    1
}

/// A system description as written in a TOML file.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SystemFile {
    #[serde(default)]
    pub conditions: FileConditions,
    pub constants: Option<ModelConstants>,
    pub chains: Vec<FileChain>,
}

impl SystemFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading system description from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut file: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        if file.chains.is_empty() {
            return Err(CliError::Config(format!(
                "'{}' does not define any [[chains]]",
                path.display()
            )));
        }
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for chain in &mut file.chains {
            if let Some(structure) = &chain.structure {
                if structure.is_relative() {
                    chain.structure = Some(base.join(structure));
                }
            }
        }
        Ok(file)
    }

    /// Combines file settings with command-line overrides.
    pub fn build_config(&self, args: &BuildArgs) -> Result<BuildConfig> {
        let constants = match &args.constants {
            Some(path) => ModelConstants::load(path)?,
            None => self.constants.unwrap_or_default(),
        };

        let mut builder = BuildConfigBuilder::new().constants(constants);
        if let Some(t) = args.temperature.or(self.conditions.temperature) {
            builder = builder.temperature(t);
        }
        if let Some(i) = args.ionic_strength.or(self.conditions.ionic_strength) {
            builder = builder.ionic_strength(i);
        }
        if let Some(p) = args.periodicity.resolve().or(self.conditions.periodic) {
            builder = builder.periodic(p);
        }
        if let Some(r) = args.com_motion.resolve().or(self.conditions.remove_com_motion) {
            builder = builder.remove_com_motion(r);
        }
        Ok(builder.build()?)
    }

    /// Turns each file chain into a placed chain spec, reading structures.
    pub fn placed_chains(&self) -> Result<Vec<PlacedChain>> {
        self.chains.iter().map(FileChain::to_placed).collect()
    }
}

impl FileChain {
    pub fn to_placed(&self) -> Result<PlacedChain> {
        let regions = self
            .globular_regions
            .clone()
            .map(GlobularRegions::new)
            .unwrap_or_default();

        let spec = match (&self.structure, self.kind) {
            (Some(path), ChainKind::Protein) => ChainSpec::Structured {
                id: self.id.clone(),
                sequence: self.sequence.clone(),
                regions,
                structure: read_pdb(path, self.structure_chain)?,
            },
            (Some(_), ChainKind::Rna) => {
                return Err(CliError::Config(format!(
                    "Chain '{}': structures are only supported for protein chains",
                    self.id
                )));
            }
            (None, kind) => {
                if !regions.is_empty() {
                    return Err(CliError::Config(format!(
                        "Chain '{}': globular regions require a structure file",
                        self.id
                    )));
                }
                ChainSpec::Synthetic {
                    id: self.id.clone(),
                    kind,
                    sequence: self.sequence.clone(),
                }
            }
        };

        Ok(PlacedChain {
            spec,
            offset: Vector3::from(self.offset),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const SYSTEM: &str = r#"
[conditions]
temperature = 300.0
ionic-strength = 150.0
periodic = false

[constants]
enm-cutoff = 0.8

[[chains]]
id = "A"
kind = "protein"
sequence = "MKV"
offset = [1.0, 0.0, 0.0]

[[chains]]
id = "R"
kind = "rna"
sequence = "UUUU"
copies = 4
"#;

    fn build_args(extra: &[&str]) -> BuildArgs {
        let mut argv = vec!["mpipi", "build", "-c", "s.toml", "-p", "p.txt", "-o", "o.toml"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Build(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn system_file_parses_chains_and_conditions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("system.toml");
        fs::write(&path, SYSTEM).unwrap();

        let file = SystemFile::from_file(&path).unwrap();
        assert_eq!(file.chains.len(), 2);
        assert_eq!(file.chains[1].kind, ChainKind::Rna);
        assert_eq!(file.chains[0].copies, 1);
        assert_eq!(file.chains[1].copies, 4);
        assert_eq!(file.constants.unwrap().enm_cutoff, 0.8);

        let placed = file.placed_chains().unwrap();
        assert_eq!(placed[0].offset, Vector3::new(1.0, 0.0, 0.0));
        assert!(matches!(placed[1].spec, ChainSpec::Synthetic { kind: ChainKind::Rna, .. }));
    }

    #[test]
    fn command_line_overrides_file_conditions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("system.toml");
        fs::write(&path, SYSTEM).unwrap();
        let file = SystemFile::from_file(&path).unwrap();

        let config = file.build_config(&build_args(&["-T", "280", "--periodic"])).unwrap();
        assert_eq!(config.conditions.temperature, 280.0);
        assert_eq!(config.conditions.ionic_strength, 150.0);
        assert!(config.conditions.periodic);
        assert!(config.conditions.remove_com_motion);
        assert_eq!(config.constants.enm_cutoff, 0.8);
    }

    #[test]
    fn missing_temperature_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("system.toml");
        fs::write(
            &path,
            "[[chains]]\nid = \"A\"\nkind = \"protein\"\nsequence = \"G\"\n",
        )
        .unwrap();
        let file = SystemFile::from_file(&path).unwrap();
        assert!(file.build_config(&build_args(&["-I", "100"])).is_err());
    }

    #[test]
    fn regions_without_structure_are_rejected() {
        let chain = FileChain {
            id: "A".to_string(),
            kind: ChainKind::Protein,
            sequence: "GGG".to_string(),
            globular_regions: Some(RegionSpec::Flat(vec![0, 1])),
            structure: None,
            structure_chain: None,
            offset: [0.0; 3],
            copies: 1,
        };
        assert!(matches!(chain.to_placed(), Err(CliError::Config(_))));
    }

    #[test]
    fn file_without_chains_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("system.toml");
        fs::write(&path, "chains = []\n").unwrap();
        assert!(matches!(SystemFile::from_file(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("system.toml");
        fs::write(&path, "[conditions]\ntemp = 3.0\n[[chains]]\nid=\"A\"\nkind=\"protein\"\nsequence=\"G\"\n").unwrap();
        assert!(matches!(
            SystemFile::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn structure_paths_resolve_relative_to_the_config_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("prot.pdb"),
            "ATOM      1  CA  GLY A   1       0.000   0.000   0.000  1.00  0.00           C\n\
             ATOM      2  CA  LYS A   2       3.800   0.000   0.000  1.00  0.00           C\n",
        )
        .unwrap();
        let path = dir.path().join("system.toml");
        fs::write(
            &path,
            "[[chains]]\nid = \"A\"\nkind = \"protein\"\nsequence = \"GK\"\n\
             structure = \"prot.pdb\"\nglobular-regions = [0, 1]\n",
        )
        .unwrap();

        let file = SystemFile::from_file(&path).unwrap();
        assert_eq!(file.chains[0].structure.as_deref(), Some(dir.path().join("prot.pdb").as_path()));

        let placed = file.placed_chains().unwrap();
        let ChainSpec::Structured { structure, regions, .. } = &placed[0].spec else {
            panic!("expected a structured chain");
        };
        assert_eq!(structure.sequence(), "GK");
        assert_eq!(regions.domains(), &[vec![0, 1]]);
    }
}

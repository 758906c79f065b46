use crate::core::coords::SpiralSpacing;
use crate::core::forcefield::bonded::BondedParams;
use crate::core::forcefield::system::{AssemblyParams, Conditions};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Numerical constants of the model. Every field has the published default.
///
/// Lengths in nm, force constants in kJ/mol/nm².
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ModelConstants {
    pub backbone_force_constant: f64,
    pub protein_bond_length: f64,
    pub rna_bond_length: f64,
    pub enm_cutoff: f64,
    pub enm_force_constant: f64,
    pub box_padding: f64,
    pub short_range_cutoff: f64,
    pub electrostatic_cutoff: f64,
    pub rigid_scaling: f64,
    pub com_removal_interval: u32,
    pub protein_spiral_spacing: f64,
    pub rna_spiral_spacing: f64,
}

impl Default for ModelConstants {
    fn default() -> Self {
        let assembly = AssemblyParams::default();
        let spacing = SpiralSpacing::default();
        Self {
            backbone_force_constant: assembly.bonded.backbone_k,
            protein_bond_length: assembly.bonded.protein_bond_length,
            rna_bond_length: assembly.bonded.rna_bond_length,
            enm_cutoff: assembly.bonded.enm_cutoff,
            enm_force_constant: assembly.bonded.enm_k,
            box_padding: assembly.box_padding,
            short_range_cutoff: assembly.short_range_cutoff,
            electrostatic_cutoff: assembly.electrostatic_cutoff,
            rigid_scaling: assembly.rigid_scaling,
            com_removal_interval: assembly.com_interval,
            protein_spiral_spacing: spacing.protein,
            rna_spiral_spacing: spacing.rna,
        }
    }
}

impl ModelConstants {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let constants: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        constants.validate()?;
        Ok(constants)
    }

    /// Rejects non-positive lengths, force constants and intervals.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("backbone-force-constant", self.backbone_force_constant),
            ("protein-bond-length", self.protein_bond_length),
            ("rna-bond-length", self.rna_bond_length),
            ("enm-cutoff", self.enm_cutoff),
            ("enm-force-constant", self.enm_force_constant),
            ("short-range-cutoff", self.short_range_cutoff),
            ("electrostatic-cutoff", self.electrostatic_cutoff),
            ("rigid-scaling", self.rigid_scaling),
            ("protein-spiral-spacing", self.protein_spiral_spacing),
            ("rna-spiral-spacing", self.rna_spiral_spacing),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }
        if !(self.box_padding >= 0.0 && self.box_padding.is_finite()) {
            return Err(ConfigError::InvalidValue {
                name: "box-padding",
                reason: format!("must not be negative, got {}", self.box_padding),
            });
        }
        if self.com_removal_interval == 0 {
            return Err(ConfigError::InvalidValue {
                name: "com-removal-interval",
                reason: "must be at least one step".to_string(),
            });
        }
        Ok(())
    }

    pub fn bonded(&self) -> BondedParams {
        BondedParams {
            backbone_k: self.backbone_force_constant,
            protein_bond_length: self.protein_bond_length,
            rna_bond_length: self.rna_bond_length,
            enm_cutoff: self.enm_cutoff,
            enm_k: self.enm_force_constant,
        }
    }

    pub fn assembly(&self) -> AssemblyParams {
        AssemblyParams {
            bonded: self.bonded(),
            short_range_cutoff: self.short_range_cutoff,
            electrostatic_cutoff: self.electrostatic_cutoff,
            rigid_scaling: self.rigid_scaling,
            box_padding: self.box_padding,
            com_interval: self.com_removal_interval,
        }
    }

    pub fn spiral_spacing(&self) -> SpiralSpacing {
        SpiralSpacing {
            protein: self.protein_spiral_spacing,
            rna: self.rna_spiral_spacing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub conditions: Conditions,
    pub constants: ModelConstants,
}

impl BuildConfig {
    /// Conditions used when building an isolated single chain:
    /// 280 K, 150 mM, no periodicity and no momentum removal.
    pub fn single_chain() -> Self {
        Self {
            conditions: Conditions {
                temperature: 280.0,
                ionic_strength: 150.0,
                periodic: false,
                remove_com_motion: false,
            },
            constants: ModelConstants::default(),
        }
    }
}

#[derive(Default)]
pub struct BuildConfigBuilder {
    temperature: Option<f64>,
    ionic_strength: Option<f64>,
    periodic: Option<bool>,
    remove_com_motion: Option<bool>,
    constants: Option<ModelConstants>,
}

impl BuildConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn ionic_strength(mut self, millimolar: f64) -> Self {
        self.ionic_strength = Some(millimolar);
        self
    }
    pub fn periodic(mut self, periodic: bool) -> Self {
        self.periodic = Some(periodic);
        self
    }
    pub fn remove_com_motion(mut self, remove: bool) -> Self {
        self.remove_com_motion = Some(remove);
        self
    }
    pub fn constants(mut self, constants: ModelConstants) -> Self {
        self.constants = Some(constants);
        self
    }

    /// Periodicity and momentum removal default to enabled.
    pub fn build(self) -> Result<BuildConfig, ConfigError> {
        let constants = self.constants.unwrap_or_default();
        constants.validate()?;
        Ok(BuildConfig {
            conditions: Conditions {
                temperature: self
                    .temperature
                    .ok_or(ConfigError::MissingParameter("temperature"))?,
                ionic_strength: self
                    .ionic_strength
                    .ok_or(ConfigError::MissingParameter("ionic_strength"))?,
                periodic: self.periodic.unwrap_or(true),
                remove_com_motion: self.remove_com_motion.unwrap_or(true),
            },
            constants,
        })
    }
}

use crate::core::models::residue::{RESIDUE_TYPE_COUNT, ResidueType};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

const PAIR_COUNT: usize = RESIDUE_TYPE_COUNT * RESIDUE_TYPE_COUNT;
/// Number of short-range values: well depth, size and exponent per ordered pair.
pub const SHORT_RANGE_LEN: usize = PAIR_COUNT * 3;
/// Number of electrostatic prefactors, one per ordered pair.
pub const PREFACTOR_LEN: usize = PAIR_COUNT;
pub const TABLE_LEN: usize = SHORT_RANGE_LEN + PREFACTOR_LEN;

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid number '{value}' in '{path}': {source}")]
    Parse {
        path: String,
        value: String,
        source: std::num::ParseFloatError,
    },
    #[error("Parameter table must hold {expected} values, found {found}")]
    Shape { expected: usize, found: usize },
    #[error("Parameter table entry {index} is not finite")]
    NonFinite { index: usize },
}

/// Short-range parameters of one ordered type pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShortRangeParams {
    /// Well depth, kJ/mol.
    pub well_depth: f64,
    /// Size parameter, nm.
    pub size: f64,
    /// Shape exponent; only its integer part is used.
    pub exponent: f64,
}

/// The static per-pair lookup tables for both nonbonded terms.
///
/// `short_range` is laid out as a 21×21×3 discrete function
/// (`i + 21·j + 441·k`), `prefactors` as a 21×21 one (`i + 21·j`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonbondedTable {
    short_range: Vec<f64>,
    prefactors: Vec<f64>,
}

impl NonbondedTable {
    /// Reads a whitespace-separated table of floats.
    ///
    /// `#` starts a comment that runs to the end of the line, whether it
    /// opens the line or follows values.
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b' ')
            .flexible(true)
            .comment(Some(b'#'))
            .from_path(path)
            .map_err(|e| ParamLoadError::Csv {
                path: path_str.clone(),
                source: e,
            })?;

        let mut values = Vec::with_capacity(TABLE_LEN);
        for result in reader.records() {
            let record = result.map_err(|e| ParamLoadError::Csv {
                path: path_str.clone(),
                source: e,
            })?;
            let line = record.iter().collect::<Vec<_>>().join(" ");
            let data = line.split('#').next().unwrap_or_default();
            for token in data.split_whitespace() {
                let value = token.parse::<f64>().map_err(|e| ParamLoadError::Parse {
                    path: path_str.clone(),
                    value: token.to_string(),
                    source: e,
                })?;
                values.push(value);
            }
        }

        Self::from_values(values)
    }

    /// Builds the table from the flat value sequence of a parameter file.
    pub fn from_values(values: Vec<f64>) -> Result<Self, ParamLoadError> {
        if values.len() != TABLE_LEN {
            return Err(ParamLoadError::Shape {
                expected: TABLE_LEN,
                found: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ParamLoadError::NonFinite { index });
        }
        let mut short_range = values;
        let prefactors = short_range.split_off(SHORT_RANGE_LEN);
        Ok(Self {
            short_range,
            prefactors,
        })
    }

    #[inline]
    fn pair_offset(a: ResidueType, b: ResidueType) -> usize {
        a.table_index() + RESIDUE_TYPE_COUNT * b.table_index()
    }

    pub fn short_range(&self, a: ResidueType, b: ResidueType) -> ShortRangeParams {
        let offset = Self::pair_offset(a, b);
        ShortRangeParams {
            well_depth: self.short_range[offset],
            size: self.short_range[offset + PAIR_COUNT],
            exponent: self.short_range[offset + 2 * PAIR_COUNT],
        }
    }

    /// Signed electrostatic prefactor, kJ·nm/mol.
    pub fn prefactor(&self, a: ResidueType, b: ResidueType) -> f64 {
        self.prefactors[Self::pair_offset(a, b)]
    }
}

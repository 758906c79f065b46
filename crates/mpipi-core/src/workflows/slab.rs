use crate::engine::config::ConfigError;
use tracing::warn;

/// Avogadro constant, mol⁻¹.
const AVOGADRO: f64 = 6.022_140_76e23;
const NM_PER_CM: f64 = 1e7;

pub const DEFAULT_LONG_SIDE_SCALE: f64 = 6.0;
/// Target slab density, g/cm³.
pub const DEFAULT_TARGET_DENSITY: f64 = 0.1;
/// Minimum ratio of the short box side to the largest chain radius of gyration.
pub const MIN_SHORT_SIDE_TO_RG: f64 = 2.25;

/// One chain type of a slab and how many copies of it are placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlabComponent {
    /// Mass of one copy, Da.
    pub mass: f64,
    pub copies: usize,
}

/// Box vectors (nm) of an elongated box holding all components at `density`.
///
/// The box is `scale·L × L × L` with `L` chosen so that the total mass fills
/// the volume at the requested density (g/cm³).
pub fn target_box_vectors(
    components: &[SlabComponent],
    long_side_scale: f64,
    density: f64,
) -> Result<[[f64; 3]; 3], ConfigError> {
    if !(long_side_scale > 0.0) {
        return Err(ConfigError::InvalidValue {
            name: "long_side_scale",
            reason: format!("must be positive, got {long_side_scale}"),
        });
    }
    if !(density > 0.0) {
        return Err(ConfigError::InvalidValue {
            name: "density",
            reason: format!("must be positive, got {density}"),
        });
    }

    let total_mass_g: f64 = components
        .iter()
        .map(|c| c.mass * c.copies as f64 / AVOGADRO)
        .sum();
    if !(total_mass_g > 0.0) {
        return Err(ConfigError::InvalidValue {
            name: "components",
            reason: "total mass must be positive".to_string(),
        });
    }

    let volume_cm3 = total_mass_g / density;
    let short = (volume_cm3 / long_side_scale).cbrt() * NM_PER_CM;
    Ok([
        [long_side_scale * short, 0.0, 0.0],
        [0.0, short, 0.0],
        [0.0, 0.0, short],
    ])
}

/// Warns and returns `false` if the short side is below 2.25× `largest_rg`.
pub fn check_box_extent(box_vectors: &[[f64; 3]; 3], largest_rg: f64) -> bool {
    let short_side = box_vectors[1][1];
    let ok = short_side >= MIN_SHORT_SIDE_TO_RG * largest_rg;
    if !ok {
        warn!(
            short_side,
            largest_rg,
            "Short side may be too small; it should be at least {MIN_SHORT_SIDE_TO_RG} times the largest radius of gyration"
        );
    }
    ok
}

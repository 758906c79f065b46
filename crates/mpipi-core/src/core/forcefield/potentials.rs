use super::params::ShortRangeParams;

/// Cutoff radius of the short-range term, in units of the pair size.
pub const WANG_FRENKEL_RANGE: f64 = 3.0;

/// Prefactor making the Wang–Frenkel minimum equal to `-well_depth` when
/// the cutoff is three times the size parameter.
#[inline]
pub fn wang_frenkel_alpha(mu: f64) -> f64 {
    let s = WANG_FRENKEL_RANGE.powf(2.0 * mu);
    2.0 * s * (3.0 / (2.0 * (s - 1.0))).powi(3)
}

/// Wang–Frenkel pair energy, scaled by `structural_factor`.
///
/// Vanishes smoothly at `rc = 3·size` and is zero beyond it.
#[inline]
pub fn wang_frenkel(dist: f64, params: &ShortRangeParams, structural_factor: f64) -> f64 {
    let rc = WANG_FRENKEL_RANGE * params.size;
    if dist >= rc {
        return 0.0;
    }
    if dist < 1e-6 {
        return 1e10;
    }
    let mu = params.exponent.floor();
    let two_mu = 2.0 * mu;
    let repulsive = (params.size / dist).powf(two_mu) - 1.0;
    let envelope = (rc / dist).powf(two_mu) - 1.0;
    structural_factor * params.well_depth * wang_frenkel_alpha(mu) * repulsive * envelope * envelope
}

/// Screened Coulomb energy `A/r · exp(-κr)`.
#[inline]
pub fn screened_coulomb(dist: f64, prefactor: f64, kappa: f64) -> f64 {
    if dist < 1e-6 {
        return prefactor.signum() * 1e10;
    }
    prefactor / dist * (-kappa * dist).exp()
}

/// Scaling of the short-range term by how many of the two beads are rigid.
#[inline]
pub fn structural_factor(rigid_a: bool, rigid_b: bool, rigid_scaling: f64) -> f64 {
    match (rigid_a, rigid_b) {
        (true, true) => rigid_scaling,
        (false, false) => 1.0,
        _ => rigid_scaling.sqrt(),
    }
}

/// Effective cutoff of one short-range pair: `3·size`, capped at `cap`.
#[inline]
pub fn short_range_cutoff(size: f64, cap: f64) -> f64 {
    (WANG_FRENKEL_RANGE * size).min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn params(well_depth: f64, size: f64, exponent: f64) -> ShortRangeParams {
        ShortRangeParams {
            well_depth,
            size,
            exponent,
        }
    }

    fn minimum_distance(size: f64, mu: f64) -> f64 {
        let s = 3.0_f64.powf(2.0 * mu);
        3.0 * size * (3.0 / (1.0 + 2.0 * s)).powf(1.0 / (2.0 * mu))
    }

    #[test]
    fn wang_frenkel_minimum_equals_negative_well_depth() {
        for &mu in &[1.0, 2.0, 5.0] {
            let p = params(0.8, 0.6, mu);
            let energy = wang_frenkel(minimum_distance(0.6, mu), &p, 1.0);
            assert!(f64_approx_equal(energy, -0.8), "mu = {mu}: {energy}");
        }
    }

    #[test]
    fn wang_frenkel_crosses_zero_at_size() {
        let p = params(0.8, 0.6, 2.0);
        assert!(f64_approx_equal(wang_frenkel(0.6, &p, 1.0), 0.0));
        assert!(wang_frenkel(0.5, &p, 1.0) > 0.0);
    }

    #[test]
    fn wang_frenkel_vanishes_at_and_beyond_cutoff() {
        let p = params(0.8, 0.6, 2.0);
        assert_eq!(wang_frenkel(1.8, &p, 1.0), 0.0);
        assert_eq!(wang_frenkel(2.4, &p, 1.0), 0.0);
        assert!(wang_frenkel(1.79, &p, 1.0).abs() < 1e-6);
    }

    #[test]
    fn wang_frenkel_floors_fractional_exponent() {
        let whole = params(0.8, 0.6, 2.0);
        let fractional = params(0.8, 0.6, 2.7);
        assert_eq!(wang_frenkel(0.7, &whole, 1.0), wang_frenkel(0.7, &fractional, 1.0));
    }

    #[test]
    fn wang_frenkel_scales_linearly_with_structural_factor() {
        let p = params(0.8, 0.6, 1.0);
        let full = wang_frenkel(0.75, &p, 1.0);
        assert!(f64_approx_equal(wang_frenkel(0.75, &p, 0.7), 0.7 * full));
    }

    #[test]
    fn screened_coulomb_decays_exponentially() {
        let kappa = 1.0 / 0.8;
        let energy = screened_coulomb(1.2, 0.5, kappa);
        assert!(f64_approx_equal(energy, 0.5 / 1.2 * (-1.5_f64).exp()));
        assert!(screened_coulomb(1.0, -0.5, kappa) < 0.0);
    }

    #[test]
    fn screened_coulomb_at_very_small_distance_keeps_sign() {
        assert!(screened_coulomb(1e-8, 2.0, 1.0) > 1e9);
        assert!(screened_coulomb(1e-8, -2.0, 1.0) < -1e9);
    }

    #[test]
    fn structural_factor_depends_on_rigid_count() {
        assert_eq!(structural_factor(false, false, 0.7), 1.0);
        assert!(f64_approx_equal(structural_factor(true, false, 0.7), 0.7_f64.sqrt()));
        assert!(f64_approx_equal(structural_factor(false, true, 0.7), 0.7_f64.sqrt()));
        assert_eq!(structural_factor(true, true, 0.7), 0.7);
    }

    #[test]
    fn short_range_cutoff_is_capped() {
        assert!(f64_approx_equal(short_range_cutoff(0.6, 2.5), 1.8));
        assert_eq!(short_range_cutoff(1.0, 2.5), 2.5);
    }
}

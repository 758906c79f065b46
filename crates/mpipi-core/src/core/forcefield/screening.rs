use std::f64::consts::PI;
use thiserror::Error;

const AVOGADRO: f64 = 6.022e26; // per kmol, so mM -> m^-3 after /1000
const BJERRUM_PREFACTOR: f64 = 1.671e-5; // m·K

#[derive(Debug, Error, PartialEq)]
pub enum ScreeningError {
    #[error("Temperature must be positive, got {0} K")]
    NonPositiveTemperature(f64),
    #[error("Ionic strength must be positive, got {0} mM")]
    NonPositiveIonicStrength(f64),
    #[error("Screening length is not finite for T = {temperature} K, I = {ionic_strength} mM")]
    NonFinite { temperature: f64, ionic_strength: f64 },
}

/// Relative permittivity of water as a function of temperature in kelvin.
#[inline]
pub fn relative_permittivity(temperature: f64) -> f64 {
    let t = temperature;
    5321.0 / t + 233.76 - 0.9297 * t + 0.001417 * t * t - 0.000_000_829_2 * t * t * t
}

/// Debye screening length in nanometres.
///
/// `temperature` is in kelvin, `ionic_strength` in millimolar.
pub fn debye_length(temperature: f64, ionic_strength: f64) -> Result<f64, ScreeningError> {
    if !(temperature > 0.0) {
        return Err(ScreeningError::NonPositiveTemperature(temperature));
    }
    if !(ionic_strength > 0.0) {
        return Err(ScreeningError::NonPositiveIonicStrength(ionic_strength));
    }

    let number_density = ionic_strength / 1000.0 * AVOGADRO;
    let bjerrum = BJERRUM_PREFACTOR / (relative_permittivity(temperature) * temperature);
    let length = (1.0 / (8.0 * PI * bjerrum * number_density)).sqrt() * 1e9;

    if length.is_finite() {
        Ok(length)
    } else {
        Err(ScreeningError::NonFinite {
            temperature,
            ionic_strength,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn debye_length_matches_reference_values() {
        assert!((debye_length(280.0, 150.0).unwrap() - 0.793_643_581_752_753_2).abs() < TOLERANCE);
        assert!((debye_length(300.0, 150.0).unwrap() - 0.784_017_865_290_875_6).abs() < TOLERANCE);
    }

    #[test]
    fn debye_length_decreases_with_ionic_strength() {
        let low = debye_length(280.0, 50.0).unwrap();
        let mid = debye_length(280.0, 150.0).unwrap();
        let high = debye_length(280.0, 500.0).unwrap();
        assert!(low > mid && mid > high);
    }

    #[test]
    fn non_positive_temperature_is_rejected() {
        assert_eq!(
            debye_length(0.0, 150.0),
            Err(ScreeningError::NonPositiveTemperature(0.0))
        );
        assert!(debye_length(-10.0, 150.0).is_err());
        assert!(debye_length(f64::NAN, 150.0).is_err());
    }

    #[test]
    fn non_positive_ionic_strength_is_rejected() {
        assert_eq!(
            debye_length(280.0, 0.0),
            Err(ScreeningError::NonPositiveIonicStrength(0.0))
        );
    }
}

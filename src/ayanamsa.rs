use serde::{Deserialize, Serialize};

use crate::ephemeris::PRECESSION_ARCSEC_PER_CENTURY;
use crate::time::Instant;
use crate::{CoordinateSystem, EclipticLongitude};

/// Lahiri ayanamsa at J2000.0, degrees.
pub const LAHIRI_AT_J2000: f64 = 23.857;
/// Quadratic term of general precession, arcseconds per century squared.
const PRECESSION_QUADRATIC: f64 = 1.1054348;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AyanamsaInfo {
    pub ayanamsa_name: String,
    pub ayanamsa_value: f64,
}

impl AyanamsaInfo {
    pub fn calculate(instant: &Instant) -> Self {
        AyanamsaInfo {
            ayanamsa_name: "Lahiri".to_string(),
            ayanamsa_value: lahiri_ayanamsa(instant.centuries_since_j2000()),
        }
    }
}

/// Lahiri ayanamsa in degrees for `t` Julian centuries since J2000.0.
pub fn lahiri_ayanamsa(t: f64) -> f64 {
    LAHIRI_AT_J2000 + (PRECESSION_ARCSEC_PER_CENTURY * t + PRECESSION_QUADRATIC * t * t) / 3600.0
}

/// Shift a longitude into the sidereal frame. Sidereal input is returned as is.
pub fn to_sidereal(longitude: EclipticLongitude, ayanamsa: f64) -> EclipticLongitude {
    match longitude.frame {
        CoordinateSystem::Sidereal => longitude,
        CoordinateSystem::Tropical => EclipticLongitude::sidereal(longitude.degrees - ayanamsa),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_lahiri_values() {
        assert_abs_diff_eq!(lahiri_ayanamsa(0.0), 23.857, epsilon = 1e-12);

        let may_2024 = Instant::from_utc(Utc.with_ymd_and_hms(2024, 5, 20, 4, 3, 0).unwrap());
        let info = AyanamsaInfo::calculate(&may_2024);
        assert_eq!(info.ayanamsa_name, "Lahiri");
        assert_abs_diff_eq!(info.ayanamsa_value, 24.19, epsilon = 0.02);

        // 1950: Lahiri is about 23.15 degrees
        assert_abs_diff_eq!(lahiri_ayanamsa(-0.5), 23.16, epsilon = 0.02);
    }

    #[test]
    fn test_ayanamsa_grows_with_time() {
        assert!(lahiri_ayanamsa(0.25) > lahiri_ayanamsa(0.24));
        assert!(lahiri_ayanamsa(-1.0) < lahiri_ayanamsa(0.0));
    }

    #[test]
    fn test_sidereal_conversion_wraps() {
        let sid = to_sidereal(EclipticLongitude::tropical(10.0), 24.0);
        assert_eq!(sid.frame, CoordinateSystem::Sidereal);
        assert_abs_diff_eq!(sid.degrees, 346.0, epsilon = 1e-9);

        let unchanged = to_sidereal(sid, 24.0);
        assert_abs_diff_eq!(unchanged.degrees, 346.0, epsilon = 1e-9);
    }
}

use serde::Serialize;

use crate::houses::house_of;
use crate::{normalize_degrees, Modality, Nakshatra, NakshatraInfo, ZodiacSign};

/// Width of one navamsha, 3°20′.
pub const NAVAMSHA_SPAN: f64 = 30.0 / 9.0;

/// A body's place in the navamsha (D9) chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavamshaPosition {
    pub sign: ZodiacSign,
    /// Degree within the D9 sign, [0, 30).
    pub degree: f64,
    pub longitude: f64,
    pub nakshatra: Nakshatra,
    pub pada: u8,
    /// House counted from the navamsha ascendant.
    pub house: u8,
}

impl NavamshaPosition {
    pub fn from_longitude(longitude: f64, navamsha_ascendant: f64) -> Self {
        let d9_longitude = navamsha_longitude(longitude);
        let nakshatra = NakshatraInfo::from_longitude(d9_longitude);
        NavamshaPosition {
            sign: ZodiacSign::from_longitude(d9_longitude),
            degree: d9_longitude % 30.0,
            longitude: d9_longitude,
            nakshatra: nakshatra.nakshatra,
            pada: nakshatra.pada,
            house: house_of(d9_longitude, navamsha_ascendant),
        }
    }

    /// D9 position of the ascendant itself; always house 1.
    pub fn ascendant(ascendant: f64) -> Self {
        Self::from_longitude(ascendant, navamsha_longitude(ascendant))
    }
}

/// Index (0..=8) of the navamsha a longitude falls in within its sign.
pub fn navamsha_part(longitude: f64) -> usize {
    let within_sign = normalize_degrees(longitude) % 30.0;
    ((within_sign / NAVAMSHA_SPAN).floor() as usize).min(8)
}

/// Sign where a sign's navamsha count begins: movable signs start from
/// themselves, fixed signs from the 9th, dual signs from the 5th.
pub fn navamsha_start(sign: ZodiacSign) -> ZodiacSign {
    match sign.modality() {
        Modality::Movable => sign,
        Modality::Fixed => sign.advance(8),
        Modality::Dual => sign.advance(4),
    }
}

pub fn navamsha_sign(longitude: f64) -> ZodiacSign {
    navamsha_start(ZodiacSign::from_longitude(longitude)).advance(navamsha_part(longitude))
}

/// D9 longitude: the D9 sign plus the position inside the navamsha
/// stretched ninefold.
pub fn navamsha_longitude(longitude: f64) -> f64 {
    let within_sign = normalize_degrees(longitude) % 30.0;
    let within_part = (within_sign - navamsha_part(longitude) as f64 * NAVAMSHA_SPAN).max(0.0);
    let degree = (within_part * 9.0).min(30.0 - f64::EPSILON * 32.0);
    normalize_degrees(navamsha_sign(longitude).index() as f64 * 30.0 + degree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fire_signs_start_from_aries() {
        // Aries counts from itself, Leo from its 9th, Sagittarius from its 5th
        assert_eq!(navamsha_sign(0.5), ZodiacSign::Aries);
        assert_eq!(navamsha_sign(120.5), ZodiacSign::Aries);
        assert_eq!(navamsha_sign(240.5), ZodiacSign::Aries);
        assert_eq!(navamsha_start(ZodiacSign::Leo), ZodiacSign::Aries);
        assert_eq!(navamsha_start(ZodiacSign::Sagittarius), ZodiacSign::Aries);
    }

    #[test]
    fn test_earth_signs_start_from_capricorn() {
        assert_eq!(navamsha_sign(30.5), ZodiacSign::Capricorn);
        assert_eq!(navamsha_sign(150.5), ZodiacSign::Capricorn);
        assert_eq!(navamsha_sign(270.5), ZodiacSign::Capricorn);
    }

    #[test]
    fn test_air_and_water_signs() {
        assert_eq!(navamsha_sign(60.5), ZodiacSign::Libra);
        assert_eq!(navamsha_sign(180.5), ZodiacSign::Libra);
        assert_eq!(navamsha_sign(90.5), ZodiacSign::Cancer);
        assert_eq!(navamsha_sign(210.5), ZodiacSign::Cancer);
        assert_eq!(navamsha_sign(330.5), ZodiacSign::Cancer);
    }

    #[test]
    fn test_modality_rule_matches_ninefold_longitude() {
        for sign in 0..12 {
            for part in 0..9 {
                let lon = sign as f64 * 30.0 + (part as f64 + 0.5) * NAVAMSHA_SPAN;
                let closed_form = normalize_degrees(lon * 9.0);
                assert_eq!(
                    navamsha_sign(lon),
                    ZodiacSign::from_longitude(closed_form),
                    "sign {} part {}",
                    sign,
                    part
                );
                assert_abs_diff_eq!(navamsha_longitude(lon), closed_form, epsilon = 1e-9);
                assert_eq!((sign * 9 + part) % 12, navamsha_sign(lon).index());
            }
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(navamsha_sign(0.0), ZodiacSign::Aries);
        assert_abs_diff_eq!(navamsha_longitude(0.0), 0.0, epsilon = 1e-12);

        // Last navamsha of Aries is Sagittarius, then Taurus begins at Capricorn
        assert_eq!(navamsha_sign(29.9999), ZodiacSign::Sagittarius);
        assert!(navamsha_longitude(29.9999) < 270.0);
        assert_eq!(navamsha_sign(30.0), ZodiacSign::Capricorn);

        // Last navamsha of Pisces is Pisces
        assert_eq!(navamsha_sign(359.9999), ZodiacSign::Pisces);
        assert!(navamsha_longitude(359.9999) < 360.0);
    }

    #[test]
    fn test_position_fields() {
        let asc = NavamshaPosition::ascendant(90.34);
        assert_eq!(asc.house, 1);
        assert_eq!(asc.sign, ZodiacSign::Cancer);
        assert_abs_diff_eq!(asc.degree, 3.06, epsilon = 1e-9);

        let pos = NavamshaPosition::from_longitude(35.45, asc.longitude);
        // 35.45 is the 2nd navamsha of Taurus: Aquarius
        assert_eq!(pos.sign, ZodiacSign::Aquarius);
        assert_eq!(pos.house, 8);
        assert!((1..=4).contains(&pos.pada));
        assert_eq!(pos.nakshatra, NakshatraInfo::from_longitude(pos.longitude).nakshatra);
    }
}

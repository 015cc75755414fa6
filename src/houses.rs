use crate::time::{julian_centuries, JulianDay, J2000};
use crate::{normalize_degrees, EclipticLongitude};

/// Greenwich mean sidereal time in degrees, Meeus 12.4. `jd_ut` is JD(UT).
pub fn greenwich_mean_sidereal_time(jd_ut: JulianDay) -> f64 {
    let t = julian_centuries(jd_ut);
    normalize_degrees(
        280.46061837 + 360.98564736629 * (jd_ut - J2000) + 0.000387933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Local sidereal time in degrees for an east-positive longitude.
pub fn local_sidereal_time(jd_ut: JulianDay, longitude: f64) -> f64 {
    normalize_degrees(greenwich_mean_sidereal_time(jd_ut) + longitude)
}

/// Mean obliquity of the ecliptic in degrees, linear in T.
pub fn mean_obliquity(t: f64) -> f64 {
    23.439291 - 0.0130042 * t
}

/// Tropical ascendant and midheaven, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angles {
    pub ascendant: f64,
    pub midheaven: f64,
    pub local_sidereal_time: f64,
}

pub fn tropical_angles(jd_ut: JulianDay, latitude: f64, longitude: f64) -> Angles {
    let lst_deg = local_sidereal_time(jd_ut, longitude);
    let lst = lst_deg.to_radians();
    let eps = mean_obliquity(julian_centuries(jd_ut)).to_radians();
    let phi = latitude.to_radians();

    let ascendant = f64::atan2(lst.cos(), -lst.sin() * eps.cos() - phi.tan() * eps.sin());
    let midheaven = f64::atan2(lst.sin(), lst.cos() * eps.cos());

    Angles {
        ascendant: normalize_degrees(ascendant.to_degrees()),
        midheaven: normalize_degrees(midheaven.to_degrees()),
        local_sidereal_time: lst_deg,
    }
}

/// Equal house (1..=12) of a body counted from the ascendant.
pub fn house_of(body: f64, ascendant: f64) -> u8 {
    let offset = normalize_degrees(body - ascendant);
    ((offset / 30.0).floor() as u8).min(11) + 1
}

/// The twelve equal-house cusps, house 1 first.
pub fn equal_house_cusps(ascendant: &EclipticLongitude) -> [EclipticLongitude; 12] {
    std::array::from_fn(|i| ascendant.offset_by(30.0 * i as f64))
}

use std::f64::consts::PI;
use std::ops::Sub;

use tracing::trace;
use vsop87::vsop87d;

use crate::config::EphemerisModel;
use crate::error::{AstrologyError, CalculationResult};
use crate::time::Instant;
use crate::{normalize_degrees, CelestialBody, EclipticLongitude};

/// General precession in longitude, arcseconds per Julian century.
pub const PRECESSION_ARCSEC_PER_CENTURY: f64 = 5028.796195;

// ---------------------------
// ## Provider Trait
// ---------------------------

/// Source of tropical geocentric ecliptic longitudes.
///
/// Providers cover the Sun, the Moon and the five visible planets. The lunar
/// nodes are never asked of a provider: Rahu comes from [`mean_lunar_node`]
/// and Ketu is derived from Rahu.
pub trait EphemerisProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn tropical_longitude(
        &self,
        instant: &Instant,
        body: CelestialBody,
    ) -> CalculationResult<EclipticLongitude>;
}

impl EphemerisModel {
    pub fn provider(self) -> Box<dyn EphemerisProvider> {
        match self {
            EphemerisModel::Vsop87 => Box::new(Vsop87Ephemeris),
            EphemerisModel::MeanElements => Box::new(MeanElementEphemeris),
        }
    }
}

fn node_request(provider: &str, body: CelestialBody) -> AstrologyError {
    AstrologyError::computation(format!(
        "{} ephemeris has no position for {}, lunar nodes are derived from the mean node",
        provider, body
    ))
}

/// Mean longitude of the ascending lunar node (Rahu), tropical, Meeus 47.7.
pub fn mean_lunar_node(instant: &Instant) -> EclipticLongitude {
    let t = instant.tt_centuries_since_j2000();
    let omega = 125.04452 - 1934.136261 * t + 0.0020708 * t * t + t * t * t / 450_000.0;
    EclipticLongitude::tropical(omega)
}

// ---------------------------
// ## Ecliptic Vectors
// ---------------------------

/// Rectangular ecliptic coordinates in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EclipticVector {
    x: f64,
    y: f64,
    z: f64,
}

impl EclipticVector {
    fn from_spherical(longitude_rad: f64, latitude_rad: f64, distance: f64) -> Self {
        EclipticVector {
            x: distance * latitude_rad.cos() * longitude_rad.cos(),
            y: distance * latitude_rad.cos() * longitude_rad.sin(),
            z: distance * latitude_rad.sin(),
        }
    }

    fn longitude_degrees(&self) -> f64 {
        normalize_degrees(self.y.atan2(self.x).to_degrees())
    }
}

impl Sub for EclipticVector {
    type Output = EclipticVector;

    fn sub(self, other: EclipticVector) -> EclipticVector {
        EclipticVector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

// ---------------------------
// ## VSOP87 Provider
// ---------------------------

/// VSOP87D planetary theory (ecliptic and equinox of date) with the Meeus
/// ch. 47 lunar series for the Moon.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vsop87Ephemeris;

impl Vsop87Ephemeris {
    fn heliocentric(body: CelestialBody, jde: f64) -> CalculationResult<EclipticVector> {
        let coords = match body {
            CelestialBody::Mercury => vsop87d::mercury(jde),
            CelestialBody::Venus => vsop87d::venus(jde),
            CelestialBody::Mars => vsop87d::mars(jde),
            CelestialBody::Jupiter => vsop87d::jupiter(jde),
            CelestialBody::Saturn => vsop87d::saturn(jde),
            other => {
                return Err(AstrologyError::computation(format!(
                    "VSOP87 has no heliocentric series for {}",
                    other
                )))
            }
        };
        Ok(EclipticVector::from_spherical(
            coords.longitude(),
            coords.latitude(),
            coords.distance(),
        ))
    }

    fn earth(jde: f64) -> EclipticVector {
        let coords = vsop87d::earth(jde);
        EclipticVector::from_spherical(coords.longitude(), coords.latitude(), coords.distance())
    }
}

impl EphemerisProvider for Vsop87Ephemeris {
    fn name(&self) -> &'static str {
        "vsop87"
    }

    fn tropical_longitude(
        &self,
        instant: &Instant,
        body: CelestialBody,
    ) -> CalculationResult<EclipticLongitude> {
        let jde = instant.jd_tt;
        let degrees = match body {
            CelestialBody::Sun => {
                let earth = Self::earth(jde);
                normalize_degrees(earth.longitude_degrees() + 180.0)
            }
            CelestialBody::Moon => {
                let (point, _distance_km) = astro::lunar::geocent_ecl_pos(jde);
                normalize_degrees(point.long.to_degrees())
            }
            CelestialBody::Rahu | CelestialBody::Ketu => {
                return Err(node_request(self.name(), body))
            }
            planet => (Self::heliocentric(planet, jde)? - Self::earth(jde)).longitude_degrees(),
        };
        trace!(provider = self.name(), %body, degrees, "tropical longitude");
        Ok(EclipticLongitude::tropical(degrees))
    }
}

// ---------------------------
// ## Mean Element Provider
// ---------------------------

/// Keplerian elements referred to the mean ecliptic and equinox of J2000,
/// with linear rates per Julian century. Angles in degrees, `a` in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis: (f64, f64),
    pub eccentricity: (f64, f64),
    pub inclination: (f64, f64),
    pub mean_longitude: (f64, f64),
    pub longitude_of_perihelion: (f64, f64),
    pub longitude_of_node: (f64, f64),
}

/// JPL "Approximate Positions of the Major Planets", table 1 (1800 AD - 2050 AD).
pub const MERCURY_ELEMENTS: OrbitalElements = OrbitalElements {
    semi_major_axis: (0.38709927, 0.00000037),
    eccentricity: (0.20563593, 0.00001906),
    inclination: (7.00497902, -0.00594749),
    mean_longitude: (252.25032350, 149472.67411175),
    longitude_of_perihelion: (77.45779628, 0.16047689),
    longitude_of_node: (48.33076593, -0.12534081),
};

pub const VENUS_ELEMENTS: OrbitalElements = OrbitalElements {
    semi_major_axis: (0.72333566, 0.00000390),
    eccentricity: (0.00677672, -0.00004107),
    inclination: (3.39467605, -0.00078890),
    mean_longitude: (181.97909950, 58517.81538729),
    longitude_of_perihelion: (131.60246718, 0.00268329),
    longitude_of_node: (76.67984255, -0.27769418),
};

pub const EARTH_ELEMENTS: OrbitalElements = OrbitalElements {
    semi_major_axis: (1.00000261, 0.00000562),
    eccentricity: (0.01671123, -0.00004392),
    inclination: (-0.00001531, -0.01294668),
    mean_longitude: (100.46457166, 35999.37244981),
    longitude_of_perihelion: (102.93768193, 0.32327364),
    longitude_of_node: (0.0, 0.0),
};

pub const MARS_ELEMENTS: OrbitalElements = OrbitalElements {
    semi_major_axis: (1.52371034, 0.00001847),
    eccentricity: (0.09339410, 0.00007882),
    inclination: (1.84969142, -0.00813131),
    mean_longitude: (-4.55343205, 19140.30268499),
    longitude_of_perihelion: (-23.94362959, 0.44441088),
    longitude_of_node: (49.55953891, -0.29257343),
};

pub const JUPITER_ELEMENTS: OrbitalElements = OrbitalElements {
    semi_major_axis: (5.20288700, -0.00011607),
    eccentricity: (0.04838624, -0.00013253),
    inclination: (1.30439695, -0.00183714),
    mean_longitude: (34.39644051, 3034.74612775),
    longitude_of_perihelion: (14.72847983, 0.21252668),
    longitude_of_node: (100.47390909, 0.20469106),
};

pub const SATURN_ELEMENTS: OrbitalElements = OrbitalElements {
    semi_major_axis: (9.53667594, -0.00125060),
    eccentricity: (0.05386179, -0.00050991),
    inclination: (2.48599187, 0.00193609),
    mean_longitude: (49.95424423, 1222.49362201),
    longitude_of_perihelion: (92.59887831, -0.41897216),
    longitude_of_node: (113.66242448, -0.28867794),
};

const KEPLER_TOLERANCE: f64 = 1e-12;
const KEPLER_MAX_ITER: usize = 30;

/// Solve Kepler's equation `E - e sin E = M` by Newton iteration. Radians.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut eccentric_anomaly = if eccentricity < 0.8 {
        mean_anomaly
    } else {
        PI
    };
    for _ in 0..KEPLER_MAX_ITER {
        let delta = (eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly)
            / (1.0 - eccentricity * eccentric_anomaly.cos());
        eccentric_anomaly -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            break;
        }
    }
    eccentric_anomaly
}

impl OrbitalElements {
    /// Heliocentric position at `t` Julian centuries (TT) past J2000.
    fn heliocentric_position(&self, t: f64) -> EclipticVector {
        let at = |(value, rate): (f64, f64)| value + rate * t;

        let a = at(self.semi_major_axis);
        let e = at(self.eccentricity);
        let i = at(self.inclination).to_radians();
        let l = at(self.mean_longitude);
        let varpi = at(self.longitude_of_perihelion);
        let node = at(self.longitude_of_node);

        let omega = (varpi - node).to_radians();
        let node = node.to_radians();
        let mean_anomaly = ((l - varpi + 180.0).rem_euclid(360.0) - 180.0).to_radians();
        let ecc_anom = solve_kepler(mean_anomaly, e);

        let x_orb = a * (ecc_anom.cos() - e);
        let y_orb = a * (1.0 - e * e).sqrt() * ecc_anom.sin();

        let (sin_w, cos_w) = omega.sin_cos();
        let (sin_n, cos_n) = node.sin_cos();
        let (sin_i, cos_i) = i.sin_cos();

        EclipticVector {
            x: (cos_w * cos_n - sin_w * sin_n * cos_i) * x_orb
                + (-sin_w * cos_n - cos_w * sin_n * cos_i) * y_orb,
            y: (cos_w * sin_n + sin_w * cos_n * cos_i) * x_orb
                + (-sin_w * sin_n + cos_w * cos_n * cos_i) * y_orb,
            z: (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb,
        }
    }
}

/// Periodic terms of the lunar longitude, Meeus table 47.A:
/// multiples of D, M, M', F and the coefficient in 1e-6 degrees.
#[rustfmt::skip]
const LUNAR_LONGITUDE_TERMS: [(i8, i8, i8, i8, f64); 34] = [
    (0, 0, 1, 0, 6_288_774.0),
    (2, 0, -1, 0, 1_274_027.0),
    (2, 0, 0, 0, 658_314.0),
    (0, 0, 2, 0, 213_618.0),
    (0, 1, 0, 0, -185_116.0),
    (0, 0, 0, 2, -114_332.0),
    (2, 0, -2, 0, 58_793.0),
    (2, -1, -1, 0, 57_066.0),
    (2, 0, 1, 0, 53_322.0),
    (2, -1, 0, 0, 45_758.0),
    (0, 1, -1, 0, -40_923.0),
    (1, 0, 0, 0, -34_720.0),
    (0, 1, 1, 0, -30_383.0),
    (2, 0, 0, -2, 15_327.0),
    (0, 0, 1, 2, -12_528.0),
    (0, 0, 1, -2, 10_980.0),
    (4, 0, -1, 0, 10_675.0),
    (0, 0, 3, 0, 10_034.0),
    (4, 0, -2, 0, 8_548.0),
    (2, 1, -1, 0, -7_888.0),
    (2, 1, 0, 0, -6_766.0),
    (1, 0, -1, 0, -5_163.0),
    (1, 1, 0, 0, 4_987.0),
    (2, -1, 1, 0, 4_036.0),
    (2, 0, 2, 0, 3_994.0),
    (4, 0, 0, 0, 3_861.0),
    (2, 0, -3, 0, 3_665.0),
    (0, 1, -2, 0, -2_689.0),
    (2, 0, -1, 2, -2_602.0),
    (2, -1, -2, 0, 2_390.0),
    (1, 0, 1, 0, -2_348.0),
    (2, -2, 0, 0, 2_236.0),
    (0, 1, 2, 0, -2_120.0),
    (0, 2, 0, 0, -2_069.0),
];

/// Moon longitude from its mean elements and the leading periodic terms.
/// Mean equinox of date.
pub fn mean_lunar_longitude(t: f64) -> f64 {
    let mean_longitude = 218.3164477 + 481267.88123421 * t;
    let elongation = (297.8501921 + 445267.1114034 * t).to_radians();
    let sun_anomaly = (357.5291092 + 35999.0502909 * t).to_radians();
    let moon_anomaly = (134.9633964 + 477198.8675055 * t).to_radians();
    let latitude_arg = (93.2720950 + 483202.0175233 * t).to_radians();
    let eccentricity = 1.0 - 0.002516 * t - 0.0000074 * t * t;

    let mut sum: f64 = LUNAR_LONGITUDE_TERMS
        .iter()
        .map(|&(d, m, mp, f, coefficient)| {
            let argument = d as f64 * elongation
                + m as f64 * sun_anomaly
                + mp as f64 * moon_anomaly
                + f as f64 * latitude_arg;
            coefficient * eccentricity.powi(m.unsigned_abs() as i32) * argument.sin()
        })
        .sum();

    // Venus, Jupiter and flattening corrections
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479264.290 * t).to_radians();
    sum += 3958.0 * a1.sin()
        + 1962.0 * (mean_longitude.to_radians() - latitude_arg).sin()
        + 318.0 * a2.sin();

    normalize_degrees(mean_longitude + sum / 1_000_000.0)
}

/// JPL mean Keplerian elements for the planets, mean lunar theory for the Moon.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanElementEphemeris;

impl MeanElementEphemeris {
    fn elements(body: CelestialBody) -> Option<&'static OrbitalElements> {
        match body {
            CelestialBody::Mercury => Some(&MERCURY_ELEMENTS),
            CelestialBody::Venus => Some(&VENUS_ELEMENTS),
            CelestialBody::Mars => Some(&MARS_ELEMENTS),
            CelestialBody::Jupiter => Some(&JUPITER_ELEMENTS),
            CelestialBody::Saturn => Some(&SATURN_ELEMENTS),
            _ => None,
        }
    }
}

impl EphemerisProvider for MeanElementEphemeris {
    fn name(&self) -> &'static str {
        "mean-elements"
    }

    fn tropical_longitude(
        &self,
        instant: &Instant,
        body: CelestialBody,
    ) -> CalculationResult<EclipticLongitude> {
        let t = instant.tt_centuries_since_j2000();
        // J2000 ecliptic to equinox of date
        let precession = PRECESSION_ARCSEC_PER_CENTURY * t / 3600.0;

        let degrees = match body {
            CelestialBody::Moon => mean_lunar_longitude(t),
            CelestialBody::Rahu | CelestialBody::Ketu => {
                return Err(node_request(self.name(), body))
            }
            CelestialBody::Sun => {
                let earth = EARTH_ELEMENTS.heliocentric_position(t);
                normalize_degrees(earth.longitude_degrees() + 180.0 + precession)
            }
            planet => {
                let elements = Self::elements(planet).ok_or_else(|| {
                    AstrologyError::computation(format!("no orbital elements for {}", planet))
                })?;
                let geocentric =
                    elements.heliocentric_position(t) - EARTH_ELEMENTS.heliocentric_position(t);
                normalize_degrees(geocentric.longitude_degrees() + precession)
            }
        };
        trace!(provider = self.name(), %body, degrees, "tropical longitude");
        Ok(EclipticLongitude::tropical(degrees))
    }
}

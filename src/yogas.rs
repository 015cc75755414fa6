use std::fmt;

use serde::Serialize;

use super::*;

/// Angular houses.
const KENDRA_HOUSES: [u8; 4] = [1, 4, 7, 10];
const MANGAL_HOUSES: [u8; 5] = [1, 4, 7, 8, 12];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Yoga {
    GajaKesari,
    Malavya,
    Ruchaka,
    Bhadra,
    Hamsa,
    Sasha,
}

impl Yoga {
    pub fn name(self) -> &'static str {
        match self {
            Yoga::GajaKesari => "Gaja Kesari Yoga",
            Yoga::Malavya => "Malavya Yoga",
            Yoga::Ruchaka => "Ruchaka Yoga",
            Yoga::Bhadra => "Bhadra Yoga",
            Yoga::Hamsa => "Hamsa Yoga",
            Yoga::Sasha => "Sasha Yoga",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            Yoga::GajaKesari => "Jupiter in Kendra from Moon",
            Yoga::Malavya => "Venus in Kendra",
            Yoga::Ruchaka => "Mars in Kendra",
            Yoga::Bhadra => "Mercury in Kendra",
            Yoga::Hamsa => "Jupiter in Kendra",
            Yoga::Sasha => "Saturn in Kendra",
        }
    }
}

impl fmt::Display for Yoga {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.name(), self.explanation())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Doshas {
    pub mangal: bool,
    pub kaal_sarp: bool,
    pub sade_sati: bool,
}

/// Whether every non-node body lies strictly inside one of the two arcs
/// between Rahu and Ketu.
pub fn is_kaal_sarp(planets: &PlanetMap) -> bool {
    let rahu = planets[CelestialBody::Rahu].longitude;
    let offsets: Vec<f64> = planets
        .iter()
        .filter(|p| !p.body.is_node())
        .map(|p| normalize_degrees(p.longitude - rahu))
        .collect();

    let rahu_to_ketu = offsets.iter().all(|&d| d > 0.0 && d < 180.0);
    let ketu_to_rahu = offsets.iter().all(|&d| d > 180.0 && d < 360.0);
    rahu_to_ketu || ketu_to_rahu
}

/// Saturn in the 12th, 1st or 2nd sign from the Moon.
pub fn is_sade_sati(planets: &PlanetMap) -> bool {
    let moon = planets[CelestialBody::Moon].sign.index() as i32;
    let saturn = planets[CelestialBody::Saturn].sign.index() as i32;
    matches!((saturn - moon).rem_euclid(12), 11 | 0 | 1)
}

impl Kundali {
    /// Gaja Kesari and the five Pancha Mahapurusha yogas, by house placement.
    pub fn calculate_yogas(&self, planets: &PlanetMap) -> Vec<Yoga> {
        let mut yogas = Vec::new();

        let is_in_kendra = |body: CelestialBody| KENDRA_HOUSES.contains(&planets[body].house);

        // Gaja Kesari: Jupiter in a kendra counted from the Moon
        let moon_house = planets[CelestialBody::Moon].house as i32;
        let jupiter_house = planets[CelestialBody::Jupiter].house as i32;
        if (jupiter_house - moon_house).rem_euclid(12) % 3 == 0 {
            yogas.push(Yoga::GajaKesari);
        }

        for (planet, yoga) in [
            (CelestialBody::Venus, Yoga::Malavya),
            (CelestialBody::Mars, Yoga::Ruchaka),
            (CelestialBody::Mercury, Yoga::Bhadra),
            (CelestialBody::Jupiter, Yoga::Hamsa),
            (CelestialBody::Saturn, Yoga::Sasha),
        ] {
            if is_in_kendra(planet) {
                yogas.push(yoga);
            }
        }

        yogas
    }

    pub fn calculate_doshas(&self, planets: &PlanetMap) -> Doshas {
        Doshas {
            mangal: MANGAL_HOUSES.contains(&planets[CelestialBody::Mars].house),
            kaal_sarp: is_kaal_sarp(planets),
            sade_sati: is_sade_sati(planets),
        }
    }
}

use serde::Serialize;
use std::fmt;

use crate::time::{Instant, JulianDay};
use crate::{normalize_degrees, Kundali, NAKSHATRA_SPAN};

/// Fifteen tithi names shared by both lunar fortnights. The last entry is
/// the full moon in the bright half and the new moon in the dark half.
pub const TITHI_NAMES: [&str; 15] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
    "Purnima/Amavasya",
];

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const KARANA_NAMES: [&str; 11] = [
    "Bava",
    "Balava",
    "Kaulava",
    "Taitila",
    "Garaja",
    "Vanija",
    "Vishti",
    "Shakuni",
    "Chatushpada",
    "Naga",
    "Kimstughna",
];

pub const YOGA_NAMES: [&str; 27] = [
    "Vishkambha",
    "Priti",
    "Ayushman",
    "Saubhagya",
    "Shobhana",
    "Atiganda",
    "Sukarman",
    "Dhriti",
    "Shula",
    "Ganda",
    "Vriddhi",
    "Dhruva",
    "Vyaghata",
    "Harshana",
    "Vajra",
    "Siddhi",
    "Vyatipata",
    "Variyan",
    "Parigha",
    "Shiva",
    "Siddha",
    "Sadhya",
    "Shubha",
    "Shukla",
    "Brahma",
    "Indra",
    "Vaidhriti",
];

/// Lunar fortnight.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Paksha {
    /// Waxing half, new moon to full moon.
    Shukla,
    /// Waning half.
    Krishna,
}

impl fmt::Display for Paksha {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Paksha::Shukla => write!(f, "Shukla"),
            Paksha::Krishna => write!(f, "Krishna"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanchangData {
    pub tithi: String,
    pub paksha: Paksha,
    pub weekday: String,
    pub karana: String,
    pub yoga: String,
}

/// Moon ahead of the Sun, [0, 360).
pub fn elongation(sun: f64, moon: f64) -> f64 {
    normalize_degrees(moon - sun)
}

/// Tithi number in 0..30 (12° of elongation each).
pub fn tithi_index(sun: f64, moon: f64) -> usize {
    ((elongation(sun, moon) / 12.0).floor() as usize).min(29)
}

pub fn paksha(tithi_index: usize) -> Paksha {
    if tithi_index < 15 {
        Paksha::Shukla
    } else {
        Paksha::Krishna
    }
}

/// Day of week for a civil Julian day, 0 = Sunday.
pub fn weekday_number(jd: JulianDay) -> usize {
    (jd + 1.5).floor().rem_euclid(7.0) as usize
}

pub fn weekday_name(jd: JulianDay) -> &'static str {
    // weekday_number counts from Sunday, the table from Monday
    WEEKDAY_NAMES[(weekday_number(jd) + 6) % 7]
}

pub fn karana_index(sun: f64, moon: f64) -> usize {
    ((elongation(sun, moon) / 6.0).floor() as usize) % KARANA_NAMES.len()
}

pub fn yoga_index(sun: f64, moon: f64) -> usize {
    ((normalize_degrees(moon + sun) / NAKSHATRA_SPAN).floor() as usize) % YOGA_NAMES.len()
}

pub fn calculate_panchang(instant: &Instant, sun: f64, moon: f64) -> PanchangData {
    let tithi = tithi_index(sun, moon);
    PanchangData {
        tithi: TITHI_NAMES[tithi % 15].to_string(),
        paksha: paksha(tithi),
        weekday: weekday_name(instant.local_julian_day()).to_string(),
        karana: KARANA_NAMES[karana_index(sun, moon)].to_string(),
        yoga: YOGA_NAMES[yoga_index(sun, moon)].to_string(),
    }
}

impl Kundali {
    /// Tithi, weekday, karana and yoga from sidereal Sun and Moon longitudes.
    pub fn calculate_panchang(&self, instant: &Instant, sun: f64, moon: f64) -> PanchangData {
        calculate_panchang(instant, sun, moon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BirthInput;

    #[test]
    fn test_tithi_names_and_paksha() {
        assert_eq!(tithi_index(10.0, 10.0), 0);
        assert_eq!(TITHI_NAMES[tithi_index(10.0, 21.9) % 15], "Pratipada");
        assert_eq!(TITHI_NAMES[tithi_index(10.0, 22.0) % 15], "Dwitiya");

        // Full moon ends the bright half, new moon ends the dark half
        assert_eq!(tithi_index(0.0, 179.0), 14);
        assert_eq!(paksha(14), Paksha::Shukla);
        assert_eq!(tithi_index(0.0, 359.0), 29);
        assert_eq!(paksha(29), Paksha::Krishna);
        assert_eq!(TITHI_NAMES[29 % 15], "Purnima/Amavasya");

        // Krishna Pratipada shares its name with Shukla Pratipada
        assert_eq!(tithi_index(0.0, 185.0), 15);
        assert_eq!(TITHI_NAMES[15 % 15], "Pratipada");
    }

    #[test]
    fn test_weekday() {
        // JD 2451544.5 is Saturday 2000-01-01 00:00
        assert_eq!(weekday_number(2_451_544.5), 6);
        assert_eq!(weekday_name(2_451_544.5), "Saturday");
        assert_eq!(weekday_name(2_451_545.0), "Saturday");
        assert_eq!(weekday_name(2_451_545.5), "Sunday");
        assert_eq!(weekday_name(2_451_546.5), "Monday");
    }

    #[test]
    fn test_weekday_uses_local_date() {
        // 00:30 IST on a Tuesday is still Monday in UTC
        let birth = BirthInput::new(2024, 5, 21, 0, 30, 0, 5.5, 19.95, 79.30).unwrap();
        let instant = Instant::from_birth(&birth).unwrap();
        let panchang = calculate_panchang(&instant, 0.0, 0.0);
        assert_eq!(panchang.weekday, "Tuesday");
        assert_eq!(weekday_name(instant.julian_day()), "Monday");
    }

    #[test]
    fn test_karana_and_yoga() {
        assert_eq!(KARANA_NAMES[karana_index(0.0, 5.9)], "Bava");
        assert_eq!(KARANA_NAMES[karana_index(0.0, 6.0)], "Balava");
        assert_eq!(KARANA_NAMES[karana_index(0.0, 66.0)], "Bava");

        assert_eq!(YOGA_NAMES[yoga_index(0.0, 0.0)], "Vishkambha");
        assert_eq!(YOGA_NAMES[yoga_index(200.0, 159.9)], "Vaidhriti");
        assert_eq!(YOGA_NAMES[yoga_index(200.0, 160.0)], "Vishkambha");
    }
}

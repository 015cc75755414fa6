use chrono::{DateTime, Duration as ChronoDuration, Months, NaiveDate, Utc};
use serde::Serialize;

use crate::config::MIN_DASHA_ENTRIES;
use crate::error::{AstrologyError, CalculationResult};
use crate::{CelestialBody, Kundali, NakshatraInfo};

pub const TOTAL_DASHA_YEARS: f64 = 120.0;
const DAYS_PER_YEAR: f64 = 365.25;

/// Vimshottari mahadasha order and lengths in years.
pub const DASHA_SEQUENCE: [(CelestialBody, f64); 9] = [
    (CelestialBody::Ketu, 7.0),
    (CelestialBody::Venus, 20.0),
    (CelestialBody::Sun, 6.0),
    (CelestialBody::Moon, 10.0),
    (CelestialBody::Mars, 7.0),
    (CelestialBody::Rahu, 18.0),
    (CelestialBody::Jupiter, 16.0),
    (CelestialBody::Saturn, 19.0),
    (CelestialBody::Mercury, 17.0),
];

// ---------------------------
// ## Structures
// ---------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashaPeriod {
    pub planet: CelestialBody,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Span of the period in years; only the first may be partial.
    pub years: f64,
}

/// A fractional year count split into calendar-like parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashaBalance {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl DashaBalance {
    pub fn from_years(years: f64) -> Self {
        let years = years.max(0.0);
        let whole_years = years.floor();
        let months = (years - whole_years) * 12.0;
        let whole_months = months.floor();
        let days = ((months - whole_months) * 30.0).floor();
        DashaBalance {
            years: whole_years as u32,
            months: (whole_months as u32).min(11),
            days: (days as u32).min(29),
        }
    }
}

/// Sub-period (bhukti) inside a mahadasha.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Antardasha {
    pub planet: CelestialBody,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentDasha {
    pub planet: CelestialBody,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Time left in this period, counted from the moment of computation.
    pub balance: DashaBalance,
    pub antardasha: Antardasha,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashaInfo {
    pub current: CurrentDasha,
    /// Remainder of the first period at birth.
    pub birth_balance: DashaBalance,
    pub sequence: Vec<DashaPeriod>,
}

// ---------------------------
// ## Date Arithmetic
// ---------------------------

pub fn dasha_years(planet: CelestialBody) -> f64 {
    DASHA_SEQUENCE
        .iter()
        .find(|&&(dasha, _)| dasha == planet)
        .map(|&(_, years)| years)
        .unwrap_or(0.0)
}

fn sequence_position(planet: CelestialBody) -> CalculationResult<usize> {
    DASHA_SEQUENCE
        .iter()
        .position(|&(dasha, _)| dasha == planet)
        .ok_or_else(|| AstrologyError::computation(format!("{} has no Vimshottari period", planet)))
}

/// Advance a date by whole years, then by the whole months of the
/// fractional remainder. Days are never added.
pub fn add_years(date: NaiveDate, years: f64) -> CalculationResult<NaiveDate> {
    let whole_years = years.floor();
    let months = whole_years as u32 * 12 + ((years - whole_years) * 12.0).floor() as u32;
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| AstrologyError::computation(format!("dasha date overflow from {}", date)))
}

fn years_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64 / DAYS_PER_YEAR
}

// ---------------------------
// ## Vimshottari Sequencer
// ---------------------------

/// Mahadasha periods from birth until the cycle's 120 years are covered,
/// capped at `max_entries`.
pub fn mahadasha_sequence(
    moon: &NakshatraInfo,
    birth_date: NaiveDate,
    max_entries: usize,
) -> CalculationResult<Vec<DashaPeriod>> {
    let mut index = sequence_position(moon.lord)?;
    let balance_years = dasha_years(moon.lord) * (1.0 - (moon.pada as f64 - 1.0) / 4.0);

    let mut periods = Vec::new();
    let mut start = birth_date;
    let mut total_years = 0.0;
    let mut years = balance_years;

    while total_years < TOTAL_DASHA_YEARS && periods.len() < max_entries {
        let (planet, _) = DASHA_SEQUENCE[index];
        let end = add_years(start, years)?;
        periods.push(DashaPeriod {
            planet,
            start,
            end,
            years,
        });
        total_years += years;
        start = end;
        index = (index + 1) % DASHA_SEQUENCE.len();
        years = DASHA_SEQUENCE[index].1;
    }
    Ok(periods)
}

/// Antardashas of a mahadasha: each lord in order starting with the
/// mahadasha lord, lasting `P * Q / 120` years.
pub fn antardashas(period: &DashaPeriod) -> CalculationResult<Vec<Antardasha>> {
    let full_years = dasha_years(period.planet);
    // A partial first period still divides from its nominal start.
    let nominal_start = if period.years >= full_years {
        period.start
    } else {
        period
            .end
            .checked_sub_months(Months::new(full_years as u32 * 12))
            .ok_or_else(|| {
                AstrologyError::computation(format!("dasha date underflow from {}", period.end))
            })?
    };
    let first = sequence_position(period.planet)?;

    let mut start = nominal_start;
    let mut subs = Vec::with_capacity(DASHA_SEQUENCE.len());
    for offset in 0..DASHA_SEQUENCE.len() {
        let (planet, years) = DASHA_SEQUENCE[(first + offset) % DASHA_SEQUENCE.len()];
        let end = if offset == DASHA_SEQUENCE.len() - 1 {
            period.end
        } else {
            let span = full_years * years / TOTAL_DASHA_YEARS;
            start + ChronoDuration::days((span * DAYS_PER_YEAR).round() as i64)
        };
        subs.push(Antardasha { planet, start, end });
        start = end;
    }
    Ok(subs)
}

impl Kundali {
    /// Vimshottari timeline from the Moon's nakshatra. "Current" is judged
    /// against `now`, so the same chart reports differently over time.
    pub fn calculate_dasha(
        &self,
        moon: &NakshatraInfo,
        birth_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> CalculationResult<DashaInfo> {
        let max_entries = self.config().dasha.max_entries.max(MIN_DASHA_ENTRIES);
        let sequence = mahadasha_sequence(moon, birth_date, max_entries)?;
        let first = sequence
            .first()
            .ok_or_else(|| AstrologyError::computation("empty dasha sequence"))?;
        let today = now.date_naive();

        let current = sequence
            .iter()
            .find(|period| period.end > today)
            .unwrap_or(first);

        let subs = antardashas(current)?;
        let antardasha = subs
            .iter()
            .find(|sub| sub.end > today)
            .or_else(|| subs.first())
            .cloned()
            .ok_or_else(|| AstrologyError::computation("empty antardasha sequence"))?;

        Ok(DashaInfo {
            current: CurrentDasha {
                planet: current.planet,
                start: current.start,
                end: current.end,
                balance: DashaBalance::from_years(years_between(today, current.end)),
                antardasha,
            },
            birth_balance: DashaBalance::from_years(first.years),
            sequence,
        })
    }
}

use chrono::{DateTime, Datelike, Duration as ChronoDuration, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AstrologyError, CalculationResult};

pub type JulianDay = f64;

/// JD of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000: JulianDay = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

// ---------------------------
// ## Birth Input
// ---------------------------

/// Civil birth data as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Signed decimal hours east of Greenwich, e.g. 5.5 for IST.
    pub utc_offset_hours: f64,
    /// Decimal degrees, north positive.
    pub latitude: f64,
    /// Decimal degrees, east positive.
    pub longitude: f64,
}

impl BirthInput {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        utc_offset_hours: f64,
        latitude: f64,
        longitude: f64,
    ) -> CalculationResult<Self> {
        let input = BirthInput {
            year,
            month,
            day,
            hour,
            minute,
            second,
            utc_offset_hours,
            latitude,
            longitude,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> CalculationResult<()> {
        self.local_datetime()?;

        if !self.utc_offset_hours.is_finite() || self.utc_offset_hours.abs() > 14.0 {
            return Err(AstrologyError::invalid_input(format!(
                "UTC offset {} is outside -14..=14 hours",
                self.utc_offset_hours
            )));
        }
        if !self.latitude.is_finite() || self.latitude.abs() > 90.0 {
            return Err(AstrologyError::invalid_input(format!(
                "latitude {} is outside -90..=90 degrees",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || self.longitude.abs() > 180.0 {
            return Err(AstrologyError::invalid_input(format!(
                "longitude {} is outside -180..=180 degrees",
                self.longitude
            )));
        }
        Ok(())
    }

    /// The civil date of birth, rejecting out-of-range calendar components.
    pub fn local_date(&self) -> CalculationResult<NaiveDate> {
        if self.year < 1 {
            return Err(self.invalid_date());
        }
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| self.invalid_date())
    }

    pub fn local_datetime(&self) -> CalculationResult<NaiveDateTime> {
        let date = self.local_date()?;
        date.and_hms_opt(self.hour, self.minute, self.second)
            .ok_or_else(|| {
                AstrologyError::invalid_input(format!(
                    "{:02}:{:02}:{:02} is not a valid time of day",
                    self.hour, self.minute, self.second
                ))
            })
    }

    /// Whole hours and rounded minutes of the UTC offset. Both parts carry
    /// the sign of the offset.
    pub fn offset_parts(&self) -> (i64, i64) {
        let hours = self.utc_offset_hours.trunc();
        let minutes = ((self.utc_offset_hours - hours) * 60.0).round();
        (hours as i64, minutes as i64)
    }

    /// Local civil time shifted back to UTC.
    pub fn to_utc(&self) -> CalculationResult<DateTime<Utc>> {
        let local = self.local_datetime()?;
        let (hours, minutes) = self.offset_parts();
        let utc = local
            .checked_sub_signed(ChronoDuration::hours(hours) + ChronoDuration::minutes(minutes))
            .ok_or_else(|| AstrologyError::invalid_input("birth time is out of range after UTC conversion"))?;
        Ok(utc.and_utc())
    }

    fn invalid_date(&self) -> AstrologyError {
        AstrologyError::InvalidDate {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }
}

// ---------------------------
// ## Instant
// ---------------------------

/// An absolute moment, carried on both the UT and TT axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instant {
    pub utc: DateTime<Utc>,
    /// Civil local time the instant was entered as.
    pub local: NaiveDateTime,
    pub jd_ut: JulianDay,
    pub jd_tt: JulianDay,
}

impl Instant {
    pub fn from_birth(input: &BirthInput) -> CalculationResult<Self> {
        let local = input.local_datetime()?;
        let utc = input.to_utc()?;
        Ok(Self::new(utc, local))
    }

    /// An instant with no civil offset: local time equals UTC.
    pub fn from_utc(utc: DateTime<Utc>) -> Self {
        Self::new(utc, utc.naive_utc())
    }

    fn new(utc: DateTime<Utc>, local: NaiveDateTime) -> Self {
        let jd_ut = julian_day(&utc.naive_utc());
        let jd_tt = jd_ut + delta_t_seconds(jd_ut) / SECONDS_PER_DAY;
        Instant {
            utc,
            local,
            jd_ut,
            jd_tt,
        }
    }

    pub fn julian_day(&self) -> JulianDay {
        self.jd_ut
    }

    /// Julian day of the civil local time, used for the weekday.
    pub fn local_julian_day(&self) -> JulianDay {
        julian_day(&self.local)
    }

    /// Julian centuries of UT since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        julian_centuries(self.jd_ut)
    }

    /// Julian centuries of TT since J2000.0.
    pub fn tt_centuries_since_j2000(&self) -> f64 {
        julian_centuries(self.jd_tt)
    }
}

// ---------------------------
// ## Utility Functions
// ---------------------------

pub fn julian_centuries(jd: JulianDay) -> f64 {
    (jd - J2000) / DAYS_PER_JULIAN_CENTURY
}

/// Gregorian calendar date to Julian Day (Meeus, Astronomical Algorithms ch. 7).
pub fn julian_day(date_time: &NaiveDateTime) -> JulianDay {
    let mut year = date_time.year() as f64;
    let mut month = date_time.month() as f64;
    let day = date_time.day() as f64
        + (date_time.hour() as f64
            + date_time.minute() as f64 / 60.0
            + date_time.second() as f64 / 3600.0)
            / 24.0;

    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
}

/// ΔT = TT − UT in seconds, Espenak & Meeus polynomials.
pub fn delta_t_seconds(jd_ut: JulianDay) -> f64 {
    let y = 2000.0 + (jd_ut - J2000) / 365.25;
    let long_term = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };

    match y {
        y if y < 1900.0 => long_term(y),
        y if y < 1920.0 => {
            let t = y - 1900.0;
            -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
                - 0.000197 * t.powi(4)
        }
        y if y < 1941.0 => {
            let t = y - 1920.0;
            21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
        }
        y if y < 1961.0 => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if y < 1986.0 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if y < 2005.0 => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060374 * t.powi(2)
                + 0.0017275 * t.powi(3)
                + 0.000651814 * t.powi(4)
                + 0.00002373599 * t.powi(5)
        }
        y if y < 2050.0 => {
            let t = y - 2000.0;
            62.92 + 0.32217 * t + 0.005589 * t.powi(2)
        }
        y if y < 2150.0 => long_term(y) - 0.5628 * (2150.0 - y),
        y => long_term(y),
    }
}

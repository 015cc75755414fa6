use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use tracing::{debug, info};

pub mod ayanamsa;
pub mod config;
pub mod dasha;
pub mod divisional;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod panchang;
pub mod report;
pub mod time;
pub mod yogas;

pub use ayanamsa::AyanamsaInfo;
pub use config::{ConfigError, EphemerisModel, KundaliConfig, ReportSettings};
pub use dasha::{CurrentDasha, DashaBalance, DashaInfo, DashaPeriod};
pub use divisional::NavamshaPosition;
pub use ephemeris::{EphemerisProvider, MeanElementEphemeris, Vsop87Ephemeris};
pub use error::{AstrologyError, CalculationResult};
pub use panchang::{Paksha, PanchangData};
pub use report::ReportContext;
pub use time::{BirthInput, Instant, JulianDay};
pub use yogas::{Doshas, Yoga};

/// Angular span of one nakshatra, 13°20′.
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

/// Reduce an angle to [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

// ---------------------------
// ## Enumerations
// ---------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSystem {
    Tropical,
    Sidereal,
}

/// The nine grahas of a chart, in chart order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CelestialBody {
    Sun = 0,
    Moon = 1,
    Mars = 2,
    Mercury = 3,
    Jupiter = 4,
    Venus = 5,
    Saturn = 6,
    Rahu = 7,
    Ketu = 8,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 9] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mars,
        CelestialBody::Mercury,
        CelestialBody::Jupiter,
        CelestialBody::Venus,
        CelestialBody::Saturn,
        CelestialBody::Rahu,
        CelestialBody::Ketu,
    ];

    pub fn iter() -> impl Iterator<Item = CelestialBody> {
        Self::ALL.iter().copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mars => "Mars",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Venus => "Venus",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Rahu => "Rahu",
            CelestialBody::Ketu => "Ketu",
        }
    }

    /// Rahu and Ketu, the lunar nodes.
    pub fn is_node(self) -> bool {
        matches!(self, CelestialBody::Rahu | CelestialBody::Ketu)
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Movable, fixed or dual quality of a sign.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Modality {
    Movable,
    Fixed,
    Dual,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries = 0,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub fn from_index(index: usize) -> Option<ZodiacSign> {
        match index {
            0 => Some(ZodiacSign::Aries),
            1 => Some(ZodiacSign::Taurus),
            2 => Some(ZodiacSign::Gemini),
            3 => Some(ZodiacSign::Cancer),
            4 => Some(ZodiacSign::Leo),
            5 => Some(ZodiacSign::Virgo),
            6 => Some(ZodiacSign::Libra),
            7 => Some(ZodiacSign::Scorpio),
            8 => Some(ZodiacSign::Sagittarius),
            9 => Some(ZodiacSign::Capricorn),
            10 => Some(ZodiacSign::Aquarius),
            11 => Some(ZodiacSign::Pisces),
            _ => None,
        }
    }

    pub fn from_longitude(longitude: f64) -> Self {
        let sign_index = (normalize_degrees(longitude) / 30.0).floor() as usize;
        ZodiacSign::from_index(sign_index.min(11)).unwrap_or(ZodiacSign::Aries)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The sign `steps` places further along the zodiac.
    pub fn advance(self, steps: usize) -> ZodiacSign {
        ZodiacSign::from_index((self.index() + steps) % 12).unwrap_or(self)
    }

    pub fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Movable,
            1 => Modality::Fixed,
            _ => Modality::Dual,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    #[serde(rename = "Purva Phalguni")]
    PurvaPhalguni,
    #[serde(rename = "Uttara Phalguni")]
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    #[serde(rename = "Purva Ashadha")]
    PurvaAshadha,
    #[serde(rename = "Uttara Ashadha")]
    UttaraAshadha,
    Shravana,
    Dhanishta,
    Shatabhisha,
    #[serde(rename = "Purva Bhadrapada")]
    PurvaBhadrapada,
    #[serde(rename = "Uttara Bhadrapada")]
    UttaraBhadrapada,
    Revati,
}

impl Nakshatra {
    pub const ALL: [Nakshatra; 27] = [
        Nakshatra::Ashwini,
        Nakshatra::Bharani,
        Nakshatra::Krittika,
        Nakshatra::Rohini,
        Nakshatra::Mrigashira,
        Nakshatra::Ardra,
        Nakshatra::Punarvasu,
        Nakshatra::Pushya,
        Nakshatra::Ashlesha,
        Nakshatra::Magha,
        Nakshatra::PurvaPhalguni,
        Nakshatra::UttaraPhalguni,
        Nakshatra::Hasta,
        Nakshatra::Chitra,
        Nakshatra::Swati,
        Nakshatra::Vishakha,
        Nakshatra::Anuradha,
        Nakshatra::Jyeshtha,
        Nakshatra::Mula,
        Nakshatra::PurvaAshadha,
        Nakshatra::UttaraAshadha,
        Nakshatra::Shravana,
        Nakshatra::Dhanishta,
        Nakshatra::Shatabhisha,
        Nakshatra::PurvaBhadrapada,
        Nakshatra::UttaraBhadrapada,
        Nakshatra::Revati,
    ];

    pub fn from_index(index: usize) -> Option<Nakshatra> {
        Self::ALL.get(index).copied()
    }

    pub fn from_longitude(longitude: f64) -> Nakshatra {
        let index = (normalize_degrees(longitude) / NAKSHATRA_SPAN).floor() as usize;
        Self::ALL[index.min(26)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Start of the nakshatra on the sidereal zodiac.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * NAKSHATRA_SPAN
    }

    pub fn name(self) -> &'static str {
        match self {
            Nakshatra::Ashwini => "Ashwini",
            Nakshatra::Bharani => "Bharani",
            Nakshatra::Krittika => "Krittika",
            Nakshatra::Rohini => "Rohini",
            Nakshatra::Mrigashira => "Mrigashira",
            Nakshatra::Ardra => "Ardra",
            Nakshatra::Punarvasu => "Punarvasu",
            Nakshatra::Pushya => "Pushya",
            Nakshatra::Ashlesha => "Ashlesha",
            Nakshatra::Magha => "Magha",
            Nakshatra::PurvaPhalguni => "Purva Phalguni",
            Nakshatra::UttaraPhalguni => "Uttara Phalguni",
            Nakshatra::Hasta => "Hasta",
            Nakshatra::Chitra => "Chitra",
            Nakshatra::Swati => "Swati",
            Nakshatra::Vishakha => "Vishakha",
            Nakshatra::Anuradha => "Anuradha",
            Nakshatra::Jyeshtha => "Jyeshtha",
            Nakshatra::Mula => "Mula",
            Nakshatra::PurvaAshadha => "Purva Ashadha",
            Nakshatra::UttaraAshadha => "Uttara Ashadha",
            Nakshatra::Shravana => "Shravana",
            Nakshatra::Dhanishta => "Dhanishta",
            Nakshatra::Shatabhisha => "Shatabhisha",
            Nakshatra::PurvaBhadrapada => "Purva Bhadrapada",
            Nakshatra::UttaraBhadrapada => "Uttara Bhadrapada",
            Nakshatra::Revati => "Revati",
        }
    }

    /// Vimshottari lord; the nine lords repeat three times around the zodiac.
    pub fn lord(self) -> CelestialBody {
        match self {
            Nakshatra::Ashwini | Nakshatra::Magha | Nakshatra::Mula => CelestialBody::Ketu,
            Nakshatra::Bharani | Nakshatra::PurvaPhalguni | Nakshatra::PurvaAshadha => {
                CelestialBody::Venus
            }
            Nakshatra::Krittika | Nakshatra::UttaraPhalguni | Nakshatra::UttaraAshadha => {
                CelestialBody::Sun
            }
            Nakshatra::Rohini | Nakshatra::Hasta | Nakshatra::Shravana => CelestialBody::Moon,
            Nakshatra::Mrigashira | Nakshatra::Chitra | Nakshatra::Dhanishta => CelestialBody::Mars,
            Nakshatra::Ardra | Nakshatra::Swati | Nakshatra::Shatabhisha => CelestialBody::Rahu,
            Nakshatra::Punarvasu | Nakshatra::Vishakha | Nakshatra::PurvaBhadrapada => {
                CelestialBody::Jupiter
            }
            Nakshatra::Pushya | Nakshatra::Anuradha | Nakshatra::UttaraBhadrapada => {
                CelestialBody::Saturn
            }
            Nakshatra::Ashlesha | Nakshatra::Jyeshtha | Nakshatra::Revati => CelestialBody::Mercury,
        }
    }
}

impl fmt::Display for Nakshatra {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------
// ## Structures
// ---------------------------

/// Ecliptic longitude of one body at one instant, always in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EclipticLongitude {
    pub degrees: f64,
    pub frame: CoordinateSystem,
}

impl EclipticLongitude {
    pub fn tropical(degrees: f64) -> Self {
        EclipticLongitude {
            degrees: normalize_degrees(degrees),
            frame: CoordinateSystem::Tropical,
        }
    }

    pub fn sidereal(degrees: f64) -> Self {
        EclipticLongitude {
            degrees: normalize_degrees(degrees),
            frame: CoordinateSystem::Sidereal,
        }
    }

    /// Same frame, shifted by `delta` degrees.
    pub fn offset_by(&self, delta: f64) -> Self {
        EclipticLongitude {
            degrees: normalize_degrees(self.degrees + delta),
            frame: self.frame,
        }
    }

    pub fn sign(&self) -> ZodiacSign {
        ZodiacSign::from_longitude(self.degrees)
    }

    /// Position inside the sign, [0, 30).
    pub fn degree_in_sign(&self) -> f64 {
        self.degrees % 30.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NakshatraInfo {
    pub nakshatra: Nakshatra,
    pub pada: u8,
    pub lord: CelestialBody,
}

impl NakshatraInfo {
    pub fn from_longitude(longitude: f64) -> NakshatraInfo {
        let normalized_longitude = normalize_degrees(longitude);
        let nakshatra = Nakshatra::from_longitude(normalized_longitude);
        let within = normalized_longitude - nakshatra.start_longitude();
        let pada = ((within / PADA_SPAN).floor().max(0.0) as u8).min(3) + 1;
        NakshatraInfo {
            nakshatra,
            pada,
            lord: nakshatra.lord(),
        }
    }
}

/// One body placed in the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetPosition {
    #[serde(skip)]
    pub body: CelestialBody,
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub degree: f64,
    pub house: u8,
    pub nakshatra: Nakshatra,
    pub pada: u8,
    pub lord: CelestialBody,
    pub navamsha: NavamshaPosition,
}

/// Chart positions of all nine bodies, indexed by [`CelestialBody`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetMap([PlanetPosition; 9]);

impl PlanetMap {
    /// Build from positions listed in [`CelestialBody::ALL`] order.
    pub fn new(positions: [PlanetPosition; 9]) -> CalculationResult<Self> {
        for (expected, position) in CelestialBody::ALL.iter().zip(positions.iter()) {
            if position.body != *expected {
                return Err(AstrologyError::computation(format!(
                    "planet map slot for {} holds {}",
                    expected, position.body
                )));
            }
        }
        Ok(PlanetMap(positions))
    }

    pub fn get(&self, body: CelestialBody) -> &PlanetPosition {
        &self.0[body.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlanetPosition> {
        self.0.iter()
    }
}

impl Index<CelestialBody> for PlanetMap {
    type Output = PlanetPosition;

    fn index(&self, body: CelestialBody) -> &PlanetPosition {
        self.get(body)
    }
}

impl Serialize for PlanetMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for position in &self.0 {
            map.serialize_entry(position.body.name(), position)?;
        }
        map.end()
    }
}

/// Rising sign: the cusp of house 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ascendant {
    pub sign: ZodiacSign,
    pub degree: f64,
    pub longitude: f64,
    pub nakshatra: Nakshatra,
    pub pada: u8,
    /// Sidereal longitude of the midheaven (MC).
    pub midheaven: f64,
}

impl Ascendant {
    pub fn from_longitudes(ascendant: EclipticLongitude, midheaven: EclipticLongitude) -> Self {
        let nakshatra = NakshatraInfo::from_longitude(ascendant.degrees);
        Ascendant {
            sign: ascendant.sign(),
            degree: ascendant.degree_in_sign(),
            longitude: ascendant.degrees,
            nakshatra: nakshatra.nakshatra,
            pada: nakshatra.pada,
            midheaven: midheaven.degrees,
        }
    }

    pub fn as_longitude(&self) -> EclipticLongitude {
        EclipticLongitude::sidereal(self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignInfo {
    pub sign: ZodiacSign,
}

/// Birth nakshatra: the Moon's nakshatra.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NakshatraSummary {
    pub name: Nakshatra,
    pub pada: u8,
    pub lord: CelestialBody,
}

/// Complete computed chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResult {
    pub ayanamsa: f64,
    pub ascendant: Ascendant,
    pub navamsha_ascendant: NavamshaPosition,
    pub moon_sign: SignInfo,
    pub sun_sign: SignInfo,
    pub nakshatra: NakshatraSummary,
    pub planets: PlanetMap,
    pub panchang: PanchangData,
    pub current_dasha: CurrentDasha,
    pub birth_balance: DashaBalance,
    pub dasha_sequence: Vec<DashaPeriod>,
    pub yogas: Vec<String>,
    pub doshas: Doshas,
    pub houses: [f64; 12],
}

// ---------------------------
// ## Kundali Engine
// ---------------------------

/// Chart calculator. Immutable once built and safe to share between threads.
pub struct Kundali {
    ephemeris: Box<dyn EphemerisProvider>,
    config: KundaliConfig,
}

impl fmt::Debug for Kundali {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Kundali")
            .field("ephemeris", &self.ephemeris.name())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Kundali {
    fn default() -> Self {
        Kundali::new(KundaliConfig::default())
    }
}

impl Kundali {
    pub fn new(config: KundaliConfig) -> Self {
        let ephemeris = config.ephemeris.model.provider();
        Kundali { ephemeris, config }
    }

    /// Use a caller-supplied ephemeris instead of the configured model.
    pub fn with_provider(provider: Box<dyn EphemerisProvider>, config: KundaliConfig) -> Self {
        Kundali {
            ephemeris: provider,
            config,
        }
    }

    pub fn config(&self) -> &KundaliConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &'static str {
        self.ephemeris.name()
    }

    pub fn calculate_ayanamsa(&self, instant: &Instant) -> f64 {
        AyanamsaInfo::calculate(instant).ayanamsa_value
    }

    /// Sidereal longitudes of all nine bodies in [`CelestialBody::ALL`] order.
    pub fn calculate_sidereal_longitudes(
        &self,
        instant: &Instant,
        ayanamsa: f64,
    ) -> CalculationResult<[EclipticLongitude; 9]> {
        let rahu = ayanamsa::to_sidereal(ephemeris::mean_lunar_node(instant), ayanamsa);
        let mut longitudes = [rahu; 9];
        for body in CelestialBody::iter() {
            longitudes[body.index()] = match body {
                CelestialBody::Rahu => rahu,
                CelestialBody::Ketu => rahu.offset_by(180.0),
                _ => {
                    let tropical = self.ephemeris.tropical_longitude(instant, body)?;
                    ayanamsa::to_sidereal(tropical, ayanamsa)
                }
            };
            debug!(%body, longitude = longitudes[body.index()].degrees, "sidereal longitude");
        }
        Ok(longitudes)
    }

    pub fn calculate_ascendant(
        &self,
        instant: &Instant,
        latitude: f64,
        longitude: f64,
        ayanamsa: f64,
    ) -> Ascendant {
        let angles = houses::tropical_angles(instant.jd_ut, latitude, longitude);
        let ascendant = ayanamsa::to_sidereal(EclipticLongitude::tropical(angles.ascendant), ayanamsa);
        let midheaven = ayanamsa::to_sidereal(EclipticLongitude::tropical(angles.midheaven), ayanamsa);
        debug!(
            lst = angles.local_sidereal_time,
            ascendant = ascendant.degrees,
            "ascendant"
        );
        Ascendant::from_longitudes(ascendant, midheaven)
    }

    pub fn calculate_houses(&self, ascendant: &Ascendant) -> [f64; 12] {
        houses::equal_house_cusps(&ascendant.as_longitude()).map(|cusp| cusp.degrees)
    }

    pub fn calculate_nakshatra(&self, longitude: f64) -> NakshatraInfo {
        NakshatraInfo::from_longitude(longitude)
    }

    pub fn calculate_navamsa(&self, longitude: f64, navamsha_ascendant: f64) -> NavamshaPosition {
        NavamshaPosition::from_longitude(longitude, navamsha_ascendant)
    }

    pub fn calculate_planet_positions(
        &self,
        longitudes: &[EclipticLongitude; 9],
        ascendant: &Ascendant,
        navamsha_ascendant: &NavamshaPosition,
    ) -> CalculationResult<PlanetMap> {
        let positions = CelestialBody::ALL.map(|body| {
            let longitude = longitudes[body.index()];
            let nakshatra = self.calculate_nakshatra(longitude.degrees);
            PlanetPosition {
                body,
                longitude: longitude.degrees,
                sign: longitude.sign(),
                degree: longitude.degree_in_sign(),
                house: houses::house_of(longitude.degrees, ascendant.longitude),
                nakshatra: nakshatra.nakshatra,
                pada: nakshatra.pada,
                lord: nakshatra.lord,
                navamsha: self.calculate_navamsa(longitude.degrees, navamsha_ascendant.longitude),
            }
        });
        PlanetMap::new(positions)
    }

    /// Compute a chart with "now" taken from the system clock.
    pub fn compute_chart(&self, input: &BirthInput) -> CalculationResult<ChartResult> {
        self.compute_chart_at(input, Utc::now())
    }

    /// Compute a chart with a pinned "now" for the current dasha.
    pub fn compute_chart_at(
        &self,
        input: &BirthInput,
        now: DateTime<Utc>,
    ) -> CalculationResult<ChartResult> {
        input.validate()?;
        let instant = Instant::from_birth(input)?;
        let ayanamsa = self.calculate_ayanamsa(&instant);

        let longitudes = self.calculate_sidereal_longitudes(&instant, ayanamsa)?;
        let ascendant = self.calculate_ascendant(&instant, input.latitude, input.longitude, ayanamsa);
        let navamsha_ascendant = NavamshaPosition::ascendant(ascendant.longitude);
        let planets = self.calculate_planet_positions(&longitudes, &ascendant, &navamsha_ascendant)?;

        let sun = &planets[CelestialBody::Sun];
        let moon = &planets[CelestialBody::Moon];
        let (sun_sign, moon_sign) = (sun.sign, moon.sign);

        let panchang = self.calculate_panchang(&instant, sun.longitude, moon.longitude);
        debug!(tithi = %panchang.tithi, weekday = %panchang.weekday, "panchang");

        let moon_nakshatra = self.calculate_nakshatra(moon.longitude);
        let dasha = self.calculate_dasha(&moon_nakshatra, input.local_date()?, now)?;
        debug!(current = %dasha.current.planet, periods = dasha.sequence.len(), "vimshottari dasha");

        let yogas = self
            .calculate_yogas(&planets)
            .iter()
            .map(Yoga::to_string)
            .collect();
        let doshas = self.calculate_doshas(&planets);

        info!(
            provider = self.provider_name(),
            jd = instant.jd_ut,
            ayanamsa,
            ascendant = %ascendant.sign,
            "computed chart"
        );

        Ok(ChartResult {
            ayanamsa,
            houses: self.calculate_houses(&ascendant),
            ascendant,
            navamsha_ascendant,
            moon_sign: SignInfo { sign: moon_sign },
            sun_sign: SignInfo { sign: sun_sign },
            nakshatra: NakshatraSummary {
                name: moon_nakshatra.nakshatra,
                pada: moon_nakshatra.pada,
                lord: moon_nakshatra.lord,
            },
            panchang,
            current_dasha: dasha.current,
            birth_balance: dasha.birth_balance,
            dasha_sequence: dasha.sequence,
            yogas,
            doshas,
            planets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
        assert!(normalize_degrees(-1e-15) < 360.0);
    }

    #[test]
    fn test_sign_boundaries() {
        assert_eq!(ZodiacSign::from_longitude(0.0).index(), 0);
        assert_eq!(ZodiacSign::from_longitude(29.999).index(), 0);
        assert_eq!(ZodiacSign::from_longitude(30.0).index(), 1);
        assert_eq!(ZodiacSign::from_longitude(359.999).index(), 11);
        assert_eq!(ZodiacSign::from_longitude(-0.5), ZodiacSign::Pisces);
    }

    #[test]
    fn test_sign_and_degree_round_trip() {
        for step in 0..720 {
            let lon = EclipticLongitude::sidereal(step as f64 * 0.5 + 0.123);
            let rebuilt = lon.sign().index() as f64 * 30.0 + lon.degree_in_sign();
            assert_abs_diff_eq!(rebuilt, lon.degrees, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_modalities() {
        use ZodiacSign::*;
        for sign in [Aries, Cancer, Libra, Capricorn] {
            assert_eq!(sign.modality(), Modality::Movable);
        }
        for sign in [Taurus, Leo, Scorpio, Aquarius] {
            assert_eq!(sign.modality(), Modality::Fixed);
        }
        for sign in [Gemini, Virgo, Sagittarius, Pisces] {
            assert_eq!(sign.modality(), Modality::Dual);
        }
        assert_eq!(Pisces.advance(1), Aries);
        assert_eq!(Taurus.advance(8), Capricorn);
    }

    #[test]
    fn test_nakshatra_coverage() {
        let mut seen = [false; 27];
        for step in 0..3600 {
            let info = NakshatraInfo::from_longitude(step as f64 * 0.1);
            assert!((1..=4).contains(&info.pada));
            seen[info.nakshatra.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));

        let last = NakshatraInfo::from_longitude(359.9999);
        assert_eq!(last.nakshatra, Nakshatra::Revati);
        assert_eq!(last.pada, 4);
    }

    #[test]
    fn test_nakshatra_boundaries_and_padas() {
        let start = NakshatraInfo::from_longitude(NAKSHATRA_SPAN);
        assert_eq!(start.nakshatra, Nakshatra::Bharani);
        assert_eq!(start.pada, 1);

        let punarvasu_4 = NakshatraInfo::from_longitude(90.34);
        assert_eq!(punarvasu_4.nakshatra, Nakshatra::Punarvasu);
        assert_eq!(punarvasu_4.pada, 4);
        assert_eq!(punarvasu_4.lord, CelestialBody::Jupiter);

        let chitra = NakshatraInfo::from_longitude(176.47);
        assert_eq!(chitra.nakshatra, Nakshatra::Chitra);
        assert_eq!(chitra.pada, 1);
        assert_eq!(chitra.lord, CelestialBody::Mars);
    }

    #[test]
    fn test_nakshatra_lords_cycle() {
        let cycle = [
            CelestialBody::Ketu,
            CelestialBody::Venus,
            CelestialBody::Sun,
            CelestialBody::Moon,
            CelestialBody::Mars,
            CelestialBody::Rahu,
            CelestialBody::Jupiter,
            CelestialBody::Saturn,
            CelestialBody::Mercury,
        ];
        for nakshatra in Nakshatra::ALL {
            assert_eq!(nakshatra.lord(), cycle[nakshatra.index() % 9], "{}", nakshatra);
        }
    }

    #[test]
    fn test_nakshatra_names_serialize_with_spaces() {
        let json = serde_json::to_string(&Nakshatra::PurvaBhadrapada).unwrap();
        assert_eq!(json, "\"Purva Bhadrapada\"");
        for nakshatra in Nakshatra::ALL {
            let json = serde_json::to_string(&nakshatra).unwrap();
            assert_eq!(json, format!("\"{}\"", nakshatra.name()));
        }
    }

    #[test]
    fn test_body_order_and_index() {
        for (i, body) in CelestialBody::iter().enumerate() {
            assert_eq!(body.index(), i);
        }
        assert!(CelestialBody::Rahu.is_node());
        assert!(!CelestialBody::Saturn.is_node());
    }

    #[test]
    fn test_planet_map_rejects_misordered_slots() {
        let navamsha = NavamshaPosition::ascendant(0.0);
        let position = |body| PlanetPosition {
            body,
            longitude: 0.0,
            sign: ZodiacSign::Aries,
            degree: 0.0,
            house: 1,
            nakshatra: Nakshatra::Ashwini,
            pada: 1,
            lord: CelestialBody::Ketu,
            navamsha: navamsha.clone(),
        };
        let mut positions = CelestialBody::ALL.map(position);
        assert!(PlanetMap::new(positions.clone()).is_ok());

        positions.swap(0, 1);
        assert!(matches!(
            PlanetMap::new(positions),
            Err(AstrologyError::Computation(_))
        ));
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Kundali>();
        assert_eq!(Kundali::default().provider_name(), "vsop87");
    }
}

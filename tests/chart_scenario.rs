use approx::assert_abs_diff_eq;
use chrono::{NaiveDate, TimeZone, Utc};
use kundali_core::{
    AstrologyError, BirthInput, CelestialBody, ChartResult, EphemerisModel, Kundali,
    KundaliConfig, Nakshatra, ReportContext, ZodiacSign,
};

/// Chandrapur, 2024-05-20 09:33 IST.
fn chandrapur() -> BirthInput {
    BirthInput::new(2024, 5, 20, 9, 33, 0, 5.5, 19.95, 79.30).unwrap()
}

fn engine(model: EphemerisModel) -> Kundali {
    let mut config = KundaliConfig::default();
    config.ephemeris.model = model;
    Kundali::new(config)
}

fn chart(model: EphemerisModel) -> ChartResult {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    engine(model).compute_chart_at(&chandrapur(), now).unwrap()
}

fn assert_placement(chart: &ChartResult, body: CelestialBody, sign: ZodiacSign, nakshatra: Nakshatra) {
    let position = &chart.planets[body];
    assert_eq!(position.sign, sign, "{} sign at {}", body, position.longitude);
    assert_eq!(position.nakshatra, nakshatra, "{} nakshatra at {}", body, position.longitude);
}

#[test]
fn test_reference_chart_both_ephemerides() {
    for model in [EphemerisModel::Vsop87, EphemerisModel::MeanElements] {
        let chart = chart(model);

        assert_abs_diff_eq!(chart.ayanamsa, 24.198, epsilon = 0.01);

        assert_placement(&chart, CelestialBody::Sun, ZodiacSign::Taurus, Nakshatra::Krittika);
        assert_placement(&chart, CelestialBody::Moon, ZodiacSign::Virgo, Nakshatra::Chitra);
        assert_placement(&chart, CelestialBody::Mars, ZodiacSign::Pisces, Nakshatra::Revati);
        assert_placement(&chart, CelestialBody::Mercury, ZodiacSign::Aries, Nakshatra::Ashwini);
        assert_placement(&chart, CelestialBody::Jupiter, ZodiacSign::Taurus, Nakshatra::Krittika);
        assert_placement(&chart, CelestialBody::Venus, ZodiacSign::Taurus, Nakshatra::Krittika);
        assert_placement(&chart, CelestialBody::Saturn, ZodiacSign::Aquarius, Nakshatra::PurvaBhadrapada);
        assert_placement(&chart, CelestialBody::Rahu, ZodiacSign::Pisces, Nakshatra::Revati);
        assert_placement(&chart, CelestialBody::Ketu, ZodiacSign::Virgo, Nakshatra::Hasta);

        assert_eq!(chart.ascendant.sign, ZodiacSign::Cancer);
        assert_eq!(chart.ascendant.nakshatra, Nakshatra::Punarvasu);
        assert_eq!(chart.ascendant.pada, 4);

        assert_eq!(chart.sun_sign.sign, ZodiacSign::Taurus);
        assert_eq!(chart.moon_sign.sign, ZodiacSign::Virgo);
        assert_eq!(chart.nakshatra.name, Nakshatra::Chitra);
        assert_eq!(chart.nakshatra.lord, CelestialBody::Mars);
    }
}

#[test]
fn test_chart_invariants() {
    let chart = chart(EphemerisModel::Vsop87);

    let rahu = chart.planets[CelestialBody::Rahu].longitude;
    let ketu = chart.planets[CelestialBody::Ketu].longitude;
    assert_abs_diff_eq!((ketu - rahu).rem_euclid(360.0), 180.0, epsilon = 1e-9);

    for position in chart.planets.iter() {
        assert!((0.0..360.0).contains(&position.longitude), "{}", position.body);
        assert!((0.0..30.0).contains(&position.degree), "{}", position.body);
        assert!((1..=12).contains(&position.house), "{}", position.body);
        assert!((1..=4).contains(&position.pada), "{}", position.body);
        assert_eq!(position.lord, position.nakshatra.lord());
    }

    // Equal houses start at the ascendant
    assert_abs_diff_eq!(chart.houses[0], chart.ascendant.longitude, epsilon = 1e-9);
    for pair in chart.houses.windows(2) {
        assert_abs_diff_eq!((pair[1] - pair[0]).rem_euclid(360.0), 30.0, epsilon = 1e-9);
    }
    assert_eq!(chart.navamsha_ascendant.house, 1);
}

#[test]
fn test_scenario_dasha() {
    let chart = chart(EphemerisModel::Vsop87);
    let birth = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();

    // Chitra pada 1: the whole Mars period remains
    assert_eq!(chart.nakshatra.pada, 1);
    assert_eq!(chart.birth_balance.years, 7);
    assert_eq!(chart.dasha_sequence.len(), 9);

    let first = &chart.dasha_sequence[0];
    assert_eq!(first.planet, CelestialBody::Mars);
    assert_eq!(first.start, birth);
    assert_eq!(first.end, NaiveDate::from_ymd_opt(2031, 5, 20).unwrap());
    assert_eq!(chart.dasha_sequence[1].planet, CelestialBody::Rahu);

    let total: f64 = chart.dasha_sequence.iter().map(|p| p.years).sum();
    assert_abs_diff_eq!(total, 120.0, epsilon = 1e-9);
    for pair in chart.dasha_sequence.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }

    assert_eq!(chart.current_dasha.planet, CelestialBody::Mars);
    assert_eq!(chart.current_dasha.antardasha.planet, CelestialBody::Mars);
    assert_eq!(chart.current_dasha.balance.years, 6);
}

#[test]
fn test_json_is_stable_and_camel_case() {
    let first = serde_json::to_string(&chart(EphemerisModel::Vsop87)).unwrap();
    let second = serde_json::to_string(&chart(EphemerisModel::Vsop87)).unwrap();
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    for key in [
        "ayanamsa",
        "ascendant",
        "navamshaAscendant",
        "moonSign",
        "sunSign",
        "nakshatra",
        "planets",
        "panchang",
        "currentDasha",
        "birthBalance",
        "dashaSequence",
        "yogas",
        "doshas",
        "houses",
    ] {
        assert!(value.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(value["planets"]["Moon"]["sign"], "Virgo");
    assert_eq!(value["nakshatra"]["name"], "Chitra");
    assert!(value["doshas"]["kaalSarp"].is_boolean());
    assert_eq!(value["houses"].as_array().map(Vec::len), Some(12));
}

#[test]
fn test_invalid_input_is_rejected() {
    let engine = Kundali::default();
    let feb_30 = BirthInput {
        day: 30,
        month: 2,
        year: 2023,
        ..chandrapur()
    };
    let err = engine.compute_chart(&feb_30).unwrap_err();
    assert!(matches!(
        err,
        AstrologyError::InvalidDate {
            year: 2023,
            month: 2,
            day: 30
        }
    ));

    let polar = BirthInput {
        latitude: 91.0,
        ..chandrapur()
    };
    assert!(engine.compute_chart(&polar).unwrap_err().is_input_error());
}

#[test]
fn test_report_context() {
    let chart = chart(EphemerisModel::Vsop87);
    let mut config = KundaliConfig::default();
    config.report.astrologer_name = "Pt. R. Sharma".to_string();

    let context = ReportContext::new(&chart, &config.report);
    assert!(context.predictions.lagna.starts_with("Cancer ascendant"));
    assert!(context.predictions.moon_sign.starts_with("Moon in Virgo"));
    assert!(context.predictions.nakshatra.contains("Mars rules this nakshatra"));
    assert_eq!(context.footer(), "© 2025 Kundali | Pt. R. Sharma");

    let value = serde_json::to_value(&context).unwrap();
    assert_eq!(value["settings"]["astrologerName"], "Pt. R. Sharma");
    assert_eq!(value["chart"]["ascendant"]["sign"], "Cancer");
}

#[test]
fn test_short_dasha_config_cannot_truncate_the_cycle() {
    assert!(KundaliConfig::from_toml_str("[dasha]\nmax_entries = 3").is_err());

    let mut config = KundaliConfig::default();
    config.dasha.max_entries = 3;
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let chart = Kundali::new(config).compute_chart_at(&chandrapur(), now).unwrap();
    assert!(chart.dasha_sequence.len() >= 9);
    assert_eq!(chart.current_dasha.antardasha.start, chart.dasha_sequence[0].start);
}

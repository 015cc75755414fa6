//! Configuration models and loaders for chart computation and reports.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "KUNDALI_CONFIG";
pub const DEFAULT_MAX_DASHA_ENTRIES: usize = 10;
/// A full Vimshottari cycle needs nine mahadashas.
pub const MIN_DASHA_ENTRIES: usize = 9;

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Which ephemeris backs the planetary longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EphemerisModel {
    #[default]
    Vsop87,
    MeanElements,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EphemerisConfig {
    pub model: EphemerisModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashaConfig {
    /// Upper bound on the number of mahadasha periods reported.
    pub max_entries: usize,
}

impl Default for DashaConfig {
    fn default() -> Self {
        DashaConfig {
            max_entries: DEFAULT_MAX_DASHA_ENTRIES,
        }
    }
}

/// Astrologer details printed on generated reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "camelCase"))]
pub struct ReportSettings {
    pub astrologer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub software_name: String,
    pub copyright_year: i32,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            astrologer_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            software_name: "Kundali".to_string(),
            copyright_year: 2025,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KundaliConfig {
    pub ephemeris: EphemerisConfig,
    pub dasha: DashaConfig,
    pub report: ReportSettings,
}

impl KundaliConfig {
    /// Load a configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: KundaliConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `$KUNDALI_CONFIG` when set, otherwise defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dasha.max_entries < MIN_DASHA_ENTRIES {
            return Err(ConfigError::Invalid {
                field: "dasha.max_entries",
                reason: format!(
                    "must be at least {}, got {}",
                    MIN_DASHA_ENTRIES, self.dasha.max_entries
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = KundaliConfig::default();
        assert_eq!(config.ephemeris.model, EphemerisModel::Vsop87);
        assert_eq!(config.dasha.max_entries, 10);
        assert_eq!(config.report.software_name, "Kundali");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = KundaliConfig::from_toml_str(
            r#"
            [ephemeris]
            model = "mean-elements"

            [report]
            astrologer_name = "Pt. R. Sharma"
            "#,
        )
        .unwrap();
        assert_eq!(config.ephemeris.model, EphemerisModel::MeanElements);
        assert_eq!(config.dasha.max_entries, 10);
        assert_eq!(config.report.astrologer_name, "Pt. R. Sharma");
        assert_eq!(config.report.software_name, "Kundali");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[dasha]\nmax_entries = 9\n\n[report]\nphone = \"+91 98765 43210\"\ncopyright_year = 2026"
        )
        .unwrap();

        let config = KundaliConfig::load(file.path()).unwrap();
        assert_eq!(config.dasha.max_entries, 9);
        assert_eq!(config.report.phone, "+91 98765 43210");
        assert_eq!(config.report.copyright_year, 2026);
    }

    #[test]
    fn test_rejects_bad_files() {
        let unknown_model = KundaliConfig::from_toml_str("[ephemeris]\nmodel = \"swiss\"");
        assert!(matches!(unknown_model, Err(ConfigError::Toml(_))));

        let zero = KundaliConfig::from_toml_str("[dasha]\nmax_entries = 0");
        assert!(matches!(zero, Err(ConfigError::Invalid { .. })));

        let short = KundaliConfig::from_toml_str("[dasha]\nmax_entries = 3");
        assert!(matches!(
            short,
            Err(ConfigError::Invalid {
                field: "dasha.max_entries",
                ..
            })
        ));

        let missing = KundaliConfig::load("/definitely/not/here/kundali.toml");
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}

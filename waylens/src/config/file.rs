//! INI configuration file.
//!
//! Missing sections and keys fall back to defaults; present but malformed
//! values are errors.
//!
//! # Example Configuration (INI)
//!
//! ```ini
//! [overlay]
//! route_waypoint_cap = 3
//! priority_distance_scale_meters = 1000
//!
//! [overlay.venue]
//! fov_degrees = 120
//! max_range_meters = 500
//! max_candidates = 100
//!
//! [overlay.size]
//! large_below_meters = 50
//! medium_below_meters = 150
//!
//! [overlay.projection]
//! near_band = 0.7
//! far_band = 0.3
//! max_distance_for_vertical_scale = 500
//! curve = linear
//!
//! [performance]
//! mode = balanced
//! high = 60,15
//! balanced = 30,10
//! battery = 15,5
//!
//! [logging]
//! level = info
//! directory = /var/log/waylens
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::{Ini, Properties};

use crate::catalogue::Category;
use crate::logging::LoggingSettings;
use crate::overlay::{CategoryConfig, OverlayConfig};
use crate::performance::{PerformanceBudget, PerformanceMode, PerformanceModeController};

use super::ConfigError;

const SECTION_OVERLAY: &str = "overlay";
const SECTION_SIZE: &str = "overlay.size";
const SECTION_PROJECTION: &str = "overlay.projection";
const SECTION_PERFORMANCE: &str = "performance";
const SECTION_LOGGING: &str = "logging";

/// Default location of the config file (`<config dir>/waylens/config.ini`).
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("waylens")
        .join("config.ini")
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    pub overlay: OverlayConfig,
    /// Mode selected at startup.
    pub mode: PerformanceMode,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load from the default path, or defaults if no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Parse INI text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(contents)?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let defaults = OverlayConfig::default();
        let mut overlay = defaults.clone();

        let section = Section::new(ini, SECTION_OVERLAY);
        overlay.route_waypoint_cap =
            section.parse_or("route_waypoint_cap", defaults.route_waypoint_cap)?;
        overlay.priority_distance_scale_meters = section.parse_or(
            "priority_distance_scale_meters",
            defaults.priority_distance_scale_meters,
        )?;
        // A top-level fov applies to every category unless overridden below
        let shared_fov: Option<f64> = section.parse_opt("fov_degrees")?;

        for category in Category::ALL {
            let name = category_section(category);
            let section = Section::new(ini, &name);
            let fallback = *defaults.category(category);
            let fov_default = shared_fov.unwrap_or(fallback.fov_degrees);
            *overlay.category_mut(category) = CategoryConfig {
                fov_degrees: section.parse_or("fov_degrees", fov_default)?,
                max_range_meters: section.parse_or("max_range_meters", fallback.max_range_meters)?,
                max_candidates: section.parse_or("max_candidates", fallback.max_candidates)?,
            };
        }

        let section = Section::new(ini, SECTION_SIZE);
        overlay.size.large_below_meters =
            section.parse_or("large_below_meters", defaults.size.large_below_meters)?;
        overlay.size.medium_below_meters =
            section.parse_or("medium_below_meters", defaults.size.medium_below_meters)?;

        let section = Section::new(ini, SECTION_PROJECTION);
        let projection = &mut overlay.projection;
        projection.near_band = section.parse_or("near_band", defaults.projection.near_band)?;
        projection.far_band = section.parse_or("far_band", defaults.projection.far_band)?;
        projection.max_distance_for_vertical_scale = section.parse_or(
            "max_distance_for_vertical_scale",
            defaults.projection.max_distance_for_vertical_scale,
        )?;
        projection.curve = section.parse_or("curve", defaults.projection.curve)?;

        let section = Section::new(ini, SECTION_PERFORMANCE);
        let mode = section.parse_or("mode", PerformanceMode::default())?;
        let budget = |mode: PerformanceMode| -> Result<PerformanceBudget, ConfigError> {
            match section.get(mode.as_str()) {
                Some(value) => parse_budget(section.key(mode.as_str()), value),
                None => Ok(defaults.budgets.settings_for(mode)),
            }
        };
        overlay.budgets = PerformanceModeController::with_budgets(
            budget(PerformanceMode::High)?,
            budget(PerformanceMode::Balanced)?,
            budget(PerformanceMode::Battery)?,
        )?;

        let section = Section::new(ini, SECTION_LOGGING);
        let logging_defaults = LoggingSettings::default();
        let logging = LoggingSettings {
            level: section
                .get("level")
                .map(str::to_string)
                .unwrap_or(logging_defaults.level),
            directory: section
                .get("directory")
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from)
                .or(logging_defaults.directory),
        };

        overlay.validate()?;

        Ok(Self {
            overlay,
            mode,
            logging,
        })
    }

    /// Render as INI, writing every value explicitly.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        let overlay = &self.overlay;

        ini.with_section(Some(SECTION_OVERLAY))
            .set("route_waypoint_cap", overlay.route_waypoint_cap.to_string())
            .set(
                "priority_distance_scale_meters",
                overlay.priority_distance_scale_meters.to_string(),
            );

        for category in Category::ALL {
            let config = overlay.category(category);
            ini.with_section(Some(category_section(category)))
                .set("fov_degrees", config.fov_degrees.to_string())
                .set("max_range_meters", config.max_range_meters.to_string())
                .set("max_candidates", config.max_candidates.to_string());
        }

        ini.with_section(Some(SECTION_SIZE))
            .set("large_below_meters", overlay.size.large_below_meters.to_string())
            .set("medium_below_meters", overlay.size.medium_below_meters.to_string());

        ini.with_section(Some(SECTION_PROJECTION))
            .set("near_band", overlay.projection.near_band.to_string())
            .set("far_band", overlay.projection.far_band.to_string())
            .set(
                "max_distance_for_vertical_scale",
                overlay.projection.max_distance_for_vertical_scale.to_string(),
            )
            .set("curve", overlay.projection.curve.to_string());

        {
            let mut section = ini.with_section(Some(SECTION_PERFORMANCE));
            section.set("mode", self.mode.to_string());
            for mode in PerformanceMode::ALL {
                let budget = overlay.budgets.settings_for(mode);
                section.set(
                    mode.as_str(),
                    format!("{},{}", budget.target_frame_rate_hz, budget.max_elements),
                );
            }
        }

        {
            let mut section = ini.with_section(Some(SECTION_LOGGING));
            section.set("level", self.logging.level.clone());
            if let Some(directory) = &self.logging.directory {
                section.set("directory", directory.display().to_string());
            }
        }

        ini
    }

    /// Write to the default path, creating its directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Write to an explicit path, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        self.to_ini().write_to_file(path).map_err(write_error)
    }
}

fn category_section(category: Category) -> String {
    format!("{}.{}", SECTION_OVERLAY, category.as_str())
}

/// Parse a `rate,elements` budget pair.
fn parse_budget(key: String, value: &str) -> Result<PerformanceBudget, ConfigError> {
    let Some((rate, elements)) = value.split_once(',') else {
        return Err(ConfigError::invalid(
            key,
            format!("expected 'rate,max_elements', got '{}'", value),
        ));
    };
    let rate = rate
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key.clone(), format!("invalid frame rate '{}'", rate)))?;
    let elements = elements.trim().parse().map_err(|_| {
        ConfigError::invalid(key.clone(), format!("invalid element count '{}'", elements))
    })?;
    Ok(PerformanceBudget::new(rate, elements))
}

/// Read-only view of one INI section that may be absent.
struct Section<'a> {
    name: &'a str,
    properties: Option<&'a Properties>,
}

impl<'a> Section<'a> {
    fn new(ini: &'a Ini, name: &'a str) -> Self {
        Self {
            name,
            properties: ini.section(Some(name)),
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}.{}", self.name, key)
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.properties.and_then(|props| props.get(key))
    }

    fn parse_opt<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
    {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::invalid(self.key(key), format!("cannot parse '{}'", raw))),
            None => Ok(None),
        }
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
    {
        Ok(self.parse_opt(key)?.unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::VerticalCurve;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = ConfigFile::parse("").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_overrides() {
        let config = ConfigFile::parse(
            r#"
[overlay]
route_waypoint_cap = 2

[overlay.deal]
max_range_meters = 150
max_candidates = 25

[overlay.projection]
curve = ease_out

[performance]
mode = battery
battery = 20,4
"#,
        )
        .unwrap();

        assert_eq!(config.overlay.route_waypoint_cap, 2);
        assert_eq!(config.overlay.deal.max_range_meters, 150.0);
        assert_eq!(config.overlay.deal.max_candidates, 25);
        assert_eq!(config.overlay.deal.fov_degrees, 120.0);
        assert_eq!(config.overlay.projection.curve, VerticalCurve::EaseOut);
        assert_eq!(config.mode, PerformanceMode::Battery);
        assert_eq!(
            config.overlay.budgets.settings_for(PerformanceMode::Battery),
            PerformanceBudget::new(20, 4)
        );
        assert_eq!(
            config.overlay.budgets.settings_for(PerformanceMode::High),
            PerformanceBudget::new(60, 15)
        );
    }

    #[test]
    fn test_shared_fov_applies_to_all_categories() {
        let config = ConfigFile::parse(
            "[overlay]\nfov_degrees = 90\n\n[overlay.route]\nfov_degrees = 150\n",
        )
        .unwrap();
        assert_eq!(config.overlay.venue.fov_degrees, 90.0);
        assert_eq!(config.overlay.deal.fov_degrees, 90.0);
        assert_eq!(config.overlay.route.fov_degrees, 150.0);
    }

    #[test]
    fn test_unknown_mode_is_error() {
        let err = ConfigFile::parse("[performance]\nmode = turbo\n").unwrap_err();
        assert!(err.to_string().contains("performance.mode"));
    }

    #[test]
    fn test_malformed_number_is_error() {
        let err = ConfigFile::parse("[overlay.venue]\nmax_range_meters = far\n").unwrap_err();
        assert!(err.to_string().contains("overlay.venue.max_range_meters"));
    }

    #[test]
    fn test_non_finite_range_is_error() {
        assert!(ConfigFile::parse("[overlay.venue]\nmax_range_meters = NaN\n").is_err());
        assert!(ConfigFile::parse("[overlay.venue]\nfov_degrees = inf\n").is_err());
    }

    #[test]
    fn test_malformed_budget_is_error() {
        assert!(ConfigFile::parse("[performance]\nhigh = 60\n").is_err());
        assert!(ConfigFile::parse("[performance]\nhigh = 60,x\n").is_err());
        assert!(ConfigFile::parse("[performance]\nhigh = 60,0\n").is_err());
    }

    #[test]
    fn test_budget_below_route_cap_is_error() {
        let err = ConfigFile::parse("[performance]\nbattery = 15,2\n").unwrap_err();
        assert!(err.to_string().contains("route_waypoint_cap"));
    }

    #[test]
    fn test_logging_section() {
        let config = ConfigFile::parse("[logging]\nlevel = debug\ndirectory = /tmp/waylens\n")
            .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.directory, Some(PathBuf::from("/tmp/waylens")));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.mode = PerformanceMode::High;
        config.overlay.venue.max_range_meters = 750.0;
        config.overlay.projection.curve = VerticalCurve::EaseOut;
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigFile::load_from(&dir.path().join("missing.ini")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::model::{YearWindow, FULL_YEAR_END, FULL_YEAR_START};
use crate::data::DataResult;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "NCAT_DASHBOARD_CONFIG";

/// Dashboard defaults: which years count as complete, which years the
/// comparison views pre-select, and the window geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub full_year_start: i32,
    pub full_year_end: i32,
    pub comparison_years: Vec<i32>,
    pub reference_year: i32,
    pub dominance_threshold_pct: f64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            full_year_start: FULL_YEAR_START,
            full_year_end: FULL_YEAR_END,
            comparison_years: vec![2020, 2022, 2024],
            reference_year: 2024,
            dominance_threshold_pct: 70.0,
            window_width: 1280.0,
            window_height: 840.0,
        }
    }
}

impl DashboardConfig {
    /// Read the file named by [`CONFIG_ENV`], or fall back to defaults when
    /// the variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_path(&PathBuf::from(path)),
            Err(_) => {
                log::debug!("{CONFIG_ENV} not set, using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config =
            Self::from_json(&contents).with_context(|| format!("parsing {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DataResult<()> {
        self.full_years().map(|_| ())
    }

    pub fn full_years(&self) -> DataResult<YearWindow> {
        YearWindow::new(self.full_year_start, self.full_year_end)
    }

    pub fn comparison_year_set(&self) -> BTreeSet<i32> {
        self.comparison_years.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataError;
    use std::fs;

    #[test]
    fn defaults_cover_the_full_years() {
        let config = DashboardConfig::default();
        assert_eq!(config.full_years().unwrap(), YearWindow::FULL_YEARS);
        assert_eq!(
            config.comparison_year_set().into_iter().collect::<Vec<_>>(),
            vec![2020, 2022, 2024]
        );
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = DashboardConfig::from_json(r#"{ "reference_year": 2023 }"#).unwrap();
        assert_eq!(config.reference_year, 2023);
        assert_eq!(config.dominance_threshold_pct, 70.0);
        assert_eq!(config.full_year_start, 2017);
    }

    #[test]
    fn inverted_full_year_range_is_rejected() {
        let err = DashboardConfig::from_json(r#"{ "full_year_start": 2024, "full_year_end": 2017 }"#)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::InvalidRange { lo: 2024, hi: 2017 })
        );
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.json");
        fs::write(&path, r#"{ "comparison_years": [2018, 2019] }"#).unwrap();
        let config = DashboardConfig::from_path(&path).unwrap();
        assert_eq!(config.comparison_years, vec![2018, 2019]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DashboardConfig::from_path(Path::new("/nonexistent/dashboard.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/dashboard.json"));
    }
}

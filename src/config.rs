use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AgeError, Result};
use crate::metrics::Assumptions;

/// Optional `agecalc.toml`. Every key may be omitted.
///
/// ```toml
/// [assumptions]
/// heart_rate_bpm = 60
///
/// [export]
/// dark_filename = "me_dark.svg"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub assumptions: Assumptions,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dark_filename: String,
    pub light_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dark_filename: "age_dark.svg".to_string(),
            light_filename: "age_light.svg".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| AgeError::Config {
            message: format!("TOML parsing error: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let a = &self.assumptions;
        if a.heart_rate_bpm == 0 {
            return Err(AgeError::Config {
                message: "assumptions.heart_rate_bpm must be greater than zero".to_string(),
            });
        }
        if a.sleep_hours_per_day > 24 {
            return Err(AgeError::Config {
                message: format!(
                    "assumptions.sleep_hours_per_day must be at most 24, got {}",
                    a.sleep_hours_per_day
                ),
            });
        }

        for (field, name) in [
            ("export.dark_filename", &self.export.dark_filename),
            ("export.light_filename", &self.export.light_filename),
        ] {
            if name.is_empty() || name.contains('\0') {
                return Err(AgeError::Config {
                    message: format!("{field} must be a non-empty file name"),
                });
            }
        }

        Ok(())
    }
}

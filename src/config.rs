use std::collections::HashMap;
use thiserror::Error;

use crate::domain::PeriodType;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub default_period_type: PeriodType,
    pub shot_chart_view_box: ViewBox,
    pub box_score_cache_capacity: usize,
}

/// Render-space dimensions for shot chart markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewBox {
    fn default() -> Self {
        // Full court, baskets at top and bottom.
        Self {
            width: 50.0,
            height: 94.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let default_period_type = env_map
            .get("DEFAULT_PERIOD_TYPE")
            .map(|s| s.as_str())
            .unwrap_or("quarters")
            .parse::<PeriodType>()
            .map_err(|e| ConfigError::InvalidValue("DEFAULT_PERIOD_TYPE".to_string(), e))?;

        let shot_chart_view_box = match env_map.get("SHOT_CHART_VIEWBOX") {
            Some(raw) => parse_view_box(raw)?,
            None => ViewBox::default(),
        };

        let box_score_cache_capacity = env_map
            .get("BOX_SCORE_CACHE_CAPACITY")
            .map(|s| s.as_str())
            .unwrap_or("256")
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "BOX_SCORE_CACHE_CAPACITY".to_string(),
                    "must be a valid usize".to_string(),
                )
            })?;

        Ok(Config {
            port,
            database_path,
            default_period_type,
            shot_chart_view_box,
            box_score_cache_capacity,
        })
    }
}

fn parse_view_box(raw: &str) -> Result<ViewBox, ConfigError> {
    let invalid = || {
        ConfigError::InvalidValue(
            "SHOT_CHART_VIEWBOX".to_string(),
            format!("must look like <width>x<height>, got {}", raw),
        )
    };

    let (w, h) = raw.trim().split_once('x').ok_or_else(invalid)?;
    let width = w.trim().parse::<f64>().map_err(|_| invalid())?;
    let height = h.trim().parse::<f64>().map_err(|_| invalid())?;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(invalid());
    }
    Ok(ViewBox { width, height })
}

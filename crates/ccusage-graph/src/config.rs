use ccusage_graph_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::Args;

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/ccusage-graph/config.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Optional settings file. Every field may be left out.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphConfig {
    #[serde(rename = "type")]
    pub chart_kind: Option<ChartKind>,
    pub threshold: Option<bool>,
    pub pro_threshold: Option<f64>,
    pub max_threshold: Option<f64>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub timeout_secs: Option<u64>,
}

fn get_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

fn read_config(path: &Path) -> Result<GraphConfig> {
    let invalid = |reason: String| GraphError::Config {
        origin: path.display().to_string(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))
}

/// An explicit path must load. The default path is optional and a broken
/// file there is only warned about.
pub fn load_config(explicit: Option<&Path>) -> Result<GraphConfig> {
    if let Some(path) = explicit {
        debug!("loading config from {}", path.display());
        return read_config(path);
    }

    let config_path = get_config_path();
    if !config_path.exists() {
        return Ok(GraphConfig::default());
    }

    debug!("loading config from {}", config_path.display());
    read_config(&config_path).or_else(|e| {
        warn!("{}; using defaults", e);
        Ok(GraphConfig::default())
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub options: RenderOptions,
    pub timeout: Duration,
}

impl Settings {
    /// Command-line flags win over the file, the file over built-in defaults.
    pub fn resolve(args: &Args, file: GraphConfig) -> Result<Self> {
        let defaults = RenderOptions::default();

        let pro = args
            .pro_threshold
            .or(file.pro_threshold)
            .unwrap_or(Thresholds::DEFAULT_PRO);
        let pro_max = args
            .max_threshold
            .or(file.max_threshold)
            .unwrap_or(Thresholds::DEFAULT_PRO_MAX);

        let options = RenderOptions {
            chart_kind: args.chart_kind.or(file.chart_kind).unwrap_or_default(),
            period: args.period,
            show_threshold: !args.no_threshold && file.threshold.unwrap_or(true),
            thresholds: Thresholds::new(pro, pro_max),
            width: args.width.or(file.width).unwrap_or(defaults.width),
            height: args.height.or(file.height).unwrap_or(defaults.height),
        };
        let timeout = Duration::from_secs(
            args.timeout
                .or(file.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        );

        let settings = Self { options, timeout };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: String| {
            Err(GraphError::Config {
                origin: "resolved settings".to_string(),
                reason,
            })
        };
        let thresholds = &self.options.thresholds;

        if !(thresholds.pro() > 0.0 && thresholds.pro_max() > 0.0) {
            return invalid("thresholds must be positive".to_string());
        }
        if thresholds.pro() >= thresholds.pro_max() {
            return invalid(format!(
                "pro threshold ({}) must be below the max threshold ({})",
                thresholds.pro(),
                thresholds.pro_max()
            ));
        }
        if self.options.width == 0 || self.options.height == 0 {
            return invalid("width and height must be at least 1".to_string());
        }
        if self.timeout.is_zero() {
            return invalid("timeout must be at least one second".to_string());
        }

        Ok(())
    }
}

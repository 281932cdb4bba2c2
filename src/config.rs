//! Configuration loading for the plotting run.
//!
//! The run takes no flags and reads no environment variables. An optional
//! `plots.toml` next to the benchmark results may override the defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::PlotError;

/// Fixed location of the optional config file.
pub const CONFIG_PATH: &str = "./resultados/plots.toml";

/// How the 95% confidence band around the mean is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CiMethod {
    /// Percentile bootstrap over resampled means.
    Bootstrap,
    /// `mean ± z * stderr` with the sample standard deviation.
    Normal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Benchmark table produced by the Kruskal runner.
    pub input: PathBuf,
    /// Directory receiving the PNG figures.
    pub output_dir: PathBuf,
    /// Pixel size of one facet-grid panel.
    pub grid_panel_size: (u32, u32),
    /// Pixel size of an overlay figure.
    pub figure_size: (u32, u32),
    pub ci_method: CiMethod,
    pub bootstrap_samples: usize,
    pub seed: u64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("./resultados/df.csv"),
            output_dir: PathBuf::from("./resultados"),
            grid_panel_size: (400, 400),
            figure_size: (800, 600),
            ci_method: CiMethod::Bootstrap,
            bootstrap_samples: 1000,
            seed: 1234,
        }
    }
}

impl PlotConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error: the defaults are returned and
    /// `from_file` is `false`. A file that exists but cannot be read or
    /// parsed aborts the run.
    pub fn load_or_default(config_path: &Path) -> Result<(Self, bool), PlotError> {
        if !config_path.exists() {
            return Ok((Self::default(), false));
        }

        let content = std::fs::read_to_string(config_path).map_err(|e| PlotError::io(config_path, e))?;
        let config = Self::from_toml(&content).map_err(|message| PlotError::Config {
            path: config_path.to_path_buf(),
            message,
        })?;
        Ok((config, true))
    }

    fn from_toml(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        if config.bootstrap_samples == 0 {
            return Err("bootstrap-samples must be at least 1".to_string());
        }
        if config.grid_panel_size.0 == 0 || config.grid_panel_size.1 == 0 || config.figure_size.0 == 0 || config.figure_size.1 == 0 {
            return Err("figure sizes must be non-zero".to_string());
        }
        Ok(config)
    }
}

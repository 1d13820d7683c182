use std::path::PathBuf;

use color_eyre::Result;
use serde::Deserialize;
use tracing::warn;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
}

fn default_tick_rate() -> f64 {
    4.0
}

fn default_frame_rate() -> f64 {
    30.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: paths::data_dir(),
            config_dir: paths::config_dir(),
            tick_rate: default_tick_rate(),
            frame_rate: default_frame_rate(),
        }
    }
}

impl Config {
    /// Layers optional config files over the defaults. A missing file is
    /// fine; the defaults carry the application.
    pub fn new() -> Result<Self, config::ConfigError> {
        let data_dir = paths::data_dir();
        let config_dir = paths::config_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("config_dir", config_dir.to_string_lossy().as_ref())?
            .set_default("tick_rate", default_tick_rate())?
            .set_default("frame_rate", default_frame_rate())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            warn!("no configuration file found, using defaults");
        }

        let cfg: Self = builder.build()?.try_deserialize()?;

        Ok(cfg)
    }
}

use crate::prelude::*;
use crate::solarmax::packet::InverterId;

use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::time::Duration;

// ReadMode {{{
/// How the reply is collected from the socket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    /// Keep reading until a complete `{...}` frame has arrived.
    Framed,
    /// A single read; whatever arrives is the reply.
    Single,
} // }}}

// OutputShape {{{
/// JSON layout of a decoded reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputShape {
    /// `{"PAC":{"Value":50.0,"Description":"AC Power (W)"}}`
    Detailed,
    /// `{"PAC":50.0,"SYS":"001-Running"}`
    Plain,
} // }}}

#[serde_as]
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_host")]
    pub host: String,

    #[serde(default = "Config::default_port")]
    pub port: u16,

    #[serde(default = "Config::default_inverter")]
    pub inverter: u8,

    /// Comma separated metric codes.
    #[serde(default = "Config::default_metrics")]
    pub metrics: String,

    #[serde(default = "Config::default_loglevel")]
    pub loglevel: String,

    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "Config::default_timeout", rename = "timeout_secs")]
    pub timeout: Duration,

    #[serde(default = "Config::default_read_mode")]
    pub read_mode: ReadMode,

    #[serde(default = "Config::default_output")]
    pub output: OutputShape,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            inverter: Self::default_inverter(),
            metrics: Self::default_metrics(),
            loglevel: Self::default_loglevel(),
            timeout: Self::default_timeout(),
            read_mode: Self::default_read_mode(),
            output: Self::default_output(),
        }
    }
}

impl Config {
    pub fn new(file: &str) -> Result<Self> {
        let content = std::fs::read_to_string(file)
            .map_err(|err| anyhow!("config.rs:error reading {}: {}", file, err))?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|err| anyhow!("config.rs:error parsing {}: {}", file, err))?;

        config.validate()?;
        Ok(config)
    }

    /// Command line flags win over the config file.
    pub fn apply_options(&mut self, options: &Options) {
        if let Some(host) = &options.host {
            self.host = host.clone();
        }
        if let Some(port) = options.port {
            self.port = port;
        }
        if let Some(inverter) = options.inverter {
            self.inverter = inverter;
        }
        if let Some(metrics) = &options.metrics {
            self.metrics = metrics.clone();
        }
        if let Some(loglevel) = &options.loglevel {
            self.loglevel = loglevel.clone();
        }
        if let Some(timeout) = options.timeout {
            self.timeout = Duration::from_secs(timeout);
        }
        if let Some(read_mode) = options.read_mode {
            self.read_mode = read_mode;
        }
        if let Some(output) = options.output {
            self.output = output;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            bail!("port must be between 1 and 65535");
        }
        if self.host.trim().is_empty() {
            return Err(anyhow!("config.rs:Inverter host cannot be empty"));
        }
        if self.timeout.is_zero() {
            return Err(anyhow!("config.rs:Invalid timeout: 0"));
        }

        Ok(())
    }

    /// Logs the effective settings, once logging is up.
    pub fn describe(&self) {
        info!("Configuration:");
        info!("  Inverter: {} at {}:{}", self.inverter(), self.host, self.port);
        info!("  Metrics: {}", self.metrics);
        info!("  Timeout: {}s", self.timeout.as_secs());
        info!("  Read Mode: {:?}", self.read_mode);
        info!("  Output: {:?}", self.output);
        info!("  Log Level: {}", self.loglevel);
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn inverter(&self) -> InverterId {
        InverterId(self.inverter)
    }

    pub fn metrics(&self) -> &str {
        &self.metrics
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn read_mode(&self) -> ReadMode {
        self.read_mode
    }

    pub fn output(&self) -> OutputShape {
        self.output
    }

    /// `env_logger` filter for the configured level; unknown levels mean info.
    pub fn log_filter(&self) -> &'static str {
        match self.loglevel.to_lowercase().as_str() {
            "warn" => "warn",
            "debug" => "debug",
            "trace" => "trace",
            _ => "info",
        }
    }

    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    fn default_port() -> u16 {
        80
    }

    fn default_inverter() -> u8 {
        1
    }

    fn default_metrics() -> String {
        "KDY,KMT,KYR,KT0,TNF,TKK,TYP,PAC,PRL,IL1,IDC,UL1,UDC,SYS".to_string()
    }

    fn default_loglevel() -> String {
        "info".to_string()
    }

    fn default_timeout() -> Duration {
        Duration::from_secs(5)
    }

    fn default_read_mode() -> ReadMode {
        ReadMode::Framed
    }

    fn default_output() -> OutputShape {
        OutputShape::Detailed
    }
}

use crate::config::{OutputShape, ReadMode};

use clap::Parser;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Query the inverter once and print the reply as JSON
    Query,
    /// Poll repeatedly (not implemented yet)
    Loop,
    /// Print every known metric code
    #[value(name = "listmetrics")]
    ListMetrics,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Query => "query",
            Mode::Loop => "loop",
            Mode::ListMetrics => "listmetrics",
        };
        write!(f, "{}", name)
    }
}

/// SolarMax metrics - query a SolarMax inverter over its ASCII TCP protocol
#[derive(Debug, Parser)]
#[clap(author, version)]
pub struct Options {
    /// Optional config file to read
    #[clap(short = 'c', long = "config")]
    pub config_file: Option<String>,

    /// Run mode
    #[clap(short = 'm', long, value_enum, ignore_case = true, default_value_t = Mode::Query)]
    pub mode: Mode,

    /// Host/inverter ip address [default: 127.0.0.1]
    #[clap(long)]
    pub host: Option<String>,

    /// Port number [default: 80]
    #[clap(short = 'p', long)]
    pub port: Option<u16>,

    /// Inverter id [default: 1]
    #[clap(short = 'i', long)]
    pub inverter: Option<u8>,

    /// List of metric codes (comma separated)
    #[clap(long)]
    pub metrics: Option<String>,

    /// info, warn, debug, trace [default: info]
    #[clap(short = 'l', long)]
    pub loglevel: Option<String>,

    /// Connect and exchange timeout in seconds [default: 5]
    #[clap(short = 't', long)]
    pub timeout: Option<u64>,

    /// How to read the reply [default: framed]
    #[clap(long, value_enum)]
    pub read_mode: Option<ReadMode>,

    /// JSON output shape [default: detailed]
    #[clap(short = 'o', long, value_enum)]
    pub output: Option<OutputShape>,
}

impl Options {
    pub fn new() -> Self {
        Self::parse()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::parse_from(["solarmax-metrics"])
    }
}

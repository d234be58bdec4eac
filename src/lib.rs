// Module declarations for the application's core components
pub mod config;   // Configuration management
pub mod error;    // Error handling and types
pub mod options;  // Command line options parsing
pub mod prelude;  // Common imports and types
pub mod query;    // Encode, exchange, decode
pub mod solarmax; // SolarMax protocol implementation

// Get the package version from Cargo.toml
const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

use crate::prelude::*;
use std::io::Write;

/// Initialise `env_logger` with the given default filter.
///
/// `RUST_LOG` still takes precedence. Calling this twice is harmless.
pub fn init_logging(default_filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.module_path().unwrap_or(""),
                record.args()
            )
        })
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// Writes `CODE: description` for every catalog entry, sorted by code.
pub fn list_metrics<W: Write>(out: &mut W) -> Result<()> {
    for (code, description) in catalog::entries() {
        writeln!(out, "{}: {}", code, description)?;
    }
    Ok(())
}

/// Main application entry point
///
/// Settings are resolved from built-in defaults, the optional config file and
/// finally the command line, then the selected mode runs once.
pub async fn app(options: Options) -> Result<()> {
    let mut config = match &options.config_file {
        Some(file) => Config::new(file)?,
        None => Config::default(),
    };
    config.apply_options(&options);
    config.validate()?;

    init_logging(config.log_filter());

    info!("solarmax-metrics {} starting", CARGO_PKG_VERSION);
    if let Some(file) = &options.config_file {
        info!("Configuration loaded from {}", file);
    }
    config.describe();
    debug!("Mode: {}", options.mode);

    match options.mode {
        Mode::ListMetrics => list_metrics(&mut std::io::stdout().lock()),
        Mode::Loop => {
            warn!("Mode {} will be implemented soon", options.mode);
            Ok(())
        }
        Mode::Query => {
            let transport = TcpTransport::from_config(&config);
            let request = Request::from_list(config.metrics(), config.inverter());

            let json = query::query_json(&transport, &request, config.output())
                .await
                .map_err(|err| {
                    error!("query failed: {}", err);
                    err
                })?;

            println!("{}", json);
            Ok(())
        }
    }
}

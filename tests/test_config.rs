use clap::Parser;
use std::io::Write;
use std::time::Duration;

use solarmax_metrics::prelude::*;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn defaults() {
    let config = Config::default();

    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(config.port(), 80);
    assert_eq!(config.inverter(), InverterId(1));
    assert_eq!(
        config.metrics(),
        "KDY,KMT,KYR,KT0,TNF,TKK,TYP,PAC,PRL,IL1,IDC,UL1,UDC,SYS"
    );
    assert_eq!(config.timeout(), Duration::from_secs(5));
    assert_eq!(config.read_mode(), ReadMode::Framed);
    assert_eq!(config.output(), OutputShape::Detailed);
    assert_eq!(config.log_filter(), "info");
    assert!(config.validate().is_ok());
}

#[test]
fn loads_yaml_file() -> Result<()> {
    let file = write_config(
        "host: 192.168.1.123\n\
         port: 12345\n\
         inverter: 2\n\
         metrics: PAC,SYS\n\
         loglevel: debug\n\
         timeout_secs: 3\n\
         read_mode: single\n\
         output: plain\n",
    );

    let config = Config::new(file.path().to_str().unwrap())?;

    assert_eq!(config.host(), "192.168.1.123");
    assert_eq!(config.port(), 12345);
    assert_eq!(config.inverter(), InverterId(2));
    assert_eq!(config.metrics(), "PAC,SYS");
    assert_eq!(config.timeout(), Duration::from_secs(3));
    assert_eq!(config.read_mode(), ReadMode::Single);
    assert_eq!(config.output(), OutputShape::Plain);
    assert_eq!(config.log_filter(), "debug");
    Ok(())
}

#[test]
fn partial_yaml_falls_back_to_defaults() -> Result<()> {
    let file = write_config("host: inverter.local\n");

    let config = Config::new(file.path().to_str().unwrap())?;

    assert_eq!(config.host(), "inverter.local");
    assert_eq!(config.port(), 80);
    assert_eq!(config.read_mode(), ReadMode::Framed);
    Ok(())
}

#[test]
fn rejects_bad_files() {
    assert!(Config::new("/nonexistent/solarmax.yaml").is_err());

    let file = write_config("port: 0\n");
    assert!(Config::new(file.path().to_str().unwrap()).is_err());

    let file = write_config("read_mode: sometimes\n");
    assert!(Config::new(file.path().to_str().unwrap()).is_err());
}

#[test]
fn validate() {
    let mut config = Config::default();
    config.host = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.timeout = Duration::ZERO;
    assert!(config.validate().is_err());
}

#[test]
fn command_line_wins() {
    let options = Options::parse_from([
        "solarmax-metrics",
        "--host",
        "10.0.0.9",
        "-p",
        "12345",
        "-i",
        "7",
        "--metrics",
        "PAC,UDC",
        "-t",
        "2",
        "--read-mode",
        "single",
        "-o",
        "plain",
        "-l",
        "TRACE",
    ]);

    let mut config = Config::default();
    config.apply_options(&options);

    assert_eq!(config.host(), "10.0.0.9");
    assert_eq!(config.port(), 12345);
    assert_eq!(config.inverter(), InverterId(7));
    assert_eq!(config.metrics(), "PAC,UDC");
    assert_eq!(config.timeout(), Duration::from_secs(2));
    assert_eq!(config.read_mode(), ReadMode::Single);
    assert_eq!(config.output(), OutputShape::Plain);
    assert_eq!(config.log_filter(), "trace");
}

#[test]
fn absent_flags_keep_file_values() {
    let options = Options::parse_from(["solarmax-metrics", "-p", "8080"]);

    let mut config = Config::default();
    config.host = "inverter.local".to_string();
    config.apply_options(&options);

    assert_eq!(config.host(), "inverter.local");
    assert_eq!(config.port(), 8080);
    assert_eq!(options.mode, Mode::Query);
}

#[test]
fn modes() {
    let options = Options::parse_from(["solarmax-metrics", "-m", "ListMetrics"]);
    assert_eq!(options.mode, Mode::ListMetrics);

    let options = Options::parse_from(["solarmax-metrics", "--mode", "loop"]);
    assert_eq!(options.mode, Mode::Loop);

    assert!(Options::try_parse_from(["solarmax-metrics", "-m", "sometimes"]).is_err());
}

#[test]
fn unknown_loglevel_means_info() {
    let mut config = Config::default();

    config.loglevel = "verbose".to_string();
    assert_eq!(config.log_filter(), "info");

    config.loglevel = "Warn".to_string();
    assert_eq!(config.log_filter(), "warn");
}

#[test]
fn lists_metrics() -> Result<()> {
    let mut out = Vec::new();
    solarmax_metrics::list_metrics(&mut out)?;
    let out = String::from_utf8(out)?;

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), catalog::entries().len());
    assert!(lines.contains(&"PAC: AC Power (W)"));
    assert!(lines.contains(&"SE1: "));

    let codes: Vec<&str> = lines
        .iter()
        .map(|l| l.split_once(": ").unwrap().0)
        .collect();
    let mut sorted = codes.clone();
    sorted.sort();
    assert_eq!(codes, sorted);
    Ok(())
}

#[tokio::test]
async fn list_metrics_mode_runs_without_inverter() -> Result<()> {
    let options = Options::parse_from(["solarmax-metrics", "-m", "listmetrics"]);

    solarmax_metrics::app(options).await
}

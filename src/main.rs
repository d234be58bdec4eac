use anyhow::Result;

use solarmax_metrics::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let options = Options::new();

    solarmax_metrics::app(options).await
}

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Result};
use reqwest::Url;

const DEFAULT_HEALTH_URL: &str = "http://127.0.0.1:25566/health";

fn check(url: Url) -> Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;
    let response = client.get(url).send()?;
    if !response.status().is_success() {
        bail!("Health check returned {}", response.status())
    }
    Ok(())
}

fn main() -> ExitCode {
    let target = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_HEALTH_URL.to_string());

    let result = Url::parse(&target)
        .map_err(anyhow::Error::from)
        .and_then(check);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Unhealthy: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(author, version, about = "Request an email draft from a running mail_drafter server", long_about = None)]
struct Args {
    /// Base URL of the mail_drafter server
    #[arg(short, long, env = "MAIL_DRAFTER_URL", default_value = "http://127.0.0.1:25566")]
    server: String,

    /// What the email is about
    #[arg(short, long)]
    purpose: String,

    /// Name of the person receiving the email
    #[arg(short, long)]
    recipient_name: String,

    /// Tone of the email, e.g. friendly or formal
    #[arg(short, long)]
    tone: String,

    /// Seconds to wait for the server before giving up
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    purpose: &'a str,
    recipient_name: &'a str,
    tone: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    email: String,
    ai_response_time_ms: u64,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let purpose = args.purpose.trim();
    let recipient_name = args.recipient_name.trim();
    let tone = args.tone.trim();
    if purpose.is_empty() || recipient_name.is_empty() || tone.is_empty() {
        bail!("Please fill all fields");
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;
    let response = client
        .post(format!(
            "{}/api/email/generate",
            args.server.trim_end_matches('/')
        ))
        .json(&GenerateRequest {
            purpose,
            recipient_name,
            tone,
        })
        .send()?;

    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorResponse>()
            .map(|body| body.error)
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(anyhow!("Server returned {}: {}", status, message));
    }

    let body: GenerateResponse = response.json()?;
    println!(
        "{}\n\nAI Response Time: {} ms",
        body.email, body.ai_response_time_ms
    );
    Ok(())
}

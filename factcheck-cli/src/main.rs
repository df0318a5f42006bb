//! factcheck — CLI frontend for the FactCheck proxy
//!
//! Submits claims to a running factcheck-server, renders the verdict, and
//! keeps a rolling local history of past results.
//!
//! # Subcommands
//! - `check <claim> [--json] [--share]` — fact-check a claim and store the result
//! - `history [--more N] [--json]`      — browse past results, one page at a time
//! - `status`                           — show proxy server health

use clap::{Parser, Subcommand};
use factcheck_core::{
    classify, validate_claim, validation_error, ApiError, ErrorInfo, FactCheckResult, FileStorage,
    HistoryStore, Verdict,
};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8765";
const DEFAULT_HISTORY_DIR: &str = "~/.factcheck";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "factcheck",
    version,
    about = "Fact-check claims against the FactCheck proxy"
)]
struct Cli {
    /// FactCheck proxy server URL (overrides FACTCHECK_SERVER_URL env var)
    #[arg(long, env = "FACTCHECK_SERVER_URL", default_value = DEFAULT_SERVER)]
    server: String,

    /// Directory holding the persisted result history
    #[arg(long, env = "FACTCHECK_HISTORY_DIR", default_value = DEFAULT_HISTORY_DIR)]
    history_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fact-check a claim
    Check {
        /// The claim to verify
        claim: String,

        /// Output the raw result as JSON
        #[arg(long)]
        json: bool,

        /// Print a shareable plain-text block instead of the full view
        #[arg(long)]
        share: bool,
    },

    /// Show past results, newest first
    History {
        /// Reveal N additional pages beyond the first
        #[arg(long, default_value_t = 0)]
        more: usize,

        /// Output visible history as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show FactCheck proxy status
    Status,
}

// ============================================================================
// Rendering
// ============================================================================

/// Verdict with a leading status symbol.
pub fn verdict_badge(verdict: Verdict) -> String {
    let symbol = match verdict {
        Verdict::True => "✅",
        Verdict::False => "❌",
        Verdict::Unclear => "❓",
        Verdict::Disputed => "⚠️",
        Verdict::Rejected => "🚫",
    };
    format!("{} {}", symbol, verdict)
}

/// Ten-slot confidence bar: `[█████████░] 95%`
pub fn confidence_bar(confidence: u8) -> String {
    let filled = (confidence.min(100) as usize) / 10;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(10 - filled),
        confidence
    )
}

/// Full result view: claim, verdict, confidence, summary, reasoning, sources.
pub fn render_result(result: &FactCheckResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Claim:      {}\n", result.claim));
    out.push_str(&format!("Verdict:    {}\n", verdict_badge(result.verdict)));
    out.push_str(&format!("Confidence: {}\n", confidence_bar(result.confidence)));

    if let Some(summary) = &result.summary {
        out.push_str(&format!("\nTL;DR: {}\n", summary));
    }

    out.push_str(&format!("\n{}\n", result.reasoning));

    if !result.sources.is_empty() {
        out.push_str("\nSources:\n");
        for source in &result.sources {
            out.push_str(&format!("- {} ({})\n", source.title, source.url));
            if let Some(snippet) = &source.snippet {
                out.push_str(&format!("  {}\n", snippet));
            }
        }
    }

    out
}

/// Clipboard-style share block.
pub fn share_text(result: &FactCheckResult) -> String {
    let mut text = format!(
        "🧠 FactCheck AI\n\nClaim: {}\nVerdict: {}\nConfidence: {}%\n\nExplanation:\n{}",
        result.claim, result.verdict, result.confidence, result.reasoning
    );
    if !result.sources.is_empty() {
        text.push_str("\n\nSources:");
        for src in &result.sources {
            text.push_str(&format!("\n- {} ({})", src.title, src.url));
        }
    }
    text
}

/// One-line history entry.
pub fn history_line(index: usize, result: &FactCheckResult) -> String {
    format!(
        "{:>3}. [{} {}%] {}",
        index + 1,
        result.verdict,
        result.confidence,
        result.claim
    )
}

/// Error panel: message, optional suggestion, retry hint when retryable.
pub fn render_error(info: &ErrorInfo) -> String {
    let mut out = format!("factcheck: {}\n", info.message);
    if let Some(suggestion) = &info.suggestion {
        out.push_str(&format!("  {}\n", suggestion));
    }
    if info.retryable {
        out.push_str("  Run the same command again to retry.\n");
    }
    out
}

// ============================================================================
// HTTP Client Calls
// ============================================================================

/// Submit a claim to the proxy and decode the verdict.
fn submit_claim(server: &str, claim: &str) -> Result<FactCheckResult, ApiError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let url = format!("{}/api/factcheck", server);
    let resp = client
        .post(&url)
        .json(&serde_json::json!({ "claim": claim }))
        .send()?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        let details = serde_json::from_str::<serde_json::Value>(&body).ok();
        let message = details
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| "API error occurred".to_string());
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
            details,
        });
    }

    let body = resp.text()?;
    let result = serde_json::from_str(&body)?;
    Ok(result)
}

// ============================================================================
// Subcommands
// ============================================================================

fn open_history(dir: &str) -> HistoryStore<FileStorage> {
    let dir = shellexpand::tilde(dir).into_owned();
    HistoryStore::load(FileStorage::new(dir))
}

fn do_check(
    server: &str,
    history_dir: &str,
    claim: &str,
    json: bool,
    share: bool,
) -> anyhow::Result<()> {
    // Local validation first: empty or overlong claims never hit the network
    let claim = match validate_claim(claim) {
        Ok(c) => c,
        Err(e) => {
            eprint!("{}", render_error(&validation_error(e.to_string())));
            std::process::exit(1);
        }
    };

    let result = match submit_claim(server, &claim) {
        Ok(r) => r,
        Err(e) => {
            eprint!("{}", render_error(&classify(&e)));
            std::process::exit(1);
        }
    };

    let mut history = open_history(history_dir);
    if let Err(e) = history.push_front(result.clone()) {
        eprintln!("factcheck: warning: could not persist history: {}", e);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if share {
        println!("{}", share_text(&result));
    } else {
        print!("{}", render_result(&result));
    }

    Ok(())
}

fn do_history(history_dir: &str, more: usize, json: bool) -> anyhow::Result<()> {
    let mut history = open_history(history_dir);

    if history.is_empty() {
        println!("No fact-check history yet.");
        return Ok(());
    }

    for _ in 0..more {
        history.load_more();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(history.visible())?);
    } else {
        for (i, result) in history.visible().iter().enumerate() {
            println!("{}", history_line(i, result));
        }
        let hidden = history.hidden_count();
        if hidden > 0 {
            println!("({} more — rerun with --more {})", hidden, more + 1);
        }
    }

    Ok(())
}

/// Show the server status by calling GET /health.
fn do_status(server: &str) -> anyhow::Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let url = format!("{}/health", server);
    let resp = client.get(&url).send();

    match resp {
        Ok(r) if r.status().is_success() => {
            let body: serde_json::Value = r.json().unwrap_or_default();
            println!(
                "FactCheck proxy: {}",
                body["status"].as_str().unwrap_or("unknown")
            );
            println!("Version:         {}", body["version"].as_str().unwrap_or("?"));
            println!("Backend:         {}", body["backend"].as_str().unwrap_or("?"));
        }
        Ok(r) => {
            let status = r.status();
            eprintln!("factcheck: server unhealthy (HTTP {})", status);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("factcheck: cannot reach {} — {}", url, e);
            std::process::exit(1);
        }
    }

    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let cli = Cli::parse();
    let server = cli.server.trim_end_matches('/').to_string();

    let result = match cli.command {
        Commands::Check { claim, json, share } => {
            do_check(&server, &cli.history_dir, &claim, json, share)
        }
        Commands::History { more, json } => do_history(&cli.history_dir, more, json),
        Commands::Status => do_status(&server),
    };

    if let Err(e) = result {
        eprintln!("factcheck: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================

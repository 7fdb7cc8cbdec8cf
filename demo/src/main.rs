//! reqlog demo CLI
//!
//! Runs scripted requests through a `RequestLogger` and prints the records it
//! emits. Each scenario shows one part of the pipeline: body masking, token
//! introspection, content-type handling, path exclusion, execution
//! annotations and hashing.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- login --hash-response-data
//!   cargo run -p demo -- --config reqlog.toml pdf
//!   RUST_LOG=reqlog=info cargo run -p demo -- --tracing annotated

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use reqlog_contracts::{config::LoggerConfig, error::ReqlogResult, http::CapturedResponse};
use reqlog_core::RequestLogger;
use reqlog_sink::{InMemoryLogSink, TracingLogSink};

mod scenarios;

// ── CLI definition ────────────────────────────────────────────────────────────

/// reqlog: structured request/response logging demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "reqlog request logging demo",
    long_about = "Runs scripted HTTP exchanges through the reqlog pipeline and prints\n\
                  the structured record emitted for each logged request."
)]
struct Cli {
    /// TOML file with logger settings (top level or under [reqlog]).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also hash `response.data` in emitted records.
    #[arg(long, global = true)]
    hash_response_data: bool,

    /// Emit records through `tracing` instead of printing them.
    #[arg(long, global = true)]
    tracing: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every scenario in sequence.
    RunAll,
    /// GET with no body.
    Get,
    /// POST with a password in the body and a bearer token.
    Login,
    /// Binary PDF response.
    Pdf,
    /// Request on an excluded path: nothing is emitted.
    Excluded,
    /// Handler that adds task info, log steps and timing steps.
    Annotated,
    /// Handler that fails: the error propagates and nothing is emitted.
    Failing,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .compact()
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    };

    print_banner(&config);

    let sink = InMemoryLogSink::new();
    let logger = if cli.tracing {
        RequestLogger::new(config, Box::new(TracingLogSink::new()))
    } else {
        RequestLogger::new(config, Box::new(sink.clone()))
    };

    let selected: Vec<(&str, Scenario)> = match cli.command {
        Command::RunAll => vec![
            ("GET /foo", scenarios::plain_get as Scenario),
            ("POST /login", scenarios::login as Scenario),
            ("GET /invoices/42/pdf", scenarios::pdf_download as Scenario),
            ("GET /health/live", scenarios::health_check as Scenario),
            ("POST /reports", scenarios::annotated_report as Scenario),
            ("POST /reports (bad body)", scenarios::failing_handler as Scenario),
        ],
        Command::Get => vec![("GET /foo", scenarios::plain_get as Scenario)],
        Command::Login => vec![("POST /login", scenarios::login as Scenario)],
        Command::Pdf => vec![("GET /invoices/42/pdf", scenarios::pdf_download as Scenario)],
        Command::Excluded => vec![("GET /health/live", scenarios::health_check as Scenario)],
        Command::Annotated => vec![("POST /reports", scenarios::annotated_report as Scenario)],
        Command::Failing => vec![(
            "POST /reports (bad body)",
            scenarios::failing_handler as Scenario,
        )],
    };

    for (label, scenario) in selected {
        println!("=== {} ===", label);
        match scenario(&logger) {
            Ok(response) => println!("handler returned {}", response.status_code),
            Err(e) => println!("handler failed: {}", e),
        }

        let emitted = sink.take();
        if emitted.is_empty() {
            if !cli.tracing {
                println!("(no record emitted)");
            }
        } else {
            for record in emitted {
                match serde_json::to_string_pretty(&record.record) {
                    Ok(json) => println!("[{}] {}\n{}", record.level, record.message, json),
                    Err(e) => eprintln!("could not render record: {}", e),
                }
            }
        }
        println!();
    }
}

type Scenario = fn(&RequestLogger) -> Result<CapturedResponse, scenarios::HandlerError>;

// ── Configuration ─────────────────────────────────────────────────────────────

/// The file's settings, or a demo default that excludes `/health`.
fn load_config(cli: &Cli) -> ReqlogResult<LoggerConfig> {
    let mut config = match &cli.config {
        Some(path) => reqlog_config::from_file(path)?,
        None => LoggerConfig {
            app_name: "reqlog-demo".to_string(),
            excluded_paths: vec!["/health".to_string()],
            key_paths_to_hash: vec![vec![
                "request".to_string(),
                "headers".to_string(),
                "Authorization".to_string(),
            ]],
            sensitive_keys: vec!["token".to_string()],
            git_sha: option_env!("REQLOG_GIT_SHA").map(str::to_string),
            ..LoggerConfig::default()
        },
    };
    if cli.hash_response_data {
        config.hash_response_data = true;
    }
    Ok(config)
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner(config: &LoggerConfig) {
    println!();
    println!("reqlog: request/response logging demo");
    println!("=====================================");
    println!();
    println!("Pipeline per request:");
    println!("  [1] Gate: enabled and path not under {:?}", config.excluded_paths);
    println!("  [2] Request described; body masked for {:?}", config.sensitive_fragments());
    println!("  [3] Handler runs with its own ExecutionLog");
    println!("  [4] Response described by content type");
    println!("  [5] Key-paths hashed: {:?}", config.hash_key_paths());
    println!("  [6] Annotations merged, record emitted at {}", config.level);
    println!();
}

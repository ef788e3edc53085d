//! Binary entry point for the DBOptima advice service.
#![forbid(unsafe_code)]

use std::error::Error;
use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dboptima::{
    analysis,
    model::{AnalysisRequest, AnalysisResult},
    server::{self, ServerOptions},
};

#[path = "dboptima/config.rs"]
mod config;
use config::CliConfig;

#[derive(Parser, Debug)]
#[command(
    name = "dboptima",
    version,
    about = "SQL query advice service and offline analyzer",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for structured responses"
    )]
    format: OutputFormat,

    #[arg(
        long,
        global = true,
        env = "DBOPTIMA_CONFIG",
        value_name = "FILE",
        help = "Path to the CLI config file"
    )]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP advice service.
    Serve(ServeCmd),
    /// Analyze a query once and print the report.
    Analyze(AnalyzeCmd),
}

#[derive(Args, Debug)]
struct ServeCmd {
    #[arg(long, help = "Network interface to bind")]
    host: Option<IpAddr>,

    #[arg(long, help = "Listening port")]
    port: Option<u16>,

    #[arg(
        long = "allow-origin",
        value_name = "ORIGIN",
        help = "CORS origin allowed to call the service (repeatable)"
    )]
    allow_origins: Vec<String>,
}

#[derive(Args, Debug)]
struct AnalyzeCmd {
    #[arg(value_name = "QUERY", help = "SQL text to analyze")]
    query: String,

    #[arg(
        long,
        default_value = "postgresql",
        help = "Target engine hint recorded in the request"
    )]
    database_type: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(cmd) => {
            let file = CliConfig::load(cli.config.clone())?;
            let options = build_server_options(&cmd, &file);
            if let Err(err) = server::serve(options).await {
                eprintln!("advice server terminated: {err}");
                return Err(Box::new(err));
            }
        }
        Command::Analyze(cmd) => {
            let request = AnalysisRequest {
                query: cmd.query,
                database_type: cmd.database_type,
                schema_info: None,
            };
            let report = analysis::analyze(&request)?;
            emit(&cli.format, &report, |_| print_report_text(&report))?;
        }
    }

    Ok(())
}

fn build_server_options(cmd: &ServeCmd, file: &CliConfig) -> ServerOptions {
    let mut options = ServerOptions::default();

    if let Some(host) = file.host() {
        options.host = host;
    }
    if let Some(port) = file.port() {
        options.port = port;
    }
    options.allow_origins = file.allow_origins().to_vec();

    if let Some(host) = cmd.host {
        options.host = host;
    }
    if let Some(port) = cmd.port {
        options.port = port;
    }
    if !cmd.allow_origins.is_empty() {
        options.allow_origins = cmd.allow_origins.clone();
    }

    options
}

fn emit<T, F>(format: &OutputFormat, value: &T, printer: F) -> Result<(), Box<dyn Error>>
where
    T: serde::Serialize,
    F: Fn(OutputFormat),
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{json}");
        }
        OutputFormat::Text => printer(OutputFormat::Text),
    }
    Ok(())
}

fn print_report_text(report: &AnalysisResult) {
    println!(
        "Complexity: {}/100 (estimated improvement {}%)",
        report.complexity_score, report.estimated_improvement
    );
    print_section("Improvements", &report.improvements);
    print_section("Issues", &report.issues);
    print_section("Index recommendations", &report.index_recommendations);
    print_section("Rewrite suggestions", &report.rewrite_suggestions);
}

fn print_section(title: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    println!("{title}:");
    for entry in entries {
        println!("  - {entry}");
    }
}

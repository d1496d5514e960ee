use billpay::application::engine::ProcessingEngine;
use billpay::infrastructure::audit::JsonFileAuditLog;
use billpay::infrastructure::invoice::TextInvoiceRenderer;
use billpay::interfaces::http;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to serve the HTTP API on
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// Directory where rendered invoices are placed
    #[arg(long, default_value = "invoices")]
    invoices_dir: PathBuf,

    /// Path of the daily transaction log file
    #[arg(long, default_value = "daily_transactions.json")]
    audit_log: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tokio::fs::create_dir_all(&cli.invoices_dir)
        .await
        .into_diagnostic()?;

    let renderer = Arc::new(TextInvoiceRenderer::new(&cli.invoices_dir));
    let audit_log = Arc::new(JsonFileAuditLog::new(&cli.audit_log));
    let engine = Arc::new(ProcessingEngine::new(renderer, audit_log));

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .into_diagnostic()?;
    http::serve(listener, engine).await.into_diagnostic()?;

    Ok(())
}

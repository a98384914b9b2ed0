//! # Cotizador
//!
//! Interactive rental quote generator.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  config ──► tracing ──► Store::open ──► form ──► QuoteService::submit   │
//! │                                           ▲              │              │
//! │                                           └── Rejected ──┘              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failing run logs the error with its code and exits with
//! `Error: Quote pipeline failed [IO_ERROR]` followed by the cause.

use anyhow::Context;
use chrono::Local;
use cotizador_cli::form::prompt_form;
use cotizador_cli::{AppConfig, AppResult, QuoteService, Submission};
use cotizador_core::QuoteForm;
use cotizador_store::Store;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.log_filter);

    info!(
        folio_path = %config.folio_path.display(),
        ledger_path = %config.ledger_path.display(),
        output_path = %config.output_path.display(),
        "Configuration loaded"
    );

    run(&config).map_err(|err| {
        let code = err.code();
        error!(code = %code, error = %err, "Quote pipeline failed");
        anyhow::Error::new(err).context(format!("Quote pipeline failed [{code}]"))
    })
}

fn run(config: &AppConfig) -> AppResult<()> {
    let (folios, ledger) = Store::open(config.store_config())?.into_parts();
    let mut service = QuoteService::new(folios, ledger, config.renderer());

    let today = Local::now().date_naive();
    let mut form = QuoteForm::new(today);

    loop {
        let submitted = prompt_form(&form)?;

        match service.submit(submitted.as_ref(), today)? {
            Submission::NotSubmitted => {
                println!("Cotización cancelada.");
                break;
            }
            Submission::Rejected(errors) => {
                println!("Por favor completa todos los campos obligatorios:");
                for error in &errors {
                    println!("  - {error}");
                }
                if let Some(previous) = submitted {
                    form = previous;
                }
            }
            Submission::Issued(issued) => {
                println!("{}", issued.message());
                println!(
                    "{}  Total: {}  Documento: {}",
                    issued.quote.folio,
                    issued.quote.total,
                    issued.document.path.display()
                );
                break;
            }
        }
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

//! Cotizador configuration module.
//!
//! Configuration is layered: built-in defaults, then an optional
//! `cotizador.toml` in the working directory, then `COTIZADOR_*` environment
//! variables (`COTIZADOR_LEDGER_PATH=/srv/clientes.csv`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use cotizador_render::PdfRenderer;
use cotizador_store::StoreConfig;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Name of the optional configuration file, without extension.
pub const CONFIG_FILE: &str = "cotizador";

/// Prefix of overriding environment variables.
pub const ENV_PREFIX: &str = "COTIZADOR";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Folio counter file
    pub folio_path: PathBuf,

    /// Ledger CSV file
    pub ledger_path: PathBuf,

    /// Rendered quote, overwritten on every issue
    pub output_path: PathBuf,

    /// Logo placed on the document when present
    pub logo_path: PathBuf,

    /// Default tracing filter (RUST_LOG wins when set)
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from `cotizador.toml` and the environment.
    pub fn load() -> AppResult<Self> {
        Self::build(File::with_name(CONFIG_FILE).required(false))
    }

    /// Load configuration using an explicit file instead of `cotizador.toml`.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        Self::build(File::from(path).required(false))
    }

    fn build<S>(file: S) -> AppResult<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .set_default("folio_path", "folio.txt")?
            .set_default("ledger_path", "clientes.csv")?
            .set_default("output_path", "cotizacion.pdf")?
            .set_default("logo_path", "logo_mcsi.png")?
            .set_default("log_filter", "info")?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// File locations for the store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new("")
            .folio_path(&self.folio_path)
            .ledger_path(&self.ledger_path)
    }

    /// Renderer writing to the configured output, with the configured logo.
    pub fn renderer(&self) -> PdfRenderer {
        PdfRenderer::new(&self.output_path).with_logo(&self.logo_path)
    }
}

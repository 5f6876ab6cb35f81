//! Log output for the `symres` binary.
//!
//! Logging stays off unless `SYMRES_LOG` or `RUST_LOG` carries a filter, for
//! example `SYMRES_LOG=symres_overrides=debug`. `SYMRES_LOG_FORMAT` picks the
//! output: `text`, `tree` (indented spans, handy for following the context
//! tower and recursive supertype resolution) or `json`. Everything goes to
//! stderr, leaving stdout to the printed declarations.

use anyhow::Result;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

const FILTER_VAR: &str = "SYMRES_LOG";
const FALLBACK_FILTER_VAR: &str = "RUST_LOG";
const FORMAT_VAR: &str = "SYMRES_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// What `init_tracing` installs, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogSettings {
    /// `None` disables logging.
    pub filter: Option<String>,
    pub format: LogFormat,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `SYMRES_LOG` wins over `RUST_LOG`; a blank filter counts as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = [FILTER_VAR, FALLBACK_FILTER_VAR]
            .into_iter()
            .filter_map(&lookup)
            .find(|filter| !filter.trim().is_empty());
        let format = lookup(FORMAT_VAR)
            .as_deref()
            .map_or_else(LogFormat::default, LogFormat::parse);
        Self { filter, format }
    }

    pub fn enabled(&self) -> bool {
        self.filter.is_some()
    }
}

type Filtered = Layered<EnvFilter, Registry>;

/// Installs the global subscriber described by `settings`.
///
/// Does nothing when logging is disabled; fails if a subscriber is already
/// installed.
pub fn init_tracing(settings: &LogSettings) -> Result<()> {
    let Some(filter) = &settings.filter else {
        return Ok(());
    };
    let output: Box<dyn Layer<Filtered> + Send + Sync> = match settings.format {
        LogFormat::Tree => tracing_tree::HierarchicalLayer::default()
            .with_indent_amount(2)
            .with_indent_lines(true)
            .with_deferred_spans(true)
            .with_targets(true)
            .boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
    };
    Registry::default()
        .with(EnvFilter::builder().parse_lossy(filter))
        .with(output)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tests;

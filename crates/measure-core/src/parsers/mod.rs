//! Stats parsers: one adapter per bundler family.
//!
//! Every parser turns a tool-specific JSON artifact into [`BundleData`]
//! behind the same [`StatsParser`] contract. The orchestrator picks the
//! parser for a project through a [`ParserRegistry`] keyed by
//! [`BundlerFamily`].

mod nextjs;
mod vite;

pub use nextjs::NextjsStatsParser;
pub use vite::ViteStatsParser;

use crate::model::{BundleData, BundlerFamily};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Converts one bundler's stats artifact into the canonical model.
pub trait StatsParser: Send + Sync {
    /// The family this parser understands.
    fn family(&self) -> BundlerFamily;

    /// Parse the stats file at `stats_path` for `project`.
    fn parse(&self, project: &str, stats_path: &Path) -> Result<BundleData>;

    /// Message appended to "stats file not found" errors.
    fn missing_hint(&self) -> &'static str;
}

/// Dispatch table from bundler family to parser.
#[derive(Clone)]
pub struct ParserRegistry {
    parsers: HashMap<BundlerFamily, Arc<dyn StatsParser>>,
}

impl ParserRegistry {
    /// A registry with no parsers.
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Register (or replace) the parser for its family.
    pub fn register(mut self, parser: Arc<dyn StatsParser>) -> Self {
        self.parsers.insert(parser.family(), parser);
        self
    }

    pub fn get(&self, family: BundlerFamily) -> Option<&Arc<dyn StatsParser>> {
        self.parsers.get(&family)
    }

    /// Parse with the parser registered for `family`.
    ///
    /// Fails with [`Error::UnknownProjectType`] when none is registered.
    pub fn parse(&self, family: BundlerFamily, project: &str, stats_path: &Path) -> Result<BundleData> {
        let parser = self
            .get(family)
            .ok_or_else(|| Error::UnknownProjectType(family.to_string()))?;
        parser.parse(project, stats_path)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::empty()
            .register(Arc::new(NextjsStatsParser))
            .register(Arc::new(ViteStatsParser))
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut families: Vec<_> = self.parsers.keys().collect();
        families.sort();
        f.debug_struct("ParserRegistry")
            .field("families", &families)
            .finish()
    }
}

/// Read and deserialize a stats file, mapping failures to parser errors.
pub(crate) fn read_stats<T: DeserializeOwned>(path: &Path, missing_hint: &str) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::StatsNotFound {
                path: path.to_path_buf(),
                hint: missing_hint.to_string(),
            }
        } else {
            Error::io(path, e)
        }
    })?;
    parse_stats(path, &content)
}

/// Deserialize already-loaded stats content.
///
/// Syntax errors become [`Error::MalformedJson`]; well-formed JSON of the
/// wrong shape becomes [`Error::InvalidStats`].
pub(crate) fn parse_stats<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|e| {
        if e.is_syntax() || e.is_eof() {
            Error::MalformedJson {
                path: path.to_path_buf(),
                source: e,
            }
        } else {
            Error::InvalidStats {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    })
}

/// Percentage of `part` in `whole`, zero when `whole` is zero.
pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Percent-of-chunk uses 1 as the denominator for zero-sized chunks.
pub(crate) fn percent_of_chunk(part: u64, chunk_size: u64) -> f64 {
    percent(part, chunk_size.max(1))
}

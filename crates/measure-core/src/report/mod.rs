//! CSV size reports.
//!
//! [`write_reports`] renders two files from the successful bundles of a run:
//!
//! - a flat report with one row per module ([`flat`])
//! - a three-level hierarchy of project, package group and module ([`tree`])
//!
//! The hierarchy lands next to the flat file with a `-tree` suffix before
//! the extension.

pub mod flat;
pub mod tree;

pub use flat::{FlatRow, write_flat};
pub use tree::{TreeNode, build_tree, write_tree};

use crate::model::BundleData;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Report generation errors.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// No successful build produced data to report.
    #[error("No bundle data to report")]
    NoBundles,

    /// Output file could not be created or written.
    #[error("Failed to write report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Row serialization failed.
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Locations of the two generated reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub flat: PathBuf,
    pub tree: PathBuf,
}

/// Write the flat report to `flat_path` and the hierarchy beside it.
///
/// Parent directories are created as needed. Nothing is written when
/// `bundles` is empty.
pub fn write_reports(
    bundles: &[BundleData],
    flat_path: impl AsRef<Path>,
) -> Result<ReportPaths, ReportError> {
    if bundles.is_empty() {
        tracing::error!("no successful builds; skipping report generation");
        return Err(ReportError::NoBundles);
    }

    let paths = ReportPaths {
        flat: flat_path.as_ref().to_path_buf(),
        tree: tree_output_path(flat_path.as_ref()),
    };

    write_file(&paths.flat, |w| write_flat(bundles, w))?;
    write_file(&paths.tree, |w| write_tree(bundles, w))?;

    tracing::info!(
        flat = %paths.flat.display(),
        tree = %paths.tree.display(),
        "reports written"
    );
    Ok(paths)
}

/// `dir/name.ext` becomes `dir/name-tree.ext`; `name` becomes `name-tree`.
pub fn tree_output_path(flat_path: &Path) -> PathBuf {
    let stem = flat_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match flat_path.extension() {
        Some(ext) => format!("{}-tree.{}", stem, ext.to_string_lossy()),
        None => format!("{}-tree", stem),
    };
    flat_path.with_file_name(file_name)
}

fn write_file<F>(path: &Path, render: F) -> Result<(), ReportError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), ReportError>,
{
    let io_err = |source: std::io::Error| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    render(&mut writer)?;
    writer.flush().map_err(io_err)
}

/// CSV writer shared by both reports: minimal quoting, `\n` records.
///
/// Headers are written explicitly so that a report without rows still
/// carries its header line.
pub(crate) fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer)
}

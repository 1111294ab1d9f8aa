//! Command implementations behind the `script-analyzer` binary.
//!
//! Everything here returns strings or reports so the binary only parses
//! arguments, sets up logging and prints.

use std::{
    fmt::{self, Display, Formatter, Write as _},
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use rayon::prelude::*;
use serde::Serialize;
use text_size::TextSize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    config::{ConfigError, SearchSettings},
    position::{
        Element, EngineKind, PositionService, TokenAtOptions, TokenSnapshot, children_of,
        divergence::{Divergence, option_grid},
        stats::StatsSnapshot,
    },
    syntax::{DocumentTrees, NodeId, SyntaxTree},
};

pub const SOURCE_EXTENSION: &str = "ts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffsetError {
    BeyondText {
        offset: u32,
        len: usize,
    },
    NotCharBoundary {
        offset: u32,
    },
}

impl Display for OffsetError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::BeyondText {
                offset,
                len,
            } => write!(f, "offset {offset} is past the end of the text ({len} bytes)"),
            Self::NotCharBoundary {
                offset,
            } => write!(f, "offset {offset} is inside a multi-byte character"),
        }
    }
}

impl std::error::Error for OffsetError {}

/// Validates a user-supplied byte offset against `text`.
pub fn checked_offset(
    text: &str,
    offset: u32,
) -> Result<TextSize, OffsetError> {
    let index = offset as usize;
    if index > text.len() {
        return Err(OffsetError::BeyondText {
            offset,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(index) {
        return Err(OffsetError::NotCharBoundary {
            offset,
        });
    }
    Ok(TextSize::from(offset))
}

#[derive(Debug)]
pub enum CliError {
    Io {
        path: PathBuf,
        reason: String,
    },
    Config(ConfigError),
    Offset(OffsetError),
    Json(serde_json::Error),
}

impl Display for CliError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Io {
                path,
                reason,
            } => write!(f, "failed to read {}: {reason}", path.display()),
            Self::Config(error) => write!(f, "{error}"),
            Self::Offset(error) => write!(f, "{error}"),
            Self::Json(error) => write!(f, "failed to encode output: {error}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io {
                ..
            } => None,
            Self::Config(error) => Some(error),
            Self::Offset(error) => Some(error),
            Self::Json(error) => Some(error),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

impl From<OffsetError> for CliError {
    fn from(error: OffsetError) -> Self {
        Self::Offset(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

pub fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|error| CliError::Io {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })
}

/// Reads and parses a file, then validates `offset` against its text.
pub fn load_at(
    path: &Path,
    offset: u32,
) -> Result<(SyntaxTree, TextSize), CliError> {
    let text = read_source(path)?;
    let offset = checked_offset(&text, offset)?;
    Ok((SyntaxTree::parse(&text), offset))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One lookup result. `None` prints as `none` or JSON `null`.
pub fn render_snapshot(
    snapshot: Option<&TokenSnapshot>,
    format: OutputFormat,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Text => Ok(match snapshot {
            Some(snapshot) => snapshot.to_string(),
            None => "none".to_string(),
        }),
    }
}

/// Innermost declared node whose full span holds `offset`.
pub fn containing_node(
    tree: &SyntaxTree,
    offset: TextSize,
) -> NodeId {
    let found = EngineKind::Reference.engine().descend(
        tree,
        offset,
        TokenAtOptions {
            allow_position_in_leading_trivia: true,
            include_end_position: true,
            include_preceding_token_at_end_position: None,
        },
    );
    match found {
        Element::Node(id) if tree.kind(id).is_token() => tree.parent(id).unwrap_or(id),
        Element::Node(id) => id,
        Element::Token(token) => token.parent,
        Element::List(list) => list.parent,
    }
}

/// The containing node followed by one indented line per materialized child.
pub fn render_children(
    tree: &SyntaxTree,
    offset: TextSize,
) -> String {
    let node = containing_node(tree, offset);
    let mut out = String::new();
    let _ = writeln!(out, "{}", describe(tree, &Element::Node(node)));
    for child in children_of(tree, &Element::Node(node)).iter() {
        let _ = writeln!(out, "  {}", describe(tree, child));
    }
    out
}

/// Tokens print with their text, nodes and lists with their span only.
fn describe(
    tree: &SyntaxTree,
    element: &Element,
) -> String {
    if element.is_token(tree) {
        return element.snapshot(tree).to_string();
    }
    format!("{:?}@{}..{}", element.kind(tree), u32::from(element.pos(tree)), u32::from(element.end(tree)))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    pub offsets: u32,
    pub whitelisted: u64,
    pub divergences: Vec<Divergence>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyReport {
    pub files: Vec<FileReport>,
    /// Files left unchecked after `fail_fast` stopped the run.
    pub skipped: usize,
    pub stats: StatsSnapshot,
}

impl VerifyReport {
    pub fn divergence_count(&self) -> usize {
        self.files.iter().map(|file| file.divergences.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.divergence_count() == 0
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            for divergence in &file.divergences {
                let _ = writeln!(
                    out,
                    "{}:{}: reference={} fast={}",
                    file.path.display(),
                    divergence.offset,
                    display_or_none(divergence.reference.as_ref()),
                    display_or_none(divergence.fast.as_ref()),
                );
            }
        }
        let whitelisted: u64 = self.files.iter().map(|file| file.whitelisted).sum();
        let _ = write!(
            out,
            "checked {} file(s), {} divergence(s), {} whitelisted, {} skipped",
            self.files.len(),
            self.divergence_count(),
            whitelisted,
            self.skipped,
        );
        out
    }
}

fn display_or_none(snapshot: Option<&TokenSnapshot>) -> String {
    snapshot.map_or_else(|| "none".to_string(), ToString::to_string)
}

/// `root` itself when it is a file, otherwise every source file under it,
/// sorted.
pub fn collect_sources(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!("Skipping unreadable entry under {}: {error}", root.display());
                continue;
            },
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    files
}

/// Differential check of both engines over every offset of every source file
/// under `root`.
///
/// Files are parsed and checked in parallel. With `fail_fast`, workers stop
/// picking up new files once one file reported a divergence outside the
/// doc comment zone.
pub fn verify(
    root: &Path,
    settings: &SearchSettings,
    fail_fast: bool,
) -> Result<VerifyReport, CliError> {
    let started = Instant::now();
    let sources = collect_sources(root);
    info!("Verifying {} source file(s) under {}", sources.len(), root.display());

    let store = DocumentTrees::new();
    sources.par_iter().try_for_each(|path| -> Result<(), CliError> {
        let text = read_source(path)?;
        store.parse_and_store(path, &text);
        Ok(())
    })?;

    // Cross-checks are issued explicitly below.
    let service = PositionService::new(SearchSettings {
        cross_check: false,
        ..settings.clone()
    });
    let cancelled = AtomicBool::new(false);
    let paths = store.paths();
    let files: Vec<FileReport> = paths
        .par_iter()
        .filter_map(|path| {
            if cancelled.load(Ordering::Relaxed) {
                debug!("Skipping {} after an earlier divergence", path.display());
                return None;
            }
            let tree = store.get(path)?;
            let report = check_file(path, &tree, &service);
            if fail_fast && !report.divergences.is_empty() {
                cancelled.store(true, Ordering::Relaxed);
            }
            Some(report)
        })
        .collect();

    service.stats().log_summary();
    info!(
        "[perf][verify] files={}, elapsed_ms={}",
        files.len(),
        started.elapsed().as_millis()
    );
    Ok(VerifyReport {
        skipped: paths.len() - files.len(),
        files,
        stats: service.stats().snapshot(),
    })
}

fn check_file(
    path: &Path,
    tree: &SyntaxTree,
    service: &PositionService,
) -> FileReport {
    let text = tree.text();
    let grid = option_grid();
    let mut report = FileReport {
        path: path.to_path_buf(),
        offsets: 0,
        whitelisted: 0,
        divergences: Vec::new(),
    };

    for index in (0..=text.len()).filter(|&index| text.is_char_boundary(index)) {
        let Ok(offset) = TextSize::try_from(index) else {
            break;
        };
        report.offsets += 1;
        for &options in &grid {
            service.token_at(tree, offset, options);
            record(&mut report, service.cross_check(tree, offset, options));
        }
        service.touching_property_name(tree, offset);
        record(&mut report, service.cross_check_touching(tree, offset));
    }
    debug!(
        "Checked {} ({} offsets, {} divergence(s))",
        path.display(),
        report.offsets,
        report.divergences.len()
    );
    report
}

fn record(
    report: &mut FileReport,
    divergence: Option<Divergence>,
) {
    match divergence {
        Some(divergence) if divergence.whitelisted => report.whitelisted += 1,
        Some(divergence) => report.divergences.push(divergence),
        None => {},
    }
}

#[cfg(test)]
#[path = "../tests/src/cli_tests.rs"]
mod tests;

//! JSON snapshot files.
//!
//! Snapshots use four-space indentation and keep non-ASCII text as UTF-8.

use std::fs;
use std::path::Path;

use gather_common::{GatherError, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{info, warn};

use crate::model::{ScrapeReport, ScrapeResult};

/// Serialize a snapshot to bytes.
pub fn render_snapshot(result: &ScrapeResult) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    result.serialize(&mut ser)?;
    Ok(buf)
}

/// Write a snapshot to `path`, creating parent directories as needed.
pub fn write_snapshot(path: &Path, result: &ScrapeResult) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GatherError::output(parent, e))?;
    }
    let bytes = render_snapshot(result)?;
    fs::write(path, bytes).map_err(|e| GatherError::output(path, e))?;
    info!(
        target: "gather.output",
        path = %path.display(),
        events = result.events.len(),
        "snapshot written"
    );
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<ScrapeResult> {
    let raw = fs::read(path).map_err(|e| GatherError::output(path, e))?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Persist a report unless the page had no containers at all and
/// `write_empty` is off. Returns whether a file was written.
pub fn write_report(path: &Path, report: &ScrapeReport, write_empty: bool) -> Result<bool> {
    if report.found_no_containers() && !write_empty {
        warn!(
            target: "gather.output",
            path = %path.display(),
            "no event containers on the page; keeping the previous snapshot"
        );
        return Ok(false);
    }
    write_snapshot(path, &report.result)?;
    Ok(true)
}

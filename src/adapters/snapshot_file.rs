//! Proposal snapshots stored as a JSON array.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::domain::{AppError, Proposal};

pub fn load_snapshot(path: &Path) -> Result<Vec<Proposal>, AppError> {
    let content = fs::read_to_string(path)?;
    let proposals: Vec<Proposal> = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), count = proposals.len(), "snapshot loaded");
    Ok(proposals)
}

pub fn render_snapshot(proposals: &[Proposal]) -> Result<String, AppError> {
    let mut rendered = serde_json::to_string_pretty(proposals)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write the snapshot to `path`, or to stdout when `path` is `None`.
pub fn write_snapshot(path: Option<&Path>, proposals: &[Proposal]) -> Result<(), AppError> {
    let rendered = render_snapshot(proposals)?;
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), count = proposals.len(), "snapshot written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

//! Report file naming and atomic JSON writes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

/// Lower-cased topic with spaces and `/` replaced by `_`.
pub(crate) fn topic_slug(topic: &str) -> String {
    topic
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '/' { '_' } else { c })
        .collect()
}

pub(crate) fn report_path(output_dir: &Path, topic: &str) -> PathBuf {
    output_dir.join(format!("search_{}.json", topic_slug(topic)))
}

/// Writes `value` as pretty JSON next to `path`, then renames it into place.
///
/// Readers never observe a partially written report.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move report into {}", path.display()))?;
    Ok(())
}

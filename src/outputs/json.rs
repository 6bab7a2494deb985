//! JSON file output.
//!
//! Envelopes are written pretty-printed with two-space indentation to
//! `{out_dir}/{key}.json`. Existing files are overwritten in place; there is
//! no temp-file-and-rename, so a crash mid-write can leave a truncated file.
//!
//! ```text
//! assets/news/
//! ├── aapl.json        # keyed by ticker (bulk)
//! ├── apple-inc.json   # keyed by company slug
//! └── msft.json
//! ```

use crate::error::NewsError;
use crate::models::NewsEnvelope;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `envelope` to `{out_dir}/{key}.json`, creating `out_dir` if needed.
///
/// # Returns
///
/// The path that was written.
#[instrument(level = "info", skip(envelope), fields(out_dir = %out_dir.display()))]
pub async fn write_envelope(
    envelope: &NewsEnvelope,
    out_dir: &Path,
    key: &str,
) -> Result<PathBuf, NewsError> {
    let json = serde_json::to_string_pretty(envelope)?;

    if let Err(e) = fs::create_dir_all(out_dir).await {
        error!(error = %e, "Failed to create output dir");
        return Err(e.into());
    }

    let path = out_dir.join(format!("{key}.json"));
    fs::write(&path, json).await?;
    info!(path = %path.display(), count = envelope.count, "Wrote JSON file");

    Ok(path)
}

//! Single-company fetch: one Google News query written to
//! `{out_dir}/{slug}.json`.

use crate::error::NewsError;
use crate::http::Fetch;
use crate::models::NewsEnvelope;
use crate::outputs::json::write_envelope;
use crate::sources::fetch_news;
use crate::sources::google_news::GoogleNews;
use crate::utils::slugify;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Fetch news for `company` and write it keyed by the company slug.
///
/// The output directory is only touched once the fetch has succeeded, so a
/// failed fetch leaves no file behind.
#[instrument(level = "info", skip(fetcher, out_dir))]
pub async fn fetch_company<F>(
    fetcher: &F,
    company: &str,
    count: usize,
    out_dir: &Path,
) -> Result<PathBuf, NewsError>
where
    F: Fetch + Sync,
{
    let items = fetch_news(fetcher, &GoogleNews, company, count).await?;
    let envelope = NewsEnvelope::for_company(company, items);
    let path = write_envelope(&envelope, out_dir, &slugify(company)).await?;
    println!("Wrote {} items to {}", envelope.count, path.display());
    Ok(path)
}

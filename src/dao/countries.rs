//! Country catalog bootstrap: disk cache first, upstream ISO map as fallback.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::dao::models::CountryEntry;

/// A cache or freshly built catalog below this size is rejected as incomplete.
const MIN_CATALOG_LEN: usize = 200;

/// Obsolete alpha-2 codes excluded from the catalog (e.g. Netherlands Antilles).
const BLOCKED_CODES: &[&str] = &["an"];

/// Flag entries absent from the ISO list that the game still wants to show.
const EXTRA_FLAGS: &[(&str, &str)] = &[
    ("gb-eng", "England"),
    ("gb-sct", "Scotland"),
    ("gb-wls", "Wales"),
    ("gb-nir", "Northern Ireland"),
    ("eu", "European Union"),
];

/// Errors raised while bootstrapping the country catalog.
///
/// Any of these is fatal at boot: the server does not serve traffic without
/// reference data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The upstream source could not be reached or returned invalid JSON.
    #[error("fetching country source: {0}")]
    Fetch(#[from] reqwest::Error),
    /// The upstream source answered with a non-success status.
    #[error("country source returned status {0}")]
    SourceStatus(reqwest::StatusCode),
    /// The built catalog is implausibly small.
    #[error("built country catalog too small ({0} entries)")]
    TooSmall(usize),
}

/// Load the catalog from the cache file, or fetch and cache it from upstream.
pub async fn load_or_fetch(config: &AppConfig) -> Result<Vec<CountryEntry>, CatalogError> {
    if let Some(cached) = read_cache(config.countries_cache_path()).await {
        info!(count = cached.len(), "loaded country catalog from cache");
        return Ok(cached);
    }

    let response = reqwest::get(config.countries_source_url()).await?;
    if !response.status().is_success() {
        return Err(CatalogError::SourceStatus(response.status()));
    }
    let alpha2_map: HashMap<String, String> = response.json().await?;

    let catalog = build_catalog(alpha2_map);
    if catalog.len() < MIN_CATALOG_LEN {
        return Err(CatalogError::TooSmall(catalog.len()));
    }

    write_cache(config.countries_cache_path(), &catalog).await;
    info!(count = catalog.len(), "downloaded and cached country catalog");
    Ok(catalog)
}

/// Build the catalog from the raw alpha-2 map: lowercase codes, normalized
/// names, blocked codes removed, extra flags appended, sorted by display name.
fn build_catalog(alpha2_map: HashMap<String, String>) -> Vec<CountryEntry> {
    let mut catalog: Vec<CountryEntry> = alpha2_map
        .into_iter()
        .map(|(code, name)| CountryEntry {
            code: code.to_lowercase(),
            name: normalize_name(&name),
        })
        .filter(|entry| !BLOCKED_CODES.contains(&entry.code.as_str()))
        .collect();

    let existing: HashSet<String> = catalog.iter().map(|entry| entry.code.clone()).collect();
    for (code, name) in EXTRA_FLAGS {
        if !existing.contains(*code) {
            catalog.push(CountryEntry {
                code: (*code).to_string(),
                name: (*name).to_string(),
            });
        }
    }

    catalog.sort_by(|a, b| a.name.cmp(&b.name));
    catalog
}

/// Collapse whitespace runs and trim the display name.
fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Read the cache file, accepting it only when it parses to a full catalog.
async fn read_cache(path: &Path) -> Option<Vec<CountryEntry>> {
    let bytes = tokio::fs::read(path).await.ok()?;
    match serde_json::from_slice::<Vec<CountryEntry>>(&bytes) {
        Ok(cached) if cached.len() >= MIN_CATALOG_LEN => Some(cached),
        Ok(cached) => {
            warn!(
                path = %path.display(),
                count = cached.len(),
                "country cache too small; refetching"
            );
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "corrupt country cache; refetching");
            None
        }
    }
}

/// Persist the freshly built catalog. Failures only cost a refetch on the next
/// boot, so they are logged rather than propagated.
async fn write_cache(path: &Path, catalog: &[CountryEntry]) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = tokio::fs::create_dir_all(parent).await {
                warn!(path = %path.display(), error = %err, "failed to create cache directory");
                return;
            }
        }
    }

    let payload = match serde_json::to_vec_pretty(catalog) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "failed to encode country cache");
            return;
        }
    };

    if let Err(err) = tokio::fs::write(path, payload).await {
        warn!(path = %path.display(), error = %err, "failed to write country cache");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect()
    }

    #[test]
    fn build_catalog_lowercases_and_normalizes() {
        let catalog = build_catalog(raw_map(&[("BR", "  Brazil "), ("FR", "France")]));
        let brazil = catalog.iter().find(|e| e.code == "br").unwrap();
        assert_eq!(brazil.name, "Brazil");
    }

    #[test]
    fn build_catalog_drops_blocked_codes_and_adds_extras() {
        let catalog = build_catalog(raw_map(&[("AN", "Netherlands Antilles"), ("BR", "Brazil")]));
        assert!(catalog.iter().all(|e| e.code != "an"));
        assert!(catalog.iter().any(|e| e.code == "gb-sct"));
        assert!(catalog.iter().any(|e| e.code == "eu"));
    }

    #[test]
    fn build_catalog_sorts_by_display_name() {
        let catalog = build_catalog(raw_map(&[("BR", "Brazil"), ("AR", "Argentina")]));
        let names: Vec<&str> = catalog.iter().map(|e| e.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn extras_are_not_duplicated_when_already_present() {
        let catalog = build_catalog(raw_map(&[("EU", "European Union"), ("BR", "Brazil")]));
        assert_eq!(catalog.iter().filter(|e| e.code == "eu").count(), 1);
    }
}

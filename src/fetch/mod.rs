//! Zipball download from the GitHub API
//!
//! One authenticated GET per run: `{api_url}/repos/{owner}/{repo}/zipball/{ref}`
//! with a fixed timeout, redirects followed, no retry.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Fixed request timeout; on expiry the run fails outward, no retry.
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Errors that can occur while fetching the snapshot archive.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid {field} '{value}'")]
    InvalidName { field: &'static str, value: String },

    #[error("HTTP {status} fetching {url}")]
    Status { status: reqwest::StatusCode, url: String },

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
}

// GitHub usernames/orgs: alphanumeric groups joined by single hyphens,
// no leading/trailing or consecutive hyphens, at most 39 characters.
static OWNER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").unwrap());

static REPO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]{1,100}$").unwrap());

fn validate_owner(owner: &str) -> Result<(), FetchError> {
    if owner.len() <= 39 && OWNER_RE.is_match(owner) {
        Ok(())
    } else {
        Err(FetchError::InvalidName { field: "owner", value: owner.to_string() })
    }
}

fn validate_ref(ref_: &str) -> Result<(), FetchError> {
    let rejected = ref_.is_empty()
        || ref_.starts_with('/')
        || ref_.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
        || ref_.chars().any(char::is_whitespace);
    if rejected {
        return Err(FetchError::InvalidName { field: "ref", value: ref_.to_string() });
    }
    Ok(())
}

/// Build the archive-download URL for one ref, validating each component.
pub fn zipball_url(
    api_url: &str,
    owner: &str,
    repo: &str,
    ref_: &str,
) -> Result<String, FetchError> {
    validate_owner(owner)?;
    if !REPO_RE.is_match(repo) {
        return Err(FetchError::InvalidName { field: "repository", value: repo.to_string() });
    }
    validate_ref(ref_)?;
    Ok(format!("{}/repos/{owner}/{repo}/zipball/{ref_}", api_url.trim_end_matches('/')))
}

/// Download one zipball snapshot, returning the full response body.
///
/// A non-success status is fatal and carries the code; the caller never
/// retries. The bearer credential, when present, is attached as an
/// `Authorization` header and dropped by the client on cross-origin
/// redirects (the zipball endpoint 302s to a CDN host).
pub fn fetch_zipball(
    api_url: &str,
    owner: &str,
    repo: &str,
    ref_: &str,
    token: Option<&str>,
) -> Result<Vec<u8>, FetchError> {
    let url = zipball_url(api_url, owner, repo, ref_)?;
    debug!("GET {url}");

    let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let mut request = client.get(&url).header(ACCEPT, GITHUB_ACCEPT);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request.send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status { status, url });
    }

    let body = response.bytes()?;
    debug!("downloaded {} bytes", body.len());
    Ok(body.to_vec())
}

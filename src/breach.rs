//! Checking secrets against a k-anonymity breach database.
//!
//! Only the first five hex characters of the secret's SHA-1 hash ever leave the machine. The
//! service replies with every hash suffix it knows under that prefix, and the match (if any) is
//! found locally.

use std::time::Duration;

use anyhow::Context;
use sha1::{Digest, Sha1};

use crate::Secret;

pub const DEFAULT_ENDPOINT: &str = "https://api.pwnedpasswords.com/range/";

const PREFIX_LEN: usize = 5;
const TIMEOUT: Duration = Duration::from_secs(10);

pub struct BreachChecker {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl BreachChecker {
    pub fn new() -> BreachChecker {
        BreachChecker::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// `endpoint` is the URL the hash prefix is appended to.
    pub fn with_endpoint(endpoint: impl Into<String>) -> BreachChecker {
        let client = reqwest::blocking::Client::builder()
            .timeout(TIMEOUT)
            .user_agent(concat!("pwforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|err| {
                log::debug!("falling back to a default HTTP client: {err}");
                reqwest::blocking::Client::new()
            });
        BreachChecker {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// How many times the secret appears in known breaches.
    ///
    /// This never fails: a network error, an unexpected status, or an unreadable reply all
    /// count as 0. Callers that need to tell "not found" apart from "couldn't check" should use
    /// [`BreachChecker::try_count`].
    pub fn count(&self, secret: &Secret) -> u64 {
        match self.try_count(secret) {
            Ok(count) => count,
            Err(err) => {
                log::warn!("breach check failed, treating the secret as unseen: {err:#}");
                0
            }
        }
    }

    pub fn try_count(&self, secret: &Secret) -> anyhow::Result<u64> {
        let hash = sha1_hex(secret);
        let (prefix, suffix) = hash.split_at(PREFIX_LEN);
        let url = format!("{}{}", self.endpoint, prefix);
        log::debug!("querying {url}");
        let body = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("failed to reach {url}"))?
            .error_for_status()
            .with_context(|| format!("{url} returned an error"))?
            .text()
            .context("failed to read the breach service's response")?;
        Ok(find_suffix_count(&body, suffix))
    }
}

impl Default for BreachChecker {
    fn default() -> BreachChecker {
        BreachChecker::new()
    }
}

fn sha1_hex(secret: &Secret) -> String {
    hex::encode_upper(Sha1::digest(secret.as_str().as_bytes()))
}

/// Scan a `SUFFIX:COUNT` per line reply for `suffix`.
fn find_suffix_count(body: &str, suffix: &str) -> u64 {
    body.lines()
        .filter_map(|line| line.trim().split_once(':'))
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(suffix))
        .and_then(|(_, count)| count.trim().parse().ok())
        .unwrap_or(0)
}

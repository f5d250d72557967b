//! Persistence bridge configuration, loaded from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_LOCAL_BASE: &str = "http://127.0.0.1:8000";
const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 700;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_STORE_DIR: &str = ".planview";

/// Tuning knobs and base addresses for the persistence bridge.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Explicit API base override. Tried first.
    pub api_base: Option<String>,
    /// Base of the page hosting the viewer. Tried second.
    pub same_origin: Option<String>,
    /// Known local development base. Tried last.
    pub local_default: String,
    /// Base for drawing and model files. Falls back to the resolved API base.
    pub file_base: Option<String>,
    /// Quiet period before a debounced save fires, in milliseconds.
    pub save_debounce_ms: u64,
    /// Whole-request timeout, in seconds.
    pub request_timeout_secs: u64,
    /// Directory for the file-backed local fallback store.
    pub store_dir: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            same_origin: None,
            local_default: DEFAULT_LOCAL_BASE.to_owned(),
            file_base: None,
            save_debounce_ms: DEFAULT_SAVE_DEBOUNCE_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
        }
    }
}

impl SyncConfig {
    /// Build a config from the `PLAN_*` environment variables.
    ///
    /// - `PLAN_API_BASE`: explicit API base
    /// - `PLAN_SAME_ORIGIN`: same-origin base
    /// - `PLAN_LOCAL_DEFAULT`: local fallback base (default `http://127.0.0.1:8000`)
    /// - `PLAN_FILE_BASE`: file base (default: the resolved API base)
    /// - `PLAN_SAVE_DEBOUNCE_MS`: debounce delay (default 700)
    /// - `PLAN_REQUEST_TIMEOUT_SECS`: request timeout (default 15)
    /// - `PLAN_STORE_DIR`: local store directory (default `.planview`)
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_base: env_string("PLAN_API_BASE"),
            same_origin: env_string("PLAN_SAME_ORIGIN"),
            local_default: env_string("PLAN_LOCAL_DEFAULT").unwrap_or_else(|| DEFAULT_LOCAL_BASE.to_owned()),
            file_base: env_string("PLAN_FILE_BASE"),
            save_debounce_ms: env_parse("PLAN_SAVE_DEBOUNCE_MS", DEFAULT_SAVE_DEBOUNCE_MS),
            request_timeout_secs: env_parse("PLAN_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            store_dir: env_string("PLAN_STORE_DIR").map_or_else(|| PathBuf::from(DEFAULT_STORE_DIR), PathBuf::from),
        }
    }

    /// Ordered, de-duplicated API base candidates with trailing slashes removed.
    #[must_use]
    pub fn candidate_bases(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let ordered = [self.api_base.as_deref(), self.same_origin.as_deref(), Some(self.local_default.as_str())];
        for base in ordered.into_iter().flatten() {
            let base = normalize_base(base);
            if !base.is_empty() && !out.contains(&base) {
                out.push(base);
            }
        }
        out
    }

    /// File base to use, given the API base resolved so far.
    #[must_use]
    pub fn file_base_or(&self, resolved_api: Option<&str>) -> Option<String> {
        self.file_base
            .as_deref()
            .or(resolved_api)
            .map(normalize_base)
            .filter(|b| !b.is_empty())
            .or_else(|| self.candidate_bases().into_iter().next())
    }

    #[must_use]
    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub(crate) fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_owned()
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

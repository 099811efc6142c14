//! Small helpers shared by resources and data sources.

use crate::error::{ProviderError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Separator of composite resource ids, e.g. `instanceId#userId`.
pub const FILED_SP: &str = "#";

/// Join id parts with [`FILED_SP`].
pub fn build_id(parts: &[&str]) -> String {
    parts.join(FILED_SP)
}

/// Split a composite id into exactly `n` non-empty parts.
pub fn parse_id(id: &str, n: usize) -> Result<Vec<&str>> {
    let parts: Vec<&str> = id.split(FILED_SP).collect();
    if parts.len() != n || parts.iter().any(|p| p.is_empty()) {
        return Err(ProviderError::InvalidRequest(format!(
            "id is broken, id is {}",
            id
        )));
    }
    Ok(parts)
}

/// Stable id for a data source result, derived from the ids it returned.
pub fn data_resource_ids_hash<S: AsRef<str>>(ids: &[S]) -> String {
    let mut hasher = Sha256::new();
    for id in ids {
        hasher.update(id.as_ref().as_bytes());
        hasher.update(b"-");
    }
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

/// Write `value` as pretty JSON to `path`, creating parent directories.
pub fn write_to_file(path: impl AsRef<Path>, value: &Value) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(value)?;
    std::fs::write(path, body)?;
    tracing::debug!(path = %path.display(), "wrote result_output_file");
    Ok(())
}

/// Format a unix timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_unix_time(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Deserialize null as the type's default, for state maps that always carry
/// every attribute.
pub fn null_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Drop empty strings, turning them into `None`.
pub fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

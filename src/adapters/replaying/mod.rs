//! Replaying adapters that serve recorded interactions.

pub mod filesystem;
pub mod id_gen;

use std::sync::{Mutex, PoisonError};

pub use filesystem::ReplayingFileSystem;
pub use id_gen::ReplayingIdGenerator;

use crate::cassette::replayer::CassetteReplayer;

/// Pops the next recorded output for `port::method`.
///
/// Mirror of `recording::record_interaction`.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    guard.next_interaction(port, method).output
}

/// Decodes a recorded `Result` using the `{"ok": v}` / `{"err": msg}` convention.
///
/// Mirror of `recording::record_result`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string().into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}

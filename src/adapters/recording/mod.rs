//! Recording adapters that capture interactions to cassettes.

pub mod filesystem;
pub mod id_gen;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

pub use filesystem::RecordingFileSystem;
pub use id_gen::RecordingIdGenerator;

use crate::cassette::recorder::CassetteRecorder;

/// Serializes a value for a cassette, keeping the failure visible in the
/// recording instead of aborting the command being recorded.
fn to_json<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| serde_json::json!({ "unserializable": e.to_string() }))
}

/// Records an interaction with a plain return value.
///
/// Mirror of `replaying::next_output`.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, to_json(input), to_json(output));
}

/// Records a `Result` as `{"ok": v}` or `{"err": message}`.
///
/// Mirror of `replaying::replay_result`.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output = match result {
        Ok(v) => serde_json::json!({ "ok": to_json(v) }),
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };
    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, to_json(input), output);
}

//! Raw message decoding
//!
//! Two payload shapes exist: flat (single-stream subscriptions deliver the
//! event object directly) and combined (`{"stream": ..., "data": ...}`
//! envelopes). Both are decoded with typed serde structures; no untyped
//! JSON trees are traversed.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::Result;
use crate::ws::events::StreamSymbol;

/// Combined-stream envelope, e.g. `{"stream":"btcusdt@trade","data":{...}}`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub stream: String,
    pub data: T,
}

/// Decode a flat (non-enveloped) payload.
pub fn flat<T: DeserializeOwned>(raw: &str) -> Result<T> {
    Ok(serde_json::from_str(raw)?)
}

/// Decode a combined envelope and stamp the payload with the envelope's
/// symbol: the portion of `stream` before the first `@`, uppercased. The
/// envelope symbol wins over anything embedded in `data`.
pub fn combined<T>(raw: &str) -> Result<T>
where
    T: DeserializeOwned + StreamSymbol,
{
    let envelope: Envelope<T> = serde_json::from_str(raw)?;
    let symbol = stream_symbol(&envelope.stream);
    let mut event = envelope.data;
    event.set_symbol(symbol);
    Ok(event)
}

/// Decode a combined envelope without touching the payload; used for
/// for-all payloads whose data is an array of per-symbol records.
pub fn combined_payload<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_str(raw)?;
    Ok(envelope.data)
}

fn stream_symbol(stream: &str) -> String {
    stream
        .split('@')
        .next()
        .unwrap_or_default()
        .to_uppercase()
}

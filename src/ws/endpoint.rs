//! Endpoint resolution and stream URL construction
//!
//! Single-stream subscriptions land on `<base>/ws/<descriptor>`; combined
//! subscriptions multiplex several descriptors on
//! `<base>/stream?streams=<d1>/<d2>/...`.

use crate::config::WsConfig;
use crate::error::{ConnectorError, Result};

const BASE_WS_MAIN_URL: &str = "wss://fstream.binance.com/ws";
const BASE_WS_TESTNET_URL: &str = "wss://testnet.binance.vision/ws";
const BASE_COMBINED_MAIN_URL: &str = "wss://fstream.binance.com/stream?streams=";
const BASE_COMBINED_TESTNET_URL: &str = "wss://testnet.binance.vision/stream?streams=";

/// Base endpoint for single-stream subscriptions
pub fn ws_endpoint(config: &WsConfig) -> &'static str {
    if config.testnet {
        BASE_WS_TESTNET_URL
    } else {
        BASE_WS_MAIN_URL
    }
}

/// Base endpoint for combined (multiplexed) subscriptions
pub fn combined_endpoint(config: &WsConfig) -> &'static str {
    if config.testnet {
        BASE_COMBINED_TESTNET_URL
    } else {
        BASE_COMBINED_MAIN_URL
    }
}

/// Build a single-stream subscription URL from a descriptor such as
/// `btcusdt@depth` or a raw listen key.
pub(crate) fn single_stream_url(config: &WsConfig, descriptor: &str) -> String {
    format!("{}/{}", ws_endpoint(config), descriptor)
}

/// Build a combined subscription URL, joining descriptors with `/`.
///
/// An empty descriptor set would produce a URL with a dangling empty
/// segment, so it is rejected here before any connection attempt.
pub(crate) fn combined_stream_url(config: &WsConfig, descriptors: &[String]) -> Result<String> {
    if descriptors.is_empty() {
        return Err(ConnectorError::InvalidSubscription(
            "combined subscription requires at least one stream".to_string(),
        ));
    }
    Ok(format!(
        "{}{}",
        combined_endpoint(config),
        descriptors.join("/")
    ))
}

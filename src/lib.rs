//! Typed client bindings for the Binance USD-M futures stream APIs.
//!
//! The crate centers on long-lived WebSocket subscriptions: each
//! `ws::streams::*_stream` call builds the subscription URL, opens one
//! connection, and returns an [`ws::transport::EventStream`] of decoded
//! events. A small REST client covers the market index endpoint.

pub mod config; // Explicit configuration values (no process-wide flags)
pub mod error;

pub mod rest; // REST collaborator endpoints
pub mod ws; // WebSocket subscriptions, transport, and event decoding

// Re-export the types almost every caller touches
pub use config::{RestConfig, WsConfig};
pub use error::{ConnectorError, Result};
pub use ws::transport::EventStream;

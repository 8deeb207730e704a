//! Configuration Management
//!
//! Explicit configuration values for the WebSocket and REST clients.
//! Both structs are plain data passed at construction time; there are no
//! process-wide flags to mutate.

use std::time::Duration;

/// Default interval between keepalive pings when keepalive is enabled.
pub const DEFAULT_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(60);

/// Default silent-connection deadline; a connection that delivers no frame
/// (data or control) for this long is considered dead.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(180);

/// WebSocket subscription configuration
///
/// `Default` gives a mainnet connection with keepalive disabled, a 180s
/// read deadline, and a 64-event delivery buffer.
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// Connect to the test network instead of production
    pub testnet: bool,

    /// Send periodic ping frames to probe connection liveness
    pub keepalive: bool,

    /// Interval between keepalive pings (ignored unless `keepalive` is set)
    pub keepalive_interval: Duration,

    /// Terminate a connection that stays silent for this long.
    /// Enforced regardless of the keepalive setting; any inbound frame,
    /// control frames included, resets the deadline.
    pub read_timeout: Duration,

    /// Capacity of the decoded-event delivery channel. A full buffer
    /// backpressures the read loop and, transitively, the socket.
    pub event_buffer: usize,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            testnet: false,
            keepalive: false,
            keepalive_interval: DEFAULT_KEEPALIVE_INTERVAL,
            read_timeout: DEFAULT_READ_TIMEOUT,
            event_buffer: 64,
        }
    }
}

impl WsConfig {
    /// Production-network configuration with defaults
    pub fn mainnet() -> Self {
        Self::default()
    }

    /// Test-network configuration with defaults
    pub fn testnet() -> Self {
        Self {
            testnet: true,
            ..Self::default()
        }
    }

    /// Enable keepalive pings at the given interval. A zero interval has
    /// no usable timer behind it and falls back to the default.
    pub fn with_keepalive(mut self, interval: Duration) -> Self {
        self.keepalive = true;
        self.keepalive_interval = if interval.is_zero() {
            DEFAULT_KEEPALIVE_INTERVAL
        } else {
            interval
        };
        self
    }
}

/// REST client configuration
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Use the test-network base URL instead of production
    pub testnet: bool,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            testnet: false,
            timeout: Duration::from_secs(10),
        }
    }
}

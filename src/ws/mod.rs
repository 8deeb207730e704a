//! WebSocket stream subscriptions
//!
//! Layered bottom-up: `endpoint` resolves base URLs and builds stream
//! descriptors, `transport` owns the connection and its read loop,
//! `decode` turns raw payloads into the typed events in `events` and
//! `user_data`, and `streams` wires it all together into one subscribe
//! function per stream kind.

pub mod decode;
pub mod endpoint;
pub mod events;
pub mod streams;
pub mod transport;
pub mod user_data;

// Re-export commonly used types
pub use events::{
    AggTradeEvent, AssetIndexEvent, BookTickerEvent, DepthEvent, Kline, KlineEvent,
    MarkPriceEvent, MarketStatEvent, MiniMarketStatEvent, PartialDepthEvent, PriceLevel,
    TradeEvent,
};
pub use transport::EventStream;
pub use user_data::{
    AccountConfigUpdate, AccountUpdate, BalanceUpdate, OrderUpdate, PositionUpdate, UserDataEvent,
};

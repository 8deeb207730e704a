//! Market-data event types pushed over WebSocket streams
//!
//! Field tags mirror the exchange payloads (single-letter JSON keys).
//! Prices and quantities are kept as the exchange-provided decimal strings;
//! this layer never converts them to floating point.

use serde::{Deserialize, Serialize};

/// Events that carry a symbol recoverable from a combined-stream envelope.
///
/// Combined messages arrive as `{"stream": "<symbol>@<kind>", "data": ...}`;
/// the envelope's symbol is authoritative and overwrites whatever the
/// payload carried (which may be absent or lowercased).
pub trait StreamSymbol {
    fn set_symbol(&mut self, symbol: String);
}

/// One order-book price level
///
/// Decoded from the exchange's two-element array form `["price", "qty"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct PriceLevel {
    pub price: String,
    pub quantity: String,
}

impl From<(String, String)> for PriceLevel {
    fn from((price, quantity): (String, String)) -> Self {
        Self { price, quantity }
    }
}

impl From<PriceLevel> for (String, String) {
    fn from(level: PriceLevel) -> Self {
        (level.price, level.quantity)
    }
}

/// Partial order-book snapshot from `<symbol>@depth<levels>` streams
///
/// The flat payload carries no symbol; the subscription injects it (or the
/// combined envelope supplies it).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PartialDepthEvent {
    #[serde(default)]
    pub symbol: String,

    #[serde(rename = "lastUpdateId")]
    pub last_update_id: i64,

    pub bids: Vec<PriceLevel>,

    pub asks: Vec<PriceLevel>,
}

impl StreamSymbol for PartialDepthEvent {
    fn set_symbol(&mut self, symbol: String) {
        self.symbol = symbol;
    }
}

/// Order-book diff from `<symbol>@depth` streams
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DepthEvent {
    /// Event type (always "depthUpdate")
    #[serde(rename = "e")]
    pub event_type: String,

    /// Event time (milliseconds since Unix epoch)
    #[serde(rename = "E")]
    pub event_time: i64,

    /// Trading pair symbol
    #[serde(rename = "s", default)]
    pub symbol: String,

    /// First update ID in event
    #[serde(rename = "U")]
    pub first_update_id: i64,

    /// Final update ID in event
    #[serde(rename = "u")]
    pub last_update_id: i64,

    /// Final update ID of the previous event on this stream.
    /// Only the futures diff streams send it; absence is not zero.
    #[serde(rename = "pu", default, skip_serializing_if = "Option::is_none")]
    pub prev_last_update_id: Option<i64>,

    /// Bid levels to update
    #[serde(rename = "b")]
    pub bids: Vec<PriceLevel>,

    /// Ask levels to update
    #[serde(rename = "a")]
    pub asks: Vec<PriceLevel>,
}

impl StreamSymbol for DepthEvent {
    fn set_symbol(&mut self, symbol: String) {
        self.symbol = symbol;
    }
}

/// Single trade print from `<symbol>@trade` streams
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TradeEvent {
    /// Event type (always "trade")
    #[serde(rename = "e")]
    pub event_type: String,

    /// Event time (milliseconds since Unix epoch)
    #[serde(rename = "E")]
    pub event_time: i64,

    /// Trading pair symbol
    #[serde(rename = "s", default)]
    pub symbol: String,

    /// Trade ID
    #[serde(rename = "t")]
    pub trade_id: i64,

    /// Price
    #[serde(rename = "p")]
    pub price: String,

    /// Quantity
    #[serde(rename = "q")]
    pub quantity: String,

    /// Buyer order ID
    #[serde(rename = "b")]
    pub buyer_order_id: i64,

    /// Seller order ID
    #[serde(rename = "a")]
    pub seller_order_id: i64,

    /// Trade time
    #[serde(rename = "T")]
    pub trade_time: i64,

    /// Was the buyer the maker?
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,

    /// Reserved field; mapped so it cannot collide with `m` under
    /// case-insensitive key handling on the exchange side.
    #[serde(rename = "M", default)]
    pub placeholder: bool,
}

impl StreamSymbol for TradeEvent {
    fn set_symbol(&mut self, symbol: String) {
        self.symbol = symbol;
    }
}

/// Aggregated trade from `<symbol>@aggTrade` streams
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AggTradeEvent {
    /// Event type (always "aggTrade")
    #[serde(rename = "e")]
    pub event_type: String,

    /// Event time (milliseconds since Unix epoch)
    #[serde(rename = "E")]
    pub event_time: i64,

    /// Trading pair symbol
    #[serde(rename = "s", default)]
    pub symbol: String,

    /// Aggregate trade ID
    #[serde(rename = "a")]
    pub agg_trade_id: i64,

    /// Price
    #[serde(rename = "p")]
    pub price: String,

    /// Quantity
    #[serde(rename = "q")]
    pub quantity: String,

    /// First breakdown trade ID
    #[serde(rename = "f")]
    pub first_trade_id: i64,

    /// Last breakdown trade ID
    #[serde(rename = "l")]
    pub last_trade_id: i64,

    /// Trade time
    #[serde(rename = "T")]
    pub trade_time: i64,

    /// Was the buyer the maker?
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,

    /// Reserved field kept distinct from `m` (case-collision guard)
    #[serde(rename = "M", default)]
    pub placeholder: bool,
}

impl StreamSymbol for AggTradeEvent {
    fn set_symbol(&mut self, symbol: String) {
        self.symbol = symbol;
    }
}

/// Candlestick update from `<symbol>@kline_<interval>` streams
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KlineEvent {
    /// Event type (always "kline")
    #[serde(rename = "e")]
    pub event_type: String,

    /// Event time (milliseconds since Unix epoch)
    #[serde(rename = "E")]
    pub event_time: i64,

    /// Trading pair symbol
    #[serde(rename = "s", default)]
    pub symbol: String,

    /// Candle payload
    #[serde(rename = "k")]
    pub kline: Kline,
}

impl StreamSymbol for KlineEvent {
    fn set_symbol(&mut self, symbol: String) {
        self.symbol = symbol;
    }
}

/// Candle payload inside a [`KlineEvent`]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Kline {
    #[serde(rename = "t")]
    pub start_time: i64,

    #[serde(rename = "T")]
    pub end_time: i64,

    #[serde(rename = "s")]
    pub symbol: String,

    #[serde(rename = "i")]
    pub interval: String,

    #[serde(rename = "f")]
    pub first_trade_id: i64,

    #[serde(rename = "L")]
    pub last_trade_id: i64,

    #[serde(rename = "o")]
    pub open: String,

    #[serde(rename = "c")]
    pub close: String,

    #[serde(rename = "h")]
    pub high: String,

    #[serde(rename = "l")]
    pub low: String,

    #[serde(rename = "v")]
    pub volume: String,

    #[serde(rename = "n")]
    pub trade_count: i64,

    /// True once the candle is closed. Uniqueness across reconnects is not
    /// guaranteed; the same final candle may be observed twice.
    #[serde(rename = "x")]
    pub is_final: bool,

    #[serde(rename = "q")]
    pub quote_volume: String,

    #[serde(rename = "V")]
    pub active_buy_volume: String,

    #[serde(rename = "Q")]
    pub active_buy_quote_volume: String,
}

/// 24h rolling ticker statistics from `<symbol>@ticker` streams,
/// refreshed roughly every second per symbol.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketStatEvent {
    #[serde(rename = "e")]
    pub event_type: String,

    #[serde(rename = "E")]
    pub event_time: i64,

    #[serde(rename = "s", default)]
    pub symbol: String,

    #[serde(rename = "p")]
    pub price_change: String,

    #[serde(rename = "P")]
    pub price_change_percent: String,

    #[serde(rename = "w")]
    pub weighted_avg_price: String,

    #[serde(rename = "x", default)]
    pub prev_close_price: String,

    #[serde(rename = "c")]
    pub last_price: String,

    #[serde(rename = "Q")]
    pub close_qty: String,

    #[serde(rename = "b", default)]
    pub bid_price: String,

    #[serde(rename = "B", default)]
    pub bid_qty: String,

    #[serde(rename = "a", default)]
    pub ask_price: String,

    #[serde(rename = "A", default)]
    pub ask_qty: String,

    #[serde(rename = "o")]
    pub open_price: String,

    #[serde(rename = "h")]
    pub high_price: String,

    #[serde(rename = "l")]
    pub low_price: String,

    #[serde(rename = "v")]
    pub base_volume: String,

    #[serde(rename = "q")]
    pub quote_volume: String,

    #[serde(rename = "O")]
    pub open_time: i64,

    #[serde(rename = "C")]
    pub close_time: i64,

    #[serde(rename = "F")]
    pub first_trade_id: i64,

    #[serde(rename = "L")]
    pub last_trade_id: i64,

    #[serde(rename = "n")]
    pub trade_count: i64,
}

impl StreamSymbol for MarketStatEvent {
    fn set_symbol(&mut self, symbol: String) {
        self.symbol = symbol;
    }
}

/// Compact 24h ticker from `!miniTicker@arr` (and per-symbol mini streams)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MiniMarketStatEvent {
    #[serde(rename = "e")]
    pub event_type: String,

    #[serde(rename = "E")]
    pub event_time: i64,

    #[serde(rename = "s")]
    pub symbol: String,

    #[serde(rename = "c")]
    pub last_price: String,

    #[serde(rename = "o")]
    pub open_price: String,

    #[serde(rename = "h")]
    pub high_price: String,

    #[serde(rename = "l")]
    pub low_price: String,

    #[serde(rename = "v")]
    pub base_volume: String,

    #[serde(rename = "q")]
    pub quote_volume: String,
}

/// Best bid/ask snapshot from `<symbol>@bookTicker` streams
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookTickerEvent {
    /// Order book update ID, monotonically increasing per symbol
    #[serde(rename = "u")]
    pub update_id: i64,

    #[serde(rename = "s", default)]
    pub symbol: String,

    #[serde(rename = "b")]
    pub best_bid_price: String,

    #[serde(rename = "B")]
    pub best_bid_qty: String,

    #[serde(rename = "a")]
    pub best_ask_price: String,

    #[serde(rename = "A")]
    pub best_ask_qty: String,
}

impl StreamSymbol for BookTickerEvent {
    fn set_symbol(&mut self, symbol: String) {
        self.symbol = symbol;
    }
}

/// Mark/index price and funding update from mark-price streams
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkPriceEvent {
    #[serde(rename = "e")]
    pub event_type: String,

    #[serde(rename = "E")]
    pub event_time: i64,

    #[serde(rename = "s")]
    pub symbol: String,

    #[serde(rename = "p")]
    pub mark_price: String,

    #[serde(rename = "i")]
    pub index_price: String,

    #[serde(rename = "P")]
    pub estimated_settle_price: String,

    #[serde(rename = "r")]
    pub funding_rate: String,

    #[serde(rename = "T")]
    pub next_funding_time: i64,
}

/// Multi-asset-mode index entry from the `!assetIndex@arr` stream
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetIndexEvent {
    #[serde(rename = "e")]
    pub event_type: String,

    #[serde(rename = "E")]
    pub event_time: i64,

    #[serde(rename = "s")]
    pub symbol: String,

    #[serde(rename = "i")]
    pub index: String,

    #[serde(rename = "b")]
    pub bid_buffer: String,

    #[serde(rename = "a")]
    pub ask_buffer: String,

    #[serde(rename = "B")]
    pub bid_rate: String,

    #[serde(rename = "A")]
    pub ask_rate: String,

    #[serde(rename = "q")]
    pub auto_exchange_bid_buffer: String,

    #[serde(rename = "g")]
    pub auto_exchange_ask_buffer: String,

    #[serde(rename = "Q")]
    pub auto_exchange_bid_rate: String,

    #[serde(rename = "G")]
    pub auto_exchange_ask_rate: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_level_decodes_from_array_form() {
        let level: PriceLevel = serde_json::from_str(r#"["67650.00", "1.23400"]"#).unwrap();
        assert_eq!(level.price, "67650.00");
        assert_eq!(level.quantity, "1.23400");
    }

    #[test]
    fn trade_event_field_mapping() {
        let json = r#"{"e":"trade","E":123456789,"s":"BNBBTC","t":12345,"p":"0.001","q":"100","b":88,"a":50,"T":123456785,"m":true,"M":true}"#;
        let event: TradeEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, "trade");
        assert_eq!(event.event_time, 123456789);
        assert_eq!(event.symbol, "BNBBTC");
        assert_eq!(event.trade_id, 12345);
        assert_eq!(event.price, "0.001");
        assert_eq!(event.quantity, "100");
        assert_eq!(event.buyer_order_id, 88);
        assert_eq!(event.seller_order_id, 50);
        assert_eq!(event.trade_time, 123456785);
        assert!(event.is_buyer_maker);
        assert!(event.placeholder);
    }

    #[test]
    fn depth_event_without_pu_decodes_to_none() {
        let json = r#"{"e":"depthUpdate","E":1,"s":"BTCUSDT","U":100,"u":105,"b":[["1.0","2.0"]],"a":[]}"#;
        let event: DepthEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.prev_last_update_id, None);
        assert_eq!(event.first_update_id, 100);
        assert_eq!(event.last_update_id, 105);
        assert_eq!(event.bids[0].price, "1.0");
        assert!(event.asks.is_empty());
    }

    #[test]
    fn depth_event_explicit_zero_pu_is_distinguishable_from_absent() {
        let json = r#"{"e":"depthUpdate","E":1,"s":"BTCUSDT","U":100,"u":105,"pu":0,"b":[],"a":[]}"#;
        let event: DepthEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.prev_last_update_id, Some(0));
    }

    #[test]
    fn agg_trade_event_field_mapping() {
        let json = r#"{"e":"aggTrade","E":123456789,"s":"BTCUSDT","a":5933014,"p":"0.001","q":"100","f":100,"l":105,"T":123456785,"m":true,"M":true}"#;
        let event: AggTradeEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.agg_trade_id, 5933014);
        assert_eq!(event.first_trade_id, 100);
        assert_eq!(event.last_trade_id, 105);
        assert!(event.placeholder);
    }

    #[test]
    fn kline_event_final_flag() {
        let json = r#"{"e":"kline","E":123456789,"s":"BTCUSDT","k":{
            "t":123400000,"T":123460000,"s":"BTCUSDT","i":"1m","f":100,"L":200,
            "o":"0.0010","c":"0.0020","h":"0.0025","l":"0.0015","v":"1000","n":100,
            "x":true,"q":"1.0000","V":"500","Q":"0.500"}}"#;
        let event: KlineEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kline.interval, "1m");
        assert!(event.kline.is_final);
        assert_eq!(event.kline.open, "0.0010");
        assert_eq!(event.kline.trade_count, 100);
    }

    #[test]
    fn partial_depth_event_defaults_missing_symbol() {
        let json = r#"{"lastUpdateId":160,"bids":[["0.0024","10"]],"asks":[["0.0026","100"]]}"#;
        let event: PartialDepthEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.symbol, "");
        assert_eq!(event.last_update_id, 160);
        assert_eq!(event.bids.len(), 1);
        assert_eq!(event.asks[0].quantity, "100");
    }

    #[test]
    fn book_ticker_event_field_mapping() {
        let json = r#"{"u":400900217,"s":"BNBUSDT","b":"25.35190000","B":"31.21000000","a":"25.36520000","A":"40.66000000"}"#;
        let event: BookTickerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.update_id, 400900217);
        assert_eq!(event.symbol, "BNBUSDT");
        assert_eq!(event.best_bid_price, "25.35190000");
        assert_eq!(event.best_ask_qty, "40.66000000");
    }

    #[test]
    fn mark_price_event_field_mapping() {
        let json = r#"{"e":"markPriceUpdate","E":1562305380000,"s":"BTCUSDT","p":"11794.15000000","i":"11784.62659091","P":"11784.25641265","r":"0.00038167","T":1562306400000}"#;
        let event: MarkPriceEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.mark_price, "11794.15000000");
        assert_eq!(event.funding_rate, "0.00038167");
        assert_eq!(event.next_funding_time, 1562306400000);
    }

    #[test]
    fn mini_ticker_array_decodes_in_order() {
        let json = r#"[
            {"e":"24hrMiniTicker","E":1,"s":"BTCUSDT","c":"3","o":"2","h":"4","l":"1","v":"10","q":"30"},
            {"e":"24hrMiniTicker","E":2,"s":"ETHUSDT","c":"6","o":"5","h":"7","l":"4","v":"20","q":"110"}
        ]"#;
        let events: Vec<MiniMarketStatEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].symbol, "BTCUSDT");
        assert_eq!(events[1].symbol, "ETHUSDT");
    }

    #[test]
    fn asset_index_array_decodes() {
        let json = r#"[{"e":"assetIndexUpdate","E":1,"s":"ADAUSD","i":"0.27","b":"0.10","a":"0.10","B":"0.24","A":"0.30","q":"0.05","g":"0.05","Q":"0.26","G":"0.28"}]"#;
        let events: Vec<AssetIndexEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events[0].symbol, "ADAUSD");
        assert_eq!(events[0].auto_exchange_ask_rate, "0.28");
    }
}

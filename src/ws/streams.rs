//! Stream subscription functions
//!
//! One function per stream kind. Each builds the subscription URL from the
//! configured endpoint, opens a dedicated connection through
//! [`transport::subscribe`], and returns an [`EventStream`] of decoded
//! events. Combined variants multiplex several symbols over one
//! connection; multi-symbol inputs are ordered slices so the produced URL
//! (and thus the subscription) is deterministic.
//!
//! Resubscribing after a terminal error is simply calling the function
//! again; no reconnection happens behind the caller's back.

use crate::config::WsConfig;
use crate::error::{ConnectorError, Result};
use crate::ws::decode;
use crate::ws::endpoint::{combined_stream_url, single_stream_url};
use crate::ws::events::{
    AggTradeEvent, AssetIndexEvent, BookTickerEvent, DepthEvent, KlineEvent, MarkPriceEvent,
    MarketStatEvent, MiniMarketStatEvent, PartialDepthEvent, TradeEvent,
};
use crate::ws::transport::{self, EventStream};
use crate::ws::user_data::UserDataEvent;

/// Lowercased `<symbol>@<kind>` descriptors for a combined subscription.
fn symbol_descriptors(symbols: &[&str], kind: &str) -> Vec<String> {
    symbols
        .iter()
        .map(|symbol| format!("{}@{}", symbol.to_lowercase(), kind))
        .collect()
}

/// Partial book depth snapshots (`<symbol>@depth<levels>`), 250ms cadence.
///
/// `levels` is one of the exchange-supported depths ("5", "10", "20").
/// The payload carries no symbol; the returned events are stamped with the
/// uppercased subscription symbol.
pub async fn partial_depth_stream(
    config: &WsConfig,
    symbol: &str,
    levels: &str,
) -> Result<EventStream<PartialDepthEvent>> {
    let descriptor = format!("{}@depth{}", symbol.to_lowercase(), levels);
    partial_depth_subscribe(config, symbol, descriptor).await
}

/// Partial book depth snapshots at the 100ms cadence.
pub async fn partial_depth_stream_100ms(
    config: &WsConfig,
    symbol: &str,
    levels: &str,
) -> Result<EventStream<PartialDepthEvent>> {
    let descriptor = format!("{}@depth{}@100ms", symbol.to_lowercase(), levels);
    partial_depth_subscribe(config, symbol, descriptor).await
}

async fn partial_depth_subscribe(
    config: &WsConfig,
    symbol: &str,
    descriptor: String,
) -> Result<EventStream<PartialDepthEvent>> {
    let url = single_stream_url(config, &descriptor);
    let symbol = symbol.to_uppercase();
    transport::subscribe(url, config, move |raw| {
        let mut event: PartialDepthEvent = decode::flat(raw)?;
        event.symbol = symbol.clone();
        Ok(event)
    })
    .await
}

/// Partial depth for several symbols on one connection, each paired with
/// its level count.
pub async fn combined_partial_depth_stream(
    config: &WsConfig,
    symbol_levels: &[(&str, &str)],
) -> Result<EventStream<PartialDepthEvent>> {
    let descriptors: Vec<String> = symbol_levels
        .iter()
        .map(|(symbol, levels)| format!("{}@depth{}", symbol.to_lowercase(), levels))
        .collect();
    let url = combined_stream_url(config, &descriptors)?;
    transport::subscribe(url, config, decode::combined::<PartialDepthEvent>).await
}

/// Order-book diff events (`<symbol>@depth`), 250ms cadence.
pub async fn depth_stream(config: &WsConfig, symbol: &str) -> Result<EventStream<DepthEvent>> {
    let url = single_stream_url(config, &format!("{}@depth", symbol.to_lowercase()));
    transport::subscribe(url, config, decode::flat::<DepthEvent>).await
}

/// Order-book diff events at the 100ms cadence.
pub async fn depth_stream_100ms(
    config: &WsConfig,
    symbol: &str,
) -> Result<EventStream<DepthEvent>> {
    let url = single_stream_url(config, &format!("{}@depth@100ms", symbol.to_lowercase()));
    transport::subscribe(url, config, decode::flat::<DepthEvent>).await
}

/// Order-book diffs for several symbols on one connection.
pub async fn combined_depth_stream(
    config: &WsConfig,
    symbols: &[&str],
) -> Result<EventStream<DepthEvent>> {
    let descriptors = symbol_descriptors(symbols, "depth");
    let url = combined_stream_url(config, &descriptors)?;
    transport::subscribe(url, config, decode::combined::<DepthEvent>).await
}

/// Combined order-book diffs at the 100ms cadence.
pub async fn combined_depth_stream_100ms(
    config: &WsConfig,
    symbols: &[&str],
) -> Result<EventStream<DepthEvent>> {
    let descriptors = symbol_descriptors(symbols, "depth@100ms");
    let url = combined_stream_url(config, &descriptors)?;
    transport::subscribe(url, config, decode::combined::<DepthEvent>).await
}

/// Candlestick updates for one symbol and interval (e.g. "1m", "1h").
pub async fn kline_stream(
    config: &WsConfig,
    symbol: &str,
    interval: &str,
) -> Result<EventStream<KlineEvent>> {
    let url = single_stream_url(
        config,
        &format!("{}@kline_{}", symbol.to_lowercase(), interval),
    );
    transport::subscribe(url, config, decode::flat::<KlineEvent>).await
}

/// Candlesticks for several symbols, each paired with its interval.
pub async fn combined_kline_stream(
    config: &WsConfig,
    symbol_intervals: &[(&str, &str)],
) -> Result<EventStream<KlineEvent>> {
    let descriptors: Vec<String> = symbol_intervals
        .iter()
        .map(|(symbol, interval)| format!("{}@kline_{}", symbol.to_lowercase(), interval))
        .collect();
    let url = combined_stream_url(config, &descriptors)?;
    transport::subscribe(url, config, decode::combined::<KlineEvent>).await
}

/// Aggregated trades for one symbol.
pub async fn agg_trade_stream(
    config: &WsConfig,
    symbol: &str,
) -> Result<EventStream<AggTradeEvent>> {
    let url = single_stream_url(config, &format!("{}@aggTrade", symbol.to_lowercase()));
    transport::subscribe(url, config, decode::flat::<AggTradeEvent>).await
}

/// Aggregated trades for several symbols on one connection.
pub async fn combined_agg_trade_stream(
    config: &WsConfig,
    symbols: &[&str],
) -> Result<EventStream<AggTradeEvent>> {
    let descriptors = symbol_descriptors(symbols, "aggTrade");
    let url = combined_stream_url(config, &descriptors)?;
    transport::subscribe(url, config, decode::combined::<AggTradeEvent>).await
}

/// Raw trades for one symbol.
pub async fn trade_stream(config: &WsConfig, symbol: &str) -> Result<EventStream<TradeEvent>> {
    let url = single_stream_url(config, &format!("{}@trade", symbol.to_lowercase()));
    transport::subscribe(url, config, decode::flat::<TradeEvent>).await
}

/// Raw trades for several symbols on one connection.
pub async fn combined_trade_stream(
    config: &WsConfig,
    symbols: &[&str],
) -> Result<EventStream<TradeEvent>> {
    let descriptors = symbol_descriptors(symbols, "trade");
    let url = combined_stream_url(config, &descriptors)?;
    transport::subscribe(url, config, decode::combined::<TradeEvent>).await
}

/// 24h rolling ticker statistics for one symbol, pushed about once a second.
pub async fn market_stat_stream(
    config: &WsConfig,
    symbol: &str,
) -> Result<EventStream<MarketStatEvent>> {
    let url = single_stream_url(config, &format!("{}@ticker", symbol.to_lowercase()));
    transport::subscribe(url, config, decode::flat::<MarketStatEvent>).await
}

/// 24h ticker statistics for several symbols on one connection.
pub async fn combined_market_stat_stream(
    config: &WsConfig,
    symbols: &[&str],
) -> Result<EventStream<MarketStatEvent>> {
    let descriptors = symbol_descriptors(symbols, "ticker");
    let url = combined_stream_url(config, &descriptors)?;
    transport::subscribe(url, config, decode::combined::<MarketStatEvent>).await
}

/// 24h ticker statistics for every market; each push is a bare array of
/// the symbols that changed.
pub async fn all_market_stat_stream(
    config: &WsConfig,
) -> Result<EventStream<Vec<MarketStatEvent>>> {
    let url = single_stream_url(config, "!ticker@arr");
    transport::subscribe(url, config, decode::flat::<Vec<MarketStatEvent>>).await
}

/// Mini 24h ticker statistics for every market, as a bare array per push.
pub async fn all_mini_market_stat_stream(
    config: &WsConfig,
) -> Result<EventStream<Vec<MiniMarketStatEvent>>> {
    let url = single_stream_url(config, "!miniTicker@arr");
    transport::subscribe(url, config, decode::flat::<Vec<MiniMarketStatEvent>>).await
}

/// Best bid/ask updates for one symbol.
pub async fn book_ticker_stream(
    config: &WsConfig,
    symbol: &str,
) -> Result<EventStream<BookTickerEvent>> {
    let url = single_stream_url(config, &format!("{}@bookTicker", symbol.to_lowercase()));
    transport::subscribe(url, config, decode::flat::<BookTickerEvent>).await
}

/// Best bid/ask updates for several symbols on one connection.
pub async fn combined_book_ticker_stream(
    config: &WsConfig,
    symbols: &[&str],
) -> Result<EventStream<BookTickerEvent>> {
    let descriptors = symbol_descriptors(symbols, "bookTicker");
    let url = combined_stream_url(config, &descriptors)?;
    transport::subscribe(url, config, decode::combined::<BookTickerEvent>).await
}

/// Best bid/ask updates across all symbols.
pub async fn all_book_ticker_stream(config: &WsConfig) -> Result<EventStream<BookTickerEvent>> {
    let url = single_stream_url(config, "!bookTicker");
    transport::subscribe(url, config, decode::flat::<BookTickerEvent>).await
}

/// Mark price and funding rate for every symbol, as a bare array per push.
pub async fn mark_price_for_all_stream(
    config: &WsConfig,
) -> Result<EventStream<Vec<MarkPriceEvent>>> {
    let url = single_stream_url(config, "!markPrice@arr");
    transport::subscribe(url, config, decode::flat::<Vec<MarkPriceEvent>>).await
}

/// Mark price for every symbol over the combined endpoint; the array
/// arrives wrapped in a stream envelope there.
pub async fn combined_mark_price_for_all_stream(
    config: &WsConfig,
) -> Result<EventStream<Vec<MarkPriceEvent>>> {
    let url = combined_stream_url(config, &["!markPrice@arr".to_string()])?;
    transport::subscribe(url, config, decode::combined_payload::<Vec<MarkPriceEvent>>).await
}

/// Multi-asset-mode asset index updates, as a bare array per push.
pub async fn asset_index_stream(config: &WsConfig) -> Result<EventStream<Vec<AssetIndexEvent>>> {
    let url = single_stream_url(config, "!assetIndex@arr");
    transport::subscribe(url, config, decode::flat::<Vec<AssetIndexEvent>>).await
}

/// Private user-data events for the account behind `listen_key`.
///
/// Listen keys are opaque tokens obtained (and kept alive) through the
/// authenticated REST API, which is outside this crate's scope.
pub async fn user_data_stream(
    config: &WsConfig,
    listen_key: &str,
) -> Result<EventStream<UserDataEvent>> {
    if listen_key.is_empty() {
        return Err(ConnectorError::InvalidSubscription(
            "listen key must not be empty".to_string(),
        ));
    }
    let url = single_stream_url(config, listen_key);
    transport::subscribe(url, config, decode::flat::<UserDataEvent>).await
}

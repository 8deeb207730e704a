//! End-to-end decoding checks through the crate's public surface,
//! using recorded exchange payloads.

use binance_futures_streams::ws::decode;
use binance_futures_streams::ws::{
    AggTradeEvent, DepthEvent, KlineEvent, MarketStatEvent, MiniMarketStatEvent, TradeEvent,
    UserDataEvent,
};

#[test]
fn flat_trade_message_maps_every_field() {
    let raw = r#"{"e":"trade","E":123456789,"s":"BNBBTC","t":12345,"p":"0.001","q":"100","b":88,"a":50,"T":123456785,"m":true,"M":true}"#;
    let event: TradeEvent = decode::flat(raw).unwrap();

    assert_eq!(event.event_type, "trade");
    assert_eq!(event.symbol, "BNBBTC");
    assert_eq!(event.trade_id, 12345);
    assert_eq!(event.price, "0.001");
    assert_eq!(event.quantity, "100");
    assert!(event.is_buyer_maker);
}

#[test]
fn combined_envelope_symbol_is_uppercased_and_authoritative() {
    let raw = r#"{"stream":"btcusdt@aggTrade","data":{"e":"aggTrade","E":1,"s":"btcusdt","a":42,"p":"1","q":"2","f":1,"l":2,"T":3,"m":false,"M":false}}"#;
    let event: AggTradeEvent = decode::combined(raw).unwrap();
    assert_eq!(event.symbol, "BTCUSDT");
    assert_eq!(event.agg_trade_id, 42);
}

#[test]
fn combined_kline_stamps_envelope_symbol() {
    let raw = r#"{"stream":"ethusdt@kline_1m","data":{"e":"kline","E":1,"s":"ethusdt","k":{
        "t":1,"T":2,"s":"ethusdt","i":"1m","f":1,"L":2,"o":"1","c":"2","h":"3","l":"0.5",
        "v":"10","n":4,"x":false,"q":"20","V":"5","Q":"10"}}}"#;
    let event: KlineEvent = decode::combined(raw).unwrap();
    assert_eq!(event.symbol, "ETHUSDT");
    assert_eq!(event.kline.interval, "1m");
    assert!(!event.kline.is_final);
}

#[test]
fn depth_prev_update_id_is_optional_not_zero() {
    let with_pu = r#"{"e":"depthUpdate","E":1,"s":"BTCUSDT","U":10,"u":20,"pu":19,"b":[["1","2"]],"a":[["3","4"]]}"#;
    let event: DepthEvent = decode::flat(with_pu).unwrap();
    assert_eq!(event.prev_last_update_id, Some(19));

    let without_pu = r#"{"e":"depthUpdate","E":1,"s":"BTCUSDT","U":10,"u":20,"b":[],"a":[]}"#;
    let event: DepthEvent = decode::flat(without_pu).unwrap();
    assert_eq!(event.prev_last_update_id, None);
}

#[test]
fn all_markets_arrays_arrive_bare_and_ordered() {
    let raw = r#"[
        {"e":"24hrMiniTicker","E":1,"s":"BTCUSDT","c":"2","o":"1","h":"3","l":"1","v":"9","q":"18"},
        {"e":"24hrMiniTicker","E":2,"s":"ETHUSDT","c":"4","o":"3","h":"5","l":"3","v":"7","q":"28"}
    ]"#;
    let events: Vec<MiniMarketStatEvent> = decode::flat(raw).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].symbol, "BTCUSDT");
    assert_eq!(events[1].symbol, "ETHUSDT");
}

#[test]
fn full_ticker_decodes_every_statistic() {
    let raw = r#"{"e":"24hrTicker","E":123456789,"s":"BTCUSDT","p":"100.00","P":"0.50",
        "w":"45000.50","x":"44900.00","c":"45100.00","Q":"0.001","b":"45099.00","B":"2",
        "a":"45101.00","A":"3","o":"45000.00","h":"45200.00","l":"44900.00","v":"1000.5",
        "q":"45000000.00","O":100,"C":200,"F":10,"L":20,"n":11}"#;
    let event: MarketStatEvent = decode::flat(raw).unwrap();
    assert_eq!(event.last_price, "45100.00");
    assert_eq!(event.open_time, 100);
    assert_eq!(event.close_time, 200);
    assert_eq!(event.trade_count, 11);
}

#[test]
fn user_data_decode_populates_exactly_one_variant() {
    let raw = r#"{"e":"ACCOUNT_CONFIG_UPDATE","E":1611646737479,"T":1611646737476,"ac":{"s":"BTCUSDT","l":25}}"#;
    let event: UserDataEvent = decode::flat(raw).unwrap();
    assert!(matches!(
        event,
        UserDataEvent::AccountConfigUpdate { config, .. } if config.leverage == 25
    ));
}

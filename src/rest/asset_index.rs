//! Multi-asset-mode asset index query
//!
//! GET `/fapi/v1/assetIndex` returns one record per index symbol; the
//! whole array is decoded in one typed pass.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rest::client::RestClient;

/// One entry of the asset index response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIndexEntry {
    /// Index symbol (e.g. "ADAUSD")
    pub symbol: String,

    /// Server time of the snapshot (milliseconds since Unix epoch)
    pub time: i64,

    /// Index value, decimal string
    pub index: String,

    pub bid_buffer: String,
    pub ask_buffer: String,
    pub bid_rate: String,
    pub ask_rate: String,

    pub auto_exchange_bid_buffer: String,
    pub auto_exchange_ask_buffer: String,
    pub auto_exchange_bid_rate: String,
    pub auto_exchange_ask_rate: String,
}

impl RestClient {
    /// Fetch the full asset index.
    pub async fn asset_index(&self) -> Result<Vec<AssetIndexEntry>> {
        self.get_json("/fapi/v1/assetIndex").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_index_response_decodes() {
        let json = r#"[
            {
                "symbol": "ADAUSD",
                "time": 1635740268004,
                "index": "1.92957370",
                "bidBuffer": "0.10000000",
                "askBuffer": "0.10000000",
                "bidRate": "1.73661633",
                "askRate": "2.12253107",
                "autoExchangeBidBuffer": "0.05000000",
                "autoExchangeAskBuffer": "0.05000000",
                "autoExchangeBidRate": "1.83309502",
                "autoExchangeAskRate": "2.02605239"
            },
            {
                "symbol": "BTCUSD",
                "time": 1635740268004,
                "index": "60962.26191361",
                "bidBuffer": "0.05000000",
                "askBuffer": "0.05000000",
                "bidRate": "57914.14881793",
                "askRate": "64010.37500929",
                "autoExchangeBidBuffer": "0.02500000",
                "autoExchangeAskBuffer": "0.02500000",
                "autoExchangeBidRate": "59438.20536577",
                "autoExchangeAskRate": "62486.31846145"
            }
        ]"#;

        let entries: Vec<AssetIndexEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].symbol, "ADAUSD");
        assert_eq!(entries[0].index, "1.92957370");
        assert_eq!(entries[1].auto_exchange_ask_rate, "62486.31846145");
    }
}

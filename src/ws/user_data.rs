//! Private user-data stream events
//!
//! User-data pushes are a discriminated union on the `e` tag; exactly one
//! payload exists per event, so the union is modeled as an enum rather
//! than a record of optionals.

use serde::{Deserialize, Serialize};

/// Event pushed on a listen-key (user data) stream
///
/// `OrderTradeUpdate` is boxed to keep the enum small; the order payload
/// dominates the variant sizes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "e")]
pub enum UserDataEvent {
    /// Order state transition (new/trade/cancel/expire)
    #[serde(rename = "ORDER_TRADE_UPDATE")]
    OrderTradeUpdate {
        #[serde(rename = "E")]
        event_time: i64,

        #[serde(rename = "T")]
        transaction_time: i64,

        #[serde(rename = "o")]
        order: Box<OrderUpdate>,
    },

    /// Balance and position changes
    #[serde(rename = "ACCOUNT_UPDATE")]
    AccountUpdate {
        #[serde(rename = "E")]
        event_time: i64,

        #[serde(rename = "T")]
        transaction_time: i64,

        #[serde(rename = "a")]
        update: AccountUpdate,
    },

    /// Per-symbol account configuration change (leverage)
    #[serde(rename = "ACCOUNT_CONFIG_UPDATE")]
    AccountConfigUpdate {
        #[serde(rename = "E")]
        event_time: i64,

        #[serde(rename = "T")]
        transaction_time: i64,

        #[serde(rename = "ac")]
        config: AccountConfigUpdate,
    },
}

/// Order payload of an `ORDER_TRADE_UPDATE` event
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderUpdate {
    /// Order ID
    #[serde(rename = "i")]
    pub order_id: i64,

    #[serde(rename = "s")]
    pub symbol: String,

    #[serde(rename = "c")]
    pub client_order_id: String,

    /// BUY or SELL
    #[serde(rename = "S")]
    pub side: String,

    /// Order type (LIMIT, MARKET, ...)
    #[serde(rename = "o")]
    pub order_type: String,

    #[serde(rename = "f")]
    pub time_in_force: String,

    #[serde(rename = "q")]
    pub quantity: String,

    /// Original order price
    #[serde(rename = "p")]
    pub price: String,

    /// Average fill price
    #[serde(rename = "ap")]
    pub avg_price: String,

    #[serde(rename = "sp", default)]
    pub stop_price: String,

    /// Execution type for this event (NEW, TRADE, ...)
    #[serde(rename = "x")]
    pub execution_type: String,

    /// Order status after this event
    #[serde(rename = "X")]
    pub status: String,

    /// Quantity of the latest fill
    #[serde(rename = "l")]
    pub last_filled_quantity: String,

    /// Cumulative filled quantity
    #[serde(rename = "z")]
    pub filled_quantity: String,

    /// Price of the latest fill
    #[serde(rename = "L")]
    pub last_filled_price: String,

    #[serde(rename = "N", default)]
    pub fee_asset: String,

    #[serde(rename = "n", default)]
    pub fee_cost: String,

    #[serde(rename = "T")]
    pub transaction_time: i64,

    #[serde(rename = "t")]
    pub trade_id: i64,

    #[serde(rename = "b", default)]
    pub bid_notional: String,

    #[serde(rename = "a", default)]
    pub ask_notional: String,

    /// Was this fill on the maker side?
    #[serde(rename = "m", default)]
    pub is_maker: bool,

    #[serde(rename = "R", default)]
    pub is_reduce_only: bool,

    /// Original order type before any conversion
    #[serde(rename = "ot", default)]
    pub original_order_type: String,

    #[serde(rename = "ps", default)]
    pub position_side: String,

    #[serde(rename = "AP", default)]
    pub activation_price: String,

    #[serde(rename = "rp", default)]
    pub realized_profit: String,
}

/// Payload of an `ACCOUNT_UPDATE` event
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountUpdate {
    /// Reason for the update (DEPOSIT, ORDER, FUNDING_FEE, ...)
    #[serde(rename = "m")]
    pub reason: String,

    #[serde(rename = "B", default)]
    pub balances: Vec<BalanceUpdate>,

    #[serde(rename = "P", default)]
    pub positions: Vec<PositionUpdate>,
}

/// One balance entry in an [`AccountUpdate`]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BalanceUpdate {
    #[serde(rename = "a")]
    pub asset: String,

    #[serde(rename = "wb")]
    pub wallet_balance: String,

    #[serde(rename = "cw")]
    pub cross_wallet_balance: String,

    #[serde(rename = "bc", default)]
    pub balance_change: String,
}

/// One position entry in an [`AccountUpdate`]
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PositionUpdate {
    #[serde(rename = "s")]
    pub symbol: String,

    #[serde(rename = "pa")]
    pub position_amount: String,

    #[serde(rename = "ep")]
    pub entry_price: String,

    #[serde(rename = "cr")]
    pub accumulated_realized: String,

    #[serde(rename = "up")]
    pub unrealized_pnl: String,

    #[serde(rename = "mt")]
    pub margin_type: String,

    #[serde(rename = "iw", default)]
    pub isolated_wallet: String,

    #[serde(rename = "ps")]
    pub position_side: String,
}

/// Payload of an `ACCOUNT_CONFIG_UPDATE` event
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfigUpdate {
    #[serde(rename = "s")]
    pub symbol: String,

    #[serde(rename = "l")]
    pub leverage: i64,
}

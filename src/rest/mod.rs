//! REST collaborator endpoints
//!
//! Only the public market-index query lives here; signed endpoints and
//! order management are out of scope.

pub mod asset_index;
pub mod client;

pub use asset_index::AssetIndexEntry;
pub use client::RestClient;

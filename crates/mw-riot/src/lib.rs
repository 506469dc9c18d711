//! mw-riot: Riot Games API client
//!
//! account-v1 と match-v5 の読み取り専用エンドポイントにアクセスし、
//! `mw_core::MatchSource` を実装します。

pub mod api;
pub mod error;
pub mod types;

pub use api::RiotApiClient;
pub use error::{Result, RiotError};

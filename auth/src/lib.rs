//! Binance futures authentication
//!
//! Credentials loading and HMAC request signing for the USD-M futures API.
//! Nothing in this crate performs network I/O.

#![deny(warnings)]
#![deny(clippy::all)]

pub mod binance;
pub mod signing;

pub use binance::{AuthError, BinanceConfig, DEFAULT_RECV_WINDOW_MS};
pub use signing::{API_KEY_HEADER, QueryParams, RequestSigner, SignedRequest};

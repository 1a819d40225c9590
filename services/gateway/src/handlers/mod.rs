//! Route handlers and the response shaping behind them

pub mod account;
pub mod health;
pub mod market;
pub mod transactions;

pub use account::AccountHandlers;
pub use health::HealthHandlers;
pub use market::MarketHandlers;
pub use transactions::TransactionHandlers;

//! MetaTrader terminal bridge integration.

pub mod auth;
pub mod client;
pub mod types;

pub use auth::{sign_request, Credentials};
pub use client::{BridgeClient, BridgeConfig};
pub use types::{PendingOrderKind, PendingOrderRequest, PendingOrderResponse};

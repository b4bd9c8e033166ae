//! Service layer for esg-report
//!
//! Business logic on top of the storage layer.

pub mod delivery;
pub mod import;

pub use delivery::{Delivery, DeliveryService};
pub use import::{ImportResult, ImportService};

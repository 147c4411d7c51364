pub mod error;
pub mod service;
pub mod session;
pub mod snapshot;

pub use crate::error::StoreError;
pub use crate::service::{DashboardSnapshot, LifeStore, LifeStoreBuilder};
pub use crate::session::Session;

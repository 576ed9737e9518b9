// src/dashboard/mod.rs
mod controller;
pub mod metrics;
mod state;

pub use controller::{DashboardController, MSG_MISSING_FIELDS, MSG_SERVER_UNREACHABLE, MSG_UNKNOWN};
pub use state::{LoadState, NavTab, PredictorState};

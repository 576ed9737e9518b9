// src/api/mod.rs
mod client;
mod error;
mod types;

pub use client::HrApiClient;
pub use error::{parse_detail, ApiError};
pub use types::{Job, JobRecord, LoginResponse, PredictForm, PredictResponse};

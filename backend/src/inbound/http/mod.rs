//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod events;
pub mod groups;
pub mod health;
pub mod profile;
pub mod schemas;
pub mod social;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod uploads;
pub mod validation;

pub use error::ApiResult;

//! Forest cover type prediction service.
//!
//! Terrain measurements are assembled into the 54-column feature vector a
//! pre-trained random forest was fit on, scaled, classified into one of seven
//! cover types, and recorded in a per-session history that can be exported
//! as CSV.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod ml;
pub mod models;
pub mod progress;
pub mod session;

pub use error::{AppError, Result};

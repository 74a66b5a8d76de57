//! Container loading calculator.
//!
//! Given a carton and a shipping container, `optimizer::compute_arrangements`
//! ranks every axis-aligned orientation by how many whole cartons fit.
//! The `api` module exposes the calculator over HTTP.

pub mod api;
pub mod config;
pub mod model;
pub mod optimizer;
pub mod telemetry;
pub mod types;

//! # wander API
//!
//! HTTP surface for the wander recommender: catalog lookups and the
//! recommendations endpoint, with one error boundary mapping failures to
//! status codes.

pub mod rest;

pub use rest::{ApiError, AppState, RestApi};

//! Backend runtime entry point and public API surface.
//!
//! This crate owns the backend lifecycle, routes bridge messages to the
//! notification service handlers, and exposes the HTTP client for the
//! booking backend's notifications API.

mod app;
pub mod client;
mod config;
mod runtime;
mod services;
mod state;

pub use crate::runtime::run;

//! Backend service handlers for frontend-driven requests.
//!
//! Each handler runs on its own task, performs one call against the
//! notifications API and answers the frontend with exactly one response
//! message.

pub mod config_service;
pub mod notification_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;

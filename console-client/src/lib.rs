//! Console Client Library
//!
//! This library provides the data layer the admin console screens talk to:
//! - `HttpClient`, the single envelope-aware wrapper around the HTTP transport
//! - `ApiOutcome`, one discriminated result for transport and business failures
//! - Notifiers and the `NotifyingGateway` used by presentation code
//! - Typed service calls for login, users, and activities

pub mod client;
pub mod notify;
pub mod services;

// Re-export commonly used types
pub use client::{ApiOutcome, ClientError, HttpClient, RequestSpec};
pub use console_core::{Envelope, ErrorCatalog, Page};
pub use notify::{
    Notification, NotificationLevel, Notifier, NotifyingGateway, RecordingNotifier,
    TracingNotifier,
};

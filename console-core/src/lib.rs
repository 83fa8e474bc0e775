//! Console Core Library
//!
//! This library provides core functionality for the admin console data layer including:
//! - The uniform response envelope returned by every backend call
//! - The static HTTP status error catalog
//! - Configuration management
//! - Domain records for users and activities

pub mod catalog;
pub mod config;
pub mod envelope;
pub mod models;

// Re-export commonly used types
pub use catalog::ErrorCatalog;
pub use config::model::{ClientSettings, Config, NotificationSettings};
pub use envelope::{Envelope, Page};
pub use models::{
    ActivityDraft, ActivityInfo, ActivityQuery, ActivityStatus, DeleteFlag, LoginRequest,
    SortOrder, UserDraft, UserInfo, UserQuery,
};

//! Notification intake: gate rules and handoff to the overlay.

pub mod dispatcher;
pub mod filter;
pub mod types;

pub use dispatcher::NotificationDispatcher;
pub use filter::decide;
pub use types::{Decision, NotificationEvent, Orientation, SuppressReason};

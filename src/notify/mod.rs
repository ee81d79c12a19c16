//! Notification Module

pub mod mailer;

pub use mailer::{MailConfig, MailerService};

//! Alert delivery port

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Message rejected: {0}")]
    Rejected(String),

    #[error("Notifier not configured: {0}")]
    NotConfigured(String),
}

/// How a message finally went out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryReceipt {
    /// Accepted with markup
    Formatted,
    /// Markup was rejected; accepted as plain text on retry
    PlainFallback,
    /// Written locally instead of sent (dry run)
    Printed,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver one finished message body
    async fn deliver(&self, message: &str) -> Result<DeliveryReceipt, NotifierError>;
}

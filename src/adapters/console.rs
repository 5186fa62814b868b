//! Console sink for dry runs and previews

use async_trait::async_trait;

use crate::ports::{AlertSink, DeliveryReceipt, NotifierError};

/// Writes each message to stdout followed by a separator line
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AlertSink for ConsoleSink {
    async fn deliver(&self, message: &str) -> Result<DeliveryReceipt, NotifierError> {
        println!("{}", message.trim_end());
        println!("{}", "-".repeat(40));
        Ok(DeliveryReceipt::Printed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_sink_reports_printed() {
        let receipt = ConsoleSink::new().deliver("*hello*").await.unwrap();
        assert_eq!(receipt, DeliveryReceipt::Printed);
    }
}

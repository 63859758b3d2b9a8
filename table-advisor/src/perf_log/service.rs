//! Channel-backed performance log sink

use super::{LogError, PerformanceLogSink};
use async_trait::async_trait;
use shared::models::PerformanceLogEntry;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Queues entries for a [`PerformanceLogWorker`](super::PerformanceLogWorker)
///
/// Never blocks: a full channel drops the remaining entries of the batch
/// and reports [`LogError::ChannelFull`].
#[derive(Debug)]
pub struct PerformanceLogService {
    tx: mpsc::Sender<PerformanceLogEntry>,
}

impl PerformanceLogService {
    pub fn new(buffer_size: usize) -> (Arc<Self>, mpsc::Receiver<PerformanceLogEntry>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        (Arc::new(Self { tx }), rx)
    }
}

#[async_trait]
impl PerformanceLogSink for PerformanceLogService {
    async fn record_performance(&self, entries: Vec<PerformanceLogEntry>) -> Result<(), LogError> {
        for entry in entries {
            self.tx.try_send(entry).map_err(|e| match e {
                TrySendError::Full(_) => LogError::ChannelFull,
                TrySendError::Closed(_) => LogError::ChannelClosed,
            })?;
        }
        Ok(())
    }
}

//! Status surface adapters.

use std::sync::Mutex;

use crate::infrastructure::ports::{PipelineStatus, StatusPort};

/// Writes every status transition to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatusSink;

impl StatusPort for TracingStatusSink {
    fn report(&self, status: PipelineStatus) {
        if status.is_error() {
            tracing::error!(status = %status, "Dream pipeline status");
        } else {
            tracing::info!(status = %status, "Dream pipeline status");
        }
    }
}

/// Remembers every reported status, oldest first.
#[derive(Debug, Default)]
pub struct MemoryStatusSink {
    reports: Mutex<Vec<PipelineStatus>>,
}

impl MemoryStatusSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<PipelineStatus> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Most recent status, i.e. what a status label would currently show.
    pub fn current(&self) -> Option<PipelineStatus> {
        self.reports().last().cloned()
    }
}

impl StatusPort for MemoryStatusSink {
    fn report(&self, status: PipelineStatus) {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(status);
    }
}

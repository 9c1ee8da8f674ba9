//! Alert dispatch seam.
//!
//! Delivery is fire-and-forget: the agent never inspects acknowledgements
//! and never retries. Sinks report failures through `Result` so the agent
//! can log them.

use crate::types::StaffId;
use std::sync::{Arc, Mutex};

pub trait AlertSink {
    fn notify(&mut self, staff_id: &str, message: &str) -> anyhow::Result<()>;
}

/// Send `message` to each staff member in order.
/// A failed delivery is logged and skipped; returns how many succeeded.
pub fn bulk_alert(sink: &mut dyn AlertSink, staff_ids: &[StaffId], message: &str) -> usize {
    let mut delivered = 0;
    for staff_id in staff_ids {
        match sink.notify(staff_id, message) {
            Ok(())  => delivered += 1,
            Err(e) => log::warn!("alert to {staff_id} failed: {e:#}"),
        }
    }
    delivered
}

/// Writes one timestamped line per alert to the log.
#[derive(Debug, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn notify(&mut self, staff_id: &str, message: &str) -> anyhow::Result<()> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        log::info!("[{timestamp}] Alert sent to {staff_id}: {message}");
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentAlert {
    pub staff_id: StaffId,
    pub message:  String,
}

/// Keeps every alert in memory for later inspection.
/// Clones share the same buffer, so a caller can hand one clone to the
/// agent and read alerts back through another.
#[derive(Debug, Clone, Default)]
pub struct RecordingAlertSink {
    sent: Arc<Mutex<Vec<SentAlert>>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts recorded so far. A poisoned buffer is still read back in full.
    pub fn sent(&self) -> Vec<SentAlert> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl AlertSink for RecordingAlertSink {
    fn notify(&mut self, staff_id: &str, message: &str) -> anyhow::Result<()> {
        let mut sent = self
            .sent
            .lock()
            .map_err(|_| anyhow::anyhow!("alert buffer poisoned"))?;
        sent.push(SentAlert {
            staff_id: staff_id.to_string(),
            message:  message.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_alerts_survive_a_poisoned_buffer() {
        let mut sink = RecordingAlertSink::new();
        sink.notify("n1", "hello").unwrap();

        let shared = sink.sent.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.lock().unwrap();
            panic!("poison the buffer");
        })
        .join();

        assert!(sink.sent.is_poisoned());
        let sent = sink.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].staff_id, "n1");
    }

    #[test]
    fn bulk_alert_counts_only_successful_deliveries() {
        struct RejectOdd;
        impl AlertSink for RejectOdd {
            fn notify(&mut self, staff_id: &str, _message: &str) -> anyhow::Result<()> {
                if staff_id.ends_with(['1', '3']) {
                    anyhow::bail!("rejected {staff_id}");
                }
                Ok(())
            }
        }

        let ids: Vec<StaffId> = ["s1", "s2", "s3", "s4"].map(String::from).to_vec();
        assert_eq!(bulk_alert(&mut RejectOdd, &ids, "msg"), 2);
    }
}

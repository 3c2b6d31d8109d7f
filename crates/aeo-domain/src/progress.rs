//! Progress event plumbing: a per-job ring buffer for late subscribers, broadcast to
//! every live subscriber as events are appended.

use aeo_types::ProgressEvent;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// How many trailing events a late subscriber can replay before joining the
/// live broadcast.
const TAIL_CAPACITY: usize = 32;
const CHANNEL_CAPACITY: usize = 256;

struct JobChannel {
    sender: broadcast::Sender<ProgressEvent>,
    tail: Mutex<VecDeque<ProgressEvent>>,
}

impl JobChannel {
    fn new() -> Self {
        let (sender, _receiver) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender, tail: Mutex::new(VecDeque::with_capacity(TAIL_CAPACITY)) }
    }
}

/// Broadcasts `ProgressEvent`s keyed by job-id. Events within one job are
/// totally ordered because `DomainOrchestrator` is the single writer.
#[derive(Clone, Default)]
pub struct ProgressHub {
    channels: Arc<DashMap<String, Arc<JobChannel>>>,
}

impl ProgressHub {
    pub fn new() -> Self {
        Self { channels: Arc::new(DashMap::new()) }
    }

    fn channel_for(&self, job_id: &str) -> Arc<JobChannel> {
        self.channels.entry(job_id.to_string()).or_insert_with(|| Arc::new(JobChannel::new())).clone()
    }

    pub fn publish(&self, job_id: &str, event: ProgressEvent) {
        let channel = self.channel_for(job_id);
        let _ = channel.sender.send(event.clone());
        let mut tail = channel.tail.lock().expect("progress tail mutex poisoned");
        tail.push_back(event);
        if tail.len() > TAIL_CAPACITY {
            tail.pop_front();
        }
    }

    /// Replay the buffered tail, then hand back a live receiver for events
    /// published after the subscription started.
    pub fn subscribe(&self, job_id: &str) -> (Vec<ProgressEvent>, broadcast::Receiver<ProgressEvent>) {
        let channel = self.channel_for(job_id);
        let tail = channel.tail.lock().expect("progress tail mutex poisoned").iter().cloned().collect();
        (tail, channel.sender.subscribe())
    }

    /// Drop a job's channel once it is terminal and has no further
    /// subscribers to notify (called by the orchestrator's TTL sweep).
    pub fn close(&self, job_id: &str) {
        self.channels.remove(job_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::JobStatus;

    fn event(message: &str) -> ProgressEvent {
        ProgressEvent {
            status: JobStatus::Auditing,
            current_step: "auditing".into(),
            percentage: 50.0,
            pages_audited: 1,
            total_urls: 2,
            urls_discovered: 2,
            message: message.into(),
            current_url: None,
        }
    }

    #[test]
    fn late_subscriber_replays_tail() {
        let hub = ProgressHub::new();
        hub.publish("job-1", event("first"));
        hub.publish("job-1", event("second"));

        let (tail, _rx) = hub.subscribe("job-1");
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].message, "first");
        assert_eq!(tail[1].message, "second");
    }

    #[tokio::test]
    async fn live_subscriber_receives_events_published_after_subscribing() {
        let hub = ProgressHub::new();
        let (_tail, mut rx) = hub.subscribe("job-1");
        hub.publish("job-1", event("live"));
        let received = rx.recv().await.unwrap();
        assert_eq!(received.message, "live");
    }
}

//! Process-wide job-id → `JobRecord` map.
//!
//! The domain orchestrator is the only writer;
//! everything else — the progress SSE handler, the result-fetch handler —
//! only reads. Modeled as a typed store instead of the source's
//! module-level dict.

use aeo_types::JobRecord;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<DashMap<String, JobRecord>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self { jobs: Arc::new(DashMap::new()) }
    }

    pub fn insert(&self, record: JobRecord) {
        self.jobs.insert(record.job_id.clone(), record);
    }

    pub fn get(&self, job_id: &str) -> Option<JobRecord> {
        self.jobs.get(job_id).map(|entry| entry.clone())
    }

    pub fn update(&self, job_id: &str, f: impl FnOnce(&mut JobRecord)) {
        if let Some(mut entry) = self.jobs.get_mut(job_id) {
            f(&mut entry);
        }
    }

    pub fn remove(&self, job_id: &str) -> Option<JobRecord> {
        self.jobs.remove(job_id).map(|(_, record)| record)
    }

    /// Evict terminal jobs older than `ttl`. Returns the evicted
    /// job-ids so the caller can also tear down their progress channels.
    pub fn sweep_expired(&self, ttl: Duration) -> Vec<String> {
        let now = Utc::now();
        let mut evicted = Vec::new();
        self.jobs.retain(|job_id, record| {
            if !record.status.is_terminal() {
                return true;
            }
            let keep = match now.signed_duration_since(record.created_at).to_std() {
                Ok(age) => age < ttl,
                Err(_) => true,
            };
            if !keep {
                evicted.push(job_id.clone());
            }
            keep
        });
        evicted
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aeo_types::JobStatus;

    #[test]
    fn insert_and_get_round_trips() {
        let store = JobStore::new();
        store.insert(JobRecord::new("job-1"));
        let record = store.get("job-1").unwrap();
        assert_eq!(record.status, JobStatus::Queued);
    }

    #[test]
    fn update_mutates_in_place() {
        let store = JobStore::new();
        store.insert(JobRecord::new("job-1"));
        store.update("job-1", |r| r.status = JobStatus::Auditing);
        assert_eq!(store.get("job-1").unwrap().status, JobStatus::Auditing);
    }

    #[test]
    fn sweep_expired_keeps_non_terminal_jobs_regardless_of_age() {
        let store = JobStore::new();
        let mut record = JobRecord::new("job-1");
        record.status = JobStatus::Auditing;
        record.created_at = Utc::now() - chrono::Duration::hours(10);
        store.insert(record);
        let evicted = store.sweep_expired(Duration::from_secs(1));
        assert!(evicted.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn sweep_expired_evicts_old_terminal_jobs() {
        let store = JobStore::new();
        let mut record = JobRecord::new("job-1");
        record.status = JobStatus::Completed;
        record.created_at = Utc::now() - chrono::Duration::hours(2);
        store.insert(record);
        let evicted = store.sweep_expired(Duration::from_secs(3600));
        assert_eq!(evicted, vec!["job-1".to_string()]);
        assert_eq!(store.len(), 0);
    }
}

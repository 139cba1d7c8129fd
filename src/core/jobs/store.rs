//! TTL-bounded job store
//!
//! Key/value semantics with per-entry expiry: a record past its TTL reads
//! as absent even if it was never deleted. Two keys exist per job — the
//! mutable status record and the write-once payload — with no cross-key
//! transaction. Every write refreshes the entry's expiry.

use crate::core::jobs::types::JobRecord;
use crate::core::types::GenerationRequest;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// One stored value plus its expiry stamp
#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> Entry<T> {
    fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory job store with per-entry TTL
pub struct JobStore {
    records: DashMap<String, Entry<JobRecord>>,
    payloads: DashMap<String, Entry<GenerationRequest>>,
    ttl: Duration,
}

impl JobStore {
    /// Create a store whose entries live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: DashMap::new(),
            payloads: DashMap::new(),
            ttl,
        }
    }

    /// Insert or overwrite the status record for a job
    pub fn put_record(&self, record: JobRecord) {
        self.records
            .insert(record.id.clone(), Entry::new(record, self.ttl));
    }

    /// Read a job's status record; expired entries read as absent
    pub fn get_record(&self, id: &str) -> Option<JobRecord> {
        {
            let entry = self.records.get(id)?;
            if !entry.is_expired() {
                return Some(entry.value.clone());
            }
        }
        // Entry guard dropped above; removing while holding it would
        // deadlock the shard.
        self.records.remove(id);
        None
    }

    /// Mutate a record under its entry lock
    ///
    /// This is the compare-and-swap point for status transitions: the
    /// closure runs while the shard entry is held, so two racing callers
    /// cannot both observe `queued`. Returns `None` for unknown or expired
    /// jobs. The expiry is refreshed on mutation.
    pub fn with_record_mut<R>(&self, id: &str, f: impl FnOnce(&mut JobRecord) -> R) -> Option<R> {
        let mut entry = self.records.get_mut(id)?;
        if entry.is_expired() {
            drop(entry);
            self.records.remove(id);
            return None;
        }
        let result = f(&mut entry.value);
        entry.expires_at = Instant::now() + self.ttl;
        Some(result)
    }

    /// Delete a job's status record
    pub fn delete_record(&self, id: &str) -> bool {
        self.records.remove(id).is_some()
    }

    /// Store the write-once payload for a job
    pub fn put_payload(&self, id: &str, request: GenerationRequest) {
        self.payloads
            .insert(id.to_string(), Entry::new(request, self.ttl));
    }

    /// Read a job's payload
    pub fn get_payload(&self, id: &str) -> Option<GenerationRequest> {
        {
            let entry = self.payloads.get(id)?;
            if !entry.is_expired() {
                return Some(entry.value.clone());
            }
        }
        self.payloads.remove(id);
        None
    }

    /// Purge a job's payload (terminal transition, cancel, delete)
    pub fn delete_payload(&self, id: &str) -> bool {
        self.payloads.remove(id).is_some()
    }

    /// Recent unexpired records, newest first
    pub fn list_recent(&self, limit: usize) -> Vec<JobRecord> {
        let mut records: Vec<JobRecord> = self
            .records
            .iter()
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        records
    }

    /// Drop expired entries from both maps
    pub fn sweep(&self) {
        let before = self.records.len() + self.payloads.len();
        self.records.retain(|_, entry| !entry.is_expired());
        self.payloads.retain(|_, entry| !entry.is_expired());
        let removed = before - (self.records.len() + self.payloads.len());
        if removed > 0 {
            debug!(removed, "Swept expired job entries");
        }
    }
}

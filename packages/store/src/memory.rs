//! In-memory record store.
//!
//! Collections live behind a single `RwLock`. Readers clone out the
//! matching records so the lock is never held across an aggregation.
//!
//! The `insert_*` and `upsert_case` methods are the adapter's write side.
//! Intake code holding a shared handle can call them while aggregations
//! are in flight; each write takes the lock on its own, so a multi-call
//! read such as the overview may see a write between two of its calls.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use rights_monitor_store_models::{
    CaseRecord, Document, Predicate, ReportRecord, VictimRecord,
};

use crate::{Collection, RecordStore, StoreError, snapshot::Snapshot};

/// A [`RecordStore`] backed by in-process vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Snapshot>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a snapshot's records.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Snapshot>, StoreError> {
        self.inner.read().map_err(|e| StoreError::Unavailable {
            message: format!("lock poisoned: {e}"),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Snapshot>, StoreError> {
        self.inner.write().map_err(|e| StoreError::Unavailable {
            message: format!("lock poisoned: {e}"),
        })
    }

    /// Adds a case. Visible to every read that starts after this returns.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store lock is poisoned.
    pub fn insert_case(&self, case: CaseRecord) -> Result<(), StoreError> {
        self.write()?.cases.push(case);
        Ok(())
    }

    /// Replaces the case with the same `case_id`, or adds it if absent.
    ///
    /// Returns `true` if an existing case was replaced.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store lock is poisoned.
    pub fn upsert_case(&self, case: CaseRecord) -> Result<bool, StoreError> {
        let mut inner = self.write()?;
        if let Some(existing) = inner.cases.iter_mut().find(|c| c.case_id == case.case_id) {
            *existing = case;
            return Ok(true);
        }
        inner.cases.push(case);
        Ok(false)
    }

    /// Adds an incident report.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store lock is poisoned.
    pub fn insert_report(&self, report: ReportRecord) -> Result<(), StoreError> {
        self.write()?.reports.push(report);
        Ok(())
    }

    /// Adds a victim profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store lock is poisoned.
    pub fn insert_victim(&self, victim: VictimRecord) -> Result<(), StoreError> {
        self.write()?.victims.push(victim);
        Ok(())
    }
}

fn matching<T: Document + Clone>(records: &[T], predicate: &Predicate) -> Vec<T> {
    records
        .iter()
        .filter(|r| predicate.matches(*r))
        .cloned()
        .collect()
}

fn count_matching<T: Document>(records: &[T], predicate: &Predicate) -> u64 {
    records.iter().filter(|r| predicate.matches(*r)).count() as u64
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_cases(&self, predicate: &Predicate) -> Result<Vec<CaseRecord>, StoreError> {
        Ok(matching(&self.read()?.cases, predicate))
    }

    async fn fetch_reports(
        &self,
        predicate: &Predicate,
    ) -> Result<Vec<ReportRecord>, StoreError> {
        Ok(matching(&self.read()?.reports, predicate))
    }

    async fn count(
        &self,
        collection: Collection,
        predicate: &Predicate,
    ) -> Result<u64, StoreError> {
        let inner = self.read()?;
        Ok(match collection {
            Collection::Cases => count_matching(&inner.cases, predicate),
            Collection::IncidentReports => count_matching(&inner.reports, predicate),
            Collection::Victims => count_matching(&inner.victims, predicate),
        })
    }
}

//! In-memory record collections.
//!
//! A [`Collection`] owns one entity's records for the lifetime of the process.
//! It is seeded once and never implicitly reset; every mutation goes through
//! the owning repository.

use metrics::counter;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::error::RepositoryError;
use crate::models::{Record, RecordId};

/// Ordered, id-unique record storage
#[derive(Debug)]
pub struct Collection<T: Record> {
    records: RwLock<Vec<T>>,
    /// Cleared to simulate an outage of the backing service
    available: AtomicBool,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Builds a collection from seed records, rejecting duplicate ids.
    pub fn seeded(records: Vec<T>) -> Result<Self, RepositoryError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(RepositoryError::conflict(format!(
                    "duplicate {} id {} in seed data",
                    T::ENTITY,
                    record.id()
                )));
            }
        }
        Ok(Self {
            records: RwLock::new(records),
            available: AtomicBool::new(true),
        })
    }

    /// Switches the simulated backing service on or off.
    ///
    /// While unavailable, `snapshot`, `get` and every mutation fail with
    /// [`RepositoryError::Unavailable`]; stored records are kept.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
        tracing::debug!(entity = T::ENTITY, available, "Collection availability changed");
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn ensure_available(&self) -> Result<(), RepositoryError> {
        if self.is_available() {
            Ok(())
        } else {
            Err(RepositoryError::unavailable(T::ENTITY))
        }
    }

    /// Copy of every record in insertion order
    pub async fn snapshot(&self) -> Result<Vec<T>, RepositoryError> {
        self.ensure_available()?;
        Ok(self.records.read().await.clone())
    }

    /// Shared read access held across a multi-collection check
    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.records.read().await
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn get(&self, id: RecordId) -> Result<T, RepositoryError> {
        self.ensure_available()?;
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(T::ENTITY, id))
    }

    pub async fn contains(&self, id: RecordId) -> bool {
        self.records
            .read()
            .await
            .iter()
            .any(|record| record.id() == id)
    }

    /// Records matching `predicate`, in insertion order
    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.records
            .read()
            .await
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    pub async fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        self.records
            .read()
            .await
            .iter()
            .filter(|record| predicate(record))
            .count()
    }

    /// Appends a record built by `build` with the next free id (max + 1).
    ///
    /// # Errors
    ///
    /// * `RepositoryError::Conflict` when the largest stored id is
    ///   `RecordId::MAX` and no successor exists
    pub async fn insert_with<F>(&self, build: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(RecordId) -> T,
    {
        self.ensure_available()?;
        let mut records = self.records.write().await;
        let id = match records.iter().map(|record| record.id()).max() {
            None => 1,
            Some(max) => max.checked_add(1).ok_or_else(|| {
                RepositoryError::conflict(format!("{} id space exhausted at {max}", T::ENTITY))
            })?,
        };
        let mut record = build(id);
        record.set_id(id);
        records.push(record.clone());
        counter!("hrdesk_store_mutations_total", "entity" => T::ENTITY, "op" => "insert").increment(1);
        Ok(record)
    }

    /// Mutates the record with `id` in place.
    ///
    /// `mutate` works on a copy; the stored record is replaced only when it
    /// returns `Ok`, so a failed validation leaves the collection untouched.
    pub async fn update_with<F>(&self, id: RecordId, mutate: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut T) -> Result<(), RepositoryError>,
    {
        self.ensure_available()?;
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| RepositoryError::not_found(T::ENTITY, id))?;

        let mut candidate = slot.clone();
        mutate(&mut candidate)?;
        candidate.set_id(id);
        *slot = candidate.clone();
        counter!("hrdesk_store_mutations_total", "entity" => T::ENTITY, "op" => "update").increment(1);
        Ok(candidate)
    }

    /// Removes and returns the record with `id`.
    pub async fn remove(&self, id: RecordId) -> Result<T, RepositoryError> {
        self.remove_if(id, |_| Ok(())).await
    }

    /// Removes the record with `id` once `precondition` accepts it.
    ///
    /// The write lock is held from lookup to removal, so no other mutation
    /// of this collection can interleave with the check. A missing record
    /// fails with `NotFound` before `precondition` runs.
    pub async fn remove_if<F>(&self, id: RecordId, precondition: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&T) -> Result<(), RepositoryError>,
    {
        self.ensure_available()?;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| RepositoryError::not_found(T::ENTITY, id))?;
        precondition(&records[index])?;
        counter!("hrdesk_store_mutations_total", "entity" => T::ENTITY, "op" => "remove").increment(1);
        Ok(records.remove(index))
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

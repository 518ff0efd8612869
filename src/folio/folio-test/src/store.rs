/*
 * folio portfolio contact service
 * Copyright (C) 2022 viridIT SAS
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License along with
 * this program. If not, see https://www.gnu.org/licenses/.
 *
*/

use folio_common::{ContactRecord, ContactSubmission};
use folio_store::{GenericRecordStore, StorageError};

/// Record store behaving as if the disk was full: nothing can be written.
///
/// Counts the append attempts.
#[derive(Debug, Default)]
pub struct FailingStore {
    attempts: std::sync::atomic::AtomicUsize,
}

impl FailingStore {
    /// Number of append calls so far.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl GenericRecordStore for FailingStore {
    async fn initialize(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn append(&self, _: &ContactSubmission) -> Result<i64, StorageError> {
        self.attempts
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Err(StorageError::Sqlite(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
            Some("database or disk is full".to_owned()),
        )))
    }

    async fn get(&self, _: i64) -> Result<Option<ContactRecord>, StorageError> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<ContactRecord>, StorageError> {
        Ok(vec![])
    }
}

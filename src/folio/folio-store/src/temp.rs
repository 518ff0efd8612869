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

use crate::{GenericRecordStore, StorageError};
use folio_common::{ContactRecord, ContactSubmission};

/// [`crate::RecordStore`] writing in a fresh temporary directory.
#[derive(Debug)]
pub struct RecordStore {
    inner: crate::RecordStore,
    // keep the directory alive as long as the store
    _dir: tempfile::TempDir,
}

impl RecordStore {
    /// Create a store in a new temporary directory, the table is not created yet.
    ///
    /// # Errors
    ///
    /// * the temporary directory cannot be created
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;

        Ok(Self {
            inner: crate::RecordStore::new(dir.path().join("messages.db")),
            _dir: dir,
        })
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        self.inner.path()
    }
}

#[async_trait::async_trait]
impl GenericRecordStore for RecordStore {
    async fn initialize(&self) -> Result<(), StorageError> {
        self.inner.initialize().await
    }

    async fn append(&self, submission: &ContactSubmission) -> Result<i64, StorageError> {
        self.inner.append(submission).await
    }

    async fn get(&self, id: i64) -> Result<Option<ContactRecord>, StorageError> {
        self.inner.get(id).await
    }

    async fn list(&self) -> Result<Vec<ContactRecord>, StorageError> {
        self.inner.list().await
    }

    async fn count(&self) -> Result<usize, StorageError> {
        self.inner.count().await
    }
}

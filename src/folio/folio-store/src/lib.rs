//! folio record store

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

#![doc(html_no_source)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
//
#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
//
#![allow(clippy::multiple_crate_versions)]

mod error;
mod sqlite;

/// Record store living in a temporary directory, removed on drop.
#[cfg(any(test, feature = "testing"))]
pub mod temp;

pub use error::StorageError;
pub use sqlite::RecordStore;

use folio_common::{ContactRecord, ContactSubmission};

/// Durable, append-only storage of the contact submissions.
///
/// There is no update or delete operation: a stored submission is never modified.
#[async_trait::async_trait]
pub trait GenericRecordStore: std::fmt::Debug + Send + Sync {
    /// Ensure the table exists. Idempotent, called on every startup.
    async fn initialize(&self) -> Result<(), StorageError>;

    /// Insert one submission, the store assigns the identifier and the timestamp.
    ///
    /// Returns the identifier of the new record.
    async fn append(&self, submission: &ContactSubmission) -> Result<i64, StorageError>;

    /// Fetch one record.
    async fn get(&self, id: i64) -> Result<Option<ContactRecord>, StorageError>;

    /// Every record, ordered by identifier.
    async fn list(&self) -> Result<Vec<ContactRecord>, StorageError>;

    /// Number of records.
    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.list().await?.len())
    }
}

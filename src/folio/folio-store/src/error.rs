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

/// Failure of the record store.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The database file cannot be opened.
    #[error("record store unreachable at '{}': {source}", .path.display())]
    Open {
        /// database file
        path: std::path::PathBuf,
        /// underlying error
        source: rusqlite::Error,
    },
    /// The directory of the database file cannot be created.
    #[error("cannot create directory '{}': {source}", .path.display())]
    Directory {
        /// directory of the database file
        path: std::path::PathBuf,
        /// underlying error
        source: std::io::Error,
    },
    /// A statement was rejected.
    #[error("record store query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored timestamp cannot be read back.
    #[error("invalid timestamp '{value}' for record {id}: {source}")]
    Timestamp {
        /// record identifier
        id: i64,
        /// raw column value
        value: String,
        /// parsing error
        source: time::error::Parse,
    },
    /// The blocking task running the statement panicked or was cancelled.
    #[error("record store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

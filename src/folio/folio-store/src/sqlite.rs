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
use folio_common::{ContactRecord, ContactSubmission, Field};
use rusqlite::{params, Connection, OptionalExtension};

// Same layout as the table created by the first version of the website,
// so an existing `messages.db` is picked up as is.
const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    email TEXT,
    phone TEXT,
    title TEXT,
    service TEXT,
    timeline TEXT,
    budget TEXT,
    message TEXT,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
)";

const INSERT: &str = "INSERT INTO messages (name, email, phone, title, service, timeline, budget, message)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const SELECT: &str = "SELECT id, name, email, phone, title, service, timeline, budget, message, timestamp
    FROM messages";

// `CURRENT_TIMESTAMP` is UTC with a second precision.
const TIMESTAMP_FORMAT: &[time::format_description::FormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

// Wait for concurrent writers instead of failing with `SQLITE_BUSY`.
const BUSY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// `SQLite` implementation of the [`GenericRecordStore`].
///
/// No connection is kept: each operation opens its own and closes it when done,
/// whatever the outcome.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: std::path::PathBuf,
}

struct RawRecord {
    id: i64,
    fields: [String; 8],
    timestamp: String,
}

impl RawRecord {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let text = |idx: usize| -> rusqlite::Result<String> {
            Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
        };

        Ok(Self {
            id: row.get(0)?,
            fields: [
                text(1)?,
                text(2)?,
                text(3)?,
                text(4)?,
                text(5)?,
                text(6)?,
                text(7)?,
                text(8)?,
            ],
            timestamp: row.get(9)?,
        })
    }

    fn into_record(self) -> Result<ContactRecord, StorageError> {
        let created_at = time::PrimitiveDateTime::parse(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|source| StorageError::Timestamp {
                id: self.id,
                value: self.timestamp.clone(),
                source,
            })?
            .assume_utc();

        let [name, email, phone, title, service, timeline, budget, message] = self.fields;

        Ok(ContactRecord {
            id: self.id,
            name,
            email,
            phone,
            title,
            service,
            timeline,
            budget,
            message,
            created_at,
        })
    }
}

impl RecordStore {
    /// Create a store for the database file at `path`.
    ///
    /// Nothing is opened until [`GenericRecordStore::initialize`] is called.
    #[must_use]
    #[inline]
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the location given by the configuration.
    #[must_use]
    #[inline]
    pub fn from_config(config: &folio_config::Config) -> Self {
        Self::new(config.storage.path.clone())
    }

    /// Location of the database file.
    #[must_use]
    #[inline]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn connect(path: &std::path::Path) -> Result<Connection, StorageError> {
        let connection = Connection::open(path).map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        connection.busy_timeout(BUSY_TIMEOUT)?;

        Ok(connection)
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || {
            let connection = Self::connect(&path)?;
            f(&connection)
        })
        .await?
    }
}

#[async_trait::async_trait]
impl GenericRecordStore for RecordStore {
    #[tracing::instrument(skip_all, fields(path = %self.path.display()))]
    async fn initialize(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::DirBuilder::new()
                    .recursive(true)
                    .create(parent)
                    .map_err(|source| StorageError::Directory {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
        }

        self.with_connection(|connection| {
            connection.execute(CREATE_TABLE, [])?;
            Ok(())
        })
        .await?;

        tracing::info!("Record store ready.");
        Ok(())
    }

    async fn append(&self, submission: &ContactSubmission) -> Result<i64, StorageError> {
        let values = [
            Field::Name,
            Field::Email,
            Field::Phone,
            Field::Title,
            Field::Service,
            Field::Timeline,
            Field::Budget,
            Field::Message,
        ]
        .map(|field| submission.get(field).to_owned());

        let id = self
            .with_connection(move |connection| {
                let [name, email, phone, title, service, timeline, budget, message] = &values;
                connection.execute(
                    INSERT,
                    params![name, email, phone, title, service, timeline, budget, message],
                )?;
                Ok(connection.last_insert_rowid())
            })
            .await?;

        tracing::debug!(id, "Submission stored.");
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<ContactRecord>, StorageError> {
        self.with_connection(move |connection| {
            connection
                .query_row(
                    &format!("{SELECT} WHERE id = ?1"),
                    params![id],
                    RawRecord::from_row,
                )
                .optional()?
                .map(RawRecord::into_record)
                .transpose()
        })
        .await
    }

    async fn list(&self) -> Result<Vec<ContactRecord>, StorageError> {
        self.with_connection(|connection| {
            let mut statement = connection.prepare(&format!("{SELECT} ORDER BY id"))?;
            let rows = statement
                .query_map([], RawRecord::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            rows.into_iter().map(RawRecord::into_record).collect()
        })
        .await
    }

    async fn count(&self) -> Result<usize, StorageError> {
        self.with_connection(|connection| {
            let count: i64 =
                connection.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
            Ok(usize::try_from(count).unwrap_or_default())
        })
        .await
    }
}

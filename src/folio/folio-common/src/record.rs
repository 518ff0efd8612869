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

/// A contact submission as persisted in the record store.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContactRecord {
    /// Assigned by the store on insertion, strictly increasing.
    pub id: i64,
    ///
    pub name: String,
    ///
    pub email: String,
    ///
    pub phone: String,
    ///
    pub title: String,
    ///
    pub service: String,
    ///
    pub timeline: String,
    ///
    pub budget: String,
    ///
    pub message: String,
    /// Set once by the store at insertion time, UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
}

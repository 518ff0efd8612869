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

use crate::NotificationKind;

/// Failure while relaying the notifications.
///
/// The description of the underlying error is kept as text, it ends up in the
/// status shown to the visitor.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The relay cannot be reached, or the TLS handshake failed.
    #[error("cannot connect to {host}:{port}: {reason}")]
    Connect {
        ///
        host: String,
        ///
        port: u16,
        ///
        reason: String,
    },
    /// The relay refused the credentials.
    #[error("authentication failed: {0}")]
    Authenticate(String),
    /// The relay refused one of the messages.
    #[error("{kind} not sent: {reason}")]
    Send {
        /// which message was refused
        kind: NotificationKind,
        ///
        reason: String,
    },
    /// An address of the message cannot be used by the mail transport.
    #[error("invalid {role} address '{value}': {reason}")]
    Address {
        /// `from`, `to` or `reply-to`
        role: &'static str,
        ///
        value: String,
        ///
        reason: String,
    },
    /// The message cannot be built.
    #[error("cannot build {kind}: {reason}")]
    Build {
        ///
        kind: NotificationKind,
        ///
        reason: String,
    },
}

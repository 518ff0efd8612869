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

use crate::{DispatchError, Notification, Relay};

/// Sends the notifications of a submission over a single relay session.
#[derive(Clone)]
pub struct Dispatcher {
    relay: std::sync::Arc<dyn Relay>,
}

impl std::fmt::Debug for Dispatcher {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Dispatcher {
    ///
    #[must_use]
    #[inline]
    pub fn new(relay: std::sync::Arc<dyn Relay>) -> Self {
        Self { relay }
    }

    /// Open one session, send every message in order, then close the session.
    ///
    /// The first failure stops the remaining sends. Messages already accepted by
    /// the relay stay sent. The session is closed in every case once opened.
    ///
    /// # Errors
    ///
    /// * the relay cannot be reached or refuses the credentials
    /// * a message cannot be converted or is refused
    #[tracing::instrument(name = "dispatch", skip_all, fields(count = notifications.len()))]
    pub async fn send(&self, notifications: &[Notification]) -> Result<(), DispatchError> {
        let mut session = self.relay.open().await?;

        let mut outcome = Ok(());
        for notification in notifications {
            outcome = session.send(notification).await;
            if outcome.is_err() {
                break;
            }
            tracing::debug!(kind = %notification.kind, "Sent.");
        }

        session.close().await;
        outcome
    }
}

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

use crate::{DispatchError, Notification};

/// An authenticated mail relay.
#[async_trait::async_trait]
pub trait Relay: Send + Sync {
    /// Connect and authenticate.
    ///
    /// Nothing stays open if this fails.
    async fn open(&self) -> Result<Box<dyn RelaySession>, DispatchError>;
}

/// An open, authenticated session with the relay.
#[async_trait::async_trait]
pub trait RelaySession: Send {
    /// Send one message over the session.
    async fn send(&mut self, notification: &Notification) -> Result<(), DispatchError>;

    /// End the session. The session must not be used afterward.
    async fn close(&mut self);
}

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

use crate::{DispatchError, Notification, Relay, RelaySession};
use folio_config::field::Secret;
use lettre::transport::smtp::{
    authentication::{Credentials, Mechanism},
    client::{AsyncSmtpConnection, TlsParameters},
    extension::ClientId,
};

const MECHANISMS: &[Mechanism] = &[Mechanism::Plain, Mechanism::Login];

/// Relay reached over implicit TLS (SMTPS), using the account of the configuration.
pub struct SmtpRelay {
    host: String,
    port: u16,
    hello_name: ClientId,
    username: String,
    password: Secret,
}

impl std::fmt::Debug for SmtpRelay {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpRelay")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl SmtpRelay {
    /// Create a relay from the configuration. Does not connect.
    #[must_use]
    pub fn new(config: &folio_config::Config) -> Self {
        Self {
            host: config.relay.host.clone(),
            port: config.relay.port,
            hello_name: ClientId::Domain(config.server.name.clone()),
            username: config.relay.username.to_string(),
            password: config.relay.password.clone(),
        }
    }

    fn connect_error(&self, reason: impl ToString) -> DispatchError {
        DispatchError::Connect {
            host: self.host.clone(),
            port: self.port,
            reason: reason.to_string(),
        }
    }
}

struct SmtpSession {
    connection: AsyncSmtpConnection,
}

#[async_trait::async_trait]
impl Relay for SmtpRelay {
    #[tracing::instrument(name = "relay", skip_all, fields(host = %self.host, port = self.port))]
    async fn open(&self) -> Result<Box<dyn RelaySession>, DispatchError> {
        let tls = TlsParameters::new(self.host.clone()).map_err(|error| self.connect_error(error))?;

        // no timeout: the defaults of the network stack apply.
        let mut connection = AsyncSmtpConnection::connect_tokio1(
            (self.host.as_str(), self.port),
            None,
            &self.hello_name,
            Some(tls),
            None,
        )
        .await
        .map_err(|error| self.connect_error(error))?;

        let credentials = Credentials::new(
            self.username.clone(),
            self.password.expose().to_owned(),
        );
        if let Err(error) = connection.auth(MECHANISMS, &credentials).await {
            connection.abort().await;
            return Err(DispatchError::Authenticate(error.to_string()));
        }

        tracing::debug!("Relay session opened.");
        Ok(Box::new(SmtpSession { connection }))
    }
}

#[async_trait::async_trait]
impl RelaySession for SmtpSession {
    async fn send(&mut self, notification: &Notification) -> Result<(), DispatchError> {
        let message = notification.to_lettre()?;

        let response = self
            .connection
            .send(message.envelope(), &message.formatted())
            .await
            .map_err(|error| DispatchError::Send {
                kind: notification.kind,
                reason: error.to_string(),
            })?;

        tracing::debug!(
            kind = %notification.kind,
            code = %response.code(),
            "Message accepted by the relay."
        );
        Ok(())
    }

    async fn close(&mut self) {
        if let Err(error) = self.connection.quit().await {
            tracing::debug!(%error, "QUIT failed, dropping the connection.");
            self.connection.abort().await;
        }
    }
}

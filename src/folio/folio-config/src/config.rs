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

/// Process-wide configuration, loaded once at startup and never mutated.
///
/// Shared across the application as `std::sync::Arc<Config>`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where this configuration was loaded from, if it was a file.
    #[serde(skip)]
    pub path: Option<std::path::PathBuf>,
    ///
    #[serde(default)]
    pub server: field::FieldServer,
    ///
    pub relay: field::FieldRelay,
    ///
    pub contact: field::FieldContact,
    ///
    #[serde(default)]
    pub storage: field::FieldStorage,
}

/// Sections of the configuration.
pub mod field {
    use folio_common::Address;

    /// HTTP side of the service.
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct FieldServer {
        /// Socket the website listens on.
        #[serde(default = "FieldServer::default_addr")]
        pub addr: std::net::SocketAddr,
        /// Name announced to the mail relay on EHLO.
        #[serde(default = "FieldServer::default_name")]
        pub name: String,
        ///
        #[serde(default)]
        pub logs: FieldServerLogs,
    }

    /// Logging system.
    #[serde_with::serde_as]
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct FieldServerLogs {
        /// `tracing_subscriber::EnvFilter` directives.
        #[serde_as(as = "Vec<serde_with::DisplayFromStr>")]
        #[serde(default = "FieldServerLogs::default_level")]
        pub level: Vec<tracing_subscriber::filter::Directive>,
        /// Write the logs to this file, stdout is used if `None`.
        #[serde(default)]
        pub filename: Option<std::path::PathBuf>,
    }

    /// The authenticated mail relay both emails are sent through.
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct FieldRelay {
        ///
        pub host: String,
        /// Implicit TLS port, usually 465.
        pub port: u16,
        /// Account used to log in, also the sender of every email.
        pub username: Address,
        ///
        pub password: Secret,
    }

    /// Contact workflow settings.
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct FieldContact {
        /// Mailbox receiving the owner notifications.
        pub recipient: Address,
        /// Signature of the visitor acknowledgment.
        #[serde(default = "FieldContact::default_owner_name")]
        pub owner_name: String,
        /// Display name of the owner notification's sender.
        #[serde(default = "FieldContact::default_site_name")]
        pub site_name: String,
    }

    /// Record store location.
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct FieldStorage {
        /// `SQLite` database file.
        #[serde(default = "FieldStorage::default_path")]
        pub path: std::path::PathBuf,
    }

    /// A string that is never printed, nor serialized.
    #[derive(Clone, PartialEq, Eq, serde::Deserialize)]
    #[serde(transparent)]
    pub struct Secret(String);

    impl serde::Serialize for Secret {
        #[inline]
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str("***")
        }
    }

    impl Secret {
        ///
        #[must_use]
        #[inline]
        pub const fn new(inner: String) -> Self {
            Self(inner)
        }

        /// Get the secret value.
        #[must_use]
        #[inline]
        pub fn expose(&self) -> &str {
            &self.0
        }
    }

    impl std::fmt::Debug for Secret {
        #[inline]
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("Secret(***)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{field::Secret, Config};

    #[test]
    fn secret_is_not_printed() {
        let secret = Secret::new("hunter2".to_owned());
        assert_eq!(format!("{secret:?}"), "Secret(***)");
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn secret_is_not_serialized() {
        let config = Config::from_lookup(|key| {
            match key {
                "SMTP_HOST" => Some("smtp.gmail.com"),
                "SMTP_PORT" => Some("465"),
                "SMTP_USER" => Some("me@gmail.com"),
                "SMTP_PASS" => Some("hunter2"),
                "CONTACT_TO" => Some("owner@portfolio.dev"),
                _ => None,
            }
            .map(str::to_owned)
        })
        .unwrap();

        let serialized = serde_json::to_string(&config).unwrap();
        assert!(!serialized.contains("hunter2"), "{serialized}");
        assert!(serialized.contains(r#""password":"***""#), "{serialized}");
        assert_eq!(config.relay.password.expose(), "hunter2");
    }
}

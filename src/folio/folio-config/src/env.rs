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

use crate::{
    config::field::{FieldContact, FieldRelay, FieldServer, FieldServerLogs, FieldStorage, Secret},
    Config,
};
use anyhow::Context;

/// Names of the environment variables read by [`Config::from_env`].
pub mod vars {
    /// Mail relay host, required.
    pub const SMTP_HOST: &str = "SMTP_HOST";
    /// Mail relay port, required.
    pub const SMTP_PORT: &str = "SMTP_PORT";
    /// Mail relay account, required.
    pub const SMTP_USER: &str = "SMTP_USER";
    /// Mail relay password, required.
    pub const SMTP_PASS: &str = "SMTP_PASS";
    /// Owner notification recipient, required.
    pub const CONTACT_TO: &str = "CONTACT_TO";
    ///
    pub const CONTACT_OWNER_NAME: &str = "CONTACT_OWNER_NAME";
    ///
    pub const CONTACT_SITE_NAME: &str = "CONTACT_SITE_NAME";
    ///
    pub const FOLIO_ADDR: &str = "FOLIO_ADDR";
    ///
    pub const FOLIO_SERVER_NAME: &str = "FOLIO_SERVER_NAME";
    /// Comma separated list of log directives.
    pub const FOLIO_LOG: &str = "FOLIO_LOG";
    ///
    pub const FOLIO_LOG_FILE: &str = "FOLIO_LOG_FILE";
    ///
    pub const FOLIO_DB: &str = "FOLIO_DB";
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// see [`Config::from_lookup`]
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from key/value pairs, empty values are treated as absent.
    ///
    /// # Errors
    ///
    /// * a required variable is missing
    /// * the port is not an integer
    /// * an email address is invalid
    /// * a log directive is invalid
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| {
            get(key).with_context(|| format!("environment variable '{key}' is not set"))
        };

        let port = required(vars::SMTP_PORT)?;
        let port = port
            .trim()
            .parse::<u16>()
            .with_context(|| format!("'{}' must be a port number, got '{port}'", vars::SMTP_PORT))?;

        let relay = FieldRelay {
            host: required(vars::SMTP_HOST)?,
            port,
            username: required(vars::SMTP_USER)?
                .parse()
                .with_context(|| format!("invalid '{}'", vars::SMTP_USER))?,
            password: Secret::new(required(vars::SMTP_PASS)?),
        };

        let contact = FieldContact {
            recipient: required(vars::CONTACT_TO)?
                .parse()
                .with_context(|| format!("invalid '{}'", vars::CONTACT_TO))?,
            owner_name: get(vars::CONTACT_OWNER_NAME)
                .unwrap_or_else(FieldContact::default_owner_name),
            site_name: get(vars::CONTACT_SITE_NAME).unwrap_or_else(FieldContact::default_site_name),
        };

        let server = FieldServer {
            addr: get(vars::FOLIO_ADDR)
                .map(|addr| addr.parse::<std::net::SocketAddr>())
                .transpose()
                .with_context(|| format!("invalid '{}'", vars::FOLIO_ADDR))?
                .unwrap_or_else(FieldServer::default_addr),
            name: get(vars::FOLIO_SERVER_NAME).unwrap_or_else(FieldServer::default_name),
            logs: FieldServerLogs {
                level: get(vars::FOLIO_LOG)
                    .map(|level| parse_directives(&level))
                    .transpose()?
                    .unwrap_or_else(FieldServerLogs::default_level),
                filename: get(vars::FOLIO_LOG_FILE).map(Into::into),
            },
        };

        let storage = FieldStorage {
            path: get(vars::FOLIO_DB).map_or_else(FieldStorage::default_path, Into::into),
        };

        Ok(Self {
            path: None,
            server,
            relay,
            contact,
            storage,
        })
    }
}

fn parse_directives(input: &str) -> anyhow::Result<Vec<tracing_subscriber::filter::Directive>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .map(|directive| {
            directive
                .parse()
                .with_context(|| format!("invalid log directive '{directive}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    const MINIMAL: &[(&str, &str)] = &[
        (vars::SMTP_HOST, "smtp.gmail.com"),
        (vars::SMTP_PORT, "465"),
        (vars::SMTP_USER, "me@gmail.com"),
        (vars::SMTP_PASS, "app-password"),
        (vars::CONTACT_TO, "owner@portfolio.dev"),
    ];

    #[test]
    fn minimal() {
        let config = Config::from_lookup(lookup(MINIMAL)).unwrap();

        assert_eq!(config.relay.host, "smtp.gmail.com");
        assert_eq!(config.relay.port, 465);
        assert_eq!(config.relay.username.full(), "me@gmail.com");
        assert_eq!(config.relay.password.expose(), "app-password");
        assert_eq!(config.contact.recipient.full(), "owner@portfolio.dev");
        assert_eq!(config.contact.site_name, "Portfolio Website");
        assert_eq!(config.storage.path, std::path::PathBuf::from("messages.db"));
        assert_eq!(config.server.addr.port(), 5000);
        assert!(config.server.logs.filename.is_none());
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            (vars::SMTP_HOST, "smtp.gmail.com"),
            (vars::SMTP_PORT, " 2465 "),
            (vars::SMTP_USER, "me@gmail.com"),
            (vars::SMTP_PASS, "app-password"),
            (vars::CONTACT_TO, "owner@portfolio.dev"),
            (vars::CONTACT_OWNER_NAME, "Jane Doe"),
            (vars::FOLIO_ADDR, "0.0.0.0:8080"),
            (vars::FOLIO_LOG, "warn, folio_server=debug"),
            (vars::FOLIO_DB, "/var/lib/folio/messages.db"),
        ]))
        .unwrap();

        assert_eq!(config.relay.port, 2465);
        assert_eq!(config.contact.owner_name, "Jane Doe");
        assert_eq!(config.server.addr.to_string(), "0.0.0.0:8080");
        assert_eq!(
            config
                .server
                .logs
                .level
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["warn".to_owned(), "folio_server=debug".to_owned()]
        );
        assert_eq!(
            config.storage.path,
            std::path::PathBuf::from("/var/lib/folio/messages.db")
        );
    }

    #[test]
    fn missing_required() {
        for (missing, _) in MINIMAL {
            let error = Config::from_lookup(|key| {
                if key == *missing {
                    None
                } else {
                    lookup(MINIMAL)(key)
                }
            })
            .unwrap_err();

            assert!(
                format!("{error:#}").contains(missing),
                "'{error:#}' should name '{missing}'"
            );
        }
    }

    #[test]
    fn port_is_not_an_integer() {
        let error = Config::from_lookup(|key| {
            if key == vars::SMTP_PORT {
                Some("smtps".to_owned())
            } else {
                lookup(MINIMAL)(key)
            }
        })
        .unwrap_err();

        assert!(format!("{error:#}").contains("must be a port number, got 'smtps'"));
    }

    #[test]
    fn invalid_recipient() {
        let error = Config::from_lookup(|key| {
            if key == vars::CONTACT_TO {
                Some("owner".to_owned())
            } else {
                lookup(MINIMAL)(key)
            }
        })
        .unwrap_err();

        assert!(format!("{error:#}").contains("invalid 'CONTACT_TO'"));
    }
}

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

use crate::config::field::{FieldContact, FieldServer, FieldServerLogs, FieldStorage};

impl Default for FieldServer {
    fn default() -> Self {
        Self {
            addr: Self::default_addr(),
            name: Self::default_name(),
            logs: FieldServerLogs::default(),
        }
    }
}

impl FieldServer {
    pub(crate) fn default_addr() -> std::net::SocketAddr {
        std::net::SocketAddr::from(([127, 0, 0, 1], 5000))
    }

    pub(crate) fn default_name() -> String {
        "localhost".to_owned()
    }
}

impl Default for FieldServerLogs {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            filename: None,
        }
    }
}

impl FieldServerLogs {
    pub(crate) fn default_level() -> Vec<tracing_subscriber::filter::Directive> {
        vec![tracing_subscriber::filter::LevelFilter::INFO.into()]
    }
}

impl FieldContact {
    pub(crate) fn default_owner_name() -> String {
        "Portfolio Owner".to_owned()
    }

    pub(crate) fn default_site_name() -> String {
        "Portfolio Website".to_owned()
    }
}

impl Default for FieldStorage {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

impl FieldStorage {
    pub(crate) fn default_path() -> std::path::PathBuf {
        "messages.db".into()
    }
}

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

use folio_common::ContactForm;
use folio_config::{vars, Config};

/// Configuration used by the tests, the relay is never reached.
#[must_use]
pub fn local_test() -> Config {
    Config::from_lookup(|key| {
        match key {
            vars::SMTP_HOST => Some("smtp.testserver.com"),
            vars::SMTP_PORT => Some("465"),
            vars::SMTP_USER => Some("me@testserver.com"),
            vars::SMTP_PASS => Some("hunter2"),
            vars::CONTACT_TO => Some("owner@testserver.com"),
            vars::CONTACT_OWNER_NAME => Some("Jane Doe"),
            vars::FOLIO_ADDR => Some("127.0.0.1:0"),
            vars::FOLIO_SERVER_NAME => Some("testserver.com"),
            _ => None,
        }
        .map(str::to_owned)
    })
    .expect("valid test configuration")
}

/// A complete form, without the optional fields.
#[must_use]
pub fn local_form() -> ContactForm {
    ContactForm {
        name: Some("Jo".to_owned()),
        email: Some("jo@x.com".to_owned()),
        title: Some("Hi".to_owned()),
        service: Some("Web".to_owned()),
        message: Some("Hello".to_owned()),
        ..ContactForm::default()
    }
}

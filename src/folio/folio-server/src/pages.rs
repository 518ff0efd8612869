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

use askama::Template;
use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// Client side helpers of the pages: image lightbox and fade-in on scroll.
pub const SCRIPT: &str = include_str!("../static/js/main.js");

#[derive(Template)]
#[template(path = "index.html")]
pub struct Home;

#[derive(Template)]
#[template(path = "about.html")]
pub struct About;

#[derive(Template)]
#[template(path = "skills.html")]
pub struct Skills;

#[derive(Template)]
#[template(path = "projects.html")]
pub struct Projects;

#[derive(Template)]
#[template(path = "certificates.html")]
pub struct Certificates;

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFound;

/// The contact form, with the status of the last submission if any.
///
/// The status is escaped when rendered, it may contain text coming from the relay.
#[derive(Template, Default)]
#[template(path = "contact.html")]
pub struct Contact {
    pub status: Option<String>,
    pub success: bool,
}

impl Contact {
    pub fn with_status(status: &folio_common::Status) -> Self {
        Self {
            status: Some(status.to_string()),
            success: status.is_success(),
        }
    }
}

pub fn render<T: Template>(code: StatusCode, page: &T) -> Response {
    match page.render() {
        Ok(body) => (code, Html(body)).into_response(),
        Err(error) => {
            tracing::error!(%error, "Failed to render the page.");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCRIPT,
    )
        .into_response()
}

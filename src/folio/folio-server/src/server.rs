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

use crate::{pages, Stage, SubmissionHandler};
use anyhow::Context;
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Form, Router,
};
use folio_common::{ContactForm, Status};
use folio_config::Config;
use folio_delivery::Relay;
use folio_store::GenericRecordStore;

/// HTTP server of the website.
pub struct Server {
    config: std::sync::Arc<Config>,
    handler: std::sync::Arc<SubmissionHandler>,
}

impl std::fmt::Debug for Server {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("addr", &self.config.server.addr)
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

/// Create a `TCPListener` ready to be listened to
///
/// # Errors
///
/// * failed to bind to the socket address
/// * failed to set the listener to non blocking
pub fn socket_bind_anyhow<A: std::net::ToSocketAddrs + std::fmt::Debug>(
    addr: A,
) -> anyhow::Result<std::net::TcpListener> {
    let socket = std::net::TcpListener::bind(&addr)
        .with_context(|| format!("Failed to bind socket on addr: '{addr:?}'"))?;

    socket
        .set_nonblocking(true)
        .with_context(|| format!("Failed to set non-blocking socket on addr: '{addr:?}'"))?;

    Ok(socket)
}

impl Server {
    /// Create a server with the configuration provided, the record store and the mail relay.
    #[must_use]
    pub fn new(
        config: std::sync::Arc<Config>,
        store: std::sync::Arc<dyn GenericRecordStore>,
        relay: std::sync::Arc<dyn Relay>,
    ) -> Self {
        let handler = std::sync::Arc::new(SubmissionHandler::new(&config, store, relay));
        Self { config, handler }
    }

    /// Routes of the website.
    ///
    /// | method | path                 |                                   |
    /// |--------|----------------------|-----------------------------------|
    /// | GET    | `/`                  | home                              |
    /// | GET    | `/about`             | about                             |
    /// | GET    | `/skills`            | skills                            |
    /// | GET    | `/projects`          | projects                          |
    /// | GET    | `/certificates`      | certificates                      |
    /// | GET    | `/contact`           | empty contact form                |
    /// | POST   | `/contact`           | submission, form with its status  |
    /// | GET    | `/static/js/main.js` | client side script                |
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(|| async { pages::render(StatusCode::OK, &pages::Home) }))
            .route("/about", get(|| async { pages::render(StatusCode::OK, &pages::About) }))
            .route("/skills", get(|| async { pages::render(StatusCode::OK, &pages::Skills) }))
            .route(
                "/projects",
                get(|| async { pages::render(StatusCode::OK, &pages::Projects) }),
            )
            .route(
                "/certificates",
                get(|| async { pages::render(StatusCode::OK, &pages::Certificates) }),
            )
            .route("/contact", get(contact_page).post(contact_submit))
            .route("/static/js/main.js", get(|| async { pages::script() }))
            .fallback(|| async { pages::render(StatusCode::NOT_FOUND, &pages::NotFound) })
            .with_state(self.handler.clone())
    }

    /// Serve the website on the listener until `ctrl-c` is received.
    ///
    /// # Errors
    ///
    /// * cannot convert the socket to `[tokio::net::TcpListener]`
    /// * the server stopped unexpectedly
    #[tracing::instrument(name = "serve", skip_all)]
    pub async fn listen(self, listener: std::net::TcpListener) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::from_std(listener)?;
        tracing::info!(
            server = %self.config.server.name,
            addr = %listener.local_addr()?,
            "Listening for HTTP requests."
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                if let Err(error) = tokio::signal::ctrl_c().await {
                    tracing::error!(%error, "Failed to listen for the shutdown signal.");
                    std::future::pending::<()>().await;
                }
                tracing::info!("Shutdown signal received.");
            })
            .await
            .context("HTTP server stopped")
    }
}

async fn contact_page() -> Response {
    pages::render(StatusCode::OK, &pages::Contact::default())
}

async fn contact_submit(
    State(handler): State<std::sync::Arc<SubmissionHandler>>,
    form: Result<Form<ContactForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!(stage = %Stage::Failed, error = %rejection, "Contact form unreadable.");
            return pages::render(
                rejection.status(),
                &pages::Contact::with_status(&Status::Unreadable),
            );
        }
    };

    let outcome = handler.handle(form).await;
    pages::render(
        outcome.http_status(),
        &pages::Contact::with_status(&outcome.status()),
    )
}

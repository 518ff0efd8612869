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

use folio_common::{ContactForm, Status, ValidationError};
use folio_delivery::{Composer, DispatchError, Dispatcher, Relay};
use folio_store::{GenericRecordStore, StorageError};

/// Steps a submission goes through, a submission only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    /// The form arrived.
    Received,
    /// Every required field is present.
    Validated,
    /// The record is durable.
    Persisted,
    /// Both emails were accepted by the relay.
    Notified,
    /// Terminal, something went wrong after the form arrived.
    Failed,
}

/// Result of the handling of one submission.
#[derive(Debug)]
pub enum Outcome {
    /// Stored and both emails sent.
    Notified {
        /// Identifier of the stored record.
        id: i64,
    },
    /// A required field is missing, nothing was stored.
    Rejected(ValidationError),
    /// The record could not be stored, no email was sent.
    StorageFailed(StorageError),
    /// The record is stored, but the emails failed.
    DispatchFailed {
        /// Identifier of the stored record.
        id: i64,
        /// The failure of the relay.
        error: DispatchError,
    },
}

impl Outcome {
    /// Last stage reached.
    #[must_use]
    #[inline]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Notified { .. } => Stage::Notified,
            Self::Rejected(_) | Self::StorageFailed(_) | Self::DispatchFailed { .. } => {
                Stage::Failed
            }
        }
    }

    /// Identifier of the stored record, if the submission went that far.
    #[must_use]
    #[inline]
    pub const fn record_id(&self) -> Option<i64> {
        match self {
            Self::Notified { id } | Self::DispatchFailed { id, .. } => Some(*id),
            Self::Rejected(_) | Self::StorageFailed(_) => None,
        }
    }

    /// Status line shown to the visitor.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Self::Notified { .. } => Status::Sent,
            Self::Rejected(error) => Status::Rejected(error.clone()),
            Self::StorageFailed(_) => Status::NotSaved,
            Self::DispatchFailed { error, .. } => Status::NotSent(error.to_string()),
        }
    }

    /// HTTP status code of the response.
    #[must_use]
    #[inline]
    pub const fn http_status(&self) -> axum::http::StatusCode {
        match self {
            Self::Notified { .. } => axum::http::StatusCode::OK,
            Self::Rejected(_) => axum::http::StatusCode::BAD_REQUEST,
            Self::StorageFailed(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Self::DispatchFailed { .. } => axum::http::StatusCode::BAD_GATEWAY,
        }
    }
}

/// Drive a submission: validate, persist, compose, dispatch.
///
/// The record is written before any email is attempted, so a relay failure
/// never loses a submission.
pub struct SubmissionHandler {
    store: std::sync::Arc<dyn GenericRecordStore>,
    composer: Composer,
    dispatcher: Dispatcher,
}

impl std::fmt::Debug for SubmissionHandler {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionHandler")
            .field("store", &self.store)
            .field("composer", &self.composer)
            .finish_non_exhaustive()
    }
}

impl SubmissionHandler {
    ///
    #[must_use]
    pub fn new(
        config: &folio_config::Config,
        store: std::sync::Arc<dyn GenericRecordStore>,
        relay: std::sync::Arc<dyn Relay>,
    ) -> Self {
        Self {
            store,
            composer: Composer::new(config),
            dispatcher: Dispatcher::new(relay),
        }
    }

    /// Handle one submission, from the raw form to the emails.
    #[tracing::instrument(name = "submission", skip_all)]
    pub async fn handle(&self, form: ContactForm) -> Outcome {
        tracing::debug!(stage = %Stage::Received, "Contact form received.");

        let submission = match form.validate() {
            Ok(submission) => submission,
            Err(error) => {
                tracing::warn!(stage = %Stage::Failed, %error, "Submission rejected.");
                return Outcome::Rejected(error);
            }
        };
        tracing::debug!(stage = %Stage::Validated, "Submission is complete.");

        let id = match self.store.append(&submission).await {
            Ok(id) => id,
            Err(error) => {
                tracing::warn!(stage = %Stage::Failed, %error, "Submission could not be stored.");
                return Outcome::StorageFailed(error);
            }
        };
        tracing::debug!(stage = %Stage::Persisted, id, "Submission stored.");

        let notifications = self.composer.compose(&submission);
        match self.dispatcher.send(&notifications).await {
            Ok(()) => {
                tracing::info!(stage = %Stage::Notified, id, "Submission handled.");
                Outcome::Notified { id }
            }
            Err(error) => {
                tracing::warn!(stage = %Stage::Failed, id, %error, "Emails not sent.");
                Outcome::DispatchFailed { id, error }
            }
        }
    }
}

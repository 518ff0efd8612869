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

use crate::ValidationError;

/// Status line rendered in the contact view after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The submission was stored and both emails were sent.
    Sent,
    /// The form was rejected before anything was stored.
    Rejected(ValidationError),
    /// The record store failed, nothing was sent.
    NotSaved,
    /// The request body could not be decoded as a contact form.
    Unreadable,
    /// The submission was stored, but the mail relay failed.
    /// Contains the description of the relay error.
    NotSent(String),
}

impl Status {
    /// Did the submission go through entirely ?
    #[must_use]
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl std::fmt::Display for Status {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sent => f.write_str("✅ Message sent successfully! Please check your email."),
            Self::Rejected(ValidationError::MissingField(field)) => {
                write!(f, "❌ Missing required field: {}.", field.label())
            }
            Self::NotSaved => {
                f.write_str("❌ Your message could not be saved. Please try again later.")
            }
            Self::Unreadable => f.write_str("❌ The form could not be read. Please try again."),
            Self::NotSent(error) => write!(f, "❌ Error sending email: {error}"),
        }
    }
}

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

use crate::DispatchError;
use folio_common::Address;
use lettre::message::{header::ContentType, Mailbox};

/// The two messages sent for each submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum NotificationKind {
    /// Sent to the site owner.
    #[strum(serialize = "owner notification")]
    Owner,
    /// Auto-reply sent back to the visitor.
    #[strum(serialize = "visitor acknowledgment")]
    Visitor,
}

/// Display name and address of the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    ///
    pub name: String,
    ///
    pub address: Address,
}

/// Content of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    ///
    Plain(String),
    ///
    Html(String),
}

impl Body {
    /// Raw content.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(body) | Self::Html(body) => body,
        }
    }

    fn content_type(&self) -> ContentType {
        match self {
            Self::Plain(_) => ContentType::TEXT_PLAIN,
            Self::Html(_) => ContentType::TEXT_HTML,
        }
    }
}

/// A composed message, independent of the mail transport.
///
/// Built for a single submission and dropped once relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    ///
    pub kind: NotificationKind,
    ///
    pub from: Sender,
    /// Recipient, as provided (the visitor's address is not checked before this point).
    pub to: String,
    ///
    pub reply_to: Option<String>,
    ///
    pub subject: String,
    ///
    pub body: Body,
}

fn mailbox(role: &'static str, value: &str) -> Result<Mailbox, DispatchError> {
    value
        .parse::<Mailbox>()
        .map_err(|error| DispatchError::Address {
            role,
            value: value.to_owned(),
            reason: error.to_string(),
        })
}

impl Notification {
    /// Convert to a message of the mail transport.
    ///
    /// # Errors
    ///
    /// * the sender or the recipient is not accepted by lettre, an invalid reply-to
    ///   is dropped from the message instead
    /// * the message cannot be built
    pub fn to_lettre(&self) -> Result<lettre::Message, DispatchError> {
        let from = Mailbox::new(
            Some(self.from.name.clone()),
            self.from
                .address
                .to_lettre()
                .map_err(|error| DispatchError::Address {
                    role: "from",
                    value: self.from.address.to_string(),
                    reason: error.to_string(),
                })?,
        );

        let mut builder = lettre::Message::builder()
            .from(from)
            .to(mailbox("to", &self.to)?)
            .subject(self.subject.clone());

        // the owner notification goes out even without a usable reply-to
        if let Some(reply_to) = &self.reply_to {
            match mailbox("reply-to", reply_to) {
                Ok(mailbox) => builder = builder.reply_to(mailbox),
                Err(error) => tracing::warn!(kind = %self.kind, %error, "Reply-To omitted."),
            }
        }

        builder
            .header(self.body.content_type())
            .body(self.body.as_str().to_owned())
            .map_err(|error| DispatchError::Build {
                kind: self.kind,
                reason: error.to_string(),
            })
    }
}

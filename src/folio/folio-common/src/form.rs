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

/// Fields of the contact form, in the order they are presented to the owner.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Visitor's name.
    Name,
    /// Visitor's email address.
    Email,
    /// Visitor's phone number.
    Phone,
    /// Subject of the request.
    Title,
    /// Service the visitor is interested in.
    Service,
    /// Expected timeline.
    Timeline,
    /// Expected budget.
    Budget,
    /// Free text message.
    Message,
}

impl Field {
    /// Fields a submission cannot be accepted without.
    pub const REQUIRED: [Self; 5] = [
        Self::Name,
        Self::Email,
        Self::Title,
        Self::Service,
        Self::Message,
    ];

    /// Is this field mandatory ?
    #[must_use]
    #[inline]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Phone | Self::Timeline | Self::Budget)
    }

    /// Human readable label.
    #[must_use]
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Title => "Subject",
            Self::Service => "Service",
            Self::Timeline => "Timeline",
            Self::Budget => "Budget",
            Self::Message => "Message",
        }
    }
}

/// The submission cannot be accepted.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent or blank.
    #[error("missing required field: {0}")]
    MissingField(Field),
}

/// Raw contact form, as posted by the browser.
///
/// Every field is optional at this point, see [`ContactForm::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ContactForm {
    ///
    pub name: Option<String>,
    ///
    pub email: Option<String>,
    ///
    pub phone: Option<String>,
    ///
    pub title: Option<String>,
    ///
    pub service: Option<String>,
    ///
    pub timeline: Option<String>,
    ///
    pub budget: Option<String>,
    ///
    pub message: Option<String>,
}

impl ContactForm {
    fn take(&mut self, field: Field) -> Option<String> {
        match field {
            Field::Name => self.name.take(),
            Field::Email => self.email.take(),
            Field::Phone => self.phone.take(),
            Field::Title => self.title.take(),
            Field::Service => self.service.take(),
            Field::Timeline => self.timeline.take(),
            Field::Budget => self.budget.take(),
            Field::Message => self.message.take(),
        }
    }

    fn required(&mut self, field: Field) -> Result<String, ValidationError> {
        self.take(field)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ValidationError::MissingField(field))
    }

    fn optional(&mut self, field: Field) -> String {
        self.take(field).unwrap_or_default()
    }

    /// Check the presence of the required fields, default the optional ones to
    /// an empty string.
    ///
    /// No other check is done on the values: they are stored and relayed as they are.
    ///
    /// # Errors
    ///
    /// * the first required field (in form order) that is absent or blank
    pub fn validate(mut self) -> Result<ContactSubmission, ValidationError> {
        Ok(ContactSubmission {
            name: self.required(Field::Name)?,
            email: self.required(Field::Email)?,
            title: self.required(Field::Title)?,
            service: self.required(Field::Service)?,
            message: self.required(Field::Message)?,
            phone: self.optional(Field::Phone),
            timeline: self.optional(Field::Timeline),
            budget: self.optional(Field::Budget),
        })
    }
}

/// A validated contact submission, ready to be persisted.
///
/// Can only be built by [`ContactForm::validate`], so the required fields are never empty.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContactSubmission {
    name: String,
    email: String,
    phone: String,
    title: String,
    service: String,
    timeline: String,
    budget: String,
    message: String,
}

impl ContactSubmission {
    /// Get the value of a field, optional fields not provided are empty.
    #[must_use]
    #[inline]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Title => &self.title,
            Field::Service => &self.service,
            Field::Timeline => &self.timeline,
            Field::Budget => &self.budget,
            Field::Message => &self.message,
        }
    }

    ///
    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    ///
    #[must_use]
    #[inline]
    pub fn email(&self) -> &str {
        &self.email
    }

    ///
    #[must_use]
    #[inline]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    ///
    #[must_use]
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    ///
    #[must_use]
    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    ///
    #[must_use]
    #[inline]
    pub fn timeline(&self) -> &str {
        &self.timeline
    }

    ///
    #[must_use]
    #[inline]
    pub fn budget(&self) -> &str {
        &self.budget
    }

    ///
    #[must_use]
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

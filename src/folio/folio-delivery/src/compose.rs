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

use crate::{Body, Notification, NotificationKind, Sender};
use folio_common::{Address, ContactSubmission, Field};

/// Subject of the visitor acknowledgment.
pub const ACKNOWLEDGMENT_SUBJECT: &str = "Thanks for contacting me!";

/// Builds the two messages of a submission. Pure, no I/O.
///
/// Values provided by the visitor are inserted as they are, including in the HTML
/// body of the acknowledgment.
#[derive(Debug, Clone)]
pub struct Composer {
    from: Address,
    recipient: Address,
    owner_name: String,
    site_name: String,
}

impl Composer {
    /// Create a composer sending as the relay account.
    #[must_use]
    pub fn new(config: &folio_config::Config) -> Self {
        Self {
            from: config.relay.username.clone(),
            recipient: config.contact.recipient.clone(),
            owner_name: config.contact.owner_name.clone(),
            site_name: config.contact.site_name.clone(),
        }
    }

    /// Plain text message to the site owner, replies go to the visitor.
    #[must_use]
    pub fn owner_notification(&self, submission: &ContactSubmission) -> Notification {
        let mut body = String::from("New Contact Request\n\n");
        for field in [
            Field::Name,
            Field::Email,
            Field::Phone,
            Field::Title,
            Field::Service,
            Field::Timeline,
            Field::Budget,
        ] {
            body.push_str(field.label());
            body.push_str(": ");
            body.push_str(submission.get(field));
            body.push('\n');
        }
        body.push_str("\nMessage:\n");
        body.push_str(submission.message());
        body.push('\n');

        Notification {
            kind: NotificationKind::Owner,
            from: Sender {
                name: self.site_name.clone(),
                address: self.from.clone(),
            },
            to: self.recipient.to_string(),
            reply_to: Some(submission.email().to_owned()),
            subject: format!("Portfolio Contact: {}", submission.title()),
            body: Body::Plain(body),
        }
    }

    /// HTML auto-reply to the visitor, signed with the current year.
    #[must_use]
    pub fn visitor_acknowledgment(&self, submission: &ContactSubmission) -> Notification {
        self.acknowledgment_of_year(submission, time::OffsetDateTime::now_utc().year())
    }

    fn acknowledgment_of_year(&self, submission: &ContactSubmission, year: i32) -> Notification {
        Notification {
            kind: NotificationKind::Visitor,
            from: Sender {
                name: self.owner_name.clone(),
                address: self.from.clone(),
            },
            to: submission.email().to_owned(),
            reply_to: None,
            subject: ACKNOWLEDGMENT_SUBJECT.to_owned(),
            body: Body::Html(self.acknowledgment_html(submission, year)),
        }
    }

    /// Both messages, in sending order.
    #[must_use]
    pub fn compose(&self, submission: &ContactSubmission) -> [Notification; 2] {
        [
            self.owner_notification(submission),
            self.visitor_acknowledgment(submission),
        ]
    }

    // NOTE: no escaping of the visitor's values.
    fn acknowledgment_html(&self, submission: &ContactSubmission, year: i32) -> String {
        format!(
            r#"<html>
  <body style="margin:0; padding:0; font-family: Arial, sans-serif; background:#f4f7fb;">
    <table width="100%" cellpadding="0" cellspacing="0" style="background:#f4f7fb; padding:20px;">
      <tr>
        <td align="center">
          <table width="600" cellpadding="0" cellspacing="0" style="background:#ffffff; border-radius:8px; overflow:hidden; box-shadow:0 4px 12px rgba(0,0,0,0.1);">
            <tr>
              <td align="center" style="background:#0f172a; padding:20px;">
                <h1 style="color:#38bdf8; margin:0; font-size:24px;">{owner}</h1>
                <p style="color:#94a3b8; margin:5px 0 0; font-size:14px;">Portfolio Contact System</p>
              </td>
            </tr>
            <tr>
              <td style="padding:30px; color:#333; font-size:16px; line-height:1.6;">
                <p>Hi <strong>{name}</strong>,</p>
                <p>Thank you for contacting me regarding <strong>{service}</strong>.
                   I've received your message and I'll get back to you within 24–48 hours.</p>
                <p style="margin:20px 0; text-align:center;">
                  <a href="mailto:{from}"
                     style="background:#38bdf8; color:#0f172a; text-decoration:none; padding:10px 20px; border-radius:6px; font-weight:bold;">
                     Reply Directly
                  </a>
                </p>
                <p style="font-size:14px; color:#666;">
                  Your original message:<br>
                  <em>{message}</em>
                </p>
              </td>
            </tr>
            <tr>
              <td align="center" style="background:#0f172a; padding:15px; color:#94a3b8; font-size:12px;">
                <p style="margin:0;">© {year} {owner}. All rights reserved.</p>
                <p style="margin:5px 0 0;">This is an automated confirmation email. Please do not reply directly.</p>
              </td>
            </tr>
          </table>
        </td>
      </tr>
    </table>
  </body>
</html>
"#,
            owner = self.owner_name,
            name = submission.name(),
            service = submission.service(),
            from = self.from,
            message = submission.message(),
        )
    }
}

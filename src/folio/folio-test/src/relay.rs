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

use folio_delivery::{DispatchError, Notification, Relay, RelaySession};

/// Where a [`RecordingRelay`] must fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    /// The relay cannot be reached.
    Connect,
    /// The relay refuses the credentials.
    Authenticate,
    /// The relay refuses the n-th message of the session, counting from 0.
    Send(usize),
}

/// What happened on a [`RecordingRelay`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Journal {
    /// Connections established, authenticated or not.
    pub connections: usize,
    /// Connections closed.
    pub closed: usize,
    /// Messages accepted, in order.
    pub sent: Vec<Notification>,
    /// Messages refused.
    pub refused: usize,
}

/// In-memory relay recording every session.
#[derive(Debug, Default, Clone)]
pub struct RecordingRelay {
    fail: Option<FailAt>,
    journal: std::sync::Arc<std::sync::Mutex<Journal>>,
}

impl RecordingRelay {
    /// A relay accepting everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A relay failing at the given step.
    #[must_use]
    pub fn failing_at(fail: FailAt) -> Self {
        Self {
            fail: Some(fail),
            ..Self::default()
        }
    }

    /// Copy of the journal.
    #[must_use]
    pub fn journal(&self) -> Journal {
        self.journal.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Relay for RecordingRelay {
    async fn open(&self) -> Result<Box<dyn RelaySession>, DispatchError> {
        match self.fail {
            Some(FailAt::Connect) => Err(DispatchError::Connect {
                host: "smtp.testserver.com".to_owned(),
                port: 465,
                reason: "Connection refused (os error 111)".to_owned(),
            }),
            Some(FailAt::Authenticate) => {
                let mut journal = self.journal.lock().unwrap();
                journal.connections += 1;
                journal.closed += 1;
                Err(DispatchError::Authenticate(
                    "permanent error (535): 5.7.8 Username and Password not accepted".to_owned(),
                ))
            }
            fail => {
                self.journal.lock().unwrap().connections += 1;
                Ok(Box::new(RecordingSession {
                    fail_at: match fail {
                        Some(FailAt::Send(n)) => Some(n),
                        _ => None,
                    },
                    attempts: 0,
                    journal: self.journal.clone(),
                }))
            }
        }
    }
}

struct RecordingSession {
    fail_at: Option<usize>,
    attempts: usize,
    journal: std::sync::Arc<std::sync::Mutex<Journal>>,
}

#[async_trait::async_trait]
impl RelaySession for RecordingSession {
    async fn send(&mut self, notification: &Notification) -> Result<(), DispatchError> {
        // same conversion as the real relay, invalid addresses fail here
        notification.to_lettre()?;

        let attempt = self.attempts;
        self.attempts += 1;

        let mut journal = self.journal.lock().unwrap();
        if self.fail_at == Some(attempt) {
            journal.refused += 1;
            return Err(DispatchError::Send {
                kind: notification.kind,
                reason: "permanent error (554): 5.7.1 Message rejected".to_owned(),
            });
        }
        journal.sent.push(notification.clone());
        drop(journal);
        Ok(())
    }

    async fn close(&mut self) {
        self.journal.lock().unwrap().closed += 1;
    }
}

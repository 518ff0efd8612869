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

use crate::{
    config::{local_form, local_test},
    relay::{FailAt, Journal, RecordingRelay},
};
use folio_delivery::{Composer, DispatchError, Dispatcher, NotificationKind};
use pretty_assertions::assert_eq;

fn notifications() -> [folio_delivery::Notification; 2] {
    Composer::new(&local_test()).compose(&local_form().validate().unwrap())
}

#[tokio::test]
async fn one_session_for_both_messages() {
    let relay = RecordingRelay::new();
    let dispatcher = Dispatcher::new(std::sync::Arc::new(relay.clone()));

    dispatcher.send(&notifications()).await.unwrap();

    let journal = relay.journal();
    assert_eq!(journal.connections, 1);
    assert_eq!(journal.closed, 1);
    assert_eq!(
        journal
            .sent
            .iter()
            .map(|notification| notification.kind)
            .collect::<Vec<_>>(),
        vec![NotificationKind::Owner, NotificationKind::Visitor]
    );
}

#[tokio::test]
async fn unreachable_relay() {
    let relay = RecordingRelay::failing_at(FailAt::Connect);
    let dispatcher = Dispatcher::new(std::sync::Arc::new(relay.clone()));

    let error = dispatcher.send(&notifications()).await.unwrap_err();

    assert!(matches!(error, DispatchError::Connect { port: 465, .. }));
    assert_eq!(relay.journal(), Journal::default());
}

#[tokio::test]
async fn credentials_refused() {
    let relay = RecordingRelay::failing_at(FailAt::Authenticate);
    let dispatcher = Dispatcher::new(std::sync::Arc::new(relay.clone()));

    let error = dispatcher.send(&notifications()).await.unwrap_err();

    assert!(matches!(error, DispatchError::Authenticate(_)));
    let journal = relay.journal();
    assert_eq!(journal.connections, journal.closed);
    assert!(journal.sent.is_empty());
}

#[tokio::test]
async fn first_refusal_stops_the_session() {
    let relay = RecordingRelay::failing_at(FailAt::Send(0));
    let dispatcher = Dispatcher::new(std::sync::Arc::new(relay.clone()));

    let error = dispatcher.send(&notifications()).await.unwrap_err();

    assert_eq!(
        error,
        DispatchError::Send {
            kind: NotificationKind::Owner,
            reason: "permanent error (554): 5.7.1 Message rejected".to_owned(),
        }
    );
    let journal = relay.journal();
    assert_eq!(journal.refused, 1);
    assert!(journal.sent.is_empty());
    assert_eq!(journal.closed, 1);
}

#[tokio::test]
async fn accepted_messages_stay_sent() {
    let relay = RecordingRelay::failing_at(FailAt::Send(1));
    let dispatcher = Dispatcher::new(std::sync::Arc::new(relay.clone()));

    let error = dispatcher.send(&notifications()).await.unwrap_err();

    assert_eq!(
        error.to_string(),
        "visitor acknowledgment not sent: permanent error (554): 5.7.1 Message rejected"
    );
    let journal = relay.journal();
    assert_eq!(journal.sent.len(), 1);
    assert_eq!(journal.sent[0].kind, NotificationKind::Owner);
    assert_eq!(journal.closed, 1);
}

#[tokio::test]
async fn nothing_to_send() {
    let relay = RecordingRelay::new();
    let dispatcher = Dispatcher::new(std::sync::Arc::new(relay.clone()));

    dispatcher.send(&[]).await.unwrap();

    let journal = relay.journal();
    assert_eq!(journal.connections, 1);
    assert_eq!(journal.closed, 1);
}

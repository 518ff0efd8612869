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
    relay::{FailAt, RecordingRelay},
    store::FailingStore,
};
use folio_common::{ContactForm, Field, Status, ValidationError};
use folio_delivery::{DispatchError, NotificationKind};
use folio_server::{Outcome, Stage, SubmissionHandler};
use folio_store::{temp, GenericRecordStore};
use pretty_assertions::assert_eq;

async fn local_store() -> std::sync::Arc<temp::RecordStore> {
    let store = temp::RecordStore::new().unwrap();
    store.initialize().await.unwrap();
    std::sync::Arc::new(store)
}

fn handler(
    store: std::sync::Arc<dyn GenericRecordStore>,
    relay: &RecordingRelay,
) -> SubmissionHandler {
    SubmissionHandler::new(&local_test(), store, std::sync::Arc::new(relay.clone()))
}

#[test_log::test(tokio::test)]
async fn complete_submission() {
    let store = local_store().await;
    let relay = RecordingRelay::new();

    let outcome = handler(store.clone(), &relay).handle(local_form()).await;

    assert!(matches!(outcome, Outcome::Notified { .. }));
    assert_eq!(outcome.stage(), Stage::Notified);
    assert_eq!(
        outcome.status().to_string(),
        "✅ Message sent successfully! Please check your email."
    );

    let records = store.list().await.unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(Some(record.id), outcome.record_id());
    assert_eq!(
        (
            record.name.as_str(),
            record.email.as_str(),
            record.phone.as_str(),
            record.title.as_str(),
            record.service.as_str(),
            record.timeline.as_str(),
            record.budget.as_str(),
            record.message.as_str(),
        ),
        ("Jo", "jo@x.com", "", "Hi", "Web", "", "", "Hello")
    );

    let journal = relay.journal();
    assert_eq!(journal.connections, 1);
    assert_eq!(journal.closed, 1);
    assert_eq!(
        journal
            .sent
            .iter()
            .map(|notification| (notification.kind, notification.to.as_str()))
            .collect::<Vec<_>>(),
        vec![
            (NotificationKind::Owner, "owner@testserver.com"),
            (NotificationKind::Visitor, "jo@x.com"),
        ]
    );
}

#[tokio::test]
async fn identifiers_and_timestamps() {
    let store = local_store().await;
    let relay = RecordingRelay::new();
    let handler = handler(store.clone(), &relay);

    // the store keeps seconds only
    let before = time::OffsetDateTime::now_utc()
        .replace_nanosecond(0)
        .unwrap();

    let mut ids = vec![];
    for _ in 0..3 {
        ids.push(handler.handle(local_form()).await.record_id().unwrap());
    }

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    let records = store.list().await.unwrap();
    assert_eq!(
        records.iter().map(|record| record.id).collect::<Vec<_>>(),
        ids
    );
    assert!(records.iter().all(|record| record.created_at >= before));
    assert_eq!(relay.journal().sent.len(), 6);
}

#[rstest::rstest]
#[case::name(Field::Name)]
#[case::email(Field::Email)]
#[case::title(Field::Title)]
#[case::service(Field::Service)]
#[case::message(Field::Message)]
#[tokio::test]
async fn missing_required_field(
    #[case] field: Field,
    #[values(None, Some("  "))] value: Option<&str>,
) {
    let store = local_store().await;
    let relay = RecordingRelay::new();

    let mut form = local_form();
    let value = value.map(str::to_owned);
    match field {
        Field::Name => form.name = value,
        Field::Email => form.email = value,
        Field::Title => form.title = value,
        Field::Service => form.service = value,
        Field::Message => form.message = value,
        _ => unreachable!(),
    }

    let outcome = handler(store.clone(), &relay).handle(form).await;

    assert!(matches!(
        outcome,
        Outcome::Rejected(ValidationError::MissingField(missing)) if missing == field
    ));
    assert_eq!(outcome.stage(), Stage::Failed);
    assert_eq!(outcome.record_id(), None);
    assert_eq!(
        outcome.status().to_string(),
        format!("❌ Missing required field: {}.", field.label())
    );
    assert_eq!(store.count().await.unwrap(), 0);
    assert_eq!(relay.journal().connections, 0);
}

#[tokio::test]
async fn empty_form() {
    let store = local_store().await;
    let relay = RecordingRelay::new();

    let outcome = handler(store.clone(), &relay)
        .handle(ContactForm::default())
        .await;

    assert_eq!(
        outcome.status(),
        Status::Rejected(ValidationError::MissingField(Field::Name))
    );
    assert_eq!(store.count().await.unwrap(), 0);
}

#[test_log::test(tokio::test)]
async fn disk_full() {
    let store = std::sync::Arc::new(FailingStore::default());
    let relay = RecordingRelay::new();

    let outcome = handler(store.clone(), &relay).handle(local_form()).await;

    assert!(matches!(outcome, Outcome::StorageFailed(_)));
    assert_eq!(outcome.status(), Status::NotSaved);
    assert_eq!(store.attempts(), 1);
    assert_eq!(relay.journal().connections, 0);
    assert!(relay.journal().sent.is_empty());
}

#[test_log::test(tokio::test)]
async fn authentication_refused() {
    let store = local_store().await;
    let relay = RecordingRelay::failing_at(FailAt::Authenticate);

    let outcome = handler(store.clone(), &relay).handle(local_form()).await;

    let Outcome::DispatchFailed { id, error } = &outcome else {
        panic!("unexpected outcome: {outcome:?}");
    };
    assert!(matches!(error, DispatchError::Authenticate(_)));
    assert_eq!(
        outcome.status().to_string(),
        "❌ Error sending email: authentication failed: \
         permanent error (535): 5.7.8 Username and Password not accepted"
    );

    assert_eq!(store.count().await.unwrap(), 1);
    let record = store.get(*id).await.unwrap().unwrap();
    assert_eq!(record.message, "Hello");
    assert!(relay.journal().sent.is_empty());
}

#[tokio::test]
async fn acknowledgment_refused() {
    let store = local_store().await;
    let relay = RecordingRelay::failing_at(FailAt::Send(1));

    let outcome = handler(store.clone(), &relay).handle(local_form()).await;

    assert!(matches!(
        outcome,
        Outcome::DispatchFailed {
            error: DispatchError::Send {
                kind: NotificationKind::Visitor,
                ..
            },
            ..
        }
    ));
    assert_eq!(store.count().await.unwrap(), 1);

    let journal = relay.journal();
    assert_eq!(journal.sent.len(), 1);
    assert_eq!(journal.closed, 1);
}

#[tokio::test]
async fn invalid_visitor_address() {
    let store = local_store().await;
    let relay = RecordingRelay::new();

    let outcome = handler(store.clone(), &relay)
        .handle(ContactForm {
            email: Some("jo at x.com".to_owned()),
            ..local_form()
        })
        .await;

    assert!(matches!(
        outcome,
        Outcome::DispatchFailed {
            error: DispatchError::Address { role: "to", .. },
            ..
        }
    ));
    assert_eq!(store.count().await.unwrap(), 1);

    let journal = relay.journal();
    assert_eq!(journal.sent.len(), 1);
    assert_eq!(journal.sent[0].kind, NotificationKind::Owner);
    assert_eq!(journal.sent[0].reply_to.as_deref(), Some("jo at x.com"));
    assert_eq!(journal.closed, 1);
}

#[rstest::rstest]
#[case("jo@x.com")]
#[case("jo+portfolio@sub.x.com")]
#[case("Jo.Doe@X.com")]
#[tokio::test]
async fn owner_replies_to_visitor(#[case] email: &str) {
    let store = local_store().await;
    let relay = RecordingRelay::new();

    let outcome = handler(store, &relay)
        .handle(ContactForm {
            email: Some(email.to_owned()),
            title: Some("Reply-To: someone@else.com".to_owned()),
            ..local_form()
        })
        .await;

    assert!(matches!(outcome, Outcome::Notified { .. }), "{outcome:?}");
    let owner = &relay.journal().sent[0];
    assert_eq!(owner.kind, NotificationKind::Owner);
    assert_eq!(owner.reply_to.as_deref(), Some(email));
}

#[tokio::test]
async fn acknowledgment_echoes_the_message() {
    let store = local_store().await;
    let relay = RecordingRelay::new();
    let message = "Need a <b>site</b> & a \"logo\"\nby Friday.";

    handler(store, &relay)
        .handle(ContactForm {
            name: Some("Ada Lovelace".to_owned()),
            message: Some(message.to_owned()),
            ..local_form()
        })
        .await;

    let journal = relay.journal();
    let acknowledgment = &journal.sent[1];
    assert_eq!(acknowledgment.kind, NotificationKind::Visitor);
    assert_eq!(acknowledgment.subject, "Thanks for contacting me!");
    assert!(acknowledgment.body.as_str().contains(message));
    assert!(acknowledgment
        .body
        .as_str()
        .contains("<strong>Ada Lovelace</strong>"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions() {
    let store = local_store().await;
    let relay = RecordingRelay::new();
    let handler = std::sync::Arc::new(handler(store.clone(), &relay));

    let tasks = (0..8)
        .map(|_| {
            let handler = handler.clone();
            tokio::spawn(async move { handler.handle(local_form()).await.record_id() })
        })
        .collect::<Vec<_>>();

    let mut ids = vec![];
    for task in tasks {
        ids.push(task.await.unwrap().unwrap());
    }
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), 8);
    assert_eq!(store.count().await.unwrap(), 8);
    assert_eq!(relay.journal().sent.len(), 16);
}

#[derive(Clone, Default)]
struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn lines_with(&self, pattern: &str) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .filter(|line| line.contains(pattern))
            .map(str::to_owned)
            .collect()
    }
}

fn capture_logs() -> (Captured, tracing::subscriber::DefaultGuard) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    (captured, tracing::subscriber::set_default(subscriber))
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    Rejected,
    NotSaved,
    NotSent,
}

#[rstest::rstest]
#[case(Failure::Rejected)]
#[case(Failure::NotSaved)]
#[case(Failure::NotSent)]
#[tokio::test]
async fn one_warning_per_failure(#[case] failure: Failure) {
    let store: std::sync::Arc<dyn GenericRecordStore> = match failure {
        Failure::NotSaved => std::sync::Arc::new(FailingStore::default()),
        Failure::Rejected | Failure::NotSent => local_store().await,
    };
    let relay = match failure {
        Failure::NotSent => RecordingRelay::failing_at(FailAt::Authenticate),
        Failure::Rejected | Failure::NotSaved => RecordingRelay::new(),
    };
    let form = match failure {
        Failure::Rejected => ContactForm::default(),
        Failure::NotSaved | Failure::NotSent => local_form(),
    };
    let (captured, _guard) = capture_logs();

    let outcome = handler(store, &relay).handle(form).await;

    assert_eq!(outcome.stage(), Stage::Failed);
    let failures = captured.lines_with("stage=failed");
    assert_eq!(failures.len(), 1, "{failures:?}");
    assert!(failures[0].contains(" WARN "), "{failures:?}");
    assert!(captured.lines_with(" ERROR ").is_empty());
}

#[tokio::test]
async fn success_is_logged_at_info() {
    let store = local_store().await;
    let relay = RecordingRelay::new();
    let (captured, _guard) = capture_logs();

    handler(store, &relay).handle(local_form()).await;

    let notified = captured.lines_with("stage=notified");
    assert_eq!(notified.len(), 1, "{notified:?}");
    assert!(notified[0].contains(" INFO "), "{notified:?}");
    assert!(captured.lines_with("stage=failed").is_empty());
}

//! Integration tests for the full desk flow.
//!
//! These tests verify the end-to-end path over real adapters:
//! 1. Guest walks the conversation and a ticket lands in the file store
//! 2. Staff channels are announced and the thread reference recorded
//! 3. Reception resolves with ordered, idempotent notifications
//! 4. The snapshot survives a process restart
//!
//! The chat platform is a recording gateway; everything else is the real
//! thing.

use std::sync::Arc;

use tempfile::TempDir;

use guest_desk::adapters::gateway::RecordingGateway;
use guest_desk::adapters::storage::FileTicketStore;
use guest_desk::application::{
    ConversationEngine, DispatchOutcome, Dispatcher, InboundEvent, NotificationRouter,
    PendingOverviewHandler, ResolveTicketHandler,
};
use guest_desk::domain::foundation::{ActorId, ChannelId, GuestId, MessageId, TicketId};
use guest_desk::domain::ticket::{GuestProfile, Ticket};
use guest_desk::ports::TicketStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Desk {
    dispatcher: Dispatcher,
    gateway: Arc<RecordingGateway>,
    store: Arc<FileTicketStore>,
    _dir: TempDir,
}

const RECEPTION: &str = "430932662";
const BOSS: &str = "1746109123";

async fn desk() -> Desk {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tickets.json");
    desk_at(dir, path).await
}

async fn desk_at(dir: TempDir, path: std::path::PathBuf) -> Desk {
    let gateway = Arc::new(RecordingGateway::new());
    let store = Arc::new(FileTicketStore::open(&path).await.unwrap());
    let router = Arc::new(NotificationRouter::new(
        gateway.clone(),
        vec![
            ChannelId::new("staff-main").unwrap(),
            ChannelId::new("staff-backup").unwrap(),
        ],
    ));

    let engine = Arc::new(ConversationEngine::new(
        store.clone() as Arc<dyn TicketStore>,
        router.clone(),
    ));
    let resolver = Arc::new(ResolveTicketHandler::new(
        store.clone() as Arc<dyn TicketStore>,
        router,
        [ActorId::new(RECEPTION).unwrap()],
    ));
    let overview = Arc::new(PendingOverviewHandler::new(
        store.clone() as Arc<dyn TicketStore>,
        [ActorId::new(BOSS).unwrap()],
    ));

    Desk {
        dispatcher: Dispatcher::new(engine, resolver, overview),
        gateway,
        store,
        _dir: dir,
    }
}

fn guest(id: &str) -> GuestId {
    GuestId::new(id).unwrap()
}

fn profile(id: &str) -> GuestProfile {
    GuestProfile::new(guest(id), "Guest One", Some("guest1".into())).unwrap()
}

fn actor(id: &str) -> ActorId {
    ActorId::new(id).unwrap()
}

async fn file_ticket(desk: &Desk, guest_id: &str, origin: &str, text: &str) -> Ticket {
    for event in [
        InboundEvent::ConversationStart {
            guest: guest(guest_id),
        },
        InboundEvent::LanguageChosen {
            guest: guest(guest_id),
            code: "en".to_string(),
        },
        InboundEvent::RoomChosen {
            guest: guest(guest_id),
            room: "5".to_string(),
        },
    ] {
        desk.dispatcher.dispatch(event).await.unwrap();
    }

    match desk
        .dispatcher
        .dispatch(InboundEvent::TextMessage {
            guest: profile(guest_id),
            origin: MessageId::new(origin).unwrap(),
            text: text.to_string(),
        })
        .await
        .unwrap()
    {
        DispatchOutcome::TicketFiled(ticket) => ticket,
        other => panic!("expected TicketFiled, got {:?}", other),
    }
}

async fn resolve(desk: &Desk, who: &str, id: &TicketId) -> DispatchOutcome {
    desk.dispatcher
        .dispatch(InboundEvent::ResolveRequested {
            actor: actor(who),
            ticket_id: id.clone(),
        })
        .await
        .unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn guest_report_creates_ticket_and_notifies_staff() {
    let desk = desk().await;

    let ticket = file_ticket(&desk, "G1", "88", "AC broken").await;

    assert_eq!(ticket.room.as_u8(), 5);
    assert_eq!(ticket.language.code(), "en");
    assert_eq!(ticket.text, "AC broken");
    assert!(!ticket.resolved);

    // One announcement per configured channel.
    let staff = desk.gateway.staff_messages();
    assert_eq!(staff.len(), 2);
    assert!(staff[0].text.contains("AC broken"));

    // The primary channel's message is on record as the thread target.
    let stored = desk.store.get(&ticket.id).await.unwrap().unwrap();
    let reference = stored.staff_reference.unwrap();
    assert_eq!(reference, staff[0].reference);

    // The guest's last message is the acknowledgment.
    let texts = desk.gateway.guest_texts(&guest("G1"));
    assert_eq!(
        texts.last().unwrap(),
        "Your message has been received! The admins will reply shortly."
    );
}

#[tokio::test]
async fn resolution_notifies_guest_twice_and_staff_once() {
    let desk = desk().await;
    let ticket = file_ticket(&desk, "G1", "88", "AC broken").await;
    let before = desk.gateway.guest_texts(&guest("G1")).len();

    let outcome = resolve(&desk, RECEPTION, &ticket.id).await;
    assert!(matches!(outcome, DispatchOutcome::ResolveApplied));

    assert!(desk.store.get(&ticket.id).await.unwrap().unwrap().resolved);

    // Processing first, resolved second, nothing else.
    let texts = desk.gateway.guest_texts(&guest("G1"));
    assert_eq!(
        &texts[before..],
        &[
            "Your issue is being processed by an admin.".to_string(),
            "Your issue has been resolved! Thank you.".to_string(),
        ]
    );

    let replies = desk.gateway.threaded_replies();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains(ticket.id.as_str()));
}

#[tokio::test]
async fn second_resolve_is_a_noop_without_messages() {
    let desk = desk().await;
    let ticket = file_ticket(&desk, "G1", "88", "AC broken").await;

    resolve(&desk, RECEPTION, &ticket.id).await;
    let guest_count = desk.gateway.guest_messages().len();
    let reply_count = desk.gateway.threaded_replies().len();

    let outcome = resolve(&desk, RECEPTION, &ticket.id).await;

    assert!(matches!(outcome, DispatchOutcome::ResolveNoOp));
    assert_eq!(desk.gateway.guest_messages().len(), guest_count);
    assert_eq!(desk.gateway.threaded_replies().len(), reply_count);
}

#[tokio::test]
async fn unauthorized_resolve_denied_without_side_effects() {
    let desk = desk().await;
    let ticket = file_ticket(&desk, "G1", "88", "AC broken").await;
    let guest_count = desk.gateway.guest_messages().len();

    let outcome = resolve(&desk, "not-reception", &ticket.id).await;

    assert!(matches!(outcome, DispatchOutcome::ResolveDenied { .. }));
    assert!(!desk.store.get(&ticket.id).await.unwrap().unwrap().resolved);
    assert_eq!(desk.gateway.guest_messages().len(), guest_count);
    assert!(desk.gateway.threaded_replies().is_empty());
}

#[tokio::test]
async fn retried_delivery_produces_one_ticket() {
    let desk = desk().await;
    let first = file_ticket(&desk, "G1", "88", "AC broken").await;

    // The platform redelivers the same message; the guest walked the form
    // again in between.
    let second = file_ticket(&desk, "G1", "88", "AC broken").await;

    assert_eq!(second.id, first.id);
    assert_eq!(desk.store.list_unresolved().await.unwrap().len(), 1);
    // Two channels, announced exactly once.
    assert_eq!(desk.gateway.staff_messages().len(), 2);
}

#[tokio::test]
async fn cancel_then_begin_starts_fresh() {
    let desk = desk().await;

    desk.dispatcher
        .dispatch(InboundEvent::ConversationStart { guest: guest("G1") })
        .await
        .unwrap();
    desk.dispatcher
        .dispatch(InboundEvent::LanguageChosen {
            guest: guest("G1"),
            code: "ru".to_string(),
        })
        .await
        .unwrap();
    desk.dispatcher
        .dispatch(InboundEvent::CancelRequested { guest: guest("G1") })
        .await
        .unwrap();

    // Nothing was filed and text now asks for a restart.
    let outcome = desk
        .dispatcher
        .dispatch(InboundEvent::TextMessage {
            guest: profile("G1"),
            origin: MessageId::new("90").unwrap(),
            text: "hello?".to_string(),
        })
        .await
        .unwrap();
    assert!(matches!(outcome, DispatchOutcome::Accepted));
    assert!(desk.gateway.staff_messages().is_empty());

    // A full fresh run still works, with no residue from the cancelled one.
    let ticket = file_ticket(&desk, "G1", "91", "no hot water").await;
    assert_eq!(ticket.language.code(), "en");
}

#[tokio::test]
async fn overview_is_role_gated_and_ordered() {
    let desk = desk().await;
    let a = file_ticket(&desk, "G1", "1", "first issue").await;
    let b = file_ticket(&desk, "G2", "2", "second issue").await;
    resolve(&desk, RECEPTION, &a.id).await;

    let denied = desk
        .dispatcher
        .dispatch(InboundEvent::PendingRequested {
            actor: actor(RECEPTION),
        })
        .await
        .unwrap();
    assert!(matches!(denied, DispatchOutcome::PendingDenied { .. }));

    let outcome = desk
        .dispatcher
        .dispatch(InboundEvent::PendingRequested { actor: actor(BOSS) })
        .await
        .unwrap();
    match outcome {
        DispatchOutcome::Pending(report) => {
            assert_eq!(report.tickets.len(), 1);
            assert_eq!(report.tickets[0].id, b.id);
            assert!(report.render().contains("second issue"));
        }
        other => panic!("expected Pending, got {:?}", other),
    }
}

#[tokio::test]
async fn tickets_survive_restart_with_full_fidelity() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tickets.json");

    let desk1 = desk_at(dir, path.clone()).await;
    let open = file_ticket(&desk1, "G1", "1", "first issue").await;
    let closed = file_ticket(&desk1, "G2", "2", "second issue").await;
    resolve(&desk1, RECEPTION, &closed.id).await;
    let expected_reference = desk1
        .store
        .get(&open.id)
        .await
        .unwrap()
        .unwrap()
        .staff_reference;
    // Simulate a process restart by dropping the desk's store/dispatcher/gateway,
    // while keeping the temp directory alive so the snapshot file survives the
    // reopen below.
    let Desk { _dir, .. } = desk1;

    let store = FileTicketStore::open(&path).await.unwrap();

    let reloaded_open = store.get(&open.id).await.unwrap().unwrap();
    assert!(!reloaded_open.resolved);
    assert_eq!(reloaded_open.staff_reference, expected_reference);
    assert_eq!(reloaded_open.text, "first issue");
    assert_eq!(reloaded_open.guest.handle, Some("guest1".to_string()));

    let reloaded_closed = store.get(&closed.id).await.unwrap().unwrap();
    assert!(reloaded_closed.resolved);

    let open_ids: Vec<_> = store
        .list_unresolved()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(open_ids, vec![open.id]);
}

#[tokio::test]
async fn primary_channel_outage_degrades_to_threadless_resolution() {
    let desk = desk().await;
    desk.gateway
        .make_channel_unreachable(ChannelId::new("staff-main").unwrap());

    let ticket = file_ticket(&desk, "G1", "88", "AC broken").await;

    // Backup channel still heard about it, but there is no thread target.
    assert_eq!(desk.gateway.staff_messages().len(), 1);
    assert!(desk
        .store
        .get(&ticket.id)
        .await
        .unwrap()
        .unwrap()
        .staff_reference
        .is_none());

    // Resolution still works, guest still notified, no thread reply.
    let outcome = resolve(&desk, RECEPTION, &ticket.id).await;
    assert!(matches!(outcome, DispatchOutcome::ResolveApplied));
    assert!(desk.store.get(&ticket.id).await.unwrap().unwrap().resolved);
    assert!(desk.gateway.threaded_replies().is_empty());
}

//! File-based Ticket Store Adapter
//!
//! Persists the full ticket ledger as a JSON snapshot on disk. Every
//! mutation is written to a temporary file and renamed over the live one, so
//! a crash leaves either the previous snapshot or the new one, never a torn
//! write. A single async mutex over the ledger gives the single-writer
//! discipline the store contract requires.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use super::ledger::TicketLedger;
use crate::domain::foundation::TicketId;
use crate::domain::ticket::{StaffReference, Ticket};
use crate::ports::{CreateResult, NewTicket, ResolveOutcome, TicketStore, TicketStoreError};

/// Durable ticket store backed by a single JSON file.
#[derive(Debug)]
pub struct FileTicketStore {
    path: PathBuf,
    inner: Mutex<TicketLedger>,
}

impl FileTicketStore {
    /// Opens the store, loading the existing snapshot if one is present.
    ///
    /// A missing file is an empty store. An unreadable or corrupt snapshot
    /// is an error; the caller is expected to treat it as fatal rather than
    /// silently starting over an existing ledger.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, TicketStoreError> {
        let path = path.as_ref().to_path_buf();

        let ledger = match fs::read_to_string(&path).await {
            Ok(raw) => {
                let tickets: Vec<Ticket> = serde_json::from_str(&raw)
                    .map_err(|e| TicketStoreError::CorruptSnapshot(e.to_string()))?;
                TicketLedger::from_snapshot(tickets).map_err(TicketStoreError::CorruptSnapshot)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => TicketLedger::new(),
            Err(e) => return Err(TicketStoreError::Io(e.to_string())),
        };

        Ok(Self {
            path,
            inner: Mutex::new(ledger),
        })
    }

    /// Writes the ledger snapshot atomically: temp file, then rename.
    async fn persist(&self, ledger: &TicketLedger) -> Result<(), TicketStoreError> {
        let json = serde_json::to_string_pretty(ledger.snapshot())
            .map_err(|e| TicketStoreError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| TicketStoreError::Io(e.to_string()))?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(|e| TicketStoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| TicketStoreError::Io(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl TicketStore for FileTicketStore {
    async fn create(&self, new_ticket: NewTicket) -> Result<CreateResult, TicketStoreError> {
        let ticket = Ticket::new(
            new_ticket.guest,
            &new_ticket.origin,
            new_ticket.room,
            new_ticket.language,
            new_ticket.text,
        )
        .map_err(|e| TicketStoreError::InvalidInput(e.to_string()))?;

        let mut ledger = self.inner.lock().await;
        let (stored, created) = ledger.insert(ticket);

        if created {
            if let Err(e) = self.persist(&ledger).await {
                ledger.pop_last();
                return Err(e);
            }
        }

        Ok(CreateResult {
            ticket: stored,
            created,
        })
    }

    async fn attach_staff_reference(
        &self,
        id: &TicketId,
        reference: StaffReference,
    ) -> Result<StaffReference, TicketStoreError> {
        let mut ledger = self.inner.lock().await;
        let had_reference = ledger
            .get(id)
            .ok_or_else(|| TicketStoreError::NotFound(id.clone()))?
            .staff_reference
            .is_some();

        let on_record = ledger
            .attach_reference(id, reference)
            .ok_or_else(|| TicketStoreError::NotFound(id.clone()))?;

        if !had_reference {
            if let Err(e) = self.persist(&ledger).await {
                ledger.detach_reference(id);
                return Err(e);
            }
        }

        Ok(on_record)
    }

    async fn mark_resolved(&self, id: &TicketId) -> Result<ResolveOutcome, TicketStoreError> {
        let mut ledger = self.inner.lock().await;
        let outcome = ledger.mark_resolved(id);

        if outcome == ResolveOutcome::Applied {
            if let Err(e) = self.persist(&ledger).await {
                ledger.unmark_resolved(id);
                return Err(e);
            }
        }

        Ok(outcome)
    }

    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>, TicketStoreError> {
        let ledger = self.inner.lock().await;
        Ok(ledger.get(id).cloned())
    }

    async fn list_unresolved(&self) -> Result<Vec<Ticket>, TicketStoreError> {
        let ledger = self.inner.lock().await;
        Ok(ledger.unresolved())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ChannelId, GuestId, Language, MessageId, RoomNumber};
    use crate::domain::ticket::GuestProfile;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn new_ticket(guest: &str, origin: &str, text: &str) -> NewTicket {
        NewTicket {
            guest: GuestProfile::new(GuestId::new(guest).unwrap(), "Guest", None).unwrap(),
            origin: MessageId::new(origin).unwrap(),
            room: RoomNumber::new(5).unwrap(),
            language: Language::En,
            text: text.to_string(),
        }
    }

    fn reference(msg: &str) -> StaffReference {
        StaffReference::new(
            ChannelId::new("staff").unwrap(),
            MessageId::new(msg).unwrap(),
        )
    }

    #[tokio::test]
    async fn create_persists_and_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tickets.json");

        let store = FileTicketStore::open(&path).await.unwrap();
        let result = store.create(new_ticket("g1", "1", "AC broken")).await.unwrap();
        assert!(result.created);

        let reopened = FileTicketStore::open(&path).await.unwrap();
        let loaded = reopened.get(&result.ticket.id).await.unwrap().unwrap();
        assert_eq!(loaded, result.ticket);
    }

    #[tokio::test]
    async fn duplicate_create_returns_existing_record() {
        let dir = TempDir::new().unwrap();
        let store = FileTicketStore::open(dir.path().join("t.json")).await.unwrap();

        let first = store.create(new_ticket("g1", "1", "AC broken")).await.unwrap();
        let second = store.create(new_ticket("g1", "1", "AC broken")).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(second.ticket, first.ticket);
        assert_eq!(store.list_unresolved().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_an_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = FileTicketStore::open(dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(store.list_unresolved().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_snapshot_fails_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tickets.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let result = FileTicketStore::open(&path).await;
        assert!(matches!(result, Err(TicketStoreError::CorruptSnapshot(_))));
    }

    #[tokio::test]
    async fn resolved_flag_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tickets.json");

        let store = FileTicketStore::open(&path).await.unwrap();
        let created = store.create(new_ticket("g1", "1", "no towels")).await.unwrap();
        let outcome = store.mark_resolved(&created.ticket.id).await.unwrap();
        assert_eq!(outcome, ResolveOutcome::Applied);

        let reopened = FileTicketStore::open(&path).await.unwrap();
        assert!(reopened
            .get(&created.ticket.id)
            .await
            .unwrap()
            .unwrap()
            .resolved);
        assert!(reopened.list_unresolved().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn staff_reference_first_writer_wins_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tickets.json");

        let store = FileTicketStore::open(&path).await.unwrap();
        let created = store.create(new_ticket("g1", "1", "tv remote")).await.unwrap();

        let first = store
            .attach_staff_reference(&created.ticket.id, reference("100"))
            .await
            .unwrap();
        let second = store
            .attach_staff_reference(&created.ticket.id, reference("200"))
            .await
            .unwrap();
        assert_eq!(first, reference("100"));
        assert_eq!(second, reference("100"));

        let reopened = FileTicketStore::open(&path).await.unwrap();
        let loaded = reopened.get(&created.ticket.id).await.unwrap().unwrap();
        assert_eq!(loaded.staff_reference, Some(reference("100")));
    }

    #[tokio::test]
    async fn attach_reference_unknown_ticket_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FileTicketStore::open(dir.path().join("t.json")).await.unwrap();

        let result = store
            .attach_staff_reference(&"missing".parse().unwrap(), reference("1"))
            .await;
        assert!(matches!(result, Err(TicketStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_unresolved_in_creation_order() {
        let dir = TempDir::new().unwrap();
        let store = FileTicketStore::open(dir.path().join("t.json")).await.unwrap();

        let a = store.create(new_ticket("g1", "1", "first")).await.unwrap();
        let b = store.create(new_ticket("g2", "2", "second")).await.unwrap();
        let c = store.create(new_ticket("g3", "3", "third")).await.unwrap();
        store.mark_resolved(&b.ticket.id).await.unwrap();

        let open: Vec<_> = store
            .list_unresolved()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(open, vec![a.ticket.id, c.ticket.id]);
    }

    #[tokio::test]
    async fn concurrent_resolution_applies_exactly_once() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(
            FileTicketStore::open(dir.path().join("t.json"))
                .await
                .unwrap(),
        );
        let created = store.create(new_ticket("g1", "1", "heater rattles")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            let id = created.ticket.id.clone();
            handles.push(tokio::spawn(
                async move { store.mark_resolved(&id).await },
            ));
        }

        let mut applied = 0;
        let mut already = 0;
        for handle in handles {
            match handle.await.unwrap().unwrap() {
                ResolveOutcome::Applied => applied += 1,
                ResolveOutcome::AlreadyResolved => already += 1,
                ResolveOutcome::NotFound => panic!("ticket vanished"),
            }
        }
        assert_eq!(applied, 1);
        assert_eq!(already, 7);
    }

    #[tokio::test]
    async fn concurrent_duplicate_creates_yield_one_record() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(
            FileTicketStore::open(dir.path().join("t.json"))
                .await
                .unwrap(),
        );

        let mut handles = Vec::new();
        for _ in 0..6 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create(new_ticket("g1", "9", "flood")).await
            }));
        }

        let mut fresh = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().created {
                fresh += 1;
            }
        }
        assert_eq!(fresh, 1);
        assert_eq!(store.list_unresolved().await.unwrap().len(), 1);
    }
}

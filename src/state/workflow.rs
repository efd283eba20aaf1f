//! Library workflow state machine
//!
//! Sequences everything around an edit: listing the stored miis,
//! choosing how to create a new one (from scratch, by account lookup,
//! or randomized), the edit session itself, and the commit/cancel exits
//! back to the list. Only one session is ever open at a time; the
//! workflow owns it for the whole `Editing` state.
//!
//! Every transition back into `Listing` re-reads and re-validates the
//! whole store. Libraries are small; simplicity wins over incremental
//! patching.

use crate::codec::{CodecError, MiiCodec};
use crate::record::{CharacterRecord, MiiGender};
use crate::remote::RemoteSource;
use crate::schema::FeatureSchemaSet;
use crate::state::data::LibraryItem;
use crate::state::edit::{EditError, EditSession};
use crate::state::library::{MiiStore, StoreError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

/// Storage key prefix; foreign keys in the store are ignored
const KEY_PREFIX: &str = "mii-";

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Transport failure or non-success response; the payload is the
    /// exact body/error text to show the user.
    #[error("remote fetch failed: {0}")]
    RemoteFetch(String),

    #[error("account identifier must not be empty")]
    EmptyAccount,

    #[error("no entry with id {0:?}")]
    UnknownEntry(String),

    /// A workflow entry point was called in the wrong state. Programming
    /// error in the caller, not a user-facing condition.
    #[error("{action} is not allowed in the {state:?} state")]
    InvalidAction {
        action: &'static str,
        state: WorkflowState,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Observable workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Listing,
    SourceSelect,
    CreatingFromScratch,
    FetchingByAccount,
    FetchingRandom,
    EntryMenu,
    Editing,
}

/// Whether the open session edits a stored entry or a brand-new record.
/// New records get a storage id minted only at save time.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EditTarget {
    New,
    Existing(String),
}

enum Mode {
    Listing,
    SourceSelect,
    CreatingFromScratch,
    FetchingByAccount,
    FetchingRandom,
    EntryMenu { id: String },
    Editing { session: EditSession, target: EditTarget },
}

/// The library workflow. Construction performs the initial listing.
pub struct LibraryWorkflow {
    store: Arc<dyn MiiStore>,
    remote: Arc<dyn RemoteSource>,
    codec: Arc<dyn MiiCodec>,
    /// Template cloned into every session
    schemas: FeatureSchemaSet,
    items: Vec<LibraryItem>,
    mode: Mode,
}

impl LibraryWorkflow {
    pub async fn new(
        store: Arc<dyn MiiStore>,
        remote: Arc<dyn RemoteSource>,
        codec: Arc<dyn MiiCodec>,
        schemas: FeatureSchemaSet,
    ) -> Result<Self, WorkflowError> {
        let mut workflow = LibraryWorkflow {
            store,
            remote,
            codec,
            schemas,
            items: Vec::new(),
            mode: Mode::Listing,
        };
        workflow.refresh().await?;
        Ok(workflow)
    }

    pub fn state(&self) -> WorkflowState {
        match self.mode {
            Mode::Listing => WorkflowState::Listing,
            Mode::SourceSelect => WorkflowState::SourceSelect,
            Mode::CreatingFromScratch => WorkflowState::CreatingFromScratch,
            Mode::FetchingByAccount => WorkflowState::FetchingByAccount,
            Mode::FetchingRandom => WorkflowState::FetchingRandom,
            Mode::EntryMenu { .. } => WorkflowState::EntryMenu,
            Mode::Editing { .. } => WorkflowState::Editing,
        }
    }

    /// The validated entries of the last listing, in storage order
    pub fn items(&self) -> &[LibraryItem] {
        &self.items
    }

    /// The open edit session, while in `Editing`
    pub fn session(&self) -> Option<&EditSession> {
        match &self.mode {
            Mode::Editing { session, .. } => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        match &mut self.mode {
            Mode::Editing { session, .. } => Some(session),
            _ => None,
        }
    }

    // ========== Listing / EntryMenu ==========

    /// `Listing` → `SourceSelect`: the user asked to create a new mii
    pub fn begin_create(&mut self) -> Result<(), WorkflowError> {
        self.require(WorkflowState::Listing, "begin_create")?;
        self.mode = Mode::SourceSelect;
        Ok(())
    }

    /// `Listing` → `EntryMenu`: the user selected a listed entry
    pub fn open_entry_menu(&mut self, id: &str) -> Result<(), WorkflowError> {
        self.require(WorkflowState::Listing, "open_entry_menu")?;
        if !self.items.iter().any(|item| item.id == id) {
            return Err(WorkflowError::UnknownEntry(id.to_string()));
        }
        self.mode = Mode::EntryMenu { id: id.to_string() };
        Ok(())
    }

    /// Cancel out of `SourceSelect`, `CreatingFromScratch`, or
    /// `EntryMenu` back to the list
    pub async fn back_to_listing(&mut self) -> Result<(), WorkflowError> {
        match self.mode {
            Mode::SourceSelect | Mode::CreatingFromScratch | Mode::EntryMenu { .. } => {
                self.refresh().await
            }
            _ => Err(self.invalid("back_to_listing")),
        }
    }

    /// `EntryMenu` → `Editing` with the stored record
    pub async fn edit_entry(&mut self) -> Result<(), WorkflowError> {
        let Mode::EntryMenu { id } = &self.mode else {
            return Err(self.invalid("edit_entry"));
        };
        let id = id.clone();

        let encoded = self
            .store
            .get(&id)
            .await?
            .ok_or_else(|| WorkflowError::UnknownEntry(id.clone()))?;

        match decode_entry(self.codec.as_ref(), &encoded) {
            Ok(record) => {
                self.open_session(record, EditTarget::Existing(id));
                Ok(())
            }
            Err(err) => {
                // The entry went bad between listing and selection; the
                // next listing will skip it
                self.refresh().await?;
                Err(err.into())
            }
        }
    }

    /// `EntryMenu` → `Listing`, removing the entry. No extra
    /// confirmation beyond the menu itself.
    pub async fn delete_entry(&mut self) -> Result<(), WorkflowError> {
        let Mode::EntryMenu { id } = &self.mode else {
            return Err(self.invalid("delete_entry"));
        };
        let id = id.clone();

        self.store.remove(&id).await?;
        println!("🗑️  Deleted mii {id}");
        self.refresh().await
    }

    // ========== Creation sources ==========

    /// `SourceSelect` → `CreatingFromScratch`: the user picked "from scratch"
    pub fn choose_from_scratch(&mut self) -> Result<(), WorkflowError> {
        self.require(WorkflowState::SourceSelect, "choose_from_scratch")?;
        self.mode = Mode::CreatingFromScratch;
        Ok(())
    }

    /// `CreatingFromScratch` → `Editing` with a default record of the
    /// picked kind
    pub fn create_from_scratch(&mut self, gender: MiiGender) -> Result<(), WorkflowError> {
        self.require(WorkflowState::CreatingFromScratch, "create_from_scratch")?;
        self.open_session(CharacterRecord::default_for(gender), EditTarget::New);
        Ok(())
    }

    /// `SourceSelect` → `Editing` via one remote lookup.
    ///
    /// On transport failure or a non-success response the workflow
    /// returns to `SourceSelect` and the error carries the response
    /// body text verbatim. Nothing is stored; a save after editing
    /// mints a fresh id.
    pub async fn fetch_by_account(&mut self, account: &str) -> Result<(), WorkflowError> {
        self.require(WorkflowState::SourceSelect, "fetch_by_account")?;
        if account.trim().is_empty() {
            return Err(WorkflowError::EmptyAccount);
        }

        self.mode = Mode::FetchingByAccount;
        let fetched = self.remote.fetch_by_account(account).await;
        self.ingest_fetched(fetched)
    }

    /// `SourceSelect` → `Editing` via one remote randomize request.
    ///
    /// The observed service never fails this call, but it is not treated
    /// as infallible here: failures take the same return-to-SourceSelect
    /// path as the account lookup.
    pub async fn fetch_random(&mut self) -> Result<(), WorkflowError> {
        self.require(WorkflowState::SourceSelect, "fetch_random")?;

        self.mode = Mode::FetchingRandom;
        let fetched = self.remote.fetch_random().await;
        self.ingest_fetched(fetched)
    }

    fn ingest_fetched(
        &mut self,
        fetched: Result<String, crate::remote::RemoteError>,
    ) -> Result<(), WorkflowError> {
        let payload = match fetched {
            Ok(payload) => payload,
            Err(err) => {
                self.mode = Mode::SourceSelect;
                return Err(WorkflowError::RemoteFetch(err.text().to_string()));
            }
        };

        match decode_entry(self.codec.as_ref(), &payload) {
            Ok(record) => {
                self.open_session(record, EditTarget::New);
                Ok(())
            }
            Err(err) => {
                self.mode = Mode::SourceSelect;
                Err(err.into())
            }
        }
    }

    // ========== Editing exits ==========

    /// Commit the session and persist: overwrite the edited entry in
    /// place, or mint a new id for a new record. On a validation
    /// failure the session (and the `Editing` state) survives so the
    /// user can fix the record or cancel.
    pub async fn save_and_close(&mut self) -> Result<(), WorkflowError> {
        let state = self.state();
        let (record, target) = match &mut self.mode {
            Mode::Editing { session, target } => {
                let record = session.commit(self.codec.as_ref(), true)?;
                (record, target.clone())
            }
            _ => {
                return Err(WorkflowError::InvalidAction {
                    action: "save_and_close",
                    state,
                })
            }
        };

        let id = match target {
            EditTarget::Existing(id) => id,
            EditTarget::New => format!("{KEY_PREFIX}{}", Utc::now().timestamp_millis()),
        };
        let encoded = BASE64.encode(self.codec.encode(&record));
        self.store.set(&id, &encoded).await?;
        println!("✅ Saved mii {id}");

        self.refresh().await
    }

    /// Commit without persisting (the randomize-preview exit). Same
    /// validation gate as a saving commit.
    pub async fn close_without_saving(&mut self) -> Result<(), WorkflowError> {
        let state = self.state();
        match &mut self.mode {
            Mode::Editing { session, .. } => {
                session.commit(self.codec.as_ref(), false)?;
            }
            _ => {
                return Err(WorkflowError::InvalidAction {
                    action: "close_without_saving",
                    state,
                })
            }
        }
        self.refresh().await
    }

    /// Discard the session, no validation, no storage mutation
    pub async fn cancel_editing(&mut self) -> Result<(), WorkflowError> {
        match &mut self.mode {
            Mode::Editing { session, .. } => session.cancel()?,
            _ => return Err(self.invalid("cancel_editing")),
        }
        self.refresh().await
    }

    // ========== Internals ==========

    /// Full re-list: read every `mii-` key, decode and validate each
    /// entry, and keep the survivors. Corrupt entries are logged and
    /// skipped but stay in storage; one bad record never blocks the
    /// rest of the library.
    async fn refresh(&mut self) -> Result<(), WorkflowError> {
        let keys = self.store.list_keys().await?;

        let mut items = Vec::new();
        for key in keys {
            if !key.starts_with(KEY_PREFIX) {
                continue;
            }
            let Some(encoded) = self.store.get(&key).await? else {
                continue;
            };
            match decode_entry(self.codec.as_ref(), &encoded) {
                Ok(record) => items.push(LibraryItem {
                    id: key,
                    name: record.name().to_string(),
                    encoded,
                }),
                Err(err) => eprintln!("⚠️  Skipping mii {key}: {err}"),
            }
        }

        self.items = items;
        self.mode = Mode::Listing;
        Ok(())
    }

    fn open_session(&mut self, record: CharacterRecord, target: EditTarget) {
        self.mode = Mode::Editing {
            session: EditSession::new(record, self.schemas.clone()),
            target,
        };
    }

    fn require(&self, expected: WorkflowState, action: &'static str) -> Result<(), WorkflowError> {
        if self.state() == expected {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> WorkflowError {
        WorkflowError::InvalidAction {
            action,
            state: self.state(),
        }
    }
}

/// Base64 text → codec bytes → decoded, validated record
fn decode_entry(codec: &dyn MiiCodec, encoded: &str) -> Result<CharacterRecord, CodecError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| CodecError::Decode(format!("invalid base64: {e}")))?;
    let record = codec.decode(&bytes)?;
    codec.validate(&record)?;
    Ok(record)
}

//! Mii character editor core
//!
//! This crate implements the editing engine behind a Mii-style character
//! editor: declarative feature schemas bound to a compact binary character
//! record, single-flight edit sessions, and the library workflow that
//! acquires records (from scratch, by account lookup, or randomized),
//! edits them, and persists them to a local store.
//!
//! Rendering, dialogs, and audio are deliberately not here: the
//! presentation layer consumes the schemas and drives the session and
//! workflow entry points. The byte-level record codec is likewise an
//! external collaborator behind the [`codec::MiiCodec`] trait.

pub mod codec;
pub mod color;
pub mod record;
pub mod remote;
pub mod schema;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use codec::{CodecError, MiiCodec};
pub use record::{CharacterRecord, FieldId, MiiGender};
pub use schema::{FeatureSchema, FeatureSchemaSet, RangeDirection};
pub use state::edit::{EditError, EditSession};
pub use state::workflow::{LibraryWorkflow, WorkflowError, WorkflowState};

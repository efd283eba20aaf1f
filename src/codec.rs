//! Character record codec seam
//!
//! The byte-for-byte binary format of a mii record (layout, checksum,
//! reserved fields) lives in an external codec library. This crate only
//! depends on the shape of that collaborator: decode untrusted bytes,
//! encode a record back, and re-check whole-record consistency. Per-field
//! range rules during editing are NOT the codec's job; the binding
//! engine owns those.

use crate::record::CharacterRecord;
use thiserror::Error;

/// Failures reported by a codec implementation.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes do not parse as a character record at all.
    #[error("malformed record: {0}")]
    Decode(String),

    /// The record parsed but fails internal consistency checks
    /// (checksum, reserved fields, enumerated ranges).
    #[error("inconsistent record: {0}")]
    Validation(String),
}

/// External binary codec for character records.
pub trait MiiCodec: Send + Sync {
    /// Parse raw bytes into a record, or fail with [`CodecError::Decode`].
    fn decode(&self, bytes: &[u8]) -> Result<CharacterRecord, CodecError>;

    /// Serialize a record to its binary form. Encoding a record that came
    /// out of `decode` or a session commit cannot fail.
    fn encode(&self, record: &CharacterRecord) -> Vec<u8>;

    /// Whole-record consistency check, independent of the per-field
    /// bounds the editor enforces. Run at listing time, on remote
    /// ingestion, and again at session commit.
    fn validate(&self, record: &CharacterRecord) -> Result<(), CodecError>;
}

//! Feature binding and edit sessions
//!
//! `FeatureBinding` is the single mutation path for a record being
//! edited: it takes "the user picked value V" / "the user nudged range R"
//! events, enforces the schema rules, and notifies the change listener
//! after every accepted mutation. `EditSession` wraps one binding and one
//! schema set in the open/closed lifecycle: any number of edits while
//! open, then exactly one of save-commit, unsaved-commit, or cancel.

use crate::codec::{CodecError, MiiCodec};
use crate::record::CharacterRecord;
use crate::schema::{FeatureSchema, FeatureSchemaSet, RangeDirection};
use thiserror::Error;

/// Errors from the binding engine and session lifecycle.
#[derive(Debug, Error)]
pub enum EditError {
    /// The picked value is not in the choice schema's item list. With
    /// well-formed schemas this never happens; it signals a defect in
    /// the caller, not bad user input.
    #[error("value {0} is not a choice of this feature")]
    UnknownChoiceValue(i32),

    /// The label is not part of this session's schema set.
    #[error("unknown feature {0:?}")]
    UnknownFeature(String),

    /// A choice operation was applied to a range feature or vice versa.
    #[error("operation does not match the feature's schema shape")]
    SchemaMismatch,

    /// Use after a terminal action. Sessions are single-use.
    #[error("session is already closed")]
    SessionClosed,

    /// The codec rejected the record at commit. The session stays open
    /// so the caller can keep editing or cancel explicitly.
    #[error("commit validation failed: {0}")]
    CommitValidationFailed(CodecError),
}

/// Called after every accepted mutation with the post-mutation record
/// and the new revision number.
pub type ChangeListener = Box<dyn FnMut(&CharacterRecord, u64) + Send>;

/// Called exactly once when the session closes, with the final record
/// (None on cancel) and whether the caller asked for the result to be
/// persisted.
pub type CloseListener = Box<dyn FnOnce(Option<&CharacterRecord>, bool) + Send>;

/// Binds feature schemas to one record instance.
///
/// The binding owns the record exclusively for its lifetime, which is
/// what makes "every field is within its schema bounds whenever the
/// record is observable" enforceable at this one choke point. Each call
/// mutates at most one field and never leaves a partial state behind.
pub struct FeatureBinding {
    record: CharacterRecord,
    revision: u64,
    on_change: Option<ChangeListener>,
}

impl FeatureBinding {
    pub fn new(record: CharacterRecord) -> Self {
        FeatureBinding {
            record,
            revision: 0,
            on_change: None,
        }
    }

    pub fn record(&self) -> &CharacterRecord {
        &self.record
    }

    /// Strictly increases by 1 on every accepted mutation; rejected
    /// mutations leave it untouched.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_change_listener(&mut self, listener: ChangeListener) {
        self.on_change = Some(listener);
    }

    /// Current value of the schema's bound field. Pure read.
    pub fn current_value(&self, schema: &FeatureSchema) -> i32 {
        self.record.get(schema.field())
    }

    /// Select one of a choice feature's entries.
    ///
    /// Fails with [`EditError::UnknownChoiceValue`] (record untouched)
    /// if the value is not in the item list.
    pub fn apply_choice(&mut self, schema: &FeatureSchema, value: i32) -> Result<(), EditError> {
        if matches!(schema, FeatureSchema::Range { .. }) {
            return Err(EditError::SchemaMismatch);
        }
        if !schema.contains_value(value) {
            return Err(EditError::UnknownChoiceValue(value));
        }

        self.record.set(schema.field(), value);
        self.accepted();
        Ok(())
    }

    /// Nudge a range feature one step in the given direction, clamping
    /// at the bounds. Always accepted: a clamped no-op at the edge still
    /// counts as a mutation (revision bump + notification), the caller
    /// decides whether to suppress its sound cue.
    pub fn apply_range_delta(
        &mut self,
        schema: &FeatureSchema,
        direction: RangeDirection,
    ) -> Result<(), EditError> {
        let FeatureSchema::Range { field, min, max, .. } = schema else {
            return Err(EditError::SchemaMismatch);
        };

        let next = (self.record.get(*field) + direction.delta()).clamp(*min, *max);
        self.record.set(*field, next);
        self.accepted();
        Ok(())
    }

    /// Mutate-then-notify-then-return: a listener reading the record
    /// inside the callback always observes the post-mutation state.
    fn accepted(&mut self) {
        self.revision += 1;
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.record, self.revision);
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseKind {
    SavedCommit,
    UnsavedCommit,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed(CloseKind),
}

/// One record being edited, from acquisition to terminal action.
pub struct EditSession {
    binding: FeatureBinding,
    schemas: FeatureSchemaSet,
    state: SessionState,
    on_close: Option<CloseListener>,
}

impl EditSession {
    pub fn new(record: CharacterRecord, schemas: FeatureSchemaSet) -> Self {
        EditSession {
            binding: FeatureBinding::new(record),
            schemas,
            state: SessionState::Open,
            on_close: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn record(&self) -> &CharacterRecord {
        self.binding.record()
    }

    pub fn revision(&self) -> u64 {
        self.binding.revision()
    }

    pub fn schemas(&self) -> &FeatureSchemaSet {
        &self.schemas
    }

    pub fn set_change_listener(&mut self, listener: ChangeListener) {
        self.binding.set_change_listener(listener);
    }

    pub fn set_close_listener(&mut self, listener: CloseListener) {
        self.on_close = Some(listener);
    }

    pub fn current_value(&self, label: &str) -> Result<i32, EditError> {
        let schema = self.schema(label)?;
        Ok(self.binding.current_value(schema))
    }

    pub fn apply_choice(&mut self, label: &str, value: i32) -> Result<(), EditError> {
        self.ensure_open()?;
        let schema = self
            .schemas
            .get(label)
            .ok_or_else(|| EditError::UnknownFeature(label.to_string()))?;
        self.binding.apply_choice(schema, value)
    }

    pub fn apply_range_delta(
        &mut self,
        label: &str,
        direction: RangeDirection,
    ) -> Result<(), EditError> {
        self.ensure_open()?;
        let schema = self
            .schemas
            .get(label)
            .ok_or_else(|| EditError::UnknownFeature(label.to_string()))?;
        self.binding.apply_range_delta(schema, direction)
    }

    /// Terminal action: commit the record, optionally requesting that
    /// the caller persist it.
    ///
    /// The codec's whole-record validation is re-run first; on failure
    /// the session reports [`EditError::CommitValidationFailed`] and
    /// REMAINS OPEN so the caller may keep editing or cancel.
    pub fn commit(
        &mut self,
        codec: &dyn MiiCodec,
        save: bool,
    ) -> Result<CharacterRecord, EditError> {
        self.ensure_open()?;
        codec
            .validate(self.binding.record())
            .map_err(EditError::CommitValidationFailed)?;

        self.state = SessionState::Closed(if save {
            CloseKind::SavedCommit
        } else {
            CloseKind::UnsavedCommit
        });

        let record = self.binding.record().clone();
        if let Some(listener) = self.on_close.take() {
            listener(Some(&record), save);
        }
        Ok(record)
    }

    /// Terminal action: discard the record. No validation.
    pub fn cancel(&mut self) -> Result<(), EditError> {
        self.ensure_open()?;
        self.state = SessionState::Closed(CloseKind::Cancelled);
        if let Some(listener) = self.on_close.take() {
            listener(None, false);
        }
        Ok(())
    }

    fn schema(&self, label: &str) -> Result<&FeatureSchema, EditError> {
        self.schemas
            .get(label)
            .ok_or_else(|| EditError::UnknownFeature(label.to_string()))
    }

    fn ensure_open(&self) -> Result<(), EditError> {
        match self.state {
            SessionState::Open => Ok(()),
            SessionState::Closed(_) => Err(EditError::SessionClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MiiGender;
    use crate::schema::tabs;
    use crate::testing::JsonCodec;
    use std::sync::{Arc, Mutex};

    fn open_glasses_session() -> EditSession {
        EditSession::new(CharacterRecord::default_for(MiiGender::Male), tabs::glasses())
    }

    #[test]
    fn test_apply_choice_sets_value() {
        let mut session = open_glasses_session();

        session.apply_choice("Type", 3).unwrap();

        assert_eq!(session.current_value("Type").unwrap(), 3);
        assert_eq!(session.revision(), 1);
    }

    #[test]
    fn test_unknown_choice_value_rejected_without_side_effects() {
        let mut session = open_glasses_session();
        session.apply_choice("Type", 5).unwrap();

        // 9 is outside the 8-entry glasses table
        let err = session.apply_choice("Type", 9).unwrap_err();
        assert!(matches!(err, EditError::UnknownChoiceValue(9)));

        assert_eq!(session.current_value("Type").unwrap(), 5);
        assert_eq!(session.revision(), 1);
    }

    #[test]
    fn test_unknown_feature_label() {
        let mut session = open_glasses_session();
        let err = session.apply_choice("Eyebrows", 0).unwrap_err();
        assert!(matches!(err, EditError::UnknownFeature(_)));
    }

    #[test]
    fn test_schema_shape_mismatch() {
        let mut session = open_glasses_session();

        let err = session.apply_choice("Position", 10).unwrap_err();
        assert!(matches!(err, EditError::SchemaMismatch));

        let err = session
            .apply_range_delta("Type", RangeDirection::Up)
            .unwrap_err();
        assert!(matches!(err, EditError::SchemaMismatch));
    }

    #[test]
    fn test_range_clamps_at_lower_bound() {
        // Position is min=3, max=18; a fresh mii starts at 10
        let mut session = open_glasses_session();
        for _ in 0..7 {
            session
                .apply_range_delta("Position", RangeDirection::Down)
                .unwrap();
        }
        assert_eq!(session.current_value("Position").unwrap(), 3);

        // At the bound: no error, value stays, but the mutation is still
        // accepted, so the revision bumps
        let before = session.revision();
        session
            .apply_range_delta("Position", RangeDirection::Down)
            .unwrap();
        assert_eq!(session.current_value("Position").unwrap(), 3);
        assert_eq!(session.revision(), before + 1);
    }

    #[test]
    fn test_range_walk_stays_in_bounds() {
        let mut session = open_glasses_session();

        // A walk that bounces off both bounds
        let walk = [
            RangeDirection::Up,
            RangeDirection::Up,
            RangeDirection::Up,
            RangeDirection::Up,
            RangeDirection::Up,
            RangeDirection::Down,
            RangeDirection::Down,
            RangeDirection::Down,
            RangeDirection::Down,
            RangeDirection::Down,
            RangeDirection::Down,
            RangeDirection::Down,
            RangeDirection::Up,
        ];

        let mut expected = session.current_value("Size").unwrap();
        for (i, step) in walk.iter().enumerate() {
            session.apply_range_delta("Size", *step).unwrap();
            expected = (expected + step.delta()).clamp(0, 8);

            let value = session.current_value("Size").unwrap();
            assert!((0..=8).contains(&value));
            assert_eq!(value, expected);
            assert_eq!(session.revision(), (i + 1) as u64);
        }
    }

    #[test]
    fn test_change_listener_observes_post_mutation_state() {
        let mut session = open_glasses_session();
        let seen: Arc<Mutex<Vec<(i32, u64)>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        session.set_change_listener(Box::new(move |record, revision| {
            sink.lock()
                .unwrap()
                .push((record.get(crate::record::FieldId::GlassesType), revision));
        }));

        session.apply_choice("Type", 2).unwrap();
        session.apply_choice("Type", 7).unwrap();
        let _ = session.apply_choice("Type", 99); // rejected, no notification

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![(2, 1), (7, 2)]);
    }

    #[test]
    fn test_commit_closes_and_fires_close_listener_once() {
        let mut session = open_glasses_session();
        let closed: Arc<Mutex<Vec<bool>>> = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&closed);
        session.set_close_listener(Box::new(move |record, save| {
            assert!(record.is_some());
            sink.lock().unwrap().push(save);
        }));

        session.apply_choice("Type", 1).unwrap();
        let record = session.commit(&JsonCodec::new(), true).unwrap();

        assert_eq!(record.get(crate::record::FieldId::GlassesType), 1);
        assert_eq!(
            session.state(),
            SessionState::Closed(CloseKind::SavedCommit)
        );
        assert_eq!(*closed.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_cancel_reports_no_record() {
        let mut session = open_glasses_session();
        let fired = Arc::new(Mutex::new(0));

        let sink = Arc::clone(&fired);
        session.set_close_listener(Box::new(move |record, save| {
            assert!(record.is_none());
            assert!(!save);
            *sink.lock().unwrap() += 1;
        }));

        session.cancel().unwrap();
        assert_eq!(session.state(), SessionState::Closed(CloseKind::Cancelled));
        assert_eq!(*fired.lock().unwrap(), 1);
    }

    #[test]
    fn test_closed_session_rejects_everything() {
        let mut session = open_glasses_session();
        session.commit(&JsonCodec::new(), false).unwrap();
        assert_eq!(
            session.state(),
            SessionState::Closed(CloseKind::UnsavedCommit)
        );

        assert!(matches!(
            session.apply_choice("Type", 1),
            Err(EditError::SessionClosed)
        ));
        assert!(matches!(
            session.apply_range_delta("Size", RangeDirection::Up),
            Err(EditError::SessionClosed)
        ));
        assert!(matches!(
            session.commit(&JsonCodec::new(), true),
            Err(EditError::SessionClosed)
        ));
        assert!(matches!(session.cancel(), Err(EditError::SessionClosed)));
    }

    #[test]
    fn test_failed_commit_leaves_session_open_and_editable() {
        let codec = JsonCodec::new();
        codec.set_reject_validation(true);

        let mut session = open_glasses_session();
        session.apply_choice("Type", 4).unwrap();

        let err = session.commit(&codec, true).unwrap_err();
        assert!(matches!(err, EditError::CommitValidationFailed(_)));
        assert!(session.is_open());

        // Still editable after the failed commit
        session.apply_choice("Type", 2).unwrap();
        assert_eq!(session.revision(), 2);

        // And commit succeeds once the record validates again
        codec.set_reject_validation(false);
        session.commit(&codec, true).unwrap();
        assert!(!session.is_open());
    }
}

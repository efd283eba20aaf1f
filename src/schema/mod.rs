//! Declarative feature schemas
//!
//! Every editable dimension of a character record is data, not code: a
//! schema names the bound record field and either enumerates the values
//! the user may pick (with an icon or color swatch per value) or gives an
//! inclusive integer range walked by two directional controls. The
//! binding engine dispatches on the schema shape exactly once; there is
//! no per-feature handler code anywhere.

pub mod paging;
pub mod tabs;

use crate::color::ColorEntry;
use crate::record::FieldId;

/// One pickable entry of a Choice-Icon feature.
#[derive(Debug, Clone, PartialEq)]
pub struct IconItem {
    /// Value written to the bound field when this entry is picked
    pub value: i32,
    /// Icon asset reference for the presentation layer
    pub icon: String,
}

/// One pickable entry of a Choice-Color feature.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorItem {
    pub value: i32,
    pub color: ColorEntry,
}

/// The two directional controls of a Range feature. Each activation
/// moves the bound field one step; the engine clamps at the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeDirection {
    Down,
    Up,
}

impl RangeDirection {
    pub fn delta(self) -> i32 {
        match self {
            RangeDirection::Down => -1,
            RangeDirection::Up => 1,
        }
    }
}

/// Presentation data for one directional control of a Range feature:
/// which icon to draw and which sound cue to play on activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeControl {
    pub icon: &'static str,
    pub sound: &'static str,
}

/// One editable dimension of a record.
///
/// `ChoiceIcon` and `ChoiceColor` have identical binding semantics and
/// differ only in how the entries render.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureSchema {
    ChoiceIcon {
        field: FieldId,
        items: Vec<IconItem>,
    },
    ChoiceColor {
        field: FieldId,
        items: Vec<ColorItem>,
    },
    Range {
        field: FieldId,
        min: i32,
        max: i32,
        down: RangeControl,
        up: RangeControl,
    },
}

impl FeatureSchema {
    /// The record field this feature is bound to
    pub fn field(&self) -> FieldId {
        match *self {
            FeatureSchema::ChoiceIcon { field, .. } => field,
            FeatureSchema::ChoiceColor { field, .. } => field,
            FeatureSchema::Range { field, .. } => field,
        }
    }

    /// Whether `value` is one of this choice feature's entries.
    /// Always false for Range features.
    pub fn contains_value(&self, value: i32) -> bool {
        match self {
            FeatureSchema::ChoiceIcon { items, .. } => items.iter().any(|i| i.value == value),
            FeatureSchema::ChoiceColor { items, .. } => items.iter().any(|i| i.value == value),
            FeatureSchema::Range { .. } => false,
        }
    }

    /// Number of pickable entries (None for Range features)
    pub fn choice_len(&self) -> Option<usize> {
        match self {
            FeatureSchema::ChoiceIcon { items, .. } => Some(items.len()),
            FeatureSchema::ChoiceColor { items, .. } => Some(items.len()),
            FeatureSchema::Range { .. } => None,
        }
    }
}

/// An ordered set of labeled features making up one editor category
/// (Glasses, Hair, ...). Labels are unique within a set; order is the
/// presentation order. Sets are authored once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchemaSet {
    entries: Vec<(String, FeatureSchema)>,
}

impl FeatureSchemaSet {
    /// Build a set from `(label, schema)` pairs.
    ///
    /// Panics on a duplicate label: sets are authored constants, so a
    /// duplicate is a programming error, not a runtime condition.
    pub fn new<L: Into<String>>(entries: Vec<(L, FeatureSchema)>) -> Self {
        let entries: Vec<(String, FeatureSchema)> =
            entries.into_iter().map(|(l, s)| (l.into(), s)).collect();
        for (i, (label, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(other, _)| other == label) {
                panic!("duplicate feature label: {label:?}");
            }
        }
        FeatureSchemaSet { entries }
    }

    /// Look up a feature by label
    pub fn get(&self, label: &str) -> Option<&FeatureSchema> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, s)| s)
    }

    /// Labels and schemas in presentation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureSchema)> {
        self.entries.iter().map(|(l, s)| (l.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

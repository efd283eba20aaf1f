//! The in-memory character record
//!
//! This is the decoded form of the compact binary mii description. The
//! record itself is a dumb value type: it never checks bounds. All
//! mutation during editing goes through the feature-binding engine
//! (`state::edit`), which is the single place range and choice rules are
//! enforced. Outside a session a record is read-only.

use serde::{Deserialize, Serialize};

/// The two from-scratch presets offered when creating a new mii.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiiGender {
    Male,
    Female,
}

/// Addresses one editable integer field of a [`CharacterRecord`].
///
/// Feature schemas bind to fields through this enum; the display name is
/// deliberately absent (it is read-only in the editor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldId {
    FavoriteColor,
    SkinColor,
    HairType,
    HairColor,
    HairFlipped,
    EyeType,
    EyeColor,
    EyeYPosition,
    EyeScale,
    MouthType,
    MouthColor,
    MouthYPosition,
    MouthScale,
    GlassesType,
    GlassesColor,
    GlassesYPosition,
    GlassesScale,
}

/// All editable state of one mii
///
/// Serialized by codec implementations and test fixtures; stored records
/// travel as the codec's encoded bytes, base64-encoded into text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    /// Display name, shown in the library list. Not editable here.
    name: String,
    gender: MiiGender,

    // ========== Body ==========
    favorite_color: i32,
    skin_color: i32,

    // ========== Hair ==========
    hair_type: i32,
    hair_color: i32,
    hair_flipped: i32,

    // ========== Eyes ==========
    eye_type: i32,
    eye_color: i32,
    eye_y_position: i32,
    eye_scale: i32,

    // ========== Mouth ==========
    mouth_type: i32,
    mouth_color: i32,
    mouth_y_position: i32,
    mouth_scale: i32,

    // ========== Glasses ==========
    glasses_type: i32,
    glasses_color: i32,
    glasses_y_position: i32,
    glasses_scale: i32,
}

impl CharacterRecord {
    /// Create the default record for a from-scratch creation of the given kind.
    pub fn default_for(gender: MiiGender) -> Self {
        CharacterRecord {
            name: "Mii".to_string(),
            gender,
            favorite_color: 0,
            skin_color: 0,
            hair_type: match gender {
                MiiGender::Male => 0,
                MiiGender::Female => 6,
            },
            hair_color: 0,
            hair_flipped: 0,
            eye_type: 2,
            eye_color: 0,
            eye_y_position: 12,
            eye_scale: 4,
            mouth_type: 0,
            mouth_color: 0,
            mouth_y_position: 13,
            mouth_scale: 4,
            glasses_type: 0,
            glasses_color: 0,
            glasses_y_position: 10,
            glasses_scale: 4,
        }
    }

    /// Display name of this mii
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> MiiGender {
        self.gender
    }

    /// Read one editable field
    pub fn get(&self, field: FieldId) -> i32 {
        match field {
            FieldId::FavoriteColor => self.favorite_color,
            FieldId::SkinColor => self.skin_color,
            FieldId::HairType => self.hair_type,
            FieldId::HairColor => self.hair_color,
            FieldId::HairFlipped => self.hair_flipped,
            FieldId::EyeType => self.eye_type,
            FieldId::EyeColor => self.eye_color,
            FieldId::EyeYPosition => self.eye_y_position,
            FieldId::EyeScale => self.eye_scale,
            FieldId::MouthType => self.mouth_type,
            FieldId::MouthColor => self.mouth_color,
            FieldId::MouthYPosition => self.mouth_y_position,
            FieldId::MouthScale => self.mouth_scale,
            FieldId::GlassesType => self.glasses_type,
            FieldId::GlassesColor => self.glasses_color,
            FieldId::GlassesYPosition => self.glasses_y_position,
            FieldId::GlassesScale => self.glasses_scale,
        }
    }

    /// Write one editable field. Only the binding engine may do this;
    /// bounds are its responsibility, not the record's.
    pub(crate) fn set(&mut self, field: FieldId, value: i32) {
        match field {
            FieldId::FavoriteColor => self.favorite_color = value,
            FieldId::SkinColor => self.skin_color = value,
            FieldId::HairType => self.hair_type = value,
            FieldId::HairColor => self.hair_color = value,
            FieldId::HairFlipped => self.hair_flipped = value,
            FieldId::EyeType => self.eye_type = value,
            FieldId::EyeColor => self.eye_color = value,
            FieldId::EyeYPosition => self.eye_y_position = value,
            FieldId::EyeScale => self.eye_scale = value,
            FieldId::MouthType => self.mouth_type = value,
            FieldId::MouthColor => self.mouth_color = value,
            FieldId::MouthYPosition => self.mouth_y_position = value,
            FieldId::MouthScale => self.mouth_scale = value,
            FieldId::GlassesType => self.glasses_type = value,
            FieldId::GlassesColor => self.glasses_color = value,
            FieldId::GlassesYPosition => self.glasses_y_position = value,
            FieldId::GlassesScale => self.glasses_scale = value,
        }
    }
}

//! Authored editor categories
//!
//! One schema set per editor tab. These are the only place feature
//! bounds and choice tables are spelled out; the engine and workflow are
//! generic over whatever sets they are handed.

use crate::color::{
    ColorEntry, EYE_COLORS, FAVORITE_COLORS, GLASSES_COLORS, HAIR_COLORS, LIP_COLORS, SKIN_COLORS,
};
use crate::record::FieldId;
use crate::schema::{ColorItem, FeatureSchema, FeatureSchemaSet, IconItem, RangeControl};

fn icon_items(category: &str, count: i32) -> Vec<IconItem> {
    (0..count)
        .map(|k| IconItem {
            value: k,
            icon: format!("assets/img/{category}/{k}.png"),
        })
        .collect()
}

fn color_items(table: &[ColorEntry]) -> Vec<ColorItem> {
    table
        .iter()
        .enumerate()
        .map(|(k, &color)| ColorItem { value: k as i32, color })
        .collect()
}

fn position_range(field: FieldId, min: i32, max: i32) -> FeatureSchema {
    // Moving the feature up on screen decreases its Y value, hence the
    // crossed icon/sound pairing (kept from the original editor).
    FeatureSchema::Range {
        field,
        min,
        max,
        down: RangeControl { icon: "position_move_up", sound: "position_down" },
        up: RangeControl { icon: "position_move_down", sound: "position_up" },
    }
}

fn scale_range(field: FieldId, min: i32, max: i32) -> FeatureSchema {
    FeatureSchema::Range {
        field,
        min,
        max,
        down: RangeControl { icon: "position_size_down", sound: "scale_down" },
        up: RangeControl { icon: "position_size_up", sound: "scale_up" },
    }
}

pub fn glasses() -> FeatureSchemaSet {
    FeatureSchemaSet::new(vec![
        (
            "Type",
            FeatureSchema::ChoiceIcon {
                field: FieldId::GlassesType,
                items: icon_items("glasses", 8),
            },
        ),
        (
            "Color",
            FeatureSchema::ChoiceColor {
                field: FieldId::GlassesColor,
                items: color_items(&GLASSES_COLORS),
            },
        ),
        ("Position", position_range(FieldId::GlassesYPosition, 3, 18)),
        ("Size", scale_range(FieldId::GlassesScale, 0, 8)),
    ])
}

pub fn hair() -> FeatureSchemaSet {
    FeatureSchemaSet::new(vec![
        (
            "Type",
            FeatureSchema::ChoiceIcon {
                field: FieldId::HairType,
                items: icon_items("hair", 12),
            },
        ),
        (
            "Color",
            FeatureSchema::ChoiceColor {
                field: FieldId::HairColor,
                items: color_items(&HAIR_COLORS),
            },
        ),
        (
            "Flip",
            FeatureSchema::ChoiceIcon {
                field: FieldId::HairFlipped,
                items: icon_items("hair_flip", 2),
            },
        ),
    ])
}

pub fn eyes() -> FeatureSchemaSet {
    FeatureSchemaSet::new(vec![
        (
            "Type",
            FeatureSchema::ChoiceIcon {
                field: FieldId::EyeType,
                items: icon_items("eyes", 60),
            },
        ),
        (
            "Color",
            FeatureSchema::ChoiceColor {
                field: FieldId::EyeColor,
                items: color_items(&EYE_COLORS),
            },
        ),
        ("Position", position_range(FieldId::EyeYPosition, 0, 18)),
        ("Size", scale_range(FieldId::EyeScale, 0, 7)),
    ])
}

pub fn mouth() -> FeatureSchemaSet {
    FeatureSchemaSet::new(vec![
        (
            "Type",
            FeatureSchema::ChoiceIcon {
                field: FieldId::MouthType,
                items: icon_items("mouth", 36),
            },
        ),
        (
            // Swatches use the paired lip palette; the flat MOUTH_COLORS
            // table is the renderer's concern.
            "Color",
            FeatureSchema::ChoiceColor {
                field: FieldId::MouthColor,
                items: color_items(&LIP_COLORS),
            },
        ),
        ("Position", position_range(FieldId::MouthYPosition, 0, 18)),
        ("Size", scale_range(FieldId::MouthScale, 0, 8)),
    ])
}

pub fn face() -> FeatureSchemaSet {
    FeatureSchemaSet::new(vec![(
        "Skin Color",
        FeatureSchema::ChoiceColor {
            field: FieldId::SkinColor,
            items: color_items(&SKIN_COLORS),
        },
    )])
}

pub fn body() -> FeatureSchemaSet {
    FeatureSchemaSet::new(vec![(
        "Favorite Color",
        FeatureSchema::ChoiceColor {
            field: FieldId::FavoriteColor,
            items: color_items(&FAVORITE_COLORS),
        },
    )])
}

/// All tabs in presentation order
pub fn editor_tabs() -> Vec<(&'static str, FeatureSchemaSet)> {
    vec![
        ("Face", face()),
        ("Hair", hair()),
        ("Eyes", eyes()),
        ("Mouth", mouth()),
        ("Glasses", glasses()),
        ("Body", body()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::paging;

    #[test]
    fn test_glasses_matches_record_layout() {
        let set = glasses();
        let labels: Vec<&str> = set.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Type", "Color", "Position", "Size"]);

        assert_eq!(set.get("Type").unwrap().choice_len(), Some(8));
        assert_eq!(set.get("Color").unwrap().choice_len(), Some(6));

        match set.get("Position").unwrap() {
            FeatureSchema::Range { min, max, down, up, .. } => {
                assert_eq!((*min, *max), (3, 18));
                assert_eq!(down.sound, "position_down");
                assert_eq!(up.sound, "position_up");
            }
            other => panic!("expected Range, got {other:?}"),
        }
    }

    #[test]
    fn test_color_features_cover_their_tables() {
        assert_eq!(body().get("Favorite Color").unwrap().choice_len(), Some(12));
        assert_eq!(face().get("Skin Color").unwrap().choice_len(), Some(6));
        assert_eq!(hair().get("Color").unwrap().choice_len(), Some(8));
        assert_eq!(eyes().get("Color").unwrap().choice_len(), Some(6));
        assert_eq!(mouth().get("Color").unwrap().choice_len(), Some(5));
    }

    #[test]
    fn test_eye_types_page_evenly() {
        let set = eyes();
        let FeatureSchema::ChoiceIcon { items, .. } = set.get("Type").unwrap() else {
            panic!("expected ChoiceIcon");
        };

        let pages = paging::pages(items, 9);
        assert_eq!(pages.len(), 7);
        assert_eq!(pages.last().unwrap().items.len(), 6);
    }

    #[test]
    fn test_every_tab_has_features() {
        for (name, set) in editor_tabs() {
            assert!(!set.is_empty(), "tab {name} is empty");
        }
    }
}

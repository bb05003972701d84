//! Generic Level model messages.

use schema::{FamilyDef, FieldDescriptor, LayoutDef, VariantSetDef};

use crate::generics::{OPTIONAL_SET_PARAMETERS, TRANSITION_TIME};

pub const FAMILY: &str = "GenericLevel";

pub const GENERIC_LEVEL_GET: u32 = 0x8205;
pub const GENERIC_LEVEL_SET: u32 = 0x8206;
pub const GENERIC_LEVEL_SET_UNACKNOWLEDGED: u32 = 0x8207;
pub const GENERIC_LEVEL_STATUS: u32 = 0x8208;
pub const GENERIC_DELTA_SET: u32 = 0x8209;
pub const GENERIC_DELTA_SET_UNACKNOWLEDGED: u32 = 0x820A;
pub const GENERIC_MOVE_SET: u32 = 0x820B;
pub const GENERIC_MOVE_SET_UNACKNOWLEDGED: u32 = 0x820C;

pub fn layouts() -> Vec<LayoutDef> {
    vec![
        LayoutDef::new("GenericLevelGet"),
        LayoutDef::new("GenericLevelSetMinimal")
            .field(FieldDescriptor::i16("level"))
            .field(FieldDescriptor::u8("tid")),
        LayoutDef::new("GenericLevelSetOptional")
            .embed("GenericLevelSetMinimal")
            .embed(OPTIONAL_SET_PARAMETERS),
        LayoutDef::new("GenericDeltaSetMinimal")
            .field(FieldDescriptor::i32("delta_level"))
            .field(FieldDescriptor::u8("tid")),
        LayoutDef::new("GenericDeltaSetOptional")
            .embed("GenericDeltaSetMinimal")
            .embed(OPTIONAL_SET_PARAMETERS),
        LayoutDef::new("GenericMoveSetMinimal")
            .field(FieldDescriptor::i16("delta_level"))
            .field(FieldDescriptor::u8("tid")),
        LayoutDef::new("GenericMoveSetOptional")
            .embed("GenericMoveSetMinimal")
            .embed(OPTIONAL_SET_PARAMETERS),
        LayoutDef::new("GenericLevelStatusMinimal").field(FieldDescriptor::i16("present_level")),
        LayoutDef::new("GenericLevelStatusOptional")
            .embed("GenericLevelStatusMinimal")
            .field(FieldDescriptor::i16("target_level"))
            .nested("remaining_time", TRANSITION_TIME),
    ]
}

/// Every set/status message tries the longer form first.
pub fn variant_sets() -> Vec<VariantSetDef> {
    ["GenericLevelSet", "GenericDeltaSet", "GenericMoveSet", "GenericLevelStatus"]
        .into_iter()
        .map(|name| {
            VariantSetDef::new(name)
                .variant("optional", format!("{name}Optional"))
                .variant("minimal", format!("{name}Minimal"))
        })
        .collect()
}

pub fn family() -> FamilyDef {
    FamilyDef::new(FAMILY)
        .message(GENERIC_LEVEL_GET, "GENERIC_LEVEL_GET", "GenericLevelGet")
        .message_variants(GENERIC_LEVEL_SET, "GENERIC_LEVEL_SET", "GenericLevelSet")
        .message_variants(
            GENERIC_LEVEL_SET_UNACKNOWLEDGED,
            "GENERIC_LEVEL_SET_UNACKNOWLEDGED",
            "GenericLevelSet",
        )
        .message_variants(GENERIC_LEVEL_STATUS, "GENERIC_LEVEL_STATUS", "GenericLevelStatus")
        .message_variants(GENERIC_DELTA_SET, "GENERIC_DELTA_SET", "GenericDeltaSet")
        .message_variants(
            GENERIC_DELTA_SET_UNACKNOWLEDGED,
            "GENERIC_DELTA_SET_UNACKNOWLEDGED",
            "GenericDeltaSet",
        )
        .message_variants(GENERIC_MOVE_SET, "GENERIC_MOVE_SET", "GenericMoveSet")
        .message_variants(
            GENERIC_MOVE_SET_UNACKNOWLEDGED,
            "GENERIC_MOVE_SET_UNACKNOWLEDGED",
            "GenericMoveSet",
        )
}

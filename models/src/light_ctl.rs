//! Light CTL and Light CTL Setup model messages.

use schema::{FamilyDef, FieldDescriptor, LayoutDef, VariantSetDef};

use crate::generics::{OPTIONAL_SET_PARAMETERS, TRANSITION_TIME};

pub const FAMILY: &str = "LightCTL";
pub const SETUP_FAMILY: &str = "LightCTLSetup";

pub const RANGE_STATUS_LAYOUT: &str = "LightCTLRangeStatus";

pub const LIGHT_CTL_GET: u32 = 0x825D;
pub const LIGHT_CTL_SET: u32 = 0x825E;
pub const LIGHT_CTL_SET_UNACKNOWLEDGED: u32 = 0x825F;
pub const LIGHT_CTL_STATUS: u32 = 0x8260;
pub const LIGHT_CTL_TEMPERATURE_GET: u32 = 0x8261;
pub const LIGHT_CTL_TEMPERATURE_RANGE_GET: u32 = 0x8262;
pub const LIGHT_CTL_TEMPERATURE_RANGE_STATUS: u32 = 0x8263;
pub const LIGHT_CTL_TEMPERATURE_SET: u32 = 0x8264;
pub const LIGHT_CTL_TEMPERATURE_SET_UNACKNOWLEDGED: u32 = 0x8265;
pub const LIGHT_CTL_TEMPERATURE_STATUS: u32 = 0x8266;
pub const LIGHT_CTL_TEMPERATURE_DEFAULT_GET: u32 = 0x8267;
pub const LIGHT_CTL_TEMPERATURE_DEFAULT_STATUS: u32 = 0x8268;

pub const LIGHT_CTL_SETUP_TEMPERATURE_DEFAULT_SET: u32 = 0x8269;
pub const LIGHT_CTL_SETUP_TEMPERATURE_DEFAULT_SET_UNACKNOWLEDGED: u32 = 0x826A;
pub const LIGHT_CTL_SETUP_TEMPERATURE_RANGE_SET: u32 = 0x826B;
pub const LIGHT_CTL_SETUP_TEMPERATURE_RANGE_SET_UNACKNOWLEDGED: u32 = 0x826C;

pub fn layouts() -> Vec<LayoutDef> {
    vec![
        LayoutDef::new("LightCTLGet"),
        LayoutDef::new("LightCTLDefault")
            .field(FieldDescriptor::u16("ctl_lightness"))
            .field(FieldDescriptor::u16("ctl_temperature"))
            .field(FieldDescriptor::u16("ctl_delta_uv")),
        LayoutDef::new("LightCTLSetMinimal")
            .embed("LightCTLDefault")
            .field(FieldDescriptor::u8("tid")),
        LayoutDef::new("LightCTLSetOptional")
            .embed("LightCTLSetMinimal")
            .embed(OPTIONAL_SET_PARAMETERS),
        LayoutDef::new("LightCTLStatusMinimal")
            .field(FieldDescriptor::u16("present_ctl_lightness"))
            .field(FieldDescriptor::u16("present_ctl_temperature")),
        LayoutDef::new("LightCTLStatusOptional")
            .embed("LightCTLStatusMinimal")
            .field(FieldDescriptor::u16("target_ctl_lightness"))
            .field(FieldDescriptor::u16("target_ctl_temperature"))
            .nested("remaining_time", TRANSITION_TIME),
        LayoutDef::new("LightCTLTemperatureStatusMinimal")
            .field(FieldDescriptor::u16("present_ctl_temperature"))
            .field(FieldDescriptor::u16("present_ctl_delta_uv")),
        LayoutDef::new("LightCTLTemperatureStatusOptional")
            .embed("LightCTLTemperatureStatusMinimal")
            .field(FieldDescriptor::u16("target_ctl_temperature"))
            .field(FieldDescriptor::u16("target_ctl_delta_uv"))
            .nested("remaining_time", TRANSITION_TIME),
        LayoutDef::new("LightCTLTemperatureSetMinimal")
            .field(FieldDescriptor::u16("ctl_temperature"))
            .field(FieldDescriptor::u16("ctl_delta_uv"))
            .field(FieldDescriptor::u8("tid")),
        LayoutDef::new("LightCTLTemperatureSetOptional")
            .embed("LightCTLTemperatureSetMinimal")
            .embed(OPTIONAL_SET_PARAMETERS),
        LayoutDef::new("LightCTLRange")
            .field(FieldDescriptor::u16("range_min"))
            .field(FieldDescriptor::u16("range_max")),
        LayoutDef::new(RANGE_STATUS_LAYOUT)
            .field(FieldDescriptor::u8("status"))
            .embed("LightCTLRange"),
    ]
}

pub fn variant_sets() -> Vec<VariantSetDef> {
    [
        "LightCTLSet",
        "LightCTLStatus",
        "LightCTLTemperatureStatus",
        "LightCTLTemperatureSet",
    ]
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
        .message(LIGHT_CTL_GET, "LIGHT_CTL_GET", "LightCTLGet")
        .message_variants(LIGHT_CTL_SET, "LIGHT_CTL_SET", "LightCTLSet")
        .message_variants(
            LIGHT_CTL_SET_UNACKNOWLEDGED,
            "LIGHT_CTL_SET_UNACKNOWLEDGED",
            "LightCTLSet",
        )
        .message_variants(LIGHT_CTL_STATUS, "LIGHT_CTL_STATUS", "LightCTLStatus")
        .message(
            LIGHT_CTL_TEMPERATURE_GET,
            "LIGHT_CTL_TEMPERATURE_GET",
            "LightCTLGet",
        )
        .message(
            LIGHT_CTL_TEMPERATURE_RANGE_GET,
            "LIGHT_CTL_TEMPERATURE_RANGE_GET",
            "LightCTLGet",
        )
        .message(
            LIGHT_CTL_TEMPERATURE_RANGE_STATUS,
            "LIGHT_CTL_TEMPERATURE_RANGE_STATUS",
            RANGE_STATUS_LAYOUT,
        )
        .message_variants(
            LIGHT_CTL_TEMPERATURE_SET,
            "LIGHT_CTL_TEMPERATURE_SET",
            "LightCTLTemperatureSet",
        )
        .message_variants(
            LIGHT_CTL_TEMPERATURE_SET_UNACKNOWLEDGED,
            "LIGHT_CTL_TEMPERATURE_SET_UNACKNOWLEDGED",
            "LightCTLTemperatureSet",
        )
        .message_variants(
            LIGHT_CTL_TEMPERATURE_STATUS,
            "LIGHT_CTL_TEMPERATURE_STATUS",
            "LightCTLTemperatureStatus",
        )
        .message(
            LIGHT_CTL_TEMPERATURE_DEFAULT_GET,
            "LIGHT_CTL_TEMPERATURE_DEFAULT_GET",
            "LightCTLGet",
        )
        .message(
            LIGHT_CTL_TEMPERATURE_DEFAULT_STATUS,
            "LIGHT_CTL_TEMPERATURE_DEFAULT_STATUS",
            "LightCTLDefault",
        )
}

pub fn setup_family() -> FamilyDef {
    FamilyDef::new(SETUP_FAMILY)
        .message(
            LIGHT_CTL_SETUP_TEMPERATURE_DEFAULT_SET,
            "LIGHT_CTL_SETUP_TEMPERATURE_DEFAULT_SET",
            "LightCTLDefault",
        )
        .message(
            LIGHT_CTL_SETUP_TEMPERATURE_DEFAULT_SET_UNACKNOWLEDGED,
            "LIGHT_CTL_SETUP_TEMPERATURE_DEFAULT_SET_UNACKNOWLEDGED",
            "LightCTLDefault",
        )
        .message(
            LIGHT_CTL_SETUP_TEMPERATURE_RANGE_SET,
            "LIGHT_CTL_SETUP_TEMPERATURE_RANGE_SET",
            "LightCTLRange",
        )
        .message(
            LIGHT_CTL_SETUP_TEMPERATURE_RANGE_SET_UNACKNOWLEDGED,
            "LIGHT_CTL_SETUP_TEMPERATURE_RANGE_SET_UNACKNOWLEDGED",
            "LightCTLRange",
        )
}

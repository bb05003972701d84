use codec::{decode_message, encode_decoded, encode_message, CodecError, FieldValue};
use schema::{Catalog, FamilyDef, FieldDescriptor, LayoutDef, VariantSetDef};
use wire::{decode_access, Limits, Opcode};

fn level_catalog() -> Catalog {
    Catalog::builder()
        .layout(
            LayoutDef::new("TransitionTime")
                .field(FieldDescriptor::bits("step_resolution", 2))
                .field(FieldDescriptor::bits("steps", 6)),
        )
        .layout(
            LayoutDef::new("OptionalSetParameters")
                .nested("transition_time", "TransitionTime")
                .field(FieldDescriptor::u8("delay")),
        )
        .layout(
            LayoutDef::new("LevelSetMinimal")
                .field(FieldDescriptor::i16("level"))
                .field(FieldDescriptor::u8("tid")),
        )
        .layout(
            LayoutDef::new("LevelSetOptional")
                .embed("LevelSetMinimal")
                .embed("OptionalSetParameters"),
        )
        .layout(LayoutDef::new("Empty"))
        .layout(LayoutDef::new("VendorPing").field(FieldDescriptor::u32("nonce")))
        .variants(
            VariantSetDef::new("LevelSet")
                .variant("optional", "LevelSetOptional")
                .variant("minimal", "LevelSetMinimal"),
        )
        .family(
            FamilyDef::new("GenericLevel")
                .message(0x8205, "GENERIC_LEVEL_GET", "Empty")
                .message_variants(0x8206, "GENERIC_LEVEL_SET", "LevelSet")
                .message_variants(0x8207, "GENERIC_LEVEL_SET_UNACKNOWLEDGED", "LevelSet"),
        )
        .family(FamilyDef::new("Vendor").message(0xC1_5900, "VENDOR_PING", "VendorPing"))
        .build()
        .unwrap()
}

#[test]
fn integration_minimal_set_roundtrip() {
    let catalog = level_catalog();
    let input = [0x82, 0x06, 0x00, 0x00, 0x22];
    let msg = decode_message(&catalog, &input, &Limits::default()).unwrap();

    assert_eq!(msg.opcode.raw(), 0x8206);
    assert_eq!(msg.name(), "GENERIC_LEVEL_SET");
    assert_eq!(msg.variant_name(), Some("minimal"));
    assert_eq!(msg.field("level"), Some(FieldValue::SInt(0)));
    assert_eq!(msg.field("tid"), Some(FieldValue::UInt(34)));

    let bytes = encode_message(
        &catalog,
        0x8206,
        Some("minimal"),
        &msg.fields,
        &Limits::default(),
    )
    .unwrap();
    assert_eq!(bytes, input);
}

#[test]
fn integration_optional_set_decodes_nested_fields() {
    let catalog = level_catalog();
    let input = [0x82, 0x06, 0x00, 0x00, 0x31, 0x32, 0x3C];
    let msg = decode_message(&catalog, &input, &Limits::default()).unwrap();

    assert_eq!(msg.variant_name(), Some("optional"));
    assert_eq!(msg.field("level"), Some(FieldValue::SInt(0)));
    assert_eq!(msg.field("tid"), Some(FieldValue::UInt(0x31)));
    // 0x32 = 0b00_110010
    assert_eq!(
        msg.field("transition_time.step_resolution"),
        Some(FieldValue::UInt(0))
    );
    assert_eq!(
        msg.field("transition_time.steps"),
        Some(FieldValue::UInt(0x32))
    );
    assert_eq!(msg.field("delay"), Some(FieldValue::UInt(0x3C)));
    assert_eq!(encode_decoded(&msg, &Limits::default()).unwrap(), input);
}

#[test]
fn integration_exact_length_discrimination() {
    let catalog = level_catalog();
    for params_len in 0..=8usize {
        let mut input = vec![0x82, 0x06];
        input.extend(std::iter::repeat(0x11).take(params_len));
        let result = decode_message(&catalog, &input, &Limits::default());
        match params_len {
            3 => assert_eq!(result.unwrap().variant_name(), Some("minimal")),
            5 => assert_eq!(result.unwrap().variant_name(), Some("optional")),
            _ => assert_eq!(
                result.unwrap_err(),
                CodecError::NoVariantMatched {
                    opcode: 0x8206,
                    actual: params_len,
                    candidates: vec![5, 3],
                }
            ),
        }
    }
}

#[test]
fn integration_opcode_sharing() {
    let catalog = level_catalog();
    let params = [0x10, 0x27, 0x07, 0x41, 0x00];

    let set = decode_message(&catalog, &[&[0x82, 0x06][..], &params].concat(), &Limits::default())
        .unwrap();
    let unack = decode_message(&catalog, &[&[0x82, 0x07][..], &params].concat(), &Limits::default())
        .unwrap();

    assert_ne!(set.opcode, unack.opcode);
    assert_eq!(set.variant_name(), unack.variant_name());
    assert_eq!(set.fields, unack.fields);
    assert_eq!(set.field("level"), Some(FieldValue::SInt(10_000)));
}

#[test]
fn integration_vendor_opcode() {
    let catalog = level_catalog();
    let opcode = Opcode::vendor(0x01, 0x0059).unwrap();
    assert_eq!(opcode.raw(), 0xC1_5900);

    let bytes = encode_message(
        &catalog,
        opcode.raw(),
        None,
        &[FieldValue::UInt(0xDEAD_BEEF)],
        &Limits::default(),
    )
    .unwrap();
    assert_eq!(bytes, vec![0xC1, 0x59, 0x00, 0xEF, 0xBE, 0xAD, 0xDE]);

    let frame = decode_access(&bytes, &Limits::default()).unwrap();
    assert_eq!(frame.opcode.company_id(), Some(0x0059));

    let msg = decode_message(&catalog, &bytes, &Limits::default()).unwrap();
    assert_eq!(msg.name(), "VENDOR_PING");
    assert_eq!(msg.field("nonce"), Some(FieldValue::UInt(0xDEAD_BEEF)));
}

#[test]
fn integration_limits_apply_before_dispatch() {
    let catalog = level_catalog();
    let mut input = vec![0x82, 0x06];
    input.resize(40, 0);
    let err = decode_message(&catalog, &input, &Limits::for_testing()).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Wire(wire::DecodeError::LimitsExceeded { .. })
    ));
}

#[test]
fn integration_truncated_opcode() {
    let catalog = level_catalog();
    let err = decode_message(&catalog, &[0x82], &Limits::default()).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Wire(wire::DecodeError::TruncatedOpcode { .. })
    ));
}

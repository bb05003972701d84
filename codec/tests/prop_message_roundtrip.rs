use codec::{decode_message, encode_message, FieldValue};
use proptest::prelude::*;
use schema::{
    ByteOrder, Catalog, FamilyDef, FieldDescriptor, FieldKind, FixedFormat, LayoutDef,
    VariantSetDef,
};
use wire::Limits;

const MIXED: u32 = 0x8230;
const SET: u32 = 0x8231;

fn catalog() -> Catalog {
    Catalog::builder()
        .layout(
            LayoutDef::new("Mixed")
                .field(FieldDescriptor::u8("a"))
                .field(FieldDescriptor::i8("b"))
                .field(FieldDescriptor::new(
                    "c",
                    FieldKind::Fixed(FixedFormat::be(b'H')),
                ))
                .field(FieldDescriptor::i32("d"))
                .field(FieldDescriptor::bytes_int("e", 3, false))
                .field(FieldDescriptor::new(
                    "f",
                    FieldKind::ByteInteger {
                        len: 5,
                        signed: true,
                        order: ByteOrder::Big,
                    },
                ))
                .field(FieldDescriptor::bits("g", 2))
                .field(FieldDescriptor::bits("h", 6))
                .field(FieldDescriptor::bits("i", 12))
                .field(FieldDescriptor::anonymous(FieldKind::BitInteger { bits: 4 }))
                .field(FieldDescriptor::fixed("j", b'f'))
                .field(FieldDescriptor::fixed("k", b'd'))
                .field(FieldDescriptor::fixed("l", b'Q')),
        )
        .layout(LayoutDef::new("Short").field(FieldDescriptor::u16("x")))
        .layout(
            LayoutDef::new("Long")
                .embed("Short")
                .field(FieldDescriptor::i16("y")),
        )
        .variants(
            VariantSetDef::new("ShortOrLong")
                .variant("short", "Short")
                .variant("long", "Long"),
        )
        .family(
            FamilyDef::new("Prop")
                .message(MIXED, "MIXED", "Mixed")
                .message_variants(SET, "SHORT_OR_LONG", "ShortOrLong"),
        )
        .build()
        .unwrap()
}

fn mixed_values() -> impl Strategy<Value = Vec<FieldValue>> {
    (
        (any::<u8>(), any::<i8>(), any::<u16>(), any::<i32>()),
        (0u64..1 << 24, -(1i64 << 39)..(1i64 << 39)),
        (0u64..4, 0u64..64, 0u64..4096, 0u64..16),
        (-1.0e6f32..1.0e6f32, -1.0e12f64..1.0e12f64, any::<u64>()),
    )
        .prop_map(|((a, b, c, d), (e, f), (g, h, i, pad), (j, k, l))| {
            vec![
                FieldValue::UInt(u64::from(a)),
                FieldValue::SInt(i64::from(b)),
                FieldValue::UInt(u64::from(c)),
                FieldValue::SInt(i64::from(d)),
                FieldValue::UInt(e),
                FieldValue::SInt(f),
                FieldValue::UInt(g),
                FieldValue::UInt(h),
                FieldValue::UInt(i),
                FieldValue::UInt(pad),
                FieldValue::Float32(j),
                FieldValue::Float64(k),
                FieldValue::UInt(l),
            ]
        })
}

proptest! {
    #[test]
    fn prop_mixed_layout_roundtrip(values in mixed_values()) {
        let catalog = catalog();
        let bytes = encode_message(&catalog, MIXED, None, &values, &Limits::default()).unwrap();
        prop_assert_eq!(bytes.len(), 2 + 1 + 1 + 2 + 4 + 3 + 5 + 3 + 4 + 8 + 8);

        let msg = decode_message(&catalog, &bytes, &Limits::default()).unwrap();
        prop_assert_eq!(msg.opcode.raw(), MIXED);
        prop_assert_eq!(msg.fields, values);
    }

    #[test]
    fn prop_variant_roundtrip(x in any::<u16>(), y in proptest::option::of(any::<i16>())) {
        let catalog = catalog();
        let (variant, values) = match y {
            Some(y) => ("long", vec![FieldValue::UInt(u64::from(x)), FieldValue::SInt(i64::from(y))]),
            None => ("short", vec![FieldValue::UInt(u64::from(x))]),
        };
        let bytes = encode_message(&catalog, SET, Some(variant), &values, &Limits::default()).unwrap();
        let msg = decode_message(&catalog, &bytes, &Limits::default()).unwrap();
        prop_assert_eq!(msg.variant_name(), Some(variant));
        prop_assert_eq!(msg.fields, values);
    }

    #[test]
    fn prop_decode_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let catalog = catalog();
        let _ = decode_message(&catalog, &bytes, &Limits::default());
    }
}

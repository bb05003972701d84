use bitstream::{BitReader, BitWriter};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Bit(bool),
    Bits { bits: u8, value: u64 },
    Bytes(Vec<u8>),
}

fn mask_value(bits: u8, value: u64) -> u64 {
    if bits >= 64 {
        value
    } else {
        let mask = (1u64 << bits) - 1;
        value & mask
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Bit),
        (1u8..=64, any::<u64>()).prop_map(|(bits, value)| Op::Bits {
            bits,
            value: mask_value(bits, value),
        }),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(Op::Bytes),
    ]
}

fn padding(bit_position: usize) -> u8 {
    ((8 - bit_position % 8) % 8) as u8
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let mut writer = BitWriter::new();

        for op in &ops {
            match op {
                Op::Bit(b) => writer.write_bit(*b),
                Op::Bits { bits, value } => writer.write_bits(*value, *bits).unwrap(),
                Op::Bytes(bytes) => {
                    let pad = padding(writer.bits_written());
                    writer.write_bits(0, pad).unwrap();
                    writer.write_bytes_aligned(bytes).unwrap();
                }
            }
        }

        let bytes = writer.finish();
        let mut reader = BitReader::new(&bytes);

        for op in &ops {
            match op {
                Op::Bit(b) => {
                    prop_assert_eq!(reader.read_bit().unwrap(), *b);
                }
                Op::Bits { bits, value } => {
                    prop_assert_eq!(reader.read_bits(*bits).unwrap(), *value);
                }
                Op::Bytes(expected) => {
                    let pad = padding(reader.bit_position());
                    prop_assert_eq!(reader.read_bits(pad).unwrap(), 0);
                    prop_assert_eq!(reader.read_bytes_aligned(expected.len()).unwrap(), expected.as_slice());
                }
            }
        }
        prop_assert!(reader.bits_remaining() < 8);
    }

    #[test]
    fn prop_reader_never_panics(data in prop::collection::vec(any::<u8>(), 0..32), widths in prop::collection::vec(0u8..=70, 0..16)) {
        let mut reader = BitReader::new(&data);
        for width in widths {
            let _ = reader.read_bits(width);
            let _ = reader.read_bytes_aligned(usize::from(width % 4));
        }
    }
}

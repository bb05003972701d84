#![no_main]

use codec::{decode_message, encode_decoded};
use libfuzzer_sys::fuzz_target;
use wire::Limits;

fuzz_target!(|data: &[u8]| {
    let limits = Limits::default();
    if let Ok(msg) = decode_message(models::catalog(), data, &limits) {
        // Anything that decodes must re-encode to the same bytes.
        let bytes = encode_decoded(&msg, &limits).expect("decoded message re-encodes");
        assert_eq!(bytes, data);
    }
});

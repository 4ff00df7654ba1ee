#![no_main]

use libfuzzer_sys::fuzz_target;
use knook::Pos;

fuzz_target!(|data: &[u8]| {
    if let Ok(pos) = Pos::from_ascii(data) {
        let roundtripped = Pos::from_ascii(pos.to_string().as_bytes()).expect("roundtrip");
        assert_eq!(pos, roundtripped);
    }
});

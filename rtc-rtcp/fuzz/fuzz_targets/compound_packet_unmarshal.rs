#![no_main]

use libfuzzer_sys::fuzz_target;
use rtc_rtcp::packet;

fuzz_target!(|data: &[u8]| {
    if let Ok(packets) = packet::unmarshal(data, true) {
        let _ = packet::marshal(&packets);
    }
});

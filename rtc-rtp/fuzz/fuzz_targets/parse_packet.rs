#![no_main]

use libfuzzer_sys::fuzz_target;
use rtc_rtp::packet::Packet;
use rtc_shared::marshal::Marshal;

fuzz_target!(|data: &[u8]| {
    if let Ok(packet) = Packet::parse(data, data.len()) {
        let _ = packet.sources();
        let _ = packet.marshal();
    }
});

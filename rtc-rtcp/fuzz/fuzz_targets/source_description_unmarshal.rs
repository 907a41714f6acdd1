#![no_main]

use libfuzzer_sys::fuzz_target;
use rtc_rtcp::source_description::SourceDescription;
use rtc_shared::{
    cursor::Reader,
    marshal::{Marshal, Unmarshal},
};

fuzz_target!(|data: &[u8]| {
    if let Ok(sdes) = SourceDescription::unmarshal(&mut Reader::new(data)) {
        let _ = sdes.marshal();
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use rtc_rtcp::header::Header;
use rtc_shared::{cursor::Reader, marshal::Unmarshal};

fuzz_target!(|data: &[u8]| {
    let _ = Header::unmarshal(&mut Reader::new(data));
});

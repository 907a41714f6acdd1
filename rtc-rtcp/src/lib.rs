#![warn(rust_2018_idioms)]
#![allow(dead_code)]

//! Package rtcp implements encoding and decoding of RTCP packets according to RFC 3550.
//!
//! RTCP is a sister protocol of the Real-time Transport Protocol (RTP). Its basic functionality
//! and packet structure is defined in RFC 3550. RTCP provides out-of-band statistics and control
//! information for an RTP session. It partners with RTP in the delivery and packaging of
//! multimedia data, but does not transport any media data itself.
//!
//! The primary function of RTCP is to provide feedback on the quality of service (QoS)
//! in media distribution by periodically sending statistics information such as transmitted
//! octet and packet counts, packet loss, packet delay variation, and round-trip delay time
//! to participants in a streaming multimedia session.
//!
//! Decoding RTCP packets:
//!```
//! use rtc_rtcp::packet;
//!
//! // A goodbye from a single source, followed by a packet type this crate
//! // does not understand.
//! let raw = [
//!     0x81, 0xcb, 0x00, 0x01, 0x01, 0x02, 0x03, 0x04,
//!     0x80, 0xcd, 0x00, 0x00,
//! ];
//!
//! let packets = packet::unmarshal(&raw, true).unwrap();
//! assert_eq!(packets.len(), 1);
//! assert_eq!(packets[0].destination_ssrc(), vec![0x01020304]);
//! ```
//!
//! Encoding RTCP packets:
//!```
//! use rtc_rtcp::{goodbye::Goodbye, packet::{self, Packet}};
//!
//! let bye = Goodbye::new(vec![0x01020304], "").unwrap();
//! let raw = packet::marshal(&[Packet::Goodbye(bye)]).unwrap();
//! assert_eq!(raw.len(), 8);
//! ```

pub mod application_defined;
pub mod goodbye;
pub mod header;
pub mod packet;
pub mod receiver_report;
pub mod reception_report;
pub mod sender_report;
pub mod source_description;
mod util;

pub use packet::Packet;


use crate::{
    header::{COUNT_MAX, HEADER_LENGTH, Header, PacketType, SDES_MAX_OCTET_COUNT, SSRC_LENGTH},
    util::{check_padding, get_padding_size, length_field, read_framed, write_padding},
};
use shared::{
    cursor::{Reader, Writer},
    error::{Error, Result},
    marshal::{Marshal, MarshalSize, Unmarshal},
};

use std::fmt;

/// The Goodbye packet indicates that one or more sources are no longer active.
///
/// ```text
///        0                   1                   2                   3
///        0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///       +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///       |V=2|P|    SC   |   PT=BYE=203  |             length            |
///       +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///       |                           SSRC/CSRC                           |
///       +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///       :                              ...                              :
///       +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// (opt) |     length    |               reason for leaving            ...
///       +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The reason is zero-filled to a 4-byte boundary on the wire. An empty reason
/// is not written at all.
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct Goodbye {
    sources: Vec<u32>,
    reason: String,
    padding: u8,
}

impl fmt::Display for Goodbye {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = "Goodbye\n".to_string();
        for (i, s) in self.sources.iter().enumerate() {
            out += format!("\tSource {i}: {s:x}\n").as_str();
        }
        out += format!("\tReason: {:?}\n", self.reason).as_str();

        write!(f, "{out}")
    }
}

impl Goodbye {
    pub fn new(sources: Vec<u32>, reason: &str) -> Result<Self> {
        let mut bye = Goodbye::default();
        bye.set_sources(sources)?;
        bye.set_reason(reason)?;
        Ok(bye)
    }

    /// The SSRC/CSRC identifiers that are no longer active.
    pub fn sources(&self) -> &[u32] {
        &self.sources
    }

    /// Replaces the source list; at most 31 sources fit in one packet.
    pub fn set_sources(&mut self, sources: Vec<u32>) -> Result<()> {
        if sources.len() > COUNT_MAX {
            return Err(Error::TooManySources);
        }
        self.sources = sources;
        Ok(())
    }

    /// Optional text indicating the reason for leaving, e.g., "camera malfunction" or "RTP loop detected"
    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn set_reason(&mut self, reason: &str) -> Result<()> {
        if reason.len() > SDES_MAX_OCTET_COUNT {
            return Err(Error::FieldTooLong);
        }
        self.reason = reason.to_owned();
        Ok(())
    }

    /// Padding octets appended after the reason, 0 when unpadded.
    pub fn padding(&self) -> u8 {
        self.padding
    }

    pub fn set_padding(&mut self, padding: u8) -> Result<()> {
        check_padding(0, padding)?;
        self.padding = padding;
        Ok(())
    }

    /// Header returns the Header associated with this packet.
    ///
    /// Fails when the packet is too large for the 16-bit length field.
    pub fn header(&self) -> Result<Header> {
        Ok(Header {
            padding: self.padding != 0,
            count: self.sources.len() as u8,
            packet_type: PacketType::Goodbye,
            length: length_field(self.marshal_size())?,
        })
    }

    /// destination_ssrc returns an array of SSRC values that this packet refers to.
    pub fn destination_ssrc(&self) -> Vec<u32> {
        self.sources.to_vec()
    }

    fn reason_size(&self) -> usize {
        if self.reason.is_empty() {
            0
        } else {
            let n = 1 + self.reason.len();
            n + get_padding_size(n)
        }
    }
}

impl MarshalSize for Goodbye {
    fn marshal_size(&self) -> usize {
        HEADER_LENGTH + self.sources.len() * SSRC_LENGTH + self.reason_size() + self.padding as usize
    }
}

impl Marshal for Goodbye {
    /// marshal_to encodes the Goodbye packet in binary
    fn marshal_to(&self, writer: &mut Writer<'_>) -> Result<()> {
        check_padding(0, self.padding)?;

        self.header()?.marshal_to(writer)?;

        for source in &self.sources {
            writer.write_u32(*source)?;
        }

        if !self.reason.is_empty() {
            writer.write_u8(self.reason.len() as u8)?;
            writer.write_bytes(self.reason.as_bytes())?;
            writer.write_zeros(get_padding_size(1 + self.reason.len()))?;
        }

        write_padding(writer, self.padding)
    }
}

impl Unmarshal for Goodbye {
    /// Unmarshal decodes the Goodbye packet from binary
    fn unmarshal(reader: &mut Reader<'_>) -> Result<Self>
    where
        Self: Sized,
    {
        let read = |reader: &mut Reader<'_>| -> Result<Self> {
            let (header, mut body, padding) = read_framed(reader, PacketType::Goodbye)?;
            check_padding(0, padding)?;

            let mut sources = Vec::with_capacity(header.count as usize);
            for _ in 0..header.count {
                sources.push(body.read_u32()?);
            }

            let reason = if body.has_remaining() {
                let reason_len = body.read_u8()? as usize;
                String::from_utf8(body.read_bytes(reason_len)?.to_vec())?
            } else {
                String::new()
            };

            Ok(Goodbye {
                sources,
                reason,
                padding,
            })
        };

        read(reader).map_err(Error::into_truncated)
    }
}

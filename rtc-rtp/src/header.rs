use shared::{
    cursor::{Reader, Writer},
    error::{Error, Result},
    marshal::{Marshal, MarshalSize, Unmarshal},
};

pub const FIXED_HEADER_LENGTH: usize = 12;
pub const VERSION_SHIFT: u8 = 6;
pub const VERSION_MASK: u8 = 0x3;
pub const PADDING_SHIFT: u8 = 5;
pub const PADDING_MASK: u8 = 0x1;
pub const EXTENSION_SHIFT: u8 = 4;
pub const EXTENSION_MASK: u8 = 0x1;
pub const CC_MASK: u8 = 0xF;
pub const MARKER_SHIFT: u8 = 7;
pub const MARKER_MASK: u8 = 0x1;
pub const PT_MASK: u8 = 0x7F;
pub const CSRC_LENGTH: usize = 4;
pub const MAX_CSRC_COUNT: usize = 15;
pub const RTP_VERSION: u8 = 2;

/// Header represents an RTP packet header
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|X|  CC   |M|     PT      |       sequence number         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           timestamp                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |           synchronization source (SSRC) identifier            |
/// +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// |            contributing source (CSRC) identifiers             |
/// |                             ....                              |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// `padding` and `extension` describe the wire packet a header was decoded
/// from. Encoding never emits padding or a header extension, so both bits are
/// always written as zero.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct Header {
    pub version: u8,
    pub padding: bool,
    pub extension: bool,
    pub marker: bool,
    pub payload_type: u8,
    pub sequence_number: u16,
    pub timestamp: u32,
    pub ssrc: u32,
    pub csrc: Vec<u32>,
}

impl Default for Header {
    fn default() -> Self {
        Header {
            version: RTP_VERSION,
            padding: false,
            extension: false,
            marker: false,
            payload_type: 0,
            sequence_number: 0,
            timestamp: 0,
            ssrc: 0,
            csrc: vec![],
        }
    }
}

impl Header {
    fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let b0 = reader.read_u8()?;
        let version = (b0 >> VERSION_SHIFT) & VERSION_MASK;
        let padding = ((b0 >> PADDING_SHIFT) & PADDING_MASK) > 0;
        let extension = ((b0 >> EXTENSION_SHIFT) & EXTENSION_MASK) > 0;
        let cc = (b0 & CC_MASK) as usize;

        let b1 = reader.read_u8()?;
        let marker = ((b1 >> MARKER_SHIFT) & MARKER_MASK) > 0;
        let payload_type = b1 & PT_MASK;

        let sequence_number = reader.read_u16()?;
        let timestamp = reader.read_u32()?;
        let ssrc = reader.read_u32()?;

        let mut csrc = Vec::with_capacity(cc);
        for _ in 0..cc {
            csrc.push(reader.read_u32()?);
        }

        if extension {
            // Deviation from RFC 3550 section 5.3.1, which defines a 16-bit
            // profile identifier followed by a 16-bit length in 32-bit words.
            // The extension is skipped with a single length byte instead: step
            // over the first byte of the extension, read the byte under the
            // cursor as a byte count and advance by that count from there.
            reader.skip(1)?;
            let length = reader.peek_u8(0)?;
            reader.skip(length as usize)?;
        }

        Ok(Header {
            version,
            padding,
            extension,
            marker,
            payload_type,
            sequence_number,
            timestamp,
            ssrc,
            csrc,
        })
    }
}

impl Unmarshal for Header {
    /// Unmarshal parses the fixed header, the CSRC list and skips an optional extension.
    fn unmarshal(reader: &mut Reader<'_>) -> Result<Self>
    where
        Self: Sized,
    {
        Header::read(reader).map_err(Error::into_truncated)
    }
}

impl MarshalSize for Header {
    fn marshal_size(&self) -> usize {
        FIXED_HEADER_LENGTH + self.csrc.len() * CSRC_LENGTH
    }
}

impl Marshal for Header {
    fn marshal_to(&self, writer: &mut Writer<'_>) -> Result<()> {
        if self.csrc.len() > MAX_CSRC_COUNT {
            return Err(Error::TooManyContributingSources);
        }
        if self.version > VERSION_MASK {
            return Err(Error::InvalidArgument("RTP version must fit in 2 bits"));
        }
        if self.payload_type > PT_MASK {
            return Err(Error::InvalidArgument("payload type must fit in 7 bits"));
        }

        /*
         *  0                   1                   2                   3
         *  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
         * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         * |V=2|P|X|  CC   |M|     PT      |       sequence number         |
         * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         */
        let b0 = (self.version << VERSION_SHIFT) | self.csrc.len() as u8;
        writer.write_u8(b0)?;

        let mut b1 = self.payload_type;
        if self.marker {
            b1 |= 1 << MARKER_SHIFT;
        }
        writer.write_u8(b1)?;

        writer.write_u16(self.sequence_number)?;
        writer.write_u32(self.timestamp)?;
        writer.write_u32(self.ssrc)?;

        for csrc in &self.csrc {
            writer.write_u32(*csrc)?;
        }

        Ok(())
    }
}

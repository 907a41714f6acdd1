#[cfg(test)]
mod source_description_test;

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

const SDES_TYPE_LEN: usize = 1;
const SDES_OCTET_COUNT_LEN: usize = 1;
const SDES_TERMINATOR_LEN: usize = 1;

/// SDES item types
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SdesType {
    #[default]
    SdesEnd = 0,      // end of SDES list                RFC 3550, 6.5
    SdesCname = 1,    // canonical name                  RFC 3550, 6.5.1
    SdesName = 2,     // user name                       RFC 3550, 6.5.2
    SdesEmail = 3,    // user's electronic mail address  RFC 3550, 6.5.3
    SdesPhone = 4,    // user's phone number             RFC 3550, 6.5.4
    SdesLocation = 5, // geographic user location        RFC 3550, 6.5.5
    SdesTool = 6,     // name of application or tool     RFC 3550, 6.5.6
    SdesNote = 7,     // notice about the source         RFC 3550, 6.5.7
    SdesPrivate = 8,  // private extensions              RFC 3550, 6.5.8  (not implemented)
}

impl fmt::Display for SdesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SdesType::SdesEnd => "END",
            SdesType::SdesCname => "CNAME",
            SdesType::SdesName => "NAME",
            SdesType::SdesEmail => "EMAIL",
            SdesType::SdesPhone => "PHONE",
            SdesType::SdesLocation => "LOC",
            SdesType::SdesTool => "TOOL",
            SdesType::SdesNote => "NOTE",
            SdesType::SdesPrivate => "PRIV",
        };
        write!(f, "{s}")
    }
}

impl From<u8> for SdesType {
    fn from(b: u8) -> Self {
        match b {
            1 => SdesType::SdesCname,
            2 => SdesType::SdesName,
            3 => SdesType::SdesEmail,
            4 => SdesType::SdesPhone,
            5 => SdesType::SdesLocation,
            6 => SdesType::SdesTool,
            7 => SdesType::SdesNote,
            8 => SdesType::SdesPrivate,
            _ => SdesType::SdesEnd,
        }
    }
}

fn check_text(text: &str) -> Result<()> {
    if text.len() > SDES_MAX_OCTET_COUNT {
        Err(Error::FieldTooLong)
    } else {
        Ok(())
    }
}

fn optional_text(text: &str) -> Result<Option<String>> {
    check_text(text)?;
    Ok(if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    })
}

/// A SdesChunk contains items describing a single RTP source
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// |                          SSRC/CSRC_1                          |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           SDES items                          |
/// |                              ...                              |
/// +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// ```
///
/// Every text item is limited to 255 UTF-8 bytes, checked when it is set.
/// Chunks built with [`SdesChunk::new`] always carry a CNAME. A decoded chunk
/// may lack one, as RFC 3550 allows chunks for contributing sources to carry
/// any subset of items. Setting an optional item to an empty string removes it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SdesChunk {
    source: u32,
    cname: Option<String>,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    location: Option<String>,
    tool: Option<String>,
    note: Option<String>,
}

impl fmt::Display for SdesChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Source: {:x}", self.source)?;
        for (sdes_type, text) in self.items() {
            write!(f, " [{sdes_type}: {text}]")?;
        }
        write!(f, "]")
    }
}

impl SdesChunk {
    /// Creates a chunk for `source` carrying only the mandatory CNAME.
    pub fn new(source: u32, cname: &str) -> Result<Self> {
        let mut chunk = SdesChunk {
            source: 0,
            cname: None,
            name: None,
            email: None,
            phone: None,
            location: None,
            tool: None,
            note: None,
        };
        chunk.set_source(source)?;
        chunk.set_cname(cname)?;
        Ok(chunk)
    }

    pub fn source(&self) -> u32 {
        self.source
    }

    pub fn set_source(&mut self, source: u32) -> Result<()> {
        if source == 0 {
            return Err(Error::InvalidArgument("SDES chunk source must not be 0"));
        }
        self.source = source;
        Ok(())
    }

    /// The canonical name, absent only on chunks decoded without a CNAME item.
    pub fn cname(&self) -> Option<&str> {
        self.cname.as_deref()
    }

    pub fn set_cname(&mut self, cname: &str) -> Result<()> {
        if cname.is_empty() {
            return Err(Error::InvalidArgument("CNAME must not be empty"));
        }
        check_text(cname)?;
        self.cname = Some(cname.to_owned());
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.name = optional_text(name)?;
        Ok(())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn set_email(&mut self, email: &str) -> Result<()> {
        self.email = optional_text(email)?;
        Ok(())
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn set_phone(&mut self, phone: &str) -> Result<()> {
        self.phone = optional_text(phone)?;
        Ok(())
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn set_location(&mut self, location: &str) -> Result<()> {
        self.location = optional_text(location)?;
        Ok(())
    }

    pub fn tool(&self) -> Option<&str> {
        self.tool.as_deref()
    }

    pub fn set_tool(&mut self, tool: &str) -> Result<()> {
        self.tool = optional_text(tool)?;
        Ok(())
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn set_note(&mut self, note: &str) -> Result<()> {
        self.note = optional_text(note)?;
        Ok(())
    }

    /// Populated items in wire order: CNAME, NAME, EMAIL, PHONE, LOC, TOOL, NOTE.
    pub fn items(&self) -> impl Iterator<Item = (SdesType, &str)> + '_ {
        let items = [
            (SdesType::SdesCname, &self.cname),
            (SdesType::SdesName, &self.name),
            (SdesType::SdesEmail, &self.email),
            (SdesType::SdesPhone, &self.phone),
            (SdesType::SdesLocation, &self.location),
            (SdesType::SdesTool, &self.tool),
            (SdesType::SdesNote, &self.note),
        ];

        items
            .into_iter()
            .filter_map(|(sdes_type, text)| text.as_deref().map(|text| (sdes_type, text)))
    }

    fn raw_size(&self) -> usize {
        SSRC_LENGTH
            + self
                .items()
                .map(|(_, text)| SDES_TYPE_LEN + SDES_OCTET_COUNT_LEN + text.len())
                .sum::<usize>()
            + SDES_TERMINATOR_LEN
    }

    fn read(reader: &mut Reader<'_>) -> Result<Self> {
        /*
         *  0                   1                   2                   3
         *  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
         * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         * |    CNAME=1    |     length    | user and domain name        ...
         * +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
         */
        let start = reader.position();
        let source = reader.read_u32()?;

        let mut chunk = SdesChunk {
            source,
            cname: None,
            name: None,
            email: None,
            phone: None,
            location: None,
            tool: None,
            note: None,
        };

        loop {
            let raw_type = reader.read_u8()?;
            if raw_type == SdesType::SdesEnd as u8 {
                break;
            }

            let octet_count = reader.read_u8()? as usize;
            let raw = reader.read_bytes(octet_count)?;
            let text = || String::from_utf8(raw.to_vec()).map(Some);

            match SdesType::from(raw_type) {
                SdesType::SdesCname => chunk.cname = text()?,
                SdesType::SdesName => chunk.name = text()?,
                SdesType::SdesEmail => chunk.email = text()?,
                SdesType::SdesPhone => chunk.phone = text()?,
                SdesType::SdesLocation => chunk.location = text()?,
                SdesType::SdesTool => chunk.tool = text()?,
                SdesType::SdesNote => chunk.note = text()?,
                _ => log::trace!(
                    "sdes chunk {source:x}: skipping item type {raw_type} ({octet_count} bytes)"
                ),
            }
        }

        // Chunks are padded to a 4-byte boundary measured from their own start.
        let consumed = reader.position() - start;
        reader.skip(get_padding_size(consumed))?;

        for text in [
            &mut chunk.cname,
            &mut chunk.name,
            &mut chunk.email,
            &mut chunk.phone,
            &mut chunk.location,
            &mut chunk.tool,
            &mut chunk.note,
        ] {
            if text.as_deref() == Some("") {
                *text = None;
            }
        }
        if chunk.cname.is_none() {
            log::trace!("sdes chunk {source:x}: no CNAME item");
        }

        Ok(chunk)
    }
}

impl MarshalSize for SdesChunk {
    fn marshal_size(&self) -> usize {
        let raw = self.raw_size();
        raw + get_padding_size(raw)
    }
}

impl Marshal for SdesChunk {
    /// marshal_to encodes the SdesChunk in binary
    fn marshal_to(&self, writer: &mut Writer<'_>) -> Result<()> {
        /*
         *  +--------+--------+--------+--------+
         *  |           chunk 1 SSRC            |
         *  +--------+--------+--------+--------+
         *  | type   | length | text...         |
         *  +--------+--------+--------+--------+
         *  |  ...   |  0x00  |  pad to 4 bytes |
         *  +--------+--------+--------+--------+
         */
        writer.write_u32(self.source)?;

        for (sdes_type, text) in self.items() {
            writer.write_u8(sdes_type as u8)?;
            writer.write_u8(text.len() as u8)?;
            writer.write_bytes(text.as_bytes())?;
        }

        // terminator plus padding, all zeros
        writer.write_zeros(SDES_TERMINATOR_LEN + get_padding_size(self.raw_size()))
    }
}

impl Unmarshal for SdesChunk {
    /// Unmarshal decodes the SdesChunk from binary
    fn unmarshal(reader: &mut Reader<'_>) -> Result<Self>
    where
        Self: Sized,
    {
        SdesChunk::read(reader).map_err(Error::into_truncated)
    }
}

/// A SourceDescription (SDES) packet describes the sources in an RTP stream.
///
/// ```text
///         0                   1                   2                   3
///         0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///        +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// header |V=2|P|    SC   |  PT=SDES=202  |             length            |
///        +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// chunk  |                          SSRC/CSRC_1                          |
///   1    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///        |                           SDES items                          |
///        |                              ...                              |
///        +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// chunk  |                          SSRC/CSRC_2                          |
///   2    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///        |                           SDES items                          |
///        |                              ...                              |
///        +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// ```
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct SourceDescription {
    pub chunks: Vec<SdesChunk>,
    /// Padding octets appended after the last chunk, 0 when unpadded.
    pub padding: u8,
}

impl fmt::Display for SourceDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = "Source Description:\n".to_string();
        for c in &self.chunks {
            out += format!("\t{c}\n").as_str();
        }
        write!(f, "{out}")
    }
}

impl SourceDescription {
    /// Spreads `chunks` over as many packets as needed, 31 chunks per packet.
    pub fn chunked(chunks: Vec<SdesChunk>) -> Vec<SourceDescription> {
        let mut packets = Vec::with_capacity(chunks.len().div_ceil(COUNT_MAX));
        let mut chunks = chunks.into_iter().peekable();
        while chunks.peek().is_some() {
            packets.push(SourceDescription {
                chunks: chunks.by_ref().take(COUNT_MAX).collect(),
                padding: 0,
            });
        }
        packets
    }

    /// Header returns the Header associated with this packet.
    ///
    /// Fails when the packet is too large for the 16-bit length field.
    pub fn header(&self) -> Result<Header> {
        Ok(Header {
            padding: self.padding != 0,
            count: self.chunks.len() as u8,
            packet_type: PacketType::SourceDescription,
            length: length_field(self.marshal_size())?,
        })
    }

    /// destination_ssrc returns an array of SSRC values that this packet refers to.
    pub fn destination_ssrc(&self) -> Vec<u32> {
        self.chunks.iter().map(|x| x.source).collect()
    }
}

impl MarshalSize for SourceDescription {
    fn marshal_size(&self) -> usize {
        HEADER_LENGTH
            + self.chunks.iter().map(|c| c.marshal_size()).sum::<usize>()
            + self.padding as usize
    }
}

impl Marshal for SourceDescription {
    /// marshal_to encodes the SourceDescription in binary
    fn marshal_to(&self, writer: &mut Writer<'_>) -> Result<()> {
        if self.chunks.len() > COUNT_MAX {
            return Err(Error::TooManyChunks);
        }
        check_padding(0, self.padding)?;

        let start = writer.bookmark();
        let length = self.header()?.marshal_placeholder(writer)?;

        for c in &self.chunks {
            c.marshal_to(writer)?;
        }
        write_padding(writer, self.padding)?;

        let size = writer.written_since(start);
        writer.patch_u16(length, length_field(size)?)
    }
}

impl Unmarshal for SourceDescription {
    /// Unmarshal decodes the SourceDescription from binary
    fn unmarshal(reader: &mut Reader<'_>) -> Result<Self>
    where
        Self: Sized,
    {
        let (header, mut body, padding) =
            read_framed(reader, PacketType::SourceDescription).map_err(Error::into_truncated)?;
        check_padding(0, padding)?;

        let mut chunks = Vec::with_capacity(header.count as usize);
        for _ in 0..header.count {
            chunks.push(SdesChunk::unmarshal(&mut body)?);
        }

        Ok(SourceDescription { chunks, padding })
    }
}

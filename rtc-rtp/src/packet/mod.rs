
use crate::header::Header;
use shared::{
    cursor::{Reader, Writer},
    error::{Error, Result},
    marshal::{Marshal, MarshalSize, Unmarshal},
};

use bytes::Bytes;
use std::fmt;

/// Packet represents an RTP Packet
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub struct Packet {
    pub header: Header,
    pub payload: Bytes,
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = "RTP PACKET:\n".to_string();

        out += format!("\tVersion: {}\n", self.header.version).as_str();
        out += format!("\tMarker: {}\n", self.header.marker).as_str();
        out += format!("\tPayload Type: {}\n", self.header.payload_type).as_str();
        out += format!("\tSequence Number: {}\n", self.header.sequence_number).as_str();
        out += format!("\tTimestamp: {}\n", self.header.timestamp).as_str();
        out += format!("\tSSRC: {} ({:x})\n", self.header.ssrc, self.header.ssrc).as_str();
        out += format!("\tPayload Length: {}\n", self.payload.len()).as_str();

        write!(f, "{out}")
    }
}

impl Packet {
    /// Parses one RTP packet from the first `valid_length` bytes of `buf`.
    ///
    /// Bytes past `valid_length` are never read.
    pub fn parse(buf: &[u8], valid_length: usize) -> Result<Self> {
        let valid = buf
            .get(..valid_length)
            .ok_or(Error::InvalidArgument("valid length exceeds the buffer"))?;

        let mut reader = Reader::new(valid);
        Packet::unmarshal(&mut reader)
    }

    /// The synchronization source followed by every contributing source.
    pub fn sources(&self) -> Vec<u32> {
        let mut sources = Vec::with_capacity(1 + self.header.csrc.len());
        sources.push(self.header.ssrc);
        sources.extend_from_slice(&self.header.csrc);
        sources
    }
}

impl Unmarshal for Packet {
    /// Unmarshal parses the header and takes every remaining byte of `reader` as payload.
    fn unmarshal(reader: &mut Reader<'_>) -> Result<Self>
    where
        Self: Sized,
    {
        let header = Header::unmarshal(reader)?;
        let payload = reader.read_bytes(reader.remaining())?;

        log::trace!(
            "rtp packet ssrc={} seq={} payload={}",
            header.ssrc,
            header.sequence_number,
            payload.len()
        );

        Ok(Packet {
            header,
            payload: Bytes::copy_from_slice(payload),
        })
    }
}

impl MarshalSize for Packet {
    fn marshal_size(&self) -> usize {
        self.header.marshal_size() + self.payload.len()
    }
}

impl Marshal for Packet {
    fn marshal_to(&self, writer: &mut Writer<'_>) -> Result<()> {
        self.header.marshal_to(writer)?;
        writer.write_bytes(&self.payload)
    }
}

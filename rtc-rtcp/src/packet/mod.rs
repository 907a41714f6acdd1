
use crate::{
    application_defined::ApplicationDefined,
    goodbye::Goodbye,
    header::{Header, PacketType},
    receiver_report::ReceiverReport,
    sender_report::SenderReport,
    source_description::SourceDescription,
};
use shared::{
    cursor::{Reader, Writer},
    error::{Error, Result},
    marshal::{Marshal, MarshalSize, Unmarshal},
};

use bytes::{Bytes, BytesMut};
use std::fmt;

/// Packet is one of the RTCP packet kinds this crate understands.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Packet {
    SenderReport(SenderReport),
    ReceiverReport(ReceiverReport),
    SourceDescription(SourceDescription),
    Goodbye(Goodbye),
    ApplicationDefined(ApplicationDefined),
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Packet::SenderReport(p) => write!(f, "{p}"),
            Packet::ReceiverReport(p) => write!(f, "{p}"),
            Packet::SourceDescription(p) => write!(f, "{p}"),
            Packet::Goodbye(p) => write!(f, "{p}"),
            Packet::ApplicationDefined(p) => write!(f, "{p}"),
        }
    }
}

impl Packet {
    /// Header returns the Header associated with this packet.
    ///
    /// Fails when the packet is too large for the 16-bit length field.
    pub fn header(&self) -> Result<Header> {
        match self {
            Packet::SenderReport(p) => p.header(),
            Packet::ReceiverReport(p) => p.header(),
            Packet::SourceDescription(p) => p.header(),
            Packet::Goodbye(p) => p.header(),
            Packet::ApplicationDefined(p) => p.header(),
        }
    }

    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::SenderReport(_) => PacketType::SenderReport,
            Packet::ReceiverReport(_) => PacketType::ReceiverReport,
            Packet::SourceDescription(_) => PacketType::SourceDescription,
            Packet::Goodbye(_) => PacketType::Goodbye,
            Packet::ApplicationDefined(_) => PacketType::ApplicationDefined,
        }
    }

    /// Number of padding octets at the end of the packet, 0 when unpadded.
    pub fn padding(&self) -> u8 {
        match self {
            Packet::SenderReport(p) => p.padding,
            Packet::ReceiverReport(p) => p.padding,
            Packet::SourceDescription(p) => p.padding,
            Packet::Goodbye(p) => p.padding(),
            Packet::ApplicationDefined(p) => p.padding(),
        }
    }

    /// Size of the encoded packet in bytes, header and padding included.
    pub fn size(&self) -> usize {
        self.marshal_size()
    }

    /// destination_ssrc returns an array of SSRC values that this packet refers to.
    pub fn destination_ssrc(&self) -> Vec<u32> {
        match self {
            Packet::SenderReport(p) => p.destination_ssrc(),
            Packet::ReceiverReport(p) => p.destination_ssrc(),
            Packet::SourceDescription(p) => p.destination_ssrc(),
            Packet::Goodbye(p) => p.destination_ssrc(),
            Packet::ApplicationDefined(p) => p.destination_ssrc(),
        }
    }
}

impl MarshalSize for Packet {
    fn marshal_size(&self) -> usize {
        match self {
            Packet::SenderReport(p) => p.marshal_size(),
            Packet::ReceiverReport(p) => p.marshal_size(),
            Packet::SourceDescription(p) => p.marshal_size(),
            Packet::Goodbye(p) => p.marshal_size(),
            Packet::ApplicationDefined(p) => p.marshal_size(),
        }
    }
}

impl Marshal for Packet {
    fn marshal_to(&self, writer: &mut Writer<'_>) -> Result<()> {
        match self {
            Packet::SenderReport(p) => p.marshal_to(writer),
            Packet::ReceiverReport(p) => p.marshal_to(writer),
            Packet::SourceDescription(p) => p.marshal_to(writer),
            Packet::Goodbye(p) => p.marshal_to(writer),
            Packet::ApplicationDefined(p) => p.marshal_to(writer),
        }
    }
}

/// Decodes the packet at the reader's position and returns it together with
/// the reader advanced past it, padding included.
///
/// A packet type this crate does not understand is skipped using its length
/// field. With `lenient` set the skip yields `None`, otherwise it fails with
/// [`Error::UnknownPacketType`]. On error the caller's reader is untouched.
pub fn unmarshal_one(reader: Reader<'_>, lenient: bool) -> Result<(Option<Packet>, Reader<'_>)> {
    let mut reader = reader;
    let start = reader.position();

    let raw_type = reader.peek_u8(1).map_err(Error::into_truncated)?;
    let packet = match PacketType::from(raw_type) {
        PacketType::SenderReport => Packet::SenderReport(SenderReport::unmarshal(&mut reader)?),
        PacketType::ReceiverReport => {
            Packet::ReceiverReport(ReceiverReport::unmarshal(&mut reader)?)
        }
        PacketType::SourceDescription => {
            Packet::SourceDescription(SourceDescription::unmarshal(&mut reader)?)
        }
        PacketType::Goodbye => Packet::Goodbye(Goodbye::unmarshal(&mut reader)?),
        PacketType::ApplicationDefined => {
            Packet::ApplicationDefined(ApplicationDefined::unmarshal(&mut reader)?)
        }
        PacketType::Unsupported => {
            let length = reader.peek_u16(2).map_err(Error::into_truncated)?;
            let size = (length as usize + 1) * 4;
            reader.skip(size).map_err(Error::into_truncated)?;

            if !lenient {
                log::debug!("rejecting unknown rtcp packet type {raw_type} at offset {start}");
                return Err(Error::UnknownPacketType(raw_type));
            }

            log::trace!("skipped unknown rtcp packet type {raw_type} ({size} bytes) at offset {start}");
            return Ok((None, reader));
        }
    };

    log::trace!(
        "decoded rtcp {} ({} bytes) at offset {start}",
        packet.packet_type(),
        reader.position() - start
    );

    Ok((Some(packet), reader))
}

/// Decodes the packet starting at `offset` in `buf`.
///
/// Returns the packet, or `None` for a leniently skipped unknown type, and the
/// offset of the next packet.
pub fn parse_one(buf: &[u8], offset: usize, lenient: bool) -> Result<(Option<Packet>, usize)> {
    let reader = Reader::with_offset(buf, offset)?;
    let (packet, reader) = unmarshal_one(reader, lenient)?;
    Ok((packet, reader.position()))
}

/// Encodes `packet` into `buf` at `offset` and returns the offset just past it.
pub fn marshal_into(packet: &Packet, buf: &mut [u8], offset: usize) -> Result<usize> {
    let mut writer = Writer::with_offset(buf, offset)?;
    packet.marshal_to(&mut writer)?;
    Ok(writer.position())
}

/// Decodes a compound RTCP datagram: every packet back to back until `buf` is
/// exhausted. Unknown packet types are dropped when `lenient` is set.
pub fn unmarshal(buf: &[u8], lenient: bool) -> Result<Vec<Packet>> {
    let mut packets = vec![];
    let mut reader = Reader::new(buf);

    while reader.has_remaining() {
        let (packet, next) = unmarshal_one(reader, lenient).inspect_err(|err| {
            log::debug!(
                "compound rtcp decode stopped at offset {}: {err}",
                reader.position()
            )
        })?;

        packets.extend(packet);
        reader = next;
    }

    Ok(packets)
}

/// Encodes `packets` back to back into a single compound datagram.
pub fn marshal(packets: &[Packet]) -> Result<Bytes> {
    let size: usize = packets.iter().map(|p| p.marshal_size()).sum();
    let mut buf = BytesMut::zeroed(size);

    let mut writer = Writer::new(&mut buf);
    for p in packets {
        p.marshal_to(&mut writer)?;
    }
    if writer.position() != size {
        return Err(Error::WrongMarshalSize);
    }

    Ok(buf.freeze())
}

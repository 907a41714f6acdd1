#[cfg(test)]
mod application_defined_test;

use crate::{
    header::{COUNT_MAX, HEADER_LENGTH, Header, PacketType, SSRC_LENGTH},
    util::{check_padding, get_padding_size, length_field, read_framed, write_padding},
};
use shared::{
    cursor::{Reader, Writer},
    error::{Error, Result},
    marshal::{Marshal, MarshalSize, Unmarshal},
};

use bytes::Bytes;
use std::fmt;

const NAME_LENGTH: usize = 4;

/// ApplicationDefined represents an RTCP application-defined packet.
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P| subtype |   PT=APP=204  |             length            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           SSRC/CSRC                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                          name (ASCII)                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                   application-dependent data                ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Data that does not end on a 4-byte boundary is carried with RTCP padding,
/// which [`ApplicationDefined::set_data`] computes.
///
/// [`ApplicationDefined::set_name`] only accepts four ASCII characters, but a
/// decoded name is kept as raw bytes whatever it contains.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ApplicationDefined {
    sub_type: u8,
    pub ssrc: u32,
    name: [u8; NAME_LENGTH],
    data: Bytes,
    padding: u8,
}

impl fmt::Display for ApplicationDefined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ApplicationDefined from {:x}\n\tSubType: {}\n\tName: {}\n\tData Length: {}\n",
            self.ssrc,
            self.sub_type,
            String::from_utf8_lossy(&self.name),
            self.data.len()
        )
    }
}


impl ApplicationDefined {
    pub fn new(sub_type: u8, ssrc: u32, name: &str, data: Bytes) -> Result<Self> {
        let mut app = ApplicationDefined {
            sub_type: 0,
            ssrc,
            name: [0; NAME_LENGTH],
            data: Bytes::new(),
            padding: 0,
        };
        app.set_sub_type(sub_type)?;
        app.set_name(name)?;
        app.set_data(data);
        Ok(app)
    }

    /// The 5-bit application-specific subtype carried in the count field.
    pub fn sub_type(&self) -> u8 {
        self.sub_type
    }

    pub fn set_sub_type(&mut self, sub_type: u8) -> Result<()> {
        if sub_type as usize > COUNT_MAX {
            return Err(Error::InvalidArgument("APP subtype must fit in 5 bits"));
        }
        self.sub_type = sub_type;
        Ok(())
    }

    /// The four bytes naming the application, ASCII unless decoded from a
    /// peer that ignored that rule.
    pub fn name(&self) -> &[u8; NAME_LENGTH] {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        if !name.is_ascii() {
            return Err(Error::InvalidName);
        }
        self.name = name
            .as_bytes()
            .try_into()
            .map_err(|_| Error::InvalidName)?;
        Ok(())
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Replaces the application data and pads it to a 4-byte boundary.
    pub fn set_data(&mut self, data: Bytes) {
        self.padding = get_padding_size(data.len()) as u8;
        self.data = data;
    }

    /// Padding octets appended after the data, 0 when unpadded.
    pub fn padding(&self) -> u8 {
        self.padding
    }

    /// Header returns the Header associated with this packet.
    ///
    /// Fails when the packet is too large for the 16-bit length field.
    pub fn header(&self) -> Result<Header> {
        Ok(Header {
            padding: self.padding != 0,
            count: self.sub_type,
            packet_type: PacketType::ApplicationDefined,
            length: length_field(self.marshal_size())?,
        })
    }

    /// destination_ssrc returns an array of SSRC values that this packet refers to.
    pub fn destination_ssrc(&self) -> Vec<u32> {
        vec![self.ssrc]
    }
}

impl MarshalSize for ApplicationDefined {
    fn marshal_size(&self) -> usize {
        HEADER_LENGTH + SSRC_LENGTH + NAME_LENGTH + self.data.len() + self.padding as usize
    }
}

impl Marshal for ApplicationDefined {
    /// marshal_to encodes the ApplicationDefined packet in binary
    fn marshal_to(&self, writer: &mut Writer<'_>) -> Result<()> {
        check_padding(self.data.len(), self.padding)?;

        self.header()?.marshal_to(writer)?;

        writer.write_u32(self.ssrc)?;
        writer.write_bytes(&self.name)?;
        writer.write_bytes(&self.data)?;

        write_padding(writer, self.padding)
    }
}

impl Unmarshal for ApplicationDefined {
    /// Unmarshal decodes the ApplicationDefined packet from binary
    fn unmarshal(reader: &mut Reader<'_>) -> Result<Self>
    where
        Self: Sized,
    {
        let read = |reader: &mut Reader<'_>| -> Result<Self> {
            let (header, mut body, padding) =
                read_framed(reader, PacketType::ApplicationDefined)?;

            let ssrc = body.read_u32()?;
            let mut name = [0; NAME_LENGTH];
            name.copy_from_slice(body.read_bytes(NAME_LENGTH)?);
            if !name.is_ascii() {
                log::trace!("application defined {ssrc:x}: name {name:02x?} is not ASCII");
            }
            let data = body.read_bytes(body.remaining())?;

            Ok(ApplicationDefined {
                sub_type: header.count,
                ssrc,
                name,
                data: Bytes::copy_from_slice(data),
                padding,
            })
        };

        read(reader).map_err(Error::into_truncated)
    }
}

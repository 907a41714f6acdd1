use crate::header::{HEADER_LENGTH, Header, PacketType};
use shared::{
    cursor::{Reader, Writer},
    error::{Error, Result},
    marshal::Unmarshal,
};

// returns the number of zero bytes needed to pad `len` to a 4-byte boundary
pub(crate) fn get_padding_size(len: usize) -> usize {
    if len % 4 == 0 { 0 } else { 4 - (len % 4) }
}

/// Converts a packet size in bytes into the header's length field.
pub(crate) fn length_field(size: usize) -> Result<u16> {
    if size < HEADER_LENGTH || size % 4 != 0 {
        return Err(Error::WrongMarshalSize);
    }

    u16::try_from(size / 4 - 1)
        .map_err(|_| Error::InvalidArgument("packet exceeds the 16-bit length field"))
}

/// Checks that `padding` extra bytes bring `content_len` to a 4-byte boundary.
pub(crate) fn check_padding(content_len: usize, padding: u8) -> Result<()> {
    if (content_len + padding as usize) % 4 != 0 {
        Err(Error::WrongPadding)
    } else {
        Ok(())
    }
}

/// Reads the common header of a packet of type `expected` and splits its
/// declared body off `reader`.
///
/// Returns the header, a reader limited to the body with any padding already
/// stripped from its end, and the padding count (0 when the P bit is clear).
pub(crate) fn read_framed<'a>(
    reader: &mut Reader<'a>,
    expected: PacketType,
) -> Result<(Header, Reader<'a>, u8)> {
    let header = Header::unmarshal(reader)?;
    if header.packet_type != expected {
        return Err(Error::WrongType);
    }

    let mut body = reader.split_to(header.length as usize * 4)?;

    let padding = if header.padding {
        if !body.has_remaining() {
            return Err(Error::WrongPadding);
        }
        let padding = body.last_u8()?;
        if padding == 0 || padding as usize > body.remaining() {
            return Err(Error::WrongPadding);
        }
        body.truncate_end(padding as usize)?;
        padding
    } else {
        0
    };

    Ok((header, body, padding))
}

/// Writes `padding` bytes: zeros followed by the count itself.
pub(crate) fn write_padding(writer: &mut Writer<'_>, padding: u8) -> Result<()> {
    if padding == 0 {
        return Ok(());
    }

    writer.write_zeros(padding as usize - 1)?;
    writer.write_u8(padding)
}

use bytes::{Bytes, BytesMut};

use crate::cursor::{Reader, Writer};
use crate::error::{Error, Result};

pub trait MarshalSize {
    fn marshal_size(&self) -> usize;
}

pub trait Marshal: MarshalSize {
    /// Encodes `self` at the writer's position and advances it.
    fn marshal_to(&self, writer: &mut Writer<'_>) -> Result<()>;

    fn marshal(&self) -> Result<Bytes> {
        let l = self.marshal_size();
        let mut buf = BytesMut::zeroed(l);
        let n = {
            let mut writer = Writer::new(&mut buf);
            self.marshal_to(&mut writer)?;
            writer.position()
        };
        if n != l {
            Err(Error::WrongMarshalSize)
        } else {
            Ok(buf.freeze())
        }
    }
}

pub trait Unmarshal: MarshalSize {
    /// Decodes one value at the reader's position and advances past it.
    fn unmarshal(reader: &mut Reader<'_>) -> Result<Self>
    where
        Self: Sized;
}

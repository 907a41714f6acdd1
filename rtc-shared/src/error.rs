#![allow(dead_code)]

use std::string::FromUtf8Error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    //Cursor errors
    /// A read or write would run past the end of the buffer.
    #[error("buffer: out of bounds, {needed} bytes at offset {offset} exceed length {len}")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        len: usize,
    },
    /// Wrong marshal size.
    #[error("Wrong marshal size")]
    WrongMarshalSize,
    /// Null or out-of-range parameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    //RTP errors
    /// Declared length exceeds the bytes actually available.
    #[error("packet is truncated")]
    TruncatedPacket,
    #[error("too many contributing sources, at most 15 fit in the CC field")]
    TooManyContributingSources,

    //RTCP errors
    /// Strict dispatch hit a packet type it does not understand.
    #[error("unknown RTCP packet type {0}")]
    UnknownPacketType(u8),
    /// Packet contains an invalid version.
    #[error("Invalid packet version")]
    BadVersion,
    /// Wrong packet type.
    #[error("Wrong packet type")]
    WrongType,
    /// Invalid padding value.
    #[error("Invalid padding value")]
    WrongPadding,
    /// Packet lost exceeds maximum amount of packets
    /// that can possibly be lost.
    #[error("Invalid total lost count")]
    InvalidTotalLost,
    /// Too many reports.
    #[error("Too many reports")]
    TooManyReports,
    /// Too many chunks.
    #[error("Too many chunks")]
    TooManyChunks,
    /// Too many sources.
    #[error("too many sources")]
    TooManySources,
    /// SDES text or BYE reason does not fit its 1-byte length prefix.
    #[error("field must be <= 255 octets long")]
    FieldTooLong,
    /// APP name is not four ASCII characters.
    #[error("application name must be 4 ASCII characters")]
    InvalidName,

    //Third Party Error
    #[error("utf8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

impl Error {
    /// Reports a cursor overrun inside a length-delimited region as a truncated packet.
    pub fn into_truncated(self) -> Self {
        match self {
            Error::OutOfBounds { .. } => Error::TruncatedPacket,
            err => err,
        }
    }
}

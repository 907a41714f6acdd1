
use shared::{
    cursor::{Reader, Writer},
    error::{Error, Result},
    marshal::{Marshal, MarshalSize, Unmarshal},
};

pub(crate) const RECEPTION_REPORT_LENGTH: usize = 24;
const MAX_TOTAL_LOST: u32 = (1 << 24) - 1;

/// A ReceptionReport block conveys statistics on the reception of RTP packets
/// from a single synchronization source.
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// |                 SSRC_1 (SSRC of first source)                 |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | fraction lost |       cumulative number of packets lost       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |           extended highest sequence number received           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                      interarrival jitter                      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         last SR (LSR)                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                   delay since last SR (DLSR)                  |
/// +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// ```
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct ReceptionReport {
    /// The SSRC identifier of the source to which the information in this
    /// reception report block pertains.
    pub ssrc: u32,
    /// The fraction of RTP data packets from source SSRC lost since the
    /// previous SR or RR packet was sent, expressed as a fixed point
    /// number with the binary point at the left edge of the field.
    pub fraction_lost: u8,
    /// The total number of RTP data packets from source SSRC that have
    /// been lost since the beginning of reception. Only the low 24 bits
    /// travel on the wire.
    pub total_lost: u32,
    /// The low 16 bits contain the highest sequence number received in an
    /// RTP data packet from source SSRC, and the most significant 16
    /// bits extend that sequence number with the corresponding count of
    /// sequence number cycles.
    pub last_sequence_number: u32,
    /// An estimate of the statistical variance of the RTP data packet
    /// interarrival time, measured in timestamp units and expressed as an
    /// unsigned integer.
    pub jitter: u32,
    /// The middle 32 bits out of 64 in the NTP timestamp received as part of
    /// the most recent RTCP sender report (SR) packet from source SSRC. If no
    /// SR has been received yet, the field is set to zero.
    pub last_sender_report: u32,
    /// The delay, expressed in units of 1/65536 seconds, between receiving the
    /// last SR packet from source SSRC and sending this reception report block.
    /// If no SR packet has been received yet from SSRC, the field is set to zero.
    pub delay: u32,
}

impl MarshalSize for ReceptionReport {
    fn marshal_size(&self) -> usize {
        RECEPTION_REPORT_LENGTH
    }
}

impl Marshal for ReceptionReport {
    /// marshal_to encodes the ReceptionReport in binary
    fn marshal_to(&self, writer: &mut Writer<'_>) -> Result<()> {
        if self.total_lost > MAX_TOTAL_LOST {
            return Err(Error::InvalidTotalLost);
        }

        writer.write_u32(self.ssrc)?;
        writer.write_u8(self.fraction_lost)?;
        writer.write_u24(self.total_lost)?;
        writer.write_u32(self.last_sequence_number)?;
        writer.write_u32(self.jitter)?;
        writer.write_u32(self.last_sender_report)?;
        writer.write_u32(self.delay)
    }
}

impl Unmarshal for ReceptionReport {
    /// unmarshal decodes the ReceptionReport from binary
    fn unmarshal(reader: &mut Reader<'_>) -> Result<Self>
    where
        Self: Sized,
    {
        let read = |reader: &mut Reader<'_>| -> Result<Self> {
            Ok(ReceptionReport {
                ssrc: reader.read_u32()?,
                fraction_lost: reader.read_u8()?,
                total_lost: reader.read_u24()?,
                last_sequence_number: reader.read_u32()?,
                jitter: reader.read_u32()?,
                last_sender_report: reader.read_u32()?,
                delay: reader.read_u32()?,
            })
        };

        read(reader).map_err(Error::into_truncated)
    }
}

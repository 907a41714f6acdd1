#[cfg(test)]
mod receiver_report_test;

use crate::{
    header::{COUNT_MAX, HEADER_LENGTH, Header, PacketType, SSRC_LENGTH},
    reception_report::{RECEPTION_REPORT_LENGTH, ReceptionReport},
    util::{check_padding, length_field, read_framed, write_padding},
};
use shared::{
    cursor::{Reader, Writer},
    error::{Error, Result},
    marshal::{Marshal, MarshalSize, Unmarshal},
};

use std::fmt;

pub(super) const RR_SSRC_OFFSET: usize = HEADER_LENGTH;
pub(super) const RR_REPORT_OFFSET: usize = RR_SSRC_OFFSET + SSRC_LENGTH;

/// A ReceiverReport (RR) packet provides reception quality feedback for an RTP stream
///
/// ```text
///         0                   1                   2                   3
///         0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///        +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// header |V=2|P|    RC   |   PT=RR=201   |             length            |
///        +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///        |                     SSRC of packet sender                     |
///        +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// report |                 SSRC_1 (SSRC of first source)                 |
/// block  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///   1    | fraction lost |       cumulative number of packets lost       |
///        +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///        |           extended highest sequence number received           |
///        +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///        |                      interarrival jitter                      |
///        +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///        |                         last SR (LSR)                         |
///        +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///        |                   delay since last SR (DLSR)                  |
///        +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// report |                 SSRC_2 (SSRC of second source)                |
/// block  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///   2    :                               ...                             :
///        +=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+=+
/// ```
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct ReceiverReport {
    /// The synchronization source identifier for the originator of this RR packet.
    pub ssrc: u32,
    /// Zero or more reception report blocks depending on the number of other
    /// sources heard by this sender since the last report.
    pub reports: Vec<ReceptionReport>,
    /// Padding octets appended after the report blocks, 0 when unpadded.
    pub padding: u8,
}

impl fmt::Display for ReceiverReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = format!("ReceiverReport from {:x}\n", self.ssrc);
        out += "\tSSRC    \tLost\tLastSequence\n";
        for rep in &self.reports {
            out += format!(
                "\t{:x}\t{}/{}\t{}\n",
                rep.ssrc, rep.fraction_lost, rep.total_lost, rep.last_sequence_number
            )
            .as_str();
        }
        write!(f, "{out}")
    }
}

impl ReceiverReport {
    /// Header returns the Header associated with this packet.
    ///
    /// Fails when the packet is too large for the 16-bit length field.
    pub fn header(&self) -> Result<Header> {
        Ok(Header {
            padding: self.padding != 0,
            count: self.reports.len() as u8,
            packet_type: PacketType::ReceiverReport,
            length: length_field(self.marshal_size())?,
        })
    }

    /// destination_ssrc returns an array of SSRC values that this packet refers to.
    pub fn destination_ssrc(&self) -> Vec<u32> {
        self.reports.iter().map(|x| x.ssrc).collect()
    }
}

impl MarshalSize for ReceiverReport {
    fn marshal_size(&self) -> usize {
        RR_REPORT_OFFSET + self.reports.len() * RECEPTION_REPORT_LENGTH + self.padding as usize
    }
}

impl Marshal for ReceiverReport {
    /// marshal_to encodes the ReceiverReport in binary
    fn marshal_to(&self, writer: &mut Writer<'_>) -> Result<()> {
        if self.reports.len() > COUNT_MAX {
            return Err(Error::TooManyReports);
        }
        check_padding(0, self.padding)?;

        self.header()?.marshal_to(writer)?;

        writer.write_u32(self.ssrc)?;
        for report in &self.reports {
            report.marshal_to(writer)?;
        }

        write_padding(writer, self.padding)
    }
}

impl Unmarshal for ReceiverReport {
    /// Unmarshal decodes the ReceiverReport from binary
    fn unmarshal(reader: &mut Reader<'_>) -> Result<Self>
    where
        Self: Sized,
    {
        let (header, mut body, padding) =
            read_framed(reader, PacketType::ReceiverReport).map_err(Error::into_truncated)?;
        check_padding(0, padding)?;

        let ssrc = body.read_u32().map_err(Error::into_truncated)?;

        let mut reports = Vec::with_capacity(header.count as usize);
        for _ in 0..header.count {
            reports.push(ReceptionReport::unmarshal(&mut body)?);
        }

        if body.has_remaining() {
            log::trace!(
                "receiver report {ssrc:x}: skipping {} bytes of profile extensions",
                body.remaining()
            );
        }

        Ok(ReceiverReport {
            ssrc,
            reports,
            padding,
        })
    }
}

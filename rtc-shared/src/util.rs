// match_range is a MatchFunc that accepts packets with the first byte in [lower..upper]
fn match_range(lower: u8, upper: u8) -> impl Fn(&[u8]) -> bool {
    move |buf: &[u8]| -> bool {
        if buf.is_empty() {
            return false;
        }
        let b = buf[0];
        b >= lower && b <= upper
    }
}

/// MatchFuncs as described in RFC7983
/// <https://tools.ietf.org/html/rfc7983>
///              +----------------+
///              |        [0..3] -+--> forward to STUN
///              |                |
///              |      [16..19] -+--> forward to ZRTP
///              |                |
///              |      [20..63] -+--> forward to DTLS
///              |                |
///              |      [64..79] -+--> forward to TURN Channel
///              |                |
///              |    [128..191] -+--> forward to RTP/RTCP
///              +----------------+
/// match_rtp_or_rtcp is a MatchFunc that accepts packets with the first byte in [128..191]
pub fn match_rtp_or_rtcp(b: &[u8]) -> bool {
    match_range(128, 191)(b)
}

/// is_rtcp tells RTCP apart from RTP by the packet type byte (RFC 5761 section 4).
pub fn is_rtcp(buf: &[u8]) -> bool {
    // Not long enough to determine RTP/RTCP
    if buf.len() < 4 {
        return false;
    }

    let rtcp_packet_type = buf[1];
    (192..=223).contains(&rtcp_packet_type)
}

/// match_rtp is a MatchFunc that only matches RTP and not RTCP
pub fn match_rtp(buf: &[u8]) -> bool {
    match_rtp_or_rtcp(buf) && !is_rtcp(buf)
}

/// match_rtcp is a MatchFunc that only matches RTCP and not RTP
pub fn match_rtcp(buf: &[u8]) -> bool {
    match_rtp_or_rtcp(buf) && is_rtcp(buf)
}

use super::*;

#[test]
fn test_receiver_report_unmarshal() {
    let tests = vec![
        (
            "valid",
            vec![
                0x81u8, 0xc9, 0x00, 0x07, // v=2, p=0, count=1, RR, len=7
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
                0xbc, 0x5e, 0x9a, 0x40, // ssrc=0xbc5e9a40
                0x00, 0x00, 0x00, 0x00, // fracLost=0, totalLost=0
                0x00, 0x00, 0x46, 0xe1, // lastSeq=0x46e1
                0x00, 0x00, 0x01, 0x11, // jitter=273
                0x09, 0xf3, 0x64, 0x32, // lsr=0x9f36432
                0x00, 0x02, 0x4a, 0x79, // delay=150137
            ],
            ReceiverReport {
                ssrc: 0x902f9e2e,
                reports: vec![ReceptionReport {
                    ssrc: 0xbc5e9a40,
                    fraction_lost: 0,
                    total_lost: 0,
                    last_sequence_number: 0x46e1,
                    jitter: 273,
                    last_sender_report: 0x9f36432,
                    delay: 150137,
                }],
                padding: 0,
            },
            None,
        ),
        (
            "short report",
            vec![
                0x81, 0xc9, 0x00, 0x0c, // v=2, p=0, count=1, RR, len=12
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
                0x00, 0x00, 0x00, 0x00, // fracLost=0, totalLost=0
            ],
            ReceiverReport::default(),
            Some(Error::TruncatedPacket),
        ),
        (
            "wrong type",
            vec![
                0x81, 0xc8, 0x00, 0x07, // v=2, p=0, count=1, SR, len=7
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
                0xbc, 0x5e, 0x9a, 0x40, // ssrc=0xbc5e9a40
                0x00, 0x00, 0x00, 0x00, // fracLost=0, totalLost=0
                0x00, 0x00, 0x46, 0xe1, // lastSeq=0x46e1
                0x00, 0x00, 0x01, 0x11, // jitter=273
                0x09, 0xf3, 0x64, 0x32, // lsr=0x9f36432
                0x00, 0x02, 0x4a, 0x79, // delay=150137
            ],
            ReceiverReport::default(),
            Some(Error::WrongType),
        ),
        (
            "bad version",
            vec![
                0x41, 0xc9, 0x00, 0x01, // v=1, p=0, count=1, RR, len=1
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
            ],
            ReceiverReport::default(),
            Some(Error::BadVersion),
        ),
        (
            "padded",
            vec![
                0xa0, 0xc9, 0x00, 0x02, // v=2, p=1, count=0, RR, len=2
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
                0x00, 0x00, 0x00, 0x04, // padding
            ],
            ReceiverReport {
                ssrc: 0x902f9e2e,
                reports: vec![],
                padding: 4,
            },
            None,
        ),
        (
            "padding not a multiple of 4",
            vec![
                0xa0, 0xc9, 0x00, 0x02, // v=2, p=1, count=0, RR, len=2
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
                0x00, 0x00, 0x00, 0x03, // 1 byte of extension, 3 of padding
            ],
            ReceiverReport::default(),
            Some(Error::WrongPadding),
        ),
        (
            "no reports",
            vec![
                0x80, 0xc9, 0x00, 0x01, // v=2, p=0, count=0, RR, len=1
                0x90, 0x2f, 0x9e, 0x2e, // ssrc=0x902f9e2e
            ],
            ReceiverReport {
                ssrc: 0x902f9e2e,
                reports: vec![],
                padding: 0,
            },
            None,
        ),
    ];

    for (name, data, want, want_error) in tests {
        let mut reader = Reader::new(&data);
        let got = ReceiverReport::unmarshal(&mut reader);

        assert_eq!(
            got.as_ref().err(),
            want_error.as_ref(),
            "Unmarshal {name}: err = {got:?}, want {want_error:?}"
        );

        if let Ok(rr) = got {
            assert_eq!(rr, want, "Unmarshal {name}: got {rr:?}, want {want:?}");
            assert_eq!(rr.marshal().ok().as_deref(), Some(&data[..]), "{name} re-marshal");
        }
    }
}

#[test]
fn test_receiver_report_marshal_invalid() {
    let tests = vec![
        (
            "too many reports",
            ReceiverReport {
                ssrc: 1,
                reports: vec![ReceptionReport::default(); 32],
                padding: 0,
            },
            Error::TooManyReports,
        ),
        (
            "invalid total lost",
            ReceiverReport {
                ssrc: 1,
                reports: vec![ReceptionReport {
                    total_lost: 1 << 25,
                    ..Default::default()
                }],
                padding: 0,
            },
            Error::InvalidTotalLost,
        ),
        (
            "unaligned padding",
            ReceiverReport {
                ssrc: 1,
                reports: vec![],
                padding: 2,
            },
            Error::WrongPadding,
        ),
    ];

    for (name, rr, want_error) in tests {
        assert_eq!(rr.marshal(), Err(want_error), "Marshal {name}");
    }
}

#[test]
fn test_receiver_report_max_reports() -> Result<()> {
    let rr = ReceiverReport {
        ssrc: 1,
        reports: (0..31)
            .map(|i| ReceptionReport {
                ssrc: i,
                ..Default::default()
            })
            .collect(),
        padding: 0,
    };

    let data = rr.marshal()?;
    assert_eq!(data.len(), 8 + 31 * 24);
    assert_eq!(data[0] & 0x1f, 31);

    let mut reader = Reader::new(&data);
    assert_eq!(ReceiverReport::unmarshal(&mut reader)?, rr);
    assert_eq!(rr.destination_ssrc().len(), 31);

    Ok(())
}

use super::*;

fn chunk(source: u32, cname: &str) -> SdesChunk {
    SdesChunk::new(source, cname).unwrap()
}

fn bare_chunk(source: u32) -> SdesChunk {
    SdesChunk {
        source,
        cname: None,
        name: None,
        email: None,
        phone: None,
        location: None,
        tool: None,
        note: None,
    }
}

#[test]
fn test_source_description_unmarshal() {
    let tests = vec![
        (
            "nil",
            vec![],
            SourceDescription::default(),
            Some(Error::TruncatedPacket),
        ),
        (
            "no chunks",
            vec![
                // v=2, p=0, count=0, SDES, len=0
                0x80u8, 0xca, 0x00, 0x00,
            ],
            SourceDescription::default(),
            None,
        ),
        (
            "missing type",
            vec![
                // v=2, p=0, count=1, SDES, len=1
                0x81, 0xca, 0x00, 0x01, // ssrc=0x00000000
                0x00, 0x00, 0x00, 0x00,
            ],
            SourceDescription::default(),
            Some(Error::TruncatedPacket),
        ),
        (
            "no items",
            vec![
                // v=2, p=0, count=1, SDES, len=2
                0x81, 0xca, 0x00, 0x02, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // END + padding
                0x00, 0x00, 0x00, 0x00,
            ],
            SourceDescription {
                chunks: vec![bare_chunk(0x01020304)],
                padding: 0,
            },
            None,
        ),
        (
            "name without cname",
            vec![
                // v=2, p=0, count=1, SDES, len=2
                0x81, 0xca, 0x00, 0x02, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // NAME, len=1, text=b, END
                0x02, 0x01, 0x62, 0x00,
            ],
            SourceDescription {
                chunks: vec![{
                    let mut c = bare_chunk(0x01020304);
                    c.set_name("b").unwrap();
                    c
                }],
                padding: 0,
            },
            None,
        ),
        (
            "unaligned padding",
            vec![
                // v=2, p=1, count=1, SDES, len=3
                0xa1, 0xca, 0x00, 0x03, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // CNAME, len=1, text=a, END
                0x01, 0x01, 0x61, 0x00, // 2 bytes of padding
                0x00, 0x00, 0x00, 0x02,
            ],
            SourceDescription::default(),
            Some(Error::WrongPadding),
        ),
        (
            "bad cname length",
            vec![
                // v=2, p=0, count=1, SDES, len=3
                0x81, 0xca, 0x00, 0x03, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // CNAME, len=8
                0x01, 0x08, 0x41, 0x42, 0x43, 0x44, 0x00, 0x00,
            ],
            SourceDescription::default(),
            Some(Error::TruncatedPacket),
        ),
        (
            "invalid utf8",
            vec![
                // v=2, p=0, count=1, SDES, len=3
                0x81, 0xca, 0x00, 0x03, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // CNAME, len=2, text=0xff 0xfe
                0x01, 0x02, 0xff, 0xfe, // END + padding
                0x00, 0x00, 0x00, 0x00,
            ],
            SourceDescription::default(),
            Some(Error::Utf8(String::from_utf8(vec![0xff, 0xfe]).unwrap_err())),
        ),
        (
            "cname",
            vec![
                // v=2, p=0, count=1, SDES, len=3
                0x81, 0xca, 0x00, 0x03, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // CNAME, len=2, text=ab
                0x01, 0x02, 0x61, 0x62, // END + padding
                0x00, 0x00, 0x00, 0x00,
            ],
            SourceDescription {
                chunks: vec![chunk(0x01020304, "ab")],
                padding: 0,
            },
            None,
        ),
        (
            "two items",
            vec![
                // v=2, p=0, count=1, SDES, len=3
                0x81, 0xca, 0x00, 0x03, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // CNAME, len=1, text=a
                0x01, 0x01, 0x61, // NOTE, len=1, text=b
                0x07, 0x01, 0x62, // END
                0x00, 0x00,
            ],
            SourceDescription {
                chunks: vec![{
                    let mut c = chunk(0x01020304, "a");
                    c.set_note("b").unwrap();
                    c
                }],
                padding: 0,
            },
            None,
        ),
        (
            "two chunks",
            vec![
                // v=2, p=0, count=2, SDES, len=4
                0x82, 0xca, 0x00, 0x04, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // CNAME, len=1, text=a, END
                0x01, 0x01, 0x61, 0x00, // ssrc=0x05060708
                0x05, 0x06, 0x07, 0x08, // CNAME, len=1, text=b, END
                0x01, 0x01, 0x62, 0x00,
            ],
            SourceDescription {
                chunks: vec![chunk(0x01020304, "a"), chunk(0x05060708, "b")],
                padding: 0,
            },
            None,
        ),
        (
            "private item is skipped",
            vec![
                // v=2, p=0, count=1, SDES, len=3
                0x81, 0xca, 0x00, 0x03, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // PRIV, len=1, text=x
                0x08, 0x01, 0x78, // CNAME, len=1, text=a
                0x01, 0x01, 0x61, // END
                0x00, 0x00,
            ],
            SourceDescription {
                chunks: vec![chunk(0x01020304, "a")],
                padding: 0,
            },
            None,
        ),
        (
            "padded",
            vec![
                // v=2, p=1, count=1, SDES, len=3
                0xa1, 0xca, 0x00, 0x03, // ssrc=0x01020304
                0x01, 0x02, 0x03, 0x04, // CNAME, len=1, text=a, END
                0x01, 0x01, 0x61, 0x00, // padding
                0x00, 0x00, 0x00, 0x04,
            ],
            SourceDescription {
                chunks: vec![chunk(0x01020304, "a")],
                padding: 4,
            },
            None,
        ),
    ];

    for (name, data, want, want_error) in tests {
        let mut reader = Reader::new(&data);
        let got = SourceDescription::unmarshal(&mut reader);

        assert_eq!(
            got.as_ref().err(),
            want_error.as_ref(),
            "Unmarshal {name}: err = {got:?}, want {want_error:?}"
        );

        if let Ok(sdes) = got {
            assert_eq!(sdes, want, "Unmarshal {name}: got {sdes:?}, want {want:?}");
            assert!(sdes.marshal().is_ok(), "Unmarshal {name}: decoded packet must re-marshal");
        }
    }
}

#[test]
fn test_source_description_item_types() -> Result<()> {
    // NAME (type 2) is kept apart from CNAME (type 1).
    let data = [
        0x81, 0xca, 0x00, 0x04, // v=2, p=0, count=1, SDES, len=4
        0x01, 0x02, 0x03, 0x04, // ssrc=0x01020304
        0x02, 0x03, 0x62, 0x6f, 0x62, // NAME, len=3, text=bob
        0x01, 0x01, 0x61, // CNAME, len=1, text=a
        0x00, 0x00, 0x00, 0x00, // END + padding
    ];

    let mut reader = Reader::new(&data);
    let sdes = SourceDescription::unmarshal(&mut reader)?;
    let c = &sdes.chunks[0];
    assert_eq!(c.cname(), Some("a"));
    assert_eq!(c.name(), Some("bob"));
    assert_eq!(c.email(), None);

    Ok(())
}

#[test]
fn test_source_description_roundtrip() -> Result<()> {
    let mut full = chunk(1, "cname@example.com");
    full.set_name("name")?;
    full.set_email("user@example.com")?;
    full.set_phone("+1 555")?;
    full.set_location("earth")?;
    full.set_tool("rtc")?;
    full.set_note("note")?;

    let tests = vec![
        (
            "valid",
            SourceDescription {
                chunks: vec![chunk(1, "test@example.com"), chunk(2, "other")],
                padding: 0,
            },
            None,
        ),
        (
            "every item",
            SourceDescription {
                chunks: vec![full],
                padding: 0,
            },
            None,
        ),
        (
            "empty",
            SourceDescription::default(),
            None,
        ),
        (
            "chunk without cname",
            SourceDescription {
                chunks: vec![chunk(1, "x"), {
                    let mut c = bare_chunk(2);
                    c.set_tool("rtc").unwrap();
                    c
                }],
                padding: 0,
            },
            None,
        ),
        (
            "padded",
            SourceDescription {
                chunks: vec![chunk(1, "x")],
                padding: 12,
            },
            None,
        ),
        (
            "unaligned padding",
            SourceDescription {
                chunks: vec![chunk(1, "x")],
                padding: 1,
            },
            Some(Error::WrongPadding),
        ),
        (
            "too many chunks",
            SourceDescription {
                chunks: (1..=32).map(|i| chunk(i, "x")).collect(),
                padding: 0,
            },
            Some(Error::TooManyChunks),
        ),
    ];

    for (name, want, want_error) in tests {
        let got = want.marshal();

        assert_eq!(
            got.as_ref().err(),
            want_error.as_ref(),
            "Marshal {name}: err = {got:?}, want {want_error:?}"
        );

        if let Ok(data) = got {
            assert_eq!(data.len() % 4, 0, "{name}: unaligned packet");
            assert_eq!(
                u16::from_be_bytes([data[2], data[3]]) as usize,
                data.len() / 4 - 1,
                "{name}: wrong length field"
            );

            let mut reader = Reader::new(&data);
            let actual = SourceDescription::unmarshal(&mut reader)?;
            assert_eq!(
                actual, want,
                "{name} round trip: got {actual:?}, want {want:?}"
            );
        }
    }

    Ok(())
}

#[test]
fn test_sdes_chunk_alignment() -> Result<()> {
    for len in 1..=12 {
        let cname = "x".repeat(len);
        let c = chunk(1, &cname);

        // item bytes: type + length + text
        let n = 2 + len;
        let want = (n + 5).div_ceil(4) * 4;

        let data = c.marshal()?;
        assert_eq!(data.len(), want, "cname of {len} bytes");
        assert_eq!(c.marshal_size(), want);
        assert!(data[4 + n..].iter().all(|b| *b == 0));
    }

    Ok(())
}

#[test]
fn test_sdes_chunk_validation() {
    assert_eq!(
        SdesChunk::new(0, "a").err(),
        Some(Error::InvalidArgument("SDES chunk source must not be 0"))
    );
    assert_eq!(
        SdesChunk::new(1, "").err(),
        Some(Error::InvalidArgument("CNAME must not be empty"))
    );
    assert_eq!(
        SdesChunk::new(1, &"a".repeat(256)).err(),
        Some(Error::FieldTooLong)
    );
    assert!(SdesChunk::new(1, &"a".repeat(255)).is_ok());

    let mut c = chunk(1, "a");
    assert_eq!(c.set_tool(&"t".repeat(256)), Err(Error::FieldTooLong));
    assert_eq!(c.tool(), None);

    // two bytes per character
    assert_eq!(c.set_note(&"é".repeat(128)), Err(Error::FieldTooLong));
    assert!(c.set_note(&"é".repeat(127)).is_ok());

    c.set_name("name").unwrap();
    c.set_name("").unwrap();
    assert_eq!(c.name(), None);
}

#[test]
fn test_source_description_chunked() {
    assert!(SourceDescription::chunked(vec![]).is_empty());

    let packets = SourceDescription::chunked((1..=70).map(|i| chunk(i, "x")).collect());
    let counts: Vec<usize> = packets.iter().map(|p| p.chunks.len()).collect();
    assert_eq!(counts, vec![31, 31, 8]);
    assert_eq!(packets[1].chunks[0].source(), 32);
    assert_eq!(packets[2].destination_ssrc(), (63..=70).collect::<Vec<u32>>());
}

#[test]
fn test_source_description_display() {
    let sdes = SourceDescription {
        chunks: vec![chunk(0x10, "a")],
        padding: 0,
    };
    assert_eq!(
        sdes.to_string(),
        "Source Description:\n\t[Source: 10 [CNAME: a]]\n"
    );
}

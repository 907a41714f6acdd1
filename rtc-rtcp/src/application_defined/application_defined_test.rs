use super::*;

#[test]
fn test_application_defined_unmarshal() {
    let tests = vec![
        (
            "valid",
            vec![
                0x85u8, 0xcc, 0x00, 0x03, // v=2, p=0, subtype=5, APP, len=3
                0x4b, 0xc4, 0xfc, 0xb4, // ssrc=0x4bc4fcb4
                0x51, 0x4e, 0x41, 0x4d, // name=QNAM
            ],
            ApplicationDefined {
                sub_type: 5,
                ssrc: 0x4bc4fcb4,
                name: *b"QNAM",
                data: Bytes::new(),
                padding: 0,
            },
            None,
        ),
        (
            "with data",
            vec![
                0x80, 0xcc, 0x00, 0x04, // v=2, p=0, subtype=0, APP, len=4
                0x4b, 0xc4, 0xfc, 0xb4, // ssrc=0x4bc4fcb4
                0x4e, 0x41, 0x4d, 0x45, // name=NAME
                0x41, 0x42, 0x43, 0x44, // data=ABCD
            ],
            ApplicationDefined {
                sub_type: 0,
                ssrc: 0x4bc4fcb4,
                name: *b"NAME",
                data: Bytes::from_static(b"ABCD"),
                padding: 0,
            },
            None,
        ),
        (
            "padded data",
            vec![
                0xa1, 0xcc, 0x00, 0x04, // v=2, p=1, subtype=1, APP, len=4
                0x4b, 0xc4, 0xfc, 0xb4, // ssrc=0x4bc4fcb4
                0x4e, 0x41, 0x4d, 0x45, // name=NAME
                0x41, 0x42, 0x00, 0x02, // data=AB, padding=2
            ],
            ApplicationDefined {
                sub_type: 1,
                ssrc: 0x4bc4fcb4,
                name: *b"NAME",
                data: Bytes::from_static(b"AB"),
                padding: 2,
            },
            None,
        ),
        (
            "name is not ascii",
            vec![
                0x80, 0xcc, 0x00, 0x02, // v=2, p=0, subtype=0, APP, len=2
                0x4b, 0xc4, 0xfc, 0xb4, // ssrc=0x4bc4fcb4
                0x4e, 0xff, 0x4d, 0x45, // name=N\xffME
            ],
            ApplicationDefined {
                sub_type: 0,
                ssrc: 0x4bc4fcb4,
                name: [0x4e, 0xff, 0x4d, 0x45],
                data: Bytes::new(),
                padding: 0,
            },
            None,
        ),
        (
            "missing name",
            vec![
                0x80, 0xcc, 0x00, 0x01, // v=2, p=0, subtype=0, APP, len=1
                0x4b, 0xc4, 0xfc, 0xb4, // ssrc=0x4bc4fcb4
            ],
            ApplicationDefined::new(0, 1, "NAME", Bytes::new()).unwrap(),
            Some(Error::TruncatedPacket),
        ),
        (
            "truncated data",
            vec![
                0x80, 0xcc, 0x00, 0x05, // v=2, p=0, subtype=0, APP, len=5
                0x4b, 0xc4, 0xfc, 0xb4, // ssrc=0x4bc4fcb4
                0x4e, 0x41, 0x4d, 0x45, // name=NAME
                0x41, 0x42, 0x43, 0x44, // data=ABCD
            ],
            ApplicationDefined::new(0, 1, "NAME", Bytes::new()).unwrap(),
            Some(Error::TruncatedPacket),
        ),
    ];

    for (name, data, want, want_error) in tests {
        let mut reader = Reader::new(&data);
        let got = ApplicationDefined::unmarshal(&mut reader);

        assert_eq!(
            got.as_ref().err(),
            want_error.as_ref(),
            "Unmarshal {name}: err = {got:?}, want {want_error:?}"
        );

        if let Ok(app) = got {
            assert_eq!(app, want, "Unmarshal {name}: got {app:?}, want {want:?}");
            assert_eq!(app.marshal().ok().as_deref(), Some(&data[..]), "{name} re-marshal");
        }
    }
}

#[test]
fn test_application_defined_marshal() -> Result<()> {
    let app = ApplicationDefined::new(
        0x1f,
        0x11223344,
        "TEST",
        Bytes::from_static(&[0x01, 0x02, 0x03, 0x04, 0x05]),
    )?;
    assert_eq!(app.padding(), 3);

    let data = app.marshal()?;
    assert_eq!(
        &data[..],
        &[
            0xbf, 0xcc, 0x00, 0x04, // v=2, p=1, subtype=31, APP, len=4
            0x11, 0x22, 0x33, 0x44, // ssrc=0x11223344
            0x54, 0x45, 0x53, 0x54, // name=TEST
            0x01, 0x02, 0x03, 0x04, // data
            0x05, 0x00, 0x00, 0x03, // data, padding=3
        ]
    );

    let mut reader = Reader::new(&data);
    assert_eq!(ApplicationDefined::unmarshal(&mut reader)?, app);

    Ok(())
}

#[test]
fn test_application_defined_validation() -> Result<()> {
    let tests = vec![
        ("short name", 0, "ABC", Error::InvalidName),
        ("long name", 0, "ABCDE", Error::InvalidName),
        ("non ascii name", 0, "ÄBC", Error::InvalidName),
        (
            "subtype overflow",
            32,
            "ABCD",
            Error::InvalidArgument("APP subtype must fit in 5 bits"),
        ),
    ];

    for (name, sub_type, app_name, want_error) in tests {
        let got = ApplicationDefined::new(sub_type, 1, app_name, Bytes::new());
        assert_eq!(got.err(), Some(want_error), "New {name}");
    }

    let mut app = ApplicationDefined::new(0, 1, "ABCD", Bytes::from_static(b"x"))?;
    assert_eq!(app.padding(), 3);
    app.set_data(Bytes::from_static(b"wxyz"));
    assert_eq!(app.padding(), 0);
    assert_eq!(app.header()?.length, 3);
    assert_eq!(app.destination_ssrc(), vec![1]);

    Ok(())
}

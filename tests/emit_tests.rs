use std::io::Write;

use base64::{engine::general_purpose::STANDARD, Engine};
use imagetest::sequence::{decode_put_image, parse_hex_len, LengthPrefixed};
use imagetest::{Config, Emitter, Error, Fixture, Output};
use proptest::prelude::*;

fn image_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file
}

fn emit(config: Config) -> (imagetest::Result<Output>, Vec<u8>) {
    let emitter = Emitter::new(config).unwrap();
    let mut stdout = Vec::new();
    let result = emitter.run(&mut stdout);
    (result, stdout)
}

#[test]
fn test_diagnostic_for_four_byte_image() {
    let file = image_file(&[0x01, 0x02, 0x03, 0x04]);
    let config = Config {
        image_path: file.path().to_path_buf(),
        gate_var: "IMAGETEST_GATE_UNSET".to_string(),
        ..Config::default()
    };

    let (result, stdout) = emit(config);
    assert!(matches!(result.unwrap(), Output::Diagnostic(_)));
    assert_eq!(stdout, b"29 = 4 + 22 + 1 + 2\n");
}

#[test]
fn test_sequence_when_gate_matches() {
    std::env::set_var("IMAGETEST_GATE_SET", "natty");

    let file = image_file(&[0x01, 0x02, 0x03, 0x04]);
    let config = Config {
        image_path: file.path().to_path_buf(),
        gate_var: "IMAGETEST_GATE_SET".to_string(),
        ..Config::default()
    };

    let (result, stdout) = emit(config);
    assert!(matches!(result.unwrap(), Output::Sequence(_)));
    assert_eq!(stdout, b"\x1b{4;36;12{9;image/png{4;\x01\x02\x03\x04}\n");
}

#[test]
fn test_empty_image() {
    let file = image_file(&[]);

    let natty = Config {
        image_path: file.path().to_path_buf(),
        force: true,
        ..Config::default()
    };
    let (_, stdout) = emit(natty);
    assert_eq!(stdout, b"\x1b{4;36;12{9;image/png{0;}\n");

    let notty = Config {
        fixture: Fixture::Notty12x8,
        image_path: file.path().to_path_buf(),
        ..Config::default()
    };
    let (_, stdout) = emit(notty);
    assert_eq!(stdout, "\x1b_[14;12;8#aW1hZ2UvcG5n#\u{9c}\n".as_bytes());
}

#[test]
fn test_missing_file_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    for fixture in [Fixture::Natty, Fixture::Notty32x8] {
        let config = Config {
            fixture,
            image_path: dir.path().join("test.png"),
            force: true,
            ..Config::default()
        };

        let (result, stdout) = emit(config);
        assert!(matches!(result, Err(Error::ImageRead { .. })));
        assert!(stdout.is_empty());
    }
}

#[test]
fn test_mime_encoding_is_deterministic() {
    let file = image_file(b"not really a png");
    let config = Config {
        fixture: Fixture::Notty80x16,
        image_path: file.path().to_path_buf(),
        ..Config::default()
    };

    let (_, first) = emit(config.clone());
    let (_, second) = emit(config);
    assert_eq!(first, second);
    assert!(first.starts_with(b"\x1b_[14;80;16;4#aW1hZ2UvcG5n#"));
}

#[test]
fn test_detect_mime_from_contents() {
    let mut png = Vec::new();
    image::DynamicImage::new_rgb8(2, 2)
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let file = image_file(&png);
    let config = Config {
        fixture: Fixture::Notty32x8,
        image_path: file.path().to_path_buf(),
        mime: "application/octet-stream".to_string(),
        detect_mime: true,
        ..Config::default()
    };

    let (result, _) = emit(config);
    let Ok(Output::Sequence(seq)) = result else {
        panic!("expected a sequence");
    };
    let (_, attachments) = decode_put_image(&seq).unwrap();
    assert_eq!(attachments[0], b"image/png");
    assert_eq!(attachments[1], png);
}

proptest! {
    #[test]
    fn prop_base64_round_trip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let seq = Fixture::Notty32x8.put_image().unwrap().encode("image/png", &data);
        let (header, attachments) = decode_put_image(&seq).unwrap();
        prop_assert_eq!(header, "14;32;8;4");
        prop_assert_eq!(&attachments[1], &data);
        prop_assert_eq!(STANDARD.decode(STANDARD.encode(&data)).unwrap(), data);
    }

    #[test]
    fn prop_hex_length_matches(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let builder = LengthPrefixed::image("image/png");
        let seq = builder.encode(&data);

        let rest = &seq[builder.prefix().len()..];
        let semi = rest.iter().position(|&b| b == b';').unwrap();
        let len = parse_hex_len(std::str::from_utf8(&rest[..semi]).unwrap());
        prop_assert_eq!(len, Some(data.len()));
        prop_assert_eq!(builder.decode_body(&seq), Some(data.as_slice()));
    }

    #[test]
    fn prop_diagnostic_is_consistent(len in 0usize..100_000) {
        let builder = LengthPrefixed::image("image/png");
        let body = vec![0u8; len];
        let diag = builder.diagnostic(&body);

        prop_assert!(diag.is_consistent());
        prop_assert_eq!(diag.total, builder.encode(&body).len());
        prop_assert_eq!(diag.prefix_len, 22);
    }
}

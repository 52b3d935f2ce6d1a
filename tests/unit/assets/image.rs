use base64::Engine as _;

use super::*;

fn payload(bytes: &[u8]) -> String {
    ImageData {
        width: 1,
        height: 1,
        mime: "image/png",
        base64: BASE64_STANDARD.encode(bytes),
    }
    .data_uri()
}

#[test]
fn base64_matches_reference_vectors() {
    let cases: [(&[u8], &str); 8] = [
        (b"", ""),
        (b"f", "Zg=="),
        (b"fo", "Zm8="),
        (b"foo", "Zm9v"),
        (b"foob", "Zm9vYg=="),
        (b"fooba", "Zm9vYmE="),
        (b"foobar", "Zm9vYmFy"),
        (&[0xff, 0xfe, 0xfd], "//79"),
    ];
    for (bytes, expected) in cases {
        assert_eq!(payload(bytes), format!("data:image/png;base64,{expected}"));
    }
}

#[test]
fn pixel_rows_become_an_embeddable_png() {
    let rows = vec![
        vec![Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Rgb::new(0, 0, 255)],
        vec![Rgb::BLACK, Rgb::WHITE, Rgb::BLACK],
    ];
    let img = ImageData::from_rgb_rows(&rows).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(img.mime, "image/png");
    assert!(img.data_uri().starts_with("data:image/png;base64,iVBORw0KGgo"));
}

#[test]
fn encoded_bytes_probe_back_to_the_same_size() {
    let rows = vec![vec![Rgb::WHITE; 5]; 4];
    let png = ImageData::from_rgb_rows(&rows).unwrap();

    let mut bytes = Vec::new();
    image::RgbImage::from_pixel(5, 4, image::Rgb([1, 2, 3]))
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    let probed = ImageData::from_bytes(&bytes).unwrap();
    assert_eq!((probed.width, probed.height), (png.width, png.height));
    assert_eq!(probed.base64, BASE64_STANDARD.encode(&bytes));
    assert_eq!(
        probed.data_uri(),
        format!("data:image/png;base64,{}", BASE64_STANDARD.encode(&bytes))
    );
}

#[test]
fn ragged_and_empty_rows_are_rejected() {
    assert!(ImageData::from_rgb_rows(&[]).is_err());
    let ragged = vec![vec![Rgb::BLACK; 2], vec![Rgb::BLACK; 3]];
    assert!(matches!(
        ImageData::from_rgb_rows(&ragged),
        Err(SceneError::SizeMismatch {
            expected: 2,
            actual: 3
        })
    ));
}

#[test]
fn garbage_bytes_fail_to_probe() {
    assert!(ImageData::from_bytes(b"definitely not an image").is_err());
}

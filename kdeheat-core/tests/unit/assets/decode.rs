use std::io::Cursor;

use super::*;

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let back = decode_rgba(&buf).unwrap();
    assert_eq!(back.dimensions(), (1, 1));
    assert_eq!(back.get_pixel(0, 0).0, [100, 50, 200, 128]);
}

#[test]
fn decode_garbage_fails() {
    assert!(decode_rgba(b"not an image").is_err());
}

#[test]
fn load_missing_file_names_path() {
    let err = load_rgba(Path::new("target/missing/background.png")).unwrap_err();
    assert!(err.to_string().contains("background.png"));
}

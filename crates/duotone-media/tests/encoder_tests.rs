use duotone_media::encoder;
use duotone_media::error::MediaError;
use duotone_test_harness::builders::PixelBufferBuilder;
use duotone_test_harness::fixtures;

#[test]
fn test_save_png_keeps_alpha() {
    let dir = fixtures::fixture_dir();
    let buffer = PixelBufferBuilder::new(4, 4).gradient().build();
    let path = dir.path().join("alpha.png");
    encoder::save_image(&buffer, &path, encoder::DEFAULT_JPEG_QUALITY).unwrap();

    let decoded = duotone_media::decoder::decode_file(&path).unwrap();
    assert_eq!(decoded, buffer);
}

#[test]
fn test_save_without_extension_writes_png() {
    let dir = fixtures::fixture_dir();
    let buffer = PixelBufferBuilder::new(2, 2).build();
    let path = dir.path().join("export");
    encoder::save_image(&buffer, &path, 90).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn test_save_jpeg_uppercase_extension() {
    let dir = fixtures::fixture_dir();
    let buffer = PixelBufferBuilder::new(4, 4).fill([120, 10, 200, 128]).build();
    let path = dir.path().join("photo.JPG");
    encoder::save_image(&buffer, &path, 80).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
}

#[test]
fn test_save_unknown_extension_fails() {
    let dir = fixtures::fixture_dir();
    let buffer = PixelBufferBuilder::new(2, 2).build();
    let err = encoder::save_image(&buffer, &dir.path().join("out.xyz"), 90).unwrap_err();
    assert!(matches!(err, MediaError::Encode { .. }), "{err}");
}

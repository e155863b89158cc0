//! Generated test images decode as 8-bit grayscale with an independent reader.

use image::{ColorType, GenericImageView};
use pixbench::corpus::{self, Pattern, DEFAULT_SEED};
use tempfile::TempDir;

#[test]
fn test_noise_image_decodes() {
    let dir = TempDir::new().unwrap();
    let entry = corpus::generate(dir.path(), 64, Pattern::Noise { seed: DEFAULT_SEED }).unwrap();

    let img = image::open(&entry.path).expect("valid PGM");
    assert_eq!(img.dimensions(), (64, 64));
    assert_eq!(img.color(), ColorType::L8);
    assert_eq!(
        img.as_bytes(),
        corpus::render_pixels(64, Pattern::Noise { seed: DEFAULT_SEED }).as_slice()
    );
}

#[test]
fn test_gradient_image_decodes() {
    let dir = TempDir::new().unwrap();
    let entry = corpus::generate(dir.path(), 300, Pattern::Gradient).unwrap();

    let img = image::open(&entry.path).unwrap().into_luma8();
    assert_eq!(img.dimensions(), (300, 300));
    assert_eq!(img.get_pixel(0, 0)[0], 0);
    assert_eq!(img.get_pixel(10, 5)[0], 15);
    assert_eq!(img.get_pixel(200, 100)[0], 44);
}

#[test]
fn test_existing_image_is_reused() {
    let dir = TempDir::new().unwrap();
    let first = corpus::generate(dir.path(), 32, Pattern::Gradient).unwrap();
    assert!(!first.reused);

    // A different pattern does not overwrite a matching file.
    let second = corpus::generate(dir.path(), 32, Pattern::default()).unwrap();
    assert!(second.reused);
    let img = image::open(&second.path).unwrap().into_luma8();
    assert_eq!(img.get_pixel(31, 31)[0], 62);
}

#![cfg(feature = "render")]

use portfolio::rendering::{
    encode, fallback_data_url, generate_project_images, render_card, ImageFormat, PROJECT_IMAGES,
};
use sha2::{Digest, Sha256};

fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[test]
fn batch_writes_six_jpegs() {
    let dir = tempfile::tempdir().unwrap();
    let paths = generate_project_images(dir.path()).unwrap();
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        ["project1.jpg", "project2.jpg", "project3.jpg", "project4.jpg", "project5.jpg", "project6.jpg"]
    );
    for path in &paths {
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF], "{}", path.display());
    }
}

#[test]
fn cards_are_deterministic() {
    for entry in PROJECT_IMAGES {
        let a = encode(&render_card(entry.title, entry.color).unwrap(), ImageFormat::Png).unwrap();
        let b = encode(&render_card(entry.title, entry.color).unwrap(), ImageFormat::Png).unwrap();
        assert_eq!(digest(&a), digest(&b), "{}", entry.file);
    }
    assert_eq!(
        fallback_data_url("Student System", "#f9ca24").unwrap(),
        fallback_data_url("Student System", "#f9ca24").unwrap()
    );
}

#[test]
fn different_titles_render_differently() {
    let a = render_card("Weather Forecast App", "#45b7d1").unwrap();
    let b = render_card("Personal Portfolio", "#45b7d1").unwrap();
    assert_ne!(digest(a.as_raw()), digest(b.as_raw()));
    // same background away from the text
    assert_eq!(a.get_pixel(20, 580), b.get_pixel(20, 580));
}

#[test]
fn batch_into_missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate_project_images(dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, portfolio::Error::Io(_)));
}

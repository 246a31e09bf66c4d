use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Lay out a small image tree under `root`: two images at the top level, one
/// nested image, and one file the scan policy must ignore.
pub fn create_image_tree(root: &Path) {
    fs::create_dir_all(root).unwrap();

    File::create(root.join("banner.jpg"))
        .unwrap()
        .write_all(b"fake jpg data")
        .unwrap();
    File::create(root.join("logo.png"))
        .unwrap()
        .write_all(b"fake png data")
        .unwrap();
    File::create(root.join("notes.txt"))
        .unwrap()
        .write_all(b"not an image")
        .unwrap();

    let nested = root.join("icons");
    fs::create_dir(&nested).unwrap();
    File::create(nested.join("star.png"))
        .unwrap()
        .write_all(b"nested png data")
        .unwrap();
}

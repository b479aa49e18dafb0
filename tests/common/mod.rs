#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// A small JPEG with a gradient so encoders have something to chew on
pub fn create_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
    .save_with_format(&path, ImageFormat::Jpeg)
    .unwrap();
    path
}

pub fn create_transparent_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba([40, 80, 120, 0]))
        .save_with_format(&path, ImageFormat::Png)
        .unwrap();
    path
}

pub fn create_corrupt_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"not an image at all").unwrap();
    path
}

/// The site layout the blink and optimize commands expect by default
pub fn create_site_layout(root: &Path) -> PathBuf {
    let images = root.join("public").join("images");
    fs::create_dir_all(&images).unwrap();
    create_jpeg(&images, "image1.jpg", 60, 40);
    create_jpeg(&images, "image2.jpg", 60, 40);
    images
}

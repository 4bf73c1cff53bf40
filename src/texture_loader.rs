use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};

use crate::error::{LoadError, SlideError};
use crate::preload::FetchedImage;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>, SlideError> {
    let io_error = |source| SlideError::Io { path: dir_path.to_path_buf(), source };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
            if IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) {
                paths.push(path);
            }
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        Err(SlideError::EmptyDirectory(dir_path.to_path_buf()))
    } else {
        Ok(paths)
    }
}

/// EXIF orientation tag of a JPEG, 1 (normal) when absent or unreadable.
pub fn exif_orientation(bytes: &[u8], extension: &str) -> u16 {
    // Only JPEG carries EXIF reliably
    if extension != "jpg" && extension != "jpeg" {
        return 1;
    }
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) if !values.is_empty() => values[0],
            _ => 1,
        },
        Err(e) => {
            log::debug!("no EXIF orientation: {}", e);
            1
        }
    }
}

/// Decodes fetched bytes and bakes the EXIF rotation into the pixels.
pub fn decode_image(fetched: &FetchedImage) -> Result<Image, LoadError> {
    let extension = fetched.source.extension().unwrap_or_else(|| "jpg".to_string());
    let mut image = Image::load_image_from_mem(&format!(".{}", extension), &fetched.bytes)
        .map_err(|e| LoadError::Decode {
            source_name: fetched.source.key(),
            message: e.to_string(),
        })?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Flipped orientations are drawn as-is.
    match fetched.orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    Ok(image)
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    fetched: &FetchedImage,
) -> Result<Texture2D, LoadError> {
    let image = decode_image(fetched)?;
    let mut texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| LoadError::Texture {
            source_name: fetched.source.key(),
            message: e.to_string(),
        })?;
    texture.set_texture_filter(thread, TextureFilter::TEXTURE_FILTER_BILINEAR);
    Ok(texture)
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("a carousel needs at least one slide")]
    NoSlides,
}

/// Errors while building the slide list.
#[derive(Error, Debug)]
pub enum SlideError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid slide manifest: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("no image files found in directory {0:?}")]
    EmptyDirectory(PathBuf),
}

/// Errors from the image transport.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to download {url}: {source}")]
    Http { url: String, source: ureq::Error },
}

/// Errors while turning fetched bytes into a texture.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to decode image {source_name}: {message}")]
    Decode { source_name: String, message: String },

    #[error("failed to create texture for {source_name}: {message}")]
    Texture { source_name: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SlideError::EmptyDirectory(PathBuf::from("photos"));
        assert!(err.to_string().contains("photos"));

        let err = LoadError::Decode {
            source_name: "a.jpg".to_string(),
            message: "bad header".to_string(),
        };
        assert_eq!(err.to_string(), "failed to decode image a.jpg: bad header");
    }
}

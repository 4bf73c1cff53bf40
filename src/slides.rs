use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SlideError;
use crate::texture_loader::load_sorted_image_paths;

const BUILTIN_MANIFEST: &str = include_str!("../assets/slides.toml");

/// Where a slide's image comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    Url(String),
    Path(PathBuf),
}

impl ImageSource {
    pub fn parse(src: &str) -> Self {
        if src.starts_with("http://") || src.starts_with("https://") {
            ImageSource::Url(src.to_string())
        } else {
            ImageSource::Path(PathBuf::from(src))
        }
    }

    /// Stable string form, used as the preload and texture cache key.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Lowercase file extension, with the query string stripped for URLs.
    pub fn extension(&self) -> Option<String> {
        let name = match self {
            ImageSource::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                path.rsplit('/').next().unwrap_or(path).to_string()
            }
            ImageSource::Path(path) => path.file_name()?.to_string_lossy().into_owned(),
        };
        let (_, ext) = name.rsplit_once('.')?;
        if ext.is_empty() {
            None
        } else {
            Some(ext.to_lowercase())
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Url(url) => f.write_str(url),
            ImageSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub source: ImageSource,
    pub caption_above: String,
    pub caption_below: String,
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    title: Option<String>,
    #[serde(default)]
    slides: Vec<ManifestSlide>,
}

#[derive(Debug, Deserialize)]
struct ManifestSlide {
    src: String,
    #[serde(default)]
    above: String,
    #[serde(default)]
    below: String,
}

/// The ordered slide list plus the page heading.
#[derive(Debug, Clone)]
pub struct SlideDeck {
    pub title: Option<String>,
    pub slides: Vec<Slide>,
}

impl SlideDeck {
    pub fn builtin() -> Result<Self, SlideError> {
        Self::from_toml(BUILTIN_MANIFEST, Path::new("."))
    }

    pub fn from_manifest(path: &Path) -> Result<Self, SlideError> {
        let text = fs::read_to_string(path).map_err(|source| SlideError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // Relative image paths are resolved against the manifest's folder
        let base = path.parent().unwrap_or(Path::new("."));
        Self::from_toml(&text, base)
    }

    pub fn from_toml(text: &str, base: &Path) -> Result<Self, SlideError> {
        let manifest: ManifestFile = toml::from_str(text)?;
        let slides = manifest
            .slides
            .into_iter()
            .map(|s| {
                let source = match ImageSource::parse(&s.src) {
                    ImageSource::Path(p) if p.is_relative() => ImageSource::Path(base.join(p)),
                    other => other,
                };
                Slide { source, caption_above: s.above, caption_below: s.below }
            })
            .collect();
        Ok(Self { title: manifest.title, slides })
    }

    /// Every image in `dir`, sorted by file name, without captions.
    pub fn from_dir(dir: &Path) -> Result<Self, SlideError> {
        let slides = load_sorted_image_paths(dir)?
            .into_iter()
            .map(|path| Slide {
                source: ImageSource::Path(path),
                caption_above: String::new(),
                caption_below: String::new(),
            })
            .collect();
        Ok(Self { title: None, slides })
    }

    /// All captions and the title, for building a font glyph set.
    pub fn all_text(&self) -> String {
        let mut text = self.title.clone().unwrap_or_default();
        for slide in &self.slides {
            text.push_str(&slide.caption_above);
            text.push_str(&slide.caption_below);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sources() {
        assert_eq!(
            ImageSource::parse("https://example.org/a.jpg"),
            ImageSource::Url("https://example.org/a.jpg".to_string())
        );
        assert_eq!(ImageSource::parse("photos/a.jpg"), ImageSource::Path(PathBuf::from("photos/a.jpg")));
    }

    #[test]
    fn extension_ignores_query_and_case() {
        let url = ImageSource::parse("https://example.org/img/Photo.JPG?w=200#x");
        assert_eq!(url.extension().as_deref(), Some("jpg"));

        let path = ImageSource::parse("dir.d/photo.png");
        assert_eq!(path.extension().as_deref(), Some("png"));

        assert_eq!(ImageSource::parse("https://example.org/photo").extension(), None);
        assert_eq!(ImageSource::parse("photo.").extension(), None);
    }

    #[test]
    fn builtin_manifest_loads() {
        let deck = SlideDeck::builtin().unwrap();
        assert_eq!(deck.slides.len(), 5);
        assert!(deck.title.is_some());
        assert!(deck.slides.iter().all(|s| matches!(s.source, ImageSource::Url(_))));
    }

    #[test]
    fn manifest_resolves_relative_paths() {
        let text = r#"
            title = "Hi"

            [[slides]]
            src = "a.jpg"
            above = "top"

            [[slides]]
            src = "/abs/b.png"
            below = "bottom"
        "#;
        let deck = SlideDeck::from_toml(text, Path::new("/photos")).unwrap();
        assert_eq!(deck.title.as_deref(), Some("Hi"));
        assert_eq!(deck.slides[0].source, ImageSource::Path(PathBuf::from("/photos/a.jpg")));
        assert_eq!(deck.slides[0].caption_above, "top");
        assert_eq!(deck.slides[0].caption_below, "");
        assert_eq!(deck.slides[1].source, ImageSource::Path(PathBuf::from("/abs/b.png")));
    }

    #[test]
    fn invalid_manifest_is_an_error() {
        let err = SlideDeck::from_toml("[[slides]]\nabove = 1", Path::new(".")).unwrap_err();
        assert!(matches!(err, SlideError::Manifest(_)));
    }

    #[test]
    fn manifest_file_is_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.toml");
        fs::write(&path, "[[slides]]\nsrc = \"x.jpg\"\n").unwrap();

        let deck = SlideDeck::from_manifest(&path).unwrap();
        assert_eq!(deck.slides[0].source, ImageSource::Path(dir.path().join("x.jpg")));

        let missing = SlideDeck::from_manifest(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(SlideError::Io { .. })));
    }

    #[test]
    fn all_text_collects_captions() {
        let deck = SlideDeck::from_toml(
            "title = \"T\"\n[[slides]]\nsrc = \"a.jpg\"\nabove = \"é\"\nbelow = \"ü\"\n",
            Path::new("."),
        )
        .unwrap();
        assert_eq!(deck.all_text(), "Téü");
    }
}

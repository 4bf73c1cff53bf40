use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crate::carousel::{Carousel, Navigation};
use crate::constants::FETCH_TIMEOUT_SECS;
use crate::error::FetchError;
use crate::slides::{ImageSource, Slide};
use crate::texture_loader::exif_orientation;

/// The "load image by URL" primitive shared by preloading and display.
pub trait ImageTransport: Send + Sync {
    fn fetch(&self, source: &ImageSource) -> Result<Vec<u8>, FetchError>;
}

/// Reads local paths from disk and URLs over HTTP.
#[derive(Debug)]
pub struct HttpOrFileTransport {
    agent: ureq::Agent,
}

impl HttpOrFileTransport {
    /// A stalled request fails after the timeout instead of staying in
    /// flight for the rest of the session.
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self { agent: config.into() }
    }
}

impl Default for HttpOrFileTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(FETCH_TIMEOUT_SECS))
    }
}

impl ImageTransport for HttpOrFileTransport {
    fn fetch(&self, source: &ImageSource) -> Result<Vec<u8>, FetchError> {
        match source {
            ImageSource::Path(path) => fs::read(path).map_err(|source| FetchError::Io {
                path: path.clone(),
                source,
            }),
            ImageSource::Url(url) => {
                let http_error = |source| FetchError::Http { url: url.clone(), source };
                let mut response = self.agent.get(url.as_str()).call().map_err(http_error)?;
                response.body_mut().read_to_vec().map_err(http_error)
            }
        }
    }
}

/// Raw image bytes ready to be decoded on the render thread.
#[derive(Debug)]
pub struct FetchedImage {
    pub source: ImageSource,
    pub bytes: Vec<u8>,
    pub orientation: u16,
}

type FetchResult = (ImageSource, Result<FetchedImage, FetchError>);

/// Best-effort background fetching of the slides around the current one.
///
/// The preloaded set only ever grows. Failed fetches are dropped silently
/// and become eligible again on the next request.
pub struct Preloader {
    transport: Arc<dyn ImageTransport>,
    preloaded: HashSet<String>,
    in_flight: HashSet<String>,
    tx: Sender<FetchResult>,
    rx: Receiver<FetchResult>,
}

impl Preloader {
    pub fn new(transport: Arc<dyn ImageTransport>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            transport,
            preloaded: HashSet::new(),
            in_flight: HashSet::new(),
            tx,
            rx,
        }
    }

    pub fn is_preloaded(&self, source: &ImageSource) -> bool {
        self.preloaded.contains(&source.key())
    }

    pub fn preloaded(&self) -> &HashSet<String> {
        &self.preloaded
    }

    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Starts a fetch for every source that is neither loaded nor in flight.
    /// Returns how many fetches were started.
    pub fn request<'a>(&mut self, sources: impl IntoIterator<Item = &'a ImageSource>) -> usize {
        let mut started = 0;
        for source in sources {
            let key = source.key();
            if self.preloaded.contains(&key) || !self.in_flight.insert(key) {
                continue;
            }
            self.spawn_fetch(source.clone());
            started += 1;
        }
        started
    }

    /// Fetches a source again even though it was preloaded, for when its
    /// texture was released. Does nothing while a fetch for it is in flight.
    pub fn refetch(&mut self, source: &ImageSource) -> bool {
        if !self.in_flight.insert(source.key()) {
            return false;
        }
        self.spawn_fetch(source.clone());
        true
    }

    fn spawn_fetch(&self, source: ImageSource) {
        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = transport.fetch(&source).map(|bytes| {
                let ext = source.extension().unwrap_or_default();
                let orientation = exif_orientation(&bytes, &ext);
                FetchedImage { source: source.clone(), bytes, orientation }
            });
            // Receiver gone means the app is shutting down
            let _ = tx.send((source, result));
        });
    }

    /// Drains finished fetches without blocking. Successful ones are marked
    /// preloaded and returned for texture upload.
    pub fn poll(&mut self) -> Vec<FetchedImage> {
        let mut ready = Vec::new();
        while let Ok((source, result)) = self.rx.try_recv() {
            let key = source.key();
            self.in_flight.remove(&key);
            match result {
                Ok(fetched) => {
                    log::debug!("preloaded {} ({} bytes)", key, fetched.bytes.len());
                    self.preloaded.insert(key);
                    ready.push(fetched);
                }
                Err(e) => log::debug!("preload failed: {}", e),
            }
        }
        ready
    }
}

/// Requests the previous, current and next slides of the carousel.
pub fn preload_window(carousel: &Carousel, slides: &[Slide], preloader: &mut Preloader) -> usize {
    let started = preloader.request(carousel.neighbours().iter().map(|&i| &slides[i].source));
    if started > 0 {
        log::debug!(
            "preloading {} image(s) around slide {}, {} in flight",
            started,
            carousel.current(),
            preloader.pending()
        );
    }
    started
}

/// Index-change hook. A navigation that stays on the same slide requests
/// nothing.
pub fn preload_after(
    navigation: &Navigation,
    carousel: &Carousel,
    slides: &[Slide],
    preloader: &mut Preloader,
) -> usize {
    if !navigation.changed_slide() {
        return 0;
    }
    preload_window(carousel, slides, preloader)
}

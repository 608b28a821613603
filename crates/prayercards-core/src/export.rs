//! Collaborator seams: loading background images and exporting cards
//!
//! The core only ever hands these a url or a [`RenderedCard`]; it does not
//! look inside image data and does not interpret sink results.

use crate::error::{CardError, Result};
use crate::render::RenderedCard;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Raw bytes fetched for a background reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub url: String,
    pub bytes: Vec<u8>,
}

pub trait ImageLoader {
    /// Fetch the image behind `url`, or fail with
    /// [`CardError::ResourceUnavailable`]
    fn load(&self, url: &str) -> Result<ImageData>;
}

/// Loads backgrounds from the local filesystem (plain paths or `file://`).
/// Anything remote is reported as unavailable.
#[derive(Debug, Clone, Default)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    fn load(&self, url: &str) -> Result<ImageData> {
        if url.contains("://") && !url.starts_with("file://") {
            return Err(CardError::ResourceUnavailable(format!(
                "{url}: only local files can be loaded"
            )));
        }

        let path = url.strip_prefix("file://").unwrap_or(url);
        let bytes = fs::read(path)
            .map_err(|e| CardError::ResourceUnavailable(format!("{path}: {e}")))?;

        Ok(ImageData {
            url: url.to_string(),
            bytes,
        })
    }
}

/// Fetches `http://` and `https://` backgrounds over the network and hands
/// every other reference to [`FileImageLoader`]. A background is only
/// unavailable when the fetch itself fails.
#[derive(Clone)]
pub struct HttpImageLoader {
    client: reqwest::blocking::Client,
}

impl HttpImageLoader {
    pub fn new() -> Self {
        Self::with_client(reqwest::blocking::Client::new())
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader for HttpImageLoader {
    fn load(&self, url: &str) -> Result<ImageData> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return FileImageLoader.load(url);
        }

        let unavailable = |reason: String| CardError::ResourceUnavailable(format!("{url}: {reason}"));

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP {status}")));
        }

        let bytes = response.bytes().map_err(|e| unavailable(e.to_string()))?;
        debug!(url, size = bytes.len(), "fetched background");

        Ok(ImageData {
            url: url.to_string(),
            bytes: bytes.to_vec(),
        })
    }
}

/// What a sink reports back after accepting a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    /// Where the artifact ended up, if the sink produced one
    pub location: Option<String>,
}

pub trait ExportSink {
    fn export(&mut self, card: &RenderedCard) -> Result<ExportReceipt>;
}

/// Writes each card's layout as `card-<n>.json` into a directory.
///
/// Existing files are never overwritten: a number that is already taken,
/// by an earlier run or by another writer, is skipped.
pub struct JsonFileSink {
    dir: PathBuf,
    next: usize,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next: 1,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Claim the lowest free `card-<n>.json` at or above the counter
    fn create_next(&mut self) -> Result<(PathBuf, File)> {
        loop {
            let path = self.dir.join(format!("card-{}.json", self.next));
            self.next += 1;

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl ExportSink for JsonFileSink {
    fn export(&mut self, card: &RenderedCard) -> Result<ExportReceipt> {
        let json = card.to_json()?;
        fs::create_dir_all(&self.dir)?;
        let (path, mut file) = self.create_next()?;
        file.write_all(json.as_bytes())?;

        info!(path = %path.display(), "exported card");
        Ok(ExportReceipt {
            location: Some(path.display().to_string()),
        })
    }
}

/// Keeps exported cards in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub cards: Vec<RenderedCard>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExportSink for MemorySink {
    fn export(&mut self, card: &RenderedCard) -> Result<ExportReceipt> {
        self.cards.push(card.clone());
        Ok(ExportReceipt { location: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::Composer;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    /// Answers a single request on localhost and returns its url
    fn serve_once(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 2048];
            let _ = stream.read(&mut request);
            let head = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nContent-Type: image/jpeg\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream.write_all(head.as_bytes()).unwrap();
            stream.write_all(body).unwrap();
        });
        format!("http://{addr}/photos/bg.jpeg")
    }

    fn local_loader() -> HttpImageLoader {
        HttpImageLoader::with_client(
            reqwest::blocking::Client::builder().no_proxy().build().unwrap(),
        )
    }

    #[test]
    fn test_file_loader_reads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bg.jpg");
        fs::write(&path, [1u8, 2, 3]).unwrap();

        let plain = FileImageLoader.load(path.to_str().unwrap()).unwrap();
        assert_eq!(plain.bytes, vec![1, 2, 3]);

        let url = format!("file://{}", path.display());
        assert_eq!(FileImageLoader.load(&url).unwrap().url, url);
    }

    #[test]
    fn test_file_loader_unavailable() {
        for url in ["https://images.pexels.com/photos/1/x.jpeg", "/definitely/not/here.png"] {
            assert!(matches!(
                FileImageLoader.load(url),
                Err(CardError::ResourceUnavailable(_))
            ));
        }
    }

    #[test]
    fn test_http_loader_fetches_remote_background() {
        let url = serve_once("200 OK", b"jpeg");
        let data = local_loader().load(&url).unwrap();
        assert_eq!(data.url, url);
        assert_eq!(data.bytes, b"jpeg".to_vec());
    }

    #[test]
    fn test_http_loader_failed_fetch_is_unavailable() {
        let url = serve_once("404 Not Found", b"");
        assert!(matches!(
            local_loader().load(&url),
            Err(CardError::ResourceUnavailable(_))
        ));
    }

    #[test]
    fn test_http_loader_reads_local_files_too() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bg.png");
        fs::write(&path, [7u8]).unwrap();
        assert_eq!(local_loader().load(path.to_str().unwrap()).unwrap().bytes, vec![7]);
    }

    #[test]
    fn test_remote_background_survives_export() {
        let url = serve_once("200 OK", b"jpeg");
        let mut composer = Composer::new();
        composer.select_background_url(&url);

        let card =
            RenderedCard::render_with(composer.draft(), &local_loader(), "placeholder://bg").unwrap();
        assert_eq!(card.background_url(), Some(url.as_str()));
    }

    #[test]
    fn test_json_sink_numbers_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonFileSink::new(dir.path().join("out"));
        let card = Composer::new().render();

        let first = sink.export(&card).unwrap();
        let second = sink.export(&card).unwrap();
        assert!(first.location.unwrap().ends_with("card-1.json"));
        assert!(second.location.unwrap().ends_with("card-2.json"));

        let written = fs::read_to_string(dir.path().join("out/card-1.json")).unwrap();
        let back: RenderedCard = serde_json::from_str(&written).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn test_json_sink_keeps_existing_cards() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("card-1.json"), "earlier").unwrap();

        let mut sink = JsonFileSink::new(dir.path());
        let receipt = sink.export(&Composer::new().render()).unwrap();
        assert!(receipt.location.unwrap().ends_with("card-2.json"));
        assert_eq!(fs::read_to_string(dir.path().join("card-1.json")).unwrap(), "earlier");
    }

    #[test]
    fn test_json_sinks_sharing_a_dir_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let card = Composer::new().render();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let dir = dir.path().to_path_buf();
                let card = card.clone();
                thread::spawn(move || {
                    let mut sink = JsonFileSink::new(dir);
                    (0..5)
                        .map(|_| sink.export(&card).unwrap().location.unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut locations: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        locations.sort();
        locations.dedup();
        assert_eq!(locations.len(), 20);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 20);
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::new();
        let card = Composer::new().render();
        assert_eq!(sink.export(&card).unwrap(), ExportReceipt { location: None });
        assert_eq!(sink.cards, vec![card]);
    }
}

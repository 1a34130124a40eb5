//! Shared test helpers: an in-memory object store with injectable
//! failures, in-memory zip construction, and a one-shot local validation
//! server.
#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use geovalid_storage::{ObjectStore, StoreError, StoreResult};
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// In-memory [`ObjectStore`] recording every put. Keys ending in one of
/// the configured suffixes fail with an injected error.
pub struct MockStore {
    puts: Mutex<Vec<String>>,
    fail_suffixes: Vec<String>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        MockStore {
            puts: Mutex::new(Vec::new()),
            fail_suffixes: Vec::new(),
            delay: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(suffixes: &[&str]) -> Self {
        let mut store = Self::new();
        store.fail_suffixes = suffixes.iter().map(|s| s.to_string()).collect();
        store
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn put_keys(&self) -> Vec<String> {
        self.puts.lock().unwrap().clone()
    }

    pub fn put_count(&self) -> usize {
        self.puts.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn put(&self, key: &str, _data: Bytes, _content_type: &str) -> StoreResult<()> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.puts.lock().unwrap().push(key.to_string());

        if self.fail_suffixes.iter().any(|s| key.ends_with(s.as_str())) {
            return Err(StoreError::Unknown(format!("injected failure for {}", key)));
        }
        Ok(())
    }

    fn bucket(&self) -> &str {
        "test-bucket"
    }
}

/// Build a ZIP archive in memory from (path, payload) pairs.
pub fn build_zip(entries: &[(&str, &[u8])]) -> Bytes {
    use zip::write::{FileOptions, ZipWriter};

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = FileOptions::default();
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }
    Bytes::from(buffer)
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn parse_content_length(headers: &str) -> usize {
    headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

/// Spawn a one-shot validation server answering the first request with the
/// given status line (e.g. `"200 OK"`) and JSON body. Returns the base URL
/// and a handle resolving to the captured request body.
pub async fn spawn_validator(
    status_line: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find_header_end(&buf) {
                let headers = String::from_utf8_lossy(&buf[..pos]).to_string();
                if buf.len() >= pos + 4 + parse_content_length(&headers) {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let pos = find_header_end(&buf).unwrap();
        String::from_utf8_lossy(&buf[pos + 4..]).to_string()
    });

    (format!("http://{}", addr), handle)
}

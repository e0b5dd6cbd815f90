use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use relsync_fetch::{Error, FetchOptions, FetchPhase, Fetcher, HttpClient, HttpResponse, Progress};
use tempfile::tempdir;

enum Reply {
    Body(Vec<u8>),
    Refused,
    /// Advertises `len` bytes but stops after sending `partial`.
    Truncated { partial: Vec<u8>, len: u64 },
    /// Sends `partial` then fails the read.
    Broken(Vec<u8>),
}

#[derive(Default)]
struct MockClient {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicU32,
    seen_headers: Mutex<Vec<(String, String)>>,
}

impl MockClient {
    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

struct BrokenBody {
    data: io::Cursor<Vec<u8>>,
}

impl Read for BrokenBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
            n => Ok(n),
        }
    }
}

impl HttpClient for MockClient {
    type Error = io::Error;

    fn get(&self, _url: &str, headers: &[(String, String)]) -> io::Result<HttpResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.seen_headers.lock().unwrap() = headers.to_vec();

        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Body(bytes)) => Ok(HttpResponse::from_bytes(bytes)),
            Some(Reply::Truncated { partial, len }) => Ok(HttpResponse {
                content_length: Some(len),
                body: Box::new(io::Cursor::new(partial)),
            }),
            Some(Reply::Broken(partial)) => Ok(HttpResponse {
                content_length: None,
                body: Box::new(BrokenBody {
                    data: io::Cursor::new(partial),
                }),
            }),
            Some(Reply::Refused) | None => Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        }
    }
}

fn options() -> FetchOptions {
    FetchOptions::default().retry_interval(Duration::ZERO)
}

#[test]
fn test_fetch_writes_destination() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("downloads").join("a.zip");
    let client = MockClient::new(vec![Reply::Body(vec![7u8; 20_000])]);

    let fetcher = Fetcher::new(&client, options());
    let written = fetcher.fetch("https://example.com/a.zip", &dest).unwrap();

    assert_eq!(written, 20_000);
    assert_eq!(std::fs::read(&dest).unwrap(), vec![7u8; 20_000]);
    assert!(!dir.path().join("downloads").join("a.zip.part").exists());
    assert_eq!(client.calls(), 1);
}

#[test]
fn test_progress_is_reported_per_chunk() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("a.zip");
    let client = MockClient::new(vec![Reply::Body(vec![1u8; 20_000])]);

    let events: Arc<Mutex<Vec<Progress>>> = Arc::default();
    let sink = Arc::clone(&events);
    let options = options().on_progress(Arc::new(move |p: &Progress| {
        sink.lock().unwrap().push(p.clone());
    }));

    Fetcher::new(&client, options)
        .fetch("https://example.com/a.zip", &dest)
        .unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.first().unwrap().phase, FetchPhase::Connecting);
    assert!(events.last().unwrap().is_completed());

    let downloading: Vec<_> = events
        .iter()
        .filter(|p| p.phase == FetchPhase::Downloading)
        .collect();
    assert_eq!(downloading.len(), 3);
    assert_eq!(downloading[0].bytes_downloaded, 8192);
    assert_eq!(downloading[0].total_bytes, Some(20_000));
    assert_eq!(downloading[2].bytes_downloaded, 20_000);
}

#[test]
fn test_retries_until_success() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("a.zip");
    let client = MockClient::new(vec![
        Reply::Refused,
        Reply::Broken(vec![1u8; 100]),
        Reply::Body(b"payload".to_vec()),
    ]);

    let written = Fetcher::new(&client, options())
        .fetch("https://example.com/a.zip", &dest)
        .unwrap();

    assert_eq!(written, 7);
    assert_eq!(client.calls(), 3);
    assert_eq!(std::fs::read(&dest).unwrap(), b"payload");
}

#[test]
fn test_gives_up_after_max_attempts() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("a.zip");
    let client = MockClient::new(vec![]);

    let err = Fetcher::new(&client, options())
        .fetch("https://example.com/a.zip", &dest)
        .unwrap_err();

    match err {
        Error::MaxAttemptsExceeded { count, last } => {
            assert_eq!(count, 4);
            assert!(matches!(*last, Error::Request { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(client.calls(), 4);
    assert!(!dest.exists());
}

#[test]
fn test_truncated_body_is_retried() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("a.zip");
    let client = MockClient::new(vec![
        Reply::Truncated {
            partial: vec![1u8; 5],
            len: 10,
        },
        Reply::Body(vec![2u8; 10]),
    ]);

    Fetcher::new(&client, options())
        .fetch("https://example.com/a.zip", &dest)
        .unwrap();

    assert_eq!(client.calls(), 2);
    assert_eq!(std::fs::read(&dest).unwrap(), vec![2u8; 10]);
}

#[test]
fn test_write_failure_is_retried() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("a.zip");
    // A directory squatting on the partial path makes every create fail.
    std::fs::create_dir(dir.path().join("a.zip.part")).unwrap();
    let client = MockClient::new((0..4).map(|_| Reply::Body(vec![1u8; 10])).collect());

    let err = Fetcher::new(&client, options())
        .fetch("https://example.com/a.zip", &dest)
        .unwrap_err();

    match err {
        Error::MaxAttemptsExceeded { count, last } => {
            assert_eq!(count, 4);
            assert!(matches!(*last, Error::Write { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(client.calls(), 4);
    assert!(!dest.exists());
}

#[test]
fn test_failed_attempt_leaves_no_partial_file() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("a.zip");
    let client = MockClient::new(vec![Reply::Broken(vec![1u8; 100])]);

    let result = Fetcher::new(&client, options().max_attempts(1))
        .fetch("https://example.com/a.zip", &dest);

    assert!(matches!(
        result,
        Err(Error::MaxAttemptsExceeded { count: 1, .. })
    ));
    assert!(!dest.exists());
    assert!(!dir.path().join("a.zip.part").exists());
}

#[test]
fn test_headers_are_forwarded() {
    let dir = tempdir().unwrap();
    let client = MockClient::new(vec![Reply::Body(vec![0u8; 3])]);
    let options = options().header("Accept", "application/octet-stream");

    Fetcher::new(&client, options)
        .fetch("https://example.com/a.zip", &dir.path().join("a.zip"))
        .unwrap();

    let headers = client.seen_headers.lock().unwrap();
    assert_eq!(
        headers.as_slice(),
        &[("Accept".to_string(), "application/octet-stream".to_string())]
    );
}

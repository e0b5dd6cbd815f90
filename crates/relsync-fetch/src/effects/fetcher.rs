use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::thread;

use tracing::{debug, error, info};

use crate::data::{FetchOptions, FetchPhase, Progress};
use crate::effects::HttpClient;
use crate::error::{Error, Result};

/// Downloads a URL to a file, retrying the whole transfer on failure.
pub struct Fetcher<C> {
    client: C,
    options: FetchOptions,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C, options: FetchOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Download `url` to `destination` and return the number of bytes written.
    ///
    /// Every attempt starts from scratch. Once the attempt budget is spent the
    /// last error is returned inside [`Error::MaxAttemptsExceeded`].
    pub fn fetch(&self, url: &str, destination: &Path) -> Result<u64> {
        let policy = self.options.retry;
        let mut attempt = 0;

        loop {
            if attempt == 0 {
                info!(url, "downloading");
            } else {
                info!(url, "retrying download ({attempt}/{})", policy.max_retries());
            }

            let err = match self.fetch_once(url, destination, attempt) {
                Ok(bytes) => {
                    info!(url, bytes, path = %destination.display(), "download finished");
                    return Ok(bytes);
                }
                Err(err) => err,
            };

            error!(url, attempt, error = %err, "download attempt failed");
            let Some(delay) = policy.delay_after(attempt) else {
                return Err(Error::MaxAttemptsExceeded {
                    count: attempt + 1,
                    last: Box::new(err),
                });
            };

            if !delay.is_zero() {
                info!("waiting {}s before retrying", delay.as_secs());
                thread::sleep(delay);
            }
            attempt += 1;
        }
    }

    fn fetch_once(&self, url: &str, destination: &Path, attempt: u32) -> Result<u64> {
        let part = part_path(destination)?;
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let written = match self.stream_to(url, &part, attempt) {
            Ok(written) => written,
            Err(err) => {
                match fs::remove_file(&part) {
                    Err(e) if e.kind() != io::ErrorKind::NotFound => {
                        debug!(path = %part.display(), error = %e, "could not remove partial download");
                    }
                    _ => {}
                }
                return Err(err);
            }
        };

        self.options.report(Progress {
            bytes_downloaded: written,
            total_bytes: Some(written),
            ..Progress::new(FetchPhase::Committing, attempt)
        });
        fs::rename(&part, destination).map_err(|source| Error::Write {
            path: destination.to_path_buf(),
            source,
        })?;
        self.options.report(Progress {
            bytes_downloaded: written,
            total_bytes: Some(written),
            ..Progress::new(FetchPhase::Completed, attempt)
        });

        Ok(written)
    }

    fn stream_to(&self, url: &str, part: &Path, attempt: u32) -> Result<u64> {
        self.options.report(Progress::new(FetchPhase::Connecting, attempt));

        let response = self
            .client
            .get(url, &self.options.headers)
            .map_err(|e| Error::Request {
                url: url.to_string(),
                source: Box::new(e),
            })?;
        let total = response.content_length;
        let mut body = response.body;
        debug!(url, total_bytes = ?total, "response received");

        let write_err = |source| Error::Write {
            path: part.to_path_buf(),
            source,
        };
        let mut file = File::create(part).map_err(write_err)?;
        let mut buffer = vec![0u8; self.options.chunk_size];
        let mut written = 0u64;

        loop {
            let n = match body.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(Error::Body {
                        url: url.to_string(),
                        source,
                    });
                }
            };
            file.write_all(&buffer[..n]).map_err(write_err)?;
            written += n as u64;

            self.options.report(Progress {
                bytes_downloaded: written,
                total_bytes: total,
                ..Progress::new(FetchPhase::Downloading, attempt)
            });
        }
        file.flush().map_err(write_err)?;

        if let Some(total) = total.filter(|&total| written < total) {
            return Err(Error::Body {
                url: url.to_string(),
                source: io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("body ended after {written} of {total} bytes"),
                ),
            });
        }

        Ok(written)
    }
}

fn part_path(destination: &Path) -> Result<PathBuf> {
    let name = destination
        .file_name()
        .ok_or_else(|| Error::InvalidDestination(destination.to_path_buf()))?;
    let mut part = name.to_os_string();
    part.push(".part");
    Ok(destination.with_file_name(part))
}

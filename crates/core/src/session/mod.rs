//! File analysis session: owns the loaded bytes and their identity, and
//! validates offset/length/window requests before handing spans to the
//! entropy engine.

mod identity;

use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::entropy::{compute_aggregate, compute_series, single_value};
use crate::error::EntropyError;
use crate::model::{FileIdentity, FileKind, Region};
use crate::services::detect::FileTypeDetector;

use identity::IdentityHasher;

const READ_CHUNK: usize = 8192;

/// Parameters of the most recent successful `running_entropy` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningRequest {
    pub offset: usize,
    pub length: usize,
    pub window_size: usize,
}

/// A loaded file and its identity.
///
/// The buffer never changes after construction, so a session can be shared
/// across threads and queried concurrently.
#[derive(Debug)]
pub struct FileSession {
    source: Option<PathBuf>,
    data: Vec<u8>,
    identity: FileIdentity,
    last_request: Mutex<Option<RunningRequest>>,
}

impl FileSession {
    /// Load a file from disk, hashing it in the same pass.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EntropyError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(EntropyError::NotFound(path.to_path_buf()));
        }
        let file = fs::File::open(path)
            .map_err(|source| EntropyError::Io { path: path.to_path_buf(), source })?;
        let mut session = Self::from_reader(BufReader::new(file))
            .map_err(|source| EntropyError::Io { path: path.to_path_buf(), source })?;
        session.source = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            size = session.identity.size,
            sha256 = %session.identity.sha256,
            "loaded input file"
        );
        Ok(session)
    }

    /// Load everything from `reader`; each chunk feeds both digests and the buffer.
    pub fn from_reader(mut reader: impl Read) -> std::io::Result<Self> {
        let mut hasher = IdentityHasher::new();
        let mut data = Vec::new();
        let mut buf = [0u8; READ_CHUNK];

        loop {
            let n = reader.read(&mut buf)?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
            data.extend_from_slice(&buf[..n]);
        }

        Ok(Self::with_identity(data, hasher.finish()))
    }

    /// Wrap an in-memory buffer.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let mut hasher = IdentityHasher::new();
        hasher.update(&data);
        Self::with_identity(data, hasher.finish())
    }

    fn with_identity(data: Vec<u8>, identity: FileIdentity) -> Self {
        Self { source: None, data, identity, last_request: Mutex::new(None) }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn file_size(&self) -> usize {
        self.data.len()
    }

    pub fn identity(&self) -> &FileIdentity {
        &self.identity
    }

    pub fn last_request(&self) -> Option<RunningRequest> {
        *self.last_request.lock()
    }

    /// Classify the buffer with the given detector.
    pub fn detect(&self, detector: &dyn FileTypeDetector) -> FileKind {
        detector.detect(&self.data)
    }

    /// Running entropy over `[offset, offset + length)`.
    ///
    /// `offset` must leave room for one full window before the end of the
    /// file. `length` defaults to the rest of the file. A span shorter than
    /// the window is scored as a single window over its own bytes, and an
    /// empty span yields an empty series.
    pub fn running_entropy(
        &self,
        window_size: usize,
        normalize: bool,
        offset: usize,
        length: Option<usize>,
    ) -> Result<Vec<f64>, EntropyError> {
        let file_size = self.file_size();
        if window_size == 0 {
            return Err(EntropyError::InvalidRange("window size must be positive".into()));
        }
        let max_offset = file_size.checked_sub(window_size);
        if max_offset.map_or(true, |max| offset > max) {
            return Err(EntropyError::InvalidRange(format!(
                "offset {offset} is not valid for file length {file_size} \
                 and window size {window_size}"
            )));
        }

        let length = match length {
            Some(length) => {
                if offset.checked_add(length).map_or(true, |end| end > file_size) {
                    return Err(EntropyError::InvalidRange(format!(
                        "length {length} is not valid for file length {file_size} \
                         and offset {offset}"
                    )));
                }
                length
            }
            None => file_size - offset,
        };

        let span = &self.data[offset..offset + length];
        let series = if span.is_empty() {
            Vec::new()
        } else {
            compute_series(span, window_size.min(span.len()), normalize)?
        };
        *self.last_request.lock() = Some(RunningRequest { offset, length, window_size });
        Ok(series)
    }

    /// Entropy of the entire buffer as one value.
    pub fn whole_file_entropy(&self, normalize: bool) -> Result<f64, EntropyError> {
        compute_aggregate(&self.data, normalize)
    }

    /// Entropy of a region taken as one window.
    ///
    /// A zero-length region has no bytes to score and reports 0.
    pub fn region_entropy(&self, region: &Region, normalize: bool) -> Result<f64, EntropyError> {
        if region.length == 0 {
            if region.offset > self.file_size() {
                return Err(EntropyError::InvalidRange(format!(
                    "region {} at offset {} lies past file length {}",
                    region.name,
                    region.offset,
                    self.file_size()
                )));
            }
            return Ok(0.0);
        }
        let series =
            self.running_entropy(region.length, normalize, region.offset, Some(region.length))?;
        single_value(series)
    }
}

use md5::Md5;
use sha2::{Digest, Sha256};

use crate::model::FileIdentity;

/// Feeds both digests from the same chunks while a file is being loaded.
#[derive(Default)]
pub(crate) struct IdentityHasher {
    md5: Md5,
    sha256: Sha256,
    size: u64,
}

impl IdentityHasher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn update(&mut self, chunk: &[u8]) {
        self.md5.update(chunk);
        self.sha256.update(chunk);
        self.size += chunk.len() as u64;
    }

    pub(crate) fn finish(self) -> FileIdentity {
        FileIdentity {
            size: self.size,
            md5: format!("{:x}", self.md5.finalize()),
            sha256: format!("{:x}", self.sha256.finalize()),
        }
    }
}

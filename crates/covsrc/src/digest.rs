//! Content digests for source files.
//!
//! Digests are SHA-512 over the raw bytes exactly as stored on disk, rendered as
//! 128 uppercase hex characters. No decoding or newline normalization happens
//! before hashing, so every loader reading the same bytes reports the same digest.

use sha2::{Digest, Sha512};
use std::io::{self, Read};

/// Length of a rendered digest in hex characters
pub const DIGEST_HEX_LEN: usize = 128;

/// Incremental SHA-512 hasher producing uppercase hex
#[derive(Debug, Clone, Default)]
pub struct Sha512Digest {
    hasher: Sha512,
}

impl Sha512Digest {
    /// Create an empty hasher
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes into the hash
    pub fn update(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Finish hashing and render the digest
    #[must_use]
    pub fn finalize_hex(self) -> String {
        let result = self.hasher.finalize();
        format!("{result:X}")
    }
}

/// Compute the digest of a byte buffer in one call
#[must_use]
pub fn digest_hex(bytes: &[u8]) -> String {
    let mut digest = Sha512Digest::new();
    digest.update(bytes);
    digest.finalize_hex()
}

/// Reader adapter that hashes everything read through it
#[derive(Debug)]
pub struct DigestReader<R> {
    inner: R,
    digest: Sha512Digest,
}

impl<R: Read> DigestReader<R> {
    /// Wrap a reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            digest: Sha512Digest::new(),
        }
    }

    /// Drain the remaining input into `buf`, hashing it on the way
    pub fn read_all(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.read_to_end(buf)
    }

    /// Finish hashing and render the digest of everything read so far
    #[must_use]
    pub fn hex_digest(self) -> String {
        self.digest.finalize_hex()
    }
}

impl<R: Read> Read for DigestReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.digest.update(&buf[..n]);
        Ok(n)
    }
}

//! Bounded-memory message input for signing and verification.
//!
//! Messages are never materialized: they are pulled in chunks of at most
//! [`CHUNK_SIZE`] bytes and fed straight into the hash.

use std::io::{self, ErrorKind, Read};

use sha2::digest::Digest;
use sha2::{Sha224, Sha256, Sha384, Sha512};

use crate::algorithm::HashId;

/// Largest chunk requested from a reader.
pub const CHUNK_SIZE: usize = 1024;

/// Source of message bytes consumed chunk by chunk.
pub trait ChunkReader {
    /// Fills up to `buf.len()` bytes and returns how many were written; `0` means end of input.
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<R: Read + ?Sized> ChunkReader for R {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.read(buf) {
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }
}

fn digest_chunks<D: Digest, R: ChunkReader + ?Sized>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let read = reader.read_chunk(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hasher.finalize().to_vec())
}

/// Hashes everything `reader` yields with the given primitive.
pub fn hash_reader<R: ChunkReader + ?Sized>(hash: HashId, reader: &mut R) -> io::Result<Vec<u8>> {
    match hash {
        HashId::Sha224 => digest_chunks::<Sha224, R>(reader),
        HashId::Sha256 => digest_chunks::<Sha256, R>(reader),
        HashId::Sha384 => digest_chunks::<Sha384, R>(reader),
        HashId::Sha512 => digest_chunks::<Sha512, R>(reader),
    }
}

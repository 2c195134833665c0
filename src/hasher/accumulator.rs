//! Per-call hash accumulator
//!
//! A [`HashAccumulator`] is the byte sink a key hasher writes into. It is
//! created fresh for every acceptance test and consumed by [`finish`], so no
//! hashing state ever outlives a single key.
//!
//! [`finish`]: HashAccumulator::finish

use super::HashAlgorithm;
use md5::{Digest, Md5};
use sha1::Sha1;
use std::io::{self, Write};

/// Seed of the stable MurmurHash3 variant
const MURMUR3_SEED: u32 = 0;

/// Transient hashing state for one key
///
/// Implements [`io::Write`], so anything that can write to a byte stream can
/// feed it. The `put_*` helpers cover the fixed-width encodings key hashers
/// usually need; multi-byte integers are written little-endian.
pub struct HashAccumulator {
    state: State,
}

enum State {
    /// MurmurHash3 is computed over the whole input at finish time.
    Murmur3_32(Vec<u8>),
    Md5(Md5),
    Sha1(Sha1),
}

impl HashAccumulator {
    pub(crate) fn new(algorithm: HashAlgorithm) -> Self {
        let state = match algorithm {
            HashAlgorithm::Murmur3_32 => State::Murmur3_32(Vec::new()),
            HashAlgorithm::Md5 => State::Md5(Md5::new()),
            HashAlgorithm::Sha1 => State::Sha1(Sha1::new()),
        };
        Self { state }
    }

    /// Algorithm this accumulator computes
    pub fn algorithm(&self) -> HashAlgorithm {
        match self.state {
            State::Murmur3_32(_) => HashAlgorithm::Murmur3_32,
            State::Md5(_) => HashAlgorithm::Md5,
            State::Sha1(_) => HashAlgorithm::Sha1,
        }
    }

    /// Append raw bytes
    #[inline]
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        match &mut self.state {
            State::Murmur3_32(buf) => buf.extend_from_slice(bytes),
            State::Md5(digest) => digest.update(bytes),
            State::Sha1(digest) => digest.update(bytes),
        }
    }

    pub fn put_u8(&mut self, value: u8) {
        self.put_bytes(&[value]);
    }

    /// Append a boolean as a single `0`/`1` byte
    pub fn put_bool(&mut self, value: bool) {
        self.put_u8(value as u8);
    }

    pub fn put_i32(&mut self, value: i32) {
        self.put_bytes(&value.to_le_bytes());
    }

    pub fn put_i64(&mut self, value: i64) {
        self.put_bytes(&value.to_le_bytes());
    }

    /// Append the UTF-8 bytes of a string, without a length prefix
    pub fn put_str(&mut self, value: &str) {
        self.put_bytes(value.as_bytes());
    }

    /// Finish hashing and narrow the result to a signed 32-bit value
    ///
    /// MurmurHash3 already yields 32 bits. For MD5 and SHA-1 the first four
    /// digest bytes are read as a little-endian integer.
    pub fn finish(self) -> io::Result<i32> {
        match self.state {
            State::Murmur3_32(buf) => {
                let hash = murmur3::murmur3_32(&mut buf.as_slice(), MURMUR3_SEED)?;
                Ok(hash as i32)
            }
            State::Md5(digest) => Ok(narrow(&digest.finalize())),
            State::Sha1(digest) => Ok(narrow(&digest.finalize())),
        }
    }
}

fn narrow(digest: &[u8]) -> i32 {
    i32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

impl Write for HashAccumulator {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.put_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(algorithm: HashAlgorithm, bytes: &[u8]) -> i32 {
        let mut acc = algorithm.new_accumulator();
        acc.put_bytes(bytes);
        acc.finish().unwrap()
    }

    #[test]
    fn test_murmur3_known_values() {
        assert_eq!(hash(HashAlgorithm::Murmur3_32, b""), 0);
        assert_eq!(hash(HashAlgorithm::Murmur3_32, b"hello"), 613153351);
        assert_eq!(hash(HashAlgorithm::Murmur3_32, b"row1"), -1126219893);
    }

    #[test]
    fn test_md5_narrowing() {
        // md5("") = d41d8cd9 8f00b204 ...
        assert_eq!(hash(HashAlgorithm::Md5, b""), i32::from_le_bytes([0xd4, 0x1d, 0x8c, 0xd9]));
        assert_eq!(hash(HashAlgorithm::Md5, b""), -645128748);
        assert_eq!(hash(HashAlgorithm::Md5, b"row1"), 1574663398);
    }

    #[test]
    fn test_sha1_narrowing() {
        // sha1("abc") = a9993e36 4706816a ...
        assert_eq!(hash(HashAlgorithm::Sha1, b"abc"), i32::from_le_bytes([0xa9, 0x99, 0x3e, 0x36]));
        assert_eq!(hash(HashAlgorithm::Sha1, b"abc"), 910072233);
    }

    #[test]
    fn test_split_writes_match_single_write() {
        for algorithm in HashAlgorithm::ALL {
            let mut split = algorithm.new_accumulator();
            split.put_bytes(b"ro");
            split.put_bytes(b"");
            split.put_bytes(b"w1");
            assert_eq!(split.finish().unwrap(), hash(algorithm, b"row1"), "{}", algorithm);
        }
    }

    #[test]
    fn test_io_write_feeds_accumulator() {
        let mut acc = HashAlgorithm::Md5.new_accumulator();
        write!(acc, "row{}", 1).unwrap();
        acc.flush().unwrap();
        assert_eq!(acc.finish().unwrap(), hash(HashAlgorithm::Md5, b"row1"));
    }

    #[test]
    fn test_fixed_width_helpers_are_little_endian() {
        let mut acc = HashAlgorithm::Murmur3_32.new_accumulator();
        acc.put_i32(7);
        assert_eq!(acc.finish().unwrap(), 1343918321);

        let mut a = HashAlgorithm::Sha1.new_accumulator();
        a.put_i64(-2);
        a.put_bool(true);
        a.put_u8(9);
        a.put_str("cf");

        let mut expected = Vec::new();
        expected.extend_from_slice(&(-2i64).to_le_bytes());
        expected.extend_from_slice(&[1, 9]);
        expected.extend_from_slice(b"cf");
        assert_eq!(a.finish().unwrap(), hash(HashAlgorithm::Sha1, &expected));
    }

    #[test]
    fn test_accumulator_reports_algorithm() {
        for algorithm in HashAlgorithm::ALL {
            assert_eq!(algorithm.new_accumulator().algorithm(), algorithm);
        }
    }
}

//! Classic non-cryptographic string hashes
//!
//! RS (Robert Sedgewick), JS (Justin Sobel) and SDBM, each in a 32-bit and a
//! 64-bit variant. All arithmetic wraps.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const RS_A: u32 = 63689;
const RS_B: u32 = 378551;
const JS_SEED: u32 = 1315423911;

/// RS hash, 32 bits
pub fn rs(data: &[u8]) -> u32 {
    let mut a = RS_A;
    let mut hash: u32 = 0;
    for &ch in data {
        hash = hash.wrapping_mul(a).wrapping_add(ch as u32);
        a = a.wrapping_mul(RS_B);
    }
    hash
}

/// RS hash, 64 bits
pub fn rs64(data: &[u8]) -> u64 {
    let mut a = RS_A as u64;
    let mut hash: u64 = 0;
    for &ch in data {
        hash = hash.wrapping_mul(a).wrapping_add(ch as u64);
        a = a.wrapping_mul(RS_B as u64);
    }
    hash
}

/// JS hash, 32 bits
pub fn js(data: &[u8]) -> u32 {
    let mut hash = JS_SEED;
    for &b in data {
        hash ^= (hash << 5).wrapping_add(b as u32).wrapping_add(hash >> 2);
    }
    hash
}

/// JS hash, 64 bits
pub fn js64(data: &[u8]) -> u64 {
    let mut hash = JS_SEED as u64;
    for &b in data {
        hash ^= (hash << 5).wrapping_add(b as u64).wrapping_add(hash >> 2);
    }
    hash
}

/// SDBM hash, 32 bits
pub fn sdbm(data: &[u8]) -> u32 {
    let mut hash: u32 = 0;
    for &b in data {
        // hash = 65599 * hash + b
        hash = (b as u32)
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash);
    }
    hash
}

/// SDBM hash, 64 bits
pub fn sdbm64(data: &[u8]) -> u64 {
    let mut hash: u64 = 0;
    for &b in data {
        hash = (b as u64)
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash);
    }
    hash
}

/// Selectable hash algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Rs,
    Rs64,
    Js,
    Js64,
    Sdbm,
    Sdbm64,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown hash algorithm: {0} (expected rs, rs64, js, js64, sdbm or sdbm64)")]
pub struct ParseAlgorithmError(pub String);

impl HashAlgorithm {
    /// Hash `data`, widening 32-bit results to u64
    pub fn hash(self, data: &[u8]) -> u64 {
        match self {
            HashAlgorithm::Rs => rs(data) as u64,
            HashAlgorithm::Rs64 => rs64(data),
            HashAlgorithm::Js => js(data) as u64,
            HashAlgorithm::Js64 => js64(data),
            HashAlgorithm::Sdbm => sdbm(data) as u64,
            HashAlgorithm::Sdbm64 => sdbm64(data),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Rs => "rs",
            HashAlgorithm::Rs64 => "rs64",
            HashAlgorithm::Js => "js",
            HashAlgorithm::Js64 => "js64",
            HashAlgorithm::Sdbm => "sdbm",
            HashAlgorithm::Sdbm64 => "sdbm64",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rs" => Ok(HashAlgorithm::Rs),
            "rs64" => Ok(HashAlgorithm::Rs64),
            "js" => Ok(HashAlgorithm::Js),
            "js64" => Ok(HashAlgorithm::Js64),
            "sdbm" => Ok(HashAlgorithm::Sdbm),
            "sdbm64" => Ok(HashAlgorithm::Sdbm64),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(rs(b""), 0);
        assert_eq!(rs64(b""), 0);
        assert_eq!(js(b""), 1315423911);
        assert_eq!(js64(b""), 1315423911);
        assert_eq!(sdbm(b""), 0);
        assert_eq!(sdbm64(b""), 0);
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(rs(b"a"), 97);
        assert_eq!(js(b"a"), 2935291981);
        assert_eq!(js64(b"a"), 41589997645);
        assert_eq!(sdbm(b"a"), 97);
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(rs(b"hello"), 987012754);
        assert_eq!(rs64(b"hello"), 6334942884161429138);
        assert_eq!(js(b"hello"), 1729687499);
        assert_eq!(js64(b"hello"), 45887748755222475);
        assert_eq!(sdbm(b"hello"), 684824882);
        assert_eq!(sdbm64(b"hello"), 7416051667693574450);
    }

    #[test]
    fn test_wrapping_on_longer_input() {
        assert_eq!(rs(b"stackprobe"), 4134878066);
        assert_eq!(js64(b"stackprobe"), 15632080594183645454);
        assert_eq!(sdbm64(b"stackprobe"), 2674643707008642120);
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("rs".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Rs);
        assert_eq!("SDBM64".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sdbm64);
        assert!("md5".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_algorithm_dispatch_matches_functions() {
        assert_eq!(HashAlgorithm::Js.hash(b"hello"), js(b"hello") as u64);
        assert_eq!(HashAlgorithm::Sdbm64.hash(b"hello"), sdbm64(b"hello"));
        assert_eq!(HashAlgorithm::Rs64.to_string(), "rs64");
    }
}

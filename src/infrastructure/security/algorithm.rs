//! Hash functions available for conversation MACs

use std::fmt;
use std::str::FromStr;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

use crate::domain::DomainError;

/// Hash function used inside the HMAC construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha512_224 => "sha512_224",
            Self::Sha512_256 => "sha512_256",
        }
    }

    /// Compute the MAC of `message` under `key`
    pub fn sign(self, key: &[u8], message: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha224 => sign_with::<Hmac<Sha224>>(key, message),
            Self::Sha256 => sign_with::<Hmac<Sha256>>(key, message),
            Self::Sha384 => sign_with::<Hmac<Sha384>>(key, message),
            Self::Sha512 => sign_with::<Hmac<Sha512>>(key, message),
            Self::Sha512_224 => sign_with::<Hmac<Sha512_224>>(key, message),
            Self::Sha512_256 => sign_with::<Hmac<Sha512_256>>(key, message),
        }
    }

    /// Constant-time check of `tag` against the MAC of `message`
    pub fn verify(self, key: &[u8], message: &[u8], tag: &[u8]) -> bool {
        match self {
            Self::Sha224 => verify_with::<Hmac<Sha224>>(key, message, tag),
            Self::Sha256 => verify_with::<Hmac<Sha256>>(key, message, tag),
            Self::Sha384 => verify_with::<Hmac<Sha384>>(key, message, tag),
            Self::Sha512 => verify_with::<Hmac<Sha512>>(key, message, tag),
            Self::Sha512_224 => verify_with::<Hmac<Sha512_224>>(key, message, tag),
            Self::Sha512_256 => verify_with::<Hmac<Sha512_256>>(key, message, tag),
        }
    }
}

fn keyed<M: Mac + KeyInit>(key: &[u8]) -> M {
    <M as Mac>::new_from_slice(key).expect("HMAC can take key of any size")
}

fn sign_with<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = keyed::<M>(key);
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

fn verify_with<M: Mac + KeyInit>(key: &[u8], message: &[u8], tag: &[u8]) -> bool {
    let mut mac = keyed::<M>(key);
    mac.update(message);
    mac.verify_slice(tag).is_ok()
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = DomainError;

    /// Accepts `sha256`, `SHA-256`, `sha512_256` and similar spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            "sha512224" => Ok(Self::Sha512_224),
            "sha512256" => Ok(Self::Sha512_256),
            _ => Err(DomainError::configuration(format!(
                "Unsupported signature algorithm '{}'",
                s
            ))),
        }
    }
}

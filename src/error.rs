//! Error type shared by the slice-level entry points.

use core::fmt;

/// Errors produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Key length does not match the selected primitive.
    InvalidKeyLength { expected: usize, actual: usize },
    /// Nonce or IV length does not match the selected primitive.
    InvalidNonceLength { expected: usize, actual: usize },
    /// The request would run the block counter past its end.
    KeystreamExhausted,
    /// The operating system entropy source could not be opened.
    EntropyUnavailable { os_error: Option<i32> },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "Invalid key length: expected {expected} bytes, got {actual}")
            }
            Error::InvalidNonceLength { expected, actual } => {
                write!(f, "Invalid nonce length: expected {expected} bytes, got {actual}")
            }
            Error::KeystreamExhausted => {
                write!(f, "Keystream exhausted: block counter would overflow")
            }
            Error::EntropyUnavailable { os_error: Some(code) } => {
                write!(f, "Entropy source unavailable (os error {code})")
            }
            Error::EntropyUnavailable { os_error: None } => {
                write!(f, "Entropy source unavailable")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<cipher::StreamCipherError> for Error {
    fn from(_: cipher::StreamCipherError) -> Self {
        Error::KeystreamExhausted
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::EntropyUnavailable {
            os_error: err.raw_os_error(),
        }
    }
}

/// Checks a caller-supplied key against the length a primitive expects.
pub(crate) fn check_key_len(expected: usize, key: &[u8]) -> Result<(), Error> {
    if key.len() == expected {
        Ok(())
    } else {
        log::debug!("rejecting key of {} bytes, expected {}", key.len(), expected);
        Err(Error::InvalidKeyLength {
            expected,
            actual: key.len(),
        })
    }
}

/// Checks a caller-supplied nonce or IV.
pub(crate) fn check_nonce_len(expected: usize, nonce: &[u8]) -> Result<(), Error> {
    if nonce.len() == expected {
        Ok(())
    } else {
        log::debug!("rejecting nonce of {} bytes, expected {}", nonce.len(), expected);
        Err(Error::InvalidNonceLength {
            expected,
            actual: nonce.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::format;

    #[test]
    fn test_display_invalid_key_length() {
        let err = Error::InvalidKeyLength {
            expected: 16,
            actual: 15,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid key length: expected 16 bytes, got 15"
        );
    }

    #[test]
    fn test_display_invalid_nonce_length() {
        let err = Error::InvalidNonceLength {
            expected: 8,
            actual: 16,
        };
        assert_eq!(
            format!("{}", err),
            "Invalid nonce length: expected 8 bytes, got 16"
        );
    }

    #[test]
    fn test_display_entropy_unavailable() {
        let err = Error::EntropyUnavailable { os_error: Some(2) };
        assert_eq!(format!("{}", err), "Entropy source unavailable (os error 2)");
        let err = Error::EntropyUnavailable { os_error: None };
        assert_eq!(format!("{}", err), "Entropy source unavailable");
    }

    #[test]
    fn test_stream_cipher_error_maps_to_exhausted() {
        let err: Error = cipher::StreamCipherError.into();
        assert_eq!(err, Error::KeystreamExhausted);
    }

    #[test]
    fn test_length_checks() {
        assert_eq!(check_key_len(12, &[0u8; 12]), Ok(()));
        assert_eq!(
            check_key_len(12, &[0u8; 16]),
            Err(Error::InvalidKeyLength {
                expected: 12,
                actual: 16
            })
        );
        assert_eq!(
            check_nonce_len(16, &[0u8; 8]),
            Err(Error::InvalidNonceLength {
                expected: 16,
                actual: 8
            })
        );
    }
}

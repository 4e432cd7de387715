//! Blocking random bytes from the operating system's entropy source.
//!
//! [`SystemRandom`] owns the underlying handle. [`random_bytes`] shares one
//! lazily opened handle across the process.

use crate::error::Error;
use cfg_if::cfg_if;
use cipher::rand_core::{self, CryptoRng, RngCore};
use std::sync::{Mutex, OnceLock};
use std::{io, thread, time::Duration};

/// Pause between attempts after a failed read.
pub const RETRY_DELAY: Duration = Duration::from_millis(10);

/// Reads through the `getrandom` syscall wrapper. Every successful read
/// fills the whole buffer.
#[derive(Debug)]
struct OsEntropy;

impl io::Read for OsEntropy {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        getrandom::getrandom(buf)?;
        Ok(buf.len())
    }
}

#[derive(Debug)]
enum Source {
    #[cfg(unix)]
    Device(std::fs::File),
    Syscall(OsEntropy),
}

/// An open handle on an OS entropy source. A device file is closed when
/// the handle is dropped.
#[derive(Debug)]
pub struct SystemRandom {
    source: Source,
}

cfg_if! {
    if #[cfg(unix)] {
        /// Entropy device opened by [`SystemRandom::open`].
        pub const DEVICE_PATH: &str = "/dev/urandom";

        impl SystemRandom {
            /// Opens the platform's default source, [`DEVICE_PATH`].
            pub fn open() -> Result<Self, Error> {
                Self::open_device()
            }

            /// Opens the entropy device.
            pub fn open_device() -> Result<Self, Error> {
                match std::fs::File::open(DEVICE_PATH) {
                    Ok(device) => {
                        log::trace!("opened entropy source {}", DEVICE_PATH);
                        Ok(Self { source: Source::Device(device) })
                    }
                    Err(err) => {
                        log::error!("cannot open entropy source {}: {}", DEVICE_PATH, err);
                        Err(err.into())
                    }
                }
            }
        }
    } else {
        impl SystemRandom {
            /// Opens the platform's default source, `getrandom`.
            pub fn open() -> Result<Self, Error> {
                Self::open_getrandom()
            }
        }
    }
}

impl SystemRandom {
    /// Uses the `getrandom` syscall wrapper. The source is read once so
    /// that a missing source is reported here rather than on the first fill.
    pub fn open_getrandom() -> Result<Self, Error> {
        let mut source = OsEntropy;
        let mut sample = [0u8; 1];
        match io::Read::read(&mut source, &mut sample) {
            Ok(_) => {
                log::trace!("opened getrandom entropy source");
                Ok(Self {
                    source: Source::Syscall(source),
                })
            }
            Err(err) => {
                log::error!("cannot open getrandom entropy source: {}", err);
                Err(err.into())
            }
        }
    }

    /// Fills `buf` completely, blocking until the source has delivered every
    /// byte.
    pub fn fill(&mut self, buf: &mut [u8]) {
        let reader: &mut dyn io::Read = match &mut self.source {
            #[cfg(unix)]
            Source::Device(device) => device,
            Source::Syscall(syscall) => syscall,
        };
        fill_from(reader, buf);
    }
}

/// Reads from `reader` until `buf` is full. Short reads are continued;
/// failed or empty reads are retried after [`RETRY_DELAY`] with no upper
/// bound.
fn fill_from(reader: &mut dyn io::Read, buf: &mut [u8]) {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                log::warn!("entropy source returned no data, retrying");
                thread::sleep(RETRY_DELAY);
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                log::warn!("entropy read interrupted, retrying");
                thread::sleep(RETRY_DELAY);
            }
            Err(err) => {
                log::warn!("entropy read failed ({}), retrying", err);
                thread::sleep(RETRY_DELAY);
            }
        }
    }
}

impl RngCore for SystemRandom {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill(dest);
        Ok(())
    }
}

impl CryptoRng for SystemRandom {}

type SharedSource = Result<Mutex<SystemRandom>, Error>;

static SHARED: OnceLock<SharedSource> = OnceLock::new();

/// Fills `buf` from the process-wide entropy source, opening it on first use.
///
/// If the source could not be opened, that failure is remembered and every
/// later call returns it as well.
pub fn random_bytes(buf: &mut [u8]) -> Result<(), Error> {
    let shared = SHARED.get_or_init(|| SystemRandom::open().map(Mutex::new));
    let source = shared.as_ref().map_err(|err| *err)?;
    // A panic while holding the lock cannot leave the handle half-updated.
    let mut rng = source.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    rng.fill(buf);
    Ok(())
}

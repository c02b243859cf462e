//! Nonce generation for Kraken API authentication.
//!
//! Kraken requires a strictly increasing nonce for each authenticated request
//! to prevent replay attacks. A repeated or smaller nonce is rejected with
//! `EAPI:Invalid nonce`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for authenticated requests.
///
/// The nonce must be strictly increasing for each request made with one API key.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider based on wall-clock milliseconds since the UNIX epoch.
///
/// Two requests in the same millisecond, or a clock that steps backwards, would
/// otherwise repeat a nonce; the provider hands out `last + 1` in that case.
/// Acquisition is a compare-exchange loop, so one provider can be shared by
/// concurrent tasks.
#[derive(Debug)]
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self {
            last_nonce: AtomicU64::new(0),
        }
    }

    /// Create a provider whose nonces are all greater than `last`.
    ///
    /// Use this when the key was last used with a nonce ahead of this machine's
    /// clock, e.g. by another process or a host with clock skew; Kraken keeps
    /// rejecting anything at or below it.
    pub fn starting_after(last: u64) -> Self {
        Self {
            last_nonce: AtomicU64::new(last),
        }
    }

    /// The last nonce handed out, or the seed if none has been.
    pub fn last(&self) -> u64 {
        self.last_nonce.load(Ordering::SeqCst)
    }

    /// Get current time in milliseconds since UNIX epoch.
    fn current_time_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let time_nonce = Self::current_time_millis();

        loop {
            let last = self.last_nonce.load(Ordering::SeqCst);
            let next = time_nonce.max(last + 1);

            if self
                .last_nonce
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return next;
            }
        }
    }
}

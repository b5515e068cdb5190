//! Day-keyed deterministic randomness.
//!
//! Every plan draws from streams derived from the calendar day, so the same
//! date and selections always reproduce the same plan.
use chrono::NaiveDate;
use hmac::{Hmac, Mac};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;

use crate::constants::{EPOCH_DAY, EPOCH_MONTH, EPOCH_YEAR, ROTATION_LENGTH};

/// Reference date for day indexing.
#[must_use]
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(EPOCH_YEAR, EPOCH_MONTH, EPOCH_DAY).unwrap_or_default()
}

/// Whole days between the epoch and `date`; negative before the epoch.
#[must_use]
pub fn day_index(date: NaiveDate) -> i64 {
    (date - epoch()).num_days()
}

/// Rotation slot `0..6` for the date.
#[must_use]
pub fn rotation_phase(date: NaiveDate) -> usize {
    usize::try_from(day_index(date).rem_euclid(ROTATION_LENGTH)).unwrap_or(0)
}

/// Bit-pattern seed for a day index; negative days map to distinct seeds.
#[must_use]
pub const fn day_seed(day_index: i64) -> u64 {
    u64::from_le_bytes(day_index.to_le_bytes())
}

fn derive_stream_seed(seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac = Hmac::<Sha256>::new_from_slice(&seed.to_le_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Repeatable generator producing floats in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha20Rng,
    draws: u64,
}

impl SeededRandom {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Next value in `[0, 1)` built from the top 53 bits of a draw.
    pub fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
        let bits = self.next_u64() >> 11;
        crate::numbers::u64_to_f64(bits) * SCALE
    }

    /// Index in `0..len` for picking from a slice; `len` must be non-zero.
    pub fn pick_index(&mut self, len: usize) -> usize {
        let scaled = self.next_f64() * crate::numbers::usize_to_f64(len);
        crate::numbers::floor_f64_to_usize(scaled).min(len.saturating_sub(1))
    }

    /// Number of values drawn so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Independent per-purpose streams for one calendar day.
///
/// Separate streams keep the calisthenics shuffle from shifting the
/// finisher draw when the pool changes size.
#[derive(Debug, Clone)]
pub struct DailyStreams {
    pub calisthenics: SeededRandom,
    pub finisher: SeededRandom,
    pub affirmation: SeededRandom,
}

impl DailyStreams {
    #[must_use]
    pub fn for_day(day_index: i64) -> Self {
        let seed = day_seed(day_index);
        Self {
            calisthenics: SeededRandom::new(derive_stream_seed(seed, b"calisthenics")),
            finisher: SeededRandom::new(derive_stream_seed(seed, b"finisher")),
            affirmation: SeededRandom::new(derive_stream_seed(seed, b"affirmation")),
        }
    }

    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        Self::for_day(day_index(date))
    }
}

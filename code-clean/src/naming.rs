use std::time::{SystemTime, UNIX_EPOCH};

/// Number of digits in a generated suffix.
pub const SUFFIX_DIGITS: usize = 4;

/// Supplies the suffix for generated identifiers (`literal_0427`,
/// `NestedFunc8153`). Uniqueness against names already in the file is not
/// checked.
pub trait SuffixSource {
    fn next_suffix(&mut self) -> String;
}

/// Four pairwise-distinct decimal digits drawn from a blake3 stream seeded
/// with the clock.
#[derive(Debug)]
pub struct HashSuffix {
    seed: u128,
    counter: u64,
}

impl HashSuffix {
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u128) -> Self {
        Self { seed, counter: 0 }
    }
}

impl Default for HashSuffix {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixSource for HashSuffix {
    fn next_suffix(&mut self) -> String {
        self.counter += 1;
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seed.to_le_bytes());
        hasher.update(&self.counter.to_le_bytes());
        let hash = hasher.finalize();

        let mut digits = String::with_capacity(SUFFIX_DIGITS);
        // bytes >= 250 would bias the low digits
        let stream = hash.as_bytes().iter().filter(|b| **b < 250).map(|b| char::from(b'0' + b % 10));
        let fallback = '0'..='9';
        for digit in stream.chain(fallback) {
            if !digits.contains(digit) {
                digits.push(digit);
            }
            if digits.len() == SUFFIX_DIGITS {
                break;
            }
        }
        digits
    }
}

/// `0001`, `0002`, ... for reproducible runs and tests.
#[derive(Debug, Default)]
pub struct SequentialSuffix {
    next: u32,
}

impl SequentialSuffix {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SuffixSource for SequentialSuffix {
    fn next_suffix(&mut self) -> String {
        self.next = (self.next + 1) % 10_000;
        format!("{:04}", self.next)
    }
}

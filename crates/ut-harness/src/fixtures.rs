//! Deterministic inputs for tests

use std::path::PathBuf;

/// Seed handed to tests that need reproducible randomness
pub const RANDOM_SEED: u32 = 301;

/// Scratch directory for tests. Always `/tmp`.
pub fn tmp_dir() -> PathBuf {
    PathBuf::from("/tmp")
}

/// Fixed random seed, identical on every run
pub fn random_seed() -> u32 {
    RANDOM_SEED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_fixed() {
        assert_eq!(tmp_dir(), PathBuf::from("/tmp"));
        assert_eq!(random_seed(), 301);
        assert_eq!(random_seed(), random_seed());
    }
}

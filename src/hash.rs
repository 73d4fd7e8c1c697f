use crate::consts::HASH_MULTIPLIER;

/// Maps a key to a bucket number in `0..bucket_count`.
///
/// Polynomial hash over the key's chars, `h = h * 31 + c` in wrapping
/// `u32` arithmetic, reduced modulo the bucket count. No salt, so the same
/// key and count always give the same bucket.
///
/// Panics if `bucket_count` is zero.
pub fn bucket_of(key: &str, bucket_count: usize) -> usize {
    assert!(bucket_count > 0, "bucket_count must be positive");
    let h = key.chars().fold(0_u32, |h, c| {
        h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(c as u32)
    });
    h as usize % bucket_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        // "ab" = 97 * 31 + 98 = 3105
        assert_eq!(bucket_of("ab", 10_000), 3105);
        assert_eq!(bucket_of("ab", 100), 5);
        assert_eq!(bucket_of("", 7), 0);
        assert_eq!(bucket_of("a", 1), 0);
    }

    #[test]
    fn wraps_instead_of_overflowing() {
        let long = "z".repeat(64);
        let b = bucket_of(&long, 13);
        assert!(b < 13);
        assert_eq!(b, bucket_of(&long, 13));
    }

    #[test]
    fn uses_code_points() {
        // 'é' is U+00E9
        assert_eq!(bucket_of("é", 1_000), 0xE9);
    }

    #[test]
    #[should_panic(expected = "bucket_count must be positive")]
    fn zero_buckets_panics() {
        bucket_of("apple", 0);
    }
}

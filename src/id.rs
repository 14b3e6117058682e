//! Unique node identifiers

use rand::Rng;

/// Generate a practically-unique node id.
///
/// Concatenates the base-16 current millisecond timestamp with a base-16
/// random integer in 1000..=9999. There is no counter and no shared state;
/// uniqueness is probabilistic. Ids are scoped to a single document with
/// tens of nodes, so millisecond resolution plus the random suffix is
/// sufficient.
pub fn generate_id() -> String {
    let millis = now_millis();
    let random_part: u32 = rand::rng().random_range(1000..=9999);
    format!("{millis:x}{random_part:x}")
}

/// Current wall-clock time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_generated_id_then_lowercase_hex_only() {
        let id = generate_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn given_generated_id_then_carries_timestamp_prefix() {
        let before = now_millis();
        let id = generate_id();
        let after = now_millis();

        // The random suffix is hex of 1000..=9999, i.e. 3e8..270f (3-4 digits).
        // Strip candidate suffix lengths and check one prefix parses back into
        // the sampled time window.
        let in_window = (3..=4).any(|suffix_len| {
            id.len() > suffix_len
                && i64::from_str_radix(&id[..id.len() - suffix_len], 16)
                    .map(|ms| ms >= before && ms <= after)
                    .unwrap_or(false)
        });
        assert!(in_window, "id {id} does not embed the current timestamp");
    }

    #[test]
    fn given_rapid_calls_then_does_not_block() {
        let ids: Vec<String> = (0..100).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 100);
    }
}

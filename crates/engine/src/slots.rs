//! Fixed-width headline slot filling.

use rsa_core::types::MAX_HEADLINES;

/// Lay out one ad's headlines into exactly [`MAX_HEADLINES`] slots.
///
/// Custom headlines (at most 15, extras dropped from the tail) take the
/// trailing slots; bank headlines fill the leading ones. Either list rotates
/// when it is shorter than its share of slots, so duplicates are possible. An
/// empty bank leaves its slots as empty strings.
pub fn fill_headline_slots(pool: &[String], custom: &[String]) -> Vec<String> {
    let custom = &custom[..custom.len().min(MAX_HEADLINES)];
    let pool_slots = MAX_HEADLINES - custom.len();

    let mut slots = Vec::with_capacity(MAX_HEADLINES);

    for i in 0..pool_slots {
        let headline = if pool.is_empty() {
            String::new()
        } else {
            pool[i % pool.len()].clone()
        };
        slots.push(headline);
    }

    for i in pool_slots..MAX_HEADLINES {
        slots.push(custom[(i - pool_slots) % custom.len()].clone());
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_nothing_yields_fifteen_blanks() {
        let slots = fill_headline_slots(&[], &[]);
        assert_eq!(slots.len(), 15);
        assert!(slots.iter().all(String::is_empty));
    }

    #[test]
    fn test_custom_takes_trailing_slots() {
        let pool = strings(&["P1", "P2", "P3"]);
        let custom = strings(&["C1", "C2"]);
        let slots = fill_headline_slots(&pool, &custom);

        assert_eq!(&slots[13..], ["C1", "C2"]);
        assert_eq!(&slots[..4], ["P1", "P2", "P3", "P1"]);
    }

    #[test]
    fn test_pool_rotates_instead_of_blanking() {
        let slots = fill_headline_slots(&strings(&["Only"]), &[]);
        assert!(slots.iter().all(|s| s == "Only"));
    }

    #[test]
    fn test_empty_pool_leaves_leading_blanks() {
        let slots = fill_headline_slots(&[], &strings(&["Low Price"]));
        assert!(slots[..14].iter().all(String::is_empty));
        assert_eq!(slots[14], "Low Price");
    }

    #[test]
    fn test_custom_overflow_keeps_first_fifteen() {
        let custom: Vec<String> = (1..=20).map(|i| format!("C{i}")).collect();
        let slots = fill_headline_slots(&strings(&["P"]), &custom);
        assert_eq!(slots, custom[..15].to_vec());
    }

    #[test]
    fn test_custom_exactly_fifteen_pushes_out_pool() {
        let custom: Vec<String> = (1..=15).map(|i| format!("C{i}")).collect();
        let slots = fill_headline_slots(&strings(&["P"]), &custom);
        assert!(!slots.contains(&"P".to_string()));
    }

    proptest! {
        #[test]
        fn always_fifteen_and_custom_never_dropped(
            pool in proptest::collection::vec("[a-z]{1,6}", 0..20),
            custom in proptest::collection::vec("[A-Z]{1,6}", 0..15),
        ) {
            let slots = fill_headline_slots(&pool, &custom);
            prop_assert_eq!(slots.len(), MAX_HEADLINES);
            for headline in &custom {
                prop_assert!(slots.contains(headline));
            }
        }
    }
}

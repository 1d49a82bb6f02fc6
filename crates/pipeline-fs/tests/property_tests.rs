use pipeline_fs::{handle_collision, slugify};
use proptest::prelude::*;

/// Expected suffix for the n-th collision (0-based): a..z, then 1, 2, ...
fn nth_suffix(n: usize) -> String {
    if n < 26 {
        ((b'a' + n as u8) as char).to_string()
    } else {
        (n - 25).to_string()
    }
}

proptest! {
    #[test]
    fn slugify_is_idempotent(s in "\\PC*") {
        let once = slugify(&s, 60);
        let twice = slugify(&once, 60);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn slug_charset_and_length(s in "\\PC*", max_len in 4usize..80) {
        let slug = slugify(&s, max_len);

        prop_assert!(!slug.is_empty());
        prop_assert!(slug.len() <= max_len);
        prop_assert!(slug.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
        prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }

    #[test]
    fn collision_returns_next_suffix_in_sequence(existing in 0usize..32) {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("sample.txt");

        if existing > 0 {
            std::fs::write(&target, "").unwrap();
            for n in 0..existing - 1 {
                std::fs::write(dir.path().join(format!("sample-{}.txt", nth_suffix(n))), "").unwrap();
            }
        }

        let free = handle_collision(&target);
        prop_assert!(!free.exists());

        let expected = if existing == 0 {
            target.clone()
        } else {
            dir.path().join(format!("sample-{}.txt", nth_suffix(existing - 1)))
        };
        prop_assert_eq!(free, expected);
    }
}

use tidyfile_core::{
    classify, Classification, CleanConfig, FileEntry, MIN_SPAM_STEM_LEN, SPAM_KEYWORDS,
};

const ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Deterministic pseudo-random alphanumeric stem of `len` characters.
fn alnum_stem(seed: usize, len: usize) -> String {
    let mut state = (seed as u64).wrapping_mul(2654435761).wrapping_add(1);
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ALNUM[(state >> 33) as usize % ALNUM.len()] as char
        })
        .collect()
}

fn contains_keyword(stem: &str) -> bool {
    let lowered = stem.to_lowercase();
    SPAM_KEYWORDS.iter().any(|k| lowered.contains(k))
}

#[test]
fn test_short_stems_are_never_spam() {
    for len in 0..=MIN_SPAM_STEM_LEN {
        for seed in 0..50 {
            let name = format!("{}.dat", alnum_stem(seed, len));
            assert_eq!(classify(&name), Classification::NotSpam, "{name}");
        }
    }
}

#[test]
fn test_long_alnum_stems_without_keywords_are_spam() {
    for len in (MIN_SPAM_STEM_LEN + 1)..24 {
        for seed in 0..50 {
            let stem = alnum_stem(seed, len);
            if contains_keyword(&stem) {
                continue;
            }
            assert_eq!(classify(&format!("{stem}.bin")), Classification::Spam, "{stem}");
            assert_eq!(classify(&stem), Classification::Spam, "{stem}");
        }
    }
}

#[test]
fn test_keyword_anywhere_makes_not_spam() {
    for keyword in SPAM_KEYWORDS {
        for (seed, upper) in [(1, false), (2, true), (3, false)] {
            let keyword = if upper {
                keyword.to_uppercase()
            } else {
                keyword.to_string()
            };
            let prefix = alnum_stem(seed, 5);
            let suffix = alnum_stem(seed + 100, 4);
            let name = format!("{prefix}{keyword}{suffix}.txt");
            assert_eq!(classify(&name), Classification::NotSpam, "{name}");
        }
    }
}

#[test]
fn test_any_non_alnum_character_makes_not_spam() {
    for bad in ['_', '-', ' ', '.', '(', '~', 'é', 'ł', '日'] {
        for len in [4, 9, 20, 40] {
            let stem = alnum_stem(len, len);
            let (head, tail) = stem.split_at(len / 2);
            let name = format!("{head}{bad}{tail}.dat");
            assert_eq!(classify(&name), Classification::NotSpam, "{name}");
        }
    }
}

#[test]
fn test_only_last_extension_is_removed() {
    assert_eq!(classify("qwertyuiop.tar.gz"), Classification::NotSpam);
    assert_eq!(classify("qwertyuiop.gz"), Classification::Spam);
    assert_eq!(classify("qwertyuiop."), Classification::Spam);
}

#[test]
fn test_file_entry_under_config_source() {
    let config = CleanConfig::new("/data/in", "/data/out");
    let entry = FileEntry::new(config.source.join("a").join("xk2jf93ald.dat"), 2);
    assert_eq!(entry.name.as_str(), "xk2jf93ald.dat");
    assert!(entry.classify().is_spam());
}

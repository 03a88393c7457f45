//! Approximate substring search for the `~~` operator.
//!
//! A needle matches when some window of the haystack, starting anywhere a
//! full needle still fits, is within a small edit distance of it. The
//! allowed distance grows by one for every ten characters of needle.

/// Maximum edit distance accepted for a needle of `len` characters.
pub fn threshold(len: usize) -> usize {
    if len < 10 {
        1
    } else {
        len / 10 + 1
    }
}

/// Returns true if `needle` approximately occurs in `haystack`.
///
/// Both strings are expected to be normalized already.
pub fn fuzzy_match(haystack: &str, needle: &str) -> bool {
    let needle: Vec<char> = needle.chars().collect();
    if needle.len() <= 1 {
        return true;
    }
    let haystack: Vec<char> = haystack.chars().collect();
    if needle.len() > haystack.len() {
        return false;
    }
    if contains(&haystack, &needle) {
        return true;
    }

    let max_distance = threshold(needle.len());
    let mut row: Vec<usize> = Vec::with_capacity(needle.len() + 1);
    (0..=haystack.len() - needle.len())
        .any(|start| within_distance(&haystack[start..], &needle, max_distance, &mut row))
}

fn contains(haystack: &[char], needle: &[char]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Levenshtein distance between `needle` and the growing prefixes of
/// `suffix`, one haystack character per row. Stops at the first prefix
/// within `max_distance`, or once no longer prefix can get there.
fn within_distance(suffix: &[char], needle: &[char], max_distance: usize, row: &mut Vec<usize>) -> bool {
    row.clear();
    row.extend(0..=needle.len());

    for &hay in suffix {
        let mut diagonal = row[0];
        row[0] += 1;
        for (j, &ch) in needle.iter().enumerate() {
            let substitution = diagonal + usize::from(ch != hay);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
        if row[needle.len()] <= max_distance {
            return true;
        }
        if row.iter().all(|&cost| cost > max_distance) {
            return false;
        }
    }
    false
}

//! Hint cipher.
//!
//! Hints on detail pages are obscured with a fixed letter-pair swap (a↔n,
//! b↔o, …, m↔z). The table is its own inverse, so the same function encodes
//! and decodes.

/// Each pair swaps in both directions.
const SWAP_PAIRS: [(char, char); 13] = [
    ('a', 'n'),
    ('b', 'o'),
    ('c', 'p'),
    ('d', 'q'),
    ('e', 'r'),
    ('f', 's'),
    ('g', 't'),
    ('h', 'u'),
    ('i', 'v'),
    ('j', 'w'),
    ('k', 'x'),
    ('l', 'y'),
    ('m', 'z'),
];

/// Looks up the substitute for a lower-case character. Characters outside
/// the table are returned unchanged.
fn swap(c: char) -> char {
    SWAP_PAIRS
        .iter()
        .find_map(|&(a, b)| {
            if c == a {
                Some(b)
            } else if c == b {
                Some(a)
            } else {
                None
            }
        })
        .unwrap_or(c)
}

/// Decodes a hint: lower-cases every character, then swaps letters through
/// the table. Digits, whitespace and punctuation pass through.
///
/// A character whose lower case is several characters (`İ` → `i̇`) is
/// emitted lower-cased but unswapped.
#[must_use]
pub fn decode_hint(hint: &str) -> String {
    let mut decoded = String::with_capacity(hint.len());
    for c in hint.chars() {
        let mut lower = c.to_lowercase();
        match (lower.next(), lower.next()) {
            (Some(single), None) => decoded.push(swap(single)),
            (Some(first), Some(second)) => {
                decoded.push(first);
                decoded.push(second);
                decoded.extend(lower);
            }
            (None, _) => decoded.push(c),
        }
    }
    decoded
}

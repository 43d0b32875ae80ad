//! Spell checking using Levenshtein distance
//!
//! This module is used to suggest a known command name when the parser meets
//! an unknown one. The [closest_words] function accepts a word and a dictionary
//! of valid words and returns the dictionary words within a maximum
//! [Levenshtein distance](https://en.wikipedia.org/wiki/Levenshtein_distance)
//! of the word, closest first.
//!
//! ## Implementation notes
//!
//! Let `n = a.len()` and `m = b.len()` and consider the `(n+1) x (m+1)` matrix `X`
//! where `X[i][j]` is the distance between `a[:i]` and `b[:j]`.
//! The recursive relation is:
//!
//! ```text
//! X[i][j] = {
//!     X[i-1][j-1] if a[i] == b[j]
//!     1 + min(X[i-1][j], X[i][j-1], X[i-1][j-1]) otherwise
//! }
//! ```
//!
//! Row `i` depends only on row `i-1`, so only two rows are kept in memory.

/// Returns the Levenshtein distance between two strings.
///
/// The distance is computed over Unicode scalar values, not bytes.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current: Vec<usize> = vec![0; b.len() + 1];
    for (i, a_i) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_j) in b.iter().enumerate() {
            current[j + 1] = if a_i == b_j {
                previous[j]
            } else {
                1 + std::cmp::min(previous[j], std::cmp::min(previous[j + 1], current[j]))
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Find words in the provided dictionary that are close to the search word.
///
/// Only words at distance at most `max_distance` are returned.
/// The result is sorted by distance; ties keep dictionary order.
pub fn closest_words<'a, I>(dictionary: I, word: &str, max_distance: usize) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut comparisons: Vec<(usize, &'a str)> = dictionary
        .into_iter()
        .map(|valid_word| (levenshtein_distance(word, valid_word), valid_word))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    comparisons.sort_by_key(|(distance, _)| *distance);
    comparisons.into_iter().map(|(_, w)| w).collect()
}

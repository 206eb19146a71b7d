//! Deterministic match schedule for a tournament
//!
//! A tournament plays every multiset of three roster slots exactly once:
//! all `(i, j, k)` with `i <= j <= k`, in lexicographic order. Repeats are
//! intended, so a strategy also meets copies of itself.

/// Roster slots for seats A, B and C of one match
pub type Triple = [usize; 3];

/// Total number of matches for `n` roster slots: C(n+2, 3)
pub fn calculate_match_count(n: usize) -> usize {
    n * (n + 1) * (n + 2) / 6
}

/// Number of seats a single slot fills over a whole tournament.
///
/// Counted with multiplicity, so `(s, s, k)` contributes two. Every slot
/// gets the same share: `3 * C(n+2, 3) / n = (n+1)(n+2)/2`.
pub fn appearances_per_slot(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (n + 1) * (n + 2) / 2
}

/// Lazily enumerate the schedule in play order
pub fn triples(n: usize) -> impl Iterator<Item = Triple> {
    (0..n).flat_map(move |i| (i..n).flat_map(move |j| (j..n).map(move |k| [i, j, k])))
}

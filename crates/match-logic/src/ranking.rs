//! Final standings of a tournament

use serde::Serialize;

/// Roster slots ordered from highest to lowest total score
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ranking {
    order: Vec<usize>,
}

impl Ranking {
    /// Slots in finishing order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// 0-based finishing position of `slot`
    pub fn position_of(&self, slot: usize) -> Option<usize> {
        self.order.iter().position(|s| *s == slot)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Rank slots by total score, where `totals[slot]` is that slot's total.
///
/// Insertion sort, moving a slot up only past strictly lower totals, so
/// equal totals keep roster order (lower slot first).
pub fn rank(totals: &[f64]) -> Ranking {
    let mut order: Vec<usize> = Vec::with_capacity(totals.len());

    for slot in 0..totals.len() {
        let mut pos = order.len();
        while pos > 0 && totals[slot] > totals[order[pos - 1]] {
            pos -= 1;
        }
        order.insert(pos, slot);
    }

    Ranking { order }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_descending_order() {
        let ranking = rank(&[1.0, 5.0, 3.0]);
        assert_eq!(ranking.order(), &[1, 2, 0]);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let ranking = rank(&[10.0, 10.0, 5.0]);
        assert_eq!(ranking.order(), &[0, 1, 2]);

        let ranking = rank(&[5.0, 10.0, 10.0, 10.0]);
        assert_eq!(ranking.order(), &[1, 2, 3, 0]);
    }

    #[test]
    fn test_position_of() {
        let ranking = rank(&[2.0, 9.0, 4.0]);
        assert_eq!(ranking.position_of(1), Some(0));
        assert_eq!(ranking.position_of(2), Some(1));
        assert_eq!(ranking.position_of(0), Some(2));
        assert_eq!(ranking.position_of(3), None);
    }

    #[test]
    fn test_empty() {
        let ranking = rank(&[]);
        assert!(ranking.is_empty());
        assert_eq!(ranking.len(), 0);
    }

    proptest! {
        #[test]
        fn prop_rank_is_stable_descending(totals in prop::collection::vec(0u8..6, 0..40)) {
            // Small integer range forces plenty of ties
            let totals: Vec<f64> = totals.into_iter().map(f64::from).collect();
            let ranking = rank(&totals);

            let mut expected: Vec<usize> = (0..totals.len()).collect();
            expected.sort_by(|a, b| totals[*b].partial_cmp(&totals[*a]).unwrap());
            prop_assert_eq!(ranking.order(), expected.as_slice());
        }

        #[test]
        fn prop_rank_is_idempotent(totals in prop::collection::vec(0u8..6, 0..40)) {
            let totals: Vec<f64> = totals.into_iter().map(f64::from).collect();
            let ranking = rank(&totals);

            // Re-rank the already sorted totals
            let sorted: Vec<f64> = ranking.order().iter().map(|s| totals[*s]).collect();
            let again = rank(&sorted);
            let identity: Vec<usize> = (0..sorted.len()).collect();
            prop_assert_eq!(again.order(), identity.as_slice());
        }
    }
}

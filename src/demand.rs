//! How many cells each letter needs at minimum.
//!
//! A word that uses a letter three times needs three distinct cells holding that
//! letter, because a traced path never revisits a cell. Across a word set the
//! requirement for a letter is the largest count found in any single word; other
//! words can reuse those cells.

use crate::rune::ALPHABET_SIZE;
use std::collections::{BTreeMap, HashMap};

/// Minimum concurrent occurrences required per letter.
///
/// The result is ordered by letter so graph construction is deterministic.
pub fn rune_demand<I, S>(words: I) -> BTreeMap<char, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut demand: BTreeMap<char, usize> = BTreeMap::new();
    let mut counts: HashMap<char, usize> = HashMap::with_capacity(ALPHABET_SIZE);

    for word in words {
        counts.clear();
        for c in word.as_ref().chars() {
            *counts.entry(c).or_default() += 1;
        }
        for (&c, &n) in &counts {
            let required = demand.entry(c).or_default();
            *required = (*required).max(n);
        }
    }

    demand
}

/// Sum of all pool sizes, i.e. the number of cells the letters need at minimum.
pub(crate) fn total_capacity(capacities: &BTreeMap<char, usize>) -> usize {
    capacities.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demand_single_word() {
        let demand = rune_demand(["BANANA"]);
        assert_eq!(demand, BTreeMap::from([('A', 3), ('B', 1), ('N', 2)]));
    }

    #[test]
    fn test_demand_takes_max_not_sum() {
        let demand = rune_demand(["AAB", "ABA", "BAB"]);
        assert_eq!(demand[&'A'], 2);
        assert_eq!(demand[&'B'], 2);
    }

    #[test]
    fn test_demand_triple_letter() {
        let demand = rune_demand(["AAA"]);
        assert_eq!(demand, BTreeMap::from([('A', 3)]));
        assert_eq!(total_capacity(&demand), 3);
    }

    #[test]
    fn test_demand_empty() {
        let demand = rune_demand(Vec::<&str>::new());
        assert!(demand.is_empty());
        assert_eq!(total_capacity(&demand), 0);
    }

    #[test]
    fn test_demand_shared_letters() {
        let demand = rune_demand(["CAT", "CAR"]);
        assert_eq!(demand, BTreeMap::from([('A', 1), ('C', 1), ('R', 1), ('T', 1)]));
    }
}

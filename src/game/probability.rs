//! Head-to-Head Probabilities
//!
//! Exact win/tie/loss counts over the 6x6 face cross product, the full
//! pairwise matrix for a catalog, and detection of non-transitive cycles.
//! Shown to the user on request; the automated opponent never consults it.

use std::fmt;

use crate::game::dice::{DiceCatalog, Die, FACES};

/// Ordered face pairs compared for one matchup.
pub const PAIRS: u32 = (FACES * FACES) as u32;

/// Exact outcome counts of die A against die B over all [`PAIRS`] face pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Matchup {
    /// Pairs where A shows the higher face.
    pub wins: u32,
    /// Pairs with equal faces.
    pub ties: u32,
    /// Pairs where B shows the higher face.
    pub losses: u32,
}

impl Matchup {
    /// Compare `a` against `b`.
    pub fn between(a: &Die, b: &Die) -> Self {
        let mut matchup = Self { wins: 0, ties: 0, losses: 0 };
        for &x in a.faces() {
            for &y in b.faces() {
                match x.cmp(&y) {
                    std::cmp::Ordering::Greater => matchup.wins += 1,
                    std::cmp::Ordering::Equal => matchup.ties += 1,
                    std::cmp::Ordering::Less => matchup.losses += 1,
                }
            }
        }
        matchup
    }

    /// The same matchup seen from B's side.
    pub fn reversed(self) -> Self {
        Self {
            wins: self.losses,
            ties: self.ties,
            losses: self.wins,
        }
    }

    /// P(A > B).
    pub fn win_probability(&self) -> f64 {
        self.wins as f64 / PAIRS as f64
    }

    /// P(A == B).
    pub fn tie_probability(&self) -> f64 {
        self.ties as f64 / PAIRS as f64
    }

    /// Whether A beats B with probability strictly above 1/2.
    pub fn dominates(&self) -> bool {
        self.wins * 2 > PAIRS
    }
}

impl fmt::Display for Matchup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.win_probability())
    }
}

/// Pairwise matchups for every ordered pair of distinct dice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbabilityMatrix {
    cells: Vec<Vec<Option<Matchup>>>,
}

impl ProbabilityMatrix {
    /// Compute the matrix. Diagonal cells are None.
    pub fn compute(catalog: &DiceCatalog) -> Self {
        let cells = catalog
            .iter()
            .enumerate()
            .map(|(i, a)| {
                catalog
                    .iter()
                    .enumerate()
                    .map(|(j, b)| (i != j).then(|| Matchup::between(a, b)))
                    .collect()
            })
            .collect();
        Self { cells }
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Matchup of die `row` against die `col`; None on the diagonal or out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Matchup> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Whether die `a` beats die `b` with probability above 1/2.
    pub fn beats(&self, a: usize, b: usize) -> bool {
        self.get(a, b).map_or(false, |m| m.dominates())
    }

    /// A cycle of strict dominance, rotated to start at its smallest index.
    ///
    /// For `[a, b, c]` die a beats b, b beats c and c beats a, each with
    /// probability above 1/2. None if the dominance relation is acyclic.
    ///
    /// Depth-first search with three-colour marking: a back edge to a die
    /// still on the stack closes a cycle. Each die is expanded once, so the
    /// search is quadratic in the number of dice.
    pub fn non_transitive_cycle(&self) -> Option<Vec<usize>> {
        let n = self.size();
        let mut marks = vec![Mark::Unvisited; n];
        // (die, next candidate successor)
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for root in 0..n {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::OnStack;
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let die = frame.0;
                let Some(next) = (frame.1..n).find(|&j| self.beats(die, j)) else {
                    marks[die] = Mark::Done;
                    stack.pop();
                    continue;
                };
                frame.1 = next + 1;

                match marks[next] {
                    Mark::Unvisited => {
                        marks[next] = Mark::OnStack;
                        stack.push((next, 0));
                    }
                    Mark::OnStack => {
                        let from = stack.iter().position(|&(d, _)| d == next)?;
                        let mut cycle: Vec<usize> = stack[from..].iter().map(|&(d, _)| d).collect();
                        let smallest = (0..cycle.len()).min_by_key(|&i| cycle[i]).unwrap_or(0);
                        cycle.rotate_left(smallest);
                        return Some(cycle);
                    }
                    Mark::Done => {}
                }
            }
        }
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dice::tests::cycle_catalog;
    use proptest::prelude::*;

    fn die(faces: [u8; FACES]) -> Die {
        Die::from_faces(faces).unwrap()
    }

    #[test]
    fn test_matchup_counts() {
        let a = die([2, 2, 4, 4, 9, 9]);
        let b = die([1, 1, 6, 6, 8, 8]);
        let m = Matchup::between(&a, &b);

        assert_eq!(m, Matchup { wins: 20, ties: 0, losses: 16 });
        assert_eq!(m.reversed(), Matchup::between(&b, &a));
        assert!(m.dominates());
        assert_eq!(m.to_string(), "0.56");
    }

    #[test]
    fn test_ties_count_for_neither() {
        let a = die([1, 2, 3, 4, 5, 6]);
        let m = Matchup::between(&a, &a);
        assert_eq!(m.ties, 6);
        assert_eq!(m.wins, m.losses);
        assert_eq!(m.wins, 15);
        assert!(!m.dominates());
    }

    #[test]
    fn test_matrix_diagonal_blank() {
        let matrix = ProbabilityMatrix::compute(&cycle_catalog());
        assert_eq!(matrix.size(), 3);
        for i in 0..3 {
            assert!(matrix.get(i, i).is_none());
        }
        assert!(matrix.get(0, 3).is_none());
        assert_eq!(matrix.get(0, 1).unwrap().wins, 20);
        assert_eq!(matrix.get(1, 0).unwrap().wins, 16);
    }

    #[test]
    fn test_reports_non_transitive_cycle() {
        let matrix = ProbabilityMatrix::compute(&cycle_catalog());

        assert!(matrix.get(0, 1).unwrap().dominates());
        assert!(matrix.get(1, 2).unwrap().dominates());
        assert!(matrix.get(2, 0).unwrap().dominates());
        assert_eq!(matrix.non_transitive_cycle(), Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_cycle_in_reverse_order() {
        let catalog = DiceCatalog::parse(&[
            "3,3,5,5,7,7",
            "1,1,6,6,8,8",
            "2,2,4,4,9,9",
        ])
        .unwrap();
        let matrix = ProbabilityMatrix::compute(&catalog);
        // 2 > 1 > 0 > 2, reported from index 0
        assert_eq!(matrix.non_transitive_cycle(), Some(vec![0, 2, 1]));
    }

    #[test]
    fn test_transitive_catalog_has_no_cycle() {
        let catalog = DiceCatalog::parse(&[
            "1,1,1,1,1,1",
            "2,2,2,2,2,2",
            "3,3,3,3,3,3",
            "3,3,3,3,3,3",
        ])
        .unwrap();
        let matrix = ProbabilityMatrix::compute(&catalog);
        assert_eq!(matrix.non_transitive_cycle(), None);
    }

    fn assert_is_cycle(matrix: &ProbabilityMatrix, cycle: &[usize]) {
        assert!(cycle.len() >= 3);
        for (k, &a) in cycle.iter().enumerate() {
            let b = cycle[(k + 1) % cycle.len()];
            assert!(matrix.beats(a, b), "die {} does not beat die {}", a, b);
        }
    }

    #[test]
    fn test_cycle_search_scales_to_large_catalogs() {
        // Six constant dice per level 9..0: a strict total order, so no cycle.
        let levels: Vec<String> = (0..=9u8)
            .rev()
            .flat_map(|v| std::iter::repeat(format!("{v},{v},{v},{v},{v},{v}")).take(6))
            .collect();
        assert_eq!(levels.len(), 60);
        let catalog = DiceCatalog::parse(&levels).unwrap();
        let matrix = ProbabilityMatrix::compute(&catalog);

        let started = std::time::Instant::now();
        assert_eq!(matrix.non_transitive_cycle(), None);
        assert!(started.elapsed() < std::time::Duration::from_secs(1));

        // The same ladder with a non-transitive trio appended still reports a cycle.
        let mut with_cycle = levels.clone();
        with_cycle.extend(["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"].map(String::from));
        let matrix = ProbabilityMatrix::compute(&DiceCatalog::parse(&with_cycle).unwrap());
        let cycle = matrix.non_transitive_cycle().unwrap();
        assert_is_cycle(&matrix, &cycle);
        assert_eq!(cycle.iter().min(), cycle.first());
    }

    proptest! {
        #[test]
        fn prop_probabilities_sum_to_one(
            a in proptest::array::uniform6(0u8..=9),
            b in proptest::array::uniform6(0u8..=9),
        ) {
            let m = Matchup::between(&die(a), &die(b));
            let r = Matchup::between(&die(b), &die(a));

            prop_assert_eq!(m.wins + r.wins + m.ties, PAIRS);
            prop_assert_eq!(r, m.reversed());
            let total = m.win_probability() + r.win_probability() + m.tie_probability();
            prop_assert!((total - 1.0).abs() < 1e-12);
        }
    }
}

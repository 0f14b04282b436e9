//! Fixed-cardinality indicator vector: one candidate sensor subset.

use rand::Rng;
use rand::seq::index;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome {
    genes: Vec<bool>,
}

impl Chromosome {
    /// Indicator of length `len` with `indices` switched on.
    ///
    /// # Panics
    /// Panics if an index is `>= len`.
    pub fn from_indices(len: usize, indices: &[usize]) -> Self {
        let mut genes = vec![false; len];
        for &i in indices {
            genes[i] = true;
        }
        Self { genes }
    }

    /// Uniformly random subset of `k` out of `len` positions.
    pub fn random<R: Rng + ?Sized>(len: usize, k: usize, rng: &mut R) -> Self {
        let picked = index::sample(rng, len, k).into_vec();
        Self::from_indices(len, &picked)
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    /// Number of selected positions.
    pub fn cardinality(&self) -> usize {
        self.genes.iter().filter(|g| **g).count()
    }

    /// Selected positions, ascending.
    pub fn selected(&self) -> Vec<usize> {
        self.positions(true)
    }

    /// Unselected positions, ascending.
    pub fn unselected(&self) -> Vec<usize> {
        self.positions(false)
    }

    /// Move the sensor at `from` to the empty slot `to`.
    pub(crate) fn swap(&mut self, from: usize, to: usize) {
        debug_assert!(self.genes[from] && !self.genes[to]);
        self.genes[from] = false;
        self.genes[to] = true;
    }

    fn positions(&self, state: bool) -> Vec<usize> {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(i, &g)| (g == state).then_some(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_has_requested_cardinality() {
        let mut rng = StdRng::seed_from_u64(3);
        for k in [1, 5, 19] {
            let c = Chromosome::random(20, k, &mut rng);
            assert_eq!(c.len(), 20);
            assert_eq!(c.cardinality(), k);
        }
    }

    #[test]
    fn selected_and_unselected_partition() {
        let c = Chromosome::from_indices(6, &[4, 1]);
        assert_eq!(c.selected(), vec![1, 4]);
        assert_eq!(c.unselected(), vec![0, 2, 3, 5]);
    }
}

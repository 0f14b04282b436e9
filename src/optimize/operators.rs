//! Genetic operators that preserve subset cardinality.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::optimize::chromosome::Chromosome;

/// Tournament selection: `count` winners, each the fittest of `size` draws
/// (uniform, with replacement). Returns population indices.
///
/// The first drawn contender wins ties.
pub fn tournament_select<R: Rng + ?Sized>(
    fitness: &[f64],
    count: usize,
    size: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = fitness.len();
    (0..count)
        .map(|_| {
            let mut winner = rng.gen_range(0..n);
            for _ in 1..size {
                let contender = rng.gen_range(0..n);
                if fitness[contender] > fitness[winner] {
                    winner = contender;
                }
            }
            winner
        })
        .collect()
}

/// Splice two parents of equal cardinality `k` into one child.
///
/// The child takes the first `c` selected positions of `parent1` and the
/// positions from `c` onwards of `parent2` (`c` uniform in `0..=k`). Duplicates
/// collapse, so the union is then repaired back to exactly `k`: excess is
/// subsampled, a deficit is filled from positions neither part contributed.
pub fn crossover<R: Rng + ?Sized>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> Chromosome {
    let len = parent1.len();
    let k = parent1.cardinality();
    debug_assert_eq!(k, parent2.cardinality());

    let head = parent1.selected();
    let tail = parent2.selected();
    let cut = rng.gen_range(0..=k);

    let mut taken = vec![false; len];
    let mut union = Vec::with_capacity(k);
    for &i in head.iter().take(cut).chain(tail.iter().skip(cut)) {
        if !taken[i] {
            taken[i] = true;
            union.push(i);
        }
    }

    if union.len() > k {
        union = union.choose_multiple(rng, k).copied().collect();
    } else if union.len() < k {
        let absent: Vec<usize> = (0..len).filter(|&i| !taken[i]).collect();
        union.extend(absent.choose_multiple(rng, k - union.len()).copied());
    }

    Chromosome::from_indices(len, &union)
}

/// With probability `rate`, move one sensor to a random empty position.
///
/// Returns whether a move happened.
pub fn mutate<R: Rng + ?Sized>(chromosome: &mut Chromosome, rate: f64, rng: &mut R) -> bool {
    if rng.r#gen::<f64>() >= rate {
        return false;
    }
    let on = chromosome.selected();
    let off = chromosome.unselected();
    let (Some(&from), Some(&to)) = (on.choose(rng), off.choose(rng)) else {
        return false;
    };
    chromosome.swap(from, to);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn crossover_preserves_cardinality() {
        let mut rng = StdRng::seed_from_u64(11);
        for trial in 0..500 {
            let len = 8 + trial % 13;
            let k = 1 + trial % (len - 1);
            let p1 = Chromosome::random(len, k, &mut rng);
            let p2 = Chromosome::random(len, k, &mut rng);
            let child = crossover(&p1, &p2, &mut rng);
            assert_eq!(child.len(), len);
            assert_eq!(child.cardinality(), k, "trial {trial}");
        }
    }

    #[test]
    fn crossover_of_identical_parents_is_a_copy() {
        let mut rng = StdRng::seed_from_u64(5);
        let p = Chromosome::from_indices(10, &[0, 3, 7]);
        for _ in 0..50 {
            assert_eq!(crossover(&p, &p, &mut rng), p);
        }
    }

    #[test]
    fn crossover_fills_deficit_from_absent_positions() {
        // With cut = 1 both halves contribute index 1, leaving one slot to refill.
        let mut rng = StdRng::seed_from_u64(9);
        let p1 = Chromosome::from_indices(5, &[1, 4]);
        let p2 = Chromosome::from_indices(5, &[0, 1]);
        for _ in 0..100 {
            let child = crossover(&p1, &p2, &mut rng);
            assert_eq!(child.cardinality(), 2);
        }
    }

    #[test]
    fn mutation_preserves_cardinality() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut c = Chromosome::random(12, 4, &mut rng);
        let mut moved = 0;
        for _ in 0..200 {
            let before = c.clone();
            if mutate(&mut c, 0.5, &mut rng) {
                moved += 1;
                assert_ne!(before, c);
            }
            assert_eq!(c.cardinality(), 4);
        }
        assert!(moved > 0);
    }

    #[test]
    fn zero_rate_never_mutates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = Chromosome::from_indices(6, &[0, 1, 2]);
        for _ in 0..100 {
            assert!(!mutate(&mut c, 0.0, &mut rng));
        }
        assert_eq!(c.selected(), vec![0, 1, 2]);
    }

    #[test]
    fn tournament_favours_best() {
        let mut rng = StdRng::seed_from_u64(2);
        let fitness = [0.0, 10.0, 1.0];
        let winners = tournament_select(&fitness, 300, 3, &mut rng);
        assert_eq!(winners.len(), 300);
        let best = winners.iter().filter(|&&w| w == 1).count();
        // P(index 1 in 3 draws) = 1 - (2/3)^3 ≈ 0.70
        assert!(best > 150, "best won {best} of 300");
    }
}

use rand::Rng;

use crate::catalog::{Gene, GeneCategory, GenePool};

/// Mutate a gene list in place with a single probability roll.
///
/// On a successful roll, one random slot is overwritten with a replacement
/// tag drawn from a random pool category; the replacement differs from the
/// displaced tag whenever the category has an alternative. The list length
/// never changes. Returns whether a mutation happened, so callers can keep
/// an accurate mutation count.
pub fn mutate<R: Rng>(genes: &mut [Gene], rate: f64, pool: &GenePool, rng: &mut R) -> bool {
    if genes.is_empty() || rng.gen::<f64>() >= rate {
        return false;
    }
    let category = GeneCategory::random(rng);
    let slot = rng.gen_range(0..genes.len());
    genes[slot] = pool.draw_replacement(category, &genes[slot], rng);
    true
}

/// Single-point crossover between two parent gene lists.
///
/// On a successful roll the child takes `a`'s genes before the split point
/// and `b`'s from the split point on, so its length always equals `b`'s.
/// The split lands strictly inside both parents. When the roll fails or
/// either parent is shorter than two genes, the child is a plain copy of
/// `a`.
pub fn crossover<R: Rng>(a: &[Gene], b: &[Gene], rate: f64, rng: &mut R) -> Vec<Gene> {
    let shorter = a.len().min(b.len());
    if shorter < 2 || rng.gen::<f64>() >= rate {
        return a.to_vec();
    }
    let split = rng.gen_range(1..shorter);
    let mut child = a[..split].to_vec();
    child.extend_from_slice(&b[split..]);
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn genes(tags: &[&str]) -> Vec<Gene> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn mutation_at_full_rate_changes_exactly_one_gene() {
        let pool = GenePool::standard();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let original = genes(&["vision", "sync", "backup", "market"]);
            let mut mutated = original.clone();
            assert!(mutate(&mut mutated, 1.0, &pool, &mut rng));
            assert_eq!(mutated.len(), original.len());
            let changed = original
                .iter()
                .zip(&mutated)
                .filter(|(before, after)| before != after)
                .count();
            assert_eq!(changed, 1);
        }
    }

    #[test]
    fn mutation_at_zero_rate_is_a_no_op() {
        let pool = GenePool::standard();
        let mut rng = StdRng::seed_from_u64(42);
        let original = genes(&["vision", "sync"]);
        let mut untouched = original.clone();
        assert!(!mutate(&mut untouched, 0.0, &pool, &mut rng));
        assert_eq!(untouched, original);
    }

    #[test]
    fn mutation_skips_empty_gene_lists() {
        let pool = GenePool::standard();
        let mut rng = StdRng::seed_from_u64(42);
        let mut empty: Vec<Gene> = Vec::new();
        assert!(!mutate(&mut empty, 1.0, &pool, &mut rng));
        assert!(empty.is_empty());
    }

    #[test]
    fn crossover_child_is_a_prefix_plus_b_suffix() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = genes(&["a1", "a2", "a3", "a4", "a5"]);
        let b = genes(&["b1", "b2", "b3", "b4", "b5"]);
        for _ in 0..20 {
            let child = crossover(&a, &b, 1.0, &mut rng);
            assert_eq!(child.len(), b.len());
            let split = child.iter().take_while(|g| g.starts_with('a')).count();
            assert!((1..b.len()).contains(&split), "split {split} out of bounds");
            assert_eq!(child[..split], a[..split]);
            assert_eq!(child[split..], b[split..]);
        }
    }

    #[test]
    fn crossover_child_length_follows_second_parent() {
        let mut rng = StdRng::seed_from_u64(9);
        let a = genes(&["a1", "a2", "a3"]);
        let b = genes(&["b1", "b2", "b3", "b4", "b5", "b6"]);
        for _ in 0..20 {
            let child = crossover(&a, &b, 1.0, &mut rng);
            assert_eq!(child.len(), b.len());
        }
    }

    #[test]
    fn crossover_at_zero_rate_copies_first_parent() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = genes(&["a1", "a2", "a3"]);
        let b = genes(&["b1", "b2", "b3"]);
        assert_eq!(crossover(&a, &b, 0.0, &mut rng), a);
    }

    #[test]
    fn crossover_needs_two_genes_on_both_sides() {
        let mut rng = StdRng::seed_from_u64(7);
        let single = genes(&["solo"]);
        let pair = genes(&["b1", "b2"]);
        assert_eq!(crossover(&single, &pair, 1.0, &mut rng), single);
        assert_eq!(crossover(&pair, &single, 1.0, &mut rng), pair);
    }
}

use rand::Rng;

/// Number of tiers in the standard directory.
pub const TIER_COUNT: u8 = 8;

/// One rung of the module hierarchy. Directory entries are static reference
/// data; nothing mutates them at runtime.
#[derive(Debug, Clone)]
pub struct Tier {
    /// Position in the hierarchy, 1-based. Higher ordinals score higher.
    pub ordinal: u8,
    pub name: &'static str,
    pub role: &'static str,
    /// Tags a module of this tier is seeded with by convention.
    pub default_genes: &'static [&'static str],
    pub status: &'static str,
}

/// Ordered, immutable list of the eight standard tiers.
pub struct TierDirectory {
    tiers: Vec<Tier>,
}

impl TierDirectory {
    pub fn standard() -> Self {
        let tiers = vec![
            Tier {
                ordinal: 1,
                name: "directorate",
                role: "Sets direction and owns the vision for every generation line",
                default_genes: &["vision", "leadership"],
                status: "active",
            },
            Tier {
                ordinal: 2,
                name: "integration",
                role: "Folds freshly generated modules into the shared catalog",
                default_genes: &["sync", "integration"],
                status: "active",
            },
            Tier {
                ordinal: 3,
                name: "consensus",
                role: "Reconciles competing module lines into one agreed lineage",
                default_genes: &["consensus", "unified"],
                status: "active",
            },
            Tier {
                ordinal: 4,
                name: "execution-core",
                role: "Turns agreed lineages into concrete runnable output",
                default_genes: &["execution", "output"],
                status: "active",
            },
            Tier {
                ordinal: 5,
                name: "tri-model",
                role: "Cross-checks output against three independent model families",
                default_genes: &["grok", "claude", "gemini"],
                status: "active",
            },
            Tier {
                ordinal: 6,
                name: "commercial",
                role: "Grades module lines by market traction and growth",
                default_genes: &["market", "growth"],
                status: "active",
            },
            Tier {
                ordinal: 7,
                name: "deployment",
                role: "Ships graded modules and scales the winners",
                default_genes: &["deploy", "scale"],
                status: "active",
            },
            Tier {
                ordinal: 8,
                name: "recovery",
                role: "Backs up shipped lines and restores the last good state",
                default_genes: &["backup", "restore"],
                status: "active",
            },
        ];
        Self { tiers }
    }

    /// Look up a tier by ordinal. Returns `None` outside `1..=len`.
    pub fn get(&self, ordinal: u8) -> Option<&Tier> {
        if ordinal == 0 {
            return None;
        }
        self.tiers.get(usize::from(ordinal) - 1)
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tier> {
        self.tiers.iter()
    }

    /// Uniformly random tier ordinal, used when seeding a population.
    pub fn random_ordinal<R: Rng>(&self, rng: &mut R) -> u8 {
        rng.gen_range(1..=self.tiers.len() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn standard_directory_has_eight_ordered_tiers() {
        let directory = TierDirectory::standard();
        assert_eq!(directory.len(), usize::from(TIER_COUNT));
        for (index, tier) in directory.iter().enumerate() {
            assert_eq!(usize::from(tier.ordinal), index + 1);
            assert_eq!(tier.status, "active");
            assert!(!tier.default_genes.is_empty());
        }
    }

    #[test]
    fn lookup_is_one_based_and_bounded() {
        let directory = TierDirectory::standard();
        assert!(directory.get(0).is_none());
        assert!(directory.get(9).is_none());
        assert_eq!(directory.get(1).unwrap().name, "directorate");
        assert_eq!(directory.get(8).unwrap().name, "recovery");
    }

    #[test]
    fn tier_five_carries_the_three_model_tags() {
        let directory = TierDirectory::standard();
        let tier = directory.get(5).unwrap();
        assert_eq!(tier.default_genes, &["grok", "claude", "gemini"]);
    }

    #[test]
    fn random_ordinal_stays_in_range() {
        let directory = TierDirectory::standard();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let ordinal = directory.random_ordinal(&mut rng);
            assert!((1..=TIER_COUNT).contains(&ordinal));
        }
    }
}

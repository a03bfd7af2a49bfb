use rand::Rng;

/// A single pool tag. Genes carry no state of their own; modules copy tags
/// out of the pool by value.
pub type Gene = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneCategory {
    Technical,
    Strategic,
    Operational,
}

impl GeneCategory {
    pub const ALL: [GeneCategory; 3] = [
        GeneCategory::Technical,
        GeneCategory::Strategic,
        GeneCategory::Operational,
    ];

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// The fixed catalog of tags modules are assembled from. Built once at
/// startup and shared read-only from then on.
pub struct GenePool {
    technical: Vec<&'static str>,
    strategic: Vec<&'static str>,
    operational: Vec<&'static str>,
}

impl GenePool {
    /// The standard pool. Every category holds at least four tags so gene
    /// replacement always has an alternative to pick.
    pub fn standard() -> Self {
        Self {
            technical: vec![
                "quantum_sync",
                "vps_deploy",
                "triple_path",
                "github_webhook",
                "module_gen",
                "stats_live",
                "backup",
                "restore",
            ],
            strategic: vec![
                "vision",
                "leadership",
                "consensus",
                "unified",
                "market",
                "growth",
                "ai_consensus",
                "global_scale",
            ],
            operational: vec![
                "sync",
                "integration",
                "execution",
                "output",
                "deploy",
                "scale",
                "grok",
                "claude",
                "gemini",
            ],
        }
    }

    pub fn tags(&self, category: GeneCategory) -> &[&'static str] {
        match category {
            GeneCategory::Technical => &self.technical,
            GeneCategory::Strategic => &self.strategic,
            GeneCategory::Operational => &self.operational,
        }
    }

    /// Draw one tag uniformly from the given category.
    pub fn draw<R: Rng>(&self, category: GeneCategory, rng: &mut R) -> Gene {
        let tags = self.tags(category);
        tags[rng.gen_range(0..tags.len())].to_string()
    }

    /// Draw a tag from the category that differs from `current` whenever the
    /// category offers an alternative. Keeps a forced mutation observable.
    pub fn draw_replacement<R: Rng>(
        &self,
        category: GeneCategory,
        current: &str,
        rng: &mut R,
    ) -> Gene {
        let tags = self.tags(category);
        let alternatives: Vec<&&str> = tags.iter().filter(|tag| **tag != current).collect();
        if alternatives.is_empty() {
            return current.to_string();
        }
        alternatives[rng.gen_range(0..alternatives.len())].to_string()
    }

    /// Starter gene list for a freshly synthesized module: one random tag
    /// from each category, in category order.
    pub fn draw_one_per_category<R: Rng>(&self, rng: &mut R) -> Vec<Gene> {
        GeneCategory::ALL
            .iter()
            .map(|category| self.draw(*category, rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_category_has_enough_tags() {
        let pool = GenePool::standard();
        for category in GeneCategory::ALL {
            assert!(pool.tags(category).len() >= 4);
        }
    }

    #[test]
    fn draw_one_per_category_yields_three_genes() {
        let pool = GenePool::standard();
        let mut rng = StdRng::seed_from_u64(7);
        let genes = pool.draw_one_per_category(&mut rng);
        assert_eq!(genes.len(), 3);
        let drawn_from = |category: GeneCategory, gene: &str| {
            pool.tags(category).iter().any(|tag| *tag == gene)
        };
        assert!(drawn_from(GeneCategory::Technical, &genes[0]));
        assert!(drawn_from(GeneCategory::Strategic, &genes[1]));
        assert!(drawn_from(GeneCategory::Operational, &genes[2]));
    }

    #[test]
    fn replacement_never_returns_the_displaced_tag() {
        let pool = GenePool::standard();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let replacement = pool.draw_replacement(GeneCategory::Technical, "backup", &mut rng);
            assert_ne!(replacement, "backup");
        }
    }
}

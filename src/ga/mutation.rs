//! Mutation strategies for bit genotypes.

use super::individual::Individual;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::Rng;

/// Produces a mutated copy of an individual.
pub trait MutationStrategy: Send {
    /// Returns a new individual; the input is left untouched.
    fn mutate(&mut self, individual: &Individual) -> Result<Individual>;
}

/// Bit-level transformation applied by [`BinaryTransformationStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryTransformation {
    /// Flip one uniformly chosen bit.
    RandomBitFlip,
    /// Invert every bit.
    AllBitFlip,
}

impl BinaryTransformation {
    fn operator(self) -> fn(&mut [bool], &mut StdRng) {
        match self {
            Self::RandomBitFlip => random_bit_flip::<StdRng>,
            Self::AllBitFlip => all_bit_flip::<StdRng>,
        }
    }
}

/// Random bit flip: invert one position chosen uniformly.
///
/// # Complexity
/// O(1)
pub fn random_bit_flip<R: Rng>(bits: &mut [bool], rng: &mut R) {
    if bits.is_empty() {
        return;
    }
    let i = rng.random_range(0..bits.len());
    bits[i] = !bits[i];
}

/// Full inversion. Applying it twice restores the input.
///
/// # Complexity
/// O(n)
pub fn all_bit_flip<R: Rng>(bits: &mut [bool], _rng: &mut R) {
    for bit in bits.iter_mut() {
        *bit = !*bit;
    }
}

/// Mutation by a [`BinaryTransformation`], resolved once at construction.
pub struct BinaryTransformationStrategy {
    kind: BinaryTransformation,
    transform: fn(&mut [bool], &mut StdRng),
    rng: StdRng,
}

impl BinaryTransformationStrategy {
    pub fn new(kind: BinaryTransformation, rng: StdRng) -> Self {
        Self {
            kind,
            transform: kind.operator(),
            rng,
        }
    }

    pub fn kind(&self) -> BinaryTransformation {
        self.kind
    }
}

impl std::fmt::Debug for BinaryTransformationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryTransformationStrategy")
            .field("kind", &self.kind)
            .finish()
    }
}

impl MutationStrategy for BinaryTransformationStrategy {
    fn mutate(&mut self, individual: &Individual) -> Result<Individual> {
        let mut genotype = individual.genotype().to_vec();
        (self.transform)(&mut genotype, &mut self.rng);
        individual.with_genotype(genotype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::individual::tests::path_abc;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use std::sync::Arc;

    #[test]
    fn test_random_bit_flip_changes_one_index() {
        let mut rng = create_rng(42);
        let original = vec![true, false, true, true, false, false, true];
        for _ in 0..100 {
            let mut bits = original.clone();
            random_bit_flip(&mut bits, &mut rng);
            let changed = bits.iter().zip(&original).filter(|(a, b)| a != b).count();
            assert_eq!(changed, 1);
        }
    }

    #[test]
    fn test_random_bit_flip_empty() {
        let mut bits: Vec<bool> = Vec::new();
        random_bit_flip(&mut bits, &mut create_rng(1));
        assert!(bits.is_empty());
    }

    #[test]
    fn test_strategy_returns_new_individual() {
        let (graph, problem) = path_abc();
        let original =
            Individual::new(Arc::clone(&graph), Arc::clone(&problem), vec![false, true, false]).unwrap();
        let mut strategy =
            BinaryTransformationStrategy::new(BinaryTransformation::AllBitFlip, create_rng(1));
        assert_eq!(strategy.kind(), BinaryTransformation::AllBitFlip);

        let mutated = strategy.mutate(&original).unwrap();
        assert_eq!(mutated.genotype(), &[true, false, true]);
        assert_eq!(mutated.outcome(), 2);
        assert_eq!(original.genotype(), &[false, true, false]);
        assert!(mutated.is_compatible_with(&original));
    }

    #[test]
    fn test_strategy_random_flip() {
        let (graph, problem) = path_abc();
        let original = Individual::new(graph, problem, vec![true, true, true]).unwrap();
        let mut strategy =
            BinaryTransformationStrategy::new(BinaryTransformation::RandomBitFlip, create_rng(9));
        let mutated = strategy.mutate(&original).unwrap();
        assert_eq!(mutated.genotype().iter().filter(|&&b| !b).count(), 1);
    }

    proptest! {
        #[test]
        fn prop_all_bit_flip_is_involution(bits in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut rng = create_rng(0);
            let mut flipped = bits.clone();
            all_bit_flip(&mut flipped, &mut rng);
            prop_assert!(flipped.iter().zip(&bits).all(|(a, b)| a != b));
            all_bit_flip(&mut flipped, &mut rng);
            prop_assert_eq!(flipped, bits);
        }
    }
}

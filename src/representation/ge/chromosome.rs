use crate::error::{GpError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

pub type Codon = u32;

/// Codon sequence of a grammatical evolution individual.
///
/// Each codon is consumed sequentially by the mapper to pick among the
/// productions of a multi-production rule. Crossover works by detaching a
/// tail with [`Chromosome::remove_range`] and splicing another one in with
/// [`Chromosome::extend`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Chromosome {
    codons: Vec<Codon>,
}

impl Chromosome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chromosome of `length` codons drawn uniformly from `codon_range`.
    pub fn random<R: Rng + ?Sized>(length: usize, codon_range: Range<Codon>, rng: &mut R) -> Self {
        (0..length)
            .map(|_| rng.gen_range(codon_range.clone()))
            .collect()
    }

    pub fn append(&mut self, codon: Codon) {
        self.codons.push(codon);
    }

    pub fn get(&self, index: usize) -> Result<Codon> {
        self.codons.get(index).copied().ok_or(GpError::Index {
            index,
            length: self.codons.len(),
        })
    }

    pub fn set(&mut self, index: usize, codon: Codon) -> Result<()> {
        let length = self.codons.len();
        let slot = self
            .codons
            .get_mut(index)
            .ok_or(GpError::Index { index, length })?;
        *slot = codon;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.codons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codons.is_empty()
    }

    /// Removes and returns the codons in `start..end`.
    pub fn remove_range(&mut self, start: usize, end: usize) -> Result<Vec<Codon>> {
        if start > end {
            return Err(GpError::Index { index: start, length: end });
        }
        if end > self.codons.len() {
            return Err(GpError::Index {
                index: end,
                length: self.codons.len(),
            });
        }
        Ok(self.codons.drain(start..end).collect())
    }

    /// Splices codons onto the end.
    pub fn extend<I: IntoIterator<Item = Codon>>(&mut self, codons: I) {
        self.codons.extend(codons);
    }

    pub fn truncate(&mut self, length: usize) {
        self.codons.truncate(length);
    }

    pub fn as_slice(&self) -> &[Codon] {
        &self.codons
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Codon> {
        self.codons.iter()
    }
}

impl From<Vec<Codon>> for Chromosome {
    fn from(codons: Vec<Codon>) -> Self {
        Self { codons }
    }
}

impl FromIterator<Codon> for Chromosome {
    fn from_iter<I: IntoIterator<Item = Codon>>(iter: I) -> Self {
        Self {
            codons: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_get_out_of_bounds() {
        let chromosome = Chromosome::from(vec![1, 2, 3]);
        assert_eq!(chromosome.get(2).unwrap(), 3);
        assert!(matches!(
            chromosome.get(3),
            Err(GpError::Index { index: 3, length: 3 })
        ));
    }

    #[test]
    fn test_set_replaces_single_codon() {
        let mut chromosome = Chromosome::from(vec![1, 2, 3]);
        chromosome.set(1, 9).unwrap();
        assert_eq!(chromosome.as_slice(), &[1, 9, 3]);
        assert!(chromosome.set(5, 0).is_err());
    }

    #[test]
    fn test_remove_range_then_extend_splices_tail() {
        let mut a = Chromosome::from(vec![1, 2, 3, 4]);
        let mut b = Chromosome::from(vec![5, 6, 7]);

        let tail_a = a.remove_range(2, 4).unwrap();
        let tail_b = b.remove_range(1, 3).unwrap();
        a.extend(tail_b);
        b.extend(tail_a);

        assert_eq!(a.as_slice(), &[1, 2, 6, 7]);
        assert_eq!(b.as_slice(), &[5, 3, 4]);
    }

    #[test]
    fn test_remove_range_bounds_checked() {
        let mut chromosome = Chromosome::from(vec![1, 2]);
        assert!(chromosome.remove_range(1, 3).is_err());
        assert!(chromosome.remove_range(2, 1).is_err());
        assert_eq!(chromosome.len(), 2);
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Chromosome::from(vec![1, 2]);
        let mut copy = original.clone();
        copy.append(3);
        assert_eq!(original.len(), 2);
        assert_eq!(copy.len(), 3);
    }

    #[test]
    fn test_random_codons_within_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let chromosome = Chromosome::random(50, 10..20, &mut rng);
        assert_eq!(chromosome.len(), 50);
        assert!(chromosome.iter().all(|c| (10..20).contains(c)));
    }
}

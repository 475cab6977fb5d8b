use super::MappingError;
use crate::config::mapping::ShortagePolicy;
use crate::representation::ge::{Chromosome, Codon};
use rand::Rng;
use std::ops::Range;

/// Deterministically consumes codons from a chromosome, applying the
/// shortage policy when the end is reached.
pub struct CodonConsumer<'a, R: ?Sized> {
    chromosome: &'a mut Chromosome,
    position: usize,
    wraps: usize,
    used: usize,
    policy: ShortagePolicy,
    codon_range: Range<Codon>,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> CodonConsumer<'a, R> {
    pub fn new(
        chromosome: &'a mut Chromosome,
        policy: ShortagePolicy,
        codon_range: Range<Codon>,
        rng: &'a mut R,
    ) -> Self {
        Self {
            chromosome,
            position: 0,
            wraps: 0,
            used: 0,
            policy,
            codon_range,
            rng,
        }
    }

    /// Consume next codon
    pub fn consume(&mut self) -> Result<Codon, MappingError> {
        if self.position >= self.chromosome.len() {
            self.refill()?;
        }

        let codon = self.chromosome.as_slice()[self.position];
        self.position += 1;
        self.used = self.used.max(self.position);
        Ok(codon)
    }

    /// Consume codon and map to choice index
    pub fn choose(&mut self, num_choices: usize) -> Result<usize, MappingError> {
        Ok((self.consume()? as usize) % num_choices)
    }

    fn refill(&mut self) -> Result<(), MappingError> {
        match self.policy {
            ShortagePolicy::Wrap { max_wraps } => {
                if self.chromosome.is_empty() {
                    return Err(MappingError::ChromosomeExhausted);
                }
                self.wraps += 1;
                if self.wraps > max_wraps {
                    return Err(MappingError::ExcessiveWrapping { limit: max_wraps });
                }
                self.position = 0;
            }
            ShortagePolicy::Extend {
                max_chromosome_length,
            } => {
                if self.chromosome.len() >= max_chromosome_length {
                    return Err(MappingError::ChromosomeFull {
                        limit: max_chromosome_length,
                    });
                }
                let codon = self.rng.gen_range(self.codon_range.clone());
                self.chromosome.append(codon);
            }
            ShortagePolicy::Fail => return Err(MappingError::ChromosomeExhausted),
        }
        Ok(())
    }

    /// Distinct codons read so far; a codon reused after wrapping counts once.
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn wraps(&self) -> usize {
        self.wraps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_wrapping_reuses_codons_and_counts_once() {
        let mut chromosome = Chromosome::from(vec![4, 7]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut consumer =
            CodonConsumer::new(&mut chromosome, ShortagePolicy::Wrap { max_wraps: 1 }, 0..10, &mut rng);

        assert_eq!(consumer.consume().unwrap(), 4);
        assert_eq!(consumer.consume().unwrap(), 7);
        assert_eq!(consumer.consume().unwrap(), 4);
        assert_eq!(consumer.used(), 2);
        assert_eq!(consumer.wraps(), 1);
        assert_eq!(consumer.consume().unwrap(), 7);
        assert_eq!(
            consumer.consume(),
            Err(MappingError::ExcessiveWrapping { limit: 1 })
        );
    }

    #[test]
    fn test_extension_appends_until_full() {
        let mut chromosome = Chromosome::from(vec![1]);
        let mut rng = StdRng::seed_from_u64(1);
        {
            let mut consumer = CodonConsumer::new(
                &mut chromosome,
                ShortagePolicy::Extend {
                    max_chromosome_length: 3,
                },
                5..6,
                &mut rng,
            );
            assert_eq!(consumer.consume().unwrap(), 1);
            assert_eq!(consumer.consume().unwrap(), 5);
            assert_eq!(consumer.consume().unwrap(), 5);
            assert_eq!(
                consumer.consume(),
                Err(MappingError::ChromosomeFull { limit: 3 })
            );
        }
        assert_eq!(chromosome.as_slice(), &[1, 5, 5]);
    }

    #[test]
    fn test_fail_policy_stops_at_end() {
        let mut chromosome = Chromosome::from(vec![3]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut consumer = CodonConsumer::new(&mut chromosome, ShortagePolicy::Fail, 0..10, &mut rng);

        assert_eq!(consumer.choose(2).unwrap(), 1);
        assert_eq!(consumer.consume(), Err(MappingError::ChromosomeExhausted));
    }

    #[test]
    fn test_empty_chromosome_cannot_wrap() {
        let mut chromosome = Chromosome::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut consumer =
            CodonConsumer::new(&mut chromosome, ShortagePolicy::Wrap { max_wraps: 5 }, 0..10, &mut rng);
        assert_eq!(consumer.consume(), Err(MappingError::ChromosomeExhausted));
    }
}

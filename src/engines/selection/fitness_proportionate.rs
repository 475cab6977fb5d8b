use rand::Rng;

/// Roulette wheel over standardised (lower is better) fitness.
///
/// Each weight is `max + min - fitness`, which turns the lowest fitness
/// into the largest weight. Weights are clamped at zero, as fitness values of
/// mixed sign can push them below it. Non-finite fitness values (invalid
/// individuals) get zero weight.
#[derive(Debug, Clone)]
pub struct FitnessProportionate {
    cumulative: Vec<f64>,
}

impl FitnessProportionate {
    pub fn new(fitnesses: &[f64]) -> Self {
        let finite = fitnesses.iter().copied().filter(|f| f.is_finite());
        let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), f| {
            (lo.min(f), hi.max(f))
        });

        let weights: Vec<f64> = fitnesses
            .iter()
            .map(|&f| if f.is_finite() { (max + min - f).max(0.0) } else { 0.0 })
            .collect();
        let total: f64 = weights.iter().sum();

        let mut cumulative = Vec::with_capacity(weights.len());
        let mut running = 0.0;
        for (i, weight) in weights.iter().enumerate() {
            running += if total > 0.0 {
                weight / total
            } else {
                // no usable weights: uniform
                (i + 1) as f64 / weights.len() as f64 - running
            };
            cumulative.push(running);
        }
        // absorb floating-point drift
        if let Some(last) = cumulative.last_mut() {
            *last = 1.0;
        }

        Self { cumulative }
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Index of the first bucket whose cumulative probability reaches a uniform draw.
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let spin = rng.gen::<f64>();
        self.cumulative
            .iter()
            .position(|&p| p >= spin)
            .unwrap_or(self.cumulative.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_last_bucket_is_exactly_one() {
        let wheel = FitnessProportionate::new(&[0.1, 0.7, 0.3, 0.9, 0.2, 0.6, 0.4]);
        assert_eq!(*wheel.cumulative().last().unwrap(), 1.0);
        assert!(wheel.cumulative().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_inverted_weights() {
        // weights: 4+1-1=4, 4+1-4=1 -> 0.8, 1.0
        let wheel = FitnessProportionate::new(&[1.0, 4.0]);
        assert!((wheel.cumulative()[0] - 0.8).abs() < 1e-12);
        assert_eq!(wheel.cumulative()[1], 1.0);
    }

    #[test]
    fn test_mixed_sign_fitness_keeps_wheel_monotone() {
        // weights: 5, 4, and -1 clamped to 0
        let wheel = FitnessProportionate::new(&[-1.0, 0.0, 5.0]);
        let cumulative = wheel.cumulative();
        assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));
        assert!((cumulative[0] - 5.0 / 9.0).abs() < 1e-12);
        assert!((cumulative[1] - 1.0).abs() < 1e-12);

        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..200 {
            assert_ne!(wheel.select(&mut rng), 2);
        }
    }

    #[test]
    fn test_lower_fitness_selected_more_often() {
        let wheel = FitnessProportionate::new(&[1.0, 4.0]);
        let mut rng = StdRng::seed_from_u64(4);
        let mut counts = [0usize; 2];
        for _ in 0..1000 {
            counts[wheel.select(&mut rng)] += 1;
        }
        assert!(counts[0] > counts[1] * 2);
    }

    #[test]
    fn test_invalid_individuals_never_selected() {
        let wheel = FitnessProportionate::new(&[f64::INFINITY, 2.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            assert_ne!(wheel.select(&mut rng), 0);
        }
    }

    #[test]
    fn test_zero_weights_fall_back_to_uniform() {
        let wheel = FitnessProportionate::new(&[0.0, 0.0, 0.0, 0.0]);
        assert_eq!(wheel.cumulative(), &[0.25, 0.5, 0.75, 1.0]);
    }
}

use super::candidate::Candidate;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Summary of one accepted generation. Generation 0 is the initial population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    /// Mean over individuals with finite fitness; `NaN` if there are none.
    pub mean_fitness: f64,
    /// Individuals with non-finite fitness.
    pub invalid_count: usize,
    /// Times the generation was rebuilt because a hook reverted it.
    pub reversions: usize,
}

impl GenerationStats {
    pub fn from_population<I: Candidate>(
        generation: usize,
        population: &[I],
        reversions: usize,
    ) -> Self {
        let fitnesses: Vec<f64> = population.iter().map(Candidate::standardised_fitness).collect();
        let finite: Vec<f64> = fitnesses.iter().copied().filter(|f| f.is_finite()).collect();
        let best_fitness = fitnesses.iter().copied().fold(f64::INFINITY, f64::min);
        let mean_fitness = if finite.is_empty() {
            f64::NAN
        } else {
            finite.iter().sum::<f64>() / finite.len() as f64
        };

        Self {
            generation,
            best_fitness,
            mean_fitness,
            invalid_count: fitnesses.len() - finite.len(),
            reversions,
        }
    }

    /// Pretty-printed JSON. Non-finite fitness values become `null`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Outcome of a complete run.
#[derive(Debug, Clone)]
pub struct RunReport<I> {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub generations: Vec<GenerationStats>,
    /// Best individual seen in any generation.
    pub best: I,
    pub final_population: Vec<I>,
}

impl<I: Candidate> RunReport<I> {
    pub fn best_fitness(&self) -> f64 {
        self.best.standardised_fitness()
    }

    pub fn total_reversions(&self) -> usize {
        self.generations.iter().map(|g| g.reversions).sum()
    }

    /// Writes the per-generation statistics to `path` as a JSON array.
    pub fn save_history<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.generations)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Scored(Option<f64>);

    impl Candidate for Scored {
        fn fitness(&self) -> Option<f64> {
            self.0
        }
        fn set_fitness(&mut self, fitness: f64) {
            self.0 = Some(fitness);
        }
    }

    #[test]
    fn test_stats_skip_invalid_in_mean() {
        let population = vec![
            Scored(Some(2.0)),
            Scored(Some(f64::INFINITY)),
            Scored(Some(4.0)),
            Scored(None),
        ];
        let stats = GenerationStats::from_population(3, &population, 1);
        assert_eq!(stats.best_fitness, 2.0);
        assert_eq!(stats.mean_fitness, 3.0);
        assert_eq!(stats.invalid_count, 2);
        assert_eq!(stats.reversions, 1);
    }

    fn report() -> RunReport<Scored> {
        let now = Utc::now();
        RunReport {
            started_at: now,
            finished_at: now,
            generations: vec![
                GenerationStats::from_population(0, &[Scored(Some(3.0))], 0),
                GenerationStats::from_population(1, &[Scored(Some(1.0))], 2),
            ],
            best: Scored(Some(1.0)),
            final_population: vec![Scored(Some(1.0))],
        }
    }

    #[test]
    fn test_history_saved_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let report = report();
        report.save_history(&path).unwrap();

        let saved: Vec<GenerationStats> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, report.generations);
        assert!(report.generations[1].to_json().unwrap().contains("\"reversions\": 2"));
    }

    #[test]
    fn test_history_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("history.json");
        assert!(matches!(
            report().save_history(&path),
            Err(crate::error::GpError::Io(_))
        ));
    }
}

use super::hooks::GenerationHooks;
use super::stats::GenerationStats;
use log::{debug, info};

/// Reports run progress through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHooks;

impl<I> GenerationHooks<I> for LoggingHooks {
    fn on_run_start(&mut self) {
        info!("Evolution run starting");
    }

    fn on_generation_start(&mut self, generation: usize) {
        debug!("Generation {} starting...", generation);
    }

    fn on_generation_complete(&mut self, stats: &GenerationStats) {
        info!(
            "Generation {} complete. Best fitness: {:.4}, mean: {:.4}, invalid: {}, reversions: {}",
            stats.generation,
            stats.best_fitness,
            stats.mean_fitness,
            stats.invalid_count,
            stats.reversions
        );
    }

    fn on_run_end(&mut self, generations: usize) {
        info!("Evolution run finished after {} generations", generations);
    }
}

use anyhow::{Context, Result};
use gpe::config::ConfigManager;
use gpe::engines::generation::{EvolutionEngine, LoggingHooks};
use gpe::engines::initialisation::ge_initialiser;
use gpe::engines::mapping::DepthFirstMapper;
use gpe::grammar::Grammar;
use gpe::representation::ge::{DerivationTree, GrammarFitness, OnePointCrossover, PointMutation};
use std::path::Path;

/// Characters in the wrong position plus the length difference.
fn string_distance(candidate: &str, target: &str) -> f64 {
    let mismatched = candidate
        .chars()
        .zip(target.chars())
        .filter(|(a, b)| a != b)
        .count();
    let length_gap = candidate.chars().count().abs_diff(target.chars().count());
    (mismatched + length_gap) as f64
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: gpe <grammar.bnf> <target> [config.toml]");
        std::process::exit(2);
    }
    let grammar_path = &args[1];
    let target = args[2].clone();

    let grammar = Grammar::from_file(Path::new(grammar_path))
        .with_context(|| format!("Failed to load grammar {}", grammar_path))?;

    let config_manager = ConfigManager::new();
    if let Some(config_path) = args.get(3) {
        config_manager
            .load_layered(config_path)
            .with_context(|| format!("Failed to load config {}", config_path))?;
    }
    let config = config_manager.get();

    let mut evolution = config.evolution.clone();
    evolution.target_fitness.get_or_insert(0.0);

    let mapper = DepthFirstMapper::new(&grammar, config.mapping.clone());
    let mut fitness = GrammarFitness::new(mapper, |tree: &DerivationTree| {
        string_distance(&tree.terminals().concat(), &target)
    });
    let mut engine = EvolutionEngine::new(
        evolution,
        Box::new(OnePointCrossover::new()),
        Box::new(PointMutation::new(
            config.evolution.point_mutation_rate,
            config.mapping.codon_range(),
        )),
    )?;
    let mut initialiser = ge_initialiser(&grammar, &config)?;

    let report = engine.run(initialiser.as_mut(), &mut fitness, &mut LoggingHooks)?;

    match report.best.phenotype() {
        Some(tree) => println!("Best: \"{}\"", tree.terminals().concat()),
        None => println!("No valid individual found"),
    }
    println!("Fitness: {}", report.best_fitness());
    println!(
        "Generations: {}, reversions: {}, elapsed: {} ms",
        report.generations.len() - 1,
        report.total_reversions(),
        (report.finished_at - report.started_at).num_milliseconds()
    );
    if let Some(last) = report.generations.last() {
        println!("{}", last.to_json()?);
    }

    Ok(())
}

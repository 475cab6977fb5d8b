use super::{Grammar, RuleId, Symbol};

/// Minimum derivation depth of every rule, by fixed-point iteration.
///
/// `None` marks a rule that never reaches only terminals.
pub(crate) fn rule_min_depths(rules: &[Vec<Vec<Symbol>>]) -> Vec<Option<usize>> {
    let mut depths: Vec<Option<usize>> = vec![None; rules.len()];
    let mut changed = true;
    while changed {
        changed = false;
        for (index, alternatives) in rules.iter().enumerate() {
            let best = alternatives
                .iter()
                .filter_map(|symbols| expansion_depth(symbols, &depths))
                .min();
            if let Some(best) = best {
                if depths[index].map_or(true, |current| best < current) {
                    depths[index] = Some(best);
                    changed = true;
                }
            }
        }
    }
    depths
}

fn expansion_depth(symbols: &[Symbol], depths: &[Option<usize>]) -> Option<usize> {
    let mut deepest = 0;
    for symbol in symbols {
        if let Symbol::Rule(id) = symbol {
            deepest = deepest.max(depths[id.0]?);
        }
    }
    Some(deepest + 1)
}

pub(crate) fn production_min_depth(symbols: &[Symbol], rule_depths: &[usize]) -> usize {
    1 + symbols
        .iter()
        .filter_map(|symbol| match symbol {
            Symbol::Rule(id) => Some(rule_depths[id.0]),
            Symbol::Literal(_) => None,
        })
        .max()
        .unwrap_or(0)
}

/// For each rule, the set of rules reachable from it (itself included).
pub(crate) fn reachability(rules: &[Vec<Vec<Symbol>>]) -> Vec<Vec<bool>> {
    (0..rules.len())
        .map(|origin| {
            let mut seen = vec![false; rules.len()];
            let mut stack = vec![origin];
            seen[origin] = true;
            while let Some(current) = stack.pop() {
                for symbol in rules[current].iter().flatten() {
                    if let Symbol::Rule(id) = symbol {
                        if !seen[id.0] {
                            seen[id.0] = true;
                            stack.push(id.0);
                        }
                    }
                }
            }
            seen
        })
        .collect()
}

/// Whether any non-terminal in `symbols` can expand back into rule `target`.
pub(crate) fn reaches(symbols: &[Symbol], target: usize, reach: &[Vec<bool>]) -> bool {
    symbols.iter().any(|symbol| match symbol {
        Symbol::Rule(id) => reach[id.0][target],
        Symbol::Literal(_) => false,
    })
}

/// Distinct derivation trees rooted at `root` with depth at most `max_depth`.
///
/// Identical alternatives of one rule yield identical trees and are counted once.
pub(crate) fn count_trees(grammar: &Grammar, root: RuleId, max_depth: usize) -> u128 {
    let rules = grammar.rules();
    // counts[r] holds the count for the previous depth level
    let mut counts = vec![0u128; rules.len()];
    for _ in 0..max_depth {
        let next: Vec<u128> = rules
            .iter()
            .map(|rule| {
                let productions = rule.productions();
                productions
                    .iter()
                    .enumerate()
                    .filter(|(i, p)| !productions[..*i].iter().any(|q| q.symbols() == p.symbols()))
                    .map(|(_, p)| {
                        p.symbols().iter().fold(1u128, |acc, symbol| match symbol {
                            Symbol::Rule(id) => acc.saturating_mul(counts[id.0]),
                            Symbol::Literal(_) => acc,
                        })
                    })
                    .fold(0u128, u128::saturating_add)
            })
            .collect();
        counts = next;
    }
    counts[root.0]
}

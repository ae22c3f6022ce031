//! Compare command - run every strategy on the same tree in parallel.

use std::time::{Duration, Instant};

use adversarial_search::options::{SearchStrategyType, ALL_STRATEGY_TYPES};
use adversarial_search::strategy::{SearchError, SearchStrategy};
use log::{debug, info};
use rayon::prelude::*;
use structopt::StructOpt;

use super::util::{format_line, TreeArgs, TuningArgs};
use super::Command;

#[derive(StructOpt)]
pub struct CompareArgs {
    #[structopt(flatten)]
    pub tree: TreeArgs,
    #[structopt(flatten)]
    pub tuning: TuningArgs,
    /// Worker threads (default: one per core)
    #[structopt(short, long)]
    pub threads: Option<usize>,
}

struct Row {
    strategy_type: SearchStrategyType,
    best_move: String,
    value: i32,
    line: String,
    moves_considered: usize,
    elapsed: Duration,
}

impl CompareArgs {
    /// Each worker builds its own copy of the tree from the seed.
    fn run(&self, strategy_type: SearchStrategyType) -> Result<Option<Row>, SearchError> {
        let mut tree = self.tree.build();
        let root = tree.root_move();
        let options = self.tuning.options(strategy_type, self.tree.depth);
        let mut strategy = SearchStrategy::new(options)?;

        let start = Instant::now();
        let outcome = strategy.search(&mut tree, &root, None)?;
        let elapsed = start.elapsed();
        debug!("{} done in {:?}", strategy_type, elapsed);

        Ok(outcome.map(|outcome| Row {
            strategy_type,
            best_move: tree.label(&outcome.best_move).to_string(),
            value: outcome.inherited_value,
            line: format_line(&tree, &outcome.principal_variation),
            moves_considered: outcome.moves_considered,
            elapsed,
        }))
    }
}

impl Command for CompareArgs {
    fn execute(self) {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads.unwrap_or(0))
            .build()
        {
            Ok(pool) => pool,
            Err(err) => {
                eprintln!("Failed to start worker threads: {}", err);
                return;
            }
        };

        let results: Vec<_> = pool.install(|| {
            ALL_STRATEGY_TYPES
                .par_iter()
                .map(|&strategy_type| (strategy_type, self.run(strategy_type)))
                .collect()
        });

        let tree = self.tree.build();
        let expected = tree.minimax_value("").unwrap_or_default();
        info!(
            "compared {} strategies on a tree of {} nodes",
            results.len(),
            tree.len()
        );

        println!("minimax value of the tree: {}", expected);
        println!(
            "{:<20} {:>8} {:>8} {:>12} {:>12}  {}",
            "strategy", "move", "value", "considered", "time (ms)", "principal variation"
        );
        println!("{:-<90}", "");
        for (strategy_type, result) in results {
            match result {
                Ok(Some(row)) => println!(
                    "{:<20} {:>8} {:>8} {:>12} {:>12.2}  {}",
                    row.strategy_type.to_string(),
                    row.best_move,
                    row.value,
                    row.moves_considered,
                    row.elapsed.as_secs_f64() * 1_000.0,
                    row.line
                ),
                Ok(None) => println!("{:<20} no moves", strategy_type.to_string()),
                Err(err) => println!("{:<20} failed: {}", strategy_type.to_string(), err),
            }
        }
    }
}

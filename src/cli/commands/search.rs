//! Search command - run one strategy on a random game tree.

use adversarial_search::game_tree::TreeMove;
use adversarial_search::options::SearchStrategyType;
use adversarial_search::strategy::{NodeInfo, SearchStrategy, SearchTreeListener, TreeRecorder};
use log::info;
use rustc_hash::FxHashMap;
use structopt::StructOpt;

use super::util::{format_line, TreeArgs, TuningArgs};
use super::Command;

#[derive(StructOpt)]
pub struct SearchArgs {
    #[structopt(short, long, default_value = "negamax")]
    pub strategy: SearchStrategyType,
    #[structopt(flatten)]
    pub tree: TreeArgs,
    #[structopt(flatten)]
    pub tuning: TuningArgs,
    /// Print the tree and every node the search visited
    #[structopt(long)]
    pub show_tree: bool,
}

impl Command for SearchArgs {
    fn execute(self) {
        let mut tree = self.tree.build();
        let options = self.tuning.options(self.strategy, self.tree.depth);
        let mut strategy = match SearchStrategy::new(options) {
            Ok(strategy) => strategy,
            Err(err) => {
                eprintln!("{}", err);
                return;
            }
        };

        if self.show_tree {
            println!("{}", tree);
        }

        let root = tree.root_move();
        let mut recorder: TreeRecorder<TreeMove> = TreeRecorder::default();
        let listener: Option<&mut dyn SearchTreeListener<TreeMove>> = if self.show_tree {
            Some(&mut recorder)
        } else {
            None
        };

        let outcome = match strategy.search(&mut tree, &root, listener) {
            Ok(Some(outcome)) => outcome,
            Ok(None) => {
                eprintln!("The root of the tree has no moves.");
                return;
            }
            Err(err) => {
                eprintln!("Search failed: {}", err);
                return;
            }
        };
        info!(
            "{} finished, table {}",
            self.strategy,
            strategy.transposition_table()
        );

        if self.show_tree {
            let mut depths = FxHashMap::default();
            for node in &recorder.nodes {
                let depth = depths.get(&node.parent).copied().unwrap_or(0) + 1;
                depths.insert(node.child, depth);
                let detail = match node.info {
                    NodeInfo::Window(window) => format!("window {}", window),
                    NodeInfo::Playouts { visits, wins } => {
                        format!("{} visits, {:.1} wins", visits, wins)
                    }
                };
                println!(
                    "{:indent$}{} ({})",
                    "",
                    tree.label(&node.mv),
                    detail,
                    indent = 2 * (depth - 1)
                );
            }
            println!("{} cutoffs, {} moves pruned", recorder.cutoffs, recorder.pruned);
        }

        println!("strategy:           {}", self.strategy);
        println!("best move:          {}", tree.label(&outcome.best_move));
        println!("value:              {}", outcome.inherited_value);
        println!(
            "principal variation: {}",
            format_line(&tree, &outcome.principal_variation)
        );
        println!("moves considered:   {}", outcome.moves_considered);
        if let Ok(expected) = tree.minimax_value("") {
            println!("minimax value:      {}", expected);
        }
        for (mv, visits) in &outcome.root_visits {
            println!("  {} visited {} times", tree.label(mv), visits);
        }
    }
}

//! Arguments shared by the commands.

use adversarial_search::game_tree::{GameTree, TreeMove};
use adversarial_search::options::{
    BestMovesSearchOptions, BruteSearchOptions, MonteCarloSearchOptions, SearchOptions,
    SearchStrategyType,
};
use structopt::StructOpt;

#[derive(StructOpt, Clone, Debug)]
pub struct TreeArgs {
    /// Plies in the generated tree
    #[structopt(short, long, default_value = "4")]
    pub depth: u32,
    /// Children of every inner node
    #[structopt(short, long, default_value = "3")]
    pub branching: usize,
    /// Leaf values are drawn from -max-value..=max-value
    #[structopt(long, default_value = "100")]
    pub max_value: i32,
    /// Seed of the generated tree
    #[structopt(long, default_value = "0")]
    pub seed: u64,
}

impl TreeArgs {
    pub fn build(&self) -> GameTree {
        GameTree::random(self.depth, self.branching, self.max_value, self.seed)
    }
}

#[derive(StructOpt, Clone, Debug)]
pub struct TuningArgs {
    /// Plies the brute-force strategies search (default: the tree depth)
    #[structopt(long)]
    pub look_ahead: Option<u32>,
    #[structopt(long)]
    pub no_alpha_beta: bool,
    #[structopt(long)]
    pub quiescence: bool,
    #[structopt(long, default_value = "8")]
    pub max_quiescent_depth: u32,
    /// Percentage of the ordered moves to search at every node
    #[structopt(long, default_value = "100")]
    pub percentage_best: u32,
    #[structopt(long, default_value = "10")]
    pub min_best: usize,
    /// UCT simulations per search
    #[structopt(long, default_value = "1000")]
    pub simulations: u32,
    #[structopt(long, default_value = "1.0")]
    pub explore_exploit_ratio: f64,
    /// Plies of a random UCT playout
    #[structopt(long, default_value = "20")]
    pub playout_depth: u32,
    /// Seed of the UCT playouts (default: random)
    #[structopt(long)]
    pub uct_seed: Option<u64>,
}

impl TuningArgs {
    pub fn options(&self, strategy_type: SearchStrategyType, tree_depth: u32) -> SearchOptions {
        let look_ahead = self.look_ahead.unwrap_or(tree_depth).max(1);
        let brute = BruteSearchOptions::default()
            .with_look_ahead(look_ahead)
            .with_alpha_beta(!self.no_alpha_beta)
            .with_quiescence(self.quiescence)
            .with_max_quiescent_depth(self.max_quiescent_depth.max(look_ahead));

        let mut monte_carlo = MonteCarloSearchOptions::default()
            .with_max_simulations(self.simulations)
            .with_explore_exploit_ratio(self.explore_exploit_ratio)
            .with_random_look_ahead(self.playout_depth);
        if let Some(seed) = self.uct_seed {
            monte_carlo = monte_carlo.with_seed(seed);
        }

        SearchOptions::new(strategy_type)
            .with_brute(brute)
            .with_best_moves(BestMovesSearchOptions::new(
                self.percentage_best,
                self.min_best,
                0,
            ))
            .with_monte_carlo(monte_carlo)
    }
}

pub(crate) fn format_line(tree: &GameTree, moves: &[TreeMove]) -> String {
    moves
        .iter()
        .map(|mv| tree.label(mv))
        .collect::<Vec<_>>()
        .join(" ")
}

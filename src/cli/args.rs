//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{compare::CompareArgs, search::SearchArgs};

#[derive(StructOpt)]
#[structopt(
    name = "adversarial-search",
    about = "Run two-player game-tree search strategies against random game trees"
)]
pub enum SearchCli {
    #[structopt(
        name = "search",
        about = "Search a random game tree of the given `--depth` and `--branching` (default: 4 and 3) with one `--strategy` (default: negamax) and print the chosen move, its value and the principal variation. Use `--show-tree` to also print the tree and every node the search visited."
    )]
    Search(SearchArgs),
    #[structopt(
        name = "compare",
        about = "Run every strategy on the same random game tree in parallel and report the move each one chose, its value, the number of moves considered and the time taken."
    )]
    Compare(CompareArgs),
}

impl crate::cli::commands::Command for SearchCli {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            Search(cmd),
            Compare(cmd),
        }
    }
}

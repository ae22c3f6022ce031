mod cli;

use cli::commands::Command;
use cli::SearchCli;
use structopt::StructOpt;

fn main() {
    env_logger::init();

    #[cfg(feature = "instrumentation")]
    adversarial_search::instrumentation::init_tracing();

    SearchCli::from_args().execute();

    #[cfg(feature = "instrumentation")]
    adversarial_search::instrumentation::print_timing_statistics();
}

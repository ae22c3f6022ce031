use adversarial_search::game_tree::GameTree;
use adversarial_search::options::{
    BruteSearchOptions, MonteCarloSearchOptions, SearchOptions, SearchStrategyType,
};
use adversarial_search::strategy::SearchStrategy;

use criterion::{criterion_group, criterion_main, Criterion};

const TREE_DEPTH: u32 = 6;
const TREE_BRANCHING: usize = 5;
const TREE_SEED: u64 = 42;

fn criterion_benchmark(c: &mut Criterion) {
    for &strategy_type in &[
        SearchStrategyType::MiniMax,
        SearchStrategyType::NegaMax,
        SearchStrategyType::NegaMaxWithMemory,
        SearchStrategyType::NegaScout,
        SearchStrategyType::Mtd,
    ] {
        let name = format!("{} depth {} random tree", strategy_type, TREE_DEPTH);
        c.bench_function(&name, |b| b.iter(|| search_random_tree(strategy_type)));
    }

    c.bench_function("uct 1000 simulations random tree", |b| {
        b.iter(|| search_random_tree(SearchStrategyType::Uct))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn search_random_tree(strategy_type: SearchStrategyType) -> i32 {
    let mut tree = GameTree::random(TREE_DEPTH, TREE_BRANCHING, 1000, TREE_SEED);
    let root = tree.root_move();
    let options = SearchOptions::new(strategy_type)
        .with_brute(BruteSearchOptions::default().with_look_ahead(TREE_DEPTH))
        .with_monte_carlo(MonteCarloSearchOptions::default().with_seed(TREE_SEED));
    let mut strategy = SearchStrategy::new(options).unwrap();

    strategy
        .search(&mut tree, &root, None)
        .unwrap()
        .map(|outcome| outcome.inherited_value)
        .unwrap_or_default()
}

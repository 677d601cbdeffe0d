use algotrace::logic::analyze_with_config;
use algotrace::{
    replay, BinaryTree, EngineConfig, GraphGenerator, PathAlgorithm, PathStats, SearchAlgorithm,
    SearchStrategy, SortAlgorithm, TraversalOrder, TreeModel,
};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::env;
use tracing_subscriber::EnvFilter;

const CANVAS_WIDTH: f64 = 800.0;
const CANVAS_HEIGHT: f64 = 600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Engine {
    Sort,
    Search,
    Path,
    Tree,
    Logic,
}

struct Config {
    engine: Engine,
    algorithm: Option<String>,
    size: usize,
    seed: Option<u64>,
    target: Option<i64>,
    expression: Option<String>,
    config_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            engine: Engine::Sort,
            algorithm: None,
            size: 10,
            seed: None,
            target: None,
            expression: None,
            config_file: None,
        }
    }
}

fn parse_args() -> Result<Config> {
    let args: Vec<String> = env::args().collect();
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-engine" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-engine requires an argument");
                }
                config.engine = match args[i].as_str() {
                    "sort" => Engine::Sort,
                    "search" => Engine::Search,
                    "path" => Engine::Path,
                    "tree" => Engine::Tree,
                    "logic" => Engine::Logic,
                    other => anyhow::bail!("Unknown engine: {}", other),
                };
            }
            "-algo" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-algo requires an argument");
                }
                config.algorithm = Some(args[i].clone());
            }
            "-size" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-size requires an argument");
                }
                config.size = args[i].parse()?;
            }
            "-seed" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-seed requires an argument");
                }
                config.seed = Some(args[i].parse()?);
            }
            "-target" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-target requires an argument");
                }
                config.target = Some(args[i].parse()?);
            }
            "-expr" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-expr requires an expression argument");
                }
                config.expression = Some(args[i].clone());
            }
            "-config" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-config requires a file path argument");
                }
                config.config_file = Some(args[i].clone());
            }
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Warning: Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Algorithm Trace Generator");
    println!("Usage: algotrace-gen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -engine <NAME>         One of sort, search, path, tree, logic (default: sort)");
    println!("  -algo <NAME>           Algorithm or strategy for the engine:");
    println!("                           sort:   bubble, insertion, merge, quick, bogo");
    println!("                           search: linear, binary");
    println!("                           path:   bfs, dfs, dijkstra, astar");
    println!("                           tree:   logic, bfs, dfs");
    println!("  -size <N>              Array length, node count or tree size (default: 10)");
    println!("  -seed <N>              Seed for reproducible input (default: random)");
    println!("  -target <N>            Search target for search and tree engines");
    println!("  -expr <EXPR>           Boolean expression for the logic engine");
    println!("  -config <FILE>         JSON engine configuration");
    println!("  -h, -help, --help      Show this help message");
    println!();
    println!("Output is one JSON document per line on stdout. Set RUST_LOG for diagnostics on stderr.");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn emit<S: Serialize>(value: &S) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let config = parse_args()?;

    let engine_config = match &config.config_file {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            EngineConfig::load(Some(&text))
        }
        None => EngineConfig::new(),
    };

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match config.engine {
        Engine::Sort => run_sort(&config, &engine_config, &mut rng),
        Engine::Search => run_search(&config, &mut rng),
        Engine::Path => run_path(&config, &engine_config, &mut rng),
        Engine::Tree => run_tree(&config, &engine_config, &mut rng),
        Engine::Logic => run_logic(&config, &engine_config),
    }
}

fn algorithm_or<T: std::str::FromStr<Err = String>>(config: &Config, default: T) -> Result<T> {
    match &config.algorithm {
        Some(name) => name.parse().map_err(anyhow::Error::msg),
        None => Ok(default),
    }
}

fn random_values(rng: &mut StdRng, size: usize) -> Vec<i64> {
    (0..size).map(|_| rng.gen_range(1..=100)).collect()
}

fn run_sort(config: &Config, engine_config: &EngineConfig, rng: &mut StdRng) -> Result<()> {
    let algorithm: SortAlgorithm = algorithm_or(config, SortAlgorithm::Bubble)?;
    let input = random_values(rng, config.size);
    let trace = algorithm.run_with_config(&input, &engine_config.sorting, config.seed);

    emit(&serde_json::json!({ "engine": "sort", "algorithm": algorithm.to_string(), "input": input }))?;
    for instruction in &trace {
        emit(instruction)?;
    }
    emit(&serde_json::json!({ "instructions": trace.len(), "output": replay(&input, &trace) }))
}

fn run_search(config: &Config, rng: &mut StdRng) -> Result<()> {
    let algorithm: SearchAlgorithm = algorithm_or(config, SearchAlgorithm::Linear)?;
    let mut input = random_values(rng, config.size);
    if algorithm == SearchAlgorithm::Binary {
        input.sort_unstable();
    }
    let target = match config.target {
        Some(target) => target,
        None if input.is_empty() => 0,
        None => input[rng.gen_range(0..input.len())],
    };
    let trace = algorithm.run(&input, &target);

    emit(&serde_json::json!({
        "engine": "search",
        "algorithm": algorithm.to_string(),
        "input": input,
        "target": target,
    }))?;
    for instruction in &trace {
        emit(instruction)?;
    }
    emit(&serde_json::json!({ "found": algotrace::found_index(&trace) }))
}

fn run_path(config: &Config, engine_config: &EngineConfig, rng: &mut StdRng) -> Result<()> {
    let algorithm: PathAlgorithm = algorithm_or(config, PathAlgorithm::Bfs)?;
    if config.size == 0 {
        anyhow::bail!("-size must be at least 1 for the path engine");
    }
    let graph = GraphGenerator::with_config(config.size, CANVAS_WIDTH, CANVAS_HEIGHT, engine_config.graph.clone())
        .with_seed(rng.gen())
        .generate();
    let (start, end) = (0, config.size - 1);
    let result = graph.find_path(algorithm, start, end);

    emit(&serde_json::json!({ "engine": "path", "algorithm": algorithm.to_string(), "info": algorithm.info() }))?;
    emit(&graph)?;
    emit(&result)?;
    emit(&serde_json::json!({ "stats": PathStats::from_path(&graph.nodes, &result.path) }))
}

fn run_tree(config: &Config, engine_config: &EngineConfig, rng: &mut StdRng) -> Result<()> {
    let strategy: SearchStrategy = algorithm_or(config, SearchStrategy::Logic)?;
    let values = random_values(rng, config.size);
    let mut tree = BinaryTree::new();
    for value in &values {
        tree.insert(*value);
    }
    let extent = tree.layout(&engine_config.tree_layout);
    let target = config.target.or_else(|| values.last().copied()).unwrap_or(0);

    emit(&serde_json::json!({ "engine": "tree", "strategy": strategy.to_string(), "inserted": values }))?;
    for order in [TraversalOrder::Bfs, TraversalOrder::PreOrder, TraversalOrder::InOrder, TraversalOrder::PostOrder] {
        let visited = TreeModel::traverse(&tree, order)?;
        emit(&serde_json::json!({ "traversal": order.to_string(), "values": visited }))?;
    }
    emit(&serde_json::json!({ "target": target, "search": tree.search(&target, strategy) }))?;
    emit(&serde_json::json!({ "extent": extent, "root": tree.root() }))
}

fn run_logic(config: &Config, engine_config: &EngineConfig) -> Result<()> {
    let Some(expression) = &config.expression else {
        anyhow::bail!("-expr is required for the logic engine");
    };
    let analysis = analyze_with_config(expression, &engine_config.logic)?;

    emit(&serde_json::json!({ "engine": "logic", "expression": analysis.expression }))?;
    emit(&analysis.table.to_json())?;
    emit(&serde_json::json!({ "minterms": analysis.table.minterms(), "simplified": analysis.simplified }))
}

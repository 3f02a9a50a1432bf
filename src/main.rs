//! Ghost Life CLI - Run simulations from arguments or JSON configuration.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use ghost_life::{
    compute::{CpuPropagator, SimulationState, SimulationStats},
    render,
    schema::{ConfigError, Seed, SimulationConfig},
};

const DEFAULT_DELAY_MS: u64 = 600;

/// Render options split off the argument list.
struct RenderOptions {
    enabled: bool,
    delay: Duration,
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let time_start = Instant::now();
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("ghost-life");

    if args.get(1).map(String::as_str) == Some("--example") {
        print_example_config();
        return;
    }

    let (positional, render_opts) = match split_args(&args[1.min(args.len())..]) {
        Ok(split) => split,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(program);
            std::process::exit(1);
        }
    };

    let (config, seed) = match positional.len() {
        1 => load_config_and_seed(Path::new(positional[0])),
        4 => SimulationConfig::from_positional(&positional)
            .map(|config| {
                let seed = Seed::random(config.probability, config.rng_seed);
                (config, seed)
            }),
        n => Err(ConfigError::ArgumentCount(n)),
    }
    .unwrap_or_else(|e| {
        eprintln!("Wrong input! {}", e);
        print_usage(program);
        std::process::exit(1);
    });

    println!("Ghost Life Simulation");
    println!("=====================");
    println!("Grid: {}x{} (+ dead border)", config.size, config.size);
    println!("Steps: {}", config.steps);
    println!("Strategy: {:?}", config.strategy);
    println!();

    let mut state = SimulationState::from_initializer(config.size, &seed).unwrap_or_else(|e| {
        eprintln!("Error creating grid: {}", e);
        std::process::exit(1);
    });
    let steps = config.steps;
    let mut propagator = CpuPropagator::new(config).unwrap_or_else(|e| {
        eprintln!("Error creating propagator: {}", e);
        std::process::exit(1);
    });

    let initial_stats = SimulationStats::from_state(&state);
    println!("Threads: {}", propagator.threads());
    println!(
        "Initial population: {} ({:.1}%)",
        initial_stats.population,
        initial_stats.density * 100.0
    );
    println!();

    let start = Instant::now();
    let result = if render_opts.enabled {
        print!("{}", render::render_frame(&state.grid, state.generation));
        propagator.run_with(&mut state, steps, |s| {
            thread::sleep(render_opts.delay);
            print!("{}", render::render_frame(&s.grid, s.generation));
            ControlFlow::Continue(())
        })
    } else {
        propagator.run_with(&mut state, steps, |s| {
            if s.generation % (steps / 10).max(1) == 0 {
                let stats = SimulationStats::from_state(s);
                let elapsed = start.elapsed().as_secs_f32();
                println!(
                    "  Step {}/{}: population={}, {:.1} steps/s",
                    stats.generation,
                    steps,
                    stats.population,
                    stats.generation as f32 / elapsed
                );
            }
            ControlFlow::Continue(())
        })
    };
    if let Err(e) = result {
        eprintln!("Error during simulation: {}", e);
        std::process::exit(1);
    }
    let elapsed = start.elapsed();

    let final_stats = SimulationStats::from_state(&state);
    println!();
    println!("Final state:");
    println!("  Generation: {}", final_stats.generation);
    println!(
        "  Population: {} ({:.1}%)",
        final_stats.population,
        final_stats.density * 100.0
    );
    println!(
        "Time: {:.3}s ({:.1} steps/s)",
        elapsed.as_secs_f32(),
        steps as f32 / elapsed.as_secs_f32()
    );
    println!();
    println!("Program ended. Have a Good Life!");
    println!(
        "ghost-life main took {:7.3} wall seconds.",
        time_start.elapsed().as_secs_f64()
    );
}

/// Separate `--render` / `--delay <ms>` from positional arguments.
fn split_args(args: &[String]) -> Result<(Vec<&str>, RenderOptions), ConfigError> {
    let mut positional = Vec::new();
    let mut opts = RenderOptions {
        enabled: false,
        delay: Duration::from_millis(DEFAULT_DELAY_MS),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--render" => opts.enabled = true,
            "--delay" => {
                let value = iter.next().map(String::as_str).unwrap_or("");
                let ms: u64 = value.parse().map_err(|_| ConfigError::InvalidArgument {
                    name: "delay",
                    value: value.to_string(),
                })?;
                opts.delay = Duration::from_millis(ms);
            }
            other => positional.push(other),
        }
    }

    Ok((positional, opts))
}

/// Load config, plus `<config>.seed.json` if present. Otherwise seed randomly
/// from the config's probability.
fn load_config_and_seed(config_path: &Path) -> Result<(SimulationConfig, Seed), ConfigError> {
    let config = SimulationConfig::load(config_path)?;

    let seed_path: PathBuf = config_path.with_extension("seed.json");
    let seed = if seed_path.exists() {
        let seed_str = fs::read_to_string(&seed_path)?;
        let seed: Seed = serde_json::from_str(&seed_str)?;
        seed.validate()?;
        seed
    } else {
        Seed::random(config.probability, config.rng_seed)
    };

    Ok((config, seed))
}

fn print_usage(program: &str) {
    eprintln!();
    eprintln!("Usage: {} <N> <steps> <probability> <threads> [--render] [--delay <ms>]", program);
    eprintln!("       {} <config.json> [--render] [--delay <ms>]", program);
    eprintln!("       {} --example", program);
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  N            Size of world (interior side length)");
    eprintln!("  steps        Number of steps in the simulation. Integer.");
    eprintln!("  probability  Chance of living cell. Given as integer [1,10]");
    eprintln!("  threads      Number of threads for parallelization");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --render     Print the grid after every step");
    eprintln!("  --delay <ms> Pause between rendered frames (default: {})", DEFAULT_DELAY_MS);
}

fn print_example_config() {
    let config = SimulationConfig::default();
    let seed = Seed::glider(1, 1);

    let (Ok(config_json), Ok(seed_json)) = (
        serde_json::to_string_pretty(&config),
        serde_json::to_string_pretty(&seed),
    ) else {
        eprintln!("Error serializing example configuration");
        std::process::exit(1);
    };

    println!("Example configuration (config.json):");
    println!("{}", config_json);
    println!();
    println!("Example seed (config.seed.json):");
    println!("{}", seed_json);
}

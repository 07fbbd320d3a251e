//! Memsim interactive shell
//!
//! Thin command loop over the engine: parses textual commands, dispatches to
//! `Arena` operations and prints the results.

use anyhow::Result;
use clap::Parser;
use memsim_rs::{format_ascii, format_layout, Arena, Strategy, DEFAULT_MAP_WIDTH};
use std::io::{self, BufRead, Write};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "memsim-shell")]
#[command(about = "Interactive simulator for dynamic memory allocation strategies")]
struct Args {
    /// Simulated address-space capacity in units
    #[arg(short, long, default_value_t = 1024)]
    capacity: u64,

    /// Initial placement strategy (first, best, worst, buddy)
    #[arg(short, long, default_value = "first")]
    strategy: String,
}

const HELP: &str = "Commands:
  alloc <size>        - Allocate memory, prints the owner id
  free <id>           - Free a block by id
  strategy <name>     - Switch strategy (first, best, worst, buddy)
  show                - Show memory layout
  map [width]         - ASCII map of the address space
  frag | stats        - Fragmentation statistics
  dump                - Segment table as JSON
  reset [capacity]    - Reset the arena (optionally with a new capacity)
  help                - This text
  exit                - Quit";

fn print_report(arena: &Arena) {
    let report = arena.fragmentation_report();
    println!("Total free: {}", report.total_free);
    println!("Largest free: {}", report.largest_free);
    println!("Fragments: {}", report.fragment_count);
    println!(
        "External fragmentation: {:.3}",
        report.external_fragmentation
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let strategy: Strategy = args.strategy.parse().map_err(anyhow::Error::msg)?;

    let mut arena = Arena::new(args.capacity)?;
    arena.set_strategy(strategy);
    info!("shell started with capacity {}", args.capacity);

    println!(
        "memsim shell - capacity {}, strategy {} (type 'help' for commands)",
        arena.capacity(),
        arena.strategy()
    );

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "alloc" => match parts.next().and_then(|s| s.parse::<u64>().ok()) {
                Some(size) => match arena.allocate(size) {
                    Ok(id) => println!("Allocated ID: {}", id),
                    Err(err) => println!("{}", err),
                },
                None => println!("usage: alloc <size>"),
            },
            "free" => match parts.next().and_then(|s| s.parse::<u32>().ok()) {
                Some(id) => match arena.free(id) {
                    Ok(()) => println!("Freed ID: {}", id),
                    Err(err) => println!("{}", err),
                },
                None => println!("usage: free <id>"),
            },
            "strategy" => match parts.next().map(str::parse::<Strategy>) {
                Some(Ok(strategy)) => {
                    arena.set_strategy(strategy);
                    println!("Strategy set to {}", strategy);
                }
                Some(Err(err)) => println!("{}", err),
                None => println!("usage: strategy <first|best|worst|buddy>"),
            },
            "show" => print!("{}", format_layout(arena.snapshot())),
            "map" => {
                let width = parts
                    .next()
                    .and_then(|s| s.parse::<usize>().ok())
                    .filter(|w| *w > 0)
                    .unwrap_or(DEFAULT_MAP_WIDTH);
                println!("{}", format_ascii(arena.snapshot(), width));
            }
            "frag" | "stats" => print_report(&arena),
            "dump" => println!("{}", serde_json::to_string_pretty(arena.snapshot())?),
            "reset" => match parts.next() {
                None => {
                    arena.reset();
                    println!("Arena reset (capacity {})", arena.capacity());
                }
                Some(raw) => match raw.parse::<u64>().map(Arena::new) {
                    Ok(Ok(mut fresh)) => {
                        fresh.set_strategy(arena.strategy());
                        arena = fresh;
                        println!("Arena reset (capacity {})", arena.capacity());
                    }
                    Ok(Err(err)) => println!("{}", err),
                    Err(_) => println!("usage: reset [capacity]"),
                },
            },
            "help" => println!("{}", HELP),
            "exit" | "quit" => break,
            _ => println!("Unknown command (type 'help')"),
        }
    }
    Ok(())
}

//! Terminal demo: generate a random maze, search it and print the result.
//!
//! Run: cargo run --bin gridtrail -- --rows 20 --cols 40 --seed 7 -v

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use gridtrail_demos::{Args, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // `log` records from the library crates are bridged into this subscriber.
    let filter = match args.log_directive() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let run = run(&args.config())?;
    if args.frames {
        for (i, event) in run.search.trace.iter().enumerate() {
            println!("frame {i}: cursor at {}", event.cursor);
            println!("{}\n", event.snapshot);
        }
    }
    println!("{}", run.report());
    Ok(())
}

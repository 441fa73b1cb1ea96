mod cli;
mod input;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use taskheap_core::config::{load_dotenv, Config, LogConfig};
use taskheap_core::Task;
use taskheap_queue::{PriorityQueue, QueueError};

use crate::cli::CliArgs;
use crate::input::TaskSpec;

fn main() -> Result<()> {
    load_dotenv();
    let args = CliArgs::parse();

    // Initialize tracing from the log filter alone, so warnings raised while
    // resolving the rest of the config reach stderr.
    let log = LogConfig::for_profile(profile_of(&args));
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = load_config(&args);
    config.log_summary();

    let specs = if args.tasks.is_empty() {
        input::read_lines(io::stdin().lock())?
    } else {
        args.tasks
            .iter()
            .map(|arg| input::parse_arg(arg))
            .collect::<Result<Vec<_>>>()?
    };

    let mut queue =
        PriorityQueue::from_config(&config.queue).context("failed to create priority queue")?;
    let dropped = fill(&mut queue, &specs)?;
    if dropped > 0 {
        warn!(
            dropped,
            capacity = queue.capacity(),
            "some tasks did not fit in the queue and were skipped"
        );
    }
    info!(queued = queue.len(), "extracting tasks in priority order");

    let ordered: Vec<Task> = queue.drain_sorted().collect();
    print_tasks(&ordered, args.json)
}

fn profile_of(args: &CliArgs) -> &str {
    args.profile.as_deref().unwrap_or("")
}

/// Resolve the environment config for the selected profile, then apply flag overrides.
fn load_config(args: &CliArgs) -> Config {
    let mut config = Config::for_profile(profile_of(args));
    if let Some(capacity) = args.capacity {
        config.queue.capacity = capacity;
    }
    if let Some(max_bytes) = args.max_description_bytes {
        config.queue.description_max_bytes = max_bytes;
    }
    config
}

/// Insert every spec, counting those rejected because the queue was full.
fn fill(queue: &mut PriorityQueue, specs: &[TaskSpec]) -> Result<usize> {
    let mut dropped = 0;
    for spec in specs {
        match queue.insert(spec.priority, &spec.description) {
            Ok(()) => {}
            Err(QueueError::CapacityExceeded { .. }) => dropped += 1,
            Err(e) => return Err(e).context("failed to insert task"),
        }
    }
    Ok(dropped)
}

fn print_tasks(tasks: &[Task], json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, tasks).context("failed to encode tasks")?;
        writeln!(out)?;
    } else {
        writeln!(out, "Tasks in priority order:")?;
        for task in tasks {
            writeln!(out, "{task}")?;
        }
    }
    out.flush()?;
    Ok(())
}

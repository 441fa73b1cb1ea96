use clap::Parser;

/// Order tasks by priority with a fixed-capacity min-heap.
///
/// Tasks are given as `PRIORITY:DESCRIPTION` arguments, or read from stdin
/// as `PRIORITY DESCRIPTION` lines when no arguments are passed. They are
/// printed lowest priority first.
#[derive(Parser, Debug)]
#[command(name = "taskheap", version, about = "Order tasks by priority with a fixed-capacity min-heap")]
pub struct CliArgs {
    /// Tasks as PRIORITY:DESCRIPTION (e.g. `3:deploy`, `-1:hotfix`); options go before tasks
    #[arg(allow_hyphen_values = true)]
    pub tasks: Vec<String>,

    /// Maximum number of tasks held (overrides TASKHEAP_CAPACITY)
    #[arg(long, short = 'c')]
    pub capacity: Option<usize>,

    /// Byte bound for descriptions (overrides TASKHEAP_DESCRIPTION_MAX_BYTES)
    #[arg(long)]
    pub max_description_bytes: Option<usize>,

    /// Config profile; keys are looked up as {PROFILE}_{KEY} first
    #[arg(long, env = "TASKHEAP_PROFILE")]
    pub profile: Option<String>,

    /// Emit the extraction order as a JSON array
    #[arg(long)]
    pub json: bool,
}

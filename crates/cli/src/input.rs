//! Task input parsing. Everything is validated here so the queue only ever
//! sees well-formed priorities.

use std::io::BufRead;

use anyhow::{bail, Context, Result};

/// A validated task waiting to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub priority: i32,
    pub description: String,
}

/// Parse a `PRIORITY:DESCRIPTION` command-line argument.
pub fn parse_arg(arg: &str) -> Result<TaskSpec> {
    let Some((priority, description)) = arg.split_once(':') else {
        bail!("task '{arg}' must be written as PRIORITY:DESCRIPTION");
    };
    build(priority, description).with_context(|| format!("invalid task '{arg}'"))
}

/// Parse a `PRIORITY DESCRIPTION` input line; the description is the rest of the line.
pub fn parse_line(line: &str) -> Result<TaskSpec> {
    let line = line.trim();
    let (priority, description) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    build(priority, description)
}

/// Read one task per non-blank line.
pub fn read_lines(reader: impl BufRead) -> Result<Vec<TaskSpec>> {
    let mut specs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("failed to read task input")?;
        if line.trim().is_empty() {
            continue;
        }
        let spec = parse_line(&line).with_context(|| format!("line {}", idx + 1))?;
        specs.push(spec);
    }
    Ok(specs)
}

fn build(priority: &str, description: &str) -> Result<TaskSpec> {
    let priority = priority.trim();
    let priority: i32 = priority.parse().with_context(|| {
        format!(
            "priority '{priority}' is not an integer between {} and {}",
            i32::MIN,
            i32::MAX
        )
    })?;
    let description = description.trim();
    if description.is_empty() {
        bail!("task with priority {priority} has no description");
    }
    Ok(TaskSpec {
        priority,
        description: description.to_string(),
    })
}

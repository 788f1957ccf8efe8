//! User interface module - interaction (prompts) and formatting.
//!
//! - `formatter` - Formatting and printing of plans and outcomes
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

pub mod formatter;

pub use formatter::{
    display_error, display_fetch_outcome, display_ordering, display_plan, display_release,
    display_status, display_success,
};

/// Ask a yes/no question on stdin; anything but `y`/`yes` is a no.
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;
    read_confirmation(&mut io::stdin().lock())
}

fn read_confirmation<R: BufRead>(input: &mut R) -> Result<bool> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let response = line.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

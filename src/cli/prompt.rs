//! Interactive line prompts.

use std::io::{self, BufRead, Write};

use console::style;

use crate::config::{parse_post_count, parse_subreddit};
use crate::error::{Error, Result};

/// Line-based prompt over any reader/writer pair.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` and read one line. EOF aborts.
    pub fn ask(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(Error::Aborted);
        }
        Ok(line.trim().to_string())
    }

    fn complain(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", style(message).red())?;
        Ok(())
    }

    /// Ask for a subreddit until a valid name is given.
    pub fn ask_subreddit(&mut self) -> Result<String> {
        loop {
            let answer = self.ask("Enter the subreddit name: ")?;
            match parse_subreddit(&answer) {
                Ok(name) => return Ok(name),
                Err(Error::ConfigValidation { message, .. }) => self.complain(&message)?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Ask for the number of posts until a valid count is given.
    pub fn ask_post_count(&mut self) -> Result<usize> {
        loop {
            let answer = self.ask("Enter the number of posts to display: ")?;
            match parse_post_count(&answer) {
                Ok(count) => return Ok(count),
                Err(Error::ConfigValidation { message, .. }) => self.complain(&message)?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Ask for a post number in `1..=count`; returns the 0-based index.
    pub fn select_post(&mut self, count: usize) -> Result<usize> {
        loop {
            let answer = self.ask(&format!("Select a post by number (1-{}): ", count))?;
            match answer.parse::<i64>() {
                Ok(n) if n >= 1 && (n as u64) <= count as u64 => return Ok(n as usize - 1),
                Ok(_) => {
                    self.complain(&format!("Please enter a number between 1 and {}.", count))?
                }
                Err(_) => self.complain("Invalid input. Please enter a number.")?,
            }
        }
    }
}

/// Check a pre-supplied selection (e.g. `--select`) against the listing size.
pub fn validate_selection(selection: usize, count: usize) -> Result<usize> {
    if selection >= 1 && selection <= count {
        Ok(selection - 1)
    } else {
        Err(Error::ConfigValidation {
            field: "select".to_string(),
            message: format!("Please enter a number between 1 and {}.", count),
        })
    }
}

//! User input utilities for interactive command-line prompts.
//!
//! This module provides functions for safely collecting user input
//! including strings, confirmations and sign-in credentials.

use anyhow::{Context, Result};
use inovasi_core::Credentials;
use std::io::{self, Write};

/// Prompts the user for a string input.
///
/// Displays a prompt message and waits for the user to enter text.
/// The input is read from stdin and returned with whitespace trimmed.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn prompt_string(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush().context("Failed to flush prompt")?;

    let mut input: String = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read user input")?;

    Ok(input.trim().to_string())
}

/// Prompts the user for a yes/no confirmation.
///
/// Accepts 'y', 'yes', 'n', 'no' (case insensitive).
/// Empty input is treated as 'no'.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    loop {
        let input = prompt_string(&format!("{prompt} (y/N)"))?;
        match parse_confirmation(&input) {
            Some(answer) => return Ok(answer),
            None => eprintln!("Please enter 'y' for yes or 'n' for no."),
        }
    }
}

fn parse_confirmation(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "y" | "yes" | "ya" => Some(true),
        "n" | "no" | "tidak" | "" => Some(false),
        _ => None,
    }
}

/// Prompts for the administrator username and password.
///
/// The password is read as a plain line; the terminal echoes it.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn prompt_credentials() -> Result<Credentials> {
    println!("Administrator sign-in required.");
    let username = prompt_string("Username")?;
    let password = prompt_string("Password")?;
    Ok(Credentials::new(username, password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_confirmation() {
        assert_eq!(parse_confirmation("Y"), Some(true));
        assert_eq!(parse_confirmation("yes"), Some(true));
        assert_eq!(parse_confirmation("ya"), Some(true));
        assert_eq!(parse_confirmation(""), Some(false));
        assert_eq!(parse_confirmation("No"), Some(false));
        assert_eq!(parse_confirmation("maybe"), None);
    }
}

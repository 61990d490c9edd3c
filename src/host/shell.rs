//! Running the host's reload command.

use crate::config::MAX_COMMAND_OUTPUT;
use colored::Colorize;
use regex::Regex;
use std::error::Error;
use std::process::Command;
use std::sync::OnceLock;

/// Splits a command line into words, keeping quoted words whole.
static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'|"([^"]*)"|([^'"\s]+)"#).expect("Invalid Regex")
    })
}

/// Split `input` on whitespace; single or double quotes group a word.
pub fn split_words(input: &str) -> Vec<&str> {
    get_word_regex()
        .captures_iter(input)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)).or_else(|| c.get(3)))
        .map(|m| m.as_str())
        .collect()
}

/// Run `cmd` without a shell and return its stdout.
pub fn run(cmd: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let words = split_words(cmd);
    let (program, args) = words.split_first().ok_or("Empty command")?;
    log::trace!("program={program} args={args:?}");

    let output = Command::new(program).args(args).output().map_err(|e| {
        log::error!("Command execution failed: {e}");
        format!("Failed to execute {program}: {e}")
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::warn!(
            "{failed} to run {cmd} code={code:?}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue(),
            code = output.status.code()
        );
        return Err(format!("{program} exited with {}: {}", output.status, stderr.trim()).into());
    }
    if output.stdout.len() > MAX_COMMAND_OUTPUT {
        return Err(format!(
            "Response too large: {} bytes from {program}",
            output.stdout.len()
        )
        .into());
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8: {e}"))?;
    log::debug!("Success cmd: {cmd} stdout.len()={}", stdout.len());
    Ok(stdout)
}

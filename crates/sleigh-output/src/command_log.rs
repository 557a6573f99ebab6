//! Command-log files: a count line, then one command per line.
//!
//! ```text
//! 4
//! LoadCarrots 5
//! LoadGift Tom
//! AccRight 8
//! Float 1
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use sleigh_physics::Command;
use sleigh_run::CommandLog;

use crate::{OutputError, OutputResult};

/// Write `log` in command-log format.
pub fn write_command_log<W: Write>(mut writer: W, log: &CommandLog) -> OutputResult<()> {
    writeln!(writer, "{}", log.len())?;
    for command in log {
        writeln!(writer, "{command}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `log` to a file at `path`, replacing any existing file.
pub fn write_command_log_file(path: &Path, log: &CommandLog) -> OutputResult<()> {
    let file = File::create(path)?;
    write_command_log(BufWriter::new(file), log)?;
    debug!("wrote {} commands to {}", log.len(), path.display());
    Ok(())
}

/// Parse a command log.
///
/// The count line must match the number of command lines.  Blank lines are
/// ignored; any other malformed line fails with its 1-based line number.
pub fn read_command_log<R: Read>(reader: R) -> OutputResult<CommandLog> {
    let mut lines = BufReader::new(reader)
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)))
        .filter(|line| !matches!(line, Ok((_, l)) if l.trim().is_empty()));

    let (count_line, count_text) = lines
        .next()
        .transpose()?
        .ok_or_else(|| OutputError::Format("empty command log".into()))?;
    let expected: usize = count_text.trim().parse().map_err(|e| {
        OutputError::Format(format!("line {count_line}: invalid command count {count_text:?}: {e}"))
    })?;

    let mut commands = Vec::with_capacity(expected);
    for line in lines {
        let (number, text) = line?;
        let command = text
            .parse::<Command>()
            .map_err(|source| OutputError::Parse { line: number, source })?;
        commands.push(command);
    }

    if commands.len() != expected {
        return Err(OutputError::Format(format!(
            "header announces {expected} commands, found {}",
            commands.len()
        )));
    }
    Ok(CommandLog::from(commands))
}

/// Parse the command log stored at `path`.
pub fn read_command_log_file(path: &Path) -> OutputResult<CommandLog> {
    let log = read_command_log(File::open(path)?)?;
    debug!("read {} commands from {}", log.len(), path.display());
    Ok(log)
}

//! Stdout handling. Stdout carries only inventory documents; logs and
//! diagnostics go to stderr.

use std::io::{self, Write};

/// Print a document followed by a newline.
pub fn print_output(output: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    stdout.flush()
}

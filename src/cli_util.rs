use std::io::{self, Write};

use crate::InterpreterError;

/// Render an [`InterpreterError`] for the command line.
///
/// Errors that point into the source get a caret context window. If `program`
/// is `Some("bfi")`, messages are prefixed with "bfi: ...".
pub fn format_interpreter_error(program: Option<&str>, code: &str, err: &InterpreterError) -> String {
    let msg = match program {
        Some(p) => format!("{p}: {err}"),
        None => err.to_string(),
    };

    match err.position() {
        Some(pos) => format!("{msg}\n{}", context_window(code, pos)),
        None => msg,
    }
}

/// Print a formatted error to stderr and flush.
pub fn print_interpreter_error(program: Option<&str>, code: &str, err: &InterpreterError) {
    eprintln!("{}", format_interpreter_error(program, code, err));
    let _ = io::stderr().flush();
}

/// A short window of `code` around the character at `pos`, with a caret
/// under it. Slicing is done by char index so UTF-8 input is safe.
fn context_window(code: &str, pos: usize) -> String {
    const WINDOW_CHARS: usize = 32;

    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let slice: String = code
        .chars()
        .skip(start_char)
        .take(pos + WINDOW_CHARS + 1 - start_char)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    let caret_offset_chars = pos - start_char;
    format!("  {slice}\n  {}^", " ".repeat(caret_offset_chars))
}

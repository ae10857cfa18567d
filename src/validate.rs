//! Checks run against the raw, unfiltered source before an interpreter is built.

use crate::error::{InterpreterError, UnmatchedBracketKind};

/// Verify that `[` and `]` balance at every prefix and overall.
pub fn check_brackets(source: &str) -> Result<(), InterpreterError> {
    // Offsets of currently open '['; the depth counter is simply its length.
    let mut open: Vec<usize> = Vec::new();
    for (pos, c) in source.chars().enumerate() {
        match c {
            '[' => open.push(pos),
            ']' => {
                if open.pop().is_none() {
                    return Err(InterpreterError::UnbalancedBrackets {
                        pos,
                        kind: UnmatchedBracketKind::Close,
                    });
                }
            }
            _ => {}
        }
    }

    if let Some(pos) = open.last().copied() {
        return Err(InterpreterError::UnbalancedBrackets {
            pos,
            kind: UnmatchedBracketKind::Open,
        });
    }
    Ok(())
}

/// Verify that there is at least one input character per `,` in the source.
pub fn check_inputs(source: &str, input: &str) -> Result<(), InterpreterError> {
    let needed = source.chars().filter(|&c| c == ',').count();
    let available = input.chars().count();
    if needed > available {
        return Err(InterpreterError::InsufficientInput { needed, available });
    }
    Ok(())
}

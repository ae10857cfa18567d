use std::fmt;

/// Errors that can occur while validating or interpreting a program.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// `[` and `]` do not pair up; either a `]` appeared with no open loop
    /// or a `[` was never closed.
    #[error("Brackets not matched (unmatched {kind} at position {pos})")]
    UnbalancedBrackets { pos: usize, kind: UnmatchedBracketKind },

    /// The program contains more `,` instructions than input characters.
    #[error("Not enough inputs for code (needs {needed}, got {available})")]
    InsufficientInput { needed: usize, available: usize },

    /// `<` was executed while the data pointer sat on cell 0.
    #[error("Pointer underflow at instruction {ip} (position {pos})")]
    PointerUnderflow { ip: usize, pos: usize },

    /// Execution aborted due to step limit.
    #[error("Execution aborted: step limit exceeded ({limit})")]
    StepLimitExceeded { limit: u64 },

    /// Execution aborted due to cooperative cancellation (e.g. Ctrl-C).
    #[error("Execution aborted: cancelled")]
    Canceled,
}

impl InterpreterError {
    /// Syntax errors are raised while constructing an interpreter, before any
    /// instruction runs. Everything else is a runtime abort.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            InterpreterError::UnbalancedBrackets { .. } | InterpreterError::InsufficientInput { .. }
        )
    }

    /// Character offset into the raw source this error points at, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            InterpreterError::UnbalancedBrackets { pos, .. } => Some(*pos),
            InterpreterError::PointerUnderflow { pos, .. } => Some(*pos),
            _ => None,
        }
    }
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracketKind::Open => write!(f, "'['"),
            UnmatchedBracketKind::Close => write!(f, "']'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_messages_lead_with_reference_wording() {
        let err = InterpreterError::UnbalancedBrackets { pos: 3, kind: UnmatchedBracketKind::Close };
        assert!(err.to_string().starts_with("Brackets not matched"));
        assert!(err.to_string().contains("']'"));

        let err = InterpreterError::InsufficientInput { needed: 2, available: 1 };
        assert!(err.to_string().starts_with("Not enough inputs for code"));
    }

    #[test]
    fn only_construction_errors_are_syntax() {
        assert!(InterpreterError::InsufficientInput { needed: 1, available: 0 }.is_syntax());
        assert!(!InterpreterError::PointerUnderflow { ip: 0, pos: 0 }.is_syntax());
        assert!(!InterpreterError::Canceled.is_syntax());
    }

    #[test]
    fn position_is_reported_for_located_errors() {
        assert_eq!(InterpreterError::PointerUnderflow { ip: 1, pos: 7 }.position(), Some(7));
        assert_eq!(InterpreterError::StepLimitExceeded { limit: 5 }.position(), None);
    }
}

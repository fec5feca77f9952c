use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: expected {expected} but found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found:    String,
        line:     usize,
    },

    #[error("Parse error at line {line}: the type \"{name}\" is not defined")]
    UnresolvedType { name: String, line: usize },

    #[error("Parse error at line {line}: the type \"{name}\" is defined twice")]
    DuplicateType { name: String, line: usize },

    #[error("Type table capacity of {capacity} exceeded")]
    CapacityExceeded { capacity: usize },
}

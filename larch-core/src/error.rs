use thiserror::Error;

/// Every failure `eval` can surface, in one recoverable type.
///
/// A fault aborts the whole expression being evaluated; the driver decides
/// whether to keep its own loop going. The variant is the error-kind tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// An operand's variant does not match the operation's requirement.
    #[error("{0}")]
    Type(String),

    /// `div` with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// `mod` with a zero (integer-truncated) divisor.
    #[error("modulus by zero")]
    ModulusByZero,

    /// The evaluated head of a call is neither a special form, a bound
    /// procedure, nor a lambda literal.
    #[error("cannot apply non-function: {0}")]
    NotCallable(String),

    /// The builtin dispatcher has no entry for this name.
    #[error("unrecognized function: {0}")]
    UnknownBuiltin(String),
}

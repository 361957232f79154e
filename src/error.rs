//! Error types.
//!
//! - `CurveError` is the library-level failure of the curve evaluator.
//! - `AppError` is what the binary reports: a message plus a process exit code.

/// Exit code used for curve evaluation failures.
pub const EXIT_CURVE: u8 = 3;

/// Curve evaluation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    /// The control polygon does not have the length the curve degree requires.
    #[error("invalid input: expected {expected} control points, got {got}")]
    InvalidInput { expected: usize, got: usize },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CurveError> for AppError {
    fn from(err: CurveError) -> Self {
        AppError::new(EXIT_CURVE, format!("Frame computation failed: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

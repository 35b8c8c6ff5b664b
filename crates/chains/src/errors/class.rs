/// Classification for how a failed send attempt should be surfaced.
///
/// Used by the send flow to decide whether an error is shown inline to the
/// user or logged as a wiring problem.
///
/// # Behavior Summary
///
/// | Class | Shown inline? | Log level |
/// |-------|---------------|-----------|
/// | `UserRecoverable` | Yes (specific message) | debug |
/// | `Transient` | Yes (generic message) | warn |
/// | `Precondition` | Yes (generic message) | error |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The user can fix this by editing the amount (not enough funds, not
    /// enough native token for gas).
    UserRecoverable,

    /// The adapter or network failed. The next input change re-triggers an
    /// estimation which may succeed.
    Transient,

    /// The engine was wired incorrectly: no wallet, no adapter for the chain.
    /// A correctly built UI never reaches this.
    Precondition,
}

impl ErrorClass {
    /// Log level used when an error of this class ends a send attempt.
    pub fn log_level(self) -> log::Level {
        match self {
            Self::UserRecoverable => log::Level::Debug,
            Self::Transient => log::Level::Warn,
            Self::Precondition => log::Level::Error,
        }
    }
}

use fairway_putt::config::ConfigError;

#[derive(Debug)]
pub enum RunnerError {
    Config(ConfigError),
    TickRate(f32),
    Snapshot(rmp_serde::decode::Error),
    /// The frame loop went away before the putt finished.
    LoopClosed,
    Join(tokio::task::JoinError),
    Usage(String),
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::TickRate(hz) => write!(f, "tick_rate_hz must give a positive frame period, got {hz}"),
            Self::Snapshot(e) => write!(f, "failed to decode frame snapshot: {e}"),
            Self::LoopClosed => write!(f, "frame loop closed unexpectedly"),
            Self::Join(e) => write!(f, "frame loop task failed: {e}"),
            Self::Usage(m) => write!(f, "{m}"),
        }
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Snapshot(e) => Some(e),
            Self::Join(e) => Some(e),
            Self::TickRate(_) | Self::LoopClosed | Self::Usage(_) => None,
        }
    }
}

impl From<ConfigError> for RunnerError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<rmp_serde::decode::Error> for RunnerError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        Self::Snapshot(e)
    }
}

impl From<tokio::task::JoinError> for RunnerError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Join(e)
    }
}

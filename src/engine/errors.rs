use std::fmt;

/// Failure states of a render pass. None of these cross the host boundary as a
/// panic; callers match on them and draw nothing for the frame.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayError {
    /// A series is empty or an open is not strictly positive.
    DataUnavailable,
    /// Half-width, tick size or another input is outside its recognized range.
    InvalidConfiguration(String),
    /// The viewport has no vertical extent.
    InvalidViewport { top: f32, bottom: f32 },
}

impl OverlayError {
    /// Quiescent states that skip a frame without being worth reporting.
    pub fn is_silent(&self) -> bool {
        matches!(self, Self::DataUnavailable | Self::InvalidViewport { .. })
    }
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataUnavailable => write!(f, "price data unavailable"),
            Self::InvalidConfiguration(reason) => write!(f, "invalid configuration: {}", reason),
            Self::InvalidViewport { top, bottom } => {
                write!(f, "invalid viewport: top {} >= bottom {}", top, bottom)
            }
        }
    }
}

impl std::error::Error for OverlayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configuration_errors_are_reported() {
        assert!(OverlayError::DataUnavailable.is_silent());
        assert!(OverlayError::InvalidViewport { top: 5.0, bottom: 5.0 }.is_silent());
        assert!(!OverlayError::InvalidConfiguration("half-width 0".to_string()).is_silent());
    }
}

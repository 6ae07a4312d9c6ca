use thiserror::Error;

/// All errors generated by the dashboard.
///
/// View-state operations never fail; only startup, configuration and the
/// terminal backend produce errors.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidConfig {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl DashboardError {
    pub(crate) fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
        DashboardError::InvalidConfig {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = DashboardError::invalid("DASHBOARD_SEED", "abc", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "invalid value for DASHBOARD_SEED: \"abc\" (invalid digit found in string)"
        );
    }
}

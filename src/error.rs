pub type ScrollwireResult<T> = Result<T, ScrollwireError>;

/// Failures surfaced to hosts. Only page loading can fail hard; effect-level
/// problems (bad data attributes, unknown event targets, a missing tween
/// provider) degrade in place with a warning instead.
#[derive(thiserror::Error, Debug)]
pub enum ScrollwireError {
    #[error("page validation error: {0}")]
    Validation(String),

    #[error("page parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ScrollwireError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ScrollwireError::validation("x")
                .to_string()
                .contains("validation error:")
        );
    }

    #[test]
    fn parse_preserves_source() {
        let source = serde_json::from_str::<crate::page::Page>("{").unwrap_err();
        let err = ScrollwireError::from(source);
        assert!(matches!(err, ScrollwireError::Parse(_)));
        assert!(err.to_string().contains("parse error"));
    }
}

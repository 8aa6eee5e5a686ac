use crate::board::fen::FenError;

/// Convenience result alias used across the crate.
pub type FenboardResult<T> = Result<T, FenboardError>;

/// Top-level error for parsing, asset loading and encoding.
#[derive(thiserror::Error, Debug)]
pub enum FenboardError {
    /// A required sprite or background is missing or undecodable.
    #[error("asset error: '{path}': {source}")]
    Asset {
        /// Relative asset path that failed.
        path: String,
        /// Underlying IO or decode failure.
        #[source]
        source: anyhow::Error,
    },

    /// The placement string could not be parsed.
    #[error("invalid FEN placement '{input}': {source}")]
    Fen {
        /// Full offending input.
        input: String,
        /// Parser diagnostic.
        #[source]
        source: FenError,
    },

    /// Render configuration is unusable (for example a zero cell size).
    #[error("validation error: {0}")]
    Validation(String),

    /// Final PNG encode failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Anything else, with context attached by `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FenboardError {
    /// Build an [`FenboardError::Asset`] for `path`.
    pub fn asset(path: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Asset {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Build an [`FenboardError::Fen`] for `input`.
    pub fn fen(input: impl Into<String>, source: FenError) -> Self {
        Self::Fen {
            input: input.into(),
            source,
        }
    }

    /// Build an [`FenboardError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`FenboardError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            FenboardError::asset("imgs/wK.png", anyhow::anyhow!("x"))
                .to_string()
                .contains("asset error:")
        );
        assert!(
            FenboardError::fen("x", FenError::InvalidChar { index: 0, ch: 'x' })
                .to_string()
                .contains("invalid FEN placement 'x'")
        );
        assert!(
            FenboardError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            FenboardError::encode("x")
                .to_string()
                .contains("encode error:")
        );
    }

    #[test]
    fn asset_error_names_path_and_cause() {
        let base = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = FenboardError::asset("imgs/bQ.png", base);
        let msg = err.to_string();
        assert!(msg.contains("imgs/bQ.png"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = FenboardError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}

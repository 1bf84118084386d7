use thiserror::Error;

/// Errors produced while parsing a version string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Nothing before the preview separator.
    #[error("invalid version '{input}': base version is empty")]
    EmptyBase { input: String },

    /// A base component is not a non-negative integer.
    #[error("invalid version '{input}': component '{component}' is not a non-negative integer")]
    InvalidComponent { input: String, component: String },

    /// More than `major.minor.micro`.
    #[error("invalid version '{input}': expected at most three components")]
    TooManyComponents { input: String },

    /// The preview qualifier does not name a known channel.
    #[error("invalid version '{input}': unknown preview channel '{channel}' (expected dev, alpha, beta or rc)")]
    UnknownChannel { input: String, channel: String },

    /// `alpha`, `beta` and `rc` must be followed by a number.
    #[error("invalid version '{input}': preview channel '{channel}' requires a number")]
    MissingPreviewNumber { input: String, channel: String },

    /// The text after the channel name is not a non-negative integer.
    #[error("invalid version '{input}': preview number '{number}' is not a non-negative integer")]
    InvalidPreviewNumber { input: String, number: String },
}

//! Release version tokens for version-gated adapter selection.
//!
//! A [`VersionToken`] is `MAJOR[.MINOR[.MICRO]][-CHANNELNUMBER]` where the
//! optional preview channel is one of `dev`, `alpha`, `beta` or `rc`. Tokens
//! are plain values with a total ordering: a stable release sorts above every
//! preview of the same base version.
//!
//! # Example
//!
//! ```rust
//! use versiongate_version::VersionToken;
//!
//! let beta: VersionToken = "8.0.0-beta01".parse().unwrap();
//! let stable: VersionToken = "8.0".parse().unwrap();
//!
//! assert!(beta < stable);
//! assert_eq!(beta.to_string(), "8.0.0-beta1");
//! ```

#![deny(unsafe_code)]

mod channel;
mod error;
mod token;

pub use channel::{Preview, PreviewChannel};
pub use error::ParseError;
pub use token::VersionToken;

//! Pre-release channels.

use std::fmt;

/// Pre-release channel, ordered `Dev < Alpha < Beta < Rc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreviewChannel {
    Dev,
    Alpha,
    Beta,
    Rc,
}

impl PreviewChannel {
    /// Looks up a channel by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dev" => Some(Self::Dev),
            "alpha" => Some(Self::Alpha),
            "beta" => Some(Self::Beta),
            "rc" => Some(Self::Rc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Rc => "rc",
        }
    }

    /// Whether the channel must carry a number (`alpha1`, `rc2`); `dev` never does.
    pub const fn requires_number(self) -> bool {
        !matches!(self, Self::Dev)
    }
}

impl fmt::Display for PreviewChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A preview qualifier: channel plus its number.
///
/// `dev` previews carry no number; constructing one with a number drops it,
/// so all `dev` previews of the same base version compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Preview {
    channel: PreviewChannel,
    number: u32,
}

impl Preview {
    pub const fn new(channel: PreviewChannel, number: u32) -> Self {
        let number = if channel.requires_number() { number } else { 0 };
        Self { channel, number }
    }

    pub const fn dev() -> Self {
        Self::new(PreviewChannel::Dev, 0)
    }

    pub fn channel(&self) -> PreviewChannel {
        self.channel
    }

    /// The preview number, or `None` for `dev`.
    pub fn number(&self) -> Option<u32> {
        self.channel.requires_number().then_some(self.number)
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(number) => write!(f, "{}{}", self.channel, number),
            None => write!(f, "{}", self.channel),
        }
    }
}

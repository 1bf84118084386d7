//! Version token parsing, ordering and canonical rendering.

use crate::channel::{Preview, PreviewChannel};
use crate::error::ParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An immutable release version such as `7.4.0`, `8.0.0-beta11` or `8.0.0-dev`.
///
/// Ordering compares `(major, minor, micro)` first. For equal bases a stable
/// token is greater than any preview; two previews compare by channel rank and
/// then by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionToken {
    major: u32,
    minor: u32,
    micro: u32,
    preview: Option<Preview>,
}

impl VersionToken {
    /// The lowest representable token, `0.0.0-dev`.
    pub const MIN: Self = Self {
        major: 0,
        minor: 0,
        micro: 0,
        preview: Some(Preview::dev()),
    };

    /// A stable token.
    pub const fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
            preview: None,
        }
    }

    pub const fn with_preview(self, channel: PreviewChannel, number: u32) -> Self {
        Self {
            preview: Some(Preview::new(channel, number)),
            ..self
        }
    }

    /// Parses `MAJOR[.MINOR[.MICRO]][-CHANNELNUMBER]`.
    ///
    /// Missing base components default to zero. Preview numbers may carry
    /// leading zeros (`beta01`); they are normalized on rendering.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let (base, preview) = match input.split_once('-') {
            Some((base, preview)) => (base, Some(preview)),
            None => (input, None),
        };

        if base.is_empty() {
            return Err(ParseError::EmptyBase {
                input: input.to_string(),
            });
        }

        let mut parts = [0u32; 3];
        for (index, component) in base.split('.').enumerate() {
            if index >= parts.len() {
                return Err(ParseError::TooManyComponents {
                    input: input.to_string(),
                });
            }
            parts[index] = parse_number(component).ok_or_else(|| ParseError::InvalidComponent {
                input: input.to_string(),
                component: component.to_string(),
            })?;
        }

        let preview = preview
            .map(|segment| parse_preview(input, segment))
            .transpose()?;

        Ok(Self {
            major: parts[0],
            minor: parts[1],
            micro: parts[2],
            preview,
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn micro(&self) -> u32 {
        self.micro
    }

    pub fn preview(&self) -> Option<Preview> {
        self.preview
    }

    pub fn is_stable(&self) -> bool {
        self.preview.is_none()
    }

    pub fn is_preview(&self) -> bool {
        self.preview.is_some()
    }

    /// The same version with any preview qualifier removed.
    pub fn base(&self) -> Self {
        Self::new(self.major, self.minor, self.micro)
    }

    /// Renders the token in canonical form: three base components and a
    /// preview number without leading zeros.
    pub fn canonicalize(&self) -> String {
        self.to_string()
    }
}

fn parse_number(text: &str) -> Option<u32> {
    // `u32::from_str` accepts a leading '+', which the grammar does not.
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_preview(input: &str, segment: &str) -> Result<Preview, ParseError> {
    let split = segment
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(segment.len());
    let (name, digits) = segment.split_at(split);

    let channel = PreviewChannel::from_name(name).ok_or_else(|| ParseError::UnknownChannel {
        input: input.to_string(),
        channel: name.to_string(),
    })?;

    if digits.is_empty() {
        if channel.requires_number() {
            return Err(ParseError::MissingPreviewNumber {
                input: input.to_string(),
                channel: name.to_string(),
            });
        }
        return Ok(Preview::new(channel, 0));
    }

    let number = parse_number(digits).ok_or_else(|| ParseError::InvalidPreviewNumber {
        input: input.to_string(),
        number: digits.to_string(),
    })?;
    Ok(Preview::new(channel, number))
}

impl Ord for VersionToken {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.micro)
            .cmp(&(other.major, other.minor, other.micro))
            .then_with(|| match (&self.preview, &other.preview) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for VersionToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if let Some(preview) = &self.preview {
            write!(f, "-{preview}")?;
        }
        Ok(())
    }
}

impl FromStr for VersionToken {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for VersionToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> VersionToken {
        VersionToken::parse(s).unwrap()
    }

    #[test]
    fn parses_full_version() {
        let token = v("7.4.2");
        assert_eq!((token.major(), token.minor(), token.micro()), (7, 4, 2));
        assert!(token.is_stable());
    }

    #[test]
    fn missing_components_default_to_zero() {
        assert_eq!(v("8"), VersionToken::new(8, 0, 0));
        assert_eq!(v("8.1"), VersionToken::new(8, 1, 0));
        assert_eq!(v("8.1-rc2"), VersionToken::new(8, 1, 0).with_preview(PreviewChannel::Rc, 2));
    }

    #[test]
    fn parses_preview_channels() {
        let beta = v("8.0.0-beta11");
        let preview = beta.preview().unwrap();
        assert_eq!(preview.channel(), PreviewChannel::Beta);
        assert_eq!(preview.number(), Some(11));

        let dev = v("8.0.0-dev");
        assert_eq!(dev.preview().unwrap().channel(), PreviewChannel::Dev);
        assert_eq!(dev.preview().unwrap().number(), None);
    }

    #[test]
    fn dev_number_is_ignored() {
        assert_eq!(v("8.0.0-dev3"), v("8.0.0-dev"));
        assert_eq!(v("8.0.0-dev3").to_string(), "8.0.0-dev");
    }

    #[test]
    fn leading_zero_preview_numbers_are_normalized() {
        let cases = [
            ("8.0.0-alpha01", "8.0.0-alpha1"),
            ("8.0.0-beta01", "8.0.0-beta1"),
            ("8.0.0-beta11", "8.0.0-beta11"),
            ("8.0.0-rc11", "8.0.0-rc11"),
            ("8.0.0-dev", "8.0.0-dev"),
        ];
        for (input, expected) in cases {
            assert_eq!(v(input).canonicalize(), expected, "input: {input}");
        }
    }

    #[test]
    fn canonical_form_fills_base_components() {
        assert_eq!(v("8").to_string(), "8.0.0");
        assert_eq!(v("7.4-alpha3").to_string(), "7.4.0-alpha3");
    }

    #[test]
    fn preview_ordering_chain() {
        let chain = [
            "8.0.0-dev",
            "8.0.0-alpha1",
            "8.0.0-beta1",
            "8.0.0-beta11",
            "8.0.0-rc1",
            "8.0.0",
        ];
        for pair in chain.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn base_version_dominates_preview() {
        assert!(v("7.4.0") < v("8.0.0-dev"));
        assert!(v("8.0.0") < v("8.0.1-alpha1"));
        assert!(v("8.1.0-rc1") > v("8.0.0"));
    }

    #[test]
    fn min_is_lowest() {
        assert_eq!(VersionToken::MIN.to_string(), "0.0.0-dev");
        for s in ["0", "0.0.0-alpha0", "0.0.1-dev", "7.4.0"] {
            assert!(VersionToken::MIN <= v(s), "{s}");
        }
    }

    #[test]
    fn base_drops_preview() {
        assert_eq!(v("8.0.0-rc3").base(), v("8.0.0"));
    }

    #[test]
    fn rejects_empty_base() {
        assert!(matches!(
            VersionToken::parse(""),
            Err(ParseError::EmptyBase { .. })
        ));
        assert!(matches!(
            VersionToken::parse("-beta1"),
            Err(ParseError::EmptyBase { .. })
        ));
    }

    #[test]
    fn rejects_bad_components() {
        for input in ["8..0", "8.x", "8.0.", "+8.0", " 8.0", "8.0.-1", "99999999999"] {
            assert!(
                matches!(
                    VersionToken::parse(input),
                    Err(ParseError::InvalidComponent { .. })
                ),
                "{input}"
            );
        }
        assert!(matches!(
            VersionToken::parse("8.0.0.1"),
            Err(ParseError::TooManyComponents { .. })
        ));
    }

    #[test]
    fn rejects_unknown_channels() {
        for input in ["8.0.0-gamma1", "8.0.0-BETA1", "8.0.0-", "8.0.0-1"] {
            assert!(
                matches!(
                    VersionToken::parse(input),
                    Err(ParseError::UnknownChannel { .. })
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn rejects_missing_or_bad_preview_number() {
        assert!(matches!(
            VersionToken::parse("8.0.0-beta"),
            Err(ParseError::MissingPreviewNumber { .. })
        ));
        assert!(matches!(
            VersionToken::parse("8.0.0-rc1x"),
            Err(ParseError::InvalidPreviewNumber { .. })
        ));
        assert!(matches!(
            VersionToken::parse("8.0.0-beta-1"),
            Err(ParseError::InvalidPreviewNumber { .. })
        ));
    }

    #[test]
    fn error_message_names_input() {
        let err = VersionToken::parse("8.0.0-gamma1").unwrap_err();
        assert!(err.to_string().contains("8.0.0-gamma1"));
        assert!(err.to_string().contains("gamma"));
    }

    #[test]
    fn serde_uses_canonical_string() {
        let json = serde_json::to_string(&v("8.0.0-beta01")).unwrap();
        assert_eq!(json, "\"8.0.0-beta1\"");

        let back: VersionToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v("8.0.0-beta1"));

        let bad = serde_json::from_str::<VersionToken>("\"8.0.0-beta\"");
        assert!(bad.is_err());
    }
}

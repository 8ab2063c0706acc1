use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading rank, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("heading level {0} is outside 1..=6")]
    OutOfRange(i64),
}

const TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub const H1: Self = Self(1);
    pub const H2: Self = Self(2);
    pub const H3: Self = Self(3);
    pub const H4: Self = Self(4);
    pub const H5: Self = Self(5);
    pub const H6: Self = Self(6);

    pub fn new(level: u8) -> Result<Self, LevelError> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(LevelError::OutOfRange(i64::from(level)))
        }
    }

    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Raises the number by `steps`, saturating at 6.
    pub fn promote_by(self, steps: usize) -> Self {
        let raised = usize::from(self.0).saturating_add(steps);
        Self(raised.min(usize::from(Self::MAX)) as u8)
    }

    /// One rank down, or `None` when already at 1.
    pub fn demote(self) -> Option<Self> {
        (self.0 > Self::MIN).then(|| Self(self.0 - 1))
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    pub fn tag(self) -> &'static str {
        TAGS[usize::from(self.0 - 1)]
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        TAGS.iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(tag))
            .map(|index| Self(index as u8 + 1))
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self::H1
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = LevelError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

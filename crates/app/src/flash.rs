//! One-shot user messages shown after a redirect.

use std::fmt;
use std::str::FromStr;

/// Severity of a [`Flash`] message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlashLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            _ => Err(()),
        }
    }
}

/// A message for the user, carried to the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == FlashLevel::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_level_through_str() {
        for level in [FlashLevel::Success, FlashLevel::Error] {
            assert_eq!(level.as_str().parse::<FlashLevel>(), Ok(level));
        }
        assert!("info".parse::<FlashLevel>().is_err());
    }

    #[test]
    fn should_flag_error_flashes() {
        assert!(Flash::error("nope").is_error());
        assert!(!Flash::success("ok").is_error());
    }
}

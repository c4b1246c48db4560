//! Bar-granularity tokens.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors from constructing or parsing a [`Timeframe`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeframeError {
    /// Minute magnitude outside the provider's accepted range.
    #[error("minute timeframe must be in 1..=59, got {0}")]
    MinutesOutOfRange(u8),

    /// Hour magnitude outside the provider's accepted range.
    #[error("hour timeframe must be in 1..=23, got {0}")]
    HoursOutOfRange(u8),

    /// Token that is not a recognized timeframe.
    #[error("unrecognized timeframe token: {0:?}")]
    Unrecognized(String),
}

/// The granularity of a historical bar query.
///
/// Rendered as the provider's token format: `"{n}T"` for minutes in [1,59],
/// `"{n}H"` for hours in [1,23], and the fixed tokens `"1D"`, `"1W"`, `"1M"`.
/// Validation happens here, at construction - the endpoint builder renders
/// whatever it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeframe(Repr);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repr {
    Minutes(u8),
    Hours(u8),
    Day,
    Week,
    Month,
}

impl Timeframe {
    /// One bar per day.
    pub const DAY: Self = Self(Repr::Day);
    /// One bar per week.
    pub const WEEK: Self = Self(Repr::Week);
    /// One bar per month.
    pub const MONTH: Self = Self(Repr::Month);

    /// One bar per `n` minutes, `n` in [1,59].
    pub fn minutes(n: u8) -> Result<Self, TimeframeError> {
        if (1..=59).contains(&n) {
            Ok(Self(Repr::Minutes(n)))
        } else {
            Err(TimeframeError::MinutesOutOfRange(n))
        }
    }

    /// One bar per `n` hours, `n` in [1,23].
    pub fn hours(n: u8) -> Result<Self, TimeframeError> {
        if (1..=23).contains(&n) {
            Ok(Self(Repr::Hours(n)))
        } else {
            Err(TimeframeError::HoursOutOfRange(n))
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Minutes(n) => write!(f, "{n}T"),
            Repr::Hours(n) => write!(f, "{n}H"),
            Repr::Day => f.write_str("1D"),
            Repr::Week => f.write_str("1W"),
            Repr::Month => f.write_str("1M"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let unit = token
            .chars()
            .last()
            .ok_or_else(|| TimeframeError::Unrecognized(s.to_string()))?;
        let magnitude = &token[..token.len() - unit.len_utf8()];

        let parse_magnitude = || {
            magnitude
                .parse::<u8>()
                .map_err(|_| TimeframeError::Unrecognized(s.to_string()))
        };

        match unit {
            'T' => Self::minutes(parse_magnitude()?),
            'H' => Self::hours(parse_magnitude()?),
            'D' if magnitude == "1" => Ok(Self::DAY),
            'W' if magnitude == "1" => Ok(Self::WEEK),
            'M' if magnitude == "1" => Ok(Self::MONTH),
            _ => Err(TimeframeError::Unrecognized(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minute_boundaries() {
        assert_eq!(Timeframe::minutes(1).unwrap().to_string(), "1T");
        assert_eq!(Timeframe::minutes(59).unwrap().to_string(), "59T");
        assert_eq!(
            Timeframe::minutes(0),
            Err(TimeframeError::MinutesOutOfRange(0))
        );
        assert_eq!(
            Timeframe::minutes(60),
            Err(TimeframeError::MinutesOutOfRange(60))
        );
    }

    #[test]
    fn hour_boundaries() {
        assert_eq!(Timeframe::hours(1).unwrap().to_string(), "1H");
        assert_eq!(Timeframe::hours(23).unwrap().to_string(), "23H");
        assert_eq!(Timeframe::hours(24), Err(TimeframeError::HoursOutOfRange(24)));
    }

    #[test]
    fn fixed_tokens() {
        assert_eq!(Timeframe::DAY.to_string(), "1D");
        assert_eq!(Timeframe::WEEK.to_string(), "1W");
        assert_eq!(Timeframe::MONTH.to_string(), "1M");
    }

    #[test]
    fn parse_round_trips() {
        for token in ["1T", "15T", "59T", "1H", "23H", "1D", "1W", "1M"] {
            let timeframe: Timeframe = token.parse().unwrap();
            assert_eq!(timeframe.to_string(), token);
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        for token in ["", "D", "0T", "60T", "24H", "2D", "3W", "XYZ", "T"] {
            assert!(token.parse::<Timeframe>().is_err(), "accepted {token:?}");
        }
    }
}

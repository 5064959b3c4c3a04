use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest absolute line offered on either ladder.
pub const MAX_LINE: i64 = 8;

/// Handicap convention a bet is settled under.
///
/// European handicaps are 3-way markets (home / draw / away) on integer
/// lines. Asian handicaps are 2-way markets that remove the draw by using
/// half lines, and split the stake across two adjacent lines on quarter lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandicapType {
    European,
    Asian,
}

impl HandicapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandicapType::European => "European",
            HandicapType::Asian => "Asian",
        }
    }

    /// Selections that form the market for this convention.
    pub fn selections(&self) -> &'static [Selection] {
        match self {
            HandicapType::European => &[Selection::Home, Selection::Draw, Selection::Away],
            HandicapType::Asian => &[Selection::Home, Selection::Away],
        }
    }
}

impl fmt::Display for HandicapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for HandicapType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" | "eu" | "eh" => Ok(HandicapType::European),
            "asian" | "ah" => Ok(HandicapType::Asian),
            _ => Err(ParseError::UnknownHandicapType(s.to_string())),
        }
    }
}

/// The side of the market a bet backs.
///
/// `Draw` only exists in the European 3-way market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Selection {
    Home,
    Draw,
    Away,
}

impl Selection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Selection::Home => "Home",
            Selection::Draw => "Draw",
            Selection::Away => "Away",
        }
    }

    /// Bookmaker shorthand for the 3-way market: W1, X, W2.
    pub fn european_code(&self) -> &'static str {
        match self {
            Selection::Home => "W1",
            Selection::Draw => "X",
            Selection::Away => "W2",
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Selection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "w1" | "1" => Ok(Selection::Home),
            "draw" | "x" => Ok(Selection::Draw),
            "away" | "w2" | "2" => Ok(Selection::Away),
            _ => Err(ParseError::UnknownSelection(s.to_string())),
        }
    }
}

/// Errors raised while parsing handicap inputs from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown handicap type '{0}', expected 'asian' or 'european'")]
    UnknownHandicapType(String),
    #[error("unknown selection '{0}', expected 'home', 'draw' or 'away'")]
    UnknownSelection(String),
    #[error("invalid handicap line '{0}'")]
    InvalidLine(String),
}

/// Errors raised when a line does not belong to a convention's domain.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineError {
    #[error("European handicap line must be a whole number, got {0}")]
    NotWhole(Decimal),
    #[error("Asian handicap line must be a multiple of 0.25, got {0}")]
    NotQuarterMultiple(Decimal),
    #[error("handicap line {line} is outside the offered range -{max}..+{max}")]
    OutOfRange { line: Decimal, max: i64 },
}

/// Shape of a line, decided by its fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineKind {
    /// `.0`: a level result after the handicap is a push.
    Whole,
    /// `.5`: no push is possible.
    Half,
    /// `.25` / `.75`: settled as two half-stakes on the adjacent lines.
    Quarter,
}

/// A handicap line applied to the home side's goal difference.
///
/// Negative lines give goals away (home is favourite), positive lines
/// receive goals.
///
/// # Examples
///
/// ```
/// use handicap_engine::core::handicap::{HandicapLine, LineKind};
/// use rust_decimal_macros::dec;
///
/// let line = HandicapLine::new(dec!(-0.75));
/// assert_eq!(line.kind(), LineKind::Quarter);
///
/// let (lower, upper) = line.split().unwrap();
/// assert_eq!(lower.value(), dec!(-1.0));
/// assert_eq!(upper.value(), dec!(-0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandicapLine(Decimal);

impl HandicapLine {
    pub const LEVEL: HandicapLine = HandicapLine(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Parse a line from text such as `"-0.25"`, `"+1.5"` or `"0"`.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let trimmed = s.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        Decimal::from_str(unsigned)
            .map(Self)
            .map_err(|_| ParseError::InvalidLine(s.to_string()))
    }

    /// Classify the line by `|line mod 1|`.
    ///
    /// Only exact `.25`/`.75` fractions are quarter lines; any other
    /// fraction is settled as a single line.
    pub fn kind(&self) -> LineKind {
        let fraction = self.0.fract().abs();
        if fraction == dec!(0.25) || fraction == dec!(0.75) {
            LineKind::Quarter
        } else if fraction == dec!(0.5) {
            LineKind::Half
        } else {
            LineKind::Whole
        }
    }

    pub fn is_quarter(&self) -> bool {
        self.kind() == LineKind::Quarter
    }

    /// The two adjacent lines a quarter line splits into, lower first.
    pub fn split(&self) -> Option<(HandicapLine, HandicapLine)> {
        if !self.is_quarter() {
            return None;
        }
        Some((
            HandicapLine(self.0 - dec!(0.25)),
            HandicapLine(self.0 + dec!(0.25)),
        ))
    }

    /// Check the line belongs to the domain offered for `handicap_type`.
    pub fn check_for(&self, handicap_type: HandicapType) -> Result<(), LineError> {
        // Range first: the quarter test below multiplies the line.
        if self.0.abs() > Decimal::from(MAX_LINE) {
            return Err(LineError::OutOfRange {
                line: self.0,
                max: MAX_LINE,
            });
        }
        match handicap_type {
            HandicapType::European if !self.0.fract().is_zero() => {
                return Err(LineError::NotWhole(self.0));
            }
            HandicapType::Asian if !(self.0 * dec!(4)).fract().is_zero() => {
                return Err(LineError::NotQuarterMultiple(self.0));
            }
            _ => {}
        }
        Ok(())
    }

    /// Signed spread label: `+0.25`, `-1`, `0`, `+0.50`.
    pub fn asian_label(&self) -> String {
        if self.0.is_zero() {
            return "0".to_string();
        }
        let fixed = format!("{:.2}", self.0.round_dp(2));
        let trimmed = fixed.strip_suffix(".00").unwrap_or(&fixed);
        if self.0 > Decimal::ZERO {
            format!("+{}", trimmed)
        } else {
            trimmed.to_string()
        }
    }

    /// Goal-start label for the 3-way market: `(0:1)`, `(2:0)`, `(0:0)`.
    pub fn european_label(&self) -> String {
        let goals = self.0.abs().normalize();
        if self.0 < Decimal::ZERO {
            format!("(0:{})", goals)
        } else if self.0 > Decimal::ZERO {
            format!("({}:0)", goals)
        } else {
            "(0:0)".to_string()
        }
    }

    pub fn label_for(&self, handicap_type: HandicapType) -> String {
        match handicap_type {
            HandicapType::European => self.european_label(),
            HandicapType::Asian => self.asian_label(),
        }
    }
}

impl fmt::Display for HandicapLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.asian_label())
    }
}

impl From<Decimal> for HandicapLine {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

/// Asian ladder: -8.00 to +8.00 in steps of 0.25 (33 lines).
pub fn asian_ladder() -> Vec<HandicapLine> {
    (-MAX_LINE * 2..=MAX_LINE * 2)
        .map(|i| HandicapLine(Decimal::from(i) * dec!(0.25)))
        .collect()
}

/// European ladder: -8 to +8 in whole goals (17 lines).
pub fn european_ladder() -> Vec<HandicapLine> {
    (-MAX_LINE..=MAX_LINE)
        .map(|i| HandicapLine(Decimal::from(i)))
        .collect()
}

pub fn ladder_for(handicap_type: HandicapType) -> Vec<HandicapLine> {
    match handicap_type {
        HandicapType::European => european_ladder(),
        HandicapType::Asian => asian_ladder(),
    }
}

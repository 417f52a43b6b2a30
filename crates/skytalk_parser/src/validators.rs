//! Argument validators.
//!
//! One pure function per argument kind. Each takes raw lowercase tokens and
//! returns the normalized value, or `None` if the tokens are not acceptable.
//! Numeric conversions happen here: altitudes leave in metres, speeds in
//! metres per second.

use std::sync::LazyLock;

use regex::Regex;
use skytalk_foundation::{AltitudeEnvelope, BoundaryPolicy, ParserConfig};

use crate::registry::ValidatorKind;

/// Canonical number of characters in a typed heading (`090`).
pub const HEADING_WIDTH: usize = 3;

/// Canonical number of characters in a typed altitude (`35`).
pub const ALTITUDE_WIDTH: usize = 2;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]{3}[0-9]{4}$").expect("identifier pattern"));

static FACILITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]{3}$").expect("facility pattern"));

static RUNWAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}[lcrLCR]?$").expect("runway pattern"));

const TURN_DIRECTIONS: [&str; 6] = ["r", "right", "cw", "l", "left", "ccw"];

/// A validated, normalized argument.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArgValue {
    /// A converted number
    Int(i64),
    /// A token kept as text
    Text(String),
}

impl ArgValue {
    /// Returns the number, if this is a numeric argument.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns the text, if this is a textual argument.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

/// Validates an aircraft identifier (`XXX0000`) and upper-cases it.
#[must_use]
pub fn identifier(token: &str) -> Option<String> {
    IDENTIFIER
        .is_match(token)
        .then(|| token.to_ascii_uppercase())
}

/// Validates a heading in degrees.
#[must_use]
pub fn heading(token: &str, policy: BoundaryPolicy) -> Option<i64> {
    let value: i64 = token.parse().ok()?;
    let in_range = (0..=360).contains(&value);
    let canonical = token.chars().count() == HEADING_WIDTH;

    let accepted = match policy {
        BoundaryPolicy::Legacy => in_range || !canonical,
        BoundaryPolicy::RangeOnly => in_range,
        BoundaryPolicy::RangeAndWidth => in_range && canonical,
    };
    accepted.then_some(value)
}

/// Validates an altitude typed in hundreds of metres and converts it to metres.
#[must_use]
pub fn altitude(token: &str, envelope: &AltitudeEnvelope, policy: BoundaryPolicy) -> Option<i64> {
    let value: i64 = token.parse().ok()?;
    let in_range = envelope.contains(value);
    let on_step = envelope.on_step(value);
    let canonical = token.chars().count() == ALTITUDE_WIDTH;

    let accepted = match policy {
        BoundaryPolicy::Legacy => !(!in_range && canonical && on_step),
        BoundaryPolicy::RangeOnly => in_range && on_step,
        BoundaryPolicy::RangeAndWidth => in_range && on_step && canonical,
    };
    if !accepted {
        return None;
    }
    value.checked_mul(100)
}

/// Converts a speed typed in hundreds of km/h to metres per second.
#[must_use]
pub fn speed(token: &str) -> Option<i64> {
    let value: i64 = token.parse().ok()?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let metres_per_second = (value as f64 * 100.0 / 3.6).round() as i64;
    Some(metres_per_second)
}

/// Checks a facility code and runway code pair (`xyz 09l`).
#[must_use]
pub fn landing(facility: &str, runway: &str) -> bool {
    FACILITY.is_match(facility) && RUNWAY.is_match(runway)
}

/// Checks a turn direction and returns it unchanged.
#[must_use]
pub fn turn_direction(token: &str) -> Option<&str> {
    TURN_DIRECTIONS
        .contains(&token.to_lowercase().as_str())
        .then_some(token)
}

impl ValidatorKind {
    /// Applies this validator to a command's positional arguments.
    ///
    /// Returns the normalized argument list, or `None` on rejection
    /// (including a wrong number of tokens for this kind).
    #[must_use]
    pub fn apply(self, args: &[String], config: &ParserConfig) -> Option<Vec<ArgValue>> {
        match (self, args) {
            (Self::Identifier, [token]) => identifier(token).map(|id| vec![ArgValue::Text(id)]),
            (Self::Heading, [token]) => {
                heading(token, config.heading_policy).map(|h| vec![ArgValue::Int(h)])
            }
            (Self::Altitude, [token]) => {
                altitude(token, &config.altitude, config.altitude_policy)
                    .map(|a| vec![ArgValue::Int(a)])
            }
            (Self::Speed, [token]) => speed(token).map(|s| vec![ArgValue::Int(s)]),
            (Self::Landing, [facility, runway]) => landing(facility, runway).then(|| {
                vec![
                    ArgValue::Text(facility.clone()),
                    ArgValue::Text(runway.clone()),
                ]
            }),
            (Self::TurnDirection, [token]) => {
                turn_direction(token).map(|d| vec![ArgValue::Text(d.to_string())])
            }
            _ => None,
        }
    }
}

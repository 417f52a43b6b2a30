//! Configuration for the interpreter and the operator console.

use crate::error::{Error, Result};

/// How the heading and altitude validators combine their range test with
/// the canonical-width test of the raw token.
///
/// The historical rule negated a conjunction of both tests, so whether an
/// out-of-range value is refused depends on how many characters it was
/// typed with. That rule is kept as [`BoundaryPolicy::Legacy`]; the two
/// stricter readings are available alongside it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryPolicy {
    /// Refuse only when the value is out of range *and* typed at the
    /// canonical width (and, for altitudes, on a step boundary).
    #[default]
    Legacy,
    /// Accept exactly the in-range values; width is ignored.
    RangeOnly,
    /// Accept in-range values typed at the canonical width.
    RangeAndWidth,
}

/// Altitude envelope, expressed in hundreds of metres as typed by the operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AltitudeEnvelope {
    /// Lowest assignable altitude.
    pub min: i64,
    /// Highest assignable altitude.
    pub max: i64,
    /// Altitudes must be a multiple of this step.
    pub step: i64,
}

impl Default for AltitudeEnvelope {
    fn default() -> Self {
        Self {
            min: 0,
            max: 80,
            step: 5,
        }
    }
}

impl AltitudeEnvelope {
    /// Returns true if `value` lies inside the envelope (inclusive).
    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Returns true if `value` is a multiple of the step.
    ///
    /// A zero step admits nothing.
    #[must_use]
    pub const fn on_step(&self, value: i64) -> bool {
        matches!(value.checked_rem(self.step), Some(0))
    }
}

/// The two single-character prefixes that change how a line is dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlGlyphs {
    /// Appends the transmission to the aircraft's pending queue.
    pub queue: char,
    /// Addresses the system rather than an aircraft.
    pub system: char,
}

impl Default for ControlGlyphs {
    fn default() -> Self {
        Self {
            queue: '.',
            system: '/',
        }
    }
}

impl ControlGlyphs {
    /// Returns true if `ch` is one of the two control glyphs.
    #[must_use]
    pub fn is_control(&self, ch: char) -> bool {
        ch == self.queue || ch == self.system
    }
}

/// Configuration consumed by the interpreter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserConfig {
    /// Assignable altitudes.
    pub altitude: AltitudeEnvelope,
    /// Acceptance rule for headings.
    pub heading_policy: BoundaryPolicy,
    /// Acceptance rule for altitudes.
    pub altitude_policy: BoundaryPolicy,
    /// Queue and system prefixes.
    pub glyphs: ControlGlyphs,
}

impl Default for ParserConfig {
    /// Headings keep the historical boundary rule; altitudes are held
    /// strictly to the envelope and step.
    fn default() -> Self {
        Self {
            altitude: AltitudeEnvelope::default(),
            heading_policy: BoundaryPolicy::Legacy,
            altitude_policy: BoundaryPolicy::RangeOnly,
            glyphs: ControlGlyphs::default(),
        }
    }
}

impl ParserConfig {
    /// Creates the default interpreter configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Both numeric validators use the historical boundary rule.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            heading_policy: BoundaryPolicy::Legacy,
            altitude_policy: BoundaryPolicy::Legacy,
            ..Self::default()
        }
    }

    /// Both numeric validators require range and canonical width.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            heading_policy: BoundaryPolicy::RangeAndWidth,
            altitude_policy: BoundaryPolicy::RangeAndWidth,
            ..Self::default()
        }
    }

    /// Builder method to set the altitude envelope.
    #[must_use]
    pub fn with_altitude(mut self, altitude: AltitudeEnvelope) -> Self {
        self.altitude = altitude;
        self
    }

    /// Builder method to set the heading boundary policy.
    #[must_use]
    pub fn with_heading_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.heading_policy = policy;
        self
    }

    /// Builder method to set the altitude boundary policy.
    #[must_use]
    pub fn with_altitude_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.altitude_policy = policy;
        self
    }

    /// Builder method to set the control glyphs.
    #[must_use]
    pub fn with_glyphs(mut self, glyphs: ControlGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Checks that every value is inside its permitted domain.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::InvalidConfig`] for an inverted envelope,
    /// a non-positive step, or control glyphs that collide with each other,
    /// with alias spellings, or with whitespace.
    pub fn validate(&self) -> Result<()> {
        let alt = &self.altitude;
        if alt.min > alt.max {
            return Err(Error::invalid_config(
                "altitude",
                format!("minimum {} exceeds maximum {}", alt.min, alt.max),
            ));
        }
        if alt.step <= 0 {
            return Err(Error::invalid_config("altitude.step", "must be positive"));
        }

        let ControlGlyphs { queue, system } = self.glyphs;
        if queue == system {
            return Err(Error::invalid_config(
                "glyphs",
                format!("queue and system glyphs are both '{queue}'"),
            ));
        }
        for glyph in [queue, system] {
            if glyph.is_alphanumeric() || glyph.is_whitespace() {
                return Err(Error::invalid_config(
                    "glyphs",
                    format!("'{glyph}' cannot be told apart from command text"),
                ));
            }
        }
        Ok(())
    }
}

/// Configuration for one operator console session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsoleConfig {
    /// Interpreter settings.
    pub parser: ParserConfig,
    /// Maximum number of transcript lines retained.
    pub transcript_capacity: usize,
    /// Maximum number of history entries retained (`None` = unbounded).
    pub history_capacity: Option<usize>,
    /// Prefix used when echoing the operator's own transmissions.
    pub callsign: String,
    /// Seed for the radio-reply generator.
    pub seed: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::new(),
            transcript_capacity: 5,
            history_capacity: None,
            callsign: "TOWER".to_string(),
            seed: 0,
        }
    }
}

impl ConsoleConfig {
    /// Builder method to set the interpreter settings.
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }

    /// Builder method to set the transcript capacity.
    #[must_use]
    pub fn with_transcript_capacity(mut self, capacity: usize) -> Self {
        self.transcript_capacity = capacity;
        self
    }

    /// Builder method to bound the history.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: Option<usize>) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Builder method to set the operator callsign.
    #[must_use]
    pub fn with_callsign(mut self, callsign: impl Into<String>) -> Self {
        self.callsign = callsign.into();
        self
    }

    /// Builder method to set the reply seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the console and interpreter settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::InvalidConfig`] if any setting is out of
    /// its domain.
    pub fn validate(&self) -> Result<()> {
        self.parser.validate()?;
        if self.transcript_capacity == 0 {
            return Err(Error::invalid_config(
                "transcript_capacity",
                "must retain at least one line",
            ));
        }
        if self.history_capacity == Some(0) {
            return Err(Error::invalid_config(
                "history_capacity",
                "use None for unbounded history",
            ));
        }
        Ok(())
    }
}

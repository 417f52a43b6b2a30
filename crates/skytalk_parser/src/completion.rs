//! Context-sensitive autocompletion.
//!
//! Looks at the last few words of the unsubmitted buffer to decide what
//! kind of word is being typed, then completes the in-progress word
//! against the matching pool from an [`EntityDirectory`].

use skytalk_foundation::ControlGlyphs;
use tracing::trace;

use crate::directory::EntityDirectory;
use crate::registry::{CommandName, CommandRegistry};
use crate::validators;

/// The kind of word a completion is drawn from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CandidatePool {
    /// System command names
    SystemCommands,
    /// Aircraft identifiers
    Aircraft,
    /// Canonical aircraft command names
    AircraftCommands,
    /// Facility codes
    Facilities,
    /// Waypoint codes
    Waypoints,
    /// Runways of the named facility
    Runways(String),
}

/// What is being completed, and the part already typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionContext {
    /// Where candidates come from
    pub pool: CandidatePool,
    /// The in-progress word, lowercase; empty after a trailing space
    pub prefix: String,
}

/// Completes partially typed transmissions.
#[derive(Clone, Debug, Default)]
pub struct Autocompleter {
    registry: CommandRegistry,
    glyphs: ControlGlyphs,
}

impl Autocompleter {
    /// Creates a completer for the given registry and glyphs.
    #[must_use]
    pub const fn new(registry: CommandRegistry, glyphs: ControlGlyphs) -> Self {
        Self { registry, glyphs }
    }

    /// Decides which pool the in-progress word belongs to.
    ///
    /// Returns `None` when the context offers nothing to complete.
    #[must_use]
    pub fn classify(&self, buffer: &str) -> Option<CompletionContext> {
        let lowered = buffer.to_lowercase();
        let mut words: Vec<&str> = lowered.split_whitespace().collect();
        if lowered.is_empty() || lowered.ends_with(char::is_whitespace) {
            words.push("");
        }

        let count = words.len();
        let root = words[count - 1];
        let pre = count.checked_sub(2).map(|i| words[i]);
        let prepre = count.checked_sub(3).map(|i| words[i]);

        let pool = if lowered.starts_with(self.glyphs.system) {
            Some(CandidatePool::SystemCommands)
        } else if (count == 2 && lowered.starts_with(self.glyphs.queue)) || root == lowered {
            Some(CandidatePool::Aircraft)
        } else if let Some(pre) = pre {
            self.classify_after(&words, pre, prepre)
        } else {
            None
        };

        trace!(buffer, ?pool, "completion context");
        pool.map(|pool| CompletionContext {
            pool,
            prefix: root.to_string(),
        })
    }

    fn classify_after(&self, words: &[&str], pre: &str, prepre: Option<&str>) -> Option<CandidatePool> {
        let is_land = |word: &str| self.registry.is_alias_of(word, CommandName::Land);

        if validators::identifier(pre).is_some() {
            return Some(CandidatePool::AircraftCommands);
        }
        // "circle l" is a left turn, not a landing
        if is_land(pre)
            && !prepre.is_some_and(|word| self.registry.is_alias_of(word, CommandName::Circle))
        {
            return Some(CandidatePool::Facilities);
        }
        if self.registry.is_alias_of(pre, CommandName::Heading) {
            return Some(CandidatePool::Waypoints);
        }

        let prepre = prepre?;
        if is_land(prepre) {
            return Some(CandidatePool::Runways(pre.to_uppercase()));
        }
        let addressed = words
            .iter()
            .take(2)
            .any(|word| validators::identifier(word).is_some());
        (addressed && !self.registry.is_canonical_name(pre))
            .then_some(CandidatePool::AircraftCommands)
    }

    /// Gathers the candidates of a pool.
    #[must_use]
    pub fn candidates<D>(&self, pool: &CandidatePool, directory: &D) -> Vec<String>
    where
        D: EntityDirectory + ?Sized,
    {
        match pool {
            CandidatePool::SystemCommands => self
                .registry
                .system_command_names()
                .map(str::to_string)
                .collect(),
            CandidatePool::Aircraft => directory.entity_identifiers(),
            CandidatePool::AircraftCommands => {
                self.registry.command_names().map(str::to_string).collect()
            }
            CandidatePool::Facilities => directory.facility_codes(),
            CandidatePool::Waypoints => directory.waypoint_codes(),
            CandidatePool::Runways(facility) => directory.runway_codes(facility),
        }
    }

    /// Returns the text to append to `buffer`, if any.
    ///
    /// A unique match completes in full and adds a trailing space; several
    /// matches complete up to their longest common prefix.
    #[must_use]
    pub fn complete<D>(&self, buffer: &str, directory: &D) -> Option<String>
    where
        D: EntityDirectory + ?Sized,
    {
        let context = self.classify(buffer)?;
        let matches: Vec<String> = self
            .candidates(&context.pool, directory)
            .into_iter()
            .map(|candidate| candidate.to_uppercase())
            .filter(|candidate| candidate.to_lowercase().starts_with(&context.prefix))
            .collect();

        let completed = match matches.as_slice() {
            [] => return None,
            [only] => format!("{only} "),
            several => longest_common_prefix(several),
        };
        let suffix: String = completed
            .chars()
            .skip(context.prefix.chars().count())
            .collect();
        (!suffix.is_empty()).then_some(suffix)
    }
}

/// The longest string every item starts with.
#[must_use]
pub fn longest_common_prefix<S: AsRef<str>>(items: &[S]) -> String {
    let Some((first, rest)) = items.split_first() else {
        return String::new();
    };
    let mut prefix: Vec<char> = first.as_ref().chars().collect();
    for item in rest {
        let shared = prefix
            .iter()
            .zip(item.as_ref().chars())
            .take_while(|(a, b)| *a == b)
            .count();
        prefix.truncate(shared);
    }
    prefix.into_iter().collect()
}

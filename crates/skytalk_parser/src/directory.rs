//! The entity directory seen by autocompletion.
//!
//! The interpreter never owns the world it talks to. Completion reads the
//! live candidate pools through [`EntityDirectory`], which whatever hosts
//! the console implements.

use std::collections::BTreeMap;

/// Enumerates the named things an operator may refer to.
pub trait EntityDirectory {
    /// Identifiers of every aircraft currently in the airspace.
    fn entity_identifiers(&self) -> Vec<String>;

    /// Codes of every facility (airport).
    fn facility_codes(&self) -> Vec<String>;

    /// Runway codes of the facility `facility`, or nothing if it is unknown.
    fn runway_codes(&self, facility: &str) -> Vec<String>;

    /// Codes of every waypoint (beacon).
    fn waypoint_codes(&self) -> Vec<String>;
}

/// A fixed directory, filled up front.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticDirectory {
    entities: Vec<String>,
    facilities: BTreeMap<String, Vec<String>>,
    waypoints: Vec<String>,
}

impl StaticDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current contents of another directory.
    #[must_use]
    pub fn capture<D: EntityDirectory + ?Sized>(directory: &D) -> Self {
        let facilities = directory
            .facility_codes()
            .into_iter()
            .map(|code| {
                let runways = directory.runway_codes(&code);
                (code.to_uppercase(), runways)
            })
            .collect();
        Self {
            entities: directory.entity_identifiers(),
            facilities,
            waypoints: directory.waypoint_codes(),
        }
    }

    /// Adds an aircraft identifier.
    #[must_use]
    pub fn with_entity(mut self, identifier: impl Into<String>) -> Self {
        self.entities.push(identifier.into());
        self
    }

    /// Adds a facility and its runways.
    #[must_use]
    pub fn with_facility<I, S>(mut self, code: impl Into<String>, runways: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facilities.insert(
            code.into().to_uppercase(),
            runways.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Adds a waypoint code.
    #[must_use]
    pub fn with_waypoint(mut self, code: impl Into<String>) -> Self {
        self.waypoints.push(code.into());
        self
    }
}

impl EntityDirectory for StaticDirectory {
    fn entity_identifiers(&self) -> Vec<String> {
        self.entities.clone()
    }

    fn facility_codes(&self) -> Vec<String> {
        self.facilities.keys().cloned().collect()
    }

    fn runway_codes(&self, facility: &str) -> Vec<String> {
        self.facilities
            .get(&facility.to_uppercase())
            .cloned()
            .unwrap_or_default()
    }

    fn waypoint_codes(&self) -> Vec<String> {
        self.waypoints.clone()
    }
}

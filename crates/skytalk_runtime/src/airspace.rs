//! A small in-memory airspace.
//!
//! Aircraft keep just enough state to accept or refuse instructions the way
//! a pilot would: a current maneuver, a queue of pending transmissions and a
//! performance envelope. There is no flight model; maneuvers simply take a
//! fixed number of ticks.

use std::collections::{BTreeMap, VecDeque};

use im::{OrdMap, Vector};
use skytalk_parser::{CommandName, EntityDirectory, FlagName, ParsedCommand};
use tracing::debug;

use crate::dispatch::{Airspace, DispatchTarget, Rejection};

/// Ticks a heading, altitude, speed or takeoff maneuver lasts.
pub const MANEUVER_TICKS: u32 = 2;

/// Ticks between landing clearance and touchdown.
pub const APPROACH_TICKS: u32 = 3;

/// Airport codes to runway codes, upper-case.
pub type RunwayChart = OrdMap<String, Vector<String>>;

/// What an aircraft can physically do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Performance {
    /// Highest altitude in metres
    pub ceiling: i64,
    /// Slowest airspeed in m/s
    pub min_speed: i64,
    /// Fastest airspeed in m/s
    pub max_speed: i64,
}

impl Default for Performance {
    fn default() -> Self {
        Self {
            ceiling: 8000,
            min_speed: 42,
            max_speed: 250,
        }
    }
}

/// What an aircraft is doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlightState {
    /// On the ground, waiting for takeoff
    Parked,
    /// Airborne with nothing to do
    Cruising,
    /// Carrying out an instruction
    Maneuvering {
        /// Ticks until the maneuver is complete
        remaining: u32,
    },
    /// Holding in a circle until told otherwise
    Circling {
        /// Turn direction as given
        direction: String,
    },
    /// On approach
    ClearedToLand {
        /// Airport code
        facility: String,
        /// Runway code
        runway: String,
        /// Ticks until touchdown
        remaining: u32,
    },
    /// On the runway; the flight is over
    Landed,
}

/// An aircraft under control.
#[derive(Clone, Debug)]
pub struct Aircraft {
    identifier: String,
    performance: Performance,
    state: FlightState,
    heading: i64,
    altitude: i64,
    speed: i64,
    queue: VecDeque<Vec<ParsedCommand>>,
    chart: RunwayChart,
}

impl Aircraft {
    /// An airborne aircraft cruising at 3000 m.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into().to_uppercase(),
            performance: Performance::default(),
            state: FlightState::Cruising,
            heading: 0,
            altitude: 3000,
            speed: 120,
            queue: VecDeque::new(),
            chart: RunwayChart::new(),
        }
    }

    /// An aircraft on the ground.
    #[must_use]
    pub fn parked(identifier: impl Into<String>) -> Self {
        Self {
            state: FlightState::Parked,
            altitude: 0,
            speed: 0,
            ..Self::new(identifier)
        }
    }

    /// Sets the performance envelope.
    #[must_use]
    pub const fn with_performance(mut self, performance: Performance) -> Self {
        self.performance = performance;
        self
    }

    /// Sets the heading.
    #[must_use]
    pub const fn with_heading(mut self, heading: i64) -> Self {
        self.heading = heading;
        self
    }

    /// Upper-case identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &FlightState {
        &self.state
    }

    /// Assigned heading in degrees.
    #[must_use]
    pub const fn heading(&self) -> i64 {
        self.heading
    }

    /// Assigned altitude in metres.
    #[must_use]
    pub const fn altitude(&self) -> i64 {
        self.altitude
    }

    /// Assigned speed in m/s.
    #[must_use]
    pub const fn speed(&self) -> i64 {
        self.speed
    }

    /// Number of queued transmissions.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Returns true while a maneuver is in progress.
    #[must_use]
    pub const fn is_maneuvering(&self) -> bool {
        matches!(self.state, FlightState::Maneuvering { .. })
    }

    /// Advances the current maneuver by one tick, starting the next queued
    /// transmission once it completes.
    pub fn tick(&mut self) {
        if let FlightState::Maneuvering { remaining }
        | FlightState::ClearedToLand { remaining, .. } = &mut self.state
        {
            if *remaining > 1 {
                *remaining -= 1;
                return;
            }
        }

        match self.state {
            FlightState::ClearedToLand { .. } => self.state = FlightState::Landed,
            FlightState::Maneuvering { .. } | FlightState::Cruising => {
                self.state = FlightState::Cruising;
                if let Some(next) = self.queue.pop_front() {
                    debug!(aircraft = %self.identifier, "starting queued transmission");
                    self.apply(&next);
                }
            }
            _ => {}
        }
    }

    fn abort(&mut self, last_only: bool) {
        if last_only {
            self.queue.pop_back();
            return;
        }
        self.queue.clear();
        if self.state != FlightState::Parked {
            self.state = FlightState::Cruising;
        }
    }

    fn check_ground(&self, commands: &[ParsedCommand]) -> Result<(), Rejection> {
        let parked = self.state == FlightState::Parked;
        let takeoff = commands.iter().any(|c| c.name == CommandName::Takeoff);
        match (parked, takeoff) {
            (true, false) => Err(Rejection::new("We are still on the ground!")),
            (false, true) => Err(Rejection::new("We are already airborne!")),
            _ => Ok(()),
        }
    }

    fn check_envelope(&self, commands: &[ParsedCommand]) -> Result<(), Rejection> {
        for command in commands {
            match command.name {
                CommandName::Altitude | CommandName::Takeoff => {
                    if command.int_arg(0).is_some_and(|m| m > self.performance.ceiling) {
                        return Err(Rejection::new("That's above our service ceiling."));
                    }
                }
                CommandName::Speed => {
                    let range = self.performance.min_speed..=self.performance.max_speed;
                    if command.int_arg(0).is_some_and(|s| !range.contains(&s)) {
                        return Err(Rejection::new("We can't fly at that speed."));
                    }
                }
                CommandName::Land => {
                    let facility = command.text_arg(0).unwrap_or_default().to_uppercase();
                    let runway = command.text_arg(1).unwrap_or_default().to_uppercase();
                    let known = self
                        .chart
                        .get(&facility)
                        .is_some_and(|runways| runways.contains(&runway));
                    if !known {
                        return Err(Rejection::new("Unknown airport or runway."));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn apply(&mut self, commands: &[ParsedCommand]) {
        let mut next = FlightState::Maneuvering {
            remaining: MANEUVER_TICKS,
        };
        for command in commands {
            match command.name {
                CommandName::Heading => self.heading = command.int_arg(0).unwrap_or(self.heading),
                CommandName::Altitude => {
                    self.altitude = command.int_arg(0).unwrap_or(self.altitude);
                }
                CommandName::Speed => self.speed = command.int_arg(0).unwrap_or(self.speed),
                CommandName::Takeoff => {
                    self.altitude = command.int_arg(0).unwrap_or(self.altitude);
                    self.speed = self.speed.max(self.performance.min_speed);
                }
                CommandName::Circle => {
                    next = FlightState::Circling {
                        direction: command.text_arg(0).unwrap_or_default().to_string(),
                    };
                }
                CommandName::Land => {
                    next = FlightState::ClearedToLand {
                        facility: command.text_arg(0).unwrap_or_default().to_uppercase(),
                        runway: command.text_arg(1).unwrap_or_default().to_uppercase(),
                        remaining: APPROACH_TICKS,
                    };
                }
                CommandName::Abort => {}
            }
        }
        self.state = next;
    }
}

impl DispatchTarget for Aircraft {
    fn execute(&mut self, commands: &[ParsedCommand]) -> Result<(), Rejection> {
        if let Some(abort) = commands.iter().find(|c| c.name == CommandName::Abort) {
            self.abort(abort.has_flag(FlagName::LastOnly));
            return Ok(());
        }
        if self.is_maneuvering() {
            return Err(Rejection::new(
                "Still maneuvering, please specify abort/append command",
            ));
        }
        self.check_ground(commands)?;
        self.check_envelope(commands)?;
        self.apply(commands);
        Ok(())
    }

    fn enqueue(&mut self, commands: &[ParsedCommand]) -> Result<(), Rejection> {
        self.check_envelope(commands)?;
        match self.state {
            FlightState::Circling { .. } => {
                return Err(Rejection::new(
                    "This makes no sense... when should we stop circling?!",
                ));
            }
            FlightState::ClearedToLand { .. } | FlightState::Landed => {
                return Err(Rejection::new("Once landed, the flight is over!"));
            }
            _ => {}
        }
        self.queue.push_back(commands.to_vec());
        Ok(())
    }
}

/// Aircraft, airports and beacons.
#[derive(Clone, Debug, Default)]
pub struct DemoAirspace {
    aircraft: BTreeMap<String, Aircraft>,
    chart: RunwayChart,
    beacons: Vec<String>,
}

impl DemoAirspace {
    /// An empty airspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A populated airspace for the interactive console.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_airport("LHR", ["09L", "09R", "27L", "27R"])
            .with_airport("LGW", ["08R", "26L"])
            .with_airport("STN", ["04", "22"])
            .with_beacon("DOVER")
            .with_beacon("DETLING")
            .with_beacon("BIGGIN")
            .with_beacon("LAMBOURNE")
            .with_aircraft(Aircraft::new("BAW1234").with_heading(90))
            .with_aircraft(Aircraft::new("BAW1299").with_heading(270))
            .with_aircraft(Aircraft::new("AFR7731").with_heading(180))
            .with_aircraft(Aircraft::parked("EZY0042"))
    }

    /// Adds an aircraft, replacing any with the same identifier.
    #[must_use]
    pub fn with_aircraft(mut self, aircraft: Aircraft) -> Self {
        self.aircraft
            .insert(aircraft.identifier().to_string(), aircraft);
        self
    }

    /// Adds an airport and its runways.
    #[must_use]
    pub fn with_airport<I, S>(mut self, code: impl Into<String>, runways: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let runways = runways
            .into_iter()
            .map(|r| r.into().to_uppercase())
            .collect();
        self.chart.insert(code.into().to_uppercase(), runways);
        self
    }

    /// Adds a beacon.
    #[must_use]
    pub fn with_beacon(mut self, code: impl Into<String>) -> Self {
        self.beacons.push(code.into().to_uppercase());
        self
    }

    /// Looks up an aircraft.
    #[must_use]
    pub fn aircraft(&self, identifier: &str) -> Option<&Aircraft> {
        self.aircraft.get(&identifier.to_uppercase())
    }

    /// Number of aircraft in the airspace.
    #[must_use]
    pub fn aircraft_count(&self) -> usize {
        self.aircraft.len()
    }
}

impl EntityDirectory for DemoAirspace {
    fn entity_identifiers(&self) -> Vec<String> {
        self.aircraft.keys().cloned().collect()
    }

    fn facility_codes(&self) -> Vec<String> {
        self.chart.keys().cloned().collect()
    }

    fn runway_codes(&self, facility: &str) -> Vec<String> {
        self.chart
            .get(&facility.to_uppercase())
            .map(|runways| runways.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn waypoint_codes(&self) -> Vec<String> {
        self.beacons.clone()
    }
}

impl Airspace for DemoAirspace {
    fn resolve(&mut self, identifier: &str) -> Option<&mut dyn DispatchTarget> {
        let chart = self.chart.clone();
        let aircraft = self.aircraft.get_mut(identifier)?;
        aircraft.chart = chart;
        Some(aircraft as &mut dyn DispatchTarget)
    }

    fn tick(&mut self) {
        for aircraft in self.aircraft.values_mut() {
            aircraft.tick();
        }
        self.aircraft.retain(|identifier, aircraft| {
            let landed = aircraft.state == FlightState::Landed;
            if landed {
                debug!(aircraft = %identifier, "landed and left the airspace");
            }
            !landed
        });
    }
}

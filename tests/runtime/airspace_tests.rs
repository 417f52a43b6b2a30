//! Demo airspace rules exercised through the console.

use skytalk_foundation::ConsoleConfig;
use skytalk_runtime::{
    Airspace, Aircraft, Console, DemoAirspace, FlightState, MANEUVER_TICKS, Performance,
};

fn session() -> (Console, DemoAirspace) {
    let config = ConsoleConfig::default().with_transcript_capacity(50);
    (Console::new(config).unwrap(), DemoAirspace::standard())
}

fn reply(console: &mut Console, airspace: &mut DemoAirspace, line: &str) -> String {
    console.submit_line(line, airspace);
    console.transcript().last().unwrap().text.clone()
}

#[test]
fn maneuvering_aircraft_only_accepts_abort() {
    let (mut console, mut airspace) = session();

    reply(&mut console, &mut airspace, "baw1234 heading 180");
    assert!(airspace.aircraft("BAW1234").unwrap().is_maneuvering());
    assert_eq!(
        reply(&mut console, &mut airspace, "baw1234 speed 2"),
        "BAW1234 > Still maneuvering, please specify abort/append command"
    );

    reply(&mut console, &mut airspace, "baw1234 abort");
    assert_eq!(
        airspace.aircraft("BAW1234").unwrap().state(),
        &FlightState::Cruising
    );
}

#[test]
fn queued_transmissions_start_after_the_maneuver() {
    let (mut console, mut airspace) = session();

    reply(&mut console, &mut airspace, "baw1299 heading 090");
    reply(&mut console, &mut airspace, ".baw1299 altitude 50");
    assert_eq!(airspace.aircraft("BAW1299").unwrap().queued(), 1);

    for _ in 0..MANEUVER_TICKS {
        airspace.tick();
    }
    let aircraft = airspace.aircraft("BAW1299").unwrap();
    assert_eq!(aircraft.queued(), 0);
    assert_eq!(aircraft.altitude(), 5000);
    assert!(aircraft.is_maneuvering());
}

#[test]
fn abort_lastonly_keeps_earlier_queue() {
    let (mut console, mut airspace) = session();

    reply(&mut console, &mut airspace, "afr7731 heading 090");
    reply(&mut console, &mut airspace, ".afr7731 altitude 40");
    reply(&mut console, &mut airspace, ".afr7731 speed 2");
    reply(&mut console, &mut airspace, "afr7731 abort lastonly");

    let aircraft = airspace.aircraft("AFR7731").unwrap();
    assert_eq!(aircraft.queued(), 1);
    assert!(aircraft.is_maneuvering());
}

#[test]
fn world_state_refusals() {
    let (mut console, mut airspace) = session();

    assert_eq!(
        reply(&mut console, &mut airspace, "ezy0042 heading 090"),
        "EZY0042 > We are still on the ground!"
    );
    assert_eq!(
        reply(&mut console, &mut airspace, "baw1234 takeoff 30"),
        "BAW1234 > We are already airborne!"
    );
    assert_eq!(
        reply(&mut console, &mut airspace, "baw1234 land lhr 18"),
        "BAW1234 > Unknown airport or runway."
    );
    assert_eq!(
        reply(&mut console, &mut airspace, "baw1234 speed 95"),
        "BAW1234 > We can't fly at that speed."
    );
}

#[test]
fn circling_and_landing_refuse_the_queue() {
    let (mut console, mut airspace) = session();

    reply(&mut console, &mut airspace, "baw1234 circle left");
    assert_eq!(
        reply(&mut console, &mut airspace, ".baw1234 heading 090"),
        "BAW1234 > This makes no sense... when should we stop circling?!"
    );

    reply(&mut console, &mut airspace, "afr7731 land stn 22");
    assert_eq!(
        reply(&mut console, &mut airspace, ".afr7731 heading 090"),
        "AFR7731 > Once landed, the flight is over!"
    );
}

#[test]
fn landed_aircraft_leave_the_airspace() {
    let (mut console, mut airspace) = session();
    let before = airspace.aircraft_count();

    reply(&mut console, &mut airspace, "afr7731 land lhr 27l");
    for _ in 0..10 {
        airspace.tick();
    }

    assert_eq!(airspace.aircraft_count(), before - 1);
    assert!(airspace.aircraft("AFR7731").is_none());
    assert_eq!(
        reply(&mut console, &mut airspace, "afr7731 heading 090"),
        "AFR7731 > No such aircraft in the airspace."
    );
}

#[test]
fn performance_ceiling() {
    let (mut console, _) = session();
    let mut airspace = DemoAirspace::new().with_aircraft(
        Aircraft::new("GLD0001").with_performance(Performance {
            ceiling: 2000,
            ..Performance::default()
        }),
    );

    assert_eq!(
        reply(&mut console, &mut airspace, "gld0001 altitude 25"),
        "GLD0001 > That's above our service ceiling."
    );
}

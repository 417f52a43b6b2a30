//! Console tests driven through keystrokes and submitted lines.

use skytalk_foundation::ConsoleConfig;
use skytalk_parser::{EntityDirectory, ParsedCommand, SystemCommandName};
use skytalk_runtime::{
    Airspace, Console, ConsoleSignal, DemoAirspace, DispatchTarget, Keystroke, Rejection,
    Severity, SystemReply, SystemTarget,
};

/// An airspace of one aircraft that records every dispatch.
#[derive(Default)]
struct RecordingAirspace {
    target: RecordingTarget,
}

#[derive(Default)]
struct RecordingTarget {
    executed: Vec<Vec<ParsedCommand>>,
    enqueued: Vec<Vec<ParsedCommand>>,
    refuse: bool,
}

impl DispatchTarget for RecordingTarget {
    fn execute(&mut self, commands: &[ParsedCommand]) -> Result<(), Rejection> {
        if self.refuse {
            return Err(Rejection::new("Unable."));
        }
        self.executed.push(commands.to_vec());
        Ok(())
    }

    fn enqueue(&mut self, commands: &[ParsedCommand]) -> Result<(), Rejection> {
        self.enqueued.push(commands.to_vec());
        Ok(())
    }
}

impl EntityDirectory for RecordingAirspace {
    fn entity_identifiers(&self) -> Vec<String> {
        vec!["KLM0001".to_string()]
    }

    fn facility_codes(&self) -> Vec<String> {
        Vec::new()
    }

    fn runway_codes(&self, _facility: &str) -> Vec<String> {
        Vec::new()
    }

    fn waypoint_codes(&self) -> Vec<String> {
        Vec::new()
    }
}

impl Airspace for RecordingAirspace {
    fn resolve(&mut self, identifier: &str) -> Option<&mut dyn DispatchTarget> {
        (identifier == "KLM0001").then_some(&mut self.target as &mut dyn DispatchTarget)
    }
}

fn console() -> Console {
    Console::new(ConsoleConfig::default()).unwrap()
}

fn type_line(console: &mut Console, airspace: &mut dyn Airspace, line: &str) {
    for ch in line.chars() {
        console.handle_keystroke(Keystroke::Glyph(ch.to_string()), airspace);
    }
}

fn dispatches(airspace: &RecordingAirspace) -> usize {
    airspace.target.executed.len() + airspace.target.enqueued.len()
}

#[test]
fn blank_submit_is_a_no_op() {
    let mut airspace = RecordingAirspace::default();
    let mut console = console();

    console.handle_keystroke(Keystroke::Submit, &mut airspace);
    console.submit_line("   ", &mut airspace);

    assert!(console.transcript().is_empty());
    assert_eq!(console.history().count(), 0);
    assert_eq!(dispatches(&airspace), 0);
}

#[test]
fn typed_line_reaches_the_target() {
    let mut airspace = RecordingAirspace::default();
    let mut console = console();

    type_line(&mut console, &mut airspace, "klm0001 heading 090 x");
    let signal = console.handle_keystroke(Keystroke::Submit, &mut airspace);

    assert_eq!(signal, ConsoleSignal::Continue);
    assert_eq!(airspace.target.executed.len(), 1);
    assert_eq!(airspace.target.executed[0][0].to_string(), "heading 90 +expedite");
    assert_eq!(console.buffer(), "");

    let entries: Vec<_> = console.transcript().iter().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].severity, Severity::Echo);
    assert_eq!(entries[0].text, "TOWER > KLM0001 HEADING 090 X");
    assert_eq!(entries[1].severity, Severity::Reply);
    assert!(entries[1].text.starts_with("KLM0001 > "));
}

#[test]
fn queue_glyph_enqueues() {
    let mut airspace = RecordingAirspace::default();
    let mut console = console();

    console.submit_line(".klm0001 altitude 35", &mut airspace);

    assert!(airspace.target.executed.is_empty());
    assert_eq!(airspace.target.enqueued.len(), 1);
}

#[test]
fn parse_rejection_is_one_error_entry() {
    let mut airspace = RecordingAirspace::default();
    let mut console = console();

    console.submit_line("klm0001 heading 090 land lhr 09l", &mut airspace);

    assert_eq!(dispatches(&airspace), 0);
    assert_eq!(console.transcript().len(), 1);
    let entry = console.transcript().last().unwrap();
    assert_eq!(entry.severity, Severity::Error);
    assert_eq!(
        entry.text,
        "You are doing it wrong! These commands cannot be performed at the same time."
    );
    assert_eq!(console.history().next(), Some("klm0001 heading 090 land lhr 09l"));
}

#[test]
fn runtime_rejection_is_distinct_from_parse_rejection() {
    let mut airspace = RecordingAirspace::default();
    airspace.target.refuse = true;
    let mut console = console();

    console.submit_line("klm0001 speed 25", &mut airspace);
    assert_eq!(console.transcript().last().unwrap().text, "KLM0001 > Unable.");

    console.submit_line("abc1234 speed 25", &mut airspace);
    assert_eq!(
        console.transcript().last().unwrap().text,
        "ABC1234 > No such aircraft in the airspace."
    );
}

#[test]
fn history_round_trip() {
    let mut airspace = RecordingAirspace::default();
    let mut console = console();
    console.submit_line("klm0001 heading 090", &mut airspace);
    console.submit_line("klm0001 heading 180", &mut airspace);

    console.handle_keystroke(Keystroke::HistoryUp, &mut airspace);
    assert_eq!(console.buffer(), "klm0001 heading 180");
    console.handle_keystroke(Keystroke::HistoryUp, &mut airspace);
    console.handle_keystroke(Keystroke::HistoryUp, &mut airspace);
    assert_eq!(console.buffer(), "klm0001 heading 090");
    assert_eq!(console.history_cursor(), 2);

    console.handle_keystroke(Keystroke::HistoryDown, &mut airspace);
    assert_eq!(console.buffer(), "klm0001 heading 180");
    console.handle_keystroke(Keystroke::HistoryDown, &mut airspace);
    assert_eq!(console.buffer(), "");
    assert_eq!(console.history_cursor(), 0);
}

#[test]
fn bounded_history_drops_the_oldest() {
    let mut airspace = RecordingAirspace::default();
    let mut console =
        Console::new(ConsoleConfig::default().with_history_capacity(Some(2))).unwrap();
    for line in ["klm0001 heading 090", "klm0001 heading 180", "klm0001 heading 270"] {
        console.submit_line(line, &mut airspace);
    }
    let history: Vec<_> = console.history().collect();
    assert_eq!(history, vec!["klm0001 heading 270", "klm0001 heading 180"]);
}

#[test]
fn completion_reads_the_live_airspace() {
    let mut airspace = DemoAirspace::standard();
    let mut console = console();

    type_line(&mut console, &mut airspace, "af");
    console.handle_keystroke(Keystroke::Complete, &mut airspace);
    assert_eq!(console.buffer(), "AFR7731 ");

    type_line(&mut console, &mut airspace, "l");
    console.handle_keystroke(Keystroke::Complete, &mut airspace);
    assert_eq!(console.buffer(), "AFR7731 LAND ");

    type_line(&mut console, &mut airspace, "lg");
    console.handle_keystroke(Keystroke::Complete, &mut airspace);
    assert_eq!(console.buffer(), "AFR7731 LAND LGW ");
}

#[test]
fn help_and_quit() {
    let mut airspace = DemoAirspace::standard();
    let mut console = console();

    assert_eq!(
        console.submit_line("/help", &mut airspace),
        ConsoleSignal::Continue
    );
    assert!(
        console
            .transcript()
            .iter()
            .any(|entry| entry.severity == Severity::Info)
    );
    assert_eq!(console.submit_line("/q", &mut airspace), ConsoleSignal::Quit);
}

#[test]
fn custom_system_target() {
    struct Muted;

    impl SystemTarget for Muted {
        fn handle(&mut self, command: SystemCommandName) -> SystemReply {
            SystemReply::Lines(vec![format!("{command} is disabled")])
        }
    }

    let mut airspace = DemoAirspace::standard();
    let mut console = console().with_system_target(Box::new(Muted));
    assert_eq!(console.submit_line("/quit", &mut airspace), ConsoleSignal::Continue);
    assert_eq!(console.transcript().last().unwrap().text, "quit is disabled");
}

#[test]
fn same_seed_same_replies() {
    let replies = |seed: u64| {
        let mut airspace = RecordingAirspace::default();
        let mut console = Console::new(
            ConsoleConfig::default()
                .with_seed(seed)
                .with_transcript_capacity(20),
        )
        .unwrap();
        for _ in 0..5 {
            console.submit_line("klm0001 speed 25", &mut airspace);
        }
        console
            .transcript()
            .iter()
            .filter(|entry| entry.severity == Severity::Reply)
            .map(|entry| entry.text.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(replies(7), replies(7));
}

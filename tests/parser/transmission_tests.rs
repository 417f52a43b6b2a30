//! Full transmission parsing tests.

use proptest::prelude::*;
use skytalk_foundation::ParserConfig;
use skytalk_parser::{
    ArgValue, CommandName, CommandParser, DispatchMode, FlagName, InputTokenizer, ParseError,
    ParseOutcome, SystemCommandName, Transmission,
};

fn parse(input: &str) -> ParseOutcome {
    CommandParser::default().parse(input)
}

fn rejection(input: &str) -> ParseError {
    match parse(input) {
        ParseOutcome::Rejected(err) => err,
        other => panic!("expected {input:?} to be rejected, got {other:?}"),
    }
}

fn accepted(input: &str) -> Transmission {
    match parse(input) {
        ParseOutcome::Accepted(tx) => tx,
        other => panic!("expected {input:?} to be accepted, got {other:?}"),
    }
}

#[test]
fn compatible_triple_is_one_transmission() {
    let tx = accepted("abc1234 heading 090 altitude 20 speed 3");
    let names: Vec<_> = tx.commands().iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        vec![CommandName::Heading, CommandName::Altitude, CommandName::Speed]
    );
    for command in tx.commands() {
        assert_eq!(command.args.len(), 1);
        assert!(command.flags.is_empty());
    }
    assert_eq!(tx.commands()[0].int_arg(0), Some(90));
    assert_eq!(tx.commands()[1].int_arg(0), Some(2000));
    assert_eq!(tx.commands()[2].int_arg(0), Some(83));
}

#[test]
fn queued_abort_conflicts() {
    assert_eq!(
        rejection(".ABC1234 land xyz 09l abort"),
        ParseError::QueueAbortConflict
    );
    assert_eq!(
        rejection(".ABC1234 abort land xyz 09l"),
        ParseError::QueueAbortConflict
    );
    assert_eq!(
        accepted("ABC1234 abort").mode(),
        DispatchMode::Execute
    );
}

#[test]
fn duplicates_are_refused_before_compatibility() {
    assert_eq!(
        rejection("abc1234 heading 090 heading 180"),
        ParseError::DuplicateCommandInTransmission
    );
    assert_eq!(
        rejection("abc1234 land xyz 09 land abc 27"),
        ParseError::DuplicateCommandInTransmission
    );
}

#[test]
fn incompatible_pairs_are_refused() {
    assert_eq!(
        rejection("abc1234 heading 090 land lhr 09l"),
        ParseError::IncompatibleCommandCombination
    );
    assert!(parse("abc1234 circle left altitude 30 speed 2").is_accepted());
}

#[test]
fn enqueue_mode_is_decided_by_the_glyph() {
    let tx = accepted(".abc1234 land lhr 09l");
    assert_eq!(tx.mode(), DispatchMode::Enqueue);
    assert_eq!(tx.target(), Some("ABC1234"));
    assert_eq!(
        tx.commands()[0].args,
        vec![ArgValue::Text("lhr".into()), ArgValue::Text("09l".into())]
    );
}

#[test]
fn flags_attach_to_the_preceding_command() {
    let tx = accepted("abc1234 h090 x long a35 expedite");
    let heading = &tx.commands()[0];
    assert!(heading.has_flag(FlagName::Expedite));
    assert!(heading.has_flag(FlagName::LongTurn));
    assert!(tx.commands()[1].has_flag(FlagName::Expedite));
    assert!(!tx.commands()[1].has_flag(FlagName::LongTurn));
}

#[test]
fn system_commands() {
    assert_eq!(accepted("/quit"), Transmission::System(SystemCommandName::Quit));
    assert_eq!(accepted("/ man"), Transmission::System(SystemCommandName::Help));
    assert_eq!(
        rejection("/fly"),
        ParseError::UnknownSystemCommand("FLY".to_string())
    );
}

#[test]
fn every_rejection_has_an_operator_message() {
    let cases = [
        ("hello", "\"HELLO\" is not a valid ICAO reference."),
        ("abc1234 jump", "\"JUMP\" is neither a command nor a flag."),
        ("abc1234 land lhr", "Not enough arguments for command \"LAND\"."),
        (
            "abc1234 heading 400",
            "Parameters for \"HEADING\" command failed validation.",
        ),
        ("abc1234", "No commands were issued to the aircraft."),
        (".abc1234 abort", "You can't queue abortion of a command."),
        (
            "abc1234 heading 090 heading 180",
            "You can't repeat commands in the same transmission.",
        ),
        (
            "abc1234 heading 090 land lhr 09l",
            "These commands cannot be performed at the same time.",
        ),
        ("/foo", "Invalid system command! (FOO)"),
        ("abc1234 barrel-roll", "\"BARREL-ROLL\" is neither a command nor a flag."),
    ];
    for (input, message) in cases {
        assert_eq!(rejection(input).to_string(), message, "input {input:?}");
    }
}

fn parse_with(config: ParserConfig, input: &str) -> ParseOutcome {
    CommandParser::new(config).parse(input)
}

#[test]
fn legacy_altitude_admits_padded_digits() {
    let outcome = parse_with(ParserConfig::legacy(), "abc1234 altitude 085");
    let tx = outcome.transmission().expect("legacy accepts a padded altitude");
    assert_eq!(tx.commands()[0].int_arg(0), Some(8500));

    let refused = ParseOutcome::Rejected(ParseError::ArgumentValidationFailure(
        CommandName::Altitude,
    ));
    assert_eq!(parse_with(ParserConfig::strict(), "abc1234 altitude 085"), refused);
    assert_eq!(parse_with(ParserConfig::default(), "abc1234 altitude 085"), refused);
}

#[test]
fn legacy_altitude_still_refuses_canonical_out_of_range() {
    let refused = ParseOutcome::Rejected(ParseError::ArgumentValidationFailure(
        CommandName::Altitude,
    ));
    for config in [ParserConfig::legacy(), ParserConfig::default(), ParserConfig::strict()] {
        assert_eq!(parse_with(config, "abc1234 altitude 90"), refused);
    }
}

#[test]
fn heading_policies_on_the_same_line() {
    let refused = ParseOutcome::Rejected(ParseError::ArgumentValidationFailure(
        CommandName::Heading,
    ));

    // Over-wide headings slip through unless width is enforced.
    for config in [ParserConfig::legacy(), ParserConfig::default()] {
        let tx = parse_with(config, "abc1234 heading 4000");
        assert_eq!(
            tx.transmission().and_then(|tx| tx.commands()[0].int_arg(0)),
            Some(4000)
        );
    }
    assert_eq!(parse_with(ParserConfig::strict(), "abc1234 heading 4000"), refused);

    // Short headings are in range and only strict width refuses them.
    assert!(parse_with(ParserConfig::legacy(), "abc1234 heading 90").is_accepted());
    assert_eq!(parse_with(ParserConfig::strict(), "abc1234 heading 90"), refused);

    // Canonical but out of range fails everywhere.
    for config in [ParserConfig::legacy(), ParserConfig::default(), ParserConfig::strict()] {
        assert_eq!(parse_with(config, "abc1234 heading 400"), refused);
    }
}

#[test]
fn blank_lines_are_empty() {
    assert_eq!(parse(""), ParseOutcome::Empty);
    assert_eq!(parse("  \t "), ParseOutcome::Empty);
}

#[test]
fn cursor_is_consumed_by_an_accepted_line() {
    let parser = CommandParser::new(ParserConfig::default());
    let mut cursor = InputTokenizer::tokenize(
        "abc1234 heading 090 x speed 25",
        &parser.config().glyphs,
    );
    assert!(parser.parse_tokens(&mut cursor).is_accepted());
    assert!(cursor.is_exhausted());
    assert_eq!(cursor.position(), cursor.len());
}

proptest! {
    #[test]
    fn condensed_heading_matches_spelled_out(value in 0i64..=360) {
        let condensed = parse(&format!("abc1234 h{value:03}"));
        let spelled = parse(&format!("abc1234 heading {value:03}"));
        prop_assert!(condensed.is_accepted());
        prop_assert_eq!(condensed, spelled);
    }

    #[test]
    fn condensed_altitude_matches_spelled_out(step in 0i64..=16) {
        let typed = step * 5;
        let condensed = parse(&format!("abc1234 a{typed:02}"));
        let spelled = parse(&format!("abc1234 altitude {typed:02}"));
        prop_assert!(condensed.is_accepted());
        prop_assert_eq!(condensed, spelled);
    }

    #[test]
    fn parsing_never_panics(input in "[a-zA-Z0-9 ./]{0,40}") {
        let _ = parse(&input);
    }
}

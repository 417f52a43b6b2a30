//! Transcript bounds and render caching.

use skytalk_foundation::ConsoleConfig;
use skytalk_runtime::{
    AnsiRenderer, CachedTranscript, Console, DemoAirspace, Severity, Transcript, TranscriptEntry,
};

#[test]
fn console_transcript_keeps_the_newest_lines() {
    let mut airspace = DemoAirspace::standard();
    let mut console = Console::new(ConsoleConfig::default()).unwrap();

    for n in 0..4 {
        console.submit_line(&format!("xyz{n} heading 090"), &mut airspace);
    }
    console.submit_line("baw1234 heading 090", &mut airspace);
    console.submit_line("baw1299 heading 090", &mut airspace);

    let transcript = console.transcript();
    assert_eq!(transcript.len(), transcript.capacity());
    assert_eq!(transcript.pushed(), 8);
    assert!(transcript.last().unwrap().text.starts_with("BAW1299 > "));
}

#[test]
fn rendering_twice_renders_once() {
    let mut airspace = DemoAirspace::standard();
    let mut console = Console::new(ConsoleConfig::default()).unwrap();
    let mut panel = CachedTranscript::new(AnsiRenderer::plain());

    console.submit_line("baw1234 heading 090", &mut airspace);
    let first = panel.render(console.transcript()).clone();
    let second = panel.render(console.transcript()).clone();
    assert_eq!(first, second);
    assert_eq!(panel.render_count(), 1);

    console.submit_line("   ", &mut airspace);
    panel.render(console.transcript());
    assert_eq!(panel.render_count(), 1);

    console.submit_line("baw1234 abort", &mut airspace);
    panel.render(console.transcript());
    assert_eq!(panel.render_count(), 2);
}

#[test]
fn fresh_entries_since_a_mark() {
    let mut transcript = Transcript::new(3);
    transcript.push(TranscriptEntry::new(Severity::Echo, "one"));
    let mark = transcript.pushed();
    for text in ["two", "three", "four"] {
        transcript.push(TranscriptEntry::new(Severity::Reply, text));
    }

    let fresh: Vec<_> = transcript.since(mark).map(|e| e.text.as_str()).collect();
    assert_eq!(fresh, vec!["two", "three", "four"]);
}

#[test]
fn coloured_lines_carry_their_severity() {
    let mut transcript = Transcript::new(5);
    transcript.push(TranscriptEntry::new(Severity::Error, "no"));
    let mut panel = CachedTranscript::new(AnsiRenderer::new());
    assert_eq!(panel.render(&transcript), "\x1b[31mno\x1b[0m\n");
}

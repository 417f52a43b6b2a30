//! The console transcript.
//!
//! A bounded, oldest-first record of what was said on frequency. Entries
//! live in a persistent vector so a snapshot costs nothing, which lets
//! [`CachedTranscript`] skip rendering when nothing changed since the last
//! frame.

use std::fmt::Write;

use im::Vector;

/// How an entry is coloured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The operator's own transmission, echoed back
    Echo,
    /// An affirmative reply
    Reply,
    /// Informational text (help and the like)
    Info,
    /// A parse or runtime rejection
    Error,
}

impl Severity {
    /// ANSI SGR code for this severity.
    #[must_use]
    pub const fn ansi_code(self) -> &'static str {
        match self {
            Self::Echo => "37",
            Self::Reply => "32",
            Self::Info => "36",
            Self::Error => "31",
        }
    }
}

/// One line of the transcript.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TranscriptEntry {
    /// Colour tag
    pub severity: Severity,
    /// The line itself
    pub text: String,
}

impl TranscriptEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }
}

/// Bounded FIFO of transcript entries.
#[derive(Clone, Debug)]
pub struct Transcript {
    entries: Vector<TranscriptEntry>,
    capacity: usize,
    /// Entries ever pushed, including evicted ones.
    pushed: u64,
}

impl Transcript {
    /// Creates an empty transcript holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vector::new(),
            capacity: capacity.max(1),
            pushed: 0,
        }
    }

    /// Appends an entry, evicting the oldest once full.
    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push_back(entry);
        self.pushed += 1;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the transcript holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries held.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Count of entries ever pushed.
    #[must_use]
    pub const fn pushed(&self) -> u64 {
        self.pushed
    }

    /// Iterates the entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.entries.iter()
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    /// Entries pushed after the point where [`pushed`](Self::pushed) read
    /// `mark`. Evicted entries are skipped.
    pub fn since(&self, mark: u64) -> impl Iterator<Item = &TranscriptEntry> {
        let fresh = usize::try_from(self.pushed.saturating_sub(mark)).unwrap_or(usize::MAX);
        let skip = self.entries.len().saturating_sub(fresh);
        self.entries.iter().skip(skip)
    }

    /// A cheap, immutable copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vector<TranscriptEntry> {
        self.entries.clone()
    }
}

/// Turns transcript contents into something displayable.
pub trait TranscriptRenderer {
    /// The rendered form.
    type Output;

    /// Renders the entries, oldest first.
    fn render(&self, entries: &Vector<TranscriptEntry>) -> Self::Output;
}

/// Renders entries as lines, optionally coloured with ANSI escapes.
#[derive(Clone, Copy, Debug)]
pub struct AnsiRenderer {
    colour: bool,
}

impl AnsiRenderer {
    /// A renderer that colours each line by severity.
    #[must_use]
    pub const fn new() -> Self {
        Self { colour: true }
    }

    /// A renderer that emits plain text.
    #[must_use]
    pub const fn plain() -> Self {
        Self { colour: false }
    }
}

impl Default for AnsiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptRenderer for AnsiRenderer {
    type Output = String;

    fn render(&self, entries: &Vector<TranscriptEntry>) -> String {
        let mut out = String::new();
        for entry in entries {
            if self.colour {
                let _ = writeln!(out, "\x1b[{}m{}\x1b[0m", entry.severity.ansi_code(), entry.text);
            } else {
                let _ = writeln!(out, "{}", entry.text);
            }
        }
        out
    }
}

/// Caches the last rendering of a transcript.
///
/// The renderer only runs when the transcript contents differ from the
/// snapshot taken at the previous render.
pub struct CachedTranscript<R: TranscriptRenderer> {
    renderer: R,
    snapshot: Option<Vector<TranscriptEntry>>,
    rendered: Option<R::Output>,
    renders: u64,
}

impl<R: TranscriptRenderer> CachedTranscript<R> {
    /// Wraps a renderer with an empty cache.
    #[must_use]
    pub const fn new(renderer: R) -> Self {
        Self {
            renderer,
            snapshot: None,
            rendered: None,
            renders: 0,
        }
    }

    /// Returns the rendering of `transcript`, recomputing it only if the
    /// contents changed.
    pub fn render(&mut self, transcript: &Transcript) -> &R::Output {
        let current = transcript.snapshot();
        if self.snapshot.as_ref() != Some(&current) {
            self.rendered = None;
        }

        let renderer = &self.renderer;
        let renders = &mut self.renders;
        let snapshot = &mut self.snapshot;
        self.rendered.get_or_insert_with(|| {
            *renders += 1;
            let output = renderer.render(&current);
            *snapshot = Some(current);
            output
        })
    }

    /// The wrapped renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// How many times the renderer actually ran.
    #[must_use]
    pub const fn render_count(&self) -> u64 {
        self.renders
    }

    /// Drops the cached rendering.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
        self.rendered = None;
    }
}

//! The terminal REPL.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use im::Vector;

use skytalk_foundation::{ConsoleConfig, Error, Result};
use skytalk_parser::StaticDirectory;

use crate::airspace::DemoAirspace;
use crate::console::{Console, ConsoleSignal, Keystroke, PROMPT_SEPARATOR};
use crate::dispatch::Airspace;
use crate::editor::{OperatorInput, OperatorTerminal, RustylineTerminal};
use crate::transcript::{AnsiRenderer, CachedTranscript, TranscriptRenderer};

/// The interactive REPL.
pub struct Repl<E: OperatorTerminal = RustylineTerminal> {
    /// Where operator lines come from.
    editor: E,

    /// Interpreter, history and transcript.
    console: Console,

    /// The world being controlled.
    airspace: Box<dyn Airspace>,

    /// Transcript panel, redrawn only when it changes.
    panel: CachedTranscript<AnsiRenderer>,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineTerminal> {
    /// Creates a new REPL reading from the real terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the editor fails
    /// to initialize.
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        let console = Console::new(config)?;
        let editor = RustylineTerminal::new(
            *console.parser().registry(),
            console.config().parser.glyphs,
            console.config().history_capacity,
        )?;
        Ok(Self::with_editor(editor, console))
    }
}

impl<E: OperatorTerminal> Repl<E> {
    /// Creates a new REPL with the given editor, controlling the standard
    /// demo airspace.
    pub fn with_editor(editor: E, console: Console) -> Self {
        let prompt = format!("{} {PROMPT_SEPARATOR} ", console.config().callsign);
        Self {
            editor,
            console,
            airspace: Box::new(DemoAirspace::standard()),
            panel: CachedTranscript::new(AnsiRenderer::new()),
            show_banner: true,
            prompt,
        }
    }

    /// Sets the airspace.
    #[must_use]
    pub fn with_airspace(mut self, airspace: Box<dyn Airspace>) -> Self {
        self.airspace = airspace;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Prints the transcript without colour.
    #[must_use]
    pub fn without_colour(mut self) -> Self {
        self.panel = CachedTranscript::new(AnsiRenderer::plain());
        self
    }

    /// Returns a reference to the console.
    #[must_use]
    pub const fn console(&self) -> &Console {
        &self.console
    }

    /// Returns a reference to the airspace.
    #[must_use]
    pub fn airspace(&self) -> &dyn Airspace {
        self.airspace.as_ref()
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        println!("\nOver and out.");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    pub fn read_eval_print(&mut self) -> Result<bool> {
        self.editor
            .refresh_directory(StaticDirectory::capture(&*self.airspace));

        let line = match self.editor.prompt(&self.prompt)? {
            OperatorInput::Line(line) => line,
            OperatorInput::Cancel => {
                self.console
                    .handle_keystroke(Keystroke::Cancel, self.airspace.as_mut());
                return Ok(true);
            }
            OperatorInput::Closed => return Ok(false),
        };

        // Skip empty lines
        if line.trim().is_empty() {
            return Ok(true);
        }

        self.editor.recall(&line);
        let signal = self.console.submit_line(&line, self.airspace.as_mut());
        self.airspace.tick();
        self.print_panel();

        Ok(signal == ConsoleSignal::Continue)
    }

    /// Submits each line of `source` in turn and prints what it adds to
    /// the transcript. Blank lines and lines starting with `#` are skipped.
    ///
    /// Returns `false` if a line asked to quit; later lines are not read.
    pub fn eval_script(&mut self, source: &str) -> bool {
        for line in source.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mark = self.console.transcript().pushed();
            let signal = self.console.submit_line(line, self.airspace.as_mut());
            self.airspace.tick();

            let fresh: Vector<_> = self.console.transcript().since(mark).cloned().collect();
            print!("{}", self.panel.renderer().render(&fresh));

            if signal == ConsoleSignal::Quit {
                return false;
            }
        }
        let _ = io::stdout().flush();
        true
    }

    /// Runs a script file through [`eval_script`](Self::eval_script).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn eval_file(&mut self, path: &Path) -> Result<bool> {
        let source =
            fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), &e))?;
        Ok(self.eval_script(&source))
    }

    /// Number of times the transcript panel was drawn.
    #[must_use]
    pub const fn redraws(&self) -> u64 {
        self.panel.render_count()
    }

    fn print_panel(&mut self) {
        let before = self.panel.render_count();
        let rendered = self.panel.render(self.console.transcript()).clone();
        if self.panel.render_count() == before {
            return;
        }
        println!("\x1b[2m{}\x1b[0m", "-".repeat(40));
        print!("{rendered}");
        let _ = io::stdout().flush();
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36m");
        println!("      __          __       ____ ");
        println!("  ___/ /____ __  / /____ _/ / /__");
        println!(" (_-< '_/ // / / __/ _ `/ /  '_/");
        println!("/___/_/\\_\\_, /  \\__/\\_,_/_/_/\\_\\ ");
        println!("        /___/                   ");
        println!("\x1b[0m");
        println!("skytalk operator console v{}", env!("CARGO_PKG_VERSION"));
        println!("Tab completes, /help lists commands, Ctrl+D exits.\n");

        let _ = io::stdout().flush();
    }
}

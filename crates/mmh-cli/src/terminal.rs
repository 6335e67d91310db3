//! Terminal renditions of the host's toasts, prompts and navigation.

use std::cell::RefCell;
use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

use mmh_core::{ConfirmPrompt, Navigator, Notice, NoticeKind, Notifier};

/// Prints toasts and asks prompts on a line-oriented terminal.
pub struct TerminalNotifier<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
    assume_yes: bool,
}

impl TerminalNotifier<StdinLock<'static>, Stderr> {
    /// Reads answers from stdin and writes to stderr.
    #[must_use]
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(io::stdin().lock(), io::stderr(), assume_yes)
    }
}

impl<R: BufRead, W: Write> TerminalNotifier<R, W> {
    /// A notifier over arbitrary streams.
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
            assume_yes,
        }
    }

    /// Consumes the notifier, returning the output stream.
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn write_line(&self, line: &str) {
        let mut output = self.output.borrow_mut();
        if let Err(err) = writeln!(output, "{line}").and_then(|()| output.flush()) {
            tracing::warn!(error = %err, "could not write to terminal");
        }
    }

    fn read_answer(&self) -> bool {
        let mut answer = String::new();
        match self.input.borrow_mut().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                tracing::warn!(error = %err, "could not read answer, treating as no");
                false
            }
        }
    }
}

impl<R: BufRead, W: Write> Notifier for TerminalNotifier<R, W> {
    fn toast(&self, notice: Notice) {
        let label = match notice.kind {
            NoticeKind::Info => "info",
            NoticeKind::Danger => "error",
        };
        self.write_line(&format!("{label}: {}", notice.message));
    }

    async fn confirm(&self, prompt: ConfirmPrompt) -> bool {
        self.write_line(&prompt.title);
        self.write_line(&prompt.body);
        if self.assume_yes {
            self.write_line(&format!("{}? [y/N] y (--yes)", prompt.button_label));
            return true;
        }
        {
            let mut output = self.output.borrow_mut();
            if let Err(err) = write!(output, "{}? [y/N] ", prompt.button_label)
                .and_then(|()| output.flush())
            {
                tracing::warn!(error = %err, "could not write to terminal");
            }
        }
        self.read_answer()
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Reports where the page would have gone.
pub struct TerminalNavigator<W> {
    output: RefCell<W>,
}

impl TerminalNavigator<Stdout> {
    /// Writes to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalNavigator<W> {
    /// A navigator over an arbitrary stream.
    pub fn new(output: W) -> Self {
        Self {
            output: RefCell::new(output),
        }
    }

    /// Consumes the navigator, returning the output stream.
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn report(&self, verb: &str, url: &str) {
        if let Err(err) = writeln!(self.output.borrow_mut(), "{verb} {url}") {
            tracing::warn!(error = %err, "could not write to terminal");
        }
    }
}

impl<W: Write> Navigator for TerminalNavigator<W> {
    fn navigate(&self, url: &str) {
        self.report("Navigate:", url);
    }

    fn open_new_tab(&self, url: &str) {
        self.report("Open:", url);
    }
}

//! Single rewritten status line on a terminal.

use std::io::Write;

use pi_spigot::Progress;

/// Cursor to start of previous line, then erase it.
const REWIND: &str = "\x1b[1F\x1b[2K";

/// "k digits computed (p%)", redrawn in place whenever the whole percent
/// changes, and once more when the run completes.
pub struct StatusLine<W: Write> {
    out:          W,
    enabled:      bool,
    drawn:        bool,
    last_percent: Option<u32>,
}

impl<W: Write> StatusLine<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        StatusLine { out, enabled, drawn: false, last_percent: None }
    }

    pub fn update(&mut self, p: &Progress) {
        if !self.enabled {
            return;
        }
        let percent = p.percent().floor() as u32;
        let done = p.emitted >= p.requested;
        if self.last_percent == Some(percent) && !done {
            return;
        }
        self.last_percent = Some(percent);

        if self.drawn {
            let _ = write!(self.out, "{}", REWIND);
        }
        let _ = writeln!(self.out, "{}", render(p));
        let _ = self.out.flush();
        self.drawn = true;
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W { self.out }
}

pub fn render(p: &Progress) -> String {
    format!("{} digits computed ({:.2}%)", p.emitted, p.percent())
}

//! Single-line console progress meter.

use nodesrc_core::progress::{Progress, ProgressReporter, Stage};
use std::io::{self, Write};

/// Download line: `" 42.0% (  4200 / 10000)"`, or `"read 4200"` without a total.
pub fn format_download(p: &Progress) -> String {
    match (p.total, p.percent()) {
        (Some(total), Some(pct)) => {
            let width = total.to_string().len();
            format!("{:5.1}% ({:>width$} / {})", pct, p.done, total, width = width)
        }
        _ => format!("read {}", p.done),
    }
}

/// Extraction line: `"42.0% (4200 / 10000)"`.
pub fn format_extract(p: &Progress) -> String {
    match (p.total, p.percent()) {
        (Some(total), Some(pct)) => format!("{:.1}% ({} / {})", pct, p.done, total),
        _ => format!("{} bytes", p.done),
    }
}

/// Writes progress to `out`, redrawing the current line with `\r`.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn redraw(&mut self, line: &str) {
        // progress output is best-effort; a closed stdout must not abort the transfer
        let _ = write!(self.out, "\r{}", line);
        let _ = self.out.flush();
    }
}

impl<W: Write> ProgressReporter for ConsoleReporter<W> {
    fn stage_started(&mut self, stage: Stage) {
        let label = match stage {
            Stage::Download => "Downloading...",
            Stage::Extract => "Extracting...",
        };
        let _ = writeln!(self.out, "{}", label);
    }

    fn download(&mut self, progress: Progress) {
        self.redraw(&format_download(&progress));
    }

    fn extract(&mut self, progress: Progress) {
        self.redraw(&format_extract(&progress));
    }

    fn stage_finished(&mut self, _stage: Stage) {
        let _ = writeln!(self.out);
    }
}

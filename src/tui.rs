use crate::debug_eprintln;
use crate::models::SearchResult;
use crate::provider::{QueryReport, SearchObserver, SearchReport};
use crate::runner::FetchPath;
use crossterm::{
    cursor::MoveToPreviousLine,
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io;

const BAR_WIDTH: usize = 30;

/// Live per-query status lines for the command line.
pub struct SearchTUI {
    total_queries: usize,
    finished: usize,
    found: usize,
    line_open: bool,
}

impl SearchTUI {
    pub fn new() -> Self {
        Self {
            total_queries: 0,
            finished: 0,
            found: 0,
            line_open: false,
        }
    }

    pub fn show_header(&self, provider: &str, queries: usize, location: &str) -> io::Result<()> {
        let location = if location.trim().is_empty() {
            "anywhere".to_string()
        } else {
            location.trim().to_string()
        };

        execute!(
            io::stdout(),
            SetForegroundColor(Color::DarkGrey),
            Print(format!(
                "📁 Searching {} with {} queries ({})\n",
                provider, queries, location
            )),
            ResetColor
        )
    }

    fn draw_in_progress(&mut self, index: usize, total: usize, query: &str) -> io::Result<()> {
        self.total_queries = total;
        // Overwrites the progress line left by the previous query.
        execute!(
            io::stdout(),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::White),
            Print(format!("  🔄 [{}/{}] {}\n", index + 1, total, query)),
            ResetColor
        )?;
        self.line_open = true;
        Ok(())
    }

    fn draw_finished(&mut self, index: usize, report: &QueryReport) -> io::Result<()> {
        if self.line_open {
            execute!(io::stdout(), MoveToPreviousLine(1), Clear(ClearType::CurrentLine))?;
            self.line_open = false;
        }

        let (color, icon, detail) = match (&report.error, report.path) {
            (Some(error), _) => (Color::Red, "❌", format!("no results ({})", error)),
            (None, FetchPath::Exhausted) => (Color::Yellow, "⚠", "no results".to_string()),
            (None, path) => (Color::Green, "✅", format!("{} listings via {}", report.count, path)),
        };

        self.finished += 1;
        self.found += report.count;

        execute!(
            io::stdout(),
            SetForegroundColor(color),
            Print(format!(
                "  {} [{}/{}] {} - {}\n",
                icon,
                index + 1,
                self.total_queries,
                report.query,
                detail
            )),
            ResetColor,
            SetForegroundColor(Color::DarkGrey),
            Print(format!("  {}\n", progress_text(self.finished, self.total_queries, self.found))),
            ResetColor,
            MoveToPreviousLine(1)
        )
    }

    pub fn show_final_summary(&self, report: &SearchReport) -> io::Result<()> {
        execute!(
            io::stdout(),
            Clear(ClearType::FromCursorDown),
            Print("─".repeat(80)),
            Print("\n")
        )?;

        for warning in &report.warnings {
            execute!(
                io::stdout(),
                SetForegroundColor(Color::Yellow),
                Print(format!("⚠ {}\n", warning)),
                ResetColor
            )?;
        }

        if report.cancelled {
            execute!(
                io::stdout(),
                SetForegroundColor(Color::Yellow),
                Print("⚠ Search cancelled, showing partial results\n"),
                ResetColor
            )?;
        }

        let (color, text) = if report.result.is_empty() {
            (
                Color::Yellow,
                "No job listings found. Try different search queries or location.".to_string(),
            )
        } else {
            (
                Color::Green,
                format!("✅ Found {} unique job listings", report.result.len()),
            )
        };

        execute!(
            io::stdout(),
            SetForegroundColor(color),
            Print(text),
            Print("\n"),
            ResetColor
        )
    }
}

impl Default for SearchTUI {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchObserver for SearchTUI {
    fn query_started(&mut self, index: usize, total: usize, query: &str) {
        if let Err(e) = self.draw_in_progress(index, total, query) {
            debug_eprintln!("Terminal output failed: {}", e);
        }
    }

    fn query_finished(&mut self, index: usize, report: &QueryReport) {
        if let Err(e) = self.draw_finished(index, report) {
            debug_eprintln!("Terminal output failed: {}", e);
        }
    }
}

/// Progress bar line, e.g. `Progress: [███░░] 1/2 (50%) | 4 listings`.
pub fn progress_text(finished: usize, total: usize, found: usize) -> String {
    let percentage = if total > 0 { (finished * 100) / total } else { 0 };
    let filled = (finished.min(total) * BAR_WIDTH) / total.max(1);
    format!(
        "Progress: [{}{}] {}/{} ({}%) | {} listings",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        finished,
        total,
        percentage,
        found
    )
}

/// Plain table of results, one listing per line.
pub fn print_results(result: &SearchResult) {
    for (i, job) in result.iter().enumerate() {
        println!("{:>3}. {} | {} | {}", i + 1, job.title, job.company, job.location);
        println!("     {}  [{}]", job.url, job.source_query);
    }
}

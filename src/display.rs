//! Terminal progress output
//!
//! The root lookup is printed as a full line; each content lookup rewrites a
//! single status line in place with a carriage return. Formatting lives in
//! plain functions so it can be tested without a terminal.

use colored::Colorize;
use std::io::{self, Write};

const FAILED_MARKER: &str = "(Failed)";

pub fn format_root_line(pathname: &str, pageviews: u64, failed: bool) -> String {
    let mut line = format!("[Total] {pathname}: {pageviews}");
    if failed {
        line.push(' ');
        line.push_str(FAILED_MARKER);
    }
    line
}

/// `index` is 1-based.
pub fn format_progress_line(
    index: usize,
    total: usize,
    pathname: &str,
    pageviews: u64,
    failed: bool,
) -> String {
    let mut line = format!("[{index}/{total}] {pathname}: {pageviews}");
    if failed {
        line.push(' ');
        line.push_str(FAILED_MARKER);
    }
    line
}

pub struct ProgressReporter {
    enabled: bool,
    in_place: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            in_place: false,
        }
    }

    pub fn root(&mut self, pathname: &str, pageviews: u64, failed: bool) {
        if !self.enabled {
            return;
        }
        self.break_line();
        let line = format_root_line(pathname, pageviews, failed);
        if failed {
            println!("{}", line.yellow());
        } else {
            println!("{}", line.bright_white().bold());
        }
    }

    pub fn post(&mut self, index: usize, total: usize, pathname: &str, pageviews: u64, failed: bool) {
        if !self.enabled {
            return;
        }
        let line = format_progress_line(index, total, pathname, pageviews, failed);
        let line = if failed { line.yellow() } else { line.normal() };

        let mut stdout = io::stdout().lock();
        // Trailing spaces clear leftovers from a longer previous line.
        let _ = write!(stdout, "\r{line}    ");
        let _ = stdout.flush();
        self.in_place = true;
    }

    /// Terminate the in-place line so the next output starts fresh.
    pub fn break_line(&mut self) {
        if self.in_place {
            println!();
            self.in_place = false;
        }
    }

    pub fn finish(&mut self) {
        if !self.enabled {
            return;
        }
        self.break_line();
        println!("{}", "Fetching completed.".bright_green());
    }
}

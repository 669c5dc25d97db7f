//! Debounced status reporter.
//!
//! The module emits free-text status lines; lines matching the progress
//! grammar `label(numerator/denominator)` also drive the progress bar.
//! Bursty progress ticks inside the debounce window are coalesced, and
//! after a fatal error the reporter degrades to console-only logging
//! for the rest of the page session.

use std::sync::OnceLock;

use regex::Regex;

use crate::ports::StatusSurface;

/// Progress updates closer together than this are coalesced.
pub const DEBOUNCE_WINDOW_MS: f64 = 30.0;

pub const POST_EXCEPTION_STATUS: &str = "Exception thrown, see console";

fn progress_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([^(]+)\((\d+(?:\.\d+)?)/(\d+)\)").unwrap())
}

/// Fields extracted from a progress-grammar status line.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressFields {
    pub label: String,
    pub numerator: f64,
    pub denominator: u32,
}

/// Parse a status line against the progress grammar. Malformed input is
/// not an error, it is simply non-progress text.
pub fn parse_progress(text: &str) -> Option<ProgressFields> {
    let caps = progress_pattern().captures(text)?;
    let numerator: f64 = caps[2].parse().ok()?;
    let denominator: u32 = caps[3].parse().ok()?;
    Some(ProgressFields {
        label: caps[1].trim_end().to_string(),
        numerator,
        denominator,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Normal,
    Degraded,
}

pub struct StatusReporter {
    mode: ReportMode,
    last_text: String,
    last_update_ms: Option<f64>,
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusReporter {
    pub fn new() -> Self {
        Self {
            mode: ReportMode::Normal,
            last_text: String::new(),
            last_update_ms: None,
        }
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// Accept or discard a status line and render it onto `surface`.
    pub fn report(&mut self, text: &str, now_ms: f64, surface: &impl StatusSurface) {
        if self.mode == ReportMode::Degraded {
            if !text.is_empty() {
                tracing::error!("[post-exception status] {text}");
            }
            return;
        }
        if text == self.last_text {
            return;
        }

        let progress = parse_progress(text);
        if progress.is_some() {
            // Only progress ticks are debounced; the first accepted
            // update never is.
            if let Some(last) = self.last_update_ms {
                if now_ms - last < DEBOUNCE_WINDOW_MS {
                    return;
                }
            }
        }
        self.last_update_ms = Some(now_ms);
        self.last_text = text.to_string();

        match progress {
            Some(fields) => {
                surface.set_progress(
                    (fields.numerator * 100.0).round() as u32,
                    fields.denominator.saturating_mul(100),
                );
                surface.set_spinner_visible(true);
                surface.set_status_text(&fields.label);
            }
            None => {
                surface.clear_progress();
                if text.is_empty() {
                    surface.set_spinner_visible(false);
                }
                surface.set_status_text(text);
            }
        }
    }

    /// One-way `Normal -> Degraded` flip on an uncaught runtime error.
    pub fn trip_fatal(&mut self, now_ms: f64, surface: &impl StatusSurface) {
        self.report(POST_EXCEPTION_STATUS, now_ms, surface);
        if self.mode == ReportMode::Normal {
            surface.set_spinner_visible(false);
            self.mode = ReportMode::Degraded;
        }
    }
}

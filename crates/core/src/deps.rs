//! Run-dependency counter.
//!
//! The module reports how many preparatory downloads are still
//! outstanding; this converts the count into status text for the
//! reporter. `total_seen` is the high-water mark of pending work.

pub const ALL_DOWNLOADS_COMPLETE: &str = "All downloads complete.";

#[derive(Debug, Default)]
pub struct DependencyCounter {
    total_seen: u32,
}

impl DependencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_seen(&self) -> u32 {
        self.total_seen
    }

    /// Record a new outstanding count and produce the status line for it.
    ///
    /// While work remains the text is a valid progress-grammar string;
    /// at zero it is the completion literal, which clears the progress UI.
    pub fn update(&mut self, remaining: u32) -> String {
        self.total_seen = self.total_seen.max(remaining);
        if remaining > 0 {
            format!(
                "Preparing... ({}/{})",
                self.total_seen - remaining,
                self.total_seen
            )
        } else {
            ALL_DOWNLOADS_COMPLETE.to_string()
        }
    }
}

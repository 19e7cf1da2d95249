//! Debounce and response sequencing
//!
//! Both are plain counters; the caller owns the actual timers and requests.

/// Quiet period before a search is sent
pub const SEARCH_DEBOUNCE_MS: u32 = 300;
/// Delay before hiding results on blur, so a click on a result still lands
pub const RESULTS_BLUR_HIDE_MS: u32 = 200;
/// Delay between a successful submit and the page reload
pub const RELOAD_DELAY_MS: u32 = 1000;

/// Quiet-period debouncer.
///
/// Every trigger arms a new generation; a timer that fires with an older
/// generation does nothing, so only the last trigger of a burst runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn arm(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn should_fire(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Drop any pending trigger
    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}

/// Latest-wins ticketing for overlapping requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSequencer {
    issued: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// False once a newer request has been issued
    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.issued
    }

    /// Invalidate every outstanding ticket
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }
}

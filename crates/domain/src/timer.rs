use crate::Seconds;

/// Counts seconds up while running.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stopwatch {
    elapsed: u32,
    running: bool,
}

impl Stopwatch {
    #[must_use]
    pub fn elapsed(&self) -> Seconds {
        Seconds::saturating(i64::from(self.elapsed))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start_pause(&mut self) {
        self.running = !self.running;
    }

    pub fn tick(&mut self) {
        if self.running {
            self.elapsed = self.elapsed.saturating_add(1);
        }
    }

    /// Stop the stopwatch and return the elapsed time.
    pub fn stop(&mut self) -> Seconds {
        let elapsed = self.elapsed();
        *self = Self::default();
        elapsed
    }
}

/// Counts seconds down to zero. A new countdown starts running immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(duration: Seconds) -> Self {
        Self {
            duration: duration.into(),
            remaining: duration.into(),
            running: true,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> Seconds {
        Seconds::saturating(i64::from(self.remaining))
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    pub fn start_pause(&mut self) {
        if !self.is_finished() {
            self.running = !self.running;
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.running = false;
    }

    pub fn tick(&mut self) {
        if self.running {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.running = false;
            }
        }
    }
}

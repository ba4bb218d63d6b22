use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("describe what you are working on first")]
    MissingWorkDescription,
    #[error("the timer is already running")]
    TimerRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Outcome of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Completed,
}

/// Countdown timer for a single focus session.
///
/// The timer counts down from a configured duration one second at a time.
/// Credited minutes are always at least 1 and are rounded from elapsed
/// seconds, so a session abandoned after a few seconds still logs a minute.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    minutes: u32,
    seconds: u32,
    phase: TimerPhase,
    planned_total_secs: u32,
    completed: bool,
    default_minutes: u32,
}

impl SessionTimer {
    pub fn new(default_minutes: u32) -> Self {
        Self {
            minutes: default_minutes,
            seconds: 0,
            phase: TimerPhase::Idle,
            planned_total_secs: default_minutes * 60,
            completed: false,
            default_minutes,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Remaining time as (minutes, seconds), for display.
    pub fn remaining(&self) -> (u32, u32) {
        (self.minutes, self.seconds)
    }

    pub fn planned_minutes(&self) -> u32 {
        self.planned_total_secs / 60
    }

    /// Set a new session length. Rejected while the countdown is running;
    /// allowed while paused, which restarts the countdown from the new
    /// duration.
    pub fn configure(&mut self, minutes: u32, seconds: u32) -> Result<(), SessionError> {
        if self.phase == TimerPhase::Running {
            return Err(SessionError::TimerRunning);
        }
        self.minutes = minutes;
        self.seconds = seconds;
        self.phase = TimerPhase::Idle;
        self.planned_total_secs = minutes * 60 + seconds;
        self.completed = false;
        Ok(())
    }

    /// Start (or resume) the countdown. A session cannot start without a
    /// work description.
    pub fn start(&mut self, has_description: bool) -> Result<(), SessionError> {
        if !has_description {
            return Err(SessionError::MissingWorkDescription);
        }
        if self.phase == TimerPhase::Idle {
            self.completed = false;
        }
        self.phase = TimerPhase::Running;
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Paused;
        }
    }

    /// Advance the countdown by one second. Only meaningful while running;
    /// the caller gates ticks on `is_running`.
    pub fn tick(&mut self) -> Tick {
        if self.phase != TimerPhase::Running {
            return Tick::Continue;
        }
        if self.seconds == 0 {
            if self.minutes == 0 {
                return Tick::Completed;
            }
            self.minutes -= 1;
            self.seconds = 59;
        } else {
            self.seconds -= 1;
        }
        if self.minutes == 0 && self.seconds == 0 {
            Tick::Completed
        } else {
            Tick::Continue
        }
    }

    fn elapsed_secs(&self) -> u32 {
        self.planned_total_secs
            .saturating_sub(self.minutes * 60 + self.seconds)
    }

    fn credited_minutes(elapsed_secs: u32) -> u32 {
        ((elapsed_secs as f64 / 60.0).round() as u32).max(1)
    }

    /// Close out a session that ran to 0:00. Returns the minutes to log
    /// and resets the timer to the default duration.
    pub fn complete_natural(&mut self) -> u32 {
        let minutes = Self::credited_minutes(self.planned_total_secs);
        self.completed = true;
        self.reset_to_default();
        minutes
    }

    /// Close out a session before the countdown finishes, crediting only
    /// the elapsed time.
    pub fn complete_early(&mut self) -> u32 {
        let minutes = Self::credited_minutes(self.elapsed_secs());
        self.completed = true;
        self.reset_to_default();
        minutes
    }

    /// Minutes to credit if the process is about to terminate mid-session.
    /// Returns `None` when there is nothing to log: the session already
    /// completed, or no time has elapsed.
    pub fn abrupt_elapsed_minutes(&self) -> Option<u32> {
        if self.completed {
            return None;
        }
        let elapsed = self.elapsed_secs();
        if elapsed == 0 {
            return None;
        }
        Some(Self::credited_minutes(elapsed))
    }

    /// Mark the in-flight session as logged so a second termination path
    /// does not log it again.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    fn reset_to_default(&mut self) {
        self.minutes = self.default_minutes;
        self.seconds = 0;
        self.phase = TimerPhase::Idle;
        self.planned_total_secs = self.default_minutes * 60;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Idle,
    Running(u32),
    /// The countdown just reached zero. Reported once per countdown.
    Expired,
}

#[derive(Debug, Default, Clone)]
pub struct RoundTimer {
    remaining: u32,
    running: bool,
}

impl RoundTimer {
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts a countdown. Does nothing while another countdown is running.
    pub fn start(&mut self, duration_seconds: u32) -> bool {
        if self.running {
            return false;
        }
        self.remaining = duration_seconds;
        self.running = true;
        true
    }

    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.remaining = 0;
    }
}

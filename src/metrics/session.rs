use std::time::{Duration, Instant};

/// Session stats shown in the header: time spent in the current round,
/// rounds played, best score so far
pub struct SessionStats {
    pub round_start: Instant,
    pub elapsed: Duration,
    pub high_score: u32,
    pub rounds_played: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed: Duration::ZERO,
            high_score: 0,
            rounds_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed = self.round_start.elapsed();
    }

    pub fn round_started(&mut self) {
        self.round_start = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    pub fn round_ended(&mut self, final_score: u32) {
        self.rounds_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

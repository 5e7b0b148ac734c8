use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::pomodoro::PomodoroMode;

pub const WORK_QUOTES: &[&str] = &[
    "Focus on being productive instead of busy.",
    "Small steps every day add up.",
    "Do the hard thing first.",
    "One task at a time.",
    "You don't have to be great to start, but you have to start to be great.",
    "Discipline is choosing what you want most over what you want now.",
    "The secret of getting ahead is getting started.",
];

pub const BREAK_QUOTES: &[&str] = &[
    "Rest is part of the work.",
    "Stretch, breathe, drink some water.",
    "Look at something far away for a minute.",
    "Almost everything works again if you unplug it for a few minutes.",
    "A short walk clears the head.",
];

pub fn pool(mode: PomodoroMode) -> &'static [&'static str] {
    match mode {
        PomodoroMode::Work => WORK_QUOTES,
        PomodoroMode::Break => BREAK_QUOTES,
    }
}

/// Uniform draws with replacement from the pool of a mode.
#[derive(Debug)]
pub struct QuotePicker {
    rng: StdRng,
}

impl QuotePicker {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn draw(&mut self, mode: PomodoroMode) -> &'static str {
        let quotes = pool(mode);
        quotes[self.rng.random_range(0..quotes.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pools_not_empty() {
        assert!(!WORK_QUOTES.is_empty());
        assert!(!BREAK_QUOTES.is_empty());
    }

    #[test]
    fn test_draw_stays_in_mode_pool() {
        let mut picker = QuotePicker::from_entropy();
        for _ in 0..200 {
            assert!(WORK_QUOTES.contains(&picker.draw(PomodoroMode::Work)));
            assert!(BREAK_QUOTES.contains(&picker.draw(PomodoroMode::Break)));
        }
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let mut a = QuotePicker::seeded(42);
        let mut b = QuotePicker::seeded(42);
        let first: Vec<_> = (0..20).map(|_| a.draw(PomodoroMode::Work)).collect();
        let second: Vec<_> = (0..20).map(|_| b.draw(PomodoroMode::Work)).collect();
        assert_eq!(first, second);
    }
}

use crate::config::PreloaderConfig;
use rand::Rng;

/// Loading counter shown while the gate is closed. It climbs by a random step
/// each tick and the enter action is only offered once it reaches the target.
#[derive(Clone, Debug)]
pub struct Preloader {
    counter: u32,
    target: u32,
    max_step: u32,
}

impl Preloader {
    pub fn new(config: &PreloaderConfig) -> Self {
        Self {
            counter: 0,
            target: config.target.max(1),
            max_step: config.max_step.max(1),
        }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn is_complete(&self) -> bool {
        self.counter >= self.target
    }

    pub fn can_enter(&self) -> bool {
        self.is_complete()
    }

    /// Returns `true` while further ticks are needed.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_complete() {
            return false;
        }
        let step = rng.gen_range(1..=self.max_step);
        self.counter = (self.counter + step).min(self.target);
        !self.is_complete()
    }

    pub fn label(&self) -> String {
        format!("{:02}", self.counter.min(self.target))
    }
}

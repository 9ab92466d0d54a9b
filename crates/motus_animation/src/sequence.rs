//! Sequential composition of drivers

use smallvec::SmallVec;

use crate::animation::Driver;

/// Idle stretch between two sequence members
struct Gap(f64);

impl Driver for Gap {
    fn duration(&self) -> f64 {
        self.0
    }

    fn update(&mut self, _progress: f64) {}
}

/// Plays drivers one after another on a single timeline.
///
/// The sequence is itself a [`Driver`]: progress `p` maps to
/// `p * duration()` seconds into the chain, and the member covering that time
/// receives its own local progress. Sequences nest.
pub struct TweenSequence {
    members: SmallVec<[Box<dyn Driver>; 4]>,
    gap: f64,
    duration: f64,
}

impl TweenSequence {
    /// An empty sequence that waits `gap` seconds between members
    pub fn new(gap: f64) -> Self {
        Self {
            members: SmallVec::new(),
            gap: if gap.is_finite() { gap.max(0.0) } else { 0.0 },
            duration: 0.0,
        }
    }

    /// Append a driver, preceded by the gap when it is not the first member
    pub fn push<D: Driver + 'static>(&mut self, driver: D) {
        if !self.members.is_empty() && self.gap > 0.0 {
            self.members.push(Box::new(Gap(self.gap)));
            self.duration += self.gap;
        }
        self.duration += driver.duration().max(0.0);
        self.members.push(Box::new(driver));
    }

    pub fn then<D: Driver + 'static>(mut self, driver: D) -> Self {
        self.push(driver);
        self
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Number of members, counting inserted gaps
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Default for TweenSequence {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Driver for TweenSequence {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn update(&mut self, progress: f64) {
        let elapsed = progress * self.duration;

        let mut start = 0.0;
        for member in self.members.iter_mut() {
            let length = member.duration().max(0.0);
            let end = start + length;
            if end > elapsed {
                let local = if length > 0.0 {
                    (elapsed - start) / length
                } else {
                    1.0
                };
                member.update(local);
                return;
            }
            start = end;
        }

        if let Some(last) = self.members.last_mut() {
            last.update(1.0);
        }
    }
}

//! Delayed one-shot effects
//!
//! A single timeline owned by the session. Effects never repeat and are only
//! cancelled by dropping the whole timeline (session restart). Handlers must
//! tolerate targets that disappeared in the meantime.

use serde::{Deserialize, Serialize};

/// Something to apply once its delay has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedEffect {
    /// Switch off a beam at the end of its lifetime
    BeamExpire { beam_id: u32 },
    /// Restore an enemy's normal motion after drone knockback
    KnockbackEnd { enemy_id: u32 },
    /// Bring the player back at the pending checkpoint
    Respawn,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Scheduled {
    due_ms: f64,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    effect: TimedEffect,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<Scheduled>,
    next_seq: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `effect` once `delay_ms` after `now_ms`
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f32, effect: TimedEffect) {
        let due_ms = now_ms + f64::from(delay_ms.max(0.0));
        self.entries.push(Scheduled {
            due_ms,
            seq: self.next_seq,
            effect,
        });
        self.next_seq += 1;
    }

    /// Remove and return every effect due at `now_ms`, earliest first
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<TimedEffect> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.due_ms <= now_ms);
        self.entries = pending;

        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|entry| entry.effect).collect()
    }

    /// Time of the next pending effect
    pub fn next_due_ms(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|entry| entry.due_ms)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drains_in_due_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(0.0, 300.0, TimedEffect::Respawn);
        timeline.schedule(0.0, 100.0, TimedEffect::BeamExpire { beam_id: 1 });
        timeline.schedule(50.0, 50.0, TimedEffect::KnockbackEnd { enemy_id: 7 });

        assert!(timeline.drain_due(99.0).is_empty());
        assert_eq!(
            timeline.drain_due(100.0),
            vec![
                TimedEffect::BeamExpire { beam_id: 1 },
                TimedEffect::KnockbackEnd { enemy_id: 7 },
            ]
        );
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.next_due_ms(), Some(300.0));
        assert_eq!(timeline.drain_due(1000.0), vec![TimedEffect::Respawn]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_never_fires_twice() {
        let mut timeline = Timeline::new();
        timeline.schedule(0.0, 10.0, TimedEffect::Respawn);
        assert_eq!(timeline.drain_due(10.0).len(), 1);
        assert!(timeline.drain_due(20.0).is_empty());
    }

    #[test]
    fn test_late_drain_keeps_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(0.0, 200.0, TimedEffect::BeamExpire { beam_id: 2 });
        timeline.schedule(0.0, 100.0, TimedEffect::BeamExpire { beam_id: 1 });
        timeline.schedule(0.0, 100.0, TimedEffect::BeamExpire { beam_id: 3 });
        assert_eq!(
            timeline.drain_due(500.0),
            vec![
                TimedEffect::BeamExpire { beam_id: 1 },
                TimedEffect::BeamExpire { beam_id: 3 },
                TimedEffect::BeamExpire { beam_id: 2 },
            ]
        );
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut timeline = Timeline::new();
        timeline.schedule(0.0, 10.0, TimedEffect::Respawn);
        timeline.clear();
        assert!(timeline.drain_due(100.0).is_empty());
        assert_eq!(timeline.next_due_ms(), None);
    }
}

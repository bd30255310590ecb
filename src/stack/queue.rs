//! Timed action queue.
//!
//! Actions wait in FIFO order. The head is started, stays in flight for a
//! fixed duration so it can be presented, and is applied when the duration
//! runs out. A single tick either starts an action or advances/completes the
//! one in flight, never both.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameState};
use crate::effects::{EffectOutcome, EffectResolver};

/// Default presentation delay in seconds.
pub const DEFAULT_ACTION_DURATION: f32 = 0.5;

/// The action currently being presented.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InFlight {
    pub action: Action,
    /// Seconds since the action started.
    pub elapsed: f32,
}

impl InFlight {
    /// Fraction of `duration` elapsed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, duration: f32) -> f32 {
        if duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / duration).clamp(0.0, 1.0)
    }
}

/// What one `advance` tick did.
#[derive(Clone, Debug, PartialEq)]
pub enum QueueStatus {
    /// Nothing pending and nothing in flight.
    Idle,
    /// The head of the queue was started.
    Started(Action),
    /// An action is still in flight.
    InFlight { progress: f32 },
    /// The in-flight action finished and was applied.
    Applied { action: Action, outcome: EffectOutcome },
}

/// FIFO of pending actions with at most one in flight.
///
/// ## Example
///
/// ```
/// use cafe_wars::core::{Action, BoardConfig, GameState, PlayerId, SlotRef};
/// use cafe_wars::stack::{ActionQueue, QueueStatus};
///
/// let mut state = GameState::new(&BoardConfig::default());
/// let mut queue = ActionQueue::new();
/// queue.enqueue(Action::attack(
///     SlotRef::new(PlayerId::FIRST, 0),
///     SlotRef::new(PlayerId::SECOND, 0),
///     4,
/// ));
///
/// assert!(matches!(queue.advance(0.1, &mut state), QueueStatus::Started(_)));
/// assert!(matches!(queue.advance(0.6, &mut state), QueueStatus::Applied { .. }));
/// assert_eq!(state.player(PlayerId::SECOND).health, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionQueue {
    pending: VecDeque<Action>,
    in_flight: Option<InFlight>,
    duration: f32,
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::with_duration(DEFAULT_ACTION_DURATION)
    }
}

impl ActionQueue {
    /// Create an empty queue with the default duration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue whose actions stay in flight `duration` seconds.
    pub fn with_duration(duration: f32) -> Self {
        Self {
            pending: VecDeque::new(),
            in_flight: None,
            duration: duration.max(0.0),
        }
    }

    /// Append an action at the tail.
    pub fn enqueue(&mut self, action: Action) {
        self.pending.push_back(action);
    }

    /// Remove the head without starting it.
    pub fn dequeue(&mut self) -> Option<Action> {
        self.pending.pop_front()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Action> {
        self.pending.front()
    }

    /// Number of actions waiting (the in-flight one is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Nothing waiting and nothing in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.in_flight.is_none()
    }

    #[must_use]
    pub fn in_flight(&self) -> Option<&InFlight> {
        self.in_flight.as_ref()
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Drop every pending action and the in-flight one, unapplied.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.in_flight = None;
    }

    /// Advance by `dt` seconds.
    pub fn advance(&mut self, dt: f32, state: &mut GameState) -> QueueStatus {
        if let Some(current) = self.in_flight.as_mut() {
            current.elapsed += dt;
            if current.elapsed < self.duration {
                return QueueStatus::InFlight {
                    progress: current.progress(self.duration),
                };
            }
            return match self.in_flight.take() {
                Some(done) => {
                    let outcome = EffectResolver::apply(state, &done.action);
                    QueueStatus::Applied {
                        action: done.action,
                        outcome,
                    }
                }
                None => QueueStatus::Idle,
            };
        }

        match self.pending.pop_front() {
            Some(action) => {
                self.in_flight = Some(InFlight {
                    action: action.clone(),
                    elapsed: 0.0,
                });
                QueueStatus::Started(action)
            }
            None => QueueStatus::Idle,
        }
    }
}

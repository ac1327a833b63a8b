//! Bounded cache of composed box scores keyed by `(game, selector)`.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{GameId, PeriodSelector};
use crate::engine::BoxScore;

type CacheKey = (GameId, PeriodSelector);

#[derive(Default)]
struct CacheInner {
    entries: HashMap<CacheKey, Arc<BoxScore>>,
    /// Insertion order, oldest first, for eviction.
    order: VecDeque<CacheKey>,
    /// Bumped by every invalidation of a game.
    generations: HashMap<GameId, u64>,
}

/// Composed box scores are pure functions of a game snapshot, so they can be
/// reused until the next write to that game. A capacity of 0 disables caching.
///
/// Readers take [`BoxScoreCache::generation`] before loading the game and hand
/// it back to [`BoxScoreCache::insert`]; a box score built from a snapshot that
/// an invalidation has since superseded is dropped instead of cached.
pub struct BoxScoreCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl BoxScoreCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        // Entries are plain values; a panic elsewhere cannot leave them half-written.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, game_id: &GameId, selector: PeriodSelector) -> Option<Arc<BoxScore>> {
        if self.capacity == 0 {
            return None;
        }
        let hit = self.lock().entries.get(&(game_id.clone(), selector)).cloned();
        if hit.is_some() {
            tracing::debug!(game_id = %game_id, period = selector.as_str(), "box score cache hit");
        }
        hit
    }

    /// Current generation of `game_id`.
    pub fn generation(&self, game_id: &GameId) -> u64 {
        self.lock().generations.get(game_id).copied().unwrap_or(0)
    }

    /// Cache `box_score` if `game_id` is still at `generation`. Returns whether
    /// it was stored.
    pub fn insert(
        &self,
        game_id: &GameId,
        selector: PeriodSelector,
        generation: u64,
        box_score: Arc<BoxScore>,
    ) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let mut inner = self.lock();
        let current = inner.generations.get(game_id).copied().unwrap_or(0);
        if current != generation {
            tracing::debug!(
                game_id = %game_id,
                period = selector.as_str(),
                "box score superseded before caching"
            );
            return false;
        }
        let key = (game_id.clone(), selector);
        if inner.entries.insert(key.clone(), box_score).is_none() {
            inner.order.push_back(key);
        }
        while inner.entries.len() > self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
        true
    }

    /// Drop every cached selector of `game_id`.
    pub fn invalidate_game(&self, game_id: &GameId) {
        let mut inner = self.lock();
        *inner.generations.entry(game_id.clone()).or_insert(0) += 1;
        inner.entries.retain(|(id, _), _| id != game_id);
        inner.order.retain(|(id, _)| id != game_id);
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

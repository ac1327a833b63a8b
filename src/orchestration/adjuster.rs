//! Manual stat corrections, serialized per `(game, player)`.
//!
//! At most one adjustment per pair is in flight. A second request for the
//! same pair is rejected rather than queued; the write itself is a single
//! read-modify-write transaction.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::db::{LedgerAppend, PlayerLineUpdate, Repository};
use crate::domain::{GameId, PlayerId};
use crate::engine::{adjust_stat, AdjustableStat};
use crate::orchestration::{missing_target, BoxScoreCache, OrchestrationError};

type PairKey = (GameId, PlayerId);

pub struct Adjuster {
    repo: Arc<Repository>,
    cache: Arc<BoxScoreCache>,
    in_flight: Mutex<HashSet<PairKey>>,
}

/// Releases the pair's slot when the adjustment finishes, however it finishes.
pub(crate) struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<PairKey>>,
    key: PairKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        in_flight.remove(&self.key);
    }
}

impl Adjuster {
    pub fn new(repo: Arc<Repository>, cache: Arc<BoxScoreCache>) -> Self {
        Self {
            repo,
            cache,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub(crate) fn try_claim(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
    ) -> Result<InFlightGuard<'_>, OrchestrationError> {
        let key = (game_id.clone(), player_id.clone());
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !in_flight.insert(key.clone()) {
            return Err(OrchestrationError::AdjustmentInFlight {
                game_id: game_id.clone(),
                player_id: player_id.clone(),
            });
        }
        Ok(InFlightGuard {
            in_flight: &self.in_flight,
            key,
        })
    }

    /// Apply `delta` (exactly +1 or -1) to one stored stat, flooring at zero.
    ///
    /// The ledger is not touched, so the change is only visible at `all` scope.
    pub async fn adjust(
        &self,
        game_id: &GameId,
        player_id: &PlayerId,
        stat: AdjustableStat,
        delta: i32,
    ) -> Result<PlayerLineUpdate, OrchestrationError> {
        let _claim = self.try_claim(game_id, player_id)?;

        let update = self
            .repo
            .update_player_line(game_id, player_id, |_, line| {
                let next = adjust_stat(line, stat, delta)?;
                Ok::<_, OrchestrationError>((next, LedgerAppend::default()))
            })
            .await?;

        let Some(update) = update else {
            return Err(missing_target(&self.repo, game_id, player_id).await);
        };

        self.cache.invalidate_game(game_id);
        tracing::info!(
            game_id = %game_id,
            player_id = %player_id,
            stat = stat.as_str(),
            delta,
            "Applied manual adjustment"
        );
        Ok(update)
    }
}

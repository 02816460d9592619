//! Retrying batch fetcher for the partial-result Cardmarket batch endpoints
//!
//! The batch endpoints may return fewer results than requested (rate
//! limiting, partial availability) and the results carry no positional
//! alignment with the submitted ids. Only their count and arrival order can
//! be used: each arrival fills the next unfilled output slot in original
//! request order, and the remaining ids are resubmitted next round.

use crate::error::{BuywizardError, Result};

/// Round-based fetcher with an explicit termination bound.
#[derive(Debug, Clone, Copy)]
pub struct BatchFetcher {
    /// Hard cap on request/response rounds
    pub max_rounds: usize,
    /// Consecutive zero-progress rounds tolerated before giving up
    pub max_stalled_rounds: usize,
}

impl Default for BatchFetcher {
    fn default() -> Self {
        Self {
            max_rounds: 20,
            max_stalled_rounds: 3,
        }
    }
}

impl BatchFetcher {
    /// Resolve every id through repeated rounds of `round_fn`.
    ///
    /// `round_fn` receives the still-pending ids and returns the items the
    /// API managed to fetch, in arrival order; it may return fewer than
    /// requested. The output is positionally aligned with `ids`.
    pub fn fetch<T, F>(&self, ids: &[u64], mut round_fn: F) -> Result<Vec<T>>
    where
        F: FnMut(&[u64]) -> Result<Vec<T>>,
    {
        let mut slots: Vec<Option<T>> = ids.iter().map(|_| None).collect();
        // Slot indices still waiting for a result, in original request order
        let mut pending: Vec<usize> = (0..ids.len()).collect();
        let mut rounds = 0;
        let mut stalled = 0;

        while !pending.is_empty() {
            if rounds >= self.max_rounds {
                return Err(self.stalled_error(ids.len(), pending.len()));
            }
            rounds += 1;

            let queue: Vec<u64> = pending.iter().map(|&slot| ids[slot]).collect();
            let arrivals = round_fn(&queue)?;

            if arrivals.len() > pending.len() {
                return Err(BuywizardError::ApiResponse {
                    code: "batch_overflow".to_string(),
                    details: format!(
                        "requested {} items, got {}",
                        pending.len(),
                        arrivals.len()
                    ),
                });
            }

            if arrivals.is_empty() {
                stalled += 1;
                log::warn!(
                    "Fetch round {} made no progress ({} of {} allowed)",
                    rounds,
                    stalled,
                    self.max_stalled_rounds
                );
                if stalled >= self.max_stalled_rounds {
                    return Err(self.stalled_error(ids.len(), pending.len()));
                }
                continue;
            }
            stalled = 0;

            // Arrivals fill the next empty slots in original request order
            let filled = arrivals.len();
            for (slot, item) in pending.drain(..filled).zip(arrivals) {
                slots[slot] = Some(item);
            }

            log::info!(
                "Fetch round {}: resolved {}/{} items",
                rounds,
                ids.len() - pending.len(),
                ids.len()
            );
        }

        // All slots filled once pending is empty
        Ok(slots.into_iter().flatten().collect())
    }

    fn stalled_error(&self, requested: usize, pending: usize) -> BuywizardError {
        BuywizardError::FetchStalled {
            resolved: requested - pending,
            requested,
        }
    }
}

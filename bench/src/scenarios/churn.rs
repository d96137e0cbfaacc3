//! Subscription churn scenario.
//!
//! A few hot channels see a seeded random mix of subscribe, unsubscribe and
//! raise calls, the way short-lived subscribers come and go around a
//! long-lived producer.
//!
//! This scenario tests:
//! - Copy-on-write cost of add/remove as chains grow and shrink
//! - Channel creation/deletion when chains empty out
//! - Raise cost interleaved with mutation

use eventset::{EventKey, EventSet, Handler};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::payloads::{Bench, Hits, Tick, counting};
use crate::scenarios::Scenario;

/// Configuration for the churn benchmark.
#[derive(Debug, Clone)]
pub struct ChurnConfig {
    /// Number of hot channels.
    pub channel_count: usize,
    /// Operations per round.
    pub ops_per_round: usize,
    /// Probability that an operation is a raise; the rest split between
    /// subscribe and unsubscribe.
    pub raise_ratio: f64,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for ChurnConfig {
    fn default() -> Self {
        Self {
            channel_count: 8,
            ops_per_round: 1_000,
            raise_ratio: 0.5,
            seed: 12345,
        }
    }
}

pub struct ChurnScenario {
    config: ChurnConfig,
    rng: ChaCha8Rng,
    set: EventSet<Bench>,
    keys: Vec<EventKey>,
    /// Handlers currently subscribed, per channel, so unsubscribes hit.
    live: Vec<Vec<Handler<Bench, Tick>>>,
    hits: Hits,
}

impl ChurnScenario {
    pub fn new() -> Self {
        Self::with_config(ChurnConfig::default())
    }

    pub fn with_config(config: ChurnConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            set: EventSet::new(),
            keys: Vec::new(),
            live: Vec::new(),
            hits: Hits::default(),
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    /// Channels that currently have at least one subscriber.
    pub fn open_channels(&self) -> usize {
        self.set.channel_count()
    }

    fn step(&mut self) {
        let channel = self.rng.gen_range(0..self.keys.len());
        let key = &self.keys[channel];

        if self.rng.gen_bool(self.config.raise_ratio) {
            self.set
                .raise(key, &Bench, &Tick(1))
                .expect("counting handlers never fail");
        } else if self.live[channel].is_empty() || self.rng.gen_bool(0.5) {
            let handler = counting(&self.hits);
            if self.set.add(key, handler.clone()).is_ok() {
                self.live[channel].push(handler);
            }
        } else {
            let victim = self.rng.gen_range(0..self.live[channel].len());
            let handler = self.live[channel].swap_remove(victim);
            let removed = self.set.remove(key, &handler);
            debug_assert!(removed, "tracked handler missing from {key:?}");
        }
    }
}

impl Default for ChurnScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for ChurnScenario {
    fn name(&self) -> &'static str {
        "churn"
    }

    fn description(&self) -> &'static str {
        "seeded mix of subscribe, unsubscribe and raise on a few hot channels"
    }

    fn ops_per_round(&self) -> usize {
        self.config.ops_per_round
    }

    fn subscriber_count(&self) -> usize {
        self.live.iter().map(Vec::len).sum()
    }

    fn setup(&mut self) {
        self.keys = (0..self.config.channel_count.max(1))
            .map(|i| EventKey::named(format!("hot-{i}")))
            .collect();
        self.live = vec![Vec::new(); self.keys.len()];
    }

    fn update(&mut self) {
        for _ in 0..self.config.ops_per_round {
            self.step();
        }
    }

    fn teardown(&mut self) {
        for (key, handlers) in self.keys.iter().zip(self.live.iter_mut()) {
            for handler in handlers.drain(..) {
                self.set.remove(key, &handler);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn churn_table_matches_tracked_subscribers() {
        let mut scenario = ChurnScenario::with_config(ChurnConfig {
            ops_per_round: 500,
            ..Default::default()
        });
        scenario.setup();

        scenario.update();

        let in_table: usize = scenario
            .keys
            .iter()
            .map(|key| scenario.set.handler_count(key))
            .sum();
        assert_eq!(in_table, scenario.subscriber_count());
    }

    #[test]
    fn churn_teardown_closes_every_channel() {
        let mut scenario = ChurnScenario::new();
        scenario.setup();
        scenario.update();

        scenario.teardown();

        assert_eq!(scenario.subscriber_count(), 0);
        assert_eq!(scenario.open_channels(), 0);
    }

    #[test]
    fn same_seed_same_outcome() {
        let run = || {
            let mut scenario = ChurnScenario::new();
            scenario.setup();
            scenario.update();
            (scenario.hits(), scenario.subscriber_count())
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn ops_per_round_follows_config() {
        let scenario = ChurnScenario::with_config(ChurnConfig {
            ops_per_round: 250,
            ..Default::default()
        });

        assert_eq!(scenario.ops_per_round(), 250);
    }
}

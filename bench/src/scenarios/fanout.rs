//! Many-channel fan-out scenario.
//!
//! One producer exposes `channel_count` events through a single set, each with
//! `handlers_per_channel` subscribers. Every round raises every channel once.
//!
//! This scenario tests:
//! - Raise cost as the table grows (lookup + snapshot)
//! - Handler invocation throughput
//! - Interleaving raises on a shared table from several threads

use std::thread;

use eventset::{EventKey, EventSet};

use crate::payloads::{Bench, Hits, Tick, counting};
use crate::scenarios::Scenario;

/// Configuration for the fan-out benchmark.
#[derive(Debug, Clone)]
pub struct FanoutConfig {
    /// Number of channels on the set.
    pub channel_count: usize,
    /// Handlers subscribed to every channel.
    pub handlers_per_channel: usize,
    /// Threads raising concurrently each round (1 = caller's thread only).
    pub raiser_threads: usize,
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            channel_count: 64,
            handlers_per_channel: 8,
            raiser_threads: 1,
        }
    }
}

pub struct FanoutScenario {
    config: FanoutConfig,
    set: EventSet<Bench>,
    keys: Vec<EventKey>,
    hits: Hits,
}

impl FanoutScenario {
    pub fn new() -> Self {
        Self::with_config(FanoutConfig::default())
    }

    pub fn with_config(config: FanoutConfig) -> Self {
        Self {
            set: EventSet::with_capacity(config.channel_count),
            config,
            keys: Vec::new(),
            hits: Hits::default(),
        }
    }

    /// Total tick value delivered so far.
    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    fn raise_all(set: &EventSet<Bench>, keys: &[EventKey]) {
        for key in keys {
            set.raise(key, &Bench, &Tick(1))
                .expect("counting handlers never fail");
        }
    }
}

impl Default for FanoutScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario for FanoutScenario {
    fn name(&self) -> &'static str {
        "fanout"
    }

    fn description(&self) -> &'static str {
        "every channel of a wide event set raised once per round"
    }

    fn ops_per_round(&self) -> usize {
        self.keys.len() * self.config.raiser_threads.max(1)
    }

    fn subscriber_count(&self) -> usize {
        self.keys.iter().map(|key| self.set.handler_count(key)).sum()
    }

    fn setup(&mut self) {
        self.keys = (0..self.config.channel_count)
            .map(|i| EventKey::named(format!("channel-{i}")))
            .collect();
        for key in &self.keys {
            for _ in 0..self.config.handlers_per_channel {
                self.set
                    .add(key, counting(&self.hits))
                    .expect("Tick channels never mismatch");
            }
        }
    }

    fn update(&mut self) {
        if self.config.raiser_threads <= 1 {
            Self::raise_all(&self.set, &self.keys);
            return;
        }
        let set = &self.set;
        let keys = &self.keys;
        thread::scope(|scope| {
            for _ in 0..self.config.raiser_threads {
                scope.spawn(|| Self::raise_all(set, keys));
            }
        });
    }

    fn teardown(&mut self) {
        for key in self.keys.drain(..) {
            self.set.clear(&key);
        }
    }
}

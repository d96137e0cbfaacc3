//! Realistic dispatch scenarios.
//!
//! These scenarios simulate real-world usage with representative channel counts,
//! subscriber counts and operation mixes.
//!
//! # Scenarios
//!
//! - **Fan-out**: Many channels on one set, every channel raised each round
//! - **Churn**: Random subscribe/unsubscribe/raise mix across a few hot channels

pub mod churn;
pub mod fanout;

pub use churn::{ChurnConfig, ChurnScenario};
pub use fanout::{FanoutConfig, FanoutScenario};

/// Common trait for benchmark scenarios.
pub trait Scenario {
    /// Human-readable name of the scenario.
    fn name(&self) -> &'static str;

    /// Brief description of what this scenario tests.
    fn description(&self) -> &'static str;

    /// Number of set operations one call to [`update()`](Self::update) performs.
    fn ops_per_round(&self) -> usize;

    /// Number of handlers currently subscribed across all channels.
    fn subscriber_count(&self) -> usize;

    /// Set up the scenario (mint keys, subscribe handlers).
    fn setup(&mut self);

    /// Run one round of the scenario.
    fn update(&mut self);

    /// Clean up the scenario.
    fn teardown(&mut self);
}

//! Payload types and handler builders shared across benchmarks.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use eventset::Handler;

/// Small copyable payload (8 bytes).
#[derive(Clone, Copy, Debug, Default)]
pub struct Tick(pub u64);

/// A sensor reading with an owned label, closer to a real notification payload.
#[derive(Clone, Debug, Default)]
pub struct Reading {
    pub sensor: String,
    pub value: f64,
}

/// Sender used by benchmarks that do not care who raised the event.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bench;

/// Shared counter bumped by every handler built with [`counting`].
#[derive(Clone, Debug, Default)]
pub struct Hits(Arc<AtomicU64>);

impl Hits {
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// A handler that adds the tick value to `hits`.
pub fn counting(hits: &Hits) -> Handler<Bench, Tick> {
    let hits = hits.clone();
    Handler::new(move |_: &Bench, tick: &Tick| {
        hits.0.fetch_add(tick.0, Ordering::Relaxed);
    })
}

/// A handler that reads the payload and bumps `hits` once.
pub fn reading(hits: &Hits) -> Handler<Bench, Reading> {
    let hits = hits.clone();
    Handler::new(move |_: &Bench, reading: &Reading| {
        if reading.value.is_finite() && !reading.sensor.is_empty() {
            hits.0.fetch_add(1, Ordering::Relaxed);
        }
    })
}

//! Benchmark utilities for eventset.
//!
//! This crate provides benchmarking infrastructure for the dispatcher, including:
//!
//! - **Microbenchmarks**: Individual operations in isolation (add, remove, raise)
//! - **Scenario benchmarks**: Realistic workloads (many-channel fan-out, random churn)
//! - **Memory tracking**: Heap allocation profiling via dhat
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p eventset_bench
//!
//! # Run specific benchmark group
//! cargo bench -p eventset_bench -- raise
//!
//! # Run with memory profiling (slower)
//! cargo bench -p eventset_bench --features memory_profiling
//! ```
//!
//! # Benchmark Results
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.
//! Memory profiling results are written to `dhat-heap.json` for viewing with
//! DHAT's viewer.

pub mod memory;
pub mod payloads;
pub mod scenarios;

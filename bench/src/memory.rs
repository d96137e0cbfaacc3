//! Per-operation heap cost, measured with dhat.
//!
//! A raise should cost a reference-count bump and no allocation; subscribing
//! allocates a new chain. [`measure_ops`] runs a batch of operations inside a
//! heap window and divides what was allocated by the batch size.
//!
//! Counting needs the `memory_profiling` feature, which also makes the bench
//! binaries install `dhat::Alloc` as the global allocator:
//!
//! ```bash
//! cargo bench -p eventset_bench --features memory_profiling -- memory
//! ```
//!
//! Each window also writes `dhat-heap.json`, viewable at
//! <https://nnethercote.github.io/dh_view/dh_view.html>.

use std::fmt;

/// Heap cost of a batch of `ops` operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCost {
    pub ops: u64,
    pub bytes: u64,
    pub allocations: u64,
}

impl OpCost {
    pub fn bytes_per_op(&self) -> f64 {
        per_op(self.bytes, self.ops)
    }

    pub fn allocations_per_op(&self) -> f64 {
        per_op(self.allocations, self.ops)
    }

    /// `true` when the whole batch ran without touching the heap.
    pub fn is_allocation_free(&self) -> bool {
        self.allocations == 0
    }
}

fn per_op(total: u64, ops: u64) -> f64 {
    if ops == 0 { 0.0 } else { total as f64 / ops as f64 }
}

impl fmt::Display for OpCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} bytes/op, {:.3} allocs/op over {} ops",
            self.bytes_per_op(),
            self.allocations_per_op(),
            self.ops
        )
    }
}

/// Totals allocated since the window opened.
#[cfg(feature = "memory_profiling")]
struct HeapWindow {
    _profiler: dhat::Profiler,
    opened_at: dhat::HeapStats,
}

#[cfg(feature = "memory_profiling")]
impl HeapWindow {
    fn open() -> Self {
        let profiler = dhat::Profiler::new_heap();
        Self {
            _profiler: profiler,
            opened_at: dhat::HeapStats::get(),
        }
    }

    fn close(self) -> (u64, u64) {
        let now = dhat::HeapStats::get();
        (
            (now.total_bytes - self.opened_at.total_bytes) as u64,
            (now.total_blocks - self.opened_at.total_blocks) as u64,
        )
    }
}

#[cfg(not(feature = "memory_profiling"))]
struct HeapWindow;

#[cfg(not(feature = "memory_profiling"))]
impl HeapWindow {
    fn open() -> Self {
        Self
    }

    fn close(self) -> (u64, u64) {
        (0, 0)
    }
}

/// Runs `f`, which performs `ops` operations, and reports its heap cost.
///
/// Without the `memory_profiling` feature nothing is counted and the returned
/// cost is all zeros apart from `ops`.
pub fn measure_ops<F, R>(ops: usize, f: F) -> (R, OpCost)
where
    F: FnOnce() -> R,
{
    let window = HeapWindow::open();
    let result = f();
    let (bytes, allocations) = window.close();
    let cost = OpCost {
        ops: ops as u64,
        bytes,
        allocations,
    };
    (result, cost)
}

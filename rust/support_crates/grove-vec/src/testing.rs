//! Instrumented element type and allocator for tests that count clones, drops,
//! moves and heap allocations.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use grove_common_traits::Relocatable;

use crate::buffer::probe;

thread_local! {
    static CLONES: Cell<usize> = const { Cell::new(0) };
    static DROPS: Cell<usize> = const { Cell::new(0) };
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

/// The system allocator, counting allocations made by the current thread.
struct CountingAlloc;

impl CountingAlloc {
    fn record() {
        let _ = ALLOCATIONS.try_with(|c| c.set(c.get() + 1));
    }
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        Self::record();
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        Self::record();
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

/// A value that reports its clones and drops to thread-local counters.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct Tracked(pub u32);

impl Clone for Tracked {
    fn clone(&self) -> Self {
        CLONES.with(|c| c.set(c.get() + 1));
        Tracked(self.0)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        DROPS.with(|c| c.set(c.get() + 1));
    }
}

unsafe impl Relocatable for Tracked {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Counters {
    pub clones: usize,
    pub drops: usize,
    pub moves: usize,
    pub allocations: usize,
}

pub(crate) fn reset() {
    CLONES.with(|c| c.set(0));
    DROPS.with(|c| c.set(0));
    ALLOCATIONS.with(|c| c.set(0));
    probe::reset();
}

pub(crate) fn counters() -> Counters {
    Counters {
        clones: CLONES.with(Cell::get),
        drops: DROPS.with(Cell::get),
        moves: probe::element_moves(),
        allocations: ALLOCATIONS.with(Cell::get),
    }
}

pub(crate) fn tracked(values: impl IntoIterator<Item = u32>) -> impl Iterator<Item = Tracked> {
    values.into_iter().map(Tracked)
}

//! The two-tier bump pool backing a document's string storage.
//!
//! A document parses, mutates, prints and is discarded as a unit, so the
//! pool never frees individual allocations: [`Pool::alloc`] bumps a cursor,
//! and [`Pool::clear`] releases every dynamic block at once. The first tier
//! is a fixed block sized at construction and reused across `clear`; once it
//! is exhausted, dynamic blocks of at least [`DYNAMIC_POOL_BYTES`] are added
//! as needed. Either tier size may be zero.
//!
//! Allocations are identified by [`Slot`] handles (block + offset + length)
//! rather than pointers; blocks are never resized or dropped while slots are
//! live, so a handle stays valid until `clear`.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::codec::CodeUnit;

/// Default size of the fixed first tier, in bytes.
pub const STATIC_POOL_BYTES: usize = 32 * 1024;

/// Default size of each dynamic block, in bytes. A larger single request
/// gets a block of its own size.
pub const DYNAMIC_POOL_BYTES: usize = 32 * 1024;

/// Raised when the underlying allocator refuses a block request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PoolExhausted;

/// Handle to a run of units inside the pool. Block 0 is the fixed tier,
/// block `n + 1` is the `n`-th dynamic block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    block: u32,
    start: u32,
    len: u32,
}

impl Slot {
    /// The same slot narrowed to its first `len` units.
    pub(crate) fn truncated(self, len: usize) -> Slot {
        debug_assert!(len as u32 <= self.len);
        Slot {
            len: len as u32,
            ..self
        }
    }
}

#[derive(Debug)]
pub(crate) struct Pool<W> {
    fixed: Box<[W]>,
    fixed_used: usize,
    blocks: Vec<Box<[W]>>,
    /// Units used in the newest dynamic block.
    head_used: usize,
    /// Unit count of a standard dynamic block.
    dynamic_len: usize,
}

impl<W: CodeUnit> Pool<W> {
    /// A pool with the given tier sizes in bytes.
    pub(crate) fn with_sizes(static_bytes: usize, dynamic_bytes: usize) -> Self {
        Pool {
            fixed: alloc_block(static_bytes / W::WIDTH).unwrap_or_default(),
            fixed_used: 0,
            blocks: Vec::new(),
            head_used: 0,
            dynamic_len: dynamic_bytes / W::WIDTH,
        }
    }

    /// Allocates `len` zero-initialized units.
    pub(crate) fn alloc(&mut self, len: usize) -> Result<Slot, PoolExhausted> {
        if self.fixed_used + len <= self.fixed.len() {
            let start = self.fixed_used;
            self.fixed_used += len;
            return Ok(Slot {
                block: 0,
                start: start as u32,
                len: len as u32,
            });
        }
        if let Some(head) = self.blocks.last() {
            if self.head_used + len <= head.len() {
                let start = self.head_used;
                self.head_used += len;
                return Ok(Slot {
                    block: self.blocks.len() as u32,
                    start: start as u32,
                    len: len as u32,
                });
            }
        }
        let block_len = self.dynamic_len.max(len);
        self.blocks.push(alloc_block(block_len)?);
        self.head_used = len;
        Ok(Slot {
            block: self.blocks.len() as u32,
            start: 0,
            len: len as u32,
        })
    }

    pub(crate) fn slice(&self, slot: Slot) -> &[W] {
        let block = match slot.block {
            0 => &self.fixed,
            n => &self.blocks[n as usize - 1],
        };
        &block[slot.start as usize..(slot.start + slot.len) as usize]
    }

    /// Writes one unit at `offset` within the slot.
    pub(crate) fn write(&mut self, slot: Slot, offset: usize, unit: W) {
        debug_assert!(offset < slot.len as usize);
        let block = match slot.block {
            0 => &mut self.fixed,
            n => &mut self.blocks[n as usize - 1],
        };
        block[slot.start as usize + offset] = unit;
    }

    /// Copies `units` into a fresh slot. No terminator is added.
    pub(crate) fn alloc_copy(&mut self, units: &[W]) -> Result<Slot, PoolExhausted> {
        let slot = self.alloc(units.len())?;
        let block = match slot.block {
            0 => &mut self.fixed,
            n => &mut self.blocks[n as usize - 1],
        };
        block[slot.start as usize..(slot.start + slot.len) as usize].copy_from_slice(units);
        Ok(slot)
    }

    /// Releases every dynamic block; the fixed tier is kept and reused.
    pub(crate) fn clear(&mut self) {
        self.blocks.clear();
        self.head_used = 0;
        self.fixed_used = 0;
    }

    /// Number of live dynamic blocks.
    pub(crate) fn dynamic_blocks(&self) -> usize {
        self.blocks.len()
    }
}

/// Allocates a zeroed block, reporting failure instead of aborting.
fn alloc_block<W: CodeUnit>(len: usize) -> Result<Box<[W]>, PoolExhausted> {
    let mut v: Vec<W> = Vec::new();
    v.try_reserve_exact(len).map_err(|_| PoolExhausted)?;
    v.resize(len, W::from_u32(0));
    Ok(v.into_boxed_slice())
}

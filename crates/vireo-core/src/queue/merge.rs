// Copyright 2025 vireo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Streaming draw-call coalescing for immediate-mode layers.
//!
//! Layers that tessellate geometry on the fly tend to emit many small,
//! adjacent draw calls. [`DrawBatch`] reduces them as they arrive: a new
//! call is folded into the previous one whenever the two would render
//! contiguously under the same pipeline state. There is no lookahead and no
//! reordering; only the immediately preceding call is a merge candidate.

use crate::state::PrimitiveTopology;

/// One pending draw call inside a [`DrawBatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDraw {
    /// The primitive topology of the call.
    pub topology: PrimitiveTopology,
    /// Index of the pipeline state the call was recorded under, as assigned
    /// by the batching layer.
    pub state_index: u32,
    /// First index of the call's range.
    pub first_index: u32,
    /// Number of indices in the call's range.
    pub index_count: u32,
}

impl PendingDraw {
    /// Folds `next` into `self` if the two are contiguous: same topology,
    /// same pipeline state, and `next` starting exactly where `self` ends.
    /// Returns `false` (leaving `self` untouched) otherwise.
    pub fn try_merge(&mut self, next: &PendingDraw) -> bool {
        if self.state_index != next.state_index
            || self.topology != next.topology
            || self.first_index + self.index_count != next.first_index
        {
            return false;
        }

        self.index_count += next.index_count;
        true
    }
}

/// An ordered accumulator of draw calls with streaming merge.
#[derive(Debug, Clone, Default)]
pub struct DrawBatch {
    calls: Vec<PendingDraw>,
}

impl DrawBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a draw call, merging it into the previous one when possible.
    pub fn push(&mut self, call: PendingDraw) {
        if let Some(last) = self.calls.last_mut() {
            if last.try_merge(&call) {
                return;
            }
        }
        self.calls.push(call);
    }

    /// The merged calls, in submission order.
    pub fn calls(&self) -> &[PendingDraw] {
        &self.calls
    }

    /// Removes and returns the merged calls, leaving the batch empty with
    /// its storage intact.
    pub fn drain(&mut self) -> impl Iterator<Item = PendingDraw> + '_ {
        self.calls.drain(..)
    }

    /// Discards all pending calls, keeping the storage.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// The number of calls after merging.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Returns `true` if no calls are pending.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

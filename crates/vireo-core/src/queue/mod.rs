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

//! Command recording, the stream wire format, replay, and draw batching.
//!
//! The lifecycle is: record into a [`CommandQueue`], [`finish`] it into an
//! immutable [`RecordedQueue`], then [`replay`] that against a
//! [`DeviceContext`], or attach it to a parent queue with
//! [`execute_queue`] and replay the composed graph in one pass. After
//! replay, [`unfinish`] recovers the sole-owner queue for reset and reuse
//! without reallocating.
//!
//! [`finish`]: CommandQueue::finish
//! [`replay`]: RecordedQueue::replay
//! [`execute_queue`]: CommandQueue::execute_queue
//! [`unfinish`]: RecordedQueue::unfinish
//! [`DeviceContext`]: crate::device::DeviceContext

mod command_queue;
mod encoding;
mod merge;
mod replay;

pub use command_queue::{CommandQueue, RecordedQueue};
pub use merge::{DrawBatch, PendingDraw};
pub use replay::ReplayMetrics;

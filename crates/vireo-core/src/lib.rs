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

//! # Vireo Core
//!
//! A deferred GPU command queue: rendering operations (state changes, buffer
//! bindings, draws) are recorded into a compact byte stream instead of being
//! executed immediately, then replayed against a live device context at
//! submission time.
//!
//! Recording and submission are fully decoupled. Any number of
//! [`CommandQueue`]s can be filled concurrently on independent threads; each
//! one is [finished](CommandQueue::finish) into an immutable
//! [`RecordedQueue`] that can be replayed, or composed into a parent queue
//! with [`CommandQueue::execute_queue`]. Every resource referenced by a
//! recorded instruction is retained by the queue, so it stays alive until
//! replay even if the caller has long since dropped its own handle.
//!
//! The crate does not talk to any graphics API itself. All device work goes
//! through the [`DeviceContext`] trait, implemented by a backend crate (or a
//! mock, for tests).

#![warn(missing_docs)]

pub mod color;
pub mod device;
pub mod error;
pub mod queue;
pub mod resource;
pub mod state;

pub use color::LinearRgba;
pub use device::DeviceContext;
pub use error::BindError;
pub use queue::{CommandQueue, DrawBatch, PendingDraw, RecordedQueue, ReplayMetrics};
pub use resource::{
    BufferId, RenderResource, ResourceHandle, ResourceKind, ShaderModuleId, UniformLocation,
};
pub use state::*;

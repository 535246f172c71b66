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

//! Shared-ownership handles to the GPU-side objects a queue can reference.
//!
//! The recording machinery never owns or mutates GPU resources; it only
//! extends their lifetime. Every resource-carrying instruction clones the
//! caller's [`ResourceHandle`] into the queue's retention table, which keeps
//! the reference count above zero until the queue is reset or dropped, even
//! if the caller's original handle is long gone by the time the queue is
//! replayed.

mod location;

pub use location::UniformLocation;

use crate::queue::RecordedQueue;
use std::sync::Arc;

/// An opaque handle to a GPU buffer object owned by the device layer.
///
/// Produced by whatever resource-management layer sits next to the device
/// backend; the queue only carries it through to
/// [`DeviceContext`](crate::device::DeviceContext) bind calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub usize);

/// An opaque handle to a compiled shader owned by the device layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderModuleId(pub usize);

/// The closed set of resource kinds a queue can retain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A vertex or index buffer.
    Buffer,
    /// A compiled shader.
    Shader,
    /// A finished command queue, retained by a parent that executes it.
    Queue,
}

/// One retainable GPU-side object.
///
/// The set of kinds is fixed, so resources are selected by tag rather than
/// through a polymorphic base class: decoding stays a plain `match` and the
/// retention table stores a single homogeneous handle type.
#[derive(Debug)]
pub enum RenderResource {
    /// A vertex or index buffer.
    Buffer(BufferId),
    /// A compiled shader.
    Shader(ShaderModuleId),
    /// A finished command queue attached as a sub-queue.
    Queue(RecordedQueue),
}

/// A thread-safe, reference-counted handle to a [`RenderResource`].
///
/// Cloning a handle is cheap: it only bumps the reference count. The
/// underlying resource is released when the last handle is dropped, which is
/// exactly the guarantee the retention table relies on.
#[derive(Debug, Clone)]
pub struct ResourceHandle(Arc<RenderResource>);

impl ResourceHandle {
    /// Creates a handle to a GPU buffer.
    pub fn buffer(id: BufferId) -> Self {
        Self(Arc::new(RenderResource::Buffer(id)))
    }

    /// Creates a handle to a compiled shader.
    pub fn shader(id: ShaderModuleId) -> Self {
        Self(Arc::new(RenderResource::Shader(id)))
    }

    /// Creates a handle to a finished queue so a parent can retain it.
    pub(crate) fn queue(queue: RecordedQueue) -> Self {
        Self(Arc::new(RenderResource::Queue(queue)))
    }

    /// Returns the kind tag of the underlying resource.
    pub fn kind(&self) -> ResourceKind {
        match &*self.0 {
            RenderResource::Buffer(_) => ResourceKind::Buffer,
            RenderResource::Shader(_) => ResourceKind::Shader,
            RenderResource::Queue(_) => ResourceKind::Queue,
        }
    }

    /// Returns the buffer ID if this handle refers to a buffer.
    pub fn as_buffer(&self) -> Option<BufferId> {
        match &*self.0 {
            RenderResource::Buffer(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the shader ID if this handle refers to a compiled shader.
    pub fn as_shader(&self) -> Option<ShaderModuleId> {
        match &*self.0 {
            RenderResource::Shader(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the recorded queue if this handle refers to a sub-queue.
    pub fn as_queue(&self) -> Option<&RecordedQueue> {
        match &*self.0 {
            RenderResource::Queue(queue) => Some(queue),
            _ => None,
        }
    }

    /// Returns the number of live handles to the underlying resource.
    ///
    /// Like [`Arc::strong_count`], this is a snapshot; it is primarily
    /// useful in tests asserting retention behavior.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

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

//! Recording and finalization of command queues.

use super::encoding::{
    self, BindIndexBufferCmd, BindShaderCmd, BindVertexBufferCmd, BlendStateCmd, ClearColorCmd,
    ClearDepthCmd, DepthStencilStateCmd, DrawCmd, ExecuteQueueCmd, Opcode, RasterizerStateCmd,
};
use crate::color::LinearRgba;
use crate::resource::{ResourceHandle, ResourceKind, UniformLocation};
use crate::state::{
    BlendStateDescriptor, DepthStencilStateDescriptor, IndexFormat, PrimitiveTopology,
    RasterizerStateDescriptor,
};
use std::sync::Arc;

/// A command queue in its recording state.
///
/// Recording appends instructions to an append-only byte stream and pins
/// every referenced resource into the queue's retention table. The backing
/// storage grows geometrically and is kept across [`reset`](Self::reset), so
/// a queue reused every frame stops allocating once it has reached its
/// steady-state size.
///
/// A `CommandQueue` cannot be replayed or attached to another queue
/// directly; [`finish`](Self::finish) it first. The split guarantees that a
/// queue is never recorded into and replayed at the same time, and, because
/// only already-finished queues can be attached, that the composition graph
/// can never contain a cycle.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pub(crate) bytes: Vec<u8>,
    pub(crate) retained: Vec<ResourceHandle>,
    last_rasterizer: Option<RasterizerStateDescriptor>,
    last_blend: Option<BlendStateDescriptor>,
    last_depth_stencil: Option<DepthStencilStateDescriptor>,
}

impl CommandQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with pre-sized backing storage.
    ///
    /// `bytes` is the instruction stream capacity in bytes; `resources` the
    /// retention table capacity in handles. Useful when a frame's rough
    /// command volume is known up front.
    pub fn with_capacity(bytes: usize, resources: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            retained: Vec::with_capacity(resources),
            ..Self::default()
        }
    }

    /// Records a clear of the color target.
    pub fn clear_color(&mut self, color: LinearRgba) {
        encoding::put_op(
            &mut self.bytes,
            Opcode::ClearColor,
            &ClearColorCmd {
                color: color.to_array(),
            },
        );
    }

    /// Records a clear of the depth target.
    pub fn clear_depth(&mut self, depth: f32) {
        encoding::put_op(&mut self.bytes, Opcode::ClearDepth, &ClearDepthCmd { depth });
    }

    /// Records a rasterizer state bind.
    ///
    /// Re-binding the state that is already current in this queue is elided;
    /// the replayed stream behaves identically either way.
    pub fn set_rasterizer_state(&mut self, state: &RasterizerStateDescriptor) {
        if self.last_rasterizer.as_ref() == Some(state) {
            return;
        }
        encoding::put_op(
            &mut self.bytes,
            Opcode::SetRasterizerState,
            &RasterizerStateCmd::pack(state),
        );
        self.last_rasterizer = Some(*state);
    }

    /// Records a blend state bind, covering all color target slots.
    ///
    /// Consecutive duplicates are elided like
    /// [`set_rasterizer_state`](Self::set_rasterizer_state).
    pub fn set_blend_state(&mut self, state: &BlendStateDescriptor) {
        if self.last_blend.as_ref() == Some(state) {
            return;
        }
        encoding::put_op(
            &mut self.bytes,
            Opcode::SetBlendState,
            &BlendStateCmd::pack(state),
        );
        self.last_blend = Some(*state);
    }

    /// Records a depth/stencil state bind.
    ///
    /// Consecutive duplicates are elided like
    /// [`set_rasterizer_state`](Self::set_rasterizer_state).
    pub fn set_depth_stencil_state(&mut self, state: &DepthStencilStateDescriptor) {
        if self.last_depth_stencil.as_ref() == Some(state) {
            return;
        }
        encoding::put_op(
            &mut self.bytes,
            Opcode::SetDepthStencilState,
            &DepthStencilStateCmd::pack(state),
        );
        self.last_depth_stencil = Some(*state);
    }

    /// Records a shader bind. The shader is retained until the queue is
    /// reset or dropped.
    pub fn bind_shader(&mut self, shader: &ResourceHandle) {
        debug_assert_eq!(
            shader.kind(),
            ResourceKind::Shader,
            "bind_shader requires a shader handle"
        );
        let resource = self.retain(shader);
        encoding::put_op(&mut self.bytes, Opcode::BindShader, &BindShaderCmd { resource });
    }

    /// Records a vertex buffer bind for `slot`, starting `offset` bytes into
    /// the buffer. The buffer is retained until the queue is reset or
    /// dropped.
    pub fn bind_vertex_buffer(&mut self, slot: u32, buffer: &ResourceHandle, offset: u64) {
        debug_assert_eq!(
            buffer.kind(),
            ResourceKind::Buffer,
            "bind_vertex_buffer requires a buffer handle"
        );
        let resource = self.retain(buffer);
        encoding::put_op(
            &mut self.bytes,
            Opcode::BindVertexBuffer,
            &BindVertexBufferCmd {
                offset,
                resource,
                slot,
            },
        );
    }

    /// Records an index buffer bind, starting `offset` bytes into the
    /// buffer. The buffer is retained until the queue is reset or dropped.
    pub fn bind_index_buffer(&mut self, buffer: &ResourceHandle, format: IndexFormat, offset: u64) {
        debug_assert_eq!(
            buffer.kind(),
            ResourceKind::Buffer,
            "bind_index_buffer requires a buffer handle"
        );
        let resource = self.retain(buffer);
        encoding::put_op(
            &mut self.bytes,
            Opcode::BindIndexBuffer,
            &BindIndexBufferCmd {
                offset,
                resource,
                format: format as u32,
            },
        );
    }

    /// Records a uniform block upload.
    ///
    /// `data` is copied into the instruction stream verbatim; the call has
    /// value semantics, so the caller may drop or overwrite its buffer
    /// immediately. If `location` is a name, the name bytes are copied
    /// inline as well.
    pub fn uniform_block<'a>(&mut self, location: impl Into<UniformLocation<'a>>, data: &[u8]) {
        encoding::put_uniform_block(&mut self.bytes, location.into(), data);
    }

    /// Records a non-indexed draw.
    pub fn draw(
        &mut self,
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
        instance_count: u32,
        first_instance: u32,
    ) {
        encoding::put_op(
            &mut self.bytes,
            Opcode::Draw,
            &DrawCmd {
                topology: topology as u32,
                first: first_vertex,
                count: vertex_count,
                instance_count,
                first_instance,
            },
        );
    }

    /// Records an indexed draw.
    pub fn draw_indexed(
        &mut self,
        topology: PrimitiveTopology,
        first_index: u32,
        index_count: u32,
        instance_count: u32,
        first_instance: u32,
    ) {
        encoding::put_op(
            &mut self.bytes,
            Opcode::DrawIndexed,
            &DrawCmd {
                topology: topology as u32,
                first: first_index,
                count: index_count,
                instance_count,
                first_instance,
            },
        );
    }

    /// Records the in-place replay of a finished queue.
    ///
    /// The child is retained by this queue, so a composed graph cannot lose
    /// a sub-queue while a replay is pending. The same child may be attached
    /// to any number of parents.
    pub fn execute_queue(&mut self, queue: &RecordedQueue) {
        let resource = self.retain(&ResourceHandle::queue(queue.clone()));
        encoding::put_op(
            &mut self.bytes,
            Opcode::ExecuteQueue,
            &ExecuteQueueCmd { resource },
        );
        // The child stream may bind anything; duplicate elision must not
        // reach across it.
        self.last_rasterizer = None;
        self.last_blend = None;
        self.last_depth_stencil = None;
    }

    /// Discards every recorded instruction and releases all retained
    /// resources. Backing storage is kept for reuse.
    pub fn reset(&mut self) {
        log::trace!(
            "resetting command queue: {} bytes, {} retained resources",
            self.bytes.len(),
            self.retained.len()
        );
        self.bytes.clear();
        self.retained.clear();
        self.last_rasterizer = None;
        self.last_blend = None;
        self.last_depth_stencil = None;
    }

    /// Finalizes the recording into an immutable, replayable
    /// [`RecordedQueue`].
    pub fn finish(self) -> RecordedQueue {
        log::trace!(
            "finished command queue: {} bytes, {} retained resources",
            self.bytes.len(),
            self.retained.len()
        );
        RecordedQueue {
            inner: Arc::new(self),
        }
    }

    /// Returns `true` if nothing has been recorded since creation or the
    /// last [`reset`](Self::reset).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The size of the encoded instruction stream in bytes.
    pub fn encoded_len(&self) -> usize {
        self.bytes.len()
    }

    /// The number of resources currently pinned by this queue.
    pub fn retained_len(&self) -> usize {
        self.retained.len()
    }

    fn retain(&mut self, handle: &ResourceHandle) -> u32 {
        let index = self.retained.len();
        assert!(index < u32::MAX as usize, "retention table overflow");
        self.retained.push(handle.clone());
        index as u32
    }
}

/// A finished, immutable command queue.
///
/// This is the only form a queue can be replayed in, and the only form that
/// can be attached to another queue with
/// [`CommandQueue::execute_queue`]. Cloning is cheap (shared ownership of
/// the recorded stream); clones replay identically.
#[derive(Debug, Clone)]
pub struct RecordedQueue {
    inner: Arc<CommandQueue>,
}

impl RecordedQueue {
    /// Recovers the mutable [`CommandQueue`] for reset and re-recording.
    ///
    /// Succeeds only when this is the last reference to the recording:
    /// no other clone, and no parent queue retaining it. Otherwise the
    /// shared queue is handed back unchanged as the error value.
    pub fn unfinish(self) -> Result<CommandQueue, RecordedQueue> {
        Arc::try_unwrap(self.inner).map_err(|inner| RecordedQueue { inner })
    }

    /// Returns `true` if the queue contains no instructions.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The size of the encoded instruction stream in bytes.
    pub fn encoded_len(&self) -> usize {
        self.inner.encoded_len()
    }

    /// The number of resources pinned by this queue.
    pub fn retained_len(&self) -> usize {
        self.inner.retained_len()
    }

    pub(crate) fn stream(&self) -> &[u8] {
        &self.inner.bytes
    }

    pub(crate) fn retained(&self) -> &[ResourceHandle] {
        &self.inner.retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{BufferId, ShaderModuleId};

    #[test]
    fn new_queue_is_empty() {
        let queue = CommandQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.retained_len(), 0);
    }

    #[test]
    fn resource_binds_grow_the_retention_table_in_order() {
        let mut queue = CommandQueue::new();
        let shader = ResourceHandle::shader(ShaderModuleId(1));
        let buffer = ResourceHandle::buffer(BufferId(2));

        queue.bind_shader(&shader);
        queue.bind_vertex_buffer(0, &buffer, 0);
        queue.bind_index_buffer(&buffer, IndexFormat::Uint16, 0);

        assert_eq!(queue.retained_len(), 3);
        assert_eq!(queue.retained[0].as_shader(), Some(ShaderModuleId(1)));
        assert_eq!(queue.retained[1].as_buffer(), Some(BufferId(2)));
        // The same handle bound twice occupies two table slots.
        assert_eq!(queue.retained[2].as_buffer(), Some(BufferId(2)));
    }

    #[test]
    fn duplicate_state_binds_are_elided() {
        let mut queue = CommandQueue::new();
        let state = RasterizerStateDescriptor::default();

        queue.set_rasterizer_state(&state);
        let len = queue.encoded_len();
        queue.set_rasterizer_state(&state);
        assert_eq!(queue.encoded_len(), len, "identical re-bind must be elided");

        let mut other = state;
        other.scissor_enable = true;
        queue.set_rasterizer_state(&other);
        assert!(queue.encoded_len() > len, "changed state must be recorded");
    }

    #[test]
    fn draws_between_duplicate_state_binds_do_not_defeat_elision() {
        let mut queue = CommandQueue::new();
        let state = DepthStencilStateDescriptor::default();

        queue.set_depth_stencil_state(&state);
        queue.draw(PrimitiveTopology::TriangleList, 0, 3, 1, 0);
        let len = queue.encoded_len();
        queue.set_depth_stencil_state(&state);
        assert_eq!(queue.encoded_len(), len);
    }

    #[test]
    fn attached_sub_queue_stops_state_elision() {
        let mut child = CommandQueue::new();
        child.set_blend_state(&BlendStateDescriptor::alpha_blend());
        let child = child.finish();

        let mut parent = CommandQueue::new();
        let state = BlendStateDescriptor::default();
        parent.set_blend_state(&state);
        parent.execute_queue(&child);
        let len = parent.encoded_len();
        // The child may have left any blend state bound; the re-bind must
        // be recorded.
        parent.set_blend_state(&state);
        assert!(parent.encoded_len() > len);
    }

    #[test]
    fn reset_clears_contents_but_keeps_storage() {
        let mut queue = CommandQueue::new();
        let buffer = ResourceHandle::buffer(BufferId(5));
        queue.bind_vertex_buffer(0, &buffer, 0);
        queue.draw(PrimitiveTopology::LineList, 0, 2, 1, 0);

        let byte_capacity = queue.bytes.capacity();
        queue.reset();

        assert!(queue.is_empty());
        assert_eq!(queue.retained_len(), 0);
        assert_eq!(queue.bytes.capacity(), byte_capacity);
        assert_eq!(buffer.ref_count(), 1, "reset must release retained handles");
    }

    #[test]
    fn reset_forgets_the_elision_cache() {
        let mut queue = CommandQueue::new();
        let state = RasterizerStateDescriptor::default();
        queue.set_rasterizer_state(&state);
        queue.reset();
        queue.set_rasterizer_state(&state);
        assert!(
            !queue.is_empty(),
            "first bind after reset must be recorded even if equal to the pre-reset state"
        );
    }

    #[test]
    fn unfinish_returns_the_sole_recording() {
        let mut queue = CommandQueue::new();
        queue.clear_depth(1.0);
        let len = queue.encoded_len();

        let recorded = queue.finish();
        let queue = recorded.unfinish().expect("single reference");
        assert_eq!(queue.encoded_len(), len);
    }

    #[test]
    fn unfinish_fails_while_shared() {
        let queue = CommandQueue::new().finish();
        let clone = queue.clone();
        let queue = match queue.unfinish() {
            Err(still_shared) => still_shared,
            Ok(_) => panic!("unfinish must fail while a clone exists"),
        };
        drop(clone);
        assert!(queue.unfinish().is_ok());
    }

    #[test]
    fn unfinish_fails_while_attached_to_a_parent() {
        let child = CommandQueue::new().finish();
        let mut parent = CommandQueue::new();
        parent.execute_queue(&child);
        assert!(child.unfinish().is_err(), "the parent still retains the child");
    }
}

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

//! The collaborator seam between replay and the native graphics API.

use crate::color::LinearRgba;
use crate::error::BindError;
use crate::resource::{BufferId, ShaderModuleId, UniformLocation};
use crate::state::{
    BlendStateDescriptor, DepthStencilStateDescriptor, IndexFormat, PrimitiveTopology,
    RasterizerStateDescriptor,
};

/// The device operations a replayed queue dispatches into.
///
/// Implemented by a concrete graphics backend over whatever context is
/// current on the submitting thread. The queue machinery only *calls* these
/// operations, strictly in recorded order; it never creates, destroys or
/// mutates device objects.
///
/// State setters are infallible: a state descriptor maps every field it
/// describes onto the context in one deterministic pass. Resource binds and
/// uniform uploads may fail for expected reasons (a shader that did not
/// compile, a stale buffer); those return a [`BindError`], which replay
/// logs and counts without stopping.
pub trait DeviceContext {
    /// Clears the color target to `color`.
    fn clear_color(&mut self, color: LinearRgba);

    /// Clears the depth target to `depth`.
    fn clear_depth(&mut self, depth: f32);

    /// Applies every field of the rasterizer state.
    fn set_rasterizer_state(&mut self, state: &RasterizerStateDescriptor);

    /// Applies every field of the blend state, for all color target slots.
    fn set_blend_state(&mut self, state: &BlendStateDescriptor);

    /// Applies every field of the depth/stencil state.
    fn set_depth_stencil_state(&mut self, state: &DepthStencilStateDescriptor);

    /// Makes `shader` the active program for subsequent draws.
    fn bind_shader(&mut self, shader: ShaderModuleId) -> Result<(), BindError>;

    /// Binds `buffer` as the vertex source for `slot`, starting at `offset`
    /// bytes.
    fn bind_vertex_buffer(
        &mut self,
        slot: u32,
        buffer: BufferId,
        offset: u64,
    ) -> Result<(), BindError>;

    /// Binds `buffer` as the index source, starting at `offset` bytes.
    fn bind_index_buffer(
        &mut self,
        buffer: BufferId,
        format: IndexFormat,
        offset: u64,
    ) -> Result<(), BindError>;

    /// Uploads a uniform block to `location` in the currently bound shader.
    fn upload_uniform_block(
        &mut self,
        location: UniformLocation<'_>,
        data: &[u8],
    ) -> Result<(), BindError>;

    /// Issues a non-indexed draw.
    fn draw(
        &mut self,
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
        instance_count: u32,
        first_instance: u32,
    );

    /// Issues an indexed draw.
    fn draw_indexed(
        &mut self,
        topology: PrimitiveTopology,
        first_index: u32,
        index_count: u32,
        instance_count: u32,
        first_instance: u32,
    );
}

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

//! A journaling [`DeviceContext`] used by the integration tests.

// Each test binary compiles this module independently and uses a different
// subset of it.
#![allow(dead_code)]

use vireo_core::{
    BindError, BlendStateDescriptor, BufferId, DepthStencilStateDescriptor, DeviceContext,
    IndexFormat, LinearRgba, PrimitiveTopology, RasterizerStateDescriptor, ShaderModuleId,
    UniformLocation,
};

/// An owned copy of a [`UniformLocation`], so journal entries can outlive
/// the replayed stream they were decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournaledLocation {
    Slot(u32),
    Offset(u64),
    Name(String),
}

impl From<UniformLocation<'_>> for JournaledLocation {
    fn from(location: UniformLocation<'_>) -> Self {
        match location {
            UniformLocation::Slot(slot) => JournaledLocation::Slot(slot),
            UniformLocation::Offset(offset) => JournaledLocation::Offset(offset),
            UniformLocation::Name(name) => JournaledLocation::Name(name.to_string()),
        }
    }
}

/// One device operation observed by [`MockDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    ClearColor(LinearRgba),
    ClearDepth(f32),
    SetRasterizerState(RasterizerStateDescriptor),
    SetBlendState(BlendStateDescriptor),
    SetDepthStencilState(DepthStencilStateDescriptor),
    BindShader(ShaderModuleId),
    BindVertexBuffer {
        slot: u32,
        buffer: BufferId,
        offset: u64,
    },
    BindIndexBuffer {
        buffer: BufferId,
        format: IndexFormat,
        offset: u64,
    },
    UploadUniformBlock {
        location: JournaledLocation,
        data: Vec<u8>,
    },
    Draw {
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
        instance_count: u32,
        first_instance: u32,
    },
    DrawIndexed {
        topology: PrimitiveTopology,
        first_index: u32,
        index_count: u32,
        instance_count: u32,
        first_instance: u32,
    },
}

/// A device context that journals every call it receives, optionally
/// rejecting selected bind categories to exercise best-effort replay.
#[derive(Debug, Default)]
pub struct MockDevice {
    pub calls: Vec<DeviceCall>,
    pub fail_shader_binds: bool,
    pub fail_uniform_uploads: bool,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for the journal entries seen so far.
    pub fn journal(&self) -> &[DeviceCall] {
        &self.calls
    }
}

impl DeviceContext for MockDevice {
    fn clear_color(&mut self, color: LinearRgba) {
        self.calls.push(DeviceCall::ClearColor(color));
    }

    fn clear_depth(&mut self, depth: f32) {
        self.calls.push(DeviceCall::ClearDepth(depth));
    }

    fn set_rasterizer_state(&mut self, state: &RasterizerStateDescriptor) {
        self.calls.push(DeviceCall::SetRasterizerState(*state));
    }

    fn set_blend_state(&mut self, state: &BlendStateDescriptor) {
        self.calls.push(DeviceCall::SetBlendState(*state));
    }

    fn set_depth_stencil_state(&mut self, state: &DepthStencilStateDescriptor) {
        self.calls.push(DeviceCall::SetDepthStencilState(*state));
    }

    fn bind_shader(&mut self, shader: ShaderModuleId) -> Result<(), BindError> {
        if self.fail_shader_binds {
            return Err(BindError::InvalidShader(shader));
        }
        self.calls.push(DeviceCall::BindShader(shader));
        Ok(())
    }

    fn bind_vertex_buffer(
        &mut self,
        slot: u32,
        buffer: BufferId,
        offset: u64,
    ) -> Result<(), BindError> {
        self.calls.push(DeviceCall::BindVertexBuffer {
            slot,
            buffer,
            offset,
        });
        Ok(())
    }

    fn bind_index_buffer(
        &mut self,
        buffer: BufferId,
        format: IndexFormat,
        offset: u64,
    ) -> Result<(), BindError> {
        self.calls.push(DeviceCall::BindIndexBuffer {
            buffer,
            format,
            offset,
        });
        Ok(())
    }

    fn upload_uniform_block(
        &mut self,
        location: UniformLocation<'_>,
        data: &[u8],
    ) -> Result<(), BindError> {
        if self.fail_uniform_uploads {
            return Err(BindError::UnknownUniform(location.to_string()));
        }
        self.calls.push(DeviceCall::UploadUniformBlock {
            location: location.into(),
            data: data.to_vec(),
        });
        Ok(())
    }

    fn draw(
        &mut self,
        topology: PrimitiveTopology,
        first_vertex: u32,
        vertex_count: u32,
        instance_count: u32,
        first_instance: u32,
    ) {
        self.calls.push(DeviceCall::Draw {
            topology,
            first_vertex,
            vertex_count,
            instance_count,
            first_instance,
        });
    }

    fn draw_indexed(
        &mut self,
        topology: PrimitiveTopology,
        first_index: u32,
        index_count: u32,
        instance_count: u32,
        first_instance: u32,
    ) {
        self.calls.push(DeviceCall::DrawIndexed {
            topology,
            first_index,
            index_count,
            instance_count,
            first_instance,
        });
    }
}

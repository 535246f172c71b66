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

//! The three pipeline state descriptors bound through dedicated
//! instructions.

use super::enums::{BlendFactor, BlendOperation, CompareFunction, CullMode, FrontFace, PolygonMode};
use super::flags::BlendSlotMask;

/// Number of independently blendable color target slots.
pub const BLEND_SLOT_COUNT: usize = 8;

/// Describes primitive rasterization: culling, winding, fill mode, depth
/// clamping and scissoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterizerStateDescriptor {
    /// The face culling mode.
    pub cull_mode: CullMode,
    /// The vertex winding order that determines the "front" face.
    pub front_face: FrontFace,
    /// The rasterization mode for polygons.
    pub polygon_mode: PolygonMode,
    /// If `true`, fragments beyond the depth range are clamped instead of
    /// clipped.
    pub depth_clamp: bool,
    /// If `true`, fragments outside the scissor rectangle are discarded.
    pub scissor_enable: bool,
}

impl Default for RasterizerStateDescriptor {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::None,
            front_face: FrontFace::Cw,
            polygon_mode: PolygonMode::Fill,
            depth_clamp: false,
            scissor_enable: false,
        }
    }
}

/// A complete blend equation for one component group (color or alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendComponentDescriptor {
    /// The blend factor for the source value (from the fragment shader).
    pub src_factor: BlendFactor,
    /// The blend factor for the destination value (already in the target).
    pub dst_factor: BlendFactor,
    /// The operation combining the two weighted values.
    pub operation: BlendOperation,
}

impl Default for BlendComponentDescriptor {
    /// Replace: `1 * src + 0 * dst`.
    fn default() -> Self {
        Self {
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::Zero,
            operation: BlendOperation::Add,
        }
    }
}

/// The blend equations for a single color target slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlendSlotDescriptor {
    /// The blend equation for the RGB components.
    pub color: BlendComponentDescriptor,
    /// The blend equation for the alpha component.
    pub alpha: BlendComponentDescriptor,
}

/// Describes blending for all color target slots.
///
/// Slots whose bit is clear in [`enabled_slots`](Self::enabled_slots) have
/// blending disabled; their equations are still part of the value for
/// comparison purposes, so two states differing only in a disabled slot's
/// equation are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlendStateDescriptor {
    /// Per-slot blend equations.
    pub slots: [BlendSlotDescriptor; BLEND_SLOT_COUNT],
    /// Which slots have blending enabled.
    pub enabled_slots: BlendSlotMask,
}

impl BlendStateDescriptor {
    /// Standard premultiplied-style alpha blending on slot 0.
    pub fn alpha_blend() -> Self {
        let mut state = Self::default();
        state.slots[0] = BlendSlotDescriptor {
            color: BlendComponentDescriptor {
                src_factor: BlendFactor::SrcAlpha,
                dst_factor: BlendFactor::OneMinusSrcAlpha,
                operation: BlendOperation::Add,
            },
            alpha: BlendComponentDescriptor {
                src_factor: BlendFactor::One,
                dst_factor: BlendFactor::OneMinusSrcAlpha,
                operation: BlendOperation::Add,
            },
        };
        state.enabled_slots = BlendSlotMask::slot(0);
        state
    }
}

/// Describes depth and stencil testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilStateDescriptor {
    /// The comparison function used for the depth test.
    pub depth_compare: CompareFunction,
    /// If `true`, the depth test is performed.
    pub depth_test_enabled: bool,
    /// If `true`, passing fragments write their depth value.
    pub depth_write_enabled: bool,
    /// If `true`, the stencil test is performed.
    pub stencil_test_enabled: bool,
    /// A bitmask for reading from the stencil buffer.
    pub stencil_read_mask: u8,
    /// A bitmask for writing to the stencil buffer.
    pub stencil_write_mask: u8,
}

impl Default for DepthStencilStateDescriptor {
    fn default() -> Self {
        Self {
            depth_compare: CompareFunction::Less,
            depth_test_enabled: true,
            depth_write_enabled: true,
            stencil_test_enabled: false,
            stencil_read_mask: 0,
            stencil_write_mask: 0,
        }
    }
}

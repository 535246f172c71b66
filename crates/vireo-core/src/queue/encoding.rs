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

//! The in-process wire format of the command stream.
//!
//! Every instruction is one opcode byte followed by that opcode's operand
//! block. Fixed-size operands are `#[repr(C)]` POD structs whose field
//! widths leave no implicit padding, written and read through `bytemuck`;
//! the only variable-length instruction is `UniformBlock`, which carries an
//! inline location encoding and a length-prefixed payload. Multi-byte values
//! use native endianness; the stream never leaves the process and is not a
//! persistence format.
//!
//! Resource-carrying instructions store a `u32` index into the owning
//! queue's retention table, never a handle, so the stream itself contains no
//! addresses.
//!
//! The stream is produced exclusively by [`CommandQueue`] in this crate;
//! a malformed stream is therefore a logic defect, and the reader panics
//! rather than reporting recoverable errors.
//!
//! [`CommandQueue`]: crate::queue::CommandQueue

use crate::resource::UniformLocation;
use crate::state::{
    BlendComponentDescriptor, BlendSlotDescriptor, BlendSlotMask, BlendStateDescriptor,
    CompareFunction, CullMode, DepthStencilStateDescriptor, FrontFace, PolygonMode,
    RasterizerStateDescriptor, BLEND_SLOT_COUNT,
};
use crate::state::{BlendFactor, BlendOperation};
use bytemuck::{Pod, Zeroable};
use std::mem::size_of;

/// The closed set of instruction tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Opcode {
    ClearColor = 1,
    ClearDepth = 2,
    SetRasterizerState = 3,
    SetBlendState = 4,
    SetDepthStencilState = 5,
    BindShader = 6,
    BindVertexBuffer = 7,
    BindIndexBuffer = 8,
    UniformBlock = 9,
    Draw = 10,
    DrawIndexed = 11,
    ExecuteQueue = 12,
}

impl Opcode {
    fn from_byte(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Opcode::ClearColor),
            2 => Some(Opcode::ClearDepth),
            3 => Some(Opcode::SetRasterizerState),
            4 => Some(Opcode::SetBlendState),
            5 => Some(Opcode::SetDepthStencilState),
            6 => Some(Opcode::BindShader),
            7 => Some(Opcode::BindVertexBuffer),
            8 => Some(Opcode::BindIndexBuffer),
            9 => Some(Opcode::UniformBlock),
            10 => Some(Opcode::Draw),
            11 => Some(Opcode::DrawIndexed),
            12 => Some(Opcode::ExecuteQueue),
            _ => None,
        }
    }
}

fn decode_enum<T>(value: Option<T>, what: &str) -> T {
    match value {
        Some(v) => v,
        None => panic!("corrupted command stream: invalid {what}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixed-size operand blocks
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct ClearColorCmd {
    pub color: [f32; 4],
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct ClearDepthCmd {
    pub depth: f32,
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct RasterizerStateCmd {
    cull_mode: u32,
    front_face: u32,
    polygon_mode: u32,
    depth_clamp: u32,
    scissor_enable: u32,
}

impl RasterizerStateCmd {
    pub fn pack(state: &RasterizerStateDescriptor) -> Self {
        Self {
            cull_mode: state.cull_mode as u32,
            front_face: state.front_face as u32,
            polygon_mode: state.polygon_mode as u32,
            depth_clamp: state.depth_clamp as u32,
            scissor_enable: state.scissor_enable as u32,
        }
    }

    pub fn unpack(&self) -> RasterizerStateDescriptor {
        RasterizerStateDescriptor {
            cull_mode: decode_enum(CullMode::from_wire(self.cull_mode), "cull mode"),
            front_face: decode_enum(FrontFace::from_wire(self.front_face), "front face"),
            polygon_mode: decode_enum(PolygonMode::from_wire(self.polygon_mode), "polygon mode"),
            depth_clamp: self.depth_clamp != 0,
            scissor_enable: self.scissor_enable != 0,
        }
    }
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct BlendSlotCmd {
    src_color: u32,
    dst_color: u32,
    op_color: u32,
    src_alpha: u32,
    dst_alpha: u32,
    op_alpha: u32,
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct BlendStateCmd {
    slots: [BlendSlotCmd; BLEND_SLOT_COUNT],
    enabled_slots: u32,
}

fn pack_blend_component(component: &BlendComponentDescriptor) -> (u32, u32, u32) {
    (
        component.src_factor as u32,
        component.dst_factor as u32,
        component.operation as u32,
    )
}

fn unpack_blend_component(src: u32, dst: u32, op: u32) -> BlendComponentDescriptor {
    BlendComponentDescriptor {
        src_factor: decode_enum(BlendFactor::from_wire(src), "blend factor"),
        dst_factor: decode_enum(BlendFactor::from_wire(dst), "blend factor"),
        operation: decode_enum(BlendOperation::from_wire(op), "blend operation"),
    }
}

impl BlendStateCmd {
    pub fn pack(state: &BlendStateDescriptor) -> Self {
        let mut cmd = Self::zeroed();
        for (slot, desc) in cmd.slots.iter_mut().zip(state.slots.iter()) {
            (slot.src_color, slot.dst_color, slot.op_color) = pack_blend_component(&desc.color);
            (slot.src_alpha, slot.dst_alpha, slot.op_alpha) = pack_blend_component(&desc.alpha);
        }
        cmd.enabled_slots = state.enabled_slots.bits() as u32;
        cmd
    }

    pub fn unpack(&self) -> BlendStateDescriptor {
        let mut state = BlendStateDescriptor::default();
        for (desc, slot) in state.slots.iter_mut().zip(self.slots.iter()) {
            *desc = BlendSlotDescriptor {
                color: unpack_blend_component(slot.src_color, slot.dst_color, slot.op_color),
                alpha: unpack_blend_component(slot.src_alpha, slot.dst_alpha, slot.op_alpha),
            };
        }
        state.enabled_slots = BlendSlotMask::from_bits(self.enabled_slots as u8);
        state
    }
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct DepthStencilStateCmd {
    depth_compare: u32,
    depth_test: u32,
    depth_write: u32,
    stencil_test: u32,
    stencil_read_mask: u32,
    stencil_write_mask: u32,
}

impl DepthStencilStateCmd {
    pub fn pack(state: &DepthStencilStateDescriptor) -> Self {
        Self {
            depth_compare: state.depth_compare as u32,
            depth_test: state.depth_test_enabled as u32,
            depth_write: state.depth_write_enabled as u32,
            stencil_test: state.stencil_test_enabled as u32,
            stencil_read_mask: state.stencil_read_mask as u32,
            stencil_write_mask: state.stencil_write_mask as u32,
        }
    }

    pub fn unpack(&self) -> DepthStencilStateDescriptor {
        DepthStencilStateDescriptor {
            depth_compare: decode_enum(
                CompareFunction::from_wire(self.depth_compare),
                "compare function",
            ),
            depth_test_enabled: self.depth_test != 0,
            depth_write_enabled: self.depth_write != 0,
            stencil_test_enabled: self.stencil_test != 0,
            stencil_read_mask: self.stencil_read_mask as u8,
            stencil_write_mask: self.stencil_write_mask as u8,
        }
    }
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct BindShaderCmd {
    /// Index into the retention table.
    pub resource: u32,
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct BindVertexBufferCmd {
    pub offset: u64,
    /// Index into the retention table.
    pub resource: u32,
    pub slot: u32,
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct BindIndexBufferCmd {
    pub offset: u64,
    /// Index into the retention table.
    pub resource: u32,
    pub format: u32,
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct DrawCmd {
    pub topology: u32,
    pub first: u32,
    pub count: u32,
    pub instance_count: u32,
    pub first_instance: u32,
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub(crate) struct ExecuteQueueCmd {
    /// Index into the retention table.
    pub resource: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Writing
// ─────────────────────────────────────────────────────────────────────────────

/// Appends one fixed-layout instruction: opcode byte, then the operand block.
pub(crate) fn put_op<T: Pod>(out: &mut Vec<u8>, opcode: Opcode, operands: &T) {
    out.push(opcode as u8);
    out.extend_from_slice(bytemuck::bytes_of(operands));
}

const LOCATION_TAG_SLOT: u8 = 0;
const LOCATION_TAG_OFFSET: u8 = 1;
const LOCATION_TAG_NAME: u8 = 2;

fn put_location(out: &mut Vec<u8>, location: UniformLocation<'_>) {
    match location {
        UniformLocation::Slot(slot) => {
            out.push(LOCATION_TAG_SLOT);
            out.extend_from_slice(bytemuck::bytes_of(&slot));
        }
        UniformLocation::Offset(offset) => {
            out.push(LOCATION_TAG_OFFSET);
            out.extend_from_slice(bytemuck::bytes_of(&offset));
        }
        UniformLocation::Name(name) => {
            assert!(
                name.len() <= u32::MAX as usize,
                "uniform location name too long to encode"
            );
            out.push(LOCATION_TAG_NAME);
            out.extend_from_slice(bytemuck::bytes_of(&(name.len() as u32)));
            out.extend_from_slice(name.as_bytes());
        }
    }
}

/// Appends a `UniformBlock` instruction. The payload bytes are copied
/// verbatim; the caller's buffer may be dropped immediately afterwards.
pub(crate) fn put_uniform_block(out: &mut Vec<u8>, location: UniformLocation<'_>, data: &[u8]) {
    out.push(Opcode::UniformBlock as u8);
    put_location(out, location);
    out.extend_from_slice(bytemuck::bytes_of(&(data.len() as u64)));
    out.extend_from_slice(data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Reading
// ─────────────────────────────────────────────────────────────────────────────

/// A borrowing cursor over an encoded stream. All reads are zero-copy and
/// zero-allocation; malformed input panics.
pub(crate) struct StreamReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> StreamReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub(crate) fn opcode(&mut self) -> Opcode {
        let at = self.pos;
        let raw = self.take(1)[0];
        Opcode::from_byte(raw).unwrap_or_else(|| {
            panic!("corrupted command stream: unknown opcode {raw:#04x} at offset {at}")
        })
    }

    /// Reads one POD operand block. The block may sit at any byte offset, so
    /// the read is unaligned.
    pub(crate) fn pod<T: Pod>(&mut self) -> T {
        bytemuck::pod_read_unaligned(self.take(size_of::<T>()))
    }

    pub(crate) fn payload(&mut self, len: usize) -> &'a [u8] {
        self.take(len)
    }

    pub(crate) fn location(&mut self) -> UniformLocation<'a> {
        let at = self.pos;
        let tag = self.take(1)[0];
        match tag {
            LOCATION_TAG_SLOT => UniformLocation::Slot(self.pod::<u32>()),
            LOCATION_TAG_OFFSET => UniformLocation::Offset(self.pod::<u64>()),
            LOCATION_TAG_NAME => {
                let len = self.pod::<u32>() as usize;
                let bytes = self.take(len);
                UniformLocation::Name(std::str::from_utf8(bytes).unwrap_or_else(|_| {
                    panic!("corrupted command stream: non-UTF-8 location name at offset {at}")
                }))
            }
            _ => panic!("corrupted command stream: unknown location tag {tag:#04x} at offset {at}"),
        }
    }

    fn take(&mut self, len: usize) -> &'a [u8] {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .unwrap_or_else(|| {
                panic!("corrupted command stream: truncated at offset {}", self.pos)
            });
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        slice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BlendOperation;

    #[test]
    fn operand_blocks_have_no_padding() {
        // Pod already forbids padding; these sizes pin the layout down so an
        // accidental field change shows up as a test failure, not a silent
        // format change.
        assert_eq!(size_of::<ClearColorCmd>(), 16);
        assert_eq!(size_of::<ClearDepthCmd>(), 4);
        assert_eq!(size_of::<RasterizerStateCmd>(), 20);
        assert_eq!(size_of::<BlendStateCmd>(), 196);
        assert_eq!(size_of::<DepthStencilStateCmd>(), 24);
        assert_eq!(size_of::<BindShaderCmd>(), 4);
        assert_eq!(size_of::<BindVertexBufferCmd>(), 16);
        assert_eq!(size_of::<BindIndexBufferCmd>(), 16);
        assert_eq!(size_of::<DrawCmd>(), 20);
        assert_eq!(size_of::<ExecuteQueueCmd>(), 4);
    }

    #[test]
    fn blend_state_survives_pack_unpack() {
        let mut state = BlendStateDescriptor::alpha_blend();
        state.slots[3].alpha.operation = BlendOperation::Max;
        state.enabled_slots.insert(BlendSlotMask::slot(3));
        assert_eq!(BlendStateCmd::pack(&state).unpack(), state);
    }

    #[test]
    fn reader_walks_mixed_instructions() {
        let mut bytes = Vec::new();
        put_op(
            &mut bytes,
            Opcode::ClearDepth,
            &ClearDepthCmd { depth: 1.0 },
        );
        put_uniform_block(&mut bytes, UniformLocation::Name("u_Color"), &[7, 8, 9]);

        let mut reader = StreamReader::new(&bytes);
        assert_eq!(reader.opcode(), Opcode::ClearDepth);
        assert_eq!(reader.pod::<ClearDepthCmd>().depth, 1.0);
        assert_eq!(reader.opcode(), Opcode::UniformBlock);
        assert_eq!(reader.location(), UniformLocation::Name("u_Color"));
        let len = reader.pod::<u64>() as usize;
        assert_eq!(reader.payload(len), &[7, 8, 9]);
        assert!(reader.is_at_end());
    }

    #[test]
    #[should_panic(expected = "unknown opcode")]
    fn unknown_opcode_is_fatal() {
        let mut reader = StreamReader::new(&[0xEE]);
        reader.opcode();
    }

    #[test]
    #[should_panic(expected = "truncated")]
    fn truncated_operands_are_fatal() {
        let bytes = [Opcode::ClearColor as u8, 0, 0];
        let mut reader = StreamReader::new(&bytes);
        reader.opcode();
        reader.pod::<ClearColorCmd>();
    }
}

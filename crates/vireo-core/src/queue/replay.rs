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

//! Decoding a recorded stream and dispatching it into a device context.

use super::command_queue::RecordedQueue;
use super::encoding::{
    BindIndexBufferCmd, BindShaderCmd, BindVertexBufferCmd, BlendStateCmd, ClearColorCmd,
    ClearDepthCmd, DepthStencilStateCmd, DrawCmd, ExecuteQueueCmd, Opcode, RasterizerStateCmd,
    StreamReader,
};
use crate::color::LinearRgba;
use crate::device::DeviceContext;
use crate::error::BindError;
use crate::resource::ResourceHandle;
use crate::state::{IndexFormat, PrimitiveTopology};

/// Counters accumulated over one [`RecordedQueue::replay`] pass, including
/// all nested queues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayMetrics {
    /// Instructions dispatched, nested queues' instructions included.
    pub commands: u32,
    /// Draw and indexed-draw calls issued.
    pub draw_calls: u32,
    /// `ExecuteQueue` instructions encountered.
    pub nested_queues: u32,
    /// Resource binds and uniform uploads the device rejected.
    pub failed_binds: u32,
}

impl RecordedQueue {
    /// Replays the queue against `device`, dispatching every instruction in
    /// recorded order.
    ///
    /// Replay reads the stream from the start each time and mutates nothing,
    /// so it may be repeated (once per frame, typically), and clones of the
    /// same queue replay identically. Nested queues are decoded in place,
    /// depth-first, before the parent's next instruction.
    ///
    /// Bind failures reported by the device are logged and counted in the
    /// returned [`ReplayMetrics`]; subsequent instructions still execute
    /// against whatever device state is current.
    ///
    /// # Panics
    ///
    /// Panics if the stream references a retention table entry of the wrong
    /// kind. This cannot happen through the recording API and indicates
    /// memory corruption or a defect in this crate.
    pub fn replay(&self, device: &mut dyn DeviceContext) -> ReplayMetrics {
        let mut metrics = ReplayMetrics::default();
        replay_stream(self.stream(), self.retained(), device, &mut metrics);
        metrics
    }
}

fn resolve(retained: &[ResourceHandle], index: u32) -> &ResourceHandle {
    retained.get(index as usize).unwrap_or_else(|| {
        panic!(
            "corrupted command stream: resource index {index} out of range ({} retained)",
            retained.len()
        )
    })
}

fn note_failure(what: &str, result: Result<(), BindError>, metrics: &mut ReplayMetrics) {
    if let Err(err) = result {
        log::warn!("{what} failed during replay: {err}");
        metrics.failed_binds += 1;
    }
}

fn replay_stream(
    stream: &[u8],
    retained: &[ResourceHandle],
    device: &mut dyn DeviceContext,
    metrics: &mut ReplayMetrics,
) {
    let mut reader = StreamReader::new(stream);

    while !reader.is_at_end() {
        let opcode = reader.opcode();
        metrics.commands += 1;

        match opcode {
            Opcode::ClearColor => {
                let cmd: ClearColorCmd = reader.pod();
                device.clear_color(LinearRgba::from_array(cmd.color));
            }
            Opcode::ClearDepth => {
                let cmd: ClearDepthCmd = reader.pod();
                device.clear_depth(cmd.depth);
            }
            Opcode::SetRasterizerState => {
                let cmd: RasterizerStateCmd = reader.pod();
                device.set_rasterizer_state(&cmd.unpack());
            }
            Opcode::SetBlendState => {
                let cmd: BlendStateCmd = reader.pod();
                device.set_blend_state(&cmd.unpack());
            }
            Opcode::SetDepthStencilState => {
                let cmd: DepthStencilStateCmd = reader.pod();
                device.set_depth_stencil_state(&cmd.unpack());
            }
            Opcode::BindShader => {
                let cmd: BindShaderCmd = reader.pod();
                let shader = resolve(retained, cmd.resource)
                    .as_shader()
                    .expect("retained resource is not a shader");
                note_failure("shader bind", device.bind_shader(shader), metrics);
            }
            Opcode::BindVertexBuffer => {
                let cmd: BindVertexBufferCmd = reader.pod();
                let buffer = resolve(retained, cmd.resource)
                    .as_buffer()
                    .expect("retained resource is not a buffer");
                note_failure(
                    "vertex buffer bind",
                    device.bind_vertex_buffer(cmd.slot, buffer, cmd.offset),
                    metrics,
                );
            }
            Opcode::BindIndexBuffer => {
                let cmd: BindIndexBufferCmd = reader.pod();
                let buffer = resolve(retained, cmd.resource)
                    .as_buffer()
                    .expect("retained resource is not a buffer");
                let format = IndexFormat::from_wire(cmd.format)
                    .unwrap_or_else(|| panic!("corrupted command stream: invalid index format"));
                note_failure(
                    "index buffer bind",
                    device.bind_index_buffer(buffer, format, cmd.offset),
                    metrics,
                );
            }
            Opcode::UniformBlock => {
                let location = reader.location();
                let len = reader.pod::<u64>() as usize;
                let data = reader.payload(len);
                note_failure(
                    "uniform upload",
                    device.upload_uniform_block(location, data),
                    metrics,
                );
            }
            Opcode::Draw | Opcode::DrawIndexed => {
                let cmd: DrawCmd = reader.pod();
                let topology = PrimitiveTopology::from_wire(cmd.topology)
                    .unwrap_or_else(|| panic!("corrupted command stream: invalid topology"));
                metrics.draw_calls += 1;
                if opcode == Opcode::Draw {
                    device.draw(
                        topology,
                        cmd.first,
                        cmd.count,
                        cmd.instance_count,
                        cmd.first_instance,
                    );
                } else {
                    device.draw_indexed(
                        topology,
                        cmd.first,
                        cmd.count,
                        cmd.instance_count,
                        cmd.first_instance,
                    );
                }
            }
            Opcode::ExecuteQueue => {
                let cmd: ExecuteQueueCmd = reader.pod();
                let child = resolve(retained, cmd.resource)
                    .as_queue()
                    .expect("retained resource is not a queue");
                metrics.nested_queues += 1;
                replay_stream(child.stream(), child.retained(), device, metrics);
            }
        }
    }
}

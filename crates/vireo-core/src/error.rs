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

//! Error types surfaced by the device collaborator.
//!
//! Programmer misuse (out-of-range retention indices, corrupted command
//! streams) is a logic defect and panics instead of producing one of these
//! values; see the crate-level documentation.

use crate::resource::{BufferId, ShaderModuleId};
use std::fmt;

/// An expected-but-rare failure reported by a [`DeviceContext`] bind call.
///
/// Bind failures do not stop a replay: the dispatcher logs the error, counts
/// it in [`ReplayMetrics`], and keeps executing subsequent instructions
/// against whatever device state is current, mirroring best-effort GPU
/// pipelines where a bad shader simply fails to render rather than halting
/// the frame.
///
/// [`DeviceContext`]: crate::device::DeviceContext
/// [`ReplayMetrics`]: crate::queue::ReplayMetrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The buffer is not (or no longer) known to the device.
    InvalidBuffer(BufferId),
    /// The shader is not (or no longer) known to the device, or failed to
    /// compile when it was created.
    InvalidShader(ShaderModuleId),
    /// The uniform block's target location does not exist in the currently
    /// bound shader.
    UnknownUniform(String),
    /// The device rejected the bind for a backend-specific reason.
    Rejected(String),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::InvalidBuffer(id) => write!(f, "invalid buffer {id:?}"),
            BindError::InvalidShader(id) => write!(f, "invalid shader {id:?}"),
            BindError::UnknownUniform(location) => {
                write!(f, "no uniform block at location {location}")
            }
            BindError::Rejected(reason) => write!(f, "bind rejected by device: {reason}"),
        }
    }
}

impl std::error::Error for BindError {}

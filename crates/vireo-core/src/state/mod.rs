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

//! Value-typed pipeline state.
//!
//! A state descriptor is plain data compared by content. Binding one maps
//! every field it describes onto the device in a single pass; state objects
//! never merge with whatever was bound before.

mod descriptor;
mod enums;
mod flags;

pub use descriptor::{
    BlendComponentDescriptor, BlendSlotDescriptor, BlendStateDescriptor,
    DepthStencilStateDescriptor, RasterizerStateDescriptor, BLEND_SLOT_COUNT,
};
pub use enums::{
    BlendFactor, BlendOperation, CompareFunction, CullMode, FrontFace, IndexFormat, PolygonMode,
    PrimitiveTopology,
};
pub use flags::BlendSlotMask;

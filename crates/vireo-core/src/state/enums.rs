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

//! Closed enumerations shared by the state descriptors and the draw path.
//!
//! Each enum carries a stable `u32` wire discriminant so descriptors can be
//! written into the command stream without relying on Rust's in-memory enum
//! layout. `from_wire` returns `None` for unknown raw values; the decoder
//! treats that as stream corruption.

/// Defines which face of a triangle to cull (not render).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CullMode {
    /// No culling is performed.
    None = 0,
    /// Cull front-facing triangles.
    Front = 1,
    /// Cull back-facing triangles.
    Back = 2,
}

impl CullMode {
    pub(crate) fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(CullMode::None),
            1 => Some(CullMode::Front),
            2 => Some(CullMode::Back),
            _ => None,
        }
    }
}

/// Defines which vertex winding order is considered "front-facing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum FrontFace {
    /// Clockwise winding order is the front face.
    Cw = 0,
    /// Counter-clockwise winding order is the front face.
    Ccw = 1,
}

impl FrontFace {
    pub(crate) fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(FrontFace::Cw),
            1 => Some(FrontFace::Ccw),
            _ => None,
        }
    }
}

/// Defines how polygons are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PolygonMode {
    /// Polygons are filled. This is the normal rendering mode.
    Fill = 0,
    /// Polygons are rendered as outlines (wireframe).
    Line = 1,
    /// Polygon vertices are rendered as points.
    Point = 2,
}

impl PolygonMode {
    pub(crate) fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(PolygonMode::Fill),
            1 => Some(PolygonMode::Line),
            2 => Some(PolygonMode::Point),
            _ => None,
        }
    }
}

/// The comparison function used for depth testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CompareFunction {
    /// The test never passes.
    Never = 0,
    /// The test passes if the new value is less than the existing value.
    Less = 1,
    /// The test passes if the new value is equal to the existing value.
    Equal = 2,
    /// The test passes if the new value is less than or equal to the existing value.
    LessEqual = 3,
    /// The test passes if the new value is greater than the existing value.
    Greater = 4,
    /// The test passes if the new value is not equal to the existing value.
    NotEqual = 5,
    /// The test passes if the new value is greater than or equal to the existing value.
    GreaterEqual = 6,
    /// The test always passes.
    Always = 7,
}

impl CompareFunction {
    pub(crate) fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(CompareFunction::Never),
            1 => Some(CompareFunction::Less),
            2 => Some(CompareFunction::Equal),
            3 => Some(CompareFunction::LessEqual),
            4 => Some(CompareFunction::Greater),
            5 => Some(CompareFunction::NotEqual),
            6 => Some(CompareFunction::GreaterEqual),
            7 => Some(CompareFunction::Always),
            _ => None,
        }
    }
}

/// A multiplier applied to a blend input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BlendFactor {
    /// `0.0`
    Zero = 0,
    /// `1.0`
    One = 1,
    /// The source color.
    SrcColor = 2,
    /// One minus the source color.
    OneMinusSrcColor = 3,
    /// The source alpha.
    SrcAlpha = 4,
    /// One minus the source alpha.
    OneMinusSrcAlpha = 5,
    /// The destination color.
    DstColor = 6,
    /// One minus the destination color.
    OneMinusDstColor = 7,
    /// The destination alpha.
    DstAlpha = 8,
    /// One minus the destination alpha.
    OneMinusDstAlpha = 9,
}

impl BlendFactor {
    pub(crate) fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(BlendFactor::Zero),
            1 => Some(BlendFactor::One),
            2 => Some(BlendFactor::SrcColor),
            3 => Some(BlendFactor::OneMinusSrcColor),
            4 => Some(BlendFactor::SrcAlpha),
            5 => Some(BlendFactor::OneMinusSrcAlpha),
            6 => Some(BlendFactor::DstColor),
            7 => Some(BlendFactor::OneMinusDstColor),
            8 => Some(BlendFactor::DstAlpha),
            9 => Some(BlendFactor::OneMinusDstAlpha),
            _ => None,
        }
    }
}

/// The operation combining the weighted source and destination inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BlendOperation {
    /// `src + dst`
    Add = 0,
    /// `src - dst`
    Subtract = 1,
    /// `dst - src`
    ReverseSubtract = 2,
    /// `min(src, dst)`
    Min = 3,
    /// `max(src, dst)`
    Max = 4,
}

impl BlendOperation {
    pub(crate) fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(BlendOperation::Add),
            1 => Some(BlendOperation::Subtract),
            2 => Some(BlendOperation::ReverseSubtract),
            3 => Some(BlendOperation::Min),
            4 => Some(BlendOperation::Max),
            _ => None,
        }
    }
}

/// Defines how vertices are connected to form a geometric primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PrimitiveTopology {
    /// Vertices are rendered as isolated points.
    PointList = 0,
    /// Every two vertices form an isolated line.
    LineList = 1,
    /// Vertices form a connected line strip.
    LineStrip = 2,
    /// Every three vertices form an isolated triangle.
    TriangleList = 3,
    /// Vertices form a connected triangle strip.
    TriangleStrip = 4,
}

impl PrimitiveTopology {
    pub(crate) fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(PrimitiveTopology::PointList),
            1 => Some(PrimitiveTopology::LineList),
            2 => Some(PrimitiveTopology::LineStrip),
            3 => Some(PrimitiveTopology::TriangleList),
            4 => Some(PrimitiveTopology::TriangleStrip),
            _ => None,
        }
    }
}

/// The element width of an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum IndexFormat {
    /// 16-bit unsigned indices.
    Uint16 = 0,
    /// 32-bit unsigned indices.
    Uint32 = 1,
}

impl IndexFormat {
    pub(crate) fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(IndexFormat::Uint16),
            1 => Some(IndexFormat::Uint32),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_wire_rejects_unknown_discriminants() {
        assert_eq!(CullMode::from_wire(3), None);
        assert_eq!(CompareFunction::from_wire(8), None);
        assert_eq!(BlendFactor::from_wire(10), None);
        assert_eq!(PrimitiveTopology::from_wire(99), None);
    }

    #[test]
    fn wire_discriminants_are_stable() {
        // The stream format depends on these staying put.
        assert_eq!(CompareFunction::Less as u32, 1);
        assert_eq!(BlendFactor::OneMinusSrcAlpha as u32, 5);
        assert_eq!(PrimitiveTopology::TriangleList as u32, 3);
        assert_eq!(IndexFormat::Uint32 as u32, 1);
    }
}

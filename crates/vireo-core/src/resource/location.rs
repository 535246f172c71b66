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

//! Tagged identifiers for uniform and binding targets.

use std::fmt;

/// Identifies a uniform/binding target regardless of how the bound shader
/// exposes it: by numeric binding slot, by byte offset into a block, or by
/// symbolic name.
///
/// The variant is a borrowed view; when a location is recorded into a
/// [`CommandQueue`](crate::queue::CommandQueue), name bytes are copied into
/// the instruction stream, so the caller's string only needs to outlive the
/// recording call itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformLocation<'a> {
    /// A numeric binding slot (e.g. `layout(binding = N)`).
    Slot(u32),
    /// A byte offset into the target block.
    Offset(u64),
    /// A symbolic name looked up against the bound shader's interface.
    Name(&'a str),
}

impl From<u32> for UniformLocation<'_> {
    fn from(slot: u32) -> Self {
        UniformLocation::Slot(slot)
    }
}

impl From<u64> for UniformLocation<'_> {
    fn from(offset: u64) -> Self {
        UniformLocation::Offset(offset)
    }
}

impl<'a> From<&'a str> for UniformLocation<'a> {
    fn from(name: &'a str) -> Self {
        UniformLocation::Name(name)
    }
}

impl fmt::Display for UniformLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniformLocation::Slot(slot) => write!(f, "slot {slot}"),
            UniformLocation::Offset(offset) => write!(f, "offset {offset}"),
            UniformLocation::Name(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_pick_the_matching_variant() {
        assert_eq!(UniformLocation::from(3u32), UniformLocation::Slot(3));
        assert_eq!(UniformLocation::from(64u64), UniformLocation::Offset(64));
        assert_eq!(
            UniformLocation::from("u_Projection"),
            UniformLocation::Name("u_Projection")
        );
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(format!("{}", UniformLocation::Slot(2)), "slot 2");
        assert_eq!(format!("{}", UniformLocation::Name("u_Color")), "u_Color");
    }
}

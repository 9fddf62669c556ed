// Copyright 2025 eraflo
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

//! Provides the integer mathematics primitives used by scenes and colliders.
//!
//! Everything in the engine lives on a pixel grid, so positions and extents are
//! plain `i32` values. This module keeps the small set of types needed for
//! transform composition, overlap tests and camera projection.

// --- Declare Sub-Modules ---

pub mod point;
pub mod rect;

// --- Re-export Principal Types ---

pub use self::point::Point;
pub use self::rect::Rectangle;

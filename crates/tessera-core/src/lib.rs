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

//! # Tessera Core
//!
//! Foundational crate containing value types, event contracts and the
//! transform hierarchy shared by every other crate of the engine.

#![warn(missing_docs)]

pub mod event;
pub mod math;
pub mod object;
pub mod transform;
pub mod utils;

pub use object::ObjectId;
pub use transform::{transform_ref, Node, Transform, TransformRef};
pub use utils::timer::Stopwatch;

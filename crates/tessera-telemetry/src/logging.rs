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

//! Installs the global `env_logger` backend for the `log` facade.

use env_logger::{Builder, Env};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the logger with the [`DEFAULT_FILTER`].
///
/// Returns `false` if a logger was already installed, in which case nothing changes.
pub fn init_logging() -> bool {
    init_logging_with(DEFAULT_FILTER)
}

/// Installs the logger, falling back to `default_filter` when `RUST_LOG` is not set.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_logging_with(default_filter: &str) -> bool {
    let installed = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init()
        .is_ok();

    if installed {
        log::debug!("Logger initialized (default filter: {default_filter})");
    }
    installed
}

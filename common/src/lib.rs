// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2024 Oxide Computer Company

pub mod logging;

pub use logging::LogFormat;

/// Build a logger that drops everything it is handed.  Used by tests and by
/// callers that want the library quiet.
pub fn null_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

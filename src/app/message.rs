// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// The "Click me" button was pressed.
    ButtonClicked,
    /// The shared value editor changed.
    DraftChanged(String),
    /// Write the editor contents into the shared value.
    ApplyDraft,
    /// Periodic tick for notification expiry.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_TOASTS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Optional starting text for the shared value, overriding settings.
    pub initial_value: Option<String>,
}

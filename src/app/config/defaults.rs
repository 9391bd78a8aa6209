// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// How long a toast stays visible (in milliseconds).
pub const DEFAULT_DISPLAY_DURATION_MS: u64 = 3000;

/// Shortest allowed display duration (in milliseconds).
pub const MIN_DISPLAY_DURATION_MS: u64 = 500;

/// Longest allowed display duration (in milliseconds).
pub const MAX_DISPLAY_DURATION_MS: u64 = 60_000;

/// Payload published when the button is clicked.
pub const DEFAULT_CLICK_MESSAGE: &str = "Button clicked!";

// ==========================================================================
// Shared Value Defaults
// ==========================================================================

/// Value the shared store starts with.
pub const DEFAULT_INITIAL_VALUE: &str = "Initial State";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_DISPLAY_DURATION_MS > 0);
    assert!(MIN_DISPLAY_DURATION_MS <= DEFAULT_DISPLAY_DURATION_MS);
    assert!(DEFAULT_DISPLAY_DURATION_MS <= MAX_DISPLAY_DURATION_MS);
};

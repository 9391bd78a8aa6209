// SPDX-License-Identifier: MPL-2.0
//! UI-side building blocks: design tokens, the toast notification system and
//! the shared value store.
pub mod design_tokens;
pub mod notifications;
pub mod shared_value;

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod web;

pub use web::{FakeWeb, FakeWebState, UNKNOWN_MARKER};

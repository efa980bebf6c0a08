// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the patch labeling window.

pub mod canvas;
pub mod label_prompt;
pub mod properties;
pub mod status;

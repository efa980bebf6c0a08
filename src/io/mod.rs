// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images, dataset files and settings.

pub mod media;
pub mod serialization;
pub mod storage;

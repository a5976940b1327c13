// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrency coordination for lifecycle pipelines
//!
//! Every remote mutation acquires a guard scoped to the collection it
//! touches before dispatching any call.

mod registry;

pub use registry::{Domain, LockGuard, LockMode, LockRegistry};

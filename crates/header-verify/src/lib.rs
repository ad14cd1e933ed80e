// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod error;
mod forks;
mod header;

pub use error::HeaderError;
pub use forks::{FieldSet, ForkSchedule, SCHEDULES};
pub use header::{build_and_verify, build_header, RpcHeader};

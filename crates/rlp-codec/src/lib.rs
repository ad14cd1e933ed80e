// Copyright 2025-, Trieste Contributors
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod decode;
mod encode;
mod error;
mod item;

pub use decode::{decode, decode_exact, MAX_LIST_DEPTH};
pub use encode::{encode, encode_bytes, encode_list, encode_uint};
pub use error::RlpError;
pub use item::{uint_bytes, Item};

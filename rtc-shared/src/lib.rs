#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub mod cursor;
pub mod error;

#[cfg(feature = "marshal")]
pub mod marshal;

pub mod util;

//! Tool computations and the standard catalog served by the binary.

pub mod arithmetic;

pub use arithmetic::standard_catalog;

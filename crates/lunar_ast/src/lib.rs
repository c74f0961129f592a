#![doc = include_str!("../README.md")]

pub mod block;
pub mod expr;
pub mod function;
pub mod statements;
pub mod visit;

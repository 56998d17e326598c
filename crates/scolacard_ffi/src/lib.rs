//! FFI surface crate for the scolacard UI shell.

pub mod api;

//! ember-idl-compiler
//!
//! This crate implements:
//!  1) A pull lexer + recursive-descent parser for `.idl` schema files,
//!  2) An append-only type table preloaded with the scalar primitives,
//!  3) C++ code generation (structs, tagged enums, command envelopes),
//!  4) An optional ImGui reflection emission mode for structs,
//!  5) Error types (`IdlError`).

pub mod compiler;
pub mod error;
pub mod generator;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod types;

pub use compiler::compile_schema;
pub use compiler::compile_to_sink;
pub use compiler::table_to_json;
pub use compiler::CompileOptions;
pub use generator::{emit, generate, GeneratorOptions};
pub use parser::parse;

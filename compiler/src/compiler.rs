use std::io::Write;

use crate::{
    error::IdlError,
    generator::{emit, generate, GeneratorOptions},
    parser::parse,
    types::TypeTable,
};

/// Options for one compilation run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Upper bound on the number of type records (primitives included).
    pub type_capacity: usize,
    /// Enables the ImGui reflection side-channel in struct emission.
    pub ui_reflection: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions { type_capacity: 256, ui_reflection: false }
    }
}

/// Compile a textual schema into C++ source.
/// Returns `Err(IdlError)` if parsing or name resolution fails; no partial
/// output is ever produced.
pub fn compile_schema(text: &str, options: &CompileOptions) -> Result<String, IdlError> {
    let table = parse(text, options.type_capacity)?;
    Ok(generate(&table, &generator_options(options)))
}

/// Compile a textual schema and write the artifact to `sink`. The sink is
/// only touched after the whole run has succeeded.
pub fn compile_to_sink<W: Write>(
    text: &str,
    options: &CompileOptions,
    sink: &mut W,
) -> Result<(), IdlError> {
    let table = parse(text, options.type_capacity)?;
    emit(&table, &generator_options(options), sink)
}

/// Pretty-print a parsed type table as JSON.
pub fn table_to_json(table: &TypeTable) -> String {
    serde_json::to_string_pretty(table).unwrap()
}

fn generator_options(options: &CompileOptions) -> GeneratorOptions {
    GeneratorOptions { ui_reflection: options.ui_reflection }
}

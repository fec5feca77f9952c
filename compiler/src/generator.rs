use std::io::Write;

use crate::{
    error::IdlError,
    types::{TypeCategory, TypeRecord, TypeTable},
};

/// Emission options recognized by the generator.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Appends the per-struct ImGui reflection member functions. When this
    /// is off, struct output carries no trace of the reflection code.
    pub ui_reflection: bool,
}

/// C++ spellings of the scalar kinds, index-aligned with
/// [`crate::types::Primitive`].
const PRIMITIVE_CPP: [&str; 11] = [
    "int32_t", "uint32_t", "int16_t", "uint16_t", "int8_t", "uint8_t",
    "int64_t", "uint64_t", "float", "double", "bool",
];

/// ImGui widget data types for the scalar kinds. `bool` has no entry; it
/// renders as a checkbox instead of a scalar input.
const PRIMITIVE_IMGUI: [&str; 10] = [
    "ImGuiDataType_S32", "ImGuiDataType_U32", "ImGuiDataType_S16", "ImGuiDataType_U16",
    "ImGuiDataType_S8", "ImGuiDataType_U8", "ImGuiDataType_S64", "ImGuiDataType_U64",
    "ImGuiDataType_Float", "ImGuiDataType_Double",
];

/// Renders every exportable record of `table` to C++ source text.
///
/// The walk is a single forward pass in declaration order; nested command
/// structs are rendered through their owning command only.
pub fn generate(table: &TypeTable, options: &GeneratorOptions) -> String {
    let mut generator = CodeGenerator {
        table,
        options: options.clone(),
        scratch_0: String::new(),
        scratch_1: String::new(),
        scratch_2: String::new(),
    };
    generator.run()
}

/// Renders `table` and writes the whole artifact to `sink` in one
/// append-only pass. The text is rendered in full before any byte
/// reaches the sink.
pub fn emit<W: Write>(
    table: &TypeTable,
    options: &GeneratorOptions,
    sink: &mut W,
) -> Result<(), IdlError> {
    let text = generate(table, options);
    sink.write_all(text.as_bytes())?;
    Ok(())
}

struct CodeGenerator<'a> {
    table:   &'a TypeTable,
    options: GeneratorOptions,

    // Reusable scratch buffers, cleared before every type is rendered.
    scratch_0: String,
    scratch_1: String,
    scratch_2: String,
}

impl CodeGenerator<'_> {
    fn run(&mut self) -> String {
        let table = self.table;
        let mut output = String::new();
        output.push_str("\n#include <stdint.h>\n\n// This file is autogenerated!\n");

        for (_, record) in table.iter() {
            if !record.exportable {
                continue;
            }

            match record.category {
                TypeCategory::Struct => self.output_struct(&mut output, record),
                TypeCategory::Enum => self.output_enum(&mut output, record),
                TypeCategory::Command => self.output_command(&mut output, record),
                TypeCategory::Primitive => {}
            }
        }

        output
    }

    fn clear_scratch(&mut self) {
        self.scratch_0.clear();
        self.scratch_1.clear();
        self.scratch_2.clear();
    }

    fn output_struct(&mut self, output: &mut String, record: &TypeRecord) {
        self.clear_scratch();
        let table = self.table;

        if self.options.ui_reflection {
            self.scratch_0.push_str("\n\tvoid reflectMembers() {\n");
        }

        output.push_str(&format!("struct {} {{\n\n", record.name));

        for (member_name, member_type) in record.member_names.iter().zip(&record.member_types) {
            let member = table.get(*member_type);

            match member.category {
                TypeCategory::Primitive => {
                    if let Some(primitive) = member.primitive {
                        output.push_str(&format!(
                            "\t{} {};\n",
                            PRIMITIVE_CPP[primitive.index()],
                            member_name
                        ));

                        if self.options.ui_reflection {
                            if let Some(imgui_type) = PRIMITIVE_IMGUI.get(primitive.index()) {
                                self.scratch_0.push_str(&format!(
                                    "\t\tImGui::InputScalar( \"{}\", {}, &{} );\n",
                                    member_name, imgui_type, member_name
                                ));
                            } else {
                                self.scratch_0.push_str(&format!(
                                    "\t\tImGui::Checkbox( \"{}\", &{} );\n",
                                    member_name, member_name
                                ));
                            }
                        }
                    }
                }

                TypeCategory::Struct => {
                    output.push_str(&format!("\t{} {};\n", member.name, member_name));

                    if self.options.ui_reflection {
                        self.scratch_0
                            .push_str(&format!("\t\tImGui::Text(\"{}\");\n", member_name));
                        self.scratch_0
                            .push_str(&format!("\t\t{}.reflectMembers();\n", member_name));
                    }
                }

                TypeCategory::Enum => {
                    output.push_str(&format!("\t{}::Enum {};\n", member.name, member_name));

                    if self.options.ui_reflection {
                        self.scratch_0.push_str(&format!(
                            "\t\tImGui::Combo( \"{}\", (int32_t*)&{}, {}::s_value_names, {}::Count );\n",
                            member_name, member_name, member.name, member.name
                        ));
                    }
                }

                TypeCategory::Command => {}
            }
        }

        if self.options.ui_reflection {
            self.scratch_0.push_str("\t}");
            self.scratch_0.push_str(&format!(
                "\n\n\tvoid reflectUI() {{\n\t\tImGui::Begin(\"{}\");\n\t\treflectMembers();\n\t\tImGui::End();\n\t}}\n",
                record.name
            ));

            output.push_str(&self.scratch_0);
            output.push('\n');
        }

        output.push_str(&format!("\n}}; // struct {}\n\n", record.name));
    }

    /// An enum with no declared values emits nothing at all. Otherwise the
    /// value list, the derived bit-mask list and the index-aligned string
    /// table all end with a synthetic `Count` entry.
    fn output_enum(&mut self, output: &mut String, record: &TypeRecord) {
        if record.member_names.is_empty() {
            return;
        }

        self.clear_scratch();

        for (index, value) in record.member_names.iter().enumerate() {
            if index > 0 {
                self.scratch_0.push_str(", ");
                self.scratch_1.push_str(", ");
                self.scratch_2.push_str(", ");
            }

            self.scratch_0.push_str(value);
            self.scratch_1.push_str(&format!("\"{}\"", value));
            self.scratch_2.push_str(&format!("{}_mask = 1 << {}", value, index));
        }

        self.scratch_0.push_str(", Count");
        self.scratch_1.push_str(", \"Count\"");
        self.scratch_2
            .push_str(&format!(", Count_mask = 1 << {}", record.member_names.len()));

        output.push_str(&format!("namespace {} {{\n", record.name));

        output.push_str("\tenum Enum {\n");
        output.push_str(&format!("\t\t{}\n", self.scratch_0));
        output.push_str("\t};\n");

        output.push_str("\n\tenum Mask {\n");
        output.push_str(&format!("\t\t{}\n", self.scratch_2));
        output.push_str("\t};\n");

        output.push_str("\n\tstatic const char* s_value_names[] = {\n");
        output.push_str(&format!("\t\t{}\n", self.scratch_1));
        output.push_str("\t};\n");

        output.push_str("\n\tstatic const char* ToString( Enum e ) {\n");
        output.push_str("\t\treturn s_value_names[(int)e];\n");
        output.push_str("\t}\n");

        output.push_str(&format!("}} // namespace {}\n\n", record.name));
    }

    /// A command renders as a discriminant enumeration with one tag per
    /// nested struct, followed by the nested structs themselves, each with
    /// a static accessor returning its own tag.
    fn output_command(&mut self, output: &mut String, record: &TypeRecord) {
        if record.member_names.is_empty() {
            return;
        }

        self.clear_scratch();
        let table = self.table;

        for (index, nested_name) in record.member_names.iter().enumerate() {
            if index > 0 {
                self.scratch_0.push_str(", ");
            }
            self.scratch_0.push_str(&format!("Type_{}", nested_name));
        }

        output.push_str(&format!("namespace {} {{\n", record.name));
        output.push_str("\tenum Type {\n");
        output.push_str(&format!("\t\t{}\n", self.scratch_0));
        output.push_str("\t};\n\n");

        for (nested_name, nested_type) in record.member_names.iter().zip(&record.member_types) {
            let nested = table.get(*nested_type);

            output.push_str(&format!("\tstruct {} {{\n\n", nested_name));

            for (member_name, member_type) in nested.member_names.iter().zip(&nested.member_types) {
                let member = table.get(*member_type);

                match member.category {
                    TypeCategory::Primitive => {
                        if let Some(primitive) = member.primitive {
                            output.push_str(&format!(
                                "\t\t{} {};\n",
                                PRIMITIVE_CPP[primitive.index()],
                                member_name
                            ));
                        }
                    }
                    TypeCategory::Struct => {
                        output.push_str(&format!("\t\t{} {};\n", member.name, member_name));
                    }
                    TypeCategory::Enum => {
                        output.push_str(&format!("\t\t{}::Enum {};\n", member.name, member_name));
                    }
                    TypeCategory::Command => {}
                }
            }

            output.push_str(&format!(
                "\n\t\tstatic Type GetType() {{ return Type_{}; }}\n",
                nested_name
            ));
            output.push_str(&format!("\n\t}}; // struct {}\n\n", nested_name));
        }

        output.push_str(&format!("}}; // namespace {}\n\n", record.name));
    }
}

#![cfg(test)]

use ember_idl_compiler::{
    compile_schema, compile_to_sink, parse,
    types::{Primitive, TypeCategory},
    CompileOptions,
};

const FULL_SCHEMA: &str = r#"
// Render settings shared with the editor.
enum RenderPass : uint8 {
    Depth
    Opaque
    Transparent
}

struct Vector3 {
    float x;
    float y;
    float z;
}

struct Transform {
    Vector3 position;
    Vector3 scale;
    RenderPass pass;
    bool visible;
}

command EntityOps {
    Spawn {
        Transform transform;
        int32 parent;
    }

    Despawn {
        int32 id;
    }
}
"#;

#[test]
fn test_parse_full_schema() {
    let table = parse(FULL_SCHEMA, 64).expect("parse failed");

    // 11 primitives + enum + 2 structs + command + 2 nested structs.
    assert_eq!(table.len(), 17);

    let pass = table.get(table.lookup("RenderPass").expect("RenderPass"));
    assert_eq!(pass.category, TypeCategory::Enum);
    assert_eq!(pass.member_names, vec!["Depth", "Opaque", "Transparent"]);

    let vector = table.get(table.lookup("Vector3").expect("Vector3"));
    assert_eq!(vector.category, TypeCategory::Struct);
    assert_eq!(vector.member_names, vec!["x", "y", "z"]);
    for id in &vector.member_types {
        assert_eq!(table.get(*id).primitive, Some(Primitive::Float));
    }

    let transform = table.get(table.lookup("Transform").expect("Transform"));
    assert_eq!(transform.member_names, vec!["position", "scale", "pass", "visible"]);
    assert_eq!(transform.member_types[0], table.lookup("Vector3").expect("Vector3"));
    assert_eq!(transform.member_types[2], table.lookup("RenderPass").expect("RenderPass"));

    let ops = table.get(table.lookup("EntityOps").expect("EntityOps"));
    assert_eq!(ops.category, TypeCategory::Command);
    assert_eq!(ops.member_names, vec!["Spawn", "Despawn"]);
    for id in &ops.member_types {
        let nested = table.get(*id);
        assert_eq!(nested.category, TypeCategory::Struct);
        assert!(!nested.exportable);
    }
}

#[test]
fn test_compile_full_schema() {
    let code = compile_schema(FULL_SCHEMA, &CompileOptions::default()).expect("compile failed");

    assert!(code.starts_with("\n#include <stdint.h>\n\n// This file is autogenerated!\n"));

    // Enum: value list, masks and string table, all Count-terminated.
    assert!(code.contains("namespace RenderPass {\n"));
    assert!(code.contains("\t\tDepth, Opaque, Transparent, Count\n"));
    assert!(code.contains(
        "\t\tDepth_mask = 1 << 0, Opaque_mask = 1 << 1, \
         Transparent_mask = 1 << 2, Count_mask = 1 << 3\n"
    ));
    assert!(code.contains("\t\t\"Depth\", \"Opaque\", \"Transparent\", \"Count\"\n"));

    // Structs: fields in declaration order, member categories spelled out.
    assert!(code.contains("struct Vector3 {\n\n\tfloat x;\n\tfloat y;\n\tfloat z;\n"));
    assert!(code.contains("\tVector3 position;\n\tVector3 scale;\n\tRenderPass::Enum pass;\n\tbool visible;\n"));

    // Command: discriminant tags in declared order, one accessor each.
    assert!(code.contains("namespace EntityOps {\n"));
    assert!(code.contains("\tenum Type {\n\t\tType_Spawn, Type_Despawn\n\t};\n"));
    assert!(code.contains("\t\tTransform transform;\n\t\tint32_t parent;\n"));
    assert!(code.contains("\t\tstatic Type GetType() { return Type_Spawn; }\n"));
    assert!(code.contains("\t\tstatic Type GetType() { return Type_Despawn; }\n"));
}

#[test]
fn test_every_primitive_round_trip() {
    let input = "
        struct Everything {
            int32 a;
            uint32 b;
            int16 c;
            uint16 d;
            int8 e;
            uint8 f;
            int64 g;
            uint64 h;
            float i;
            double j;
            bool k;
        }
    ";
    let code = compile_schema(input, &CompileOptions::default()).expect("compile failed");

    for line in [
        "\tint32_t a;\n",
        "\tuint32_t b;\n",
        "\tint16_t c;\n",
        "\tuint16_t d;\n",
        "\tint8_t e;\n",
        "\tuint8_t f;\n",
        "\tint64_t g;\n",
        "\tuint64_t h;\n",
        "\tfloat i;\n",
        "\tdouble j;\n",
        "\tbool k;\n",
    ] {
        assert!(code.contains(line), "missing field line {:?}", line);
    }
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let options = CompileOptions { type_capacity: 64, ui_reflection: true };
    let first = compile_schema(FULL_SCHEMA, &options).expect("compile failed");
    let second = compile_schema(FULL_SCHEMA, &options).expect("compile failed");
    assert_eq!(first, second);
}

#[test]
fn test_ui_reflection_toggle() {
    let plain = compile_schema(FULL_SCHEMA, &CompileOptions::default()).expect("compile failed");
    assert!(!plain.contains("ImGui"));
    assert!(!plain.contains("reflectMembers"));

    let options = CompileOptions { ui_reflection: true, ..CompileOptions::default() };
    let reflected = compile_schema(FULL_SCHEMA, &options).expect("compile failed");
    assert!(reflected.contains("\t\tImGui::Checkbox( \"visible\", &visible );\n"));
    assert!(reflected.contains(
        "\t\tImGui::Combo( \"pass\", (int32_t*)&pass, RenderPass::s_value_names, RenderPass::Count );\n"
    ));
    assert!(reflected.contains("\t\tImGui::Text(\"position\");\n\t\tposition.reflectMembers();\n"));

    // Command structs never carry reflection code.
    let spawn_at = reflected.find("\tstruct Spawn {").expect("Spawn struct");
    assert!(!reflected[spawn_at..].contains("reflectMembers"));
}

#[test]
fn test_failed_run_writes_nothing() {
    let mut sink = Vec::new();
    let err = compile_to_sink(
        "struct Broken { Missing field; }",
        &CompileOptions::default(),
        &mut sink,
    )
    .expect_err("unresolved type");

    assert!(matches!(
        err,
        ember_idl_compiler::error::IdlError::UnresolvedType { .. }
    ));
    assert!(sink.is_empty());
}

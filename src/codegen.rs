//! Emission: descriptors → C++ declarations and definitions.
//!
//! Output depends only on the descriptor order and the config, so the same
//! registry always regenerates byte-identical files.
use crate::config::GeneratorConfig;
use crate::ir::{ArgumentDesc, AttributeDesc, Descriptor, TensorCount};
use crate::naming::escape_string_literal;

const INDENT: &str = "    ";

/// The two generated texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    pub declarations: String,
    pub definitions: String,
}

/// Accumulates per-operator text; framing is added by [`Codegen::into_sources`].
pub struct Codegen<'a> {
    config: &'a GeneratorConfig,
    declarations: String,
    definitions: String,
    emitted: usize,
}

impl<'a> Codegen<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            declarations: String::new(),
            definitions: String::new(),
            emitted: 0,
        }
    }

    pub fn emit(&mut self, descriptors: &[Descriptor]) {
        for desc in descriptors {
            self.declarations.push_str(&struct_declaration(desc));
            self.declarations.push('\n');
            self.definitions.push_str(&struct_definitions(desc));
            self.definitions.push('\n');
            self.emitted += 1;
        }
    }

    pub fn into_sources(self) -> GeneratedSources {
        tracing::debug!(structs = self.emitted, "emitted operator descriptors");

        let mut declarations = banner(self.config);
        declarations.push_str("#pragma once\n\n");
        declarations.push_str(&open_namespaces(&self.config.namespaces));
        declarations.push_str(&self.declarations);
        declarations.push_str(&close_namespaces(&self.config.namespaces));

        let mut definitions = banner(self.config);
        definitions.push_str(&format!(
            "#include \"{}\"\n\n",
            escape_string_literal(&self.config.aggregate_include)
        ));
        definitions.push_str(&open_namespaces(&self.config.namespaces));
        definitions.push_str(&self.definitions);
        definitions.push_str(&close_namespaces(&self.config.namespaces));

        GeneratedSources { declarations, definitions }
    }
}

/// Render a whole run in one go.
pub fn emit(descriptors: &[Descriptor], config: &GeneratorConfig) -> GeneratedSources {
    let mut cg = Codegen::new(config);
    cg.emit(descriptors);
    cg.into_sources()
}

// ————————————————————————————————————————————————————————————————————————————
// FRAMING
// ————————————————————————————————————————————————————————————————————————————

fn banner(config: &GeneratorConfig) -> String {
    format!(
        r#"/* Copyright (c) {holder}.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
==============================================================================*/

// clang-format off

// This file is generated. Do not edit it directly. See {generator}.
"#,
        holder = config.copyright_holder,
        generator = config.generator_name,
    )
}

fn open_namespaces(namespaces: &[String]) -> String {
    namespaces.iter().map(|ns| format!("namespace {ns}\n{{\n")).collect()
}

// innermost first
fn close_namespaces(namespaces: &[String]) -> String {
    namespaces.iter().rev().map(|ns| format!("}} // namespace {ns}\n")).collect()
}

// ————————————————————————————————————————————————————————————————————————————
// PER OPERATOR
// ————————————————————————————————————————————————————————————————————————————

fn struct_declaration(desc: &Descriptor) -> String {
    let mut out = String::new();
    out.push_str(&format!("struct {}\n{{\n", desc.struct_name));
    out.push_str(&format!(
        "{INDENT}static constexpr const char* name = \"{}\";\n\n",
        escape_string_literal(&desc.op_name)
    ));

    out.push_str(&format!("{INDENT}enum class Argument\n"));
    out.push_str(&braced_list(desc.arguments.iter().map(|a| a.ident.clone())));
    out.push('\n');

    out.push_str(&format!("{INDENT}static constexpr uint32_t input_arg_count = {};\n", desc.input_arg_count));
    out.push_str(&format!("{INDENT}static constexpr uint32_t output_arg_count = {};\n", desc.output_arg_count));
    out.push_str(&format!(
        "{INDENT}static constexpr std::array<ArgumentDesc, input_arg_count + output_arg_count> argument_descs\n"
    ));
    out.push_str(&braced_list(desc.arguments.iter().map(argument_desc)));
    out.push('\n');

    out.push_str(&format!("{INDENT}enum class Attribute\n"));
    out.push_str(&braced_list(desc.attributes.iter().map(|a| a.ident.clone())));
    out.push('\n');

    out.push_str(&format!(
        "{INDENT}static constexpr std::array<AttributeDesc, {}> attribute_descs\n",
        desc.attributes.len()
    ));
    out.push_str(&braced_list(desc.attributes.iter().map(attribute_desc)));
    out.push_str("};\n");
    out
}

fn struct_definitions(desc: &Descriptor) -> String {
    let s = &desc.struct_name;
    format!(
        "constexpr std::array<ArgumentDesc, {s}::input_arg_count + {s}::output_arg_count> {s}::argument_descs;\n\
         constexpr std::array<AttributeDesc, {n}> {s}::attribute_descs;\n",
        n = desc.attributes.len(),
    )
}

/// `{ a, b }` block at member depth, entries one per line.
fn braced_list(items: impl Iterator<Item = String>) -> String {
    let body = items
        .map(|item| format!("{INDENT}{INDENT}{item}"))
        .collect::<Vec<_>>()
        .join(",\n");
    if body.is_empty() {
        format!("{INDENT}{{\n{INDENT}}};\n")
    } else {
        format!("{INDENT}{{\n{body}\n{INDENT}}};\n")
    }
}

fn argument_desc(arg: &ArgumentDesc) -> String {
    let name = escape_string_literal(&arg.name);
    let tag = arg.count.tag();
    match &arg.count {
        TensorCount::Single => format!("ArgumentDesc{{\"{name}\", ArgumentDesc::TensorCount::{tag}}}"),
        TensorCount::SequenceAttrInt { attr } | TensorCount::SequenceAttrList { attr } => format!(
            "ArgumentDesc{{\"{name}\", ArgumentDesc::TensorCount::{tag}, \"{}\"}}",
            escape_string_literal(attr)
        ),
    }
}

fn attribute_desc(attr: &AttributeDesc) -> String {
    format!(
        "AttributeDesc{{\"{}\", AttributeType::{}}}",
        escape_string_literal(&attr.name),
        attr.ty.tag()
    )
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lower::synthesize_all;
    use crate::schema::{ArgumentRecord as Arg, OperatorSchema};

    fn registry() -> Vec<OperatorSchema> {
        vec![
            OperatorSchema::new("AddN")
                .with_input(Arg::counted_by("inputs", "N"))
                .with_output(Arg::single("sum"))
                .with_attr("N", "int")
                .with_attr("T", "type"),
            OperatorSchema::new("Namespace>TestStringOutput")
                .with_input(Arg::single("input"))
                .with_output(Arg::single("output1"))
                .with_output(Arg::single("output2"))
                .with_attr("template", "string"),
            OperatorSchema::new("NoOp"),
        ]
    }

    fn generate() -> GeneratedSources {
        let descs = synthesize_all(&registry()).unwrap();
        emit(&descs, &GeneratorConfig::default())
    }

    #[test]
    fn struct_layout_matches_consumer_expectations() {
        let config = GeneratorConfig::default();
        let descs = synthesize_all(&registry()[..1]).unwrap();
        let out = emit(&descs, &config);
        let expected = r#"struct AddN
{
    static constexpr const char* name = "AddN";

    enum class Argument
    {
        inputs,
        sum
    };

    static constexpr uint32_t input_arg_count = 1;
    static constexpr uint32_t output_arg_count = 1;
    static constexpr std::array<ArgumentDesc, input_arg_count + output_arg_count> argument_descs
    {
        ArgumentDesc{"inputs", ArgumentDesc::TensorCount::SequenceAttrInt, "N"},
        ArgumentDesc{"sum", ArgumentDesc::TensorCount::Single}
    };

    enum class Attribute
    {
        N,
        T
    };

    static constexpr std::array<AttributeDesc, 2> attribute_descs
    {
        AttributeDesc{"N", AttributeType::Int},
        AttributeDesc{"T", AttributeType::Type}
    };
};

} // namespace ops
} // namespace tfdml
"#;
        assert!(out.declarations.ends_with(expected), "{}", out.declarations);
        assert!(out.declarations.contains("#pragma once\n\nnamespace tfdml\n{\nnamespace ops\n{\nstruct AddN\n"));
    }

    #[test]
    fn definitions_name_every_struct() {
        let out = generate();
        let expected = "namespace tfdml\n{\nnamespace ops\n{\n\
constexpr std::array<ArgumentDesc, AddN::input_arg_count + AddN::output_arg_count> AddN::argument_descs;\n\
constexpr std::array<AttributeDesc, 2> AddN::attribute_descs;\n\
\n\
constexpr std::array<ArgumentDesc, Namespace_TestStringOutput::input_arg_count + Namespace_TestStringOutput::output_arg_count> Namespace_TestStringOutput::argument_descs;\n\
constexpr std::array<AttributeDesc, 1> Namespace_TestStringOutput::attribute_descs;\n\
\n\
constexpr std::array<ArgumentDesc, NoOp::input_arg_count + NoOp::output_arg_count> NoOp::argument_descs;\n\
constexpr std::array<AttributeDesc, 0> NoOp::attribute_descs;\n\
\n\
} // namespace ops\n\
} // namespace tfdml\n";
        assert!(out.definitions.ends_with(expected), "{}", out.definitions);
        assert!(out.definitions.contains("#include \"tfdml/runtime_adapter/op_defs.h\"\n"));
    }

    #[test]
    fn banner_and_warning_lead_both_files() {
        let out = generate();
        for text in [&out.declarations, &out.definitions] {
            assert!(text.starts_with("/* Copyright (c) Microsoft Corporation.\n"));
            assert!(text.contains("// clang-format off\n"));
            assert!(text.contains("// This file is generated. Do not edit it directly. See op-defs-gen.\n"));
        }
    }

    #[test]
    fn sanitized_struct_keeps_original_name_literal() {
        let out = generate();
        assert!(out.declarations.contains("struct Namespace_TestStringOutput\n{\n"));
        assert!(out.declarations.contains(r#"static constexpr const char* name = "Namespace>TestStringOutput";"#));
        assert!(!out.declarations.contains("struct Namespace>"));
    }

    #[test]
    fn reserved_attribute_enumerator_is_suffixed() {
        let out = generate();
        assert!(out.declarations.contains("    enum class Attribute\n    {\n        template_\n    };\n"));
        assert!(out.declarations.contains(r#"AttributeDesc{"template", AttributeType::String}"#));
    }

    #[test]
    fn empty_operator_renders_empty_blocks() {
        let out = generate();
        let expected = "struct NoOp\n{\n    static constexpr const char* name = \"NoOp\";\n\n    enum class Argument\n    {\n    };\n\n";
        assert!(out.declarations.contains(expected), "{}", out.declarations);
        assert!(out.declarations.contains("std::array<AttributeDesc, 0> attribute_descs\n    {\n    };\n};\n"));
    }

    #[test]
    fn emission_is_deterministic() {
        assert_eq!(generate(), generate());
    }

    #[test]
    fn custom_namespaces_open_and_close_in_order() {
        let config = GeneratorConfig {
            namespaces: vec!["a".into(), "b".into(), "c".into()],
            ..GeneratorConfig::default()
        };
        let out = emit(&[], &config);
        assert!(out.declarations.ends_with("namespace a\n{\nnamespace b\n{\nnamespace c\n{\n} // namespace c\n} // namespace b\n} // namespace a\n"));
    }
}

//! Native binary `OpList` payloads.
use protobuf::Message;

use crate::error::LoaderError;
use crate::schema::{ArgumentRecord, AttributeRecord, OperatorSchema};

pub use super::protos::registry::op_def::{ArgDef, AttrDef};
pub use super::protos::registry::{OpDef, OpList};

pub fn decode_op_list(source_name: &str, bytes: &[u8]) -> Result<Vec<OperatorSchema>, LoaderError> {
    let list = OpList::parse_from_bytes(bytes).map_err(|source| LoaderError::MalformedProto {
        source_name: source_name.to_string(),
        source,
    })?;
    Ok(list.op.into_iter().map(convert_op_def).collect())
}

fn convert_op_def(op: OpDef) -> OperatorSchema {
    OperatorSchema {
        name: op.name,
        input_arg: op.input_arg.into_iter().map(convert_arg_def).collect(),
        output_arg: op.output_arg.into_iter().map(convert_arg_def).collect(),
        attr: op.attr.into_iter().map(convert_attr_def).collect(),
    }
}

fn convert_arg_def(arg: ArgDef) -> ArgumentRecord {
    ArgumentRecord {
        name: arg.name,
        description: arg.description,
        type_attr: arg.type_attr,
        number_attr: arg.number_attr,
        type_list_attr: arg.type_list_attr,
    }
}

fn convert_attr_def(attr: AttrDef) -> AttributeRecord {
    AttributeRecord {
        name: attr.name,
        ty: attr.type_,
        description: attr.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(name: &str, number_attr: &str, type_list_attr: &str) -> ArgDef {
        let mut a = ArgDef::new();
        a.name = name.to_string();
        a.number_attr = number_attr.to_string();
        a.type_list_attr = type_list_attr.to_string();
        a
    }

    fn attr(name: &str, ty: &str) -> AttrDef {
        let mut a = AttrDef::new();
        a.name = name.to_string();
        a.type_ = ty.to_string();
        a
    }

    #[test]
    fn binary_op_list_round_trips_into_schemas() {
        let mut add_n = OpDef::new();
        add_n.name = "AddN".to_string();
        add_n.input_arg.push(arg("inputs", "N", ""));
        add_n.output_arg.push(arg("sum", "", ""));
        add_n.attr.push(attr("N", "int"));
        add_n.attr.push(attr("T", "type"));

        let mut identity_n = OpDef::new();
        identity_n.name = "IdentityN".to_string();
        identity_n.input_arg.push(arg("input", "", "T"));
        identity_n.attr.push(attr("T", "list(type)"));

        let mut list = OpList::new();
        list.op.push(add_n);
        list.op.push(identity_n);
        let bytes = list.write_to_bytes().unwrap();

        let ops = decode_op_list("inline", &bytes).unwrap();
        let expected = vec![
            OperatorSchema::new("AddN")
                .with_input(ArgumentRecord::counted_by("inputs", "N"))
                .with_output(ArgumentRecord::single("sum"))
                .with_attr("N", "int")
                .with_attr("T", "type"),
            OperatorSchema::new("IdentityN")
                .with_input(ArgumentRecord::typed_by_list("input", "T"))
                .with_attr("T", "list(type)"),
        ];
        assert_eq!(ops, expected);
    }

    #[test]
    fn json_and_binary_payloads_agree() {
        let mut op = OpDef::new();
        op.name = "Namespace>TestStringOutput".to_string();
        op.input_arg.push(arg("input", "", ""));
        op.attr.push(attr("template", "string"));
        let mut list = OpList::new();
        list.op.push(op);
        let from_proto = decode_op_list("proto", &list.write_to_bytes().unwrap()).unwrap();

        let json = br#"{"op": [{"name": "Namespace>TestStringOutput",
            "inputArg": [{"name": "input"}],
            "attr": [{"name": "template", "type": "string"}]}]}"#;
        let from_json = super::super::json::decode_op_list("json", json).unwrap();
        assert_eq!(from_proto, from_json);
    }

    #[test]
    fn upstream_fields_outside_the_subset_are_skipped() {
        // OpDef { name: "Foo" (1), summary: "s" (5), is_stateful: true (17) }
        let op_def: &[u8] = &[0x0a, 0x03, b'F', b'o', b'o', 0x2a, 0x01, b's', 0x88, 0x01, 0x01];
        let mut bytes = vec![0x0a, op_def.len() as u8];
        bytes.extend_from_slice(op_def);

        let ops = decode_op_list("upstream.pb", &bytes).unwrap();
        assert_eq!(ops, vec![OperatorSchema::new("Foo")]);
    }

    #[test]
    fn garbage_is_a_loader_error() {
        let err = decode_op_list("ops.pb", &[0xff, 0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, LoaderError::MalformedProto { .. }));
        assert!(err.to_string().contains("ops.pb"));
    }
}

//! Synthesis: registry records → validated descriptors.
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::SynthesisError;
use crate::ir::{ArgumentDesc, AttributeDesc, AttributeType, Descriptor, TensorCount};
use crate::naming::cpp_identifier;
use crate::schema::{ArgumentRecord, OperatorSchema};

/// Lower one schema. Pure; validates everything the emitter takes for granted.
pub fn synthesize(schema: &OperatorSchema) -> Result<Descriptor, SynthesisError> {
    let op = schema.name.as_str();

    // 1) Arguments: inputs first, then outputs, each in registry order
    let arguments = schema
        .input_arg
        .iter()
        .chain(schema.output_arg.iter())
        .map(|arg| lower_argument(schema, arg))
        .collect::<Result<Vec<_>, _>>()?;

    // 2) Attributes
    let attributes = schema
        .attr
        .iter()
        .map(|attr| -> Result<AttributeDesc, SynthesisError> {
            let ty = AttributeType::from_registry(&attr.ty).ok_or_else(|| {
                SynthesisError::UnknownAttributeType {
                    op: op.to_string(),
                    attr: attr.name.clone(),
                    ty: attr.ty.clone(),
                }
            })?;
            Ok(AttributeDesc {
                name: attr.name.clone(),
                ident: cpp_identifier(&attr.name),
                ty,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // 3) Enumerators share a namespace per enum; sanitizing may merge names
    check_unique_enumerators(op, arguments.iter().map(|a| (a.ident.as_str(), a.name.as_str())))?;
    check_unique_enumerators(op, attributes.iter().map(|a| (a.ident.as_str(), a.name.as_str())))?;

    Ok(Descriptor {
        op_name: schema.name.clone(),
        struct_name: cpp_identifier(&schema.name),
        arguments,
        attributes,
        input_arg_count: schema.input_arg.len() as u32,
        output_arg_count: schema.output_arg.len() as u32,
    })
}

/// Lower a whole registry, keeping its order. Fails on the first invalid
/// schema or on two operators sharing a struct name.
pub fn synthesize_all<'a, I>(schemas: I) -> Result<Vec<Descriptor>, SynthesisError>
where
    I: IntoIterator<Item = &'a OperatorSchema>,
{
    let mut seen: IndexMap<String, String> = IndexMap::new();
    let mut out = Vec::new();
    for schema in schemas {
        let desc = synthesize(schema)?;
        match seen.entry(desc.struct_name.clone()) {
            Entry::Occupied(first) => {
                return Err(SynthesisError::StructNameCollision {
                    struct_name: desc.struct_name,
                    first: first.get().clone(),
                    second: desc.op_name,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(desc.op_name.clone());
            }
        }
        out.push(desc);
    }
    tracing::debug!(count = out.len(), "synthesized descriptors");
    Ok(out)
}

fn lower_argument(schema: &OperatorSchema, arg: &ArgumentRecord) -> Result<ArgumentDesc, SynthesisError> {
    let count = match (arg.number_attr.is_empty(), arg.type_list_attr.is_empty()) {
        (true, true) => TensorCount::Single,
        (false, true) => TensorCount::SequenceAttrInt { attr: arg.number_attr.clone() },
        (true, false) => TensorCount::SequenceAttrList { attr: arg.type_list_attr.clone() },
        (false, false) => {
            return Err(SynthesisError::ConflictingCardinality {
                op: schema.name.clone(),
                arg: arg.name.clone(),
            });
        }
    };
    if let Some(attr) = count.attr() {
        if !schema.has_attr(attr) {
            return Err(SynthesisError::UnknownCountAttribute {
                op: schema.name.clone(),
                arg: arg.name.clone(),
                attr: attr.to_string(),
            });
        }
    }
    Ok(ArgumentDesc {
        name: arg.name.clone(),
        ident: cpp_identifier(&arg.name),
        count,
    })
}

fn check_unique_enumerators<'a>(
    op: &str,
    entries: impl Iterator<Item = (&'a str, &'a str)>,
) -> Result<(), SynthesisError> {
    let mut seen: IndexMap<&str, &str> = IndexMap::new();
    for (ident, name) in entries {
        if let Some(first) = seen.insert(ident, name) {
            return Err(SynthesisError::EnumeratorCollision {
                op: op.to_string(),
                ident: ident.to_string(),
                first: first.to_string(),
                second: name.to_string(),
            });
        }
    }
    Ok(())
}

// ------------------------------- Tests ------------------------------------ //

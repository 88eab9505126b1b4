// Operator schema records as handed over by the registry. No codegen
// decisions here; see `ir` for the synthesized form.
use serde::Deserialize;

/// One registry entry: an operator's name, its arguments and its attributes.
///
/// Deserializes from the protobuf JSON mapping of `OpDef` (camelCase keys),
/// snake_case spellings are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorSchema {
    pub name: String,
    #[serde(default, alias = "input_arg")]
    pub input_arg: Vec<ArgumentRecord>,
    #[serde(default, alias = "output_arg")]
    pub output_arg: Vec<ArgumentRecord>,
    #[serde(default)]
    pub attr: Vec<AttributeRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "type_attr")]
    pub type_attr: String,
    /// Name of an `int` attribute holding the number of tensors, or empty.
    #[serde(default, alias = "number_attr")]
    pub number_attr: String,
    /// Name of a `list(type)` attribute holding one dtype per tensor, or empty.
    #[serde(default, alias = "type_list_attr")]
    pub type_list_attr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AttributeRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub description: String,
}

/// Top-level registry payload (`OpList`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperatorList {
    #[serde(default)]
    pub op: Vec<OperatorSchema>,
}

impl OperatorSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_input(mut self, arg: ArgumentRecord) -> Self {
        self.input_arg.push(arg);
        self
    }

    pub fn with_output(mut self, arg: ArgumentRecord) -> Self {
        self.output_arg.push(arg);
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.attr.push(AttributeRecord { name: name.into(), ty: ty.into(), description: String::new() });
        self
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr.iter().any(|a| a.name == name)
    }
}

impl ArgumentRecord {
    pub fn single(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn counted_by(name: impl Into<String>, number_attr: impl Into<String>) -> Self {
        Self { name: name.into(), number_attr: number_attr.into(), ..Self::default() }
    }

    pub fn typed_by_list(name: impl Into<String>, type_list_attr: impl Into<String>) -> Self {
        Self { name: name.into(), type_list_attr: type_list_attr.into(), ..Self::default() }
    }
}

// ------------------------------- Tests ------------------------------------ //

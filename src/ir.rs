// Strongly-typed descriptor model for codegen. No registry records here.

/// One operator, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub op_name: String,      // original registry name, emitted verbatim
    pub struct_name: String,  // sanitized, unique per run
    pub arguments: Vec<ArgumentDesc>, // inputs then outputs
    pub attributes: Vec<AttributeDesc>,
    pub input_arg_count: u32,
    pub output_arg_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDesc {
    pub name: String,  // string literal
    pub ident: String, // enumerator
    pub count: TensorCount,
}

/// How many tensors an argument binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TensorCount {
    Single,
    /// Length given by an `int` attribute.
    SequenceAttrInt { attr: String },
    /// Length given by the size of a `list(type)` attribute.
    SequenceAttrList { attr: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDesc {
    pub name: String,  // string literal
    pub ident: String, // enumerator, reserved words suffixed
    pub ty: AttributeType,
}

/// Closed attribute-type vocabulary of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    String,
    Int,
    Float,
    Bool,
    Type,
    Shape,
    Tensor,
    Func,
    ListString,
    ListInt,
    ListFloat,
    ListBool,
    ListType,
    ListShape,
    ListTensor,
    ListFunc,
}

/// (registry spelling, type) for every supported attribute type.
const ATTRIBUTE_TYPES: [(&str, AttributeType); 16] = [
    ("string", AttributeType::String),
    ("int", AttributeType::Int),
    ("float", AttributeType::Float),
    ("bool", AttributeType::Bool),
    ("type", AttributeType::Type),
    ("shape", AttributeType::Shape),
    ("tensor", AttributeType::Tensor),
    ("func", AttributeType::Func),
    ("list(string)", AttributeType::ListString),
    ("list(int)", AttributeType::ListInt),
    ("list(float)", AttributeType::ListFloat),
    ("list(bool)", AttributeType::ListBool),
    ("list(type)", AttributeType::ListType),
    ("list(shape)", AttributeType::ListShape),
    ("list(tensor)", AttributeType::ListTensor),
    ("list(func)", AttributeType::ListFunc),
];

impl AttributeType {
    /// Look up a registry type string, e.g. `list(int)`.
    pub fn from_registry(ty: &str) -> Option<Self> {
        ATTRIBUTE_TYPES
            .iter()
            .find(|(spelling, _)| *spelling == ty)
            .map(|(_, t)| *t)
    }

    /// Enumerator name in the consumer's `AttributeType` enum.
    pub fn tag(self) -> &'static str {
        match self {
            AttributeType::String => "String",
            AttributeType::Int => "Int",
            AttributeType::Float => "Float",
            AttributeType::Bool => "Bool",
            AttributeType::Type => "Type",
            AttributeType::Shape => "Shape",
            AttributeType::Tensor => "Tensor",
            AttributeType::Func => "Func",
            AttributeType::ListString => "ListString",
            AttributeType::ListInt => "ListInt",
            AttributeType::ListFloat => "ListFloat",
            AttributeType::ListBool => "ListBool",
            AttributeType::ListType => "ListType",
            AttributeType::ListShape => "ListShape",
            AttributeType::ListTensor => "ListTensor",
            AttributeType::ListFunc => "ListFunc",
        }
    }
}

impl TensorCount {
    pub fn tag(&self) -> &'static str {
        match self {
            TensorCount::Single => "Single",
            TensorCount::SequenceAttrInt { .. } => "SequenceAttrInt",
            TensorCount::SequenceAttrList { .. } => "SequenceAttrList",
        }
    }

    /// Attribute holding the length, if any.
    pub fn attr(&self) -> Option<&str> {
        match self {
            TensorCount::Single => None,
            TensorCount::SequenceAttrInt { attr } | TensorCount::SequenceAttrList { attr } => Some(attr),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

//! Protobuf-JSON mapping of `OpList`, e.g. a registry dump made with
//! `MessageToJson`.
use crate::error::LoaderError;
use crate::schema::{OperatorList, OperatorSchema};

pub fn decode_op_list(source_name: &str, bytes: &[u8]) -> Result<Vec<OperatorSchema>, LoaderError> {
    let list: OperatorList = crate::path_de::from_slice_with_path(bytes).map_err(|message| {
        LoaderError::MalformedJson { source_name: source_name.to_string(), message }
    })?;
    Ok(list.op)
}

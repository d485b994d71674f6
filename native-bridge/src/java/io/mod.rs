use std::fs::File;
use std::sync::Arc;

use parking_lot::Mutex;

use bridge_object::object::{FieldValue, ObjectRef};
use bridge_object::strings::{bytes_of_string, string_of_byte_field};
use bridge_object::type_kind::TypeKind;

use crate::envelope::Envelope;
use crate::registry::MethodSignatures;

pub mod file;
pub mod random_access_file;

/// Absolute path, as raw bytes.
pub const FILE_PATH: &str = "FilePath";
pub const FILE_HANDLE: &str = "FileHandle";
/// 0 until the constructor has checked the path, then 1.
pub const FILE_STATUS: &str = "status";

pub fn load(signatures: &mut MethodSignatures) {
    file::load(signatures);
    random_access_file::load(signatures);
}

pub(crate) fn set_file_path(obj: &ObjectRef, path: &str) {
    obj.set(FILE_PATH, TypeKind::ByteArray, FieldValue::Bytes(bytes_of_string(path)));
}

pub(crate) fn file_path_of(obj: &ObjectRef) -> Result<String, Envelope> {
    string_of_byte_field(obj, FILE_PATH).ok_or_else(|| Envelope::io(format!("{} object lacks a {} field", obj.class_name(), FILE_PATH)))
}

pub(crate) fn set_file_handle(obj: &ObjectRef, file: File) {
    obj.set(FILE_HANDLE, TypeKind::FileHandle, FieldValue::FileHandle(Arc::new(Mutex::new(file))));
}

pub(crate) fn file_handle_of(obj: &ObjectRef) -> Result<Arc<Mutex<File>>, Envelope> {
    match obj.field_value(FILE_HANDLE) {
        Some(FieldValue::FileHandle(handle)) => Ok(handle),
        _ => Err(Envelope::io("Stream Closed")),
    }
}

/// Dropping the last handle closes the file.
pub(crate) fn close_file_handle(obj: &ObjectRef) -> bool {
    obj.remove_field(FILE_HANDLE).is_some()
}

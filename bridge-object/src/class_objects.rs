use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::RwLock;

use bridge_common::string_pool::{intern, lookup, StringId};

use crate::object::{FieldValue, ObjectRef};
use crate::type_kind::{PrimitiveKind, TypeKind};

/// Field on a `java/lang/Class` object holding the pool id of the class it describes.
pub const CLASS_HANDLE_FIELD: &str = "handle";

lazy_static! {
    static ref CLASS_OBJECTS: RwLock<HashMap<StringId, ObjectRef>> = RwLock::new(HashMap::new());
}

/// The one `java/lang/Class` object for `class_name` (internal form, or a primitive name like `int`).
pub fn class_object_for(class_name: &str) -> ObjectRef {
    let handle = intern(class_name);
    if let Some(existing) = CLASS_OBJECTS.read().get(&handle) {
        return existing.clone();
    }
    CLASS_OBJECTS.write().entry(handle).or_insert_with(|| {
        let class_object = ObjectRef::with_class(StringId::JAVA_LANG_CLASS);
        class_object.set(CLASS_HANDLE_FIELD, TypeKind::Int32, FieldValue::Int(handle.0 as i64));
        class_object
    }).clone()
}

pub fn described_class_name(class_object: &ObjectRef) -> Option<Arc<str>> {
    if class_object.is_null() || class_object.class() != StringId::JAVA_LANG_CLASS {
        return None;
    }
    let handle = class_object.int_field(CLASS_HANDLE_FIELD)?;
    Some(lookup(StringId(handle as u32)))
}

/// `Class.getName` form: dots for slashes.
pub fn java_visible_name(internal_name: &str) -> String {
    internal_name.replace('/', ".")
}

pub fn is_primitive_class_name(class_name: &str) -> bool {
    PrimitiveKind::from_java_name(class_name).is_some() || class_name == "void"
}

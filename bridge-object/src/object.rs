use std::any::Any;
use std::collections::{HashMap, VecDeque};
use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::ops::Deref;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::{Mutex, RwLock};

use bridge_common::string_pool::{intern, lookup, StringId};

use crate::type_kind::TypeKind;

/// Name of the field holding array elements and string contents.
pub const VALUE_FIELD: &str = "value";

#[derive(Clone)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Ref(ObjectRef),
    Bytes(Vec<i8>),
    Chars(Vec<u16>),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Refs(Vec<ObjectRef>),
    FileHandle(Arc<Mutex<File>>),
    RngState(i64),
    Mapping(HashMap<String, ObjectRef>),
    LinkedList(VecDeque<ObjectRef>),
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Debug for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Int(int) => write!(f, "Int({})", int),
            FieldValue::Float(float) => write!(f, "Float({})", float),
            FieldValue::Ref(obj) => write!(f, "Ref({:?})", obj),
            FieldValue::Bytes(bytes) => write!(f, "Bytes(len {})", bytes.len()),
            FieldValue::Chars(chars) => write!(f, "Chars(len {})", chars.len()),
            FieldValue::Ints(ints) => write!(f, "Ints(len {})", ints.len()),
            FieldValue::Floats(floats) => write!(f, "Floats(len {})", floats.len()),
            FieldValue::Refs(refs) => write!(f, "Refs(len {})", refs.len()),
            FieldValue::FileHandle(_) => write!(f, "FileHandle"),
            FieldValue::RngState(seed) => write!(f, "RngState({:#x})", seed),
            FieldValue::Mapping(map) => write!(f, "Mapping(len {})", map.len()),
            FieldValue::LinkedList(list) => write!(f, "LinkedList(len {})", list.len()),
            FieldValue::Opaque(_) => write!(f, "Opaque"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub kind: TypeKind,
    pub value: FieldValue,
}

impl Field {
    pub fn new(kind: TypeKind, value: FieldValue) -> Self {
        Self { kind, value }
    }

    pub fn int(kind: TypeKind, value: i64) -> Self {
        Self { kind, value: FieldValue::Int(value) }
    }

    pub fn reference(obj: ObjectRef) -> Self {
        let kind = if obj.is_null() { TypeKind::Null } else { TypeKind::Reference };
        Self { kind, value: FieldValue::Ref(obj) }
    }

    pub fn as_int(&self) -> Option<i64> {
        match &self.value {
            FieldValue::Int(int) => Some(*int),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match &self.value {
            FieldValue::Float(float) => Some(*float),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match &self.value {
            FieldValue::Ref(obj) => Some(obj),
            _ => None,
        }
    }
}

pub struct Object {
    class: StringId,
    fields: RwLock<HashMap<String, Field>>,
}

/// Shared handle to a heap object. Identity is the allocation, so clones compare equal under `ptr_eq`.
#[derive(Clone)]
pub struct ObjectRef(Arc<Object>);

lazy_static! {
    static ref NULL_SENTINEL: ObjectRef = ObjectRef(Arc::new(Object {
        class: StringId::EMPTY,
        fields: RwLock::new(HashMap::new()),
    }));
}

impl ObjectRef {
    /// make-object: interns the class name and allocates an object with no fields.
    pub fn new(class_name: &str) -> Self {
        Self::with_class(intern(class_name))
    }

    pub fn with_class(class: StringId) -> Self {
        ObjectRef(Arc::new(Object { class, fields: RwLock::new(HashMap::new()) }))
    }

    pub fn null() -> Self {
        NULL_SENTINEL.clone()
    }

    pub fn is_null(&self) -> bool {
        Arc::ptr_eq(&self.0, &NULL_SENTINEL.0)
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn class(&self) -> StringId {
        self.0.class
    }

    pub fn class_name(&self) -> Arc<str> {
        lookup(self.0.class)
    }

    pub fn is_instance_of(&self, class_name: &str) -> bool {
        !self.is_null() && self.class_name().as_ref() == class_name
    }

    pub fn identity_hash(&self) -> i32 {
        let address = Arc::as_ptr(&self.0) as usize as u64;
        ((address >> 3) ^ (address >> 35)) as i32 & 0x7FFF_FFFF
    }

    pub fn get_field(&self, name: &str) -> Option<Field> {
        self.0.fields.read().get(name).cloned()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.0.fields.read().contains_key(name)
    }

    pub fn field_value(&self, name: &str) -> Option<FieldValue> {
        self.0.fields.read().get(name).map(|field| field.value.clone())
    }

    pub fn int_field(&self, name: &str) -> Option<i64> {
        self.0.fields.read().get(name).and_then(|field| field.as_int())
    }

    pub fn ref_field(&self, name: &str) -> Option<ObjectRef> {
        self.0.fields.read().get(name).and_then(|field| field.as_object().cloned())
    }

    /// Writes to the null sentinel are dropped.
    pub fn set_field(&self, name: impl Into<String>, field: Field) {
        if self.is_null() {
            return;
        }
        self.0.fields.write().insert(name.into(), field);
    }

    pub fn set(&self, name: impl Into<String>, kind: TypeKind, value: FieldValue) {
        self.set_field(name, Field::new(kind, value))
    }

    pub fn remove_field(&self, name: &str) -> Option<Field> {
        if self.is_null() {
            return None;
        }
        self.0.fields.write().remove(name)
    }

    pub fn field_names(&self) -> Vec<String> {
        let mut names = self.0.fields.read().keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn with_fields<T>(&self, with: impl FnOnce(&HashMap<String, Field>) -> T) -> T {
        with(&self.0.fields.read())
    }

    /// Runs `with` while holding this object's field table exclusively. Read-modify-write
    /// sequences inside the closure are atomic with respect to other field accesses. On the null
    /// sentinel `with` only sees a throwaway empty table.
    pub fn with_fields_mut<T>(&self, with: impl FnOnce(&mut HashMap<String, Field>) -> T) -> T {
        if self.is_null() {
            return with(&mut HashMap::new());
        }
        with(&mut self.0.fields.write())
    }
}

impl Deref for ObjectRef {
    type Target = Object;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Debug for ObjectRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "null");
        }
        write!(f, "{}@{:x}", self.class_name(), self.identity_hash())
    }
}

impl Default for ObjectRef {
    fn default() -> Self {
        ObjectRef::null()
    }
}

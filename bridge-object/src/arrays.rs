use crate::object::{FieldValue, ObjectRef, VALUE_FIELD};
use crate::type_kind::{PrimitiveKind, TypeKind};

pub fn primitive_array_class_name(element: PrimitiveKind) -> String {
    format!("[{}", element.descriptor_char())
}

/// `[Lpkg/C;` for plain classes, one more `[` for classes that are already arrays.
pub fn reference_array_class_name(element_class: &str) -> String {
    if element_class.starts_with('[') {
        format!("[{}", element_class)
    } else {
        format!("[L{};", element_class)
    }
}

fn zeroed_storage(element: PrimitiveKind, length: usize) -> FieldValue {
    match element {
        PrimitiveKind::Int8 => FieldValue::Bytes(vec![0; length]),
        PrimitiveKind::Char16 => FieldValue::Chars(vec![0; length]),
        PrimitiveKind::Float32 | PrimitiveKind::Float64 => FieldValue::Floats(vec![0.0; length]),
        PrimitiveKind::Int16 | PrimitiveKind::Int32 | PrimitiveKind::Int64 | PrimitiveKind::Boolean => FieldValue::Ints(vec![0; length]),
    }
}

pub fn make_primitive_array(element: PrimitiveKind, length: usize) -> ObjectRef {
    let array = ObjectRef::new(primitive_array_class_name(element).as_str());
    array.set(VALUE_FIELD, TypeKind::array_of(element), zeroed_storage(element, length));
    array
}

pub fn make_reference_array(element_class: &str, length: usize) -> ObjectRef {
    make_reference_array_from(element_class, vec![ObjectRef::null(); length])
}

pub fn make_reference_array_from(element_class: &str, elements: Vec<ObjectRef>) -> ObjectRef {
    let array = ObjectRef::new(reference_array_class_name(element_class).as_str());
    array.set(VALUE_FIELD, TypeKind::ReferenceArray, FieldValue::Refs(elements));
    array
}

pub fn make_byte_array_from(bytes: Vec<i8>) -> ObjectRef {
    let array = ObjectRef::new("[B");
    array.set(VALUE_FIELD, TypeKind::ByteArray, FieldValue::Bytes(bytes));
    array
}

pub fn make_char_array_from(chars: Vec<u16>) -> ObjectRef {
    let array = ObjectRef::new("[C");
    array.set(VALUE_FIELD, TypeKind::CharArray, FieldValue::Chars(chars));
    array
}

pub fn make_int_array_from(ints: Vec<i32>) -> ObjectRef {
    let array = ObjectRef::new("[I");
    array.set(VALUE_FIELD, TypeKind::IntArray, FieldValue::Ints(ints.into_iter().map(|int| int as i64).collect()));
    array
}

/// Class name of the component of an array class: `[[I` gives `[I`, `[Ljava/lang/String;` gives
/// `java/lang/String` and `[I` gives `int`. `None` for names that are not array classes.
pub fn make_component_type(array_class: &str) -> Option<String> {
    let component = array_class.strip_prefix('[')?;
    if component.starts_with('[') {
        return Some(component.to_string());
    }
    if let Some(class_name) = component.strip_prefix('L').and_then(|rest| rest.strip_suffix(';')) {
        return if class_name.is_empty() { None } else { Some(class_name.to_string()) };
    }
    let mut chars = component.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PrimitiveKind::from_descriptor_char(c).map(|element| element.java_name().to_string()),
        _ => None,
    }
}

/// Types every array and every object can be stored as.
const UNIVERSAL_SUPERTYPES: [&str; 3] = ["java/lang/Object", "java/lang/Cloneable", "java/io/Serializable"];

/// Final classes the bridge creates instances of. Only these can be rejected without a class
/// hierarchy to consult.
const FINAL_CLASSES: &[&str] = &[
    "java/lang/String",
    "java/lang/Integer",
    "java/lang/Long",
    "java/lang/Boolean",
    "java/lang/Double",
    "java/lang/Float",
    "java/lang/Short",
    "java/lang/Byte",
    "java/lang/Character",
    "java/lang/Class",
    "java/lang/StackTraceElement",
];

/// Class name held by an array component descriptor, `None` for primitive components.
fn component_class(component: &str) -> Option<&str> {
    if component.starts_with('[') {
        return Some(component);
    }
    component.strip_prefix('L').and_then(|rest| rest.strip_suffix(';'))
}

/// Whether an instance of `from` may be stored where `to` is expected. Plain classes are only
/// told apart when `to` is final; anything else is assumed to be a subclass.
pub fn class_assignable(from: &str, to: &str) -> bool {
    if from == to || UNIVERSAL_SUPERTYPES.contains(&to) {
        return true;
    }
    match (from.strip_prefix('['), to.strip_prefix('[')) {
        (Some(from_component), Some(to_component)) => match (component_class(from_component), component_class(to_component)) {
            (Some(from_class), Some(to_class)) => class_assignable(from_class, to_class),
            _ => false,
        },
        (None, None) => !FINAL_CLASSES.contains(&to),
        _ => false,
    }
}

/// Whether `element` may be stored into an array of class `array_class`. Null always may.
pub fn element_storable(array_class: &str, element: &ObjectRef) -> bool {
    if element.is_null() {
        return true;
    }
    match array_class.strip_prefix('[').and_then(component_class) {
        Some(component) => class_assignable(&element.class_name(), component),
        None => false,
    }
}

pub fn is_array(obj: &ObjectRef) -> bool {
    !obj.is_null() && obj.class_name().starts_with('[')
}

pub fn array_length(obj: &ObjectRef) -> Option<usize> {
    if !is_array(obj) {
        return None;
    }
    obj.with_fields(|fields| {
        Some(match &fields.get(VALUE_FIELD)?.value {
            FieldValue::Bytes(elems) => elems.len(),
            FieldValue::Chars(elems) => elems.len(),
            FieldValue::Ints(elems) => elems.len(),
            FieldValue::Floats(elems) => elems.len(),
            FieldValue::Refs(elems) => elems.len(),
            _ => return None,
        })
    })
}

pub fn byte_array_contents(obj: &ObjectRef) -> Option<Vec<i8>> {
    match obj.field_value(VALUE_FIELD)? {
        FieldValue::Bytes(bytes) => Some(bytes),
        _ => None,
    }
}

pub fn char_array_contents(obj: &ObjectRef) -> Option<Vec<u16>> {
    match obj.field_value(VALUE_FIELD)? {
        FieldValue::Chars(chars) => Some(chars),
        _ => None,
    }
}

pub fn reference_array_contents(obj: &ObjectRef) -> Option<Vec<ObjectRef>> {
    match obj.field_value(VALUE_FIELD)? {
        FieldValue::Refs(refs) => Some(refs),
        _ => None,
    }
}

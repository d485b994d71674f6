use std::collections::HashMap;

use bridge_object::object::{Field, FieldValue, ObjectRef, VALUE_FIELD};
use bridge_object::strings::string_of_object;
use bridge_object::type_kind::TypeKind;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/util/Properties";

/// Runs `with` on the receiver's table while holding its fields.
fn with_table<T>(this: &ObjectRef, with: impl FnOnce(&mut HashMap<String, ObjectRef>) -> T) -> Result<T, Envelope> {
    this.with_fields_mut(|fields| match fields.get_mut(VALUE_FIELD) {
        Some(Field { value: FieldValue::Mapping(table), .. }) => Ok(with(table)),
        _ => Err(Envelope::vm_error(format!("{:?} has no property table", this))),
    })
}

/// Keys that are not strings can never be present.
fn key_of(args: &[Value], index: usize) -> Result<Option<String>, Envelope> {
    Ok(string_of_object(args.non_null_at(index)?))
}

fn object_result(obj: Option<ObjectRef>) -> BridgeResult {
    Ok(Some(Value::Object(obj.unwrap_or_else(ObjectRef::null))))
}

fn init(args: &[Value]) -> BridgeResult {
    args.non_null_at(0)?.set(VALUE_FIELD, TypeKind::Mapping, FieldValue::Mapping(HashMap::new()));
    Ok(None)
}

fn get_property(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let found = match key_of(args, 1)? {
        None => None,
        Some(key) => with_table(this, |table| table.get(&key).cloned())?,
    };
    object_result(found)
}

fn get_property_or_default(args: &[Value]) -> BridgeResult {
    let found = get_property(args)?.and_then(|value| value.as_object().cloned()).filter(|value| !value.is_null());
    match found {
        Some(value) => object_result(Some(value)),
        None => object_result(Some(args.object_at(2)?.clone())),
    }
}

fn set_property(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let key = args.string_at(1)?;
    let value = args.non_null_at(2)?.clone();
    object_result(with_table(this, |table| table.insert(key, value))?)
}

fn remove(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let removed = match key_of(args, 1)? {
        None => None,
        Some(key) => with_table(this, |table| table.remove(&key))?,
    };
    object_result(removed)
}

fn contains_key(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let present = match key_of(args, 1)? {
        None => false,
        Some(key) => with_table(this, |table| table.contains_key(&key))?,
    };
    Ok(Some(Value::from_bool(present)))
}

fn size(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Int(with_table(args.non_null_at(0)?, |table| table.len())? as i64)))
}

fn is_empty(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(with_table(args.non_null_at(0)?, |table| table.is_empty())?)))
}

fn clear(args: &[Value]) -> BridgeResult {
    with_table(args.non_null_at(0)?, |table| table.clear())?;
    Ok(None)
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("<init>()V", BridgeMethod::new(0, init)),
        ("getProperty(Ljava/lang/String;)Ljava/lang/String;", BridgeMethod::new(1, get_property)),
        ("getProperty(Ljava/lang/String;Ljava/lang/String;)Ljava/lang/String;", BridgeMethod::new(2, get_property_or_default)),
        ("setProperty(Ljava/lang/String;Ljava/lang/String;)Ljava/lang/Object;", BridgeMethod::new(2, set_property)),
        ("remove(Ljava/lang/Object;)Ljava/lang/Object;", BridgeMethod::new(1, remove)),
        ("containsKey(Ljava/lang/Object;)Z", BridgeMethod::new(1, contains_key)),
        ("size()I", BridgeMethod::new(0, size)),
        ("isEmpty()Z", BridgeMethod::new(0, is_empty)),
        ("clear()V", BridgeMethod::new(0, clear)),
    ]);
}

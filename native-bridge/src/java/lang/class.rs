use std::sync::Arc;

use bridge_object::arrays::make_component_type;
use bridge_object::class_objects::{class_object_for, described_class_name, is_primitive_class_name, java_visible_name};
use bridge_object::object::ObjectRef;
use bridge_object::strings::object_of_string;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::helpers::{just_return, return_false};
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/lang/Class";

fn described(args: &[Value]) -> Result<Arc<str>, Envelope> {
    let this = args.non_null_at(0)?;
    described_class_name(this).ok_or_else(|| Envelope::vm_error(format!("{:?} is not a class object", this)))
}

/// Only the eight primitive names and `void` resolve.
fn get_primitive_class(args: &[Value]) -> BridgeResult {
    let name = args.string_at(0)?;
    if !is_primitive_class_name(name.as_str()) {
        return Err(Envelope::illegal_argument(format!("{} is not a primitive type", name)));
    }
    Ok(Some(Value::Object(class_object_for(name.as_str()))))
}

fn get_component_type(args: &[Value]) -> BridgeResult {
    let component = match make_component_type(described(args)?.as_ref()) {
        None => ObjectRef::null(),
        Some(component) => class_object_for(component.as_str()),
    };
    Ok(Some(Value::Object(component)))
}

fn get_name(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(object_of_string(java_visible_name(described(args)?.as_ref()).as_str()))))
}

fn is_array(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(described(args)?.starts_with('['))))
}

fn is_primitive(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(is_primitive_class_name(described(args)?.as_ref()))))
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("registerNatives()V", BridgeMethod::new(0, just_return)),
        ("getPrimitiveClass(Ljava/lang/String;)Ljava/lang/Class;", BridgeMethod::new(1, get_primitive_class)),
        ("getComponentType()Ljava/lang/Class;", BridgeMethod::new(0, get_component_type)),
        ("getName()Ljava/lang/String;", BridgeMethod::new(0, get_name)),
        ("isArray()Z", BridgeMethod::new(0, is_array)),
        ("isPrimitive()Z", BridgeMethod::new(0, is_primitive)),
        ("desiredAssertionStatus()Z", BridgeMethod::new(0, return_false)),
        ("desiredAssertionStatus0(Ljava/lang/Class;)Z", BridgeMethod::new(1, return_false)),
    ]);
}

#[cfg(test)]
pub mod test {
    use bridge_common::exception_kind::ExceptionKind;
    use bridge_object::class_objects::{class_object_for, described_class_name};
    use bridge_object::strings::{object_of_string, string_of_object};
    use bridge_object::value::Value;

    use crate::java::lang::class::{get_component_type, get_name, get_primitive_class, is_array, is_primitive};

    #[test]
    pub fn primitive_classes() {
        let int_class = get_primitive_class(&[Value::Object(object_of_string("int"))]).unwrap().unwrap();
        assert!(int_class.as_object().unwrap().ptr_eq(&class_object_for("int")));
        assert_eq!(is_primitive(&[int_class]).unwrap().unwrap().as_int(), Some(1));
        let err = get_primitive_class(&[Value::Object(object_of_string("java/lang/Integer"))]).unwrap_err();
        assert_eq!(err.kind, ExceptionKind::IllegalArgumentException);
        assert_eq!(get_primitive_class(&[Value::null()]).unwrap_err().kind, ExceptionKind::NullPointerException);
    }

    #[test]
    pub fn array_classes() {
        let nested = Value::Object(class_object_for("[[I"));
        assert_eq!(is_array(&[nested.clone()]).unwrap().unwrap().as_int(), Some(1));
        let component = get_component_type(&[nested]).unwrap().unwrap();
        assert_eq!(described_class_name(component.as_object().unwrap()).unwrap().as_ref(), "[I");
        let element = get_component_type(&[component]).unwrap().unwrap();
        assert_eq!(described_class_name(element.as_object().unwrap()).unwrap().as_ref(), "int");
        let none = get_component_type(&[Value::Object(class_object_for("java/lang/String"))]).unwrap().unwrap();
        assert!(none.is_null());
    }

    #[test]
    pub fn names_use_dots() {
        let name = get_name(&[Value::Object(class_object_for("java/util/HashMap"))]).unwrap().unwrap();
        assert_eq!(string_of_object(name.as_object().unwrap()).unwrap(), "java.util.HashMap");
    }
}

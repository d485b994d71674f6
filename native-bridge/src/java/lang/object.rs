use bridge_object::class_objects::{class_object_for, java_visible_name};
use bridge_object::strings::object_of_string;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult};
use crate::helpers::{clinit_generic, just_return};
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/lang/Object";

fn hash_code(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from(args.non_null_at(0)?.identity_hash())))
}

fn equals(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    Ok(Some(Value::from_bool(this.ptr_eq(args.object_at(1)?))))
}

fn get_class(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    Ok(Some(Value::Object(class_object_for(this.class_name().as_ref()))))
}

/// `getClass().getName() + "@" + Integer.toHexString(hashCode())`
fn to_string(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let rendered = format!("{}@{:x}", java_visible_name(this.class_name().as_ref()), this.identity_hash());
    Ok(Some(Value::Object(object_of_string(rendered.as_str()))))
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("<clinit>()V", BridgeMethod::new(0, clinit_generic)),
        ("<init>()V", BridgeMethod::new(0, just_return)),
        ("registerNatives()V", BridgeMethod::new(0, just_return)),
        ("hashCode()I", BridgeMethod::new(0, hash_code)),
        ("equals(Ljava/lang/Object;)Z", BridgeMethod::new(1, equals)),
        ("getClass()Ljava/lang/Class;", BridgeMethod::new(0, get_class)),
        ("toString()Ljava/lang/String;", BridgeMethod::new(0, to_string)),
    ]);
}

#[cfg(test)]
pub mod test {
    use bridge_common::exception_kind::ExceptionKind;
    use bridge_object::class_objects::described_class_name;
    use bridge_object::object::ObjectRef;
    use bridge_object::strings::string_of_object;
    use bridge_object::value::Value;

    use crate::java::lang::object::{equals, get_class, hash_code, to_string};

    #[test]
    pub fn identity_semantics() {
        let obj = ObjectRef::new("java/lang/Object");
        let other = ObjectRef::new("java/lang/Object");
        let this = Value::Object(obj.clone());
        assert_eq!(equals(&[this.clone(), Value::Object(obj.clone())]).unwrap().unwrap().as_int(), Some(1));
        assert_eq!(equals(&[this.clone(), Value::Object(other)]).unwrap().unwrap().as_int(), Some(0));
        assert_eq!(equals(&[this.clone(), Value::null()]).unwrap().unwrap().as_int(), Some(0));
        assert_eq!(hash_code(&[this.clone()]).unwrap().unwrap().as_int(), Some(obj.identity_hash() as i64));
        assert_eq!(hash_code(&[Value::null()]).unwrap_err().kind, ExceptionKind::NullPointerException);
    }

    #[test]
    pub fn class_and_string_form() {
        let obj = ObjectRef::new("java/util/ArrayList");
        let class_object = get_class(&[Value::Object(obj.clone())]).unwrap().unwrap();
        assert_eq!(described_class_name(class_object.as_object().unwrap()).unwrap().as_ref(), "java/util/ArrayList");
        let rendered = to_string(&[Value::Object(obj.clone())]).unwrap().unwrap();
        let rendered = string_of_object(rendered.as_object().unwrap()).unwrap();
        assert_eq!(rendered, format!("java.util.ArrayList@{:x}", obj.identity_hash()));
    }
}

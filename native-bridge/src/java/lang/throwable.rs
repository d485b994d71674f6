use bridge_object::arrays::{make_reference_array, make_reference_array_from, reference_array_contents};
use bridge_object::class_objects::java_visible_name;
use bridge_object::context::FrameDescription;
use bridge_object::object::{Field, FieldValue, ObjectRef};
use bridge_object::strings::object_of_string;
use bridge_object::type_kind::TypeKind;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/lang/Throwable";
pub const STACK_TRACE_ELEMENT: &str = "java/lang/StackTraceElement";
pub const STACK_TRACE_FIELD: &str = "stackTrace";

const DECLARING_CLASS_FIELD: &str = "declaringClass";
const METHOD_NAME_FIELD: &str = "methodName";
const FILE_NAME_FIELD: &str = "fileName";
const LINE_NUMBER_FIELD: &str = "lineNumber";

pub fn make_stack_trace_element(frame: &FrameDescription) -> ObjectRef {
    let element = ObjectRef::new(STACK_TRACE_ELEMENT);
    element.set_field(DECLARING_CLASS_FIELD, Field::reference(object_of_string(java_visible_name(frame.class_name.as_str()).as_str())));
    element.set_field(METHOD_NAME_FIELD, Field::reference(object_of_string(frame.method_name.as_str())));
    element.set_field(FILE_NAME_FIELD, Field::reference(ObjectRef::null()));
    element.set(LINE_NUMBER_FIELD, TypeKind::Int32, FieldValue::Int(frame.line_number as i64));
    element
}

/// Captures the caller's frames, innermost first, onto the receiver and returns it.
fn fill_in_stack_trace(args: &[Value]) -> BridgeResult {
    let context = args.context_at(0)?;
    let this = args.non_null_at(1)?;
    let elements = context.frames().iter().map(make_stack_trace_element).collect();
    let trace = make_reference_array_from(STACK_TRACE_ELEMENT, elements);
    this.set_field(STACK_TRACE_FIELD, Field::reference(trace));
    Ok(Some(Value::Object(this.clone())))
}

/// A fresh array each call, as callers may modify what they get back.
fn get_stack_trace(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let trace = match this.ref_field(STACK_TRACE_FIELD).filter(|trace| !trace.is_null()) {
        None => make_reference_array(STACK_TRACE_ELEMENT, 0),
        Some(trace) => make_reference_array_from(STACK_TRACE_ELEMENT, reference_array_contents(&trace).unwrap_or_default()),
    };
    Ok(Some(Value::Object(trace)))
}

fn element_field(args: &[Value], name: &str) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let field = this.get_field(name).ok_or_else(|| Envelope::vm_error(format!("{:?} has no {} field", this, name)))?;
    Ok(Some(match field.value {
        FieldValue::Ref(obj) => Value::Object(obj),
        FieldValue::Int(int) => Value::Int(int),
        other => return Err(Envelope::vm_error(format!("unexpected {:?} in {}", other, name))),
    }))
}

fn get_class_name(args: &[Value]) -> BridgeResult {
    element_field(args, DECLARING_CLASS_FIELD)
}

fn get_method_name(args: &[Value]) -> BridgeResult {
    element_field(args, METHOD_NAME_FIELD)
}

fn get_file_name(args: &[Value]) -> BridgeResult {
    element_field(args, FILE_NAME_FIELD)
}

fn get_line_number(args: &[Value]) -> BridgeResult {
    element_field(args, LINE_NUMBER_FIELD)
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("fillInStackTrace()Ljava/lang/Throwable;", BridgeMethod::new(0, fill_in_stack_trace).with_context()),
        ("getStackTrace()[Ljava/lang/StackTraceElement;", BridgeMethod::new(0, get_stack_trace)),
    ]);
    register_class(signatures, STACK_TRACE_ELEMENT, [
        ("getClassName()Ljava/lang/String;", BridgeMethod::new(0, get_class_name)),
        ("getMethodName()Ljava/lang/String;", BridgeMethod::new(0, get_method_name)),
        ("getFileName()Ljava/lang/String;", BridgeMethod::new(0, get_file_name)),
        ("getLineNumber()I", BridgeMethod::new(0, get_line_number)),
    ]);
}

#[cfg(test)]
pub mod test {
    use std::sync::Arc;

    use bridge_object::arrays::reference_array_contents;
    use bridge_object::context::{ContextRef, FrameDescription, FrameStack};
    use bridge_object::object::ObjectRef;
    use bridge_object::strings::string_of_object;
    use bridge_object::value::Value;

    use crate::java::lang::throwable::{fill_in_stack_trace, get_class_name, get_line_number, get_method_name, get_stack_trace};

    #[test]
    pub fn captures_frames_innermost_first() {
        let frames = Arc::new(FrameStack::main_thread());
        frames.push_frame(FrameDescription::new("app/Main", "main", "([Ljava/lang/String;)V"));
        frames.push_frame(FrameDescription::new("app/Parser", "parse", "()V"));
        let context: ContextRef = frames;
        let throwable = ObjectRef::new("java/lang/RuntimeException");
        let returned = fill_in_stack_trace(&[Value::Context(context), Value::Object(throwable.clone())]).unwrap().unwrap();
        assert!(returned.as_object().unwrap().ptr_eq(&throwable));

        let trace = get_stack_trace(&[Value::Object(throwable)]).unwrap().unwrap();
        let trace = trace.as_object().unwrap();
        assert_eq!(trace.class_name().as_ref(), "[Ljava/lang/StackTraceElement;");
        let elements = reference_array_contents(trace).unwrap();
        assert_eq!(elements.len(), 2);
        let innermost = Value::Object(elements[0].clone());
        let class_name = get_class_name(&[innermost.clone()]).unwrap().unwrap();
        assert_eq!(string_of_object(class_name.as_object().unwrap()).unwrap(), "app.Parser");
        let method_name = get_method_name(&[innermost.clone()]).unwrap().unwrap();
        assert_eq!(string_of_object(method_name.as_object().unwrap()).unwrap(), "parse");
        assert_eq!(get_line_number(&[innermost]).unwrap().unwrap().as_int(), Some(-1));
    }

    #[test]
    pub fn empty_trace_before_fill() {
        let trace = get_stack_trace(&[Value::Object(ObjectRef::new("java/lang/Error"))]).unwrap().unwrap();
        assert_eq!(reference_array_contents(trace.as_object().unwrap()).unwrap().len(), 0);
    }
}

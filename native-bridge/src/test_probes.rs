//! Synthetic signatures for exercising the adapter without any JDK class behind them.

use bridge_common::exception_kind::ExceptionKind;
use bridge_object::object::ObjectRef;
use bridge_object::strings::object_of_string;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::helpers::just_return;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const PROBE_CLASS: &str = "bridge/test/Probe";

fn int_return(_args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Int(43)))
}

fn double_return(_args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Float(43.43)))
}

fn object_return(_args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(ObjectRef::new("java/lang/Object"))))
}

fn echo_int(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Int(args.int_at(0)?)))
}

fn echo_long_sum(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Int(args.int_at(0)?.wrapping_add(args.int_at(1)?))))
}

fn echo_double(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Float(args.float_at(0)?)))
}

fn echo_object(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(args.object_at(0)?.clone())))
}

fn describe_args(args: &[Value]) -> BridgeResult {
    let description = args.iter().map(|arg| match arg {
        Value::Int(int) => format!("I{}", int),
        Value::Float(float) => format!("F{}", float),
        Value::Object(obj) if obj.is_null() => "null".to_string(),
        Value::Object(obj) => obj.class_name().to_string(),
        Value::Context(context) => format!("ctx:{}", context.thread_name()),
    }).collect::<Vec<_>>().join(",");
    Ok(Some(Value::Object(object_of_string(description.as_str()))))
}

fn raise(_args: &[Value]) -> BridgeResult {
    Err(Envelope::new(ExceptionKind::IllegalStateException, "probe raised"))
}

fn require_non_null(args: &[Value]) -> BridgeResult {
    args.non_null_at(0)?;
    Ok(None)
}

fn panics(_args: &[Value]) -> BridgeResult {
    panic!("probe panicked")
}

pub fn load(signatures: &mut MethodSignatures) {
    let probes: [(&str, BridgeMethod); 14] = [
        ("test()V", BridgeMethod::new(0, just_return)),
        ("test()I", BridgeMethod::new(0, int_return)),
        ("test()D", BridgeMethod::new(0, double_return)),
        ("test()Ljava/lang/Object;", BridgeMethod::new(0, object_return)),
        ("test(I)I", BridgeMethod::new(1, echo_int)),
        ("test(B)B", BridgeMethod::new(1, echo_int)),
        ("test(JJ)J", BridgeMethod::new(4, echo_long_sum)),
        ("test(D)D", BridgeMethod::new(2, echo_double)),
        ("test(Ljava/lang/Object;)Ljava/lang/Object;", BridgeMethod::new(1, echo_object)),
        ("describe(IJLjava/lang/Object;)Ljava/lang/String;", BridgeMethod::new(4, describe_args)),
        ("describeWithContext(I)Ljava/lang/String;", BridgeMethod::new(1, describe_args).with_context()),
        ("raise()V", BridgeMethod::new(0, raise)),
        ("requireNonNull(Ljava/lang/Object;)V", BridgeMethod::new(1, require_non_null)),
        ("panics()V", BridgeMethod::new(0, panics)),
    ];
    for (name_and_descriptor, method) in probes {
        signatures.register(format!("{}.{}", PROBE_CLASS, name_and_descriptor), method);
    }
}

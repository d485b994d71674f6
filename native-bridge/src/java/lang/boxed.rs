//! Boxing, unboxing and string conversion for the wrapper classes.

use bridge_common::exception_kind::ExceptionKind;
use bridge_object::object::{FieldValue, ObjectRef, VALUE_FIELD};
use bridge_object::strings::object_of_string;
use bridge_object::type_kind::{PrimitiveKind, TypeKind};
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub fn make_boxed(kind: PrimitiveKind, value: Value) -> ObjectRef {
    let boxed = ObjectRef::new(kind.boxed_class_name());
    let field_value = match value {
        Value::Float(float) => FieldValue::Float(float),
        Value::Int(int) => FieldValue::Int(kind.widen(int)),
        _ => FieldValue::Int(0),
    };
    boxed.set(VALUE_FIELD, TypeKind::primitive(kind), field_value);
    boxed
}

/// `Double.toString`: plain notation in [1e-3, 1e7), computerized scientific notation outside it,
/// and always at least one fractional digit.
pub fn java_double_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }
    let magnitude = value.abs();
    if (1e-3..1e7).contains(&magnitude) {
        let plain = format!("{}", value);
        return if plain.contains('.') { plain } else { format!("{}.0", plain) };
    }
    let scientific = format!("{:E}", value);
    match scientific.split_once('E') {
        Some((mantissa, exponent)) if !mantissa.contains('.') => format!("{}.0E{}", mantissa, exponent),
        _ => scientific,
    }
}

fn number_format(input: &str) -> Envelope {
    Envelope::new(ExceptionKind::NumberFormatException, format!("For input string: \"{}\"", input))
}

fn unbox(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    match this.field_value(VALUE_FIELD) {
        Some(FieldValue::Int(int)) => Ok(Some(Value::Int(int))),
        Some(FieldValue::Float(float)) => Ok(Some(Value::Float(float))),
        _ => Err(Envelope::vm_error(format!("{:?} holds no primitive value", this))),
    }
}

fn box_int(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(make_boxed(PrimitiveKind::Int32, args.arg(0)?.clone()))))
}

fn box_long(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(make_boxed(PrimitiveKind::Int64, args.arg(0)?.clone()))))
}

fn box_boolean(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(make_boxed(PrimitiveKind::Boolean, args.arg(0)?.clone()))))
}

fn parse_int(args: &[Value]) -> BridgeResult {
    parse_int_radix(args.string_at(0).map_err(|_| number_format("null"))?.as_str(), 10)
}

fn parse_int_with_radix(args: &[Value]) -> BridgeResult {
    let input = args.string_at(0).map_err(|_| number_format("null"))?;
    let radix = args.int_at(1)?;
    if !(2..=36).contains(&radix) {
        return Err(Envelope::new(ExceptionKind::NumberFormatException, format!("radix {} out of range", radix)));
    }
    parse_int_radix(input.as_str(), radix as u32)
}

fn parse_int_radix(input: &str, radix: u32) -> BridgeResult {
    i32::from_str_radix(input, radix).map(|int| Some(Value::from(int))).map_err(|_| number_format(input))
}

fn parse_long(args: &[Value]) -> BridgeResult {
    let input = args.string_at(0).map_err(|_| number_format("null"))?;
    input.parse::<i64>().map(|long| Some(Value::Int(long))).map_err(|_| number_format(input.as_str()))
}

/// Null and anything but a case-insensitive `true` parse as false.
fn parse_boolean(args: &[Value]) -> BridgeResult {
    let parsed = match args.object_at(0)? {
        obj if obj.is_null() => false,
        _ => args.string_at(0)?.eq_ignore_ascii_case("true"),
    };
    Ok(Some(Value::from_bool(parsed)))
}

fn integral_to_string(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(object_of_string(args.int_at(0)?.to_string().as_str()))))
}

fn boxed_to_string(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let rendered = match this.field_value(VALUE_FIELD) {
        Some(FieldValue::Int(int)) if this.is_instance_of(PrimitiveKind::Boolean.boxed_class_name()) => (int != 0).to_string(),
        Some(FieldValue::Int(int)) => int.to_string(),
        Some(FieldValue::Float(float)) => java_double_to_string(float),
        _ => return Err(Envelope::vm_error(format!("{:?} holds no primitive value", this))),
    };
    Ok(Some(Value::Object(object_of_string(rendered.as_str()))))
}

fn to_hex_string(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(object_of_string(format!("{:x}", args.int_at(0)? as i32 as u32).as_str()))))
}

fn double_to_string(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(object_of_string(java_double_to_string(args.float_at(0)?).as_str()))))
}

fn double_to_raw_long_bits(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Int(args.float_at(0)?.to_bits() as i64)))
}

fn long_bits_to_double(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Float(f64::from_bits(args.int_at(0)? as u64))))
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, "java/lang/Integer", [
        ("valueOf(I)Ljava/lang/Integer;", BridgeMethod::new(1, box_int)),
        ("intValue()I", BridgeMethod::new(0, unbox)),
        ("parseInt(Ljava/lang/String;)I", BridgeMethod::new(1, parse_int)),
        ("parseInt(Ljava/lang/String;I)I", BridgeMethod::new(2, parse_int_with_radix)),
        ("toString(I)Ljava/lang/String;", BridgeMethod::new(1, integral_to_string)),
        ("toString()Ljava/lang/String;", BridgeMethod::new(0, boxed_to_string)),
        ("toHexString(I)Ljava/lang/String;", BridgeMethod::new(1, to_hex_string)),
    ]);
    register_class(signatures, "java/lang/Long", [
        ("valueOf(J)Ljava/lang/Long;", BridgeMethod::new(2, box_long)),
        ("longValue()J", BridgeMethod::new(0, unbox)),
        ("parseLong(Ljava/lang/String;)J", BridgeMethod::new(1, parse_long)),
        ("toString(J)Ljava/lang/String;", BridgeMethod::new(2, integral_to_string)),
        ("toString()Ljava/lang/String;", BridgeMethod::new(0, boxed_to_string)),
    ]);
    register_class(signatures, "java/lang/Boolean", [
        ("valueOf(Z)Ljava/lang/Boolean;", BridgeMethod::new(1, box_boolean)),
        ("booleanValue()Z", BridgeMethod::new(0, unbox)),
        ("parseBoolean(Ljava/lang/String;)Z", BridgeMethod::new(1, parse_boolean)),
        ("toString()Ljava/lang/String;", BridgeMethod::new(0, boxed_to_string)),
    ]);
    register_class(signatures, "java/lang/Double", [
        ("toString(D)Ljava/lang/String;", BridgeMethod::new(2, double_to_string)),
        ("doubleToRawLongBits(D)J", BridgeMethod::new(2, double_to_raw_long_bits)),
        ("longBitsToDouble(J)D", BridgeMethod::new(2, long_bits_to_double)),
    ]);
}

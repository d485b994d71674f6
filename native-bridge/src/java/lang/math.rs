use bridge_common::exception_kind::ExceptionKind;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/lang/Math";

fn arithmetic(message: &str) -> Envelope {
    Envelope::new(ExceptionKind::ArithmeticException, message)
}

fn int_result(value: i32) -> BridgeResult {
    Ok(Some(Value::from(value)))
}

fn long_result(value: i64) -> BridgeResult {
    Ok(Some(Value::Int(value)))
}

fn double_result(value: f64) -> BridgeResult {
    Ok(Some(Value::Float(value)))
}

fn int_args(args: &[Value]) -> Result<(i32, i32), Envelope> {
    Ok((args.int_at(0)? as i32, args.int_at(1)? as i32))
}

fn long_args(args: &[Value]) -> Result<(i64, i64), Envelope> {
    Ok((args.int_at(0)?, args.int_at(1)?))
}

fn double_args(args: &[Value]) -> Result<(f64, f64), Envelope> {
    Ok((args.float_at(0)?, args.float_at(1)?))
}

/// NaN wins, unlike `f64::max`.
fn java_max(left: f64, right: f64) -> f64 {
    if left.is_nan() || right.is_nan() {
        return f64::NAN;
    }
    left.max(right)
}

fn java_min(left: f64, right: f64) -> f64 {
    if left.is_nan() || right.is_nan() {
        return f64::NAN;
    }
    left.min(right)
}

fn abs_int(args: &[Value]) -> BridgeResult {
    int_result((args.int_at(0)? as i32).wrapping_abs())
}

fn abs_long(args: &[Value]) -> BridgeResult {
    long_result(args.int_at(0)?.wrapping_abs())
}

fn abs_floating(args: &[Value]) -> BridgeResult {
    double_result(args.float_at(0)?.abs())
}

fn max_int(args: &[Value]) -> BridgeResult {
    let (left, right) = int_args(args)?;
    int_result(left.max(right))
}

fn max_long(args: &[Value]) -> BridgeResult {
    let (left, right) = long_args(args)?;
    long_result(left.max(right))
}

fn max_floating(args: &[Value]) -> BridgeResult {
    let (left, right) = double_args(args)?;
    double_result(java_max(left, right))
}

fn min_int(args: &[Value]) -> BridgeResult {
    let (left, right) = int_args(args)?;
    int_result(left.min(right))
}

fn min_long(args: &[Value]) -> BridgeResult {
    let (left, right) = long_args(args)?;
    long_result(left.min(right))
}

fn min_floating(args: &[Value]) -> BridgeResult {
    let (left, right) = double_args(args)?;
    double_result(java_min(left, right))
}

fn sqrt(args: &[Value]) -> BridgeResult {
    double_result(args.float_at(0)?.sqrt())
}

fn pow(args: &[Value]) -> BridgeResult {
    let (base, exponent) = double_args(args)?;
    double_result(base.powf(exponent))
}

fn floor(args: &[Value]) -> BridgeResult {
    double_result(args.float_at(0)?.floor())
}

fn ceil(args: &[Value]) -> BridgeResult {
    double_result(args.float_at(0)?.ceil())
}

fn floor_div(args: &[Value]) -> BridgeResult {
    let (dividend, divisor) = int_args(args)?;
    if divisor == 0 {
        return Err(arithmetic("/ by zero"));
    }
    let quotient = dividend.wrapping_div(divisor);
    if dividend.wrapping_rem(divisor) != 0 && (dividend ^ divisor) < 0 {
        return int_result(quotient - 1);
    }
    int_result(quotient)
}

fn floor_mod(args: &[Value]) -> BridgeResult {
    let (dividend, divisor) = int_args(args)?;
    if divisor == 0 {
        return Err(arithmetic("/ by zero"));
    }
    let remainder = dividend.wrapping_rem(divisor);
    if remainder != 0 && (remainder ^ divisor) < 0 {
        return int_result(remainder + divisor);
    }
    int_result(remainder)
}

fn add_exact(args: &[Value]) -> BridgeResult {
    let (left, right) = int_args(args)?;
    int_result(left.checked_add(right).ok_or_else(|| arithmetic("integer overflow"))?)
}

fn multiply_exact(args: &[Value]) -> BridgeResult {
    let (left, right) = long_args(args)?;
    long_result(left.checked_mul(right).ok_or_else(|| arithmetic("long overflow"))?)
}

fn to_int_exact(args: &[Value]) -> BridgeResult {
    let value = args.int_at(0)?;
    int_result(i32::try_from(value).map_err(|_| arithmetic("integer overflow"))?)
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("abs(I)I", BridgeMethod::new(1, abs_int)),
        ("abs(J)J", BridgeMethod::new(2, abs_long)),
        ("abs(F)F", BridgeMethod::new(1, abs_floating)),
        ("abs(D)D", BridgeMethod::new(2, abs_floating)),
        ("max(II)I", BridgeMethod::new(2, max_int)),
        ("max(JJ)J", BridgeMethod::new(4, max_long)),
        ("max(DD)D", BridgeMethod::new(4, max_floating)),
        ("min(II)I", BridgeMethod::new(2, min_int)),
        ("min(JJ)J", BridgeMethod::new(4, min_long)),
        ("min(DD)D", BridgeMethod::new(4, min_floating)),
        ("sqrt(D)D", BridgeMethod::new(2, sqrt)),
        ("pow(DD)D", BridgeMethod::new(4, pow)),
        ("floor(D)D", BridgeMethod::new(2, floor)),
        ("ceil(D)D", BridgeMethod::new(2, ceil)),
        ("floorDiv(II)I", BridgeMethod::new(2, floor_div)),
        ("floorMod(II)I", BridgeMethod::new(2, floor_mod)),
        ("addExact(II)I", BridgeMethod::new(2, add_exact)),
        ("multiplyExact(JJ)J", BridgeMethod::new(4, multiply_exact)),
        ("toIntExact(J)I", BridgeMethod::new(2, to_int_exact)),
    ]);
}

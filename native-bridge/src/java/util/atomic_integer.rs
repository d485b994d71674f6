//! `AtomicInteger` over a plain `value` field. Every read-modify-write holds the object's field
//! table for its whole duration.

use bridge_object::object::{Field, FieldValue, ObjectRef, VALUE_FIELD};
use bridge_object::strings::object_of_string;
use bridge_object::type_kind::TypeKind;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::helpers::clinit_generic;
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};
use crate::traps::trap_function;

pub const CLASS_NAME: &str = "java/util/concurrent/atomic/AtomicInteger";

/// Applies `update` to the current value, stores the first element of its result and returns the second.
fn update(this: &ObjectRef, update: impl FnOnce(i32) -> (i32, i64)) -> Result<i64, Envelope> {
    this.with_fields_mut(|fields| {
        let current = fields.get(VALUE_FIELD).and_then(Field::as_int).ok_or_else(|| Envelope::vm_error(format!("{:?} has no integer value", this)))?;
        let (stored, returned) = update(current as i32);
        fields.insert(VALUE_FIELD.to_string(), Field::int(TypeKind::Int32, stored as i64));
        Ok(returned)
    })
}

fn current(this: &ObjectRef) -> Result<i32, Envelope> {
    update(this, |value| (value, value as i64)).map(|value| value as i32)
}

fn init_zero(args: &[Value]) -> BridgeResult {
    args.non_null_at(0)?.set(VALUE_FIELD, TypeKind::Int32, FieldValue::Int(0));
    Ok(None)
}

fn init_with_value(args: &[Value]) -> BridgeResult {
    let initial = args.int_at(1)? as i32;
    args.non_null_at(0)?.set(VALUE_FIELD, TypeKind::Int32, FieldValue::Int(initial as i64));
    Ok(None)
}

fn get(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from(current(args.non_null_at(0)?)?)))
}

fn set(args: &[Value]) -> BridgeResult {
    let new_value = args.int_at(1)? as i32;
    update(args.non_null_at(0)?, |_| (new_value, 0))?;
    Ok(None)
}

fn get_and_set(args: &[Value]) -> BridgeResult {
    let new_value = args.int_at(1)? as i32;
    Ok(Some(Value::Int(update(args.non_null_at(0)?, |old| (new_value, old as i64))?)))
}

fn get_and_add_by(args: &[Value], delta: i32) -> BridgeResult {
    Ok(Some(Value::Int(update(args.non_null_at(0)?, |old| (old.wrapping_add(delta), old as i64))?)))
}

fn add_by_and_get(args: &[Value], delta: i32) -> BridgeResult {
    Ok(Some(Value::Int(update(args.non_null_at(0)?, |old| {
        let new_value = old.wrapping_add(delta);
        (new_value, new_value as i64)
    })?)))
}

fn get_and_increment(args: &[Value]) -> BridgeResult {
    get_and_add_by(args, 1)
}

fn get_and_decrement(args: &[Value]) -> BridgeResult {
    get_and_add_by(args, -1)
}

fn increment_and_get(args: &[Value]) -> BridgeResult {
    add_by_and_get(args, 1)
}

fn decrement_and_get(args: &[Value]) -> BridgeResult {
    add_by_and_get(args, -1)
}

fn get_and_add(args: &[Value]) -> BridgeResult {
    get_and_add_by(args, args.int_at(1)? as i32)
}

fn add_and_get(args: &[Value]) -> BridgeResult {
    add_by_and_get(args, args.int_at(1)? as i32)
}

fn compare_and_set(args: &[Value]) -> BridgeResult {
    let expected = args.int_at(1)? as i32;
    let new_value = args.int_at(2)? as i32;
    let swapped = update(args.non_null_at(0)?, |old| {
        if old == expected { (new_value, 1) } else { (old, 0) }
    })?;
    Ok(Some(Value::Int(swapped)))
}

fn long_value(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Int(current(args.non_null_at(0)?)? as i64)))
}

fn double_value(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Float(current(args.non_null_at(0)?)? as f64)))
}

fn to_string(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(object_of_string(current(args.non_null_at(0)?)?.to_string().as_str()))))
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("<clinit>()V", BridgeMethod::new(0, clinit_generic)),
        ("<init>()V", BridgeMethod::new(0, init_zero)),
        ("<init>(I)V", BridgeMethod::new(1, init_with_value)),
        ("get()I", BridgeMethod::new(0, get)),
        ("getPlain()I", BridgeMethod::new(0, get)),
        ("set(I)V", BridgeMethod::new(1, set)),
        ("lazySet(I)V", BridgeMethod::new(1, set)),
        ("getAndSet(I)I", BridgeMethod::new(1, get_and_set)),
        ("getAndIncrement()I", BridgeMethod::new(0, get_and_increment)),
        ("getAndDecrement()I", BridgeMethod::new(0, get_and_decrement)),
        ("incrementAndGet()I", BridgeMethod::new(0, increment_and_get)),
        ("decrementAndGet()I", BridgeMethod::new(0, decrement_and_get)),
        ("getAndAdd(I)I", BridgeMethod::new(1, get_and_add)),
        ("addAndGet(I)I", BridgeMethod::new(1, add_and_get)),
        ("compareAndSet(II)Z", BridgeMethod::new(2, compare_and_set)),
        ("weakCompareAndSetPlain(II)Z", BridgeMethod::new(2, compare_and_set)),
        ("intValue()I", BridgeMethod::new(0, get)),
        ("longValue()J", BridgeMethod::new(0, long_value)),
        ("doubleValue()D", BridgeMethod::new(0, double_value)),
        ("toString()Ljava/lang/String;", BridgeMethod::new(0, to_string)),
        ("getAndUpdate(Ljava/util/function/IntUnaryOperator;)I", BridgeMethod::new(1, trap_function)),
        ("updateAndGet(Ljava/util/function/IntUnaryOperator;)I", BridgeMethod::new(1, trap_function)),
        ("getAndAccumulate(ILjava/util/function/IntBinaryOperator;)I", BridgeMethod::new(2, trap_function)),
        ("accumulateAndGet(ILjava/util/function/IntBinaryOperator;)I", BridgeMethod::new(2, trap_function)),
    ]);
}

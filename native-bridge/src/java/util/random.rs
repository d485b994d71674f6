//! `java.util.Random`'s 48-bit linear congruential generator, so seeded sequences match the JDK.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use bridge_object::object::{Field, FieldValue, ObjectRef, VALUE_FIELD};
use bridge_object::type_kind::TypeKind;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/util/Random";

const MULTIPLIER: i64 = 0x5DEECE66D;
const ADDEND: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;
const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

static SEED_UNIQUIFIER: AtomicI64 = AtomicI64::new(8682522807148012);

fn scramble(seed: i64) -> i64 {
    (seed ^ MULTIPLIER) & MASK
}

fn fresh_seed() -> i64 {
    let uniquifier = SEED_UNIQUIFIER.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| Some(current.wrapping_mul(1181783497276652981)))
        .unwrap_or_else(|current| current)
        .wrapping_mul(1181783497276652981);
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_nanos() as i64).unwrap_or(0);
    uniquifier ^ nanos
}

fn set_state(this: &ObjectRef, seed: i64) {
    this.set(VALUE_FIELD, TypeKind::RngState, FieldValue::RngState(scramble(seed)));
}

/// Advances the generator held on the receiver and returns its next `bits` bits.
fn next_bits(this: &ObjectRef, bits: u32) -> Result<i32, Envelope> {
    this.with_fields_mut(|fields| match fields.get_mut(VALUE_FIELD) {
        Some(Field { value: FieldValue::RngState(state), .. }) => {
            *state = state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
            Ok((*state >> (48 - bits)) as i32)
        }
        _ => Err(Envelope::vm_error(format!("{:?} has no generator state", this))),
    })
}

fn next_int_bounded(this: &ObjectRef, bound: i32) -> Result<i32, Envelope> {
    if bound <= 0 {
        return Err(Envelope::illegal_argument("bound must be positive"));
    }
    let mut random = next_bits(this, 31)?;
    let mask = bound - 1;
    if bound & mask == 0 {
        return Ok(((bound as i64 * random as i64) >> 31) as i32);
    }
    let mut candidate = random;
    loop {
        random = candidate % bound;
        if candidate.wrapping_sub(random).wrapping_add(mask) >= 0 {
            return Ok(random);
        }
        candidate = next_bits(this, 31)?;
    }
}

fn init(args: &[Value]) -> BridgeResult {
    set_state(args.non_null_at(0)?, fresh_seed());
    Ok(None)
}

fn init_with_seed(args: &[Value]) -> BridgeResult {
    set_state(args.non_null_at(0)?, args.int_at(1)?);
    Ok(None)
}

fn set_seed(args: &[Value]) -> BridgeResult {
    init_with_seed(args)
}

fn next_int(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from(next_bits(args.non_null_at(0)?, 32)?)))
}

fn next_int_with_bound(args: &[Value]) -> BridgeResult {
    let bound = args.int_at(1)? as i32;
    Ok(Some(Value::from(next_int_bounded(args.non_null_at(0)?, bound)?)))
}

fn next_long(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let high = next_bits(this, 32)? as i64;
    let low = next_bits(this, 32)? as i64;
    Ok(Some(Value::Int((high << 32).wrapping_add(low))))
}

fn next_boolean(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(next_bits(args.non_null_at(0)?, 1)? != 0)))
}

fn next_double(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let high = next_bits(this, 26)? as i64;
    let low = next_bits(this, 27)? as i64;
    Ok(Some(Value::Float(((high << 27) + low) as f64 * DOUBLE_UNIT)))
}

fn next_float(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Float((next_bits(args.non_null_at(0)?, 24)? as f32 * FLOAT_UNIT) as f64)))
}

/// Each `nextInt` fills up to four bytes, low byte first.
fn next_bytes(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let buffer = args.non_null_at(1)?;
    let length = match buffer.field_value(VALUE_FIELD) {
        Some(FieldValue::Bytes(bytes)) => bytes.len(),
        _ => return Err(Envelope::vm_error("nextBytes: expected a byte array")),
    };
    let mut filled = Vec::with_capacity(length);
    while filled.len() < length {
        let mut random = next_bits(this, 32)?;
        for _ in 0..(length - filled.len()).min(4) {
            filled.push(random as i8);
            random >>= 8;
        }
    }
    buffer.set(VALUE_FIELD, TypeKind::ByteArray, FieldValue::Bytes(filled));
    Ok(None)
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("<init>()V", BridgeMethod::new(0, init)),
        ("<init>(J)V", BridgeMethod::new(2, init_with_seed)),
        ("setSeed(J)V", BridgeMethod::new(2, set_seed)),
        ("nextInt()I", BridgeMethod::new(0, next_int)),
        ("nextInt(I)I", BridgeMethod::new(1, next_int_with_bound)),
        ("nextLong()J", BridgeMethod::new(0, next_long)),
        ("nextBoolean()Z", BridgeMethod::new(0, next_boolean)),
        ("nextDouble()D", BridgeMethod::new(0, next_double)),
        ("nextFloat()F", BridgeMethod::new(0, next_float)),
        ("nextBytes([B)V", BridgeMethod::new(1, next_bytes)),
    ]);
}

#[cfg(test)]
pub mod test {
    use bridge_common::exception_kind::ExceptionKind;
    use bridge_object::arrays::{byte_array_contents, make_byte_array_from};
    use bridge_object::object::ObjectRef;
    use bridge_object::value::Value;

    use crate::java::util::random::{init, init_with_seed, next_bytes, next_double, next_int, next_int_with_bound, set_seed};

    fn seeded(seed: i64) -> Value {
        let obj = ObjectRef::new("java/util/Random");
        init_with_seed(&[Value::Object(obj.clone()), Value::Int(seed)]).unwrap();
        Value::Object(obj)
    }

    fn int(value: Option<Value>) -> i64 {
        value.unwrap().as_int().unwrap()
    }

    #[test]
    pub fn matches_jdk_sequences() {
        assert_eq!(int(next_int(&[seeded(42)]).unwrap()), -1170105035);
        assert_eq!(int(next_int(&[seeded(0)]).unwrap()), -1155484576);
    }

    #[test]
    pub fn reseeding_restarts_the_sequence() {
        let rng = seeded(7);
        let first = int(next_int(&[rng.clone()]).unwrap());
        next_int(&[rng.clone()]).unwrap();
        set_seed(&[rng.clone(), Value::Int(7)]).unwrap();
        assert_eq!(int(next_int(&[rng]).unwrap()), first);
    }

    #[test]
    pub fn bounded_ints() {
        let rng = seeded(1234);
        for bound in [1, 2, 7, 16, 1000] {
            for _ in 0..50 {
                let value = int(next_int_with_bound(&[rng.clone(), Value::Int(bound)]).unwrap());
                assert!((0..bound).contains(&value));
            }
        }
        assert_eq!(next_int_with_bound(&[rng.clone(), Value::Int(0)]).unwrap_err().kind, ExceptionKind::IllegalArgumentException);
        assert_eq!(next_int_with_bound(&[rng, Value::Int(-3)]).unwrap_err().kind, ExceptionKind::IllegalArgumentException);
    }

    #[test]
    pub fn doubles_in_unit_interval() {
        let rng = seeded(99);
        for _ in 0..100 {
            let value = next_double(&[rng.clone()]).unwrap().unwrap().as_float().unwrap();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    pub fn bytes_fill_the_whole_buffer() {
        let first = seeded(5);
        let second = seeded(5);
        let buffer = make_byte_array_from(vec![0; 7]);
        next_bytes(&[first, Value::Object(buffer.clone())]).unwrap();
        let random = int(next_int(&[second]).unwrap()) as i32;
        let bytes = byte_array_contents(&buffer).unwrap();
        assert_eq!(bytes.len(), 7);
        assert_eq!(bytes[0], random as i8);
        assert_eq!(bytes[1], (random >> 8) as i8);
    }

    #[test]
    pub fn unseeded_generators_differ() {
        let first = ObjectRef::new("java/util/Random");
        let second = ObjectRef::new("java/util/Random");
        init(&[Value::Object(first.clone())]).unwrap();
        init(&[Value::Object(second.clone())]).unwrap();
        let a = (0..4).map(|_| int(next_int(&[Value::Object(first.clone())]).unwrap())).collect::<Vec<_>>();
        let b = (0..4).map(|_| int(next_int(&[Value::Object(second.clone())]).unwrap())).collect::<Vec<_>>();
        assert_ne!(a, b);
    }
}

use std::collections::HashMap;

use lazy_static::lazy_static;
use parking_lot::Mutex;

use bridge_object::arrays::{byte_array_contents, char_array_contents, make_byte_array_from, make_char_array_from};
use bridge_object::class_objects::java_visible_name;
use bridge_object::object::{FieldValue, ObjectRef};
use bridge_object::strings::{HASH_FIELD, HASH_IS_ZERO_FIELD, is_string_object, object_of_string, object_of_utf16, set_string_contents, utf16_of_object};
use bridge_object::type_kind::TypeKind;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::helpers::clinit_generic;
use crate::java::lang::boxed::java_double_to_string;
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/lang/String";

lazy_static! {
    static ref INTERNED: Mutex<HashMap<Vec<u16>, ObjectRef>> = Mutex::new(HashMap::new());
}

fn units_of(obj: &ObjectRef) -> Result<Vec<u16>, Envelope> {
    utf16_of_object(obj).ok_or_else(|| Envelope::vm_error(format!("{:?} has no string contents", obj)))
}

fn receiver_units(args: &[Value]) -> Result<Vec<u16>, Envelope> {
    units_of(args.non_null_at(0)?)
}

fn string_value(units: &[u16]) -> BridgeResult {
    Ok(Some(Value::Object(object_of_utf16(units))))
}

fn rust_string_value(string: &str) -> BridgeResult {
    Ok(Some(Value::Object(object_of_string(string))))
}

/// `String.equals` on two arbitrary references, also used for collection membership.
pub fn objects_equal(left: &ObjectRef, right: &ObjectRef) -> bool {
    if left.ptr_eq(right) {
        return true;
    }
    if !is_string_object(left) || !is_string_object(right) {
        return false;
    }
    utf16_of_object(left) == utf16_of_object(right)
}

pub fn java_hash(units: &[u16]) -> i32 {
    units.iter().fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(*unit as i32))
}

fn check_range(begin: i64, end: i64, length: usize) -> Result<(usize, usize), Envelope> {
    if begin < 0 || end > length as i64 || begin > end {
        return Err(Envelope::index_out_of_bounds(format!("begin {}, end {}, length {}", begin, end, length)));
    }
    Ok((begin as usize, end as usize))
}

fn init_empty(args: &[Value]) -> BridgeResult {
    set_string_contents(args.non_null_at(0)?, &[]);
    Ok(None)
}

/// Decodes with the platform default charset, UTF-8.
fn init_from_bytes(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let bytes = byte_array_contents(args.non_null_at(1)?).ok_or_else(|| Envelope::vm_error("expected a byte array"))?;
    let decoded = String::from_utf8_lossy(bytes.iter().map(|byte| *byte as u8).collect::<Vec<_>>().as_slice()).into_owned();
    set_string_contents(this, decoded.encode_utf16().collect::<Vec<_>>().as_slice());
    Ok(None)
}

fn init_from_chars(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let chars = char_array_contents(args.non_null_at(1)?).ok_or_else(|| Envelope::vm_error("expected a char array"))?;
    set_string_contents(this, chars.as_slice());
    Ok(None)
}

fn init_from_string(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let original = units_of(args.non_null_at(1)?)?;
    set_string_contents(this, original.as_slice());
    Ok(None)
}

fn length(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from(receiver_units(args)?.len() as i64)))
}

fn is_empty(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(receiver_units(args)?.is_empty())))
}

fn char_at(args: &[Value]) -> BridgeResult {
    let units = receiver_units(args)?;
    let index = args.int_at(1)?;
    if index < 0 || index as usize >= units.len() {
        return Err(Envelope::index_out_of_bounds(format!("index {}, length {}", index, units.len())));
    }
    Ok(Some(Value::Int(units[index as usize] as i64)))
}

fn concat(args: &[Value]) -> BridgeResult {
    let mut units = receiver_units(args)?;
    units.extend(units_of(args.non_null_at(1)?)?);
    string_value(units.as_slice())
}

fn equals(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    Ok(Some(Value::from_bool(objects_equal(this, args.object_at(1)?))))
}

/// Computes the hash once and caches it in the object's `hash`/`hashIsZero` fields.
fn hash_code(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    if let Some(cached) = this.int_field(HASH_FIELD).filter(|hash| *hash != 0) {
        return Ok(Some(Value::Int(cached)));
    }
    let hash = java_hash(units_of(this)?.as_slice());
    this.set(HASH_FIELD, TypeKind::Int32, FieldValue::Int(hash as i64));
    this.set(HASH_IS_ZERO_FIELD, TypeKind::Boolean, FieldValue::Int((hash == 0) as i64));
    Ok(Some(Value::from(hash)))
}

fn receiver_string(args: &[Value]) -> Result<String, Envelope> {
    args.string_at(0)
}

fn to_upper_case(args: &[Value]) -> BridgeResult {
    rust_string_value(receiver_string(args)?.to_uppercase().as_str())
}

fn to_lower_case(args: &[Value]) -> BridgeResult {
    rust_string_value(receiver_string(args)?.to_lowercase().as_str())
}

/// Strips every unit at or below U+0020 from both ends.
fn trim(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let units = units_of(this)?;
    let begin = units.iter().position(|unit| *unit > 0x20).unwrap_or(units.len());
    let end = units.iter().rposition(|unit| *unit > 0x20).map(|last| last + 1).unwrap_or(begin);
    if begin == 0 && end == units.len() {
        return Ok(Some(Value::Object(this.clone())));
    }
    string_value(&units[begin..end])
}

fn get_bytes(args: &[Value]) -> BridgeResult {
    let bytes = receiver_string(args)?.as_bytes().iter().map(|byte| *byte as i8).collect();
    Ok(Some(Value::Object(make_byte_array_from(bytes))))
}

fn to_char_array(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(make_char_array_from(receiver_units(args)?))))
}

fn substring_from(args: &[Value]) -> BridgeResult {
    let units = receiver_units(args)?;
    let (begin, end) = check_range(args.int_at(1)?, units.len() as i64, units.len())?;
    string_value(&units[begin..end])
}

fn substring_range(args: &[Value]) -> BridgeResult {
    let units = receiver_units(args)?;
    let (begin, end) = check_range(args.int_at(1)?, args.int_at(2)?, units.len())?;
    string_value(&units[begin..end])
}

fn index_of_string(args: &[Value]) -> BridgeResult {
    let units = receiver_units(args)?;
    let needle = units_of(args.non_null_at(1)?)?;
    let found = if needle.is_empty() {
        Some(0)
    } else {
        units.windows(needle.len()).position(|window| window == needle.as_slice())
    };
    Ok(Some(Value::from(found.map(|index| index as i64).unwrap_or(-1))))
}

fn index_of_char(args: &[Value]) -> BridgeResult {
    let units = receiver_units(args)?;
    let needle = args.int_at(1)?;
    let found = match u32::try_from(needle).ok().and_then(char::from_u32) {
        Some(ch) if ch.len_utf16() == 2 => {
            let mut pair = [0u16; 2];
            ch.encode_utf16(&mut pair);
            units.windows(2).position(|window| window == &pair[..])
        }
        _ => units.iter().position(|unit| *unit as i64 == needle),
    };
    Ok(Some(Value::from(found.map(|index| index as i64).unwrap_or(-1))))
}

fn value_of_int(args: &[Value]) -> BridgeResult {
    rust_string_value(args.int_at(0)?.to_string().as_str())
}

fn value_of_boolean(args: &[Value]) -> BridgeResult {
    rust_string_value(if args.int_at(0)? != 0 { "true" } else { "false" })
}

fn value_of_char(args: &[Value]) -> BridgeResult {
    string_value(&[args.int_at(0)? as u16])
}

fn value_of_double(args: &[Value]) -> BridgeResult {
    rust_string_value(java_double_to_string(args.float_at(0)?).as_str())
}

fn value_of_object(args: &[Value]) -> BridgeResult {
    let obj = args.object_at(0)?;
    if obj.is_null() {
        return rust_string_value("null");
    }
    if is_string_object(obj) {
        return Ok(Some(Value::Object(obj.clone())));
    }
    let rendered = format!("{}@{:x}", java_visible_name(obj.class_name().as_ref()), obj.identity_hash());
    rust_string_value(rendered.as_str())
}

/// Returns the canonical object for these contents, registering the receiver if it is the first.
fn intern(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let units = units_of(this)?;
    let canonical = INTERNED.lock().entry(units).or_insert_with(|| this.clone()).clone();
    Ok(Some(Value::Object(canonical)))
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("<clinit>()V", BridgeMethod::new(0, clinit_generic)),
        ("<init>()V", BridgeMethod::new(0, init_empty)),
        ("<init>([B)V", BridgeMethod::new(1, init_from_bytes)),
        ("<init>([C)V", BridgeMethod::new(1, init_from_chars)),
        ("<init>(Ljava/lang/String;)V", BridgeMethod::new(1, init_from_string)),
        ("length()I", BridgeMethod::new(0, length)),
        ("isEmpty()Z", BridgeMethod::new(0, is_empty)),
        ("charAt(I)C", BridgeMethod::new(1, char_at)),
        ("concat(Ljava/lang/String;)Ljava/lang/String;", BridgeMethod::new(1, concat)),
        ("equals(Ljava/lang/Object;)Z", BridgeMethod::new(1, equals)),
        ("hashCode()I", BridgeMethod::new(0, hash_code)),
        ("toUpperCase()Ljava/lang/String;", BridgeMethod::new(0, to_upper_case)),
        ("toLowerCase()Ljava/lang/String;", BridgeMethod::new(0, to_lower_case)),
        ("trim()Ljava/lang/String;", BridgeMethod::new(0, trim)),
        ("getBytes()[B", BridgeMethod::new(0, get_bytes)),
        ("toCharArray()[C", BridgeMethod::new(0, to_char_array)),
        ("substring(I)Ljava/lang/String;", BridgeMethod::new(1, substring_from)),
        ("substring(II)Ljava/lang/String;", BridgeMethod::new(2, substring_range)),
        ("indexOf(Ljava/lang/String;)I", BridgeMethod::new(1, index_of_string)),
        ("indexOf(I)I", BridgeMethod::new(1, index_of_char)),
        ("valueOf(I)Ljava/lang/String;", BridgeMethod::new(1, value_of_int)),
        ("valueOf(J)Ljava/lang/String;", BridgeMethod::new(2, value_of_int)),
        ("valueOf(Z)Ljava/lang/String;", BridgeMethod::new(1, value_of_boolean)),
        ("valueOf(C)Ljava/lang/String;", BridgeMethod::new(1, value_of_char)),
        ("valueOf(D)Ljava/lang/String;", BridgeMethod::new(2, value_of_double)),
        ("valueOf(Ljava/lang/Object;)Ljava/lang/String;", BridgeMethod::new(1, value_of_object)),
        ("intern()Ljava/lang/String;", BridgeMethod::new(0, intern)),
    ]);
}

#[cfg(test)]
pub mod test {
    use bridge_common::exception_kind::ExceptionKind;
    use bridge_object::arrays::{byte_array_contents, make_char_array_from};
    use bridge_object::object::ObjectRef;
    use bridge_object::strings::{object_of_string, string_of_object};
    use bridge_object::value::Value;

    use crate::envelope::BridgeResult;
    use crate::java::lang::string::{char_at, concat, equals, get_bytes, hash_code, index_of_char, index_of_string, init_from_chars, intern, java_hash, substring_range, trim, value_of_boolean, value_of_double, value_of_int};

    fn s(string: &str) -> Value {
        Value::Object(object_of_string(string))
    }

    fn text(result: BridgeResult) -> String {
        string_of_object(result.unwrap().unwrap().as_object().unwrap()).unwrap()
    }

    #[test]
    pub fn construct_from_chars() {
        let this = ObjectRef::new("java/lang/String");
        init_from_chars(&[Value::Object(this.clone()), Value::Object(make_char_array_from("hey".encode_utf16().collect()))]).unwrap();
        assert_eq!(string_of_object(&this).unwrap(), "hey");
    }

    #[test]
    pub fn basic_queries() {
        assert_eq!(char_at(&[s("abc"), Value::Int(1)]).unwrap().unwrap().as_int(), Some('b' as i64));
        assert_eq!(char_at(&[s("abc"), Value::Int(3)]).unwrap_err().kind, ExceptionKind::IndexOutOfBoundsException);
        assert_eq!(text(concat(&[s("foo"), s("bar")])), "foobar");
        assert_eq!(concat(&[s("foo"), Value::null()]).unwrap_err().kind, ExceptionKind::NullPointerException);
        assert_eq!(index_of_string(&[s("hello"), s("ll")]).unwrap().unwrap().as_int(), Some(2));
        assert_eq!(index_of_string(&[s("hello"), s("z")]).unwrap().unwrap().as_int(), Some(-1));
        assert_eq!(text(substring_range(&[s("hello"), Value::Int(1), Value::Int(3)])), "el");
        assert_eq!(substring_range(&[s("hello"), Value::Int(3), Value::Int(1)]).unwrap_err().kind, ExceptionKind::IndexOutOfBoundsException);
        assert_eq!(text(trim(&[s("  padded \t\n")])), "padded");
        assert_eq!(text(trim(&[s("   ")])), "");
        let bytes = get_bytes(&[s("h\u{e9}")]).unwrap().unwrap();
        assert_eq!(byte_array_contents(bytes.as_object().unwrap()).unwrap().len(), 3);
    }

    #[test]
    pub fn equality_and_hashing() {
        assert_eq!(equals(&[s("a"), s("a")]).unwrap().unwrap().as_int(), Some(1));
        assert_eq!(equals(&[s("a"), Value::null()]).unwrap().unwrap().as_int(), Some(0));
        assert_eq!(equals(&[s("a"), Value::Object(ObjectRef::new("java/lang/Object"))]).unwrap().unwrap().as_int(), Some(0));
        assert_eq!(java_hash(&"hello".encode_utf16().collect::<Vec<_>>()), 99162322);
        assert_eq!(hash_code(&[s("hello")]).unwrap().unwrap().as_int(), Some(99162322));
        assert_eq!(hash_code(&[s("")]).unwrap().unwrap().as_int(), Some(0));
    }

    #[test]
    pub fn value_of() {
        assert_eq!(text(value_of_int(&[Value::Int(-12)])), "-12");
        assert_eq!(text(value_of_boolean(&[Value::Int(1)])), "true");
        assert_eq!(text(value_of_double(&[Value::Float(2.0)])), "2.0");
    }

    #[test]
    pub fn intern_returns_first_registered() {
        let first = object_of_string("interned-in-string-test");
        let second = object_of_string("interned-in-string-test");
        let a = intern(&[Value::Object(first.clone())]).unwrap().unwrap();
        let b = intern(&[Value::Object(second)]).unwrap().unwrap();
        assert!(a.as_object().unwrap().ptr_eq(&first));
        assert!(b.as_object().unwrap().ptr_eq(&first));
    }

    #[test]
    pub fn index_of_supplementary_code_point() {
        let emoji = s("a\u{1F600}b\u{1F600}");
        assert_eq!(index_of_char(&[emoji.clone(), Value::Int(0x1F600)]).unwrap().unwrap().as_int(), Some(1));
        assert_eq!(index_of_char(&[emoji.clone(), Value::Int('b' as i64)]).unwrap().unwrap().as_int(), Some(3));
        // a lone surrogate still matches a single unit
        assert_eq!(index_of_char(&[emoji.clone(), Value::Int(0xD83D)]).unwrap().unwrap().as_int(), Some(1));
        assert_eq!(index_of_char(&[s("abc"), Value::Int(0x1F600)]).unwrap().unwrap().as_int(), Some(-1));
        assert_eq!(index_of_char(&[emoji, Value::Int(-1)]).unwrap().unwrap().as_int(), Some(-1));
    }
}

use std::collections::HashMap;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use lazy_static::lazy_static;

use bridge_common::exception_kind::ExceptionKind;
use bridge_object::arrays::{element_storable, is_array};
use bridge_object::class_objects::java_visible_name;
use bridge_object::object::{FieldValue, ObjectRef, VALUE_FIELD};
use bridge_object::strings::object_of_string;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::helpers::{clinit_generic, just_return};
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/lang/System";

lazy_static! {
    static ref START: Instant = Instant::now();
    static ref SYSTEM_PROPERTIES: HashMap<&'static str, String> = system_properties();
}

fn system_properties() -> HashMap<&'static str, String> {
    let mut properties = HashMap::new();
    let os_name = match std::env::consts::OS {
        "linux" => "Linux".to_string(),
        "macos" => "Mac OS X".to_string(),
        "windows" => "Windows".to_string(),
        other => other.to_string(),
    };
    properties.insert("os.name", os_name);
    properties.insert("os.arch", std::env::consts::ARCH.to_string());
    properties.insert("file.separator", std::path::MAIN_SEPARATOR.to_string());
    properties.insert("path.separator", if cfg!(windows) { ";" } else { ":" }.to_string());
    properties.insert("line.separator", line_separator().to_string());
    properties.insert("file.encoding", "UTF-8".to_string());
    properties.insert("java.io.tmpdir", std::env::temp_dir().to_string_lossy().into_owned());
    if let Ok(dir) = std::env::current_dir() {
        properties.insert("user.dir", dir.to_string_lossy().into_owned());
    }
    if let Ok(home) = std::env::var("HOME") {
        properties.insert("user.home", home);
    }
    if let Ok(user) = std::env::var("USER") {
        properties.insert("user.name", user);
    }
    properties
}

fn line_separator() -> &'static str {
    if cfg!(windows) { "\r\n" } else { "\n" }
}

pub fn system_property(key: &str) -> Option<&'static str> {
    SYSTEM_PROPERTIES.get(key).map(|value| value.as_str())
}

fn current_time_millis(_args: &[Value]) -> BridgeResult {
    let millis = SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_millis() as i64).unwrap_or(0);
    Ok(Some(Value::Int(millis)))
}

fn nano_time(_args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Int(START.elapsed().as_nanos() as i64)))
}

fn identity_hash_code(args: &[Value]) -> BridgeResult {
    let obj = args.object_at(0)?;
    Ok(Some(Value::from(if obj.is_null() { 0 } else { obj.identity_hash() })))
}

fn get_line_separator(_args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(object_of_string(line_separator()))))
}

fn property_key(args: &[Value]) -> Result<String, Envelope> {
    let key = args.string_at(0)?;
    if key.is_empty() {
        return Err(Envelope::illegal_argument("key can't be empty"));
    }
    Ok(key)
}

fn get_property(args: &[Value]) -> BridgeResult {
    let key = property_key(args)?;
    let value = system_property(key.as_str()).map(object_of_string).unwrap_or_else(ObjectRef::null);
    Ok(Some(Value::Object(value)))
}

fn get_property_or_default(args: &[Value]) -> BridgeResult {
    let key = property_key(args)?;
    let value = match system_property(key.as_str()) {
        Some(value) => object_of_string(value),
        None => args.object_at(1)?.clone(),
    };
    Ok(Some(Value::Object(value)))
}

fn getenv(args: &[Value]) -> BridgeResult {
    let name = args.string_at(0)?;
    let value = std::env::var(name).map(|value| object_of_string(value.as_str())).unwrap_or_else(|_| ObjectRef::null());
    Ok(Some(Value::Object(value)))
}

fn array_store(message: impl Into<String>) -> Envelope {
    Envelope::new(ExceptionKind::ArrayStoreException, message)
}

fn array_index(message: impl Into<String>) -> Envelope {
    Envelope::new(ExceptionKind::ArrayIndexOutOfBoundsException, message)
}

/// Copies `length` elements out of `src[start..]`. Arrays of different element storage are an
/// `ArrayStoreException`.
fn copy_range(src: &FieldValue, start: usize, length: usize) -> FieldValue {
    let range = start..start + length;
    match src {
        FieldValue::Bytes(elems) => FieldValue::Bytes(elems[range].to_vec()),
        FieldValue::Chars(elems) => FieldValue::Chars(elems[range].to_vec()),
        FieldValue::Ints(elems) => FieldValue::Ints(elems[range].to_vec()),
        FieldValue::Floats(elems) => FieldValue::Floats(elems[range].to_vec()),
        FieldValue::Refs(elems) => FieldValue::Refs(elems[range].to_vec()),
        other => other.clone(),
    }
}

fn store_range(dest: &mut FieldValue, start: usize, elements: FieldValue) -> Result<(), Envelope> {
    match (dest, elements) {
        (FieldValue::Bytes(dest), FieldValue::Bytes(src)) => dest[start..start + src.len()].copy_from_slice(src.as_slice()),
        (FieldValue::Chars(dest), FieldValue::Chars(src)) => dest[start..start + src.len()].copy_from_slice(src.as_slice()),
        (FieldValue::Ints(dest), FieldValue::Ints(src)) => dest[start..start + src.len()].copy_from_slice(src.as_slice()),
        (FieldValue::Floats(dest), FieldValue::Floats(src)) => dest[start..start + src.len()].copy_from_slice(src.as_slice()),
        (FieldValue::Refs(dest), FieldValue::Refs(src)) => dest[start..start + src.len()].clone_from_slice(src.as_slice()),
        _ => return Err(array_store("arraycopy: type mismatch")),
    }
    Ok(())
}

fn array_storage(array: &ObjectRef) -> Result<FieldValue, Envelope> {
    array.field_value(VALUE_FIELD).ok_or_else(|| array_store(format!("arraycopy: {} has no elements", array.class_name())))
}

fn storage_length(storage: &FieldValue) -> Option<usize> {
    Some(match storage {
        FieldValue::Bytes(elems) => elems.len(),
        FieldValue::Chars(elems) => elems.len(),
        FieldValue::Ints(elems) => elems.len(),
        FieldValue::Floats(elems) => elems.len(),
        FieldValue::Refs(elems) => elems.len(),
        _ => return None,
    })
}

/// `System.arraycopy(src, srcPos, dest, destPos, length)`. Overlapping copies within one array
/// behave as if through a temporary buffer.
fn arraycopy(args: &[Value]) -> BridgeResult {
    let src = args.object_at(0)?;
    let src_pos = args.int_at(1)?;
    let dest = args.object_at(2)?;
    let dest_pos = args.int_at(3)?;
    let length = args.int_at(4)?;
    if src.is_null() || dest.is_null() {
        return Err(Envelope::null_pointer("arraycopy: null array"));
    }
    if !is_array(src) {
        return Err(array_store(format!("arraycopy: source type {} is not an array", src.class_name())));
    }
    if !is_array(dest) {
        return Err(array_store(format!("arraycopy: destination type {} is not an array", dest.class_name())));
    }
    let src_is_primitive = !matches!(src.class_name().as_bytes().get(1), Some(b'L') | Some(b'['));
    let dest_is_primitive = !matches!(dest.class_name().as_bytes().get(1), Some(b'L') | Some(b'['));
    if (src_is_primitive || dest_is_primitive) && src.class_name() != dest.class_name() {
        return Err(array_store(format!("arraycopy: type mismatch: can not copy {}[] into {}[]", src.class_name(), dest.class_name())));
    }
    let src_storage = array_storage(src)?;
    let src_len = storage_length(&src_storage).ok_or_else(|| array_store("arraycopy: source has no elements"))?;
    let dest_len = array_storage(dest).ok().as_ref().and_then(storage_length).ok_or_else(|| array_store("arraycopy: destination has no elements"))?;
    if src_pos < 0 || dest_pos < 0 || length < 0 || src_pos + length > src_len as i64 || dest_pos + length > dest_len as i64 {
        return Err(array_index(format!("arraycopy: last source index {} out of bounds for length {}", src_pos + length, src_len)));
    }
    // elements before the first one the destination rejects are still copied
    let dest_class = dest.class_name();
    let (elements, rejected) = match copy_range(&src_storage, src_pos as usize, length as usize) {
        FieldValue::Refs(refs) if src.class_name() != dest_class => match refs.iter().position(|element| !element_storable(&dest_class, element)) {
            Some(bad) => (FieldValue::Refs(refs[..bad].to_vec()), Some(refs[bad].class_name())),
            None => (FieldValue::Refs(refs), None),
        },
        elements => (elements, None),
    };
    dest.with_fields_mut(|fields| match fields.get_mut(VALUE_FIELD) {
        Some(field) => store_range(&mut field.value, dest_pos as usize, elements),
        None => Err(array_store("arraycopy: destination has no elements")),
    })?;
    match rejected {
        Some(element_class) => Err(array_store(format!("arraycopy: element type mismatch: can not store {} in {}", java_visible_name(&element_class), java_visible_name(&dest_class)))),
        None => Ok(None),
    }
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("<clinit>()V", BridgeMethod::new(0, clinit_generic)),
        ("registerNatives()V", BridgeMethod::new(0, just_return)),
        ("currentTimeMillis()J", BridgeMethod::new(0, current_time_millis)),
        ("nanoTime()J", BridgeMethod::new(0, nano_time)),
        ("arraycopy(Ljava/lang/Object;ILjava/lang/Object;II)V", BridgeMethod::new(5, arraycopy)),
        ("identityHashCode(Ljava/lang/Object;)I", BridgeMethod::new(1, identity_hash_code)),
        ("lineSeparator()Ljava/lang/String;", BridgeMethod::new(0, get_line_separator)),
        ("getProperty(Ljava/lang/String;)Ljava/lang/String;", BridgeMethod::new(1, get_property)),
        ("getProperty(Ljava/lang/String;Ljava/lang/String;)Ljava/lang/String;", BridgeMethod::new(2, get_property_or_default)),
        ("getenv(Ljava/lang/String;)Ljava/lang/String;", BridgeMethod::new(1, getenv)),
    ]);
}

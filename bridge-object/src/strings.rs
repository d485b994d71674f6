use wtf8::Wtf8Buf;

use bridge_common::string_pool::StringId;

use crate::object::{FieldValue, ObjectRef, VALUE_FIELD};
use crate::type_kind::TypeKind;

pub const CODER_FIELD: &str = "coder";
pub const HASH_FIELD: &str = "hash";
pub const HASH_IS_ZERO_FIELD: &str = "hashIsZero";

pub const LATIN1: i64 = 0;
pub const UTF16: i64 = 1;

/// Fills the fields of a `java/lang/String` object. Compact Latin-1 storage is used when every
/// unit fits in a byte.
pub fn set_string_contents(obj: &ObjectRef, units: &[u16]) {
    if units.iter().all(|unit| *unit <= 0xFF) {
        let bytes = units.iter().map(|unit| *unit as u8 as i8).collect();
        obj.set(VALUE_FIELD, TypeKind::ByteArray, FieldValue::Bytes(bytes));
        obj.set(CODER_FIELD, TypeKind::Int8, FieldValue::Int(LATIN1));
    } else {
        obj.set(VALUE_FIELD, TypeKind::CharArray, FieldValue::Chars(units.to_vec()));
        obj.set(CODER_FIELD, TypeKind::Int8, FieldValue::Int(UTF16));
    }
    obj.set(HASH_FIELD, TypeKind::Int32, FieldValue::Int(0));
    obj.set(HASH_IS_ZERO_FIELD, TypeKind::Boolean, FieldValue::Int(0));
}

pub fn object_of_utf16(units: &[u16]) -> ObjectRef {
    let obj = ObjectRef::with_class(StringId::JAVA_LANG_STRING);
    set_string_contents(&obj, units);
    obj
}

pub fn object_of_string(string: &str) -> ObjectRef {
    object_of_utf16(string.encode_utf16().collect::<Vec<_>>().as_slice())
}

pub fn object_of_wtf8(string: &Wtf8Buf) -> ObjectRef {
    object_of_utf16(string.to_ill_formed_utf16().collect::<Vec<_>>().as_slice())
}

pub fn is_string_object(obj: &ObjectRef) -> bool {
    !obj.is_null() && obj.class() == StringId::JAVA_LANG_STRING
}

/// Code units of a string object, whichever form its `value` field is in.
pub fn utf16_of_object(obj: &ObjectRef) -> Option<Vec<u16>> {
    if obj.is_null() {
        return None;
    }
    obj.with_fields(|fields| match &fields.get(VALUE_FIELD)?.value {
        FieldValue::Bytes(bytes) => Some(bytes.iter().map(|byte| *byte as u8 as u16).collect()),
        FieldValue::Chars(chars) => Some(chars.clone()),
        _ => None,
    })
}

/// Unpaired surrogates become U+FFFD.
pub fn string_of_object(obj: &ObjectRef) -> Option<String> {
    let units = utf16_of_object(obj)?;
    Some(Wtf8Buf::from_ill_formed_utf16(units.as_slice()).into_string_lossy())
}

/// Raw bytes of a byte-valued field interpreted as UTF-8, e.g. the path stored on a `java/io/File`.
pub fn string_of_byte_field(obj: &ObjectRef, field_name: &str) -> Option<String> {
    match obj.field_value(field_name)? {
        FieldValue::Bytes(bytes) => Some(String::from_utf8_lossy(bytes.iter().map(|byte| *byte as u8).collect::<Vec<_>>().as_slice()).into_owned()),
        _ => None,
    }
}

pub fn bytes_of_string(string: &str) -> Vec<i8> {
    string.as_bytes().iter().map(|byte| *byte as i8).collect()
}

#[cfg(test)]
pub mod test {
    use wtf8::Wtf8Buf;

    use crate::object::{ObjectRef, VALUE_FIELD};
    use crate::strings::{bytes_of_string, CODER_FIELD, is_string_object, LATIN1, object_of_string, object_of_utf16, object_of_wtf8, string_of_byte_field, string_of_object, UTF16, utf16_of_object};
    use crate::type_kind::TypeKind;

    #[test]
    pub fn latin1_strings_are_compact() {
        let obj = object_of_string("caf\u{e9}");
        assert!(is_string_object(&obj));
        assert_eq!(obj.int_field(CODER_FIELD), Some(LATIN1));
        assert_eq!(obj.get_field(VALUE_FIELD).unwrap().kind, TypeKind::ByteArray);
        assert_eq!(string_of_object(&obj).unwrap(), "caf\u{e9}");
    }

    #[test]
    pub fn wide_strings_use_utf16() {
        let obj = object_of_string("\u{3b1}\u{1F600}");
        assert_eq!(obj.int_field(CODER_FIELD), Some(UTF16));
        assert_eq!(obj.get_field(VALUE_FIELD).unwrap().kind, TypeKind::CharArray);
        assert_eq!(utf16_of_object(&obj).unwrap().len(), 3);
        assert_eq!(string_of_object(&obj).unwrap(), "\u{3b1}\u{1F600}");
    }

    #[test]
    pub fn lone_surrogates_do_not_fail() {
        let obj = object_of_utf16(&[0x61, 0xD800]);
        assert_eq!(string_of_object(&obj).unwrap(), "a\u{FFFD}");
        assert_eq!(utf16_of_object(&obj).unwrap(), vec![0x61, 0xD800]);
    }

    #[test]
    pub fn from_wtf8() {
        let obj = object_of_wtf8(&Wtf8Buf::from_str("hello"));
        assert_eq!(string_of_object(&obj).unwrap(), "hello");
    }

    #[test]
    pub fn null_and_non_strings() {
        assert_eq!(string_of_object(&ObjectRef::null()), None);
        assert_eq!(string_of_object(&ObjectRef::new("java/lang/Object")), None);
        assert!(!is_string_object(&ObjectRef::null()));
    }

    #[test]
    pub fn byte_fields() {
        let obj = ObjectRef::new("java/io/File");
        obj.set("FilePath", TypeKind::ByteArray, crate::object::FieldValue::Bytes(bytes_of_string("/tmp/x")));
        assert_eq!(string_of_byte_field(&obj, "FilePath").unwrap(), "/tmp/x");
        assert_eq!(string_of_byte_field(&obj, "missing"), None);
    }
}

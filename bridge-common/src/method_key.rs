use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::descriptor_parser::{DescriptorError, MethodDescriptor, parse_method_descriptor};

/// Shape check applied to every key at bind time. Only looks for the separators,
/// so `a.b(c)d` passes even though `c` is not a descriptor.
pub fn validate_key(key: &str) -> bool {
    key.contains('.') && key.contains('(') && key.contains(')') && !key.ends_with(')')
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum MethodKeyError {
    #[error("malformed method key `{0}`")]
    Malformed(String),
    #[error("method key `{key}` has an empty class or method name")]
    EmptyName { key: String },
    #[error("method key `{key}` has a bad descriptor")]
    Descriptor {
        key: String,
        #[source]
        source: DescriptorError,
    },
}

/// A parsed `class.method(params)ret` key.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct MethodKey {
    pub class_name: String,
    pub method_name: String,
    pub descriptor: MethodDescriptor,
}

impl MethodKey {
    pub fn parse(key: &str) -> Result<Self, MethodKeyError> {
        if !validate_key(key) {
            return Err(MethodKeyError::Malformed(key.to_string()));
        }
        let open_paren = key.find('(').ok_or_else(|| MethodKeyError::Malformed(key.to_string()))?;
        let (class_and_method, descriptor) = key.split_at(open_paren);
        let dot = class_and_method.rfind('.').ok_or_else(|| MethodKeyError::Malformed(key.to_string()))?;
        let class_name = &class_and_method[..dot];
        let method_name = &class_and_method[dot + 1..];
        if class_name.is_empty() || method_name.is_empty() {
            return Err(MethodKeyError::EmptyName { key: key.to_string() });
        }
        let descriptor = parse_method_descriptor(descriptor).map_err(|source| MethodKeyError::Descriptor { key: key.to_string(), source })?;
        Ok(Self {
            class_name: class_name.to_string(),
            method_name: method_name.to_string(),
            descriptor,
        })
    }

    /// `name(params)ret`, the per-class half of the key.
    pub fn name_and_descriptor(&self) -> String {
        format!("{}{}", self.method_name, self.descriptor.jvm_representation())
    }

    pub fn parameter_slots(&self) -> usize {
        self.descriptor.parameter_slots()
    }

    pub fn is_initializer(&self) -> bool {
        self.method_name == "<init>" || self.method_name == "<clinit>"
    }
}

impl Display for MethodKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.class_name, self.name_and_descriptor())
    }
}

#[cfg(test)]
pub mod test {
    use crate::method_key::{MethodKey, MethodKeyError, validate_key};
    use crate::ptype::PType;

    #[test]
    pub fn key_validation() {
        assert!(!validate_key("java/lang/Object"));
        assert!(!validate_key("java/lang/Object.toString"));
        assert!(!validate_key("java/lang/Object.toString("));
        assert!(!validate_key("java/lang/Object.toString()"));
        assert!(!validate_key("badkey"));
        assert!(validate_key("java/lang/Object.toString(I)Ljava/lang/String;"));
        assert!(validate_key("java/lang/Object.<init>()V"));
    }

    #[test]
    pub fn parse_splits_at_last_dot_before_descriptor() {
        let key = MethodKey::parse("java/util/concurrent/atomic/AtomicInteger.getAndUpdate(Ljava/util/function/IntUnaryOperator;)I").unwrap();
        assert_eq!(key.class_name, "java/util/concurrent/atomic/AtomicInteger");
        assert_eq!(key.method_name, "getAndUpdate");
        assert_eq!(key.descriptor.return_type, PType::IntType);
        assert_eq!(key.name_and_descriptor(), "getAndUpdate(Ljava/util/function/IntUnaryOperator;)I");
        assert_eq!(key.to_string(), "java/util/concurrent/atomic/AtomicInteger.getAndUpdate(Ljava/util/function/IntUnaryOperator;)I");
    }

    #[test]
    pub fn parse_rejects_bad_keys() {
        assert_eq!(MethodKey::parse("badkey"), Err(MethodKeyError::Malformed("badkey".to_string())));
        assert!(matches!(MethodKey::parse(".foo()V"), Err(MethodKeyError::EmptyName { .. })));
        assert!(matches!(MethodKey::parse("a/B.foo(Q)V"), Err(MethodKeyError::Descriptor { .. })));
    }

    #[test]
    pub fn seek_takes_two_slots() {
        let key = MethodKey::parse("java/io/RandomAccessFile.seek(J)V").unwrap();
        assert_eq!(key.parameter_slots(), 2);
        assert!(!key.is_initializer());
    }
}

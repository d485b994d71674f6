use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use itertools::Itertools;
use log::warn;

use bridge_common::method_key::{MethodKey, validate_key};
use bridge_object::value::Value;

use crate::envelope::BridgeResult;

pub type BridgeFn = fn(&[Value]) -> BridgeResult;

#[derive(Copy, Clone)]
pub struct BridgeMethod {
    /// Operand stack slots of the declared parameters. The receiver is not counted.
    pub param_slots: usize,
    pub function: BridgeFn,
    /// Prepend the caller's invocation context to the argument vector.
    pub needs_context: bool,
    /// Serialize calls on the same receiver.
    pub thread_safe: bool,
}

impl BridgeMethod {
    pub fn new(param_slots: usize, function: BridgeFn) -> Self {
        Self { param_slots, function, needs_context: false, thread_safe: false }
    }

    pub fn with_context(self) -> Self {
        Self { needs_context: true, ..self }
    }

    pub fn thread_safe(self) -> Self {
        Self { thread_safe: true, ..self }
    }

    pub fn same_function(&self, function: BridgeFn) -> bool {
        self.function as usize == function as usize
    }
}

impl Debug for BridgeMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeMethod")
            .field("param_slots", &self.param_slots)
            .field("function", &(self.function as usize as *const ()))
            .field("needs_context", &self.needs_context)
            .field("thread_safe", &self.thread_safe)
            .finish()
    }
}

/// Method key to bridge function. Registration never validates; the binder does.
#[derive(Debug, Default)]
pub struct MethodSignatures {
    entries: HashMap<String, BridgeMethod>,
    loaded: bool,
}

impl MethodSignatures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins. Returns the entry that was replaced, if any.
    pub fn register(&mut self, key: impl Into<String>, method: BridgeMethod) -> Option<BridgeMethod> {
        self.entries.insert(key.into(), method)
    }

    pub fn lookup(&self, key: &str) -> Option<&BridgeMethod> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn validate(key: &str) -> bool {
        validate_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys_sorted(&self) -> Vec<&str> {
        self.entries.keys().map(|key| key.as_str()).sorted().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item=(&str, &BridgeMethod)> {
        self.entries.iter().map(|(key, method)| (key.as_str(), method))
    }

    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlotMismatch {
    pub key: String,
    pub registered: usize,
    /// `None` when the key's descriptor does not parse.
    pub expected: Option<usize>,
}

/// Every entry whose registered slot count disagrees with its descriptor.
pub fn check_slot_accounting(signatures: &MethodSignatures) -> Vec<SlotMismatch> {
    signatures.keys_sorted().into_iter().filter_map(|key| {
        let registered = signatures.lookup(key)?.param_slots;
        let expected = MethodKey::parse(key).ok().map(|parsed| parsed.parameter_slots());
        if expected == Some(registered) {
            return None;
        }
        warn!("slot count for {} is {} but its descriptor needs {:?}", key, registered, expected);
        Some(SlotMismatch { key: key.to_string(), registered, expected })
    }).collect()
}

#[cfg(test)]
pub mod test {
    use crate::helpers::{return_false, return_true};
    use crate::registry::{BridgeMethod, check_slot_accounting, MethodSignatures, SlotMismatch};

    #[test]
    pub fn overwrite_keeps_last() {
        let mut signatures = MethodSignatures::new();
        let key = "java/lang/Object.equals(Ljava/lang/Object;)Z";
        assert!(signatures.register(key, BridgeMethod::new(1, return_true)).is_none());
        let replaced = signatures.register(key, BridgeMethod::new(1, return_false)).unwrap();
        assert!(replaced.same_function(return_true));
        assert!(signatures.lookup(key).unwrap().same_function(return_false));
        assert_eq!(signatures.len(), 1);
    }

    #[test]
    pub fn registration_does_not_validate() {
        let mut signatures = MethodSignatures::new();
        signatures.register("badkey", BridgeMethod::new(0, return_true));
        assert!(signatures.contains("badkey"));
        assert!(!MethodSignatures::validate("badkey"));
    }

    #[test]
    pub fn flags() {
        let method = BridgeMethod::new(2, return_true).with_context().thread_safe();
        assert!(method.needs_context);
        assert!(method.thread_safe);
        assert_eq!(method.param_slots, 2);
    }

    #[test]
    pub fn slot_accounting_finds_mismatches() {
        let mut signatures = MethodSignatures::new();
        signatures.register("a/B.f(Ljava/lang/String;JZ)D", BridgeMethod::new(4, return_true));
        signatures.register("a/B.g(Ljava/lang/String;JZ)D", BridgeMethod::new(3, return_true));
        signatures.register("a/B.h(Q)V", BridgeMethod::new(1, return_true));
        let mismatches = check_slot_accounting(&signatures);
        assert_eq!(mismatches, vec![
            SlotMismatch { key: "a/B.g(Ljava/lang/String;JZ)D".to_string(), registered: 3, expected: Some(4) },
            SlotMismatch { key: "a/B.h(Q)V".to_string(), registered: 1, expected: None },
        ]);
    }

    #[test]
    pub fn loaded_flag() {
        let mut signatures = MethodSignatures::new();
        assert!(!signatures.is_loaded());
        signatures.mark_loaded();
        assert!(signatures.is_loaded());
    }
}

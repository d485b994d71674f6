use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, error};
use thiserror::Error;

use bridge_common::exception_kind::ExceptionKind;
use bridge_common::method_key::{MethodKey, validate_key};
use bridge_common::string_pool::{intern, StringId};

use crate::registry::{BridgeMethod, MethodSignatures};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MethodOrigin {
    Bridge,
}

impl MethodOrigin {
    pub fn tag(&self) -> char {
        match self {
            MethodOrigin::Bridge => 'G',
        }
    }
}

#[derive(Debug, Clone)]
pub struct MethodTableEntry {
    pub key: MethodKey,
    pub method: BridgeMethod,
    pub origin: MethodOrigin,
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum StartupError {
    #[error("InternalException: {} malformed method signature key(s): {}", .malformed.len(), .malformed.join(", "))]
    MalformedKeys { malformed: Vec<String> },
}

impl StartupError {
    pub fn exception_kind(&self) -> ExceptionKind {
        ExceptionKind::InternalException
    }
}

/// Per-class dispatch tables. Written once by `bind`, read-only afterwards.
#[derive(Debug, Default)]
pub struct MethodArea {
    by_key: HashMap<String, Arc<MethodTableEntry>>,
    by_class: HashMap<StringId, HashMap<String, Arc<MethodTableEntry>>>,
}

impl MethodArea {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, key: &str, parsed: MethodKey, method: BridgeMethod) {
        let class = intern(parsed.class_name.as_str());
        let name_and_descriptor = parsed.name_and_descriptor();
        let entry = Arc::new(MethodTableEntry { key: parsed, method, origin: MethodOrigin::Bridge });
        self.by_class.entry(class).or_default().insert(name_and_descriptor, entry.clone());
        self.by_key.insert(key.to_string(), entry);
    }

    pub fn resolve(&self, key: &str) -> Option<&MethodTableEntry> {
        self.by_key.get(key).map(|entry| entry.as_ref())
    }

    pub fn resolve_in_class(&self, class: StringId, name_and_descriptor: &str) -> Option<&MethodTableEntry> {
        self.by_class.get(&class)?.get(name_and_descriptor).map(|entry| entry.as_ref())
    }

    pub fn class_method_count(&self, class: StringId) -> usize {
        self.by_class.get(&class).map(|methods| methods.len()).unwrap_or(0)
    }

    pub fn class_count(&self) -> usize {
        self.by_class.len()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Copies every registry entry into `area`. A bad key does not stop the walk: all of them are
/// logged and reported together once it finishes.
pub fn bind(signatures: &MethodSignatures, area: &mut MethodArea) -> Result<usize, StartupError> {
    let mut malformed = vec![];
    let mut bound = 0;
    for key in signatures.keys_sorted() {
        let method = match signatures.lookup(key) {
            Some(method) => *method,
            None => continue,
        };
        if !validate_key(key) {
            error!("invalid method signature key: {}", key);
            malformed.push(key.to_string());
            continue;
        }
        match MethodKey::parse(key) {
            Ok(parsed) => {
                area.insert(key, parsed, method);
                bound += 1;
            }
            Err(err) => {
                error!("invalid method signature key: {}: {}", key, err);
                malformed.push(key.to_string());
            }
        }
    }
    if !malformed.is_empty() {
        return Err(StartupError::MalformedKeys { malformed });
    }
    debug!("bound {} bridge methods across {} classes", bound, area.class_count());
    Ok(bound)
}

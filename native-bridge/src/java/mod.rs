//! Bridge functions that actually implement JDK natives, grouped by package. Each class module
//! registers its own keys; loading order decides which entry wins when two modules name the same key.

use crate::registry::{BridgeMethod, MethodSignatures};

pub mod io;
pub mod lang;
pub mod util;

pub fn load_intrinsics(signatures: &mut MethodSignatures) {
    lang::load(signatures);
    io::load(signatures);
    util::load(signatures);
}

/// Registers `(name_and_descriptor, method)` pairs under `class_name`.
pub(crate) fn register_class<const N: usize>(signatures: &mut MethodSignatures, class_name: &str, methods: [(&str, BridgeMethod); N]) {
    for (name_and_descriptor, method) in methods {
        signatures.register(format!("{}.{}", class_name, name_and_descriptor), method);
    }
}

use log::debug;

use crate::java;
use crate::options::LoadMode;
use crate::registry::MethodSignatures;
use crate::test_probes;
use crate::traps;

/// Builds the registry. Traps go in first so that the intrinsic loaders overwrite them; whatever
/// is still a trap afterwards stays unsupported.
pub fn load_method_signatures(load_mode: LoadMode) -> MethodSignatures {
    let mut signatures = MethodSignatures::new();
    match load_mode {
        LoadMode::Full => {
            traps::load_traps(&mut signatures);
            debug!("trap phase registered {} entries", signatures.len());
            java::load_intrinsics(&mut signatures);
            debug!("implementation phase finished with {} entries", signatures.len());
        }
        LoadMode::TestOnly => {
            test_probes::load(&mut signatures);
            debug!("loaded {} test probe entries", signatures.len());
        }
    }
    signatures.mark_loaded();
    signatures
}

//! Stock bridge functions shared by the class loaders.

use log::trace;

use bridge_object::object::ObjectRef;
use bridge_object::value::Value;

use crate::envelope::BridgeResult;

/// Class initializers that have nothing to set up.
pub fn clinit_generic(args: &[Value]) -> BridgeResult {
    trace!("generic class initializer called with {} argument(s)", args.len());
    Ok(None)
}

pub fn just_return(_args: &[Value]) -> BridgeResult {
    Ok(None)
}

pub fn return_null(_args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Object(ObjectRef::null())))
}

pub fn return_true(_args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(true)))
}

pub fn return_false(_args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(false)))
}

#[cfg(test)]
pub mod test {
    use crate::helpers::{clinit_generic, just_return, return_false, return_null, return_true};
    use crate::registry::{BridgeFn, BridgeMethod};

    #[test]
    pub fn helpers_are_distinct_functions() {
        let helpers: [BridgeFn; 5] = [clinit_generic, just_return, return_null, return_true, return_false];
        for (i, first) in helpers.iter().enumerate() {
            for (j, second) in helpers.iter().enumerate() {
                assert_eq!(BridgeMethod::new(0, *first).same_function(*second), i == j);
            }
        }
    }

    #[test]
    pub fn results() {
        assert!(clinit_generic(&[]).unwrap().is_none());
        assert!(just_return(&[]).unwrap().is_none());
        assert!(return_null(&[]).unwrap().unwrap().is_null());
        assert_eq!(return_true(&[]).unwrap().unwrap().as_int(), Some(1));
        assert_eq!(return_false(&[]).unwrap().unwrap().as_int(), Some(0));
    }
}

use std::io::Write;
use std::sync::Arc;

use bridge_common::exception_kind::ExceptionKind;
use bridge_common::method_key::{MethodKey, validate_key};
use bridge_common::string_pool::{intern, lookup};
use bridge_object::context::{ContextRef, FrameStack};
use bridge_object::object::{FieldValue, ObjectRef};
use bridge_object::strings::{bytes_of_string, object_of_string, string_of_object};
use bridge_object::type_kind::TypeKind;
use native_bridge::bridge::Bridge;
use native_bridge::helpers::just_return;
use native_bridge::invoke::{CallKind, InvokeOutcome, OperandStack, Slot};
use native_bridge::loader::load_method_signatures;
use native_bridge::method_area::StartupError;
use native_bridge::options::{BridgeOptions, LoadMode};
use native_bridge::registry::{BridgeMethod, check_slot_accounting, MethodSignatures};
use native_bridge::traps::{trap_deprecated, trap_function};

fn full_bridge() -> Bridge {
    Bridge::start(BridgeOptions::default()).unwrap()
}

fn main_context() -> ContextRef {
    Arc::new(FrameStack::main_thread())
}

fn raised_kind(outcome: InvokeOutcome) -> ExceptionKind {
    match outcome {
        InvokeOutcome::Raised(envelope) => envelope.kind,
        other => panic!("expected an exception, got {:?}", other),
    }
}

fn pop_string(stack: &mut OperandStack) -> String {
    match stack.pop() {
        Some(Slot::Ref(obj)) => string_of_object(&obj).unwrap(),
        other => panic!("expected a string reference, got {:?}", other),
    }
}

#[test]
fn deprecated_constructor_is_trapped() {
    let bridge = full_bridge();
    let key = "java/rmi/RMISecurityManager.<init>()V";
    assert!(bridge.signatures().lookup(key).unwrap().same_function(trap_deprecated));
    let mut stack = OperandStack::new();
    match bridge.invoke(key, CallKind::Static, &mut stack, &main_context()) {
        InvokeOutcome::Raised(envelope) => {
            assert_eq!(envelope.kind, ExceptionKind::UnsupportedOperationException);
            assert!(envelope.message.contains("deprecated"));
        }
        other => panic!("expected the deprecation trap, got {:?}", other),
    }
}

#[test]
fn seek_pops_receiver_and_both_long_slots() {
    let bridge = full_bridge();
    let context = main_context();
    let mut source = tempfile::NamedTempFile::new().unwrap();
    source.write_all(b"abc").unwrap();

    let raf = ObjectRef::new("java/io/RandomAccessFile");
    let mut stack = OperandStack::new();
    stack.push_ref(raf.clone());
    stack.push_ref(object_of_string(source.path().to_str().unwrap()));
    stack.push_ref(object_of_string("r"));
    assert_eq!(bridge.invoke("java/io/RandomAccessFile.<init>(Ljava/lang/String;Ljava/lang/String;)V", CallKind::Instance, &mut stack, &context), InvokeOutcome::Void);
    assert!(stack.is_empty());

    stack.push_int(7);
    stack.push_ref(raf.clone());
    stack.push_long(0x0000_0000_FFFF_FFFF);
    assert_eq!(stack.len(), 4);
    assert_eq!(bridge.invoke("java/io/RandomAccessFile.seek(J)V", CallKind::Instance, &mut stack, &context), InvokeOutcome::Void);
    assert_eq!(stack.len(), 1);

    stack.push_ref(raf);
    assert_eq!(bridge.invoke("java/io/RandomAccessFile.getFilePointer()J", CallKind::Instance, &mut stack, &context), InvokeOutcome::Pushed { slots: 2 });
    assert!(matches!(stack.pop(), Some(Slot::Int(0xFFFF_FFFF))));
    assert!(matches!(stack.pop(), Some(Slot::Int(0xFFFF_FFFF))));
    assert!(matches!(stack.pop(), Some(Slot::Int(7))));
}

#[test]
fn blanket_trapped_class_stays_trapped() {
    let bridge = full_bridge();
    let key = "java/nio/file/Files.exists(Ljava/nio/file/Path;[Ljava/nio/file/LinkOption;)Z";
    assert!(bridge.signatures().lookup(key).unwrap().same_function(trap_function));
    let mut stack = OperandStack::new();
    stack.push_null();
    stack.push_null();
    assert_eq!(raised_kind(bridge.invoke(key, CallKind::Static, &mut stack, &main_context())), ExceptionKind::UnsupportedOperationException);
}

#[test]
fn instance_receiver_comes_first() {
    let bridge = full_bridge();
    let file = ObjectRef::new("java/io/File");
    file.set("FilePath", TypeKind::ByteArray, FieldValue::Bytes(bytes_of_string("/tmp/x")));
    let mut stack = OperandStack::new();
    stack.push_ref(file);
    assert_eq!(bridge.invoke("java/io/File.getPath()Ljava/lang/String;", CallKind::Instance, &mut stack, &main_context()), InvokeOutcome::Pushed { slots: 1 });
    assert_eq!(pop_string(&mut stack), "/tmp/x");
    assert!(stack.is_empty());
}

#[test]
fn malformed_keys_fail_startup_after_the_full_walk() {
    let mut signatures = load_method_signatures(LoadMode::Full);
    signatures.register("badkey", BridgeMethod::new(0, just_return));
    signatures.register("also.bad", BridgeMethod::new(0, just_return));
    signatures.register("java/lang/Fine.method(Lbroken)V", BridgeMethod::new(1, just_return));
    match Bridge::from_signatures(BridgeOptions::default(), signatures) {
        Ok(_) => panic!("startup should have failed"),
        Err(err) => {
            assert_eq!(err.exception_kind(), ExceptionKind::InternalException);
            let StartupError::MalformedKeys { malformed } = &err;
            assert_eq!(malformed.len(), 3);
            assert!(malformed.contains(&"badkey".to_string()));
            assert!(err.to_string().starts_with("InternalException: 3 malformed"));
        }
    }
}

#[test]
fn every_registered_entry_has_matching_slots() {
    let signatures = load_method_signatures(LoadMode::Full);
    assert!(check_slot_accounting(&signatures).is_empty());
    for (key, method) in signatures.iter() {
        let parsed = MethodKey::parse(key).unwrap();
        assert_eq!(parsed.parameter_slots(), method.param_slots, "{}", key);
    }
}

#[test]
fn slot_mismatch_is_a_vm_error_at_call_time() {
    let mut signatures = MethodSignatures::new();
    signatures.register("bridge/test/Wrong.take(J)V", BridgeMethod::new(1, just_return));
    let bridge = Bridge::from_signatures(BridgeOptions::test_only(), signatures).unwrap();
    assert_eq!(check_slot_accounting(bridge.signatures()).len(), 1);
    let mut stack = OperandStack::new();
    stack.push_long(1);
    assert_eq!(raised_kind(bridge.invoke("bridge/test/Wrong.take(J)V", CallKind::Static, &mut stack, &main_context())), ExceptionKind::VirtualMachineError);
}

#[test]
fn every_key_validates() {
    let signatures = load_method_signatures(LoadMode::Full);
    assert!(signatures.len() > 200);
    for key in signatures.keys_sorted() {
        assert!(validate_key(key), "{}", key);
    }
    for bad in ["badkey", "a.b", "a.b(", "a.b()", "ab()V"] {
        assert!(!validate_key(bad), "{}", bad);
    }
}

#[test]
fn later_registration_wins() {
    let mut signatures = MethodSignatures::new();
    let key = "bridge/test/Overwrite.run()V";
    signatures.register(key, BridgeMethod::new(0, trap_function));
    let previous = signatures.register(key, BridgeMethod::new(0, just_return));
    assert!(previous.unwrap().same_function(trap_function));
    assert!(signatures.lookup(key).unwrap().same_function(just_return));
    assert_eq!(signatures.len(), 1);
}

#[test]
fn interning_is_idempotent() {
    for string in ["", "java/lang/Object", "bridge/test/Interned", "\u{3b1}\u{3b2}"] {
        let id = intern(string);
        assert_eq!(intern(string), id);
        assert_eq!(lookup(id).as_ref(), string);
    }
}

fn assert_null_pointer(bridge: &Bridge, key: &str, call_kind: CallKind, mut stack: OperandStack) {
    assert_eq!(raised_kind(bridge.invoke(key, call_kind, &mut stack, &main_context())), ExceptionKind::NullPointerException, "{}", key);
    assert!(stack.is_empty(), "{}", key);
}

fn single_null() -> OperandStack {
    let mut stack = OperandStack::new();
    stack.push_null();
    stack
}

#[test]
fn null_sentinel_is_a_null_pointer_exception() {
    let bridge = full_bridge();
    assert_null_pointer(&bridge, "java/lang/Class.getPrimitiveClass(Ljava/lang/String;)Ljava/lang/Class;", CallKind::Static, single_null());
    assert_null_pointer(&bridge, "java/lang/System.getProperty(Ljava/lang/String;)Ljava/lang/String;", CallKind::Static, single_null());
    assert_null_pointer(&bridge, "java/lang/String.length()I", CallKind::Instance, single_null());

    let mut copy_from_null = OperandStack::new();
    copy_from_null.push_null();
    copy_from_null.push_int(0);
    copy_from_null.push_null();
    copy_from_null.push_int(0);
    copy_from_null.push_int(0);
    assert_null_pointer(&bridge, "java/lang/System.arraycopy(Ljava/lang/Object;ILjava/lang/Object;II)V", CallKind::Static, copy_from_null);

    let mut file_from_null = OperandStack::new();
    file_from_null.push_ref(ObjectRef::new("java/io/File"));
    file_from_null.push_null();
    assert_null_pointer(&bridge, "java/io/File.<init>(Ljava/lang/String;)V", CallKind::Instance, file_from_null);

    // String.valueOf(Object) renders null instead of raising
    let mut stack = single_null();
    assert_eq!(bridge.invoke("java/lang/String.valueOf(Ljava/lang/Object;)Ljava/lang/String;", CallKind::Static, &mut stack, &main_context()), InvokeOutcome::Pushed { slots: 1 });
    assert_eq!(pop_string(&mut stack), "null");
}

#[test]
fn absent_keys_are_no_such_method() {
    let bridge = full_bridge();
    let mut stack = OperandStack::new();
    assert_eq!(raised_kind(bridge.invoke("java/lang/Nowhere.nothing()V", CallKind::Static, &mut stack, &main_context())), ExceptionKind::NoSuchMethodException);
}

#[test]
fn bound_entries_are_grouped_by_class() {
    let bridge = full_bridge();
    let area = bridge.method_area();
    assert_eq!(area.len(), bridge.signatures().len());
    let entry = bridge.resolve("java/lang/Math.max(JJ)J").unwrap();
    assert_eq!(entry.origin.tag(), 'G');
    assert!(area.resolve_in_class(intern("java/lang/Math"), "max(JJ)J").is_some());
    assert!(area.class_method_count(intern("java/lang/Math")) >= 19);
}

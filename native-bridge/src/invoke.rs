use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use by_address::ByAddress;
use log::{trace, warn};
use parking_lot::Mutex;

use bridge_common::descriptor_parser::MethodDescriptor;
use bridge_common::ptype::PType;
use bridge_object::context::ContextRef;
use bridge_object::object::ObjectRef;
use bridge_object::type_kind::PrimitiveKind;
use bridge_object::value::Value;

use crate::envelope::{BridgeResult, Envelope};
use crate::method_area::MethodTableEntry;
use crate::options::BridgeOptions;

/// One operand stack slot as the interpreter hands it over. `long` and `double` occupy two
/// identical slots.
#[derive(Debug, Clone)]
pub enum Slot {
    Int(i64),
    Float(f64),
    Ref(ObjectRef),
    Null,
}

#[derive(Debug, Clone, Default)]
pub struct OperandStack {
    slots: Vec<Slot>,
}

impl OperandStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, slot: Slot) {
        self.slots.push(slot);
    }

    pub fn pop(&mut self) -> Option<Slot> {
        self.slots.pop()
    }

    pub fn push_int(&mut self, int: i32) {
        self.push(Slot::Int(int as i64));
    }

    pub fn push_long(&mut self, long: i64) {
        self.push(Slot::Int(long));
        self.push(Slot::Int(long));
    }

    pub fn push_float(&mut self, float: f32) {
        self.push(Slot::Float(float as f64));
    }

    pub fn push_double(&mut self, double: f64) {
        self.push(Slot::Float(double));
        self.push(Slot::Float(double));
    }

    pub fn push_ref(&mut self, obj: ObjectRef) {
        self.push(Slot::Ref(obj));
    }

    pub fn push_null(&mut self) {
        self.push(Slot::Null);
    }

    pub fn peek(&self) -> Option<&Slot> {
        self.slots.last()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CallKind {
    Static,
    Instance,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvokeOutcome {
    Void,
    Pushed { slots: usize },
    Raised(Envelope),
}

/// Per-receiver locks for bridge methods flagged thread safe.
#[derive(Default)]
pub struct ReceiverLocks {
    locks: Mutex<HashMap<ByAddress<ObjectRef>, Arc<Mutex<()>>>>,
}

impl ReceiverLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lock<T>(&self, receiver: &ObjectRef, with: impl FnOnce() -> T) -> T {
        let key = ByAddress(receiver.clone());
        let lock = self.locks.lock().entry(key.clone()).or_default().clone();
        let res = {
            let _guard = lock.lock();
            with()
        };
        let mut locks = self.locks.lock();
        // map entry plus our clone: nobody else is waiting on it
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&key);
        }
        res
    }

    pub fn held(&self) -> usize {
        self.locks.lock().len()
    }
}

fn pop_slot(stack: &mut OperandStack) -> Result<Slot, Envelope> {
    stack.pop().ok_or_else(|| Envelope::vm_error("operand stack underflow while collecting bridge arguments"))
}

fn slot_to_value(slot: Slot, ptype: &PType, index: usize) -> Result<Value, Envelope> {
    match (slot, ptype) {
        (Slot::Int(raw), ptype) if !ptype.is_reference() => {
            let kind = PrimitiveKind::from_ptype(ptype).filter(|kind| !kind.is_floating())
                .ok_or_else(|| Envelope::vm_error(format!("parameter {} is {} but the slot holds an integer", index, ptype.jvm_representation())))?;
            Ok(Value::Int(kind.widen(raw)))
        }
        (Slot::Float(float), PType::FloatType | PType::DoubleType) => Ok(Value::Float(float)),
        (Slot::Ref(obj), PType::Ref(_)) => Ok(Value::Object(obj)),
        (Slot::Null, PType::Ref(_)) => Ok(Value::null()),
        (slot, ptype) => Err(Envelope::vm_error(format!("parameter {} is {} but the slot holds {:?}", index, ptype.jvm_representation(), slot))),
    }
}

/// Pops the declared parameters (and the receiver for instance calls) and builds the
/// argument vector `[context?, receiver?, arg0, arg1, ...]`.
pub fn pop_arguments(descriptor: &MethodDescriptor, call_kind: CallKind, context: Option<&ContextRef>, stack: &mut OperandStack) -> Result<Vec<Value>, Envelope> {
    let mut params = Vec::with_capacity(descriptor.parameter_types.len());
    for (index, ptype) in descriptor.parameter_types.iter().enumerate().rev() {
        if ptype.is_wide() {
            // upper slot of the pair is a copy
            pop_slot(stack)?;
        }
        params.push(slot_to_value(pop_slot(stack)?, ptype, index)?);
    }
    params.reverse();

    let mut args = Vec::with_capacity(params.len() + 2);
    if let Some(context) = context {
        args.push(Value::Context(context.clone()));
    }
    if call_kind == CallKind::Instance {
        match pop_slot(stack)? {
            Slot::Ref(receiver) if !receiver.is_null() => args.push(Value::Object(receiver)),
            Slot::Ref(_) | Slot::Null => return Err(Envelope::null_pointer("instance bridge method invoked on null")),
            other => return Err(Envelope::vm_error(format!("receiver slot holds {:?}", other))),
        }
    }
    args.extend(params);
    Ok(args)
}

/// Pushes a bridge function's result at the width of `return_type`. Returns slots pushed.
pub fn push_result(return_type: &PType, result: Option<Value>, check_return_kinds: bool, stack: &mut OperandStack) -> Result<usize, Envelope> {
    let value = match result {
        None => {
            if check_return_kinds && !return_type.is_void() {
                return Err(Envelope::vm_error(format!("bridge function returned nothing for return type {}", return_type.jvm_representation())));
            }
            return Ok(0);
        }
        Some(value) => value,
    };
    match (value, return_type) {
        (value, PType::VoidType) => {
            if check_return_kinds {
                return Err(Envelope::vm_error(format!("bridge function returned {:?} from a void method", value)));
            }
            Ok(0)
        }
        (Value::Int(int), PType::LongType) => {
            stack.push_long(int);
            Ok(2)
        }
        (Value::Int(int), ptype) if ptype.is_primitive() => {
            let kind = PrimitiveKind::from_ptype(ptype).filter(|kind| !kind.is_floating())
                .ok_or_else(|| Envelope::vm_error(format!("bridge function returned an integer for return type {}", ptype.jvm_representation())))?;
            stack.push(Slot::Int(kind.widen(int)));
            Ok(1)
        }
        (Value::Float(float), PType::DoubleType) => {
            stack.push_double(float);
            Ok(2)
        }
        (Value::Float(float), PType::FloatType) => {
            stack.push_float(float as f32);
            Ok(1)
        }
        (Value::Object(obj), PType::Ref(_)) => {
            stack.push_ref(obj);
            Ok(1)
        }
        (value, ptype) => Err(Envelope::vm_error(format!("bridge function returned {:?} for return type {}", value, ptype.jvm_representation()))),
    }
}

fn call_catching_panics(entry: &MethodTableEntry, args: &[Value]) -> BridgeResult {
    catch_unwind(AssertUnwindSafe(|| (entry.method.function)(args))).unwrap_or_else(|payload| {
        let reason = payload.downcast_ref::<&str>().map(|reason| reason.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(Envelope::vm_error(format!("bridge function for {} panicked: {}", entry.key, reason)))
    })
}

/// Runs one bridge call against the interpreter's operand stack.
pub fn invoke_bridge(entry: &MethodTableEntry, call_kind: CallKind, stack: &mut OperandStack, context: &ContextRef, locks: &ReceiverLocks, options: &BridgeOptions) -> InvokeOutcome {
    let descriptor = &entry.key.descriptor;
    if descriptor.parameter_slots() != entry.method.param_slots {
        return InvokeOutcome::Raised(Envelope::vm_error(format!("{} is registered with {} parameter slots but its descriptor needs {}", entry.key, entry.method.param_slots, descriptor.parameter_slots())));
    }
    let needed = entry.method.param_slots + if call_kind == CallKind::Instance { 1 } else { 0 };
    if stack.len() < needed {
        return InvokeOutcome::Raised(Envelope::vm_error(format!("{} needs {} slots but the operand stack holds {}", entry.key, needed, stack.len())));
    }
    let context = if entry.method.needs_context { Some(context) } else { None };
    let args = match pop_arguments(descriptor, call_kind, context, stack) {
        Ok(args) => args,
        Err(envelope) => return InvokeOutcome::Raised(envelope),
    };
    if options.trace_invocations() {
        trace!("invoking bridge {} with {} argument(s)", entry.key, args.len());
    }

    let receiver = match call_kind {
        CallKind::Instance if entry.method.thread_safe => args.get(if entry.method.needs_context { 1 } else { 0 }).and_then(|arg| arg.as_object()).cloned(),
        _ => None,
    };
    let result = match receiver {
        Some(receiver) => locks.with_lock(&receiver, || call_catching_panics(entry, args.as_slice())),
        None => call_catching_panics(entry, args.as_slice()),
    };

    match result {
        Err(envelope) => {
            if envelope.kind.is_error() {
                warn!("bridge {} failed inside the vm: {}", entry.key, envelope);
            } else if options.trace_invocations() {
                trace!("bridge {} raised {}", entry.key, envelope);
            }
            InvokeOutcome::Raised(envelope)
        }
        Ok(value) => match push_result(&descriptor.return_type, value, options.check_return_kinds(), stack) {
            Ok(0) => InvokeOutcome::Void,
            Ok(slots) => InvokeOutcome::Pushed { slots },
            Err(envelope) => InvokeOutcome::Raised(envelope),
        },
    }
}

#[cfg(test)]
pub mod test {
    use std::sync::Arc;

    use bridge_common::descriptor_parser::parse_method_descriptor;
    use bridge_common::exception_kind::ExceptionKind;
    use bridge_common::ptype::PType;
    use bridge_object::context::{ContextRef, FrameStack};
    use bridge_object::object::ObjectRef;
    use bridge_object::value::Value;

    use crate::invoke::{CallKind, OperandStack, pop_arguments, push_result, ReceiverLocks, Slot};

    fn context() -> ContextRef {
        Arc::new(FrameStack::main_thread())
    }

    #[test]
    pub fn long_is_reassembled_from_two_slots() {
        let receiver = ObjectRef::new("java/io/RandomAccessFile");
        let mut stack = OperandStack::new();
        stack.push_ref(receiver.clone());
        stack.push_long(0x0000_0000_FFFF_FFFF);
        let descriptor = parse_method_descriptor("(J)V").unwrap();
        let args = pop_arguments(&descriptor, CallKind::Instance, None, &mut stack).unwrap();
        assert!(stack.is_empty());
        assert_eq!(args.len(), 2);
        assert!(args[0].as_object().unwrap().ptr_eq(&receiver));
        assert_eq!(args[1].as_int(), Some(0xFFFF_FFFF));
    }

    #[test]
    pub fn narrow_values_are_widened() {
        let mut stack = OperandStack::new();
        stack.push(Slot::Int(0xFF));
        stack.push(Slot::Int(0xFFFF));
        stack.push(Slot::Int(0xFFFF));
        stack.push(Slot::Int(1));
        stack.push(Slot::Null);
        let descriptor = parse_method_descriptor("(BCSZLjava/lang/Object;)V").unwrap();
        let args = pop_arguments(&descriptor, CallKind::Static, None, &mut stack).unwrap();
        assert_eq!(args[0].as_int(), Some(-1));
        assert_eq!(args[1].as_int(), Some(0xFFFF));
        assert_eq!(args[2].as_int(), Some(-1));
        assert_eq!(args[3].as_int(), Some(1));
        assert!(args[4].is_null());
    }

    #[test]
    pub fn context_goes_before_receiver() {
        let receiver = ObjectRef::new("java/lang/Thread");
        let mut stack = OperandStack::new();
        stack.push_ref(receiver.clone());
        stack.push_int(5);
        let descriptor = parse_method_descriptor("(I)V").unwrap();
        let context = context();
        let args = pop_arguments(&descriptor, CallKind::Instance, Some(&context), &mut stack).unwrap();
        assert!(args[0].as_context().is_some());
        assert!(args[1].as_object().unwrap().ptr_eq(&receiver));
        assert_eq!(args[2].as_int(), Some(5));
    }

    #[test]
    pub fn null_receiver_is_npe() {
        let mut stack = OperandStack::new();
        stack.push_null();
        let descriptor = parse_method_descriptor("()V").unwrap();
        let err = pop_arguments(&descriptor, CallKind::Instance, None, &mut stack).unwrap_err();
        assert_eq!(err.kind, ExceptionKind::NullPointerException);
    }

    #[test]
    pub fn slot_kind_mismatch() {
        let mut stack = OperandStack::new();
        stack.push(Slot::Float(1.0));
        let descriptor = parse_method_descriptor("(I)V").unwrap();
        assert_eq!(pop_arguments(&descriptor, CallKind::Static, None, &mut stack).unwrap_err().kind, ExceptionKind::VirtualMachineError);
    }

    #[test]
    pub fn results_are_narrowed_to_return_width() {
        let mut stack = OperandStack::new();
        assert_eq!(push_result(&PType::IntType, Some(Value::Int(0x1_0000_0001)), true, &mut stack).unwrap(), 1);
        assert!(matches!(stack.pop(), Some(Slot::Int(1))));
        assert_eq!(push_result(&PType::CharType, Some(Value::Int(-1)), true, &mut stack).unwrap(), 1);
        assert!(matches!(stack.pop(), Some(Slot::Int(0xFFFF))));
        assert_eq!(push_result(&PType::LongType, Some(Value::Int(-7)), true, &mut stack).unwrap(), 2);
        assert_eq!(stack.len(), 2);
        assert_eq!(push_result(&PType::DoubleType, Some(Value::Float(0.5)), true, &mut stack).unwrap(), 2);
        assert_eq!(stack.len(), 4);
        assert_eq!(push_result(&PType::VoidType, None, true, &mut stack).unwrap(), 0);
    }

    #[test]
    pub fn result_shape_mismatch() {
        let mut stack = OperandStack::new();
        let object_type = parse_method_descriptor("()Ljava/lang/Object;").unwrap().return_type;
        assert_eq!(push_result(&object_type, Some(Value::Int(1)), true, &mut stack).unwrap_err().kind, ExceptionKind::VirtualMachineError);
        assert_eq!(push_result(&PType::IntType, None, true, &mut stack).unwrap_err().kind, ExceptionKind::VirtualMachineError);
        assert_eq!(push_result(&PType::IntType, None, false, &mut stack).unwrap(), 0);
        assert_eq!(push_result(&PType::VoidType, Some(Value::Int(1)), true, &mut stack).unwrap_err().kind, ExceptionKind::VirtualMachineError);
        assert!(stack.is_empty());
    }

    #[test]
    pub fn receiver_locks_are_released() {
        let locks = ReceiverLocks::new();
        let receiver = ObjectRef::new("java/lang/Object");
        let res = locks.with_lock(&receiver, || {
            assert_eq!(locks.held(), 1);
            42
        });
        assert_eq!(res, 42);
        assert_eq!(locks.held(), 0);
    }
}

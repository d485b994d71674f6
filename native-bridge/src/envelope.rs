use thiserror::Error;

use bridge_common::exception_kind::ExceptionKind;
use bridge_object::context::ContextRef;
use bridge_object::object::ObjectRef;
use bridge_object::strings::string_of_object;
use bridge_object::value::Value;

/// A Java exception a bridge function wants raised, carried back as a value.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("{kind}: {message}")]
pub struct Envelope {
    pub kind: ExceptionKind,
    pub message: String,
}

impl Envelope {
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn null_pointer(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::NullPointerException, message)
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::IllegalArgumentException, message)
    }

    pub fn index_out_of_bounds(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::IndexOutOfBoundsException, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::IOException, message)
    }

    pub fn vm_error(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::VirtualMachineError, message)
    }

    pub fn java_class_name(&self) -> &'static str {
        self.kind.java_class_name()
    }
}

/// What every bridge function returns: a value, nothing (void), or an exception to raise.
pub type BridgeResult = Result<Option<Value>, Envelope>;

/// Typed access to an argument vector. Shape mismatches are VM errors, never panics.
pub trait Args {
    fn arg(&self, index: usize) -> Result<&Value, Envelope>;

    fn int_at(&self, index: usize) -> Result<i64, Envelope> {
        match self.arg(index)? {
            Value::Int(int) => Ok(*int),
            other => Err(Envelope::vm_error(format!("argument {} should be an integral value, found {:?}", index, other))),
        }
    }

    fn float_at(&self, index: usize) -> Result<f64, Envelope> {
        match self.arg(index)? {
            Value::Float(float) => Ok(*float),
            other => Err(Envelope::vm_error(format!("argument {} should be a floating point value, found {:?}", index, other))),
        }
    }

    fn object_at(&self, index: usize) -> Result<&ObjectRef, Envelope> {
        match self.arg(index)? {
            Value::Object(obj) => Ok(obj),
            other => Err(Envelope::vm_error(format!("argument {} should be a reference, found {:?}", index, other))),
        }
    }

    /// Like `object_at` but the null sentinel is a `NullPointerException`.
    fn non_null_at(&self, index: usize) -> Result<&ObjectRef, Envelope> {
        let obj = self.object_at(index)?;
        if obj.is_null() {
            return Err(Envelope::null_pointer(format!("argument {} is null", index)));
        }
        Ok(obj)
    }

    fn string_at(&self, index: usize) -> Result<String, Envelope> {
        let obj = self.non_null_at(index)?;
        string_of_object(obj).ok_or_else(|| Envelope::vm_error(format!("argument {} is a {} not a string", index, obj.class_name())))
    }

    fn context_at(&self, index: usize) -> Result<&ContextRef, Envelope> {
        match self.arg(index)? {
            Value::Context(context) => Ok(context),
            other => Err(Envelope::vm_error(format!("argument {} should be the invocation context, found {:?}", index, other))),
        }
    }
}

impl Args for [Value] {
    fn arg(&self, index: usize) -> Result<&Value, Envelope> {
        self.get(index).ok_or_else(|| Envelope::vm_error(format!("missing argument {}, only {} supplied", index, self.len())))
    }
}

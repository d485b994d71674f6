use crate::context::ContextRef;
use crate::object::ObjectRef;

/// One element of a bridge function's argument vector, or its return value.
///
/// Integral primitives of every width travel as `Int` (sign extended, char zero extended,
/// boolean as 0/1). `float` and `double` both travel as `Float`.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Object(ObjectRef),
    Context(ContextRef),
}

impl Value {
    pub fn null() -> Self {
        Value::Object(ObjectRef::null())
    }

    pub fn from_bool(b: bool) -> Self {
        Value::Int(b as i64)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(int) => Some(*int),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(float) => Some(*float),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_context(&self) -> Option<&ContextRef> {
        match self {
            Value::Context(context) => Some(context),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Object(obj) if obj.is_null())
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<i64> for Value {
    fn from(int: i64) -> Self {
        Value::Int(int)
    }
}

impl From<i32> for Value {
    fn from(int: i32) -> Self {
        Value::Int(int as i64)
    }
}

impl From<f64> for Value {
    fn from(float: f64) -> Self {
        Value::Float(float)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::from_bool(b)
    }
}

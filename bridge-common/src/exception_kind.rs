use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Every exception a bridge function can ask the interpreter to raise.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum ExceptionKind {
    NullPointerException,
    IllegalArgumentException,
    IndexOutOfBoundsException,
    ArrayIndexOutOfBoundsException,
    IOException,
    FileNotFoundException,
    ClassCastException,
    IllegalStateException,
    UnsupportedOperationException,
    NoSuchElementException,
    ConcurrentModificationException,
    NoSuchFieldException,
    NoSuchMethodException,
    NegativeArraySizeException,
    ArithmeticException,
    ArrayStoreException,
    IllegalThreadStateException,
    VirtualMachineError,
    RuntimeException,
    ClassNotFoundException,
    SecurityException,
    InterruptedException,
    NumberFormatException,
    CloneNotSupportedException,
    InternalException,
}

impl ExceptionKind {
    /// Internal-form name of the class the interpreter instantiates for this kind.
    pub fn java_class_name(&self) -> &'static str {
        match self {
            ExceptionKind::NullPointerException => "java/lang/NullPointerException",
            ExceptionKind::IllegalArgumentException => "java/lang/IllegalArgumentException",
            ExceptionKind::IndexOutOfBoundsException => "java/lang/IndexOutOfBoundsException",
            ExceptionKind::ArrayIndexOutOfBoundsException => "java/lang/ArrayIndexOutOfBoundsException",
            ExceptionKind::IOException => "java/io/IOException",
            ExceptionKind::FileNotFoundException => "java/io/FileNotFoundException",
            ExceptionKind::ClassCastException => "java/lang/ClassCastException",
            ExceptionKind::IllegalStateException => "java/lang/IllegalStateException",
            ExceptionKind::UnsupportedOperationException => "java/lang/UnsupportedOperationException",
            ExceptionKind::NoSuchElementException => "java/util/NoSuchElementException",
            ExceptionKind::ConcurrentModificationException => "java/util/ConcurrentModificationException",
            ExceptionKind::NoSuchFieldException => "java/lang/NoSuchFieldException",
            ExceptionKind::NoSuchMethodException => "java/lang/NoSuchMethodException",
            ExceptionKind::NegativeArraySizeException => "java/lang/NegativeArraySizeException",
            ExceptionKind::ArithmeticException => "java/lang/ArithmeticException",
            ExceptionKind::ArrayStoreException => "java/lang/ArrayStoreException",
            ExceptionKind::IllegalThreadStateException => "java/lang/IllegalThreadStateException",
            // VirtualMachineError itself is abstract
            ExceptionKind::VirtualMachineError => "java/lang/UnknownError",
            ExceptionKind::RuntimeException => "java/lang/RuntimeException",
            ExceptionKind::ClassNotFoundException => "java/lang/ClassNotFoundException",
            ExceptionKind::SecurityException => "java/lang/SecurityException",
            ExceptionKind::InterruptedException => "java/lang/InterruptedException",
            ExceptionKind::NumberFormatException => "java/lang/NumberFormatException",
            ExceptionKind::CloneNotSupportedException => "java/lang/CloneNotSupportedException",
            ExceptionKind::InternalException => "java/lang/InternalError",
        }
    }

    /// Errors the Java program is not expected to catch.
    pub fn is_error(&self) -> bool {
        matches!(self, ExceptionKind::VirtualMachineError | ExceptionKind::InternalException)
    }
}

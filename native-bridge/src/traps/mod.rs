//! Stubs installed before any real implementation so that unmodelled JDK methods fail with a
//! classified `UnsupportedOperationException` instead of a missing-method crash.

use bridge_common::exception_kind::ExceptionKind;
use bridge_common::method_key::MethodKey;
use bridge_object::value::Value;

use crate::envelope::{BridgeResult, Envelope};
use crate::registry::{BridgeFn, BridgeMethod, MethodSignatures};

pub mod java_io;
pub mod java_nio;

pub const CLASS_NOT_SUPPORTED: &str = "TRAP: The requested class is not yet supported";
pub const FUNCTION_NOT_SUPPORTED: &str = "TRAP: The requested function is not yet supported";
pub const DEPRECATED: &str = "TRAP: The requested class or function is deprecated and, therefore, not supported";
pub const UNDOCUMENTED: &str = "TRAP: The requested class or function is undocumented and, therefore, not supported";
pub const PROTECTED: &str = "TRAP: The requested function is protected";

fn unsupported(message: &str) -> BridgeResult {
    Err(Envelope::new(ExceptionKind::UnsupportedOperationException, message))
}

pub fn trap_class(_args: &[Value]) -> BridgeResult {
    unsupported(CLASS_NOT_SUPPORTED)
}

pub fn trap_function(_args: &[Value]) -> BridgeResult {
    unsupported(FUNCTION_NOT_SUPPORTED)
}

pub fn trap_deprecated(_args: &[Value]) -> BridgeResult {
    unsupported(DEPRECATED)
}

pub fn trap_undocumented(_args: &[Value]) -> BridgeResult {
    unsupported(UNDOCUMENTED)
}

pub fn trap_protected(_args: &[Value]) -> BridgeResult {
    unsupported(PROTECTED)
}

/// Registers `trap` under `key` with the slot count its descriptor implies.
pub fn register_trap(signatures: &mut MethodSignatures, key: &str, trap: BridgeFn) {
    let param_slots = MethodKey::parse(key).map(|parsed| parsed.parameter_slots()).unwrap_or(0);
    signatures.register(key, BridgeMethod::new(param_slots, trap));
}

pub fn register_traps(signatures: &mut MethodSignatures, keys: &[&str], trap: BridgeFn) {
    for key in keys {
        register_trap(signatures, key, trap);
    }
}

const UNSUPPORTED_CLASSES: &[&str] = &[
    "java/awt/image/BufferedImage.<clinit>()V",
    "java/awt/image/BufferedImage.<init>(III)V",
    "java/awt/Image.<clinit>()V",
    "java/lang/StringBuilder.<clinit>()V",
    "java/lang/StringBuilder.<init>()V",
    "java/lang/StringBuilder.<init>(I)V",
    "java/lang/StringBuilder.<init>(Ljava/lang/CharSequence;)V",
    "java/lang/StringBuilder.<init>(Ljava/lang/String;)V",
    "java/lang/StringBuffer.<clinit>()V",
    "java/lang/StringBuffer.<init>()V",
    "java/lang/StringBuffer.<init>(I)V",
    "java/lang/StringBuffer.<init>(Ljava/lang/CharSequence;)V",
    "java/lang/StringBuffer.<init>(Ljava/lang/String;)V",
    "java/sql/Driver.<clinit>()V",
    "java/sql/DriverManager.<clinit>()V",
    "java/sql/DriverPropertyInfo.<clinit>()V",
    "java/sql/DriverPropertyInfo.<init>(Ljava/lang/String;Ljava/lang/String;)V",
    "java/util/zip/CheckedInputStream.<clinit>()V",
    "java/util/zip/CheckedInputStream.<init>(Ljava/io/InputStream;Ljava/util/zip/Checksum;)V",
    "java/util/zip/CheckedOutputStream.<clinit>()V",
    "java/util/zip/CheckedOutputStream.<init>(Ljava/io/OutputStream;Ljava/util/zip/Checksum;)V",
];

const UNSUPPORTED_FUNCTIONS: &[&str] = &[
    "java/awt/image/BufferedImage.getGraphics()Ljava/awt/Graphics;",
    "java/awt/Image.getScaledInstance(III)Ljava/awt/Image;",
    "java/sql/DriverManager.getConnection(Ljava/lang/String;)Ljava/sql/Connection;",
    "java/sql/DriverManager.getConnection(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)Ljava/sql/Connection;",
    "java/sql/DriverManager.getConnection(Ljava/lang/String;Ljava/util/Properties;)Ljava/sql/Connection;",
];

const DEPRECATED_ENTRIES: &[&str] = &[
    "java/rmi/RMISecurityManager.<clinit>()V",
    "java/rmi/RMISecurityManager.<init>()V",
    "java/security/AccessController.doPrivileged(Ljava/security/PrivilegedAction;)Ljava/lang/Object;",
    "java/security/AccessController.doPrivileged(Ljava/security/PrivilegedExceptionAction;)Ljava/lang/Object;",
    "java/lang/SecurityManager.<clinit>()V",
    "java/lang/SecurityManager.<init>()V",
    "java/lang/Object.finalize()V",
    "java/lang/Thread.stop()V",
    "java/lang/Thread.suspend()V",
    "java/lang/Thread.resume()V",
];

const UNDOCUMENTED_ENTRIES: &[&str] = &[
    "sun/misc/Unsafe.<clinit>()V",
    "sun/misc/Unsafe.getUnsafe()Lsun/misc/Unsafe;",
    "java/lang/StringCoding.<clinit>()V",
];

const PROTECTED_ENTRIES: &[&str] = &[
    "java/lang/Object.clone()Ljava/lang/Object;",
    "java/lang/ClassLoader.defineClass(Ljava/lang/String;[BII)Ljava/lang/Class;",
    "java/lang/ClassLoader.findClass(Ljava/lang/String;)Ljava/lang/Class;",
];

/// Trap phase: every table in a fixed order.
pub fn load_traps(signatures: &mut MethodSignatures) {
    register_traps(signatures, UNSUPPORTED_CLASSES, trap_class);
    register_traps(signatures, UNSUPPORTED_FUNCTIONS, trap_function);
    register_traps(signatures, DEPRECATED_ENTRIES, trap_deprecated);
    register_traps(signatures, UNDOCUMENTED_ENTRIES, trap_undocumented);
    register_traps(signatures, PROTECTED_ENTRIES, trap_protected);
    java_io::load_traps(signatures);
    java_nio::load_traps(signatures);
}

use crate::registry::MethodSignatures;
use crate::traps::{register_traps, trap_class, trap_function};

const UNSUPPORTED_CLASSES: &[&str] = &[
    "java/io/BufferedOutputStream.<clinit>()V",
    "java/io/BufferedReader.<clinit>()V",
    "java/io/BufferedWriter.<clinit>()V",
    "java/io/ByteArrayOutputStream.<clinit>()V",
    "java/io/CharArrayReader.<clinit>()V",
    "java/io/CharArrayWriter.<clinit>()V",
    "java/io/FileDescriptor.<clinit>()V",
    "java/io/FileDescriptor.<init>()V",
    "java/io/FileFilter.<clinit>()V",
    "java/io/FilePermission.<clinit>()V",
    "java/io/FileSystem.<clinit>()V",
    "java/io/FilterOutputStream.<clinit>()V",
    "java/io/FilterReader.<clinit>()V",
    "java/io/FilterWriter.<clinit>()V",
    "java/io/Flushable.<clinit>()V",
    "java/io/PipedReader.<clinit>()V",
    "java/io/PipedWriter.<clinit>()V",
    "java/io/PrintWriter.<clinit>()V",
    "java/io/StringReader.<clinit>()V",
    "java/io/StringWriter.<clinit>()V",
];

/// Includes members of classes that are otherwise implemented, so the implementation phase
/// overwrites part of the surface and leaves the rest trapped.
const UNSUPPORTED_FUNCTIONS: &[&str] = &[
    "java/io/DefaultFileSystem.getFileSystem()Ljava/io/FileSystem;",
    "java/io/FileDescriptor.sync()V",
    "java/io/FileDescriptor.valid()Z",
    "java/io/FileFilter.accept(Ljava/io/File;)Z",
    "java/io/FilePermission.equals(Ljava/lang/Object;)Z",
    "java/io/FilePermission.getActions()Ljava/lang/String;",
    "java/io/FilePermission.hashCode()I",
    "java/io/FilePermission.implies(Ljava/security/Permission;)Z",
    "java/io/FilePermission.newPermissionCollection()Ljava/security/PermissionCollection;",
    "java/io/Flushable.flush()V",
    "java/io/File.list()[Ljava/lang/String;",
    "java/io/File.listFiles()[Ljava/io/File;",
    "java/io/File.toPath()Ljava/nio/file/Path;",
    "java/io/File.toURI()Ljava/net/URI;",
    "java/io/File.deleteOnExit()V",
    "java/io/File.setReadOnly()Z",
    "java/io/RandomAccessFile.<init>(Ljava/lang/String;Ljava/lang/String;)V",
    "java/io/RandomAccessFile.<init>(Ljava/io/File;Ljava/lang/String;)V",
    "java/io/RandomAccessFile.getChannel()Ljava/nio/channels/FileChannel;",
    "java/io/RandomAccessFile.getFD()Ljava/io/FileDescriptor;",
    "java/io/RandomAccessFile.readLine()Ljava/lang/String;",
    "java/io/RandomAccessFile.readUTF()Ljava/lang/String;",
    "java/io/RandomAccessFile.seek(J)V",
    "java/io/RandomAccessFile.setLength(J)V",
    "java/io/RandomAccessFile.writeUTF(Ljava/lang/String;)V",
];

pub fn load_traps(signatures: &mut MethodSignatures) {
    register_traps(signatures, UNSUPPORTED_CLASSES, trap_class);
    register_traps(signatures, UNSUPPORTED_FUNCTIONS, trap_function);
}

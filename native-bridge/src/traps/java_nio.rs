use crate::registry::MethodSignatures;
use crate::traps::{register_traps, trap_class, trap_function};

/// Every class here is unsupported as a whole; `Files` included, so none of its static
/// methods can run until its initializer is implemented.
const UNSUPPORTED_CLASSES: &[&str] = &[
    "java/nio/ByteBuffer.<clinit>()V",
    "java/nio/channels/AsynchronousFileChannel.<clinit>()V",
    "java/nio/channels/FileChannel.<clinit>()V",
    "java/nio/charset/StandardCharsets.<clinit>()V",
    "java/nio/file/AccessMode.<clinit>()V",
    "java/nio/file/FileStore.<clinit>()V",
    "java/nio/file/FileSystem.<clinit>()V",
    "java/nio/file/FileSystems.<clinit>()V",
    "java/nio/file/Files.<clinit>()V",
    "java/nio/file/Path.<clinit>()V",
    "java/nio/file/PathMatcher.<clinit>()V",
    "java/nio/file/Paths.<clinit>()V",
];

const UNSUPPORTED_FUNCTIONS: &[&str] = &[
    "java/nio/channels/AsynchronousFileChannel.close()V",
    "java/nio/channels/AsynchronousFileChannel.force(Z)V",
    "java/nio/channels/AsynchronousFileChannel.isOpen()Z",
    "java/nio/channels/AsynchronousFileChannel.open(Ljava/nio/file/Path;[Ljava/nio/file/OpenOption;)Ljava/nio/channels/AsynchronousFileChannel;",
    "java/nio/channels/AsynchronousFileChannel.open(Ljava/nio/file/Path;[Ljava/nio/file/OpenOption;Ljava/util/concurrent/ExecutorService;)Ljava/nio/channels/AsynchronousFileChannel;",
    "java/nio/channels/AsynchronousFileChannel.read(Ljava/nio/ByteBuffer;J)Ljava/util/concurrent/Future;",
    "java/nio/channels/AsynchronousFileChannel.read(Ljava/nio/ByteBuffer;JLjava/nio/channels/CompletionHandler;)V",
    "java/nio/channels/AsynchronousFileChannel.size()J",
    "java/nio/channels/AsynchronousFileChannel.truncate(J)Ljava/nio/channels/AsynchronousFileChannel;",
    "java/nio/channels/AsynchronousFileChannel.write(Ljava/nio/ByteBuffer;J)Ljava/util/concurrent/Future;",
    "java/nio/channels/AsynchronousFileChannel.write(Ljava/nio/ByteBuffer;JLjava/nio/channels/CompletionHandler;)V",
    "java/nio/channels/FileChannel.close()V",
    "java/nio/channels/FileChannel.force(Z)V",
    "java/nio/channels/FileChannel.isOpen()Z",
    "java/nio/channels/FileChannel.lock()Ljava/nio/channels/FileLock;",
    "java/nio/channels/FileChannel.lock(JJZ)Ljava/nio/channels/FileLock;",
    "java/nio/channels/FileChannel.map(Ljava/nio/channels/FileChannel$MapMode;JJ)Ljava/nio/MappedByteBuffer;",
    "java/nio/channels/FileChannel.open(Ljava/nio/file/Path;[Ljava/nio/file/OpenOption;)Ljava/nio/channels/FileChannel;",
    "java/nio/channels/FileChannel.open(Ljava/nio/file/Path;[Ljava/nio/file/OpenOption;Ljava/util/concurrent/ExecutorService;)Ljava/nio/channels/FileChannel;",
    "java/nio/channels/FileChannel.position()J",
    "java/nio/channels/FileChannel.position(J)Ljava/nio/channels/FileChannel;",
    "java/nio/channels/FileChannel.read(Ljava/nio/ByteBuffer;)I",
    "java/nio/channels/FileChannel.read(Ljava/nio/ByteBuffer;J)I",
    "java/nio/channels/FileChannel.read([Ljava/nio/ByteBuffer;)J",
    "java/nio/channels/FileChannel.read([Ljava/nio/ByteBuffer;II)J",
    "java/nio/channels/FileChannel.size()J",
    "java/nio/channels/FileChannel.transferFrom(Ljava/nio/channels/ReadableByteChannel;JJ)J",
    "java/nio/channels/FileChannel.transferTo(JJLjava/nio/channels/WritableByteChannel;)J",
    "java/nio/channels/FileChannel.truncate(J)Ljava/nio/channels/FileChannel;",
    "java/nio/channels/FileChannel.write(Ljava/nio/ByteBuffer;)I",
    "java/nio/channels/FileChannel.write(Ljava/nio/ByteBuffer;J)I",
    "java/nio/channels/FileChannel.write([Ljava/nio/ByteBuffer;)J",
    "java/nio/channels/FileChannel.write([Ljava/nio/ByteBuffer;II)J",
    "java/nio/charset/StandardCharsets.ISO_8859_1()Ljava/nio/charset/Charset;",
    "java/nio/charset/StandardCharsets.US_ASCII()Ljava/nio/charset/Charset;",
    "java/nio/charset/StandardCharsets.UTF_16()Ljava/nio/charset/Charset;",
    "java/nio/charset/StandardCharsets.UTF_16BE()Ljava/nio/charset/Charset;",
    "java/nio/charset/StandardCharsets.UTF_16LE()Ljava/nio/charset/Charset;",
    "java/nio/charset/StandardCharsets.UTF_8()Ljava/nio/charset/Charset;",
    "java/nio/file/AccessMode.valueOf(Ljava/lang/String;)Ljava/nio/file/AccessMode;",
    "java/nio/file/FileStore.getAttribute(Ljava/lang/String;)Ljava/lang/Object;",
    "java/nio/file/FileStore.getBlockSize()J",
    "java/nio/file/FileStore.getFileStoreAttributeView(Ljava/lang/Class;)Ljava/nio/file/attribute/FileStoreAttributeView;",
    "java/nio/file/FileStore.getName()Ljava/lang/String;",
    "java/nio/file/FileStore.getTotalSpace()J",
    "java/nio/file/FileStore.getUnallocatedSpace()J",
    "java/nio/file/FileStore.getUsableSpace()J",
    "java/nio/file/FileStore.isReadOnly()Z",
    "java/nio/file/FileStore.supportsFileAttributeView(Ljava/lang/Class;)Z",
    "java/nio/file/FileStore.supportsFileAttributeView(Ljava/lang/String;)Z",
    "java/nio/file/FileStore.type()Ljava/lang/String;",
    "java/nio/file/FileSystem.close()V",
    "java/nio/file/FileSystem.getFileStores()Ljava/lang/Iterable;",
    "java/nio/file/FileSystem.getPath(Ljava/lang/String;[Ljava/lang/String;)Ljava/nio/file/Path;",
    "java/nio/file/FileSystem.getPathMatcher(Ljava/lang/String;)Ljava/nio/file/PathMatcher;",
    "java/nio/file/FileSystem.getRootDirectories()Ljava/lang/Iterable;",
    "java/nio/file/FileSystem.getSeparator()Ljava/lang/String;",
    "java/nio/file/FileSystem.isOpen()Z",
    "java/nio/file/FileSystem.isReadOnly()Z",
    "java/nio/file/FileSystem.newWatchService()Ljava/nio/file/WatchService;",
    "java/nio/file/FileSystem.provider()Ljava/nio/file/spi/FileSystemProvider;",
    "java/nio/file/FileSystem.supportedFileAttributeViews()Ljava/util/Set;",
    "java/nio/file/FileSystems.getDefault()Ljava/nio/file/FileSystem;",
    "java/nio/file/FileSystems.newFileSystem(Ljava/net/URI;Ljava/util/Map;)Ljava/nio/file/FileSystem;",
    "java/nio/file/FileSystems.newFileSystem(Ljava/nio/file/Path;Ljava/util/Map;)Ljava/nio/file/FileSystem;",
    "java/nio/file/FileSystems.newFileSystem(Ljava/nio/file/Path;Ljava/util/Map;Ljava/lang/ClassLoader;)Ljava/nio/file/FileSystem;",
    "java/nio/file/Files.copy(Ljava/io/InputStream;Ljava/nio/file/Path;[Ljava/nio/file/CopyOption;)J",
    "java/nio/file/Files.copy(Ljava/nio/file/Path;Ljava/io/OutputStream;)J",
    "java/nio/file/Files.copy(Ljava/nio/file/Path;Ljava/nio/file/Path;[Ljava/nio/file/CopyOption;)Ljava/nio/file/Path;",
    "java/nio/file/Files.createDirectories(Ljava/nio/file/Path;[Ljava/nio/file/attribute/FileAttribute;)Ljava/nio/file/Path;",
    "java/nio/file/Files.createDirectory(Ljava/nio/file/Path;[Ljava/nio/file/attribute/FileAttribute;)Ljava/nio/file/Path;",
    "java/nio/file/Files.createFile(Ljava/nio/file/Path;[Ljava/nio/file/attribute/FileAttribute;)Ljava/nio/file/Path;",
    "java/nio/file/Files.createLink(Ljava/nio/file/Path;Ljava/nio/file/Path;)Ljava/nio/file/Path;",
    "java/nio/file/Files.createSymbolicLink(Ljava/nio/file/Path;Ljava/nio/file/Path;[Ljava/nio/file/attribute/FileAttribute;)Ljava/nio/file/Path;",
    "java/nio/file/Files.delete(Ljava/nio/file/Path;)V",
    "java/nio/file/Files.deleteIfExists(Ljava/nio/file/Path;)Z",
    "java/nio/file/Files.exists(Ljava/nio/file/Path;[Ljava/nio/file/LinkOption;)Z",
    "java/nio/file/Files.isDirectory(Ljava/nio/file/Path;[Ljava/nio/file/LinkOption;)Z",
    "java/nio/file/Files.isExecutable(Ljava/nio/file/Path;)Z",
    "java/nio/file/Files.isReadable(Ljava/nio/file/Path;)Z",
    "java/nio/file/Files.isRegularFile(Ljava/nio/file/Path;[Ljava/nio/file/LinkOption;)Z",
    "java/nio/file/Files.isSameFile(Ljava/nio/file/Path;Ljava/nio/file/Path;)Z",
    "java/nio/file/Files.isSymbolicLink(Ljava/nio/file/Path;)Z",
    "java/nio/file/Files.isWritable(Ljava/nio/file/Path;)Z",
    "java/nio/file/Files.move(Ljava/nio/file/Path;Ljava/nio/file/Path;[Ljava/nio/file/CopyOption;)Ljava/nio/file/Path;",
    "java/nio/file/Files.newBufferedReader(Ljava/nio/file/Path;)Ljava/io/BufferedReader;",
    "java/nio/file/Files.newBufferedWriter(Ljava/nio/file/Path;[Ljava/nio/file/OpenOption;)Ljava/io/BufferedWriter;",
    "java/nio/file/Files.newDirectoryStream(Ljava/nio/file/Path;)Ljava/nio/file/DirectoryStream;",
    "java/nio/file/Files.newInputStream(Ljava/nio/file/Path;[Ljava/nio/file/OpenOption;)Ljava/io/InputStream;",
    "java/nio/file/Files.newOutputStream(Ljava/nio/file/Path;[Ljava/nio/file/OpenOption;)Ljava/io/OutputStream;",
    "java/nio/file/Files.notExists(Ljava/nio/file/Path;[Ljava/nio/file/LinkOption;)Z",
    "java/nio/file/Files.probeContentType(Ljava/nio/file/Path;)Ljava/lang/String;",
    "java/nio/file/Files.readAllBytes(Ljava/nio/file/Path;)[B",
    "java/nio/file/Files.size(Ljava/nio/file/Path;)J",
    "java/nio/file/Path.compareTo(Ljava/nio/file/Path;)I",
    "java/nio/file/Path.endsWith(Ljava/lang/String;)Z",
    "java/nio/file/Path.endsWith(Ljava/nio/file/Path;)Z",
    "java/nio/file/Path.getFileName()Ljava/nio/file/Path;",
    "java/nio/file/Path.getName(I)Ljava/nio/file/Path;",
    "java/nio/file/Path.getNameCount()I",
    "java/nio/file/Path.getParent()Ljava/nio/file/Path;",
    "java/nio/file/Path.getRoot()Ljava/nio/file/Path;",
    "java/nio/file/Path.isAbsolute()Z",
    "java/nio/file/Path.iterator()Ljava/util/Iterator;",
    "java/nio/file/Path.normalize()Ljava/nio/file/Path;",
    "java/nio/file/Path.relativize(Ljava/nio/file/Path;)Ljava/nio/file/Path;",
    "java/nio/file/Path.resolve(Ljava/lang/String;)Ljava/nio/file/Path;",
    "java/nio/file/Path.resolve(Ljava/nio/file/Path;)Ljava/nio/file/Path;",
    "java/nio/file/Path.resolveSibling(Ljava/lang/String;)Ljava/nio/file/Path;",
    "java/nio/file/Path.resolveSibling(Ljava/nio/file/Path;)Ljava/nio/file/Path;",
    "java/nio/file/Path.startsWith(Ljava/lang/String;)Z",
    "java/nio/file/Path.startsWith(Ljava/nio/file/Path;)Z",
    "java/nio/file/Path.subpath(II)Ljava/nio/file/Path;",
    "java/nio/file/Path.toAbsolutePath()Ljava/nio/file/Path;",
    "java/nio/file/Path.toFile()Ljava/io/File;",
    "java/nio/file/Path.toString()Ljava/lang/String;",
    "java/nio/file/Path.toUri()Ljava/net/URI;",
    "java/nio/file/PathMatcher.matches(Ljava/nio/file/Path;)Z",
    "java/nio/file/Paths.get(Ljava/lang/String;[Ljava/lang/String;)Ljava/nio/file/Path;",
    "java/nio/file/Paths.get(Ljava/net/URI;)Ljava/nio/file/Path;",
];

pub fn load_traps(signatures: &mut MethodSignatures) {
    register_traps(signatures, UNSUPPORTED_CLASSES, trap_class);
    register_traps(signatures, UNSUPPORTED_FUNCTIONS, trap_function);
}

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};

use bridge_object::arrays::{array_length, byte_array_contents};
use bridge_object::object::{FieldValue, ObjectRef, VALUE_FIELD};
use bridge_object::type_kind::TypeKind;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::helpers::clinit_generic;
use crate::java::io::{close_file_handle, file_handle_of, set_file_handle, set_file_path};
use crate::java::io::file::open_path_of;
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/io/RandomAccessFile";

const READ_ONLY_FIELD: &str = "readOnly";

fn open_options(mode: &str) -> Result<OpenOptions, Envelope> {
    let mut options = OpenOptions::new();
    match mode {
        "r" => options.read(true),
        "rw" | "rws" | "rwd" => options.read(true).write(true).create(true),
        _ => return Err(Envelope::illegal_argument(format!("Illegal mode \"{}\" must be one of \"r\", \"rw\", \"rws\", or \"rwd\"", mode))),
    };
    Ok(options)
}

/// Shared by both constructors once the path lives on a `java/io/File`-shaped object.
fn open_into(this: &ObjectRef, path_holder: &ObjectRef, mode: &str) -> BridgeResult {
    let options = open_options(mode)?;
    let (path, file) = open_path_of(path_holder, &options)?;
    set_file_path(this, path.as_str());
    set_file_handle(this, file);
    this.set(READ_ONLY_FIELD, TypeKind::Boolean, FieldValue::Int((mode == "r") as i64));
    Ok(None)
}

fn init_with_path(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let path = args.string_at(1)?;
    let mode = args.string_at(2)?;
    let path_holder = ObjectRef::new("java/io/File");
    set_file_path(&path_holder, path.as_str());
    open_into(this, &path_holder, mode.as_str())
}

fn init_with_file(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let file = args.non_null_at(1)?;
    let mode = args.string_at(2)?;
    open_into(this, file, mode.as_str())
}

fn io_error(err: std::io::Error) -> Envelope {
    Envelope::io(err.to_string())
}

fn seek(args: &[Value]) -> BridgeResult {
    let handle = file_handle_of(args.non_null_at(0)?)?;
    let position = args.int_at(1)?;
    if position < 0 {
        return Err(Envelope::io("Negative seek offset"));
    }
    handle.lock().seek(SeekFrom::Start(position as u64)).map_err(io_error)?;
    Ok(None)
}

fn get_file_pointer(args: &[Value]) -> BridgeResult {
    let handle = file_handle_of(args.non_null_at(0)?)?;
    let position = handle.lock().stream_position().map_err(io_error)?;
    Ok(Some(Value::Int(position as i64)))
}

fn length(args: &[Value]) -> BridgeResult {
    let handle = file_handle_of(args.non_null_at(0)?)?;
    let length = handle.lock().metadata().map_err(io_error)?.len();
    Ok(Some(Value::Int(length as i64)))
}

/// -1 at end of file.
fn read_byte(args: &[Value]) -> BridgeResult {
    let handle = file_handle_of(args.non_null_at(0)?)?;
    let mut byte = [0u8; 1];
    let read = handle.lock().read(&mut byte).map_err(io_error)?;
    Ok(Some(Value::Int(if read == 0 { -1 } else { byte[0] as i64 })))
}

fn read_into(this: &ObjectRef, buffer: &ObjectRef, offset: i64, length: i64) -> BridgeResult {
    let handle = file_handle_of(this)?;
    let capacity = match buffer.field_value(VALUE_FIELD) {
        Some(FieldValue::Bytes(bytes)) => bytes.len(),
        _ => return Err(Envelope::vm_error("read: expected a byte array")),
    };
    if offset < 0 || length < 0 || offset + length > capacity as i64 {
        return Err(Envelope::index_out_of_bounds(format!("offset {}, length {}, buffer length {}", offset, length, capacity)));
    }
    if length == 0 {
        return Ok(Some(Value::Int(0)));
    }
    let mut scratch = vec![0u8; length as usize];
    let read = handle.lock().read(scratch.as_mut_slice()).map_err(io_error)?;
    if read == 0 {
        return Ok(Some(Value::Int(-1)));
    }
    buffer.with_fields_mut(|fields| {
        if let Some(FieldValue::Bytes(bytes)) = fields.get_mut(VALUE_FIELD).map(|field| &mut field.value) {
            for (slot, byte) in bytes[offset as usize..].iter_mut().zip(&scratch[..read]) {
                *slot = *byte as i8;
            }
        }
    });
    Ok(Some(Value::Int(read as i64)))
}

fn read_buffer(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let buffer = args.non_null_at(1)?;
    let length = array_length(buffer).unwrap_or(0) as i64;
    read_into(this, buffer, 0, length)
}

fn read_buffer_range(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let buffer = args.non_null_at(1)?;
    read_into(this, buffer, args.int_at(2)?, args.int_at(3)?)
}

fn write_all(this: &ObjectRef, bytes: &[u8]) -> BridgeResult {
    let handle = file_handle_of(this)?;
    if this.int_field(READ_ONLY_FIELD) == Some(1) {
        return Err(Envelope::io("Bad file descriptor"));
    }
    handle.lock().write_all(bytes).map_err(io_error)?;
    Ok(None)
}

fn write_byte(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    write_all(this, &[args.int_at(1)? as u8])
}

fn write_buffer(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let bytes = byte_array_contents(args.non_null_at(1)?).ok_or_else(|| Envelope::vm_error("write: expected a byte array"))?;
    write_all(this, bytes.iter().map(|byte| *byte as u8).collect::<Vec<_>>().as_slice())
}

/// Closing twice is harmless.
fn close(args: &[Value]) -> BridgeResult {
    close_file_handle(args.non_null_at(0)?);
    Ok(None)
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("<clinit>()V", BridgeMethod::new(0, clinit_generic)),
        ("<init>(Ljava/lang/String;Ljava/lang/String;)V", BridgeMethod::new(2, init_with_path)),
        ("<init>(Ljava/io/File;Ljava/lang/String;)V", BridgeMethod::new(2, init_with_file)),
        ("seek(J)V", BridgeMethod::new(2, seek).thread_safe()),
        ("getFilePointer()J", BridgeMethod::new(0, get_file_pointer)),
        ("length()J", BridgeMethod::new(0, length)),
        ("read()I", BridgeMethod::new(0, read_byte).thread_safe()),
        ("read([B)I", BridgeMethod::new(1, read_buffer).thread_safe()),
        ("read([BII)I", BridgeMethod::new(3, read_buffer_range).thread_safe()),
        ("write(I)V", BridgeMethod::new(1, write_byte).thread_safe()),
        ("write([B)V", BridgeMethod::new(1, write_buffer).thread_safe()),
        ("close()V", BridgeMethod::new(0, close)),
    ]);
}

#[cfg(test)]
pub mod test {
    use std::io::Write;

    use bridge_common::exception_kind::ExceptionKind;
    use bridge_object::arrays::{byte_array_contents, make_byte_array_from};
    use bridge_object::object::ObjectRef;
    use bridge_object::strings::object_of_string;
    use bridge_object::value::Value;

    use crate::envelope::BridgeResult;
    use crate::java::io::{FILE_HANDLE, set_file_path};
    use crate::java::io::random_access_file::{close, get_file_pointer, init_with_file, init_with_path, length, read_buffer, read_buffer_range, read_byte, seek, write_buffer, write_byte};

    fn open(path: &str, mode: &str) -> Result<ObjectRef, ExceptionKind> {
        let raf = ObjectRef::new("java/io/RandomAccessFile");
        init_with_path(&[Value::Object(raf.clone()), Value::Object(object_of_string(path)), Value::Object(object_of_string(mode))])
            .map(|_| raf).map_err(|envelope| envelope.kind)
    }

    fn int(result: BridgeResult) -> i64 {
        result.unwrap().unwrap().as_int().unwrap()
    }

    #[test]
    pub fn read_and_seek() {
        let mut source = tempfile::NamedTempFile::new().unwrap();
        source.write_all(b"hello").unwrap();
        let raf = Value::Object(open(source.path().to_str().unwrap(), "r").unwrap());
        assert_eq!(int(length(&[raf.clone()])), 5);
        assert_eq!(int(read_byte(&[raf.clone()])), 'h' as i64);
        assert_eq!(int(get_file_pointer(&[raf.clone()])), 1);
        seek(&[raf.clone(), Value::Int(3)]).unwrap();
        let buffer = make_byte_array_from(vec![0; 4]);
        assert_eq!(int(read_buffer(&[raf.clone(), Value::Object(buffer.clone())])), 2);
        assert_eq!(byte_array_contents(&buffer).unwrap(), vec!['l' as i8, 'o' as i8, 0, 0]);
        assert_eq!(int(read_byte(&[raf.clone()])), -1);
        assert_eq!(int(read_buffer(&[raf.clone(), Value::Object(buffer)])), -1);
        assert_eq!(seek(&[raf.clone(), Value::Int(-1)]).unwrap_err().kind, ExceptionKind::IOException);
        assert_eq!(write_byte(&[raf, Value::Int(1)]).unwrap_err().kind, ExceptionKind::IOException);
    }

    #[test]
    pub fn write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let raf = Value::Object(open(path.to_str().unwrap(), "rw").unwrap());
        write_buffer(&[raf.clone(), Value::Object(make_byte_array_from(vec![1, 2, 3]))]).unwrap();
        write_byte(&[raf.clone(), Value::Int(0x104)]).unwrap();
        assert_eq!(int(length(&[raf.clone()])), 4);
        seek(&[raf.clone(), Value::Int(1)]).unwrap();
        let buffer = make_byte_array_from(vec![9; 4]);
        assert_eq!(int(read_buffer_range(&[raf.clone(), Value::Object(buffer.clone()), Value::Int(2), Value::Int(2)])), 2);
        assert_eq!(byte_array_contents(&buffer).unwrap(), vec![9, 9, 2, 3]);
        let err = read_buffer_range(&[raf.clone(), Value::Object(buffer), Value::Int(3), Value::Int(2)]).unwrap_err();
        assert_eq!(err.kind, ExceptionKind::IndexOutOfBoundsException);
        close(&[raf.clone()]).unwrap();
        assert!(!raf.as_object().unwrap().has_field(FILE_HANDLE));
        assert_eq!(read_byte(&[raf.clone()]).unwrap_err().kind, ExceptionKind::IOException);
        close(&[raf]).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    pub fn open_failures() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert_eq!(open(missing.to_str().unwrap(), "r").unwrap_err(), ExceptionKind::FileNotFoundException);
        assert_eq!(open(missing.to_str().unwrap(), "rx").unwrap_err(), ExceptionKind::IllegalArgumentException);
        assert!(!missing.exists());
    }

    #[test]
    pub fn from_file_object() {
        let mut source = tempfile::NamedTempFile::new().unwrap();
        source.write_all(b"z").unwrap();
        let file = ObjectRef::new("java/io/File");
        set_file_path(&file, source.path().to_str().unwrap());
        let raf = ObjectRef::new("java/io/RandomAccessFile");
        init_with_file(&[Value::Object(raf.clone()), Value::Object(file), Value::Object(object_of_string("r"))]).unwrap();
        assert_eq!(int(read_byte(&[Value::Object(raf)])), 'z' as i64);
        let raf = ObjectRef::new("java/io/RandomAccessFile");
        let err = init_with_file(&[Value::Object(raf), Value::null(), Value::Object(object_of_string("r"))]).unwrap_err();
        assert_eq!(err.kind, ExceptionKind::NullPointerException);
    }
}

use std::fs::{File, OpenOptions};
use std::path::Path;

use log::error;

use bridge_common::exception_kind::ExceptionKind;
use bridge_object::object::{FieldValue, ObjectRef};
use bridge_object::strings::object_of_string;
use bridge_object::type_kind::TypeKind;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::helpers::clinit_generic;
use crate::java::io::{close_file_handle, FILE_STATUS, file_path_of, set_file_handle, set_file_path};
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/io/File";

const SEPARATOR_CHAR: &str = "separatorChar";
const PATH_SEPARATOR_CHAR: &str = "pathSeparatorChar";

fn absolute(path: &str) -> Result<String, Envelope> {
    let path = Path::new(path);
    if path.is_absolute() {
        return Ok(path.to_string_lossy().into_owned());
    }
    let cwd = std::env::current_dir().map_err(|err| Envelope::io(format!("cannot resolve {}: {}", path.display(), err)))?;
    Ok(cwd.join(path).to_string_lossy().into_owned())
}

fn receiver_path(args: &[Value]) -> Result<String, Envelope> {
    file_path_of(args.non_null_at(0)?)
}

fn string_result(string: &str) -> BridgeResult {
    Ok(Some(Value::Object(object_of_string(string))))
}

/// Stores the absolute form of the path. The status stays 0 (invalid) if the path is rejected.
fn init(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    this.set(FILE_STATUS, TypeKind::Int32, FieldValue::Int(0));
    let path = args.string_at(1)?;
    if path.is_empty() {
        return Err(Envelope::null_pointer("String argument for path is empty"));
    }
    set_file_path(this, absolute(path.as_str())?.as_str());
    this.set(SEPARATOR_CHAR, TypeKind::Char16, FieldValue::Int(std::path::MAIN_SEPARATOR as i64));
    this.set(PATH_SEPARATOR_CHAR, TypeKind::Char16, FieldValue::Int((if cfg!(windows) { ';' } else { ':' }) as i64));
    this.set(FILE_STATUS, TypeKind::Int32, FieldValue::Int(1));
    Ok(None)
}

fn get_path(args: &[Value]) -> BridgeResult {
    string_result(receiver_path(args)?.as_str())
}

fn get_name(args: &[Value]) -> BridgeResult {
    let path = receiver_path(args)?;
    let name = Path::new(path.as_str()).file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
    string_result(name.as_str())
}

fn exists(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(Path::new(receiver_path(args)?.as_str()).exists())))
}

fn is_directory(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(Path::new(receiver_path(args)?.as_str()).is_dir())))
}

fn is_file(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(Path::new(receiver_path(args)?.as_str()).is_file())))
}

/// 0 for anything that cannot be stat'ed.
fn length(args: &[Value]) -> BridgeResult {
    let length = std::fs::metadata(receiver_path(args)?).map(|metadata| metadata.len() as i64).unwrap_or(0);
    Ok(Some(Value::Int(length)))
}

fn is_invalid(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let status = this.int_field(FILE_STATUS).ok_or_else(|| Envelope::io("File object lacks a status field"))?;
    Ok(Some(Value::from_bool(status == 0)))
}

/// Keeps the new file open on the receiver. False if it already existed or could not be made.
fn create_new_file(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    let path = file_path_of(this)?;
    match OpenOptions::new().read(true).write(true).create_new(true).open(path.as_str()) {
        Ok(file) => {
            set_file_handle(this, file);
            Ok(Some(Value::from_bool(true)))
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(Some(Value::from_bool(false))),
        Err(err) => {
            error!("createNewFile: failed to create {}: {}", path, err);
            Ok(Some(Value::from_bool(false)))
        }
    }
}

fn delete(args: &[Value]) -> BridgeResult {
    let this = args.non_null_at(0)?;
    close_file_handle(this);
    let path = file_path_of(this)?;
    let removed = if Path::new(path.as_str()).is_dir() { std::fs::remove_dir(path.as_str()) } else { std::fs::remove_file(path.as_str()) };
    match removed {
        Ok(()) => Ok(Some(Value::from_bool(true))),
        Err(err) => {
            error!("delete: failed to remove {}: {}", path, err);
            Ok(Some(Value::from_bool(false)))
        }
    }
}

fn mkdir(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(std::fs::create_dir(receiver_path(args)?).is_ok())))
}

/// Opens `file_object`'s path for another stream class.
pub(crate) fn open_path_of(file_object: &ObjectRef, options: &OpenOptions) -> Result<(String, File), Envelope> {
    let path = file_path_of(file_object)?;
    let file = options.open(path.as_str()).map_err(|err| Envelope::new(ExceptionKind::FileNotFoundException, format!("{} ({})", path, err)))?;
    Ok((path, file))
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("<clinit>()V", BridgeMethod::new(0, clinit_generic)),
        ("<init>(Ljava/lang/String;)V", BridgeMethod::new(1, init)),
        ("getPath()Ljava/lang/String;", BridgeMethod::new(0, get_path)),
        ("getName()Ljava/lang/String;", BridgeMethod::new(0, get_name)),
        ("getAbsolutePath()Ljava/lang/String;", BridgeMethod::new(0, get_path)),
        ("exists()Z", BridgeMethod::new(0, exists)),
        ("isDirectory()Z", BridgeMethod::new(0, is_directory)),
        ("isFile()Z", BridgeMethod::new(0, is_file)),
        ("length()J", BridgeMethod::new(0, length)),
        ("isInvalid()Z", BridgeMethod::new(0, is_invalid)),
        ("createNewFile()Z", BridgeMethod::new(0, create_new_file)),
        ("delete()Z", BridgeMethod::new(0, delete)),
        ("mkdir()Z", BridgeMethod::new(0, mkdir)),
    ]);
}

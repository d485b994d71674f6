use std::collections::VecDeque;

use bridge_common::exception_kind::ExceptionKind;
use bridge_object::object::{Field, FieldValue, ObjectRef, VALUE_FIELD};
use bridge_object::type_kind::TypeKind;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::java::lang::string::objects_equal;
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/util/LinkedList";

fn with_list<T>(this: &ObjectRef, with: impl FnOnce(&mut VecDeque<ObjectRef>) -> Result<T, Envelope>) -> Result<T, Envelope> {
    this.with_fields_mut(|fields| match fields.get_mut(VALUE_FIELD) {
        Some(Field { value: FieldValue::LinkedList(list), .. }) => with(list),
        _ => Err(Envelope::vm_error(format!("{:?} has no list storage", this))),
    })
}

fn receiver_list<T>(args: &[Value], with: impl FnOnce(&mut VecDeque<ObjectRef>) -> Result<T, Envelope>) -> Result<T, Envelope> {
    with_list(args.non_null_at(0)?, with)
}

fn no_such_element() -> Envelope {
    Envelope::new(ExceptionKind::NoSuchElementException, "list is empty")
}

fn object_result(obj: ObjectRef) -> BridgeResult {
    Ok(Some(Value::Object(obj)))
}

fn init(args: &[Value]) -> BridgeResult {
    args.non_null_at(0)?.set(VALUE_FIELD, TypeKind::LinkedList, FieldValue::LinkedList(VecDeque::new()));
    Ok(None)
}

fn add(args: &[Value]) -> BridgeResult {
    let element = args.object_at(1)?.clone();
    receiver_list(args, |list| {
        list.push_back(element);
        Ok(())
    })?;
    Ok(Some(Value::from_bool(true)))
}

fn add_first(args: &[Value]) -> BridgeResult {
    let element = args.object_at(1)?.clone();
    receiver_list(args, |list| {
        list.push_front(element);
        Ok(None)
    })
}

fn add_last(args: &[Value]) -> BridgeResult {
    let element = args.object_at(1)?.clone();
    receiver_list(args, |list| {
        list.push_back(element);
        Ok(None)
    })
}

fn get_first(args: &[Value]) -> BridgeResult {
    object_result(receiver_list(args, |list| list.front().cloned().ok_or_else(no_such_element))?)
}

fn get_last(args: &[Value]) -> BridgeResult {
    object_result(receiver_list(args, |list| list.back().cloned().ok_or_else(no_such_element))?)
}

fn remove_first(args: &[Value]) -> BridgeResult {
    object_result(receiver_list(args, |list| list.pop_front().ok_or_else(no_such_element))?)
}

fn remove_last(args: &[Value]) -> BridgeResult {
    object_result(receiver_list(args, |list| list.pop_back().ok_or_else(no_such_element))?)
}

/// Null on an empty list.
fn peek(args: &[Value]) -> BridgeResult {
    object_result(receiver_list(args, |list| Ok(list.front().cloned().unwrap_or_else(ObjectRef::null)))?)
}

fn poll(args: &[Value]) -> BridgeResult {
    object_result(receiver_list(args, |list| Ok(list.pop_front().unwrap_or_else(ObjectRef::null)))?)
}

fn get(args: &[Value]) -> BridgeResult {
    let index = args.int_at(1)?;
    object_result(receiver_list(args, |list| {
        usize::try_from(index).ok().and_then(|index| list.get(index)).cloned()
            .ok_or_else(|| Envelope::index_out_of_bounds(format!("Index: {}, Size: {}", index, list.len())))
    })?)
}

fn size(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::Int(receiver_list(args, |list| Ok(list.len()))? as i64)))
}

fn is_empty(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(receiver_list(args, |list| Ok(list.is_empty()))?)))
}

fn clear(args: &[Value]) -> BridgeResult {
    receiver_list(args, |list| {
        list.clear();
        Ok(None)
    })
}

fn position_of(list: &VecDeque<ObjectRef>, target: &ObjectRef) -> Option<usize> {
    list.iter().position(|element| {
        if target.is_null() { element.is_null() } else { objects_equal(target, element) }
    })
}

fn contains(args: &[Value]) -> BridgeResult {
    let target = args.object_at(1)?.clone();
    Ok(Some(Value::from_bool(receiver_list(args, |list| Ok(position_of(list, &target).is_some()))?)))
}

fn index_of(args: &[Value]) -> BridgeResult {
    let target = args.object_at(1)?.clone();
    let position = receiver_list(args, |list| Ok(position_of(list, &target)))?;
    Ok(Some(Value::Int(position.map(|index| index as i64).unwrap_or(-1))))
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("<init>()V", BridgeMethod::new(0, init)),
        ("add(Ljava/lang/Object;)Z", BridgeMethod::new(1, add)),
        ("addFirst(Ljava/lang/Object;)V", BridgeMethod::new(1, add_first)),
        ("addLast(Ljava/lang/Object;)V", BridgeMethod::new(1, add_last)),
        ("push(Ljava/lang/Object;)V", BridgeMethod::new(1, add_first)),
        ("offer(Ljava/lang/Object;)Z", BridgeMethod::new(1, add)),
        ("getFirst()Ljava/lang/Object;", BridgeMethod::new(0, get_first)),
        ("getLast()Ljava/lang/Object;", BridgeMethod::new(0, get_last)),
        ("element()Ljava/lang/Object;", BridgeMethod::new(0, get_first)),
        ("removeFirst()Ljava/lang/Object;", BridgeMethod::new(0, remove_first)),
        ("removeLast()Ljava/lang/Object;", BridgeMethod::new(0, remove_last)),
        ("pop()Ljava/lang/Object;", BridgeMethod::new(0, remove_first)),
        ("remove()Ljava/lang/Object;", BridgeMethod::new(0, remove_first)),
        ("peek()Ljava/lang/Object;", BridgeMethod::new(0, peek)),
        ("poll()Ljava/lang/Object;", BridgeMethod::new(0, poll)),
        ("get(I)Ljava/lang/Object;", BridgeMethod::new(1, get)),
        ("size()I", BridgeMethod::new(0, size)),
        ("isEmpty()Z", BridgeMethod::new(0, is_empty)),
        ("clear()V", BridgeMethod::new(0, clear)),
        ("contains(Ljava/lang/Object;)Z", BridgeMethod::new(1, contains)),
        ("indexOf(Ljava/lang/Object;)I", BridgeMethod::new(1, index_of)),
    ]);
}

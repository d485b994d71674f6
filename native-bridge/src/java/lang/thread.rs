use std::time::{Duration, Instant};

use bridge_common::exception_kind::ExceptionKind;
use bridge_object::class_objects::java_visible_name;
use bridge_object::context::ContextRef;
use bridge_object::value::Value;

use crate::envelope::{Args, BridgeResult, Envelope};
use crate::helpers::just_return;
use crate::java::register_class;
use crate::registry::{BridgeMethod, MethodSignatures};

pub const CLASS_NAME: &str = "java/lang/Thread";

const SLEEP_SLICE: Duration = Duration::from_millis(10);

fn interrupted_exception() -> Envelope {
    Envelope::new(ExceptionKind::InterruptedException, "sleep interrupted")
}

/// Consumes a pending interrupt, if any.
fn take_interrupt(context: &ContextRef) -> bool {
    if context.is_interrupted() {
        context.clear_interrupt();
        return true;
    }
    false
}

/// Sleeps in short slices so that an interrupt raised meanwhile ends the sleep early.
fn sleep(args: &[Value]) -> BridgeResult {
    let context = args.context_at(0)?;
    let millis = args.int_at(1)?;
    if millis < 0 {
        return Err(Envelope::illegal_argument("timeout value is negative"));
    }
    let deadline = Instant::now() + Duration::from_millis(millis as u64);
    loop {
        if take_interrupt(context) {
            return Err(interrupted_exception());
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        std::thread::sleep(SLEEP_SLICE.min(deadline - now));
    }
}

fn interrupted(args: &[Value]) -> BridgeResult {
    Ok(Some(Value::from_bool(take_interrupt(args.context_at(0)?))))
}

pub fn render_stack(context: &ContextRef) -> String {
    let mut rendered = String::from("java.lang.Exception: Stack trace\n");
    for frame in context.frames() {
        rendered.push_str(format!("\tat {}.{}(Unknown Source)\n", java_visible_name(frame.class_name.as_str()), frame.method_name).as_str());
    }
    rendered
}

fn dump_stack(args: &[Value]) -> BridgeResult {
    eprint!("{}", render_stack(args.context_at(0)?));
    Ok(None)
}

fn on_spin_wait(_args: &[Value]) -> BridgeResult {
    std::hint::spin_loop();
    Ok(None)
}

fn yield_now(_args: &[Value]) -> BridgeResult {
    std::thread::yield_now();
    Ok(None)
}

pub fn load(signatures: &mut MethodSignatures) {
    register_class(signatures, CLASS_NAME, [
        ("registerNatives()V", BridgeMethod::new(0, just_return)),
        ("sleep(J)V", BridgeMethod::new(2, sleep).with_context()),
        ("interrupted()Z", BridgeMethod::new(0, interrupted).with_context()),
        ("dumpStack()V", BridgeMethod::new(0, dump_stack).with_context()),
        ("onSpinWait()V", BridgeMethod::new(0, on_spin_wait)),
        ("yield()V", BridgeMethod::new(0, yield_now)),
    ]);
}

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FrameDescription {
    pub class_name: String,
    pub method_name: String,
    pub descriptor: String,
    pub line_number: i32,
}

impl FrameDescription {
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            descriptor: descriptor.into(),
            line_number: -1,
        }
    }
}

/// What a bridge function that asked for context can see of its caller.
pub trait InvocationContext: Debug + Send + Sync {
    fn thread_id(&self) -> i64;
    fn thread_name(&self) -> String;
    /// Innermost frame first.
    fn frames(&self) -> Vec<FrameDescription>;
    fn is_interrupted(&self) -> bool;
    fn clear_interrupt(&self);
}

pub type ContextRef = Arc<dyn InvocationContext>;

/// A plain frame stack for a single thread.
#[derive(Debug)]
pub struct FrameStack {
    thread_id: i64,
    thread_name: String,
    frames: RwLock<Vec<FrameDescription>>,
    interrupted: AtomicBool,
}

impl FrameStack {
    pub fn new(thread_id: i64, thread_name: impl Into<String>) -> Self {
        Self {
            thread_id,
            thread_name: thread_name.into(),
            frames: RwLock::new(vec![]),
            interrupted: AtomicBool::new(false),
        }
    }

    pub fn main_thread() -> Self {
        Self::new(1, "main")
    }

    pub fn push_frame(&self, frame: FrameDescription) {
        self.frames.write().push(frame);
    }

    pub fn pop_frame(&self) -> Option<FrameDescription> {
        self.frames.write().pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.read().len()
    }

    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }
}

impl InvocationContext for FrameStack {
    fn thread_id(&self) -> i64 {
        self.thread_id
    }

    fn thread_name(&self) -> String {
        self.thread_name.clone()
    }

    fn frames(&self) -> Vec<FrameDescription> {
        self.frames.read().iter().rev().cloned().collect()
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    fn clear_interrupt(&self) {
        self.interrupted.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
pub mod test {
    use crate::context::{FrameDescription, FrameStack, InvocationContext};

    #[test]
    pub fn frames_innermost_first() {
        let stack = FrameStack::main_thread();
        stack.push_frame(FrameDescription::new("Main", "main", "([Ljava/lang/String;)V"));
        stack.push_frame(FrameDescription::new("Main", "helper", "()V"));
        let frames = stack.frames();
        assert_eq!(frames[0].method_name, "helper");
        assert_eq!(frames[1].method_name, "main");
        assert_eq!(stack.pop_frame().unwrap().method_name, "helper");
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    pub fn interrupt_flag() {
        let stack = FrameStack::new(7, "worker");
        assert!(!stack.is_interrupted());
        stack.interrupt();
        assert!(stack.is_interrupted());
        stack.clear_interrupt();
        assert!(!stack.is_interrupted());
        assert_eq!(stack.thread_id(), 7);
        assert_eq!(stack.thread_name(), "worker");
    }
}

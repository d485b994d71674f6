use crate::registry::MethodSignatures;

pub mod boxed;
pub mod class;
pub mod math;
pub mod object;
pub mod string;
pub mod system;
pub mod thread;
pub mod throwable;

pub fn load(signatures: &mut MethodSignatures) {
    object::load(signatures);
    string::load(signatures);
    class::load(signatures);
    math::load(signatures);
    boxed::load(signatures);
    system::load(signatures);
    thread::load(signatures);
    throwable::load(signatures);
}

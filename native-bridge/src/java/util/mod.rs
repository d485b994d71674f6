use crate::registry::MethodSignatures;

pub mod atomic_integer;
pub mod linked_list;
pub mod properties;
pub mod random;

pub fn load(signatures: &mut MethodSignatures) {
    atomic_integer::load(signatures);
    properties::load(signatures);
    random::load(signatures);
    linked_list::load(signatures);
}

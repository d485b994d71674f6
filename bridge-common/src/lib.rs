pub mod descriptor_parser;
pub mod exception_kind;
pub mod method_key;
pub mod ptype;
pub mod string_pool;

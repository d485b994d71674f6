pub mod arrays;
pub mod class_objects;
pub mod context;
pub mod object;
pub mod strings;
pub mod type_kind;
pub mod value;

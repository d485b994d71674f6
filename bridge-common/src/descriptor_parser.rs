use itertools::Itertools;
use thiserror::Error;

use crate::ptype::{PType, ReferenceType};

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct MethodDescriptor {
    pub parameter_types: Vec<PType>,
    pub return_type: PType,
}

impl MethodDescriptor {
    pub fn jvm_representation(&self) -> String {
        format!("({}){}", self.parameter_types.iter().map(|param| param.jvm_representation()).join(""), self.return_type.jvm_representation())
    }

    /// Slots popped off the operand stack for the declared parameters, receiver excluded.
    pub fn parameter_slots(&self) -> usize {
        self.parameter_types.iter().map(|ptype| ptype.slot_size()).sum()
    }
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum DescriptorError {
    #[error("descriptor ended where a type was expected")]
    Empty,
    #[error("unknown type character `{0}`")]
    UnknownType(char),
    #[error("unterminated object type `L{0}`")]
    UnterminatedObject(String),
    #[error("object type with empty class name")]
    EmptyClassName,
    #[error("void is only allowed as a return type")]
    VoidParameter,
    #[error("method descriptor `{0}` does not start with `(`")]
    MissingOpenParen(String),
    #[error("method descriptor `{0}` has no closing `)`")]
    MissingCloseParen(String),
    #[error("unexpected trailing input `{0}`")]
    Trailing(String),
}

fn split_first(str_: &str) -> Result<(char, &str), DescriptorError> {
    let mut chars = str_.chars();
    let first = chars.next().ok_or(DescriptorError::Empty)?;
    Ok((first, chars.as_str()))
}

pub fn parse_base_type(str_: &str) -> Option<(&str, PType)> {
    let (first, rest) = split_first(str_).ok()?;
    Some((
        rest,
        match first {
            'B' => PType::ByteType,
            'C' => PType::CharType,
            'D' => PType::DoubleType,
            'F' => PType::FloatType,
            'I' => PType::IntType,
            'J' => PType::LongType,
            'S' => PType::ShortType,
            'Z' => PType::BooleanType,
            _ => return None,
        },
    ))
}

fn parse_object_type(str_without_l: &str) -> Result<(&str, PType), DescriptorError> {
    let end_index = str_without_l.find(';').ok_or_else(|| DescriptorError::UnterminatedObject(str_without_l.to_string()))?;
    let class_name = &str_without_l[..end_index];
    if class_name.is_empty() {
        return Err(DescriptorError::EmptyClassName);
    }
    Ok((&str_without_l[end_index + 1..], PType::Ref(ReferenceType::Class(class_name.to_string()))))
}

pub fn parse_field_type(str_: &str) -> Result<(&str, PType), DescriptorError> {
    if let Some(res) = parse_base_type(str_) {
        return Ok(res);
    }
    let (first, rest) = split_first(str_)?;
    match first {
        'L' => parse_object_type(rest),
        '[' => {
            let (remaining_to_parse, sub_type) = parse_field_type(rest)?;
            Ok((remaining_to_parse, PType::Ref(ReferenceType::Array(Box::new(sub_type)))))
        }
        'V' => Err(DescriptorError::VoidParameter),
        other => Err(DescriptorError::UnknownType(other)),
    }
}

pub fn parse_return_type(str_: &str) -> Result<(&str, PType), DescriptorError> {
    match str_.strip_prefix('V') {
        Some(rest) => Ok((rest, PType::VoidType)),
        None => parse_field_type(str_),
    }
}

pub fn parse_field_descriptor(str_: &str) -> Result<PType, DescriptorError> {
    let (should_be_empty, field_type) = parse_field_type(str_)?;
    if !should_be_empty.is_empty() {
        return Err(DescriptorError::Trailing(should_be_empty.to_string()));
    }
    Ok(field_type)
}

pub fn parse_method_descriptor(str_: &str) -> Result<MethodDescriptor, DescriptorError> {
    let mut remaining = str_.strip_prefix('(').ok_or_else(|| DescriptorError::MissingOpenParen(str_.to_string()))?;
    let mut parameter_types = vec![];
    loop {
        if let Some(after_params) = remaining.strip_prefix(')') {
            remaining = after_params;
            break;
        }
        if remaining.is_empty() {
            return Err(DescriptorError::MissingCloseParen(str_.to_string()));
        }
        let (rest, ptype) = parse_field_type(remaining)?;
        parameter_types.push(ptype);
        remaining = rest;
    }
    let (rest, return_type) = parse_return_type(remaining)?;
    if !rest.is_empty() {
        return Err(DescriptorError::Trailing(rest.to_string()));
    }
    Ok(MethodDescriptor { parameter_types, return_type })
}

#[cfg(test)]
pub mod test {
    use crate::descriptor_parser::{DescriptorError, parse_field_descriptor, parse_method_descriptor};
    use crate::ptype::{PType, ReferenceType};

    #[test]
    pub fn long_and_double_take_two_slots() {
        let desc = parse_method_descriptor("(Ljava/lang/String;JZD)D").unwrap();
        assert_eq!(desc.parameter_types.len(), 4);
        assert_eq!(desc.parameter_slots(), 6);
        assert_eq!(desc.return_type, PType::DoubleType);
    }

    #[test]
    pub fn arrays_are_one_slot() {
        let desc = parse_method_descriptor("([J[[DLjava/lang/Object;)V").unwrap();
        assert_eq!(desc.parameter_slots(), 3);
        assert_eq!(desc.parameter_types[1], PType::Ref(ReferenceType::Array(Box::new(PType::Ref(ReferenceType::Array(Box::new(PType::DoubleType)))))));
        assert!(desc.return_type.is_void());
    }

    #[test]
    pub fn representation_survives_parse() {
        let raw = "(Ljava/nio/file/Path;[Ljava/nio/file/LinkOption;)Z";
        assert_eq!(parse_method_descriptor(raw).unwrap().jvm_representation(), raw);
    }

    #[test]
    pub fn malformed_descriptors() {
        assert_eq!(parse_method_descriptor("I)V"), Err(DescriptorError::MissingOpenParen("I)V".to_string())));
        assert_eq!(parse_method_descriptor("(II"), Err(DescriptorError::MissingCloseParen("(II".to_string())));
        assert_eq!(parse_method_descriptor("(Ljava/lang/String)V"), Err(DescriptorError::UnterminatedObject("java/lang/String)V".to_string())));
        assert_eq!(parse_method_descriptor("(V)V"), Err(DescriptorError::VoidParameter));
        assert_eq!(parse_method_descriptor("(D)E"), Err(DescriptorError::UnknownType('E')));
        assert_eq!(parse_method_descriptor("()VV"), Err(DescriptorError::Trailing("V".to_string())));
        assert!(parse_field_descriptor("II").is_err());
    }
}

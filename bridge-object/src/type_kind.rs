use bridge_common::ptype::{PType, ReferenceType};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    Char16,
}

impl PrimitiveKind {
    pub fn from_ptype(ptype: &PType) -> Option<Self> {
        Some(match ptype {
            PType::ByteType => PrimitiveKind::Int8,
            PType::CharType => PrimitiveKind::Char16,
            PType::DoubleType => PrimitiveKind::Float64,
            PType::FloatType => PrimitiveKind::Float32,
            PType::IntType => PrimitiveKind::Int32,
            PType::LongType => PrimitiveKind::Int64,
            PType::ShortType => PrimitiveKind::Int16,
            PType::BooleanType => PrimitiveKind::Boolean,
            PType::Ref(_) | PType::VoidType => return None,
        })
    }

    pub fn from_descriptor_char(c: char) -> Option<Self> {
        Some(match c {
            'B' => PrimitiveKind::Int8,
            'C' => PrimitiveKind::Char16,
            'D' => PrimitiveKind::Float64,
            'F' => PrimitiveKind::Float32,
            'I' => PrimitiveKind::Int32,
            'J' => PrimitiveKind::Int64,
            'S' => PrimitiveKind::Int16,
            'Z' => PrimitiveKind::Boolean,
            _ => return None,
        })
    }

    pub fn from_java_name(name: &str) -> Option<Self> {
        Some(match name {
            "byte" => PrimitiveKind::Int8,
            "char" => PrimitiveKind::Char16,
            "double" => PrimitiveKind::Float64,
            "float" => PrimitiveKind::Float32,
            "int" => PrimitiveKind::Int32,
            "long" => PrimitiveKind::Int64,
            "short" => PrimitiveKind::Int16,
            "boolean" => PrimitiveKind::Boolean,
            _ => return None,
        })
    }

    pub fn descriptor_char(&self) -> char {
        match self {
            PrimitiveKind::Int8 => 'B',
            PrimitiveKind::Int16 => 'S',
            PrimitiveKind::Int32 => 'I',
            PrimitiveKind::Int64 => 'J',
            PrimitiveKind::Float32 => 'F',
            PrimitiveKind::Float64 => 'D',
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Char16 => 'C',
        }
    }

    pub fn java_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Int8 => "byte",
            PrimitiveKind::Int16 => "short",
            PrimitiveKind::Int32 => "int",
            PrimitiveKind::Int64 => "long",
            PrimitiveKind::Float32 => "float",
            PrimitiveKind::Float64 => "double",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Char16 => "char",
        }
    }

    pub fn boxed_class_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Int8 => "java/lang/Byte",
            PrimitiveKind::Int16 => "java/lang/Short",
            PrimitiveKind::Int32 => "java/lang/Integer",
            PrimitiveKind::Int64 => "java/lang/Long",
            PrimitiveKind::Float32 => "java/lang/Float",
            PrimitiveKind::Float64 => "java/lang/Double",
            PrimitiveKind::Boolean => "java/lang/Boolean",
            PrimitiveKind::Char16 => "java/lang/Character",
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, PrimitiveKind::Float32 | PrimitiveKind::Float64)
    }

    pub fn is_wide(&self) -> bool {
        matches!(self, PrimitiveKind::Int64 | PrimitiveKind::Float64)
    }

    /// Recovers a value of this width from raw 64 bit integer bits: sign extension for the
    /// signed kinds, zero extension for char, low bit for boolean.
    pub fn widen(&self, raw: i64) -> i64 {
        match self {
            PrimitiveKind::Int8 => raw as i8 as i64,
            PrimitiveKind::Int16 => raw as i16 as i64,
            PrimitiveKind::Int32 => raw as i32 as i64,
            PrimitiveKind::Char16 => raw as u16 as i64,
            PrimitiveKind::Boolean => raw & 1,
            PrimitiveKind::Int64 | PrimitiveKind::Float32 | PrimitiveKind::Float64 => raw,
        }
    }
}

/// Kind tag stored next to every field value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TypeKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    Char16,
    Reference,
    Null,
    PrimitiveArray(PrimitiveKind),
    ReferenceArray,
    ByteArray,
    CharArray,
    StringObject,
    FileHandle,
    RngState,
    Mapping,
    LinkedList,
    IntArray,
    InterfaceOpaque,
}

impl TypeKind {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Int8 => TypeKind::Int8,
            PrimitiveKind::Int16 => TypeKind::Int16,
            PrimitiveKind::Int32 => TypeKind::Int32,
            PrimitiveKind::Int64 => TypeKind::Int64,
            PrimitiveKind::Float32 => TypeKind::Float32,
            PrimitiveKind::Float64 => TypeKind::Float64,
            PrimitiveKind::Boolean => TypeKind::Boolean,
            PrimitiveKind::Char16 => TypeKind::Char16,
        }
    }

    /// Byte, char and int arrays have dedicated kinds, the other element kinds share `PrimitiveArray`.
    pub fn array_of(element: PrimitiveKind) -> Self {
        match element {
            PrimitiveKind::Int8 => TypeKind::ByteArray,
            PrimitiveKind::Char16 => TypeKind::CharArray,
            PrimitiveKind::Int32 => TypeKind::IntArray,
            other => TypeKind::PrimitiveArray(other),
        }
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        Some(match self {
            TypeKind::Int8 => PrimitiveKind::Int8,
            TypeKind::Int16 => PrimitiveKind::Int16,
            TypeKind::Int32 => PrimitiveKind::Int32,
            TypeKind::Int64 => PrimitiveKind::Int64,
            TypeKind::Float32 => PrimitiveKind::Float32,
            TypeKind::Float64 => PrimitiveKind::Float64,
            TypeKind::Boolean => PrimitiveKind::Boolean,
            TypeKind::Char16 => PrimitiveKind::Char16,
            _ => return None,
        })
    }

    pub fn array_element(&self) -> Option<PrimitiveKind> {
        match self {
            TypeKind::ByteArray => Some(PrimitiveKind::Int8),
            TypeKind::CharArray => Some(PrimitiveKind::Char16),
            TypeKind::IntArray => Some(PrimitiveKind::Int32),
            TypeKind::PrimitiveArray(element) => Some(*element),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.array_element().is_some() || matches!(self, TypeKind::ReferenceArray)
    }

    pub fn from_ptype(ptype: &PType) -> Self {
        if let Some(primitive) = PrimitiveKind::from_ptype(ptype) {
            return TypeKind::primitive(primitive);
        }
        match ptype {
            PType::Ref(ReferenceType::Class(name)) if name == "java/lang/String" => TypeKind::StringObject,
            PType::Ref(ReferenceType::Class(_)) => TypeKind::Reference,
            PType::Ref(ReferenceType::Array(component)) => match PrimitiveKind::from_ptype(component) {
                Some(element) => TypeKind::array_of(element),
                None => TypeKind::ReferenceArray,
            },
            _ => TypeKind::Null,
        }
    }
}

#[cfg(test)]
pub mod test {
    use bridge_common::descriptor_parser::parse_field_descriptor;

    use crate::type_kind::{PrimitiveKind, TypeKind};

    #[test]
    pub fn widening() {
        assert_eq!(PrimitiveKind::Int8.widen(0xFF), -1);
        assert_eq!(PrimitiveKind::Int16.widen(0x8000), -32768);
        assert_eq!(PrimitiveKind::Int32.widen(0xFFFF_FFFF), -1);
        assert_eq!(PrimitiveKind::Char16.widen(-1), 0xFFFF);
        assert_eq!(PrimitiveKind::Boolean.widen(3), 1);
        assert_eq!(PrimitiveKind::Int64.widen(0xFFFF_FFFF), 0xFFFF_FFFF);
    }

    #[test]
    pub fn kinds_from_descriptors() {
        let kind = |desc: &str| TypeKind::from_ptype(&parse_field_descriptor(desc).unwrap());
        assert_eq!(kind("[B"), TypeKind::ByteArray);
        assert_eq!(kind("[C"), TypeKind::CharArray);
        assert_eq!(kind("[I"), TypeKind::IntArray);
        assert_eq!(kind("[J"), TypeKind::PrimitiveArray(PrimitiveKind::Int64));
        assert_eq!(kind("[[I"), TypeKind::ReferenceArray);
        assert_eq!(kind("Ljava/lang/String;"), TypeKind::StringObject);
        assert_eq!(kind("Ljava/io/File;"), TypeKind::Reference);
        assert_eq!(kind("Z"), TypeKind::Boolean);
    }

    #[test]
    pub fn array_element_round_trip() {
        for element in [PrimitiveKind::Int8, PrimitiveKind::Int16, PrimitiveKind::Int32, PrimitiveKind::Int64, PrimitiveKind::Float32, PrimitiveKind::Float64, PrimitiveKind::Boolean, PrimitiveKind::Char16] {
            assert_eq!(TypeKind::array_of(element).array_element(), Some(element));
            assert_eq!(PrimitiveKind::from_descriptor_char(element.descriptor_char()), Some(element));
            assert_eq!(PrimitiveKind::from_java_name(element.java_name()), Some(element));
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum PType {
    ByteType,
    CharType,
    DoubleType,
    FloatType,
    IntType,
    LongType,
    Ref(ReferenceType),
    ShortType,
    BooleanType,
    VoidType,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ReferenceType {
    Class(String),
    Array(Box<PType>),
}

impl PType {
    /// Operand stack slots taken by a value of this type. Void takes none.
    pub fn slot_size(&self) -> usize {
        match self {
            PType::LongType | PType::DoubleType => 2,
            PType::VoidType => 0,
            _ => 1,
        }
    }

    pub fn is_wide(&self) -> bool {
        self.slot_size() == 2
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, PType::Ref(_) | PType::VoidType)
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, PType::Ref(_))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, PType::VoidType)
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            PType::Ref(ReferenceType::Class(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    fn base_char(&self) -> Option<char> {
        Some(match self {
            PType::ByteType => 'B',
            PType::CharType => 'C',
            PType::DoubleType => 'D',
            PType::FloatType => 'F',
            PType::IntType => 'I',
            PType::LongType => 'J',
            PType::ShortType => 'S',
            PType::BooleanType => 'Z',
            PType::VoidType => 'V',
            PType::Ref(_) => return None,
        })
    }

    pub fn jvm_representation(&self) -> String {
        match self {
            PType::Ref(ReferenceType::Class(name)) => format!("L{};", name),
            PType::Ref(ReferenceType::Array(component)) => format!("[{}", component.jvm_representation()),
            base => base.base_char().map(String::from).unwrap_or_default(),
        }
    }
}

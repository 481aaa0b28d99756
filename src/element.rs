use std::fmt;
use std::sync::Arc;

use crate::buffer::ArrayRef;
use crate::error::BufferError;

pub const SIZEOF_BYTE: usize = 1;
pub const SIZEOF_SHORT: usize = 2;
pub const SIZEOF_CHAR: usize = 2;
pub const SIZEOF_INT: usize = 4;
pub const SIZEOF_FLOAT: usize = 4;
pub const SIZEOF_LONG: usize = 8;
pub const SIZEOF_DOUBLE: usize = 8;
pub const SIZEOF_POINTER: usize = size_of::<usize>();

/// The closed set of element kinds a buffer view can carry.
///
/// The discriminants are the raw tags foreign glue code uses, see `TryFrom<u8>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementKind {
    Byte = 0,
    Char = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    PointerSized = 7,
}

impl ElementKind {
    pub const ALL: [ElementKind; 8] = [
        ElementKind::Byte,
        ElementKind::Char,
        ElementKind::Short,
        ElementKind::Int,
        ElementKind::Long,
        ElementKind::Float,
        ElementKind::Double,
        ElementKind::PointerSized,
    ];

    /// width of one element in bytes
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            ElementKind::Byte => SIZEOF_BYTE,
            ElementKind::Char => SIZEOF_CHAR,
            ElementKind::Short => SIZEOF_SHORT,
            ElementKind::Int => SIZEOF_INT,
            ElementKind::Long => SIZEOF_LONG,
            ElementKind::Float => SIZEOF_FLOAT,
            ElementKind::Double => SIZEOF_DOUBLE,
            ElementKind::PointerSized => SIZEOF_POINTER,
        }
    }
}

impl TryFrom<u8> for ElementKind {
    type Error = BufferError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        ElementKind::ALL
            .get(tag as usize)
            .copied()
            .ok_or(BufferError::UnsupportedVariant(tag))
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Byte => "byte",
            ElementKind::Char => "char",
            ElementKind::Short => "short",
            ElementKind::Int => "int",
            ElementKind::Long => "long",
            ElementKind::Float => "float",
            ElementKind::Double => "double",
            ElementKind::PointerSized => "pointer",
        };
        f.write_str(name)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Rust element types that can back an array view.
pub trait Element: sealed::Sealed + Copy + 'static {
    const KIND: ElementKind;

    fn into_array(array: Arc<[Self]>) -> ArrayRef;
}

macro_rules! element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Element for $ty {
                const KIND: ElementKind = ElementKind::$kind;

                fn into_array(array: Arc<[Self]>) -> ArrayRef {
                    ArrayRef::$kind(array)
                }
            }
        )*
    };
}

element! {
    u8 => Byte,
    u16 => Char,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    usize => PointerSized,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sizes_match_rust_types() {
        assert_eq!(ElementKind::Byte.size(), size_of::<u8>());
        assert_eq!(ElementKind::Char.size(), size_of::<u16>());
        assert_eq!(ElementKind::Short.size(), size_of::<i16>());
        assert_eq!(ElementKind::Int.size(), size_of::<i32>());
        assert_eq!(ElementKind::Long.size(), size_of::<i64>());
        assert_eq!(ElementKind::Float.size(), size_of::<f32>());
        assert_eq!(ElementKind::Double.size(), size_of::<f64>());
        assert_eq!(ElementKind::PointerSized.size(), size_of::<*const u8>());
    }

    #[test]
    fn tags_round_trip() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::try_from(kind as u8).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(
            ElementKind::try_from(8),
            Err(BufferError::UnsupportedVariant(8))
        );
        assert_eq!(
            ElementKind::try_from(u8::MAX),
            Err(BufferError::UnsupportedVariant(u8::MAX))
        );
    }
}

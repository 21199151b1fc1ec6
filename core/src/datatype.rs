//! datatype.rs
//! Element type tags and the compile-time type → tag mapping.
use std::any::TypeId;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::types::CompressionError;

/// Runtime tag for the eight supported fixed-width integer element types.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Char      = 0,
    UChar     = 1,
    Short     = 2,
    UShort    = 3,
    Int       = 4,
    UInt      = 5,
    LongLong  = 6,
    ULongLong = 7,
}

impl TypeTag {
    pub const ALL: [TypeTag; 8] = [
        TypeTag::Char,
        TypeTag::UChar,
        TypeTag::Short,
        TypeTag::UShort,
        TypeTag::Int,
        TypeTag::UInt,
        TypeTag::LongLong,
        TypeTag::ULongLong,
    ];

    /// Width of one element in bytes.
    pub fn size_of(self) -> usize {
        match self {
            TypeTag::Char | TypeTag::UChar => 1,
            TypeTag::Short | TypeTag::UShort => 2,
            TypeTag::Int | TypeTag::UInt => 4,
            TypeTag::LongLong | TypeTag::ULongLong => 8,
        }
    }

    pub fn verify(raw: u16) -> Result<TypeTag, CompressionError> {
        TypeTag::try_from_primitive(raw)
            .map_err(|_| CompressionError::not_supported(format!("unknown element type tag: 0x{:x}", raw)))
    }
}

/// Element types with a statically known tag.
pub trait Element: Copy + Send + 'static {
    const TYPE: TypeTag;
}

macro_rules! impl_element {
    ($($t:ty => $tag:ident),* $(,)?) => {
        $(impl Element for $t { const TYPE: TypeTag = TypeTag::$tag; })*
    };
}

impl_element! {
    i8  => Char,
    u8  => UChar,
    i16 => Short,
    u16 => UShort,
    i32 => Int,
    u32 => UInt,
    i64 => LongLong,
    u64 => ULongLong,
}

/// Map `T` to its tag, failing with `NotSupported` for any other type.
///
/// Only the type is inspected; use `<T as Element>::TYPE` where the bound is
/// available and the check can happen at compile time.
pub fn type_tag<T: 'static>() -> Result<TypeTag, CompressionError> {
    let id = TypeId::of::<T>();
    let tag = if id == TypeId::of::<i8>() {
        TypeTag::Char
    } else if id == TypeId::of::<u8>() {
        TypeTag::UChar
    } else if id == TypeId::of::<i16>() {
        TypeTag::Short
    } else if id == TypeId::of::<u16>() {
        TypeTag::UShort
    } else if id == TypeId::of::<i32>() {
        TypeTag::Int
    } else if id == TypeId::of::<u32>() {
        TypeTag::UInt
    } else if id == TypeId::of::<i64>() {
        TypeTag::LongLong
    } else if id == TypeId::of::<u64>() {
        TypeTag::ULongLong
    } else {
        return Err(CompressionError::not_supported("the given type is not supported"));
    };
    Ok(tag)
}

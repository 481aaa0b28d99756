//! Buffer helpers for native-call glue.
//!
//! A [`BufferView`] is a typed window (bytes, chars, shorts, ints, longs,
//! floats, doubles or pointer-sized words) over either off-heap memory or a
//! shared in-process array. The functions in [`glue`] tell wrappers how to
//! hand such a view to native code: whether it is direct, where its cursor
//! sits in bytes, and whether enough of it remains for the call.

pub mod glue;

mod buffer;
mod direct;
mod element;
mod error;
mod platform;

pub use buffer::{ArrayRef, Backing, BufferView};
pub use direct::DirectRegion;
pub use element::{
    Element, ElementKind, SIZEOF_BYTE, SIZEOF_CHAR, SIZEOF_DOUBLE, SIZEOF_FLOAT, SIZEOF_INT,
    SIZEOF_LONG, SIZEOF_POINTER, SIZEOF_SHORT,
};
pub use error::{BackingKind, BufferError, Unit};
pub use glue::{
    allocate_direct, array_byte_offset, backing_array, check_array_range, check_buffer_range,
    check_buffer_range_bytes, direct_byte_offset, is_direct, is_little_endian, native_order,
};
pub use platform::{ByteOrder, Platform};

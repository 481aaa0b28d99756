use core::slice;
use std::{ptr::NonNull, sync::Arc};

use crate::{
    direct::DirectRegion,
    element::{Element, ElementKind},
    error::{BackingKind, BufferError, Unit},
    platform::{ByteOrder, Platform},
};

/// A shared in-process array, tagged with its element kind.
#[derive(Debug, Clone)]
pub enum ArrayRef {
    Byte(Arc<[u8]>),
    Char(Arc<[u16]>),
    Short(Arc<[i16]>),
    Int(Arc<[i32]>),
    Long(Arc<[i64]>),
    Float(Arc<[f32]>),
    Double(Arc<[f64]>),
    PointerSized(Arc<[usize]>),
}

impl ArrayRef {
    pub fn kind(&self) -> ElementKind {
        match self {
            ArrayRef::Byte(_) => ElementKind::Byte,
            ArrayRef::Char(_) => ElementKind::Char,
            ArrayRef::Short(_) => ElementKind::Short,
            ArrayRef::Int(_) => ElementKind::Int,
            ArrayRef::Long(_) => ElementKind::Long,
            ArrayRef::Float(_) => ElementKind::Float,
            ArrayRef::Double(_) => ElementKind::Double,
            ArrayRef::PointerSized(_) => ElementKind::PointerSized,
        }
    }

    /// length in elements
    pub fn len(&self) -> usize {
        match self {
            ArrayRef::Byte(a) => a.len(),
            ArrayRef::Char(a) => a.len(),
            ArrayRef::Short(a) => a.len(),
            ArrayRef::Int(a) => a.len(),
            ArrayRef::Long(a) => a.len(),
            ArrayRef::Float(a) => a.len(),
            ArrayRef::Double(a) => a.len(),
            ArrayRef::PointerSized(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///address of element 0, for handing to native code together with `array_byte_offset`
    pub fn as_ptr(&self) -> *const u8 {
        match self {
            ArrayRef::Byte(a) => a.as_ptr(),
            ArrayRef::Char(a) => a.as_ptr().cast(),
            ArrayRef::Short(a) => a.as_ptr().cast(),
            ArrayRef::Int(a) => a.as_ptr().cast(),
            ArrayRef::Long(a) => a.as_ptr().cast(),
            ArrayRef::Float(a) => a.as_ptr().cast(),
            ArrayRef::Double(a) => a.as_ptr().cast(),
            ArrayRef::PointerSized(a) => a.as_ptr().cast(),
        }
    }

    /// Same storage, compared by address.
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        self.kind() == other.kind() && self.as_ptr() == other.as_ptr() && self.len() == other.len()
    }
}

/// Storage behind a view.
#[derive(Debug, Clone)]
pub enum Backing {
    /// `start` is the byte offset of the view's element 0 inside the region.
    Direct {
        region: Arc<DirectRegion>,
        start: usize,
    },
    /// `offset` is the array index of the view's element 0.
    Array { array: ArrayRef, offset: usize },
}

impl Backing {
    pub fn kind(&self) -> BackingKind {
        match self {
            Backing::Direct { .. } => BackingKind::Direct,
            Backing::Array { .. } => BackingKind::Array,
        }
    }
}

/// A typed window over direct or array storage with an NIO-style cursor.
///
/// Cursor values are in elements and always satisfy
/// `position <= limit <= capacity`.
#[derive(Debug, Clone)]
pub struct BufferView {
    kind: ElementKind,
    backing: Backing,
    position: usize,
    limit: usize,
    capacity: usize,
    order: ByteOrder,
}

impl BufferView {
    /// Byte view over the whole region.
    pub fn direct(region: Arc<DirectRegion>, order: ByteOrder) -> Self {
        let capacity = region.len();
        Self {
            kind: ElementKind::Byte,
            backing: Backing::Direct { region, start: 0 },
            position: 0,
            limit: capacity,
            capacity,
            order,
        }
    }

    pub fn wrap<T: Element>(array: Arc<[T]>) -> Self {
        let capacity = array.len();
        let order = match T::KIND {
            ElementKind::Byte => ByteOrder::BigEndian,
            _ => Platform::host().native_order(),
        };
        Self {
            kind: T::KIND,
            backing: Backing::Array {
                array: T::into_array(array),
                offset: 0,
            },
            position: 0,
            limit: capacity,
            capacity,
            order,
        }
    }

    /// Wraps the whole array with the cursor on `offset..offset + len`.
    pub fn wrap_range<T: Element>(
        array: Arc<[T]>,
        offset: usize,
        len: usize,
    ) -> Result<Self, BufferError> {
        if array.len() < offset.saturating_add(len) {
            return Err(BufferError::out_of_bounds(
                len,
                array.len().saturating_sub(offset),
                Unit::Elements,
            ));
        }
        let mut view = Self::wrap(array);
        view.limit = offset + len;
        view.position = offset;
        Ok(view)
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn element_size(&self) -> usize {
        self.kind.size()
    }

    pub fn backing(&self) -> &Backing {
        &self.backing
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    #[inline]
    pub fn remaining_bytes(&self) -> usize {
        self.remaining() * self.element_size()
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn set_order(&mut self, order: ByteOrder) -> &mut Self {
        self.order = order;
        self
    }

    pub fn set_position(&mut self, position: usize) -> Result<&mut Self, BufferError> {
        if position > self.limit {
            return Err(self.invalid_cursor(position, self.limit));
        }
        self.position = position;
        Ok(self)
    }

    /// Moves the limit, pulling the position back if it would end up past it.
    pub fn set_limit(&mut self, limit: usize) -> Result<&mut Self, BufferError> {
        if limit > self.capacity {
            return Err(self.invalid_cursor(self.position, limit));
        }
        self.limit = limit;
        self.position = self.position.min(limit);
        Ok(self)
    }

    pub fn rewind(&mut self) -> &mut Self {
        self.position = 0;
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.position = 0;
        self.limit = self.capacity;
        self
    }

    pub fn flip(&mut self) -> &mut Self {
        self.limit = self.position;
        self.position = 0;
        self
    }

    fn invalid_cursor(&self, position: usize, limit: usize) -> BufferError {
        BufferError::InvalidCursor {
            position,
            limit,
            capacity: self.capacity,
        }
    }

    fn unsupported(&self, operation: &'static str) -> BufferError {
        BufferError::UnsupportedBackingStore {
            kind: self.kind,
            backing: self.backing.kind(),
            operation,
        }
    }

    /// A view of the remaining elements sharing this storage.
    ///
    /// The new view starts at the current position, so its array offset (or
    /// direct start) absorbs the position.
    pub fn slice(&self) -> Self {
        let backing = match &self.backing {
            Backing::Direct { region, start } => Backing::Direct {
                region: Arc::clone(region),
                start: start + self.position * self.element_size(),
            },
            Backing::Array { array, offset } => Backing::Array {
                array: array.clone(),
                offset: offset + self.position,
            },
        };
        let remaining = self.remaining();
        Self {
            kind: self.kind,
            backing,
            position: 0,
            limit: remaining,
            capacity: remaining,
            order: self.order,
        }
    }

    /// Views the remaining bytes of a direct buffer as elements of `kind`.
    ///
    /// Trailing bytes that do not fill a whole element are not part of the
    /// new view.
    pub fn reinterpret(&self, kind: ElementKind) -> Result<Self, BufferError> {
        let Backing::Direct { region, start } = &self.backing else {
            return Err(self.unsupported("reinterpret"));
        };
        let capacity = self.remaining_bytes() / kind.size();
        Ok(Self {
            kind,
            backing: Backing::Direct {
                region: Arc::clone(region),
                start: start + self.position * self.element_size(),
            },
            position: 0,
            limit: capacity,
            capacity,
            order: self.order,
        })
    }

    pub fn is_direct(&self) -> bool {
        matches!(self.backing, Backing::Direct { .. })
    }

    /// Byte offset of the cursor from the view's base address.
    pub fn direct_byte_offset(&self) -> Result<usize, BufferError> {
        match self.backing {
            Backing::Direct { .. } => Ok(self.position * self.element_size()),
            Backing::Array { .. } => Err(self.unsupported("direct byte offset")),
        }
    }

    /// Address of the view's element 0.
    pub fn base_address(&self) -> Result<NonNull<u8>, BufferError> {
        match &self.backing {
            // Safety: start never exceeds the region length
            Backing::Direct { region, start } => Ok(unsafe { region.base_address().add(*start) }),
            Backing::Array { .. } => Err(self.unsupported("base address")),
        }
    }

    /// The view's bytes, from element 0 up to capacity.
    pub fn bytes(&self) -> Result<&[u8], BufferError> {
        let base = self.base_address()?;
        let len = self.capacity * self.element_size();
        Ok(unsafe { slice::from_raw_parts(base.as_ptr(), len) })
    }

    pub fn backing_array(&self) -> Result<&ArrayRef, BufferError> {
        match &self.backing {
            Backing::Array { array, .. } => Ok(array),
            Backing::Direct { .. } => Err(self.unsupported("backing array")),
        }
    }

    /// Array index of the view's element 0.
    pub fn array_offset(&self) -> Result<usize, BufferError> {
        match self.backing {
            Backing::Array { offset, .. } => Ok(offset),
            Backing::Direct { .. } => Err(self.unsupported("array offset")),
        }
    }

    /// Byte offset of the cursor from the start of the backing array,
    /// counting both the array offset and the position.
    pub fn array_byte_offset(&self) -> Result<usize, BufferError> {
        match self.backing {
            Backing::Array { offset, .. } => Ok(self.element_size() * (offset + self.position)),
            Backing::Direct { .. } => Err(self.unsupported("array byte offset")),
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::direct::DirectRegion;
    use crate::element::ElementKind;
    use crate::error::{BackingKind, BufferError};
    use crate::platform::ByteOrder;

    use super::BufferView;

    fn direct(len: usize) -> BufferView {
        BufferView::direct(
            Arc::new(DirectRegion::new(len).unwrap()),
            ByteOrder::LittleEndian,
        )
    }

    #[test]
    fn cursor_rejects_position_past_limit() {
        let mut view = BufferView::wrap::<i32>(Arc::from(vec![0; 8]));
        view.set_limit(4).unwrap();
        assert_eq!(
            view.set_position(5).unwrap_err(),
            BufferError::InvalidCursor {
                position: 5,
                limit: 4,
                capacity: 8
            }
        );
        assert!(view.set_limit(9).is_err());
        assert_eq!(view.position(), 0);
    }

    #[test]
    fn set_limit_pulls_position_back() {
        let mut view = BufferView::wrap::<u8>(Arc::from(vec![0; 8]));
        view.set_position(6).unwrap();
        view.set_limit(3).unwrap();
        assert_eq!(view.position(), 3);
        assert!(!view.has_remaining());
    }

    #[test]
    fn flip_and_clear() {
        let mut view = BufferView::wrap::<i16>(Arc::from(vec![0; 10]));
        view.set_position(4).unwrap();
        view.flip();
        assert_eq!((view.position(), view.limit()), (0, 4));
        view.clear();
        assert_eq!((view.position(), view.limit()), (0, 10));
    }

    #[test]
    fn wrap_range_sets_cursor_not_offset() {
        let view = BufferView::wrap_range::<f64>(Arc::from(vec![0.0; 10]), 2, 5).unwrap();
        assert_eq!(view.position(), 2);
        assert_eq!(view.limit(), 7);
        assert_eq!(view.array_offset().unwrap(), 0);
        assert_eq!(view.array_byte_offset().unwrap(), 16);
    }

    #[test]
    fn wrap_range_out_of_bounds() {
        let err = BufferView::wrap_range::<u8>(Arc::from(vec![0; 4]), 3, 2).unwrap_err();
        assert!(matches!(
            err,
            BufferError::OutOfBounds {
                required: 2,
                available: 1,
                ..
            }
        ));
    }

    #[test]
    fn array_slice_moves_offset() {
        let mut view = BufferView::wrap::<f32>(Arc::from(vec![0.0; 10]));
        view.set_position(2).unwrap();
        let mut slice = view.slice();
        assert_eq!(slice.array_offset().unwrap(), 2);
        assert_eq!(slice.capacity(), 8);
        slice.set_position(3).unwrap();
        assert_eq!(slice.array_byte_offset().unwrap(), 20);
        assert!(slice.backing_array().unwrap().ptr_eq(view.backing_array().unwrap()));
    }

    #[test]
    fn direct_slice_moves_base_address() {
        let mut view = direct(64);
        view.set_position(8).unwrap();
        let slice = view.slice();
        let base = view.base_address().unwrap().as_ptr() as usize;
        assert_eq!(slice.base_address().unwrap().as_ptr() as usize, base + 8);
        assert_eq!(slice.direct_byte_offset().unwrap(), 0);
        assert_eq!(slice.bytes().unwrap().len(), 56);
    }

    #[test]
    fn reinterpret_drops_partial_elements() {
        let mut view = direct(30);
        view.set_position(1).unwrap();
        let longs = view.reinterpret(ElementKind::Long).unwrap();
        assert_eq!(longs.capacity(), 3);
        assert_eq!(longs.order(), ByteOrder::LittleEndian);

        let mut ints = view.reinterpret(ElementKind::Int).unwrap();
        assert_eq!(ints.capacity(), 7);
        ints.set_position(5).unwrap();
        assert_eq!(ints.direct_byte_offset().unwrap(), 20);
    }

    #[test]
    fn reinterpret_requires_direct() {
        let view = BufferView::wrap::<u8>(Arc::from(vec![0; 8]));
        assert_eq!(
            view.reinterpret(ElementKind::Int).unwrap_err(),
            BufferError::UnsupportedBackingStore {
                kind: ElementKind::Byte,
                backing: BackingKind::Array,
                operation: "reinterpret",
            }
        );
    }

    #[test]
    fn direct_view_has_no_array() {
        let view = direct(8);
        assert!(view.backing_array().is_err());
        assert!(view.array_offset().is_err());
        assert!(view.array_byte_offset().is_err());
    }
}

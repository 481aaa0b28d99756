//! The helper surface generated native-call wrappers use.
//!
//! Every function takes the view as an `Option`: `None` stands for a null
//! buffer argument, which the wrappers pass straight through to native code.
//! A null buffer counts as direct, has offset 0 and passes every range check.

use std::sync::Arc;

use crate::{
    buffer::{ArrayRef, BufferView},
    direct::DirectRegion,
    error::{BufferError, Unit},
    platform::Platform,
};

pub fn is_little_endian(platform: &Platform) -> bool {
    platform.is_little_endian_host()
}

/// Allocates `size` bytes of off-heap memory as a byte view in native order.
pub fn allocate_direct(platform: &Platform, size: usize) -> std::io::Result<BufferView> {
    let region = DirectRegion::new(size)?;
    let view = BufferView::direct(Arc::new(region), platform.default_order());
    Ok(native_order(view, platform))
}

/// Sets the view to the host byte order where the host allows it.
pub fn native_order(mut view: BufferView, platform: &Platform) -> BufferView {
    if platform.supports_explicit_byte_order() {
        view.set_order(platform.native_order());
    } else {
        tracing::debug!(
            order = ?view.order(),
            "host has no byte order configuration, keeping implicit order"
        );
    }
    view
}

pub fn is_direct(view: Option<&BufferView>) -> bool {
    view.is_none_or(BufferView::is_direct)
}

pub fn direct_byte_offset(view: Option<&BufferView>) -> Result<usize, BufferError> {
    view.map_or(Ok(0), BufferView::direct_byte_offset)
}

pub fn backing_array(view: Option<&BufferView>) -> Result<Option<&ArrayRef>, BufferError> {
    view.map(BufferView::backing_array).transpose()
}

pub fn array_byte_offset(view: Option<&BufferView>) -> Result<usize, BufferError> {
    view.map_or(Ok(0), BufferView::array_byte_offset)
}

/// Fails unless `array` holds at least `min_remaining` elements from `offset` on.
pub fn check_array_range<T>(
    array: Option<&[T]>,
    offset: usize,
    min_remaining: usize,
) -> Result<(), BufferError> {
    let Some(array) = array else {
        return Ok(());
    };
    if array.len() < offset.saturating_add(min_remaining) {
        return Err(BufferError::out_of_bounds(
            min_remaining,
            array.len().saturating_sub(offset),
            Unit::Elements,
        ));
    }
    Ok(())
}

pub fn check_buffer_range(
    view: Option<&BufferView>,
    min_remaining: usize,
) -> Result<(), BufferError> {
    let Some(view) = view else {
        return Ok(());
    };
    let remaining = view.remaining();
    if remaining < min_remaining {
        return Err(BufferError::out_of_bounds(
            min_remaining,
            remaining,
            Unit::Elements,
        ));
    }
    Ok(())
}

pub fn check_buffer_range_bytes(
    view: Option<&BufferView>,
    min_remaining_bytes: usize,
) -> Result<(), BufferError> {
    let Some(view) = view else {
        return Ok(());
    };
    let remaining = view.remaining_bytes();
    if remaining < min_remaining_bytes {
        return Err(BufferError::out_of_bounds(
            min_remaining_bytes,
            remaining,
            Unit::Bytes,
        ));
    }
    Ok(())
}

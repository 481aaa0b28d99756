/// Byte order of multi-byte elements in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

/// Capabilities of the host the glue runs on.
///
/// Built once at startup and handed to the allocation helpers. A constrained
/// host has no way to configure a buffer's byte order; its buffers always use
/// the platform order implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    little_endian: bool,
    explicit_byte_order: bool,
}

impl Platform {
    pub const fn new(little_endian: bool, explicit_byte_order: bool) -> Self {
        Self {
            little_endian,
            explicit_byte_order,
        }
    }

    /// the machine this was compiled for, with byte-order configuration
    pub const fn host() -> Self {
        Self::new(cfg!(target_endian = "little"), true)
    }

    /// the machine this was compiled for, without byte-order configuration
    pub const fn constrained() -> Self {
        Self::new(cfg!(target_endian = "little"), false)
    }

    pub fn is_little_endian_host(&self) -> bool {
        self.little_endian
    }

    pub fn supports_explicit_byte_order(&self) -> bool {
        self.explicit_byte_order
    }

    pub fn native_order(&self) -> ByteOrder {
        if self.little_endian {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }

    /// Order of a freshly allocated buffer, before any configuration.
    pub fn default_order(&self) -> ByteOrder {
        if self.explicit_byte_order {
            ByteOrder::BigEndian
        } else {
            self.native_order()
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::host()
    }
}

//! # Byte Order Conversion
//!
//! Host, network (big endian) and little endian conversions for the 8, 16 and
//! 32 bit integer types used by the wire protocols. The 8 bit conversions are the
//! identity and exist so callers can stay generic over the field width.

/// Byte order of a machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// Byte order of the host this code runs on.
    pub const fn host() -> Self {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }
}

/// Returns `true` when the host is big endian.
pub const fn is_big_endian() -> bool {
    matches!(Endianness::host(), Endianness::Big)
}

/// Integers that can move between host, network and little endian order.
pub trait ByteOrder: Copy {
    fn host_to_network(self) -> Self;
    fn network_to_host(self) -> Self;
    fn host_to_little_endian(self) -> Self;
    fn little_endian_to_host(self) -> Self;
}

macro_rules! impl_byte_order {
    ($($t:ty),*) => {
        $(
            impl ByteOrder for $t {
                #[inline]
                fn host_to_network(self) -> Self {
                    self.to_be()
                }

                #[inline]
                fn network_to_host(self) -> Self {
                    <$t>::from_be(self)
                }

                #[inline]
                fn host_to_little_endian(self) -> Self {
                    self.to_le()
                }

                #[inline]
                fn little_endian_to_host(self) -> Self {
                    <$t>::from_le(self)
                }
            }
        )*
    };
}

impl_byte_order!(u8, i8, u16, i16, u32, i32);

#[inline]
pub fn host_to_network<T: ByteOrder>(value: T) -> T {
    value.host_to_network()
}

#[inline]
pub fn network_to_host<T: ByteOrder>(value: T) -> T {
    value.network_to_host()
}

#[inline]
pub fn host_to_little_endian<T: ByteOrder>(value: T) -> T {
    value.host_to_little_endian()
}

#[inline]
pub fn little_endian_to_host<T: ByteOrder>(value: T) -> T {
    value.little_endian_to_host()
}

use std::fmt::Debug;

/// A value type that reserves one value as "no value".
///
/// The primary store marks removed entries by overwriting their value with
/// `empty_value()` instead of compacting the vector. Callers must never store
/// that value themselves.
pub trait EmptyValue: Copy + PartialEq {
    fn empty_value() -> Self;

    fn is_empty_value(&self) -> bool {
        *self == Self::empty_value()
    }
}

/// Fixed-width little endian encoding used by the dump list format.
pub trait FixedCodec: Copy {
    const ENCODED_LEN: usize;

    fn encode_to(&self, dst: &mut Vec<u8>);

    /// `bytes` must hold at least `ENCODED_LEN` bytes.
    fn decode(bytes: &[u8]) -> Self;
}

/// Identifier (key) type of the index.
pub trait IndexId: Copy + Ord + Debug + FixedCodec + 'static {}

impl<T> IndexId for T where T: Copy + Ord + Debug + FixedCodec + 'static {}

/// Value type of the index.
pub trait IndexValue: Copy + Ord + Debug + EmptyValue + FixedCodec + 'static {}

impl<T> IndexValue for T where T: Copy + Ord + Debug + EmptyValue + FixedCodec + 'static {}

macro_rules! impl_integer_element {
    ($($t:ty),*) => {
        $(
            impl EmptyValue for $t {
                #[inline]
                fn empty_value() -> Self {
                    0
                }
            }

            impl FixedCodec for $t {
                const ENCODED_LEN: usize = std::mem::size_of::<$t>();

                fn encode_to(&self, dst: &mut Vec<u8>) {
                    dst.extend_from_slice(&self.to_le_bytes());
                }

                fn decode(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(&bytes[..std::mem::size_of::<$t>()]);
                    <$t>::from_le_bytes(buf)
                }
            }
        )*
    };
}

impl_integer_element!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

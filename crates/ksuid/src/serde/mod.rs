use ::serde::{Deserializer, Serializer, de};
use core::{fmt, marker::PhantomData};

use crate::{KSUID_BYTES, Ksuid};

/// Serializes a [`Ksuid`] as its 27-character base-62 string.
///
/// Use with `#[serde(with = "ksuid::as_base62")]`.
pub mod as_base62 {
    use super::*;

    /// Writes `id` as a base-62 string.
    pub fn serialize<S>(id: &Ksuid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let buf = id.encode_to_buf();
        // Base-62 output is always ASCII
        let encoded =
            core::str::from_utf8(&buf).map_err(<S::Error as ::serde::ser::Error>::custom)?;
        s.serialize_str(encoded)
    }

    /// Reads a base-62 string, rejecting malformed or overflowing input.
    pub fn deserialize<'de, D>(d: D) -> Result<Ksuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base62Visitor(PhantomData<Ksuid>);

        impl de::Visitor<'_> for Base62Visitor {
            type Value = Ksuid;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 27-character base-62 KSUID string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ksuid::decode(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(Base62Visitor(PhantomData))
    }
}

/// Serializes a [`Ksuid`] as its 20-byte binary form.
///
/// Use with `#[serde(with = "ksuid::as_bytes")]`. Self-describing formats
/// without a byte type (such as JSON) carry it as an array of integers.
pub mod as_bytes {
    use super::*;

    /// Writes `id` as 20 big-endian bytes.
    pub fn serialize<S>(id: &Ksuid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_bytes(&id.to_bytes())
    }

    /// Reads a byte string or a sequence of exactly 20 bytes.
    pub fn deserialize<'de, D>(d: D) -> Result<Ksuid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BytesVisitor(PhantomData<Ksuid>);

        impl<'de> de::Visitor<'de> for BytesVisitor {
            type Value = Ksuid;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("20 KSUID bytes")
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ksuid::from_bytes(v).map_err(de::Error::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut bytes = [0_u8; KSUID_BYTES];
                for (i, byte) in bytes.iter_mut().enumerate() {
                    *byte = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(KSUID_BYTES + 1, &self));
                }
                Ok(Ksuid::from_byte_array(bytes))
            }
        }

        d.deserialize_bytes(BytesVisitor(PhantomData))
    }
}

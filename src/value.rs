//! The typed scalar value at the heart of Stanza.
//!
//! [`Value`] is a closed tagged union of around twenty kinds: booleans,
//! signed/unsigned integers at every width from 8 to 128 bits, three float
//! widths plus a 128-bit decimal, calendar/clock kinds, durations, network
//! addresses, URIs, UUIDs, text, opaque bytes, and an explicit no-value
//! state. A `Value` is immutable once constructed.
//!
//! ## Projections
//!
//! Every kind exposes the full battery of `as_x` projections. A projection
//! returns `None` when the conversion would lose range or cross incompatible
//! kinds — it never truncates, clamps, or panics. Each projection has an
//! `as_x_or(default)` overload substituting the default only on absence.
//!
//! ```rust
//! use stanza::Value;
//!
//! let v = Value::from(300);
//! assert_eq!(v.as_i16(), Some(300));
//! assert_eq!(v.as_i8(), None);          // out of range, never truncated
//! assert_eq!(v.as_i8_or(0), 0);
//! assert_eq!(v.as_f64(), Some(300.0));  // widening always succeeds
//! ```
//!
//! ## Canonical text
//!
//! [`Value::as_string`] (and `Display`) renders the canonical text
//! projection used by the serializer and the pattern matcher: invariant
//! decimal numerics, `True`/`False`, ISO-8601 date/time forms with minimal
//! round-tripping fractions, dotted durations, lowercase hex for bytes.

use crate::duration;
use crate::size::Size;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Timelike, Utc};
use half::f16;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use url::Url;
use uuid::Uuid;

/// Discriminant of a [`Value`], also the vocabulary of `(tag)` annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    None,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F16,
    F32,
    F64,
    Decimal,
    DateTime,
    Date,
    Time,
    Duration,
    Ipv4,
    Ipv6,
    Uri,
    Uuid,
    Text,
    Bytes,
}

impl Kind {
    /// The annotation tag for this kind, if one exists.
    ///
    /// `None` (no value), `Text`, and `F64` have no tag: text and 64-bit
    /// floats are the default-inferred shapes and need no annotation.
    #[must_use]
    pub const fn tag(&self) -> Option<&'static str> {
        match self {
            Kind::Bool => Some("bool"),
            Kind::I8 => Some("i8"),
            Kind::I16 => Some("i16"),
            Kind::I32 => Some("i32"),
            Kind::I64 => Some("i64"),
            Kind::I128 => Some("i128"),
            Kind::U8 => Some("u8"),
            Kind::U16 => Some("u16"),
            Kind::U32 => Some("u32"),
            Kind::U64 => Some("u64"),
            Kind::U128 => Some("u128"),
            Kind::F16 => Some("f16"),
            Kind::F32 => Some("f32"),
            Kind::Decimal => Some("d128"),
            Kind::DateTime => Some("datetime"),
            Kind::Date => Some("dateonly"),
            Kind::Time => Some("timeonly"),
            Kind::Duration => Some("duration"),
            Kind::Ipv4 => Some("ipv4"),
            Kind::Ipv6 => Some("ipv6"),
            Kind::Uri => Some("uri"),
            Kind::Uuid => Some("uuid"),
            Kind::Bytes => Some("binary"),
            Kind::None | Kind::F64 | Kind::Text => None,
        }
    }

    /// Resolves an annotation tag from the fixed vocabulary.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Kind> {
        Some(match tag {
            "bool" => Kind::Bool,
            "i8" => Kind::I8,
            "i16" => Kind::I16,
            "i32" => Kind::I32,
            "i64" => Kind::I64,
            "i128" => Kind::I128,
            "u8" => Kind::U8,
            "u16" => Kind::U16,
            "u32" => Kind::U32,
            "u64" => Kind::U64,
            "u128" => Kind::U128,
            "f16" => Kind::F16,
            "f32" => Kind::F32,
            "d128" => Kind::Decimal,
            "datetime" => Kind::DateTime,
            "dateonly" => Kind::Date,
            "timeonly" => Kind::Time,
            "duration" => Kind::Duration,
            "ipv4" => Kind::Ipv4,
            "ipv6" => Kind::Ipv6,
            "uri" => Kind::Uri,
            "uuid" => Kind::Uuid,
            "binary" => Kind::Bytes,
            _ => return None,
        })
    }
}

/// A typed scalar value.
///
/// See the [module documentation](self) for the projection and coercion
/// rules. Constructed via the `From` impls for host types or produced by the
/// parser.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Explicit no-value state. Every projection on it is absent.
    #[default]
    None,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F16(f16),
    F32(f32),
    F64(f64),
    Decimal(Decimal),
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
    Time(NaiveTime),
    Duration(TimeDelta),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Uri(Url),
    Uuid(Uuid),
    Text(String),
    Bytes(Vec<u8>),
}

/// Exact integral payload of a float projected into `T`; fractional or
/// out-of-range floats yield `None`. Non-negative floats route through
/// `u128`, so magnitudes in `[2^127, 2^128)` stay representable. Both
/// limits are exact in `f64` and themselves out of range, hence the
/// strict upper bounds.
fn float_integer<T>(f: f64) -> Option<T>
where
    T: TryFrom<i128> + TryFrom<u128>,
{
    if !f.is_finite() || f.fract() != 0.0 {
        return None;
    }
    if f < 0.0 {
        if f < -(2f64.powi(127)) {
            return None;
        }
        T::try_from(f as i128).ok()
    } else {
        if f >= 2f64.powi(128) {
            return None;
        }
        T::try_from(f as u128).ok()
    }
}

/// Exact integral payload of a decimal, if it has one.
fn decimal_integer(d: &Decimal) -> Option<i128> {
    if !d.fract().is_zero() {
        return None;
    }
    d.trunc().to_i128()
}

/// Big-endian unsigned-magnitude packing; shorter sequences zero-extend on
/// the left, sequences longer than `width` bytes are rejected.
fn bytes_magnitude(bytes: &[u8], width: usize) -> Option<u128> {
    if bytes.len() > width {
        return None;
    }
    Some(bytes.iter().fold(0u128, |acc, &b| (acc << 8) | b as u128))
}

fn float_epoch(f: f64) -> Option<DateTime<FixedOffset>> {
    if !f.is_finite() {
        return None;
    }
    let total_nanos = f * 1e9;
    if total_nanos < i64::MIN as f64 * 1e9 || total_nanos > i64::MAX as f64 * 1e9 {
        return None;
    }
    let total_nanos = total_nanos as i128;
    let secs = i64::try_from(total_nanos.div_euclid(1_000_000_000)).ok()?;
    let nanos = total_nanos.rem_euclid(1_000_000_000) as u32;
    DateTime::from_timestamp(secs, nanos).map(|dt| dt.fixed_offset())
}

fn int_epoch(secs: i128) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(i64::try_from(secs).ok()?, 0).map(|dt| dt.fixed_offset())
}

fn hex_string(bytes: &[u8]) -> String {
    use fmt::Write;
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{b:02x}");
        s
    })
}

pub(crate) fn parse_hex(text: &str) -> Option<Vec<u8>> {
    if text.len() % 2 != 0 {
        return None;
    }
    (0..text.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(text.get(i..i + 2)?, 16).ok())
        .collect()
}

macro_rules! integer_projections {
    ($(($as_fn:ident, $or_fn:ident, $ty:ty)),* $(,)?) => {$(
        #[doc = concat!("Range-checked projection to `", stringify!($ty), "`.")]
        ///
        /// Present iff the source holds an exact integral value that fits the
        /// target range. Out-of-range is absent, never truncation.
        #[must_use]
        pub fn $as_fn(&self) -> Option<$ty> {
            match self {
                Value::Bool(b) => Some(*b as u8 as $ty),
                Value::I8(v) => <$ty>::try_from(*v).ok(),
                Value::I16(v) => <$ty>::try_from(*v).ok(),
                Value::I32(v) => <$ty>::try_from(*v).ok(),
                Value::I64(v) => <$ty>::try_from(*v).ok(),
                Value::I128(v) => <$ty>::try_from(*v).ok(),
                Value::U8(v) => <$ty>::try_from(*v).ok(),
                Value::U16(v) => <$ty>::try_from(*v).ok(),
                Value::U32(v) => <$ty>::try_from(*v).ok(),
                Value::U64(v) => <$ty>::try_from(*v).ok(),
                Value::U128(v) => <$ty>::try_from(*v).ok(),
                Value::F16(v) => float_integer::<$ty>(f64::from(*v)),
                Value::F32(v) => float_integer::<$ty>(f64::from(*v)),
                Value::F64(v) => float_integer::<$ty>(*v),
                Value::Decimal(d) => decimal_integer(d).and_then(|i| <$ty>::try_from(i).ok()),
                Value::DateTime(dt) => <$ty>::try_from(dt.timestamp()).ok(),
                Value::Text(s) => s.trim().parse().ok(),
                Value::Bytes(b) => bytes_magnitude(b, std::mem::size_of::<$ty>())
                    .and_then(|m| <$ty>::try_from(m).ok()),
                _ => None,
            }
        }

        #[doc = concat!("[`Self::", stringify!($as_fn), "`] with a default for the absent case.")]
        #[must_use]
        pub fn $or_fn(&self, default: $ty) -> $ty {
            self.$as_fn().unwrap_or(default)
        }
    )*};
}

impl Value {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::None => Kind::None,
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::I128(_) => Kind::I128,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::U128(_) => Kind::U128,
            Value::F16(_) => Kind::F16,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Decimal(_) => Kind::Decimal,
            Value::DateTime(_) => Kind::DateTime,
            Value::Date(_) => Kind::Date,
            Value::Time(_) => Kind::Time,
            Value::Duration(_) => Kind::Duration,
            Value::Ipv4(_) => Kind::Ipv4,
            Value::Ipv6(_) => Kind::Ipv6,
            Value::Uri(_) => Kind::Uri,
            Value::Uuid(_) => Kind::Uuid,
            Value::Text(_) => Kind::Text,
            Value::Bytes(_) => Kind::Bytes,
        }
    }

    /// Returns `true` for the explicit no-value state.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    integer_projections! {
        (as_i8, as_i8_or, i8),
        (as_i16, as_i16_or, i16),
        (as_i32, as_i32_or, i32),
        (as_i64, as_i64_or, i64),
        (as_i128, as_i128_or, i128),
        (as_u8, as_u8_or, u8),
        (as_u16, as_u16_or, u16),
        (as_u32, as_u32_or, u32),
        (as_u64, as_u64_or, u64),
        (as_u128, as_u128_or, u128),
    }

    /// Boolean projection.
    ///
    /// Integers convert as nonzero = `true`; floats and decimals never
    /// convert to boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::I8(v) => Some(*v != 0),
            Value::I16(v) => Some(*v != 0),
            Value::I32(v) => Some(*v != 0),
            Value::I64(v) => Some(*v != 0),
            Value::I128(v) => Some(*v != 0),
            Value::U8(v) => Some(*v != 0),
            Value::U16(v) => Some(*v != 0),
            Value::U32(v) => Some(*v != 0),
            Value::U64(v) => Some(*v != 0),
            Value::U128(v) => Some(*v != 0),
            Value::Text(s) => match s.trim() {
                t if t.eq_ignore_ascii_case("true") => Some(true),
                t if t.eq_ignore_ascii_case("false") => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool_or(&self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }

    /// Projection to `f64`. Any numeric source widens, possibly losing
    /// precision; booleans never convert to floating point.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::I8(v) => Some(*v as f64),
            Value::I16(v) => Some(*v as f64),
            Value::I32(v) => Some(*v as f64),
            Value::I64(v) => Some(*v as f64),
            Value::I128(v) => Some(*v as f64),
            Value::U8(v) => Some(*v as f64),
            Value::U16(v) => Some(*v as f64),
            Value::U32(v) => Some(*v as f64),
            Value::U64(v) => Some(*v as f64),
            Value::U128(v) => Some(*v as f64),
            Value::F16(v) => Some(f64::from(*v)),
            Value::F32(v) => Some(f64::from(*v)),
            Value::F64(v) => Some(*v),
            Value::Decimal(d) => d.to_f64(),
            Value::DateTime(dt) => {
                Some(dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9)
            }
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64_or(&self, default: f64) -> f64 {
        self.as_f64().unwrap_or(default)
    }

    /// Projection to `f32`; like [`Self::as_f64`] but narrowed (always
    /// succeeds for numeric sources, possibly losing precision).
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|f| f as f32)
    }

    #[must_use]
    pub fn as_f32_or(&self, default: f32) -> f32 {
        self.as_f32().unwrap_or(default)
    }

    /// Projection to the 16-bit float kind.
    #[must_use]
    pub fn as_f16(&self) -> Option<f16> {
        self.as_f64().map(f16::from_f64)
    }

    #[must_use]
    pub fn as_f16_or(&self, default: f16) -> f16 {
        self.as_f16().unwrap_or(default)
    }

    /// Projection to the 128-bit decimal kind.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::I8(v) => Decimal::from_i8(*v),
            Value::I16(v) => Decimal::from_i16(*v),
            Value::I32(v) => Decimal::from_i32(*v),
            Value::I64(v) => Decimal::from_i64(*v),
            Value::I128(v) => Decimal::from_i128(*v),
            Value::U8(v) => Decimal::from_u8(*v),
            Value::U16(v) => Decimal::from_u16(*v),
            Value::U32(v) => Decimal::from_u32(*v),
            Value::U64(v) => Decimal::from_u64(*v),
            Value::U128(v) => Decimal::from_u128(*v),
            Value::F16(v) => Decimal::from_f64(f64::from(*v)),
            Value::F32(v) => Decimal::from_f32(*v),
            Value::F64(v) => Decimal::from_f64(*v),
            Value::Decimal(d) => Some(*d),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_decimal_or(&self, default: Decimal) -> Decimal {
        self.as_decimal().unwrap_or(default)
    }

    /// Projection to a date-with-offset.
    ///
    /// 32-bit-or-wider integers and 32/64-bit floats are read as signed
    /// Unix-epoch seconds at UTC (floats keep their fraction); 8/16-bit
    /// integers and `f16` never produce a date. Calendar dates compose at UTC
    /// midnight, clock times on 0001-01-01 UTC. Text parses as RFC 3339.
    #[must_use]
    pub fn as_date_time(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            Value::DateTime(dt) => Some(*dt),
            Value::Date(d) => d
                .and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc().fixed_offset()),
            Value::Time(t) => NaiveDate::from_ymd_opt(1, 1, 1)
                .map(|d| d.and_time(*t).and_utc().fixed_offset()),
            Value::I32(v) => int_epoch(*v as i128),
            Value::I64(v) => int_epoch(*v as i128),
            Value::I128(v) => int_epoch(*v),
            Value::U32(v) => int_epoch(*v as i128),
            Value::U64(v) => int_epoch(*v as i128),
            Value::U128(v) => int_epoch(i128::try_from(*v).ok()?),
            Value::F32(v) => float_epoch(f64::from(*v)),
            Value::F64(v) => float_epoch(*v),
            Value::Decimal(d) => float_epoch(d.to_f64()?),
            Value::Text(s) => DateTime::parse_from_rfc3339(s.trim()).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date_time_or(&self, default: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        self.as_date_time().unwrap_or(default)
    }

    /// Calendar-date projection: a simple decomposition of date-with-offset
    /// kinds, ISO `YYYY-MM-DD` parsing for text.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Time(_) => None,
            Value::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => self.as_date_time().map(|dt| dt.date_naive()),
        }
    }

    #[must_use]
    pub fn as_date_or(&self, default: NaiveDate) -> NaiveDate {
        self.as_date().unwrap_or(default)
    }

    /// Time-of-day projection: a simple decomposition of date-with-offset
    /// kinds, `HH:MM:SS[.f]` parsing for text.
    #[must_use]
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Value::Time(t) => Some(*t),
            Value::Date(_) => None,
            Value::Text(s) => NaiveTime::parse_from_str(s.trim(), "%H:%M:%S%.f").ok(),
            _ => self.as_date_time().map(|dt| dt.time()),
        }
    }

    #[must_use]
    pub fn as_time_or(&self, default: NaiveTime) -> NaiveTime {
        self.as_time().unwrap_or(default)
    }

    /// Duration projection; text parses all the grammars in [`duration`].
    #[must_use]
    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            Value::Duration(d) => Some(*d),
            Value::Text(s) => duration::parse(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_duration_or(&self, default: TimeDelta) -> TimeDelta {
        self.as_duration().unwrap_or(default)
    }

    /// IP address projection covering both the v4 and v6 kinds.
    #[must_use]
    pub fn as_ip_addr(&self) -> Option<IpAddr> {
        match self {
            Value::Ipv4(a) => Some(IpAddr::V4(*a)),
            Value::Ipv6(a) => Some(IpAddr::V6(*a)),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_ip_addr_or(&self, default: IpAddr) -> IpAddr {
        self.as_ip_addr().unwrap_or(default)
    }

    /// URI projection.
    #[must_use]
    pub fn as_uri(&self) -> Option<Url> {
        match self {
            Value::Uri(u) => Some(u.clone()),
            Value::Text(s) => Url::parse(s.trim()).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uri_or(&self, default: Url) -> Url {
        self.as_uri().unwrap_or(default)
    }

    /// UUID projection.
    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(u) => Some(*u),
            Value::Text(s) => Uuid::parse_str(s.trim()).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uuid_or(&self, default: Uuid) -> Uuid {
        self.as_uuid().unwrap_or(default)
    }

    /// Size projection: text parses the SI/binary multiplier grammar,
    /// integer kinds convert directly when non-negative.
    #[must_use]
    pub fn as_size(&self) -> Option<Size> {
        match self {
            Value::Text(s) => Size::parse(s),
            _ => self.as_u64().map(Size::new),
        }
    }

    #[must_use]
    pub fn as_size_or(&self, default: Size) -> Size {
        self.as_size().unwrap_or(default)
    }

    /// Canonical textual projection. Absent only for [`Value::None`].
    #[must_use]
    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::None => None,
            Value::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
            Value::I8(v) => Some(v.to_string()),
            Value::I16(v) => Some(v.to_string()),
            Value::I32(v) => Some(v.to_string()),
            Value::I64(v) => Some(v.to_string()),
            Value::I128(v) => Some(v.to_string()),
            Value::U8(v) => Some(v.to_string()),
            Value::U16(v) => Some(v.to_string()),
            Value::U32(v) => Some(v.to_string()),
            Value::U64(v) => Some(v.to_string()),
            Value::U128(v) => Some(v.to_string()),
            Value::F16(v) => Some(v.to_string()),
            Value::F32(v) => Some(v.to_string()),
            Value::F64(v) => Some(v.to_string()),
            Value::Decimal(d) => Some(d.to_string()),
            Value::DateTime(dt) => Some(format!(
                "{}{}{}",
                dt.format("%Y-%m-%dT%H:%M:%S"),
                fraction_suffix(dt.timestamp_subsec_nanos() % 1_000_000_000),
                dt.format("%:z"),
            )),
            Value::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Value::Time(t) => Some(format!(
                "{}{}",
                t.format("%H:%M:%S"),
                fraction_suffix(t.nanosecond() % 1_000_000_000),
            )),
            Value::Duration(d) => Some(duration::to_dotted_string(d)),
            Value::Ipv4(a) => Some(a.to_string()),
            Value::Ipv6(a) => Some(a.to_string()),
            Value::Uri(u) => Some(u.as_str().to_string()),
            Value::Uuid(u) => Some(u.to_string()),
            Value::Text(s) => Some(s.clone()),
            Value::Bytes(b) => Some(hex_string(b)),
        }
    }

    #[must_use]
    pub fn as_string_or(&self, default: &str) -> String {
        self.as_string().unwrap_or_else(|| default.to_string())
    }

    /// Canonical byte projection: numerics pack fixed-width big-endian, text
    /// yields its UTF-8 bytes, byte sequences yield themselves, booleans a
    /// single byte; everything else is absent.
    #[must_use]
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Value::Bool(b) => Some(vec![*b as u8]),
            Value::I8(v) => Some(v.to_be_bytes().to_vec()),
            Value::I16(v) => Some(v.to_be_bytes().to_vec()),
            Value::I32(v) => Some(v.to_be_bytes().to_vec()),
            Value::I64(v) => Some(v.to_be_bytes().to_vec()),
            Value::I128(v) => Some(v.to_be_bytes().to_vec()),
            Value::U8(v) => Some(v.to_be_bytes().to_vec()),
            Value::U16(v) => Some(v.to_be_bytes().to_vec()),
            Value::U32(v) => Some(v.to_be_bytes().to_vec()),
            Value::U64(v) => Some(v.to_be_bytes().to_vec()),
            Value::U128(v) => Some(v.to_be_bytes().to_vec()),
            Value::F16(v) => Some(v.to_be_bytes().to_vec()),
            Value::F32(v) => Some(v.to_be_bytes().to_vec()),
            Value::F64(v) => Some(v.to_be_bytes().to_vec()),
            Value::Decimal(d) => Some(d.serialize().to_vec()),
            Value::Text(s) => Some(s.as_bytes().to_vec()),
            Value::Bytes(b) => Some(b.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes_or(&self, default: &[u8]) -> Vec<u8> {
        self.as_bytes().unwrap_or_else(|| default.to_vec())
    }

    /// Reads `token` as the given kind, the way a `(tag)` annotation forces
    /// interpretation in the document grammar.
    #[must_use]
    pub fn parse_typed(kind: Kind, token: &str) -> Option<Value> {
        let text = Value::Text(token.to_string());
        Some(match kind {
            Kind::None => Value::None,
            Kind::Bool => Value::Bool(text.as_bool()?),
            Kind::I8 => Value::I8(token.trim().parse().ok()?),
            Kind::I16 => Value::I16(token.trim().parse().ok()?),
            Kind::I32 => Value::I32(token.trim().parse().ok()?),
            Kind::I64 => Value::I64(token.trim().parse().ok()?),
            Kind::I128 => Value::I128(token.trim().parse().ok()?),
            Kind::U8 => Value::U8(token.trim().parse().ok()?),
            Kind::U16 => Value::U16(token.trim().parse().ok()?),
            Kind::U32 => Value::U32(token.trim().parse().ok()?),
            Kind::U64 => Value::U64(token.trim().parse().ok()?),
            Kind::U128 => Value::U128(token.trim().parse().ok()?),
            Kind::F16 => Value::F16(f16::from_f64(token.trim().parse::<f64>().ok()?)),
            Kind::F32 => Value::F32(token.trim().parse().ok()?),
            Kind::F64 => Value::F64(token.trim().parse().ok()?),
            Kind::Decimal => Value::Decimal(token.trim().parse().ok()?),
            Kind::DateTime => Value::DateTime(text.as_date_time()?),
            Kind::Date => Value::Date(text.as_date()?),
            Kind::Time => Value::Time(text.as_time()?),
            Kind::Duration => Value::Duration(duration::parse(token)?),
            Kind::Ipv4 => Value::Ipv4(token.trim().parse().ok()?),
            Kind::Ipv6 => Value::Ipv6(token.trim().parse().ok()?),
            Kind::Uri => Value::Uri(text.as_uri()?),
            Kind::Uuid => Value::Uuid(text.as_uuid()?),
            Kind::Text => Value::Text(token.to_string()),
            Kind::Bytes => Value::Bytes(parse_hex(token.trim())?),
        })
    }
}

/// `.548`-style fraction with trailing zeros trimmed (minimal text that
/// round-trips); empty when the value is whole.
fn fraction_suffix(subsec_nanos: u32) -> String {
    if subsec_nanos == 0 {
        return String::new();
    }
    let mut digits = format!("{subsec_nanos:09}");
    while digits.ends_with('0') {
        digits.pop();
    }
    format!(".{digits}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string().unwrap_or_default())
    }
}

macro_rules! from_host {
    ($(($host:ty, $variant:ident)),* $(,)?) => {$(
        impl From<$host> for Value {
            fn from(value: $host) -> Self {
                Value::$variant(value)
            }
        }
    )*};
}

from_host! {
    (bool, Bool),
    (i8, I8),
    (i16, I16),
    (i32, I32),
    (i64, I64),
    (i128, I128),
    (u8, U8),
    (u16, U16),
    (u32, U32),
    (u64, U64),
    (u128, U128),
    (f16, F16),
    (f32, F32),
    (f64, F64),
    (Decimal, Decimal),
    (DateTime<FixedOffset>, DateTime),
    (NaiveDate, Date),
    (NaiveTime, Time),
    (TimeDelta, Duration),
    (Ipv4Addr, Ipv4),
    (Ipv6Addr, Ipv6),
    (Url, Uri),
    (Uuid, Uuid),
    (String, Text),
    (Vec<u8>, Bytes),
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value.fixed_offset())
    }
}

impl From<IpAddr> for Value {
    fn from(value: IpAddr) -> Self {
        match value {
            IpAddr::V4(a) => Value::Ipv4(a),
            IpAddr::V6(a) => Value::Ipv6(a),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Size> for Value {
    fn from(value: Size) -> Self {
        Value::U64(value.bytes())
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::None => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::I128(v) => serializer.serialize_i128(*v),
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::U128(v) => serializer.serialize_u128(*v),
            Value::F16(v) => serializer.serialize_f32(v.to_f32()),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Text(s) => serializer.serialize_str(s),
            // remaining kinds serialize through their canonical text form
            other => serializer.serialize_str(&other.as_string().unwrap_or_default()),
        }
    }
}

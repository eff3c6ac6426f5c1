use std::fmt;

// 2^63 and 2^64; the `MAX as f64` casts round up to these, so they are exclusive bounds.
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
const U64_UPPER: f64 = 18_446_744_073_709_551_616.0;

/// A JSON number as the parser reports it: negative integers are `Int`,
/// non-negative integers are `Uint`, everything else is `Double`.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Int(i64),
    Uint(u64),
    Double(f64),
}

impl Number {
    pub fn is_i32(&self) -> bool {
        match *self {
            Number::Int(i) => i32::try_from(i).is_ok(),
            Number::Uint(u) => u <= i32::MAX as u64,
            Number::Double(d) => {
                d >= i32::MIN as f64 && d <= i32::MAX as f64 && d.trunc() == d
            }
        }
    }

    pub fn is_u32(&self) -> bool {
        match *self {
            Number::Int(i) => u32::try_from(i).is_ok(),
            Number::Uint(u) => u <= u32::MAX as u64,
            Number::Double(d) => d >= 0.0 && d <= u32::MAX as f64 && d.trunc() == d,
        }
    }

    pub fn is_i64(&self) -> bool {
        match *self {
            Number::Int(_) => true,
            Number::Uint(u) => u <= i64::MAX as u64,
            Number::Double(d) => d >= -I64_UPPER && d < I64_UPPER && d.trunc() == d,
        }
    }

    pub fn is_u64(&self) -> bool {
        match *self {
            Number::Int(i) => i >= 0,
            Number::Uint(_) => true,
            Number::Double(d) => d >= 0.0 && d < U64_UPPER && d.trunc() == d,
        }
    }

    pub fn is_f64(&self) -> bool {
        matches!(self, Number::Double(_))
    }

    pub fn as_i32_lossy(&self) -> i32 {
        match *self {
            Number::Int(i) => i as i32,
            Number::Uint(u) => u as i32,
            Number::Double(d) => d as i32,
        }
    }

    pub fn as_u32_lossy(&self) -> u32 {
        match *self {
            Number::Int(i) => i as u32,
            Number::Uint(u) => u as u32,
            Number::Double(d) => d as u32,
        }
    }

    pub fn as_i64_lossy(&self) -> i64 {
        match *self {
            Number::Int(i) => i,
            Number::Uint(u) => u as i64,
            Number::Double(d) => d as i64,
        }
    }

    pub fn as_u64_lossy(&self) -> u64 {
        match *self {
            Number::Int(i) => i as u64,
            Number::Uint(u) => u,
            Number::Double(d) => d as u64,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::Uint(u) => u as f64,
            Number::Double(d) => d,
        }
    }

    pub fn to_json(self) -> serde_json::Value {
        match self {
            Number::Int(i) => serde_json::Value::Number(i.into()),
            Number::Uint(u) => serde_json::Value::Number(u.into()),
            Number::Double(d) => serde_json::Number::from_f64(d)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Uint(a), Number::Uint(b)) => a == b,
            (Number::Int(a), Number::Uint(b)) | (Number::Uint(b), Number::Int(a)) => {
                u64::try_from(a).is_ok_and(|a| a == b)
            }
            (Number::Double(a), Number::Double(b)) => a == b,
            (Number::Double(d), Number::Int(i)) | (Number::Int(i), Number::Double(d)) => {
                double_equals_integer(d, i128::from(i))
            }
            (Number::Double(d), Number::Uint(u)) | (Number::Uint(u), Number::Double(d)) => {
                double_equals_integer(d, i128::from(u))
            }
        }
    }
}

/// Compares without rounding the integer to the nearest double.
fn double_equals_integer(d: f64, n: i128) -> bool {
    const LOW: f64 = -9_223_372_036_854_775_808.0;
    const HIGH: f64 = 18_446_744_073_709_551_616.0;
    d.is_finite() && d.trunc() == d && (LOW..HIGH).contains(&d) && d as i128 == n
}

impl From<&serde_json::Number> for Number {
    fn from(number: &serde_json::Number) -> Self {
        if let Some(u) = number.as_u64() {
            Number::Uint(u)
        } else if let Some(i) = number.as_i64() {
            Number::Int(i)
        } else {
            Number::Double(number.as_f64().unwrap_or(0.0))
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Int(i) => write!(f, "{}", itoa::Buffer::new().format(i)),
            Number::Uint(u) => write!(f, "{}", itoa::Buffer::new().format(u)),
            Number::Double(d) if d.is_finite() => write!(f, "{}", ryu::Buffer::new().format(d)),
            Number::Double(_) => write!(f, "null"),
        }
    }
}

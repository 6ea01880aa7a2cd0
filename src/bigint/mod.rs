use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use thiserror::Error;


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BigIntError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid integer literal: '{0}'")]
    InvalidLiteral(String),
}

/// Signed integer of unbounded magnitude.
///
/// The magnitude is kept as a decimal digit string with no leading zeros
/// (the single digit "0" for zero), and zero is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigInt {
    negative: bool,
    digits: String,
}

fn trim_zeros(s: &str) -> &str {
    let trimmed = s.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

fn cmp_mag(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn add_mag(a: &str, b: &str) -> String {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut out = Vec::with_capacity(a.len().max(b.len()) + 1);
    let (mut i, mut j) = (a.len(), b.len());
    let mut carry = 0u8;
    while i > 0 || j > 0 || carry > 0 {
        let mut sum = carry;
        if i > 0 {
            i -= 1;
            sum += a[i] - b'0';
        }
        if j > 0 {
            j -= 1;
            sum += b[j] - b'0';
        }
        out.push(b'0' + sum % 10);
        carry = sum / 10;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_else(|_| "0".to_string())
}

// Precondition: a >= b as magnitudes.
fn sub_mag(a: &str, b: &str) -> String {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut out = Vec::with_capacity(a.len());
    let mut j = b.len();
    let mut borrow = 0i8;
    for i in (0..a.len()).rev() {
        let mut d = (a[i] - b'0') as i8 - borrow;
        if j > 0 {
            j -= 1;
            d -= (b[j] - b'0') as i8;
        }
        if d < 0 {
            d += 10;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out.push(b'0' + d as u8);
    }
    out.reverse();
    let s = String::from_utf8(out).unwrap_or_else(|_| "0".to_string());
    trim_zeros(&s).to_string()
}

fn mul_mag(a: &str, b: &str) -> String {
    if a == "0" || b == "0" {
        return "0".to_string();
    }
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut acc = vec![0u32; a.len() + b.len()];
    for (i, &da) in a.iter().enumerate() {
        for (j, &db) in b.iter().enumerate() {
            acc[i + j + 1] += (da - b'0') as u32 * (db - b'0') as u32;
        }
    }
    for k in (1..acc.len()).rev() {
        acc[k - 1] += acc[k] / 10;
        acc[k] %= 10;
    }
    let skip = if acc[0] == 0 { 1 } else { 0 };
    acc[skip..]
        .iter()
        .map(|&d| (b'0' + d as u8) as char)
        .collect()
}

// Schoolbook long division over magnitudes; returns (quotient, remainder)
// with 0 <= remainder < b. Caller guarantees b != "0".
fn divmod_mag(a: &str, b: &str) -> (String, String) {
    match cmp_mag(a, b) {
        Ordering::Less => return ("0".to_string(), a.to_string()),
        Ordering::Equal => return ("1".to_string(), "0".to_string()),
        Ordering::Greater => {}
    }
    let mut quotient = String::with_capacity(a.len());
    let mut rem = String::new();
    for c in a.chars() {
        rem.push(c);
        rem = trim_zeros(&rem).to_string();
        let mut d = 0u8;
        for digit in (1..=9u8).rev() {
            let prod = mul_single(b, digit);
            if cmp_mag(&rem, &prod) != Ordering::Less {
                rem = sub_mag(&rem, &prod);
                d = digit;
                break;
            }
        }
        quotient.push((b'0' + d) as char);
    }
    (
        trim_zeros(&quotient).to_string(),
        trim_zeros(&rem).to_string(),
    )
}

fn mul_single(a: &str, digit: u8) -> String {
    match digit {
        0 => "0".to_string(),
        1 => a.to_string(),
        _ => mul_mag(a, &((b'0' + digit) as char).to_string()),
    }
}

impl BigInt {
    pub fn zero() -> Self {
        BigInt {
            negative: false,
            digits: "0".to_string(),
        }
    }

    /// Truncates a finite float toward zero.
    pub fn from_f64(f: f64) -> Result<Self, BigIntError> {
        if !f.is_finite() {
            return Err(BigIntError::InvalidLiteral(f.to_string()));
        }
        // trunc() yields an exactly representable integer, so the
        // fixed-point rendering below is exact at any magnitude.
        format!("{:.0}", f.trunc()).parse()
    }

    /// Narrows to a machine integer, wrapping silently on overflow.
    /// Intended only for bounded uses such as string-repeat counts.
    pub fn to_i64(&self) -> i64 {
        let mut r: i64 = 0;
        for b in self.digits.bytes() {
            r = r.wrapping_mul(10).wrapping_add((b - b'0') as i64);
        }
        if self.negative {
            r.wrapping_neg()
        } else {
            r
        }
    }

    pub fn is_zero(&self) -> bool {
        self.digits == "0"
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Floor division: the quotient is rounded toward negative infinity,
    /// so `(-7) / 3 == -3`.
    pub fn floor_div(&self, other: &BigInt) -> Result<BigInt, BigIntError> {
        if other.is_zero() {
            return Err(BigIntError::DivisionByZero);
        }
        let (mut q, r) = divmod_mag(&self.digits, &other.digits);
        let negative = self.negative != other.negative;
        if negative && r != "0" {
            q = add_mag(&q, "1");
        }
        Ok(BigInt::from_parts(negative, q))
    }

    /// Floor modulus: `a - (a / b) * b`, so the sign of a non-zero result
    /// matches the sign of the divisor.
    pub fn floor_rem(&self, other: &BigInt) -> Result<BigInt, BigIntError> {
        let q = self.floor_div(other)?;
        Ok(self - &(&q * other))
    }

    fn from_parts(negative: bool, digits: String) -> Self {
        let digits = trim_zeros(&digits).to_string();
        BigInt {
            negative: negative && digits != "0",
            digits,
        }
    }
}

impl From<i64> for BigInt {
    fn from(n: i64) -> Self {
        let text = n.to_string();
        match text.strip_prefix('-') {
            Some(mag) => BigInt {
                negative: true,
                digits: mag.to_string(),
            },
            None => BigInt {
                negative: false,
                digits: text,
            },
        }
    }
}

impl FromStr for BigInt {
    type Err = BigIntError;

    /// Accepts optional surrounding whitespace, an optional `+`/`-` sign,
    /// and at least one decimal digit; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let (negative, mag) = match t.as_bytes().first() {
            Some(b'-') => (true, &t[1..]),
            Some(b'+') => (false, &t[1..]),
            _ => (false, t),
        };
        if mag.is_empty() || !mag.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BigIntError::InvalidLiteral(s.to_string()));
        }
        Ok(BigInt::from_parts(negative, mag.to_string()))
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.digits)
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => cmp_mag(&self.digits, &other.digits),
            (true, true) => cmp_mag(&other.digits, &self.digits),
        }
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        BigInt {
            negative: !self.negative && !self.is_zero(),
            digits: self.digits.clone(),
        }
    }
}

impl Add for &BigInt {
    type Output = BigInt;

    fn add(self, other: &BigInt) -> BigInt {
        if self.negative == other.negative {
            return BigInt::from_parts(self.negative, add_mag(&self.digits, &other.digits));
        }
        match cmp_mag(&self.digits, &other.digits) {
            Ordering::Equal => BigInt::zero(),
            Ordering::Greater => {
                BigInt::from_parts(self.negative, sub_mag(&self.digits, &other.digits))
            }
            Ordering::Less => {
                BigInt::from_parts(other.negative, sub_mag(&other.digits, &self.digits))
            }
        }
    }
}

impl Sub for &BigInt {
    type Output = BigInt;

    fn sub(self, other: &BigInt) -> BigInt {
        self + &(-other)
    }
}

impl Mul for &BigInt {
    type Output = BigInt;

    fn mul(self, other: &BigInt) -> BigInt {
        BigInt::from_parts(
            self.negative != other.negative,
            mul_mag(&self.digits, &other.digits),
        )
    }
}

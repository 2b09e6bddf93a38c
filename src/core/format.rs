//! Number and binary rendering shared by every encode path

use super::buffer::Buffer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt::{self, Write};

/// Append any integer in plain decimal
#[inline]
pub fn write_int<T: fmt::Display>(buf: &mut Buffer, value: T) {
    // Buffer's fmt::Write impl never fails
    let _ = write!(buf, "{}", value);
}

/// Append a 64-bit float; `NaN`, `+Inf` and `-Inf` are literal tokens and
/// integral values carry no fractional point
pub fn write_float64(buf: &mut Buffer, value: f64) {
    if value.is_nan() {
        buf.push_str("NaN");
    } else if value.is_infinite() {
        buf.push_str(if value > 0.0 { "+Inf" } else { "-Inf" });
    } else {
        let _ = write!(buf, "{}", value);
    }
}

/// Append a 32-bit float using its own shortest representation
pub fn write_float32(buf: &mut Buffer, value: f32) {
    if value.is_nan() {
        buf.push_str("NaN");
    } else if value.is_infinite() {
        buf.push_str(if value > 0.0 { "+Inf" } else { "-Inf" });
    } else {
        let _ = write!(buf, "{}", value);
    }
}

fn needs_plus(imaginary: f64) -> bool {
    !imaginary.is_infinite() && (imaginary.is_nan() || !imaginary.is_sign_negative())
}

/// Append `real+imagi` without quotes
pub fn write_complex128(buf: &mut Buffer, real: f64, imaginary: f64) {
    write_float64(buf, real);
    if needs_plus(imaginary) {
        buf.push(b'+');
    }
    write_float64(buf, imaginary);
    buf.push(b'i');
}

pub fn write_complex64(buf: &mut Buffer, real: f32, imaginary: f32) {
    write_float32(buf, real);
    if needs_plus(f64::from(imaginary)) {
        buf.push(b'+');
    }
    write_float32(buf, imaginary);
    buf.push(b'i');
}

/// Append standard padded base64 without quotes, encoding in place
pub fn write_base64(buf: &mut Buffer, bytes: &[u8]) {
    let start = buf.len();
    let Some(len) = base64::encoded_len(bytes.len(), true) else {
        buf.push_str(&STANDARD.encode(bytes));
        return;
    };

    match STANDARD.encode_slice(bytes, buf.spare(len)) {
        Ok(written) => buf.truncate(start + written),
        Err(_) => {
            buf.truncate(start);
            buf.push_str(&STANDARD.encode(bytes));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Buffer)) -> String {
        let mut buf = Buffer::with_capacity(32);
        f(&mut buf);
        buf.to_string()
    }

    #[test]
    fn test_float64() {
        assert_eq!(render(|b| write_float64(b, 1.0)), "1");
        assert_eq!(render(|b| write_float64(b, 1e10)), "10000000000");
        assert_eq!(render(|b| write_float64(b, 3.14)), "3.14");
        assert_eq!(render(|b| write_float64(b, 1e-9)), "0.000000001");
        assert_eq!(render(|b| write_float64(b, f64::NAN)), "NaN");
        assert_eq!(render(|b| write_float64(b, f64::INFINITY)), "+Inf");
        assert_eq!(render(|b| write_float64(b, f64::NEG_INFINITY)), "-Inf");
    }

    #[test]
    fn test_float32() {
        assert_eq!(render(|b| write_float32(b, 1.0)), "1");
        assert_eq!(render(|b| write_float32(b, 1e10)), "10000000000");
        assert_eq!(render(|b| write_float32(b, 3.14)), "3.14");
        assert_eq!(render(|b| write_float32(b, f32::NAN)), "NaN");
        assert_eq!(render(|b| write_float32(b, f32::INFINITY)), "+Inf");
        assert_eq!(render(|b| write_float32(b, f32::NEG_INFINITY)), "-Inf");
    }

    #[test]
    fn test_complex() {
        assert_eq!(render(|b| write_complex128(b, 1.0, 2.0)), "1+2i");
        assert_eq!(render(|b| write_complex128(b, 1.0, -2.5)), "1-2.5i");
        assert_eq!(render(|b| write_complex128(b, 0.0, f64::INFINITY)), "0+Infi");
        assert_eq!(render(|b| write_complex64(b, 1.0, 2.0)), "1+2i");
    }

    #[test]
    fn test_base64() {
        assert_eq!(render(|b| write_base64(b, b"ab12")), "YWIxMg==");
        assert_eq!(render(|b| write_base64(b, b"")), "");
        assert_eq!(render(|b| write_int(b, -42i64)), "-42");
    }
}

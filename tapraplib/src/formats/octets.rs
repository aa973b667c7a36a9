//! Минимальное big-endian two's-complement представление целых,
//! используемое TAP для сумм и DER-кодеком для INTEGER.

use crate::error::{Result, TapRapError};

/// Кратчайшая октет-строка знакового 64-битного целого.
///
/// Старшие байты идут первыми; ведущие 0x00 (для неотрицательных) и 0xFF
/// (для отрицательных) отбрасываются, пока знаковый бит следующего байта
/// это позволяет. Минимальная длина — один байт.
pub fn encode_int64_as_octets(value: i64) -> Result<Vec<u8>> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let cur = bytes[start];
        let next_high = bytes[start + 1] & 0x80 != 0;
        let redundant = if value >= 0 {
            cur == 0x00 && !next_high
        } else {
            cur == 0xFF && next_high
        };
        if !redundant {
            break;
        }
        start += 1;
    }
    let out = bytes[start..].to_vec();
    if out.len() > 8 {
        return Err(TapRapError::IntegerOverflow);
    }
    Ok(out)
}

/// Обратное преобразование со знаковым расширением первого байта.
/// Пустая строка читается как 0.
pub fn decode_octets_as_int64(octets: &[u8]) -> Result<i64> {
    if octets.len() > 8 {
        return Err(TapRapError::IntegerOverflow);
    }
    let mut acc: i64 = match octets.first() {
        Some(b) if b & 0x80 != 0 => -1,
        _ => 0,
    };
    for &b in octets {
        acc = (acc << 8) | i64::from(b);
    }
    Ok(acc)
}

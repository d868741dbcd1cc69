//! Funciones de conversión para datos del sensor EWTS5GNB21
//!
//! El sensor entrega cada eje como un campo de 16 bits en complemento a dos.

/// Interpreta un campo de 16 bits como entero con signo en complemento a dos
///
/// Si el bit 15 está activo el valor es `raw - 65536`; si no, `raw`.
#[inline]
pub fn to_signed(raw: u16) -> i16 {
    if raw & 0x8000 != 0 {
        (i32::from(raw) - 0x10000) as i16
    } else {
        raw as i16
    }
}

/// Resta un offset (en LSB) a un valor bruto, saturando al rango de i16
#[inline]
pub fn subtract_offset(raw: i16, offset: f32) -> i16 {
    let corrected = (f32::from(raw) - offset).round();
    corrected.clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
}

//! Empaquetado de muestras para el canal de notificación inalámbrico
//!
//! El canal admite como máximo 20 bytes por característica. Se envían los
//! valores brutos: acelerómetro X/Y/Z, giroscopio X/Y/Z y una palabra de
//! indicadores, todo en little-endian (14 bytes).

use bytemuck::{Pod, Zeroable};

use crate::types::Sample;

/// Longitud máxima del valor de la característica
pub const CHARACTERISTIC_VALUE_MAX_LEN: usize = 20;

/// Bit 0 de `flags`: muestra válida
pub const FLAG_VALID: u16 = 0x0001;

/// Carga útil de una notificación
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct NotificationPayload {
    accel: [i16; 3],
    gyro: [i16; 3],
    flags: u16,
}

const _: () = assert!(core::mem::size_of::<NotificationPayload>() <= CHARACTERISTIC_VALUE_MAX_LEN);

impl NotificationPayload {
    pub fn from_sample(sample: &Sample) -> Self {
        let flags = if sample.valid { FLAG_VALID } else { 0 };
        Self {
            accel: sample.accel().map(i16::to_le),
            gyro: sample.gyro().map(i16::to_le),
            flags: flags.to_le(),
        }
    }

    /// Bytes listos para escribir en la característica
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Reconstruye la muestra a partir de los bytes recibidos
    pub fn decode(bytes: &[u8]) -> Option<Sample> {
        let payload: NotificationPayload = bytemuck::try_pod_read_unaligned(bytes).ok()?;
        let accel = payload.accel.map(i16::from_le);
        let gyro = payload.gyro.map(i16::from_le);
        let valid = u16::from_le(payload.flags) & FLAG_VALID != 0;
        Some(Sample::from_axes(
            [gyro[0], gyro[1], gyro[2], accel[0], accel[1], accel[2]],
            valid,
        ))
    }
}

impl From<&Sample> for NotificationPayload {
    fn from(sample: &Sample) -> Self {
        NotificationPayload::from_sample(sample)
    }
}

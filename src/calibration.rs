//! Calibración de offsets del EWTS5GNB21
//!
//! Promedia un número de muestras con el sensor en reposo para obtener el
//! offset de cada eje del acelerómetro y del giroscopio. Las muestras
//! adquiridas con el indicador de error activo no se usan.

use core::fmt::Debug;

use crate::conversion::subtract_offset;
use crate::device::{Ewts5gnb21, Ewts5gnb21Error};
use crate::interface::Interface;
use crate::types::Sample;
use embedded_hal::blocking::delay::DelayMs;

/// Error específico de la calibración
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalibrationError {
    /// Error de dispositivo subyacente
    DeviceError(Ewts5gnb21Error),
    /// Ninguna muestra válida durante la calibración
    NoValidSamples,
    /// Número de muestras igual a cero
    InvalidSampleCount,
}

impl From<Ewts5gnb21Error> for CalibrationError {
    fn from(err: Ewts5gnb21Error) -> Self {
        CalibrationError::DeviceError(err)
    }
}

/// Offsets por eje en LSB
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ImuOffsets {
    pub accel: [f32; 3],
    pub gyro: [f32; 3],
}

impl ImuOffsets {
    /// Resta los offsets a una muestra, conservando su validez
    pub fn apply(&self, sample: &Sample) -> Sample {
        let gyro = sample.gyro();
        let accel = sample.accel();
        let mut values = [0i16; 6];
        for i in 0..3 {
            values[i] = subtract_offset(gyro[i], self.gyro[i]);
            values[i + 3] = subtract_offset(accel[i], self.accel[i]);
        }
        Sample::from_axes(values, sample.valid)
    }
}

/// Resultado de la calibración
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationReport {
    pub offsets: ImuOffsets,
    /// Muestras válidas promediadas
    pub samples_used: usize,
    /// Muestras descartadas por el indicador de error
    pub samples_rejected: usize,
}

/// Calibra acelerómetro y giroscopio con `num_samples` lecturas
pub fn calibrate<I, D, E>(
    device: &mut Ewts5gnb21<I, D>,
    num_samples: usize,
) -> Result<CalibrationReport, CalibrationError>
where
    I: Interface<Error = E>,
    E: Debug,
    D: DelayMs<u32>,
    Ewts5gnb21Error: From<E>,
{
    if num_samples == 0 {
        return Err(CalibrationError::InvalidSampleCount);
    }

    log::info!("Iniciando calibración del IMU ({} muestras)", num_samples);

    let mut accel_sum = [0i64; 3];
    let mut gyro_sum = [0i64; 3];
    let mut used = 0usize;
    let mut rejected = 0usize;

    for _ in 0..num_samples {
        let sample = device.read_sample()?;
        if sample.valid {
            for (sum, value) in accel_sum.iter_mut().zip(sample.accel()) {
                *sum += i64::from(value);
            }
            for (sum, value) in gyro_sum.iter_mut().zip(sample.gyro()) {
                *sum += i64::from(value);
            }
            used += 1;
        } else {
            rejected += 1;
        }
        let interval = device.config.calibration_interval_ms;
        device.delay.delay_ms(interval);
    }

    if used == 0 {
        log::warn!("Calibración sin muestras válidas ({} descartadas)", rejected);
        return Err(CalibrationError::NoValidSamples);
    }

    let offsets = ImuOffsets {
        accel: accel_sum.map(|s| s as f32 / used as f32),
        gyro: gyro_sum.map(|s| s as f32 / used as f32),
    };

    log::info!("Calibración completada");
    log::info!(
        "Offsets acelerómetro: [{:.2}, {:.2}, {:.2}]",
        offsets.accel[0],
        offsets.accel[1],
        offsets.accel[2]
    );
    log::info!(
        "Offsets giroscopio: [{:.2}, {:.2}, {:.2}]",
        offsets.gyro[0],
        offsets.gyro[1],
        offsets.gyro[2]
    );

    Ok(CalibrationReport {
        offsets,
        samples_used: used,
        samples_rejected: rejected,
    })
}

/// Calibra con el número de muestras de la configuración del dispositivo
pub fn calibrate_default<I, D, E>(
    device: &mut Ewts5gnb21<I, D>,
) -> Result<CalibrationReport, CalibrationError>
where
    I: Interface<Error = E>,
    E: Debug,
    D: DelayMs<u32>,
    Ewts5gnb21Error: From<E>,
{
    let samples = device.config().calibration_samples;
    calibrate(device, samples)
}

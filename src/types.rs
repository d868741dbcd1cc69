//! Definiciones de tipos comunes para el EWTS5GNB21

use crate::register::sadr;

/// Ejes del sensor, en el orden en que se leen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Axis {
    GyroX = sadr::GYRO_X,
    GyroY = sadr::GYRO_Y,
    GyroZ = sadr::GYRO_Z,
    AccelX = sadr::ACCEL_X,
    AccelY = sadr::ACCEL_Y,
    AccelZ = sadr::ACCEL_Z,
}

impl Axis {
    /// Orden de lectura del pipeline
    pub const ALL: [Axis; 6] = [
        Axis::GyroX,
        Axis::GyroY,
        Axis::GyroZ,
        Axis::AccelX,
        Axis::AccelY,
        Axis::AccelZ,
    ];

    /// Dirección de sensor (SADR) del eje
    pub fn sadr(self) -> u8 {
        self as u8
    }
}

/// Muestra de 6 ejes tal como la entrega el sensor
///
/// Se produce completa en cada ciclo de adquisición y no se modifica
/// después. `valid` es falso si el indicador de error del dispositivo
/// estuvo activo durante la adquisición.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub gyro_x: i16,
    pub gyro_y: i16,
    pub gyro_z: i16,
    pub accel_x: i16,
    pub accel_y: i16,
    pub accel_z: i16,
    pub valid: bool,
}

impl Sample {
    /// Construye una muestra a partir de los seis valores en orden de lectura
    pub fn from_axes(values: [i16; 6], valid: bool) -> Self {
        Self {
            gyro_x: values[0],
            gyro_y: values[1],
            gyro_z: values[2],
            accel_x: values[3],
            accel_y: values[4],
            accel_z: values[5],
            valid,
        }
    }

    /// Valores del giroscopio [x, y, z]
    pub fn gyro(&self) -> [i16; 3] {
        [self.gyro_x, self.gyro_y, self.gyro_z]
    }

    /// Valores del acelerómetro [x, y, z]
    pub fn accel(&self) -> [i16; 3] {
        [self.accel_x, self.accel_y, self.accel_z]
    }

    /// Valor de un eje concreto
    pub fn axis(&self, axis: Axis) -> i16 {
        match axis {
            Axis::GyroX => self.gyro_x,
            Axis::GyroY => self.gyro_y,
            Axis::GyroZ => self.gyro_z,
            Axis::AccelX => self.accel_x,
            Axis::AccelY => self.accel_y,
            Axis::AccelZ => self.accel_z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_from_axes_order() {
        let sample = Sample::from_axes([1, 2, 3, 4, 5, 6], true);
        assert_eq!(sample.gyro(), [1, 2, 3]);
        assert_eq!(sample.accel(), [4, 5, 6]);
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(sample.axis(*axis), i as i16 + 1);
        }
    }

    #[test]
    fn test_axis_sadr() {
        assert_eq!(Axis::GyroX.sadr(), 0x00);
        assert_eq!(Axis::AccelZ.sadr(), 0x0A);
    }
}

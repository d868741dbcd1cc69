//! Constantes de protocolo del EWTS5GNB21
//!
//! Las tablas de comandos son valores literales del mapa de registros de
//! control (tablas 5-13 y 5-16 del datasheet). No se calculan ni se deben
//! "limpiar": cualquier cambio altera lo que se transmite por el bus.

/// Máscaras de campo dentro de una trama de 4 bytes
pub mod masks {
    pub const SENSOR_DATA: [u8; 4] = [0xFF, 0xFF, 0x00, 0x00];
    pub const COMMON_ERROR_FLAG: [u8; 4] = [0x00, 0x00, 0xC0, 0x00];
    pub const SPI_MODE: [u8; 4] = [0x00, 0x00, 0xA0, 0x00];
    pub const SADR: [u8; 4] = [0x00, 0x00, 0x0F, 0x00];
    pub const CRC: [u8; 4] = [0x00, 0x00, 0x00, 0x0F];
    pub const X2: [u8; 4] = [0x00, 0x00, 0x00, 0x80];
    pub const KACT: [u8; 4] = [0x00, 0x00, 0x00, 0xB0];

    /// Desplazamiento del campo de estado dentro del byte 2
    pub const STATUS_SHIFT: u8 = 6;
}

/// Direcciones de sensor (SADR) de cada eje
pub mod sadr {
    pub const GYRO_X: u8 = 0x00;
    pub const GYRO_Y: u8 = 0x02;
    pub const GYRO_Z: u8 = 0x04;
    pub const ACCEL_X: u8 = 0x06;
    pub const ACCEL_Y: u8 = 0x08;
    pub const ACCEL_Z: u8 = 0x0A;
    /// Dirección fija usada por los comandos de sincronización y vaciado
    pub const FIXED: u8 = 0x0F;
}

/// Tablas literales de comandos
pub mod commands {
    /// Nibble de modo de los comandos de lectura (byte 2, bits 7:4)
    pub const READ_MODE: u8 = 0x0A;
    /// Byte 3 del comando de sincronización (X2 = 1)
    pub const SYNC_TAIL: u8 = 0x87;
    /// Byte 3 del comando de vaciado
    pub const FLUSH_TAIL: u8 = 0x0F;

    /// Filtro paso bajo: 60 Hz en acelerómetro, 46 Hz en giroscopio
    pub const LPF_COMMANDS: [[u8; 4]; 15] = [
        [0x00, 0x0C, 0x32, 0x43],
        [0x07, 0x9E, 0x33, 0x4E],
        [0x00, 0x0C, 0x32, 0x43],
        [0x00, 0x00, 0x23, 0x4F],
        [0x00, 0x00, 0x23, 0x4F],
        [0x00, 0x0E, 0x32, 0x41],
        [0x1E, 0x00, 0x33, 0x41],
        [0x00, 0x0E, 0x32, 0x41],
        [0x00, 0x00, 0x23, 0x4F],
        [0x00, 0x00, 0x23, 0x4F],
        [0x00, 0x00, 0x2E, 0xE8],
        [0x00, 0x00, 0x2E, 0xE8],
        [0x00, 0x00, 0x2F, 0xE9],
        [0x00, 0x00, 0x2F, 0xE9],
        [0x00, 0x00, 0x2F, 0xE9],
    ];

    /// Respuestas esperadas del filtro paso bajo (paso 1-based, trama)
    pub const LPF_CHECKS: [(usize, [u8; 4]); 4] = [
        (5, [0x07, 0x9E, 0x23, 0x4F]),
        (10, [0x1E, 0xFF, 0x23, 0xFF]),
        (13, [0x00, 0x00, 0x2E, 0xE8]),
        (15, [0x00, 0x00, 0x2F, 0xE9]),
    ];

    /// Rango de medida de giroscopio y acelerómetro
    pub const MR_COMMANDS: [[u8; 4]; 19] = [
        [0x00, 0x19, 0x32, 0x47],
        [0x03, 0x02, 0x33, 0x4F],
        [0x00, 0x19, 0x32, 0x47],
        [0x01, 0x81, 0x33, 0x46],
        [0x00, 0x19, 0x32, 0x47],
        [0x02, 0x84, 0x33, 0x40],
        [0x00, 0x19, 0x32, 0x47],
        [0x00, 0x00, 0x23, 0x4F],
        [0x00, 0x00, 0x23, 0x4F],
        [0x00, 0xF4, 0x32, 0x44],
        [0x00, 0x09, 0x33, 0x47],
        [0x00, 0xF4, 0x32, 0x44],
        [0x00, 0x00, 0x23, 0x4F],
        [0x00, 0x00, 0x23, 0x4F],
        [0x00, 0xD4, 0x32, 0x46],
        [0x00, 0x07, 0x33, 0x49],
        [0x00, 0xD4, 0x32, 0x46],
        [0x00, 0x00, 0x23, 0x4F],
        [0x00, 0x00, 0x23, 0x4F],
    ];

    /// Respuestas esperadas del rango de medida (paso 1-based, trama)
    pub const MR_CHECKS: [(usize, [u8; 4]); 3] = [
        (9, [0x03, 0x87, 0x23, 0x43]),
        (14, [0x00, 0x09, 0x23, 0x46]),
        (19, [0x00, 0x07, 0x23, 0x48]),
    ];

    /// Secuencia de lectura: sincronización, seis ejes y vaciado
    pub const READ_SEQUENCE: [[u8; 4]; 8] = [
        [0x00, 0x00, 0xAF, 0x87], // Sincronización (X2 = 1)
        [0x00, 0x00, 0xA0, 0x00], // Giroscopio X
        [0x00, 0x00, 0xA2, 0x02], // Giroscopio Y
        [0x00, 0x00, 0xA4, 0x04], // Giroscopio Z
        [0x00, 0x00, 0xA6, 0x06], // Acelerómetro X
        [0x00, 0x00, 0xA8, 0x08], // Acelerómetro Y
        [0x00, 0x00, 0xAA, 0x0A], // Acelerómetro Z
        [0x00, 0x00, 0xAF, 0x0F], // Vaciado
    ];
}

#[cfg(test)]
mod tests {
    use super::commands::*;

    #[test]
    fn test_table_lengths() {
        assert_eq!(LPF_COMMANDS.len(), 15);
        assert_eq!(MR_COMMANDS.len(), 19);
        assert_eq!(READ_SEQUENCE.len(), 8);
    }

    #[test]
    fn test_check_steps_within_tables() {
        for (step, _) in LPF_CHECKS.iter() {
            assert!(*step >= 1 && *step <= LPF_COMMANDS.len());
        }
        for (step, _) in MR_CHECKS.iter() {
            assert!(*step >= 1 && *step <= MR_COMMANDS.len());
        }
    }
}

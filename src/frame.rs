//! Codificación y decodificación de tramas de 4 bytes
//!
//! Cada intercambio con el sensor envía una trama de comando y recibe una
//! trama de respuesta con la misma disposición:
//!
//! ```text
//! byte 0..1  dato de 16 bits (big-endian)
//! byte 2     [7:6] estado | [7:4] modo | [3:0] SADR
//! byte 3     [7] X2 | KACT | [3:0] CRC
//! ```

use crate::conversion::to_signed;
use crate::register::{commands, masks, sadr};
use crate::types::Axis;

/// Trama de 4 bytes intercambiada por el bus de control
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame([u8; 4]);

impl Frame {
    /// Crea una trama a partir de sus bytes
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Bytes de la trama
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }

    /// Codifica un conjunto de campos en una trama
    pub const fn encode(fields: FrameFields) -> Self {
        let data = fields.data.to_be_bytes();
        Self([
            data[0],
            data[1],
            (fields.mode << 4) | (fields.sadr & 0x0F),
            fields.tail,
        ])
    }

    /// Extrae los campos en bruto de la trama. Nunca falla.
    pub fn decode(&self) -> RawFields {
        let b = &self.0;
        RawFields {
            data: u16::from_be_bytes([
                b[0] & masks::SENSOR_DATA[0],
                b[1] & masks::SENSOR_DATA[1],
            ]),
            status: Status::from_bits((b[2] & masks::COMMON_ERROR_FLAG[2]) >> masks::STATUS_SHIFT),
            spi_mode: b[2] & masks::SPI_MODE[2],
            sadr: b[2] & masks::SADR[2],
            crc: b[3] & masks::CRC[3],
            x2: b[3] & masks::X2[3] != 0,
            kact: b[3] & masks::KACT[3],
        }
    }

    /// Campo de datos de 16 bits
    pub fn data(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    /// Campo de datos interpretado en complemento a dos
    pub fn signed_data(&self) -> i16 {
        to_signed(self.data())
    }

    /// Campo de estado de 2 bits
    pub fn status(&self) -> Status {
        Status::from_bits(self.0[2] >> masks::STATUS_SHIFT)
    }
}

impl From<[u8; 4]> for Frame {
    fn from(bytes: [u8; 4]) -> Self {
        Frame(bytes)
    }
}

impl From<Frame> for [u8; 4] {
    fn from(frame: Frame) -> Self {
        frame.0
    }
}

/// Campos para construir una trama de comando
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameFields {
    /// Dato de 16 bits (bytes 0..1)
    pub data: u16,
    /// Nibble alto del byte 2
    pub mode: u8,
    /// Dirección de sensor (nibble bajo del byte 2)
    pub sadr: u8,
    /// Byte 3 completo (X2, KACT y CRC)
    pub tail: u8,
}

/// Campos extraídos de una trama de respuesta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields {
    pub data: u16,
    pub status: Status,
    /// Bits de modo SPI tal cual (byte 2 & 0xA0)
    pub spi_mode: u8,
    pub sadr: u8,
    pub crc: u8,
    pub x2: bool,
    /// Bits KACT tal cual (byte 3 & 0xB0)
    pub kact: u8,
}

/// Campo de estado de 2 bits de una respuesta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(u8);

impl Status {
    /// `01`: el dispositivo señala error
    pub const ERROR: Status = Status(0b01);
    /// `10`: el dispositivo señala funcionamiento normal
    pub const NORMAL: Status = Status(0b10);

    /// Construye el estado con los 2 bits bajos de `bits`
    pub const fn from_bits(bits: u8) -> Self {
        Status(bits & 0b11)
    }

    /// Valor del campo, siempre en 0..=3
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Comandos de la secuencia de lectura
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadCommand {
    /// Sincroniza los sensores; su respuesta no contiene datos útiles
    Sync,
    /// Lectura de un eje; el dato llega con el comando siguiente
    Axis(Axis),
    /// Comando de relleno para recoger la última respuesta
    Flush,
}

impl ReadCommand {
    /// Secuencia completa de un ciclo de adquisición
    pub const SEQUENCE: [ReadCommand; 8] = [
        ReadCommand::Sync,
        ReadCommand::Axis(Axis::GyroX),
        ReadCommand::Axis(Axis::GyroY),
        ReadCommand::Axis(Axis::GyroZ),
        ReadCommand::Axis(Axis::AccelX),
        ReadCommand::Axis(Axis::AccelY),
        ReadCommand::Axis(Axis::AccelZ),
        ReadCommand::Flush,
    ];

    /// Campos del comando
    pub fn fields(self) -> FrameFields {
        let (sadr, tail) = match self {
            ReadCommand::Sync => (sadr::FIXED, commands::SYNC_TAIL),
            ReadCommand::Axis(axis) => (axis.sadr(), axis.sadr()),
            ReadCommand::Flush => (sadr::FIXED, commands::FLUSH_TAIL),
        };
        FrameFields {
            data: 0,
            mode: commands::READ_MODE,
            sadr,
            tail,
        }
    }

    /// Trama del comando
    pub fn frame(self) -> Frame {
        Frame::encode(self.fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_fields() {
        let fields = Frame::from_bytes([0x12, 0x34, 0xAB, 0xCD]).decode();
        assert_eq!(fields.data, 0x1234);
        assert_eq!(fields.status, Status::NORMAL);
        assert_eq!(fields.spi_mode, 0xA0);
        assert_eq!(fields.sadr, 0x0B);
        assert_eq!(fields.crc, 0x0D);
        assert!(fields.x2);
        assert_eq!(fields.kact, 0x80);
    }

    #[test]
    fn test_decode_is_total() {
        for byte2 in 0..=255u8 {
            let frame = Frame::from_bytes([0xFF, 0x00, byte2, 0x5A]);
            let status = frame.decode().status;
            assert!(status.bits() <= 3);
            assert_eq!(status.bits(), byte2 >> 6);
            assert_eq!(frame.status(), status);
        }
    }

    #[test]
    fn test_signed_data() {
        assert_eq!(Frame::from_bytes([0xFF, 0xFF, 0, 0]).signed_data(), -1);
        assert_eq!(Frame::from_bytes([0x80, 0x00, 0, 0]).signed_data(), -32768);
        assert_eq!(Frame::from_bytes([0x12, 0x34, 0, 0]).signed_data(), 4660);
    }

    #[test]
    fn test_encode_layout() {
        let frame = Frame::encode(FrameFields {
            data: 0x079E,
            mode: 0x3,
            sadr: 0x3,
            tail: 0x4E,
        });
        assert_eq!(frame.to_bytes(), [0x07, 0x9E, 0x33, 0x4E]);
    }

    #[test]
    fn test_read_commands_match_literal_table() {
        for (command, literal) in ReadCommand::SEQUENCE
            .iter()
            .zip(commands::READ_SEQUENCE.iter())
        {
            assert_eq!(command.frame().to_bytes(), *literal, "{:?}", command);
        }
    }
}

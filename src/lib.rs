//! Biblioteca Rust para el sensor inercial EWTS5GNB21
//!
//! Esta biblioteca implementa el protocolo SPI de tramas de 4 bytes del
//! sensor de 6 ejes (giroscopio y acelerómetro): configuración del filtro
//! paso bajo y del rango de medida con verificación, lectura de muestras con
//! el pipeline de una trama de latencia y seguimiento del indicador de error.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::spi::Transfer;
use embedded_hal::digital::v2::OutputPin;

// Importaciones internas
pub mod calibration;
pub mod config;
pub mod conversion;
pub mod device;
pub mod frame;
pub mod interface;
pub mod monitor;
pub mod register;
pub mod sequencer;
pub mod status;
pub mod telemetry;
pub mod types;

// Re-exports públicos
pub use config::DeviceConfig;
pub use conversion::to_signed;
pub use device::{Ewts5gnb21, Ewts5gnb21Error, Readiness};
pub use frame::{Frame, ReadCommand, Status};
pub use sequencer::{ConfigReport, SequenceKind, VerificationFailure};
pub use status::ErrorState;
pub use types::{Axis, Sample};

use crate::interface::SpiInterface;

/// Crea un nuevo dispositivo EWTS5GNB21 usando un bus SPI y un pin CS
pub fn new_spi_device<SPI, CS, D, E, PinE>(
    spi: SPI,
    cs: CS,
    delay: D,
) -> Result<Ewts5gnb21<SpiInterface<SPI, CS>, D>, Ewts5gnb21Error>
where
    SPI: Transfer<u8, Error = E>,
    CS: OutputPin<Error = PinE>,
    E: core::fmt::Debug,
    D: DelayMs<u32>,
{
    new_spi_device_with_config(spi, cs, delay, DeviceConfig::default())
}

/// Igual que [`new_spi_device`] pero con una configuración concreta
pub fn new_spi_device_with_config<SPI, CS, D, E, PinE>(
    spi: SPI,
    cs: CS,
    delay: D,
    config: DeviceConfig,
) -> Result<Ewts5gnb21<SpiInterface<SPI, CS>, D>, Ewts5gnb21Error>
where
    SPI: Transfer<u8, Error = E>,
    CS: OutputPin<Error = PinE>,
    E: core::fmt::Debug,
    D: DelayMs<u32>,
{
    let interface = SpiInterface::new(spi, cs)?;
    Ok(Ewts5gnb21::with_config(interface, delay, config))
}

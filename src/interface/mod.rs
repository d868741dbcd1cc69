//! Módulo de abstracción para la interfaz de comunicación con el EWTS5GNB21

use embedded_hal::blocking::spi::Transfer;
use embedded_hal::digital::v2::OutputPin;

use crate::device::Ewts5gnb21Error;
use crate::frame::Frame;

#[cfg(test)]
pub mod mock;

/// Error genérico para interfaces de comunicación
#[derive(Debug, Clone)]
pub enum InterfaceError<E> {
    /// Error de comunicación SPI
    SpiError(E),
    /// Error de pin CS para SPI
    PinError,
    /// Parámetro inválido
    InvalidParameter,
}

/// Trait para abstraer el intercambio de tramas con el dispositivo
///
/// Cada llamada es una transacción nueva en el bus: selecciona el
/// dispositivo, transfiere 4 bytes en full-duplex y lo deselecciona,
/// incluso si la transferencia falla.
pub trait Interface {
    /// Tipo de error que puede producir la interfaz
    type Error;

    /// Envía una trama de comando y devuelve la trama recibida a la vez
    fn exchange(&mut self, command: &Frame) -> Result<Frame, Self::Error>;
}

/// Implementación de Interface para SPI con pin CS manual
pub struct SpiInterface<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS, E, PinE> SpiInterface<SPI, CS>
where
    SPI: Transfer<u8, Error = E>,
    CS: OutputPin<Error = PinE>,
{
    /// Crea una nueva interfaz SPI con el dispositivo deseleccionado
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, InterfaceError<E>> {
        cs.set_high().map_err(|_| InterfaceError::PinError)?;
        Ok(Self { spi, cs })
    }

    /// Deselecciona el dispositivo y devuelve el SPI y el pin CS
    pub fn release(mut self) -> (SPI, CS) {
        let _ = self.cs.set_high();
        (self.spi, self.cs)
    }
}

impl<SPI, CS, E, PinE> Interface for SpiInterface<SPI, CS>
where
    SPI: Transfer<u8, Error = E>,
    CS: OutputPin<Error = PinE>,
{
    type Error = InterfaceError<E>;

    fn exchange(&mut self, command: &Frame) -> Result<Frame, Self::Error> {
        let mut buffer = command.to_bytes();

        // Activar CS (nivel bajo)
        self.cs.set_low().map_err(|_| InterfaceError::PinError)?;

        // Transferencia full-duplex: la respuesta sobrescribe el buffer
        let result = self
            .spi
            .transfer(&mut buffer)
            .map(|received| received.len() == 4)
            .map_err(InterfaceError::SpiError);

        // Desactivar CS (nivel alto), siempre
        let deselect = self.cs.set_high().map_err(|_| InterfaceError::PinError);

        if !result? {
            return Err(InterfaceError::InvalidParameter);
        }
        deselect?;

        Ok(Frame::from_bytes(buffer))
    }
}

// Conversión de errores de la interfaz a Ewts5gnb21Error
impl<E> From<InterfaceError<E>> for Ewts5gnb21Error {
    fn from(error: InterfaceError<E>) -> Self {
        match error {
            InterfaceError::SpiError(_) => Ewts5gnb21Error::InterfaceError,
            InterfaceError::PinError => Ewts5gnb21Error::ChipSelectError,
            InterfaceError::InvalidParameter => Ewts5gnb21Error::InvalidParameter,
        }
    }
}

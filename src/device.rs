use core::fmt::Debug;

use crate::config::DeviceConfig;
use crate::frame::{Frame, ReadCommand};
use crate::interface::Interface;
use crate::status::{ErrorState, StatusTracker};
use crate::types::Sample;
use embedded_hal::blocking::delay::DelayMs;

// Define the device structure and enums
pub struct Ewts5gnb21<I, D> {
    pub(crate) interface: I,
    pub(crate) delay: D,
    pub(crate) config: DeviceConfig,
    pub(crate) tracker: StatusTracker,
    pub(crate) readiness: Readiness,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ewts5gnb21Error {
    /// El intercambio por el bus no pudo completarse
    InterfaceError,
    /// No se pudo activar o desactivar el pin CS
    ChipSelectError,
    /// Lectura solicitada antes de configurar el dispositivo
    NotConfigured,
    InvalidParameter,
}

/// Estado de configuración del dispositivo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Aún no se ha configurado
    Unconfigured,
    /// Configuración enviada (con o sin fallos de verificación)
    Configured,
    /// El llamador decidió omitir la configuración
    Skipped,
}

impl<I, D, E> Ewts5gnb21<I, D>
where
    I: Interface<Error = E>,
    E: Debug,
    D: DelayMs<u32>,
    Ewts5gnb21Error: From<E>,
{
    /// Create a new instance of Ewts5gnb21
    pub fn new(interface: I, delay: D) -> Self {
        Self::with_config(interface, delay, DeviceConfig::default())
    }

    /// Crea una instancia con una configuración concreta
    pub fn with_config(interface: I, delay: D, config: DeviceConfig) -> Self {
        Self {
            interface,
            delay,
            config,
            tracker: StatusTracker::new(),
            readiness: Readiness::Unconfigured,
        }
    }

    /// Intercambia una trama con el dispositivo y actualiza el indicador de error
    pub fn exchange(&mut self, command: Frame) -> Result<Frame, Ewts5gnb21Error> {
        let response = self.interface.exchange(&command).map_err(|e| {
            log::debug!("Intercambio fallido con {:02X?}: {:?}", command.to_bytes(), e);
            Ewts5gnb21Error::from(e)
        })?;
        let state = self.tracker.update(response.status());
        log::debug!(
            "SPI {:02X?} -> {:02X?} (estado {:02b}, {:?})",
            command.to_bytes(),
            response.to_bytes(),
            response.status().bits(),
            state
        );
        Ok(response)
    }

    /// Lee una muestra completa de los seis ejes
    ///
    /// El protocolo tiene una trama de latencia: cada comando devuelve la
    /// respuesta al comando anterior. Se envían la sincronización y el
    /// giroscopio X descartando sus respuestas, y luego los cinco ejes
    /// restantes más un comando de vaciado, cuyas respuestas traen en orden
    /// giroscopio X/Y/Z y acelerómetro X/Y/Z.
    ///
    /// La muestra se marca como no válida si el indicador de error estuvo
    /// activo tras cualquier intercambio del ciclo. Un fallo del bus aborta
    /// el ciclo sin devolver una muestra parcial.
    pub fn read_sample(&mut self) -> Result<Sample, Ewts5gnb21Error> {
        self.ensure_ready()?;

        let sequence = ReadCommand::SEQUENCE;
        let mut error_seen = false;

        // Sincronización: no tiene respuesta útil
        self.exchange(sequence[0].frame())?;
        error_seen |= self.tracker.is_error();
        // Giroscopio X: devuelve la respuesta a la sincronización
        self.exchange(sequence[1].frame())?;
        error_seen |= self.tracker.is_error();

        let mut values = [0i16; 6];
        for (value, command) in values.iter_mut().zip(sequence[2..].iter()) {
            let response = self.exchange(command.frame())?;
            error_seen |= self.tracker.is_error();
            *value = response.signed_data();
        }
        log::debug!("Ejes decodificados: {:?}", values);

        if error_seen {
            log::warn!("IMU read error: indicador de error activo durante la lectura");
        }

        Ok(Sample::from_axes(values, !error_seen))
    }

    /// Marca la configuración como omitida y permite leer sin configurar
    pub fn skip_configuration(&mut self) {
        log::info!("Configuración del EWTS5GNB21 omitida");
        self.readiness = Readiness::Skipped;
    }

    fn ensure_ready(&self) -> Result<(), Ewts5gnb21Error> {
        if self.config.require_configuration && self.readiness == Readiness::Unconfigured {
            return Err(Ewts5gnb21Error::NotConfigured);
        }
        Ok(())
    }
}

impl<I, D> Ewts5gnb21<I, D> {
    /// Estado actual del indicador de error
    pub fn error_state(&self) -> ErrorState {
        self.tracker.state()
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Consume el driver y devuelve la interfaz y el retardo
    pub fn release(self) -> (I, D) {
        (self.interface, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::mock::{MockDelay, ScriptedTransport};
    use crate::register::commands::READ_SEQUENCE;

    fn device(transport: ScriptedTransport) -> Ewts5gnb21<ScriptedTransport, MockDelay> {
        let mut device = Ewts5gnb21::new(transport, MockDelay::default());
        device.skip_configuration();
        device
    }

    /// Respuesta normal (estado `10`) con el dato indicado
    fn normal(data: u16) -> [u8; 4] {
        let d = data.to_be_bytes();
        [d[0], d[1], 0x80, 0x00]
    }

    #[test]
    fn test_read_requires_configuration() {
        let mut device = Ewts5gnb21::new(ScriptedTransport::new(), MockDelay::default());
        assert_eq!(device.read_sample(), Err(Ewts5gnb21Error::NotConfigured));
        let (transport, _) = device.release();
        assert!(transport.sent.is_empty());
    }

    #[test]
    fn test_read_without_requirement() {
        let config = DeviceConfig::default().require_configuration(false);
        let mut device =
            Ewts5gnb21::with_config(ScriptedTransport::new(), MockDelay::default(), config);
        assert!(device.read_sample().is_ok());
    }

    #[test]
    fn test_read_sends_literal_sequence() {
        let mut device = device(ScriptedTransport::new());
        device.read_sample().unwrap();
        let (transport, _) = device.release();
        let sent: Vec<[u8; 4]> = transport.sent.iter().map(|f| f.to_bytes()).collect();
        assert_eq!(sent, READ_SEQUENCE.to_vec());
    }

    #[test]
    fn test_pipelined_axis_order() {
        // Respuesta i corresponde al comando i-1
        let script = [
            normal(0xDEAD), // respuesta previa al ciclo
            normal(0xBEEF), // respuesta a la sincronización
            normal(1),      // giroscopio X
            normal(2),      // giroscopio Y
            normal(3),      // giroscopio Z
            normal(0xFFFC), // acelerómetro X
            normal(0xFFFB), // acelerómetro Y
            normal(0x8000), // acelerómetro Z
        ];
        let mut device = device(ScriptedTransport::with_script(script));
        let sample = device.read_sample().unwrap();
        assert_eq!(sample.gyro(), [1, 2, 3]);
        assert_eq!(sample.accel(), [-4, -5, -32768]);
        assert!(sample.valid);
    }

    #[test]
    fn test_constant_response_end_to_end() {
        let mut device = device(ScriptedTransport::constant([0x12, 0x34, 0xAB, 0xCD]));
        device.tracker.update(crate::frame::Status::ERROR);
        let sample = device.read_sample().unwrap();
        assert_eq!(sample.gyro(), [4660, 4660, 4660]);
        assert_eq!(sample.accel(), [4660, 4660, 4660]);
        assert!(sample.valid);
        assert_eq!(device.error_state(), ErrorState::Ok);
    }

    #[test]
    fn test_error_status_marks_sample_invalid() {
        let mut script = vec![normal(0); 8];
        script[4] = [0x00, 0x07, 0x40, 0x00]; // estado `01`
        let mut device = device(ScriptedTransport::with_script(script));
        let sample = device.read_sample().unwrap();
        assert!(!sample.valid);
        // Las respuestas posteriores con `10` borran el indicador
        assert_eq!(device.error_state(), ErrorState::Ok);
        assert_eq!(sample.gyro_z, 7);
    }

    #[test]
    fn test_transport_failure_aborts_cycle() {
        let transport = ScriptedTransport::new().fail_at(4);
        let mut device = device(transport);
        assert_eq!(device.read_sample(), Err(Ewts5gnb21Error::InterfaceError));
        let (transport, _) = device.release();
        assert_eq!(transport.sent.len(), 5);
    }
}

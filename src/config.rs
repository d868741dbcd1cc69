//! Configuración del driver del EWTS5GNB21

use core::fmt;

use embedded_hal::spi::{Mode, Phase, Polarity, MODE_0};

/// Retardo entre comandos de configuración (ms)
pub const DEFAULT_COMMAND_DELAY_MS: u32 = 250;
/// Frecuencia de reloj SPI recomendada (Hz)
pub const DEFAULT_SPI_BAUDRATE_HZ: u32 = 8_000_000;
/// Número de muestras promediadas en la calibración
pub const DEFAULT_CALIBRATION_SAMPLES: usize = 100;
/// Espera entre muestras de calibración (ms)
pub const DEFAULT_CALIBRATION_INTERVAL_MS: u32 = 10;
/// Periodo del monitor de supervisión (ms)
pub const DEFAULT_MONITOR_PERIOD_MS: u32 = 5000;

/// Configuración del driver
#[derive(Clone, Copy, PartialEq)]
pub struct DeviceConfig {
    /// Retardo tras cada comando de configuración
    pub command_delay_ms: u32,
    /// Frecuencia del bus SPI que debe aplicar la plataforma
    pub spi_baudrate_hz: u32,
    /// Modo SPI (CPOL/CPHA) que debe aplicar la plataforma
    pub spi_mode: Mode,
    /// Si es `true`, no se permite leer antes de configurar (u omitir la configuración)
    pub require_configuration: bool,
    pub calibration_samples: usize,
    pub calibration_interval_ms: u32,
    pub monitor_period_ms: u32,
}

impl DeviceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Establece el retardo entre comandos de configuración
    pub fn command_delay_ms(mut self, ms: u32) -> Self {
        self.command_delay_ms = ms;
        self
    }

    pub fn spi_baudrate_hz(mut self, hz: u32) -> Self {
        self.spi_baudrate_hz = hz;
        self
    }

    pub fn spi_mode(mut self, mode: Mode) -> Self {
        self.spi_mode = mode;
        self
    }

    /// Número del modo SPI (0..=3) según CPOL/CPHA
    pub fn spi_mode_number(&self) -> u8 {
        let cpol = match self.spi_mode.polarity {
            Polarity::IdleLow => 0,
            Polarity::IdleHigh => 2,
        };
        let cpha = match self.spi_mode.phase {
            Phase::CaptureOnFirstTransition => 0,
            Phase::CaptureOnSecondTransition => 1,
        };
        cpol | cpha
    }

    /// Activa o desactiva la comprobación de configuración previa a la lectura
    pub fn require_configuration(mut self, required: bool) -> Self {
        self.require_configuration = required;
        self
    }

    pub fn calibration_samples(mut self, samples: usize) -> Self {
        self.calibration_samples = samples;
        self
    }

    pub fn calibration_interval_ms(mut self, ms: u32) -> Self {
        self.calibration_interval_ms = ms;
        self
    }

    pub fn monitor_period_ms(mut self, ms: u32) -> Self {
        self.monitor_period_ms = ms;
        self
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            command_delay_ms: DEFAULT_COMMAND_DELAY_MS,
            spi_baudrate_hz: DEFAULT_SPI_BAUDRATE_HZ,
            spi_mode: MODE_0,
            require_configuration: true,
            calibration_samples: DEFAULT_CALIBRATION_SAMPLES,
            calibration_interval_ms: DEFAULT_CALIBRATION_INTERVAL_MS,
            monitor_period_ms: DEFAULT_MONITOR_PERIOD_MS,
        }
    }
}

// `Mode` no implementa Debug en embedded-hal 0.2
impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("command_delay_ms", &self.command_delay_ms)
            .field("spi_baudrate_hz", &self.spi_baudrate_hz)
            .field("spi_mode", &self.spi_mode_number())
            .field("require_configuration", &self.require_configuration)
            .field("calibration_samples", &self.calibration_samples)
            .field("calibration_interval_ms", &self.calibration_interval_ms)
            .field("monitor_period_ms", &self.monitor_period_ms)
            .finish()
    }
}

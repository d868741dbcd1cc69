//! Secuencias de configuración del EWTS5GNB21
//!
//! La configuración envía dos secuencias independientes de comandos
//! literales: primero el filtro paso bajo (LPF) y después el rango de medida
//! (MR). En ciertos pasos la respuesta recibida se compara con una trama
//! esperada. Un fallo de verificación se registra y la secuencia continúa;
//! solo un fallo del bus interrumpe la configuración.

use core::fmt::{self, Debug};

use crate::device::{Ewts5gnb21, Ewts5gnb21Error, Readiness};
use crate::frame::Frame;
use crate::interface::Interface;
use crate::register::commands;
use embedded_hal::blocking::delay::DelayMs;

/// Identifica cada secuencia de configuración
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// Filtro paso bajo
    LowPassFilter,
    /// Rango de medida
    MeasurementRange,
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::LowPassFilter => write!(f, "LPF"),
            SequenceKind::MeasurementRange => write!(f, "MR"),
        }
    }
}

/// Secuencia ordenada de comandos con sus comprobaciones
#[derive(Debug, Clone, Copy)]
pub struct ConfigSequence {
    pub kind: SequenceKind,
    pub commands: &'static [[u8; 4]],
    /// Paso (1-based) y respuesta esperada
    pub checks: &'static [(usize, [u8; 4])],
}

impl ConfigSequence {
    /// Respuesta esperada en un paso (1-based), si se verifica
    pub fn expected(&self, step: usize) -> Option<Frame> {
        self.checks
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, bytes)| Frame::from_bytes(*bytes))
    }

    /// Pasos de la secuencia como pares (comando, respuesta esperada)
    pub fn steps(&self) -> impl Iterator<Item = ConfigStep> + '_ {
        self.commands.iter().enumerate().map(move |(i, bytes)| ConfigStep {
            index: i + 1,
            command: Frame::from_bytes(*bytes),
            expected: self.expected(i + 1),
        })
    }
}

/// Un paso de configuración
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigStep {
    /// Número de paso, 1-based
    pub index: usize,
    pub command: Frame,
    pub expected: Option<Frame>,
}

/// Secuencia del filtro paso bajo: 60 Hz en acelerómetro, 46 Hz en giroscopio
pub const LPF_SEQUENCE: ConfigSequence = ConfigSequence {
    kind: SequenceKind::LowPassFilter,
    commands: &commands::LPF_COMMANDS,
    checks: &commands::LPF_CHECKS,
};

/// Secuencia del rango de medida
pub const MR_SEQUENCE: ConfigSequence = ConfigSequence {
    kind: SequenceKind::MeasurementRange,
    commands: &commands::MR_COMMANDS,
    checks: &commands::MR_CHECKS,
};

/// Fallo de verificación en un paso
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationFailure {
    pub sequence: SequenceKind,
    pub step: usize,
    pub expected: Frame,
    pub received: Frame,
}

/// Resultado de una configuración completa
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigReport {
    pub failures: Vec<VerificationFailure>,
}

impl ConfigReport {
    /// Número de pasos cuya verificación falló
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl<I, D, E> Ewts5gnb21<I, D>
where
    I: Interface<Error = E>,
    E: Debug,
    D: DelayMs<u32>,
    Ewts5gnb21Error: From<E>,
{
    /// Configura filtro paso bajo y rango de medida
    ///
    /// Devuelve el informe de verificación; los fallos de verificación no
    /// interrumpen la secuencia. Un fallo del bus se propaga y deja el
    /// dispositivo sin configurar.
    pub fn configure(&mut self) -> Result<ConfigReport, Ewts5gnb21Error> {
        log::info!("Configurando EWTS5GNB21 (LPF + MR)");
        // Hasta completar ambas secuencias el dispositivo no está listo
        self.readiness = Readiness::Unconfigured;
        let mut report = ConfigReport::default();

        for sequence in [&LPF_SEQUENCE, &MR_SEQUENCE] {
            self.run_sequence(sequence, &mut report)?;
        }

        self.readiness = Readiness::Configured;
        log::info!(
            "Configuración completada: {} fallo(s) de verificación",
            report.failure_count()
        );
        Ok(report)
    }

    /// Envía una secuencia de configuración acumulando los fallos en `report`
    pub fn run_sequence(
        &mut self,
        sequence: &ConfigSequence,
        report: &mut ConfigReport,
    ) -> Result<(), Ewts5gnb21Error> {
        for step in sequence.steps() {
            let response = self.exchange(step.command)?;

            if let Some(expected) = step.expected {
                if response != expected {
                    log::warn!(
                        "{} Bit check failed. (Step = {}) esperado {:02X?}, recibido {:02X?}",
                        sequence.kind,
                        step.index,
                        expected.to_bytes(),
                        response.to_bytes()
                    );
                    report.failures.push(VerificationFailure {
                        sequence: sequence.kind,
                        step: step.index,
                        expected,
                        received: response,
                    });
                }
            }

            self.delay.delay_ms(self.config.command_delay_ms);
        }
        Ok(())
    }
}

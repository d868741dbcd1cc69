//! Monitor de supervisión periódica
//!
//! Cada ciclo lee una muestra del IMU, registra el resultado y alimenta el
//! watchdog pase lo que pase. Un fallo del bus se registra y se cuenta,
//! nunca se propaga: el ciclo siguiente vuelve a intentarlo.

use core::fmt::Debug;

use crate::device::{Ewts5gnb21, Ewts5gnb21Error};
use crate::interface::Interface;
use crate::types::Sample;
use embedded_hal::blocking::delay::DelayMs;

/// Watchdog que debe alimentarse en cada ciclo
pub trait Watchdog {
    fn feed(&mut self);
}

/// Resultado de un ciclo de supervisión
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Muestra leída (puede no ser válida)
    Sample(Sample),
    /// La lectura falló; el error ya se registró
    Failed(Ewts5gnb21Error),
}

/// Contadores acumulados del monitor
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MonitorStats {
    pub ticks: u32,
    pub failures: u32,
    pub invalid_samples: u32,
}

pub struct Monitor<I, D, W> {
    device: Ewts5gnb21<I, D>,
    watchdog: W,
    stats: MonitorStats,
    last_sample: Option<Sample>,
}

impl<I, D, W, E> Monitor<I, D, W>
where
    I: Interface<Error = E>,
    E: Debug,
    D: DelayMs<u32>,
    W: Watchdog,
    Ewts5gnb21Error: From<E>,
{
    pub fn new(device: Ewts5gnb21<I, D>, watchdog: W) -> Self {
        Self {
            device,
            watchdog,
            stats: MonitorStats::default(),
            last_sample: None,
        }
    }

    /// Ejecuta un ciclo de supervisión
    pub fn tick(&mut self) -> TickOutcome {
        self.stats.ticks = self.stats.ticks.wrapping_add(1);

        let outcome = match self.device.read_sample() {
            Ok(sample) => {
                if !sample.valid {
                    self.stats.invalid_samples = self.stats.invalid_samples.wrapping_add(1);
                }
                log::info!(
                    "IMU gyro={:?} accel={:?} valid={}",
                    sample.gyro(),
                    sample.accel(),
                    sample.valid
                );
                self.last_sample = Some(sample);
                TickOutcome::Sample(sample)
            }
            Err(e) => {
                self.stats.failures = self.stats.failures.wrapping_add(1);
                log::error!("Lectura del IMU fallida: {:?}", e);
                TickOutcome::Failed(e)
            }
        };

        self.watchdog.feed();
        outcome
    }

    /// Ejecuta ciclos separados por el periodo configurado mientras `running` sea cierto
    pub fn run<F>(&mut self, mut running: F)
    where
        F: FnMut() -> bool,
    {
        let period = self.device.config().monitor_period_ms;
        while running() {
            self.tick();
            self.device.delay.delay_ms(period);
        }
        log::info!("Monitor detenido tras {} ciclos", self.stats.ticks);
    }

    /// Última muestra leída con éxito
    pub fn last_sample(&self) -> Option<Sample> {
        self.last_sample
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    pub fn device_mut(&mut self) -> &mut Ewts5gnb21<I, D> {
        &mut self.device
    }

    /// Consume el monitor y devuelve el dispositivo y el watchdog
    pub fn release(self) -> (Ewts5gnb21<I, D>, W) {
        (self.device, self.watchdog)
    }
}

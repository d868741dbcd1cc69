//! Ejemplo de supervisión del EWTS5GNB21 en Linux
//!
//! Configura el sensor por spidev, calibra los offsets y ejecuta el monitor
//! periódico hasta recibir Ctrl+C.
//!
//! Para ejecutar: cargo run --example linux_monitor --features linux

use ewts5gnb21_rs::calibration;
use ewts5gnb21_rs::monitor::{Monitor, Watchdog};
use ewts5gnb21_rs::telemetry::NotificationPayload;
use ewts5gnb21_rs::{new_spi_device_with_config, DeviceConfig};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::sysfs_gpio::Direction;
use linux_embedded_hal::{Delay, Spidev, SysfsPin};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const SPI_PATH: &str = "/dev/spidev0.0";
const CS_PIN: u64 = 8;

/// Logger mínimo a stderr para el ejemplo
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn spi_mode_flags(config: &DeviceConfig) -> SpiModeFlags {
    match config.spi_mode_number() {
        1 => SpiModeFlags::SPI_MODE_1,
        2 => SpiModeFlags::SPI_MODE_2,
        3 => SpiModeFlags::SPI_MODE_3,
        _ => SpiModeFlags::SPI_MODE_0,
    }
}

/// El watchdog de Linux no se usa aquí; solo se registra la alimentación
struct LogWatchdog;

impl Watchdog for LogWatchdog {
    fn feed(&mut self) {
        log::debug!("watchdog alimentado");
    }
}

fn main() {
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(log::LevelFilter::Info));
    println!("EWTS5GNB21 - Ejemplo de supervisión");

    // Flag para controlar la ejecución del programa
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    // Configurar el manejador para Ctrl+C
    ctrlc::set_handler(move || {
        println!("\nDeteniendo el programa...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error al configurar el manejador de Ctrl+C");

    let config = DeviceConfig::default();

    // Abrir el bus SPI con la frecuencia y el modo recomendados
    let mut spi = match Spidev::open(SPI_PATH) {
        Ok(spi) => spi,
        Err(e) => {
            eprintln!("Error al abrir {}: {:?}", SPI_PATH, e);
            return;
        }
    };
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(config.spi_baudrate_hz)
        .mode(spi_mode_flags(&config) | SpiModeFlags::SPI_NO_CS)
        .build();
    if let Err(e) = spi.configure(&options) {
        eprintln!("Error al configurar el SPI: {:?}", e);
        return;
    }

    // Pin CS manual
    let cs = SysfsPin::new(CS_PIN);
    if let Err(e) = cs.export().and_then(|_| cs.set_direction(Direction::High)) {
        eprintln!("Error al preparar el pin CS {}: {:?}", CS_PIN, e);
        return;
    }

    let mut device = match new_spi_device_with_config(spi, cs, Delay {}, config) {
        Ok(device) => device,
        Err(e) => {
            eprintln!("Error al inicializar el EWTS5GNB21: {:?}", e);
            return;
        }
    };

    match device.configure() {
        Ok(report) if report.is_clean() => println!("Configuración verificada"),
        Ok(report) => {
            for failure in &report.failures {
                println!(
                    "{} Bit check failed. (Step = {})",
                    failure.sequence, failure.step
                );
            }
        }
        Err(e) => {
            eprintln!("Error durante la configuración: {:?}", e);
            return;
        }
    }

    let offsets = match calibration::calibrate_default(&mut device) {
        Ok(report) => {
            println!(
                "Calibración: {} muestras válidas, {} descartadas",
                report.samples_used, report.samples_rejected
            );
            report.offsets
        }
        Err(e) => {
            eprintln!("Calibración fallida, se continúa sin offsets: {:?}", e);
            Default::default()
        }
    };

    let mut monitor = Monitor::new(device, LogWatchdog);
    let flag = running.clone();
    monitor.run(move || flag.load(Ordering::SeqCst));

    if let Some(sample) = monitor.last_sample() {
        let payload = NotificationPayload::from_sample(&offsets.apply(&sample));
        println!("Última notificación: {:02X?}", payload.as_bytes());
    }

    let stats = monitor.stats();
    println!(
        "Ciclos: {}, fallos: {}, muestras no válidas: {}",
        stats.ticks, stats.failures, stats.invalid_samples
    );
    println!("Ejemplo finalizado");
}

//! Implementaciones simuladas del bus para pruebas
//!
//! `MockBus` simula el SPI y el pin CS compartiendo un registro de eventos.
//! `ScriptedTransport` implementa `Interface` directamente y devuelve
//! respuestas programadas.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::blocking::spi::Transfer;
use embedded_hal::digital::v2::OutputPin;

use super::{Interface, InterfaceError};
use crate::frame::Frame;

/// Error simulado del bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Evento registrado en el bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Select,
    Deselect,
    Transfer([u8; 4]),
}

#[derive(Debug, Default)]
struct BusState {
    events: Vec<BusEvent>,
    responses: VecDeque<[u8; 4]>,
    transfers: usize,
    fail_at: Option<usize>,
    fail_select: bool,
    fail_deselect: bool,
    selected: bool,
}

/// Bus SPI simulado con su pin CS
#[derive(Debug, Clone, Default)]
pub struct MockBus {
    state: Rc<RefCell<BusState>>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spi(&self) -> MockSpi {
        MockSpi {
            state: Rc::clone(&self.state),
        }
    }

    pub fn cs(&self) -> MockPin {
        MockPin {
            state: Rc::clone(&self.state),
        }
    }

    /// Añade una respuesta a la cola; sin respuestas se devuelven ceros
    pub fn push_response(&self, response: [u8; 4]) {
        self.state.borrow_mut().responses.push_back(response);
    }

    /// Hace fallar la transferencia número `index` (0-based)
    pub fn fail_transfer_at(&self, index: usize) {
        self.state.borrow_mut().fail_at = Some(index);
    }

    /// Hace fallar `set_low` en el pin CS
    pub fn fail_select(&self) {
        self.state.borrow_mut().fail_select = true;
    }

    /// Hace fallar `set_high` en el pin CS (el nivel sí cambia)
    pub fn fail_deselect(&self) {
        self.state.borrow_mut().fail_deselect = true;
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.state.borrow().events.clone()
    }

    pub fn is_selected(&self) -> bool {
        self.state.borrow().selected
    }
}

/// SPI simulado
pub struct MockSpi {
    state: Rc<RefCell<BusState>>,
}

impl Transfer<u8> for MockSpi {
    type Error = MockError;

    fn transfer<'w>(&mut self, words: &'w mut [u8]) -> Result<&'w [u8], Self::Error> {
        let mut state = self.state.borrow_mut();
        let index = state.transfers;
        state.transfers += 1;
        if state.fail_at == Some(index) {
            return Err(MockError);
        }

        let mut sent = [0u8; 4];
        let n = words.len().min(4);
        sent[..n].copy_from_slice(&words[..n]);
        state.events.push(BusEvent::Transfer(sent));

        let response = state.responses.pop_front().unwrap_or([0u8; 4]);
        words[..n].copy_from_slice(&response[..n]);
        Ok(words)
    }
}

/// Pin CS simulado (activo a nivel bajo)
pub struct MockPin {
    state: Rc<RefCell<BusState>>,
}

impl OutputPin for MockPin {
    type Error = MockError;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_select {
            return Err(MockError);
        }
        state.selected = true;
        state.events.push(BusEvent::Select);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.selected = false;
        state.events.push(BusEvent::Deselect);
        if state.fail_deselect {
            return Err(MockError);
        }
        Ok(())
    }
}

/// Transporte con respuestas programadas
///
/// Devuelve las respuestas de `script` en orden y después `fallback`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    pub sent: Vec<Frame>,
    script: VecDeque<Frame>,
    fallback: Frame,
    fail_at: Option<usize>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Responde siempre con la misma trama
    pub fn constant(response: [u8; 4]) -> Self {
        Self {
            fallback: Frame::from_bytes(response),
            ..Self::default()
        }
    }

    pub fn with_script<T: IntoIterator<Item = [u8; 4]>>(responses: T) -> Self {
        Self {
            script: responses.into_iter().map(Frame::from_bytes).collect(),
            ..Self::default()
        }
    }

    /// Hace fallar el intercambio número `index` (0-based)
    pub fn fail_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }
}

impl Interface for ScriptedTransport {
    type Error = InterfaceError<MockError>;

    fn exchange(&mut self, command: &Frame) -> Result<Frame, Self::Error> {
        if self.fail_at == Some(self.sent.len()) {
            self.sent.push(*command);
            return Err(InterfaceError::SpiError(MockError));
        }
        self.sent.push(*command);
        Ok(self.script.pop_front().unwrap_or(self.fallback))
    }
}

/// Retardo simulado que registra las esperas pedidas
#[derive(Debug, Default, Clone)]
pub struct MockDelay {
    pub calls: Vec<u32>,
}

impl embedded_hal::blocking::delay::DelayMs<u32> for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
    }
}

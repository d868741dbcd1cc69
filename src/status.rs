//! Seguimiento del indicador de error del dispositivo
//!
//! Cada respuesta trae un campo de estado de 2 bits. `01` activa el
//! indicador, `10` lo borra y cualquier otro valor lo deja como estaba.

use crate::frame::Status;

/// Estado del indicador de error
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorState {
    #[default]
    Ok,
    Error,
}

/// Indicador de error enclavado
#[derive(Debug, Default, Clone)]
pub struct StatusTracker {
    state: ErrorState,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aplica el estado de una respuesta y devuelve el estado resultante
    pub fn update(&mut self, status: Status) -> ErrorState {
        if status == Status::ERROR {
            self.state = ErrorState::Error;
        } else if status == Status::NORMAL {
            self.state = ErrorState::Ok;
        }
        self.state
    }

    pub fn state(&self) -> ErrorState {
        self.state
    }

    pub fn is_error(&self) -> bool {
        self.state == ErrorState::Error
    }
}

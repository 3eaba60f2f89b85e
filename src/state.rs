// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::error::DispatchError;
use crate::services::dispatcher::Dispatcher;

pub type SharedState = Arc<AppState>;

#[derive(Debug)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn from_config(config: &Config) -> Result<Self, DispatchError> {
        Ok(Self::new(Dispatcher::from_config(config)?))
    }
}

//! Registro de quedas de um alvo monitorado e estatísticas de uptime/downtime.
//!
//! O núcleo é [`OutageRecord`] (uma queda) e [`OutageLog`] (coleção
//! cronológica com estatísticas incrementais e persistência em texto).
//! Os demais módulos (pulso, heartbeat, gerador, dashboard) só usam o núcleo
//! pelo seu contrato público.

pub mod cli;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod generator;
pub mod heartbeat;
pub mod outage;
pub mod pulse;
pub mod scheduler;
pub mod storage;
pub mod types;

pub use error::{Error, ParseError, Result};
pub use outage::OutageLog;
pub use types::{ByDuration, OutageRecord};

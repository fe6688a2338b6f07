use crate::clock::SharedClock;
use crate::error::Result;
use crate::outage::OutageLog;
use crate::pulse;
use crate::types::OutageRecord;
use chrono::TimeDelta;
use std::path::Path;
use tracing::info;

/// Registra a queda que vai do último pulso até agora.
///
/// O fim é capturado antes de qualquer I/O. Um log inexistente começa vazio;
/// o resultado é sempre salvo de volta em `log_path`, mesmo quando a queda
/// fica fora do horizonte e é descartada.
pub fn log_outage(
    pulse_path: impl AsRef<Path>,
    log_path: impl AsRef<Path>,
    max_age: TimeDelta,
    clock: SharedClock,
) -> Result<OutageRecord> {
    let end = clock.now();
    let start = pulse::read_pulse(pulse_path)?;
    let record = OutageRecord::new(start, end);

    let log_path = log_path.as_ref();
    let mut log = OutageLog::load_or_default(log_path, max_age, clock)?;
    log.add_outage(record.clone());
    log.save_to_file(log_path)?;

    info!(
        start = %record.start,
        end = %record.end,
        duration_secs = record.duration().num_seconds(),
        "Queda registrada"
    );
    Ok(record)
}

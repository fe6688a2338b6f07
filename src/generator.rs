use crate::clock::SharedClock;
use crate::outage::OutageLog;
use crate::types::OutageRecord;
use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use tracing::debug;

/// Quantidade padrão de quedas sintéticas.
pub const DEFAULT_AMOUNT: usize = 500;

/// Gera um histórico sintético dentro do horizonte `max_age`.
///
/// Começa em `agora - max_age + 5h`; cada queda dura de 1 a 11 horas e a
/// próxima começa de 1 a 11 horas após o fim da anterior. Quedas que passam
/// de "agora" também entram no log. Um `max_age` além do alcance do chrono
/// começa no menor instante representável.
pub fn generate<R: Rng>(
    amount: usize,
    max_age: TimeDelta,
    clock: SharedClock,
    rng: &mut R,
) -> OutageLog {
    let origin = clock
        .now()
        .checked_sub_signed(max_age)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let mut base = origin + TimeDelta::hours(5);
    let mut log = OutageLog::with_clock(max_age, clock);

    for _ in 0..amount {
        let end = base + TimeDelta::hours(rng.gen_range(1..=11));
        log.add_outage(OutageRecord::new(base, end));
        debug!(entry = log.count(), start = %base, end = %end, "Queda sintética");
        base = end + TimeDelta::hours(rng.gen_range(1..=11));
    }

    log
}

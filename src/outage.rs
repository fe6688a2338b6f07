use crate::clock::{self, SharedClock};
use crate::error::{Error, Result};
use crate::types::OutageRecord;
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

/// Horizonte de admissão padrão da biblioteca.
pub const DEFAULT_MAX_AGE: TimeDelta = TimeDelta::days(30);

/// Janela do contador de quedas recentes.
pub const RECENT_WINDOW: TimeDelta = TimeDelta::hours(24);

/// Coleção cronológica de quedas com estatísticas incrementais.
///
/// As estatísticas só são atualizadas na inserção, nunca recalculadas:
/// `count_24h` é um contador pontual e `max_uptime_gap` considera apenas o
/// predecessor da queda recém-inserida.
#[derive(Debug, Clone)]
pub struct OutageLog {
    records: Vec<OutageRecord>,
    max_age: TimeDelta,
    max_uptime_gap: TimeDelta,
    max_outage_duration: TimeDelta,
    count_24h: usize,
    clock: SharedClock,
}

impl Default for OutageLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGE)
    }
}

impl OutageLog {
    pub fn new(max_age: TimeDelta) -> Self {
        Self::with_clock(max_age, clock::system())
    }

    pub fn with_clock(max_age: TimeDelta, clock: SharedClock) -> Self {
        Self {
            records: Vec::new(),
            max_age,
            max_uptime_gap: TimeDelta::zero(),
            max_outage_duration: TimeDelta::zero(),
            count_24h: 0,
            clock,
        }
    }

    /// Adiciona uma queda. Quedas além do horizonte são descartadas em silêncio.
    pub fn add_outage(&mut self, record: OutageRecord) {
        let now = self.clock.now();

        // horizonte fora do alcance do chrono: sem limite de idade
        let horizon = now.checked_sub_signed(self.max_age);
        if horizon.is_some_and(|horizon| record.end < horizon) {
            debug!(
                start = %record.start,
                end = %record.end,
                "Queda anterior ao horizonte de admissão, descartada"
            );
            return;
        }
        if now
            .checked_sub_signed(RECENT_WINDOW)
            .is_none_or(|window| record.end > window)
        {
            self.count_24h += 1;
        }

        let duration = record.duration();
        let index = match self
            .records
            .binary_search_by_key(&record.start_key(), OutageRecord::start_key)
        {
            Ok(index) => {
                debug!(start = %record.start, "Início duplicado, registro substituído");
                self.records[index] = record;
                index
            }
            Err(index) => {
                self.records.insert(index, record);
                index
            }
        };

        if duration > self.max_outage_duration {
            self.max_outage_duration = duration;
        }

        if index > 0 {
            let uptime = self.records[index].uptime_between(&self.records[index - 1]);
            if uptime > self.max_uptime_gap {
                self.max_uptime_gap = uptime;
            }
        }

        debug!(index, total = self.records.len(), "Queda adicionada");
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registros em ordem crescente de início.
    pub fn records(&self) -> &[OutageRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OutageRecord> {
        self.records.iter()
    }

    /// Queda com o maior início.
    pub fn last_outage(&self) -> Result<&OutageRecord> {
        self.records.last().ok_or(Error::Empty)
    }

    pub fn first_outage(&self) -> Result<&OutageRecord> {
        self.records.first().ok_or(Error::Empty)
    }

    /// `agora - início da queda mais antiga`.
    pub fn oldest_outage_age(&self) -> Result<TimeDelta> {
        Ok(self.now() - self.first_outage()?.start)
    }

    /// `agora - fim da última queda`.
    pub fn current_uptime(&self) -> Result<TimeDelta> {
        Ok(self.now() - self.last_outage()?.end)
    }

    pub fn get_at(&self, index: usize) -> Result<&OutageRecord> {
        self.records.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// Posição de um registro por igualdade de valor.
    pub fn index_of(&self, record: &OutageRecord) -> Option<usize> {
        self.records.iter().position(|r| r == record)
    }

    pub fn count_24h(&self) -> usize {
        self.count_24h
    }

    pub fn max_uptime_gap(&self) -> TimeDelta {
        self.max_uptime_gap
    }

    pub fn max_outage_duration(&self) -> TimeDelta {
        self.max_outage_duration
    }

    pub fn max_age(&self) -> TimeDelta {
        self.max_age
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}

impl<'a> IntoIterator for &'a OutageLog {
    type Item = &'a OutageRecord;
    type IntoIter = std::slice::Iter<'a, OutageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

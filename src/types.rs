use crate::error::ParseError;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Separador de campos do formato de linha persistido.
pub const FIELD_DELIMITER: char = '~';

/// Formato de exibição (e do arquivo de pulso), sempre em hora local.
pub const DISPLAY_FORMAT: &str = "%m-%d-%Y %H:%M:%S";

/// Struct de uma queda: intervalo em que o alvo ficou fora do ar.
///
/// Não implementa `Ord`: o log ordena pela chave de início
/// ([`OutageRecord::start_key`]) e comparações por magnitude usam [`ByDuration`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OutageRecord {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
}

impl OutageRecord {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Chave de armazenamento no log.
    pub fn start_key(&self) -> DateTime<Utc> {
        self.start
    }

    /// `end - start`. Negativo se `end < start`; não é rejeitado.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Uptime entre `earlier` (que deve ser a queda anterior) e esta.
    pub fn uptime_between(&self, earlier: &OutageRecord) -> TimeDelta {
        self.start - earlier.end
    }

    /// Verdadeiro se o início ou o fim de `other` cai estritamente dentro desta queda.
    pub fn collides_with(&self, other: &OutageRecord) -> bool {
        let inside = |t: DateTime<Utc>| self.start < t && t < self.end;
        inside(other.start) || inside(other.end)
    }

    /// `start~end~description`, timestamps em RFC 3339 UTC.
    pub fn serialize(&self) -> String {
        format!(
            "{}{d}{}{d}{}",
            format_timestamp(&self.start),
            format_timestamp(&self.end),
            self.description,
            d = FIELD_DELIMITER
        )
    }

    pub fn deserialize(line: &str) -> Result<Self, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut fields = line.splitn(3, FIELD_DELIMITER);

        let start = fields
            .next()
            .filter(|f| !f.trim().is_empty())
            .ok_or(ParseError::MissingField("start"))?;
        let end = fields.next().ok_or(ParseError::MissingField("end"))?;
        let description = fields.next().unwrap_or_default();

        Ok(Self {
            start: parse_timestamp("start", start)?,
            end: parse_timestamp("end", end)?,
            description: description.to_string(),
        })
    }
}

impl fmt::Display for OutageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for OutageRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s)
    }
}

/// Ordenação por duração, independente da ordem cronológica do log.
#[derive(Debug, Clone, Copy)]
pub struct ByDuration<'a>(pub &'a OutageRecord);

impl ByDuration<'_> {
    pub fn compare(a: &OutageRecord, b: &OutageRecord) -> Ordering {
        a.duration().cmp(&b.duration())
    }
}

impl PartialEq for ByDuration<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ByDuration<'_> {}

impl PartialOrd for ByDuration<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByDuration<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        ByDuration::compare(self.0, other.0)
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|reason| ParseError::Timestamp {
            field,
            value: value.to_string(),
            reason,
        })
}

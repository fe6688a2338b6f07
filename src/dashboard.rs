//! dashboard.rs - Resumo de status e listagem paginada do log de quedas
//!
//! Só usa o contrato de leitura de `OutageLog`; nada aqui altera o log.

use crate::error::{Error, Result};
use crate::outage::OutageLog;
use crate::types::{DISPLAY_FORMAT, OutageRecord};
use chrono::{DateTime, Local, TimeDelta, Utc};
use serde::Serialize;
use std::fmt::Write;

/// Maior índice exibido na coluna `####`.
const MAX_ROW_INDEX: usize = 9999;

/// Fotografia das estatísticas do log, pronta para texto ou JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub outages: usize,
    pub max_age_days: i64,
    pub days_covered: Option<i64>,
    pub count_24h: usize,
    pub current_uptime_secs: Option<i64>,
    pub last_downtime_secs: Option<i64>,
    pub max_uptime_secs: i64,
    pub max_downtime_secs: i64,
    pub last_outage: Option<OutageRecord>,
}

impl Summary {
    pub fn from_log(log: &OutageLog) -> Self {
        let last = log.last_outage().ok();
        Self {
            outages: log.count(),
            max_age_days: log.max_age().num_days(),
            days_covered: log.oldest_outage_age().ok().map(round_days),
            count_24h: log.count_24h(),
            current_uptime_secs: log.current_uptime().ok().map(|d| d.num_seconds()),
            last_downtime_secs: last.map(|r| r.duration().num_seconds()),
            max_uptime_secs: log.max_uptime_gap().num_seconds(),
            max_downtime_secs: log.max_outage_duration().num_seconds(),
            last_outage: last.cloned(),
        }
    }
}

fn round_days(span: TimeDelta) -> i64 {
    (span.num_seconds() as f64 / 86_400.0).round() as i64
}

/// `DD:HH:MM:SS`, com sinal quando negativo.
pub fn format_span(span: TimeDelta) -> String {
    let sign = if span < TimeDelta::zero() { "-" } else { "" };
    let span = span.abs();
    format!(
        "{sign}{:02}:{:02}:{:02}:{:02}",
        span.num_days(),
        span.num_hours() % 24,
        span.num_minutes() % 60,
        span.num_seconds() % 60
    )
}

pub fn describe_span(span: TimeDelta) -> String {
    format!(
        "{} dia(s), {} hora(s), {} minuto(s), {} segundo(s)",
        span.num_days(),
        span.num_hours() % 24,
        span.num_minutes() % 60,
        span.num_seconds() % 60
    )
}

pub fn format_local(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(DISPLAY_FORMAT).to_string()
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let span = |secs: Option<i64>| {
        secs.map(|s| describe_span(TimeDelta::seconds(s)))
            .unwrap_or_else(|| "-".to_string())
    };

    let _ = writeln!(out, "AURORA: registro de quedas");
    let _ = writeln!(
        out,
        "{} queda(s) nos últimos {} dia(s)",
        summary.outages,
        summary.days_covered.unwrap_or(0)
    );
    let _ = writeln!(out, "{} queda(s) nas últimas 24 horas", summary.count_24h);
    let _ = writeln!(out);
    let _ = writeln!(out, "Uptime atual : {}", span(summary.current_uptime_secs));
    let _ = writeln!(out, "Última queda : {}", span(summary.last_downtime_secs));
    let _ = writeln!(out, "Maior uptime : {}", span(Some(summary.max_uptime_secs)));
    let _ = writeln!(out, "Maior queda  : {}", span(Some(summary.max_downtime_secs)));

    match &summary.last_outage {
        Some(last) => {
            let _ = writeln!(out);
            let _ = writeln!(out, "A última queda foi de {}", format_local(&last.start));
            let _ = writeln!(out, "                  até {}", format_local(&last.end));
        }
        None => {
            let _ = writeln!(out);
            let _ = writeln!(out, "Nenhuma queda registrada.");
        }
    }
    out
}

/// Número de páginas (ao menos uma, mesmo com o log vazio).
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Tabela de uma página (base 0) do log, via acesso posicional.
pub fn render_page(log: &OutageLog, page: usize, page_size: usize) -> Result<String> {
    let page_size = page_size.max(1);
    let pages = page_count(log.count(), page_size);
    if page >= pages {
        return Err(Error::IndexOutOfRange {
            index: page,
            len: pages,
        });
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "|####|        INÍCIO       |         FIM         |   DURAÇÃO   |"
    );

    let first = page * page_size;
    let last = (first + page_size).min(log.count());
    for index in first..last {
        let record = log.get_at(index)?;
        let _ = writeln!(
            out,
            "|{:>4}| {} | {} | {:>11} |",
            index.min(MAX_ROW_INDEX),
            format_local(&record.start),
            format_local(&record.end),
            format_span(record.duration())
        );
    }

    let _ = writeln!(out, "Página {}/{} ({} queda(s))", page + 1, pages, log.count());
    Ok(out)
}

//! Newer statement layout ("2107_Stavropol").
//!
//! Expected text records after PDF-to-text (`→` is a TAB):
//!   03.07.2021 → 12:52 → Перевод с карты → 3 500,00 → 28 655,30
//!   03.07.2021 → 123456 → SBOL перевод 1234****1234 Н. ИГОРЬ РОМАНОВИЧ
//!
//! Credits carry an explicit `+`, operations in a foreign currency add the
//! original amount as a fourth part of the second line, and long descriptions
//! wrap onto an optional third line:
//!   08.07.2021 → 18:27 → Все для дома → 193,91 → 14 593,30
//!   09.07.2021 → 254718 → XXXXX XXXXX → 2,09 €
//!
//! The header holds the period totals as a small table:
//!   ОСТАТОК НА 30.06.2021 → ОСТАТОК НА 06.07.2021 → ВСЕГО СПИСАНИЙ → ВСЕГО ПОПОЛНЕНИЙ
//!   28 542,83 → 12 064,34 → 248 822,49 → 232 344,00

use regex::Regex;
use std::sync::OnceLock;

use vypiska_core::{ExtractError, ForeignAmount, LayoutKind, RecordFields, Result, parse_money};

use crate::grammar::{LayoutGrammar, RecordSpan, record_lines, split_line};

/// Operation line followed by the start of the settlement line.
fn record_head_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"\d\d\.\d\d\.\d\d\d\d\s\d\d:\d\d", // operation date and time
            r"[^\n]*\n",                        // rest of the operation line
            r"\d\d\.\d\d\.\d\d\d\d\s",          // processing date
            r"(?:\d{3,8}|-)",                   // authorisation code or "-"
        ))
        .expect("2107 record head regex")
    })
}

/// Anything that closes the current record.
fn record_end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"Продолжение\sна\sследующей\sстранице", // page break
            r"|\d\d\.\d\d\.\d\d\d\d\s\d\d:\d\d",      // next operation
            r"|Реквизиты\sдля\sперевода",             // end of statement
        ))
        .expect("2107 record end regex")
    })
}

fn foreign_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*\S)\s+(\S+)$").expect("2107 foreign amount regex"))
}

fn totals_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"ОСТАТОК НА.*?ОСТАТОК НА.*?ВСЕГО СПИСАНИЙ.*?ВСЕГО ПОПОЛНЕНИЙ[^\n]*\n([^\n]*)")
            .expect("2107 totals regex")
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Stavropol2107;

impl LayoutGrammar for Stavropol2107 {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Stavropol2107
    }

    fn segment<'a>(&self, text: &'a str) -> Result<Vec<RecordSpan<'a>>> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while let Some(head) = record_head_re().find_at(text, pos) {
            // A record without anything after it is not closed, so it does not count.
            let Some(end) = record_end_re().find_at(text, head.end()) else {
                break;
            };
            spans.push(RecordSpan::new(text, head.start(), end.start()));
            pos = end.start();
        }

        if spans.is_empty() {
            return Err(ExtractError::NoTransactionsFound {
                layout: self.kind(),
            });
        }
        Ok(spans)
    }

    fn decompose(&self, span: &str) -> Result<RecordFields> {
        let lines = record_lines(span);
        if !(2..=3).contains(&lines.len()) {
            return Err(ExtractError::record_structure(format!(
                "record is expected to have 2 or 3 lines, got {}",
                lines.len()
            )));
        }

        let parts = split_line(lines[0]);
        log::debug!("2107 record first line parts: {parts:?}");
        if parts.len() != 5 {
            return Err(ExtractError::record_structure(format!(
                "first line is expected to have 5 parts, got {}: {:?}",
                parts.len(),
                lines[0]
            )));
        }

        let mut fields = RecordFields {
            operation_date: format!("{} {}", parts[0], parts[1]),
            category: parts[2].to_string(),
            value_account_currency: parse_money(parts[3], true)?,
            remainder_account_currency: parse_money(parts[4], false)?,
            ..RecordFields::default()
        };

        let parts = split_line(lines[1]);
        if !(3..=4).contains(&parts.len()) {
            return Err(ExtractError::record_structure(format!(
                "second line is expected to have 3 or 4 parts, got {}: {:?}",
                parts.len(),
                lines[1]
            )));
        }
        fields.processing_date = parts[0].to_string();
        fields.authorisation_code = parts[1].to_string();
        fields.description = parts[2].to_string();

        if let Some(foreign) = parts.get(3) {
            let caps = foreign_amount_re().captures(foreign).ok_or_else(|| {
                ExtractError::record_structure(format!(
                    "expected a foreign amount like '6,79 €', got: {foreign:?}"
                ))
            })?;
            fields.operational = Some(ForeignAmount {
                value: parse_money(&caps[1], true)?,
                currency: caps[2].to_string(),
            });
        }

        if let Some(line) = lines.get(2) {
            let parts = split_line(line);
            if parts.len() != 1 {
                return Err(ExtractError::record_structure(format!(
                    "continuation line is expected to have only one part, got {}: {line:?}",
                    parts.len()
                )));
            }
            fields.push_description(parts[0]);
        }

        Ok(fields)
    }

    fn extract_period_total(&self, text: &str) -> Result<f64> {
        let caps = totals_header_re()
            .captures(text)
            .ok_or(ExtractError::TotalsNotFound {
                layout: self.kind(),
                what: "ОСТАТОК НА / ВСЕГО СПИСАНИЙ / ВСЕГО ПОПОЛНЕНИЙ header",
            })?;

        // opening balance, closing balance, debits, credits
        let parts = split_line(caps.get(1).map_or("", |m| m.as_str()));
        let [_, _, debits, credits, ..] = parts.as_slice() else {
            return Err(ExtractError::TotalsNotFound {
                layout: self.kind(),
                what: "totals row under the ВСЕГО СПИСАНИЙ / ВСЕГО ПОПОЛНЕНИЙ header",
            });
        };

        let debits = parse_money(debits, false)?;
        let credits = parse_money(credits, false)?;
        Ok(credits - debits)
    }
}

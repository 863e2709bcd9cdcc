//! Older statement layout ("2005_Moscow").
//!
//! Expected text records after PDF-to-text (`→` is a TAB):
//!   29.08.2019 10:04 → GETT → 1 189,40 → 8 087,13
//!   29.08.2019 / 278484 → Отдых и развлечения
//!
//! Long descriptions wrap onto continuation lines between the first and the
//! settlement line, and foreign-currency operations carry a third part on the
//! settlement line:
//!   26.07.2019 02:04 → ПЛАТА ЗА ОБСЛУЖИВАНИЕ БАНКОВСКОЙ → 750,00 → -750,00
//!   КАРТЫ  (ЗА ПЕРВЫЙ ГОД)
//!   05.08.2019 / - → Прочие операции → (33,31 EUR)
//!
//! Period totals are printed as `СУММА ПОПОЛНЕНИЙ → 10 000,00` and
//! `СУММА СПИСАНИЙ → 2 439,40`.

use regex::Regex;
use std::sync::OnceLock;

use vypiska_core::{ExtractError, ForeignAmount, LayoutKind, RecordFields, Result, parse_money};

use crate::grammar::{LayoutGrammar, RecordSpan, record_lines, split_line};

fn record_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"\d\d\.\d\d\.\d\d\d\d\s\d\d:\d\d", // operation date and time
            r"[\s\S]*?",                        // anything, across lines, non-greedy
            r"\d\d\.\d\d\.\d\d\d\d\s/",         // processing date followed by a slash
            r"[^\n]*\n",                        // rest of the settlement line
        ))
        .expect("2005 record regex")
    })
}

fn foreign_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((.*?)(\w\w\w)\)").expect("2005 foreign amount regex"))
}

fn credits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"СУММА ПОПОЛНЕНИЙ\t(\d[\d\s]*,\d\d)").expect("2005 credits regex")
    })
}

fn debits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"СУММА СПИСАНИЙ\t(\d[\d\s]*,\d\d)").expect("2005 debits regex"))
}

/// `DD.MM.YYYY / ` prefix of the settlement line's first part.
const SETTLEMENT_PREFIX_LEN: usize = 13;

#[derive(Debug, Clone, Copy, Default)]
pub struct Moscow2005;

impl LayoutGrammar for Moscow2005 {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Moscow2005
    }

    fn segment<'a>(&self, text: &'a str) -> Result<Vec<RecordSpan<'a>>> {
        let spans: Vec<_> = record_re()
            .find_iter(text)
            .map(|m| RecordSpan::new(text, m.start(), m.end()))
            .collect();

        if spans.is_empty() {
            return Err(ExtractError::NoTransactionsFound {
                layout: self.kind(),
            });
        }
        Ok(spans)
    }

    fn decompose(&self, span: &str) -> Result<RecordFields> {
        let lines = record_lines(span);
        let (first, rest) = lines
            .split_first()
            .ok_or_else(|| ExtractError::record_structure("record is empty"))?;
        let (last, interior) = rest.split_last().ok_or_else(|| {
            ExtractError::record_structure(format!(
                "record is expected to have a settlement line after {first:?}"
            ))
        })?;

        log::debug!("2005 record first line: {first:?}");

        let parts = split_line(first);
        if parts.len() != 4 {
            return Err(ExtractError::record_structure(format!(
                "first line is expected to have 4 parts, got {}: {first:?}",
                parts.len()
            )));
        }

        let mut fields = RecordFields {
            operation_date: parts[0].to_string(),
            description: parts[1].to_string(),
            value_account_currency: parse_money(parts[2], true)?,
            remainder_account_currency: parse_money(parts[3], false)?,
            ..RecordFields::default()
        };

        for line in interior {
            let parts = split_line(line);
            if parts.len() != 1 {
                return Err(ExtractError::record_structure(format!(
                    "continuation line is expected to have only one part, got {}: {line:?}",
                    parts.len()
                )));
            }
            fields.push_description(parts[0]);
        }

        let parts = split_line(last);
        if !(2..=3).contains(&parts.len()) {
            return Err(ExtractError::record_structure(format!(
                "settlement line is expected to have 2 or 3 parts, got {}: {last:?}",
                parts.len()
            )));
        }

        let settlement = parts[0];
        let (Some(date), Some(" / "), Some(code)) = (
            settlement.get(..10),
            settlement.get(10..SETTLEMENT_PREFIX_LEN),
            settlement.get(SETTLEMENT_PREFIX_LEN..),
        ) else {
            return Err(ExtractError::record_structure(format!(
                "settlement part is expected to look like 'DD.MM.YYYY / code': {settlement:?}"
            )));
        };
        fields.processing_date = date.to_string();
        fields.authorisation_code = code.trim().to_string();
        fields.category = parts[1].to_string();

        if let Some(foreign) = parts.get(2) {
            let caps = foreign_amount_re().captures(foreign).ok_or_else(|| {
                ExtractError::record_structure(format!(
                    "expected a foreign amount like (33,31 EUR), got: {last:?}"
                ))
            })?;
            fields.operational = Some(ForeignAmount {
                value: parse_money(&caps[1], true)?,
                currency: caps[2].to_string(),
            });
        }

        Ok(fields)
    }

    fn extract_period_total(&self, text: &str) -> Result<f64> {
        let credits = credits_re()
            .captures(text)
            .ok_or(ExtractError::TotalsNotFound {
                layout: self.kind(),
                what: "СУММА ПОПОЛНЕНИЙ",
            })?;
        let debits = debits_re()
            .captures(text)
            .ok_or(ExtractError::TotalsNotFound {
                layout: self.kind(),
                what: "СУММА СПИСАНИЙ",
            })?;

        let credits = parse_money(&credits[1], false)?;
        let debits = parse_money(&debits[1], false)?;
        Ok(credits - debits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_entry() {
        let text = "29.08.2019 10:04\tGETT\t1 189,40\t8 087,13\n29.08.2019 / 278484\tОтдых и развлечения\n";

        let spans = Moscow2005.segment(text).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, text);

        let f = Moscow2005.decompose(spans[0].text).unwrap();
        assert_eq!(f.operation_date, "29.08.2019 10:04");
        assert_eq!(f.description, "GETT");
        assert!(close(f.value_account_currency, -1189.40));
        assert!(close(f.remainder_account_currency, 8087.13));
        assert_eq!(f.processing_date, "29.08.2019");
        assert_eq!(f.authorisation_code, "278484");
        assert_eq!(f.category, "Отдых и развлечения");
        assert_eq!(f.operational, None);
    }

    #[test]
    fn test_three_line_entry() {
        let span = "26.07.2019 02:04\tПЛАТА ЗА ОБСЛУЖИВАНИЕ БАНКОВСКОЙ\t750,00\t-750,00\n\
                    КАРТЫ  (ЗА ПЕРВЫЙ ГОД)\n\
                    05.08.2019 / -\tПрочие операции\n";
        let f = Moscow2005.decompose(span).unwrap();
        assert_eq!(f.description, "ПЛАТА ЗА ОБСЛУЖИВАНИЕ БАНКОВСКОЙ КАРТЫ  (ЗА ПЕРВЫЙ ГОД)");
        assert!(close(f.value_account_currency, -750.0));
        assert!(close(f.remainder_account_currency, -750.0));
        assert_eq!(f.processing_date, "05.08.2019");
        assert_eq!(f.authorisation_code, "-");
    }

    #[test]
    fn test_foreign_currency_entry() {
        let span = "28.07.2019 19:31\tAMAZON\t2 420,00\t8 750,00\n\
                    29.07.2019 / 554433\tПрочие расходы\t(33,31 EUR)\n";
        let f = Moscow2005.decompose(span).unwrap();
        let foreign = f.operational.unwrap();
        assert!(close(foreign.value, -33.31));
        assert_eq!(foreign.currency, "EUR");
    }

    #[test]
    fn test_credit_keeps_plus() {
        let span = "27.07.2019 12:00\tПеревод на карту\t+10 000,00\t9 250,00\n\
                    27.07.2019 / 123456\tНеизвестная категория(+)\n";
        let f = Moscow2005.decompose(span).unwrap();
        assert!(close(f.value_account_currency, 10000.0));
    }

    #[test]
    fn test_continuation_line_with_two_parts_is_rejected() {
        let span = "26.07.2019 02:04\tПЛАТА ЗА ОБСЛУЖИВАНИЕ\t750,00\t-750,00\n\
                    КАРТЫ\tЛИШНЕЕ\n\
                    05.08.2019 / -\tПрочие операции\n";
        let err = Moscow2005.decompose(span).unwrap_err();
        match err {
            ExtractError::RecordStructure { reason, .. } => {
                assert!(reason.contains("КАРТЫ\\tЛИШНЕЕ"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_foreign_amount_pattern_is_rejected() {
        let span = "28.07.2019 19:31\tAMAZON\t2 420,00\t8 750,00\n\
                    29.07.2019 / 554433\tПрочие расходы\t33,31 EUR\n";
        assert!(matches!(
            Moscow2005.decompose(span),
            Err(ExtractError::RecordStructure { .. })
        ));
    }

    #[test]
    fn test_bad_settlement_prefix_is_rejected() {
        let span = "29.08.2019 10:04\tGETT\t1 189,40\t8 087,13\n29.08.2019 278484\tОтдых\n";
        assert!(matches!(
            Moscow2005.decompose(span),
            Err(ExtractError::RecordStructure { .. })
        ));
    }

    #[test]
    fn test_malformed_value_is_reported() {
        let span = "29.08.2019 10:04\tGETT\t1 18x,40\t8 087,13\n29.08.2019 / 278484\tОтдых\n";
        assert!(matches!(
            Moscow2005.decompose(span),
            Err(ExtractError::MalformedAmount { ref value, .. }) if value == "1 18x,40"
        ));
    }

    #[test]
    fn test_segment_without_records() {
        let err = Moscow2005.segment("СУММА ПОПОЛНЕНИЙ\t1,00\nничего нет\n").unwrap_err();
        assert_eq!(
            err,
            ExtractError::NoTransactionsFound {
                layout: LayoutKind::Moscow2005
            }
        );
    }

    #[test]
    fn test_segment_keeps_multiline_records_whole() {
        let text = "шапка\n\
                    26.07.2019 02:04\tПЛАТА ЗА ОБСЛУЖИВАНИЕ БАНКОВСКОЙ\t750,00\t-750,00\n\
                    КАРТЫ  (ЗА ПЕРВЫЙ ГОД)\n\
                    05.08.2019 / -\tПрочие операции\n\
                    29.08.2019 10:04\tGETT\t1 189,40\t8 087,13\n\
                    29.08.2019 / 278484\tОтдых и развлечения\n";
        let spans = Moscow2005.segment(text).unwrap();
        assert_eq!(spans.len(), 2);
        assert!(spans[0].text.contains("КАРТЫ"));
        assert!(spans[1].text.starts_with("29.08.2019 10:04"));
        assert_eq!(spans[1].line_number(text), 5);
    }

    #[test]
    fn test_period_total() {
        let text = "Итого\nСУММА ПОПОЛНЕНИЙ\t10 000,00\nСУММА СПИСАНИЙ\t2 439,40\n";
        assert!(close(Moscow2005.extract_period_total(text).unwrap(), 7560.60));
    }

    #[test]
    fn test_period_total_missing_debits() {
        let err = Moscow2005
            .extract_period_total("СУММА ПОПОЛНЕНИЙ\t10 000,00\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::TotalsNotFound {
                what: "СУММА СПИСАНИЙ",
                ..
            }
        ));
    }
}

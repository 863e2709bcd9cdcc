//! Table assembly: decompose every record span, then normalize dates.

use vypiska_core::{RecordFields, Result, Transaction, TransactionTable};

use crate::grammar::{LayoutGrammar, RecordSpan};

/// Decompose `spans` in order with `grammar` and build the table.
///
/// The first failing record aborts the whole table; its text is attached to
/// the error.
pub fn assemble(grammar: &dyn LayoutGrammar, spans: &[RecordSpan<'_>]) -> Result<TransactionTable> {
    let mut records: Vec<(&str, RecordFields)> = Vec::with_capacity(spans.len());
    for span in spans {
        let fields = grammar
            .decompose(span.text)
            .map_err(|e| e.with_record(span.text))?;
        log::debug!("{} record at byte {}: {:?}", grammar.kind(), span.offset, fields);
        records.push((span.text, fields));
    }

    let rows = records
        .into_iter()
        .map(|(text, fields)| Transaction::try_from(fields).map_err(|e| e.with_record(text)))
        .collect::<Result<Vec<_>>>()?;

    Ok(TransactionTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::grammar_for;
    use chrono::NaiveDate;
    use vypiska_core::{ExtractError, LayoutKind};

    const TEXT: &str = "\
26.07.2019 02:04\tПЛАТА ЗА ОБСЛУЖИВАНИЕ БАНКОВСКОЙ\t750,00\t-750,00
КАРТЫ  (ЗА ПЕРВЫЙ ГОД)
05.08.2019 / -\tПрочие операции
29.08.2019 10:04\tGETT\t1 189,40\t8 087,13
29.08.2019 / 278484\tОтдых и развлечения
";

    #[test]
    fn test_assembles_in_order_with_dates() {
        let grammar = grammar_for(LayoutKind::Moscow2005);
        let spans = grammar.segment(TEXT).unwrap();
        let table = assemble(grammar, &spans).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.rows()[0];
        assert_eq!(
            first.operation_datetime,
            NaiveDate::from_ymd_opt(2019, 7, 26)
                .unwrap()
                .and_hms_opt(2, 4, 0)
                .unwrap()
        );
        assert_eq!(first.processing_date, NaiveDate::from_ymd_opt(2019, 8, 5).unwrap());
        assert_eq!(table.rows()[1].description, "GETT");
        assert!((table.total() - (-1939.40)).abs() < 1e-9);
    }

    #[test]
    fn test_broken_record_aborts_with_its_text() {
        let text = TEXT.replace("КАРТЫ  (ЗА ПЕРВЫЙ ГОД)", "КАРТЫ\t(ЗА ПЕРВЫЙ ГОД)");
        let grammar = grammar_for(LayoutKind::Moscow2005);
        let spans = grammar.segment(&text).unwrap();
        let err = assemble(grammar, &spans).unwrap_err();

        assert!(matches!(err, ExtractError::RecordStructure { .. }));
        assert_eq!(err.record(), Some(spans[0].text));
    }

    #[test]
    fn test_impossible_date_is_fatal() {
        let text = TEXT.replace("29.08.2019 10:04", "29.08.2019 25:04");
        let grammar = grammar_for(LayoutKind::Moscow2005);
        let spans = grammar.segment(&text).unwrap();
        let err = assemble(grammar, &spans).unwrap_err();

        assert!(matches!(err, ExtractError::MalformedDate { ref value, .. } if value == "29.08.2019 25:04"));
        assert!(err.record().unwrap().contains("GETT"));
    }
}

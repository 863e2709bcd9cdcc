use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use vypiska_core::{FormatSelector, LayoutKind, format_money};
use vypiska_ingest::{Conversion, convert, detect_layout};

use crate::config::Config;
use crate::export::{OutputFileType, write_table};
use crate::input::{InputKind, classify_input, default_output_path, intermediate_txt_path};
use crate::pdf_text::pdf_to_text;

/// Command-line overrides for one conversion; `None` falls back to config.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub output: Option<PathBuf>,
    pub format: FormatSelector,
    pub file_type: Option<OutputFileType>,
    pub keep_txt: bool,
}

/// Convert one statement file and write the table; returns the output path.
pub fn convert_file(input: &Path, opts: &ConvertOptions, cfg: &Config) -> Result<PathBuf> {
    let kind = classify_input(input)?;
    let file_type = opts.file_type.unwrap_or(cfg.output.file_type);
    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input, file_type));

    println!("Converting {}", input.display());

    let txt_path = load_text_path(input, kind, cfg)?;
    let text = fs::read_to_string(&txt_path).with_context(|| format!("read {}", txt_path.display()))?;

    let Conversion { table, report } = convert(&text, opts.format)?;
    if report.detected {
        println!("Format detected as {}", report.layout);
    } else {
        println!("Converting as format {}", report.layout);
    }
    println!(
        "Extracted {} transactions, period total {} reconciled",
        report.records,
        format_money(report.period_total)
    );

    write_table(&table, &output, file_type, &cfg.output.sheet_name)?;

    let keep_txt = opts.keep_txt || cfg.output.keep_intermediate_txt;
    if kind == InputKind::Pdf && !keep_txt {
        fs::remove_file(&txt_path).with_context(|| format!("remove {}", txt_path.display()))?;
    }

    println!("Wrote {}", output.display());
    Ok(output)
}

/// Detect the layout of one statement file.
pub fn detect_file(input: &Path, cfg: &Config) -> Result<LayoutKind> {
    let kind = classify_input(input)?;
    let txt_path = load_text_path(input, kind, cfg)?;
    let text = fs::read_to_string(&txt_path).with_context(|| format!("read {}", txt_path.display()))?;
    if kind == InputKind::Pdf && !cfg.output.keep_intermediate_txt {
        fs::remove_file(&txt_path).with_context(|| format!("remove {}", txt_path.display()))?;
    }
    Ok(detect_layout(&text)?)
}

fn load_text_path(input: &Path, kind: InputKind, cfg: &Config) -> Result<PathBuf> {
    match kind {
        InputKind::Text => Ok(input.to_path_buf()),
        InputKind::Pdf => {
            let txt = intermediate_txt_path(input);
            pdf_to_text(&cfg.pdf_to_text, input, &txt)?;
            Ok(txt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PdfToTextSection;
    use vypiska_core::ExtractError;

    const MOSCOW: &str = include_str!("../../vypiska-ingest/tests/fixtures/moscow_2005.txt");
    const STAVROPOL: &str = include_str!("../../vypiska-ingest/tests/fixtures/stavropol_2107.txt");

    #[test]
    fn test_convert_txt_to_default_csv_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("statement.txt");
        fs::write(&input, MOSCOW).unwrap();

        let opts = ConvertOptions {
            file_type: Some(OutputFileType::Csv),
            ..ConvertOptions::default()
        };
        let out = convert_file(&input, &opts, &Config::default()).unwrap();

        assert_eq!(out, dir.path().join("statement.csv"));
        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written.lines().count(), 5);
        assert!(written.contains("GETT"));
        // text inputs are never removed
        assert!(input.exists());
    }

    #[test]
    fn test_convert_to_explicit_xlsx() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("statement.txt");
        fs::write(&input, STAVROPOL).unwrap();

        let opts = ConvertOptions {
            output: Some(dir.path().join("table.xlsx")),
            format: FormatSelector::Layout(LayoutKind::Stavropol2107),
            ..ConvertOptions::default()
        };
        let out = convert_file(&input, &opts, &Config::default()).unwrap();
        assert!(fs::read(out).unwrap().starts_with(b"PK"));
    }

    #[test]
    fn test_extraction_errors_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("statement.txt");
        fs::write(&input, "не выписка").unwrap();

        let err = convert_file(&input, &ConvertOptions::default(), &Config::default()).unwrap_err();
        let extract = err.downcast_ref::<ExtractError>().unwrap();
        assert!(extract.is_format_undetermined());
        assert!(!dir.path().join("statement.xlsx").exists());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = convert_file(
            Path::new("statement.docx"),
            &ConvertOptions::default(),
            &Config::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains(".docx"));
    }

    #[cfg(unix)]
    #[test]
    fn test_pdf_input_goes_through_converter_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("statement.pdf");
        fs::write(&input, STAVROPOL).unwrap();

        let mut cfg = Config::default();
        cfg.pdf_to_text = PdfToTextSection {
            command: "cp".to_string(),
            args: vec!["{input}".to_string(), "{output}".to_string()],
        };
        let opts = ConvertOptions {
            file_type: Some(OutputFileType::Csv),
            ..ConvertOptions::default()
        };
        convert_file(&input, &opts, &cfg).unwrap();

        assert!(dir.path().join("statement.csv").exists());
        assert!(!dir.path().join("statement.txt").exists());

        let keep = ConvertOptions {
            keep_txt: true,
            ..opts
        };
        convert_file(&input, &keep, &cfg).unwrap();
        assert!(dir.path().join("statement.txt").exists());
    }

    #[test]
    fn test_detect_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("statement.txt");
        fs::write(&input, MOSCOW).unwrap();
        assert_eq!(detect_file(&input, &Config::default()).unwrap(), LayoutKind::Moscow2005);
    }
}

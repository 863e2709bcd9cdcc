use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::config::PdfToTextSection;

/// Flatten `pdf` into `txt` with the configured external converter.
pub fn pdf_to_text(cfg: &PdfToTextSection, pdf: &Path, txt: &Path) -> Result<()> {
    let args = expand_args(&cfg.args, pdf, txt);
    log::debug!("running {} {:?}", cfg.command, args);

    let status = std::process::Command::new(&cfg.command)
        .args(&args)
        .stdin(std::process::Stdio::null())
        .status()
        .with_context(|| format!("running {} (set pdf_to_text.command in config.toml)", cfg.command))?;

    if !status.success() {
        bail!("{} failed with status: {}", cfg.command, status);
    }
    if !txt.exists() {
        bail!("{} did not produce {}", cfg.command, txt.display());
    }
    Ok(())
}

fn expand_args(args: &[String], pdf: &Path, txt: &Path) -> Vec<String> {
    let input = pdf.display().to_string();
    let output = txt.display().to_string();
    args.iter()
        .map(|a| a.replace("{input}", &input).replace("{output}", &output))
        .collect()
}

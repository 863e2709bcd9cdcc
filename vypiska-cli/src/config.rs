use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::export::OutputFileType;
use crate::state::{ensure_vypiska_home, vypiska_home};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub pdf_to_text: PdfToTextSection,
    pub output: OutputSection,
}

/// External PDF-to-text converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfToTextSection {
    pub command: String,
    /// `{input}` and `{output}` are replaced with the PDF and text paths.
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub file_type: OutputFileType,
    pub sheet_name: String,
    pub keep_intermediate_txt: bool,
}

impl Default for PdfToTextSection {
    fn default() -> Self {
        Self {
            command: "pdf2txtev".to_string(),
            args: vec!["{input}".to_string(), "{output}".to_string()],
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            file_type: OutputFileType::Xlsx,
            sheet_name: "Sheet1".to_string(),
            keep_intermediate_txt: false,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(vypiska_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_vypiska_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

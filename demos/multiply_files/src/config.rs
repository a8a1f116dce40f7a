// demos/multiply_files/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use strand::{StrandConfig, DEFAULT_ITEMS};

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub strand: StrandConfig,
  pub items: Vec<String>,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());
    let cwd = env::current_dir().map_err(|e| AppError::Config(format!("Cannot resolve working directory: {}", e)))?;

    let input_root = get_env("STRAND_INPUT_DIR").map(PathBuf::from).unwrap_or_else(|| cwd.join("input"));
    let output_root = get_env("STRAND_OUTPUT_DIR").map(PathBuf::from).unwrap_or_else(|| cwd.join("output"));

    let mut strand = StrandConfig::with_roots(input_root, output_root);
    if let Some(raw) = get_env("STRAND_DELAY_UNIT_MS") {
      let millis = raw
        .parse::<u64>()
        .map_err(|e| AppError::Config(format!("Invalid STRAND_DELAY_UNIT_MS '{}': {}", raw, e)))?;
      strand = strand.delay_unit(Duration::from_millis(millis));
    }
    if let Some(raw) = get_env("STRAND_SEED") {
      let seed = raw
        .parse::<u64>()
        .map_err(|e| AppError::Config(format!("Invalid STRAND_SEED '{}': {}", raw, e)))?;
      strand = strand.delay_seed(seed);
    }

    let items = match get_env("STRAND_ITEMS") {
      Some(raw) => parse_items(&raw)?,
      None => DEFAULT_ITEMS.iter().map(|s| s.to_string()).collect(),
    };

    strand.validate().map_err(|e| AppError::Config(e.to_string()))?;
    tracing::info!(
      input = %strand.input_root.display(),
      output = %strand.output_root.display(),
      items = items.len(),
      "Configuration loaded."
    );

    Ok(Self { strand, items })
  }
}

fn parse_items(raw: &str) -> Result<Vec<String>> {
  let items: Vec<String> = raw
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .collect();
  if items.is_empty() {
    return Err(AppError::Config("STRAND_ITEMS names no items".to_string()));
  }
  Ok(items)
}

#[cfg(test)]
mod tests {
  use super::parse_items;

  #[test]
  fn items_are_split_and_trimmed() {
    assert_eq!(parse_items(" 1.txt, 2.txt ,,8.txt").unwrap(), vec!["1.txt", "2.txt", "8.txt"]);
  }

  #[test]
  fn empty_item_list_is_rejected() {
    assert!(parse_items(" , ,").is_err());
  }
}

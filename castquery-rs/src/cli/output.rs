//! Output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::error::Result;
use serde::Serialize;

/// Helper for formatting and printing output.
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Render a serializable value in the configured format.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Toml => {
                // TOML has no null; cast bodies carry plenty of them.
                let mut value = serde_json::to_value(value)?;
                drop_nulls(&mut value);
                toml::to_string_pretty(&value)?
            }
        })
    }

    /// Print a serializable value in the configured format.
    pub fn print<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", self.render(value)?);
        Ok(())
    }

    /// Print raw text (not serialized).
    pub fn print_raw(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a message if not in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}

fn drop_nulls(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(drop_nulls);
        }
        serde_json::Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(drop_nulls);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cast, SearchResponse};

    #[derive(Serialize)]
    struct Sample {
        q: String,
        valid: bool,
    }

    #[test]
    fn test_render_formats() {
        let sample = Sample {
            q: "cats".to_string(),
            valid: true,
        };

        let json = Output::new(OutputFormat::Json, false).render(&sample).unwrap();
        assert!(json.contains("\"q\": \"cats\""));

        let yaml = Output::new(OutputFormat::Yaml, false).render(&sample).unwrap();
        assert!(yaml.contains("q: cats"));

        let toml = Output::new(OutputFormat::Toml, true).render(&sample).unwrap();
        assert!(toml.contains("q = \"cats\""));
        assert!(toml.contains("valid = true"));
    }

    #[test]
    fn test_toml_skips_nulls_in_casts() {
        let cast: Cast = serde_json::from_value(serde_json::json!({
            "hash": "0x1",
            "text": "gm",
            "parent_hash": null,
            "embeds": [null, { "url": "https://example.com", "metadata": null }]
        }))
        .unwrap();
        let response = SearchResponse::ok(vec![cast]);

        let toml = Output::new(OutputFormat::Toml, false).render(&response).unwrap();
        assert!(toml.contains("hash = \"0x1\""));
        assert!(toml.contains("url = \"https://example.com\""));
        assert!(!toml.contains("parent_hash"));
        assert!(!toml.contains("metadata"));

        // JSON keeps them.
        let json = Output::new(OutputFormat::Json, false).render(&response).unwrap();
        assert!(json.contains("\"parent_hash\": null"));
    }
}

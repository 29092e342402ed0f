//! Output formatting utilities for the CLI interface

use colored::*;
use detective_core::{Confidence, DecodingTrace};
use serde_json::Value;

/// Output formatter for different display formats
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
}

#[derive(Clone, Copy, Debug)]
pub enum OutputFormat {
    Text,
    Json,
    Compact,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        let use_colors = atty::is(atty::Stream::Stdout);
        Self { format, use_colors }
    }

    #[cfg(test)]
    fn plain(format: OutputFormat) -> Self {
        Self {
            format,
            use_colors: false,
        }
    }

    /// Format the report header for a detection run
    pub fn format_header(&self, title: &str) -> String {
        match self.format {
            OutputFormat::Text => {
                if self.use_colors {
                    format!(
                        "\n{}\n{}\n",
                        format!("🔍 {}", title).bright_cyan().bold(),
                        "═".repeat(40).bright_blue()
                    )
                } else {
                    format!("\n🔍 {}\n{}\n", title, "═".repeat(40))
                }
            }
            OutputFormat::Json | OutputFormat::Compact => String::new(),
        }
    }

    /// Format a full decoding trace
    pub fn format_trace(&self, trace: &DecodingTrace) -> String {
        match self.format {
            OutputFormat::Text => self.format_trace_text(trace),
            OutputFormat::Json => {
                serde_json::to_string_pretty(trace).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Compact => {
                let encodings = trace
                    .encodings_detected
                    .iter()
                    .map(|f| f.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                format!(
                    "LAYERS={} ENCODINGS={} CONFIDENCE={} RESULT={}",
                    trace.total_layers,
                    if encodings.is_empty() { "-".to_string() } else { encodings },
                    trace.overall_confidence,
                    trace.final_result
                )
            }
        }
    }

    fn format_trace_text(&self, trace: &DecodingTrace) -> String {
        let mut out = String::new();

        for layer in &trace.layers {
            let heading = format!(
                "Layer {}: {} (score {}, {})",
                layer.layer, layer.format, layer.score, layer.confidence
            );
            if self.use_colors {
                let colored_heading = match layer.confidence {
                    Confidence::High => heading.bright_green(),
                    Confidence::Medium => heading.bright_yellow(),
                    _ => heading.bright_red(),
                };
                out.push_str(&format!("  {}\n", colored_heading));
                out.push_str(&format!("    {} {}\n", "→".bright_blue(), layer.output.white()));
            } else {
                out.push_str(&format!("  {}\n", heading));
                out.push_str(&format!("    → {}\n", layer.output));
            }
        }

        let encodings = trace
            .encodings_detected
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        if self.use_colors {
            out.push_str(&format!(
                "\n{} {}\n",
                "📊 Layers peeled:".bright_yellow(),
                trace.total_layers.to_string().bright_white()
            ));
            if !encodings.is_empty() {
                out.push_str(&format!(
                    "{} {}\n",
                    "🧅 Encodings:".bright_yellow(),
                    encodings.bright_white()
                ));
            }
            out.push_str(&format!(
                "{} {}\n",
                "🎯 Confidence:".bright_yellow(),
                trace.overall_confidence.to_string().bright_white()
            ));
            out.push_str(&format!(
                "{} {}\n",
                "🏁 Result:".bright_yellow(),
                trace.final_result.bright_green().bold()
            ));
        } else {
            out.push_str(&format!("\n📊 Layers peeled: {}\n", trace.total_layers));
            if !encodings.is_empty() {
                out.push_str(&format!("🧅 Encodings: {}\n", encodings));
            }
            out.push_str(&format!("🎯 Confidence: {}\n", trace.overall_confidence));
            out.push_str(&format!("🏁 Result: {}\n", trace.final_result));
        }

        out
    }

    /// Format a plain single-value result (encode, one-shot decode)
    pub fn format_value(&self, key: &str, value: &str) -> String {
        match self.format {
            OutputFormat::Text => {
                if self.use_colors {
                    format!("{}\n", value.bright_green())
                } else {
                    format!("{}\n", value)
                }
            }
            OutputFormat::Json => {
                let json: Value = serde_json::json!({ key: value });
                serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Compact => format!("{}={}", key.to_uppercase(), value),
        }
    }

    /// Format a warning message
    pub fn format_warning(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Text => {
                if self.use_colors {
                    format!("⚠️  {}\n", message.bright_yellow())
                } else {
                    format!("⚠️  {}\n", message)
                }
            }
            OutputFormat::Json | OutputFormat::Compact => String::new(),
        }
    }

    /// Format an error message
    pub fn format_error(&self, message: &str) -> String {
        match self.format {
            OutputFormat::Text => {
                if self.use_colors {
                    format!("❌ {}\n", message.bright_red().bold())
                } else {
                    format!("❌ {}\n", message)
                }
            }
            OutputFormat::Json => {
                let json: Value = serde_json::json!({ "error": message });
                serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Compact => format!("ERROR={}", message.replace(' ', "_")),
        }
    }
}

impl From<crate::OutputFormat> for OutputFormat {
    fn from(format: crate::OutputFormat) -> Self {
        match format {
            crate::OutputFormat::Text => OutputFormat::Text,
            crate::OutputFormat::Json => OutputFormat::Json,
            crate::OutputFormat::Compact => OutputFormat::Compact,
        }
    }
}

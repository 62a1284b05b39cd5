//! Console output for mcpmap commands
//!
//! Listing and completion output is plain text meant for scripts and shells,
//! so only the human-oriented views (cache info, warnings) are colored.

use colored::Colorize;
use mcpmap_application::CacheInfo;
use mcpmap_domain::{MetadataKind, OutputFormat, ServerMetadata};
use serde::Serialize;
use serde_json::Value;

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a metadata listing.
    ///
    /// Text: one `tool:<name>`, `resource:<uri>` or `prompt:<name>` line per
    /// record. JSON: one record per line.
    pub fn format_list(data: &ServerMetadata, kind: MetadataKind, format: OutputFormat) -> String {
        let mut output = String::new();

        if kind.includes(MetadataKind::Tools) {
            for tool in &data.tools {
                push_record(&mut output, format, "tool", &tool.name, tool);
            }
        }
        if kind.includes(MetadataKind::Resources) {
            for resource in &data.resources {
                push_record(&mut output, format, "resource", &resource.uri, resource);
            }
        }
        if kind.includes(MetadataKind::Prompts) {
            for prompt in &data.prompts {
                push_record(&mut output, format, "prompt", &prompt.name, prompt);
            }
        }

        output
    }

    /// Format a tool call result as a single JSON line
    pub fn format_tool_result(result: &Value) -> String {
        serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format completion candidates, one per line
    pub fn format_candidates(candidates: &[String]) -> String {
        let mut output = String::new();
        for candidate in candidates {
            output.push_str(candidate);
            output.push('\n');
        }
        output
    }

    /// Format cache statistics
    pub fn format_cache_info(info: &CacheInfo, format: OutputFormat) -> String {
        if format.is_json() {
            return serde_json::to_string_pretty(info).unwrap_or_else(|_| "{}".to_string());
        }

        let mut output = String::new();
        let dir = info.cache_dir.display();

        if info.total_files == 0 {
            output.push_str("Cache is empty\n");
            output.push_str(&format!("{} {}\n", "Cache directory:".cyan().bold(), dir));
            return output;
        }

        output.push_str(&format!("{} {}\n", "Cache directory:".cyan().bold(), dir));
        output.push_str(&format!("Total files: {}\n", info.total_files));
        output.push_str(&format!(
            "Total size: {} bytes ({:.2} KB)\n",
            info.total_size,
            info.total_size as f64 / 1024.0
        ));
        output.push('\n');

        output.push_str(&format!("{}\n", "Cache entries:".cyan().bold()));
        for file in &info.files {
            output.push_str(&format!("  {}\n", format!("{}:", file.name).yellow()));
            output.push_str(&format!("    Size: {} bytes\n", file.size));
            output.push_str(&format!(
                "    Modified: {}\n",
                file.modified.format("%Y-%m-%d %H:%M:%S")
            ));
            output.push_str(&format!(
                "    Tools: {}, Resources: {}, Prompts: {}\n",
                file.tools_count, file.resources_count, file.prompts_count
            ));
            output.push('\n');
        }

        output
    }

    /// Confirmation for `cache clear`
    pub fn format_cache_cleared(removed: usize, format: OutputFormat) -> String {
        if format.is_json() {
            return serde_json::json!({ "removed": removed }).to_string();
        }
        "Cache cleared successfully".to_string()
    }

    /// A non-fatal notice for stderr
    pub fn format_warning(message: &str) -> String {
        format!("{} {}", "Warning:".yellow().bold(), message)
    }
}

fn push_record<T: Serialize>(
    output: &mut String,
    format: OutputFormat,
    prefix: &str,
    label: &str,
    record: &T,
) {
    let line = match format {
        OutputFormat::Json => match serde_json::to_string(record) {
            Ok(line) => line,
            Err(_) => return,
        },
        OutputFormat::Text => format!("{prefix}:{label}"),
    };
    output.push_str(&line);
    output.push('\n');
}

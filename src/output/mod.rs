//
//  screwdriver-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/03/02.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the CLI, in two flavors:
//!
//! - **Plain format**: Human-readable lines for interactive terminal use
//! - **JSON format**: Machine-readable JSON output for scripting and automation
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: Enum representing the available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`PlainOutput`]: Trait for types that can be rendered as plain lines
//!
//! ## Example
//!
//! ```rust,ignore
//! use screwdriver_cli::output::{OutputWriter, OutputFormat};
//!
//! let writer = OutputWriter::new(OutputFormat::from_flag(global.json));
//! writer.write_list(&banners)?;
//! ```

use serde::Serialize;

/// Represents the available output formats for CLI output.
///
/// # Variants
///
/// * `Plain` - Human-readable lines, best for interactive terminal sessions
/// * `Json` - Machine-readable JSON, ideal for scripting and piping to other tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable line format with optional color support.
    Plain,
    /// Pretty-printed JSON format for scripting and automation.
    Json,
}

impl Default for OutputFormat {
    /// Returns [`OutputFormat::Plain`], the best fit for interactive use.
    fn default() -> Self {
        Self::Plain
    }
}

impl OutputFormat {
    /// Maps the global `--json` flag to a format.
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Plain
        }
    }
}

/// A unified output writer that handles both output formats.
///
/// `OutputWriter` abstracts away the format details and provides a
/// consistent API for writing data and status messages. Color support is
/// detected automatically and disabled when output is piped.
///
/// # Example
///
/// ```rust,ignore
/// use screwdriver_cli::output::OutputWriter;
///
/// let writer = OutputWriter::plain();
/// writer.write_list(&banners)?;
/// writer.write_success("Created banner ID 13");
/// ```
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a new output writer with the specified format.
    ///
    /// Color output is detected from the terminal during construction.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Creates a writer configured for plain output.
    pub fn plain() -> Self {
        Self::new(OutputFormat::Plain)
    }

    /// Writes a list of values to stdout using the configured output format.
    ///
    /// For JSON format, the entire list is serialized as one JSON array.
    /// For plain format, each value is rendered on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn write_list<T: Serialize + PlainOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(values)?;
                println!("{}", json);
            }
            OutputFormat::Plain => {
                for value in values {
                    value.print_plain(self.color);
                }
            }
        }
        Ok(())
    }

    /// Writes a success message to stdout.
    ///
    /// The message is prefixed with a green checkmark when color output
    /// is enabled.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// A trait for types that can be rendered as plain line output.
///
/// Types implementing this trait can be written through an [`OutputWriter`].
/// For JSON output, types must also implement [`Serialize`].
pub trait PlainOutput {
    /// Renders the type as one or more plain lines.
    ///
    /// Implementations should use the `color` parameter to conditionally
    /// apply styling.
    fn print_plain(&self, color: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flag_maps_json() {
        assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flag(false), OutputFormat::Plain);
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }
}

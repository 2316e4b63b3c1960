use std::path::PathBuf;

use clap::Parser;

/// Runs one request/response cycle of a data table described by a JSON document.
#[derive(Debug, Parser)]
#[command(name = "datagrid")]
#[command(version)]
#[command(about = "Decode a request against a data table and print the response", long_about = None)]
pub struct Cli {
    /// Table document (JSON)
    pub table: PathBuf,

    /// Request parameters as a query string, e.g. `cars_pagination=true&cars_first=10`
    #[arg(default_value = "")]
    pub query: String,

    /// Write debug logs to this file
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Print the widget configuration instead of the markup
    #[arg(long)]
    pub widget_config: bool,
}

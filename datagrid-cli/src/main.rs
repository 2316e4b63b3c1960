mod cli;
mod document;
mod error;

use std::fs;
use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use datagrid_lib::feature::FeatureRegistry;
use datagrid_lib::render::Markup;
use datagrid_lib::render::TableRenderer;
use datagrid_lib::render::WidgetConfig;
use datagrid_lib::request::RequestContext;
use datagrid_lib::request::RequestParams;
use log::info;
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};

use crate::cli::Cli;
use crate::document::TableDocument;
use crate::error::CliError;
use crate::error::Result;

fn init_logging(cli: &Cli) -> Result<()> {
    match &cli.log {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::LogFile {
                path: path.clone(),
                source,
            })?;
            WriteLogger::init(LevelFilter::Debug, Config::default(), file)?;
        }
        None => SimpleLogger::init(LevelFilter::Warn, Config::default())?,
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.table).map_err(|source| CliError::Read {
        path: cli.table.clone(),
        source,
    })?;
    let document: TableDocument = serde_json::from_str(&text)?;
    let mut table = document.into_table();
    info!("loaded table {} from {}", table.client_id(), cli.table.display());

    let renderer = TableRenderer::new(Arc::new(FeatureRegistry::standard()));
    let mut ctx = RequestContext::new(RequestParams::from_query(&cli.query));
    let mut out = Markup::new();

    renderer.decode(&mut table, &mut ctx)?;
    renderer.encode_end(&mut table, &mut ctx, &mut out)?;

    if cli.widget_config {
        println!("{}", WidgetConfig::from_table(&table).to_json());
        return Ok(());
    }

    print!("{}", out);
    if !ctx.callback_params().is_empty() {
        println!("callback: {}", serde_json::to_string(ctx.callback_params())?);
    }
    for event in ctx.events() {
        println!("event: {:?} {:?}", event.phase, event.event);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

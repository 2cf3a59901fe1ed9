//! `featform` command-line entry point

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;

use featform::config::PageConfig;
use featform::dom::Document;
use featform::form::serializer::{self, Serialized};
use featform::form::FormOverrides;
use featform::messages::Msg;
use featform::model::Page;
use featform::runtime::Runtime;
use featform::transport::ReqwestTransport;

use cli::{CliArgs, Command};

fn main() -> Result<()> {
    featform::tracing::init();

    let args = CliArgs::parse();
    match args.command {
        Command::Serialize {
            method,
            action,
            fields,
        } => serialize(&method, &action, &fields),
        Command::Submit {
            url,
            method,
            fields,
        } => submit(&url, &method, &fields),
        Command::CheckConfig { path } => check_config(path),
    }
}

fn serialize(method: &str, action: &str, fields: &[(String, String)]) -> Result<()> {
    let method = cli::parse_method(method);
    match serializer::serialize(fields, &method) {
        Serialized::Query(query) => println!("{}", serializer::with_action(action, &query)),
        Serialized::Params(params) => {
            println!("{}", serde_json::to_string_pretty(&params.to_json())?)
        }
    }
    Ok(())
}

fn submit(url: &str, method: &str, fields: &[(String, String)]) -> Result<()> {
    let method = cli::parse_method(method);
    let mut doc = Document::new();
    let form = cli::build_form(&mut doc, &method, url, fields);

    let mut page = Page::new(doc);
    page.attach_form(form, FormOverrides::default());

    let transport = ReqwestTransport::new().context("Failed to set up HTTP transport")?;
    let mut runtime = Runtime::new(page, transport);
    runtime.dispatch(Msg::submit(form));
    runtime.run_until_idle();

    let page = runtime.into_page();
    let Some(lines) = cli::submit_report(&page, form) else {
        bail!("No usable response (see log for details)");
    };
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn check_config(path: Option<std::path::PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => featform::config_paths::config_file().context("No config directory available")?,
    };
    let config = PageConfig::load_from(&path)?;
    println!("{} is valid", path.display());
    print!("{}", config.to_yaml()?);
    Ok(())
}

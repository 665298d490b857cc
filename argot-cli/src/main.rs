use anyhow::Result;
use ansi_term::Colour::Red;
use argot_core::{CatalogManifest, CommandMapper, Error, Lexer, Parser as ArgParser, Token};
use argot_render_cli::CliRenderer;
use argot_render_core::{CommandHelp, CommandListHelp, HelpView};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod commands;
use commands::{Context, Registry};

const DEFAULT_PROGRAM: &str = "argot";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// TOML catalog with additional commands
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Disable colours in help output
    #[arg(long)]
    plain: bool,

    /// Help output format (default: formatted, options: raw)
    #[arg(long, value_parser = ["formatted", "raw"], default_value = "formatted")]
    output: String,

    /// Command words followed by its options and arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut registry = Registry::builtin(program_name())?;
    if let Some(path) = &cli.catalog {
        let manifest = CatalogManifest::load(path)?;
        info!(path = %path.display(), commands = manifest.commands.len(), "loaded catalog");
        registry.register_catalog(&manifest)?;
    }

    let renderer = if cli.plain { CliRenderer::plain() } else { CliRenderer::new() };
    let context = Context {
        configuration: registry.configuration(),
        renderer: &renderer,
        raw: cli.output == "raw",
    };

    if cli.args.is_empty() {
        let view = HelpView::CommandList(CommandListHelp::from_configuration(registry.configuration()));
        println!("{}", context.render_help(&view)?);
        return Ok(());
    }

    let outcome = ArgParser::new(registry.configuration())
        .parse_args(cli.args.iter().cloned())
        .map_err(anyhow::Error::from)
        .and_then(|result| registry.run(&result, &context));

    if let Err(err) = outcome {
        report(&context, &cli.args, &err, !cli.plain);
        std::process::exit(1);
    }

    Ok(())
}

fn program_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_stem)
        .and_then(|stem| stem.to_str())
        .map(String::from)
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
}

fn report(context: &Context<'_>, args: &[String], err: &anyhow::Error, color: bool) {
    let label = if color { Red.bold().paint("error:").to_string() } else { "error:".to_string() };
    eprintln!("{} {}", label, err);

    let configuration = context.configuration;
    let mapper = CommandMapper::new(configuration.commands());

    if let Some(Error::UnknownCommand(words)) = err.downcast_ref::<Error>() {
        let words: Vec<&str> = words.split_whitespace().collect();
        let subcommands = mapper.complete(&words, "");
        if words.is_empty() || subcommands.is_empty() {
            eprintln!("See '{} help' for a list of commands.", configuration.program());
        } else {
            eprintln!("'{}' takes one of: {}", words.join(" "), subcommands.join(", "));
        }
        return;
    }

    // Everything else happened after resolution, so show that command's usage
    let tokens: Vec<Token> = Lexer::from_args(args.iter().cloned()).tokens().collect();
    if let Ok((command, _)) = mapper.resolve(&tokens) {
        debug!(command = %command.name, "printing usage");
        let view = HelpView::Usage(CommandHelp::from_definition(configuration.program(), command));
        match context.render_help(&view) {
            Ok(usage) => eprintln!("{}", usage),
            Err(render_err) => debug!(error = %render_err, "failed to render usage"),
        }
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "argot=debug,argot_core=debug"
    } else {
        "argot=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

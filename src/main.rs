use clap::Parser;
use colored::Colorize;

use stride::cli::args::{BreakCommands, Cli, Commands};
use stride::cli::commands;
use stride::config::{ColorSetting, Config, Paths};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let paths = cli
        .data_dir
        .clone()
        .map_or_else(Paths::default, Paths::with_root);
    let config = Config::load_from_path(&paths.config_file)?;

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Start => commands::start(&paths, format)?,
        Commands::Break(args) => match args.command {
            BreakCommands::Add { duration } => commands::break_add(&paths, &duration, format)?,
            BreakCommands::Start => commands::break_start(&paths, format)?,
            BreakCommands::End => commands::break_end(&paths, format)?,
        },
        Commands::Stop => commands::stop(&paths, format)?,
        Commands::Status => commands::status(&paths, format)?,
        Commands::Progress => commands::progress(&paths, format)?,
        Commands::Month(args) => commands::month(&paths, args.year, args.month, format)?,
        Commands::History(args) => commands::history(
            &paths,
            args.limit.unwrap_or(config.history.default_limit),
            format,
        )?,
        Commands::Export(args) => commands::export(&paths, args.path.as_deref(), format)?,
        Commands::Completions(args) => commands::completions(args.shell),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

use clap::Parser;
use par_cadastros::app::{App, Settings};
use par_cadastros::cli::{is_yes, Cli, Command};
use par_cadastros::clock::SystemClock;
use par_cadastros::download::DirDownloader;
use par_cadastros::storage::{MemStore, SlotStore, SqliteStore};
use par_cadastros::Result;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const CLEAR_PROMPT: &str = "Deseja realmente apagar todos os cadastros? Isso não pode ser desfeito.";

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn open_store(cli: &Cli, settings: &Settings) -> Result<Box<dyn SlotStore>> {
    if cli.memory {
        return Ok(Box::new(MemStore::new()));
    }
    let store = match cli.database.as_ref().or(settings.database.as_ref()) {
        Some(path) => SqliteStore::open(path)?,
        None => SqliteStore::open_default()?,
    };
    Ok(Box::new(store))
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [s/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load();
    let Command::Config {
        download_dir,
        sheet_name,
    } = cli.command
    else {
        return run_app(cli, &settings);
    };
    settings.merge(Settings {
        database: cli.database,
        download_dir,
        sheet_name,
    });
    let path = settings.save()?;
    println!("{}", path.display());
    Ok(())
}

fn run_app(cli: Cli, settings: &Settings) -> Result<()> {
    let store = open_store(&cli, settings)?;
    let downloader = match &cli.command {
        Command::Export { dir: Some(dir), .. } => DirDownloader::new(dir),
        _ => match &settings.download_dir {
            Some(dir) => DirDownloader::new(dir),
            None => DirDownloader::user_downloads(),
        },
    };
    let app = App::new(store.as_ref(), SystemClock, downloader)
        .with_sheet_name(settings.sheet_name());

    match cli.command {
        Command::Adopt(args) => {
            let out = app.submit_adoption(args.into())?;
            println!("{}", out.message);
        }
        Command::Support(args) => {
            let out = app.submit_support(args.into())?;
            println!("{}", out.message);
        }
        Command::List { support: false } => println!("{}", app.render(&chrono::Local)),
        Command::List { support: true } => println!("{}", app.render_support(&chrono::Local)),
        Command::Export { format, .. } => {
            let path = app.export(format, &chrono::Local)?;
            println!("{}", path.display());
        }
        Command::Clear { support, yes } => {
            if !yes && !confirm(CLEAR_PROMPT)? {
                return Ok(());
            }
            if support {
                app.clear_support()?;
            } else {
                app.clear_records()?;
            }
            println!("Registros apagados.");
        }
        Command::Config { .. } => {}
    }
    Ok(())
}

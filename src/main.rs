#![allow(non_snake_case)]

#[macro_use]
mod error;
mod config;
mod controller;
mod data_types;
mod env;
mod service;
mod session;
mod shell;
mod state;
mod view;

use std::path::PathBuf;

use log::{info, warn};

use crate::error::Error;
use crate::config::Config;
use crate::controller::ClientController;
use crate::service::{Client, MovieService};

fn getConfig(path: Option<&String>) -> Result<Config, Error>
{
    if let Some(p) = path
    {
        return Config::fromFile(&PathBuf::from(p));
    }

    let conf_dir = match env::configDir()
    {
        Ok(d) => d,
        Err(e) =>
        {
            warn!("Failed to find config dir: {}. Using defaults...", e);
            return Ok(Config::default());
        },
    };
    let conf_file = conf_dir.join("config.toml");
    if !conf_file.exists()
    {
        warn!("Config file not found at {:?}. Using defaults...", conf_file);
        return Ok(Config::default());
    }
    Config::fromFile(&conf_file)
}

fn initLogger(verbose: bool) -> Result<(), Error>
{
    let level = if verbose { log::LevelFilter::Debug }
                else { log::LevelFilter::Warn };
    simple_logger::SimpleLogger::new().with_level(level).env().init()
        .map_err(|e| rterr!("Failed to initialize logger: {}", e))
}

fn listMovies(client: &Client) -> Result<(), Error>
{
    for movie in client.listMovies()?
    {
        println!("{}. {} (by {}, {} votes)", movie.id, movie.title,
                 movie.username, movie.votes);
    }
    Ok(())
}

fn cli() -> Result<(), Error>
{
    let opts = clap::Command::new("movote")
        .about("Suggest movies and vote for them")
        .arg(clap::Arg::new("config")
             .short('c')
             .long("config")
             .help("Path of the config file. Default: \
                    ~/.config/movote/config.toml"))
        .arg(clap::Arg::new("server")
             .short('s')
             .long("server")
             .help("Base URL of the movie service"))
        .arg(clap::Arg::new("verbose")
             .short('v')
             .long("verbose")
             .action(clap::ArgAction::SetTrue)
             .help("Log debug messages"))
        .subcommand(clap::Command::new("shell")
                    .about("Interactive session (the default)"))
        .subcommand(clap::Command::new("list")
                    .about("Print all movies and exit"))
        .get_matches();

    initLogger(opts.get_flag("verbose"))?;
    let mut config = getConfig(opts.get_one::<String>("config"))?;
    if let Some(server) = opts.get_one::<String>("server")
    {
        config.server_url = server.clone();
    }
    let client = Client::new(&config)?;
    info!("Using movie service at {}.", config.server_url);

    match opts.subcommand()
    {
        Some(("list", _)) => listMovies(&client),
        _ =>
        {
            let mut controller = ClientController::new(client);
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            shell::run(&mut controller, stdin.lock(), &mut stdout)
        },
    }
}

fn main()
{
    if let Err(e) = cli()
    {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    std::process::exit(0);
}

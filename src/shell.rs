use std::io::{BufRead, Write};

use crate::controller::ClientController;
use crate::error::Error;
use crate::service::MovieService;
use crate::state::Section;
use crate::view::{Event, Nav, View};

static HELP: &str = "\
Commands:
  login <user> [password]       Log in
  register <user> [password]    Create an account and log in
  logout                        Log out
  show login|register|movies    Switch section
  add <title> | <description>   Suggest a movie
  vote <n>                      Vote for movie number n
  help                          Show this message
  quit                          Exit";

#[derive(Debug, PartialEq)]
enum Command
{
    Dispatch(Event),
    Help,
    Quit,
    Nothing,
}

/// Sections the user can switch to from `view`.
fn sections(view: &View) -> Vec<Section>
{
    match &view.nav
    {
        Nav::LoggedOut { sections } => sections.iter().filter_map(
            |event| match event
            {
                Event::ShowSection(s) => Some(*s),
                _ => None,
            }).collect(),
        Nav::LoggedIn { .. } => vec![Section::Movies],
    }
}

/// Turn a line of input into a command, using only what `view`
/// offers. `Err` carries a hint for the user.
fn parse(line: &str, view: &View) -> Result<Command, String>
{
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace)
    {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    match word
    {
        "" => Ok(Command::Nothing),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "login" | "register" =>
        {
            if view.isLoggedIn()
            {
                return Err("Already logged in. Log out first.".to_owned());
            }
            // Everything after the username is the password, spaces
            // included.
            let (username, password) = rest.split_once(char::is_whitespace)
                .map(|(u, p)| (u, p.trim()))
                .unwrap_or((rest, ""));
            let username = username.to_owned();
            let password = password.to_owned();
            if word == "login"
            {
                Ok(Command::Dispatch(Event::Login { username, password }))
            }
            else
            {
                Ok(Command::Dispatch(Event::Register { username, password }))
            }
        },
        "logout" => match &view.nav
        {
            Nav::LoggedIn { logout, .. } => Ok(Command::Dispatch(logout.clone())),
            Nav::LoggedOut { .. } => Err("Not logged in.".to_owned()),
        },
        "show" =>
        {
            let section: Section = rest.parse().map_err(|e: Error| e.to_string())?;
            if sections(view).contains(&section)
            {
                Ok(Command::Dispatch(Event::ShowSection(section)))
            }
            else
            {
                Err(format!("Section {} is not available now.", section))
            }
        },
        "add" =>
        {
            if !view.isLoggedIn()
            {
                return Err("Log in to add movies.".to_owned());
            }
            let (title, description) = rest.split_once('|')
                .unwrap_or((rest, ""));
            Ok(Command::Dispatch(Event::AddMovie {
                title: title.trim().to_owned(),
                description: description.trim().to_owned(),
            }))
        },
        "vote" =>
        {
            let n: usize = rest.parse()
                .map_err(|_| format!("Not a movie number: {}", rest))?;
            view.voteTrigger(n).cloned().map(Command::Dispatch)
                .ok_or_else(|| format!("No movie number {}.", n))
        },
        _ => Err(format!("Unknown command: {}. Try “help”.", word)),
    }
}

fn writeView<W: Write>(view: &View, output: &mut W) -> Result<(), Error>
{
    write!(output, "\n{}> ", view).and_then(|_| output.flush())
        .map_err(|e| rterr!("Failed to write output: {}", e))
}

/// Read commands from `input` until EOF or “quit”, printing the view
/// after every one.
pub fn run<S, R, W>(controller: &mut ClientController<S>, input: R,
                    output: &mut W) -> Result<(), Error>
    where S: MovieService, R: BufRead, W: Write
{
    controller.synchronize();
    writeView(&controller.view(), output)?;
    for line in input.lines()
    {
        let line = line.map_err(|e| rterr!("Failed to read input: {}", e))?;
        let view = controller.view();
        match parse(&line, &view)
        {
            Ok(Command::Quit) => break,
            Ok(Command::Nothing) => {},
            Ok(Command::Help) => writeln!(output, "{}", HELP)
                .map_err(|e| rterr!("Failed to write output: {}", e))?,
            Ok(Command::Dispatch(event)) => controller.dispatch(event),
            Err(hint) => writeln!(output, "{}", hint)
                .map_err(|e| rterr!("Failed to write output: {}", e))?,
        }
        writeView(&controller.view(), output)?;
    }
    Ok(())
}

use std::fmt;

use crate::data_types::Movie;
use crate::state::{AppState, MovieForm, Section};

/// Something the user can do. Views carry these as data; the
/// controller handles them.
#[derive(Clone, Debug, PartialEq)]
pub enum Event
{
    ShowSection(Section),
    Login { username: String, password: String },
    Register { username: String, password: String },
    Logout,
    AddMovie { title: String, description: String },
    Vote(i64),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Nav
{
    LoggedOut { sections: Vec<Event> },
    LoggedIn { username: String, logout: Event },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieCard
{
    pub title: String,
    pub description: String,
    pub author: String,
    pub votes: i64,
    pub on_vote: Event,
}

impl MovieCard
{
    fn new(movie: &Movie) -> Self
    {
        Self {
            title: movie.title.clone(),
            description: movie.description.clone(),
            author: movie.username.clone(),
            votes: movie.votes,
            on_vote: Event::Vote(movie.id),
        }
    }
}

/// The two mutually exclusive top-level panels.
#[derive(Clone, Debug, PartialEq)]
pub enum Panel
{
    /// Login or registration form. `error` is the error region of
    /// that form.
    Auth { section: Section, error: Option<String> },
    Content { username: String, movies: Vec<MovieCard>, draft: MovieForm },
}

#[derive(Clone, Debug, PartialEq)]
pub struct View
{
    pub nav: Nav,
    pub panel: Panel,
}

impl View
{
    /// The vote trigger of the `n`th card, counting from 1.
    pub fn voteTrigger(&self, n: usize) -> Option<&Event>
    {
        match &self.panel
        {
            Panel::Content { movies, .. } if n > 0 =>
                movies.get(n - 1).map(|card| &card.on_vote),
            _ => None,
        }
    }

    pub fn isLoggedIn(&self) -> bool
    {
        matches!(self.panel, Panel::Content { .. })
    }
}

/// Derive the view from the state. Nothing else goes into it.
pub fn render(state: &AppState) -> View
{
    match state.session.user()
    {
        Some(user) => View {
            nav: Nav::LoggedIn {
                username: user.to_owned(),
                logout: Event::Logout,
            },
            panel: Panel::Content {
                username: user.to_owned(),
                movies: state.movies.iter().map(MovieCard::new).collect(),
                draft: state.movie_form.clone(),
            },
        },
        None =>
        {
            let section = if state.section.needsLogin()
            {
                Section::Login
            }
            else
            {
                state.section
            };
            let error = match section
            {
                Section::Register => state.register_error.clone(),
                _ => state.login_error.clone(),
            };
            View {
                nav: Nav::LoggedOut {
                    sections: vec![Event::ShowSection(Section::Login),
                                   Event::ShowSection(Section::Register)],
                },
                panel: Panel::Auth { section, error },
            }
        },
    }
}

impl fmt::Display for Nav
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self
        {
            Nav::LoggedOut { .. } => writeln!(f, "[ login | register ]"),
            Nav::LoggedIn { username, .. } =>
                writeln!(f, "Logged in as {} [ logout ]", username),
        }
    }
}

impl fmt::Display for View
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(f, "{}", self.nav)?;
        match &self.panel
        {
            Panel::Auth { section, error } =>
            {
                let title = match section
                {
                    Section::Register => "Register",
                    _ => "Login",
                };
                writeln!(f, "== {} ==", title)?;
                if let Some(e) = error
                {
                    writeln!(f, "Error: {}", e)?;
                }
            },
            Panel::Content { movies, draft, .. } =>
            {
                writeln!(f, "== Movies ==")?;
                if !draft.isEmpty()
                {
                    writeln!(f, "Unsent movie: {} | {}", draft.title,
                             draft.description)?;
                }
                if movies.is_empty()
                {
                    writeln!(f, "(No movies yet)")?;
                }
                for (i, card) in movies.iter().enumerate()
                {
                    writeln!(f, "{}. {}", i + 1, card.title)?;
                    writeln!(f, "   {}", card.description)?;
                    writeln!(f, "   Added by: {}", card.author)?;
                    writeln!(f, "   Votes: {}", card.votes)?;
                }
            },
        }
        Ok(())
    }
}

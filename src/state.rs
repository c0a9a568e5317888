use std::str::FromStr;
use std::fmt;

use crate::data_types::Movie;
use crate::error::Error;
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section
{
    Login,
    Register,
    Movies,
}

impl Section
{
    /// Whether the section lives in the logged-in panel.
    pub fn needsLogin(&self) -> bool
    {
        *self == Self::Movies
    }
}

impl FromStr for Section
{
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s
        {
            "login" => Ok(Self::Login),
            "register" => Ok(Self::Register),
            "movies" => Ok(Self::Movies),
            _ => Err(rterr!("Unknown section: {}", s)),
        }
    }
}

impl fmt::Display for Section
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        let s = match self
        {
            Self::Login => "login",
            Self::Register => "register",
            Self::Movies => "movies",
        };
        write!(f, "{}", s)
    }
}

/// Field values of the add-movie form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovieForm
{
    pub title: String,
    pub description: String,
}

impl MovieForm
{
    pub fn isEmpty(&self) -> bool
    {
        self.title.is_empty() && self.description.is_empty()
    }

    pub fn reset(&mut self)
    {
        *self = Self::default();
    }
}

/// Everything the view is derived from.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState
{
    pub session: Session,
    pub section: Section,
    /// Last successfully fetched list. Kept across failed fetches.
    pub movies: Vec<Movie>,
    pub login_error: Option<String>,
    pub register_error: Option<String>,
    pub movie_form: MovieForm,
}

impl Default for AppState
{
    fn default() -> Self
    {
        Self {
            session: Session::default(),
            section: Section::Login,
            movies: Vec::new(),
            login_error: None,
            register_error: None,
            movie_form: MovieForm::default(),
        }
    }
}

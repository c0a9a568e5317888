use serde::{Serialize, Deserialize};

/// A movie as listed by the server. The client never edits these; the
/// whole list is fetched again after every change.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Movie
{
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Who suggested the movie.
    pub username: String,
    pub votes: i64,
}

/// Body of /login and /register.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Credentials
{
    pub username: String,
    pub password: String,
}

impl Credentials
{
    pub fn new(username: &str, password: &str) -> Self
    {
        Self { username: username.to_owned(), password: password.to_owned() }
    }
}

/// Body of POST /movies. `username` is null if nobody is logged in.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NewMovie
{
    pub title: String,
    pub description: String,
    pub username: Option<String>,
}

/// Body of POST /movies/{id}/vote.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Vote
{
    pub username: Option<String>,
}

/// Error body the server sends with a non-2xx status.
#[derive(Deserialize, Debug)]
pub struct ErrorMessage
{
    pub message: String,
}

/// What the server said to a mutation.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome
{
    Accepted,
    /// Non-2xx. `message` is None if the body was not an
    /// `ErrorMessage`.
    Rejected { status: u16, message: Option<String> },
}

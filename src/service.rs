use serde::Serialize;
use url::Url;
use log::debug;

use crate::config::Config;
use crate::data_types::{Credentials, ErrorMessage, Movie, NewMovie, Outcome, Vote};
use crate::error::Error;

/// The remote movie service. All calls block until the server
/// answers. `Err` means the exchange itself failed (network, bad
/// payload); a server that answered with a non-2xx status gives
/// `Outcome::Rejected`.
pub trait MovieService
{
    fn login(&self, credentials: &Credentials) -> Result<Outcome, Error>;
    fn register(&self, credentials: &Credentials) -> Result<Outcome, Error>;
    /// The full movie list, in server order.
    fn listMovies(&self) -> Result<Vec<Movie>, Error>;
    fn addMovie(&self, movie: &NewMovie) -> Result<Outcome, Error>;
    fn vote(&self, movie_id: i64, vote: &Vote) -> Result<Outcome, Error>;
}

fn isSuccess(status: u16) -> bool
{
    (200..300).contains(&status)
}

/// HTTP implementation of `MovieService`.
pub struct Client
{
    agent: ureq::Agent,
    base: Url,
}

impl Client
{
    pub fn new(config: &Config) -> Result<Self, Error>
    {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout()
        {
            builder = builder.timeout(timeout);
        }
        Ok(Self { agent: builder.build(), base: config.baseURL()? })
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error>
    {
        self.base.join(path).map_err(
            |e| rterr!("Failed to build URL for {}: {}", path, e))
    }

    fn post<T: Serialize>(&self, path: &str, body: &T) ->
        Result<Outcome, Error>
    {
        let url = self.endpoint(path)?;
        debug!("POST {}...", url);
        let res = match self.agent.post(url.as_str())
            .set("Content-Type", "application/json")
            .send_json(body)
        {
            Ok(res) => res,
            Err(ureq::Error::Status(code, res)) =>
            {
                // Failure bodies are supposed to be {"message": ...},
                // but nothing forces the server to comply.
                let message = res.into_json::<ErrorMessage>().ok()
                    .map(|m| m.message);
                debug!("POST {} got {}.", url, code);
                return Ok(Outcome::Rejected { status: code, message });
            },
            Err(e) =>
            {
                return Err(error!(TransportError, "Failed to POST {}: {}",
                                  url, e));
            },
        };

        let status = res.status();
        debug!("POST {} got {}.", url, status);
        if isSuccess(status)
        {
            Ok(Outcome::Accepted)
        }
        else
        {
            Ok(Outcome::Rejected { status, message: None })
        }
    }
}

impl MovieService for Client
{
    fn login(&self, credentials: &Credentials) -> Result<Outcome, Error>
    {
        self.post("login", credentials)
    }

    fn register(&self, credentials: &Credentials) -> Result<Outcome, Error>
    {
        self.post("register", credentials)
    }

    fn listMovies(&self) -> Result<Vec<Movie>, Error>
    {
        let url = self.endpoint("movies")?;
        debug!("GET {}...", url);
        let res = match self.agent.get(url.as_str()).call()
        {
            Ok(res) => res,
            Err(ureq::Error::Status(code, _)) =>
            {
                return Err(Error::HTTPError(
                    code, format!("Failed to list movies from {}", url)));
            },
            Err(e) =>
            {
                return Err(error!(TransportError, "Failed to GET {}: {}",
                                  url, e));
            },
        };
        if !isSuccess(res.status())
        {
            return Err(Error::HTTPError(
                res.status(), format!("Failed to list movies from {}", url)));
        }
        res.into_json::<Vec<Movie>>().map_err(
            |e| error!(DataError, "Invalid movie list: {}", e))
    }

    fn addMovie(&self, movie: &NewMovie) -> Result<Outcome, Error>
    {
        self.post("movies", movie)
    }

    fn vote(&self, movie_id: i64, vote: &Vote) -> Result<Outcome, Error>
    {
        self.post(&format!("movies/{}/vote", movie_id), vote)
    }
}

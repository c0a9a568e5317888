use log::{debug, info};
use log::error as log_error;

use crate::data_types::{Credentials, NewMovie, Outcome, Vote};
use crate::error::Error;
use crate::service::MovieService;
use crate::state::{AppState, Section};
use crate::view::{self, Event, View};

static FALLBACK_ERROR: &str = "An error occurred";

#[derive(Clone, Copy)]
enum AuthForm
{
    Login,
    Register,
}

/// Owns the application state and talks to the movie service on
/// behalf of the user.
pub struct ClientController<S: MovieService>
{
    service: S,
    state: AppState,
    /// The session username the panels were last synchronized with.
    /// None before the first synchronization.
    synced: Option<Option<String>>,
}

impl<S: MovieService> ClientController<S>
{
    pub fn new(service: S) -> Self
    {
        Self { service, state: AppState::default(), synced: None }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState { &self.state }

    #[cfg(test)]
    pub fn service(&self) -> &S { &self.service }

    pub fn view(&self) -> View
    {
        view::render(&self.state)
    }

    pub fn dispatch(&mut self, event: Event)
    {
        match event
        {
            Event::ShowSection(section) => self.showSection(section),
            Event::Login { username, password } =>
                self.login(&username, &password),
            Event::Register { username, password } =>
                self.register(&username, &password),
            Event::Logout => self.logout(),
            Event::AddMovie { title, description } =>
                self.addMovie(&title, &description),
            Event::Vote(id) => self.voteMovie(id),
        }
    }

    /// Bring the selected section in line with the session. Entering
    /// the logged-in panel refreshes the movie list. Does nothing if
    /// the session has not changed since the last call.
    pub fn synchronize(&mut self)
    {
        if self.synced.as_ref() == Some(&self.state.session.username)
        {
            return;
        }
        self.synced = Some(self.state.session.username.clone());
        if self.state.session.isLoggedIn()
        {
            self.state.section = Section::Movies;
            self.loadMovies();
        }
        else
        {
            self.state.section = Section::Login;
        }
    }

    pub fn showSection(&mut self, section: Section)
    {
        if section.needsLogin() != self.state.session.isLoggedIn()
        {
            debug!("Section {} is not in the visible panel.", section);
            return;
        }
        self.state.section = section;
    }

    fn authenticate(&mut self, form: AuthForm, username: &str, password: &str)
    {
        let credentials = Credentials::new(username, password);
        let result = match form
        {
            AuthForm::Login => self.service.login(&credentials),
            AuthForm::Register => self.service.register(&credentials),
        };
        let message = match result
        {
            Ok(Outcome::Accepted) =>
            {
                info!("Logged in as {}.", username);
                self.state.session.login(username);
                self.synchronize();
                return;
            },
            Ok(Outcome::Rejected { status, message }) =>
            {
                debug!("Authentication rejected with {}.", status);
                message.unwrap_or_else(|| FALLBACK_ERROR.to_owned())
            },
            Err(e) =>
            {
                log_error!("{}", e);
                FALLBACK_ERROR.to_owned()
            },
        };
        match form
        {
            AuthForm::Login => self.state.login_error = Some(message),
            AuthForm::Register => self.state.register_error = Some(message),
        }
    }

    pub fn login(&mut self, username: &str, password: &str)
    {
        self.authenticate(AuthForm::Login, username, password);
    }

    pub fn register(&mut self, username: &str, password: &str)
    {
        self.authenticate(AuthForm::Register, username, password);
    }

    pub fn logout(&mut self)
    {
        self.state.session.logout();
        self.synchronize();
    }

    pub fn loadMovies(&mut self)
    {
        match self.service.listMovies()
        {
            Ok(movies) => self.state.movies = movies,
            Err(e) => log_error!("Error loading movies: {}", e),
        }
    }

    pub fn addMovie(&mut self, title: &str, description: &str)
    {
        self.state.movie_form.title = title.to_owned();
        self.state.movie_form.description = description.to_owned();
        let movie = NewMovie {
            title: title.to_owned(),
            description: description.to_owned(),
            username: self.state.session.username.clone(),
        };
        match self.service.addMovie(&movie)
        {
            Ok(Outcome::Accepted) =>
            {
                self.loadMovies();
                self.state.movie_form.reset();
            },
            other => logFailure("adding movie", other),
        }
    }

    pub fn voteMovie(&mut self, movie_id: i64)
    {
        let vote = Vote { username: self.state.session.username.clone() };
        match self.service.vote(movie_id, &vote)
        {
            Ok(Outcome::Accepted) => self.loadMovies(),
            other => logFailure("voting", other),
        }
    }
}

fn logFailure(action: &str, result: Result<Outcome, Error>)
{
    match result
    {
        Ok(Outcome::Accepted) => {},
        Ok(Outcome::Rejected { status, message }) => log_error!(
            "Error {}: server said {} {}", action, status,
            message.unwrap_or_default()),
        Err(e) => log_error!("Error {}: {}", action, e),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::data_types::Movie;
    use crate::service::testing::{Call, FakeService};
    use crate::view::Panel;

    fn movie(id: i64, title: &str) -> Movie
    {
        Movie {
            id,
            title: title.to_owned(),
            description: "d".to_owned(),
            username: "bob".to_owned(),
            votes: 0,
        }
    }

    fn loggedIn(service: FakeService) -> ClientController<FakeService>
    {
        let mut c = ClientController::new(service);
        c.synchronize();
        c.login("bob", "pw");
        c.service().clearCalls();
        c
    }

    #[test]
    fn startsLoggedOut()
    {
        let mut c = ClientController::new(FakeService::new());
        c.synchronize();
        assert!(!c.view().isLoggedIn());
        assert_eq!(c.state().section, Section::Login);
        assert!(c.service().calls().is_empty());
    }

    #[test]
    fn loginThenLogout()
    {
        let mut c = ClientController::new(
            FakeService::withMovies(vec![movie(1, "A")]));
        c.synchronize();
        c.login("bob", "pw");
        assert_eq!(c.state().session.user(), Some("bob"));
        assert_eq!(c.state().section, Section::Movies);
        assert!(c.view().isLoggedIn());
        assert_eq!(c.service().calls(), vec![
            Call::Login(Credentials::new("bob", "pw")),
            Call::ListMovies,
        ]);
        assert_eq!(c.state().movies, vec![movie(1, "A")]);

        c.logout();
        assert!(!c.view().isLoggedIn());
        assert_eq!(c.state().section, Section::Login);
        // Logout is local.
        assert_eq!(c.service().calls().len(), 2);
    }

    #[test]
    fn registerLogsIn()
    {
        let mut c = ClientController::new(FakeService::new());
        c.synchronize();
        c.register("amy", "secret");
        assert!(c.view().isLoggedIn());
        assert_eq!(c.service().calls(), vec![
            Call::Register(Credentials::new("amy", "secret")),
            Call::ListMovies,
        ]);
    }

    #[test]
    fn synchronizeIsIdempotent()
    {
        let mut c = loggedIn(FakeService::new());
        c.synchronize();
        c.synchronize();
        assert!(c.service().calls().is_empty());
        assert_eq!(c.state().section, Section::Movies);
    }

    #[test]
    fn loginAgainAfterLogout()
    {
        let mut c = loggedIn(FakeService::new());
        c.logout();
        assert!(c.service().calls().is_empty());
        c.login("bob", "pw");
        assert!(c.view().isLoggedIn());
        assert_eq!(c.state().section, Section::Movies);
        assert_eq!(c.service().calls(), vec![
            Call::Login(Credentials::new("bob", "pw")),
            Call::ListMovies,
        ]);
    }

    #[test]
    fn registerThenLogout()
    {
        let mut c = ClientController::new(FakeService::new());
        c.synchronize();
        c.register("amy", "secret");
        c.logout();
        assert!(!c.view().isLoggedIn());
        assert_eq!(c.state().session.user(), None);
        assert_eq!(c.state().section, Section::Login);
        assert_eq!(c.service().calls(), vec![
            Call::Register(Credentials::new("amy", "secret")),
            Call::ListMovies,
        ]);
    }

    #[test]
    fn loginRejected()
    {
        let service = FakeService::new();
        service.reply(Ok(Outcome::Rejected {
            status: 401,
            message: Some("Invalid credentials".to_owned()),
        }));
        let mut c = ClientController::new(service);
        c.synchronize();
        c.login("bob", "wrong");
        assert_eq!(c.state().session.user(), None);
        assert_eq!(c.state().login_error.as_deref(), Some("Invalid credentials"));
        assert_eq!(c.state().register_error, None);
        assert_eq!(c.view().panel, Panel::Auth {
            section: Section::Login,
            error: Some("Invalid credentials".to_owned()),
        });
        assert_eq!(c.service().calls(), vec![
            Call::Login(Credentials::new("bob", "wrong"))]);
    }

    #[test]
    fn registerFailures()
    {
        let service = FakeService::new();
        service.reply(Err(error!(TransportError, "connection refused")));
        service.reply(Ok(Outcome::Rejected { status: 500, message: None }));
        let mut c = ClientController::new(service);
        c.synchronize();
        c.showSection(Section::Register);

        c.register("amy", "");
        assert_eq!(c.state().register_error.as_deref(), Some(FALLBACK_ERROR));
        c.register("amy", "");
        assert_eq!(c.state().register_error.as_deref(), Some(FALLBACK_ERROR));
        assert_eq!(c.state().login_error, None);
        assert!(!c.view().isLoggedIn());
        assert_eq!(c.state().section, Section::Register);
    }

    #[test]
    fn addMovie()
    {
        let mut c = loggedIn(FakeService::withMovies(vec![movie(1, "Inception")]));
        c.addMovie("Inception", "A heist film");
        assert_eq!(c.service().calls(), vec![
            Call::AddMovie(NewMovie {
                title: "Inception".to_owned(),
                description: "A heist film".to_owned(),
                username: Some("bob".to_owned()),
            }),
            Call::ListMovies,
        ]);
        assert!(c.state().movie_form.isEmpty());
        assert_eq!(c.state().movies, vec![movie(1, "Inception")]);
    }

    #[test]
    fn addMovieRejectedKeepsDraft()
    {
        let service = FakeService::new();
        let mut c = loggedIn(service);
        c.service().reply(Ok(Outcome::Rejected {
            status: 400,
            message: Some("Missing required fields".to_owned()),
        }));
        c.addMovie("", "Nothing");
        assert_eq!(c.service().calls().len(), 1);
        assert_eq!(c.state().movie_form.description, "Nothing");
        assert_eq!(c.state().login_error, None);
    }

    #[test]
    fn voteMovie()
    {
        let mut c = loggedIn(FakeService::new());
        c.voteMovie(42);
        assert_eq!(c.service().calls(), vec![
            Call::Vote(42, Vote { username: Some("bob".to_owned()) }),
            Call::ListMovies,
        ]);
    }

    #[test]
    fn voteWhileLoggedOut()
    {
        let service = FakeService::new();
        service.reply(Ok(Outcome::Rejected {
            status: 400,
            message: Some("Username required".to_owned()),
        }));
        let mut c = ClientController::new(service);
        c.synchronize();
        c.voteMovie(42);
        assert_eq!(c.service().calls(), vec![
            Call::Vote(42, Vote { username: None })]);
    }

    #[test]
    fn failedRefreshKeepsList()
    {
        let mut c = loggedIn(FakeService::withMovies(vec![movie(1, "A")]));
        c.loadMovies();
        c.service().setMovies(Err(error!(DataError, "not a list")));
        c.voteMovie(1);
        assert_eq!(c.state().movies, vec![movie(1, "A")]);
    }

    #[test]
    fn voteFromRenderedCard()
    {
        let mut c = ClientController::new(
            FakeService::withMovies(vec![movie(5, "A"), movie(9, "B")]));
        c.synchronize();
        c.login("bob", "pw");
        c.service().clearCalls();
        let event = c.view().voteTrigger(2).cloned().unwrap();
        c.dispatch(event);
        assert_eq!(c.service().calls()[0],
                   Call::Vote(9, Vote { username: Some("bob".to_owned()) }));
    }

    #[test]
    fn showSectionStaysInPanel()
    {
        let mut c = ClientController::new(FakeService::new());
        c.synchronize();
        c.dispatch(Event::ShowSection(Section::Movies));
        assert_eq!(c.state().section, Section::Login);
        c.dispatch(Event::ShowSection(Section::Register));
        assert_eq!(c.state().section, Section::Register);
        assert!(c.service().calls().is_empty());
    }
}

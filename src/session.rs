/// Who the client believes is logged in. Lives in memory only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session
{
    pub username: Option<String>,
}

impl Session
{
    pub fn user(&self) -> Option<&str>
    {
        self.username.as_deref()
    }

    pub fn isLoggedIn(&self) -> bool
    {
        self.username.is_some()
    }

    pub fn login(&mut self, username: &str)
    {
        self.username = Some(username.to_owned());
    }

    pub fn logout(&mut self)
    {
        self.username = None;
    }
}

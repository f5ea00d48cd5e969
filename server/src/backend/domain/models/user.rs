/// Identity of the caller as asserted by the request; never verified here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }
}

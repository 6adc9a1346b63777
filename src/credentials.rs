//! This gives the required structure to authenticate with the API.

/// The application key, with the token obtained once a ticket has been swapped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub auth_token: Option<String>,
}

impl Credentials {
    /// Creates a credential based on the environment variables
    ///
    /// `BOX_API_KEY` is required, `BOX_AUTH_TOKEN` is optional.
    ///
    /// ```rust
    /// use boxapi::credentials::Credentials;
    ///
    /// match Credentials::from_env() {
    ///     Some(Credentials { auth_token: Some(_), .. }) => println!("authenticated"),
    ///     Some(_) => println!("only an api key"),
    ///     None => eprintln!("no credentials provided"),
    /// }
    /// ```
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("BOX_API_KEY").ok()?;
        Some(Self {
            api_key,
            auth_token: std::env::var("BOX_AUTH_TOKEN").ok(),
        })
    }

    pub fn api_key<K: Into<String>>(api_key: K) -> Self {
        Self {
            api_key: api_key.into(),
            auth_token: None,
        }
    }

    pub fn with_auth_token<T: Into<String>>(mut self, auth_token: T) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    /// Value of the `Authorization` header
    pub fn header_value(&self) -> String {
        match self.auth_token {
            Some(ref token) => format!("BoxAuth api_key={}&auth_token={token}", self.api_key),
            None => format!("BoxAuth api_key={}", self.api_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Credentials;

    #[test]
    fn header_with_token() {
        let creds = Credentials::api_key("key").with_auth_token("token");
        assert_eq!(creds.header_value(), "BoxAuth api_key=key&auth_token=token");
    }

    #[test]
    fn header_without_token() {
        assert_eq!(
            Credentials::api_key("key").header_value(),
            "BoxAuth api_key=key"
        );
    }
}

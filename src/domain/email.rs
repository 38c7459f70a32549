use thiserror::Error;

const MAX_EMAIL_LENGTH: usize = 254;

/// A normalized (lowercased, trimmed) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EmailParseError {
    #[error("missing @")]
    MissingAt,
    #[error("more than one @")]
    MultipleAt,
    #[error("missing the part before @")]
    EmptyLocal,
    #[error("the domain is not valid")]
    InvalidDomain,
    #[error("contains whitespace")]
    ContainsWhitespace,
    #[error("too long")]
    TooLong,
}

impl Email {
    pub fn parse(input: &str) -> Result<Self, EmailParseError> {
        let trimmed = input.trim();

        if trimmed.len() > MAX_EMAIL_LENGTH {
            return Err(EmailParseError::TooLong);
        }
        if trimmed.contains(char::is_whitespace) {
            return Err(EmailParseError::ContainsWhitespace);
        }

        let mut parts = trimmed.split('@');
        let (local, domain) = match (parts.next(), parts.next()) {
            (Some(local), Some(domain)) => (local, domain),
            _ => return Err(EmailParseError::MissingAt),
        };
        if parts.next().is_some() {
            return Err(EmailParseError::MultipleAt);
        }

        if local.is_empty() {
            return Err(EmailParseError::EmptyLocal);
        }

        // the domain needs at least one dot with labels around it
        if domain.starts_with('.')
            || domain.ends_with('.')
            || !domain.contains('.')
            || domain.contains("..")
        {
            return Err(EmailParseError::InvalidDomain);
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;
// argon2 input limit is far higher, this just keeps requests sane
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// A candidate password that passed the strength checks.
/// Never logged, never serialized.
pub struct Password(String);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PasswordParseError {
    #[error("too short")]
    TooShort,
    #[error("too long")]
    TooLong,
    #[error("needs a lowercase letter")]
    NoLowercase,
    #[error("needs an uppercase letter")]
    NoUppercase,
    #[error("needs a digit")]
    NoDigit,
}

impl Password {
    pub fn parse(input: &str) -> Result<Self, PasswordParseError> {
        if input.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordParseError::TooShort);
        }
        if input.chars().count() > MAX_PASSWORD_LENGTH {
            return Err(PasswordParseError::TooLong);
        }
        if !input.contains(|c: char| c.is_ascii_lowercase()) {
            return Err(PasswordParseError::NoLowercase);
        }
        if !input.contains(|c: char| c.is_ascii_uppercase()) {
            return Err(PasswordParseError::NoUppercase);
        }
        if !input.contains(|c: char| c.is_ascii_digit()) {
            return Err(PasswordParseError::NoDigit);
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(*****)")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn allowed_passwords() {
        let passwords = ["Abcdef12", "correct-Horse-battery-1", "P4ssword with spaces"];
        for password in passwords {
            let result = Password::parse(password);
            assert!(
                result.is_ok(),
                "{} should be allowed, instead: {:?}",
                password,
                result
            );
        }
    }

    #[test]
    fn disallowed_passwords() {
        let cases = [
            ("", PasswordParseError::TooShort),
            ("Ab1", PasswordParseError::TooShort),
            ("Abcdef1", PasswordParseError::TooShort),
            ("ABCDEFG1", PasswordParseError::NoLowercase),
            ("abcdefg1", PasswordParseError::NoUppercase),
            ("Abcdefgh", PasswordParseError::NoDigit),
        ];
        for (password, expected) in cases {
            let result = Password::parse(password);
            assert_eq!(
                result.err(),
                Some(expected),
                "{} returned the wrong error",
                password
            );
        }

        let too_long = format!("Aa1{}", "x".repeat(MAX_PASSWORD_LENGTH));
        assert_eq!(
            Password::parse(&too_long).err(),
            Some(PasswordParseError::TooLong)
        );
    }

    #[test]
    fn debug_does_not_leak() {
        let password = Password::parse("Hunter2hunter2").expect("valid password");
        assert!(!format!("{password:?}").contains("unter"));
    }
}

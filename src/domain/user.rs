pub type UserId = i64;

/// An authenticated account as the rest of the app sees it.
#[derive(Debug, Clone)]
pub struct Account {
    id: UserId,
    email: String,
    display_name: String,
}

impl Account {
    pub fn new(id: UserId, email: String, display_name: String) -> Self {
        Self {
            id,
            email,
            display_name,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

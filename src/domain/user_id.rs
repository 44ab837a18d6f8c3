use super::parse_required_text;

/// Identifier of a user owned by another system. Nothing checks that the user
/// exists; the value is stored as it comes.
#[derive(Debug, Clone)]
pub struct UserId(String);

impl UserId {
    pub fn parse(user_id: String) -> Result<UserId, String> {
        parse_required_text("user_id", user_id).map(Self)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

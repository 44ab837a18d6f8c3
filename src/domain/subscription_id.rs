use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

const MAX_ID_LENGTH: usize = 256;
// Path segment taken by the total cost route, /subscriptions/total
const RESERVED_IDS: [&str; 1] = ["total"];

#[derive(Debug, Clone)]
pub struct SubscriptionId(String);

impl SubscriptionId {
    /// Validates an identifier chosen by the client. It ends up in URLs, so
    /// whitespace is not allowed anywhere in it.
    pub fn parse(id: String) -> Result<SubscriptionId, String> {
        if id.is_empty() {
            return Err(String::from("id cannot be empty"));
        }

        if id.chars().any(char::is_whitespace) {
            return Err(format!("{} is not a valid id: whitespace is not allowed", id));
        }

        if RESERVED_IDS.contains(&id.as_str()) {
            return Err(format!("{} is not a valid id: it is a reserved path segment", id));
        }

        if id.graphemes(true).count() > MAX_ID_LENGTH {
            return Err(format!(
                "id cannot be longer than {} characters",
                MAX_ID_LENGTH
            ));
        }

        Ok(Self(id))
    }

    pub fn generate() -> SubscriptionId {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for SubscriptionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

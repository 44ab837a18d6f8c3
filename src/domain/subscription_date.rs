use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date as sent by the client. The original text is kept so the API
/// returns exactly what it received.
#[derive(Debug, Clone)]
pub struct SubscriptionDate {
    raw: String,
    date: NaiveDate,
}

impl SubscriptionDate {
    pub fn parse(field: &str, raw: String) -> Result<SubscriptionDate, String> {
        match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
            // chrono also accepts unpadded fields such as 2024-1-1
            Ok(date) if date.format(DATE_FORMAT).to_string() == raw => Ok(Self { raw, date }),
            _ => Err(format!(
                "{} is not a valid {}: expected a YYYY-MM-DD date",
                raw, field
            )),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl AsRef<str> for SubscriptionDate {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

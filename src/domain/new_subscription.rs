use serde::{Deserialize, Deserializer};

use crate::domain::{
    price::Price, service_name::ServiceName, subscription::Subscription,
    subscription_date::SubscriptionDate, subscription_id::SubscriptionId, user_id::UserId,
};

/// A subscription whose fields have all been validated and is ready to be written.
#[derive(Debug)]
pub struct NewSubscription {
    pub id: SubscriptionId,
    pub service_name: ServiceName,
    pub price: Price,
    pub user_id: UserId,
    pub start_date: SubscriptionDate,
    pub end_date: Option<SubscriptionDate>,
}

/// Request body of both create and update. Every field is optional so missing
/// ones can be reported with a proper message instead of a deserialization error.
#[derive(Deserialize, Debug, Default)]
pub struct SubscriptionBody {
    pub id: Option<String>,
    pub service_name: Option<String>,
    pub price: Option<i64>,
    pub user_id: Option<String>,
    pub start_date: Option<String>,
    // None: the field was absent. Some(None): the client sent an explicit null.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub end_date: Option<Option<String>>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl TryFrom<SubscriptionBody> for NewSubscription {
    type Error = String;

    fn try_from(body: SubscriptionBody) -> Result<Self, Self::Error> {
        let id = match body.id {
            Some(id) if !id.trim().is_empty() => SubscriptionId::parse(id)?,
            _ => SubscriptionId::generate(),
        };

        NewSubscription::parse(
            id,
            required("service_name", body.service_name)?,
            required("price", body.price)?,
            required("user_id", body.user_id)?,
            required("start_date", body.start_date)?,
            body.end_date.flatten(),
        )
    }
}

impl NewSubscription {
    /// Lays the fields present in `body` over the stored record and validates the
    /// result. The id always comes from the stored record.
    pub fn merge(existing: Subscription, body: SubscriptionBody) -> Result<Self, String> {
        let id = SubscriptionId::parse(existing.id)?;
        let end_date = match body.end_date {
            Some(end_date) => end_date,
            None => existing.end_date,
        };

        NewSubscription::parse(
            id,
            body.service_name.unwrap_or(existing.service_name),
            body.price.unwrap_or_else(|| i64::from(existing.price)),
            body.user_id.unwrap_or(existing.user_id),
            body.start_date.unwrap_or(existing.start_date),
            end_date,
        )
    }

    fn parse(
        id: SubscriptionId,
        service_name: String,
        price: i64,
        user_id: String,
        start_date: String,
        end_date: Option<String>,
    ) -> Result<Self, String> {
        let service_name = ServiceName::parse(service_name)?;
        let price = Price::parse(price)?;
        let user_id = UserId::parse(user_id)?;
        let start_date = SubscriptionDate::parse("start_date", start_date)?;
        let end_date = end_date
            .map(|end_date| SubscriptionDate::parse("end_date", end_date))
            .transpose()?;

        if let Some(end_date) = &end_date {
            if end_date.date() < start_date.date() {
                return Err(format!(
                    "end_date {} cannot be before start_date {}",
                    end_date.as_ref(),
                    start_date.as_ref()
                ));
            }
        }

        Ok(NewSubscription {
            id,
            service_name,
            price,
            user_id,
            start_date,
            end_date,
        })
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, String> {
    value.ok_or_else(|| format!("{} is required", field))
}

pub mod new_subscription;
pub mod price;
pub mod service_name;
pub mod subscription;
pub mod subscription_date;
pub mod subscription_id;
pub mod user_id;

use unicode_segmentation::UnicodeSegmentation;

const MAX_TEXT_LENGTH: usize = 256;

/// Shared rule for the free text fields of a subscription: present, not blank and
/// at most 256 graphemes long.
fn parse_required_text(field: &str, value: String) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", field));
    }

    if value.graphemes(true).count() > MAX_TEXT_LENGTH {
        return Err(format!(
            "{} cannot be longer than {} characters",
            field, MAX_TEXT_LENGTH
        ));
    }

    Ok(value)
}

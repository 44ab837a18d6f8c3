use super::parse_required_text;

#[derive(Debug, Clone)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn parse(name: String) -> Result<ServiceName, String> {
        parse_required_text("service_name", name).map(Self)
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Name given by whoever fills in the contact form. Any non-blank text is accepted.
#[derive(Debug, Clone)]
pub struct InquirerName(String);

impl InquirerName {
    pub fn parse(name: String) -> Result<InquirerName, String> {
        if name.trim().is_empty() {
            return Err(String::from("name cannot be empty"));
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for InquirerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

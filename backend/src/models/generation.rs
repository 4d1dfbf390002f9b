use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// Body of `POST /api/generate`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Prospect role, e.g. "VP Marketing"
    #[validate(length(min = 2, max = 80, message = "role must be between 2 and 80 characters"))]
    #[schema(example = "VP Marketing", min_length = 2, max_length = 80)]
    pub role: String,

    /// Company type, e.g. "B2B SaaS"
    #[validate(length(
        min = 2,
        max = 80,
        message = "companyType must be between 2 and 80 characters"
    ))]
    #[schema(example = "B2B SaaS", min_length = 2, max_length = 80)]
    pub company_type: String,

    /// Optional hint such as "Funding / growth"
    #[serde(default)]
    #[schema(example = "Funding / growth")]
    pub context: String,
}

impl GenerationRequest {
    /// Text the output language is guessed from.
    pub fn detection_text(&self) -> String {
        format!("{}\n{}\n{}", self.role, self.company_type, self.context)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerationResponse {
    pub openers: Vec<String>,
}

/// Fields in the order their errors are reported, under either spelling.
const FIELD_ORDER: &[&str] = &["role", "company_type", "companyType", "context"];

/// The first validation message, in declaration order.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    FIELD_ORDER
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .chain(field_errors.values())
        .flat_map(|errs| errs.iter())
        .next()
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => format!("invalid value ({})", err.code),
        })
        .unwrap_or_else(|| "Invalid request".to_string())
}

//! DTOs for the editorial option-filtering endpoints.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::Validate;

use crate::application::services::{DomainOptions, FormOption};

/// Options of a language widget, as rendered by the content form.
#[derive(Debug, Deserialize, Validate)]
pub struct LanguageOptionsRequest {
    #[validate(length(min = 1, message = "At least one option is required"))]
    pub options: Vec<FormOption>,
}

#[derive(Debug, Serialize)]
pub struct LanguageOptionsResponse {
    pub langcode: String,
    pub options: Vec<FormOption>,
}

/// Options of the domain-access widget of a content form.
///
/// `is_new` is accepted both as a JSON boolean and as a string (`"true"`),
/// which is how form builders tend to post it.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct DomainOptionsRequest {
    /// Path of the form being rendered, e.g. `/en-ca/node/3/translations/add/en-ca/fr-ca`.
    #[validate(length(min = 1, max = 2048))]
    pub request_path: String,

    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub is_new: bool,

    #[validate(length(min = 1, message = "At least one option is required"))]
    pub options: Vec<FormOption>,
}

#[derive(Debug, Serialize)]
pub struct DomainOptionsResponse {
    pub langcode: String,
    #[serde(flatten)]
    pub widget: DomainOptions,
}

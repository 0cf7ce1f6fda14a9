//! Askama templates for the two forms.
//!
//! Templates only ever receive validated or escaped data; askama escapes all
//! interpolations by default, so re-rendered user input cannot smuggle
//! markup back out.

use askama::Template;

use crate::flash::Flash;
use intake_core::FieldErrors;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub flash: Option<Flash>,
    pub errors: FieldErrors,
    /// Re-filled on a rejected submission so the user does not retype it.
    pub username: String,
    pub csrf_token: String,
}

impl LoginTemplate {
    pub fn fresh(flash: Option<Flash>, csrf_token: String) -> Self {
        Self {
            flash,
            errors: FieldErrors::default(),
            username: String::new(),
            csrf_token,
        }
    }
}

/// Re-filled contact form values for a rejected submission.
#[derive(Default)]
pub struct ContactFormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub flash: Option<Flash>,
    pub errors: FieldErrors,
    /// Username of the authenticated caller, shown in the header.
    pub username: String,
    pub values: ContactFormValues,
    pub csrf_token: String,
}

impl ContactTemplate {
    pub fn fresh(flash: Option<Flash>, username: String, csrf_token: String) -> Self {
        Self {
            flash,
            errors: FieldErrors::default(),
            username,
            values: ContactFormValues::default(),
            csrf_token,
        }
    }
}

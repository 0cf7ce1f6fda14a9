use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use intake_application::SubmitContactUseCase;
use intake_core::{ContactStore, CredentialHasher, FormPolicy, NewContact, UserStore};

use super::RouteError;
use crate::{
    extract::AuthenticatedUser,
    flash::{self, Flash},
    state::AppState,
    templates::{ContactFormValues, ContactTemplate},
};

#[derive(Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[tracing::instrument(name = "Show contact form", skip_all)]
pub async fn show_contact_form<U, C, H>(
    AuthenticatedUser(user): AuthenticatedUser,
    State(state): State<AppState<U, C, H>>,
    jar: CookieJar,
) -> Result<Response, RouteError>
where
    U: UserStore + Clone,
    C: ContactStore + Clone,
    H: CredentialHasher + Clone,
{
    let (jar, notice) = flash::take(jar);
    let pair = state.csrf.issue()?;
    let template = ContactTemplate::fresh(notice, user.username, pair.form_token);
    Ok((jar.add(pair.cookie), super::render_page(&template)?).into_response())
}

#[tracing::instrument(name = "Submit contact", skip_all, fields(user_id = user.user_id))]
pub async fn submit_contact<U, C, H>(
    AuthenticatedUser(user): AuthenticatedUser,
    State(state): State<AppState<U, C, H>>,
    jar: CookieJar,
    Form(form): Form<ContactForm>,
) -> Result<Response, RouteError>
where
    U: UserStore + Clone,
    C: ContactStore + Clone,
    H: CredentialHasher + Clone,
{
    state.csrf.verify(&jar, &form.csrf_token)?;

    let raw = [
        ("name", form.name.as_str()),
        ("email", form.email.as_str()),
        ("phone", form.phone.as_str()),
        ("message", form.message.as_str()),
    ];
    let fields = match FormPolicy::contact().validate(&raw) {
        Ok(fields) => fields,
        Err(errors) => {
            let pair = state.csrf.issue()?;
            let template = ContactTemplate {
                flash: None,
                errors,
                username: user.username,
                values: ContactFormValues {
                    name: form.name.trim().to_owned(),
                    email: form.email.trim().to_owned(),
                    phone: form.phone.trim().to_owned(),
                    message: form.message.trim().to_owned(),
                },
                csrf_token: pair.form_token,
            };
            return Ok((
                CookieJar::new().add(pair.cookie),
                super::render_page(&template)?,
            )
                .into_response());
        }
    };

    let entry = NewContact {
        user_id: user.user_id,
        name: fields.field("name"),
        email: fields.field("email"),
        phone: fields.field("phone"),
        message: fields.field("message"),
    };

    match SubmitContactUseCase::new(&state.contacts).execute(entry).await {
        Ok(_) => {
            let jar = CookieJar::new().add(flash::cookie(&Flash::success(
                "Contact message submitted successfully",
            )));
            Ok((jar, Redirect::to("/contact")).into_response())
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to persist contact message");
            let jar = CookieJar::new().add(flash::cookie(&Flash::error(
                "An error occurred. Please try again",
            )));
            Ok((jar, Redirect::to("/contact")).into_response())
        }
    }
}

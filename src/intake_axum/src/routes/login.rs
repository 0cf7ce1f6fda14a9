use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;

use intake_application::{LoginError, LoginUseCase};
use intake_core::{ContactStore, CredentialHasher, FormPolicy, UserStore};

use super::RouteError;
use crate::{
    flash::{self, Flash},
    state::AppState,
    templates::LoginTemplate,
};

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[tracing::instrument(name = "Show login form", skip_all)]
pub async fn show_login_form<U, C, H>(
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
    let template = LoginTemplate::fresh(notice, pair.form_token);
    Ok((jar.add(pair.cookie), super::render_page(&template)?).into_response())
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, C, H>(
    State(state): State<AppState<U, C, H>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, RouteError>
where
    U: UserStore + Clone,
    C: ContactStore + Clone,
    H: CredentialHasher + Clone,
{
    state.csrf.verify(&jar, &form.csrf_token)?;

    let raw = [
        ("username", form.username.as_str()),
        ("password", form.password.as_str()),
    ];
    let fields = match FormPolicy::login().validate(&raw) {
        Ok(fields) => fields,
        Err(errors) => {
            let pair = state.csrf.issue()?;
            let template = LoginTemplate {
                flash: None,
                errors,
                username: form.username.trim().to_owned(),
                csrf_token: pair.form_token,
            };
            return Ok((
                CookieJar::new().add(pair.cookie),
                super::render_page(&template)?,
            )
                .into_response());
        }
    };

    let username = fields.field("username");
    let password = Secret::from(fields.field("password"));

    match LoginUseCase::new(&state.users, &state.hasher)
        .execute(&username, password)
        .await
    {
        Ok(identity) => {
            let session_cookie = state.sessions.create(&identity)?;
            let jar = CookieJar::new()
                .add(session_cookie)
                .add(flash::cookie(&Flash::success("Login successful")));
            Ok((jar, Redirect::to("/contact")).into_response())
        }
        // Same notice whether the username or the password was wrong.
        Err(LoginError::InvalidCredentials) => {
            let jar = CookieJar::new().add(flash::cookie(&Flash::error("Invalid credentials")));
            Ok((jar, Redirect::to("/login")).into_response())
        }
        Err(LoginError::Store(err)) => {
            tracing::error!(error = %err, "user lookup failed during login");
            let jar = CookieJar::new().add(flash::cookie(&Flash::error(
                "An error occurred. Please try again",
            )));
            Ok((jar, Redirect::to("/login")).into_response())
        }
    }
}

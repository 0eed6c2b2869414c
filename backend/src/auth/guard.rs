use crate::auth::session::Session;
use crate::error::AppError;
use crate::state::AppState;
use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

pub const SESSION_COOKIE_NAME: &str = "admin_session";
pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Proof that the request carries a live admin session.
///
/// Taking this as a handler argument is what protects an admin route: when
/// the cookie is missing, unknown or expired, extraction fails with
/// [`AppError::Unauthorized`], which answers with a redirect to the login
/// page. Wrap it in `Option` to only peek at the login state.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub session: Session,
}

impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = req
            .cookie(SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string());
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let (Some(token), Some(state)) = (token, state) else {
                return Err(AppError::Unauthorized);
            };
            match state.sessions.validate(&token).await {
                Some(session) => Ok(AdminSession { token, session }),
                None => Err(AppError::Unauthorized),
            }
        })
    }
}

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: &str, max_age: std::time::Duration, secure: bool) -> Cookie<'static> {
    let max_age_secs = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
    Cookie::build(SESSION_COOKIE_NAME, token.to_string())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .finish()
}

/// Cookie that makes the browser drop the session token.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE_NAME, "").path("/").finish();
    cookie.make_removal();
    cookie
}

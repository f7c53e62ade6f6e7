use axum::http::{StatusCode, HeaderMap, HeaderValue};
use axum::extract::State;
use axum::response::IntoResponse;

use crate::net::error;
use crate::net::cookie::{SameSite, SetCookie};
use crate::sec::authn::{initiator, password, session};
use crate::sql;
use crate::state::ArcShared;
use crate::user;

fn session_cookie(
    state: &ArcShared,
    session: &session::Session
) -> error::Result<HeaderValue> {
    let mut cookie = SetCookie::new("session_id", session::encode_base64(&session.token))
        .with_expires(session.expires)
        .with_path("/")
        .with_same_site(SameSite::Strict)
        .with_http_only(true)
        .with_secure(*state.sec().session_info().secure());

    if let Some(domain) = state.sec().session_info().domain() {
        cookie = cookie.with_domain(domain.clone());
    }

    Ok(cookie.into_header_value()?)
}

pub async fn register(
    State(state): State<ArcShared>,
    axum::Json(json): axum::Json<lodge_api::auth::RegisterUser>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    if !lodge_lib::users::name_valid(&json.first_name) {
        return Err(error::Error::api((
            error::GeneralKind::ValidationFailed,
            error::Detail::with_key("first_name")
        )));
    }

    if !lodge_lib::users::name_valid(&json.last_name) {
        return Err(error::Error::api((
            error::GeneralKind::ValidationFailed,
            error::Detail::with_key("last_name")
        )));
    }

    if !lodge_lib::users::phone_valid(&json.phone_number) {
        return Err(error::Error::api((
            error::GeneralKind::ValidationFailed,
            error::Detail::with_key("phone_number")
        )));
    }

    if !lodge_lib::users::email_valid(&json.email) {
        return Err(error::Error::api((
            error::GeneralKind::ValidationFailed,
            error::Detail::with_key("email")
        )));
    }

    if !lodge_lib::users::password_valid(&json.password) {
        return Err(error::Error::api((
            error::GeneralKind::ValidationFailed,
            error::Detail::with_key("password")
        )));
    }

    if user::check_email(&conn, &json.email).await?.is_some() {
        return Err(error::Error::api((
            error::UserKind::EmailExists,
            error::Detail::with_key("email")
        )));
    }

    let created = chrono::Utc::now();

    let transaction = conn.transaction().await?;

    let result = match transaction.query_one(
        "\
        insert into users (first_name, last_name, phone_number, email, created) \
        values ($1, $2, $3, $4, $5) \
        returning id",
        &[&json.first_name, &json.last_name, &json.phone_number, &json.email, &created]
    ).await {
        Ok(r) => r,
        Err(err) => {
            if let Some(constraint) = sql::unique_constraint_error(&err) {
                if constraint == "users_email_key" {
                    return Err(error::Error::api((
                        error::UserKind::EmailExists,
                        error::Detail::with_key("email")
                    )));
                }
            }

            return Err(err.into());
        }
    };

    let user = user::User {
        id: result.get(0),
        first_name: json.first_name,
        last_name: json.last_name,
        phone_number: json.phone_number,
        email: json.email,
        created,
        updated: None,
    };

    password::Password::create(&transaction, &user.id, &json.password).await?;

    let session = session::Session::create(&transaction, &user.id).await?;

    transaction.commit().await?;

    state.sec()
        .session_info()
        .cache()
        .insert(session.token.clone(), (session.clone(), user.clone()));

    let mut headers = HeaderMap::new();
    headers.insert("set-cookie", session_cookie(&state, &session)?);

    Ok((
        StatusCode::CREATED,
        headers,
        lodge_api::Payload::new(lodge_api::auth::AuthenticatedUser {
            token: session::encode_base64(&session.token),
            user: user.into(),
        })
    ))
}

pub async fn login(
    State(state): State<ArcShared>,
    axum::Json(json): axum::Json<lodge_api::auth::LoginUser>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    // never reveal which of email or password was wrong
    let Some(user) = user::User::retrieve_email(&conn, &json.email).await? else {
        return Err(error::Error::api(error::AuthKind::InvalidCredentials));
    };

    let Some(user_password) = password::Password::retrieve(&conn, &user.id).await? else {
        return Err(error::Error::new()
            .source("user exists without a password record"));
    };

    if !user_password.verify(&json.password)? {
        return Err(error::Error::api(error::AuthKind::InvalidCredentials));
    }

    let transaction = conn.transaction().await?;

    let session = session::Session::create(&transaction, &user.id).await?;

    transaction.commit().await?;

    state.sec()
        .session_info()
        .cache()
        .insert(session.token.clone(), (session.clone(), user.clone()));

    let mut headers = HeaderMap::new();
    headers.insert("set-cookie", session_cookie(&state, &session)?);

    Ok((
        StatusCode::OK,
        headers,
        lodge_api::Payload::new(lodge_api::auth::AuthenticatedUser {
            token: session::encode_base64(&session.token),
            user: user.into(),
        })
    ))
}

pub async fn logout(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    let transaction = conn.transaction().await?;

    match &initiator.mechanism {
        initiator::Mechanism::Session(session) => {
            session.delete(&transaction).await?;

            state.sec()
                .session_info()
                .cache()
                .invalidate(&session.token);
        }
    }

    transaction.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Path, Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    error::AppError,
    state::AppState,
    store::UrlStore,
    types::{submitted_url, FormFields},
    utils::{escape_html, generate_short_key, KeyGenError},
};

/// Fresh keys tried before a shorten request gives up on collisions.
pub const MAX_KEY_ATTEMPTS: usize = 5;

const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>URL Shortener</title>
</head>
<body>
    <h2>URL Shortener</h2>
    <form method="post" action="/shorten">
        <input type="url" name="url" placeholder="Enter a URL" required>
        <input type="submit" value="Shorten">
    </form>
</body>
</html>
"#;

// every path outside /shorten and /short/ lands here;
// posting bounces the client over to /shorten
#[instrument]
pub async fn form(method: Method) -> Response {
    if method == Method::POST {
        Redirect::to("/shorten").into_response()
    } else {
        Html(FORM_PAGE).into_response()
    }
}

#[instrument(skip(state, query, form))]
pub async fn shorten(
    State(state): State<AppState>,
    query: Result<Query<FormFields>, QueryRejection>,
    form: Result<Form<FormFields>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let body = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            debug!(error = %rejection, "Ignoring unreadable form body");
            FormFields::default()
        }
    };
    let query = query.map(|Query(fields)| fields).unwrap_or_default();
    let original_url = submitted_url(&body, &query).ok_or(AppError::MissingUrl)?;

    let short_key = allocate_key(&state.store, &original_url, generate_short_key)?;
    let short_link = state.short_link(&short_key);
    info!(
        short_key = %short_key,
        short_link = %short_link,
        stored = state.store.len(),
        "Created short URL"
    );

    Ok(Html(render_result(&original_url, &short_link)))
}

#[instrument(skip(state))]
pub async fn redirect(
    State(state): State<AppState>,
    Path(short_key): Path<String>,
) -> Result<Response, AppError> {
    if short_key.is_empty() {
        return Err(AppError::MissingKey);
    }

    let original_url = state.store.get(&short_key).ok_or(AppError::NotFound)?;
    let location = HeaderValue::from_bytes(original_url.as_bytes()).map_err(|e| {
        error!(error = %e, short_key = %short_key, "Stored URL is not a valid Location header");
        AppError::InvalidTarget
    })?;

    info!(short_key = %short_key, "Redirecting to long URL");
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

#[instrument]
pub async fn missing_key() -> AppError {
    AppError::MissingKey
}

/// Stores `url` under a fresh key, drawing a new one from `next_key` each
/// time the previous one was already taken.
fn allocate_key<F>(store: &UrlStore, url: &str, mut next_key: F) -> Result<String, AppError>
where
    F: FnMut() -> Result<String, KeyGenError>,
{
    for attempt in 1..=MAX_KEY_ATTEMPTS {
        let key = next_key()?;
        if store.insert_new(key.clone(), url.to_string()) {
            debug!(short_key = %key, attempt, "Allocated short key");
            return Ok(key);
        }
        warn!(short_key = %key, attempt, "Short key collision");
    }
    Err(AppError::KeyspaceExhausted)
}

fn render_result(original_url: &str, short_link: &str) -> String {
    let original_url = escape_html(original_url);
    let short_link = escape_html(short_link);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>URL Shortener</title>
</head>
<body>
    <h2>URL Shortener</h2>
    <p>Original URL: {original_url}</p>
    <p>Shortened URL: <a href="{short_link}">{short_link}</a></p>
    <form method="post" action="/shorten">
        <input type="text" name="url" placeholder="Enter a URL">
        <input type="submit" value="Shorten">
    </form>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_key_retries_on_collision() {
        let store = UrlStore::new();
        store.put("aaaaaa".into(), "https://taken.example".into());

        let mut keys = vec!["bbbbbb", "aaaaaa"];
        let key = allocate_key(&store, "https://new.example", || {
            Ok(keys.pop().unwrap().to_string())
        })
        .unwrap();

        assert_eq!(key, "bbbbbb");
        assert_eq!(store.get("aaaaaa").as_deref(), Some("https://taken.example"));
        assert_eq!(store.get("bbbbbb").as_deref(), Some("https://new.example"));
    }

    #[test]
    fn allocate_key_gives_up_after_bounded_attempts() {
        let store = UrlStore::new();
        store.put("aaaaaa".into(), "https://taken.example".into());

        let mut calls = 0;
        let err = allocate_key(&store, "https://new.example", || {
            calls += 1;
            Ok("aaaaaa".to_string())
        })
        .unwrap_err();

        assert!(matches!(err, AppError::KeyspaceExhausted));
        assert_eq!(calls, MAX_KEY_ATTEMPTS);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn result_page_escapes_user_input() {
        let page = render_result(
            "https://example.com/<script>",
            "http://localhost:8080/short/abcDEF",
        );
        assert!(page.contains("Original URL: https://example.com/&lt;script&gt;"));
        assert!(page.contains(
            r#"<a href="http://localhost:8080/short/abcDEF">http://localhost:8080/short/abcDEF</a>"#
        ));
    }
}

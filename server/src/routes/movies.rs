use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use filmscout::{MovieOptions, Resolution};
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

const NO_SUBTITLES: &str = "No subtitles found";

#[derive(serde::Deserialize)]
pub struct CheckMovieParams {
    pub year: Option<String>,
    pub title: Option<String>,
}

/// `GET /check_movie?year=..&title=..` — every available resolution plus
/// subtitles for one title. Re-runs the full scrape on each call.
pub async fn check_movie(
    State(state): State<AppState>,
    Query(params): Query<CheckMovieParams>,
) -> Response {
    let (Some(year), Some(title)) = (require(params.year), require(params.title)) else {
        return bad_request("Missing title or year");
    };

    match state.scout.find_movie(&year, &title).await {
        Ok(found) => Json(movie_body(&title, &found)).into_response(),
        Err(e) => {
            warn!("lookup failed for \"{title}\" ({year}): {e}");
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Download unavailable" })),
            )
                .into_response()
        }
    }
}

#[derive(serde::Deserialize)]
pub struct MovieLinkParams {
    pub year: Option<String>,
    pub title: Option<String>,
    pub resolution: Option<String>,
}

/// `GET /get_movie_link?year=..&title=..&resolution=..` — the direct link for
/// one resolution. Runs the same pipeline as `check_movie`; nothing is shared
/// between the two calls.
pub async fn get_movie_link(
    State(state): State<AppState>,
    Query(params): Query<MovieLinkParams>,
) -> Response {
    let (Some(year), Some(title), Some(resolution)) = (
        require(params.year),
        require(params.title),
        require(params.resolution),
    ) else {
        return bad_request("Missing title, year, or resolution");
    };

    // Labels outside the closed set are indistinguishable from absent ones.
    let Some(resolution) = Resolution::from_label(&resolution) else {
        return bad_request("Resolution not available");
    };

    let found = match state.scout.find_movie(&year, &title).await {
        Ok(found) => found,
        Err(e) => {
            warn!("lookup failed for \"{title}\" ({year}): {e}");
            return bad_request("Resolution not available");
        }
    };

    match found.resolutions.get(&resolution) {
        Some(link) => Json(json!({
            "movie_link": link,
            "subtitles": subtitles_value(&found.subtitles),
        }))
        .into_response(),
        None => bad_request("Resolution not available"),
    }
}

fn require(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

fn movie_body(title: &str, found: &MovieOptions) -> Value {
    json!({
        "movie_name": title,
        "available_options": found.resolutions,
        "subtitles": subtitles_value(&found.subtitles),
    })
}

fn subtitles_value(subtitles: &[String]) -> Value {
    if subtitles.is_empty() {
        Value::String(NO_SUBTITLES.to_string())
    } else {
        json!(subtitles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmscout::detail::classify_anchors;
    use filmscout::Anchor;
    use url::Url;

    fn anchor(href: &str) -> Anchor {
        Anchor {
            text: String::new(),
            href: href.to_string(),
        }
    }

    #[test]
    fn empty_params_count_as_missing() {
        assert_eq!(require(None), None);
        assert_eq!(require(Some(String::new())), None);
        assert_eq!(require(Some("2010".to_string())).as_deref(), Some("2010"));
    }

    #[test]
    fn empty_subtitle_list_serializes_as_sentinel() {
        assert_eq!(subtitles_value(&[]), Value::String(NO_SUBTITLES.to_string()));

        let subs = vec!["https://cdn.example.com/a.srt".to_string()];
        assert_eq!(subtitles_value(&subs), json!(subs));
    }

    #[test]
    fn check_movie_body_matches_wire_shape() {
        let base = Url::parse("https://netupserver.com/film/2010/inception/").unwrap();
        let found = classify_anchors(
            &[
                anchor("/dl/inception-720p.mp4"),
                anchor("/dl/inception-en.srt"),
            ],
            &base,
        );

        let body = movie_body("Inception", &found);
        assert_eq!(
            body,
            json!({
                "movie_name": "Inception",
                "available_options": {
                    "720p": "https://netupserver.com/dl/inception-720p.mp4",
                },
                "subtitles": ["https://netupserver.com/dl/inception-en.srt"],
            }),
        );
    }

    #[test]
    fn body_echoes_the_requested_title_not_the_scraped_one() {
        let found = MovieOptions::default();
        let body = movie_body("The Matrix", &found);
        assert_eq!(body["movie_name"], "The Matrix");
        assert_eq!(body["subtitles"], Value::String(NO_SUBTITLES.to_string()));
    }

    #[test]
    fn unknown_resolution_label_is_rejected() {
        assert!(Resolution::from_label("240p").is_none());
    }
}

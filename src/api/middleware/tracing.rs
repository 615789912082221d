//! Request tracing for the blog API.
//!
//! Every request gets an `INFO` span named `http` carrying the method, the path
//! without its query string and whether a bearer token was sent. The token
//! itself is never recorded. Responses are logged with their latency in
//! milliseconds, and 5xx responses (a failed database call, an overflowing
//! stats sum) are logged again at `ERROR`.
//!
//! ```text
//! INFO http{method=POST path=/api/blogs bearer=true}: finished processing request latency=4 ms status=201
//! ERROR http{method=GET path=/api/blogs/stats bearer=false}: response failed classification=Status code: 500 latency=1 ms
//! ```

use axum::body::Body;
use axum::http::{Request, header};
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultOnBodyChunk, DefaultOnEos, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse,
    TraceLayer,
};
use tracing::{Level, Span};

type MakeSpanFn = fn(&Request<Body>) -> Span;

/// Trace layer applied to the whole application in [`crate::routes::app_router`].
pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    MakeSpanFn,
    DefaultOnRequest,
    DefaultOnResponse,
    DefaultOnBodyChunk,
    DefaultOnEos,
    DefaultOnFailure,
>;

/// Builds the request tracing layer.
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpanFn)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http",
        method = %request.method(),
        path = request.uri().path(),
        bearer = sends_bearer(request),
    )
}

/// True if the request carries an `Authorization: Bearer ...` header.
fn sends_bearer(request: &Request<Body>) -> bool {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .get(..7)
                .is_some_and(|scheme| scheme.eq_ignore_ascii_case("bearer "))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use tower::ServiceExt;

    fn request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/blogs?page=2");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_sends_bearer() {
        assert!(sends_bearer(&request(Some("Bearer abc"))));
        assert!(sends_bearer(&request(Some("bearer abc"))));
        assert!(!sends_bearer(&request(Some("Basic cm9vdDpzZWtyZXQ="))));
        assert!(!sends_bearer(&request(Some("Bear"))));
        assert!(!sends_bearer(&request(None)));
    }

    #[tokio::test]
    async fn test_layer_passes_responses_through() {
        let app = Router::new()
            .route("/api/blogs", get(|| async { "[]" }))
            .route(
                "/api/blogs/stats",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .layer(layer());

        let ok = app.clone().oneshot(request(Some("Bearer abc"))).await.unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let failed = app
            .oneshot(
                Request::builder()
                    .uri("/api/blogs/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

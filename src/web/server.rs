use axum::{
    extract::{DefaultBodyLimit, Multipart},
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::debug;

use crate::cli::ServeArgs;
use crate::core::sequence::{normalize, reverse_complement};
use crate::core::types::StrandSelection;
use crate::matching::engine::{MatchError, MatchingConfig, MatchingEngine};
use crate::matching::summary::MatchSummary;
use crate::parsing::probes::{delimiter_for_path, parse_probe_text, ProbeParseOptions};
use crate::parsing::target::parse_target_text;
use crate::report::json::{search_report, ProcessingInfo};
use crate::utils::validation::{
    check_search_work, validate_upload, ValidationError, MAX_MATCHES,
};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_MULTIPART_FIELDS: usize = 10;
pub const MAX_PROBE_FIELD_SIZE: usize = 16 * 1024 * 1024; // 16MB
pub const MAX_TARGET_FIELD_SIZE: usize = 64 * 1024 * 1024; // 64MB
pub const MAX_REVCOMP_SEQUENCES: usize = 1_000;

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Search inputs extracted from a multipart form
#[derive(Debug, Default)]
struct SearchForm {
    probes: Option<String>,
    probes_filename: Option<String>,
    target: Option<String>,
    strands: StrandSelection,
}

#[derive(Deserialize)]
struct ReverseComplementRequest {
    sequences: Vec<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Error response for problems with the caller's own input.
/// The message describes their data, so it is returned as-is.
fn input_error(status: StatusCode, error_type: &str, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
            error_type: error_type.to_string(),
            details: None,
        }),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and middleware configured.
///
/// Per-IP rate limiting needs the peer address and is added in [`run`].
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/health", get(health_handler))
        .route("/api/search", post(search_handler))
        .route("/api/reverse-complement", post(reverse_complement_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(60),
                ))
                .layer(ConcurrencyLimitLayer::new(100))
                // Largest target plus probe table plus multipart overhead
                .layer(DefaultBodyLimit::max(
                    MAX_TARGET_FIELD_SIZE + MAX_PROBE_FIELD_SIZE + 1024 * 1024,
                )),
        )
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?;

    let app = create_router().layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting probe-matcher web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// API endpoint for searching probes against a target
async fn search_handler(mut multipart: Multipart) -> Response {
    let start_time = Instant::now();

    let form = match extract_search_form(&mut multipart).await {
        Ok(form) => form,
        Err(error_response) => return error_response,
    };

    // Matching is CPU-bound; keep it off the async workers
    let result = tokio::task::spawn_blocking(move || run_search(&form, start_time)).await;

    match result {
        Ok(Ok(body)) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Ok(Err(error_response)) => error_response,
        Err(join_error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(create_safe_error_response(
                "search_failed",
                "Search failed unexpectedly",
                Some(&join_error.to_string()),
            )),
        )
            .into_response(),
    }
}

/// Parse, size-check and run a search, returning the serialized JSON report
#[allow(clippy::result_large_err)] // Response is the handler's error type
fn run_search(form: &SearchForm, start_time: Instant) -> Result<Vec<u8>, Response> {
    let probes_text = form.probes.as_deref().ok_or_else(|| {
        input_error(
            StatusCode::BAD_REQUEST,
            "missing_field",
            "No probe table provided",
        )
    })?;
    let target_text = form.target.as_deref().ok_or_else(|| {
        input_error(
            StatusCode::BAD_REQUEST,
            "missing_field",
            "No target sequence provided",
        )
    })?;

    let delimiter = match &form.probes_filename {
        Some(name) => delimiter_for_path(Path::new(name)),
        None => sniff_delimiter(probes_text),
    };
    let options = ProbeParseOptions {
        delimiter,
        strict: false,
    };

    let probe_set = parse_probe_text(probes_text, options).map_err(|e| {
        input_error(StatusCode::BAD_REQUEST, "invalid_probes", &e.to_string())
    })?;
    let target = parse_target_text(target_text).map_err(|e| {
        input_error(StatusCode::BAD_REQUEST, "invalid_target", &e.to_string())
    })?;

    let config = MatchingConfig {
        strands: form.strands,
    };
    let engine = MatchingEngine::with_config(&probe_set.probes, config);

    if let Some(msg) = check_search_work(engine.scan_count(), target.len()) {
        return Err(input_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            "search_too_large",
            &msg,
        ));
    }

    let matches = engine
        .find_matches_limited(&target, MAX_MATCHES)
        .map_err(|e| match e {
            MatchError::TooManyMatches(_) => input_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "too_many_matches",
                &format!("{e}; use more specific probes or a shorter target"),
            ),
            MatchError::InvalidSequence(_) => {
                input_error(StatusCode::BAD_REQUEST, "invalid_probes", &e.to_string())
            }
        })?;
    let summary = MatchSummary::new(&probe_set.probes, target.len(), &matches);

    debug!(
        "Web search: {} probe(s), {} bp target, {} match(es)",
        summary.probe_count, summary.target_length, summary.total_matches
    );

    let mut report = search_report(&summary, &matches, &probe_set.rejected);
    #[allow(clippy::cast_possible_truncation)] // Processing time won't exceed u64
    let processing_time_ms = start_time.elapsed().as_millis() as u64;
    report.processing_info = Some(ProcessingInfo {
        processing_time_ms,
        strands: form.strands,
        probe_source: form.probes_filename.clone(),
    });

    serde_json::to_vec(&report).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(create_safe_error_response(
                "serialization_failed",
                "Failed to build search results",
                Some(&e.to_string()),
            )),
        )
            .into_response()
    })
}

/// Tab when the first data line has a tab and no comma, comma otherwise
fn sniff_delimiter(text: &str) -> u8 {
    let first = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('#'))
        .unwrap_or_default();

    if first.contains('\t') && !first.contains(',') {
        b'\t'
    } else {
        b','
    }
}

fn validation_error_type(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::FilenameTooLong => "filename_too_long",
        ValidationError::InvalidFilename => "invalid_filename",
        ValidationError::EmptyFilename => "empty_filename",
        ValidationError::InvalidFileContent => "invalid_file_content",
    }
}

/// Extract probe table, target and options from a multipart form
async fn extract_search_form(multipart: &mut Multipart) -> Result<SearchForm, Response> {
    let mut form = SearchForm::default();
    let mut fields_received = 0usize;

    loop {
        if fields_received >= MAX_MULTIPART_FIELDS {
            return Err(input_error(
                StatusCode::BAD_REQUEST,
                "field_limit_exceeded",
                "Too many form fields",
            ));
        }

        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(create_safe_error_response(
                        "invalid_multipart",
                        "Malformed form data",
                        Some(&e.to_string()),
                    )),
                )
                    .into_response())
            }
        };

        fields_received += 1;
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(std::string::ToString::to_string);

        let bytes = field.bytes().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(create_safe_error_response(
                    "invalid_multipart",
                    "Failed to read form field",
                    Some(&e.to_string()),
                )),
            )
                .into_response()
        })?;

        match name.as_str() {
            "probes" => {
                if bytes.len() > MAX_PROBE_FIELD_SIZE {
                    return Err(input_error(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "file_too_large",
                        "Probe table exceeds size limit",
                    ));
                }
                let validated = validate_upload(filename.as_deref(), &bytes).map_err(|e| {
                    input_error(
                        StatusCode::BAD_REQUEST,
                        validation_error_type(&e),
                        &e.to_string(),
                    )
                })?;
                form.probes_filename = validated;
                form.probes = Some(String::from_utf8_lossy(&bytes).into_owned());
            }
            "target" => {
                if bytes.len() > MAX_TARGET_FIELD_SIZE {
                    return Err(input_error(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        "target_too_large",
                        "Target sequence exceeds size limit",
                    ));
                }
                let text = String::from_utf8(bytes.to_vec()).map_err(|_| {
                    input_error(
                        StatusCode::BAD_REQUEST,
                        "invalid_target",
                        "Target sequence must be UTF-8 text",
                    )
                })?;
                form.target = Some(text);
            }
            "strands" => {
                let text = String::from_utf8_lossy(&bytes);
                form.strands = StrandSelection::parse(&text).ok_or_else(|| {
                    input_error(
                        StatusCode::BAD_REQUEST,
                        "invalid_strands",
                        "strands must be one of: both, forward, reverse_complement",
                    )
                })?;
            }
            _ => debug!("Ignoring unknown form field '{name}'"),
        }
    }

    Ok(form)
}

/// API endpoint returning reverse complements
async fn reverse_complement_handler(Json(request): Json<ReverseComplementRequest>) -> Response {
    if request.sequences.len() > MAX_REVCOMP_SEQUENCES {
        return input_error(
            StatusCode::BAD_REQUEST,
            "too_many_sequences",
            &format!("At most {MAX_REVCOMP_SEQUENCES} sequences per request"),
        );
    }

    let mut results = Vec::with_capacity(request.sequences.len());
    for raw in &request.sequences {
        let rc = normalize(raw).and_then(|seq| reverse_complement(&seq).map(|rc| (seq, rc)));
        match rc {
            Ok((seq, rc)) => results.push(serde_json::json!({
                "sequence": seq,
                "reverse_complement": rc,
            })),
            Err(e) => {
                return input_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_sequence",
                    &format!("'{raw}': {e}"),
                )
            }
        }
    }

    Json(serde_json::json!({ "results": results })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("name\tsequence\np\tACGT\n"), b'\t');
        assert_eq!(sniff_delimiter("# comment, here\np,ACGT\n"), b',');
        assert_eq!(sniff_delimiter("p,AC\tGT\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_run_search_requires_inputs() {
        let form = SearchForm {
            target: Some("ACGT".to_string()),
            ..SearchForm::default()
        };
        let response = run_search(&form, Instant::now()).unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_run_search_demo() {
        let form = SearchForm {
            probes: Some("Probe_5to3,GCGT\nProbe_3to5,ACGC\nProbe_NoMatch,TTTT\n".to_string()),
            target: Some("ATGCGT".to_string()),
            ..SearchForm::default()
        };
        let body = run_search(&form, Instant::now()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["summary"]["total_matches"], 2);
        assert_eq!(json["matches"][1]["orientation"], "reverse_complement");
    }

    #[test]
    fn test_run_search_too_many_matches() {
        let form = SearchForm {
            probes: Some("poly_a,A\n".to_string()),
            target: Some("A".repeat(MAX_MATCHES + 1)),
            ..SearchForm::default()
        };
        let response = run_search(&form, Instant::now()).unwrap_err();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_run_search_at_match_limit() {
        let form = SearchForm {
            probes: Some("poly_a,A\n".to_string()),
            target: Some("A".repeat(MAX_MATCHES)),
            ..SearchForm::default()
        };
        let body = run_search(&form, Instant::now()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["summary"]["total_matches"], MAX_MATCHES);
    }
}

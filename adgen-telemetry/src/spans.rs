//! Span helpers for the pipeline's recurring operations.

use tracing::Span;

/// Span covering one ad-generation session.
///
/// # Example
/// ```
/// use adgen_telemetry::session_span;
/// let span = session_span("3f1c", 42);
/// let _enter = span.enter();
/// ```
pub fn session_span(session_id: &str, company_id: i64) -> Span {
    tracing::info_span!(
        "adgen.session",
        session.id = session_id,
        company.id = company_id,
        otel.kind = "internal"
    )
}

/// Span for one stage (`render`, `critique`, `revise`, ...) of one refinement
/// iteration.
pub fn stage_span(stage: &'static str, iteration: usize) -> Span {
    tracing::info_span!("refinement.stage", stage, iteration, otel.kind = "internal")
}

/// Span for a chat or image model call.
///
/// # Example
/// ```
/// use adgen_telemetry::model_call_span;
/// let span = model_call_span("gpt-4.1");
/// let _enter = span.enter();
/// ```
pub fn model_call_span(model_name: &str) -> Span {
    tracing::info_span!("model.call", model.name = model_name, otel.kind = "client")
}

/// Span for a call to an external HTTP service. `http.status` is recorded
/// once the response arrives.
pub fn http_call_span(service: &'static str, operation: &'static str) -> Span {
    tracing::info_span!(
        "http.call",
        service,
        operation,
        http.status = tracing::field::Empty,
        otel.kind = "client"
    )
}

/// Record the response status on the current [`http_call_span`].
pub fn record_http_status(status: u16) {
    Span::current().record("http.status", status);
}

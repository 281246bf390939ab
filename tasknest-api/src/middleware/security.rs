/// Security headers middleware
///
/// Adds security-related HTTP headers to every response:
///
/// - `X-Content-Type-Options: nosniff` - Prevents MIME type sniffing
/// - `X-Frame-Options: DENY` - Prevents clickjacking
/// - `Referrer-Policy: strict-origin-when-cross-origin`
/// - `Strict-Transport-Security` - Forces HTTPS (production only)

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

async fn apply_security_headers(enable_hsts: bool, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    // HSTS only makes sense behind HTTPS
    if enable_hsts {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}

/// Creates a security-headers middleware closure for
/// `axum::middleware::from_fn`
///
/// # Arguments
///
/// * `enable_hsts` - Whether to add the HSTS header (production with HTTPS)
pub fn security_headers(
    enable_hsts: bool,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
       + Clone {
    move |req, next| Box::pin(apply_security_headers(enable_hsts, req, next))
}

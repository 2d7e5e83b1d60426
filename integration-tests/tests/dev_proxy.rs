use integration_tests::harness::TestServer;
use integration_tests::harness::server::{CDN_BODY, SESSION_COOKIE_NAME, SHARED_SECRET};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use tracing::Level;

const IMAGE: &str = "/room-media/abc/my-image.png";

#[test]
fn unguarded_path_is_forwarded_to_cdn() {
    let srv = TestServer::start();

    let res = srv.get("/static/logo.svg").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().unwrap(), CDN_BODY);
    assert!(srv.authz.requests().is_empty());

    let forwarded = srv.cdn.requests();
    assert_eq!(forwarded.len(), 1);
    assert_eq!(forwarded[0].target, "/dev-cdn/static/logo.svg");
    assert_eq!(
        forwarded[0].header("host"),
        Some(format!("127.0.0.1:{}", srv.cdn.port()).as_str())
    );
}

#[test]
fn forwarded_responses_allow_any_origin() {
    let srv = TestServer::start();

    let res = srv.get("/static/logo.svg").send().unwrap();

    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[test]
fn missing_session_redirects_to_login() {
    let srv = TestServer::start();

    let res = srv.get(IMAGE).send().unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    let location = res
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();

    let own_url = srv.url(IMAGE);
    let encoded = own_url.replace(':', "%3A").replace('/', "%2F");
    assert_eq!(
        location,
        format!("{}/login?redirect={encoded}", srv.authz.base_url())
    );

    assert!(srv.authz.requests().is_empty());
    assert!(srv.cdn.requests().is_empty());
}

#[test]
fn authorized_request_reaches_cdn() {
    let srv = TestServer::start();

    let res = srv.get_with_session(IMAGE, "s%3Atoken").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().unwrap(), CDN_BODY);

    let calls = srv.authz.requests();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "GET");
    assert_eq!(
        calls[0].target,
        "/api/v1/rooms/abc/authorize-resources-access"
    );
    assert_eq!(
        calls[0].header("cookie"),
        Some(format!("{SESSION_COOKIE_NAME}=s%3Atoken").as_str())
    );
    assert_eq!(calls[0].header("x-edge-secret"), Some(SHARED_SECRET));
    assert_eq!(calls[0].header("accept"), Some("application/json"));

    let forwarded = srv.cdn.requests();
    assert_eq!(forwarded.len(), 1);
    assert_eq!(forwarded[0].target, "/dev-cdn/room-media/abc/my-image.png");
}

#[test]
fn document_input_media_uses_document_input_endpoint() {
    let srv = TestServer::start();

    let res = srv
        .get_with_session("/document-input-media/r1/d1/scan.pdf", "token")
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        srv.authz.requests()[0].target,
        "/api/v1/doc-inputs/d1/authorize-resources-access"
    );
}

#[test]
fn media_trash_uses_media_trash_endpoint() {
    let srv = TestServer::start();

    let res = srv
        .get_with_session("/media-trash/old.png", "token")
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        srv.authz.requests()[0].target,
        "/api/v1/media-trash/authorize-resources-access"
    );
}

#[test]
fn rejected_session_redirects_to_login() {
    let srv = TestServer::start();
    srv.authz.respond_with(401);

    let res = srv.get_with_session(IMAGE, "expired").send().unwrap();

    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(srv.cdn.requests().is_empty());
}

#[test]
fn denied_access_is_forbidden() {
    let srv = TestServer::start();
    srv.authz.respond_with(403);

    let res = srv.get_with_session(IMAGE, "token").send().unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert_eq!(res.text().unwrap(), "Forbidden");
    assert!(srv.cdn.requests().is_empty());
}

#[test]
fn unexpected_authorization_status_is_internal_error() {
    let srv = TestServer::start();
    srv.authz.respond_with(502);

    let res = srv.get_with_session(IMAGE, "token").send().unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.text().unwrap(), "Internal Server Error");

    let logged = srv.events().into_iter().any(|e| {
        e.level == Level::WARN
            && e.field("message") == Some("unexpected authorization status")
            && e.field("status") == Some("502")
    });
    assert!(logged, "expected a warning about the unexpected status");
}

#[test]
fn non_read_method_on_protected_path_is_internal_error() {
    let srv = TestServer::start();

    let res = srv
        .post(IMAGE)
        .header("cookie", format!("{SESSION_COOKIE_NAME}=token"))
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(srv.authz.requests().is_empty());
}

#[test]
fn head_request_gets_headers_only() {
    let srv = TestServer::start();
    srv.authz.respond_with(403);

    let res = srv
        .head(IMAGE)
        .header("cookie", format!("{SESSION_COOKIE_NAME}=token"))
        .send()
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.text().unwrap(), "");
}

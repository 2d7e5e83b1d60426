use crate::harness::upstream::StubUpstream;
use crate::harness::{CapturedEvent, init_test_tracing};
use mediagate_core::conf::{DevProxyConfig, GatekeeperConfig};
use mediagate_core::server::build_pingora_server;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::redirect::Policy;
use std::collections::HashMap;
use std::net::TcpStream;
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

pub const SESSION_COOKIE_NAME: &str = "SESSION_ID";
pub const SHARED_SECRET: &str = "integration-secret";
pub const CDN_BODY: &str = "media bytes";

/// Handle to a running dev proxy, its stub website API and its stub CDN.
pub struct TestServer {
    base_url: String,
    client: Client,
    pub authz: StubUpstream,
    pub cdn: StubUpstream,
}

impl TestServer {
    /// Start a dev proxy wired to fresh stubs. The authorization stub answers 200 until told
    /// otherwise.
    ///
    /// Ports are allocated dynamically, so tests can run in parallel.
    pub fn start() -> Self {
        // Initialize tracing (this must happen first).
        init_test_tracing(events());

        let authz = StubUpstream::start("{}");
        let cdn = StubUpstream::start(CDN_BODY);

        let listen_port = free_port();

        let vars = HashMap::from([
            ("WEBSITE_BASE_URL", authz.base_url()),
            ("SESSION_COOKIE_NAME", SESSION_COOKIE_NAME.to_string()),
            ("EDGE_SHARED_SECRET", SHARED_SECRET.to_string()),
            ("AUTHORIZATION_TIMEOUT_MS", "2000".to_string()),
            ("PORT", listen_port.to_string()),
            ("CDN_BASE_URL", format!("{}/dev-cdn", cdn.base_url())),
        ]);
        let lookup = |name: &str| vars.get(name).cloned();

        let gatekeeper = GatekeeperConfig::from_lookup(&lookup).expect("invalid gatekeeper config");
        let proxy = DevProxyConfig::from_lookup(&lookup).expect("invalid dev proxy config");

        let server = build_pingora_server(&gatekeeper, proxy).expect("failed to build dev proxy");

        // Run server in background thread
        thread::spawn(move || {
            server.run_forever();
        });

        let base_url = format!("http://127.0.0.1:{listen_port}");

        // Wait for server to accept connections
        wait_for_server(&base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .redirect(Policy::none())
            .build()
            .expect("failed to build client");

        Self {
            base_url,
            client,
            authz,
            cdn,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn head(&self, path: &str) -> RequestBuilder {
        self.client.head(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    /// GET carrying the session cookie.
    pub fn get_with_session(&self, path: &str, token: &str) -> RequestBuilder {
        self.get(path)
            .header("cookie", format!("{SESSION_COOKIE_NAME}={token}"))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Events captured so far in this test binary.
    pub fn events(&self) -> Vec<CapturedEvent> {
        events().lock().unwrap().clone()
    }
}

/// Poll until the server responds (or panic).
fn wait_for_server(listen_addr: &str) {
    let addr = listen_addr.strip_prefix("http://").unwrap_or(listen_addr);

    let deadline = Instant::now() + Duration::from_secs(2);

    loop {
        match TcpStream::connect(addr) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start at {}", listen_addr);
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

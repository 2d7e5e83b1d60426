use crate::conf::DevProxyConfig;
use crate::ctx::{Decision, EdgeResponse, ViewerRequest};
use crate::handler::RequestHandler;
use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, header};
use pingora::prelude::*;
use pingora_http::{RequestHeader, ResponseHeader};

/// Per-request state of the dev proxy.
#[derive(Debug, Default)]
pub struct ProxyCtx {
    /// The path matched a protected pattern and went through the handler.
    pub guarded: bool,
    /// Status of the synthetic response, when the handler produced one.
    pub synthetic_status: Option<u16>,
}

/// Local stand-in for the CDN edge: runs the handler, then either answers or forwards to the CDN.
pub struct DevProxy {
    pub handler: RequestHandler,
    pub proxy: DevProxyConfig,
}

#[async_trait]
impl ProxyHttp for DevProxy {
    type CTX = ProxyCtx;

    fn new_ctx(&self) -> Self::CTX {
        ProxyCtx::default()
    }

    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> Result<Box<HttpPeer>> {
        let (host, port) = self.proxy.cdn_host_port();
        let peer = HttpPeer::new((host.as_str(), port), self.proxy.cdn_uses_tls(), host.clone());
        Ok(Box::new(peer))
    }

    /// ACCEPT --> CLASSIFY --> DECIDE --> (RESPOND | PROXY)
    async fn request_filter(&self, session: &mut Session, ctx: &mut Self::CTX) -> Result<bool> {
        let req = session.req_header();

        if !self.handler.guards_path(req.uri.path()) {
            return Ok(false);
        }

        ctx.guarded = true;
        let viewer_request = ViewerRequest::from_http(&req.method, &req.uri, &req.headers);
        let is_head = req.method == Method::HEAD;

        match self.handler.handle(&viewer_request).await {
            Decision::Allow => Ok(false),

            Decision::Respond(resp) => {
                ctx.synthetic_status = Some(resp.status_code().as_u16());
                respond_with_edge_response(session, &resp, is_head).await?;
                Ok(true)
            }
        }
    }

    /// Point the forwarded request at the CDN bucket.
    async fn upstream_request_filter(
        &self,
        _session: &mut Session,
        upstream: &mut RequestHeader,
        _ctx: &mut Self::CTX,
    ) -> Result<()> {
        let path_and_query = upstream
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let uri: http::Uri = self
            .proxy
            .cdn_path(path_and_query)
            .parse()
            .map_err(|_| Error::new(Custom("invalid CDN request path")))?;

        upstream.set_uri(uri);
        upstream.insert_header(header::HOST, self.proxy.cdn_authority())?;

        Ok(())
    }

    async fn response_filter(
        &self,
        _session: &mut Session,
        upstream: &mut ResponseHeader,
        _ctx: &mut Self::CTX,
    ) -> Result<()> {
        upstream.insert_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")?;
        Ok(())
    }

    async fn logging(&self, session: &mut Session, e: Option<&Error>, ctx: &mut Self::CTX)
    where
        Self::CTX: Send + Sync,
    {
        let status = session
            .response_written()
            .map(|r| r.status.as_u16())
            .unwrap_or_default();

        tracing::info!(
            method = %session.req_header().method,
            path = session.req_header().uri.path(),
            status,
            guarded = ctx.guarded,
            synthetic = ctx.synthetic_status.is_some(),
            error = e.map(|e| e.to_string()),
            "request completed"
        );
    }
}

/// Write a synthetic edge response as a plain HTTP response.
///
/// The status description doubles as the body.
async fn respond_with_edge_response(
    session: &mut Session,
    resp: &EdgeResponse,
    is_head: bool,
) -> Result<()> {
    let body = Bytes::from(resp.status_description.clone());

    let mut resp_header = ResponseHeader::build(resp.status_code(), None)?;
    if let Some(headers) = &resp.headers {
        for entry in headers.iter() {
            resp_header.append_header(entry.key.clone(), entry.value.as_str())?;
        }
    }
    resp_header.insert_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")?;
    resp_header.insert_header(header::CONTENT_TYPE, "text/plain; charset=utf-8")?;
    resp_header.insert_header(header::CONTENT_LENGTH, body.len().to_string())?;

    session
        .write_response_header(Box::new(resp_header), is_head)
        .await?;

    if !is_head {
        session.write_response_body(Some(body), true).await?;
    }

    Ok(())
}

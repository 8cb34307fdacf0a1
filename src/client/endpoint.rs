//! Endpoint catalogue and path template rendering.

use reqwest::Method;

/// An Intervene API endpoint: an HTTP method plus a path template relative to
/// the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Identify,
    Execute,
    JobStatus,
    DestroyConnection,
    HmacDigest,
}

impl Endpoint {
    pub fn method(self) -> Method {
        match self {
            Endpoint::Identify | Endpoint::Execute | Endpoint::HmacDigest => Method::POST,
            Endpoint::JobStatus => Method::GET,
            Endpoint::DestroyConnection => Method::DELETE,
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            Endpoint::Identify => "v1/parser/identify",
            Endpoint::Execute => "v1/parser/execute",
            Endpoint::JobStatus => "v1/parser/{job_id}/status",
            Endpoint::DestroyConnection => "v1/integrations/{provider}/connections/{user_id}",
            Endpoint::HmacDigest => {
                "v1/integrations/{provider}/connections/{user_id}/hmac_digest"
            }
        }
    }

    /// Render this endpoint's path with the given placeholder values.
    pub fn path(self, params: &[(&str, &str)]) -> String {
        render_path(self.template(), params)
    }
}

/// Substitute `{name}` placeholders in `template`.
///
/// Values are inserted verbatim, with no percent-encoding. Rendering is a
/// single left-to-right pass, so text coming from a value is never treated
/// as a placeholder. Placeholders without a value are left as-is.
pub fn render_path(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match params.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                // Unterminated brace: copy the remainder literally.
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

//! Connection details shown once the pod is up.

use crate::domain::pod::{PodId, proxy_url};
use crate::domain::readiness::Endpoints;

/// Internal port of the TurboVNC server.
pub const TURBOVNC_PORT: u16 = 5901;
/// Internal port of the web file browser.
pub const FILE_BROWSER_PORT: u16 = 8080;
pub const SSH_PORT: u16 = 22;

/// How to reach a running pod.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Web desktop behind the HTTPS proxy; always known from the pod id.
    pub desktop_url: String,
    pub turbovnc: Option<String>,
    pub file_browser: Option<String>,
    pub ssh: Option<String>,
}

impl ConnectionInfo {
    /// Derive the connection details. Direct endpoints are listed only when
    /// both the public address and the port mapping were observed.
    #[must_use]
    pub fn new(pod: &PodId, desktop_port: u16, endpoints: &Endpoints) -> Self {
        let direct = |internal: u16| -> Option<(String, u16)> {
            let ip = endpoints.public_ip.clone()?;
            let port = endpoints.tcp_port(internal)?;
            Some((ip, port))
        };
        Self {
            desktop_url: proxy_url(pod, desktop_port),
            turbovnc: direct(TURBOVNC_PORT).map(|(ip, port)| format!("{ip}:{port}")),
            file_browser: direct(FILE_BROWSER_PORT).map(|(ip, port)| format!("http://{ip}:{port}")),
            ssh: direct(SSH_PORT).map(|(ip, port)| format!("ssh root@{ip} -p {port}")),
        }
    }

    /// Labelled lines in display order.
    #[must_use]
    pub fn lines(&self) -> Vec<(&'static str, &str)> {
        let mut lines = vec![("noVNC (web)", self.desktop_url.as_str())];
        if let Some(v) = &self.turbovnc {
            lines.push(("TurboVNC", v));
        }
        if let Some(v) = &self.file_browser {
            lines.push(("File Browser", v));
        }
        if let Some(v) = &self.ssh {
            lines.push(("SSH", v));
        }
        lines
    }
}

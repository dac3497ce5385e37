//! Delivery of frames to the host application.

use tokio::sync::mpsc;
use tracing::warn;

/// Receiver of layout and state frames.
pub trait Host {
    fn notify(&mut self, frame: &str);
}

/// Forwards frames to an async consumer.
impl Host for mpsc::UnboundedSender<String> {
    fn notify(&mut self, frame: &str) {
        if let Err(e) = self.send(frame.to_string()) {
            warn!("Host channel closed, dropping frame: {}", e);
        }
    }
}

/// Host endpoint that may be missing; a missing host swallows every frame.
#[derive(Default)]
pub struct HostLink {
    host: Option<Box<dyn Host>>,
}

impl HostLink {
    pub fn new(host: Option<Box<dyn Host>>) -> Self {
        Self { host }
    }

    pub fn connected(host: impl Host + 'static) -> Self {
        Self {
            host: Some(Box::new(host)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.host.is_some()
    }

    pub fn notify(&mut self, frame: &str) {
        if let Some(host) = self.host.as_mut() {
            host.notify(frame);
        }
    }
}

impl std::fmt::Debug for HostLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostLink")
            .field("connected", &self.is_connected())
            .finish()
    }
}

//! Test doubles for the transport and webhook seams.

pub mod mocks;

pub use mocks::{MockConfig, MockResponse, MockTransport, RecordedRequest, RecordingWebhookHandler};

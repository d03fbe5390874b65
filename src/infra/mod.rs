//! Infrastructure layer implementations.

pub mod pretium;

pub use pretium::{
    CallContext, CancelHandle, PretiumClient, PretiumConfig, ReqwestTransport, parse_webhook,
    parse_webhook_slice,
};

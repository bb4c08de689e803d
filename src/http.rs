//! HTTP client helper with native-tls support.
//!
//! native-tls uses the system TLS library (Schannel on Windows, OpenSSL on
//! Linux, Security.framework on macOS) with the platform root certificates.

use std::time::Duration;

use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};

/// Create an HTTP agent with native-tls and a global request timeout.
pub fn agent(timeout: Duration) -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder()
        .tls_config(tls_config)
        .timeout_global(Some(timeout))
        .build()
        .into()
}

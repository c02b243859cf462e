//! Kraken REST API endpoint constants and classification.

use reqwest::Method;

/// Base URL for the Kraken REST API.
pub const KRAKEN_BASE_URL: &str = "https://api.kraken.com";

/// Path prefix of endpoints that need no authentication.
pub const PUBLIC_PATH: &str = "/0/public/";

/// Path prefix of endpoints that need a signed request.
pub const PRIVATE_PATH: &str = "/0/private/";

/// Whether an endpoint is public or private.
///
/// This is the only thing deciding whether credentials, a nonce and a signature
/// take part in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// Unauthenticated GET under `/0/public/`
    Public,
    /// Signed POST under `/0/private/`
    Private,
}

impl EndpointKind {
    /// The path prefix for this kind of endpoint.
    pub fn prefix(self) -> &'static str {
        match self {
            EndpointKind::Public => PUBLIC_PATH,
            EndpointKind::Private => PRIVATE_PATH,
        }
    }

    /// The HTTP method used for this kind of endpoint.
    pub fn http_method(self) -> Method {
        match self {
            EndpointKind::Public => Method::GET,
            EndpointKind::Private => Method::POST,
        }
    }

    pub fn requires_auth(self) -> bool {
        self == EndpointKind::Private
    }

    /// Build the URL path for an API method, e.g. `Balance` -> `/0/private/Balance`.
    pub fn path(self, method_name: &str) -> String {
        format!("{}{}", self.prefix(), method_name)
    }

    /// Classify a full URL path by its prefix.
    pub fn classify(url_path: &str) -> Option<Self> {
        if url_path.starts_with(PRIVATE_PATH) {
            Some(EndpointKind::Private)
        } else if url_path.starts_with(PUBLIC_PATH) {
            Some(EndpointKind::Public)
        } else {
            None
        }
    }
}

impl std::fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointKind::Public => write!(f, "public"),
            EndpointKind::Private => write!(f, "private"),
        }
    }
}

/// Public method names (no authentication required).
pub mod public {
    /// Get server time.
    pub const TIME: &str = "Time";
    /// Get system status.
    pub const SYSTEM_STATUS: &str = "SystemStatus";
    /// Get asset info.
    pub const ASSETS: &str = "Assets";
    /// Get tradable asset pairs.
    pub const ASSET_PAIRS: &str = "AssetPairs";
    /// Get ticker information.
    pub const TICKER: &str = "Ticker";
}

/// Private method names (authentication required).
pub mod private {
    /// Get account balance.
    pub const BALANCE: &str = "Balance";
    /// Get trade balance.
    pub const TRADE_BALANCE: &str = "TradeBalance";
    /// Get open orders.
    pub const OPEN_ORDERS: &str = "OpenOrders";
    /// Get closed orders.
    pub const CLOSED_ORDERS: &str = "ClosedOrders";
    /// Get WebSocket authentication token.
    pub const GET_WEBSOCKETS_TOKEN: &str = "GetWebSocketsToken";
}

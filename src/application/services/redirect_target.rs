//! Redirect target composition.

use crate::domain::entities::LinkRecord;
use crate::utils::query::{append_param, query_value, with_query};

/// Query flag that switches a request from redirect to QR rendering.
pub const QR_FLAG: &str = "showQR";

/// Attribution marker appended when request queries are not propagated.
pub const ATTRIBUTION_KEY: &str = "utm_source";
pub const ATTRIBUTION_VALUE: &str = "qr";

/// Returns `true` when the request asks for a QR image (`showQR=true`).
pub fn wants_qr(query: &[(String, String)]) -> bool {
    query_value(query, QR_FLAG) == Some("true")
}

/// Builds the `Location` for a redirect.
///
/// - `propagate`: request parameters are merged into the link URL.
/// - otherwise: the link URL plus `utm_source=qr`; request parameters are
///   dropped.
pub fn redirect_target(link: &LinkRecord, query: &[(String, String)], propagate: bool) -> String {
    if propagate {
        with_query(&link.url, query)
    } else {
        append_param(&link.url, ATTRIBUTION_KEY, ATTRIBUTION_VALUE)
    }
}

/// Builds the URL encoded into a QR image.
///
/// Same propagation rule as [`redirect_target`], except that no marker is
/// added. The request query is forwarded as received, [`QR_FLAG`] included.
pub fn qr_target(link: &LinkRecord, query: &[(String, String)], propagate: bool) -> String {
    if propagate {
        with_query(&link.url, query)
    } else {
        link.url.clone()
    }
}

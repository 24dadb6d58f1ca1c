use std::cell::Cell;
use std::rc::Rc;

use contracts::domain::a003_order::{OrderLinkResponse, OrderRequest};
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use web_sys::AbortController;

use crate::shared::error::StorefrontError;

/// Request a messaging link for the order.
///
/// The call is aborted after `timeout_ms`; an abort caused by the timer is
/// reported as `Timeout`, distinct from other transport failures. No retry.
pub async fn request_order_link(
    url: &str,
    order: &OrderRequest,
    timeout_ms: u32,
) -> Result<OrderLinkResponse, StorefrontError> {
    let controller =
        AbortController::new().map_err(|e| StorefrontError::Network(format!("{:?}", e)))?;
    let signal = controller.signal();

    let timed_out = Rc::new(Cell::new(false));
    // Таймер отменяется при drop, поэтому держим его до конца запроса
    let _timer = {
        let timed_out = timed_out.clone();
        Timeout::new(timeout_ms, move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    let classify = |e: gloo_net::Error| {
        if timed_out.get() {
            StorefrontError::Timeout(timeout_ms)
        } else {
            StorefrontError::Network(e.to_string())
        }
    };

    let response = Request::post(url)
        .abort_signal(Some(&signal))
        .json(order)
        .map_err(|e| StorefrontError::Network(format!("failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(&classify)?;

    if !response.ok() {
        return Err(StorefrontError::Http(response.status()));
    }

    let body = response.json::<OrderLinkResponse>().await.map_err(&classify)?;

    if body.link().is_none() {
        return Err(StorefrontError::MissingOrderLink);
    }
    Ok(body)
}

//! 变动观察
//!
//! 可复用的"观察直到谓词成立"挂起原语：先探测一次，之后每次
//! 页面变动后重新探测，谓词产出值时结束；取消令牌可随时中止

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::engine::driver::DomDriver;
use crate::error::AppResult;

/// 反复探测直到谓词产出值或被取消
///
/// 被取消时返回 None
pub async fn observe_until<D, T, F, Fut>(
    driver: &D,
    cancel: &CancellationToken,
    mut probe: F,
) -> AppResult<Option<T>>
where
    D: DomDriver + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<Option<T>>>,
{
    loop {
        if let Some(value) = probe().await? {
            return Ok(Some(value));
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(None),
            result = driver.wait_for_mutation() => result?,
        }
    }
}

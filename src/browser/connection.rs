use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::{AppError, AppResult, BrowserError};

/// 连接到已开启调试端口的浏览器并定位 Duolingo 标签页
///
/// 逐个检查已打开的标签页，找到 URL 属于 duolingo.com 的页面；
/// 一个都没有时新建页面并导航到 target_url
pub async fn connect_to_duolingo_page(port: u16, target_url: &str) -> AppResult<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        AppError::Browser(BrowserError::ConnectionFailed { port, source: e })
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let pages = browser
        .pages()
        .await
        .map_err(|e| AppError::Browser(BrowserError::PageLookupFailed(e)))?;
    debug!("获取到 {} 个页面", pages.len());

    // 查找已经打开的 Duolingo 标签页
    for p in pages.iter() {
        if let Ok(Some(url)) = p.url().await {
            debug!("检查页面: {}", url);
            if url.contains("duolingo.com") {
                info!("✓ 找到 Duolingo 标签页: {}", url);
                return Ok((browser, p.clone()));
            }
        }
    }

    // 没有找到，创建新页面并导航
    debug!("未找到 Duolingo 标签页，创建新页面并导航到: {}", target_url);
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| AppError::Browser(BrowserError::PageCreationFailed(e)))?;
    page.goto(target_url).await.map_err(|e| {
        error!("导航到 {} 失败: {}", target_url, e);
        AppError::Browser(BrowserError::NavigationFailed {
            url: target_url.to_string(),
            source: e,
        })
    })?;
    info!("已导航到: {}", target_url);

    Ok((browser, page))
}

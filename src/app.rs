//! 应用编排层
//!
//! 连接浏览器、监视页面导航，进入课程页面时创建并运行推进引擎；
//! 一次只运行一个课程会话

use chromiumoxide::{Browser, Page};
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::browser;
use crate::config::Config;
use crate::engine::{selectors, DomDriver, EngineSettings, LessonCompleter};
use crate::error::{AppError, AppResult, BrowserError};
use crate::infrastructure::{CdpDomDriver, JsExecutor};

/// 判定为课程页面的 URL 前缀
const LESSON_PAGES: [&str; 4] = [
    "https://www.duolingo.com/lesson",
    "https://www.duolingo.com/practice",
    "https://www.duolingo.com/skill",
    "https://www.duolingo.com/challenge",
];

/// URL 轮询间隔
const URL_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    page: Page,
}

impl App {
    /// 初始化应用：连接浏览器并定位 Duolingo 标签页
    pub async fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);

        let (browser, page) =
            browser::connect_to_duolingo_page(config.browser_debug_port, &config.target_url)
                .await?;

        Ok(Self {
            config,
            _browser: browser,
            page,
        })
    }

    /// 监视页面导航，进入课程页面时运行推进引擎
    pub async fn run(&self) -> AppResult<()> {
        let settings = EngineSettings::from_config(&self.config);
        let cancel = CancellationToken::new();

        // Ctrl-C 时取消所有挂起的等待
        {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });
        }

        let mut previous_url = String::new();
        let mut lesson_runs = 0usize;

        loop {
            if cancel.is_cancelled() {
                info!("收到退出信号，停止运行 👋");
                return Ok(());
            }

            let url = self.current_url().await?;

            if url != previous_url {
                debug!("页面切换到: {} 🕯️", url);
                previous_url = url.clone();

                if is_lesson_page(&url) {
                    lesson_runs += 1;
                    info!("📖 检测到课程页面，开始第 {} 次自动完成", lesson_runs);

                    let driver = CdpDomDriver::new(JsExecutor::new(self.page.clone()));
                    let mut completer =
                        LessonCompleter::new(driver, settings.clone(), cancel.child_token());
                    match completer.run().await {
                        Ok(summary) => {
                            info!("🎉 本次课程完成 {} 道题", summary.solved);
                        }
                        Err(e) => {
                            warn!("❌ 课程运行出错: {}", e);
                        }
                    }

                    // 等离开课程页面后再继续监视，避免对同一节课重复启动
                    self.wait_until_url_changes(&url, &cancel).await?;
                    previous_url.clear();
                    continue;
                }

                if self.config.auto_practice {
                    self.try_start_practice().await?;
                }
            }

            sleep(URL_POLL_INTERVAL).await;
        }
    }

    /// 读取当前标签页的 URL
    async fn current_url(&self) -> AppResult<String> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| AppError::Browser(BrowserError::PageLookupFailed(e)))?;
        Ok(url.unwrap_or_default())
    }

    /// 等待 URL 变化（或收到退出信号）
    async fn wait_until_url_changes(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> AppResult<()> {
        loop {
            if cancel.is_cancelled() {
                return Ok(());
            }
            if self.current_url().await? != url {
                return Ok(());
            }
            sleep(URL_POLL_INTERVAL).await;
        }
    }

    /// 自动开启练习模式
    async fn try_start_practice(&self) -> AppResult<()> {
        let driver = CdpDomDriver::new(JsExecutor::new(self.page.clone()));
        if !driver.element_exists(selectors::GLOBAL_PRACTICE).await? {
            debug!("没有找到练习入口按钮 🤔");
            return Ok(());
        }

        // 等几秒再点，不要一进页面就瞬间开课
        let wait_ms = if self.config.human_feel {
            rand::thread_rng().gen_range(0..10_000)
        } else {
            3_000
        };
        sleep(Duration::from_millis(wait_ms)).await;

        if driver.click_nth(selectors::GLOBAL_PRACTICE, 0).await? {
            info!("🚀 已自动开启练习模式");
        }
        Ok(())
    }
}

/// 判断 URL 是否属于课程页面
fn is_lesson_page(url: &str) -> bool {
    LESSON_PAGES.iter().any(|p| url.starts_with(p))
}

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Duolingo 课程自动完成");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!(
        "⚙️ 拟人模式: {} / 自动继续: {} / 自动练习: {}",
        config.human_feel, config.autoskip, config.auto_practice
    );
    info!("{}", "=".repeat(60));
}

//! 继续控制器
//!
//! 统一处理继续/检查按钮：检查按钮受一次性许可保护，同一道题
//! 最多按一次；普通继续按钮受 autoskip 控制

use tracing::debug;

use crate::engine::driver::DomDriver;
use crate::engine::selectors;
use crate::engine::session::EngineSession;
use crate::engine::settings::EngineSettings;
use crate::engine::timing::{self, Pace};
use crate::error::{AppResult, EngineError};

/// 按下继续/检查按钮，返回是否实际点击
///
/// 按钮不在页面上时返回 NoContinueButton，课程临近结束时
/// 这是正常情况；许可已消耗或 autoskip 未开启时返回 Ok(false)
pub async fn press_continue<D: DomDriver + ?Sized>(
    driver: &D,
    settings: &EngineSettings,
    session: &mut EngineSession,
    is_check: bool,
) -> AppResult<bool> {
    if !driver.element_exists(selectors::PLAYER_NEXT).await? {
        return Err(EngineError::NoContinueButton.into());
    }

    if is_check {
        if !session.check_allowed {
            debug!("检查按钮许可已消耗，跳过 🧩");
            return Ok(false);
        }
    } else if !settings.autoskip {
        debug!("autoskip 未开启，继续按钮留给用户 ⚠️");
        return Ok(false);
    }

    timing::pause(settings, Pace::Continue).await;

    if !driver.click_continue().await? {
        // 停顿期间按钮消失了
        return Err(EngineError::NoContinueButton.into());
    }

    if is_check {
        session.check_allowed = false;
        debug!("已按下检查按钮 🧩");
    } else {
        debug!("已按下继续按钮 ✅");
    }
    Ok(true)
}

//! 节奏策略
//!
//! 根据运行参数和操作类别计算延迟：拟人模式从对应区间均匀采样，
//! 固定速度模式返回常量

use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

use crate::engine::settings::EngineSettings;

/// 操作类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// 开始解题前的思考时间
    Think,
    /// 每个字符之间的输入间隔
    Type,
    /// 离散选择（点词、选选项）之间的间隔
    Choose,
    /// 按继续按钮前的停顿
    Continue,
}

/// 拟人模式 + 自动推进时的思考区间（毫秒）
const THINK_AUTOSKIP_RANGE: (u64, u64) = (800, 2000);
/// 拟人模式下由用户自己阅读题目时的固定思考时间（毫秒）
const THINK_MANUAL_MS: u64 = 500;
/// 拟人模式下按继续按钮前的停顿区间（毫秒）
const CONTINUE_RANGE: (u64, u64) = (500, 800);

/// 计算延迟（随机数生成器可注入）
pub fn delay_with_rng(settings: &EngineSettings, pace: Pace, rng: &mut impl Rng) -> Duration {
    let ms = if settings.human_feel {
        match pace {
            // 自动推进时没有人停下来读题，思考时间要拉长一些
            Pace::Think => {
                if settings.autoskip {
                    sample(rng, THINK_AUTOSKIP_RANGE)
                } else {
                    THINK_MANUAL_MS
                }
            }
            Pace::Type => sample(rng, settings.human_type_speed_range),
            Pace::Choose => sample(rng, settings.human_choose_speed_range),
            Pace::Continue => sample(rng, CONTINUE_RANGE),
        }
    } else {
        match pace {
            Pace::Think | Pace::Continue => settings.robot_speed_ms,
            Pace::Type | Pace::Choose => 0,
        }
    };
    Duration::from_millis(ms)
}

/// 计算延迟
pub fn delay(settings: &EngineSettings, pace: Pace) -> Duration {
    delay_with_rng(settings, pace, &mut rand::thread_rng())
}

/// 按节奏策略暂停当前任务
pub async fn pause(settings: &EngineSettings, pace: Pace) {
    let d = delay(settings, pace);
    if !d.is_zero() {
        sleep(d).await;
    }
}

/// 从 [min, max) 均匀采样，区间为空时返回 min
fn sample(rng: &mut impl Rng, (min, max): (u64, u64)) -> u64 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..max)
    }
}

//! 课程推进循环
//!
//! 显式状态机：等待课程加载 → 空闲 → 解题 → 等待下一题 →
//! (空闲 | 结束)。单任务协作式执行，所有挂起点都是显式的
//! （定时停顿或页面变动等待），上一轮的步骤全部落定之前
//! 不会开始下一轮。

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::engine::continuation;
use crate::engine::driver::DomDriver;
use crate::engine::observe;
use crate::engine::selectors;
use crate::engine::session::EngineSession;
use crate::engine::settings::EngineSettings;
use crate::engine::solver::ChallengeSolver;
use crate::engine::timing::{self, Pace};
use crate::error::{AppError, AppResult, EngineError};

/// 状态机的状态
#[derive(Debug, Clone, PartialEq, Eq)]
enum LoopState {
    /// 等待课程播放器渲染完成
    AwaitingLessonLoad,
    /// 读取当前题目并决定下一步
    Idle,
    /// 执行解题策略
    Solving,
    /// 等待宿主页面切换到下一题
    AwaitingNext { last_id: String },
    /// 终态
    Ended(EndReason),
}

/// 课程运行结束的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// 课程结束或用户离开（读不到题目且继续按钮消失）
    LessonFinished,
    /// 引擎被外部取消
    Cancelled,
}

/// 一次课程运行的统计
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSummary {
    /// 实际执行过解题策略的次数
    pub solved: usize,
    /// 因为已经答对而跳过的次数
    pub skipped: usize,
    /// 结束原因
    pub end_reason: EndReason,
}

/// 课程推进器：驱动一次完整课程的状态机
pub struct LessonCompleter<D: DomDriver> {
    driver: D,
    settings: EngineSettings,
    session: EngineSession,
    cancel: CancellationToken,
    solved: usize,
    skipped: usize,
}

impl<D: DomDriver> LessonCompleter<D> {
    /// 创建新的课程推进器
    pub fn new(driver: D, settings: EngineSettings, cancel: CancellationToken) -> Self {
        Self {
            driver,
            settings,
            session: EngineSession::new(),
            cancel,
            solved: 0,
            skipped: 0,
        }
    }

    /// 当前会话状态
    pub fn session(&self) -> &EngineSession {
        &self.session
    }

    /// 运行状态机直到课程结束或被取消
    pub async fn run(&mut self) -> AppResult<LessonSummary> {
        let mut state = LoopState::AwaitingLessonLoad;
        loop {
            state = match state {
                LoopState::AwaitingLessonLoad => self.await_lesson_load().await?,
                LoopState::Idle => self.next_challenge().await?,
                LoopState::Solving => self.solve_current().await?,
                LoopState::AwaitingNext { last_id } => self.await_next(&last_id).await?,
                LoopState::Ended(reason) => {
                    info!(
                        "🏁 课程运行结束: 完成 {} 道题，跳过 {} 次",
                        self.solved, self.skipped
                    );
                    return Ok(LessonSummary {
                        solved: self.solved,
                        skipped: self.skipped,
                        end_reason: reason,
                    });
                }
            };
        }
    }

    /// 等待课程播放器的锚点元素出现
    async fn await_lesson_load(&self) -> AppResult<LoopState> {
        debug!("等待课程页面加载... ⏳");
        let driver = &self.driver;
        let loaded = observe::observe_until(driver, &self.cancel, || async move {
            Ok(driver
                .element_exists(selectors::LESSON_ROOT)
                .await?
                .then_some(()))
        })
        .await?;
        Ok(match loaded {
            Some(()) => {
                debug!("课程页面已加载 ✓");
                LoopState::Idle
            }
            None => LoopState::Ended(EndReason::Cancelled),
        })
    }

    /// 读取当前题目并决定：解题、跳过，还是清理插页
    async fn next_challenge(&mut self) -> AppResult<LoopState> {
        debug!("--------------------");
        debug!("获取当前题目... 📝");

        let Some(state) = self.driver.read_challenge_state().await? else {
            return self.handle_unavailable().await;
        };

        // 新一轮推进：恢复检查按钮的一次性许可
        self.session.reset_check_guard();

        let challenge = state.current_challenge.clone();

        if let Some(previous_id) = self.session.previous_challenge_id.clone() {
            if challenge.id == previous_id {
                if state.is_completed(&challenge.id) {
                    // 已答对的题还留在屏幕上，不再解，等宿主切换
                    debug!("题目 {} 已经答对，跳过解题 🚫", challenge.id);
                    self.skipped += 1;
                    self.session.current_challenge = None;
                    return Ok(LoopState::AwaitingNext {
                        last_id: challenge.id,
                    });
                }
                // 上次没答对，当作新题重做
                debug!("题目 {} 上次未答对，重新解答 🔁", challenge.id);
            }
        }

        info!("当前题目: {} 🎯", challenge.challenge_type);
        if self.settings.verbose_logging {
            debug!("题目数据: {:?}", challenge);
        }
        self.session.current_challenge = Some(challenge);
        Ok(LoopState::Solving)
    }

    /// 页面上没有可解的题目
    ///
    /// 先清掉遗留状态并等一次变动；跳过按钮还在就继续等；
    /// 都不满足时尝试按继续清掉激励/结算屏幕，按钮也没有
    /// 就认为课程结束
    async fn handle_unavailable(&mut self) -> AppResult<LoopState> {
        debug!("当前没有可解的题目 🚫");

        if self.session.current_challenge.take().is_some() {
            return self.idle_after_mutation().await;
        }

        if self.driver.element_exists(selectors::PLAYER_SKIP).await? {
            return self.idle_after_mutation().await;
        }

        match continuation::press_continue(&self.driver, &self.settings, &mut self.session, false)
            .await
        {
            Ok(true) => {
                debug!("已清除激励/结算屏幕 🚫");
                Ok(LoopState::Idle)
            }
            // autoskip 未开启：按钮留给用户，等页面变动
            Ok(false) => self.idle_after_mutation().await,
            Err(AppError::Engine(EngineError::NoContinueButton)) => {
                debug!("没有继续按钮，课程已结束或用户已离开 ⚠️");
                Ok(LoopState::Ended(EndReason::LessonFinished))
            }
            Err(e) => Err(e),
        }
    }

    /// 执行解题策略并按检查按钮
    async fn solve_current(&mut self) -> AppResult<LoopState> {
        let Some(challenge) = self.session.current_challenge.clone() else {
            warn!("解题状态下没有当前题目，回到空闲 ⚠️");
            return Ok(LoopState::Idle);
        };

        // 思考时间
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Ok(LoopState::Ended(EndReason::Cancelled)),
            _ = timing::pause(&self.settings, Pace::Think) => {}
        }

        let solver = ChallengeSolver::new(&self.driver, &self.settings);
        match solver.solve(&challenge).await {
            Ok(()) => {}
            Err(AppError::Engine(e)) if e.is_recoverable() => {
                // 题目保持原样，下一轮会重新读到同一道题
                warn!("解题失败（{}），等待页面变动后重试 ⚠️", e);
                return self.idle_after_mutation().await;
            }
            Err(e) => return Err(e),
        }

        info!("✓ 完成题目: {} 🎉", challenge.challenge_type);
        self.solved += 1;

        // 只有实际执行过策略的题目才更新 previous_challenge_id
        self.session.previous_challenge_id = Some(challenge.id.clone());
        self.session.current_challenge = None;

        // 固定速度 + 自动推进时多等一拍，给页面反应时间
        if !self.settings.human_feel && self.settings.autoskip {
            timing::pause(&self.settings, Pace::Think).await;
        }

        // 按检查按钮让宿主判分
        match continuation::press_continue(&self.driver, &self.settings, &mut self.session, true)
            .await
        {
            Ok(_) => {}
            Err(AppError::Engine(EngineError::NoContinueButton)) => {
                debug!("检查按钮不存在，可能课程已结束 ⚠️");
            }
            Err(e) => return Err(e),
        }

        Ok(LoopState::AwaitingNext {
            last_id: challenge.id,
        })
    }

    /// 等待宿主页面切换到下一题
    ///
    /// 每次页面变动后重新读取题目状态：id 变了回到空闲，完全读
    /// 不到认为课程结束；变动之后顺手尝试清除激励屏幕
    async fn await_next(&mut self, last_id: &str) -> AppResult<LoopState> {
        debug!("等待下一题... 🕑");
        let mut first_probe = true;
        loop {
            match self.driver.read_challenge_state().await? {
                None => {
                    debug!("读不到题目状态，课程大概已经结束 ⚠️");
                    return Ok(LoopState::Ended(EndReason::LessonFinished));
                }
                Some(state) if state.current_challenge.id != last_id => {
                    debug!("下一题已就绪，继续 🚀");
                    return Ok(LoopState::Idle);
                }
                Some(_) => {}
            }

            // 第一次探测不按按钮：判分动画还没放完
            if !first_probe {
                match continuation::press_continue(
                    &self.driver,
                    &self.settings,
                    &mut self.session,
                    false,
                )
                .await
                {
                    Ok(true) => {
                        debug!("清除了一个激励屏幕 🙄");
                        return Ok(LoopState::Idle);
                    }
                    Ok(false) => {}
                    Err(AppError::Engine(EngineError::NoContinueButton)) => {}
                    Err(e) => return Err(e),
                }
            }
            first_probe = false;

            if !self.wait_for_mutation().await? {
                return Ok(LoopState::Ended(EndReason::Cancelled));
            }
        }
    }

    /// 等一次页面变动再回到空闲状态（被取消时进入终态）
    async fn idle_after_mutation(&self) -> AppResult<LoopState> {
        Ok(if self.wait_for_mutation().await? {
            LoopState::Idle
        } else {
            LoopState::Ended(EndReason::Cancelled)
        })
    }

    /// 可取消的页面变动等待，返回 false 表示已被取消
    async fn wait_for_mutation(&self) -> AppResult<bool> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Ok(false),
            result = self.driver.wait_for_mutation() => {
                result?;
                Ok(true)
            }
        }
    }
}

// ==========================================
// 缺陷分派系统 - 分派引擎
// ==========================================
// 职责: 为每位开发者挑选 高/中/低 各一个最早创建的未分派缺陷
// 输入: 开发者数量 + 缺陷积压（会被修改）
// 输出: 开发者分派列表（按编号顺序）
// 红线: 先整体校验各等级数量, 不足时不做任何修改
// ==========================================

use crate::collections::SequentialList;
use crate::domain::{Bug, BugTree, Bundle, Developer, Severity};
use crate::engine::error::{AssignError, AssignResult};
use tracing::{debug, info, instrument};

// ==========================================
// TierCounts - 各严重度剩余数量
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierCounts {
    /// 一次遍历统计积压中各严重度数量
    pub fn from_backlog(backlog: &BugTree) -> Self {
        let mut counts = Self::default();
        for bug in backlog {
            *counts.slot_mut(bug.severity) += 1;
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    fn slot_mut(&mut self, severity: Severity) -> &mut usize {
        match severity {
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
        }
    }

    /// 最多能组成的完整任务包数量
    pub fn max_bundles(&self) -> usize {
        self.high.min(self.medium).min(self.low)
    }
}

// 单次扫描中各严重度的候选
#[derive(Default)]
struct Candidates<'a> {
    high: Option<&'a Bug>,
    medium: Option<&'a Bug>,
    low: Option<&'a Bug>,
}

impl<'a> Candidates<'a> {
    fn offer(&mut self, bug: &'a Bug) {
        let slot = match bug.severity {
            Severity::High => &mut self.high,
            Severity::Medium => &mut self.medium,
            Severity::Low => &mut self.low,
        };
        // 同一等级只取第一个
        if slot.is_none() {
            *slot = Some(bug);
        }
    }

    fn is_complete(&self) -> bool {
        self.high.is_some() && self.medium.is_some() && self.low.is_some()
    }

    /// 组成任务包; 缺少候选时返回第一个缺少的等级
    fn into_bundle(self) -> Result<Bundle, Severity> {
        match (self.high, self.medium, self.low) {
            (Some(high), Some(medium), Some(low)) => {
                Ok(Bundle::new(high.clone(), medium.clone(), low.clone()))
            }
            (None, _, _) => Err(Severity::High),
            (_, None, _) => Err(Severity::Medium),
            _ => Err(Severity::Low),
        }
    }
}

// ==========================================
// BugAssigner - 分派引擎
// ==========================================
pub struct BugAssigner {
    // 无状态引擎, 不需要注入依赖
}

impl BugAssigner {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 为 `developer_count` 位开发者分派缺陷
    ///
    /// 规则:
    /// 1) 每位开发者从头开始一次新的中序遍历
    /// 2) 每个严重度取遍历中遇到的第一个缺陷（即该等级最早创建者）
    /// 3) 三个等级都有候选即停止扫描
    /// 4) 组成任务包后, 从积压中删除这三个缺陷
    ///
    /// # 参数
    /// - `developer_count`: 开发者数量（0 时返回空列表, 不修改积压）
    /// - `backlog`: 缺陷积压（会被修改）
    ///
    /// # 返回
    /// - Ok: 按开发者编号排序的分派列表
    /// - Err(InsufficientBugs): 某一等级数量不足, 积压保持不变
    #[instrument(skip(self, backlog), fields(backlog_len = backlog.len()))]
    pub fn assign(
        &self,
        developer_count: usize,
        backlog: &mut BugTree,
    ) -> AssignResult<SequentialList<Developer>> {
        self.check_capacity(developer_count, backlog)?;

        let mut developers = SequentialList::with_capacity(developer_count);

        for developer_id in 1..=developer_count {
            let bundle = self.pick_bundle(backlog)?;

            debug!(
                developer_id,
                high = %bundle.high.id,
                medium = %bundle.medium.id,
                low = %bundle.low.id,
                "任务包已组成"
            );

            self.take_bundle(backlog, &bundle)?;
            developers.push_back(Developer::new(developer_id, bundle));
        }

        info!(
            developers = developers.len(),
            remaining = backlog.len(),
            "缺陷分派完成"
        );

        Ok(developers)
    }

    /// 校验每个严重度至少有 `developer_count` 个缺陷
    ///
    /// # 返回
    /// - Ok(TierCounts): 各等级数量
    /// - Err(InsufficientBugs): 第一个不足的等级（按 高/中/低 顺序）
    pub fn check_capacity(
        &self,
        developer_count: usize,
        backlog: &BugTree,
    ) -> AssignResult<TierCounts> {
        let counts = TierCounts::from_backlog(backlog);

        for severity in Severity::ALL {
            let available = counts.get(severity);
            if available < developer_count {
                return Err(AssignError::InsufficientBugs {
                    severity,
                    required: developer_count,
                    available,
                });
            }
        }

        Ok(counts)
    }

    /// 从积压中删除任务包的三个缺陷
    ///
    /// 先确认三个缺陷都在积压中再删除, 缺任何一个时积压保持不变。
    /// 三个缺陷严重度各不相同, 删除其中一个不影响另外两个的查找。
    /// 任务包来自同一积压的遍历时不会出现 BacklogOutOfSync。
    fn take_bundle(&self, backlog: &mut BugTree, bundle: &Bundle) -> AssignResult<()> {
        if let Some((_, missing)) = bundle.iter().find(|(_, bug)| !backlog.contains(bug)) {
            return Err(AssignError::BacklogOutOfSync {
                bug_id: missing.id.clone(),
            });
        }

        for (_, bug) in bundle.iter() {
            if backlog.remove(bug).is_none() {
                return Err(AssignError::BacklogOutOfSync {
                    bug_id: bug.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// 扫描一次中序遍历, 挑出各等级第一个缺陷
    fn pick_bundle(&self, backlog: &BugTree) -> AssignResult<Bundle> {
        let mut candidates = Candidates::default();
        for bug in backlog.iter() {
            candidates.offer(bug);
            if candidates.is_complete() {
                break;
            }
        }

        // 遍历耗尽仍有等级缺候选: 不组成残缺任务包
        candidates
            .into_bundle()
            .map_err(|severity| AssignError::InsufficientBugs {
                severity,
                required: 1,
                available: 0,
            })
    }
}

impl Default for BugAssigner {
    fn default() -> Self {
        Self::new()
    }
}

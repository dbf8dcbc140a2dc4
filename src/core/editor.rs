//! Group-state model for a diamond lot and its submission to the pricing service.
//!
//! [`GroupEditor`] owns the ordered list of groups plus the last result and the
//! last error message. Edits never touch the network. Submission is split into
//! [`GroupEditor::begin_submit`], [`PendingSubmission::send`] and
//! [`GroupEditor::complete_submit`] so edits can continue while a request is in
//! flight; only the outcome of the most recently started submission is applied.

use crate::domain::model::{
    CalculationRequest, CalculationResult, DiamondGroup, GroupField, GroupUpdate,
};
use crate::domain::ports::PricingService;
use crate::utils::error::{DiamondError, ErrorCategory, ErrorSeverity, Result};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionToken(u64);

impl SubmissionToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 最近一次送出失敗的資訊
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFailure {
    pub message: String,
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
}

impl From<&DiamondError> for SubmissionFailure {
    fn from(e: &DiamondError) -> Self {
        Self {
            message: e.user_friendly_message(),
            category: e.category(),
            severity: e.severity(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionApplied {
    Succeeded,
    Failed,
    /// 已有較新的送出，此結果被丟棄
    Stale,
}

pub struct GroupEditor<S: PricingService> {
    service: Arc<S>,
    groups: Vec<DiamondGroup>,
    result: Option<CalculationResult>,
    failure: Option<SubmissionFailure>,
    next_token: u64,
    latest: Option<SubmissionToken>,
    pending: bool,
}

/// 已取得序號、尚未送出的請求
pub struct PendingSubmission<S: PricingService> {
    token: SubmissionToken,
    groups: Vec<DiamondGroup>,
    service: Arc<S>,
}

pub struct CompletedSubmission {
    token: SubmissionToken,
    outcome: Result<CalculationResult>,
}

impl<S: PricingService> GroupEditor<S> {
    pub fn new(service: S) -> Self {
        Self::with_groups(service, Vec::new())
    }

    /// 以既有群組初始化；空列表時補一個預設群組
    pub fn with_groups(service: S, groups: Vec<DiamondGroup>) -> Self {
        Self::from_shared(Arc::new(service), groups)
    }

    pub fn from_shared(service: Arc<S>, mut groups: Vec<DiamondGroup>) -> Self {
        if groups.is_empty() {
            groups.push(DiamondGroup::default());
        }

        Self {
            service,
            groups,
            result: None,
            failure: None,
            next_token: 0,
            latest: None,
            pending: false,
        }
    }

    pub fn groups(&self) -> &[DiamondGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&DiamondGroup> {
        self.groups.get(index)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// 編輯器至少保留一組，因此恆為 false
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.message.as_str())
    }

    pub fn failure(&self) -> Option<&SubmissionFailure> {
        self.failure.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn latest_token(&self) -> Option<SubmissionToken> {
        self.latest
    }

    /// 只剩一組時不可刪除
    pub fn can_remove(&self) -> bool {
        self.groups.len() > 1
    }

    pub fn request(&self) -> CalculationRequest {
        CalculationRequest {
            groups: self.groups.clone(),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.groups.len() {
            return Err(DiamondError::IndexOutOfRange {
                index,
                len: self.groups.len(),
            });
        }
        Ok(())
    }

    pub fn add_group(&mut self) -> usize {
        self.groups.push(DiamondGroup::default());
        tracing::debug!("Added group #{}", self.groups.len());
        self.groups.len() - 1
    }

    /// Removes the group at `index`. Returns `Ok(false)` without changing
    /// anything when it is the only group left.
    pub fn remove_group(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;

        if !self.can_remove() {
            tracing::debug!("Ignoring removal of the last remaining group");
            return Ok(false);
        }

        self.groups.remove(index);
        tracing::debug!("Removed group at index {} ({} left)", index, self.groups.len());
        Ok(true)
    }

    /// Replaces one field of one group. Carat and quantity are stored as given;
    /// range checks are left to the pricing service.
    pub fn update_group(&mut self, index: usize, update: GroupUpdate) -> Result<()> {
        self.check_index(index)?;
        self.groups[index] = self.groups[index].with_update(update);
        tracing::debug!("Updated group {} {} -> {:?}", index, update.field(), update);
        Ok(())
    }

    pub fn update_group_field(&mut self, index: usize, field: GroupField, raw: &str) -> Result<()> {
        self.check_index(index)?;
        let update = GroupUpdate::parse(field, raw)?;
        self.update_group(index, update)
    }

    /// 取得新序號並快照目前群組；清除上一次的錯誤訊息
    pub fn begin_submit(&mut self) -> PendingSubmission<S> {
        self.next_token += 1;
        let token = SubmissionToken(self.next_token);
        self.latest = Some(token);
        self.pending = true;
        self.failure = None;

        tracing::debug!(
            "Starting submission #{} with {} group(s)",
            token.value(),
            self.groups.len()
        );

        PendingSubmission {
            token,
            groups: self.groups.clone(),
            service: Arc::clone(&self.service),
        }
    }

    pub fn complete_submit(&mut self, completed: CompletedSubmission) -> SubmissionApplied {
        if !self.pending || self.latest != Some(completed.token) {
            tracing::warn!(
                "Discarding response for submission #{} (latest is #{})",
                completed.token.value(),
                self.latest.map(|t| t.value()).unwrap_or(0)
            );
            return SubmissionApplied::Stale;
        }

        self.pending = false;

        match completed.outcome {
            Ok(result) => {
                tracing::info!(
                    "✅ Submission #{} priced {} group(s), grand total {:.2}",
                    completed.token.value(),
                    result.results.len(),
                    result.grand_total
                );
                self.result = Some(result);
                self.failure = None;
                SubmissionApplied::Succeeded
            }
            Err(e) => {
                tracing::error!("❌ Submission #{} failed: {}", completed.token.value(), e);
                self.failure = Some(SubmissionFailure::from(&e));
                SubmissionApplied::Failed
            }
        }
    }

    pub async fn submit(&mut self) -> SubmissionApplied {
        let pending = self.begin_submit();
        let completed = pending.send().await;
        self.complete_submit(completed)
    }
}

impl<S: PricingService> PendingSubmission<S> {
    pub fn token(&self) -> SubmissionToken {
        self.token
    }

    pub fn groups(&self) -> &[DiamondGroup] {
        &self.groups
    }

    pub async fn send(self) -> CompletedSubmission {
        let outcome = self.service.calculate(&self.groups).await;
        CompletedSubmission {
            token: self.token,
            outcome,
        }
    }
}

impl CompletedSubmission {
    pub fn token(&self) -> SubmissionToken {
        self.token
    }

    pub fn outcome(&self) -> &Result<CalculationResult> {
        &self.outcome
    }
}

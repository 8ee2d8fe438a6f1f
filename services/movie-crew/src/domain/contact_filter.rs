// 取り込み対象メッセージのフィルター
//
// 国の許可リストと連絡先（email）の有無でメッセージを選別する。
// 判定は国 → 連絡先の順に行い、最初に不合格となった理由を返す。

use super::queue_message::{is_truthy, QueueMessage};

/// 取り込みを許可する国
pub const ALLOWED_COUNTRIES: [&str; 2] = ["Ireland", "China"];

/// 連絡先として扱うフィールド名
pub const CONTACT_FIELD: &str = "email";

/// 連絡先フィールドに対する要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPolicy {
    /// 連絡先があるメッセージのみ取り込む
    Required,
    /// 連絡先がないメッセージのみ取り込む
    Absent,
}

/// スキップ理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `address.country`が許可リストにない（欠落を含む）
    CountryNotAllowed(Option<String>),
    /// 連絡先が必要だが存在しない
    MissingContact,
    /// 連絡先があってはならないが存在する
    UnexpectedContact,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::CountryNotAllowed(Some(country)) => {
                write!(f, "country not allowed: {}", country)
            }
            SkipReason::CountryNotAllowed(None) => write!(f, "country is missing"),
            SkipReason::MissingContact => write!(f, "{} is missing", CONTACT_FIELD),
            SkipReason::UnexpectedContact => write!(f, "{} is present", CONTACT_FIELD),
        }
    }
}

/// メッセージフィルター
#[derive(Debug, Clone, Copy)]
pub struct ContactFilter {
    policy: ContactPolicy,
}

impl ContactFilter {
    /// 新しいフィルターを作成
    pub fn new(policy: ContactPolicy) -> Self {
        Self { policy }
    }

    /// 連絡先ポリシー
    pub fn policy(&self) -> ContactPolicy {
        self.policy
    }

    /// メッセージを評価
    ///
    /// # Returns
    /// * `Ok(())` - 取り込み対象
    /// * `Err(SkipReason)` - 最初に不合格となった条件
    pub fn evaluate(&self, message: &QueueMessage) -> Result<(), SkipReason> {
        match message.country() {
            Some(country) if ALLOWED_COUNTRIES.contains(&country) => {}
            other => return Err(SkipReason::CountryNotAllowed(other.map(str::to_string))),
        }

        let has_contact = message.field(CONTACT_FIELD).is_some_and(is_truthy);
        match (self.policy, has_contact) {
            (ContactPolicy::Required, false) => Err(SkipReason::MissingContact),
            (ContactPolicy::Absent, true) => Err(SkipReason::UnexpectedContact),
            _ => Ok(()),
        }
    }
}

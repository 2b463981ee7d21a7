//! Store constraint classification
//!
//! PostgreSQL の SQLSTATE (Class 23) を分類し、各ドメインが
//! 「どの制約に違反したか」だけを見て自分のエラーへ変換できるようにします。
//!
//! <https://www.postgresql.org/docs/current/errcodes-appendix.html>

/// 整合性制約違反の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// 23505 unique_violation
    Unique,
    /// 23503 foreign_key_violation
    ForeignKey,
    /// 23514 check_violation
    Check,
    /// 23502 not_null_violation
    NotNull,
}

impl ConstraintViolation {
    /// SQLSTATE コードから分類
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "23505" => Some(Self::Unique),
            "23503" => Some(Self::ForeignKey),
            "23514" => Some(Self::Check),
            "23502" => Some(Self::NotNull),
            _ => None,
        }
    }

    /// `sqlx::Error` から分類（データベースエラー以外は `None`）
    pub fn classify(err: &sqlx::Error) -> Option<Self> {
        match err {
            sqlx::Error::Database(db_err) => db_err.code().and_then(|code| Self::from_code(&code)),
            _ => None,
        }
    }

    /// 違反した制約名（PostgreSQL が報告した場合のみ）
    pub fn constraint_name(err: &sqlx::Error) -> Option<&str> {
        match err {
            sqlx::Error::Database(db_err) => db_err.constraint(),
            _ => None,
        }
    }
}

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AccountId;

/// PaySimple payment identifier.
pub type PaymentId = i32;

/// Body of `POST /v4/payment`.
///
/// ```json
/// { "AccountId": 7, "Amount": 50.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewPayment {
    /// Account to charge.
    pub account_id: AccountId,

    /// Amount in dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl NewPayment {
    /// Creates a payment request against an account.
    #[must_use]
    pub const fn new(account_id: AccountId, amount: Decimal) -> Self {
        Self { account_id, amount }
    }
}

/// Lifecycle status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Accepted, not yet posted.
    Pending,
    /// Posted to the processor.
    Posted,
    /// Funds settled.
    Settled,
    /// Declined or otherwise failed; see [`Payment::failure_data`].
    Failed,
    /// Voided before settlement.
    Voided,
    /// Reversed after settlement.
    Reversed,
    /// Reversal posted.
    ReversePosted,
    /// Charged back by the card holder.
    Chargeback,
    /// Reversed for insufficient funds.
    ReverseNsf,
    /// Authorized only.
    Authorized,
    /// Refund settled.
    RefundSettled,
    /// A status this client does not know.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "Pending",
            Self::Posted => "Posted",
            Self::Settled => "Settled",
            Self::Failed => "Failed",
            Self::Voided => "Voided",
            Self::Reversed => "Reversed",
            Self::ReversePosted => "ReversePosted",
            Self::Chargeback => "Chargeback",
            Self::ReverseNsf => "ReverseNsf",
            Self::Authorized => "Authorized",
            Self::RefundSettled => "RefundSettled",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Why a payment failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FailureData {
    /// Processor failure code.
    #[serde(default)]
    pub code: Option<String>,

    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// What the merchant should do about it.
    #[serde(default)]
    pub merchant_action_text: Option<String>,

    /// Whether the failure was an issuer decline.
    #[serde(default)]
    pub is_decline: Option<bool>,
}

/// A payment as returned by `POST /v4/payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    /// Payment identifier.
    pub id: PaymentId,

    /// Charged account.
    #[serde(default)]
    pub account_id: Option<AccountId>,

    /// Charged amount.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,

    /// Current status; the gateway may omit it.
    #[serde(default)]
    pub status: Option<PaymentStatus>,

    /// Present when `status` is [`PaymentStatus::Failed`].
    #[serde(default)]
    pub failure_data: Option<FailureData>,
}

impl Payment {
    /// Returns `true` when the gateway reports the payment as failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == Some(PaymentStatus::Failed)
    }
}

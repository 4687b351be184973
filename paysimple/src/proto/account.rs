use std::fmt;

use serde::{Deserialize, Serialize};

use super::CustomerId;

/// PaySimple payment account identifier (credit card or ACH).
pub type AccountId = i32;

/// Card network of a stored credit card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Issuer {
    /// Visa.
    Visa,
    /// Mastercard.
    Master,
    /// American Express.
    Amex,
    /// Discover.
    Discover,
    /// Any issuer the gateway reports that this client does not know.
    #[serde(other)]
    Unsupported,
}

impl fmt::Display for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Visa => "Visa",
            Self::Master => "Master",
            Self::Amex => "Amex",
            Self::Discover => "Discover",
            Self::Unsupported => "Unsupported",
        };
        f.write_str(name)
    }
}

/// A stored credit card account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreditCard {
    /// Account identifier, used as `AccountId` when paying.
    pub id: AccountId,

    /// Owning customer.
    #[serde(default)]
    pub customer_id: CustomerId,

    /// Masked card number as returned by the gateway (e.g. `"************1111"`).
    #[serde(default)]
    pub credit_card_number: String,

    /// Expiration as `MM/YYYY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    /// Card network.
    pub issuer: Issuer,

    /// Whether this is the customer's default card.
    #[serde(default)]
    pub is_default: bool,
}

/// A stored bank (ACH) account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AchAccount {
    /// Account identifier, used as `AccountId` when paying.
    pub id: AccountId,

    /// Owning customer.
    #[serde(default)]
    pub customer_id: CustomerId,

    /// Masked bank account number.
    #[serde(default)]
    pub account_number: String,

    /// ABA routing number.
    #[serde(default)]
    pub routing_number: String,

    /// Bank display name.
    #[serde(default)]
    pub bank_name: String,

    /// `true` for checking, `false` for savings.
    #[serde(default)]
    pub is_checking_account: bool,

    /// Whether this is the customer's default bank account.
    #[serde(default)]
    pub is_default: bool,
}

/// Which kind of default account to charge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// The default credit card (`/defaultcreditcard`).
    #[default]
    CreditCard,
    /// The default bank account (`/defaultach`).
    Ach,
}

impl AccountKind {
    /// Human-readable name used in messages (e.g. `"credit card"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "credit card",
            Self::Ach => "ACH account",
        }
    }
}

/// Either kind of stored payment account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentAccount {
    /// A credit card.
    CreditCard(CreditCard),
    /// A bank account.
    Ach(AchAccount),
}

impl PaymentAccount {
    /// Returns the identifier to pay against.
    #[must_use]
    pub const fn id(&self) -> AccountId {
        match self {
            Self::CreditCard(card) => card.id,
            Self::Ach(ach) => ach.id,
        }
    }
}

impl fmt::Display for PaymentAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreditCard(card) => write!(
                f,
                "Credit Card Account {} ends in {}",
                card.issuer, card.credit_card_number
            ),
            Self::Ach(ach) => write!(
                f,
                "ACH Account {} ends in {}",
                ach.bank_name, ach.account_number
            ),
        }
    }
}

impl From<CreditCard> for PaymentAccount {
    fn from(card: CreditCard) -> Self {
        Self::CreditCard(card)
    }
}

impl From<AchAccount> for PaymentAccount {
    fn from(ach: AchAccount) -> Self {
        Self::Ach(ach)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_card_deserializes_from_gateway_json() {
        let card: CreditCard = serde_json::from_str(
            r#"{
                "Id": 7,
                "CustomerId": 42,
                "CreditCardNumber": "************1111",
                "ExpirationDate": "12/2030",
                "Issuer": "Visa",
                "IsDefault": true,
                "BillingZipCode": "80202"
            }"#,
        )
        .unwrap();
        assert_eq!(card.id, 7);
        assert_eq!(card.issuer, Issuer::Visa);
        assert_eq!(
            PaymentAccount::from(card).to_string(),
            "Credit Card Account Visa ends in ************1111"
        );
    }

    #[test]
    fn unknown_issuer_maps_to_unsupported() {
        let issuer: Issuer = serde_json::from_str(r#""Diners""#).unwrap();
        assert_eq!(issuer, Issuer::Unsupported);
    }

    #[test]
    fn account_kind_uses_snake_case() {
        let kind: AccountKind = serde_json::from_str(r#""credit_card""#).unwrap();
        assert_eq!(kind, AccountKind::CreditCard);
        let kind: AccountKind = serde_json::from_str(r#""ach""#).unwrap();
        assert_eq!(kind, AccountKind::Ach);
    }
}

//! The gateway collaborator trait.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::proto::{
    AccountKind, AchAccount, CreditCard, Customer, CustomerId, NewPayment, Payment,
    PaymentAccount,
};

/// The PaySimple calls this client makes.
///
/// Implemented over HTTP by `paysimple-http`; tests substitute in-memory
/// implementations. Every method fails with [`GatewayError::Endpoint`] when the
/// gateway answers with a non-success status.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetches a customer by id.
    async fn get_customer(&self, customer_id: CustomerId) -> Result<Customer, GatewayError>;

    /// Fetches the customer's default credit card.
    async fn get_default_credit_card_account(
        &self,
        customer_id: CustomerId,
    ) -> Result<CreditCard, GatewayError>;

    /// Fetches the customer's default bank account.
    async fn get_default_ach_account(
        &self,
        customer_id: CustomerId,
    ) -> Result<AchAccount, GatewayError>;

    /// Submits a payment.
    async fn create_payment(&self, payment: &NewPayment) -> Result<Payment, GatewayError>;

    /// Fetches the customer's default account of the given kind.
    async fn get_default_account(
        &self,
        customer_id: CustomerId,
        kind: AccountKind,
    ) -> Result<PaymentAccount, GatewayError> {
        match kind {
            AccountKind::CreditCard => self
                .get_default_credit_card_account(customer_id)
                .await
                .map(PaymentAccount::from),
            AccountKind::Ach => self
                .get_default_ach_account(customer_id)
                .await
                .map(PaymentAccount::from),
        }
    }
}

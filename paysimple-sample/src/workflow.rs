//! The interactive payment loop.
//!
//! One iteration looks up a customer, looks up their default account, takes
//! a payment and reports the result. Endpoint errors on the two lookups end
//! the process; endpoint errors on the payment are reported and the loop
//! continues. Anything else is printed with its cause chain and the user is
//! offered another attempt.

use std::io;
use std::num::ParseIntError;
use std::str::FromStr;

use paysimple::proto::{AccountKind, CustomerId, NewPayment};
use paysimple::{EndpointError, Gateway, GatewayError};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::console::Console;
use crate::report::{ValidationStyle, describe_endpoint_error, describe_payment, render_fault};

/// Knobs for one workflow run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowOptions {
    /// Which default account to charge.
    pub account_kind: AccountKind,
    /// How validation errors are printed.
    pub validation_style: ValidationStyle,
}

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user answered anything but `Y` at the repeat prompt.
    Declined,
    /// A lookup failed and the user acknowledged it.
    Terminated,
}

/// What the loop should do after an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Offer another payment.
    Continue,
    /// Stop the process.
    Terminate,
}

/// Faults that abandon the current iteration without ending the loop.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The customer id is not an integer.
    #[error("'{input}' is not a valid customer id")]
    InvalidCustomerId {
        /// What the user typed.
        input: String,
        /// The underlying parse error.
        #[source]
        source: ParseIntError,
    },

    /// The amount is not a decimal number.
    #[error("'{input}' is not a valid payment amount")]
    InvalidAmount {
        /// What the user typed.
        input: String,
        /// The underlying parse error.
        #[source]
        source: rust_decimal::Error,
    },

    /// A gateway call failed outside the handled endpoint paths.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Reading from or writing to the console failed.
    #[error("console I/O failed")]
    Console(#[from] io::Error),
}

/// Drives payment attempts against a [`Gateway`] through a [`Console`].
#[derive(Debug)]
pub struct Workflow<G, C> {
    gateway: G,
    console: C,
    options: WorkflowOptions,
}

impl<G: Gateway, C: Console> Workflow<G, C> {
    /// Creates a workflow.
    pub const fn new(gateway: G, console: C, options: WorkflowOptions) -> Self {
        Self {
            gateway,
            console,
            options,
        }
    }

    /// Returns the gateway.
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Returns the console.
    pub const fn console(&self) -> &C {
        &self.console
    }

    /// Runs iterations until the user declines or a lookup fails.
    ///
    /// # Errors
    ///
    /// Fails only when the console itself cannot be used to report a fault or
    /// to ask whether to continue.
    pub async fn run(&mut self) -> io::Result<Exit> {
        loop {
            match self.run_once().await {
                Ok(Step::Continue) => {}
                Ok(Step::Terminate) => return Ok(Exit::Terminated),
                Err(fault) => {
                    tracing::debug!(error = %fault, "Payment attempt abandoned");
                    self.console.write_line(&render_fault(&fault))?;
                }
            }

            self.console
                .write_line("Would you like to make another payment? Y / N")?;
            if !matches!(self.console.read_key()?, Some('Y' | 'y')) {
                return Ok(Exit::Declined);
            }
            self.console.write_line("")?;
        }
    }

    /// Runs one payment attempt.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] for bad input, console failures and gateway
    /// failures that are not endpoint errors.
    pub async fn run_once(&mut self) -> Result<Step, WorkflowError> {
        let kind = self.options.account_kind;

        self.console
            .write_line("This is an example of making a payment with an existing customer.")?;
        self.console.write_line(
            "In your production code, the PaySimple customer Id would most likely be stored in your database",
        )?;
        self.console.write("Enter PaySimple Customer Id: ")?;
        let customer_id = parse_customer_id(&self.console.read_line()?)?;

        let customer = match self.gateway.get_customer(customer_id).await {
            Ok(customer) => customer,
            Err(GatewayError::Endpoint(err)) => {
                let not_found = format!("Customer with Id {customer_id} does not exist");
                return self.report_and_terminate(&err, &not_found);
            }
            Err(err) => return Err(err.into()),
        };
        tracing::info!(customer_id = customer.id, "Customer selected");

        self.console
            .write_line(&format!("Customer {} selected.", customer.display_name()))?;
        self.console.write_line(&format!(
            "Now selecting the default {} for the customer.",
            kind.label()
        ))?;
        self.console.write_line(&format!(
            "You could also store the {} id in your database or add a new one to the customer.",
            kind.label()
        ))?;

        let account = match self.gateway.get_default_account(customer.id, kind).await {
            Ok(account) => account,
            Err(GatewayError::Endpoint(err)) => {
                let not_found = format!(
                    "Default {} for customer with Id {customer_id} does not exist",
                    kind.label()
                );
                return self.report_and_terminate(&err, &not_found);
            }
            Err(err) => return Err(err.into()),
        };
        self.console.write_line(&format!("Default {account}"))?;

        self.console.write_line(
            "Note: To simulate a failure enter a payment amount 9999.01 - 9999.29. For success, enter any other amount.",
        )?;
        self.console.write("Enter Payment Amount: ")?;
        let amount = parse_amount(&self.console.read_line()?)?;

        let request = NewPayment::new(account.id(), amount);
        self.console.write_line(&format!(
            "Making payment for ${:.2}...",
            display_amount(amount)
        ))?;

        let lines = match self.gateway.create_payment(&request).await {
            Ok(payment) => {
                tracing::info!(payment_id = payment.id, status = ?payment.status, "Payment submitted");
                describe_payment(&payment)
            }
            Err(GatewayError::Endpoint(err)) => {
                tracing::info!(status = %err.status(), "Payment rejected");
                let not_found = format!("Account with Id {} does not exist", account.id());
                describe_endpoint_error(&err, &not_found, self.options.validation_style)
            }
            Err(err) => return Err(err.into()),
        };
        for line in lines {
            self.console.write_line(&line)?;
        }

        Ok(Step::Continue)
    }

    fn report_and_terminate(
        &mut self,
        err: &EndpointError,
        not_found: &str,
    ) -> Result<Step, WorkflowError> {
        tracing::info!(status = %err.status(), "Lookup failed, exiting");
        for line in describe_endpoint_error(err, not_found, self.options.validation_style) {
            self.console.write_line(&line)?;
        }
        self.console.write_line("Press a key to exit")?;
        self.console.read_key()?;
        Ok(Step::Terminate)
    }
}

fn parse_customer_id(input: &str) -> Result<CustomerId, WorkflowError> {
    input
        .trim()
        .parse()
        .map_err(|source| WorkflowError::InvalidCustomerId {
            input: input.to_owned(),
            source,
        })
}

/// Rounds to cents the way currency is shown to the user.
fn display_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn parse_amount(input: &str) -> Result<Decimal, WorkflowError> {
    Decimal::from_str(input.trim()).map_err(|source| WorkflowError::InvalidAmount {
        input: input.to_owned(),
        source,
    })
}

//! # UPI Payment Links
//!
//! Builds the `upi://pay` deep link rendered as a QR code by the UI.
//!
//! The core only EMITS the link; it never parses or verifies a payment
//! confirmation. Confirmation is a trusted operator action taken after the
//! customer shows the success screen (see [`crate::PAYMENT_WAIT_SECS`] for
//! the dialog's expiry bound).

use crate::money::Money;

/// Default UPI id the restaurant collects into.
pub const DEFAULT_UPI_ID: &str = "8530378745@axl";

/// Default payee display name shown in the customer's UPI app.
pub const DEFAULT_PAYEE_NAME: &str = "Hotel Sugaran";

/// Payee details for payment link construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayeeConfig {
    /// Virtual payment address, e.g. `8530378745@axl`.
    pub upi_id: String,
    /// Display name, percent-encoded into the link.
    pub payee_name: String,
}

impl Default for PayeeConfig {
    fn default() -> Self {
        PayeeConfig {
            upi_id: DEFAULT_UPI_ID.to_string(),
            payee_name: DEFAULT_PAYEE_NAME.to_string(),
        }
    }
}

impl PayeeConfig {
    /// Creates a payee config.
    pub fn new(upi_id: impl Into<String>, payee_name: impl Into<String>) -> Self {
        PayeeConfig {
            upi_id: upi_id.into(),
            payee_name: payee_name.into(),
        }
    }

    /// Builds the deep link for one bill amount.
    ///
    /// ## Example
    /// ```rust
    /// use suvidha_core::money::Money;
    /// use suvidha_core::upi::PayeeConfig;
    ///
    /// let link = PayeeConfig::default().payment_link(Money::from_paise(8400));
    /// assert_eq!(
    ///     link,
    ///     "upi://pay?pa=8530378745@axl&pn=Hotel%20Sugaran&am=84.00&cu=INR"
    /// );
    /// ```
    pub fn payment_link(&self, amount: Money) -> String {
        format!(
            "upi://pay?pa={}&pn={}&am={}&cu=INR",
            self.upi_id,
            percent_encode(&self.payee_name),
            amount.to_decimal_string()
        )
    }
}

/// Percent-encodes a query component. Unreserved characters (RFC 3986:
/// letters, digits, `-`, `_`, `.`, `~`) pass through; everything else is
/// encoded byte-wise.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

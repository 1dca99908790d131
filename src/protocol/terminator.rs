//! # Command Terminators
//!
//! Every command ends with exactly one terminator: an optional value followed
//! by the code literal that tells the printer which operation to perform.
//!
//! ## Aliases
//!
//! The device manual documents several codes that behave identically
//! (`1T` and `6T` are both cash, `5T`/`20T`/`21T`/`22T` are all tickets,
//! `@` is both "additional description" and "print text line"). Each one is
//! a separate variant here because the printer accepts each code on its own.
//!
//! ## Naming
//!
//! Variants (de)serialize by kebab-case name, e.g. `"payment-cards"` or
//! `"open-commercial-return"`. Custom payment codes are written as
//! `{"custom-payment": "ABC"}`.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScontrinoError};

/// Suffix shared by every payment code.
pub const PAYMENT_SUFFIX: char = 'T';

/// Operation codes of the Epson FP command set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminatorKind {
    // Sales and adjustments
    Sold,
    DiscountDepartment,
    SoldPlu,
    Cancellation,
    DiscountPercentTransaction,
    DiscountPercentSubtotal,
    DiscountValueTransaction,
    DiscountValueSubtotal,
    IncreasePercentTransaction,
    IncreasePercentSubtotal,
    IncreaseValueTransaction,
    IncreaseValueSubtotal,
    /// Deprecated by the device manual
    Return,
    CashIncome,
    CashOutflow,
    /// Same operation as `payment-credit` (`4T`)
    PaymentWithCredit,
    CashCreditRecovery,
    AdvancePayment,
    Gift,
    OneTimeCoupon,

    // Document openers
    DirectInvoice,
    /// Deprecated by the device manual
    OpenCreditNote,
    OpenCommercialReturn,
    OpenCommercialCancellation,
    OpenPosReturn,
    OpenPosCancellation,
    InvoiceCommercialDocument,
    CancelDocumentOrInvoice,
    Subtotal,

    // Payments
    PaymentCash,
    PaymentCheck,
    PaymentCards,
    PaymentCredit,
    PaymentTicket,
    /// Same operation as `payment-cash` (`1T`)
    PaymentCash2,
    PaymentUncollectedAssets,
    /// Same operation as `payment-ticket` (`5T`)
    PaymentTicket2,
    /// Same operation as `payment-ticket` (`5T`)
    PaymentTicket3,
    /// Same operation as `payment-ticket` (`5T`)
    PaymentTicket4,
    PaymentUncollectedServices,
    PaymentUncollectedInvoice,
    PaymentUncollectedSsn,
    PaymentDiscountGeneric,
    PaymentOneTimeCoupon,
    /// Merchant-configured payment code, rendered as `<code>T`
    CustomPayment(PaymentCode),

    // Descriptions and trailers
    AdditionalDescription,
    LotteryCode,
    InvoiceCustomerDetails,
    PrintCustomerIdentifier,
    PrintCourtesyMessage,
    PrintTrailerAfterLogo,

    // Barcodes
    PrintBarcodeEan13,
    PrintBarcodeEan8,
    PrintBarcodeCode39,

    // Device control
    PrintNotCalculated,
    OpenCashRegister,
    Clear,
    SelectOperator,
    LockKeyboard,
    UnlockKeyboard,
    OpenManagementDocument,
    PrintTextLine,
    CloseManagementDocument,
    ViewDescriptionOnDisplayFirstLine,
    ViewDescriptionOnDisplaySecondLine,

    // Reports
    FinancialReportNoZeroing,
    DepartmentReportNoZeroing,
    PluReportNoZeroing,
    OperatorsReportNoZeroing,
    FinancialReportZeroing,
    DepartmentReportZeroing,
    PluReportZeroing,
    OperatorsReportZeroing,
    FinancialReportAndFiscalClosureZeroing,
    ResetInvoiceNumber,
    PrintFiscalMemoryAll,
    PrintFiscalMemoryByDate,
    PrintFiscalMemoryByClosureNumber,
    PrintDetailsMemoryAll,
    PrintDetailsMemoryByDate,
    PrintDetailsMemoryByClosureNumber,

    // Setup
    SetDateTime,
    DisableXonXoff,
    DisableXonXoff2,
}

impl TerminatorKind {
    /// Every fixed code, in device-manual order (custom payments excluded).
    pub const ALL: &'static [TerminatorKind] = &[
        TerminatorKind::Sold,
        TerminatorKind::DiscountDepartment,
        TerminatorKind::SoldPlu,
        TerminatorKind::Cancellation,
        TerminatorKind::DiscountPercentTransaction,
        TerminatorKind::DiscountPercentSubtotal,
        TerminatorKind::DiscountValueTransaction,
        TerminatorKind::DiscountValueSubtotal,
        TerminatorKind::IncreasePercentTransaction,
        TerminatorKind::IncreasePercentSubtotal,
        TerminatorKind::IncreaseValueTransaction,
        TerminatorKind::IncreaseValueSubtotal,
        TerminatorKind::Return,
        TerminatorKind::CashIncome,
        TerminatorKind::CashOutflow,
        TerminatorKind::PaymentWithCredit,
        TerminatorKind::CashCreditRecovery,
        TerminatorKind::AdvancePayment,
        TerminatorKind::Gift,
        TerminatorKind::OneTimeCoupon,
        TerminatorKind::DirectInvoice,
        TerminatorKind::OpenCreditNote,
        TerminatorKind::OpenCommercialReturn,
        TerminatorKind::OpenCommercialCancellation,
        TerminatorKind::OpenPosReturn,
        TerminatorKind::OpenPosCancellation,
        TerminatorKind::InvoiceCommercialDocument,
        TerminatorKind::CancelDocumentOrInvoice,
        TerminatorKind::Subtotal,
        TerminatorKind::PaymentCash,
        TerminatorKind::PaymentCheck,
        TerminatorKind::PaymentCards,
        TerminatorKind::PaymentCredit,
        TerminatorKind::PaymentTicket,
        TerminatorKind::PaymentCash2,
        TerminatorKind::PaymentUncollectedAssets,
        TerminatorKind::PaymentTicket2,
        TerminatorKind::PaymentTicket3,
        TerminatorKind::PaymentTicket4,
        TerminatorKind::PaymentUncollectedServices,
        TerminatorKind::PaymentUncollectedInvoice,
        TerminatorKind::PaymentUncollectedSsn,
        TerminatorKind::PaymentDiscountGeneric,
        TerminatorKind::PaymentOneTimeCoupon,
        TerminatorKind::AdditionalDescription,
        TerminatorKind::LotteryCode,
        TerminatorKind::InvoiceCustomerDetails,
        TerminatorKind::PrintCustomerIdentifier,
        TerminatorKind::PrintCourtesyMessage,
        TerminatorKind::PrintTrailerAfterLogo,
        TerminatorKind::PrintBarcodeEan13,
        TerminatorKind::PrintBarcodeEan8,
        TerminatorKind::PrintBarcodeCode39,
        TerminatorKind::PrintNotCalculated,
        TerminatorKind::OpenCashRegister,
        TerminatorKind::Clear,
        TerminatorKind::SelectOperator,
        TerminatorKind::LockKeyboard,
        TerminatorKind::UnlockKeyboard,
        TerminatorKind::OpenManagementDocument,
        TerminatorKind::PrintTextLine,
        TerminatorKind::CloseManagementDocument,
        TerminatorKind::ViewDescriptionOnDisplayFirstLine,
        TerminatorKind::ViewDescriptionOnDisplaySecondLine,
        TerminatorKind::FinancialReportNoZeroing,
        TerminatorKind::DepartmentReportNoZeroing,
        TerminatorKind::PluReportNoZeroing,
        TerminatorKind::OperatorsReportNoZeroing,
        TerminatorKind::FinancialReportZeroing,
        TerminatorKind::DepartmentReportZeroing,
        TerminatorKind::PluReportZeroing,
        TerminatorKind::OperatorsReportZeroing,
        TerminatorKind::FinancialReportAndFiscalClosureZeroing,
        TerminatorKind::ResetInvoiceNumber,
        TerminatorKind::PrintFiscalMemoryAll,
        TerminatorKind::PrintFiscalMemoryByDate,
        TerminatorKind::PrintFiscalMemoryByClosureNumber,
        TerminatorKind::PrintDetailsMemoryAll,
        TerminatorKind::PrintDetailsMemoryByDate,
        TerminatorKind::PrintDetailsMemoryByClosureNumber,
        TerminatorKind::SetDateTime,
        TerminatorKind::DisableXonXoff,
        TerminatorKind::DisableXonXoff2,
    ];

    /// The code literal sent to the printer.
    pub fn literal(&self) -> Cow<'static, str> {
        let code = match self {
            TerminatorKind::Sold => "R",
            TerminatorKind::DiscountDepartment => "r",
            TerminatorKind::SoldPlu => "P",
            TerminatorKind::Cancellation => "0M",
            TerminatorKind::DiscountPercentTransaction => "1M",
            TerminatorKind::DiscountPercentSubtotal => "2M",
            TerminatorKind::DiscountValueTransaction => "3M",
            TerminatorKind::DiscountValueSubtotal => "4M",
            TerminatorKind::IncreasePercentTransaction => "5M",
            TerminatorKind::IncreasePercentSubtotal => "6M",
            TerminatorKind::IncreaseValueTransaction => "7M",
            TerminatorKind::IncreaseValueSubtotal => "8M",
            TerminatorKind::Return => "9M",
            TerminatorKind::CashIncome => "10M",
            TerminatorKind::CashOutflow => "11M",
            TerminatorKind::PaymentWithCredit => "12M",
            TerminatorKind::CashCreditRecovery => "13M",
            TerminatorKind::AdvancePayment => "16M",
            TerminatorKind::Gift => "17M",
            TerminatorKind::OneTimeCoupon => "18M",
            TerminatorKind::DirectInvoice => "101M",
            TerminatorKind::OpenCreditNote => "102M",
            TerminatorKind::OpenCommercialReturn => "104M",
            TerminatorKind::OpenCommercialCancellation => "105M",
            TerminatorKind::OpenPosReturn => "106M",
            TerminatorKind::OpenPosCancellation => "107M",
            TerminatorKind::InvoiceCommercialDocument => "111M",
            TerminatorKind::CancelDocumentOrInvoice => "k",
            TerminatorKind::Subtotal => "=",
            TerminatorKind::PaymentCash => "1T",
            TerminatorKind::PaymentCheck => "2T",
            TerminatorKind::PaymentCards => "3T",
            TerminatorKind::PaymentCredit => "4T",
            TerminatorKind::PaymentTicket => "5T",
            TerminatorKind::PaymentCash2 => "6T",
            TerminatorKind::PaymentUncollectedAssets => "7T",
            TerminatorKind::PaymentTicket2 => "20T",
            TerminatorKind::PaymentTicket3 => "21T",
            TerminatorKind::PaymentTicket4 => "22T",
            TerminatorKind::PaymentUncollectedServices => "50T",
            TerminatorKind::PaymentUncollectedInvoice => "51T",
            TerminatorKind::PaymentUncollectedSsn => "52T",
            TerminatorKind::PaymentDiscountGeneric => "53T",
            TerminatorKind::PaymentOneTimeCoupon => "54T",
            TerminatorKind::CustomPayment(code) => {
                return Cow::Owned(format!("{}{}", code.as_str(), PAYMENT_SUFFIX));
            }
            TerminatorKind::AdditionalDescription => "@",
            TerminatorKind::LotteryCode => "@37F",
            TerminatorKind::InvoiceCustomerDetails => "@38F",
            TerminatorKind::PrintCustomerIdentifier => "@39F",
            TerminatorKind::PrintCourtesyMessage => "@40F",
            TerminatorKind::PrintTrailerAfterLogo => "@41F",
            TerminatorKind::PrintBarcodeEan13 => "1Z",
            TerminatorKind::PrintBarcodeEan8 => "2Z",
            TerminatorKind::PrintBarcodeCode39 => "3Z",
            TerminatorKind::PrintNotCalculated => "#",
            TerminatorKind::OpenCashRegister => "a",
            TerminatorKind::Clear => "K",
            TerminatorKind::SelectOperator => "O",
            TerminatorKind::LockKeyboard => "y",
            TerminatorKind::UnlockKeyboard => "Y",
            TerminatorKind::OpenManagementDocument => "j",
            TerminatorKind::PrintTextLine => "@",
            TerminatorKind::CloseManagementDocument => "J",
            TerminatorKind::ViewDescriptionOnDisplayFirstLine => "1%",
            TerminatorKind::ViewDescriptionOnDisplaySecondLine => "2%",
            TerminatorKind::FinancialReportNoZeroing => "1f",
            TerminatorKind::DepartmentReportNoZeroing => "2f",
            TerminatorKind::PluReportNoZeroing => "3f",
            TerminatorKind::OperatorsReportNoZeroing => "4f",
            TerminatorKind::FinancialReportZeroing => "1F",
            TerminatorKind::DepartmentReportZeroing => "2F",
            TerminatorKind::PluReportZeroing => "3F",
            TerminatorKind::OperatorsReportZeroing => "4F",
            TerminatorKind::FinancialReportAndFiscalClosureZeroing => "8F",
            TerminatorKind::ResetInvoiceNumber => "9F",
            TerminatorKind::PrintFiscalMemoryAll => "1w",
            TerminatorKind::PrintFiscalMemoryByDate => "2w",
            TerminatorKind::PrintFiscalMemoryByClosureNumber => "3w",
            TerminatorKind::PrintDetailsMemoryAll => "4w",
            TerminatorKind::PrintDetailsMemoryByDate => "5w",
            TerminatorKind::PrintDetailsMemoryByClosureNumber => "6w",
            TerminatorKind::SetDateTime => "D",
            TerminatorKind::DisableXonXoff => "E",
            TerminatorKind::DisableXonXoff2 => "1492E",
        };
        Cow::Borrowed(code)
    }

    /// Whether this code records a payment (its literal ends in `T`).
    pub fn is_payment(&self) -> bool {
        self.literal().ends_with(PAYMENT_SUFFIX)
    }

    /// Build a custom payment terminator from a 3-character code.
    ///
    /// ```
    /// use scontrino::protocol::terminator::TerminatorKind;
    ///
    /// let kind = TerminatorKind::custom_payment("BPE").unwrap();
    /// assert_eq!(kind.literal(), "BPET");
    /// assert!(TerminatorKind::custom_payment("TOOLONG").is_err());
    /// ```
    pub fn custom_payment(code: &str) -> Result<Self> {
        Ok(TerminatorKind::CustomPayment(PaymentCode::new(code)?))
    }
}

impl fmt::Display for TerminatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal())
    }
}

/// A merchant-configured payment code: exactly 3 ASCII alphanumerics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentCode([u8; 3]);

impl PaymentCode {
    pub fn new(code: &str) -> Result<Self> {
        let bytes: [u8; 3] = code
            .as_bytes()
            .try_into()
            .map_err(|_| ScontrinoError::InvalidPaymentCode(code.to_string()))?;
        if !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return Err(ScontrinoError::InvalidPaymentCode(code.to_string()));
        }
        Ok(Self(bytes))
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII bytes are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl TryFrom<String> for PaymentCode {
    type Error = ScontrinoError;

    fn try_from(code: String) -> Result<Self> {
        Self::new(&code)
    }
}

impl From<PaymentCode> for String {
    fn from(code: PaymentCode) -> Self {
        code.as_str().to_string()
    }
}

/// The closing element of a command: optional value, then the code literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminator {
    value: Option<String>,
    kind: TerminatorKind,
}

impl Terminator {
    /// A bare terminator with no leading value.
    pub fn new(kind: TerminatorKind) -> Self {
        Self { value: None, kind }
    }

    /// A terminator whose value is written verbatim before the code.
    pub fn with_value(value: impl Into<String>, kind: TerminatorKind) -> Self {
        Self {
            value: Some(value.into()),
            kind,
        }
    }

    pub fn kind(&self) -> TerminatorKind {
        self.kind
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Render the terminator. Never fails.
    pub fn encode(&self) -> String {
        let literal = self.kind.literal();
        match &self.value {
            Some(value) => format!("{}{}", value, literal),
            None => literal.into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_encode() {
        assert_eq!(Terminator::new(TerminatorKind::Sold).encode(), "R");
        assert_eq!(
            Terminator::with_value("3", TerminatorKind::Sold).encode(),
            "3R"
        );
        assert_eq!(
            Terminator::new(TerminatorKind::PrintCourtesyMessage).encode(),
            "@40F"
        );
    }

    #[test]
    fn test_aliases_keep_distinct_codes() {
        assert_eq!(TerminatorKind::PaymentCash.literal(), "1T");
        assert_eq!(TerminatorKind::PaymentCash2.literal(), "6T");
        assert_eq!(TerminatorKind::PaymentTicket4.literal(), "22T");
        assert_ne!(TerminatorKind::PaymentCash, TerminatorKind::PaymentCash2);
        // Two names for the same code
        assert_eq!(
            TerminatorKind::AdditionalDescription.literal(),
            TerminatorKind::PrintTextLine.literal()
        );
    }

    #[test]
    fn test_table_is_complete() {
        assert_eq!(TerminatorKind::ALL.len(), 83);
        let literals: HashSet<_> = TerminatorKind::ALL.iter().map(|k| k.literal()).collect();
        // "@" is the only shared literal
        assert_eq!(literals.len(), TerminatorKind::ALL.len() - 1);
        assert!(TerminatorKind::ALL.iter().all(|k| !k.literal().is_empty()));
    }

    #[test]
    fn test_is_payment() {
        assert!(TerminatorKind::PaymentCards.is_payment());
        assert!(TerminatorKind::PaymentOneTimeCoupon.is_payment());
        assert!(!TerminatorKind::Sold.is_payment());
        assert!(!TerminatorKind::PaymentWithCredit.is_payment());
        let payments = TerminatorKind::ALL.iter().filter(|k| k.is_payment()).count();
        assert_eq!(payments, 15);
    }

    #[test]
    fn test_custom_payment() {
        let kind = TerminatorKind::custom_payment("A01").unwrap();
        assert_eq!(kind.literal(), "A01T");
        assert!(kind.is_payment());

        for bad in ["", "AB", "ABCD", "A-1"] {
            assert!(matches!(
                TerminatorKind::custom_payment(bad),
                Err(ScontrinoError::InvalidPaymentCode(_))
            ));
        }
    }

    #[test]
    fn test_serde_names() {
        let kind: TerminatorKind = serde_json::from_str("\"payment-cards\"").unwrap();
        assert_eq!(kind, TerminatorKind::PaymentCards);
        let kind: TerminatorKind =
            serde_json::from_str("\"discount-percent-transaction\"").unwrap();
        assert_eq!(kind, TerminatorKind::DiscountPercentTransaction);
        let kind: TerminatorKind = serde_json::from_str("\"print-barcode-ean13\"").unwrap();
        assert_eq!(kind.literal(), "1Z");
        let kind: TerminatorKind = serde_json::from_str(r#"{"custom-payment":"XYZ"}"#).unwrap();
        assert_eq!(kind.literal(), "XYZT");
        assert!(serde_json::from_str::<TerminatorKind>(r#"{"custom-payment":"X"}"#).is_err());
    }
}

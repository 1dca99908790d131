//! # Fiscal Documents
//!
//! A document is an ordered list of commands forming one complete printer
//! interaction: a receipt, a return, an invoice, a block of free text.
//! The constructors fix the command order and check the constraints that
//! span several commands; the order itself is the protocol's state machine
//! (open before content, content before payment or close).
//!
//! ```
//! use scontrino::document::{Commercial, Document};
//! use scontrino::protocol::commands::{Payment, Product, Trailer};
//! use scontrino::protocol::terminator::TerminatorKind;
//!
//! let receipt = Commercial::new(
//!     vec![Product::new(750).description("BREAD")],
//!     vec![Payment::new(TerminatorKind::PaymentCash)?],
//! )
//! .trailer(Trailer::new("Thank you"));
//!
//! let blocks = Document::from(receipt).encode()?;
//! assert_eq!(blocks.len(), 3);
//! assert_eq!(blocks[0], "\"BREAD\"750HR");
//! assert_eq!(blocks[2], "1T");
//! # Ok::<(), scontrino::ScontrinoError>(())
//! ```
//!
//! ## All-or-Nothing Encoding
//!
//! [`Document::encode`] serializes every command before returning. A single
//! malformed command fails the whole document, so a transport never writes
//! half a receipt.

mod id;

pub use id::DocumentId;

use chrono::NaiveDate;

use crate::error::{Result, ScontrinoError};
use crate::protocol::commands::{
    Command, ControlOp, CustomerIdentifier, DiscountAmount, DiscountPercentage, InvoiceDetails,
    OpenCommercialReversal, OpenInvoice, OpenInvoiceCommercialDocument, OpenPosReversal, Payment,
    Product, Reversal, TextLine, Trailer,
};

/// Customer detail lines accepted by an invoice.
pub const CUSTOMER_DETAILS_RANGE: std::ops::RangeInclusive<usize> = 1..=5;

/// Encode every command, failing on the first bad one with nothing emitted.
pub fn encode_commands(commands: &[Command]) -> Result<Vec<String>> {
    commands.iter().map(Command::encode).collect()
}

fn check_customer_details(details: &[InvoiceDetails]) -> Result<()> {
    if !CUSTOMER_DETAILS_RANGE.contains(&details.len()) {
        return Err(ScontrinoError::InvalidCustomerDetailsCount(details.len()));
    }
    Ok(())
}

// ============================================================================
// COMMERCIAL
// ============================================================================

/// A fiscal receipt.
///
/// Command order: products, discount amount, discount percentage, customer
/// identifier, trailer, payments. Missing optional commands are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Commercial {
    products: Vec<Product>,
    discount_amount: Option<DiscountAmount>,
    discount_percentage: Option<DiscountPercentage>,
    customer_id: Option<CustomerIdentifier>,
    trailer: Option<Trailer>,
    payments: Vec<Payment>,
}

impl Commercial {
    pub fn new(products: Vec<Product>, payments: Vec<Payment>) -> Self {
        Self {
            products,
            discount_amount: None,
            discount_percentage: None,
            customer_id: None,
            trailer: None,
            payments,
        }
    }

    pub fn discount_amount(mut self, discount: DiscountAmount) -> Self {
        self.discount_amount = Some(discount);
        self
    }

    pub fn discount_percentage(mut self, discount: DiscountPercentage) -> Self {
        self.discount_percentage = Some(discount);
        self
    }

    pub fn customer_id(mut self, id: CustomerIdentifier) -> Self {
        self.customer_id = Some(id);
        self
    }

    pub fn trailer(mut self, trailer: Trailer) -> Self {
        self.trailer = Some(trailer);
        self
    }

    pub fn commands(&self) -> Vec<Command> {
        let mut commands: Vec<Command> =
            Vec::with_capacity(self.products.len() + self.payments.len() + 4);
        commands.extend(self.products.iter().cloned().map(Command::from));
        commands.extend(self.discount_amount.clone().map(Command::from));
        commands.extend(self.discount_percentage.clone().map(Command::from));
        commands.extend(self.customer_id.clone().map(Command::from));
        commands.extend(self.trailer.clone().map(Command::from));
        commands.extend(self.payments.iter().cloned().map(Command::from));
        commands
    }
}

// ============================================================================
// MANAGEMENT
// ============================================================================

/// Free-text document: `j`, one `"row"@` per row (cut at 46 chars), `J`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Management {
    rows: Vec<TextLine>,
}

impl Management {
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Self {
        Self {
            rows: rows.iter().map(|row| TextLine::new(row.as_ref())).collect(),
        }
    }

    pub fn commands(&self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(self.rows.len() + 2);
        commands.push(Command::from(ControlOp::OpenManagement));
        commands.extend(self.rows.iter().cloned().map(Command::from));
        commands.push(Command::from(ControlOp::CloseManagement));
        commands
    }
}

// ============================================================================
// RETURNS AND CANCELLATIONS
// ============================================================================

/// Return or cancellation of a commercial document printed by this device.
///
/// Without a product the whole original document is returned or cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommercialReversal {
    open: OpenCommercialReversal,
    reversal: Reversal,
    product: Option<Product>,
    payment: Option<Payment>,
}

impl CommercialReversal {
    pub fn commercial_return(id: DocumentId) -> Self {
        Self {
            open: OpenCommercialReversal::commercial_return(id),
            reversal: Reversal::Return,
            product: None,
            payment: None,
        }
    }

    pub fn cancellation(id: DocumentId) -> Self {
        Self {
            open: OpenCommercialReversal::cancellation(id),
            reversal: Reversal::Cancellation,
            product: None,
            payment: None,
        }
    }

    pub fn product(mut self, product: Product) -> Self {
        self.product = Some(product);
        self
    }

    pub fn payment(mut self, payment: Payment) -> Self {
        self.payment = Some(payment);
        self
    }

    pub fn commands(&self) -> Vec<Command> {
        let mut commands = vec![Command::from(self.open.clone())];
        commands.extend(self.product.clone().map(Command::from));
        commands.extend(self.payment.clone().map(Command::from));
        commands
    }
}

/// Return or cancellation of a document issued by a POS terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosReversal {
    open: OpenPosReversal,
    reversal: Reversal,
    product: Option<Product>,
    payment: Option<Payment>,
}

impl PosReversal {
    pub fn pos_return(date: NaiveDate) -> Self {
        Self {
            open: OpenPosReversal::pos_return(date),
            reversal: Reversal::Return,
            product: None,
            payment: None,
        }
    }

    pub fn cancellation(date: NaiveDate) -> Self {
        Self {
            open: OpenPosReversal::cancellation(date),
            reversal: Reversal::Cancellation,
            product: None,
            payment: None,
        }
    }

    pub fn product(mut self, product: Product) -> Self {
        self.product = Some(product);
        self
    }

    pub fn payment(mut self, payment: Payment) -> Self {
        self.payment = Some(payment);
        self
    }

    pub fn commands(&self) -> Vec<Command> {
        let mut commands = vec![Command::from(self.open.clone())];
        commands.extend(self.product.clone().map(Command::from));
        commands.extend(self.payment.clone().map(Command::from));
        commands
    }
}

// ============================================================================
// INVOICES
// ============================================================================

/// A direct invoice.
///
/// Command order: customer details, open invoice, products, payments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    open: OpenInvoice,
    customer_details: Vec<InvoiceDetails>,
    products: Vec<Product>,
    payments: Vec<Payment>,
}

impl Invoice {
    /// ## Errors
    ///
    /// - [`ScontrinoError::InvalidCustomerDetailsCount`] unless 1 to 5 detail lines
    /// - [`ScontrinoError::MissingProducts`] / [`ScontrinoError::MissingPayments`]
    ///   when either list is empty
    pub fn new(
        open: OpenInvoice,
        customer_details: Vec<InvoiceDetails>,
        products: Vec<Product>,
        payments: Vec<Payment>,
    ) -> Result<Self> {
        check_customer_details(&customer_details)?;
        if products.is_empty() {
            return Err(ScontrinoError::MissingProducts);
        }
        if payments.is_empty() {
            return Err(ScontrinoError::MissingPayments);
        }
        Ok(Self {
            open,
            customer_details,
            products,
            payments,
        })
    }

    pub fn commands(&self) -> Vec<Command> {
        let mut commands: Vec<Command> = self
            .customer_details
            .iter()
            .cloned()
            .map(Command::from)
            .collect();
        commands.push(Command::from(self.open.clone()));
        commands.extend(self.products.iter().cloned().map(Command::from));
        commands.extend(self.payments.iter().cloned().map(Command::from));
        commands
    }
}

/// An invoice issued on top of a commercial document.
///
/// [`CommercialWithInvoice::commands`] holds only the invoice part (customer
/// details, then `111M`); the wrapped receipt is reached through
/// [`CommercialWithInvoice::commercial`] and encoded on its own, in its own
/// order. [`Document::encode_all`] sends both, invoice part first.
#[derive(Debug, Clone, PartialEq)]
pub struct CommercialWithInvoice {
    open: OpenInvoiceCommercialDocument,
    customer_details: Vec<InvoiceDetails>,
    commercial: Commercial,
}

impl CommercialWithInvoice {
    pub fn new(
        open: OpenInvoiceCommercialDocument,
        customer_details: Vec<InvoiceDetails>,
        commercial: Commercial,
    ) -> Result<Self> {
        check_customer_details(&customer_details)?;
        Ok(Self {
            open,
            customer_details,
            commercial,
        })
    }

    pub fn commercial(&self) -> &Commercial {
        &self.commercial
    }

    pub fn commands(&self) -> Vec<Command> {
        let mut commands: Vec<Command> = self
            .customer_details
            .iter()
            .cloned()
            .map(Command::from)
            .collect();
        commands.push(Command::from(self.open.clone()));
        commands
    }
}

// ============================================================================
// DOCUMENT
// ============================================================================

/// Any document the printer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Commercial(Commercial),
    Management(Management),
    CommercialReversal(CommercialReversal),
    PosReversal(PosReversal),
    Invoice(Invoice),
    CommercialWithInvoice(CommercialWithInvoice),
}

impl Document {
    /// The ordered commands of this document.
    pub fn commands(&self) -> Vec<Command> {
        match self {
            Document::Commercial(d) => d.commands(),
            Document::Management(d) => d.commands(),
            Document::CommercialReversal(d) => d.commands(),
            Document::PosReversal(d) => d.commands(),
            Document::Invoice(d) => d.commands(),
            Document::CommercialWithInvoice(d) => d.commands(),
        }
    }

    /// Wire text of every command, in order.
    pub fn encode(&self) -> Result<Vec<String>> {
        encode_commands(&self.commands())
    }

    /// Everything a printer must receive for this document.
    ///
    /// Same as [`Document::encode`], except that a [`CommercialWithInvoice`]
    /// is followed by its wrapped receipt, unchanged. Both parts are encoded
    /// before anything is returned.
    pub fn encode_all(&self) -> Result<Vec<String>> {
        let mut blocks = self.encode()?;
        if let Document::CommercialWithInvoice(d) = self {
            blocks.extend(encode_commands(&d.commercial().commands())?);
        }
        Ok(blocks)
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Commercial(_) => "commercial",
            Document::Management(_) => "management",
            Document::CommercialReversal(d) => match d.reversal {
                Reversal::Return => "commercial_return",
                Reversal::Cancellation => "commercial_cancellation",
            },
            Document::PosReversal(d) => match d.reversal {
                Reversal::Return => "pos_return",
                Reversal::Cancellation => "pos_cancellation",
            },
            Document::Invoice(_) => "invoice",
            Document::CommercialWithInvoice(_) => "commercial_with_invoice",
        }
    }
}

impl From<Commercial> for Document {
    fn from(d: Commercial) -> Self {
        Document::Commercial(d)
    }
}

impl From<Management> for Document {
    fn from(d: Management) -> Self {
        Document::Management(d)
    }
}

impl From<CommercialReversal> for Document {
    fn from(d: CommercialReversal) -> Self {
        Document::CommercialReversal(d)
    }
}

impl From<PosReversal> for Document {
    fn from(d: PosReversal) -> Self {
        Document::PosReversal(d)
    }
}

impl From<Invoice> for Document {
    fn from(d: Invoice) -> Self {
        Document::Invoice(d)
    }
}

impl From<CommercialWithInvoice> for Document {
    fn from(d: CommercialWithInvoice) -> Self {
        Document::CommercialWithInvoice(d)
    }
}

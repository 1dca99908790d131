//! # Epson FP Command Catalog
//!
//! One constructor per printer instruction. Each instruction type owns its
//! typed, already-validated values; the wire text is produced on demand by
//! [`Command::encode`], which funnels every variant through [`serialize`].
//!
//! ## Command Anatomy
//!
//! ```text
//! Field Field ... Terminator
//! "BREAD" 2*  750H  3R
//! ```
//!
//! Fields carry data, the terminator carries the operation code (optionally
//! prefixed with a value such as the department number).
//!
//! ## Example
//!
//! ```
//! use scontrino::protocol::commands::{Command, Product};
//!
//! let bread = Product::new(750).description("BREAD").quantity(2).department(3);
//! assert_eq!(Command::from(bread).encode().unwrap(), "\"BREAD\"2*750H3R");
//! ```
//!
//! ## Text Widths
//!
//! All widths below count characters, not bytes.
//!
//! | Instruction | Min (padded) | Max (truncated) |
//! |-------------|--------------|-----------------|
//! | Product description | - | 38 |
//! | Trailer | 39 | 46 |
//! | Invoice details | 40 | 46 |
//! | Text line | - | 46 |

use chrono::NaiveDate;

use super::field::{Field, SeparatorKind};
use super::terminator::{Terminator, TerminatorKind};
use crate::document::DocumentId;
use crate::error::{Result, ScontrinoError};

// ============================================================================
// WIDTH LIMITS
// ============================================================================

/// Longest product description the printer accepts.
pub const MAX_PRODUCT_DESCRIPTION: usize = 38;

/// Longest printable line.
pub const MAX_LINE_WIDTH: usize = 46;

/// Trailers shorter than this are right-padded with spaces.
pub const TRAILER_MIN_WIDTH: usize = 39;

/// Invoice detail lines shorter than this are right-padded with spaces.
pub const INVOICE_DETAILS_MIN_WIDTH: usize = 40;

/// Valid customer identifier lengths: tax code, VAT number, lottery code.
pub const CUSTOMER_IDENTIFIER_LENGTHS: [usize; 3] = [16, 11, 8];

/// Invoice numbers the printer can be told explicitly; anything else is
/// sent as `00000` and numbered by the device.
const INVOICE_NUMBER_RANGE: std::ops::RangeInclusive<u32> = 1..=99_999;

// ============================================================================
// SHARED COMPOSITION
// ============================================================================

/// Compose a command from its fields and terminator.
///
/// Every field is encoded before anything is returned, so a malformed field
/// yields an error and no partial command.
pub fn serialize(fields: &[Field], terminator: &Terminator) -> Result<String> {
    let mut out = String::new();
    for field in fields {
        out.push_str(&field.encode()?);
    }
    out.push_str(&terminator.encode());
    Ok(out)
}

/// The parts every instruction type exposes to [`serialize`].
pub trait Instruction {
    fn fields(&self) -> Vec<Field>;
    fn terminator(&self) -> Terminator;
}

fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Pad with trailing spaces to `min` characters, cut at `max`.
fn fit(text: &str, min: usize, max: usize) -> String {
    let mut out = truncate(text, max);
    let len = out.chars().count();
    if len < min {
        out.extend(std::iter::repeat_n(' ', min - len));
    }
    out
}

fn invoice_number_field(number: Option<u32>) -> Field {
    let number = number
        .filter(|n| INVOICE_NUMBER_RANGE.contains(n))
        .unwrap_or(0);
    Field::description(format!("{:05}", number))
}

// ============================================================================
// SALES
// ============================================================================

/// # Sell a Product (`R`)
///
/// ## Protocol Details
///
/// | Part | Form | Present when |
/// |------|------|--------------|
/// | description | `"text"` | description set (cut to 38 chars) |
/// | quantity | `n*` | quantity set |
/// | unit price | `nH` | price is not zero |
/// | terminator | `[department]R` | always |
///
/// A sale without department omits the terminator value and the printer
/// books it on its default department.
///
/// ## Example
///
/// ```
/// use scontrino::protocol::commands::{Command, Product};
///
/// assert_eq!(Command::from(Product::new(750)).encode().unwrap(), "750HR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    description: Option<String>,
    quantity: Option<u32>,
    unit_price: u64,
    department: Option<u32>,
}

impl Product {
    /// A sale at `unit_price` (in cents).
    pub fn new(unit_price: u64) -> Self {
        Self {
            description: None,
            quantity: None,
            unit_price,
            department: None,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(truncate(description, MAX_PRODUCT_DESCRIPTION));
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn department(mut self, department: u32) -> Self {
        self.department = Some(department);
        self
    }

    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }
}

impl Instruction for Product {
    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::with_capacity(3);
        if let Some(description) = &self.description {
            fields.push(Field::description(description.as_str()));
        }
        if let Some(quantity) = self.quantity {
            fields.push(Field::multiply(quantity.into()));
        }
        if self.unit_price != 0 {
            fields.push(Field::value(self.unit_price));
        }
        fields
    }

    fn terminator(&self) -> Terminator {
        match self.department {
            Some(department) => {
                Terminator::with_value(department.to_string(), TerminatorKind::Sold)
            }
            None => Terminator::new(TerminatorKind::Sold),
        }
    }
}

/// Percentage discount on the whole transaction (`1M`).
///
/// The percentage is always written with two decimals: `10` → `10.001M`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountPercentage {
    percentage: f64,
}

impl DiscountPercentage {
    pub fn new(percentage: f64) -> Self {
        Self { percentage }
    }
}

impl Instruction for DiscountPercentage {
    fn fields(&self) -> Vec<Field> {
        vec![Field::new(
            format!("{:.2}", self.percentage),
            SeparatorKind::Decimal,
        )]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(TerminatorKind::DiscountPercentTransaction)
    }
}

/// Fixed discount on the whole transaction (`3M`), amount in cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountAmount {
    amount: u64,
}

impl DiscountAmount {
    pub fn new(amount: u64) -> Self {
        Self { amount }
    }
}

impl Instruction for DiscountAmount {
    fn fields(&self) -> Vec<Field> {
        vec![Field::value(self.amount)]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(TerminatorKind::DiscountValueTransaction)
    }
}

/// # Record a Payment (`nT`)
///
/// Without an amount the receipt is settled entirely with this method. With
/// an amount the printer computes change.
///
/// ## Protocol Details
///
/// | Part | Form | Present when |
/// |------|------|--------------|
/// | amount | `nH` | amount set |
/// | description | `"text"` | description set |
/// | terminator | payment code | always |
///
/// ## Example
///
/// ```
/// use scontrino::protocol::commands::{Command, Payment};
/// use scontrino::protocol::terminator::TerminatorKind;
///
/// let payment = Payment::new(TerminatorKind::PaymentCards)?.amount(100).description("test");
/// assert_eq!(Command::from(payment).encode()?, "100H\"test\"3T");
///
/// assert!(Payment::new(TerminatorKind::Sold).is_err());
/// # Ok::<(), scontrino::ScontrinoError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    method: TerminatorKind,
    amount: Option<u64>,
    description: Option<String>,
}

impl Payment {
    /// Start a payment with `method`, which must be a payment code.
    pub fn new(method: TerminatorKind) -> Result<Self> {
        if !method.is_payment() {
            return Err(ScontrinoError::InvalidPaymentMethod(
                method.literal().into_owned(),
            ));
        }
        Ok(Self {
            method,
            amount: None,
            description: None,
        })
    }

    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn method(&self) -> TerminatorKind {
        self.method
    }
}

impl Instruction for Payment {
    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::with_capacity(2);
        if let Some(amount) = self.amount {
            fields.push(Field::value(amount));
        }
        if let Some(description) = &self.description {
            fields.push(Field::description(description.as_str()));
        }
        fields
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(self.method)
    }
}

// ============================================================================
// RECEIPT DECORATIONS
// ============================================================================

/// Courtesy message printed at the bottom of a receipt (`@40F`).
///
/// Padded to 39 characters, cut at 46.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    text: String,
}

impl Trailer {
    pub fn new(text: &str) -> Self {
        Self {
            text: fit(text, TRAILER_MIN_WIDTH, MAX_LINE_WIDTH),
        }
    }
}

impl Instruction for Trailer {
    fn fields(&self) -> Vec<Field> {
        vec![Field::description(self.text.as_str())]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(TerminatorKind::PrintCourtesyMessage)
    }
}

/// # Print a Customer Identifier (`@39F`)
///
/// | Length | Meaning |
/// |--------|---------|
/// | 16 | tax code (codice fiscale) |
/// | 11 | VAT number, without country prefix |
/// | 8 | lottery code |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerIdentifier {
    id: String,
}

impl CustomerIdentifier {
    pub fn new(id: &str) -> Result<Self> {
        let len = id.chars().count();
        if !CUSTOMER_IDENTIFIER_LENGTHS.contains(&len) {
            return Err(ScontrinoError::InvalidIdentifierLength(len));
        }
        Ok(Self { id: id.to_string() })
    }
}

impl Instruction for CustomerIdentifier {
    fn fields(&self) -> Vec<Field> {
        vec![Field::description(self.id.as_str())]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(TerminatorKind::PrintCustomerIdentifier)
    }
}

/// EAN13 (`1Z`) or EAN8 (`2Z`) barcode, picked from the code length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    code: String,
    kind: TerminatorKind,
}

impl Barcode {
    pub fn new(code: &str) -> Result<Self> {
        let kind = match code.chars().count() {
            13 => TerminatorKind::PrintBarcodeEan13,
            8 => TerminatorKind::PrintBarcodeEan8,
            len => return Err(ScontrinoError::InvalidBarcodeLength(len)),
        };
        Ok(Self {
            code: code.to_string(),
            kind,
        })
    }
}

impl Instruction for Barcode {
    fn fields(&self) -> Vec<Field> {
        vec![Field::description(self.code.as_str())]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(self.kind)
    }
}

// ============================================================================
// DOCUMENT OPENERS
// ============================================================================

/// Whether a prior sale is being returned or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reversal {
    Return,
    Cancellation,
}

/// # Open a Return/Cancellation of a Commercial Document (`104M` / `105M`)
///
/// The single field is the identifier of the original receipt.
///
/// ```text
/// "0012-0023-01-01-18"104M
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenCommercialReversal {
    id: DocumentId,
    reversal: Reversal,
}

impl OpenCommercialReversal {
    pub fn commercial_return(id: DocumentId) -> Self {
        Self {
            id,
            reversal: Reversal::Return,
        }
    }

    pub fn cancellation(id: DocumentId) -> Self {
        Self {
            id,
            reversal: Reversal::Cancellation,
        }
    }
}

impl Instruction for OpenCommercialReversal {
    fn fields(&self) -> Vec<Field> {
        vec![Field::description(self.id.to_string())]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(match self.reversal {
            Reversal::Return => TerminatorKind::OpenCommercialReturn,
            Reversal::Cancellation => TerminatorKind::OpenCommercialCancellation,
        })
    }
}

/// # Open a Return/Cancellation of a POS Document (`106M` / `107M`)
///
/// The field is the sale date as `MM-DD-YY/POS`.
///
/// ```text
/// "01-31-18/POS"106M
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenPosReversal {
    date: NaiveDate,
    reversal: Reversal,
}

impl OpenPosReversal {
    pub fn pos_return(date: NaiveDate) -> Self {
        Self {
            date,
            reversal: Reversal::Return,
        }
    }

    pub fn cancellation(date: NaiveDate) -> Self {
        Self {
            date,
            reversal: Reversal::Cancellation,
        }
    }
}

impl Instruction for OpenPosReversal {
    fn fields(&self) -> Vec<Field> {
        vec![Field::description(format!(
            "{}/POS",
            self.date.format("%m-%d-%y")
        ))]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(match self.reversal {
            Reversal::Return => TerminatorKind::OpenPosReturn,
            Reversal::Cancellation => TerminatorKind::OpenPosCancellation,
        })
    }
}

/// Open a direct invoice (`101M`).
///
/// The number is zero-padded to 5 digits. `None`, zero, or anything above
/// 99999 sends `00000` and lets the printer number the invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenInvoice {
    number: Option<u32>,
}

impl OpenInvoice {
    pub fn new(number: Option<u32>) -> Self {
        Self { number }
    }
}

impl Instruction for OpenInvoice {
    fn fields(&self) -> Vec<Field> {
        vec![invoice_number_field(self.number)]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(TerminatorKind::DirectInvoice)
    }
}

/// Open an invoice for the commercial document just printed (`111M`).
///
/// Numbering follows [`OpenInvoice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenInvoiceCommercialDocument {
    number: Option<u32>,
}

impl OpenInvoiceCommercialDocument {
    pub fn new(number: Option<u32>) -> Self {
        Self { number }
    }
}

impl Instruction for OpenInvoiceCommercialDocument {
    fn fields(&self) -> Vec<Field> {
        vec![invoice_number_field(self.number)]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(TerminatorKind::InvoiceCommercialDocument)
    }
}

/// One line of customer details on an invoice (`@38F`).
///
/// Padded to 40 characters, cut at 46.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDetails {
    text: String,
}

impl InvoiceDetails {
    pub fn new(text: &str) -> Self {
        Self {
            text: fit(text, INVOICE_DETAILS_MIN_WIDTH, MAX_LINE_WIDTH),
        }
    }
}

impl Instruction for InvoiceDetails {
    fn fields(&self) -> Vec<Field> {
        vec![Field::description(self.text.as_str())]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(TerminatorKind::InvoiceCustomerDetails)
    }
}

// ============================================================================
// FREE TEXT AND DISPLAY
// ============================================================================

/// A free-text row of a management document (`@`), cut at 46 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    text: String,
}

impl TextLine {
    pub fn new(text: &str) -> Self {
        Self {
            text: truncate(text, MAX_LINE_WIDTH),
        }
    }
}

impl Instruction for TextLine {
    fn fields(&self) -> Vec<Field> {
        vec![Field::description(self.text.as_str())]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(TerminatorKind::AdditionalDescription)
    }
}

/// Customer display row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayLine {
    First,
    Second,
}

/// Show a message on the customer display (`1%` / `2%`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    text: String,
    line: DisplayLine,
}

impl DisplayMessage {
    /// Line 1 targets the first row; any other number targets the second.
    pub fn new(text: &str, line: u8) -> Self {
        let line = if line == 1 {
            DisplayLine::First
        } else {
            DisplayLine::Second
        };
        Self {
            text: text.to_string(),
            line,
        }
    }
}

impl Instruction for DisplayMessage {
    fn fields(&self) -> Vec<Field> {
        vec![Field::description(self.text.as_str())]
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(match self.line {
            DisplayLine::First => TerminatorKind::ViewDescriptionOnDisplayFirstLine,
            DisplayLine::Second => TerminatorKind::ViewDescriptionOnDisplaySecondLine,
        })
    }
}

// ============================================================================
// CONTROL
// ============================================================================

/// Instructions made of a bare terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlOp {
    OpenDrawer,
    Clear,
    CancelDocument,
    Subtotal,
    FinancialReport,
    DepartmentReport,
    PluReport,
    OperatorsReport,
    FinancialReportZeroing,
    DepartmentReportZeroing,
    PluReportZeroing,
    OperatorsReportZeroing,
    /// Financial report followed by the daily fiscal closure
    DailyClosure,
    OpenManagement,
    CloseManagement,
}

impl ControlOp {
    pub const ALL: &'static [ControlOp] = &[
        ControlOp::OpenDrawer,
        ControlOp::Clear,
        ControlOp::CancelDocument,
        ControlOp::Subtotal,
        ControlOp::FinancialReport,
        ControlOp::DepartmentReport,
        ControlOp::PluReport,
        ControlOp::OperatorsReport,
        ControlOp::FinancialReportZeroing,
        ControlOp::DepartmentReportZeroing,
        ControlOp::PluReportZeroing,
        ControlOp::OperatorsReportZeroing,
        ControlOp::DailyClosure,
        ControlOp::OpenManagement,
        ControlOp::CloseManagement,
    ];

    pub fn kind(self) -> TerminatorKind {
        match self {
            ControlOp::OpenDrawer => TerminatorKind::OpenCashRegister,
            ControlOp::Clear => TerminatorKind::Clear,
            ControlOp::CancelDocument => TerminatorKind::CancelDocumentOrInvoice,
            ControlOp::Subtotal => TerminatorKind::Subtotal,
            ControlOp::FinancialReport => TerminatorKind::FinancialReportNoZeroing,
            ControlOp::DepartmentReport => TerminatorKind::DepartmentReportNoZeroing,
            ControlOp::PluReport => TerminatorKind::PluReportNoZeroing,
            ControlOp::OperatorsReport => TerminatorKind::OperatorsReportNoZeroing,
            ControlOp::FinancialReportZeroing => TerminatorKind::FinancialReportZeroing,
            ControlOp::DepartmentReportZeroing => TerminatorKind::DepartmentReportZeroing,
            ControlOp::PluReportZeroing => TerminatorKind::PluReportZeroing,
            ControlOp::OperatorsReportZeroing => TerminatorKind::OperatorsReportZeroing,
            ControlOp::DailyClosure => TerminatorKind::FinancialReportAndFiscalClosureZeroing,
            ControlOp::OpenManagement => TerminatorKind::OpenManagementDocument,
            ControlOp::CloseManagement => TerminatorKind::CloseManagementDocument,
        }
    }

    /// Kebab-case name, as accepted by [`ControlOp::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            ControlOp::OpenDrawer => "open-drawer",
            ControlOp::Clear => "clear",
            ControlOp::CancelDocument => "cancel-document",
            ControlOp::Subtotal => "subtotal",
            ControlOp::FinancialReport => "financial-report",
            ControlOp::DepartmentReport => "department-report",
            ControlOp::PluReport => "plu-report",
            ControlOp::OperatorsReport => "operators-report",
            ControlOp::FinancialReportZeroing => "financial-report-zeroing",
            ControlOp::DepartmentReportZeroing => "department-report-zeroing",
            ControlOp::PluReportZeroing => "plu-report-zeroing",
            ControlOp::OperatorsReportZeroing => "operators-report-zeroing",
            ControlOp::DailyClosure => "daily-closure",
            ControlOp::OpenManagement => "open-management",
            ControlOp::CloseManagement => "close-management",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }
}

impl Instruction for ControlOp {
    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }

    fn terminator(&self) -> Terminator {
        Terminator::new(self.kind())
    }
}

/// Ad-hoc command for codes without a dedicated constructor.
///
/// Fields are only checked when the command is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    fields: Vec<Field>,
    terminator: Terminator,
}

impl RawCommand {
    pub fn new(fields: Vec<Field>, terminator: Terminator) -> Self {
        Self { fields, terminator }
    }
}

impl Instruction for RawCommand {
    fn fields(&self) -> Vec<Field> {
        self.fields.clone()
    }

    fn terminator(&self) -> Terminator {
        self.terminator.clone()
    }
}

// ============================================================================
// COMMAND
// ============================================================================

/// Define the Command enum, its `From` conversions and the dispatch to
/// [`Instruction`] from a single list.
macro_rules! define_commands {
    ($($variant:ident($inner:ty)),+ $(,)?) => {
        /// One printer instruction.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Command {
            $($variant($inner),)+
        }

        $(
            impl From<$inner> for Command {
                fn from(inner: $inner) -> Self {
                    Command::$variant(inner)
                }
            }
        )+

        impl Instruction for Command {
            fn fields(&self) -> Vec<Field> {
                match self { $(Command::$variant(c) => c.fields(),)+ }
            }

            fn terminator(&self) -> Terminator {
                match self { $(Command::$variant(c) => c.terminator(),)+ }
            }
        }
    };
}

define_commands! {
    Product(Product),
    DiscountPercentage(DiscountPercentage),
    DiscountAmount(DiscountAmount),
    Payment(Payment),
    Trailer(Trailer),
    CustomerIdentifier(CustomerIdentifier),
    Barcode(Barcode),
    OpenCommercialReversal(OpenCommercialReversal),
    OpenPosReversal(OpenPosReversal),
    OpenInvoice(OpenInvoice),
    OpenInvoiceCommercialDocument(OpenInvoiceCommercialDocument),
    InvoiceDetails(InvoiceDetails),
    TextLine(TextLine),
    DisplayMessage(DisplayMessage),
    Control(ControlOp),
    Raw(RawCommand),
}

impl Command {
    /// Wire text of this command.
    pub fn encode(&self) -> Result<String> {
        serialize(&self.fields(), &self.terminator())
    }
}
